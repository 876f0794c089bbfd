//! Library repository: folders and saved items.
//!
//! # Responsibility
//! - Bootstrap the default folder structure on first access.
//! - Save, list, find and delete items inside the single `library` document.
//!
//! # Invariants
//! - After `ensure_initialized` succeeds the `notes` and `flowcharts`
//!   folders exist and the document in the store parses.
//! - New items are prepended to their folder; folder order never changes.
//! - A cancelled save adds nothing; on a valid document it writes nothing.
//! - Only store write failures are returned as errors.

use crate::model::library::{Folder, Item, ItemId, ItemType, Library, LibraryEntry};
use crate::store::{keys, KeyValueStore, StoreError};
use chrono::{DateTime, SubsecRound, Utc};
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Instant;
use uuid::Uuid;

static DOCUMENT_EXTENSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.pdf$").expect("valid document extension regex"));

static LAST_ID_MILLIS: AtomicI64 = AtomicI64::new(0);

const ITEM_ID_PREFIX: &str = "lib";
const ITEM_ID_SUFFIX_LEN: usize = 6;

pub type LibraryResult<T> = Result<T, LibraryError>;

/// Errors from library write paths.
#[derive(Debug)]
pub enum LibraryError {
    /// Store rejected the write (for example quota exceeded).
    Store(StoreError),
    /// Library document could not be encoded.
    Encode(serde_json::Error),
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "library write failed: {err}"),
            Self::Encode(err) => write!(f, "library document encoding failed: {err}"),
        }
    }
}

impl Error for LibraryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<StoreError> for LibraryError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Input for `save` and `save_named`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub kind: ItemType,
    pub content: String,
    /// Origin reference, e.g. the source document file name.
    pub source_label: Option<String>,
    /// Name pre-filled into the prompt.
    pub suggested_name: Option<String>,
    /// Destination folder id. Defaults to the type's folder.
    pub target_folder_id: Option<String>,
}

impl SaveRequest {
    pub fn new(kind: ItemType, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            source_label: None,
            suggested_name: None,
            target_folder_id: None,
        }
    }

    /// Name offered to the user before they confirm or edit it.
    pub fn prompt_default(&self) -> String {
        derive_item_name(
            self.kind,
            self.source_label.as_deref(),
            self.suggested_name.as_deref(),
        )
    }

    fn resolved_folder_id(&self) -> &str {
        self.target_folder_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| self.kind.default_folder_id())
    }
}

/// Result of a save that may be cancelled by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Item was prepended to its folder and persisted.
    Saved(Item),
    /// Name was empty after trimming; no item was added.
    Cancelled,
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }
}

enum StoredDocument {
    Valid(Library),
    Missing,
    Corrupt(String),
}

/// Repository over the persisted `library` document.
pub struct LibraryRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> LibraryRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Makes sure a valid library with both default folders is persisted.
    ///
    /// Idempotent: a valid, complete document is returned without writing.
    /// Absent or unparsable documents are overwritten with the defaults.
    ///
    /// # Errors
    /// - Returns `LibraryError::Store` when the repair write fails.
    pub fn ensure_initialized(&self) -> LibraryResult<Library> {
        match self.read_document() {
            StoredDocument::Valid(mut library) => {
                if library.restore_default_folders() {
                    info!("event=library_repair module=library status=ok reason=missing_default_folder");
                    self.persist(&library)?;
                }
                Ok(library)
            }
            StoredDocument::Missing => {
                let library = Library::default();
                self.persist(&library)?;
                info!("event=library_bootstrap module=library status=ok");
                Ok(library)
            }
            StoredDocument::Corrupt(reason) => {
                warn!(
                    "event=library_repair module=library status=reset reason=corrupt_document error={}",
                    reason
                );
                let library = Library::default();
                self.persist(&library)?;
                Ok(library)
            }
        }
    }

    /// Returns the current library. Never fails.
    ///
    /// When the repair write fails the defaults are still returned, but
    /// they are not persisted until a later write succeeds.
    pub fn load(&self) -> Library {
        match self.ensure_initialized() {
            Ok(library) => library,
            Err(err) => {
                warn!(
                    "event=library_load module=library status=degraded error_code=repair_write_failed error={}",
                    err
                );
                match self.read_document() {
                    StoredDocument::Valid(library) => library,
                    StoredDocument::Missing | StoredDocument::Corrupt(_) => Library::default(),
                }
            }
        }
    }

    /// Saves one item after asking `prompt` for its name.
    ///
    /// `prompt` receives the suggested name and returns the user's answer;
    /// `None` or a blank answer cancels the save and no item is added.
    /// The library is initialized before prompting, so a cancelled save on
    /// an absent or corrupt document still persists the repaired defaults.
    /// A missing target folder is created using its id as display name.
    pub fn save<P>(&self, request: SaveRequest, prompt: P) -> LibraryResult<SaveOutcome>
    where
        P: FnOnce(&str) -> Option<String>,
    {
        let library = self.ensure_initialized()?;
        let answer = prompt(request.prompt_default().as_str());
        let Some(name) = answer
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
        else {
            info!(
                "event=library_save module=library status=cancelled kind={}",
                request.kind.as_str()
            );
            return Ok(SaveOutcome::Cancelled);
        };

        let folder_id = request.resolved_folder_id().to_string();
        let item = self.insert_item(library, &folder_id, folder_id.as_str(), name, request)?;
        Ok(SaveOutcome::Saved(item))
    }

    /// Saves one item whose name was already collected by the caller.
    pub fn save_named(&self, request: SaveRequest, name: &str) -> LibraryResult<SaveOutcome> {
        self.save(request, |_| Some(name.to_string()))
    }

    /// Saves one item without prompting, into the type's default folder.
    ///
    /// Name precedence: `explicit_name`, then `source_label` without its
    /// `.pdf` suffix, then the type fallback (`Notes` / `Flowchart`).
    pub fn auto_save(
        &self,
        kind: ItemType,
        content: impl Into<String>,
        source_label: Option<&str>,
        explicit_name: Option<&str>,
    ) -> LibraryResult<Item> {
        let library = self.ensure_initialized()?;
        let name = derive_item_name(kind, source_label, explicit_name);
        let folder_id = kind.default_folder_id();
        let folder_name = default_folder_name(folder_id).unwrap_or(folder_id);
        let request = SaveRequest {
            source_label: source_label.map(str::to_string),
            ..SaveRequest::new(kind, content)
        };
        self.insert_item(library, folder_id, folder_name, name, request)
    }

    /// Lists all folders in stored order.
    pub fn list_folders(&self) -> Vec<Folder> {
        self.load().folders
    }

    /// Lists items across all folders, newest first within each folder,
    /// optionally filtered by type.
    pub fn list_items(&self, kind: Option<ItemType>) -> Vec<LibraryEntry> {
        self.load()
            .folders
            .into_iter()
            .flat_map(|folder| {
                let Folder { id, name, items } = folder;
                items
                    .into_iter()
                    .filter(move |item| kind.map_or(true, |wanted| item.kind == wanted))
                    .map(move |item| LibraryEntry {
                        folder_id: id.clone(),
                        folder_name: name.clone(),
                        item,
                    })
            })
            .collect()
    }

    /// Finds one item by id.
    pub fn find_item(&self, item_id: &str) -> Option<LibraryEntry> {
        self.list_items(None)
            .into_iter()
            .find(|entry| entry.item.id == item_id)
    }

    /// Deletes one item by id. Returns whether an item was removed.
    ///
    /// Nothing is written when the id is unknown.
    pub fn delete_item(&self, item_id: &str) -> LibraryResult<bool> {
        let mut library = self.ensure_initialized()?;
        let mut removed = false;
        for folder in &mut library.folders {
            let before = folder.items.len();
            folder.items.retain(|item| item.id != item_id);
            removed |= folder.items.len() != before;
        }

        if !removed {
            info!("event=library_delete module=library status=not_found");
            return Ok(false);
        }

        self.persist(&library)?;
        info!("event=library_delete module=library status=ok item_id={item_id}");
        Ok(true)
    }

    fn insert_item(
        &self,
        mut library: Library,
        folder_id: &str,
        folder_name: &str,
        name: String,
        request: SaveRequest,
    ) -> LibraryResult<Item> {
        let started_at = Instant::now();
        let now = Utc::now();
        let item = Item {
            id: next_item_id(now),
            name,
            kind: request.kind,
            content: request.content,
            source_label: request
                .source_label
                .filter(|label| !label.trim().is_empty()),
            created_at: now.trunc_subsecs(3),
        };

        library
            .folder_or_insert(folder_id, folder_name)
            .items
            .insert(0, item.clone());

        if let Err(err) = self.persist(&library) {
            warn!(
                "event=library_save module=library status=error folder_id={} duration_ms={} error={}",
                folder_id,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err);
        }

        info!(
            "event=library_save module=library status=ok kind={} folder_id={} item_id={} content_bytes={} duration_ms={}",
            item.kind.as_str(),
            folder_id,
            item.id,
            item.content.len(),
            started_at.elapsed().as_millis()
        );
        Ok(item)
    }

    fn read_document(&self) -> StoredDocument {
        let raw = match self.store.get(keys::LIBRARY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return StoredDocument::Missing,
            Err(err) => {
                warn!(
                    "event=library_read module=library status=error error_code=store_read_failed error={}",
                    err
                );
                return StoredDocument::Missing;
            }
        };

        match serde_json::from_str::<Library>(&raw) {
            Ok(library) => StoredDocument::Valid(library),
            Err(err) => StoredDocument::Corrupt(err.to_string()),
        }
    }

    fn persist(&self, library: &Library) -> LibraryResult<()> {
        let encoded = serde_json::to_string(library)?;
        self.store.set(keys::LIBRARY, &encoded)?;
        Ok(())
    }
}

/// Derives an item name from explicit name, source label or type.
pub fn derive_item_name(
    kind: ItemType,
    source_label: Option<&str>,
    explicit_name: Option<&str>,
) -> String {
    if let Some(name) = explicit_name.map(str::trim).filter(|name| !name.is_empty()) {
        return name.to_string();
    }

    source_label
        .map(|label| DOCUMENT_EXTENSION_RE.replace(label.trim(), "").trim().to_string())
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| kind.fallback_item_name().to_string())
}

fn default_folder_name(folder_id: &str) -> Option<&'static str> {
    crate::model::library::DEFAULT_FOLDERS
        .iter()
        .find(|(id, _)| *id == folder_id)
        .map(|(_, name)| *name)
}

/// Generates `lib_<epoch-ms>_<suffix>`.
///
/// The millisecond component is strictly increasing within the process,
/// so rapid successive saves never share it.
fn next_item_id(now: DateTime<Utc>) -> ItemId {
    let now_ms = now.timestamp_millis();
    let previous = LAST_ID_MILLIS
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| {
            Some(now_ms.max(last + 1))
        })
        .unwrap_or_else(|last| last);
    let millis = now_ms.max(previous + 1);
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{ITEM_ID_PREFIX}_{millis}_{}",
        &suffix[..ITEM_ID_SUFFIX_LEN]
    )
}
