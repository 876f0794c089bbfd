//! Library document model.
//!
//! # Invariants
//! - Folder ids are unique within one library.
//! - Items inside a folder are ordered newest first.
//! - `created_at` is set once at creation and never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Stable identifier of a saved item (`lib_<epoch-ms>_<suffix>`).
pub type ItemId = String;

/// Default folders every library carries: `(id, display name)`.
pub const DEFAULT_FOLDERS: [(&str, &str); 2] =
    [("notes", "📝 Notes"), ("flowcharts", "📊 Flowcharts")];

/// Kind of saved content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    /// Rendered note markup.
    Note,
    /// Diagram description source.
    Flowchart,
}

impl ItemType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Flowchart => "flowchart",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "note" => Some(Self::Note),
            "flowchart" => Some(Self::Flowchart),
            _ => None,
        }
    }

    /// Folder id that receives items of this type when no folder is given.
    pub fn default_folder_id(self) -> &'static str {
        match self {
            Self::Note => DEFAULT_FOLDERS[0].0,
            Self::Flowchart => DEFAULT_FOLDERS[1].0,
        }
    }

    /// Name used when neither an explicit name nor a source label exists.
    pub fn fallback_item_name(self) -> &'static str {
        match self {
            Self::Note => "Notes",
            Self::Flowchart => "Flowchart",
        }
    }
}

/// One saved note or flowchart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Serialized as `type` to match the persisted document naming.
    #[serde(rename = "type")]
    pub kind: ItemType,
    /// Opaque payload; never parsed by core.
    pub content: String,
    /// Origin reference such as the source document file name.
    #[serde(default, alias = "pdfName", deserialize_with = "blank_as_none")]
    pub source_label: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Named bucket of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    /// Display label, may contain decorative glyphs.
    pub name: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Folder {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            items: Vec::new(),
        }
    }
}

/// Root library document persisted under the `library` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    pub folders: Vec<Folder>,
}

impl Default for Library {
    fn default() -> Self {
        Self {
            folders: DEFAULT_FOLDERS
                .iter()
                .map(|(id, name)| Folder::new(*id, *name))
                .collect(),
        }
    }
}

impl Library {
    pub fn folder(&self, folder_id: &str) -> Option<&Folder> {
        self.folders.iter().find(|folder| folder.id == folder_id)
    }

    pub fn folder_mut(&mut self, folder_id: &str) -> Option<&mut Folder> {
        self.folders.iter_mut().find(|folder| folder.id == folder_id)
    }

    /// Returns the folder with `folder_id`, appending a new one named
    /// `name` when it does not exist yet.
    pub fn folder_or_insert(&mut self, folder_id: &str, name: &str) -> &mut Folder {
        let index = match self.folders.iter().position(|folder| folder.id == folder_id) {
            Some(index) => index,
            None => {
                self.folders.push(Folder::new(folder_id, name));
                self.folders.len() - 1
            }
        };
        &mut self.folders[index]
    }

    /// Appends any missing default folder. Returns whether anything changed.
    pub fn restore_default_folders(&mut self) -> bool {
        let mut changed = false;
        for (id, name) in DEFAULT_FOLDERS {
            if self.folder(id).is_none() {
                self.folders.push(Folder::new(id, name));
                changed = true;
            }
        }
        changed
    }

    /// Total number of items across all folders.
    pub fn item_count(&self) -> usize {
        self.folders.iter().map(|folder| folder.items.len()).sum()
    }
}

/// Flattened item annotated with its owning folder, for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryEntry {
    pub folder_id: String,
    pub folder_name: String,
    #[serde(flatten)]
    pub item: Item,
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|label| !label.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::{ItemType, Library};

    #[test]
    fn default_library_has_notes_then_flowcharts() {
        let library = Library::default();
        let ids: Vec<&str> = library.folders.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["notes", "flowcharts"]);
        assert_eq!(library.item_count(), 0);
    }

    #[test]
    fn legacy_pdf_name_field_maps_to_source_label() {
        let raw = r#"{"folders":[{"id":"notes","name":"📝 Notes","items":[
            {"id":"lib_1_abcdef","name":"Cells","type":"note","content":"<p>x</p>",
             "pdfName":"Cells.pdf","createdAt":"2024-03-01T10:00:00.000Z"},
            {"id":"lib_2_abcdef","name":"Blank","type":"note","content":"",
             "pdfName":"","createdAt":"2024-03-01T10:00:01.000Z"}]}]}"#;
        let library: Library = serde_json::from_str(raw).expect("legacy document parses");
        let items = &library.folders[0].items;
        assert_eq!(items[0].source_label.as_deref(), Some("Cells.pdf"));
        assert_eq!(items[1].source_label, None);
    }

    #[test]
    fn restore_default_folders_only_appends_missing() {
        let mut library: Library =
            serde_json::from_str(r#"{"folders":[{"id":"flowcharts","name":"Charts"}]}"#)
                .expect("document parses");
        assert!(library.restore_default_folders());
        assert!(!library.restore_default_folders());
        assert_eq!(library.folders[0].name, "Charts");
        assert_eq!(library.folders[1].id, "notes");
    }

    #[test]
    fn item_type_defaults() {
        assert_eq!(ItemType::Note.default_folder_id(), "notes");
        assert_eq!(ItemType::Flowchart.default_folder_id(), "flowcharts");
        assert_eq!(ItemType::parse("flowchart"), Some(ItemType::Flowchart));
        assert_eq!(ItemType::parse("mindmap"), None);
    }
}
