use super::{print_json, read_content};
use anyhow::{bail, Result};
use clap::{ArgGroup, Args, Subcommand};
use liftoff_core::{ItemType, KeyValueStore, LibraryRepository, SaveOutcome, SaveRequest};
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum LibraryCommands {
    /// List folders in stored order
    Folders,
    /// List saved items, newest first within each folder
    #[command(alias = "ls")]
    Items {
        /// Only show items of this type (note, flowchart)
        #[arg(short = 't', long = "type", value_parser = parse_item_type)]
        kind: Option<ItemType>,
    },
    /// Show one item including its content
    Show {
        /// Item id (lib_<ms>_<suffix>)
        id: String,
    },
    /// Save an item, asking for its name unless --name is given
    Save(SaveArgs),
    /// Save an item without asking, deriving its name
    AutoSave(AutoSaveArgs),
    /// Delete an item
    #[command(alias = "rm")]
    Delete {
        /// Item id (lib_<ms>_<suffix>)
        id: String,
    },
}

#[derive(Args)]
#[command(group(ArgGroup::new("source").required(true).args(["content", "file"])))]
pub struct SaveArgs {
    /// Item type (note, flowchart)
    #[arg(short = 't', long = "type", value_parser = parse_item_type)]
    kind: ItemType,
    /// Inline content
    #[arg(short, long)]
    content: Option<String>,
    /// Read content from a file
    #[arg(short, long)]
    file: Option<PathBuf>,
    /// Source document file name
    #[arg(short, long)]
    source: Option<String>,
    /// Name to pre-fill in the prompt
    #[arg(long)]
    suggest: Option<String>,
    /// Destination folder id
    #[arg(long)]
    folder: Option<String>,
    /// Skip the prompt and use this name; blank cancels
    #[arg(short, long)]
    name: Option<String>,
}

#[derive(Args)]
#[command(group(ArgGroup::new("source").required(true).args(["content", "file"])))]
pub struct AutoSaveArgs {
    /// Item type (note, flowchart)
    #[arg(short = 't', long = "type", value_parser = parse_item_type)]
    kind: ItemType,
    #[arg(short, long)]
    content: Option<String>,
    #[arg(short, long)]
    file: Option<PathBuf>,
    /// Source document file name
    #[arg(short, long)]
    source: Option<String>,
    /// Explicit item name
    #[arg(short, long)]
    name: Option<String>,
}

fn parse_item_type(value: &str) -> Result<ItemType, String> {
    ItemType::parse(value).ok_or_else(|| format!("unknown item type `{value}`; expected note|flowchart"))
}

pub fn run<S: KeyValueStore>(command: LibraryCommands, store: S, json: bool) -> Result<()> {
    let repo = LibraryRepository::new(store);

    match command {
        LibraryCommands::Folders => {
            let folders = repo.list_folders();
            if json {
                return print_json(&folders);
            }
            for folder in folders {
                println!("{}\t{}\t{} item(s)", folder.id, folder.name, folder.items.len());
            }
        }
        LibraryCommands::Items { kind } => {
            let entries = repo.list_items(kind);
            if json {
                return print_json(&entries);
            }
            if entries.is_empty() {
                println!("No saved items.");
            }
            for entry in entries {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    entry.item.id,
                    entry.item.kind.as_str(),
                    entry.folder_id,
                    entry.item.created_at.format("%Y-%m-%d %H:%M"),
                    entry.item.name
                );
            }
        }
        LibraryCommands::Show { id } => {
            let Some(entry) = repo.find_item(&id) else {
                bail!("item not found: {id}");
            };
            if json {
                return print_json(&entry);
            }
            println!("{} ({}) in {}", entry.item.name, entry.item.kind.as_str(), entry.folder_name);
            if let Some(source) = &entry.item.source_label {
                println!("source: {source}");
            }
            println!("created: {}", entry.item.created_at.to_rfc3339());
            println!();
            println!("{}", entry.item.content);
        }
        LibraryCommands::Save(args) => {
            let request = SaveRequest {
                source_label: args.source,
                suggested_name: args.suggest,
                target_folder_id: args.folder,
                ..SaveRequest::new(args.kind, read_content(args.content, args.file)?)
            };
            let outcome = match args.name {
                Some(name) => repo.save_named(request, &name)?,
                None => repo.save(request, prompt_for_name)?,
            };
            match outcome {
                SaveOutcome::Saved(item) => println!("Saved {} as \"{}\"", item.id, item.name),
                SaveOutcome::Cancelled => println!("Save cancelled."),
            }
        }
        LibraryCommands::AutoSave(args) => {
            let item = repo.auto_save(
                args.kind,
                read_content(args.content, args.file)?,
                args.source.as_deref(),
                args.name.as_deref(),
            )?;
            println!("Saved {} as \"{}\"", item.id, item.name);
        }
        LibraryCommands::Delete { id } => {
            if !repo.delete_item(&id)? {
                bail!("item not found: {id}");
            }
            println!("Deleted {id}");
        }
    }

    Ok(())
}

/// Asks on the terminal. Enter keeps the default, end of input cancels.
fn prompt_for_name(default_name: &str) -> Option<String> {
    eprint!("Name [{default_name}]: ");
    std::io::stderr().flush().ok()?;

    let mut answer = String::new();
    match std::io::stdin().lock().read_line(&mut answer) {
        Ok(0) | Err(_) => None,
        Ok(_) => {
            let answer = answer.trim_end_matches(['\r', '\n']);
            if answer.is_empty() {
                Some(default_name.to_string())
            } else {
                Some(answer.to_string())
            }
        }
    }
}
