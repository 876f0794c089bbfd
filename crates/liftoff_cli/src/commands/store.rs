use super::print_json;
use anyhow::Result;
use clap::Subcommand;
use liftoff_core::{KeyValueStore, SqliteKeyValueStore};

#[derive(Subcommand)]
pub enum StoreCommands {
    /// List stored keys with their value sizes
    Keys,
    /// Print the raw value stored under a key
    Get { key: String },
}

pub fn run(command: StoreCommands, store: &SqliteKeyValueStore<'_>, json: bool) -> Result<()> {
    match command {
        StoreCommands::Keys => {
            let keys = store.keys()?;
            if json {
                return print_json(&keys);
            }
            for key in keys {
                let bytes = store.get(&key)?.map_or(0, |value| value.len());
                println!("{key}\t{bytes} bytes");
            }
        }
        StoreCommands::Get { key } => match store.get(&key)? {
            Some(value) => println!("{value}"),
            None => eprintln!("No value stored under `{key}`."),
        },
    }
    Ok(())
}
