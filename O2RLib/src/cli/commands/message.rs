//! CLI commands for message tables

use std::path::Path;

use super::{load, require, save, upsert};
use crate::formats::message::{MessageTable, MessageText};

pub fn list(source: &Path, path: &str, limit: Option<usize>) -> anyhow::Result<()> {
    let resources = load(source)?;
    let table = MessageTable::from_resource(require(&resources, path)?);

    println!("{:<6}  {:>4}  {:>4}  PREVIEW", "ID", "TYPE", "YPOS");
    for msg in table.iter().take(limit.unwrap_or(usize::MAX)) {
        println!(
            "0x{:04X}  {:>4}  {:>4}  {}",
            msg.id,
            msg.textbox_type,
            msg.textbox_y_pos,
            msg.preview()
        );
    }
    println!();
    println!("{} messages", table.len());
    Ok(())
}

pub fn export(source: &Path, path: &str, output: Option<&Path>) -> anyhow::Result<()> {
    let resources = load(source)?;
    let table = MessageTable::from_resource(require(&resources, path)?);
    let json = serde_json::to_string_pretty(&table.to_texts())?;

    match output {
        Some(out) => {
            std::fs::write(out, json)?;
            println!("Exported {} messages to {}", table.len(), out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

pub fn import(source: &Path, path: &str, input: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let texts: Vec<MessageText> = serde_json::from_str(&std::fs::read_to_string(input)?)?;
    let table = MessageTable::from_texts(&texts);

    let mut resources = load(source)?;
    upsert(&mut resources, table.to_resource(path)?);

    println!("Imported {} messages into {path}", table.len());
    save(source, output, &resources)
}
