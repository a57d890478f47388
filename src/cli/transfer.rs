use std::path::Path;

use chrono::{SecondsFormat, Utc};

use crate::error::Result;
use crate::transfer::{export_json, parse_import, seed_template};

fn write_or_print(output: Option<&str>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, format!("{text}\n"))?;
            println!("Wrote {path}");
        }
        None => println!("{text}"),
    }
    Ok(())
}

pub fn export(data_dir: &Path, output: Option<&str>) -> Result<()> {
    let (_, state) = super::open(data_dir)?;
    let json = export_json(&state.records)?;
    write_or_print(output, &json)
}

/// Replace every record with the file's contents, or change nothing.
pub fn import(data_dir: &Path, file: &str) -> Result<()> {
    let text = std::fs::read_to_string(file)?;
    let records = parse_import(&text)?;

    let (store, mut state) = super::open(data_dir)?;
    let count = records.len();
    state.replace_records(records);
    store.save(&state)?;
    println!("Imported {count} records.");
    Ok(())
}

pub fn seed(output: Option<&str>) -> Result<()> {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    write_or_print(output, &seed_template(&now)?)
}
