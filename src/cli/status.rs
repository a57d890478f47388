use std::path::Path;

use crate::db::DB_FILE;
use crate::error::Result;
use crate::fmt::money;
use crate::reports::total_spent;

pub fn run(data_dir: &Path) -> Result<()> {
    let db_path = data_dir.join(DB_FILE);
    println!("Data dir:   {}", data_dir.display());
    println!("Database:   {}", db_path.display());

    if !db_path.exists() {
        println!();
        println!("Database not found. Run `spendlog init` or add a record to create it.");
        return Ok(());
    }

    let (_, state) = super::open(data_dir)?;
    let total = total_spent(&state.records);

    println!();
    println!("Records:    {}", state.records.len());
    println!("Spent:      {}", money(total, &state.settings.base_currency));
    println!("Theme:      {}", state.settings.theme.as_str());
    Ok(())
}
