use std::path::PathBuf;

use crate::config::{expand_home, load_config, save_config};
use crate::db::{Store, DB_FILE};
use crate::error::Result;

pub fn run(path: Option<String>) -> Result<()> {
    let mut config = load_config();
    if let Some(dir) = path {
        config.data_dir = expand_home(&dir);
    }
    save_config(&config)?;

    let resolved = PathBuf::from(&config.data_dir);
    Store::open(&resolved)?;

    println!("Initialized spendlog at {}", resolved.join(DB_FILE).display());
    Ok(())
}
