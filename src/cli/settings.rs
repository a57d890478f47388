use std::path::Path;

use comfy_table::{Cell, Table};

use crate::error::{Result, SpendError};
use crate::fmt::money;
use crate::models::Theme;

pub fn show(data_dir: &Path) -> Result<()> {
    let (_, state) = super::open(data_dir)?;
    let s = &state.settings;

    let unset = |v: &str| if v.is_empty() { "(unset)".to_string() } else { v.to_string() };
    let mut table = Table::new();
    table.set_header(vec!["Setting", "Value"]);
    table.add_row(vec![Cell::new("Base currency"), Cell::new(&s.base_currency)]);
    table.add_row(vec![Cell::new("Rate to USD"), Cell::new(unset(&s.rate_usd))]);
    table.add_row(vec![Cell::new("Rate to EUR"), Cell::new(unset(&s.rate_eur))]);
    table.add_row(vec![
        Cell::new("Cap"),
        Cell::new(s.cap.map(|c| money(c, &s.base_currency)).unwrap_or_else(|| "(none)".into())),
    ]);
    table.add_row(vec![Cell::new("Categories"), Cell::new(s.categories.join(", "))]);
    table.add_row(vec![Cell::new("Theme"), Cell::new(s.theme.as_str())]);
    println!("Settings\n{table}");
    Ok(())
}

pub fn currency(data_dir: &Path, code: &str) -> Result<()> {
    let (store, mut state) = super::open(data_dir)?;
    state.set_base_currency(code)?;
    store.save(&state)?;
    println!("Base currency set to {}.", state.settings.base_currency);
    Ok(())
}

pub fn rates(data_dir: &Path, usd: Option<&str>, eur: Option<&str>) -> Result<()> {
    let (store, mut state) = super::open(data_dir)?;
    state.set_rates(usd, eur)?;
    store.save(&state)?;
    println!("Currency settings saved.");
    Ok(())
}

pub fn cap(data_dir: &Path, value: Option<&str>) -> Result<()> {
    let (store, mut state) = super::open(data_dir)?;
    let cap = state.set_cap(value.unwrap_or(""))?;
    store.save(&state)?;
    match cap {
        Some(c) => println!("Cap saved: {}.", money(c, &state.settings.base_currency)),
        None => println!("Cap removed."),
    }
    Ok(())
}

pub fn categories(data_dir: &Path, list: &str) -> Result<()> {
    let (store, mut state) = super::open(data_dir)?;
    let saved = state.set_categories(list)?.join(", ");
    store.save(&state)?;
    println!("Categories saved: {saved}");
    Ok(())
}

pub fn theme(data_dir: &Path, mode: &str) -> Result<()> {
    let (store, mut state) = super::open(data_dir)?;
    let theme = match mode {
        "light" => {
            state.set_theme(Theme::Light);
            Theme::Light
        }
        "dark" => {
            state.set_theme(Theme::Dark);
            Theme::Dark
        }
        "toggle" => state.toggle_theme(),
        other => {
            return Err(SpendError::Settings(format!(
                "Unknown theme '{other}'. Use light, dark or toggle."
            )))
        }
    };
    store.save(&state)?;
    println!("Theme: {}", theme.as_str());
    Ok(())
}
