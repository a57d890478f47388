use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, Table};
use regex::Regex;

use crate::error::Result;
use crate::fmt::money;
use crate::models::Record;
use crate::search::{
    compile_pattern, escape_html, filter_records, highlight, highlight_terminal,
    pattern_is_invalid, INVALID_PATTERN_HINT,
};
use crate::sort::{sort_records, SortKey};
use crate::validators::RecordFields;

pub fn add(
    data_dir: &Path,
    description: String,
    amount: String,
    category: String,
    date: Option<String>,
    receipt: Option<String>,
) -> Result<()> {
    let (store, mut state) = super::open(data_dir)?;
    let date = date.unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());
    let fields = RecordFields {
        description: Some(description),
        amount: Some(amount),
        category: Some(category),
        date: Some(date),
        receipt_url: receipt,
    };

    let rec = state.add_record(&fields)?;
    store.save(&state)?;

    if !state.settings.categories.contains(&rec.category) {
        println!(
            "Note: '{}' is not in your category list ({}).",
            rec.category,
            state.settings.categories.join(", ")
        );
    }
    println!(
        "Added {}: {} \u{2192} {} ({})",
        rec.id,
        rec.description,
        money(rec.amount, &state.settings.base_currency),
        rec.category
    );
    Ok(())
}

pub fn edit(data_dir: &Path, id: &str, patch: RecordFields) -> Result<()> {
    let (store, mut state) = super::open(data_dir)?;

    match state.update_record(id, &patch)? {
        None => println!("No change: {id} not found."),
        Some(rec) => {
            store.save(&state)?;
            println!(
                "Updated {}: {} \u{2192} {} ({}, {})",
                rec.id,
                rec.description,
                money(rec.amount, &state.settings.base_currency),
                rec.category,
                rec.date
            );
        }
    }
    Ok(())
}

pub fn show(data_dir: &Path, id: &str) -> Result<()> {
    let (_, state) = super::open(data_dir)?;
    match state.find(id) {
        Some(rec) => println!("{}", serde_json::to_string_pretty(rec)?),
        None => println!("No record with ID {id}"),
    }
    Ok(())
}

pub fn delete(data_dir: &Path, id: &str) -> Result<()> {
    let (store, mut state) = super::open(data_dir)?;
    if state.delete_record(id) {
        store.save(&state)?;
        println!("Deleted {id}");
    } else {
        println!("No change: {id} not found.");
    }
    Ok(())
}

fn render_table(items: &[&Record], re: Option<&Regex>, currency: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Description", "Category", "Amount", "Receipt"]);
    for r in items {
        table.add_row(vec![
            Cell::new(&r.id),
            Cell::new(highlight_terminal(&r.date, re)),
            Cell::new(highlight_terminal(&r.description, re)),
            Cell::new(highlight_terminal(&r.category, re)),
            Cell::new(highlight_terminal(&money(r.amount, currency), re)),
            Cell::new(
                r.receipt_url
                    .as_deref()
                    .map(|u| highlight_terminal(u, re))
                    .unwrap_or_default(),
            ),
        ]);
    }
    table
}

/// HTML table of `items`; every cell goes through [`highlight`], so user text
/// is always escaped.
pub fn render_html(items: &[&Record], re: Option<&Regex>, currency: &str) -> String {
    let mut out = String::from(
        "<table>\n  <thead>\n    <tr><th>Date</th><th>Description</th><th>Category</th><th>Amount</th><th>Receipt</th></tr>\n  </thead>\n  <tbody>\n",
    );
    for r in items {
        let receipt = r
            .receipt_url
            .as_deref()
            .map(|u| highlight(u, re))
            .unwrap_or_default();
        out.push_str(&format!(
            "    <tr data-id=\"{}\"><td class=\"mark-wrap\">{}</td><td class=\"mark-wrap\">{}</td><td class=\"mark-wrap\"><span class=\"pill\">{}</span></td><td class=\"num mark-wrap\">{}</td><td class=\"mark-wrap\">{}</td></tr>\n",
            escape_html(&r.id),
            highlight(&r.date, re),
            highlight(&r.description, re),
            highlight(&r.category, re),
            highlight(&money(r.amount, currency), re),
            receipt,
        ));
    }
    out.push_str("  </tbody>\n</table>");
    out
}

pub fn list(
    data_dir: &Path,
    search: Option<&str>,
    case_sensitive: bool,
    sort: &str,
    html: bool,
) -> Result<()> {
    let (_, state) = super::open(data_dir)?;
    let pattern = search.unwrap_or("");
    let re = compile_pattern(pattern, !case_sensitive);
    if pattern_is_invalid(pattern, re.as_ref()) {
        eprintln!("{}", INVALID_PATTERN_HINT.red());
    }

    let key = SortKey::parse(sort);
    if key.is_none() {
        log::warn!(
            "unknown sort key {sort:?}, keeping stored order (expected one of {})",
            SortKey::all_keys().join(", ")
        );
    }

    let filtered = filter_records(&state.records, re.as_ref());
    let items = sort_records(&filtered, key);
    let currency = &state.settings.base_currency;

    if html {
        println!("{}", render_html(&items, re.as_ref(), currency));
        return Ok(());
    }

    if items.is_empty() {
        println!("No records.");
        return Ok(());
    }
    println!("{}", render_table(&items, re.as_ref(), currency));
    println!("Rendered {} record(s).", items.len());
    Ok(())
}
