use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::fmt::money;
use crate::reports::{self, CapStatus};

const BAR_WIDTH: f64 = 30.0;

pub fn run(data_dir: &Path) -> Result<()> {
    let (_, state) = super::open(data_dir)?;
    let today = chrono::Local::now().date_naive();
    let dash = reports::summarize(&state.records, &state.settings, today);
    let cur = state.settings.base_currency.as_str();

    let mut table = Table::new();
    table.set_header(vec!["Stat", "Value"]);
    table.add_row(vec![Cell::new("Total records"), Cell::new(dash.total_records)]);
    table.add_row(vec![Cell::new("Total spent"), Cell::new(money(dash.total_spent, cur))]);
    for conv in &dash.conversions {
        table.add_row(vec![
            Cell::new(format!("  in {}", conv.currency)),
            Cell::new(money(conv.total, conv.currency)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Top category"),
        Cell::new(dash.top_category.as_deref().unwrap_or("\u{2014}")),
    ]);
    match dash.cap {
        CapStatus::Unset => {
            table.add_row(vec![Cell::new("Cap"), Cell::new("\u{2014} (set one with `settings cap`)")]);
        }
        CapStatus::Under { cap, remaining } => {
            table.add_row(vec![Cell::new("Cap"), Cell::new(money(cap, cur))]);
            table.add_row(vec![
                Cell::new("Remaining"),
                Cell::new(money(remaining, cur).green()),
            ]);
        }
        CapStatus::Over { cap, by } => {
            table.add_row(vec![Cell::new("Cap"), Cell::new(money(cap, cur))]);
            table.add_row(vec![
                Cell::new("Over by".red().bold()),
                Cell::new(money(by, cur).red()),
            ]);
        }
    }
    println!("Dashboard (base currency: {cur})\n{table}");

    let max = dash.trend.iter().map(|d| d.total).fold(1.0_f64, f64::max);
    println!("\nLast 7 days");
    for day in &dash.trend {
        let width = ((day.total / max) * BAR_WIDTH).round() as usize;
        println!("  {}  {:<30}  {}", day.label, "\u{2588}".repeat(width), money(day.total, cur));
    }

    if let CapStatus::Over { by, .. } = dash.cap {
        println!("\n{}", format!("Cap exceeded! Over by {}.", money(by, cur)).red().bold());
    }
    Ok(())
}
