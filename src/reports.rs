use chrono::{Duration, NaiveDate};

use crate::models::{Record, Settings};

#[derive(Debug, Clone, PartialEq)]
pub enum CapStatus {
    Unset,
    Under { cap: f64, remaining: f64 },
    Over { cap: f64, by: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendDay {
    pub date: String,
    pub label: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub currency: &'static str,
    pub total: f64,
}

pub struct Dashboard {
    pub total_records: usize,
    pub total_spent: f64,
    pub top_category: Option<String>,
    pub cap: CapStatus,
    pub trend: Vec<TrendDay>,
    pub conversions: Vec<Conversion>,
}

fn amount_or_zero(amount: f64) -> f64 {
    if amount.is_finite() {
        amount
    } else {
        0.0
    }
}

pub fn total_spent(records: &[Record]) -> f64 {
    records.iter().map(|r| amount_or_zero(r.amount)).sum()
}

/// Most frequent category; the first one to reach the top count wins ties.
pub fn top_category(records: &[Record]) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for r in records {
        match counts.iter_mut().find(|(name, _)| *name == r.category) {
            Some((_, n)) => *n += 1,
            None => counts.push((r.category.as_str(), 1)),
        }
    }
    let mut best: Option<(&str, usize)> = None;
    for (name, n) in counts {
        if best.map_or(true, |(_, b)| n > b) {
            best = Some((name, n));
        }
    }
    best.map(|(name, _)| name.to_string())
}

pub fn cap_status(cap: Option<f64>, spent: f64) -> CapStatus {
    match cap {
        None => CapStatus::Unset,
        Some(cap) => {
            let diff = cap - spent;
            if diff >= 0.0 {
                CapStatus::Under { cap, remaining: diff }
            } else {
                CapStatus::Over { cap, by: diff.abs() }
            }
        }
    }
}

/// Spending for the seven days ending at `today`, oldest first.
pub fn last_7_days(records: &[Record], today: NaiveDate) -> Vec<TrendDay> {
    let mut days: Vec<TrendDay> = (0..7)
        .rev()
        .map(|i| {
            let d = today - Duration::days(i);
            TrendDay {
                date: d.format("%Y-%m-%d").to_string(),
                label: d.format("%m/%d").to_string(),
                total: 0.0,
            }
        })
        .collect();
    for r in records {
        if let Some(slot) = days.iter_mut().find(|d| d.date == r.date) {
            slot.total += amount_or_zero(r.amount);
        }
    }
    days
}

/// Totals converted with each configured rate. Unset or unparsable rates are
/// skipped.
pub fn conversions(total: f64, settings: &Settings) -> Vec<Conversion> {
    [("USD", &settings.rate_usd), ("EUR", &settings.rate_eur)]
        .into_iter()
        .filter_map(|(currency, rate)| {
            let rate: f64 = rate.trim().parse().ok()?;
            Some(Conversion {
                currency,
                total: total * rate,
            })
        })
        .collect()
}

pub fn summarize(records: &[Record], settings: &Settings, today: NaiveDate) -> Dashboard {
    let total = total_spent(records);
    Dashboard {
        total_records: records.len(),
        total_spent: total,
        top_category: top_category(records),
        cap: cap_status(settings.cap, total),
        trend: last_7_days(records, today),
        conversions: conversions(total, settings),
    }
}
