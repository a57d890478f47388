use std::cmp::Ordering;

use crate::models::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    DateAsc,
    DateDesc,
    DescAsc,
    DescDesc,
    AmountAsc,
    AmountDesc,
}

const ALL_KEYS: &[SortKey] = &[
    SortKey::DateAsc,
    SortKey::DateDesc,
    SortKey::DescAsc,
    SortKey::DescDesc,
    SortKey::AmountAsc,
    SortKey::AmountDesc,
];

impl SortKey {
    pub fn key(&self) -> &'static str {
        match self {
            Self::DateAsc => "date_asc",
            Self::DateDesc => "date_desc",
            Self::DescAsc => "desc_asc",
            Self::DescDesc => "desc_desc",
            Self::AmountAsc => "amt_asc",
            Self::AmountDesc => "amt_desc",
        }
    }

    /// `None` for unrecognized keys; sorting with `None` keeps input order.
    pub fn parse(key: &str) -> Option<SortKey> {
        ALL_KEYS.iter().find(|k| k.key() == key).copied()
    }

    pub fn all_keys() -> Vec<&'static str> {
        ALL_KEYS.iter().map(|k| k.key()).collect()
    }
}

/// Case-insensitive text ordering. Strings equal up to case compare equal so
/// the stable sort keeps their original order.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

fn amount_or_zero(amount: f64) -> f64 {
    if amount.is_finite() {
        amount
    } else {
        0.0
    }
}

fn compare_amount(a: f64, b: f64) -> Ordering {
    amount_or_zero(a)
        .partial_cmp(&amount_or_zero(b))
        .unwrap_or(Ordering::Equal)
}

/// Return a newly ordered copy of `records`; the input is left untouched.
pub fn sort_records<'a>(records: &[&'a Record], key: Option<SortKey>) -> Vec<&'a Record> {
    let mut items = records.to_vec();
    let Some(key) = key else {
        return items;
    };
    items.sort_by(|a, b| match key {
        SortKey::DateAsc => compare_text(&a.date, &b.date),
        SortKey::DateDesc => compare_text(&b.date, &a.date),
        SortKey::DescAsc => compare_text(&a.description, &b.description),
        SortKey::DescDesc => compare_text(&b.description, &a.description),
        SortKey::AmountAsc => compare_amount(a.amount, b.amount),
        SortKey::AmountDesc => compare_amount(b.amount, a.amount),
    });
    items
}
