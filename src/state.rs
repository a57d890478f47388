use std::collections::HashSet;

use chrono::{SecondsFormat, Utc};

use crate::error::{Result, SpendError};
use crate::models::{Record, Settings, Theme};
use crate::validators::{
    self, normalize_spaces, Field, FieldErrors, RecordFields, AMOUNT_MSG,
};

/// In-memory records and settings. Mutations never touch the store; callers
/// persist with [`crate::db::Store::save`] afterwards.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Newest first.
    pub records: Vec<Record>,
    pub settings: Settings,
}

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Next id in the `rec_0001` sequence: one past the highest numeric suffix.
/// When that suffix is already `u64::MAX`, the lowest unused number is taken.
pub fn next_id(records: &[Record]) -> String {
    let used: HashSet<u64> = records
        .iter()
        .filter_map(|r| r.id.strip_prefix("rec_").unwrap_or(&r.id).parse::<u64>().ok())
        .collect();
    let max = used.iter().copied().max().unwrap_or(0);
    let n = match max.checked_add(1) {
        Some(n) => n,
        None => (1..).find(|n| !used.contains(n)).unwrap_or_default(),
    };
    format!("rec_{n:04}")
}

fn parse_amount(raw: &str) -> std::result::Result<f64, FieldErrors> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| validators::is_storable_amount(*v))
        .ok_or_else(|| FieldErrors::single(Field::Amount, AMOUNT_MSG))
}

fn clean_receipt_url(raw: &str) -> Option<String> {
    let url = raw.trim();
    (!url.is_empty()).then(|| url.to_string())
}

impl AppState {
    pub fn new(records: Vec<Record>, settings: Settings) -> Self {
        Self { records, settings }
    }

    pub fn find(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Validate, normalize and insert a new record at the head.
    pub fn add_record(&mut self, fields: &RecordFields) -> std::result::Result<Record, FieldErrors> {
        validators::validate(fields).into_result()?;

        let raw = |v: &Option<String>| v.clone().unwrap_or_default();
        let created_at = now_iso();
        let rec = Record {
            id: next_id(&self.records),
            description: normalize_spaces(&raw(&fields.description)),
            amount: parse_amount(&raw(&fields.amount))?,
            category: normalize_spaces(&raw(&fields.category)),
            date: raw(&fields.date).trim().to_string(),
            receipt_url: fields.receipt_url.as_deref().and_then(clean_receipt_url),
            created_at: created_at.clone(),
            updated_at: created_at,
        };
        log::debug!("added {}", rec.id);
        self.records.insert(0, rec.clone());
        Ok(rec)
    }

    /// Apply a patch to an existing record. Only touched fields are validated
    /// and normalized. `Ok(None)` when no record has `id`.
    pub fn update_record(
        &mut self,
        id: &str,
        patch: &RecordFields,
    ) -> std::result::Result<Option<Record>, FieldErrors> {
        let Some(idx) = self.records.iter().position(|r| r.id == id) else {
            return Ok(None);
        };
        validators::validate_patch(patch).into_result()?;

        let mut updated = self.records[idx].clone();
        if let Some(desc) = &patch.description {
            updated.description = normalize_spaces(desc);
        }
        if let Some(amount) = &patch.amount {
            updated.amount = parse_amount(amount)?;
        }
        if let Some(category) = &patch.category {
            updated.category = normalize_spaces(category);
        }
        if let Some(date) = &patch.date {
            updated.date = date.trim().to_string();
        }
        if let Some(url) = &patch.receipt_url {
            updated.receipt_url = clean_receipt_url(url);
        }
        updated.updated_at = now_iso();

        log::debug!("updated {id}");
        self.records[idx] = updated.clone();
        Ok(Some(updated))
    }

    /// `false` means nothing had that id.
    pub fn delete_record(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        let changed = self.records.len() != before;
        if changed {
            log::debug!("deleted {id}");
        }
        changed
    }

    /// Swap in an already-validated collection (import).
    pub fn replace_records(&mut self, records: Vec<Record>) {
        log::debug!("replacing {} record(s) with {}", self.records.len(), records.len());
        self.records = records;
    }

    /// `None` keeps the current rate; an empty string unsets it.
    pub fn set_rates(&mut self, rate_usd: Option<&str>, rate_eur: Option<&str>) -> Result<()> {
        let usd = rate_usd.unwrap_or(self.settings.rate_usd.as_str()).trim().to_string();
        let eur = rate_eur.unwrap_or(self.settings.rate_eur.as_str()).trim().to_string();
        let errors = validators::validate_rates(&usd, &eur);
        if !errors.is_empty() {
            let msg: Vec<&str> = errors.values().copied().collect();
            return Err(SpendError::Settings(msg.join(" ")));
        }
        self.settings.rate_usd = usd;
        self.settings.rate_eur = eur;
        Ok(())
    }

    pub fn set_base_currency(&mut self, code: &str) -> Result<()> {
        let code = code.trim();
        if !validators::is_valid_currency(code) {
            return Err(SpendError::Settings(format!(
                "Currency must be a three-letter code like RWF, got \"{code}\"."
            )));
        }
        self.settings.base_currency = code.to_string();
        Ok(())
    }

    pub fn set_cap(&mut self, raw: &str) -> Result<Option<f64>> {
        let cap = validators::validate_cap(raw).map_err(|m| SpendError::Settings(m.to_string()))?;
        self.settings.cap = cap;
        Ok(cap)
    }

    /// An empty list keeps the current categories.
    pub fn set_categories(&mut self, raw: &str) -> Result<&[String]> {
        let cats = validators::parse_categories(raw).map_err(SpendError::Settings)?;
        if !cats.is_empty() {
            self.settings.categories = cats;
        }
        Ok(self.settings.categories.as_slice())
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.settings.theme = theme;
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.settings.theme = self.settings.theme.toggled();
        self.settings.theme
    }
}
