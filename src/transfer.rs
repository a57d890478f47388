use std::collections::HashSet;

use serde_json::{json, Map, Value};

use crate::error::{Result, SpendError};
use crate::models::{format_amount, Record};
use crate::validators::{self, RecordFields};

const REQUIRED_KEYS: &[&str] = &[
    "id",
    "description",
    "amount",
    "category",
    "date",
    "createdAt",
    "updatedAt",
];

const STRING_KEYS: &[&str] = &["id", "description", "category", "date", "createdAt", "updatedAt"];

fn import_err(index: usize, msg: impl std::fmt::Display) -> SpendError {
    SpendError::Import(format!("Record #{} {msg}", index + 1))
}

fn str_field(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
}

fn check_record(index: usize, value: &Value) -> Result<Record> {
    let obj = value
        .as_object()
        .ok_or_else(|| import_err(index, "is not an object."))?;

    for key in REQUIRED_KEYS {
        if !obj.contains_key(*key) {
            return Err(import_err(index, format!("missing key: {key}")));
        }
    }
    for key in STRING_KEYS {
        if !obj[*key].is_string() {
            return Err(import_err(index, format!("{key} must be string.")));
        }
    }
    let amount = obj["amount"]
        .as_f64()
        .ok_or_else(|| import_err(index, "amount must be number."))?;
    if !validators::is_storable_amount(amount) {
        return Err(import_err(
            index,
            format!("fails validation on amount: {}", validators::AMOUNT_MSG),
        ));
    }
    let receipt_url = match obj.get("receiptUrl") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(import_err(index, "receiptUrl must be string.")),
    };

    let fields = RecordFields {
        description: Some(str_field(obj, "description")),
        amount: Some(format_amount(amount)),
        category: Some(str_field(obj, "category")),
        date: Some(str_field(obj, "date")),
        receipt_url: receipt_url.clone(),
    };
    let errors = validators::validate(&fields);
    if let Some((field, msg)) = errors.iter().next() {
        return Err(import_err(index, format!("fails validation on {field}: {msg}")));
    }

    Ok(Record {
        id: str_field(obj, "id"),
        description: str_field(obj, "description"),
        amount,
        category: str_field(obj, "category"),
        date: str_field(obj, "date"),
        receipt_url: receipt_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty()),
        created_at: str_field(obj, "createdAt"),
        updated_at: str_field(obj, "updatedAt"),
    })
}

/// Check a whole import payload. Nothing is returned unless every element
/// passes; the first failure names its 1-based position.
pub fn validate_import(payload: &Value) -> Result<Vec<Record>> {
    let items = payload
        .as_array()
        .ok_or_else(|| SpendError::Import("JSON must be an array of records.".to_string()))?;

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let rec = check_record(i, item)?;
        if !seen.insert(rec.id.clone()) {
            return Err(import_err(i, format!("duplicates id {}.", rec.id)));
        }
        records.push(rec);
    }
    Ok(records)
}

/// Parse and check raw import text.
pub fn parse_import(text: &str) -> Result<Vec<Record>> {
    let payload: Value = serde_json::from_str(text)
        .map_err(|_| SpendError::Import("Invalid JSON. Fix syntax and try again.".to_string()))?;
    validate_import(&payload)
}

pub fn export_json(records: &[Record]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// A one-record payload in the import format, stamped with `now`.
pub fn seed_template(now: &str) -> Result<String> {
    let seed = json!([{
        "id": "rec_0001",
        "description": "Lunch at cafeteria",
        "amount": 1250.00,
        "category": "Food",
        "date": "2025-09-25",
        "createdAt": now,
        "updatedAt": now,
    }]);
    Ok(serde_json::to_string_pretty(&seed)?)
}
