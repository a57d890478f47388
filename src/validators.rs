use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

// Field rules. Digit classes are spelled out so that non-ASCII digits never pass.
static DESC_NO_EDGE_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S(?:.*\S)?$").expect("valid description pattern"));
static MONEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0|[1-9][0-9]*)(\.[0-9]{1,2})?$").expect("valid money pattern")
});
static RATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0|[1-9][0-9]*)(\.[0-9]{1,10})?$").expect("valid rate pattern")
});
static DATE_YMD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01])$").expect("valid date pattern")
});
static CATEGORY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]+(?:[ -][A-Za-z]+)*$").expect("valid category pattern")
});
static RECEIPT_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("valid url pattern"));
static CURRENCY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}$").expect("valid currency pattern"));
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9_]+").expect("valid word pattern"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

pub const DESCRIPTION_EDGE_MSG: &str = "No leading/trailing spaces. Use normal spacing.";
pub const DESCRIPTION_DUP_MSG: &str = "Duplicate word detected (e.g., 'coffee coffee').";
pub const AMOUNT_MSG: &str = "Enter a valid number (0, 10, 10.5, 10.50).";
pub const CATEGORY_MSG: &str = "Letters, spaces, and hyphens only (e.g., 'Bus Pass').";
pub const DATE_MSG: &str = "Use YYYY-MM-DD (e.g., 2025-09-29).";
pub const RECEIPT_URL_MSG: &str = "Receipt link must start with http:// or https://.";
pub const CAP_MSG: &str = "Cap must be a valid number.";

/// Amounts at or past this print in exponent form elsewhere, so they are refused.
pub const MAX_AMOUNT: f64 = 1e21;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Description,
    Amount,
    Category,
    Date,
    ReceiptUrl,
}

impl Field {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Amount => "amount",
            Self::Category => "category",
            Self::Date => "date",
            Self::ReceiptUrl => "receiptUrl",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Field-keyed validation failures. A field with no entry is valid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: Field, msg: &'static str) -> Self {
        let mut errors = Self::new();
        errors.insert(field, msg);
        errors
    }

    pub fn insert(&mut self, field: Field, msg: &'static str) {
        self.0.insert(field, msg);
    }

    #[cfg(test)]
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    #[cfg(test)]
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(f, m)| (*f, *m))
    }

    /// `Ok(())` when nothing failed, otherwise the mapping itself as the error.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, msg) in self.iter() {
            if !first {
                writeln!(f)?;
            }
            write!(f, "  {field}: {msg}")?;
            first = false;
        }
        Ok(())
    }
}

/// Raw, unvalidated field strings as they arrive from the command line or an
/// import payload. `None` means the field was not supplied.
#[derive(Debug, Clone, Default)]
pub struct RecordFields {
    pub description: Option<String>,
    pub amount: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub receipt_url: Option<String>,
}

/// Collapse every whitespace run to a single space and trim the ends.
pub fn normalize_spaces(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s, " ").trim().to_string()
}

/// True when two neighbouring words are the same word, ignoring ASCII case,
/// and only whitespace separates them ("coffee  Coffee").
pub fn has_duplicate_word(s: &str) -> bool {
    let mut prev: Option<regex::Match> = None;
    for word in WORD.find_iter(s) {
        if let Some(p) = prev {
            let gap = &s[p.end()..word.start()];
            if !gap.is_empty()
                && gap.chars().all(char::is_whitespace)
                && p.as_str().eq_ignore_ascii_case(word.as_str())
            {
                return true;
            }
        }
        prev = Some(word);
    }
    false
}

pub fn check_description(desc: &str) -> Option<&'static str> {
    if !DESC_NO_EDGE_SPACES.is_match(desc) {
        Some(DESCRIPTION_EDGE_MSG)
    } else if has_duplicate_word(desc) {
        Some(DESCRIPTION_DUP_MSG)
    } else {
        None
    }
}

pub fn is_valid_amount(amount: &str) -> bool {
    MONEY.is_match(amount)
}

/// A parsed amount that can be stored and printed as a plain decimal.
pub fn is_storable_amount(amount: f64) -> bool {
    amount.is_finite() && (0.0..MAX_AMOUNT).contains(&amount)
}

pub fn is_valid_category(category: &str) -> bool {
    CATEGORY.is_match(category)
}

/// Shape check only: day 31 is accepted for every month.
pub fn is_valid_date(date: &str) -> bool {
    DATE_YMD.is_match(date)
}

/// Empty (after trimming) is valid: the link is optional.
pub fn is_valid_receipt_url(url: &str) -> bool {
    let url = url.trim();
    url.is_empty() || RECEIPT_URL.is_match(url)
}

fn check_field(errors: &mut FieldErrors, field: Field, value: &str) {
    let failure = match field {
        Field::Description => check_description(value),
        Field::Amount => (!is_valid_amount(value)).then_some(AMOUNT_MSG),
        Field::Category => (!is_valid_category(value)).then_some(CATEGORY_MSG),
        Field::Date => (!is_valid_date(value)).then_some(DATE_MSG),
        Field::ReceiptUrl => (!is_valid_receipt_url(value)).then_some(RECEIPT_URL_MSG),
    };
    if let Some(msg) = failure {
        errors.insert(field, msg);
    }
}

/// Validate a complete record form. Missing required fields are checked as
/// empty strings; a missing receipt link is fine.
pub fn validate(fields: &RecordFields) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let required = [
        (Field::Description, &fields.description),
        (Field::Amount, &fields.amount),
        (Field::Category, &fields.category),
        (Field::Date, &fields.date),
    ];
    for (field, value) in required {
        check_field(&mut errors, field, value.as_deref().unwrap_or(""));
    }
    if let Some(url) = &fields.receipt_url {
        check_field(&mut errors, Field::ReceiptUrl, url);
    }
    errors
}

/// Validate only the fields present in a patch.
pub fn validate_patch(patch: &RecordFields) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let touched = [
        (Field::Description, &patch.description),
        (Field::Amount, &patch.amount),
        (Field::Category, &patch.category),
        (Field::Date, &patch.date),
        (Field::ReceiptUrl, &patch.receipt_url),
    ];
    for (field, value) in touched {
        if let Some(v) = value {
            check_field(&mut errors, field, v);
        }
    }
    errors
}

/// Per-rate failures keyed `rateUSD` / `rateEUR`.
pub type RateErrors = BTreeMap<&'static str, &'static str>;

/// Empty rates are accepted and mean "unset".
pub fn validate_rates(rate_usd: &str, rate_eur: &str) -> RateErrors {
    let mut errors = RateErrors::new();
    let usd = rate_usd.trim();
    let eur = rate_eur.trim();
    if !usd.is_empty() && !RATE.is_match(usd) {
        errors.insert("rateUSD", "Invalid USD rate format.");
    }
    if !eur.is_empty() && !RATE.is_match(eur) {
        errors.insert("rateEUR", "Invalid EUR rate format.");
    }
    errors
}

/// Empty input means "no cap".
pub fn validate_cap(raw: &str) -> Result<Option<f64>, &'static str> {
    let v = raw.trim();
    if v.is_empty() {
        return Ok(None);
    }
    if !MONEY.is_match(v) {
        return Err(CAP_MSG);
    }
    v.parse::<f64>()
        .ok()
        .filter(|c| is_storable_amount(*c))
        .map(Some)
        .ok_or(CAP_MSG)
}

/// Split a comma-separated category list, dropping blanks. Fails on the first
/// entry that is not letters/spaces/hyphens.
pub fn parse_categories(raw: &str) -> Result<Vec<String>, String> {
    let cats: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    if let Some(bad) = cats.iter().find(|c| !is_valid_category(c)) {
        return Err(format!(
            "Invalid category: \"{bad}\". Use letters/spaces/hyphens."
        ));
    }
    Ok(cats)
}

pub fn is_valid_currency(code: &str) -> bool {
    CURRENCY.is_match(code)
}
