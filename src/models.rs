use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Record {
    /// Shortest decimal form of the amount: `1250`, `12.5`.
    pub fn amount_string(&self) -> String {
        format_amount(self.amount)
    }
}

pub fn format_amount(amount: f64) -> String {
    format!("{amount}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
    #[serde(rename = "rateUSD", default = "default_rate_usd")]
    pub rate_usd: String,
    #[serde(rename = "rateEUR", default = "default_rate_eur")]
    pub rate_eur: String,
    #[serde(default)]
    pub cap: Option<f64>,
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    #[serde(default)]
    pub theme: Theme,
}

fn default_base_currency() -> String {
    "RWF".to_string()
}

fn default_rate_usd() -> String {
    "0.00075".to_string()
}

fn default_rate_eur() -> String {
    "0.00069".to_string()
}

fn default_categories() -> Vec<String> {
    ["Food", "Books", "Transport", "Entertainment", "Fees", "Other"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_currency: default_base_currency(),
            rate_usd: default_rate_usd(),
            rate_eur: default_rate_eur(),
            cap: None,
            categories: default_categories(),
            theme: Theme::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_json_uses_camel_case() {
        let rec = Record {
            id: "rec_0001".into(),
            description: "Lunch".into(),
            amount: 12.5,
            category: "Food".into(),
            date: "2025-09-25".into(),
            receipt_url: None,
            created_at: "2025-09-25T10:00:00.000Z".into(),
            updated_at: "2025-09-25T10:00:00.000Z".into(),
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["createdAt"], "2025-09-25T10:00:00.000Z");
        assert!(json.get("receiptUrl").is_none());
    }

    #[test]
    fn test_amount_string_is_shortest_form() {
        assert_eq!(format_amount(1250.0), "1250");
        assert_eq!(format_amount(12.5), "12.5");
        assert_eq!(format_amount(0.0), "0");
    }

    #[test]
    fn test_settings_merge_with_defaults() {
        let s: Settings = serde_json::from_str(r#"{"baseCurrency": "USD", "cap": 100}"#).unwrap();
        assert_eq!(s.base_currency, "USD");
        assert_eq!(s.cap, Some(100.0));
        assert_eq!(s.rate_usd, "0.00075");
        assert_eq!(s.categories.len(), 6);
        assert_eq!(s.theme, Theme::Light);
    }

    #[test]
    fn test_settings_key_names() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert!(json.get("rateUSD").is_some());
        assert!(json.get("rateEUR").is_some());
        assert!(json["cap"].is_null());
        assert_eq!(json["theme"], "light");
    }
}
