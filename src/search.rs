use colored::Colorize;
use regex::{Regex, RegexBuilder};

use crate::models::Record;

pub const INVALID_PATTERN_HINT: &str = "Invalid regex pattern. Fix it to filter/highlight.";

/// Compile a user search pattern. Empty input and malformed syntax both give
/// `None`, which callers treat as "no filter".
pub fn compile_pattern(pattern: &str, case_insensitive: bool) -> Option<Regex> {
    if pattern.is_empty() {
        return None;
    }
    match RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
    {
        Ok(re) => Some(re),
        Err(e) => {
            log::debug!("search pattern {pattern:?} rejected: {e}");
            None
        }
    }
}

/// The user typed something but it did not compile.
pub fn pattern_is_invalid(pattern: &str, compiled: Option<&Regex>) -> bool {
    !pattern.is_empty() && compiled.is_none()
}

/// Text a search pattern is tested against for one record.
pub fn haystack(record: &Record) -> String {
    let mut hay = format!(
        "{} {} {} {}",
        record.date,
        record.description,
        record.category,
        record.amount_string()
    );
    if let Some(url) = &record.receipt_url {
        hay.push(' ');
        hay.push_str(url);
    }
    hay
}

pub fn filter_records<'a>(records: &'a [Record], re: Option<&Regex>) -> Vec<&'a Record> {
    match re {
        None => records.iter().collect(),
        Some(re) => records
            .iter()
            .filter(|r| re.is_match(&haystack(r)))
            .collect(),
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Replace every match of `re` in `text` with `wrap(match)`. Empty matches
/// produce nothing, so patterns such as `a*` still terminate.
fn mark_matches(text: &str, re: &Regex, wrap: impl Fn(&str) -> String) -> String {
    re.replace_all(text, |caps: &regex::Captures| {
        let m = &caps[0];
        if m.is_empty() {
            String::new()
        } else {
            wrap(m)
        }
    })
    .into_owned()
}

/// HTML-escape `text` and wrap each match in `<mark>`. Matching runs on the
/// escaped text, so a pattern for `<` will not find `&lt;`.
pub fn highlight(text: &str, re: Option<&Regex>) -> String {
    let safe = escape_html(text);
    match re {
        None => safe,
        Some(re) => mark_matches(&safe, re, |m| format!("<mark>{m}</mark>")),
    }
}

/// Terminal rendition of [`highlight`]: no escaping, matches shown reversed
/// in yellow.
pub fn highlight_terminal(text: &str, re: Option<&Regex>) -> String {
    match re {
        None => text.to_string(),
        Some(re) => mark_matches(text, re, |m| m.black().on_yellow().to_string()),
    }
}
