//! Text normalization and date sniffing used by the matcher

use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;

/// Trimmed, lower-cased text; absent values become empty
pub fn normalize(value: Option<&str>) -> String {
    value.map(|v| v.trim().to_lowercase()).unwrap_or_default()
}

/// Sort key for labels: lower-cased with Latin accents folded, so
/// "Água" sorts next to "agua" rather than after "z"
pub fn label_key(label: &str) -> String {
    label
        .trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(fold_accent)
        .collect()
}

/// Alphabetical label order; exact ties fall back to the raw label
pub fn label_order(a: &str, b: &str) -> Ordering {
    label_key(a).cmp(&label_key(b)).then_with(|| a.cmp(b))
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

/// Parse a record date written as `DD/MM/YYYY` or `YYYY-MM-DD`.
///
/// The separator picks the layout. A trailing time component
/// (`2024-03-15T08:00:00`, `2024-03-15 08:00`) is ignored.
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().split(['T', ' ']).next()?;

    if date_part.contains('/') {
        let [day, month, year] = split_numeric(date_part, '/')?;
        NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
    } else if date_part.contains('-') {
        let [year, month, day] = split_numeric(date_part, '-')?;
        // Rejects day-first dashes like 15-03-2024
        if year < 1000 {
            return None;
        }
        NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
    } else {
        None
    }
}

/// Month (1-12) of a record date, if it parses
pub fn record_month(raw: Option<&str>) -> Option<u32> {
    raw.and_then(parse_record_date).map(|d| d.month())
}

fn split_numeric(value: &str, separator: char) -> Option<[u32; 3]> {
    let mut parts = value.split(separator);
    let mut out = [0u32; 3];
    for slot in out.iter_mut() {
        let part = parts.next()?;
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        *slot = part.parse().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(out)
}
