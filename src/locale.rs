//! Locale-aware fixed-point formatting and parsing.
//!
//! Locales are injected into the adapter as a [`NumberLocale`] rather than
//! read from the process environment. [`LocaleSpec`] covers the common
//! separator conventions; hosts with a real locale database can implement
//! the trait themselves.

use crate::errors::{Result, SpinError};
use crate::scale::MAX_DECIMALS;

pub trait NumberLocale {
    fn name(&self) -> &str;
    fn decimal_separator(&self) -> char;
    fn group_separator(&self) -> Option<char>;
    fn negative_sign(&self) -> char;
    fn positive_sign(&self) -> char;

    /// Format with exactly `decimals` fraction digits.
    fn format_fixed(&self, value: f64, decimals: u32) -> String;

    /// Parse locale-formatted text. There is deliberately no retry in
    /// another locale when this fails.
    fn parse(&self, text: &str) -> Result<f64>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocaleSpec {
    pub name: String,
    pub decimal_separator: char,
    pub group_separator: Option<char>,
    pub group_size: usize,
    pub negative_sign: char,
    pub positive_sign: char,
}

impl Default for LocaleSpec {
    fn default() -> Self {
        Self::c()
    }
}

impl LocaleSpec {
    pub fn c() -> Self {
        Self {
            name: "C".to_string(),
            decimal_separator: '.',
            group_separator: None,
            group_size: 3,
            negative_sign: '-',
            positive_sign: '+',
        }
    }

    pub fn en_us() -> Self {
        Self {
            name: "en_US".to_string(),
            group_separator: Some(','),
            ..Self::c()
        }
    }

    pub fn de_de() -> Self {
        Self {
            name: "de_DE".to_string(),
            decimal_separator: ',',
            group_separator: Some('.'),
            ..Self::c()
        }
    }

    pub fn fr_fr() -> Self {
        Self {
            name: "fr_FR".to_string(),
            decimal_separator: ',',
            group_separator: Some('\u{202F}'),
            ..Self::c()
        }
    }

    pub fn de_ch() -> Self {
        Self {
            name: "de_CH".to_string(),
            group_separator: Some('\u{2019}'),
            ..Self::c()
        }
    }

    fn group_digits(&self, digits: &str) -> String {
        let sep = match self.group_separator {
            Some(sep) if self.group_size > 0 && digits.len() > self.group_size => sep,
            _ => return digits.to_string(),
        };

        let mut out = String::with_capacity(digits.len() + digits.len() / self.group_size);
        let lead = digits.len() % self.group_size;
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (i + self.group_size - lead) % self.group_size == 0 {
                out.push(sep);
            }
            out.push(ch);
        }
        out
    }
}

impl NumberLocale for LocaleSpec {
    fn name(&self) -> &str {
        &self.name
    }

    fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    fn group_separator(&self) -> Option<char> {
        self.group_separator
    }

    fn negative_sign(&self) -> char {
        self.negative_sign
    }

    fn positive_sign(&self) -> char {
        self.positive_sign
    }

    fn format_fixed(&self, value: f64, decimals: u32) -> String {
        if !value.is_finite() {
            return value.to_string();
        }

        let decimals = decimals.min(MAX_DECIMALS) as usize;
        let raw = format!("{:.*}", decimals, value.abs());
        let (int_part, frac_part) = match raw.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (raw.as_str(), None),
        };

        let mut out = String::with_capacity(raw.len() + 4);
        // No sign on a value that rounds to zero
        let is_zero = raw.bytes().all(|b| b == b'0' || b == b'.');
        if value.is_sign_negative() && !is_zero {
            out.push(self.negative_sign);
        }
        out.push_str(&self.group_digits(int_part));
        if let Some(frac) = frac_part {
            out.push(self.decimal_separator);
            out.push_str(frac);
        }
        out
    }

    fn parse(&self, text: &str) -> Result<f64> {
        let fail = || SpinError::parse_failure(text, &self.name);

        let trimmed = text.trim();
        let (negative, body) = if let Some(rest) = trimmed.strip_prefix(self.negative_sign) {
            (true, rest)
        } else if let Some(rest) = trimmed.strip_prefix(self.positive_sign) {
            (false, rest)
        } else {
            (false, trimmed)
        };

        let mut normalized = String::with_capacity(body.len() + 1);
        if negative {
            normalized.push('-');
        }

        let mut seen_decimal = false;
        let mut digits = 0usize;
        for ch in body.chars() {
            if ch.is_ascii_digit() {
                normalized.push(ch);
                digits += 1;
            } else if ch == self.decimal_separator && !seen_decimal {
                seen_decimal = true;
                normalized.push('.');
            } else if Some(ch) == self.group_separator && !seen_decimal && digits > 0 {
                continue;
            } else {
                return Err(fail());
            }
        }

        if digits == 0 {
            return Err(fail());
        }
        normalized.parse::<f64>().map_err(|_| fail())
    }
}

/// Locales addressable by identifier, e.g. `"en_US"` or `"de-DE"`.
#[derive(Debug, Clone)]
pub struct LocaleRegistry {
    locales: Vec<LocaleSpec>,
}

impl Default for LocaleRegistry {
    fn default() -> Self {
        Self {
            locales: vec![
                LocaleSpec::c(),
                LocaleSpec::en_us(),
                LocaleSpec::de_de(),
                LocaleSpec::fr_fr(),
                LocaleSpec::de_ch(),
            ],
        }
    }
}

fn normalize_id(id: &str) -> String {
    id.trim().replace('-', "_").to_ascii_lowercase()
}

impl LocaleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a locale, replacing any existing one with the same identifier.
    pub fn register(&mut self, spec: LocaleSpec) {
        let key = normalize_id(&spec.name);
        self.locales.retain(|l| normalize_id(&l.name) != key);
        self.locales.push(spec);
    }

    pub fn get(&self, id: &str) -> Result<&LocaleSpec> {
        let key = normalize_id(id);
        self.locales
            .iter()
            .find(|l| normalize_id(&l.name) == key)
            .ok_or_else(|| SpinError::UnknownLocale { id: id.to_string() })
    }

    /// Look up `id`, falling back to the C locale when it is unknown.
    pub fn resolve(&self, id: &str) -> LocaleSpec {
        match self.get(id) {
            Ok(spec) => spec.clone(),
            Err(e) => {
                tracing::warn!(locale = id, error = %e, "falling back to C locale");
                LocaleSpec::c()
            }
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.locales.iter().map(|l| l.name.as_str())
    }
}
