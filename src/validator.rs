use crate::locale::NumberLocale;
use crate::range_config::RangeConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationState {
    /// The text can never become acceptable by appending characters.
    Invalid,
    /// Not acceptable yet, but may be mid-edit.
    Intermediate,
    Acceptable,
}

/// Validates typed text against real-valued bounds.
///
/// Bounds are taken in the real domain, before any scaling, so they are
/// kept separately from the integer bounds of the spin control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoubleValidator {
    bottom: f64,
    top: f64,
    decimals: u32,
}

impl DoubleValidator {
    pub fn new(a: f64, b: f64, decimals: u32) -> Self {
        Self {
            bottom: a.min(b),
            top: a.max(b),
            decimals,
        }
    }

    pub fn from_config(config: &RangeConfig) -> Self {
        Self::new(config.bottom(), config.top(), config.effective_decimals())
    }

    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    pub fn validate(&self, text: &str, locale: &dyn NumberLocale) -> ValidationState {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return ValidationState::Intermediate;
        }

        let (negative, body) = if let Some(rest) = trimmed.strip_prefix(locale.negative_sign()) {
            (true, rest)
        } else if let Some(rest) = trimmed.strip_prefix(locale.positive_sign()) {
            (false, rest)
        } else {
            (false, trimmed)
        };

        if negative && self.bottom >= 0.0 {
            return ValidationState::Invalid;
        }
        if body.is_empty() {
            return ValidationState::Intermediate;
        }

        let mut int_digits = 0usize;
        let mut frac_digits = 0usize;
        let mut seen_decimal = false;
        for ch in body.chars() {
            if ch.is_ascii_digit() {
                if seen_decimal {
                    frac_digits += 1;
                } else {
                    int_digits += 1;
                }
            } else if ch == locale.decimal_separator() {
                if self.decimals == 0 || seen_decimal {
                    return ValidationState::Invalid;
                }
                seen_decimal = true;
            } else if Some(ch) == locale.group_separator() && !seen_decimal {
                continue;
            } else {
                return ValidationState::Invalid;
            }
        }

        if frac_digits > self.decimals as usize {
            return ValidationState::Invalid;
        }
        if int_digits + frac_digits == 0 {
            return ValidationState::Intermediate;
        }

        let value = match locale.parse(trimmed) {
            Ok(value) => value,
            Err(_) => return ValidationState::Invalid,
        };

        if value >= self.bottom && value <= self.top {
            return ValidationState::Acceptable;
        }
        if (value < 0.0 && self.bottom >= 0.0) || (value > 0.0 && self.top < 0.0) {
            return ValidationState::Invalid;
        }

        let widest = integer_digits(self.bottom).max(integer_digits(self.top));
        if int_digits <= widest {
            ValidationState::Intermediate
        } else {
            ValidationState::Invalid
        }
    }

    /// Clamp `value` into `[bottom, top]`.
    pub fn fixup(&self, value: f64) -> f64 {
        if value < self.bottom {
            self.bottom
        } else if value > self.top {
            self.top
        } else {
            value
        }
    }
}

fn integer_digits(x: f64) -> usize {
    let whole = x.abs().trunc();
    if !whole.is_finite() || whole < 1.0 {
        1
    } else {
        format!("{:.0}", whole).len()
    }
}
