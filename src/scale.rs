//! Fixed-point scaling between the real-valued domain and the integer domain
//! of the underlying spin control.

use crate::range_config::RangeConfig;

/// Largest decimal count honoured; f64 has no more significant digits to give.
pub const MAX_DECIMALS: u32 = 15;

pub const INT_MIN: i32 = i32::MIN;
pub const INT_MAX: i32 = i32::MAX;

pub fn scale_factor(decimals: u32) -> f64 {
    10f64.powi(decimals.min(MAX_DECIMALS) as i32)
}

/// Round half away from zero and clamp into `[INT_MIN, INT_MAX]`.
/// NaN maps to zero.
pub fn clamp_to_int_domain(x: f64) -> i32 {
    if x.is_nan() {
        return 0;
    }
    let rounded = x.round();
    if rounded <= INT_MIN as f64 {
        INT_MIN
    } else if rounded >= INT_MAX as f64 {
        INT_MAX
    } else {
        rounded as i32
    }
}

pub fn to_int(value: f64, factor: f64) -> i32 {
    clamp_to_int_domain(value * factor)
}

pub fn to_real(value: i32, factor: f64) -> f64 {
    value as f64 / factor
}

/// Integer-domain projection of a [`RangeConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedBounds {
    pub factor: f64,
    pub int_from: i32,
    pub int_to: i32,
    pub int_step: i32,
}

impl DerivedBounds {
    pub fn compute(config: &RangeConfig) -> Self {
        let factor = config.factor();
        Self {
            factor,
            int_from: to_int(config.from, factor),
            int_to: to_int(config.to, factor),
            int_step: to_int(config.step_size, factor),
        }
    }

    pub fn int_bottom(&self) -> i32 {
        self.int_from.min(self.int_to)
    }

    pub fn int_top(&self) -> i32 {
        self.int_from.max(self.int_to)
    }
}
