use serde::{Deserialize, Serialize};

use crate::scale;

/// Real-valued configuration of a decimal spin box.
///
/// `from` and `to` may be given in either order; anything that needs a
/// direction goes through [`RangeConfig::bottom`] and [`RangeConfig::top`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeConfig {
    pub from: f64,
    pub to: f64,
    pub decimals: u32,
    pub step_size: f64,
    pub editable: bool,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            from: 0.0,
            to: 100.0,
            decimals: 2,
            step_size: 1.0,
            editable: true,
        }
    }
}

impl RangeConfig {
    pub fn new(from: f64, to: f64, decimals: u32) -> Self {
        Self {
            from,
            to,
            decimals,
            ..Default::default()
        }
    }

    pub fn with_step_size(mut self, step_size: f64) -> Self {
        self.step_size = step_size;
        self
    }

    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn bottom(&self) -> f64 {
        self.from.min(self.to)
    }

    pub fn top(&self) -> f64 {
        self.from.max(self.to)
    }

    pub fn is_inverted(&self) -> bool {
        self.from > self.to
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.bottom() && value <= self.top()
    }

    /// `10^decimals`, capped at [`scale::MAX_DECIMALS`].
    pub fn factor(&self) -> f64 {
        scale::scale_factor(self.decimals)
    }

    /// Decimal count actually used for scaling and display.
    pub fn effective_decimals(&self) -> u32 {
        self.decimals.min(scale::MAX_DECIMALS)
    }

    pub fn decimals_capped(&self) -> bool {
        self.decimals > scale::MAX_DECIMALS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverted_range_bounds() {
        let cfg = RangeConfig::new(10.0, 0.0, 1);
        assert!(cfg.is_inverted());
        assert_eq!(cfg.bottom(), 0.0);
        assert_eq!(cfg.top(), 10.0);
        assert!(cfg.contains(5.0));
        assert!(!cfg.contains(-0.1));
    }

    #[test]
    fn test_config_json_shape() {
        let cfg = RangeConfig::new(-1.5, 2.5, 3).with_step_size(0.25);
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("\"step_size\":0.25"));
        let back: RangeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn test_excess_decimals_capped() {
        let cfg = RangeConfig::new(0.0, 1.0, 40);
        assert!(cfg.decimals_capped());
        assert_eq!(cfg.effective_decimals(), scale::MAX_DECIMALS);
        assert_eq!(cfg.factor(), 1e15);
        assert!(!RangeConfig::new(0.0, 1.0, 15).decimals_capped());
    }
}
