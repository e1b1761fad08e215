//! Real-valued, fixed-precision spin boxes built on an integer spin control.
//!
//! [`adapter::DecimalSpinAdapter`] scales a real range by `10^decimals` onto
//! an [`primitive::IntSpinPrimitive`], formats and parses text through an
//! injected [`locale::NumberLocale`], and reports user-committed changes
//! through a `value_modified` signal. [`ui::DecimalSpinBox`] renders one with
//! egui.

pub mod adapter;
pub mod errors;
pub mod locale;
pub mod logging;
pub mod primitive;
pub mod range_config;
pub mod scale;
pub mod settings;
pub mod signal;
pub mod ui;
pub mod validator;

pub use adapter::DecimalSpinAdapter;
pub use errors::{Result, SpinError};
pub use locale::{LocaleRegistry, LocaleSpec, NumberLocale};
pub use primitive::{IntSpinBox, IntSpinPrimitive, Interaction};
pub use range_config::RangeConfig;
