pub mod common;
pub mod spin_box;

pub use spin_box::DecimalSpinBox;
