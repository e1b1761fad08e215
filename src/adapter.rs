//! Real-valued spin box on top of an integer spin control.
//!
//! The adapter owns the real value and the [`RangeConfig`]; the primitive
//! only ever sees the integer projection `round(value * 10^decimals)`.
//! Every setter recomputes all derived state before returning.

use std::fmt;

use crate::errors::Result;
use crate::locale::{LocaleSpec, NumberLocale};
use crate::primitive::{IntSpinBox, IntSpinPrimitive, Interaction, TextHooks};
use crate::range_config::RangeConfig;
use crate::scale::{self, DerivedBounds};
use crate::signal::{ConnectionId, Signal};
use crate::validator::{DoubleValidator, ValidationState};

/// Conversion state handed to the primitive as its text hooks.
struct SpinConverter {
    bounds: DerivedBounds,
    decimals: u32,
    validator: DoubleValidator,
    locale: Box<dyn NumberLocale>,
}

impl SpinConverter {
    fn new(config: &RangeConfig, locale: Box<dyn NumberLocale>) -> Self {
        Self {
            bounds: DerivedBounds::compute(config),
            decimals: config.effective_decimals(),
            validator: DoubleValidator::from_config(config),
            locale,
        }
    }
}

impl TextHooks for SpinConverter {
    fn text_from_value(&self, value: i32) -> String {
        let real = scale::to_real(value, self.bounds.factor);
        self.locale.format_fixed(real, self.decimals)
    }

    // TODO: retry with the C locale when the active locale rejects the text
    fn value_from_text(&self, text: &str) -> Result<i32> {
        let real = self.locale.parse(text)?;
        Ok(scale::to_int(real, self.bounds.factor))
    }

    fn validate(&self, text: &str) -> ValidationState {
        self.validator.validate(text, self.locale.as_ref())
    }
}

pub struct DecimalSpinAdapter<P: IntSpinPrimitive = IntSpinBox> {
    config: RangeConfig,
    value: f64,
    converter: SpinConverter,
    primitive: P,
    value_modified: Signal<f64>,
}

impl DecimalSpinAdapter<IntSpinBox> {
    pub fn new(config: RangeConfig) -> Self {
        Self::with_locale(config, LocaleSpec::c())
    }

    pub fn with_locale(config: RangeConfig, locale: impl NumberLocale + 'static) -> Self {
        Self::with_primitive(config, locale, IntSpinBox::new(0, 0))
    }
}

impl<P: IntSpinPrimitive> DecimalSpinAdapter<P> {
    /// Wrap a host-provided primitive. Its current bounds, step and value
    /// are overwritten from `config`.
    pub fn with_primitive(
        config: RangeConfig,
        locale: impl NumberLocale + 'static,
        primitive: P,
    ) -> Self {
        let converter = SpinConverter::new(&config, Box::new(locale));
        let value = converter.validator.fixup(0.0);
        let mut adapter = Self {
            config,
            value,
            converter,
            primitive,
            value_modified: Signal::new(),
        };
        adapter.recompute();
        adapter
    }

    /// Recompute every derived field from `config` and push the result
    /// into the primitive.
    fn recompute(&mut self) {
        if self.config.decimals_capped() {
            tracing::warn!(
                decimals = self.config.decimals,
                max = scale::MAX_DECIMALS,
                "decimal count capped"
            );
        }
        let bounds = DerivedBounds::compute(&self.config);
        self.converter.bounds = bounds;
        self.converter.decimals = self.config.effective_decimals();
        self.converter.validator = DoubleValidator::from_config(&self.config);

        self.primitive.set_range(bounds.int_from, bounds.int_to);
        self.primitive.set_step_size(bounds.int_step);
        self.primitive.set_editable(self.config.editable);
        self.primitive
            .set_value(scale::to_int(self.value, bounds.factor));

        tracing::debug!(
            factor = bounds.factor,
            int_from = bounds.int_from,
            int_to = bounds.int_to,
            int_step = bounds.int_step,
            "recomputed spin bounds"
        );
    }

    pub fn set_range(&mut self, from: f64, to: f64) {
        self.config.from = from;
        self.config.to = to;
        self.recompute();
    }

    pub fn set_decimals(&mut self, decimals: u32) {
        self.config.decimals = decimals;
        self.recompute();
    }

    pub fn set_step_size(&mut self, step_size: f64) {
        self.config.step_size = step_size;
        self.recompute();
    }

    pub fn set_editable(&mut self, editable: bool) {
        self.config.editable = editable;
        self.recompute();
    }

    pub fn set_config(&mut self, config: RangeConfig) {
        self.config = config;
        self.recompute();
    }

    pub fn set_locale(&mut self, locale: impl NumberLocale + 'static) {
        self.converter.locale = Box::new(locale);
    }

    /// Programmatic assignment. The value is stored as given; clamping
    /// happens in the primitive's integer domain. Never notifies.
    pub fn set_value(&mut self, value: f64) {
        self.value = value;
        self.primitive
            .set_value(scale::to_int(value, self.converter.bounds.factor));
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// The primitive's integer value.
    pub fn internal_value(&self) -> i32 {
        self.primitive.value()
    }

    pub fn config(&self) -> &RangeConfig {
        &self.config
    }

    pub fn bounds(&self) -> DerivedBounds {
        self.converter.bounds
    }

    pub fn validator(&self) -> &DoubleValidator {
        &self.converter.validator
    }

    pub fn locale(&self) -> &dyn NumberLocale {
        self.converter.locale.as_ref()
    }

    pub fn primitive(&self) -> &P {
        &self.primitive
    }

    pub fn is_editing(&self) -> bool {
        self.primitive.is_editing()
    }

    pub fn display_text(&self) -> String {
        self.primitive.display_text(&self.converter)
    }

    pub fn text_from_value(&self, value: i32) -> String {
        self.converter.text_from_value(value)
    }

    pub fn value_from_text(&self, text: &str) -> Result<i32> {
        self.converter.value_from_text(text)
    }

    pub fn validate(&self, text: &str) -> ValidationState {
        self.converter.validate(text)
    }

    /// Relay user input to the primitive. When it commits a change the new
    /// real value is stored, `value_modified` fires once, and the value is
    /// returned.
    pub fn interact(&mut self, interaction: Interaction) -> Option<f64> {
        let committed = self.primitive.interact(interaction, &self.converter)?;
        let value = scale::to_real(committed, self.converter.bounds.factor);
        self.value = value;
        tracing::debug!(value, internal = committed, "value modified");
        self.value_modified.emit(&value);
        Some(value)
    }

    pub fn on_value_modified(&mut self, slot: impl FnMut(&f64) + 'static) -> ConnectionId {
        self.value_modified.connect(slot)
    }

    pub fn disconnect(&mut self, id: ConnectionId) -> bool {
        self.value_modified.disconnect(id)
    }
}

impl<P: IntSpinPrimitive + fmt::Debug> fmt::Debug for DecimalSpinAdapter<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecimalSpinAdapter")
            .field("config", &self.config)
            .field("value", &self.value)
            .field("bounds", &self.converter.bounds)
            .field("locale", &self.converter.locale.name())
            .field("primitive", &self.primitive)
            .field("value_modified", &self.value_modified)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(adapter: &mut DecimalSpinAdapter) -> Rc<RefCell<Vec<f64>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        adapter.on_value_modified(move |v| sink.borrow_mut().push(*v));
        seen
    }

    #[test]
    fn test_two_decimal_example() {
        let mut adapter = DecimalSpinAdapter::new(RangeConfig::new(0.0, 100.0, 2));
        let bounds = adapter.bounds();
        assert_eq!(bounds.factor, 100.0);
        assert_eq!((bounds.int_from, bounds.int_to, bounds.int_step), (0, 10_000, 100));

        adapter.set_value(42.5);
        assert_eq!(adapter.internal_value(), 4250);
        assert_eq!(adapter.display_text(), "42.50");
        assert_eq!(adapter.value(), 42.5);
    }

    #[test]
    fn test_integer_mode_identity() {
        let adapter = DecimalSpinAdapter::new(RangeConfig::new(-50.0, 50.0, 0));
        assert_eq!(adapter.bounds().factor, 1.0);
        assert_eq!(adapter.text_from_value(17), "17");
        assert_eq!(adapter.text_from_value(-3), "-3");
        assert_eq!(adapter.value_from_text("17").unwrap(), 17);
    }

    #[test]
    fn test_set_value_does_not_notify() {
        let mut adapter = DecimalSpinAdapter::new(RangeConfig::default());
        let seen = recorder(&mut adapter);

        adapter.set_value(10.0);
        adapter.set_range(0.0, 50.0);
        adapter.set_decimals(1);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_committed_change_notifies_once() {
        let mut adapter = DecimalSpinAdapter::new(RangeConfig::default());
        let seen = recorder(&mut adapter);

        assert_eq!(adapter.interact(Interaction::StepUp), Some(1.0));
        adapter.interact(Interaction::EditText("12.3".into()));
        assert!(adapter.is_editing());
        assert_eq!(adapter.interact(Interaction::CommitEdit), Some(12.3));
        adapter.interact(Interaction::DragBy(4));
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(adapter.interact(Interaction::DragRelease), Some(16.3));

        assert_eq!(*seen.borrow(), vec![1.0, 12.3, 16.3]);
        assert_eq!(adapter.value(), 16.3);
    }

    #[test]
    fn test_rejected_text_does_not_notify() {
        let mut adapter = DecimalSpinAdapter::new(RangeConfig::default());
        let seen = recorder(&mut adapter);
        adapter.set_value(5.0);

        adapter.interact(Interaction::EditText("250".into()));
        assert_eq!(adapter.interact(Interaction::CommitEdit), None);
        assert_eq!(adapter.display_text(), "5.00");
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_inverted_range_matches_straight_range() {
        let mut inverted = DecimalSpinAdapter::new(RangeConfig::new(10.0, 0.0, 2));
        let mut straight = DecimalSpinAdapter::new(RangeConfig::new(0.0, 10.0, 2));
        inverted.set_value(5.0);
        straight.set_value(5.0);

        assert_eq!(inverted.validator(), straight.validator());
        assert_eq!(inverted.internal_value(), straight.internal_value());
        assert_eq!(inverted.validate("7.5"), ValidationState::Acceptable);
        assert_eq!(inverted.validate("-1"), ValidationState::Invalid);
        assert_eq!(inverted.bounds().int_from, 1000);
        assert_eq!(inverted.bounds().int_to, 0);
    }

    #[test]
    fn test_set_value_is_not_clamped_but_projection_is() {
        let mut adapter = DecimalSpinAdapter::new(RangeConfig::new(0.0, 10.0, 1));
        adapter.set_value(50.0);
        assert_eq!(adapter.value(), 50.0);
        assert_eq!(adapter.internal_value(), 100);
        assert_eq!(adapter.display_text(), "10.0");
    }

    #[test]
    fn test_decimals_change_reprojects_value() {
        let mut adapter = DecimalSpinAdapter::new(RangeConfig::new(0.0, 10.0, 1));
        adapter.set_value(2.5);
        assert_eq!(adapter.internal_value(), 25);

        adapter.set_decimals(3);
        assert_eq!(adapter.internal_value(), 2500);
        assert_eq!(adapter.bounds().int_to, 10_000);
        assert_eq!(adapter.display_text(), "2.500");
    }

    #[test]
    fn test_range_change_reclamps_internal_value() {
        let mut adapter = DecimalSpinAdapter::new(RangeConfig::default());
        adapter.set_value(80.0);
        adapter.set_range(0.0, 50.0);
        assert_eq!(adapter.internal_value(), 5000);
    }

    #[test]
    fn test_setter_order_independent() {
        let mut a = DecimalSpinAdapter::new(RangeConfig::default());
        a.set_range(-3.0, 7.0);
        a.set_decimals(4);

        let mut b = DecimalSpinAdapter::new(RangeConfig::default());
        b.set_decimals(4);
        b.set_range(-3.0, 7.0);

        assert_eq!(a.bounds(), b.bounds());
        assert_eq!(a.config(), b.config());
    }

    #[test]
    fn test_large_decimals_clamp_to_int_domain() {
        let adapter = DecimalSpinAdapter::new(RangeConfig::new(-1000.0, 1000.0, 9));
        assert_eq!(adapter.bounds().int_from, scale::INT_MIN);
        assert_eq!(adapter.bounds().int_to, scale::INT_MAX);
    }

    #[test]
    fn test_locale_formatting_and_no_fallback() {
        let mut adapter =
            DecimalSpinAdapter::with_locale(RangeConfig::new(0.0, 5000.0, 2), LocaleSpec::de_de());
        adapter.set_value(1234.5);
        assert_eq!(adapter.display_text(), "1.234,50");
        assert_eq!(adapter.value_from_text("1.234,50").unwrap(), 123_450);
        assert!(adapter.value_from_text("1,234.50").is_err());

        adapter.set_locale(LocaleSpec::en_us());
        assert_eq!(adapter.display_text(), "1,234.50");
    }

    #[test]
    fn test_not_editable_ignores_typing() {
        let mut adapter =
            DecimalSpinAdapter::new(RangeConfig::default().with_editable(false));
        adapter.interact(Interaction::EditText("3".into()));
        assert_eq!(adapter.interact(Interaction::CommitEdit), None);
        assert_eq!(adapter.interact(Interaction::StepUp), Some(1.0));
    }

    #[test]
    fn test_disconnect_stops_notifications() {
        let mut adapter = DecimalSpinAdapter::new(RangeConfig::default());
        let seen = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&seen);
        let id = adapter.on_value_modified(move |_| *sink.borrow_mut() += 1);

        adapter.interact(Interaction::StepUp);
        assert!(adapter.disconnect(id));
        adapter.interact(Interaction::StepUp);
        assert_eq!(*seen.borrow(), 1);
    }

    /// Host primitive that records every bound update it receives.
    #[derive(Debug)]
    struct RecordingSpin {
        inner: IntSpinBox,
        ranges: Vec<(i32, i32, i32)>,
    }

    impl IntSpinPrimitive for RecordingSpin {
        fn from(&self) -> i32 {
            self.inner.from()
        }
        fn to(&self) -> i32 {
            self.inner.to()
        }
        fn set_range(&mut self, from: i32, to: i32) {
            self.ranges.push((from, to, self.inner.step_size()));
            self.inner.set_range(from, to);
        }
        fn value(&self) -> i32 {
            self.inner.value()
        }
        fn set_value(&mut self, value: i32) {
            self.inner.set_value(value);
        }
        fn step_size(&self) -> i32 {
            self.inner.step_size()
        }
        fn set_step_size(&mut self, step_size: i32) {
            self.inner.set_step_size(step_size);
        }
        fn editable(&self) -> bool {
            self.inner.editable()
        }
        fn set_editable(&mut self, editable: bool) {
            self.inner.set_editable(editable);
        }
        fn is_editing(&self) -> bool {
            self.inner.is_editing()
        }
        fn display_text(&self, hooks: &dyn TextHooks) -> String {
            self.inner.display_text(hooks)
        }
        fn interact(&mut self, interaction: Interaction, hooks: &dyn TextHooks) -> Option<i32> {
            self.inner.interact(interaction, hooks)
        }
    }

    #[test]
    fn test_host_primitive_gets_one_update_per_setter() {
        let host = RecordingSpin {
            inner: IntSpinBox::new(-7, 7),
            ranges: Vec::new(),
        };
        let mut adapter =
            DecimalSpinAdapter::with_primitive(RangeConfig::new(0.0, 1.0, 1), LocaleSpec::c(), host);
        assert_eq!(adapter.primitive().ranges, vec![(0, 10, 1)]);

        adapter.set_decimals(2);
        adapter.set_range(-1.0, 1.0);
        assert_eq!(
            adapter.primitive().ranges[1..],
            [(0, 100, 10), (-100, 100, 100)]
        );
        assert_eq!(adapter.primitive().step_size(), 100);
        assert_eq!(adapter.interact(Interaction::StepUp), Some(1.0));
    }

    #[test]
    fn test_initial_value_fixed_up_into_range() {
        let adapter = DecimalSpinAdapter::new(RangeConfig::new(10.0, 20.0, 1));
        assert_eq!(adapter.value(), 10.0);
        assert_eq!(adapter.internal_value(), 100);
    }

    #[test]
    fn test_every_config_path_caps_decimals() {
        let wide = RangeConfig::new(0.0, 1.0, 40);

        let mut adapter = DecimalSpinAdapter::new(RangeConfig::default());
        adapter.set_config(wide);
        assert_eq!(adapter.config().decimals, 40);
        assert_eq!(adapter.bounds().factor, 1e15);
        assert_eq!(adapter.display_text(), "0.000000000000000");

        let host = DecimalSpinAdapter::with_primitive(wide, LocaleSpec::c(), IntSpinBox::new(0, 0));
        assert_eq!(host.bounds(), adapter.bounds());
        assert_eq!(host.display_text(), adapter.display_text());
    }
}
