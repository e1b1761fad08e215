//! The integer spin control that decimal spin boxes are built on.
//!
//! Hosts with their own toolkit control implement [`IntSpinPrimitive`];
//! [`IntSpinBox`] is the in-crate implementation used by the egui widget.

use crate::errors::Result;
use crate::validator::ValidationState;

/// Text conversion hooks the primitive calls on every render and edit.
pub trait TextHooks {
    fn text_from_value(&self, value: i32) -> String;
    fn value_from_text(&self, text: &str) -> Result<i32>;
    fn validate(&self, text: &str) -> ValidationState;
}

/// User input delivered to a spin control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    StepUp,
    StepDown,
    /// Several steps at once (mouse wheel, page keys); negative steps down.
    StepBy(i32),
    /// In-progress text; never commits.
    EditText(String),
    CommitEdit,
    CancelEdit,
    /// In-progress drag by a number of steps; never commits.
    DragBy(i32),
    DragRelease,
}

pub trait IntSpinPrimitive {
    fn from(&self) -> i32;
    fn to(&self) -> i32;
    /// Set both ends at once; the current value is clamped afterwards.
    fn set_range(&mut self, from: i32, to: i32);

    fn value(&self) -> i32;
    /// Programmatic assignment. Clamps, never reports a commit.
    fn set_value(&mut self, value: i32);

    fn step_size(&self) -> i32;
    fn set_step_size(&mut self, step_size: i32);

    fn editable(&self) -> bool;
    fn set_editable(&mut self, editable: bool);

    fn is_editing(&self) -> bool;

    /// Text currently shown: the edit buffer while editing, else the
    /// formatted (possibly drag-pending) value.
    fn display_text(&self, hooks: &dyn TextHooks) -> String;

    /// Apply one interaction. Returns the new value when it finalized a
    /// committed change, `None` for transient or rejected input.
    fn interact(&mut self, interaction: Interaction, hooks: &dyn TextHooks) -> Option<i32>;
}

#[derive(Debug, Clone)]
pub struct IntSpinBox {
    from: i32,
    to: i32,
    value: i32,
    step_size: i32,
    editable: bool,
    edit_buffer: Option<String>,
    drag_pending: Option<i32>,
}

impl IntSpinBox {
    pub fn new(from: i32, to: i32) -> Self {
        Self {
            from,
            to,
            value: from.min(to),
            step_size: 1,
            editable: true,
            edit_buffer: None,
            drag_pending: None,
        }
    }

    fn clamp(&self, value: i64) -> i32 {
        let lo = self.from.min(self.to) as i64;
        let hi = self.from.max(self.to) as i64;
        value.clamp(lo, hi) as i32
    }

    fn offset(&self, base: i32, steps: i32) -> i32 {
        self.clamp(base as i64 + self.step_size as i64 * steps as i64)
    }

    /// Drain the edit buffer, returning its value if it would commit.
    fn take_edit_value(&mut self, hooks: &dyn TextHooks) -> Option<i32> {
        let text = self.edit_buffer.take()?;
        if hooks.validate(&text) != ValidationState::Acceptable {
            tracing::debug!(text = %text, "discarding non-acceptable edit");
            return None;
        }
        match hooks.value_from_text(&text) {
            Ok(v) => Some(self.clamp(v as i64)),
            Err(e) => {
                tracing::debug!(error = %e, "discarding unparseable edit");
                None
            }
        }
    }

    fn step(&mut self, steps: i32, hooks: &dyn TextHooks) -> Option<i32> {
        // A no-op step leaves any edit or drag in progress untouched
        if self.step_size == 0 || steps == 0 {
            return None;
        }
        self.drag_pending = None;
        let base = self.take_edit_value(hooks).unwrap_or(self.value);
        let target = self.offset(base, steps);
        if target == self.value {
            return None;
        }
        self.value = target;
        Some(target)
    }
}

impl IntSpinPrimitive for IntSpinBox {
    fn from(&self) -> i32 {
        self.from
    }

    fn to(&self) -> i32 {
        self.to
    }

    fn set_range(&mut self, from: i32, to: i32) {
        self.from = from;
        self.to = to;
        self.value = self.clamp(self.value as i64);
        if let Some(pending) = self.drag_pending {
            self.drag_pending = Some(self.clamp(pending as i64));
        }
    }

    fn value(&self) -> i32 {
        self.value
    }

    fn set_value(&mut self, value: i32) {
        self.drag_pending = None;
        self.value = self.clamp(value as i64);
    }

    fn step_size(&self) -> i32 {
        self.step_size
    }

    fn set_step_size(&mut self, step_size: i32) {
        self.step_size = step_size;
    }

    fn editable(&self) -> bool {
        self.editable
    }

    fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
        if !editable {
            self.edit_buffer = None;
        }
    }

    fn is_editing(&self) -> bool {
        self.edit_buffer.is_some()
    }

    fn display_text(&self, hooks: &dyn TextHooks) -> String {
        match &self.edit_buffer {
            Some(text) => text.clone(),
            None => hooks.text_from_value(self.drag_pending.unwrap_or(self.value)),
        }
    }

    fn interact(&mut self, interaction: Interaction, hooks: &dyn TextHooks) -> Option<i32> {
        match interaction {
            Interaction::StepUp => self.step(1, hooks),
            Interaction::StepDown => self.step(-1, hooks),
            Interaction::StepBy(steps) => self.step(steps, hooks),
            Interaction::EditText(text) => {
                if !self.editable {
                    return None;
                }
                if hooks.validate(&text) == ValidationState::Invalid {
                    tracing::trace!(text = %text, "rejected keystroke");
                } else {
                    self.drag_pending = None;
                    self.edit_buffer = Some(text);
                }
                None
            }
            Interaction::CommitEdit => {
                if !self.editable || self.edit_buffer.is_none() {
                    return None;
                }
                let committed = self.take_edit_value(hooks)?;
                self.value = committed;
                Some(committed)
            }
            Interaction::CancelEdit => {
                self.edit_buffer = None;
                None
            }
            Interaction::DragBy(steps) => {
                self.edit_buffer = None;
                let base = self.drag_pending.unwrap_or(self.value);
                self.drag_pending = Some(self.offset(base, steps));
                None
            }
            Interaction::DragRelease => {
                let pending = self.drag_pending.take()?;
                if pending == self.value {
                    return None;
                }
                self.value = pending;
                Some(pending)
            }
        }
    }
}
