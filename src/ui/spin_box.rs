use egui::{self, Align, CursorIcon, Id, Key, Response, Sense, Ui, Widget};

use crate::adapter::DecimalSpinAdapter;
use crate::primitive::{IntSpinBox, IntSpinPrimitive, Interaction};

/// `[-] [ text ] [⇔] [+]` rendering of a [`DecimalSpinAdapter`].
///
/// The returned response is `changed()` only when the frame committed a new
/// value, i.e. exactly when `value_modified` fired.
pub struct DecimalSpinBox<'a, P: IntSpinPrimitive = IntSpinBox> {
    adapter: &'a mut DecimalSpinAdapter<P>,
    id: Option<Id>,
    width: f32,
    drag_pixels_per_step: f32,
}

impl<'a, P: IntSpinPrimitive> DecimalSpinBox<'a, P> {
    pub fn new(adapter: &'a mut DecimalSpinAdapter<P>) -> Self {
        Self {
            adapter,
            id: None,
            width: 90.0,
            drag_pixels_per_step: 8.0,
        }
    }

    /// Base id; the text field is `id.with("text")` and the drag handle
    /// `id.with("drag")`.
    pub fn id(mut self, id: Id) -> Self {
        self.id = Some(id);
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn drag_pixels_per_step(mut self, pixels: f32) -> Self {
        self.drag_pixels_per_step = pixels.max(1.0);
        self
    }
}

impl<P: IntSpinPrimitive> Widget for DecimalSpinBox<'_, P> {
    fn ui(self, ui: &mut Ui) -> Response {
        let DecimalSpinBox {
            adapter,
            id,
            width,
            drag_pixels_per_step,
        } = self;
        let base_id = id.unwrap_or_else(|| ui.next_auto_id());
        let mut committed = false;

        let inner = ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;

            if ui.add(egui::Button::new("−").small()).clicked() {
                committed |= adapter.interact(Interaction::StepDown).is_some();
            }

            let mut text = adapter.display_text();
            let text_response = ui.add(
                egui::TextEdit::singleline(&mut text)
                    .id(base_id.with("text"))
                    .desired_width(width)
                    .horizontal_align(Align::RIGHT)
                    .interactive(adapter.config().editable),
            );
            if text_response.changed() {
                adapter.interact(Interaction::EditText(text));
            }
            if text_response.lost_focus() {
                let interaction = if ui.input(|i| i.key_pressed(Key::Escape)) {
                    Interaction::CancelEdit
                } else {
                    Interaction::CommitEdit
                };
                committed |= adapter.interact(interaction).is_some();
            }
            if text_response.hovered() && !text_response.has_focus() {
                let scroll = ui.input(|i| i.raw_scroll_delta.y);
                if scroll != 0.0 {
                    let steps = if scroll > 0.0 { 1 } else { -1 };
                    committed |= adapter.interact(Interaction::StepBy(steps)).is_some();
                }
            }

            let glyph = ui.add(egui::Label::new("⇔").selectable(false));
            let handle = ui
                .interact(glyph.rect, base_id.with("drag"), Sense::drag())
                .on_hover_cursor(CursorIcon::ResizeHorizontal);
            let acc_id = handle.id.with("drag_acc");
            if handle.dragged() {
                let mut acc = ui.data(|d| d.get_temp::<f32>(acc_id).unwrap_or(0.0));
                acc += handle.drag_delta().x;
                let steps = (acc / drag_pixels_per_step).trunc();
                acc -= steps * drag_pixels_per_step;
                ui.data_mut(|d| d.insert_temp(acc_id, acc));
                if steps != 0.0 {
                    adapter.interact(Interaction::DragBy(steps as i32));
                }
            }
            if handle.drag_stopped() {
                ui.data_mut(|d| d.remove::<f32>(acc_id));
                committed |= adapter.interact(Interaction::DragRelease).is_some();
            }

            if ui.add(egui::Button::new("+").small()).clicked() {
                committed |= adapter.interact(Interaction::StepUp).is_some();
            }
        });

        let mut response = inner.response;
        if committed {
            response.mark_changed();
        }
        response
    }
}
