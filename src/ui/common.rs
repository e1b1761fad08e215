use egui::{self, Color32, RichText, Vec2};

use crate::adapter::DecimalSpinAdapter;
use crate::ui::spin_box::DecimalSpinBox;

// Common color constants used across UI panels
pub const PANEL_BG: Color32 = Color32::from_rgb(51, 51, 51);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(200, 200, 200);
pub const TEXT_LABEL: Color32 = Color32::from_rgb(180, 180, 180);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(140, 140, 140);
pub const ACCENT: Color32 = Color32::from_rgb(70, 130, 255);

/// Labelled spin box row. Returns true when the user committed a change.
pub fn spin_row(ui: &mut egui::Ui, label: &str, adapter: &mut DecimalSpinAdapter) -> bool {
    let mut changed = false;

    ui.horizontal(|ui| {
        // Fixed-width label column
        ui.allocate_ui_with_layout(
            Vec2::new(120.0, 18.0),
            egui::Layout::right_to_left(egui::Align::Center),
            |ui| {
                ui.label(RichText::new(label).size(11.0).color(TEXT_LABEL));
            },
        );

        changed = ui.add(DecimalSpinBox::new(&mut *adapter)).changed();

        // Current real value and its integer projection
        ui.label(
            RichText::new(format!("= {} ({})", adapter.value(), adapter.internal_value()))
                .size(10.0)
                .color(TEXT_SECONDARY)
                .monospace(),
        );
    });

    changed
}

/// Label/value pair for read-only diagnostics.
pub fn info_row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.label(
            RichText::new(format!("{}:", label))
                .size(10.0)
                .color(TEXT_SECONDARY),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(value).size(10.0).color(TEXT_PRIMARY));
        });
    });
}
