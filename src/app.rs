use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use chrono::{DateTime, Local};
use eframe::egui::{self, RichText};

use decimal_spin::adapter::DecimalSpinAdapter;
use decimal_spin::locale::LocaleRegistry;
use decimal_spin::range_config::RangeConfig;
use decimal_spin::settings::{Settings, SpinPreset, Theme};
use decimal_spin::ui::common::{info_row, spin_row, ACCENT, PANEL_BG, TEXT_SECONDARY};

pub struct EventRecord {
    pub at: DateTime<Local>,
    pub label: String,
    pub value: f64,
}

type EventLog = Rc<RefCell<VecDeque<EventRecord>>>;

struct SpinEntry {
    label: String,
    adapter: DecimalSpinAdapter,
}

/// Editors for the selected entry's configuration. They are spin boxes
/// themselves, synced with `set_value` so syncing never echoes back.
struct ConfigPanel {
    from: DecimalSpinAdapter,
    to: DecimalSpinAdapter,
    step: DecimalSpinAdapter,
    decimals: u32,
    editable: bool,
}

impl ConfigPanel {
    fn new(registry: &LocaleRegistry, locale: &str) -> Self {
        let field = || {
            DecimalSpinAdapter::with_locale(
                RangeConfig::new(-1_000_000.0, 1_000_000.0, 3).with_step_size(0.5),
                registry.resolve(locale),
            )
        };
        Self {
            from: field(),
            to: field(),
            step: field(),
            decimals: 2,
            editable: true,
        }
    }

    fn load(&mut self, config: &RangeConfig) {
        self.from.set_value(config.from);
        self.to.set_value(config.to);
        self.step.set_value(config.step_size);
        self.decimals = config.decimals;
        self.editable = config.editable;
    }

    fn to_config(&self) -> RangeConfig {
        RangeConfig {
            from: self.from.value(),
            to: self.to.value(),
            decimals: self.decimals,
            step_size: self.step.value(),
            editable: self.editable,
        }
    }
}

pub struct SpinDemoApp {
    settings: Settings,
    registry: LocaleRegistry,
    entries: Vec<SpinEntry>,
    selected: usize,
    panel: ConfigPanel,
    events: EventLog,
}

impl SpinDemoApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        cc.egui_ctx.set_visuals(settings.theme.visuals());

        let registry = LocaleRegistry::new();
        let events: EventLog = Rc::new(RefCell::new(VecDeque::new()));
        let panel = ConfigPanel::new(&registry, &settings.locale);

        let mut app = Self {
            settings,
            registry,
            entries: Vec::new(),
            selected: 0,
            panel,
            events,
        };
        let presets = app.settings.presets.clone();
        for preset in presets {
            app.add_entry(preset);
        }
        app.select(0);
        app
    }

    fn add_entry(&mut self, preset: SpinPreset) {
        let mut adapter =
            DecimalSpinAdapter::with_locale(preset.config, self.registry.resolve(&self.settings.locale));
        adapter.set_value(preset.value);

        let events = Rc::clone(&self.events);
        let label = preset.label.clone();
        let cap = self.settings.max_event_log.max(1);
        adapter.on_value_modified(move |value| {
            let mut log = events.borrow_mut();
            log.push_front(EventRecord {
                at: Local::now(),
                label: label.clone(),
                value: *value,
            });
            log.truncate(cap);
        });

        self.entries.push(SpinEntry {
            label: preset.label,
            adapter,
        });
    }

    fn select(&mut self, index: usize) {
        if let Some(entry) = self.entries.get(index) {
            self.selected = index;
            self.panel.load(entry.adapter.config());
        }
    }

    fn apply_locale(&mut self, id: &str) {
        log::info!("Switching number locale to {}", id);
        self.settings.locale = id.to_string();
        for entry in &mut self.entries {
            entry.adapter.set_locale(self.registry.resolve(id));
        }
        for field in [&mut self.panel.from, &mut self.panel.to, &mut self.panel.step] {
            field.set_locale(self.registry.resolve(id));
        }
    }

    fn sync_presets(&mut self) {
        self.settings.presets = self
            .entries
            .iter()
            .map(|e| SpinPreset::new(&e.label, *e.adapter.config(), e.adapter.value()))
            .collect();
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Decimal spin boxes");
                ui.add_space(16.0);

                ui.label("Locale:");
                let mut chosen: Option<String> = None;
                egui::ComboBox::from_id_salt("locale_combo")
                    .selected_text(self.settings.locale.as_str())
                    .show_ui(ui, |ui| {
                        for id in self.registry.ids() {
                            if ui
                                .selectable_label(self.settings.locale == id, id)
                                .clicked()
                            {
                                chosen = Some(id.to_string());
                            }
                        }
                    });
                if let Some(id) = chosen {
                    self.apply_locale(&id);
                }

                ui.add_space(16.0);
                let before = self.settings.theme;
                ui.selectable_value(&mut self.settings.theme, Theme::Dark, "Dark");
                ui.selectable_value(&mut self.settings.theme, Theme::Light, "Light");
                if self.settings.theme != before {
                    ctx.set_visuals(self.settings.theme.visuals());
                }
            });
        });
    }

    fn render_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .default_width(340.0)
            .show(ctx, |ui| {
                let Some(label) = self.entries.get(self.selected).map(|e| e.label.clone()) else {
                    ui.label("No spin box selected");
                    return;
                };
                ui.heading(RichText::new(label).color(ACCENT));
                ui.add_space(6.0);

                let mut changed = false;
                changed |= spin_row(ui, "From", &mut self.panel.from);
                changed |= spin_row(ui, "To", &mut self.panel.to);
                changed |= spin_row(ui, "Step", &mut self.panel.step);
                ui.horizontal(|ui| {
                    ui.label("Decimals:");
                    changed |= ui
                        .add(egui::DragValue::new(&mut self.panel.decimals).range(0..=15))
                        .changed();
                    changed |= ui.checkbox(&mut self.panel.editable, "Editable").changed();
                });

                if changed {
                    let config = self.panel.to_config();
                    log::debug!("Reconfiguring selected spin box: {:?}", config);
                    if let Some(entry) = self.entries.get_mut(self.selected) {
                        entry.adapter.set_config(config);
                    }
                }

                ui.add_space(10.0);
                ui.separator();
                if let Some(entry) = self.entries.get(self.selected) {
                    let bounds = entry.adapter.bounds();
                    let validator = entry.adapter.validator();
                    info_row(ui, "Scale factor", &bounds.factor.to_string());
                    info_row(
                        ui,
                        "Integer range",
                        &format!("{} .. {}", bounds.int_from, bounds.int_to),
                    );
                    info_row(ui, "Integer step", &bounds.int_step.to_string());
                    info_row(
                        ui,
                        "Validator",
                        &format!("[{}, {}]", validator.bottom(), validator.top()),
                    );
                    info_row(ui, "Internal value", &entry.adapter.internal_value().to_string());
                    info_row(ui, "Text", &entry.adapter.display_text());
                }
            });
    }

    fn render_event_log(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("event_log")
            .resizable(true)
            .default_height(160.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("value modified").strong());
                    if ui.small_button("Clear").clicked() {
                        self.events.borrow_mut().clear();
                    }
                });
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for record in self.events.borrow().iter() {
                            ui.label(
                                RichText::new(format!(
                                    "{}  {:<20} {}",
                                    record.at.format("%H:%M:%S%.3f"),
                                    record.label,
                                    record.value
                                ))
                                .monospace()
                                .size(10.0)
                                .color(TEXT_SECONDARY),
                            );
                        }
                    });
            });
    }

    fn render_entries(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut clicked = None;
            egui::Frame::NONE
                .fill(PANEL_BG)
                .inner_margin(egui::Margin::symmetric(8, 6))
                .show(ui, |ui| {
                    for (index, entry) in self.entries.iter_mut().enumerate() {
                        ui.horizontal(|ui| {
                            if ui
                                .selectable_label(index == self.selected, "⚙")
                                .on_hover_text("Configure")
                                .clicked()
                            {
                                clicked = Some(index);
                            }
                            spin_row(ui, &entry.label, &mut entry.adapter);
                        });
                    }
                });
            if let Some(index) = clicked {
                self.select(index);
            }
        });
    }
}

impl eframe::App for SpinDemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_top_bar(ctx);
        self.render_config_panel(ctx);
        self.render_event_log(ctx);
        self.render_entries(ctx);
    }

    // Called by eframe on shutdown and periodically while running
    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        self.sync_presets();
        if let Err(e) = self.settings.save() {
            log::error!("Failed to save settings: {}", e);
        }
    }
}
