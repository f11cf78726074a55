use eframe::egui;
use serde::{
    Deserialize,
    Serialize,
};

use crate::backend::DEFAULT_BASE_URL;

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Serialize, Deserialize, Clone)]
pub struct SettingsData {
    pub backend_url: String,
    pub dark_mode: bool,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self { backend_url: DEFAULT_BASE_URL.to_string(), dark_mode: true }
    }
}

/// Edits the backend URL. Changes apply once saved, never while typing.
pub struct SettingsModal {
    open: bool,
    url_buffer: String,
}

pub enum SettingsAction {
    Saved(String),
    Cancelled,
}

impl SettingsModal {
    pub fn new() -> Self {
        Self { open: false, url_buffer: String::new() }
    }

    pub fn open(&mut self, settings: &SettingsData) {
        self.url_buffer = settings.backend_url.clone();
        self.open = true;
    }

    pub fn show(&mut self, ctx: &egui::Context) -> Option<SettingsAction> {
        if !self.open {
            return None;
        }

        let mut action = None;

        let modal = egui::Modal::new(egui::Id::new("settings_modal")).show(ctx, |ui| {
            ui.set_width(360.0);
            ui.heading("Settings");
            ui.add_space(10.0);

            ui.label("Backend URL:");
            ui.add(
                egui::TextEdit::singleline(&mut self.url_buffer)
                    .desired_width(f32::INFINITY)
                    .hint_text(DEFAULT_BASE_URL),
            );

            ui.add_space(15.0);

            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    let url = self.url_buffer.trim().trim_end_matches('/').to_string();
                    let url = if url.is_empty() { DEFAULT_BASE_URL.to_string() } else { url };
                    action = Some(SettingsAction::Saved(url));
                    ui.close();
                }
                if ui.button("Cancel").clicked() {
                    action = Some(SettingsAction::Cancelled);
                    ui.close();
                }
            });
        });

        if modal.should_close() {
            self.open = false;
        }

        action
    }
}

impl Default for SettingsModal {
    fn default() -> Self {
        Self::new()
    }
}
