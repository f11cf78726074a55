use eframe::egui;

use crate::{
    core::{
        models,
        study::StudyMode,
        WordRecord,
    },
    gui::theme::Theme,
};

/// The study set the user picked: a direction plus an optional tag scope.
pub struct SetSelection {
    pub mode: StudyMode,
    pub tag: Option<String>,
}

/// Entry screen listing the available study sets. Every tag in the loaded
/// words gets a row, plus one row for the full list.
pub fn show(
    ui: &mut egui::Ui,
    words: Option<&[WordRecord]>,
    theme: &Theme,
) -> Option<SetSelection> {
    let mut selection = None;
    let ctx = ui.ctx().clone();

    ui.heading(theme.heading(&ctx, "Choose a study set"));
    ui.add_space(10.0);

    let Some(words) = words else {
        ui.label("Words have not loaded yet.");
        return None;
    };

    if words.is_empty() {
        ui.label("No words yet. Add some from the Add Word tab.");
        return None;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        set_row(ui, "All words", words.len(), None, &mut selection);

        for tag in models::collect_tags(words) {
            let count = words.iter().filter(|w| w.has_tag(&tag)).count();
            set_row(ui, &tag, count, Some(tag.clone()), &mut selection);
        }
    });

    selection
}

fn set_row(
    ui: &mut egui::Ui,
    label: &str,
    count: usize,
    tag: Option<String>,
    selection: &mut Option<SetSelection>,
) {
    ui.horizontal(|ui| {
        ui.label(format!("{label} ({count})"));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Meaning → Word").clicked() {
                *selection =
                    Some(SetSelection { mode: StudyMode::MeaningToWord, tag: tag.clone() });
            }
            if ui.button("Word → Meaning").clicked() {
                *selection = Some(SetSelection { mode: StudyMode::WordToMeaning, tag });
            }
        });
    });
    ui.separator();
}
