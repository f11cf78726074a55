use eframe::egui;

use crate::core::models::WordDraft;

/// Shared form body used by both the add view and the edit dialog.
/// Returns true when the submit button was clicked; validation stays with
/// the caller so it can decide how to surface the error.
pub fn word_form(ui: &mut egui::Ui, draft: &mut WordDraft, submit_label: &str) -> bool {
    let mut submitted = false;

    egui::Grid::new("word_form_grid")
        .num_columns(2)
        .spacing([10.0, 8.0])
        .show(ui, |ui| {
            ui.label("Word:");
            ui.add(
                egui::TextEdit::singleline(&mut draft.word).desired_width(f32::INFINITY),
            );
            ui.end_row();

            ui.label("Meaning:");
            ui.add(
                egui::TextEdit::singleline(&mut draft.meaning).desired_width(f32::INFINITY),
            );
            ui.end_row();

            ui.label("Example:");
            ui.add(
                egui::TextEdit::multiline(&mut draft.example)
                    .desired_width(f32::INFINITY)
                    .desired_rows(2),
            );
            ui.end_row();

            ui.label("Tags:");
            ui.add(
                egui::TextEdit::singleline(&mut draft.tags)
                    .desired_width(f32::INFINITY)
                    .hint_text("comma separated, e.g. verbs, chapter 3"),
            );
            ui.end_row();

            ui.label("Memo:");
            ui.add(
                egui::TextEdit::multiline(&mut draft.memo)
                    .desired_width(f32::INFINITY)
                    .desired_rows(2),
            );
            ui.end_row();
        });

    ui.add_space(10.0);

    if ui.button(submit_label).clicked() {
        submitted = true;
    }

    submitted
}
