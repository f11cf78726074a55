use eframe::egui::{
    self,
    RichText,
};
use egui_extras::{
    Column,
    TableBuilder,
};

use crate::{
    core::{
        models,
        query::{
            self,
            QueryParams,
            SortField,
            SortOrder,
        },
        WordRecord,
    },
    gui::theme::Theme,
};

pub enum LibraryAction {
    Edit(String),
    Delete(String),
}

/// Cached projection of the word list. `visible` holds indices into the
/// loaded records and is only recomputed when flagged dirty.
pub struct LibraryState {
    pub params: QueryParams,
    visible: Vec<usize>,
    dirty: bool,
}

impl LibraryState {
    pub fn new() -> Self {
        Self { params: QueryParams::default(), visible: Vec::new(), dirty: true }
    }

    /// Call after the underlying records change in any way.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    fn ensure_indices(&mut self, records: &[WordRecord]) {
        if self.dirty {
            self.visible = query::project(records, &self.params);
            self.dirty = false;
        }
    }
}

impl Default for LibraryState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn show(
    ui: &mut egui::Ui,
    state: &mut LibraryState,
    words: Option<&[WordRecord]>,
    theme: &Theme,
) -> Option<LibraryAction> {
    let ctx = ui.ctx().clone();

    ui.heading(theme.heading(&ctx, "Library"));
    ui.add_space(6.0);

    let Some(words) = words else {
        ui.label("Words have not loaded yet.");
        return None;
    };

    show_controls(ui, state, words, theme);
    ui.add_space(6.0);

    state.ensure_indices(words);

    let mut action = None;

    ui.label(
        RichText::new(format!("{} of {} words", state.visible.len(), words.len()))
            .color(theme.comment(&ctx)),
    );
    ui.add_space(4.0);

    TableBuilder::new(ui)
        .striped(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::initial(140.0).at_least(80.0))
        .column(Column::remainder().at_least(120.0))
        .column(Column::initial(160.0))
        .column(Column::initial(70.0))
        .column(Column::initial(100.0))
        .column(Column::initial(110.0))
        .header(22.0, |mut header| {
            header.col(|ui| {
                ui.strong("Word");
            });
            header.col(|ui| {
                ui.strong("Meaning");
            });
            header.col(|ui| {
                ui.strong("Tags");
            });
            header.col(|ui| {
                ui.strong("Misses");
            });
            header.col(|ui| {
                ui.strong("Last correct");
            });
            header.col(|_ui| {});
        })
        .body(|body| {
            body.rows(24.0, state.visible.len(), |mut row| {
                let record = &words[state.visible[row.index()]];

                row.col(|ui| {
                    ui.label(&record.word);
                });
                row.col(|ui| {
                    ui.label(&record.meaning);
                });
                row.col(|ui| {
                    ui.label(record.tags.join(", "));
                });
                row.col(|ui| {
                    ui.label(record.mistake_count.to_string());
                });
                row.col(|ui| {
                    let text = match record.last_correct_date {
                        Some(date) => date.format("%Y-%m-%d").to_string(),
                        None => "-".to_string(),
                    };
                    ui.label(text);
                });
                row.col(|ui| {
                    if ui.small_button("Edit").clicked() {
                        action = Some(LibraryAction::Edit(record.id.clone()));
                    }
                    if ui.small_button("Delete").clicked() {
                        action = Some(LibraryAction::Delete(record.id.clone()));
                    }
                });
            });
        });

    action
}

fn show_controls(
    ui: &mut egui::Ui,
    state: &mut LibraryState,
    words: &[WordRecord],
    theme: &Theme,
) {
    let ctx = ui.ctx().clone();

    ui.horizontal(|ui| {
        ui.label("Search:");
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.params.search_text)
                .desired_width(220.0)
                .hint_text("word or meaning"),
        );
        if response.changed() {
            state.invalidate();
        }

        ui.separator();

        ui.label("Sort:");
        let field_label = match state.params.sort_field {
            SortField::CreatedAt => "Date added",
            SortField::MistakeCount => "Mistakes",
        };
        egui::ComboBox::from_id_salt("library_sort_field")
            .selected_text(field_label)
            .show_ui(ui, |ui| {
                for (field, label) in [
                    (SortField::CreatedAt, "Date added"),
                    (SortField::MistakeCount, "Mistakes"),
                ] {
                    if ui
                        .selectable_value(&mut state.params.sort_field, field, label)
                        .changed()
                    {
                        state.invalidate();
                    }
                }
            });

        let order_label = match state.params.sort_order {
            SortOrder::Ascending => "Ascending",
            SortOrder::Descending => "Descending",
        };
        if ui.button(order_label).clicked() {
            state.params.sort_order = state.params.sort_order.reversed();
            state.invalidate();
        }
    });

    let tags = models::collect_tags(words);
    if tags.is_empty() {
        return;
    }

    ui.horizontal_wrapped(|ui| {
        ui.label(RichText::new("Tags:").color(theme.comment(&ctx)));

        for tag in tags {
            let selected = state.params.tag_filter.as_deref() == Some(tag.as_str());
            if ui.selectable_label(selected, &tag).clicked() {
                state.params.tag_filter = if selected { None } else { Some(tag) };
                state.invalidate();
            }
        }

        if state.params.tag_filter.is_some() && ui.small_button("Clear").clicked() {
            state.params.tag_filter = None;
            state.invalidate();
        }
    });
}
