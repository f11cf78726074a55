use eframe::egui::{
    self,
    RichText,
};

use crate::{
    core::{
        study::{
            Answer,
            CardFace,
            StudyMode,
            StudyPhase,
            StudySession,
        },
        WordRecord,
    },
    gui::theme::Theme,
};

pub enum StudyAction {
    Flip,
    Answer(Answer),
    Quit,
}

/// One card at a time. Clicking the card flips it; answering advances and
/// shows the next card front side up.
pub fn show(
    ui: &mut egui::Ui,
    session: &StudySession,
    current: Option<&WordRecord>,
    theme: &Theme,
) -> Option<StudyAction> {
    match session.phase() {
        StudyPhase::SelectingSet => None,
        StudyPhase::Loading => {
            ui.centered_and_justified(|ui| {
                ui.add(egui::Spinner::new());
            });
            None
        }
        StudyPhase::Presenting { index, face } => {
            show_card(ui, session, current, *index, *face, theme)
        }
        StudyPhase::Complete => show_complete(ui, session, theme),
    }
}

fn show_card(
    ui: &mut egui::Ui,
    session: &StudySession,
    current: Option<&WordRecord>,
    index: usize,
    face: CardFace,
    theme: &Theme,
) -> Option<StudyAction> {
    let mut action = None;
    let ctx = ui.ctx().clone();

    ui.horizontal(|ui| {
        ui.label(format!("{} / {}", index + 1, session.len()));
        if let Some(tag) = session.tag() {
            ui.label(RichText::new(tag).color(theme.comment(&ctx)));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Quit").clicked() {
                action = Some(StudyAction::Quit);
            }
        });
    });

    ui.add_space(20.0);

    let Some(record) = current else {
        // The id points at a word that is gone from the loaded list.
        ui.label("This word is no longer available.");
        ui.add_space(10.0);
        if ui.button("Next").clicked() {
            action = Some(StudyAction::Answer(Answer::Correct));
        }
        return action;
    };

    let card_size = egui::Vec2::new(ui.available_width().min(520.0), 240.0);
    let (main, detail) = card_text(record, session.mode(), face);

    ui.vertical_centered(|ui| {
        let (rect, response) = ui.allocate_exact_size(card_size, egui::Sense::click());

        let painter = ui.painter();
        painter.rect_filled(rect, 8.0, theme.card_fill(&ctx));
        painter.rect_stroke(
            rect,
            8.0,
            egui::Stroke::new(1.5, theme.card_stroke(&ctx)),
            egui::StrokeKind::Inside,
        );

        let center = rect.center();
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            main,
            egui::FontId::proportional(28.0),
            ui.visuals().text_color(),
        );

        if let Some(detail) = detail {
            painter.text(
                egui::Pos2::new(center.x, rect.bottom() - 32.0),
                egui::Align2::CENTER_CENTER,
                detail,
                egui::FontId::proportional(14.0),
                theme.comment(&ctx),
            );
        }

        if response.clicked() {
            action = Some(StudyAction::Flip);
        }

        ui.add_space(8.0);
        ui.label(RichText::new("click the card to flip").color(theme.comment(&ctx)).small());

        ui.add_space(20.0);

        ui.horizontal(|ui| {
            let button_width = (card_size.x - ui.spacing().item_spacing.x) / 2.0;
            ui.add_space((ui.available_width() - card_size.x).max(0.0) / 2.0);

            let correct = egui::Button::new(RichText::new("Correct").color(theme.green(&ctx)))
                .min_size(egui::Vec2::new(button_width, 36.0));
            if ui.add(correct).clicked() {
                action = Some(StudyAction::Answer(Answer::Correct));
            }

            let wrong = egui::Button::new(RichText::new("Incorrect").color(theme.red(&ctx)))
                .min_size(egui::Vec2::new(button_width, 36.0));
            if ui.add(wrong).clicked() {
                action = Some(StudyAction::Answer(Answer::Incorrect));
            }
        });
    });

    action
}

/// The big card label plus the smaller detail line. The example always
/// travels with the word side, the memo with the meaning side.
fn card_text(
    record: &WordRecord,
    mode: StudyMode,
    face: CardFace,
) -> (String, Option<String>) {
    let word_side = (record.word.clone(), record.example.clone());
    let meaning_side = (record.meaning.clone(), record.memo.clone());

    match (mode, face) {
        (StudyMode::WordToMeaning, CardFace::Front) => word_side,
        (StudyMode::WordToMeaning, CardFace::Back) => meaning_side,
        (StudyMode::MeaningToWord, CardFace::Front) => meaning_side,
        (StudyMode::MeaningToWord, CardFace::Back) => word_side,
    }
}

fn show_complete(
    ui: &mut egui::Ui,
    session: &StudySession,
    theme: &Theme,
) -> Option<StudyAction> {
    let mut action = None;
    let ctx = ui.ctx().clone();

    ui.vertical_centered(|ui| {
        ui.add_space(60.0);

        if session.is_empty() {
            ui.heading(theme.heading(&ctx, "No words in this set"));
            ui.add_space(10.0);
            ui.label("Add some words or pick a different tag.");
        } else {
            ui.heading(theme.heading(&ctx, "Session complete!"));
            ui.add_space(10.0);
            ui.label(format!("You went through {} words.", session.len()));
        }

        ui.add_space(20.0);
        if ui.button("Back to menu").clicked() {
            action = Some(StudyAction::Quit);
        }
    });

    action
}
