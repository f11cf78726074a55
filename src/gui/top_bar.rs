use eframe::egui::{
    self,
    containers::menu,
    RichText,
};

use crate::gui::{
    app::View,
    theme::Theme,
};

pub enum TopBarAction {
    Navigate(View),
    OpenSettings,
    Refresh,
    SignIn,
    SignOut,
}

pub fn show(
    ctx: &egui::Context,
    current_view: View,
    backend_connected: bool,
    identity_label: Option<&str>,
    theme: &Theme,
) -> Option<TopBarAction> {
    let mut action = None;

    egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
        menu::Bar::new().ui(ui, |ui| {
            for (view, label) in [
                (View::Menu, "Study"),
                (View::Library, "Library"),
                (View::AddWord, "Add Word"),
            ] {
                if ui.selectable_label(current_view == view, label).clicked() {
                    action = Some(TopBarAction::Navigate(view));
                }
            }

            ui.separator();

            if ui.button("Refresh").clicked() {
                action = Some(TopBarAction::Refresh);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                egui::widgets::global_theme_preference_switch(ui);

                if ui.button("Settings").clicked() {
                    action = Some(TopBarAction::OpenSettings);
                }

                ui.separator();

                match identity_label {
                    Some(label) => {
                        if ui.button("Sign out").clicked() {
                            action = Some(TopBarAction::SignOut);
                        }
                        ui.label(RichText::new(label).color(theme.comment(ctx)));
                    }
                    None => {
                        if ui.button("Sign in").clicked() {
                            action = Some(TopBarAction::SignIn);
                        }
                    }
                }

                ui.separator();
                show_status_indicator(ui, theme, backend_connected);
            });
        });
    });

    action
}

fn show_status_indicator(ui: &mut egui::Ui, theme: &Theme, connected: bool) {
    let ctx = ui.ctx().clone();
    let (color, tooltip) = if connected {
        (theme.green(&ctx), "Backend connected")
    } else {
        (theme.red(&ctx), "Backend unreachable. Check the URL in Settings.")
    };

    ui.small(RichText::new("●").color(color)).on_hover_text(tooltip);
    ui.small("Backend");
}
