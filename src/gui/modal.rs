use eframe::egui;

/// Small reusable modal window with a dark backdrop; the generic payload is
/// whatever state the dialog edits.
pub struct Modal<T> {
    pub open: bool,
    pub title: String,
    pub data: T,
    pub min_size: egui::Vec2,
}

#[derive(Debug, Clone)]
pub enum ModalResult<T> {
    Confirmed(T),
    Cancelled,
}

impl<T: Default> Modal<T> {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            open: false,
            title: title.into(),
            data: T::default(),
            min_size: egui::Vec2::new(320.0, 0.0),
        }
    }
}

impl<T> Modal<T> {
    pub fn open_with(&mut self, data: T) {
        self.data = data;
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn show<F>(&mut self, ctx: &egui::Context, content: F) -> Option<ModalResult<T>>
    where
        F: FnOnce(&mut egui::Ui, &mut T) -> Option<ModalResult<T>>,
        T: Clone,
    {
        if !self.open {
            return None;
        }

        let mut result = None;
        let outside_click = self.show_overlay(ctx);

        egui::Window::new(&self.title)
            .collapsible(false)
            .resizable(false)
            .min_size(self.min_size)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                if let Some(modal_result) = content(ui, &mut self.data) {
                    result = Some(modal_result);
                    self.open = false;
                }
            });

        if outside_click && result.is_none() {
            self.open = false;
            result = Some(ModalResult::Cancelled);
        }

        result
    }

    fn show_overlay(&self, ctx: &egui::Context) -> bool {
        let area_response = egui::Area::new(egui::Id::new("modal_overlay"))
            .order(egui::Order::Background)
            .fixed_pos(egui::Pos2::ZERO)
            .show(ctx, |ui| {
                let screen_rect = ctx.screen_rect();
                let (_rect, response) =
                    ui.allocate_exact_size(screen_rect.size(), egui::Sense::click());
                ui.painter().rect_filled(screen_rect, 0.0, egui::Color32::from_black_alpha(100));
                response.clicked()
            });

        area_response.inner
    }
}

pub fn action_buttons<T>(
    ui: &mut egui::Ui,
    data: &T,
    confirm_text: &str,
    cancel_text: &str,
) -> Option<ModalResult<T>>
where
    T: Clone,
{
    ui.horizontal(|ui| {
        if ui.button(confirm_text).clicked() {
            Some(ModalResult::Confirmed(data.clone()))
        } else if ui.button(cancel_text).clicked() {
            Some(ModalResult::Cancelled)
        } else {
            None
        }
    })
    .inner
}

pub fn confirmation_dialog<T: Clone>(
    modal: &mut Modal<T>,
    ctx: &egui::Context,
    message: &str,
) -> Option<ModalResult<T>> {
    modal.show(ctx, |ui, data| {
        ui.label(message);
        ui.add_space(10.0);
        action_buttons(ui, data, "Yes", "No")
    })
}
