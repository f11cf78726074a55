use std::time::{
    Duration,
    Instant,
};

use chrono::Utc;
use eframe::egui;

use crate::{
    backend::{
        api,
        AuthSession,
        WordPatch,
    },
    core::{
        study::{
            apply_answer,
            Answer,
            StudyPhase,
            StudySession,
        },
        tasks::{
            TaskManager,
            TaskResult,
        },
        WordDraft,
        WordRecord,
    },
    gui::{
        error_modal::ErrorModal,
        library_view::{
            self,
            LibraryAction,
            LibraryState,
        },
        menu_view,
        message_overlay::MessageOverlay,
        modal::{
            confirmation_dialog,
            Modal,
            ModalResult,
        },
        settings::{
            SettingsAction,
            SettingsData,
            SettingsModal,
            SETTINGS_FILE,
        },
        study_view::{
            self,
            StudyAction,
        },
        theme::{
            self,
            Theme,
        },
        top_bar::{
            self,
            TopBarAction,
        },
        word_form,
    },
    persistence,
};

const STATUS_POLL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Menu,
    Study,
    Library,
    AddWord,
}

#[derive(Debug, Clone, Default)]
pub struct EditData {
    pub id: String,
    pub draft: WordDraft,
}

#[derive(Debug, Clone, Default)]
pub struct DeleteTarget {
    pub id: String,
    pub word: String,
}

pub struct TangochoApp {
    settings_data: SettingsData,
    view: View,

    words: Option<Vec<WordRecord>>,
    library: LibraryState,
    session: StudySession,
    add_draft: WordDraft,

    auth_session: Option<AuthSession>,
    backend_connected: bool,
    last_status_check: Option<Instant>,

    theme: Theme,
    message_overlay: MessageOverlay,
    error_modal: ErrorModal,
    settings_modal: SettingsModal,
    edit_modal: Modal<EditData>,
    delete_modal: Modal<DeleteTarget>,

    task_manager: TaskManager,
}

impl TangochoApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings_data: SettingsData = persistence::load_json_or_default(SETTINGS_FILE);

        let app_theme = Theme::default();
        theme::set_theme(&cc.egui_ctx, &app_theme);
        cc.egui_ctx.set_theme(match settings_data.dark_mode {
            true => egui::ThemePreference::Dark,
            false => egui::ThemePreference::Light,
        });

        let task_manager = TaskManager::new();
        task_manager.check_backend(settings_data.backend_url.clone());
        task_manager.check_identity(settings_data.backend_url.clone());
        task_manager.fetch_words(settings_data.backend_url.clone());

        Self {
            settings_data,
            view: View::Menu,
            words: None,
            library: LibraryState::new(),
            session: StudySession::new(),
            add_draft: WordDraft::default(),
            auth_session: None,
            backend_connected: false,
            last_status_check: None,
            theme: app_theme,
            message_overlay: MessageOverlay::new(),
            error_modal: ErrorModal::new(),
            settings_modal: SettingsModal::new(),
            edit_modal: Modal::new("Edit word"),
            delete_modal: Modal::new("Delete word"),
            task_manager,
        }
    }

    fn base_url(&self) -> String {
        self.settings_data.backend_url.clone()
    }

    fn save_settings(&self) {
        if let Err(e) = persistence::save_json(&self.settings_data, SETTINGS_FILE) {
            eprintln!("Failed to save settings: {e}");
        }
    }

    /// Writes need a signed-in session; without one the backend rejects them
    /// anyway, so fail fast with a clearer message.
    fn require_session(&mut self) -> Option<AuthSession> {
        if self.auth_session.is_none() {
            self.error_modal.show_error(
                "Sign-in Required",
                "You need to sign in before changing the word list.",
                None::<String>,
            );
        }

        self.auth_session.clone()
    }

    fn handle_task_results(&mut self) {
        for result in self.task_manager.poll_results() {
            match result {
                TaskResult::BackendConnection(connected) => {
                    self.backend_connected = connected;
                }
                TaskResult::IdentityChecked(Ok(identity)) => {
                    self.auth_session = identity.map(AuthSession::new);
                }
                TaskResult::IdentityChecked(Err(_)) => {
                    // The status dot already reflects an unreachable backend.
                }
                TaskResult::LoginStarted(Ok(url)) => {
                    if let Err(e) = open::that(&url) {
                        self.error_modal.show_error(
                            "Sign-in Failed",
                            "Could not open the login page in your browser.",
                            Some(e.to_string()),
                        );
                    }
                }
                TaskResult::LoginStarted(Err(e)) => {
                    self.error_modal.show_error(
                        "Sign-in Failed",
                        "The backend could not start a login.",
                        Some(e),
                    );
                }
                TaskResult::LoggedOut(Ok(())) => {
                    self.auth_session = None;
                }
                TaskResult::LoggedOut(Err(e)) => {
                    self.error_modal.show_error(
                        "Sign-out Failed",
                        "The backend could not end the session.",
                        Some(e),
                    );
                }
                TaskResult::WordsLoaded(Ok(words)) => {
                    self.message_overlay.clear_message();

                    if *self.session.phase() == StudyPhase::Loading {
                        let ids = words
                            .iter()
                            .filter(|w| match self.session.tag() {
                                Some(tag) => w.has_tag(tag),
                                None => true,
                            })
                            .map(|w| w.id.clone())
                            .collect();
                        self.session.begin(ids);
                    }

                    self.words = Some(words);
                    self.library.invalidate();
                }
                TaskResult::WordsLoaded(Err(e)) => {
                    self.message_overlay.clear_message();

                    if *self.session.phase() == StudyPhase::Loading {
                        self.session.abandon();
                        self.view = View::Menu;
                    }

                    self.error_modal.show_error(
                        "Load Failed",
                        "Could not load the word list from the backend.",
                        Some(e),
                    );
                }
                TaskResult::WordCreated(Ok(record)) => {
                    if let Some(words) = &mut self.words {
                        words.push(record);
                    }
                    self.library.invalidate();
                    self.add_draft = WordDraft::default();
                }
                TaskResult::WordCreated(Err(e)) => {
                    self.error_modal.show_error(
                        "Add Failed",
                        "The word could not be saved.",
                        Some(e),
                    );
                }
                TaskResult::WordUpdated { id, result: Ok(patch) } => {
                    if let Some(record) = self.find_word_mut(&id) {
                        patch.apply_to(record);
                    }
                    self.library.invalidate();
                }
                TaskResult::WordUpdated { result: Err(e), .. } => {
                    self.error_modal.show_error(
                        "Update Failed",
                        "The changes could not be saved.",
                        Some(e),
                    );
                }
                TaskResult::WordDeleted { id, result: Ok(()) } => {
                    if let Some(words) = &mut self.words {
                        words.retain(|w| w.id != id);
                    }
                    self.library.invalidate();
                }
                TaskResult::WordDeleted { result: Err(e), .. } => {
                    self.error_modal.show_error(
                        "Delete Failed",
                        "The word could not be deleted.",
                        Some(e),
                    );
                }
                TaskResult::AnswerRecorded { result: Err(e), .. } => {
                    self.error_modal.show_error(
                        "Answer Not Saved",
                        "The study result could not be written to the backend.",
                        Some(e),
                    );
                }
                TaskResult::AnswerRecorded { result: Ok(()), .. } => {}
                TaskResult::LoadingMessage(message) => {
                    self.message_overlay.set_message(message);
                }
            }
        }
    }

    fn find_word_mut(&mut self, id: &str) -> Option<&mut WordRecord> {
        self.words.as_mut()?.iter_mut().find(|w| w.id == id)
    }

    fn poll_status(&mut self) {
        let due = match self.last_status_check {
            Some(checked) => checked.elapsed() >= STATUS_POLL_INTERVAL,
            None => true,
        };

        if due {
            self.task_manager.check_backend(self.base_url());
            self.task_manager.check_identity(self.base_url());
            self.last_status_check = Some(Instant::now());
        }
    }

    fn navigate(&mut self, view: View) {
        if self.view == View::Study && view != View::Study {
            self.session.abandon();
        }
        self.view = view;
    }

    fn start_study(&mut self, selection: menu_view::SetSelection) {
        self.session.select_set(selection.mode, selection.tag);
        self.view = View::Study;
        // Fresh fetch per session so stats from other devices are current.
        self.task_manager.fetch_words(self.base_url());
    }

    /// Mutate the local record, persist the same change, then move on. The
    /// card advances without waiting for the write to land.
    fn record_answer(&mut self, answer: Answer) {
        let Some(id) = self.session.current_id().map(str::to_string) else {
            self.session.advance();
            return;
        };

        let now = Utc::now();
        let patch = match self.find_word_mut(&id) {
            Some(record) => {
                apply_answer(record, answer, now);
                Some(match answer {
                    Answer::Correct => WordPatch {
                        last_correct_date: Some(api::to_millis(now)),
                        ..Default::default()
                    },
                    Answer::Incorrect => WordPatch {
                        mistake_count: Some(record.mistake_count),
                        ..Default::default()
                    },
                })
            }
            None => None,
        };

        if let Some(patch) = patch {
            self.library.invalidate();
            if self.auth_session.is_some() {
                self.task_manager.record_answer(self.base_url(), id, patch);
            }
        }

        self.session.advance();
    }

    fn submit_new_word(&mut self) {
        if let Err(e) = self.add_draft.validate() {
            self.error_modal.show_error("Invalid Word", e.to_string(), None::<String>);
            return;
        }

        let Some(session) = self.require_session() else {
            return;
        };

        self.task_manager.create_word(self.base_url(), self.add_draft.clone(), Some(session));
    }

    fn submit_edit(&mut self, data: EditData) {
        if let Err(e) = data.draft.validate() {
            self.error_modal.show_error("Invalid Word", e.to_string(), None::<String>);
            self.edit_modal.open_with(data);
            return;
        }

        if self.require_session().is_none() {
            return;
        }

        let patch = WordPatch {
            word: Some(data.draft.word.trim().to_string()),
            meaning: Some(data.draft.meaning.trim().to_string()),
            example: Some(data.draft.example.clone()),
            memo: Some(data.draft.memo.clone()),
            tags: Some(data.draft.tag_list()),
            ..Default::default()
        };

        self.task_manager.update_word(self.base_url(), data.id, patch);
    }

    fn handle_top_bar(&mut self, action: TopBarAction) {
        match action {
            TopBarAction::Navigate(view) => self.navigate(view),
            TopBarAction::OpenSettings => self.settings_modal.open(&self.settings_data),
            TopBarAction::Refresh => self.task_manager.fetch_words(self.base_url()),
            TopBarAction::SignIn => self.task_manager.begin_login(self.base_url()),
            TopBarAction::SignOut => self.task_manager.logout(self.base_url()),
        }
    }

    fn handle_library(&mut self, action: LibraryAction) {
        match action {
            LibraryAction::Edit(id) => {
                if let Some(record) = self.words.as_deref().and_then(|w| {
                    w.iter().find(|r| r.id == id)
                }) {
                    let draft = WordDraft::from_record(record);
                    self.edit_modal.open_with(EditData { id, draft });
                }
            }
            LibraryAction::Delete(id) => {
                let word = self
                    .words
                    .as_deref()
                    .and_then(|w| w.iter().find(|r| r.id == id))
                    .map(|r| r.word.clone())
                    .unwrap_or_default();

                self.delete_modal.open_with(DeleteTarget { id, word });
            }
        }
    }

    fn show_modals(&mut self, ctx: &egui::Context) {
        if let Some(action) = self.settings_modal.show(ctx) {
            if let SettingsAction::Saved(url) = action {
                if url != self.settings_data.backend_url {
                    self.settings_data.backend_url = url;
                    self.save_settings();
                    self.backend_connected = false;
                    self.last_status_check = None;
                    self.task_manager.fetch_words(self.base_url());
                }
            }
        }

        let edit_result = self.edit_modal.show(ctx, |ui, data| {
            if word_form::word_form(ui, &mut data.draft, "Save") {
                return Some(ModalResult::Confirmed(data.clone()));
            }
            if ui.button("Cancel").clicked() {
                return Some(ModalResult::Cancelled);
            }
            None
        });
        if let Some(ModalResult::Confirmed(data)) = edit_result {
            self.submit_edit(data);
        }

        if self.delete_modal.is_open() {
            let message = format!(
                "Delete \"{}\"? This cannot be undone.",
                self.delete_modal.data.word
            );
            if let Some(ModalResult::Confirmed(target)) =
                confirmation_dialog(&mut self.delete_modal, ctx, &message)
            {
                if self.require_session().is_some() {
                    self.task_manager.delete_word(self.base_url(), target.id);
                }
            }
        }

        self.error_modal.show(ctx);
    }

    fn sync_theme_preference(&mut self, ctx: &egui::Context) {
        let dark = ctx.theme() == egui::Theme::Dark;
        if dark != self.settings_data.dark_mode {
            self.settings_data.dark_mode = dark;
            self.save_settings();
        }
    }
}

impl eframe::App for TangochoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_task_results();
        self.poll_status();
        self.sync_theme_preference(ctx);

        let identity_label = self.auth_session.as_ref().map(|s| s.display_label().to_string());
        if let Some(action) = top_bar::show(
            ctx,
            self.view,
            self.backend_connected,
            identity_label.as_deref(),
            &self.theme,
        ) {
            self.handle_top_bar(action);
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.view {
            View::Menu => {
                if let Some(selection) = menu_view::show(ui, self.words.as_deref(), &self.theme)
                {
                    self.start_study(selection);
                }
            }
            View::Study => {
                let current = self
                    .session
                    .current_id()
                    .and_then(|id| self.words.as_deref()?.iter().find(|w| w.id == id))
                    .cloned();

                match study_view::show(ui, &self.session, current.as_ref(), &self.theme) {
                    Some(StudyAction::Flip) => self.session.flip(),
                    Some(StudyAction::Answer(answer)) => self.record_answer(answer),
                    Some(StudyAction::Quit) => {
                        self.session.abandon();
                        self.view = View::Menu;
                    }
                    None => {}
                }
            }
            View::Library => {
                if let Some(action) =
                    library_view::show(ui, &mut self.library, self.words.as_deref(), &self.theme)
                {
                    self.handle_library(action);
                }
            }
            View::AddWord => {
                let ctx = ui.ctx().clone();
                ui.heading(self.theme.heading(&ctx, "Add a word"));
                ui.add_space(10.0);

                if word_form::word_form(ui, &mut self.add_draft, "Add word") {
                    self.submit_new_word();
                }
            }
        });

        self.show_modals(ctx);

        self.message_overlay.show(ctx, &self.theme);
        if self.message_overlay.active {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        // Keeps the 5 second status poll ticking even when idle.
        ctx.request_repaint_after(STATUS_POLL_INTERVAL);
    }
}
