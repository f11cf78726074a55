use std::{
    sync::{
        mpsc,
        Arc,
    },
    thread,
};

use chrono::{
    TimeZone,
    Utc,
};
use tokio::runtime::Runtime;

use super::TaskResult;
use crate::{
    backend::{
        api,
        auth,
        AuthSession,
        NewWord,
        WordPatch,
    },
    core::{
        TangochoError,
        WordDraft,
        WordRecord,
    },
};

/// Runs backend calls off the UI thread. Each call is fired independently
/// and reports back over the results channel; nothing is cancelled or
/// coalesced, a second call may start before the first resolves.
pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
}

impl TaskManager {
    pub fn new() -> Self {
        let runtime = Arc::new(Runtime::new().expect("Failed to create TaskManager runtime"));

        let (sender, receiver) = mpsc::channel();

        Self { runtime, receiver, sender }
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Arc<Runtime>) {
        (self.sender.clone(), self.runtime.clone())
    }

    pub fn check_backend(&self, base_url: String) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let connected =
                runtime.block_on(async { api::get_version(&base_url).await.is_ok() });

            let _ = sender.send(TaskResult::BackendConnection(connected));
        });
    }

    pub fn check_identity(&self, base_url: String) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime
                .block_on(auth::current_identity(&base_url))
                .map_err(|e| e.to_string());

            let _ = sender.send(TaskResult::IdentityChecked(result));
        });
    }

    pub fn begin_login(&self, base_url: String) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result =
                runtime.block_on(auth::begin_login(&base_url)).map_err(|e| e.to_string());

            let _ = sender.send(TaskResult::LoginStarted(result));
        });
    }

    pub fn logout(&self, base_url: String) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(auth::logout(&base_url)).map_err(|e| e.to_string());

            let _ = sender.send(TaskResult::LoggedOut(result));
        });
    }

    pub fn fetch_words(&self, base_url: String) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let _ = sender.send(TaskResult::LoadingMessage("Loading words...".to_string()));

            let result =
                runtime.block_on(api::fetch_words(&base_url)).map_err(|e| e.to_string());

            let _ = sender.send(TaskResult::WordsLoaded(result));
        });
    }

    /// Insert a new word. The backend assigns id and creation time; the
    /// session, when present, stamps the owner.
    pub fn create_word(&self, base_url: String, draft: WordDraft, session: Option<AuthSession>) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime
                .block_on(async {
                    let new_word = NewWord {
                        word: draft.word.trim().to_string(),
                        meaning: draft.meaning.trim().to_string(),
                        example: draft.example_opt(),
                        memo: draft.memo_opt(),
                        tags: draft.tag_list(),
                        mistake_count: 0,
                        last_correct_date: None,
                        owner: session.as_ref().map(|s| s.owner_id().to_string()),
                    };

                    let inserted = api::insert_word(&base_url, &new_word).await?;

                    Ok::<WordRecord, TangochoError>(WordRecord {
                        id: inserted.id,
                        word: new_word.word,
                        meaning: new_word.meaning,
                        example: new_word.example,
                        memo: new_word.memo,
                        tags: new_word.tags,
                        mistake_count: 0,
                        last_correct_date: None,
                        created_at: Utc.timestamp_millis_opt(inserted.created_at).single(),
                        owner: new_word.owner,
                    })
                })
                .map_err(|e| e.to_string());

            let _ = sender.send(TaskResult::WordCreated(result));
        });
    }

    /// Merge the patch into the stored document. The patch is echoed back so
    /// the local list can apply the same merge without a refetch.
    pub fn update_word(&self, base_url: String, id: String, patch: WordPatch) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime
                .block_on(api::update_word(&base_url, &id, &patch))
                .map(|_| patch)
                .map_err(|e| e.to_string());

            let _ = sender.send(TaskResult::WordUpdated { id, result });
        });
    }

    pub fn delete_word(&self, base_url: String, id: String) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime
                .block_on(api::delete_word(&base_url, &id))
                .map_err(|e| e.to_string());

            let _ = sender.send(TaskResult::WordDeleted { id, result });
        });
    }

    /// Persist a single answer event; the local record was already mutated.
    pub fn record_answer(&self, base_url: String, id: String, patch: WordPatch) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime
                .block_on(api::update_word(&base_url, &id, &patch))
                .map_err(|e| e.to_string());

            let _ = sender.send(TaskResult::AnswerRecorded { id, result });
        });
    }
}

impl Default for TaskManager {
    fn default() -> Self {
        Self::new()
    }
}
