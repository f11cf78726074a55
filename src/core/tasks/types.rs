use crate::{
    backend::{
        Identity,
        WordPatch,
    },
    core::WordRecord,
};

#[derive(Debug)]
pub enum TaskResult {
    BackendConnection(bool),
    IdentityChecked(Result<Option<Identity>, String>),
    LoginStarted(Result<String, String>),
    LoggedOut(Result<(), String>),

    WordsLoaded(Result<Vec<WordRecord>, String>),
    WordCreated(Result<WordRecord, String>),
    WordUpdated { id: String, result: Result<WordPatch, String> },
    WordDeleted { id: String, result: Result<(), String> },
    AnswerRecorded { id: String, result: Result<(), String> },

    LoadingMessage(String),
}
