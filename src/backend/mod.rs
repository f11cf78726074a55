pub mod api;
pub mod auth;

pub use api::{
    InsertedWord,
    NewWord,
    WordPatch,
    DEFAULT_BASE_URL,
};
pub use auth::{
    AuthSession,
    Identity,
};
