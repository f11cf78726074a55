pub mod errors;
pub mod models;
pub mod query;
pub mod study;
pub mod tasks;

pub use errors::TangochoError;
pub use models::{ WordDraft, WordRecord };
