pub mod app;
pub mod error_modal;
pub mod library_view;
pub mod menu_view;
pub mod message_overlay;
pub mod modal;
pub mod settings;
pub mod study_view;
pub mod theme;
pub mod top_bar;
pub mod word_form;

pub use app::TangochoApp;
