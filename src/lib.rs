pub mod backend;
pub mod core;
pub mod gui;
pub mod persistence;
