//! UI components for the text editor

pub mod dialogs;
pub mod editor;
pub mod status_bar;
