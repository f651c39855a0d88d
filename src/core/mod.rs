//! Core functionality: documents, file workers, session state and configuration

pub mod config;
pub mod document;
pub mod file_worker;
pub mod font;
pub mod session;
