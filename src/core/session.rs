//! Editor session state machine
//!
//! Everything the main window does that does not need a widget lives here:
//! the editing-in-progress guard in front of New, Open and Close, the modal
//! dialog queue, status and title text, and the two background file workers.
//! The window feeds in [`Command`]s and dialog [`Answer`]s and carries out the
//! returned [`Effect`].

use std::path::PathBuf;
use std::sync::Arc;

use crate::core::config::EditorConfig;
use crate::core::document::Document;
use crate::core::file_worker::{FileError, FileJob, FileOutcome, FileWorker};
use crate::core::font::{FontChange, FontSize};

pub const APP_NAME: &str = "Text Editor";
pub const WELCOME_STATUS: &str = "Welcome to the Text Editor!";
const DISCARD_PROMPT: &str = "You are currently editing this file.\nDiscard changes?";

/// Callback used by workers to wake the UI thread
pub type Notifier = Arc<dyn Fn() + Send + Sync>;

/// User-level commands from menus and shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    New,
    Open,
    Save,
    SaveAs,
    Exit,
    ToggleWordWrap,
    IncreaseFontSize,
    DecreaseFontSize,
    ResetFontSize,
    About,
}

/// Actions that throw away the current buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardedAction {
    New,
    Open,
    Exit,
}

impl GuardedAction {
    fn prompt_title(self) -> &'static str {
        match self {
            GuardedAction::New => "New Text File",
            GuardedAction::Open => "Open text document",
            GuardedAction::Exit => "Exit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
}

/// Modal dialog the window should show
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    ConfirmDiscard {
        action: GuardedAction,
        title: &'static str,
        message: &'static str,
    },
    Message {
        kind: MessageKind,
        title: String,
        message: String,
    },
    About,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Cancel,
    Ok,
}

/// Follow-up work only the window can do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Show the OS open dialog and call [`EditorSession::open_path`]
    PickOpenPath,
    /// Show the OS save dialog and call [`EditorSession::save_to`]
    PickSavePath,
    /// Close the window
    Close,
}

/// State behind the main window
pub struct EditorSession {
    pub document: Document,
    pub font: FontSize,
    pub word_wrap: bool,
    status: String,
    title: String,
    dialog: Option<Dialog>,
    loader: FileWorker,
    saver: FileWorker,
    notify: Notifier,
    /// Close confirmed by the user; the next close request goes through
    close_confirmed: bool,
    /// Close once the running save succeeds
    close_after_save: bool,
    /// Bumped whenever `document` is replaced by another one
    generation: u64,
    settings_changed: bool,
}

impl EditorSession {
    pub fn new(config: &EditorConfig, notify: Notifier) -> Self {
        Self {
            document: Document::new(),
            font: FontSize::from_config(config),
            word_wrap: config.word_wrap,
            status: WELCOME_STATUS.to_string(),
            title: APP_NAME.to_string(),
            dialog: None,
            loader: FileWorker::new("Open"),
            saver: FileWorker::new("Save"),
            notify,
            close_confirmed: false,
            close_after_save: false,
            generation: 0,
            settings_changed: false,
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_busy()
    }

    pub fn is_saving(&self) -> bool {
        self.saver.is_busy()
    }

    /// Label for the word wrap menu item
    pub fn word_wrap_label(&self) -> &'static str {
        if self.word_wrap {
            "Word Wrap is On"
        } else {
            "Word Wrap is Off"
        }
    }

    /// Returns true once after wrap or font settings changed
    pub fn take_settings_changed(&mut self) -> bool {
        std::mem::take(&mut self.settings_changed)
    }

    /// Write the current display settings into `config`
    pub fn store_settings(&self, config: &mut EditorConfig) {
        config.font_size = self.font.current();
        config.word_wrap = self.word_wrap;
    }

    pub fn execute(&mut self, command: Command) -> Effect {
        tracing::debug!("Command: {:?}", command);
        match command {
            Command::New => {
                if self.is_loading() {
                    self.status = "Please wait, a file is being opened".to_string();
                } else if self.guard(GuardedAction::New) {
                    self.new_document();
                }
                Effect::None
            }
            Command::Open => {
                if self.is_loading() {
                    self.status = "A file is already being opened".to_string();
                    Effect::None
                } else if self.guard(GuardedAction::Open) {
                    Effect::PickOpenPath
                } else {
                    Effect::None
                }
            }
            Command::Save | Command::SaveAs if self.is_loading() => {
                self.status = "Please wait, a file is being opened".to_string();
                Effect::None
            }
            Command::Save => match self.document.path().map(|p| p.to_path_buf()) {
                Some(path) => {
                    self.save_to(path);
                    Effect::None
                }
                None => self.save_as(),
            },
            Command::SaveAs => self.save_as(),
            Command::Exit => Effect::Close,
            Command::ToggleWordWrap => {
                self.word_wrap = !self.word_wrap;
                self.settings_changed = true;
                Effect::None
            }
            Command::IncreaseFontSize => {
                let change = self.font.increase();
                self.font_changed(change, "Increase Font Size", "Max Font Size Reached");
                Effect::None
            }
            Command::DecreaseFontSize => {
                let change = self.font.decrease();
                self.font_changed(change, "Decrease Font Size", "Minimum Font Size Reached");
                Effect::None
            }
            Command::ResetFontSize => {
                self.font.reset();
                self.settings_changed = true;
                Effect::None
            }
            Command::About => {
                self.dialog = Some(Dialog::About);
                Effect::None
            }
        }
    }

    /// Resolve the open dialog with the user's answer
    pub fn answer(&mut self, answer: Answer) -> Effect {
        let Some(dialog) = self.dialog.take() else {
            return Effect::None;
        };

        match (dialog, answer) {
            (Dialog::ConfirmDiscard { action, .. }, Answer::Yes) => {
                tracing::info!("Discarding changes for {:?}", action);
                match action {
                    GuardedAction::New => {
                        self.new_document();
                        Effect::None
                    }
                    GuardedAction::Open => Effect::PickOpenPath,
                    GuardedAction::Exit => {
                        self.close_confirmed = true;
                        Effect::Close
                    }
                }
            }
            _ => Effect::None,
        }
    }

    /// Decide whether a window close request may proceed
    pub fn on_close_requested(&mut self) -> bool {
        if self.is_saving() {
            self.close_after_save = true;
            self.status = "Waiting for the save to finish before closing".to_string();
            return false;
        }
        if self.close_confirmed {
            return true;
        }
        if matches!(self.dialog, Some(Dialog::Message { .. })) {
            // Let the user read the message first
            return false;
        }
        self.guard(GuardedAction::Exit)
    }

    /// Start loading `path` in the background
    pub fn open_path(&mut self, path: PathBuf) {
        let notify = Arc::clone(&self.notify);
        match self.loader.start(FileJob::Load(path.clone()), move || notify()) {
            Ok(()) => {
                tracing::info!("Opening {}", path.display());
                self.status = format!("Opening File: {}", path.display());
            }
            Err(e) => self.report_busy(e),
        }
    }

    /// Start saving the buffer to `path` in the background
    pub fn save_to(&mut self, path: PathBuf) {
        let job = FileJob::Save {
            path: path.clone(),
            contents: self.document.content.clone(),
            revision: self.document.revision(),
            generation: self.generation,
        };
        let notify = Arc::clone(&self.notify);
        match self.saver.start(job, move || notify()) {
            Ok(()) => {
                tracing::info!("Saving {}", path.display());
                self.status = format!("Saving File: {}", path.display());
            }
            Err(e) => self.report_busy(e),
        }
    }

    /// Apply finished background jobs
    pub fn poll_workers(&mut self) -> Effect {
        if let Some(result) = self.loader.poll() {
            self.finish_job(result, "Error Opening File");
        }

        let mut effect = Effect::None;
        if let Some(result) = self.saver.poll() {
            let saved = result.is_ok();
            self.finish_job(result, "Error Saving File");
            if std::mem::take(&mut self.close_after_save) && saved {
                if self.document.is_modified() {
                    // Edited while saving; ask again
                    self.guard(GuardedAction::Exit);
                } else {
                    effect = Effect::Close;
                }
            }
        }
        effect
    }

    fn finish_job(&mut self, result: Result<FileOutcome, FileError>, error_title: &str) {
        match result {
            Ok(FileOutcome::Loaded { path, contents }) => {
                self.status = format!("Opened File: {}", path.display());
                self.replace_document(Document::from_file(path, contents));
            }
            Ok(FileOutcome::Saved {
                path,
                revision,
                generation,
            }) => {
                self.status = format!("File Saved As: {}", path.display());
                if generation != self.generation {
                    tracing::info!("Saved {} after its document was replaced", path.display());
                    return;
                }
                self.document.set_path(path);
                if !self.document.mark_saved(revision) {
                    tracing::debug!("Buffer changed while saving; still modified");
                }
                self.update_title();
            }
            Err(e) => {
                tracing::error!("{}: {}", error_title, e);
                self.status = error_title.to_string();
                self.show_message(MessageKind::Error, error_title, e.to_string());
            }
        }
    }

    fn save_as(&mut self) -> Effect {
        if self.is_saving() {
            self.status = "A save is already in progress".to_string();
            Effect::None
        } else {
            Effect::PickSavePath
        }
    }

    /// Returns true when `action` may proceed now; otherwise queues the
    /// discard prompt.
    fn guard(&mut self, action: GuardedAction) -> bool {
        if !self.document.is_modified() {
            return true;
        }
        self.dialog = Some(Dialog::ConfirmDiscard {
            action,
            title: action.prompt_title(),
            message: DISCARD_PROMPT,
        });
        false
    }

    fn new_document(&mut self) {
        self.replace_document(Document::new());
        self.status = "New Text File".to_string();
    }

    fn replace_document(&mut self, document: Document) {
        self.document = document;
        self.generation += 1;
        self.update_title();
    }

    fn update_title(&mut self) {
        self.title = format!("{}: {}", APP_NAME, self.document.display_name());
    }

    fn font_changed(&mut self, change: FontChange, title: &str, limit_message: &str) {
        match change {
            FontChange::Changed(size) => {
                tracing::debug!("Font size now {}", size);
                self.settings_changed = true;
            }
            FontChange::AtLimit(size) => {
                let message = format!("{}: ({})", limit_message, size.round() as i32);
                self.show_message(MessageKind::Info, title, message);
            }
        }
    }

    fn report_busy(&mut self, error: FileError) {
        tracing::warn!("{}", error);
        self.status = error.to_string();
    }

    fn show_message(&mut self, kind: MessageKind, title: &str, message: String) {
        self.dialog = Some(Dialog::Message {
            kind,
            title: title.to_string(),
            message,
        });
    }
}
