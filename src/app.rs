//! Main window: menus, shortcuts, OS dialogs and window events

use std::path::Path;
use std::sync::Arc;

use eframe::egui::{self, Key, KeyboardShortcut, Modifiers};

use crate::core::config::AppConfig;
use crate::core::session::{Command, EditorSession, Effect};
use crate::ui::{dialogs::DialogWindow, editor::EditorPanel, status_bar::StatusBar};

const NEW: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::N);
const OPEN: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::O);
const SAVE_AS: KeyboardShortcut =
    KeyboardShortcut::new(Modifiers::COMMAND.plus(Modifiers::SHIFT), Key::S);
const SAVE: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::S);
const FONT_UP: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Equals);
const FONT_UP_PLUS: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Plus);
const FONT_DOWN: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Minus);
const FONT_RESET: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Num0);

/// Shortcuts in match order; Ctrl+Shift+S must be checked before Ctrl+S.
const SHORTCUTS: &[(KeyboardShortcut, Command)] = &[
    (NEW, Command::New),
    (OPEN, Command::Open),
    (SAVE_AS, Command::SaveAs),
    (SAVE, Command::Save),
    (FONT_UP, Command::IncreaseFontSize),
    (FONT_UP_PLUS, Command::IncreaseFontSize),
    (FONT_DOWN, Command::DecreaseFontSize),
    (FONT_RESET, Command::ResetFontSize),
];

/// Main application state
pub struct TextEditorApp {
    session: EditorSession,
    config: AppConfig,
    /// Title last sent to the viewport
    shown_title: String,
}

impl TextEditorApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        // Ctrl+=/Ctrl+- resize the editor font rather than the whole UI
        cc.egui_ctx.options_mut(|o| o.zoom_with_keyboard = false);

        let ctx = cc.egui_ctx.clone();
        let session = EditorSession::new(&config.editor, Arc::new(move || ctx.request_repaint()));

        Self {
            shown_title: session.title().to_string(),
            session,
            config,
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&self, ctx: &egui::Context, commands: &mut Vec<Command>) {
        let loading = self.session.is_loading();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    let items = [
                        ("New", Some(NEW), Command::New, !loading),
                        ("Open...", Some(OPEN), Command::Open, !loading),
                        ("Save", Some(SAVE), Command::Save, !loading),
                        ("Save As...", Some(SAVE_AS), Command::SaveAs, !loading),
                    ];
                    Self::menu_items(ui, ctx, &items, commands);
                    ui.separator();
                    Self::menu_items(ui, ctx, &[("Exit", None, Command::Exit, true)], commands);
                });

                ui.menu_button("Format", |ui| {
                    let wrap = [(self.session.word_wrap_label(), None, Command::ToggleWordWrap, true)];
                    Self::menu_items(ui, ctx, &wrap, commands);
                    ui.separator();
                    let items = [
                        ("Increase Font Size", Some(FONT_UP), Command::IncreaseFontSize, true),
                        ("Decrease Font Size", Some(FONT_DOWN), Command::DecreaseFontSize, true),
                        ("Reset Font Size to Default", Some(FONT_RESET), Command::ResetFontSize, true),
                    ];
                    Self::menu_items(ui, ctx, &items, commands);
                });

                ui.menu_button("Help", |ui| {
                    Self::menu_items(ui, ctx, &[("About", None, Command::About, true)], commands);
                });
            });
        });
    }

    fn menu_items(
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        items: &[(&str, Option<KeyboardShortcut>, Command, bool)],
        commands: &mut Vec<Command>,
    ) {
        for (label, shortcut, command, enabled) in items {
            let mut button = egui::Button::new(*label);
            if let Some(shortcut) = shortcut {
                button = button.shortcut_text(ctx.format_shortcut(shortcut));
            }
            if ui.add_enabled(*enabled, button).clicked() {
                commands.push(*command);
                ui.close();
            }
        }
    }

    /// Handle keyboard shortcuts
    fn collect_shortcuts(&self, ctx: &egui::Context, commands: &mut Vec<Command>) {
        if self.session.dialog().is_some() {
            return;
        }
        ctx.input_mut(|i| {
            for (shortcut, command) in SHORTCUTS {
                if i.consume_shortcut(shortcut) {
                    commands.push(*command);
                }
            }
        });
    }

    fn apply(&mut self, ctx: &egui::Context, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::PickOpenPath => {
                if let Some(path) = self.file_dialog().pick_file() {
                    self.remember_directory(&path);
                    self.session.open_path(path);
                }
            }
            Effect::PickSavePath => {
                let file_name = self
                    .session
                    .document
                    .path()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "Untitled.txt".to_string());
                if let Some(path) = self.file_dialog().set_file_name(file_name).save_file() {
                    self.remember_directory(&path);
                    self.session.save_to(path);
                }
            }
            Effect::Close => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
        }
    }

    fn file_dialog(&self) -> rfd::FileDialog {
        let dialog = rfd::FileDialog::new()
            .add_filter("Text Files (*.txt)", &["txt"])
            .add_filter("All Files", &["*"]);
        match &self.config.last_directory {
            Some(dir) if dir.is_dir() => dialog.set_directory(dir),
            _ => dialog,
        }
    }

    fn remember_directory(&mut self, path: &Path) {
        self.config.remember_directory(path);
        self.save_config();
    }

    fn save_config(&mut self) {
        self.session.store_settings(&mut self.config.editor);
        if let Err(e) = self.config.save() {
            tracing::warn!("Failed to save config: {:#}", e);
        }
    }

    fn sync_title(&mut self, ctx: &egui::Context) {
        if self.shown_title != self.session.title() {
            self.shown_title = self.session.title().to_string();
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(self.shown_title.clone()));
        }
    }
}

impl eframe::App for TextEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let effect = self.session.poll_workers();
        self.apply(ctx, effect);

        let mut commands = Vec::new();
        self.collect_shortcuts(ctx, &mut commands);
        self.render_menu_bar(ctx, &mut commands);

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            StatusBar::show(ui, &self.session);
        });

        let monospace = self.config.editor.monospace;
        egui::CentralPanel::default().show(ctx, |ui| {
            EditorPanel::show(ui, &mut self.session, monospace);
        });

        if let Some(dialog) = self.session.dialog().cloned() {
            if let Some(answer) = DialogWindow::show(ctx, &dialog) {
                let effect = self.session.answer(answer);
                self.apply(ctx, effect);
            }
        }

        for command in commands {
            let effect = self.session.execute(command);
            self.apply(ctx, effect);
        }

        if self.session.take_settings_changed() {
            self.save_config();
        }

        if ctx.input(|i| i.viewport().close_requested()) && !self.session.on_close_requested() {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
        }

        self.sync_title(ctx);
    }
}
