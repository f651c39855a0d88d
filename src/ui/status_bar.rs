//! Bottom status bar

use eframe::egui;

use crate::core::session::EditorSession;

pub struct StatusBar;

impl StatusBar {
    pub fn show(ui: &mut egui::Ui, session: &EditorSession) {
        ui.horizontal(|ui| {
            if session.is_loading() || session.is_saving() {
                ui.spinner();
            }
            ui.label(session.status());

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let doc = &session.document;
                ui.label(format!("Characters: {}", doc.char_count()));
                ui.separator();
                ui.label(format!("Words: {}", doc.word_count()));
                ui.separator();
                ui.label(format!("Lines: {}", doc.line_count()));
                if doc.is_modified() {
                    ui.separator();
                    ui.label("Modified");
                }
            });
        });
    }
}
