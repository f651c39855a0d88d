//! Modal message and confirmation windows

use eframe::egui::{self, Color32, RichText};

use crate::core::session::{Answer, Dialog, MessageKind, APP_NAME};

pub struct DialogWindow;

impl DialogWindow {
    /// Show `dialog` centred over the window. Returns the button the user
    /// pressed, if any. Escape counts as Cancel for prompts and OK otherwise.
    pub fn show(ctx: &egui::Context, dialog: &Dialog) -> Option<Answer> {
        let escape = ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::Escape));

        let title = match dialog {
            Dialog::ConfirmDiscard { title, .. } => title.to_string(),
            Dialog::Message { title, .. } => title.clone(),
            Dialog::About => format!("About {}", APP_NAME),
        };

        let mut answer = None;
        egui::Window::new(title)
            .id(egui::Id::new("modal_dialog"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                answer = match dialog {
                    Dialog::ConfirmDiscard { message, .. } => Self::confirm(ui, message),
                    Dialog::Message { kind, message, .. } => Self::message(ui, *kind, message),
                    Dialog::About => Self::about(ui),
                };
            });

        answer.or_else(|| {
            escape.then_some(match dialog {
                Dialog::ConfirmDiscard { .. } => Answer::Cancel,
                _ => Answer::Ok,
            })
        })
    }

    fn confirm(ui: &mut egui::Ui, message: &str) -> Option<Answer> {
        ui.label(message);
        ui.add_space(8.0);

        let mut answer = None;
        ui.horizontal(|ui| {
            if ui.button("Yes").clicked() {
                answer = Some(Answer::Yes);
            }
            if ui.button("No").clicked() {
                answer = Some(Answer::No);
            }
            if ui.button("Cancel").clicked() {
                answer = Some(Answer::Cancel);
            }
        });
        answer
    }

    fn message(ui: &mut egui::Ui, kind: MessageKind, message: &str) -> Option<Answer> {
        match kind {
            MessageKind::Info => ui.label(message),
            MessageKind::Error => ui.label(RichText::new(message).color(Color32::from_rgb(224, 108, 117))),
        };
        ui.add_space(8.0);
        ui.button("OK").clicked().then_some(Answer::Ok)
    }

    fn about(ui: &mut egui::Ui) -> Option<Answer> {
        ui.vertical_centered(|ui| {
            ui.heading(APP_NAME);
            ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
            ui.add_space(4.0);
            ui.label(env!("CARGO_PKG_DESCRIPTION"));
            ui.add_space(8.0);
            ui.button("OK").clicked().then_some(Answer::Ok)
        })
        .inner
    }
}
