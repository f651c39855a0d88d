//! Plain-text editing area

use std::sync::Arc;

use eframe::egui::{self, text::LayoutJob, FontFamily, FontId, Galley};

use crate::core::session::EditorSession;

/// Central text area
pub struct EditorPanel;

impl EditorPanel {
    /// Show the editor. The buffer is read-only while a file is loading.
    pub fn show(ui: &mut egui::Ui, session: &mut EditorSession, monospace: bool) {
        let family = if monospace {
            FontFamily::Monospace
        } else {
            FontFamily::Proportional
        };
        let font_id = FontId::new(session.font.current(), family);
        let word_wrap = session.word_wrap;

        let mut layouter = |ui: &egui::Ui, buf: &dyn egui::TextBuffer, wrap_width: f32| -> Arc<Galley> {
            let color = ui
                .visuals()
                .override_text_color
                .unwrap_or_else(|| ui.visuals().widgets.inactive.text_color());
            let width = if word_wrap { wrap_width } else { f32::INFINITY };
            let job = LayoutJob::simple(buf.as_str().to_owned(), font_id.clone(), color, width);
            ui.fonts(|f| f.layout_job(job))
        };

        let scroll = if word_wrap {
            egui::ScrollArea::vertical()
        } else {
            egui::ScrollArea::both()
        };

        let interactive = !session.is_loading();
        scroll
            .id_salt("editor_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let response = egui::TextEdit::multiline(&mut session.document.content)
                    .interactive(interactive)
                    .frame(false)
                    .desired_width(f32::INFINITY)
                    .min_size(ui.available_size())
                    .layouter(&mut layouter)
                    .show(ui);

                if response.response.changed() {
                    session.document.mark_edited();
                }
            });
    }
}
