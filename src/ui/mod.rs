pub mod layout;
pub mod views;

use crate::app::QuizApp;
use crate::model::Screen;
use eframe::{App, Frame};
use egui::{Context, OpenUrl};
use layout::bottom_panel;
use std::time::Duration;

impl App for QuizApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        // Respuestas de red que ya llegaron
        self.poll_replies();
        if self.has_pending() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        // PANEL INFERIOR TEMA OSCURO O CLARO
        bottom_panel(ctx);

        // Una sola pantalla visible
        match self.state {
            Screen::Start => views::start::ui_start(self, ctx),
            Screen::Quiz => views::quiz::ui_quiz(self, ctx),
            Screen::Result => views::result::ui_result(self, ctx),
            Screen::MultiResult => views::multi_result::ui_multi_result(self, ctx),
            Screen::History => views::history::ui_history(self, ctx),
        }

        // Descargas PDF: navegación, no fetch
        if let Some(url) = self.open_url.take() {
            log::info!("abriendo {url}");
            ctx.open_url(OpenUrl::new_tab(url));
        }
    }
}
