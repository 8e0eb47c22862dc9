use crate::QuizApp;
use crate::ui::layout::status_line;
use egui::{Align, Button, CentralPanel, Context};

pub fn ui_start(app: &mut QuizApp, ctx: &Context) {
    CentralPanel::default().show(ctx, |ui| {
        let max_width = 540.0;
        let content_width = ui.available_width().min(max_width);

        // Centrar verticalmente
        let estimated_h = 260.0;
        let vs = ((ui.available_height() - estimated_h) / 2.0).max(0.0);
        ui.add_space(vs / 2.0);

        ui.horizontal_centered(|ui| {
            egui::Frame::default()
                .fill(ui.visuals().window_fill())
                .inner_margin(egui::Margin::symmetric(16, 16))
                .show(ui, |ui| {
                    ui.with_layout(egui::Layout::top_down(Align::Center), |ui| {
                        ui.heading("🌿 Sistema Experto Ambiental");
                        ui.add_space(8.0);
                        ui.label(
                            "Responde una serie de preguntas sobre la zona observada \
                             y obtén una evaluación del riesgo ambiental.",
                        );
                        ui.add_space(18.0);

                        let btn_w = (content_width * 0.9).clamp(120.0, 400.0);
                        let btn_h = 40.0;

                        let btn_start =
                            ui.add_sized([btn_w, btn_h], Button::new("▶ Comenzar diagnóstico"));
                        ui.add_space(5.0);
                        let btn_history =
                            ui.add_sized([btn_w, btn_h], Button::new("📜 Ver historial"));

                        if btn_start.clicked() {
                            app.empezar_diagnostico();
                        }
                        if btn_history.clicked() {
                            app.ver_historial();
                        }

                        status_line(ui, &app.message, app.loading_label());
                    });
                });
        });

        ui.add_space(vs / 2.0);
    });
}
