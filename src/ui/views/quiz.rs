use crate::QuizApp;
use crate::app::RequestKind;
use crate::quiz::QuizPhase;
use crate::ui::layout::{status_line, two_button_row};
use egui::{Align, Context, ProgressBar, RichText, ScrollArea};

pub fn ui_quiz(app: &mut QuizApp, ctx: &Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let max_width = 650.0;
        let panel_width = (ui.available_width() * 0.97).min(max_width);
        let total_height = 150.0 + 48.0 + 48.0 + 48.0 + 24.0;
        let extra_space = (ui.available_height() - total_height).max(0.0) / 2.0;
        ui.add_space(extra_space / 2.0);

        egui::Frame::default()
            .fill(ui.visuals().window_fill())
            .inner_margin(egui::Margin::symmetric(24, 20))
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_width(panel_width);

                    let total = app.session.len();
                    let progress = app.session.progress();
                    let shown = (app.session.position() + 1).min(total);
                    ui.add(
                        ProgressBar::new(progress)
                            .desired_width(panel_width)
                            .text(format!("{shown}/{total}")),
                    );
                    ui.add_space(12.0);

                    // Texto de la pregunta (o placeholder) con scroll fijo
                    let prompt = match app.session.phase() {
                        QuizPhase::Completed => "Cuestionario completado.".to_string(),
                        _ => app
                            .session
                            .current_question()
                            .map(|q| q.text.clone())
                            .unwrap_or_else(|| "No hay preguntas disponibles.".to_string()),
                    };
                    ui.allocate_ui_with_layout(
                        egui::vec2(panel_width, 90.0),
                        egui::Layout::top_down(Align::Center),
                        |ui| {
                            ScrollArea::vertical().max_height(150.0).show(ui, |ui| {
                                ui.label(RichText::new(prompt).heading());
                            });
                        },
                    );
                    ui.add_space(12.0);

                    let can_answer = app.session.current_question().is_some();
                    let (si, no) = two_button_row(ui, panel_width, "✅ Sí", "❌ No", can_answer);
                    if si {
                        app.responder(true);
                    }
                    if no {
                        app.responder(false);
                    }

                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        if app.session.show_back() && ui.button("⬅ Anterior").clicked() {
                            app.anterior_pregunta();
                        }
                        let completed = app.session.phase() == QuizPhase::Completed;
                        if completed
                            && !app.is_pending(RequestKind::Single)
                            && ui.button("🔁 Reintentar envío").clicked()
                        {
                            app.reintentar_envio();
                        }
                        if ui.button("🏠 Volver al inicio").clicked() {
                            app.volver_inicio();
                        }
                    });

                    status_line(ui, &app.message, app.loading_label());
                });
            });

        ui.add_space(extra_space);
    });
}
