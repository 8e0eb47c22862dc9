use crate::QuizApp;
use crate::ui::layout::{bullet_list, ministerio_link, risk_tag, scroll_panel, status_line};
use crate::view_models::ResultCard;
use egui::{Button, Context, RichText, Ui};

pub fn ui_result(app: &mut QuizApp, ctx: &Context) {
    scroll_panel(ctx, 700.0, |ui| {
        ui.heading("Resultado del diagnóstico");
        ui.add_space(10.0);

        match &app.result_card {
            Some(card) => result_card(ui, card),
            None => {
                ui.label("No hay resultado para mostrar.");
            }
        }

        ui.add_space(16.0);
        let w = ui.available_width();
        let btn_w = ((w - 16.0) / 3.0).max(120.0);
        ui.horizontal_wrapped(|ui| {
            if ui.add_sized([btn_w, 36.0], Button::new("📄 Descargar PDF")).clicked() {
                app.descargar_pdf();
            }
            if ui
                .add_sized([btn_w, 36.0], Button::new("🔍 Ver todos los diagnósticos"))
                .clicked()
            {
                app.ver_todos_diagnosticos();
            }
            if ui.add_sized([btn_w, 36.0], Button::new("🔄 Nueva evaluación")).clicked() {
                app.nuevo_diagnostico();
            }
        });
        ui.horizontal(|ui| {
            if ui.button("📜 Ver historial").clicked() {
                app.ver_historial();
            }
            if ui.button("🏠 Volver al inicio").clicked() {
                app.volver_inicio();
            }
        });

        status_line(ui, &app.message, app.loading_label());
    });
}

fn result_card(ui: &mut Ui, card: &ResultCard) {
    risk_tag(ui, &card.badge, true);
    ui.add_space(6.0);
    ui.label(RichText::new(&card.title).heading().strong());
    if !card.categoria.is_empty() {
        ui.label(RichText::new(&card.categoria).italics());
    }
    ui.add_space(4.0);
    ui.label(&card.descripcion);

    if let Some(justificacion) = &card.justificacion {
        ui.add_space(6.0);
        ui.horizontal_wrapped(|ui| {
            ui.label(RichText::new("Justificación:").strong());
            ui.label(justificacion);
        });
    }

    ui.add_space(8.0);
    ui.label(RichText::new(card.acciones_title).strong());
    bullet_list(ui, &card.acciones);

    if !card.summary.is_empty() {
        ui.add_space(8.0);
        ui.label(RichText::new("Resumen de respuestas:").strong());
        egui::Grid::new("resumen_respuestas")
            .striped(true)
            .spacing([16.0, 4.0])
            .show(ui, |ui| {
                for line in &card.summary {
                    ui.label(&line.question);
                    ui.label(RichText::new(line.answer_label()).strong());
                    ui.end_row();
                }
            });
    }

    ministerio_link(ui);
}
