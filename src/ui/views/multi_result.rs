use crate::QuizApp;
use crate::ui::layout::{bullet_list, risk_tag, scroll_panel, status_line};
use egui::{CollapsingHeader, Context, RichText};

pub fn ui_multi_result(app: &mut QuizApp, ctx: &Context) {
    scroll_panel(ctx, 700.0, |ui| {
        ui.heading("Todos los diagnósticos aplicables");
        ui.add_space(10.0);

        if let Some(view) = &app.multi_view {
            ui.label(RichText::new(view.header()).strong());
            ui.label(
                RichText::new("Los problemas están ordenados por nivel de riesgo (ALTO → MEDIO → BAJO)")
                    .small()
                    .weak(),
            );
            ui.add_space(8.0);

            if let Some(text) = view.empty_message() {
                ui.group(|ui| {
                    ui.label(text);
                });
            }

            for card in &view.cards {
                ui.group(|ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(format!("#{}", card.number)).strong());
                        risk_tag(ui, &card.badge, true);
                    });
                    ui.label(RichText::new(&card.title).heading());
                    if !card.categoria.is_empty() {
                        ui.label(RichText::new(&card.categoria).italics());
                    }
                    ui.label(&card.descripcion);
                    ui.horizontal_wrapped(|ui| {
                        ui.label(RichText::new("Justificación:").strong());
                        ui.label(&card.justificacion);
                    });
                    CollapsingHeader::new(card.acciones_label())
                        .id_salt(("acciones_multiple", card.number))
                        .default_open(false)
                        .show(ui, |ui| bullet_list(ui, &card.acciones));
                });
                ui.add_space(6.0);
            }
        }

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            if ui.button("⬅ Volver al resultado").clicked() {
                app.volver_al_resultado();
            }
            if ui.button("🏠 Volver al inicio").clicked() {
                app.volver_inicio();
            }
        });

        status_line(ui, &app.message, app.loading_label());
    });
}
