use crate::QuizApp;
use crate::history::Section;
use crate::ui::layout::{bullet_list, risk_tag, scroll_panel, status_line};
use crate::view_models::{HistoryEntryView, StatsView};
use egui::{Color32, Context, Grid, RichText, Ui};

pub fn ui_history(app: &mut QuizApp, ctx: &Context) {
    scroll_panel(ctx, 760.0, |ui| {
        ui.heading("📜 Historial de diagnósticos");
        ui.add_space(10.0);

        // ----------- ESTADÍSTICAS -----------
        match app.history.stats() {
            Section::Idle | Section::Loading => {
                ui.spinner();
            }
            Section::Failed(msg) => error_label(ui, msg),
            Section::Loaded(stats) => stats_grid(ui, &StatsView::from_stats(stats)),
        }
        ui.add_space(12.0);
        ui.separator();

        // ----------- ENTRADAS -----------
        let mut toggle = None;
        match app.history.entries() {
            Section::Idle | Section::Loading => {
                ui.spinner();
            }
            Section::Failed(msg) => error_label(ui, msg),
            Section::Loaded(entries) => {
                if let Some(text) = app.history.empty_message() {
                    ui.label(text);
                }
                for entry in entries {
                    let view = HistoryEntryView::from_entry(entry);
                    if history_item(ui, &view, app.history.is_expanded(view.id)) {
                        toggle = Some(view.id);
                    }
                    ui.add_space(6.0);
                }
            }
        }
        if let Some(id) = toggle {
            app.history.toggle_details(id);
        }

        // ----------- PAGINACIÓN -----------
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(app.history.has_prev_page(), egui::Button::new("◀ Anteriores"))
                .clicked()
            {
                app.historial_pagina_anterior();
            }
            let first = app.history.offset() + 1;
            ui.label(format!("desde #{first}"));
            if ui
                .add_enabled(app.history.has_next_page(), egui::Button::new("Siguientes ▶"))
                .clicked()
            {
                app.historial_pagina_siguiente();
            }
        });

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            if ui.button("📄 Descargar historial PDF").clicked() {
                app.descargar_historial_pdf();
            }
            if ui.button("🔄 Actualizar").clicked() {
                app.ver_historial();
            }
            if ui.button("🏠 Volver al inicio").clicked() {
                app.volver_inicio();
            }
        });

        status_line(ui, &app.message, app.loading_label());
    });
}

fn error_label(ui: &mut Ui, msg: &str) {
    ui.label(RichText::new(msg).color(Color32::LIGHT_RED));
}

fn stats_grid(ui: &mut Ui, stats: &StatsView) {
    ui.horizontal_top(|ui| {
        ui.group(|ui| {
            ui.vertical(|ui| {
                ui.label("Total de Diagnósticos");
                ui.label(RichText::new(stats.total.to_string()).size(32.0).strong());
            });
        });
        ui.group(|ui| {
            ui.vertical(|ui| {
                ui.label("Por Nivel de Riesgo");
                Grid::new("stats_riesgo").show(ui, |ui| {
                    for (badge, n) in &stats.por_riesgo {
                        risk_tag(ui, badge, false);
                        ui.label(RichText::new(n.to_string()).strong());
                        ui.end_row();
                    }
                });
            });
        });
        ui.group(|ui| {
            ui.vertical(|ui| {
                ui.label("Top Categorías");
                Grid::new("stats_categoria").show(ui, |ui| {
                    for (categoria, n) in &stats.por_categoria {
                        ui.label(categoria);
                        ui.label(RichText::new(n.to_string()).strong());
                        ui.end_row();
                    }
                });
            });
        });
    });
}

/// Devuelve true si se pulsó "ver detalles"
fn history_item(ui: &mut Ui, view: &HistoryEntryView, expanded: bool) -> bool {
    let mut clicked = false;
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            risk_tag(ui, &view.badge, false);
            ui.label(RichText::new(&view.fecha).weak());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("#{}", view.id));
            });
        });
        ui.label(RichText::new(&view.title).strong());
        ui.label(RichText::new(&view.categoria).italics());
        ui.label(view.indicators_label());

        let toggle_text = if expanded {
            "▼ Ocultar detalles"
        } else {
            "▶ Ver detalles completos"
        };
        if ui.small_button(toggle_text).clicked() {
            clicked = true;
        }
        if expanded {
            ui.indent(("historial_detalle", view.id), |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(RichText::new("Descripción:").strong());
                    ui.label(&view.descripcion);
                });
                ui.horizontal_wrapped(|ui| {
                    ui.label(RichText::new("Justificación:").strong());
                    ui.label(&view.justificacion);
                });
                ui.label(RichText::new("Acciones recomendadas:").strong());
                bullet_list(ui, &view.acciones);
            });
        }
    });
    clicked
}
