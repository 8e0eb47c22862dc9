use crate::model::RiskLevel;
use crate::view_models::{MINISTERIO_LABEL, MINISTERIO_URL, RiskBadge};
use egui::{Button, CentralPanel, Color32, Context, Frame, RichText, ScrollArea, Ui, Visuals};

pub fn bottom_panel(ctx: &Context) {
    egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
        // ----------- BOTONES DE TEMA -----------
        ui.with_layout(
            egui::Layout::right_to_left(egui::Align::Center),
            |ui| {
                if ui.button("🌙 Modo oscuro").clicked() {
                    ctx.set_visuals(Visuals::dark());
                }
                if ui.button("☀Modo claro").clicked() {
                    ctx.set_visuals(Visuals::light());
                }
            },
        );
    });
}

/// Panel central con ancho máximo y scroll vertical
pub fn scroll_panel(ctx: &Context, max_width: f32, inner: impl FnOnce(&mut Ui)) {
    CentralPanel::default().show(ctx, |ui| {
        ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    let w = ui.available_width().min(max_width);
                    Frame::default()
                        .fill(ui.visuals().window_fill())
                        .inner_margin(egui::Margin::symmetric(16, 16))
                        .show(ui, |ui| {
                            ui.set_width(w);
                            inner(ui);
                        });
                });
            });
    });
}

/// Dibuja dos botones del mismo tamaño en una fila.
/// Devuelve (clic izquierdo, clic derecho).
pub fn two_button_row(
    ui: &mut Ui,
    panel_width: f32,
    left_label: &str,
    right_label: &str,
    enabled: bool,
) -> (bool, bool) {
    let btn_w = (panel_width - 8.0) / 2.0;
    let mut clicked_left = false;
    let mut clicked_right = false;
    ui.horizontal(|ui| {
        clicked_left = ui
            .add_enabled_ui(enabled, |ui| ui.add_sized([btn_w, 36.0], Button::new(left_label)))
            .inner
            .clicked();
        clicked_right = ui
            .add_enabled_ui(enabled, |ui| ui.add_sized([btn_w, 36.0], Button::new(right_label)))
            .inner
            .clicked();
    });
    (clicked_left, clicked_right)
}

pub fn risk_color(level: RiskLevel) -> Color32 {
    match level {
        RiskLevel::Alto => Color32::from_rgb(220, 53, 69),
        RiskLevel::Medio => Color32::from_rgb(255, 153, 0),
        RiskLevel::Bajo => Color32::from_rgb(40, 167, 69),
    }
}

/// Etiqueta de riesgo coloreada
pub fn risk_tag(ui: &mut Ui, badge: &RiskBadge, with_prefix: bool) {
    let text = if with_prefix {
        badge.label()
    } else {
        badge.text.clone()
    };
    Frame::default()
        .fill(risk_color(badge.level))
        .corner_radius(4.0)
        .inner_margin(egui::Margin::symmetric(8, 3))
        .show(ui, |ui| {
            ui.label(RichText::new(text).strong().color(Color32::WHITE));
        });
}

pub fn bullet_list(ui: &mut Ui, items: &[String]) {
    for item in items {
        ui.label(format!("• {item}"));
    }
}

pub fn ministerio_link(ui: &mut Ui) {
    ui.add_space(8.0);
    ui.label("Para más información sobre gestión ambiental en Tierra del Fuego, visita:");
    ui.hyperlink_to(MINISTERIO_LABEL, MINISTERIO_URL);
}

/// Mensaje de error/aviso y texto de espera, al pie de cada pantalla
pub fn status_line(ui: &mut Ui, message: &str, loading: Option<&str>) {
    if let Some(text) = loading {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(text);
        });
    }
    if !message.is_empty() {
        ui.add_space(8.0);
        ui.label(RichText::new(message).color(Color32::YELLOW));
    }
}
