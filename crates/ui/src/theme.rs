use bevy_egui::{egui, EguiContexts};

/// Light panels that sit on the pale dining-room background.
pub fn apply_floor_theme(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let mut style = (*ctx.style()).clone();
    style.visuals = egui::Visuals::light();

    let panel = egui::Color32::from_rgb(255, 255, 255);
    let inactive = egui::Color32::from_rgb(236, 239, 241);
    let hover = egui::Color32::from_rgb(224, 231, 255);
    let active = egui::Color32::from_rgb(63, 81, 181);

    style.visuals.window_fill = panel;
    style.visuals.panel_fill = panel;
    style.visuals.widgets.inactive.bg_fill = inactive;
    style.visuals.widgets.inactive.weak_bg_fill = inactive;
    style.visuals.widgets.hovered.bg_fill = hover;
    style.visuals.widgets.hovered.weak_bg_fill = hover;
    style.visuals.selection.bg_fill = active;
    style.visuals.selection.stroke = egui::Stroke::new(1.0, active);

    let rounding = egui::CornerRadius::same(6);
    style.visuals.window_corner_radius = egui::CornerRadius::same(8);
    style.visuals.widgets.inactive.corner_radius = rounding;
    style.visuals.widgets.hovered.corner_radius = rounding;
    style.visuals.widgets.active.corner_radius = rounding;

    ctx.set_style(style);
}
