use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use rendering::camera::{FloorCamera, ViewMode, ViewModeRequest};

/// "3D View" / "2D View" tabs along the top edge.
pub fn view_toggle_ui(
    mut contexts: EguiContexts,
    camera: Res<FloorCamera>,
    mut requests: EventWriter<ViewModeRequest>,
) {
    let ctx = contexts.ctx_mut();
    let current = camera.mode();
    egui::Area::new(egui::Id::new("view_toggle"))
        .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 12.0))
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    for mode in [ViewMode::ThreeD, ViewMode::TwoD] {
                        if ui.selectable_label(current == mode, mode.label()).clicked()
                            && current != mode
                        {
                            requests.send(ViewModeRequest(mode));
                        }
                    }
                });
            });
        });
}
