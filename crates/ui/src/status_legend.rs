use bevy_egui::{egui, EguiContexts};

use rendering::palette::{rgb_bytes, status_rgb};
use reservations::TableStatus;

pub(crate) fn status_color32(status: TableStatus) -> egui::Color32 {
    let [r, g, b] = rgb_bytes(status_rgb(status));
    egui::Color32::from_rgb(r, g, b)
}

/// `(label, colour)` for every table status, in display order.
pub fn legend_entries() -> Vec<(&'static str, egui::Color32)> {
    TableStatus::ALL
        .into_iter()
        .map(|status| (status.label(), status_color32(status)))
        .collect()
}

pub fn status_legend_ui(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    egui::Area::new(egui::Id::new("status_legend"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -12.0))
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.strong("Table Status");
                for (label, color) in legend_entries() {
                    ui.horizontal(|ui| {
                        let (rect, _) =
                            ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                        ui.painter()
                            .rect_filled(rect, egui::CornerRadius::same(3), color);
                        ui.label(label);
                    });
                }
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_lists_every_status_once() {
        let entries = legend_entries();
        let labels: Vec<&str> = entries.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, ["Available", "Reserved", "Occupied"]);
    }

    #[test]
    fn test_legend_colors_match_scene_palette() {
        let entries = legend_entries();
        assert_eq!(entries[0].1, egui::Color32::from_rgb(0x4c, 0xaf, 0x50));
        assert_eq!(entries[2].1, egui::Color32::from_rgb(0xf4, 0x43, 0x36));
    }
}
