use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use rendering::picking::TablePicker;
use reservations::{FloorTables, Table};

use crate::status_legend::status_color32;

/// Lines shown for the hovered table: name, capacity, status.
pub fn hover_card_lines(table: &Table) -> [String; 3] {
    let seats = if table.capacity == 1 { "person" } else { "people" };
    [
        table.name.clone(),
        format!("Capacity: {} {seats}", table.capacity),
        format!("Status: {}", table.status.label()),
    ]
}

pub fn hover_card_ui(
    mut contexts: EguiContexts,
    picker: Res<TablePicker>,
    tables: Res<FloorTables>,
) {
    let Some(table) = picker.hovered().and_then(|id| tables.get(id)) else {
        return;
    };
    let [name, capacity, status] = hover_card_lines(table);
    let ctx = contexts.ctx_mut();
    egui::Area::new(egui::Id::new("table_hover_card"))
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(12.0, 12.0))
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.strong(name);
                ui.label(capacity);
                ui.colored_label(status_color32(table.status), status);
            });
        });
}
