//! Egui input guard: keeps clicks on overlay panels from reaching the floor.
//!
//! World input systems read [`PointerCapture`] instead of egui directly, so
//! the floor view also runs without an egui context (headless tests).

use bevy::prelude::*;
use bevy_egui::EguiContexts;

#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct PointerCapture {
    /// The pointer is over an egui area or egui is handling a drag.
    pub over_ui: bool,
}

/// Returns `true` when egui wants the pointer.
#[inline]
pub fn egui_wants_pointer(contexts: &mut EguiContexts) -> bool {
    let ctx = contexts.ctx_mut();
    ctx.wants_pointer_input() || ctx.is_pointer_over_area()
}

/// Needs `EguiPlugin`; registered by the overlay plugin that owns egui.
pub fn update_pointer_capture(mut contexts: EguiContexts, mut capture: ResMut<PointerCapture>) {
    let over_ui = egui_wants_pointer(&mut contexts);
    if capture.over_ui != over_ui {
        capture.over_ui = over_ui;
    }
}
