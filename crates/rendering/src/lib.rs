use bevy::prelude::*;

pub mod camera;
pub mod camera_smoothing;
pub mod egui_input_guard;
pub mod frame_loop;
pub mod geometry;
pub mod palette;
pub mod picking;
pub mod scene;
pub mod table_meshes;

use camera::{FloorCamera, OrbitDrag, PanDrag, ViewModeRequest};
use camera_smoothing::OrbitDamping;
use egui_input_guard::PointerCapture;
use frame_loop::{
    frame_loop_running, input_attached, FloorViewPhase, FrameScheduler, InputListeners,
    TeardownFloorPlan,
};
use picking::TablePicker;
use reservations::StatusSyncSet;
use scene::FloorScene;

/// Ordering of the floor view's per-frame work.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloorViewSet {
    /// Pointer, wheel, keyboard and resize input.
    Input,
    /// Damping and copying the camera model onto the camera entity.
    Camera,
    /// Rebuilding table groups from the current table list.
    Scene,
    /// Hover and click picking.
    Pick,
}

/// Chain the floor view sets, gate them on the frame loop, and make sure
/// status changes land before the scene rebuild of the same frame.
fn configure_floor_view_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            FloorViewSet::Input.run_if(input_attached),
            FloorViewSet::Camera,
            FloorViewSet::Scene,
            FloorViewSet::Pick.run_if(input_attached),
        )
            .chain()
            .run_if(frame_loop_running),
    )
    .configure_sets(Update, StatusSyncSet.before(FloorViewSet::Scene));
}

/// The 3D floor view: scene, camera, picking and lifecycle.
///
/// Expects `ReservationsPlugin` for the table list and the `TableClicked`
/// event.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FloorCamera>()
            .init_resource::<OrbitDamping>()
            .init_resource::<OrbitDrag>()
            .init_resource::<PanDrag>()
            .init_resource::<PointerCapture>()
            .init_resource::<TablePicker>()
            .init_resource::<FloorScene>()
            .init_resource::<FrameScheduler>()
            .init_resource::<InputListeners>()
            .init_resource::<FloorViewPhase>()
            .add_event::<ViewModeRequest>()
            .add_event::<TeardownFloorPlan>();
        configure_floor_view_sets(app);
        app.add_systems(
            Startup,
            (
                camera::sync_viewport_from_window,
                camera::setup_floor_camera,
                scene::setup_scene_fixtures,
                frame_loop::mount_floor_view,
            )
                .chain(),
        )
        .add_systems(
            Update,
            (
                camera::track_viewport_resize,
                camera::toggle_view_mode_key,
                camera::camera_orbit_drag,
                camera::camera_pan_drag,
                camera::camera_zoom,
            )
                .in_set(FloorViewSet::Input),
        )
        .add_systems(
            Update,
            (
                camera::apply_view_mode_requests,
                camera_smoothing::smooth_orbit_to_target,
                camera::apply_floor_camera,
            )
                .chain()
                .in_set(FloorViewSet::Camera),
        )
        .add_systems(
            Update,
            (scene::rebuild_table_groups, picking::prune_picker).in_set(FloorViewSet::Scene),
        )
        .add_systems(
            Update,
            (
                picking::track_pointer,
                picking::handle_table_click,
                picking::update_cursor_icon,
            )
                .chain()
                .in_set(FloorViewSet::Pick),
        )
        .add_systems(Update, frame_loop::count_frame.run_if(frame_loop_running))
        .add_systems(Last, frame_loop::teardown_floor_plan);
    }
}
