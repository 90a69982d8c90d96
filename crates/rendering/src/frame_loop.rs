//! Frame loop and lifecycle for the floor view.
//!
//! Per-frame work (damping, camera sync, scene rebuilds, picking) only runs
//! while [`FrameScheduler`] is running. Teardown is a single ordered path:
//! stop the loop, detach input, then release the scene. It runs on a
//! [`TeardownFloorPlan`] request or on `AppExit`, and is safe to repeat.

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, SystemCursorIcon};
use bevy::winit::cursor::CursorIcon;
use bevy::winit::{UpdateMode, WinitSettings};

use crate::camera::FloorViewCamera;
use crate::picking::TablePicker;
use crate::scene::{FloorScene, SceneFixture};
use crate::table_meshes::TableAssets;

#[derive(Resource, Debug, Default)]
pub struct FrameScheduler {
    running: bool,
    frames: u64,
}

impl FrameScheduler {
    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames run since the scheduler was created.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Whether pointer, wheel and resize input reaches the floor view.
#[derive(Resource, Debug, Default)]
pub struct InputListeners {
    attached: bool,
}

impl InputListeners {
    pub fn attach(&mut self) {
        self.attached = true;
    }

    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

/// Lifecycle phase of the floor view.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FloorViewPhase {
    #[default]
    Unmounted,
    Mounted,
    Released,
}

/// Ask the floor view to shut down.
#[derive(Event, Debug, Default, Clone, Copy)]
pub struct TeardownFloorPlan;

pub fn frame_loop_running(scheduler: Option<Res<FrameScheduler>>) -> bool {
    scheduler.is_some_and(|s| s.is_running())
}

pub fn input_attached(listeners: Option<Res<InputListeners>>) -> bool {
    listeners.is_some_and(|l| l.is_attached())
}

/// Runs after the scene and camera are spawned.
pub fn mount_floor_view(
    mut scheduler: ResMut<FrameScheduler>,
    mut listeners: ResMut<InputListeners>,
    mut phase: ResMut<FloorViewPhase>,
    winit: Option<ResMut<WinitSettings>>,
) {
    scheduler.start();
    listeners.attach();
    *phase = FloorViewPhase::Mounted;
    if let Some(mut winit) = winit {
        winit.focused_mode = UpdateMode::Continuous;
        winit.unfocused_mode = UpdateMode::Continuous;
    }
    info!("Floor view mounted");
}

pub fn count_frame(mut scheduler: ResMut<FrameScheduler>) {
    scheduler.frames += 1;
}

#[allow(clippy::too_many_arguments)]
pub fn teardown_floor_plan(
    mut commands: Commands,
    mut requests: EventReader<TeardownFloorPlan>,
    mut exits: EventReader<AppExit>,
    mut scheduler: ResMut<FrameScheduler>,
    mut listeners: ResMut<InputListeners>,
    mut phase: ResMut<FloorViewPhase>,
    mut scene: ResMut<FloorScene>,
    mut picker: ResMut<TablePicker>,
    fixtures: Query<Entity, With<SceneFixture>>,
    cameras: Query<Entity, With<FloorViewCamera>>,
    windows: Query<Entity, With<PrimaryWindow>>,
    winit: Option<ResMut<WinitSettings>>,
) {
    let requested = requests.read().count() > 0;
    let exiting = exits.read().count() > 0;
    if !(requested || exiting) || *phase == FloorViewPhase::Released {
        return;
    }

    // 1. Stop the frame loop so nothing renders a half-released scene.
    scheduler.stop();
    if let Some(mut winit) = winit {
        winit.focused_mode = UpdateMode::reactive_low_power(std::time::Duration::from_secs(60));
        winit.unfocused_mode = UpdateMode::reactive_low_power(std::time::Duration::from_secs(60));
    }

    // 2. Detach input.
    listeners.detach();
    picker.clear();
    // The cursor icon system is gated on the loop, so reset it here.
    for window in &windows {
        commands
            .entity(window)
            .insert(CursorIcon::from(SystemCursorIcon::Default));
    }

    // 3. Release the scene.
    let groups = scene.take_groups();
    let released = groups.len();
    for entity in groups.into_iter().chain(&fixtures).chain(&cameras) {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<TableAssets>();

    *phase = FloorViewPhase::Released;
    info!("Floor view torn down ({released} table groups released)");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{rebuild_table_groups, setup_scene_fixtures};
    use crate::table_meshes::TableGroup;
    use reservations::FloorLayout;

    fn lifecycle_app() -> App {
        let mut app = App::new();
        let (tables, book) = FloorLayout::demo().into_resources();
        app.add_plugins(MinimalPlugins)
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<FloorScene>()
            .init_resource::<TablePicker>()
            .init_resource::<FrameScheduler>()
            .init_resource::<InputListeners>()
            .init_resource::<FloorViewPhase>()
            .insert_resource(tables)
            .insert_resource(book)
            .add_event::<TeardownFloorPlan>()
            .add_systems(Startup, (setup_scene_fixtures, mount_floor_view).chain())
            .add_systems(
                Update,
                (count_frame, rebuild_table_groups)
                    .chain()
                    .run_if(frame_loop_running),
            )
            .add_systems(Last, teardown_floor_plan);
        app.world_mut()
            .spawn((FloorViewCamera, Transform::default()));
        app
    }

    fn count<C: Component>(app: &mut App) -> usize {
        app.world_mut()
            .query_filtered::<Entity, With<C>>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn test_mount_starts_loop_and_attaches_input() {
        let mut app = lifecycle_app();
        app.update();
        app.update();

        assert!(app.world().resource::<FrameScheduler>().is_running());
        assert!(app.world().resource::<InputListeners>().is_attached());
        assert_eq!(app.world().resource::<FrameScheduler>().frames(), 2);
        assert_eq!(count::<TableGroup>(&mut app), 15);
    }

    #[test]
    fn test_teardown_stops_loop_and_releases_scene() {
        let mut app = lifecycle_app();
        app.update();

        app.world_mut().send_event(TeardownFloorPlan);
        app.update();

        assert!(!app.world().resource::<FrameScheduler>().is_running());
        assert!(!app.world().resource::<InputListeners>().is_attached());
        assert_eq!(
            *app.world().resource::<FloorViewPhase>(),
            FloorViewPhase::Released
        );
        assert_eq!(count::<TableGroup>(&mut app), 0);
        assert_eq!(count::<SceneFixture>(&mut app), 0);
        assert_eq!(count::<FloorViewCamera>(&mut app), 0);
        assert!(!app.world().contains_resource::<TableAssets>());
    }

    #[test]
    fn test_no_frames_run_after_teardown() {
        let mut app = lifecycle_app();
        app.update();
        app.world_mut().send_event(TeardownFloorPlan);
        app.update();
        let frames = app.world().resource::<FrameScheduler>().frames();

        app.update();
        app.update();
        assert_eq!(app.world().resource::<FrameScheduler>().frames(), frames);
    }

    #[test]
    fn test_table_changes_after_teardown_do_not_respawn() {
        let mut app = lifecycle_app();
        app.update();
        app.world_mut().send_event(TeardownFloorPlan);
        app.update();

        app.world_mut()
            .resource_mut::<reservations::FloorTables>()
            .set_changed();
        app.update();
        assert_eq!(count::<TableGroup>(&mut app), 0);
    }

    #[test]
    fn test_repeated_teardown_is_harmless() {
        let mut app = lifecycle_app();
        app.update();
        app.world_mut().send_event(TeardownFloorPlan);
        app.update();
        app.world_mut().send_event(TeardownFloorPlan);
        app.world_mut().send_event(AppExit::Success);
        app.update();

        assert_eq!(
            *app.world().resource::<FloorViewPhase>(),
            FloorViewPhase::Released
        );
        assert!(!app.world().resource::<FrameScheduler>().is_running());
    }

    #[test]
    fn test_app_exit_tears_down() {
        let mut app = lifecycle_app();
        app.update();
        app.world_mut().send_event(AppExit::Success);
        app.update();

        assert_eq!(count::<TableGroup>(&mut app), 0);
        assert!(!app.world().resource::<InputListeners>().is_attached());
    }

    #[test]
    fn test_teardown_resets_pointer_cursor() {
        let mut app = lifecycle_app();
        let window = app
            .world_mut()
            .spawn((
                Window::default(),
                PrimaryWindow,
                CursorIcon::from(SystemCursorIcon::Pointer),
            ))
            .id();
        app.update();
        app.world_mut().send_event(TeardownFloorPlan);
        app.update();

        let icon = app.world().get::<CursorIcon>(window);
        assert!(matches!(
            icon,
            Some(CursorIcon::System(SystemCursorIcon::Default))
        ));
    }
}
