//! Pointer picking: hover, selection and click reporting for table tops.
//!
//! [`TablePicker`] holds the state and does the ray casts; the systems below
//! only feed it window input and forward clicks as `TableClicked` events.

use bevy::math::bounding::{Aabb3d, RayCast3d};
use bevy::prelude::*;
use bevy::window::{CursorLeft, PrimaryWindow, SystemCursorIcon};
use bevy::winit::cursor::CursorIcon;

use reservations::{FloorTables, TableClicked};

use crate::camera::{FloorCamera, OrbitDrag, FAR_PLANE};
use crate::egui_input_guard::PointerCapture;
use crate::table_meshes::TableTop;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerAffordance {
    #[default]
    Default,
    /// Pointer is over something clickable.
    Interactive,
}

#[derive(Resource, Default, Debug)]
pub struct TablePicker {
    hovered: Option<String>,
    selected: Option<String>,
    affordance: PointerAffordance,
}

/// Id of the nearest table top hit by `ray`.
pub fn nearest_table<'a>(
    ray: Ray3d,
    targets: impl IntoIterator<Item = (&'a str, &'a Aabb3d)>,
) -> Option<&'a str> {
    let cast = RayCast3d::from_ray(ray, FAR_PLANE);
    targets
        .into_iter()
        .filter_map(|(id, bounds)| cast.aabb_intersection_at(bounds).map(|t| (id, t)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

impl TablePicker {
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn affordance(&self) -> PointerAffordance {
        self.affordance
    }

    fn pick<'a>(
        camera: &FloorCamera,
        pixel: Vec2,
        targets: impl IntoIterator<Item = (&'a str, &'a Aabb3d)>,
    ) -> Option<&'a str> {
        camera
            .ray_through(pixel)
            .and_then(|ray| nearest_table(ray, targets))
    }

    fn set_hover(&mut self, hovered: Option<&str>) -> bool {
        if self.hovered.as_deref() == hovered {
            return false;
        }
        self.hovered = hovered.map(str::to_owned);
        self.affordance = if self.hovered.is_some() {
            PointerAffordance::Interactive
        } else {
            PointerAffordance::Default
        };
        true
    }

    /// Re-evaluate hover for a pointer position. Returns whether it changed.
    pub fn pointer_moved<'a>(
        &mut self,
        camera: &FloorCamera,
        pixel: Vec2,
        targets: impl IntoIterator<Item = (&'a str, &'a Aabb3d)>,
    ) -> bool {
        let hit = Self::pick(camera, pixel, targets);
        self.set_hover(hit)
    }

    /// Pointer left the view or is captured by an overlay.
    pub fn pointer_left(&mut self) -> bool {
        self.set_hover(None)
    }

    /// Pick at the click position and commit the result as the selection.
    /// A miss clears the selection. Returns the clicked table id.
    pub fn pointer_clicked<'a>(
        &mut self,
        camera: &FloorCamera,
        pixel: Vec2,
        targets: impl IntoIterator<Item = (&'a str, &'a Aabb3d)>,
    ) -> Option<String> {
        let hit = Self::pick(camera, pixel, targets).map(str::to_owned);
        self.selected.clone_from(&hit);
        hit
    }

    /// Drop hover and selection for tables that are no longer on the floor.
    pub fn forget_missing(&mut self, tables: &FloorTables) {
        if self
            .hovered
            .as_deref()
            .is_some_and(|id| tables.get(id).is_none())
        {
            self.set_hover(None);
        }
        if self
            .selected
            .as_deref()
            .is_some_and(|id| tables.get(id).is_none())
        {
            self.selected = None;
        }
    }

    pub fn clear(&mut self) {
        self.set_hover(None);
        self.selected = None;
    }
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

pub fn track_pointer(
    mut moved: EventReader<CursorMoved>,
    mut left: EventReader<CursorLeft>,
    capture: Res<PointerCapture>,
    drag: Res<OrbitDrag>,
    camera: Res<FloorCamera>,
    tops: Query<&TableTop>,
    mut picker: ResMut<TablePicker>,
) {
    let last_move = moved.read().last().map(|evt| evt.position);
    let pointer_left = left.read().count() > 0;

    let changed = if pointer_left || capture.over_ui || (drag.pressed && drag.is_dragging) {
        picker.bypass_change_detection().pointer_left()
    } else if let Some(pixel) = last_move {
        let targets = tops.iter().map(|top| (top.table_id.as_str(), &top.bounds));
        picker
            .bypass_change_detection()
            .pointer_moved(&camera, pixel, targets)
    } else {
        false
    };
    if changed {
        picker.set_changed();
    }
}

pub fn update_cursor_icon(
    mut commands: Commands,
    picker: Res<TablePicker>,
    windows: Query<Entity, With<PrimaryWindow>>,
) {
    if !picker.is_changed() {
        return;
    }
    let icon = match picker.affordance() {
        PointerAffordance::Interactive => SystemCursorIcon::Pointer,
        PointerAffordance::Default => SystemCursorIcon::Default,
    };
    for window in &windows {
        commands.entity(window).insert(CursorIcon::from(icon));
    }
}

/// Left release without a drag: pick and report the table, if any.
#[allow(clippy::too_many_arguments)]
pub fn handle_table_click(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    capture: Res<PointerCapture>,
    drag: Res<OrbitDrag>,
    camera: Res<FloorCamera>,
    tops: Query<&TableTop>,
    mut picker: ResMut<TablePicker>,
    mut clicked: EventWriter<TableClicked>,
) {
    if !buttons.just_released(MouseButton::Left) || drag.is_dragging || capture.over_ui {
        return;
    }
    let Some(pixel) = windows.get_single().ok().and_then(Window::cursor_position) else {
        return;
    };
    let targets = tops.iter().map(|top| (top.table_id.as_str(), &top.bounds));
    if let Some(table_id) = picker.pointer_clicked(&camera, pixel, targets) {
        info!("Table {table_id} clicked");
        clicked.send(TableClicked { table_id });
    }
}

pub fn prune_picker(tables: Res<FloorTables>, mut picker: ResMut<TablePicker>) {
    if tables.is_changed() {
        picker.forget_missing(&tables);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{top_bounds, TABLE_TOP_HEIGHT};
    use reservations::FloorLayout;

    struct Floor {
        tables: FloorTables,
        bounds: Vec<(String, Aabb3d)>,
        camera: FloorCamera,
    }

    impl Floor {
        fn demo() -> Self {
            let (tables, _) = FloorLayout::demo().into_resources();
            let bounds = tables.0.iter().map(|t| (t.id.clone(), top_bounds(t))).collect();
            Self {
                tables,
                bounds,
                camera: FloorCamera::new(Vec2::new(1280.0, 720.0)),
            }
        }

        fn targets(&self) -> impl Iterator<Item = (&str, &Aabb3d)> {
            self.bounds.iter().map(|(id, b)| (id.as_str(), b))
        }

        fn pixel_over(&self, table_id: &str) -> Vec2 {
            let table = self.tables.get(table_id).expect("table");
            self.camera
                .pixel_of(Vec3::new(table.x, TABLE_TOP_HEIGHT, table.y))
                .expect("table on screen")
        }
    }

    #[test]
    fn test_hover_over_table_sets_pointer_affordance() {
        let floor = Floor::demo();
        let mut picker = TablePicker::default();

        assert!(picker.pointer_moved(&floor.camera, floor.pixel_over("5"), floor.targets()));
        assert_eq!(picker.hovered(), Some("5"));
        assert_eq!(picker.affordance(), PointerAffordance::Interactive);

        // Same table again is not a change.
        assert!(!picker.pointer_moved(&floor.camera, floor.pixel_over("5"), floor.targets()));
    }

    #[test]
    fn test_hover_over_empty_floor_clears() {
        let floor = Floor::demo();
        let mut picker = TablePicker::default();
        picker.pointer_moved(&floor.camera, floor.pixel_over("12"), floor.targets());

        // Top-left corner of the viewport looks at the back wall, not a table.
        picker.pointer_moved(&floor.camera, Vec2::new(2.0, 2.0), floor.targets());
        assert_eq!(picker.hovered(), None);
        assert_eq!(picker.affordance(), PointerAffordance::Default);
    }

    #[test]
    fn test_click_selects_then_miss_clears_selection() {
        let floor = Floor::demo();
        let mut picker = TablePicker::default();

        let clicked = picker.pointer_clicked(&floor.camera, floor.pixel_over("5"), floor.targets());
        assert_eq!(clicked.as_deref(), Some("5"));
        assert_eq!(picker.selected(), Some("5"));

        let clicked = picker.pointer_clicked(&floor.camera, Vec2::new(2.0, 2.0), floor.targets());
        assert_eq!(clicked, None);
        assert_eq!(picker.selected(), None);
    }

    #[test]
    fn test_click_picks_at_click_point_not_last_hover() {
        let floor = Floor::demo();
        let mut picker = TablePicker::default();
        picker.pointer_moved(&floor.camera, floor.pixel_over("1"), floor.targets());

        let clicked = picker.pointer_clicked(&floor.camera, floor.pixel_over("13"), floor.targets());
        assert_eq!(clicked.as_deref(), Some("13"));
    }

    #[test]
    fn test_every_demo_table_is_pickable_overhead() {
        let mut floor = Floor::demo();
        floor.camera.set_mode(crate::camera::ViewMode::TwoD);
        let mut picker = TablePicker::default();
        for table in floor.tables.0.clone() {
            let clicked = picker.pointer_clicked(&floor.camera, floor.pixel_over(&table.id), floor.targets());
            assert_eq!(clicked.as_deref(), Some(table.id.as_str()));
        }
    }

    #[test]
    fn test_nearest_hit_wins() {
        let near = Aabb3d::new(Vec3::new(0.0, 0.0, -2.0), Vec3::splat(0.5));
        let far = Aabb3d::new(Vec3::new(0.0, 0.0, -6.0), Vec3::splat(0.5));
        let ray = Ray3d {
            origin: Vec3::ZERO,
            direction: Dir3::NEG_Z,
        };
        assert_eq!(nearest_table(ray, [("far", &far), ("near", &near)]), Some("near"));
    }

    #[test]
    fn test_removed_table_drops_hover_and_selection() {
        let floor = Floor::demo();
        let mut picker = TablePicker::default();
        picker.pointer_moved(&floor.camera, floor.pixel_over("3"), floor.targets());
        picker.pointer_clicked(&floor.camera, floor.pixel_over("3"), floor.targets());

        let mut tables = floor.tables.0.clone();
        tables.retain(|t| t.id != "3");
        picker.forget_missing(&FloorTables(tables));

        assert_eq!(picker.hovered(), None);
        assert_eq!(picker.selected(), None);
        assert_eq!(picker.affordance(), PointerAffordance::Default);
    }

    // -----------------------------------------------------------------------
    // System-level input handling
    // -----------------------------------------------------------------------

    fn input_app() -> (App, Floor) {
        let floor = Floor::demo();
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<CursorMoved>()
            .add_event::<CursorLeft>()
            .add_event::<TableClicked>()
            .init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<PointerCapture>()
            .init_resource::<OrbitDrag>()
            .init_resource::<TablePicker>()
            .insert_resource(floor.camera.clone())
            .add_systems(Update, (track_pointer, handle_table_click).chain());
        app.world_mut().spawn((Window::default(), PrimaryWindow));
        for (table_id, bounds) in &floor.bounds {
            app.world_mut().spawn(TableTop {
                table_id: table_id.clone(),
                bounds: *bounds,
            });
        }
        (app, floor)
    }

    fn click_at(app: &mut App, pixel: Vec2) -> Vec<String> {
        let world = app.world_mut();
        let mut windows = world.query_filtered::<&mut Window, With<PrimaryWindow>>();
        windows.single_mut(world).set_cursor_position(Some(pixel));
        let mut buttons = world.resource_mut::<ButtonInput<MouseButton>>();
        buttons.clear();
        buttons.press(MouseButton::Left);
        buttons.release(MouseButton::Left);
        app.update();
        app.world_mut()
            .resource_mut::<Events<TableClicked>>()
            .drain()
            .map(|evt| evt.table_id)
            .collect()
    }

    fn move_to(app: &mut App, pixel: Vec2) {
        app.world_mut().send_event(CursorMoved {
            window: Entity::PLACEHOLDER,
            position: pixel,
            delta: None,
        });
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .clear();
        app.update();
    }

    #[test]
    fn test_click_on_empty_floor_reports_nothing_and_clears_selection() {
        let (mut app, floor) = input_app();

        assert_eq!(click_at(&mut app, floor.pixel_over("5")), ["5"]);
        assert_eq!(app.world().resource::<TablePicker>().selected(), Some("5"));

        assert!(click_at(&mut app, Vec2::new(2.0, 2.0)).is_empty());
        assert_eq!(app.world().resource::<TablePicker>().selected(), None);
    }

    #[test]
    fn test_release_after_orbit_drag_is_not_a_click() {
        let (mut app, floor) = input_app();
        app.world_mut().resource_mut::<OrbitDrag>().is_dragging = true;

        assert!(click_at(&mut app, floor.pixel_over("5")).is_empty());
        assert_eq!(app.world().resource::<TablePicker>().selected(), None);
    }

    #[test]
    fn test_click_over_overlay_is_not_forwarded() {
        let (mut app, floor) = input_app();
        app.world_mut().resource_mut::<PointerCapture>().over_ui = true;

        assert!(click_at(&mut app, floor.pixel_over("5")).is_empty());
        assert_eq!(app.world().resource::<TablePicker>().selected(), None);
    }

    #[test]
    fn test_hover_follows_cursor_until_overlay_captures_it() {
        let (mut app, floor) = input_app();

        move_to(&mut app, floor.pixel_over("12"));
        assert_eq!(app.world().resource::<TablePicker>().hovered(), Some("12"));

        app.world_mut().resource_mut::<PointerCapture>().over_ui = true;
        move_to(&mut app, floor.pixel_over("12"));
        let picker = app.world().resource::<TablePicker>();
        assert_eq!(picker.hovered(), None);
        assert_eq!(picker.affordance(), PointerAffordance::Default);
    }

    #[test]
    fn test_hover_is_cleared_while_orbit_dragging() {
        let (mut app, floor) = input_app();
        move_to(&mut app, floor.pixel_over("7"));
        assert_eq!(app.world().resource::<TablePicker>().hovered(), Some("7"));

        {
            let mut drag = app.world_mut().resource_mut::<OrbitDrag>();
            drag.pressed = true;
            drag.is_dragging = true;
        }
        move_to(&mut app, floor.pixel_over("7"));
        assert_eq!(app.world().resource::<TablePicker>().hovered(), None);
    }
}
