use std::f32::consts::FRAC_PI_2;

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use reservations::config::FLOOR_HALF;

use crate::egui_input_guard::PointerCapture;

pub const FOV_Y_DEGREES: f32 = 45.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 1000.0;
pub const MIN_DISTANCE: f32 = 3.0;
pub const MAX_DISTANCE: f32 = 20.0;
/// Camera level with the floor (a polar angle of 90 degrees).
const MIN_PITCH: f32 = 0.0;
/// Just short of straight down, where `looking_at` loses its up vector.
const MAX_PITCH: f32 = FRAC_PI_2 - 0.01;
const HOME_EYE: Vec3 = Vec3::new(0.0, 10.0, 10.0);
/// Overhead eye, nudged off the vertical axis for the same reason.
pub const OVERHEAD_EYE: Vec3 = Vec3::new(0.0, 15.0, 0.001);
const DEFAULT_VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

const ORBIT_SENSITIVITY: f32 = 0.005;
const ZOOM_SPEED: f32 = 0.1;
/// World units per pixel at a distance of 1.
const PAN_SPEED: f32 = 0.0015;
const CLICK_DRAG_THRESHOLD: f32 = 5.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Perspective orbit around the floor, user controllable.
    #[default]
    ThreeD,
    /// Fixed top-down view, controls disabled.
    TwoD,
}

impl ViewMode {
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::ThreeD => "3D View",
            ViewMode::TwoD => "2D View",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ViewMode::ThreeD => ViewMode::TwoD,
            ViewMode::TwoD => ViewMode::ThreeD,
        }
    }
}

/// Sent by the host to switch view modes.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewModeRequest(pub ViewMode);

/// Marker for the camera entity driven by [`FloorCamera`].
#[derive(Component)]
pub struct FloorViewCamera;

/// Orbit around a focus point on the floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    pub focus: Vec3,
    /// Horizontal rotation in radians; zero puts the eye on +Z.
    pub yaw: f32,
    /// Elevation above the floor plane in radians.
    pub pitch: f32,
    pub distance: f32,
}

impl OrbitState {
    /// Eye at (0, 10, 10) looking at the floor centre.
    pub fn home() -> Self {
        let distance = HOME_EYE.length();
        Self {
            focus: Vec3::ZERO,
            yaw: 0.0,
            pitch: (HOME_EYE.y / distance).asin(),
            distance,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.focus + Vec3::new(x, y, z)
    }

    fn clamp(&mut self) {
        self.pitch = self.pitch.clamp(MIN_PITCH, MAX_PITCH);
        self.distance = self.distance.clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.focus.x = self.focus.x.clamp(-FLOOR_HALF, FLOOR_HALF);
        self.focus.z = self.focus.z.clamp(-FLOOR_HALF, FLOOR_HALF);
    }
}

/// The floor view camera: view mode, orbit state and viewport.
///
/// Input steers `target`; the damping system moves `orbit` toward it each
/// frame and `apply_floor_camera` copies the result onto the camera entity.
#[derive(Resource, Debug, Clone)]
pub struct FloorCamera {
    mode: ViewMode,
    orbit: OrbitState,
    target: OrbitState,
    viewport: Vec2,
}

impl Default for FloorCamera {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT)
    }
}

impl FloorCamera {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            mode: ViewMode::ThreeD,
            orbit: OrbitState::home(),
            target: OrbitState::home(),
            viewport,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn orbit(&self) -> &OrbitState {
        &self.orbit
    }

    pub fn target(&self) -> &OrbitState {
        &self.target
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.x / self.viewport.y
    }

    /// Orbit, zoom and pan only respond in 3D mode.
    pub fn interaction_enabled(&self) -> bool {
        self.mode == ViewMode::ThreeD
    }

    /// Record a new viewport size. Zero or negative sizes (a minimised
    /// window) are ignored. Returns whether anything changed.
    pub fn set_viewport(&mut self, width: f32, height: f32) -> bool {
        if !(width > 0.0 && height > 0.0) {
            return false;
        }
        let size = Vec2::new(width, height);
        if size == self.viewport {
            return false;
        }
        self.viewport = size;
        true
    }

    /// Switch view mode. Entering 3D restores the home orbit. Returns whether
    /// the mode changed.
    pub fn set_mode(&mut self, mode: ViewMode) -> bool {
        if mode == self.mode {
            return false;
        }
        self.mode = mode;
        if mode == ViewMode::ThreeD {
            self.orbit = OrbitState::home();
            self.target = OrbitState::home();
        }
        true
    }

    /// Rotate by a pointer drag delta in pixels.
    pub fn orbit_by(&mut self, delta: Vec2) {
        if !self.interaction_enabled() {
            return;
        }
        self.target.yaw -= delta.x * ORBIT_SENSITIVITY;
        self.target.pitch += delta.y * ORBIT_SENSITIVITY;
        self.target.clamp();
    }

    /// Zoom by scroll lines; positive zooms in.
    pub fn zoom_by(&mut self, lines: f32) {
        if !self.interaction_enabled() {
            return;
        }
        self.target.distance *= 1.0 - lines * ZOOM_SPEED;
        self.target.clamp();
    }

    /// Slide the focus across the floor by a pointer drag delta in pixels.
    pub fn pan_by(&mut self, delta: Vec2) {
        if !self.interaction_enabled() {
            return;
        }
        let scale = self.target.distance * PAN_SPEED;
        let (sin_yaw, cos_yaw) = self.target.yaw.sin_cos();
        self.target.focus.x += (-delta.x * cos_yaw - delta.y * sin_yaw) * scale;
        self.target.focus.z += (delta.x * sin_yaw - delta.y * cos_yaw) * scale;
        self.target.clamp();
    }

    pub(crate) fn orbit_and_target_mut(&mut self) -> (&mut OrbitState, &OrbitState) {
        (&mut self.orbit, &self.target)
    }

    pub fn transform(&self) -> Transform {
        match self.mode {
            ViewMode::ThreeD => {
                Transform::from_translation(self.orbit.eye()).looking_at(self.orbit.focus, Vec3::Y)
            }
            ViewMode::TwoD => Transform::from_translation(OVERHEAD_EYE).looking_at(Vec3::ZERO, Vec3::Y),
        }
    }

    pub fn projection(&self) -> PerspectiveProjection {
        PerspectiveProjection {
            fov: FOV_Y_DEGREES.to_radians(),
            aspect_ratio: self.aspect(),
            near: NEAR_PLANE,
            far: FAR_PLANE,
        }
    }

    /// World-space ray through a viewport pixel (origin top-left).
    pub fn ray_through(&self, pixel: Vec2) -> Option<Ray3d> {
        if !(self.viewport.x > 0.0 && self.viewport.y > 0.0) {
            return None;
        }
        let ndc = Vec2::new(
            pixel.x / self.viewport.x * 2.0 - 1.0,
            1.0 - pixel.y / self.viewport.y * 2.0,
        );
        let transform = self.transform();
        let half_height = (FOV_Y_DEGREES.to_radians() * 0.5).tan();
        let direction = *transform.forward()
            + *transform.right() * ndc.x * half_height * self.aspect()
            + *transform.up() * ndc.y * half_height;
        let direction = Dir3::new(direction).ok()?;
        Some(Ray3d {
            origin: transform.translation,
            direction,
        })
    }

    /// Viewport pixel of a world point, or `None` if it is behind the camera.
    pub fn pixel_of(&self, point: Vec3) -> Option<Vec2> {
        let transform = self.transform();
        let offset = point - transform.translation;
        let depth = offset.dot(*transform.forward());
        if depth <= NEAR_PLANE {
            return None;
        }
        let half_height = (FOV_Y_DEGREES.to_radians() * 0.5).tan();
        let ndc = Vec2::new(
            offset.dot(*transform.right()) / (depth * half_height * self.aspect()),
            offset.dot(*transform.up()) / (depth * half_height),
        );
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        ))
    }
}

// ---------------------------------------------------------------------------
// Drag tracking
// ---------------------------------------------------------------------------

/// Left-button state: distinguishes a click from an orbit drag.
///
/// `is_dragging` stays set after release until the next press, so click
/// handlers that run later in the frame can tell a drag ended.
#[derive(Resource, Default, Debug)]
pub struct OrbitDrag {
    pub pressed: bool,
    pub start_pos: Vec2,
    pub last_pos: Vec2,
    pub is_dragging: bool,
}

impl OrbitDrag {
    /// Follow a held pointer. Returns the orbit delta once past the click
    /// threshold; the frame that crosses it only rebases `last_pos`.
    pub fn follow(&mut self, pos: Vec2) -> Option<Vec2> {
        if !self.is_dragging {
            if (pos - self.start_pos).length() <= CLICK_DRAG_THRESHOLD {
                return None;
            }
            self.is_dragging = true;
            self.last_pos = pos;
            return None;
        }
        let delta = pos - self.last_pos;
        self.last_pos = pos;
        (delta != Vec2::ZERO).then_some(delta)
    }
}

#[derive(Resource, Default, Debug)]
pub struct PanDrag {
    pub dragging: bool,
    pub last_pos: Vec2,
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

pub fn sync_viewport_from_window(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut camera: ResMut<FloorCamera>,
) {
    if let Ok(window) = windows.get_single() {
        camera.set_viewport(window.width(), window.height());
    }
}

pub fn setup_floor_camera(mut commands: Commands, camera: Res<FloorCamera>) {
    commands.spawn((
        FloorViewCamera,
        Camera3d::default(),
        camera.transform(),
        Projection::Perspective(camera.projection()),
    ));
}

/// Copy the camera model onto the camera entity whenever it changed.
pub fn apply_floor_camera(
    camera: Res<FloorCamera>,
    mut query: Query<(&mut Transform, &mut Projection), With<FloorViewCamera>>,
) {
    if !camera.is_changed() {
        return;
    }
    for (mut transform, mut projection) in &mut query {
        *transform = camera.transform();
        *projection = Projection::Perspective(camera.projection());
    }
}

pub fn track_viewport_resize(
    mut resized: EventReader<WindowResized>,
    mut camera: ResMut<FloorCamera>,
) {
    let Some(last) = resized.read().last() else {
        return;
    };
    if camera
        .bypass_change_detection()
        .set_viewport(last.width, last.height)
    {
        debug!("Viewport resized to {}x{}", last.width, last.height);
        camera.set_changed();
    }
}

pub fn apply_view_mode_requests(
    mut requests: EventReader<ViewModeRequest>,
    mut camera: ResMut<FloorCamera>,
) {
    for ViewModeRequest(mode) in requests.read() {
        if camera.set_mode(*mode) {
            info!("Switched floor view to {}", mode.label());
        }
    }
}

pub fn toggle_view_mode_key(
    keys: Res<ButtonInput<KeyCode>>,
    camera: Res<FloorCamera>,
    mut requests: EventWriter<ViewModeRequest>,
) {
    if keys.just_pressed(KeyCode::KeyV) {
        requests.send(ViewModeRequest(camera.mode().toggled()));
    }
}

/// Left-mouse drag: orbit, once the pointer has moved past the click threshold.
pub fn camera_orbit_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    capture: Res<PointerCapture>,
    mut drag: ResMut<OrbitDrag>,
    mut camera: ResMut<FloorCamera>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    if buttons.just_pressed(MouseButton::Left) && !capture.over_ui {
        if let Some(pos) = window.cursor_position() {
            drag.pressed = true;
            drag.start_pos = pos;
            drag.last_pos = pos;
            drag.is_dragging = false;
        }
    }
    if buttons.just_released(MouseButton::Left) {
        drag.pressed = false;
    }
    if !drag.pressed {
        return;
    }

    let Some(pos) = window.cursor_position() else {
        return;
    };
    if let Some(delta) = drag.follow(pos) {
        if camera.interaction_enabled() {
            camera.orbit_by(delta);
        }
    }
}

/// Right-mouse drag: pan.
pub fn camera_pan_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    capture: Res<PointerCapture>,
    mut drag: ResMut<PanDrag>,
    mut camera: ResMut<FloorCamera>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    if buttons.just_pressed(MouseButton::Right) && !capture.over_ui {
        if let Some(pos) = window.cursor_position() {
            drag.dragging = true;
            drag.last_pos = pos;
        }
    }
    if buttons.just_released(MouseButton::Right) {
        drag.dragging = false;
    }

    if drag.dragging {
        if let Some(pos) = window.cursor_position() {
            let delta = pos - drag.last_pos;
            if delta != Vec2::ZERO && camera.interaction_enabled() {
                camera.pan_by(delta);
            }
            drag.last_pos = pos;
        }
    }
}

/// Scroll wheel: zoom.
pub fn camera_zoom(
    mut scroll_evts: EventReader<MouseWheel>,
    capture: Res<PointerCapture>,
    mut camera: ResMut<FloorCamera>,
) {
    for evt in scroll_evts.read() {
        if capture.over_ui || !camera.interaction_enabled() {
            continue;
        }
        let lines = match evt.unit {
            MouseScrollUnit::Line => evt.y,
            MouseScrollUnit::Pixel => evt.y / 100.0,
        };
        camera.zoom_by(lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_hit(ray: Ray3d) -> Vec3 {
        let t = -ray.origin.y / ray.direction.y;
        ray.origin + *ray.direction * t
    }

    #[test]
    fn test_orbit_drag_starts_from_threshold_crossing() {
        let mut drag = OrbitDrag {
            pressed: true,
            start_pos: Vec2::new(100.0, 100.0),
            last_pos: Vec2::new(100.0, 100.0),
            is_dragging: false,
        };
        assert_eq!(drag.follow(Vec2::new(103.0, 100.0)), None);
        assert!(!drag.is_dragging);

        // Crossing the threshold must not replay the accumulated 8px.
        assert_eq!(drag.follow(Vec2::new(108.0, 100.0)), None);
        assert!(drag.is_dragging);
        assert_eq!(drag.follow(Vec2::new(110.0, 101.0)), Some(Vec2::new(2.0, 1.0)));
        assert_eq!(drag.follow(Vec2::new(110.0, 101.0)), None);
    }

    #[test]
    fn test_home_orbit_matches_default_eye() {
        let camera = FloorCamera::default();
        let eye = camera.transform().translation;
        assert!(eye.abs_diff_eq(Vec3::new(0.0, 10.0, 10.0), 1e-4), "{eye:?}");
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut camera = FloorCamera::new(Vec2::new(800.0, 500.0));
        assert!((camera.aspect() - 1.6).abs() < 1e-6);

        assert!(camera.set_viewport(400.0, 500.0));
        assert!((camera.aspect() - 0.8).abs() < 1e-6);
        assert!((camera.projection().aspect_ratio - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_zero_viewport_is_ignored() {
        let mut camera = FloorCamera::new(Vec2::new(800.0, 500.0));
        assert!(!camera.set_viewport(0.0, 500.0));
        assert!(!camera.set_viewport(800.0, 0.0));
        assert_eq!(camera.viewport(), Vec2::new(800.0, 500.0));
    }

    #[test]
    fn test_overhead_mode_looks_straight_down() {
        let mut camera = FloorCamera::default();
        assert!(camera.set_mode(ViewMode::TwoD));
        let transform = camera.transform();
        assert!(transform.translation.abs_diff_eq(OVERHEAD_EYE, 1e-6));
        assert!(transform.forward().dot(Vec3::NEG_Y) > 0.999);
        assert!(!camera.interaction_enabled());
    }

    #[test]
    fn test_overhead_mode_ignores_controls() {
        let mut camera = FloorCamera::default();
        camera.set_mode(ViewMode::TwoD);
        let before = *camera.target();
        camera.orbit_by(Vec2::new(100.0, 50.0));
        camera.zoom_by(3.0);
        camera.pan_by(Vec2::new(40.0, 40.0));
        assert_eq!(*camera.target(), before);
    }

    #[test]
    fn test_returning_to_3d_restores_home_orbit() {
        let mut camera = FloorCamera::default();
        camera.orbit_by(Vec2::new(200.0, 0.0));
        camera.set_mode(ViewMode::TwoD);
        camera.set_mode(ViewMode::ThreeD);
        assert_eq!(*camera.orbit(), OrbitState::home());
        assert_eq!(*camera.target(), OrbitState::home());
    }

    #[test]
    fn test_setting_same_mode_is_noop() {
        let mut camera = FloorCamera::default();
        assert!(!camera.set_mode(ViewMode::ThreeD));
    }

    #[test]
    fn test_zoom_respects_distance_bounds() {
        let mut camera = FloorCamera::default();
        for _ in 0..100 {
            camera.zoom_by(5.0);
        }
        assert_eq!(camera.target().distance, MIN_DISTANCE);
        for _ in 0..100 {
            camera.zoom_by(-5.0);
        }
        assert_eq!(camera.target().distance, MAX_DISTANCE);
    }

    #[test]
    fn test_orbit_never_goes_below_floor() {
        let mut camera = FloorCamera::default();
        camera.orbit_by(Vec2::new(0.0, -10_000.0));
        assert_eq!(camera.target().pitch, MIN_PITCH);
        camera.orbit_by(Vec2::new(0.0, 10_000.0));
        assert_eq!(camera.target().pitch, MAX_PITCH);
    }

    #[test]
    fn test_pan_stays_on_floor() {
        let mut camera = FloorCamera::default();
        camera.pan_by(Vec2::new(1.0e6, 1.0e6));
        let focus = camera.target().focus;
        assert!(focus.x.abs() <= FLOOR_HALF && focus.z.abs() <= FLOOR_HALF);
        assert_eq!(focus.y, 0.0);
    }

    #[test]
    fn test_centre_ray_hits_focus() {
        let camera = FloorCamera::new(Vec2::new(800.0, 600.0));
        let ray = camera.ray_through(Vec2::new(400.0, 300.0)).expect("ray");
        assert!(floor_hit(ray).abs_diff_eq(Vec3::ZERO, 1e-3));
    }

    #[test]
    fn test_overhead_ray_maps_pixels_to_floor() {
        let mut camera = FloorCamera::new(Vec2::new(600.0, 600.0));
        camera.set_mode(ViewMode::TwoD);

        let centre = floor_hit(camera.ray_through(Vec2::new(300.0, 300.0)).expect("ray"));
        assert!(centre.abs_diff_eq(Vec3::ZERO, 1e-2));

        // Right of centre on screen is +X on the floor.
        let right = floor_hit(camera.ray_through(Vec2::new(500.0, 300.0)).expect("ray"));
        assert!(right.x > 1.0);
        assert!(right.z.abs() < 0.05);
    }

    #[test]
    fn test_projected_point_lies_on_its_ray() {
        let camera = FloorCamera::new(Vec2::new(1024.0, 640.0));
        let point = Vec3::new(3.0, 0.75, -5.0);
        let pixel = camera.pixel_of(point).expect("in front of camera");
        let ray = camera.ray_through(pixel).expect("ray");
        let along = (point - ray.origin).dot(*ray.direction);
        let closest = ray.origin + *ray.direction * along;
        assert!(closest.abs_diff_eq(point, 1e-3), "{closest:?}");
    }

    #[test]
    fn test_point_behind_camera_has_no_pixel() {
        let camera = FloorCamera::default();
        assert!(camera.pixel_of(Vec3::new(0.0, 20.0, 30.0)).is_none());
    }

    #[test]
    fn test_ray_needs_a_viewport() {
        let mut camera = FloorCamera::default();
        camera.viewport = Vec2::ZERO;
        assert!(camera.ray_through(Vec2::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn test_resize_event_reaches_projection() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<WindowResized>()
            .insert_resource(FloorCamera::new(Vec2::new(800.0, 500.0)))
            .add_systems(Update, (track_viewport_resize, apply_floor_camera).chain());
        let entity = app
            .world_mut()
            .spawn((FloorViewCamera, Transform::default(), Projection::default()))
            .id();
        app.update();

        app.world_mut().send_event(WindowResized {
            window: Entity::PLACEHOLDER,
            width: 400.0,
            height: 500.0,
        });
        app.update();

        let Projection::Perspective(perspective) = app.world().get::<Projection>(entity).expect("projection")
        else {
            panic!("expected a perspective projection");
        };
        assert!((perspective.aspect_ratio - 0.8).abs() < 1e-6);
    }
}
