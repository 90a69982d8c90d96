/// Table top width used when a layout record has no usable width.
pub const DEFAULT_TABLE_WIDTH: f32 = 1.2;
/// Table top length used when a layout record has no usable length.
pub const DEFAULT_TABLE_LENGTH: f32 = 1.8;

/// Side of the square dining-room floor, in world units.
pub const FLOOR_SIZE: f32 = 20.0;
pub const FLOOR_HALF: f32 = FLOOR_SIZE / 2.0;

/// Environment variable naming a JSON layout file to load at startup.
pub const LAYOUT_ENV_VAR: &str = "FLOORPLAN_LAYOUT";
