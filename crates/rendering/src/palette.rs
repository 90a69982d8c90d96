//! Colours shared by the 3D scene and the egui overlay, as `0xRRGGBB`.

use bevy::prelude::*;

use reservations::TableStatus;

pub const TABLE_AVAILABLE: u32 = 0x4caf50;
pub const TABLE_RESERVED: u32 = 0xffc107;
pub const TABLE_OCCUPIED: u32 = 0xf44336;

pub const TABLE_LEG: u32 = 0x757575;
pub const CHAIR: u32 = 0x9e9e9e;

pub const BACKGROUND: u32 = 0xf8f9fa;
pub const FLOOR: u32 = 0xe0e0e0;
pub const WALL: u32 = 0xcccccc;
pub const GRID_CENTER: u32 = 0x888888;
pub const GRID_LINE: u32 = 0xcccccc;
pub const PLANT_POT: u32 = 0x8d6e63;
pub const PLANT_FOLIAGE: u32 = 0x4caf50;

pub fn status_rgb(status: TableStatus) -> u32 {
    match status {
        TableStatus::Available => TABLE_AVAILABLE,
        TableStatus::Reserved => TABLE_RESERVED,
        TableStatus::Occupied => TABLE_OCCUPIED,
    }
}

pub fn rgb_bytes(rgb: u32) -> [u8; 3] {
    [(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8]
}

pub fn hex_color(rgb: u32) -> Color {
    let [r, g, b] = rgb_bytes(rgb);
    Color::srgb_u8(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_palette_is_distinct() {
        let colors: Vec<u32> = TableStatus::ALL.into_iter().map(status_rgb).collect();
        assert_eq!(colors, [TABLE_AVAILABLE, TABLE_RESERVED, TABLE_OCCUPIED]);
        assert!(!colors.contains(&CHAIR));
    }

    #[test]
    fn test_rgb_bytes_splits_channels() {
        assert_eq!(rgb_bytes(0xffc107), [0xff, 0xc1, 0x07]);
    }
}
