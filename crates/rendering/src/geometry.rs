//! Table geometry: turns a `Table` record into a list of primitive parts.
//!
//! Everything here is pure data so it can be unit tested without a world.
//! `table_meshes` turns a [`TableModel`] into entities.
//!
//! Floor coordinates map to world space as `(x, 0, y)`. All part transforms
//! are relative to the table origin; chair parts are relative to their chair.

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::math::bounding::Aabb3d;
use bevy::prelude::*;

use reservations::{Table, TableStatus};

pub const TABLE_TOP_HEIGHT: f32 = 0.75;
pub const TABLE_TOP_THICKNESS: f32 = 0.1;
pub const TABLE_LEG_RADIUS: f32 = 0.05;
pub const TABLE_LEG_HEIGHT: f32 = 0.7;
/// Distance from the table edge to each leg centre.
pub const TABLE_LEG_INSET: f32 = 0.1;

/// Distance from the table edge to each chair centre.
pub const CHAIR_OFFSET: f32 = 0.3;
pub const CHAIR_SEAT: Vec3 = Vec3::new(0.4, 0.05, 0.4);
pub const CHAIR_SEAT_HEIGHT: f32 = 0.4;
pub const CHAIR_BACK: Vec3 = Vec3::new(0.4, 0.4, 0.05);
pub const CHAIR_BACK_HEIGHT: f32 = 0.6;
/// Back sits behind the seat on the chair's local -Z side.
pub const CHAIR_BACK_DEPTH: f32 = 0.2;
pub const CHAIR_LEG_RADIUS: f32 = 0.03;
pub const CHAIR_LEG_HEIGHT: f32 = 0.4;
pub const CHAIR_LEG_SPREAD: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PartShape {
    Cuboid(Vec3),
    Cylinder { radius: f32, height: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartMaterial {
    Top(TableStatus),
    TableLeg,
    Chair,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshPart {
    pub shape: PartShape,
    pub material: PartMaterial,
    pub transform: Transform,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChairModel {
    pub transform: Transform,
    /// Seat, back, then four legs.
    pub parts: [MeshPart; 6],
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableModel {
    pub origin: Vec3,
    pub top: MeshPart,
    pub legs: [MeshPart; 4],
    pub chairs: [ChairModel; 4],
}

impl TableModel {
    pub fn part_count(&self) -> usize {
        1 + self.legs.len() + self.chairs.iter().map(|c| c.parts.len()).sum::<usize>()
    }
}

/// World-space position of a table on the floor.
pub fn table_origin(table: &Table) -> Vec3 {
    Vec3::new(table.x, 0.0, table.y)
}

/// Pick volume of the table top in world space.
pub fn top_bounds(table: &Table) -> Aabb3d {
    let half = Vec3::new(
        table.effective_width() * 0.5,
        TABLE_TOP_THICKNESS * 0.5,
        table.effective_length() * 0.5,
    );
    Aabb3d::new(table_origin(table) + Vec3::Y * TABLE_TOP_HEIGHT, half)
}

pub fn build_table_model(table: &Table) -> TableModel {
    let w = table.effective_width();
    let l = table.effective_length();

    let top = MeshPart {
        shape: PartShape::Cuboid(Vec3::new(w, TABLE_TOP_THICKNESS, l)),
        material: PartMaterial::Top(table.status),
        transform: Transform::from_xyz(0.0, TABLE_TOP_HEIGHT, 0.0),
    };

    let leg_x = w * 0.5 - TABLE_LEG_INSET;
    let leg_z = l * 0.5 - TABLE_LEG_INSET;
    let legs = [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)].map(|(sx, sz)| MeshPart {
        shape: PartShape::Cylinder {
            radius: TABLE_LEG_RADIUS,
            height: TABLE_LEG_HEIGHT,
        },
        material: PartMaterial::TableLeg,
        transform: Transform::from_xyz(sx * leg_x, TABLE_LEG_HEIGHT * 0.5, sz * leg_z),
    });

    // One chair per side. Rotations keep each chair's back on the side
    // away from the table.
    let chairs = [
        (Vec3::new(0.0, 0.0, -(l * 0.5 + CHAIR_OFFSET)), 0.0),
        (Vec3::new(0.0, 0.0, l * 0.5 + CHAIR_OFFSET), PI),
        (Vec3::new(-(w * 0.5 + CHAIR_OFFSET), 0.0, 0.0), FRAC_PI_2),
        (Vec3::new(w * 0.5 + CHAIR_OFFSET, 0.0, 0.0), -FRAC_PI_2),
    ]
    .map(|(offset, yaw)| ChairModel {
        transform: Transform::from_translation(offset).with_rotation(Quat::from_rotation_y(yaw)),
        parts: chair_parts(),
    });

    TableModel {
        origin: table_origin(table),
        top,
        legs,
        chairs,
    }
}

fn chair_parts() -> [MeshPart; 6] {
    let seat = MeshPart {
        shape: PartShape::Cuboid(CHAIR_SEAT),
        material: PartMaterial::Chair,
        transform: Transform::from_xyz(0.0, CHAIR_SEAT_HEIGHT, 0.0),
    };
    let back = MeshPart {
        shape: PartShape::Cuboid(CHAIR_BACK),
        material: PartMaterial::Chair,
        transform: Transform::from_xyz(0.0, CHAIR_BACK_HEIGHT, -CHAIR_BACK_DEPTH),
    };
    let leg = |sx: f32, sz: f32| MeshPart {
        shape: PartShape::Cylinder {
            radius: CHAIR_LEG_RADIUS,
            height: CHAIR_LEG_HEIGHT,
        },
        material: PartMaterial::Chair,
        transform: Transform::from_xyz(
            sx * CHAIR_LEG_SPREAD,
            CHAIR_LEG_HEIGHT * 0.5,
            sz * CHAIR_LEG_SPREAD,
        ),
    };
    [
        seat,
        back,
        leg(-1.0, -1.0),
        leg(1.0, -1.0),
        leg(-1.0, 1.0),
        leg(1.0, 1.0),
    ]
}
