use bevy::math::bounding::Aabb3d;
use bevy::prelude::*;

use reservations::{Table, TableStatus};

use crate::geometry::{
    build_table_model, top_bounds, MeshPart, PartMaterial, PartShape, CHAIR_BACK, CHAIR_LEG_HEIGHT,
    CHAIR_LEG_RADIUS, CHAIR_SEAT, TABLE_LEG_HEIGHT, TABLE_LEG_RADIUS,
};
use crate::palette;

/// Root of one table's mesh group. Despawning it removes the whole table.
#[derive(Component, Debug, Clone)]
pub struct TableGroup {
    pub table_id: String,
}

/// The pickable top surface of a table, with its world-space bounds.
#[derive(Component, Debug, Clone)]
pub struct TableTop {
    pub table_id: String,
    pub bounds: Aabb3d,
}

/// Shared meshes and materials for every table part except the top, whose
/// mesh depends on the table's size.
#[derive(Resource)]
pub struct TableAssets {
    pub table_leg: Handle<Mesh>,
    pub chair_seat: Handle<Mesh>,
    pub chair_back: Handle<Mesh>,
    pub chair_leg: Handle<Mesh>,
    pub leg_material: Handle<StandardMaterial>,
    pub chair_material: Handle<StandardMaterial>,
    /// Indexed in `TableStatus::ALL` order.
    pub top_materials: [Handle<StandardMaterial>; 3],
}

impl TableAssets {
    pub fn new(meshes: &mut Assets<Mesh>, materials: &mut Assets<StandardMaterial>) -> Self {
        let solid = |materials: &mut Assets<StandardMaterial>, rgb: u32| {
            materials.add(StandardMaterial {
                base_color: palette::hex_color(rgb),
                perceptual_roughness: 0.8,
                ..default()
            })
        };
        Self {
            table_leg: meshes.add(Cylinder::new(TABLE_LEG_RADIUS, TABLE_LEG_HEIGHT)),
            chair_seat: meshes.add(Cuboid::from_size(CHAIR_SEAT)),
            chair_back: meshes.add(Cuboid::from_size(CHAIR_BACK)),
            chair_leg: meshes.add(Cylinder::new(CHAIR_LEG_RADIUS, CHAIR_LEG_HEIGHT)),
            leg_material: solid(materials, palette::TABLE_LEG),
            chair_material: solid(materials, palette::CHAIR),
            top_materials: TableStatus::ALL.map(|s| solid(materials, palette::status_rgb(s))),
        }
    }

    pub fn material(&self, kind: PartMaterial) -> Handle<StandardMaterial> {
        match kind {
            PartMaterial::Top(status) => {
                let slot = TableStatus::ALL
                    .iter()
                    .position(|s| *s == status)
                    .unwrap_or(0);
                self.top_materials[slot].clone()
            }
            PartMaterial::TableLeg => self.leg_material.clone(),
            PartMaterial::Chair => self.chair_material.clone(),
        }
    }

    /// Shared mesh for a fixed-size part, if one exists.
    fn shared_mesh(&self, part: &MeshPart) -> Option<Handle<Mesh>> {
        match (part.material, part.shape) {
            (PartMaterial::TableLeg, PartShape::Cylinder { .. }) => Some(self.table_leg.clone()),
            (PartMaterial::Chair, PartShape::Cylinder { .. }) => Some(self.chair_leg.clone()),
            (PartMaterial::Chair, PartShape::Cuboid(size)) if size == CHAIR_SEAT => {
                Some(self.chair_seat.clone())
            }
            (PartMaterial::Chair, PartShape::Cuboid(size)) if size == CHAIR_BACK => {
                Some(self.chair_back.clone())
            }
            _ => None,
        }
    }

    fn mesh_for(&self, part: &MeshPart, meshes: &mut Assets<Mesh>) -> Handle<Mesh> {
        self.shared_mesh(part).unwrap_or_else(|| match part.shape {
            PartShape::Cuboid(size) => meshes.add(Cuboid::from_size(size)),
            PartShape::Cylinder { radius, height } => meshes.add(Cylinder::new(radius, height)),
        })
    }
}

/// Spawn the mesh group for one table and return its root entity.
pub fn spawn_table_group(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    assets: &TableAssets,
    table: &Table,
) -> Entity {
    let model = build_table_model(table);

    commands
        .spawn((
            TableGroup {
                table_id: table.id.clone(),
            },
            Transform::from_translation(model.origin),
            Visibility::default(),
        ))
        .with_children(|group| {
            group.spawn((
                TableTop {
                    table_id: table.id.clone(),
                    bounds: top_bounds(table),
                },
                Mesh3d(assets.mesh_for(&model.top, meshes)),
                MeshMaterial3d(assets.material(model.top.material)),
                model.top.transform,
            ));
            for leg in &model.legs {
                group.spawn((
                    Mesh3d(assets.mesh_for(leg, meshes)),
                    MeshMaterial3d(assets.material(leg.material)),
                    leg.transform,
                ));
            }
            for chair in &model.chairs {
                group
                    .spawn((chair.transform, Visibility::default()))
                    .with_children(|chair_root| {
                        for part in &chair.parts {
                            chair_root.spawn((
                                Mesh3d(assets.mesh_for(part, meshes)),
                                MeshMaterial3d(assets.material(part.material)),
                                part.transform,
                            ));
                        }
                    });
            }
        })
        .id()
}
