//! Scene container: static fixtures plus one mesh group per table.
//!
//! Fixtures (floor, grid, walls, plant, lights) are spawned once at startup.
//! Table groups are torn down and rebuilt whenever `FloorTables` changes, so
//! the scene always holds exactly one group per table in the current list.

use std::collections::HashMap;

use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;

use reservations::config::{FLOOR_HALF, FLOOR_SIZE};
use reservations::FloorTables;

use crate::palette::{self, hex_color};
use crate::table_meshes::{spawn_table_group, TableAssets};

const WALL_HEIGHT: f32 = 3.0;
const WALL_THICKNESS: f32 = 0.2;
const FLOOR_Y: f32 = -0.1;
const PLANT_POSITION: Vec3 = Vec3::new(8.0, 0.0, -8.0);

/// Marker for static scene entities that live until teardown.
#[derive(Component)]
pub struct SceneFixture;

/// Table id -> root entity of its mesh group.
#[derive(Resource, Default, Debug)]
pub struct FloorScene {
    groups: HashMap<String, Entity>,
    rebuilds: u32,
}

impl FloorScene {
    pub fn group(&self, table_id: &str) -> Option<Entity> {
        self.groups.get(table_id).copied()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// How many times the table groups have been rebuilt.
    pub fn rebuilds(&self) -> u32 {
        self.rebuilds
    }

    /// Remove every table group. Returns the root entities to despawn.
    pub fn take_groups(&mut self) -> Vec<Entity> {
        self.groups.drain().map(|(_, e)| e).collect()
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn setup_scene_fixtures(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(ClearColor(hex_color(palette::BACKGROUND)));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
    });
    commands.spawn((
        SceneFixture,
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(5.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Floor
    commands.spawn((
        SceneFixture,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(FLOOR_SIZE, FLOOR_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: hex_color(palette::FLOOR),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::from_xyz(0.0, FLOOR_Y, 0.0),
    ));

    // Grid: centre lines darker than the rest
    let line_material = |materials: &mut Assets<StandardMaterial>, rgb: u32| {
        materials.add(StandardMaterial {
            base_color: hex_color(rgb),
            unlit: true,
            ..default()
        })
    };
    let (center, regular) = grid_line_positions(FLOOR_SIZE as u32);
    commands.spawn((
        SceneFixture,
        Mesh3d(meshes.add(line_list_mesh(regular))),
        MeshMaterial3d(line_material(&mut materials, palette::GRID_LINE)),
        Transform::default(),
    ));
    commands.spawn((
        SceneFixture,
        Mesh3d(meshes.add(line_list_mesh(center))),
        MeshMaterial3d(line_material(&mut materials, palette::GRID_CENTER)),
        Transform::default(),
    ));

    // Walls: back, left, right
    let wall_material = materials.add(StandardMaterial {
        base_color: hex_color(palette::WALL),
        ..default()
    });
    let walls = [
        (
            Vec3::new(FLOOR_SIZE, WALL_HEIGHT, WALL_THICKNESS),
            Vec3::new(0.0, WALL_HEIGHT * 0.5, -FLOOR_HALF),
        ),
        (
            Vec3::new(WALL_THICKNESS, WALL_HEIGHT, FLOOR_SIZE),
            Vec3::new(-FLOOR_HALF, WALL_HEIGHT * 0.5, 0.0),
        ),
        (
            Vec3::new(WALL_THICKNESS, WALL_HEIGHT, FLOOR_SIZE),
            Vec3::new(FLOOR_HALF, WALL_HEIGHT * 0.5, 0.0),
        ),
    ];
    for (size, position) in walls {
        commands.spawn((
            SceneFixture,
            Mesh3d(meshes.add(Cuboid::from_size(size))),
            MeshMaterial3d(wall_material.clone()),
            Transform::from_translation(position),
        ));
    }

    // Potted plant in the back corner
    commands.spawn((
        SceneFixture,
        Mesh3d(meshes.add(ConicalFrustum {
            radius_top: 0.3,
            radius_bottom: 0.4,
            height: 0.6,
        })),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: hex_color(palette::PLANT_POT),
            ..default()
        })),
        Transform::from_translation(PLANT_POSITION + Vec3::Y * 0.3),
    ));
    commands.spawn((
        SceneFixture,
        Mesh3d(meshes.add(Sphere::new(0.6))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: hex_color(palette::PLANT_FOLIAGE),
            ..default()
        })),
        Transform::from_translation(PLANT_POSITION + Vec3::Y * 1.2),
    ));

    commands.insert_resource(TableAssets::new(&mut meshes, &mut materials));
    info!("Floor scene fixtures mounted");
}

/// Endpoints of the floor grid, one line per metre. Returns `(centre, rest)`.
fn grid_line_positions(divisions: u32) -> (Vec<[f32; 3]>, Vec<[f32; 3]>) {
    let half = divisions as f32 * 0.5;
    let mut center = Vec::new();
    let mut regular = Vec::new();
    for i in 0..=divisions {
        let t = i as f32 - half;
        let lines = [[t, 0.0, -half], [t, 0.0, half], [-half, 0.0, t], [half, 0.0, t]];
        if t == 0.0 {
            center.extend(lines);
        } else {
            regular.extend(lines);
        }
    }
    (center, regular)
}

fn line_list_mesh(positions: Vec<[f32; 3]>) -> Mesh {
    Mesh::new(
        PrimitiveTopology::LineList,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
}

// ---------------------------------------------------------------------------
// Table groups
// ---------------------------------------------------------------------------

/// Rebuild every table group when the table list changes.
///
/// Old groups are despawned before the new ones are spawned, so a table that
/// disappeared from the list also disappears from the scene.
pub fn rebuild_table_groups(
    mut commands: Commands,
    tables: Res<FloorTables>,
    assets: Option<Res<TableAssets>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut scene: ResMut<FloorScene>,
) {
    if !tables.is_changed() {
        return;
    }
    let Some(assets) = assets else {
        return;
    };

    for entity in scene.take_groups() {
        commands.entity(entity).despawn_recursive();
    }
    for table in tables.0.iter() {
        let entity = spawn_table_group(&mut commands, &mut meshes, &assets, table);
        if let Some(old) = scene.groups.insert(table.id.clone(), entity) {
            warn!("Duplicate table id {} on the floor; keeping the last", table.id);
            commands.entity(old).despawn_recursive();
        }
    }
    scene.rebuilds += 1;
    debug!(
        "Rebuilt {} table groups (rebuild #{})",
        scene.groups.len(),
        scene.rebuilds
    );
}
