use std::path::Path;

use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

use reservations::config::LAYOUT_ENV_VAR;
use reservations::FloorLayout;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Restaurant Floor Plan".to_string(),
                resolution: (1280.0, 720.0).into(),
                present_mode: PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(WinitSettings {
            focused_mode: UpdateMode::Continuous,
            unfocused_mode: UpdateMode::Continuous,
        })
        .add_plugins((
            reservations::ReservationsPlugin,
            rendering::RenderingPlugin,
            ui::UiPlugin,
        ))
        .add_systems(PreStartup, load_floor_layout)
        .run();
}

/// Load the layout named by `FLOORPLAN_LAYOUT`, or the demo restaurant.
/// A layout that fails to load is reported and replaced by the demo.
fn load_floor_layout(mut commands: Commands) {
    let layout = match std::env::var(LAYOUT_ENV_VAR) {
        Ok(path) => match FloorLayout::load(Path::new(&path)) {
            Ok(layout) => {
                info!(
                    "Loaded floor layout from {path}: {} tables, {} reservations",
                    layout.tables.len(),
                    layout.reservations.len()
                );
                layout
            }
            Err(err) => {
                warn!("Could not load floor layout from {path}: {err}; using the demo layout");
                FloorLayout::demo()
            }
        },
        Err(_) => FloorLayout::demo(),
    };

    for reservation in layout.dangling_reservations() {
        warn!(
            "Reservation {} points at unknown table {}",
            reservation.id, reservation.table_id
        );
    }

    let (tables, book) = layout.into_resources();
    commands.insert_resource(tables);
    commands.insert_resource(book);
}
