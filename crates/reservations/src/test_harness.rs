//! # TestFloor: headless harness for reservation/table integration tests
//!
//! Wraps `bevy::app::App` + `MinimalPlugins` + `ReservationsPlugin` so status
//! requests travel through the real event and system path without a window
//! or renderer.

use bevy::app::App;
use bevy::prelude::*;

use crate::book::{FloorTables, ReservationBook};
use crate::layout::FloorLayout;
use crate::reservation::{Reservation, ReservationStatus};
use crate::table::{Table, TableStatus};
use crate::{ReservationStatusChanged, ReservationStatusRequest, ReservationsPlugin};

pub struct TestFloor {
    app: App,
}

impl Default for TestFloor {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFloor {
    /// An empty floor: no tables, no reservations.
    pub fn new() -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(ReservationsPlugin);
        app.update();
        Self { app }
    }

    /// A floor loaded with the built-in demo layout.
    pub fn with_demo_layout() -> Self {
        Self::new().with_layout(FloorLayout::demo())
    }

    pub fn with_layout(mut self, layout: FloorLayout) -> Self {
        let (tables, book) = layout.into_resources();
        self.app.insert_resource(tables);
        self.app.insert_resource(book);
        self
    }

    /// Add a table at the origin with the given status.
    pub fn with_table(mut self, id: &str, status: TableStatus) -> Self {
        let table = Table::new(id, format!("Table {id}"), 4).with_status(status);
        self.app.world_mut().resource_mut::<FloorTables>().0.push(table);
        self
    }

    pub fn with_reservation(mut self, id: &str, table_id: &str, status: ReservationStatus) -> Self {
        let reservation = Reservation::pending(id, format!("Guest {id}"), table_id).with_status(status);
        self.app
            .world_mut()
            .resource_mut::<ReservationBook>()
            .push(reservation);
        self
    }

    // -----------------------------------------------------------------------
    // Driving
    // -----------------------------------------------------------------------

    /// Send a status request and run one frame so it is applied.
    pub fn request_status(&mut self, reservation_id: &str, status: ReservationStatus) {
        self.app
            .world_mut()
            .send_event(ReservationStatusRequest::new(reservation_id, status));
        self.app.update();
    }

    pub fn tick(&mut self, frames: u32) {
        for _ in 0..frames {
            self.app.update();
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn table_status(&self, id: &str) -> Option<TableStatus> {
        self.app
            .world()
            .resource::<FloorTables>()
            .get(id)
            .map(|t| t.status)
    }

    pub fn reservation_status(&self, id: &str) -> Option<ReservationStatus> {
        self.app
            .world()
            .resource::<ReservationBook>()
            .get(id)
            .map(|r| r.status)
    }

    pub fn active_reservation_ids(&self, table_id: &str) -> Vec<String> {
        self.app
            .world()
            .resource::<ReservationBook>()
            .index()
            .active_ids(table_id)
            .to_vec()
    }

    /// Drain every `ReservationStatusChanged` emitted so far.
    pub fn drain_changes(&mut self) -> Vec<ReservationStatusChanged> {
        self.app
            .world_mut()
            .resource_mut::<Events<ReservationStatusChanged>>()
            .drain()
            .collect()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}
