use bevy::prelude::*;

pub mod book;
pub mod config;
pub mod demo;
pub mod layout;
pub mod layout_error;
pub mod reservation;
pub mod reservation_index;
pub mod status_sync;
pub mod table;

#[cfg(any(test, feature = "test-harness"))]
pub mod test_harness;

pub use book::{FloorTables, ReservationBook};
pub use layout::FloorLayout;
pub use reservation::{Reservation, ReservationStatus};
pub use table::{Table, TableStatus};

// ---------------------------------------------------------------------------
// Events shared between the floor view and the host UI
// ---------------------------------------------------------------------------

/// Sent by the pick controller when a table is clicked.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct TableClicked {
    pub table_id: String,
}

/// Sent by the host to move a reservation to a new status.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ReservationStatusRequest {
    pub reservation_id: String,
    pub status: ReservationStatus,
}

impl ReservationStatusRequest {
    pub fn new(reservation_id: impl Into<String>, status: ReservationStatus) -> Self {
        Self {
            reservation_id: reservation_id.into(),
            status,
        }
    }
}

/// Sent after a status request was applied.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ReservationStatusChanged(pub status_sync::AppliedTransition);

/// Applying status requests to the table list and reservation book.
/// Anything drawing `FloorTables` should run after it.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusSyncSet;

pub struct ReservationsPlugin;

impl Plugin for ReservationsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FloorTables>()
            .init_resource::<ReservationBook>()
            .add_event::<TableClicked>()
            .add_event::<ReservationStatusRequest>()
            .add_event::<ReservationStatusChanged>()
            .add_systems(
                Update,
                status_sync::apply_status_requests.in_set(StatusSyncSet),
            );
    }
}
