//! Status synchronizer: reservation transitions and their effect on tables.
//!
//! Reservation states move `Pending -> {Confirmed, Cancelled}` and
//! `Confirmed -> Cancelled`; `Cancelled` is terminal. On each applied move the
//! correlated table (looked up by `table_id`) is adjusted under exact
//! prior-state guards:
//!
//! - `-> Confirmed`: an `Available` table becomes `Reserved`.
//! - `-> Cancelled`: a `Reserved` table becomes `Available`.
//!
//! `Occupied` is never entered or left here. Several reservations may point at
//! one table and no reference count is kept, so the table status is a policy
//! applied at transition time, not a structural guarantee.
//!
//! Unknown reservation ids and moves outside the state machine are no-ops. An
//! unknown table id only skips the table side effect.

use bevy::prelude::*;

use crate::book::{FloorTables, ReservationBook};
use crate::reservation::ReservationStatus;
use crate::table::{Table, TableStatus};
use crate::{ReservationStatusChanged, ReservationStatusRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStatusChange {
    pub table_id: String,
    pub from: TableStatus,
    pub to: TableStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedTransition {
    pub reservation_id: String,
    pub from: ReservationStatus,
    pub to: ReservationStatus,
    /// `None` when the table was missing or not in the guarded prior state.
    pub table: Option<TableStatusChange>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoredReason {
    UnknownReservation,
    NotAllowed {
        from: ReservationStatus,
        to: ReservationStatus,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChange {
    Applied(AppliedTransition),
    Ignored(IgnoredReason),
}

impl StatusChange {
    pub fn is_applied(&self) -> bool {
        matches!(self, StatusChange::Applied(_))
    }

    pub fn table_changed(&self) -> bool {
        matches!(
            self,
            StatusChange::Applied(AppliedTransition { table: Some(_), .. })
        )
    }
}

/// Table status implied by moving a reservation to `to`, given the table's
/// current status. `None` means the table keeps its status.
pub fn guarded_table_status(to: ReservationStatus, current: TableStatus) -> Option<TableStatus> {
    match (to, current) {
        (ReservationStatus::Confirmed, TableStatus::Available) => Some(TableStatus::Reserved),
        (ReservationStatus::Cancelled, TableStatus::Reserved) => Some(TableStatus::Available),
        _ => None,
    }
}

/// Move reservation `reservation_id` to `status` and apply the table side
/// effect. Both collections are updated in place.
pub fn update_reservation_status(
    tables: &mut [Table],
    book: &mut ReservationBook,
    reservation_id: &str,
    status: ReservationStatus,
) -> StatusChange {
    let Some(reservation) = book.get_mut(reservation_id) else {
        return StatusChange::Ignored(IgnoredReason::UnknownReservation);
    };
    let from = reservation.status;
    if !from.can_transition_to(status) {
        return StatusChange::Ignored(IgnoredReason::NotAllowed { from, to: status });
    }
    reservation.status = status;
    let table_id = reservation.table_id.clone();

    if !status.is_active() {
        book.index_mut().remove(&table_id, reservation_id);
    }

    let table = tables.iter_mut().find(|t| t.id == table_id).and_then(|t| {
        let next = guarded_table_status(status, t.status)?;
        let change = TableStatusChange {
            table_id: t.id.clone(),
            from: t.status,
            to: next,
        };
        t.status = next;
        Some(change)
    });

    StatusChange::Applied(AppliedTransition {
        reservation_id: reservation_id.to_string(),
        from,
        to: status,
        table,
    })
}

/// Drain status requests and apply them in arrival order.
///
/// Change detection on `FloorTables` is only triggered when a table status
/// actually moved, so reservation-only updates don't rebuild the scene.
pub fn apply_status_requests(
    mut requests: EventReader<ReservationStatusRequest>,
    mut tables: ResMut<FloorTables>,
    mut book: ResMut<ReservationBook>,
    mut changed: EventWriter<ReservationStatusChanged>,
) {
    for request in requests.read() {
        let outcome = update_reservation_status(
            &mut tables.bypass_change_detection().0,
            book.bypass_change_detection(),
            &request.reservation_id,
            request.status,
        );

        match outcome {
            StatusChange::Applied(applied) => {
                book.set_changed();
                match &applied.table {
                    Some(t) => {
                        tables.set_changed();
                        info!(
                            "Reservation {} {} -> {}; table {} {} -> {}",
                            applied.reservation_id,
                            applied.from.label(),
                            applied.to.label(),
                            t.table_id,
                            t.from.label(),
                            t.to.label()
                        );
                    }
                    None => info!(
                        "Reservation {} {} -> {}; table unchanged",
                        applied.reservation_id,
                        applied.from.label(),
                        applied.to.label()
                    ),
                }
                changed.send(ReservationStatusChanged(applied));
            }
            StatusChange::Ignored(reason) => {
                debug!(
                    "Ignored status request {} -> {}: {:?}",
                    request.reservation_id,
                    request.status.label(),
                    reason
                );
            }
        }
    }
}
