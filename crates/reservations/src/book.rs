use std::collections::HashMap;

use bevy::prelude::*;

use crate::reservation::Reservation;
use crate::reservation_index::ReservationIndex;
use crate::table::Table;

/// The current table list. Replacing or mutating it triggers a full scene
/// rebuild on the rendering side.
#[derive(Resource, Debug, Clone, Default)]
pub struct FloorTables(pub Vec<Table>);

impl FloorTables {
    pub fn get(&self, id: &str) -> Option<&Table> {
        self.0.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// All known reservations plus the per-table index of active ones.
#[derive(Resource, Debug, Clone, Default)]
pub struct ReservationBook {
    reservations: Vec<Reservation>,
    positions: HashMap<String, usize>,
    index: ReservationIndex,
}

impl ReservationBook {
    pub fn new(reservations: Vec<Reservation>) -> Self {
        let mut book = Self::default();
        for r in reservations {
            book.push(r);
        }
        book
    }

    /// Add a reservation. A record reusing an existing id replaces it.
    pub fn push(&mut self, reservation: Reservation) {
        if let Some(&pos) = self.positions.get(&reservation.id) {
            let old = &self.reservations[pos];
            self.index.remove(&old.table_id, &old.id);
            if reservation.status.is_active() {
                self.index.insert(&reservation.table_id, &reservation.id);
            }
            self.reservations[pos] = reservation;
            return;
        }
        if reservation.status.is_active() {
            self.index.insert(&reservation.table_id, &reservation.id);
        }
        self.positions
            .insert(reservation.id.clone(), self.reservations.len());
        self.reservations.push(reservation);
    }

    pub fn get(&self, id: &str) -> Option<&Reservation> {
        self.positions.get(id).map(|&pos| &self.reservations[pos])
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Reservation> {
        let pos = *self.positions.get(id)?;
        Some(&mut self.reservations[pos])
    }

    pub(crate) fn index_mut(&mut self) -> &mut ReservationIndex {
        &mut self.index
    }

    pub fn index(&self) -> &ReservationIndex {
        &self.index
    }

    /// Active reservations on `table_id`, oldest first.
    pub fn active_for_table<'a>(
        &'a self,
        table_id: &str,
    ) -> impl Iterator<Item = &'a Reservation> + 'a {
        let ids = self.index.active_ids(table_id);
        ids.iter().filter_map(move |id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }
}
