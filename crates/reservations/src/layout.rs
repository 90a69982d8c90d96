use std::collections::HashSet;
use std::path::Path;

use bevy::log::warn;
use serde::{Deserialize, Serialize};

use crate::book::{FloorTables, ReservationBook};
use crate::demo;
use crate::layout_error::LayoutError;
use crate::reservation::Reservation;
use crate::table::{Table, TableStatus};

/// A dining-room layout: tables plus the reservations made against them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FloorLayout {
    pub tables: Vec<Table>,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
}

impl FloorLayout {
    /// The built-in sample restaurant: 15 tables and 5 reservations.
    pub fn demo() -> Self {
        Self {
            tables: demo::demo_tables(),
            reservations: demo::demo_reservations(),
        }
    }

    /// Parse a layout file. A table whose status label is not one of the
    /// known keys is kept as `Available` with a warning; the rest of the
    /// layout is unaffected.
    pub fn from_json_str(json: &str) -> Result<Self, LayoutError> {
        let raw: RawLayout = serde_json::from_str(json)?;
        let layout = FloorLayout {
            tables: raw.tables.into_iter().map(RawTable::into_table).collect(),
            reservations: raw.reservations,
        };
        layout.validate()
    }

    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    fn validate(self) -> Result<Self, LayoutError> {
        let mut seen = HashSet::new();
        for table in &self.tables {
            if !seen.insert(table.id.as_str()) {
                return Err(LayoutError::DuplicateTableId(table.id.clone()));
            }
        }
        Ok(self)
    }

    /// Reservations whose `table_id` matches no table. They are kept (the
    /// reference is weak) but never move a table status.
    pub fn dangling_reservations(&self) -> impl Iterator<Item = &Reservation> {
        self.reservations
            .iter()
            .filter(|r| !self.tables.iter().any(|t| t.id == r.table_id))
    }

    pub fn into_resources(self) -> (FloorTables, ReservationBook) {
        (
            FloorTables(self.tables),
            ReservationBook::new(self.reservations),
        )
    }
}

/// On-disk shape of a layout, with table statuses still as raw labels.
#[derive(Deserialize)]
struct RawLayout {
    tables: Vec<RawTable>,
    #[serde(default)]
    reservations: Vec<Reservation>,
}

#[derive(Deserialize)]
struct RawTable {
    id: String,
    name: String,
    capacity: u32,
    status: String,
    x: f32,
    y: f32,
    #[serde(default)]
    width: f32,
    #[serde(default)]
    length: f32,
}

impl RawTable {
    fn into_table(self) -> Table {
        let status = TableStatus::from_key(&self.status).unwrap_or_else(|| {
            warn!(
                "Table {} has unknown status {:?}; treating it as available",
                self.id, self.status
            );
            TableStatus::Available
        });
        Table {
            id: self.id,
            name: self.name,
            capacity: self.capacity,
            status,
            x: self.x,
            y: self.y,
            width: self.width,
            length: self.length,
        }
    }
}
