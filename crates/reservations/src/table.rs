use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_TABLE_LENGTH, DEFAULT_TABLE_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    Available,
    Reserved,
    Occupied,
}

impl TableStatus {
    pub const ALL: [TableStatus; 3] = [
        TableStatus::Available,
        TableStatus::Reserved,
        TableStatus::Occupied,
    ];

    /// Lowercase key used in layout files.
    pub fn key(self) -> &'static str {
        match self {
            TableStatus::Available => "available",
            TableStatus::Reserved => "reserved",
            TableStatus::Occupied => "occupied",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            TableStatus::Available => "Available",
            TableStatus::Reserved => "Reserved",
            TableStatus::Occupied => "Occupied",
        }
    }
}

/// A physical seating unit on the floor plan.
///
/// `x`/`y` are floor coordinates; `y` maps to world depth (Z). A table never
/// references the reservations made against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: String,
    pub name: String,
    pub capacity: u32,
    pub status: TableStatus,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub length: f32,
}

impl Table {
    pub fn new(id: impl Into<String>, name: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            capacity,
            status: TableStatus::Available,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            length: 0.0,
        }
    }

    pub fn with_status(mut self, status: TableStatus) -> Self {
        self.status = status;
        self
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn sized(mut self, width: f32, length: f32) -> Self {
        self.width = width;
        self.length = length;
        self
    }

    /// Width with the default applied for zero, negative or non-finite values.
    pub fn effective_width(&self) -> f32 {
        usable_or(self.width, DEFAULT_TABLE_WIDTH)
    }

    /// Length with the default applied for zero, negative or non-finite values.
    pub fn effective_length(&self) -> f32 {
        usable_or(self.length, DEFAULT_TABLE_LENGTH)
    }
}

fn usable_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}
