use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    pub fn label(self) -> &'static str {
        match self {
            ReservationStatus::Pending => "Pending",
            ReservationStatus::Confirmed => "Confirmed",
            ReservationStatus::Cancelled => "Cancelled",
        }
    }

    /// Allowed moves: Pending -> {Confirmed, Cancelled}, Confirmed -> Cancelled.
    /// Cancelled is terminal.
    pub fn can_transition_to(self, next: ReservationStatus) -> bool {
        matches!(
            (self, next),
            (ReservationStatus::Pending, ReservationStatus::Confirmed)
                | (ReservationStatus::Pending, ReservationStatus::Cancelled)
                | (ReservationStatus::Confirmed, ReservationStatus::Cancelled)
        )
    }

    /// A reservation still holds its table unless it was cancelled.
    pub fn is_active(self) -> bool {
        self != ReservationStatus::Cancelled
    }
}

/// A booking correlated to a table by `table_id`, a lookup key only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: String,
    pub date: String,
    pub time: String,
    pub party_size: u32,
    pub table_id: String,
    #[serde(default)]
    pub table_name: String,
    pub status: ReservationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}

impl Reservation {
    /// New pending reservation with empty contact details.
    pub fn pending(
        id: impl Into<String>,
        customer_name: impl Into<String>,
        table_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            customer_name: customer_name.into(),
            customer_email: String::new(),
            customer_phone: String::new(),
            date: String::new(),
            time: String::new(),
            party_size: 2,
            table_id: table_id.into(),
            table_name: String::new(),
            status: ReservationStatus::Pending,
            special_requests: None,
        }
    }

    pub fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }
}
