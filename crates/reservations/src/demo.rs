//! Built-in sample restaurant used when no layout file is given.

use crate::reservation::{Reservation, ReservationStatus};
use crate::table::{Table, TableStatus};

pub fn demo_tables() -> Vec<Table> {
    use TableStatus::{Available, Occupied, Reserved};

    // (id, capacity, status, x, y, width, length)
    let rows: [(&str, u32, TableStatus, f32, f32, f32, f32); 15] = [
        ("1", 2, Available, -5.0, -5.0, 1.0, 1.0),
        ("2", 2, Reserved, -3.0, -5.0, 1.0, 1.0),
        ("3", 4, Available, -1.0, -5.0, 1.2, 1.8),
        ("4", 4, Occupied, 1.0, -5.0, 1.2, 1.8),
        ("5", 4, Reserved, 3.0, -5.0, 1.2, 1.8),
        ("6", 6, Available, 5.0, -5.0, 2.0, 1.8),
        ("7", 2, Available, -5.0, -1.0, 1.0, 1.0),
        ("8", 2, Occupied, -3.0, -1.0, 1.0, 1.0),
        ("9", 4, Reserved, -1.0, -1.0, 1.2, 1.8),
        ("10", 4, Available, 1.0, -1.0, 1.2, 1.8),
        ("11", 6, Available, 3.0, -1.0, 2.0, 1.8),
        ("12", 8, Occupied, -4.0, 3.0, 3.0, 1.8),
        ("13", 8, Available, 0.0, 3.0, 3.0, 1.8),
        ("14", 2, Reserved, 4.0, 3.0, 1.0, 1.0),
        ("15", 2, Available, 6.0, 3.0, 1.0, 1.0),
    ];

    rows.into_iter()
        .map(|(id, capacity, status, x, y, w, l)| {
            Table::new(id, format!("Table {id}"), capacity)
                .with_status(status)
                .at(x, y)
                .sized(w, l)
        })
        .collect()
}

pub fn demo_reservations() -> Vec<Reservation> {
    vec![
        booking(
            "1",
            ("John Doe", "john.doe@example.com", "555-123-4567"),
            ("2023-08-15", "7:00 PM", 4),
            "5",
            ReservationStatus::Confirmed,
            None,
        ),
        booking(
            "2",
            ("Jane Smith", "jane.smith@example.com", "555-987-6543"),
            ("2023-08-15", "8:00 PM", 2),
            "2",
            ReservationStatus::Pending,
            Some("Anniversary celebration, would like a quiet corner if possible."),
        ),
        booking(
            "3",
            ("Michael Johnson", "michael.j@example.com", "555-456-7890"),
            ("2023-08-16", "6:30 PM", 6),
            "6",
            ReservationStatus::Cancelled,
            None,
        ),
        booking(
            "4",
            ("Emily Brown", "emily.b@example.com", "555-567-1234"),
            ("2023-08-16", "7:30 PM", 3),
            "9",
            ReservationStatus::Confirmed,
            Some("One person has a gluten allergy."),
        ),
        booking(
            "5",
            ("David Wilson", "david.w@example.com", "555-678-2345"),
            ("2023-08-17", "6:00 PM", 2),
            "14",
            ReservationStatus::Confirmed,
            None,
        ),
    ]
}

fn booking(
    id: &str,
    (name, email, phone): (&str, &str, &str),
    (date, time, party_size): (&str, &str, u32),
    table_id: &str,
    status: ReservationStatus,
    special_requests: Option<&str>,
) -> Reservation {
    Reservation {
        id: id.to_string(),
        customer_name: name.to_string(),
        customer_email: email.to_string(),
        customer_phone: phone.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        party_size,
        table_id: table_id.to_string(),
        table_name: format!("Table {table_id}"),
        status,
        special_requests: special_requests.map(str::to_string),
    }
}
