use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed fare per seat, in ETB.
pub const FARE_PER_SEAT: u32 = 8;

/// A finalized reservation as persisted under the `bookings` store key.
/// Field names match the serialized layout, so a stored record round-trips
/// unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub from: String,
    pub to: String,
    pub date: String,
    pub time: String,
    pub passengers: u32,
    #[serde(rename = "passengerData")]
    pub passenger_data: Vec<Passenger>,
    pub seats: Vec<String>,
    pub total: u32,
    pub email: String,
    pub phone: String,
    pub payment: String,
    pub status: BookingStatus,
    pub booked: DateTime<Utc>,
}

impl Booking {
    /// Booking ids are "ADD" plus the last 8 digits of a millisecond
    /// timestamp. Not globally unique, but unique enough for a single
    /// client's ticket list.
    pub fn generate_id(now: DateTime<Utc>) -> String {
        let millis = now.timestamp_millis().to_string();
        let tail = &millis[millis.len().saturating_sub(8)..];
        format!("ADD{tail}")
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Passenger {
    pub name: String,
    pub age: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Valid,
    Used,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::Valid => write!(f, "valid"),
            BookingStatus::Used => write!(f, "used"),
        }
    }
}

/// Transient origin/destination/date carried from the quick-search form into
/// the wizard, persisted under the `search` store key and cleared on a
/// successful booking.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchDraft {
    pub from: String,
    pub to: String,
    pub date: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_generate_id_uses_last_eight_digits() {
        let at = Utc.timestamp_millis_opt(1_726_000_123_456).unwrap();
        assert_eq!(Booking::generate_id(at), "ADD00123456");
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::Valid).unwrap(),
            "\"valid\""
        );
        assert_eq!(
            serde_json::to_string(&BookingStatus::Used).unwrap(),
            "\"used\""
        );
    }

    #[test]
    fn test_booking_roundtrip() {
        let booking = Booking {
            id: "ADD00123456".to_string(),
            from: "Piazza".to_string(),
            to: "Bole".to_string(),
            date: "2026-09-01".to_string(),
            time: "08:00".to_string(),
            passengers: 2,
            passenger_data: vec![
                Passenger { name: "Abel".to_string(), age: 34 },
                Passenger { name: "Sara".to_string(), age: 29 },
            ],
            seats: vec!["3".to_string(), "7".to_string()],
            total: 16,
            email: "abel@example.com".to_string(),
            phone: "0911000000".to_string(),
            payment: "telebirr".to_string(),
            status: BookingStatus::Valid,
            booked: Utc::now(),
        };

        let raw = serde_json::to_string(&booking).unwrap();
        let reloaded: Booking = serde_json::from_str(&raw).unwrap();
        assert_eq!(reloaded, booking);
    }
}
