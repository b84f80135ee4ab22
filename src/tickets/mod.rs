use serde_json::Value;

use crate::entities::booking::{Booking, BookingStatus};
use crate::error::AppResult;
use crate::store::{BOOKINGS_KEY, Store};

/// Status restriction for [`list`]. `All` applies none.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Valid,
    Used,
}

impl StatusFilter {
    fn matches(self, status: BookingStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Valid => status == BookingStatus::Valid,
            StatusFilter::Used => status == BookingStatus::Used,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ListQuery {
    pub filter: StatusFilter,
    pub search: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TicketStats {
    pub total: usize,
    pub valid: usize,
    pub used: usize,
}

/// Every record under the `bookings` key, in stored order. An absent or
/// unreadable list is treated as empty.
pub fn load_all(store: &dyn Store) -> Vec<Booking> {
    let Some(raw) = store.get(BOOKINGS_KEY) else {
        return Vec::new();
    };
    match serde_json::from_value(raw) {
        Ok(bookings) => bookings,
        Err(err) => {
            tracing::warn!("Stored booking list unreadable, treating as empty: {}", err);
            Vec::new()
        }
    }
}

fn save_all(store: &mut dyn Store, bookings: &[Booking]) -> AppResult<()> {
    let raw: Value = serde_json::to_value(bookings)?;
    store.set(BOOKINGS_KEY, raw)
}

/// Append one booking: whole-list read, push, whole-list write-back.
pub fn append(store: &mut dyn Store, booking: Booking) -> AppResult<()> {
    let mut bookings = load_all(store);
    tracing::info!("Booking {} created: {} -> {}", booking.id, booking.from, booking.to);
    bookings.push(booking);
    save_all(store, &bookings)
}

/// All bookings sorted by creation time descending, optionally restricted by
/// status and by a case-insensitive substring search over the rendered
/// ticket text.
pub fn list(store: &dyn Store, query: &ListQuery) -> Vec<Booking> {
    let mut bookings = load_all(store);
    bookings.sort_by(|a, b| b.booked.cmp(&a.booked));

    bookings.retain(|b| query.filter.matches(b.status));

    if let Some(term) = query.search.as_deref() {
        let term = term.to_lowercase();
        bookings.retain(|b| card_text(b).to_lowercase().contains(&term));
    }

    bookings
}

/// One booking by its stable id.
pub fn get(store: &dyn Store, id: &str) -> Option<Booking> {
    load_all(store).into_iter().find(|b| b.id == id)
}

/// Transition one booking `valid` -> `used`. Returns whether a transition
/// happened; unknown ids and already-used tickets mutate nothing. There is
/// no path back to `valid`. Callers must confirm with the user first.
pub fn mark_used(store: &mut dyn Store, id: &str) -> AppResult<bool> {
    let mut bookings = load_all(store);

    let Some(booking) = bookings.iter_mut().find(|b| b.id == id) else {
        return Ok(false);
    };
    if booking.status == BookingStatus::Used {
        return Ok(false);
    }

    booking.status = BookingStatus::Used;
    tracing::info!("Ticket {} marked used", id);
    save_all(store, &bookings)?;
    Ok(true)
}

pub fn stats(store: &dyn Store) -> TicketStats {
    let bookings = load_all(store);
    let valid = bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Valid)
        .count();
    TicketStats {
        total: bookings.len(),
        valid,
        used: bookings.len() - valid,
    }
}

/// The ticket-card text, also the corpus for the list search.
pub fn card_text(booking: &Booking) -> String {
    let seats = if booking.seats.is_empty() {
        "Not selected".to_string()
    } else {
        booking.seats.join(", ")
    };
    format!(
        "{} -> {}\n{} at {}\n{}\nBooking ID: {}\nSeats: {}\nPassengers: {}\nTotal: ETB {}",
        booking.from,
        booking.to,
        booking.date,
        booking.time,
        booking.status,
        booking.id,
        seats,
        booking.passengers,
        booking.total,
    )
}

/// Full detail view: the card plus passenger, contact and payment lines.
pub fn detail_text(booking: &Booking) -> String {
    let mut out = card_text(booking);
    out.push_str("\nPassenger Details:");
    for p in &booking.passenger_data {
        out.push_str(&format!("\n- {} (Age: {})", p.name, p.age));
    }
    out.push_str(&format!(
        "\nEmail: {}\nPhone: {}\nPayment: {}\nBooked on: {}",
        booking.email,
        booking.phone,
        booking.payment,
        booking.booked.format("%Y-%m-%d %H:%M:%S UTC"),
    ));
    out
}

/// Printable boarding-pass document for one ticket.
pub fn print_view(booking: &Booking) -> String {
    format!(
        "==============================\n\
         Addis Metro\n\
         Bus Ticket\n\
         ==============================\n\
         Booking ID: {}\n\
         Route: {} -> {}\n\
         Date: {}\n\
         Time: {}\n\
         Seats: {}\n\
         Passengers: {}\n\
         ------------------------------\n\
         [QR] {}\n\
         Present this ticket when boarding\n\
         ==============================",
        booking.id,
        booking.from,
        booking.to,
        booking.date,
        booking.time,
        booking.seats.join(", "),
        booking.passengers,
        booking.id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::booking::Passenger;
    use crate::store::MemoryStore;
    use chrono::{Duration, Utc};

    fn booking(id: &str, to: &str, minutes_ago: i64) -> Booking {
        Booking {
            id: id.to_string(),
            from: "Piazza Station".to_string(),
            to: to.to_string(),
            date: "2026-09-01".to_string(),
            time: "08:00".to_string(),
            passengers: 1,
            passenger_data: vec![Passenger { name: "Abel".to_string(), age: 34 }],
            seats: vec!["3".to_string()],
            total: 8,
            email: "abel@example.com".to_string(),
            phone: "0911000000".to_string(),
            payment: "telebirr".to_string(),
            status: BookingStatus::Valid,
            booked: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        let store = MemoryStore::new();
        assert!(list(&store, &ListQuery::default()).is_empty());
        assert_eq!(stats(&store), TicketStats { total: 0, valid: 0, used: 0 });
    }

    #[test]
    fn test_append_puts_new_booking_first() {
        let mut store = MemoryStore::new();
        append(&mut store, booking("ADD00000001", "Bole Station", 60)).unwrap();
        append(&mut store, booking("ADD00000002", "Saris Station", 0)).unwrap();

        let listed = list(&store, &ListQuery::default());
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, "ADD00000002");
        assert_eq!(
            listed.iter().filter(|b| b.id == "ADD00000002").count(),
            1
        );
    }

    #[test]
    fn test_status_filter() {
        let mut store = MemoryStore::new();
        append(&mut store, booking("ADD00000001", "Bole Station", 60)).unwrap();
        append(&mut store, booking("ADD00000002", "Saris Station", 0)).unwrap();
        mark_used(&mut store, "ADD00000001").unwrap();

        let valid = list(&store, &ListQuery { filter: StatusFilter::Valid, search: None });
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].id, "ADD00000002");

        let used = list(&store, &ListQuery { filter: StatusFilter::Used, search: None });
        assert_eq!(used.len(), 1);
        assert_eq!(used[0].id, "ADD00000001");
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let mut store = MemoryStore::new();
        append(&mut store, booking("ADD00000001", "Bole Station", 0)).unwrap();
        append(&mut store, booking("ADD00000002", "Saris Station", 5)).unwrap();

        let query = ListQuery {
            filter: StatusFilter::All,
            search: Some("bole".to_string()),
        };
        let found = list(&store, &query);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].to, "Bole Station");
    }

    #[test]
    fn test_mark_used_is_one_way() {
        let mut store = MemoryStore::new();
        append(&mut store, booking("ADD00000001", "Bole Station", 0)).unwrap();

        assert!(mark_used(&mut store, "ADD00000001").unwrap());
        assert_eq!(get(&store, "ADD00000001").unwrap().status, BookingStatus::Used);

        // Second transition attempt mutates nothing.
        assert!(!mark_used(&mut store, "ADD00000001").unwrap());
        assert_eq!(get(&store, "ADD00000001").unwrap().status, BookingStatus::Used);
    }

    #[test]
    fn test_mark_used_unknown_id_is_noop() {
        let mut store = MemoryStore::new();
        append(&mut store, booking("ADD00000001", "Bole Station", 0)).unwrap();

        assert!(!mark_used(&mut store, "ADD99999999").unwrap());
        assert_eq!(stats(&store).valid, 1);
    }

    #[test]
    fn test_get_unknown_id_is_none() {
        let store = MemoryStore::new();
        assert!(get(&store, "ADD00000001").is_none());
    }

    #[test]
    fn test_stored_booking_roundtrips_identically() {
        let mut store = MemoryStore::new();
        let original = booking("ADD00000001", "Bole Station", 0);
        append(&mut store, original.clone()).unwrap();

        let reloaded = get(&store, "ADD00000001").unwrap();
        assert_eq!(reloaded, original);
    }
}
