use rand::Rng;

use crate::entities::booking::FARE_PER_SEAT;
use crate::error::{AppError, AppResult};

/// Fixed bus layout size. Not configurable.
pub const SEAT_COUNT: u8 = 16;

/// Probability that a generated seat shows as already booked. The flag is
/// cosmetic: it is not derived from stored bookings and is never persisted.
const BOOKED_PROBABILITY: f64 = 0.2;

#[derive(Clone, Debug)]
pub struct Seat {
    pub number: u8,
    pub booked: bool,
    pub selected: bool,
}

/// The 16-seat selection model for one wizard session. At most `cap` seats
/// (the passenger count) can be selected at once, and a booked seat can
/// never become selected.
#[derive(Clone, Debug)]
pub struct SeatMap {
    seats: Vec<Seat>,
    cap: usize,
}

impl SeatMap {
    pub fn generate(cap: usize) -> Self {
        Self::generate_with(&mut rand::thread_rng(), cap)
    }

    pub fn generate_with<R: Rng>(rng: &mut R, cap: usize) -> Self {
        let seats = (1..=SEAT_COUNT)
            .map(|number| Seat {
                number,
                booked: rng.gen_bool(BOOKED_PROBABILITY),
                selected: false,
            })
            .collect();
        Self { seats, cap }
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Toggle one seat. Booked seats are ignored; selecting past the cap is
    /// a capacity error naming the cap.
    pub fn toggle(&mut self, number: u8) -> AppResult<()> {
        let cap = self.cap;
        let selected = self.selected_count();
        let Some(seat) = self.seats.iter_mut().find(|s| s.number == number) else {
            return Ok(());
        };

        if seat.booked {
            return Ok(());
        }

        if seat.selected {
            seat.selected = false;
        } else {
            if selected >= cap {
                return Err(AppError::SeatCapExceeded { cap });
            }
            seat.selected = true;
        }

        Ok(())
    }

    /// Change the cap to the new passenger count. Excess selections are
    /// dropped from the highest seat number down until the count fits.
    pub fn set_cap(&mut self, cap: usize) {
        self.cap = cap;
        let mut selected = self.selected_count();
        for seat in self.seats.iter_mut().rev() {
            if selected <= cap {
                break;
            }
            if seat.selected {
                seat.selected = false;
                selected -= 1;
            }
        }
    }

    pub fn selected_count(&self) -> usize {
        self.seats.iter().filter(|s| s.selected).count()
    }

    /// Selected seat labels in seat-number order.
    pub fn selected_labels(&self) -> Vec<String> {
        self.seats
            .iter()
            .filter(|s| s.selected)
            .map(|s| s.number.to_string())
            .collect()
    }

    pub fn total_price(&self) -> u32 {
        self.selected_count() as u32 * FARE_PER_SEAT
    }

    /// Make every seat selectable, so tests control availability.
    #[cfg(test)]
    pub(crate) fn clear_booked(&mut self) {
        for seat in &mut self.seats {
            seat.booked = false;
        }
    }
}
