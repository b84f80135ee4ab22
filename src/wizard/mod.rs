pub mod seats;

use chrono::Utc;
use rand::Rng;

use crate::entities::booking::{Booking, BookingStatus, Passenger, SearchDraft};
use crate::error::{AppError, AppResult};
use crate::store::{SEARCH_KEY, Store};
use crate::tickets;
use crate::utils::query;
use seats::SeatMap;

/// The four wizard steps plus the terminal confirmation state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    RouteDate,
    Seats,
    Passengers,
    Review,
    Confirmed,
}

/// Outcome of a successful `next()` transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advance {
    Moved(Step),
    /// Finalized: the new booking id, for display.
    Confirmed(String),
}

#[derive(Clone, Debug, Default)]
pub struct PassengerForm {
    pub name: String,
    pub age: String,
}

/// Raw form state accumulated across the steps.
#[derive(Clone, Debug)]
pub struct BookingForm {
    pub from: String,
    pub to: String,
    pub date: String,
    pub time: String,
    pub passengers: u32,
    pub passenger_forms: Vec<PassengerForm>,
    pub email: String,
    pub phone: String,
    pub payment: String,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self {
            from: String::new(),
            to: String::new(),
            date: String::new(),
            time: String::new(),
            passengers: 1,
            passenger_forms: Vec::new(),
            email: String::new(),
            phone: String::new(),
            payment: String::new(),
        }
    }
}

/// Review summary derived from current form state on entry to the final
/// step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub route: String,
    pub date: String,
    pub time: String,
    pub passengers: u32,
    pub seats: String,
    pub total: u32,
}

/// Validate and persist a quick-search draft, the landing-page entry point
/// into the wizard.
pub fn quick_search(store: &mut dyn Store, draft: &SearchDraft) -> AppResult<()> {
    if draft.from.trim().is_empty() || draft.to.trim().is_empty() || draft.date.trim().is_empty() {
        return Err(AppError::Validation("Please fill all fields".to_string()));
    }
    if draft.from == draft.to {
        return Err(AppError::Validation("From and To cannot be same".to_string()));
    }
    store.set(SEARCH_KEY, serde_json::to_value(draft)?)
}

/// The 4-step booking flow: Route & Date, Seats, Passengers, Review. Each
/// `next()` validates the current step and reports the first offending field
/// in declaration order; `prev()` never validates and loses no data.
pub struct Wizard {
    step: Step,
    pub form: BookingForm,
    pub seat_map: SeatMap,
    confirmed_id: Option<String>,
}

impl Wizard {
    /// Start a session, prefilled from the stored search draft; query-string
    /// `from`/`to` parameters override the draft. The seat layout is
    /// generated once per session.
    pub fn start(store: &dyn Store, query_string: &str) -> Self {
        Self::start_with(&mut rand::thread_rng(), store, query_string)
    }

    pub fn start_with<R: Rng>(rng: &mut R, store: &dyn Store, query_string: &str) -> Self {
        let mut form = BookingForm::default();

        if let Some(raw) = store.get(SEARCH_KEY) {
            match serde_json::from_value::<SearchDraft>(raw) {
                Ok(draft) => {
                    form.from = draft.from;
                    form.to = draft.to;
                    form.date = draft.date;
                }
                Err(err) => {
                    tracing::warn!("Search draft unreadable, ignoring: {}", err);
                }
            }
        }

        let pairs = query::parse(query_string);
        if let Some(from) = query::get(&pairs, "from") {
            form.from = from.to_string();
        }
        if let Some(to) = query::get(&pairs, "to") {
            form.to = to.to_string();
        }

        let cap = form.passengers as usize;
        Self {
            step: Step::RouteDate,
            form,
            seat_map: SeatMap::generate_with(rng, cap),
            confirmed_id: None,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn confirmed_id(&self) -> Option<&str> {
        self.confirmed_id.as_deref()
    }

    /// Change the passenger count. The seat cap follows it, trimming any
    /// excess selection from the highest seat number down.
    pub fn set_passengers(&mut self, count: u32) {
        self.form.passengers = count;
        self.seat_map.set_cap(count as usize);
    }

    pub fn toggle_seat(&mut self, number: u8) -> AppResult<()> {
        self.seat_map.toggle(number)
    }

    /// Advance one step. Step validation failures leave the wizard in place;
    /// `next()` from the review step finalizes the booking.
    pub fn next(&mut self, store: &mut dyn Store) -> AppResult<Advance> {
        match self.step {
            Step::RouteDate => {
                self.validate_route_date()?;
                self.step = Step::Seats;
            }
            Step::Seats => {
                self.validate_seats()?;
                self.step = Step::Passengers;
                // One form per passenger; existing entries survive.
                self.form
                    .passenger_forms
                    .resize_with(self.form.passengers as usize, PassengerForm::default);
            }
            Step::Passengers => {
                self.validate_passengers()?;
                self.step = Step::Review;
            }
            Step::Review => {
                let id = self.finalize(store)?;
                self.step = Step::Confirmed;
                self.confirmed_id = Some(id.clone());
                return Ok(Advance::Confirmed(id));
            }
            Step::Confirmed => return Ok(Advance::Confirmed(
                self.confirmed_id.clone().unwrap_or_default(),
            )),
        }
        tracing::debug!("Wizard advanced to {:?}", self.step);
        Ok(Advance::Moved(self.step))
    }

    /// Step back one. No validation, no data loss; seat selection persists.
    pub fn prev(&mut self) {
        self.step = match self.step {
            Step::RouteDate | Step::Confirmed => return,
            Step::Seats => Step::RouteDate,
            Step::Passengers => Step::Seats,
            Step::Review => Step::Passengers,
        };
        tracing::debug!("Wizard returned to {:?}", self.step);
    }

    fn validate_route_date(&self) -> AppResult<()> {
        let required = [
            (&self.form.from, "From"),
            (&self.form.to, "To"),
            (&self.form.date, "Travel Date"),
            (&self.form.time, "Travel Time"),
        ];
        for (value, label) in required {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("Please fill: {label}")));
            }
        }
        if self.form.passengers == 0 {
            return Err(AppError::Validation("Please fill: Passengers".to_string()));
        }
        if self.form.from == self.form.to {
            return Err(AppError::Validation("From and To cannot be same".to_string()));
        }
        Ok(())
    }

    fn validate_seats(&self) -> AppResult<()> {
        let selected = self.seat_map.selected_count();
        let passengers = self.form.passengers as usize;
        if selected != passengers {
            return Err(AppError::Validation(format!(
                "Please select exactly {passengers} seat(s)"
            )));
        }
        Ok(())
    }

    fn validate_passengers(&self) -> AppResult<()> {
        for (i, passenger) in self.form.passenger_forms.iter().enumerate() {
            let n = i + 1;
            if passenger.name.trim().is_empty() {
                return Err(AppError::Validation(format!(
                    "Please fill: Passenger {n} Full Name"
                )));
            }
            if passenger.age.trim().is_empty() {
                return Err(AppError::Validation(format!(
                    "Please fill: Passenger {n} Age"
                )));
            }
            if passenger.age.trim().parse::<u32>().map(|a| a == 0).unwrap_or(true) {
                return Err(AppError::Validation(format!(
                    "Passenger {n} Age must be a positive number"
                )));
            }
        }
        Ok(())
    }

    pub fn summary(&self) -> Summary {
        let labels = self.seat_map.selected_labels();
        Summary {
            route: format!("{} -> {}", self.form.from, self.form.to),
            date: self.form.date.clone(),
            time: self.form.time.clone(),
            passengers: self.form.passengers,
            seats: if labels.is_empty() {
                "Not selected".to_string()
            } else {
                labels.join(", ")
            },
            total: self.seat_map.total_price(),
        }
    }

    /// Build the booking record, append it to the ticket repository and
    /// clear the search draft.
    fn finalize(&mut self, store: &mut dyn Store) -> AppResult<String> {
        let now = Utc::now();
        let id = Booking::generate_id(now);

        let passenger_data = self
            .form
            .passenger_forms
            .iter()
            .map(|p| {
                let age = p.age.trim().parse::<u32>().map_err(|_| {
                    AppError::Validation("Passenger age must be a number".to_string())
                })?;
                Ok(Passenger {
                    name: p.name.trim().to_string(),
                    age,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        let booking = Booking {
            id: id.clone(),
            from: self.form.from.clone(),
            to: self.form.to.clone(),
            date: self.form.date.clone(),
            time: self.form.time.clone(),
            passengers: self.form.passengers,
            passenger_data,
            seats: self.seat_map.selected_labels(),
            total: self.seat_map.total_price(),
            email: self.form.email.clone(),
            phone: self.form.phone.clone(),
            payment: self.form.payment.clone(),
            status: BookingStatus::Valid,
            booked: now,
        };

        tickets::append(store, booking)?;
        store.remove(SEARCH_KEY)?;
        Ok(id)
    }
}
