// Booking price quotes and read-time classification of bookings

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Booking, BookingStatus, Destination, EnrichedBooking, NewBooking};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub nights: u32,
    pub guests: u32,
    pub price_per_night: f64,
    pub total_price: f64,
}

// Destination prices are per guest per night. A stay is charged at least one
// night, even when the end date is not after the start date.
pub fn quote(destination: &Destination, start: NaiveDate, end: NaiveDate, guests: u32) -> Quote {
    let nights = (end - start).num_days().clamp(1, i64::from(u32::MAX)) as u32;
    let price_per_night = destination.price * f64::from(guests);

    Quote {
        nights,
        guests,
        price_per_night,
        total_price: price_per_night * f64::from(nights),
    }
}

// Creation payload for a stay at `destination`, priced with `quote`
pub fn new_booking(
    user_id: &str,
    destination: &Destination,
    start: NaiveDate,
    end: NaiveDate,
    guests: u32,
) -> NewBooking {
    NewBooking {
        user_id: user_id.to_string(),
        destination_id: destination.id.clone(),
        start_date: start,
        end_date: end,
        guests,
        total_price: quote(destination, start, end, guests).total_price,
    }
}

// Where a booking sits relative to `today`. Never persisted: a confirmed
// booking whose dates have passed still reads as Past. Dates mark midnight,
// so a stay is already Past on its end day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Timeline {
    Upcoming,
    InProgress,
    Past,
}

impl Timeline {
    pub fn of(booking: &Booking, today: NaiveDate) -> Self {
        if booking.start_date > today && booking.status == BookingStatus::Confirmed {
            Timeline::Upcoming
        } else if booking.end_date <= today || booking.status == BookingStatus::Completed {
            Timeline::Past
        } else {
            Timeline::InProgress
        }
    }
}

pub fn upcoming(bookings: &[EnrichedBooking], today: NaiveDate) -> Vec<EnrichedBooking> {
    with_timeline(bookings, today, Timeline::Upcoming)
}

pub fn past(bookings: &[EnrichedBooking], today: NaiveDate) -> Vec<EnrichedBooking> {
    with_timeline(bookings, today, Timeline::Past)
}

fn with_timeline(
    bookings: &[EnrichedBooking],
    today: NaiveDate,
    timeline: Timeline,
) -> Vec<EnrichedBooking> {
    bookings
        .iter()
        .filter(|entry| Timeline::of(&entry.booking, today) == timeline)
        .cloned()
        .collect()
}
