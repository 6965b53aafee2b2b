// Catalog records, their creation payloads and partial-update patches

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Europe,
    Asia,
    #[serde(rename = "North America")]
    NorthAmerica,
    #[serde(rename = "South America")]
    SouthAmerica,
    Africa,
    Oceania,
}

impl Location {
    pub const ALL: [Location; 6] = [
        Location::Europe,
        Location::Asia,
        Location::NorthAmerica,
        Location::SouthAmerica,
        Location::Africa,
        Location::Oceania,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Europe => "Europe",
            Location::Asia => "Asia",
            Location::NorthAmerica => "North America",
            Location::SouthAmerica => "South America",
            Location::Africa => "Africa",
            Location::Oceania => "Oceania",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Location::ALL
            .into_iter()
            .find(|location| location.as_str() == s)
            .ok_or_else(|| format!("unknown location: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub rating: f64,
    pub price: f64,
    pub location: Location,
    pub activities: Vec<String>,
    pub tags: Vec<String>,
    pub featured: bool,
}

// Payload for create_destination. There is no `featured` field: new
// destinations always start unfeatured, and a `featured` key in incoming
// JSON is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDestination {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rating: f64,
    pub price: f64,
    pub location: Location,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewDestination {
    pub(crate) fn into_destination(self, id: String) -> Destination {
        Destination {
            id,
            name: self.name,
            description: self.description,
            image: self.image,
            rating: self.rating,
            price: self.price,
            location: self.location,
            activities: self.activities,
            tags: self.tags,
            featured: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DestinationPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub rating: Option<f64>,
    pub price: Option<f64>,
    pub location: Option<Location>,
    pub activities: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub featured: Option<bool>,
}

impl DestinationPatch {
    pub fn apply(self, target: &mut Destination) {
        if let Some(name) = self.name {
            target.name = name;
        }
        if let Some(description) = self.description {
            target.description = description;
        }
        if let Some(image) = self.image {
            target.image = image;
        }
        if let Some(rating) = self.rating {
            target.rating = rating;
        }
        if let Some(price) = self.price {
            target.price = price;
        }
        if let Some(location) = self.location {
            target.location = location;
        }
        if let Some(activities) = self.activities {
            target.activities = activities;
        }
        if let Some(tags) = self.tags {
            target.tags = tags;
        }
        if let Some(featured) = self.featured {
            target.featured = featured;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub destination_id: String,
    pub user_id: String,
    pub user_name: String,
    pub rating: u8,
    pub comment: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub destination_id: String,
    pub user_id: String,
    pub user_name: String,
    pub rating: u8,
    pub comment: String,
}

impl NewReview {
    pub(crate) fn into_review(self, id: String, date: NaiveDate) -> Review {
        Review {
            id,
            destination_id: self.destination_id,
            user_id: self.user_id,
            user_name: self.user_name,
            rating: self.rating,
            comment: self.comment,
            date,
        }
    }
}

// The creation date is not patchable
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewPatch {
    pub destination_id: Option<String>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub rating: Option<u8>,
    pub comment: Option<String>,
}

impl ReviewPatch {
    pub fn apply(self, target: &mut Review) {
        if let Some(destination_id) = self.destination_id {
            target.destination_id = destination_id;
        }
        if let Some(user_id) = self.user_id {
            target.user_id = user_id;
        }
        if let Some(user_name) = self.user_name {
            target.user_name = user_name;
        }
        if let Some(rating) = self.rating {
            target.rating = rating;
        }
        if let Some(comment) = self.comment {
            target.comment = comment;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Confirmed,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
        }
    }

    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        match (self, next) {
            (BookingStatus::Confirmed, _) => true,
            (BookingStatus::Completed, BookingStatus::Completed) => true,
            (BookingStatus::Completed, BookingStatus::Confirmed) => false,
        }
    }

    pub fn transition_to(self, next: BookingStatus) -> CatalogResult<BookingStatus> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(CatalogError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub destination_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub guests: u32,
    pub total_price: f64,
    pub status: BookingStatus,
}

// Payload for create_booking. Status is always `confirmed` on creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub user_id: String,
    pub destination_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub guests: u32,
    pub total_price: f64,
}

impl NewBooking {
    pub(crate) fn into_booking(self, id: String) -> Booking {
        Booking {
            id,
            user_id: self.user_id,
            destination_id: self.destination_id,
            start_date: self.start_date,
            end_date: self.end_date,
            guests: self.guests,
            total_price: self.total_price,
            status: BookingStatus::Confirmed,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingPatch {
    pub user_id: Option<String>,
    pub destination_id: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub guests: Option<u32>,
    pub total_price: Option<f64>,
    pub status: Option<BookingStatus>,
}

impl BookingPatch {
    // Fails without touching `target` when the status change is not allowed
    pub fn apply(self, target: &mut Booking) -> CatalogResult<()> {
        let status = match self.status {
            Some(next) => target.status.transition_to(next)?,
            None => target.status,
        };

        target.status = status;
        if let Some(user_id) = self.user_id {
            target.user_id = user_id;
        }
        if let Some(destination_id) = self.destination_id {
            target.destination_id = destination_id;
        }
        if let Some(start_date) = self.start_date {
            target.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            target.end_date = end_date;
        }
        if let Some(guests) = self.guests {
            target.guests = guests;
        }
        if let Some(total_price) = self.total_price {
            target.total_price = total_price;
        }
        Ok(())
    }
}

// A booking with its destination resolved inline. `destination` is only
// `None` under EnrichmentPolicy::MarkUnavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedBooking {
    #[serde(flatten)]
    pub booking: Booking,
    pub destination: Option<Destination>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
    pub success: bool,
    pub message: String,
}

impl Deleted {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(status: BookingStatus) -> Booking {
        Booking {
            id: "book-001".to_string(),
            user_id: "user123".to_string(),
            destination_id: "dest-001".to_string(),
            start_date: NaiveDate::from_ymd_opt(2023, 8, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2023, 8, 17).unwrap(),
            guests: 2,
            total_price: 2400.0,
            status,
        }
    }

    #[test]
    fn test_location_round_trips_display_names() {
        assert_eq!(
            "North America".parse::<Location>().unwrap(),
            Location::NorthAmerica
        );
        assert!("Atlantis".parse::<Location>().is_err());

        let json = serde_json::to_string(&Location::SouthAmerica).unwrap();
        assert_eq!(json, "\"South America\"");
    }

    #[test]
    fn test_new_destination_ignores_featured_key() {
        let payload = serde_json::json!({
            "name": "X",
            "price": 100,
            "location": "Europe",
            "featured": true
        });
        let data: NewDestination = serde_json::from_value(payload).unwrap();
        let destination = data.into_destination("dest-100".to_string());

        assert!(!destination.featured);
        assert_eq!(destination.price, 100.0);
    }

    #[test]
    fn test_destination_patch_only_touches_supplied_fields() {
        let mut destination = NewDestination {
            name: "Lisbon, Portugal".to_string(),
            description: "Hills and trams".to_string(),
            image: String::new(),
            rating: 4.4,
            price: 900.0,
            location: Location::Europe,
            activities: vec!["Tram 28".to_string()],
            tags: vec!["Historic".to_string()],
        }
        .into_destination("dest-050".to_string());
        let before = destination.clone();

        DestinationPatch {
            price: Some(999.0),
            ..Default::default()
        }
        .apply(&mut destination);

        assert_eq!(destination.price, 999.0);
        assert_eq!(
            Destination {
                price: before.price,
                ..destination
            },
            before
        );
    }

    #[test]
    fn test_status_transitions() {
        assert!(BookingStatus::Confirmed.can_transition_to(BookingStatus::Completed));
        assert!(BookingStatus::Confirmed.can_transition_to(BookingStatus::Confirmed));
        assert!(BookingStatus::Completed.can_transition_to(BookingStatus::Completed));
        assert!(!BookingStatus::Completed.can_transition_to(BookingStatus::Confirmed));
    }

    #[test]
    fn test_rejected_status_patch_leaves_booking_untouched() {
        let mut record = booking(BookingStatus::Completed);
        let before = record.clone();

        let res = BookingPatch {
            guests: Some(5),
            status: Some(BookingStatus::Confirmed),
            ..Default::default()
        }
        .apply(&mut record);

        assert_eq!(
            res,
            Err(CatalogError::InvalidTransition {
                from: BookingStatus::Completed,
                to: BookingStatus::Confirmed,
            })
        );
        assert_eq!(record, before);
    }

    #[test]
    fn test_booking_serializes_with_camel_case_fields() {
        let value = serde_json::to_value(booking(BookingStatus::Confirmed)).unwrap();

        assert_eq!(value["startDate"], "2023-08-10");
        assert_eq!(value["totalPrice"], 2400.0);
        assert_eq!(value["status"], "confirmed");
    }
}
