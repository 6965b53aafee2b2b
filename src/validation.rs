// Form validation for booking requests and review drafts.
//
// The store accepts whatever it is given; these checks run on the caller's
// side before a create call, and turn a valid form plus the signed-in user
// into the store's creation payload.

use std::{collections::BTreeMap, fmt};

use chrono::NaiveDate;
use thiserror::Error;

use crate::{
    booking,
    models::{Destination, NewBooking, NewReview},
    session::User,
};

pub const MIN_GUESTS: u32 = 1;
pub const MAX_GUESTS: u32 = 10;
pub const MIN_COMMENT_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    User,
    StartDate,
    EndDate,
    Guests,
    Comment,
    Rating,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::User => "user",
            Field::StartDate => "startDate",
            Field::EndDate => "endDate",
            Field::Guests => "guests",
            Field::Comment => "comment",
            Field::Rating => "rating",
        };
        f.write_str(name)
    }
}

// One message per field; a later check on the same field replaces the earlier
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("validation failed: {}", summary(.errors))]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
    fn set(&mut self, field: Field, message: &str) {
        self.errors.insert(field, message.to_string());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn summary(errors: &BTreeMap<Field, String>) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub guests: u32,
}

impl BookingForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.start_date.is_none() {
            errors.set(Field::StartDate, "Start date is required");
        }
        if self.end_date.is_none() {
            errors.set(Field::EndDate, "End date is required");
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                errors.set(Field::EndDate, "End date must be after start date");
            }
        }

        if self.guests < MIN_GUESTS {
            errors.set(Field::Guests, "Minimum 1 guest required");
        }
        if self.guests > MAX_GUESTS {
            errors.set(Field::Guests, "Maximum 10 guests allowed");
        }

        errors.into_result()
    }

    // Checks the form and prices the stay. Requires a signed-in user.
    pub fn into_new_booking(
        self,
        user: Option<&User>,
        destination: &Destination,
    ) -> Result<NewBooking, ValidationErrors> {
        let Some(user) = user else {
            let mut errors = ValidationErrors::default();
            errors.set(Field::User, "Please log in to book this trip");
            return Err(errors);
        };

        self.validate()?;
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Ok(booking::new_booking(
                &user.id,
                destination,
                start,
                end,
                self.guests,
            )),
            // validate() already rejected missing dates
            _ => Err(ValidationErrors::default()),
        }
    }
}

// `rating` 0 means no star has been selected yet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    pub rating: u8,
    pub comment: String,
}

impl ReviewDraft {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let comment = self.comment.trim();
        if comment.is_empty() {
            errors.set(Field::Comment, "Please enter your review");
        } else if comment.chars().count() < MIN_COMMENT_CHARS {
            errors.set(Field::Comment, "Review must be at least 10 characters");
        }

        if !(1..=5).contains(&self.rating) {
            errors.set(Field::Rating, "Please select a rating");
        }

        errors.into_result()
    }

    // Stamps the reviewer's id and current name onto the review
    pub fn into_new_review(
        self,
        user: Option<&User>,
        destination_id: &str,
    ) -> Result<NewReview, ValidationErrors> {
        let Some(user) = user else {
            let mut errors = ValidationErrors::default();
            errors.set(Field::User, "You must be logged in to submit a review");
            return Err(errors);
        };

        self.validate()?;
        Ok(NewReview {
            destination_id: destination_id.to_string(),
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            rating: self.rating,
            comment: self.comment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn user() -> User {
        User {
            id: "user123".to_string(),
            name: "John Doe".to_string(),
            email: "user@example.com".to_string(),
            role: "user".to_string(),
        }
    }

    #[test]
    fn test_empty_booking_form_reports_every_field() {
        let errors = BookingForm::default().validate().unwrap_err();

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(Field::StartDate), Some("Start date is required"));
        assert_eq!(errors.get(Field::EndDate), Some("End date is required"));
        assert_eq!(errors.get(Field::Guests), Some("Minimum 1 guest required"));
    }

    #[test]
    fn test_booking_form_date_order_and_guest_cap() {
        let form = BookingForm {
            start_date: Some(date(2024, 5, 10)),
            end_date: Some(date(2024, 5, 1)),
            guests: 11,
        };
        let errors = form.validate().unwrap_err();

        assert_eq!(
            errors.get(Field::EndDate),
            Some("End date must be after start date")
        );
        assert_eq!(errors.get(Field::Guests), Some("Maximum 10 guests allowed"));
        assert_eq!(errors.get(Field::StartDate), None);

        let same_day = BookingForm {
            start_date: Some(date(2024, 5, 1)),
            end_date: Some(date(2024, 5, 1)),
            guests: 10,
        };
        assert!(same_day.validate().is_ok());
    }

    #[test]
    fn test_booking_form_into_new_booking() {
        let kyoto = seed::destinations().remove(2);
        let form = BookingForm {
            start_date: Some(date(2024, 4, 1)),
            end_date: Some(date(2024, 4, 5)),
            guests: 2,
        };

        let logged_out = form.clone().into_new_booking(None, &kyoto).unwrap_err();
        assert_eq!(
            logged_out.get(Field::User),
            Some("Please log in to book this trip")
        );

        let booking = form.into_new_booking(Some(&user()), &kyoto).unwrap();
        assert_eq!(booking.user_id, "user123");
        assert_eq!(booking.destination_id, "dest-003");
        assert_eq!(booking.total_price, 12000.0);
    }

    #[test]
    fn test_review_draft_rules() {
        let empty = ReviewDraft {
            rating: 0,
            comment: "   ".to_string(),
        };
        let errors = empty.validate().unwrap_err();
        assert_eq!(errors.get(Field::Comment), Some("Please enter your review"));
        assert_eq!(errors.get(Field::Rating), Some("Please select a rating"));

        let short = ReviewDraft {
            rating: 4,
            comment: "  too short  ".to_string(),
        };
        assert_eq!(
            short.validate().unwrap_err().get(Field::Comment),
            Some("Review must be at least 10 characters")
        );

        let out_of_range = ReviewDraft {
            rating: 6,
            comment: "Ten chars!".to_string(),
        };
        let errors = out_of_range.validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![Field::Rating]);
    }

    #[test]
    fn test_review_draft_into_new_review() {
        let draft = ReviewDraft {
            rating: 5,
            comment: "Unforgettable sunsets every evening.".to_string(),
        };

        assert!(draft.clone().into_new_review(None, "dest-004").is_err());

        let review = draft.into_new_review(Some(&user()), "dest-004").unwrap();
        assert_eq!(review.user_name, "John Doe");
        assert_eq!(review.destination_id, "dest-004");
        assert_eq!(review.rating, 5);
    }

    #[test]
    fn test_error_message_lists_fields() {
        let errors = BookingForm {
            start_date: None,
            end_date: Some(date(2024, 1, 2)),
            guests: 1,
        }
        .validate()
        .unwrap_err();

        assert_eq!(
            errors.to_string(),
            "validation failed: startDate: Start date is required"
        );
    }
}
