//! Appointment booking pipeline: validate the form, format a WhatsApp
//! message, and hand it to the messaging app.

pub mod controller;
pub mod dispatch;
pub mod message;
pub mod validation;

use chrono::NaiveDateTime;

use validation::{FormValues, ValidationResult};

/// A booking that passed every field rule at `now`. Only built through
/// [`AppointmentRequest::from_form`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentRequest {
    name: String,
    phone: String,
    email: String,
    date: String,
    time: String,
}

impl AppointmentRequest {
    pub fn from_form(values: &FormValues, now: NaiveDateTime) -> Result<Self, ValidationResult> {
        let result = validation::validate(values, now);
        if !result.is_valid() {
            return Err(result);
        }
        Ok(Self {
            name: values.name.trim().to_string(),
            phone: values.phone.clone(),
            email: values.email.trim().to_string(),
            date: values.date.trim().to_string(),
            time: values.time.trim().to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// `YYYY-MM-DD` as entered.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// `HH:MM` as entered.
    pub fn time(&self) -> &str {
        &self.time
    }
}
