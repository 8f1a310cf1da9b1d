use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use crate::error::FieldError;
use crate::i18n::Translator;

/// Earliest bookable minute of the day (10:00).
pub const OPENING_MINUTE: u32 = 600;
/// Latest bookable minute of the day (22:00), inclusive.
pub const CLOSING_MINUTE: u32 = 1320;
pub const PHONE_DIGITS: usize = 10;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email pattern compiles")
});

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]?[0-9]|2[0-3]):([0-5][0-9])$").expect("time pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Phone,
    Email,
    Date,
    Time,
}

impl Field {
    pub fn all() -> &'static [Field] {
        &[Field::Name, Field::Phone, Field::Email, Field::Date, Field::Time]
    }

    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Phone => "phone",
            Field::Email => "email",
            Field::Date => "date",
            Field::Time => "time",
        }
    }
}

/// Keeps ASCII digits only. Applied to the phone field on every input event.
pub fn filter_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Raw values currently typed into the booking form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub date: String,
    pub time: String,
}

impl FormValues {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Phone => &self.phone,
            Field::Email => &self.email,
            Field::Date => &self.date,
            Field::Time => &self.time,
        }
    }

    pub fn set(&mut self, field: Field, raw: &str) {
        match field {
            Field::Name => self.name = raw.to_string(),
            Field::Phone => self.phone = filter_digits(raw),
            Field::Email => self.email = raw.to_string(),
            Field::Date => self.date = raw.to_string(),
            Field::Time => self.time = raw.to_string(),
        }
    }

    pub fn clear(&mut self) {
        *self = FormValues::default();
    }
}

/// Per-field outcome of validating the whole form. A field without an entry
/// passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: BTreeMap<Field, FieldError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&self, field: Field) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    pub fn errors(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.errors.iter().map(|(f, e)| (*f, *e))
    }

    /// Translation key for the field's error, e.g. `validation.phone.invalid`.
    pub fn message_key(&self, field: Field) -> Option<String> {
        self.error(field)
            .map(|e| format!("validation.{}.{}", field.key(), e.key_suffix()))
    }

    pub fn message(&self, field: Field, translator: &dyn Translator) -> Option<String> {
        self.message_key(field).map(|key| translator.t(&key))
    }

    fn record<T>(&mut self, field: Field, outcome: Result<T, FieldError>) {
        if let Err(e) = outcome {
            self.errors.insert(field, e);
        }
    }
}

pub fn validate_name(raw: &str) -> Result<(), FieldError> {
    if raw.trim().is_empty() {
        return Err(FieldError::Required);
    }
    Ok(())
}

pub fn validate_email(raw: &str) -> Result<(), FieldError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    if !EMAIL_RE.is_match(value) {
        return Err(FieldError::InvalidFormat);
    }
    Ok(())
}

pub fn validate_phone(raw: &str) -> Result<(), FieldError> {
    if raw.is_empty() {
        return Err(FieldError::Required);
    }
    if raw.len() != PHONE_DIGITS || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(FieldError::InvalidFormat);
    }
    Ok(())
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// The date must be strictly after `today`.
pub fn validate_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, FieldError> {
    if raw.trim().is_empty() {
        return Err(FieldError::Required);
    }
    let date = parse_date(raw).ok_or(FieldError::InvalidFormat)?;
    if date <= today {
        return Err(FieldError::MustBeFuture);
    }
    Ok(date)
}

/// Parses 24-hour `H:MM` / `HH:MM`.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let caps = TIME_RE.captures(raw.trim())?;
    let hours = caps.get(1)?.as_str().parse().ok()?;
    let minutes = caps.get(2)?.as_str().parse().ok()?;
    NaiveTime::from_hms_opt(hours, minutes, 0)
}

pub fn minute_of_day(time: NaiveTime) -> u32 {
    use chrono::Timelike;
    time.hour() * 60 + time.minute()
}

pub fn validate_time(raw: &str) -> Result<NaiveTime, FieldError> {
    if raw.trim().is_empty() {
        return Err(FieldError::Required);
    }
    let time = parse_time(raw).ok_or(FieldError::InvalidFormat)?;
    if !(OPENING_MINUTE..=CLOSING_MINUTE).contains(&minute_of_day(time)) {
        return Err(FieldError::OutOfRange);
    }
    Ok(time)
}

/// Validates every field independently against the clock reading `now`.
pub fn validate(values: &FormValues, now: NaiveDateTime) -> ValidationResult {
    let mut result = ValidationResult::default();
    result.record(Field::Name, validate_name(&values.name));
    result.record(Field::Phone, validate_phone(&values.phone));
    result.record(Field::Email, validate_email(&values.email));
    result.record(Field::Date, validate_date(&values.date, now.date()));
    result.record(Field::Time, validate_time(&values.time));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .and_then(|d| d.and_hms_opt(15, 45, 0))
            .unwrap()
    }

    fn valid_values() -> FormValues {
        FormValues {
            name: "Alice".to_string(),
            phone: "0501234567".to_string(),
            email: "a@b.com".to_string(),
            date: "2026-10-17".to_string(),
            time: "14:30".to_string(),
        }
    }

    #[test]
    fn phone_input_keeps_digits_only() {
        let mut values = FormValues::default();
        for raw in ["050-123 4567", "+971 (50) 1234567", "abc", "٠١٢", "12\u{00a0}34"] {
            values.set(Field::Phone, raw);
            assert!(values.phone.chars().all(|c| c.is_ascii_digit()), "{:?}", values.phone);
        }
        values.set(Field::Phone, "050-123 4567");
        assert_eq!(values.phone, "0501234567");
    }

    #[test]
    fn phone_rules() {
        assert_eq!(validate_phone(""), Err(FieldError::Required));
        assert_eq!(validate_phone("123456789"), Err(FieldError::InvalidFormat));
        assert_eq!(validate_phone("12345678901"), Err(FieldError::InvalidFormat));
        assert_eq!(validate_phone("0501234567"), Ok(()));
    }

    #[test]
    fn name_must_not_be_blank() {
        assert_eq!(validate_name("   "), Err(FieldError::Required));
        assert_eq!(validate_name(" Alice "), Ok(()));
    }

    #[test]
    fn email_rules() {
        assert_eq!(validate_email(""), Err(FieldError::Required));
        assert_eq!(validate_email("alice"), Err(FieldError::InvalidFormat));
        assert_eq!(validate_email("alice@"), Err(FieldError::InvalidFormat));
        assert_eq!(validate_email("alice@example"), Err(FieldError::InvalidFormat));
        assert_eq!(validate_email("a b@c.com"), Err(FieldError::InvalidFormat));
        assert_eq!(validate_email("a@b.com"), Ok(()));
        assert_eq!(validate_email("first.last+tag@mail.example.ae"), Ok(()));
    }

    #[test]
    fn time_window_is_inclusive() {
        assert_eq!(validate_time("09:59"), Err(FieldError::OutOfRange));
        assert!(validate_time("10:00").is_ok());
        assert!(validate_time("22:00").is_ok());
        assert_eq!(validate_time("22:01"), Err(FieldError::OutOfRange));
        assert_eq!(validate_time("9:00"), Err(FieldError::OutOfRange));
    }

    #[test]
    fn time_format_rules() {
        assert_eq!(validate_time(""), Err(FieldError::Required));
        assert_eq!(validate_time("24:00"), Err(FieldError::InvalidFormat));
        assert_eq!(validate_time("12:60"), Err(FieldError::InvalidFormat));
        assert_eq!(validate_time("2pm"), Err(FieldError::InvalidFormat));
        assert_eq!(minute_of_day(validate_time("14:30").unwrap()), 870);
    }

    #[test]
    fn date_must_be_after_today() {
        let today = now().date();
        let tomorrow = today + Duration::days(1);
        let yesterday = today - Duration::days(1);
        assert_eq!(validate_date(&today.to_string(), today), Err(FieldError::MustBeFuture));
        assert_eq!(validate_date(&yesterday.to_string(), today), Err(FieldError::MustBeFuture));
        assert_eq!(validate_date(&tomorrow.to_string(), today), Ok(tomorrow));
        assert_eq!(validate_date("", today), Err(FieldError::Required));
        assert_eq!(validate_date("2026-13-01", today), Err(FieldError::InvalidFormat));
    }

    #[test]
    fn result_changes_with_the_clock() {
        let values = valid_values();
        assert!(validate(&values, now()).is_valid());

        let next_day = now() + Duration::days(1);
        let later = validate(&values, next_day);
        assert_eq!(later.error(Field::Date), Some(FieldError::MustBeFuture));
    }

    #[test]
    fn every_failing_field_reports_its_own_error() {
        let result = validate(&FormValues::default(), now());
        assert!(!result.is_valid());
        for field in Field::all() {
            assert_eq!(result.error(*field), Some(FieldError::Required));
        }
        assert_eq!(result.message_key(Field::Phone).as_deref(), Some("validation.phone.required"));
    }

    #[test]
    fn one_bad_field_does_not_hide_others() {
        let mut values = valid_values();
        values.time = "23:00".to_string();
        values.email = "nope".to_string();
        let result = validate(&values, now());
        assert_eq!(result.errors().count(), 2);
        assert_eq!(result.message_key(Field::Time).as_deref(), Some("validation.time.range"));
        assert_eq!(result.message_key(Field::Email).as_deref(), Some("validation.email.invalid"));
        assert_eq!(result.error(Field::Name), None);
    }
}
