use chrono::NaiveDateTime;
use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;

use crate::booking::dispatch::{dispatch, FallbackChain, Navigator};
use crate::booking::message::{format_message, MessageLabels};
use crate::booking::validation::{validate, Field, FormValues, ValidationResult};
use crate::booking::AppointmentRequest;
use crate::error::BookingError;
use crate::i18n::Translator;
use crate::notify::{NoticeKind, Notifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Success,
    Failed,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// A submission was already in flight.
    Ignored,
    Invalid(ValidationResult),
    /// Handed off; the chain still has to run on a timer.
    Sent(FallbackChain),
    Failed(BookingError),
}

/// Everything one submission needs from the outside world.
pub struct SubmitContext<'a> {
    pub now: NaiveDateTime,
    pub number: &'a str,
    pub labels: &'a MessageLabels,
    pub translator: &'a dyn Translator,
    pub navigator: &'a dyn Navigator,
    pub notifier: &'a dyn Notifier,
}

/// Form state plus the in-flight guard for one booking form.
#[derive(Debug)]
pub struct SubmissionController {
    values: RefCell<FormValues>,
    touched: RefCell<BTreeSet<Field>>,
    in_flight: Cell<bool>,
    state: Cell<SubmissionState>,
}

/// Clears the in-flight flag and returns to `Idle` however the submission ends.
struct InFlight<'a> {
    controller: &'a SubmissionController,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.controller.in_flight.set(false);
        self.controller.state.set(SubmissionState::Idle);
    }
}

impl Default for SubmissionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionController {
    pub fn new() -> Self {
        Self {
            values: RefCell::new(FormValues::default()),
            touched: RefCell::new(BTreeSet::new()),
            in_flight: Cell::new(false),
            state: Cell::new(SubmissionState::Idle),
        }
    }

    pub fn values(&self) -> FormValues {
        self.values.borrow().clone()
    }

    /// Stores a keystroke and returns the value actually kept (digits only
    /// for the phone field).
    pub fn update(&self, field: Field, raw: &str) -> String {
        let mut values = self.values.borrow_mut();
        values.set(field, raw);
        self.touched.borrow_mut().insert(field);
        values.get(field).to_string()
    }

    /// Puts back values saved before a submit, for a hand-off that only
    /// failed after the form was cleared.
    pub fn restore(&self, values: FormValues) {
        *self.values.borrow_mut() = values;
    }

    pub fn touch(&self, field: Field) {
        self.touched.borrow_mut().insert(field);
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.borrow().contains(&field)
    }

    pub fn validate(&self, now: NaiveDateTime) -> ValidationResult {
        validate(&self.values.borrow(), now)
    }

    pub fn state(&self) -> SubmissionState {
        self.state.get()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.get()
    }

    pub fn can_submit(&self, now: NaiveDateTime) -> bool {
        !self.is_submitting() && self.validate(now).is_valid()
    }

    fn begin(&self) -> InFlight<'_> {
        self.in_flight.set(true);
        self.state.set(SubmissionState::Submitting);
        InFlight { controller: self }
    }

    pub fn submit(&self, ctx: &SubmitContext<'_>) -> SubmitOutcome {
        if self.in_flight.get() {
            log::debug!("Ignoring submit, a booking is already in flight");
            return SubmitOutcome::Ignored;
        }

        let values = self.values();
        let request = match AppointmentRequest::from_form(&values, ctx.now) {
            Ok(request) => request,
            Err(result) => {
                self.touched.borrow_mut().extend(Field::all().iter().copied());
                return SubmitOutcome::Invalid(result);
            }
        };

        let _in_flight = self.begin();
        match Self::hand_off(&request, ctx) {
            Ok(chain) => {
                self.state.set(SubmissionState::Success);
                self.values.borrow_mut().clear();
                self.touched.borrow_mut().clear();
                ctx.notifier.notify(NoticeKind::Success, &ctx.translator.t("notify.success"));
                SubmitOutcome::Sent(chain)
            }
            Err(e) => {
                log::error!("Booking submission failed: {}", e);
                self.state.set(SubmissionState::Failed);
                ctx.notifier.notify(NoticeKind::Error, &ctx.translator.t("notify.error"));
                SubmitOutcome::Failed(e)
            }
        }
    }

    fn hand_off(request: &AppointmentRequest, ctx: &SubmitContext<'_>) -> Result<FallbackChain, BookingError> {
        let message = format_message(request, ctx.labels)?;
        log::debug!("Booking message:\n{}", message.as_str());
        let chain = dispatch(ctx.navigator, ctx.number, &message)?;
        Ok(chain)
    }
}
