use chrono::Timelike;

use crate::booking::validation::{parse_date, parse_time};
use crate::booking::AppointmentRequest;
use crate::error::FormatError;
use crate::i18n::Translator;

/// Resolved strings for the fixed parts of the outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageLabels {
    pub header: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub date: String,
    pub time: String,
    pub footer: String,
}

impl MessageLabels {
    pub fn resolve(translator: &dyn Translator) -> Self {
        Self {
            header: translator.t("message.header"),
            name: translator.t("message.name"),
            phone: translator.t("message.phone"),
            email: translator.t("message.email"),
            date: translator.t("message.date"),
            time: translator.t("message.time"),
            footer: translator.t("message.footer"),
        }
    }
}

/// Plain-text booking message. WhatsApp markup (`*bold*`, `_italic_`) is
/// part of the text; URL encoding happens once, in [`Message::encoded`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message(String);

impl Message {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The whole message percent-encoded for a query string value.
    pub fn encoded(&self) -> String {
        urlencoding::encode(&self.0).into_owned()
    }
}

/// `2026-10-17` becomes `Saturday, October 17, 2026`.
pub fn render_date(raw: &str) -> Result<String, FormatError> {
    parse_date(raw)
        .map(|date| date.format("%A, %B %-d, %Y").to_string())
        .ok_or_else(|| FormatError::Date(raw.to_string()))
}

/// `14:30` becomes `2:30 PM`, `00:05` becomes `12:05 AM`.
pub fn render_time(raw: &str) -> Result<String, FormatError> {
    let time = parse_time(raw).ok_or_else(|| FormatError::Time(raw.to_string()))?;
    let (is_pm, hour) = time.hour12();
    let suffix = if is_pm { "PM" } else { "AM" };
    Ok(format!("{}:{:02} {}", hour, time.minute(), suffix))
}

pub fn format_message(request: &AppointmentRequest, labels: &MessageLabels) -> Result<Message, FormatError> {
    let date = render_date(request.date())?;
    let time = render_time(request.time())?;

    let lines = [
        format!("*{}*", labels.header),
        String::new(),
        format!("*{}:* {}", labels.name, request.name()),
        format!("*{}:* {}", labels.phone, request.phone()),
        format!("*{}:* {}", labels.email, request.email()),
        format!("*{}:* {}", labels.date, date),
        format!("*{}:* {}", labels.time, time),
        String::new(),
        format!("_{}_", labels.footer),
    ];
    Ok(Message::new(lines.join("\n")))
}
