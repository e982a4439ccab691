use chrono::{DateTime, NaiveDate};
use serde_json::Value;

use crate::record::Record;
use crate::record_type::{CardLine, CardSummary};

const DESCRIPTION_PREVIEW_CHARS: usize = 100;

fn line(label: &'static str, value: impl Into<String>) -> CardLine {
    CardLine {
        label,
        value: value.into(),
    }
}

fn or_na(record: &Record, field: &str) -> String {
    record.text(field).unwrap_or("N/A").to_owned()
}

fn received(record: &Record) -> CardLine {
    let value = record
        .created_at()
        .map_or_else(|| "N/A".to_owned(), format_timestamp);
    line("Received", value)
}

fn contact_line(record: &Record) -> CardLine {
    let email = record.text("email").unwrap_or("N/A");
    match record.text("phone") {
        Some(phone) => line("Contact", format!("{email} | {phone}")),
        None => line("Contact", email),
    }
}

fn format_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|timestamp| timestamp.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_owned())
}

fn format_long_date(raw: &str) -> String {
    let date_part: String = raw.chars().take(10).collect();
    NaiveDate::parse_from_str(&date_part, "%Y-%m-%d")
        .map(|date| date.format("%A, %B %-d, %Y").to_string())
        .unwrap_or_else(|_| raw.to_owned())
}

fn short_time(raw: &str) -> String {
    raw.chars().take(5).collect()
}

fn format_price(value: Option<&Value>) -> String {
    match value {
        Some(Value::Number(number)) => match number.as_i64() {
            Some(whole) => format!("Ksh{whole}"),
            None => format!("Ksh{:.2}", number.as_f64().unwrap_or_default()),
        },
        Some(Value::String(text)) if !text.trim().is_empty() => format!("Ksh{text}"),
        _ => "Ksh0".to_owned(),
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() <= DESCRIPTION_PREVIEW_CHARS {
        return text.to_owned();
    }

    let head: String = text.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    format!("{head}...")
}

pub(super) fn service_title(id: &str) -> &'static str {
    match id {
        "one-on-one" => "One-on-One Personal Training",
        "online" => "Online Coaching",
        "nutrition" => "Nutrition Coaching",
        _ => "Unknown Service",
    }
}

pub(super) fn booking_card(record: &Record) -> CardSummary {
    let name = or_na(record, "full_name");
    let title = match record.text("service") {
        Some(service) => format!("{name} - {service}"),
        None => name,
    };

    CardSummary {
        title,
        lines: vec![contact_line(record), received(record)],
        body: record.text("message").map(str::to_owned),
        highlighted: !record.flag("is_contacted"),
        ..CardSummary::default()
    }
}

pub(super) fn contact_card(record: &Record) -> CardSummary {
    let sender = match (record.text("full_name"), record.text("email")) {
        (Some(name), Some(email)) => format!("{name} ({email})"),
        (Some(name), None) => name.to_owned(),
        (None, Some(email)) => email.to_owned(),
        (None, None) => "N/A".to_owned(),
    };

    CardSummary {
        title: record.text("subject").unwrap_or("(no subject)").to_owned(),
        lines: vec![line("From", sender), received(record)],
        body: record.text("message").map(str::to_owned),
        highlighted: !record.flag("is_read"),
        ..CardSummary::default()
    }
}

pub(super) fn service_card(record: &Record) -> CardSummary {
    let tiers = record
        .get("pricing")
        .and_then(|pricing| pricing.get("tiers"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let lines = tiers
        .iter()
        .map(|tier| {
            let name = tier.get("name").and_then(Value::as_str).unwrap_or("Tier");
            let price = format_price(tier.get("price"));
            match tier.get("note").and_then(Value::as_str) {
                Some(note) if !note.trim().is_empty() => {
                    line("Tier", format!("{name}: {price} ({note})"))
                }
                _ => line("Tier", format!("{name}: {price}")),
            }
        })
        .collect();

    CardSummary {
        title: service_title(record.id()).to_owned(),
        lines,
        body: Some("Click \"Edit\" to manage the pricing for this service.".to_owned()),
        ..CardSummary::default()
    }
}

pub(super) fn testimonial_card(record: &Record) -> CardSummary {
    CardSummary {
        title: or_na(record, "client_name"),
        image_url: record.text("image_after_url").map(str::to_owned),
        lines: vec![line("Program", or_na(record, "program_type"))],
        body: record.text("quote").map(|quote| format!("\"{quote}\"")),
        ..CardSummary::default()
    }
}

pub(super) fn merchandise_card(record: &Record) -> CardSummary {
    CardSummary {
        title: or_na(record, "name"),
        image_url: record.text("image_url").map(str::to_owned),
        lines: vec![line("Price", format_price(record.get("price")))],
        body: record.text("description").map(str::to_owned),
        ..CardSummary::default()
    }
}

pub(super) fn post_card(record: &Record) -> CardSummary {
    CardSummary {
        title: or_na(record, "title"),
        image_url: record.text("image_url").map(str::to_owned),
        lines: vec![line("Type", or_na(record, "post_type"))],
        ..CardSummary::default()
    }
}

pub(super) fn schedule_card(record: &Record) -> CardSummary {
    let start = short_time(&record.display_value("start_time"));
    let end = short_time(&record.display_value("end_time"));

    CardSummary {
        title: or_na(record, "class_name"),
        subtitle: Some(format!("{start} - {end}")),
        ..CardSummary::default()
    }
}

pub(super) fn event_card(record: &Record) -> CardSummary {
    let date = record
        .text("event_date")
        .map_or_else(|| "N/A".to_owned(), format_long_date);
    let when = match record.text("event_time") {
        Some(time) => format!("{date} at {}", short_time(time)),
        None => date,
    };

    CardSummary {
        title: or_na(record, "title"),
        image_url: record.text("poster_url").map(str::to_owned),
        lines: vec![
            line("Date", when),
            line("Location", or_na(record, "location")),
            line("Type", or_na(record, "event_type")),
            line("Status", record.text("status").unwrap_or("upcoming")),
        ],
        body: record.text("description").map(preview),
        ..CardSummary::default()
    }
}

pub(super) fn event_booking_card(record: &Record) -> CardSummary {
    let name = or_na(record, "full_name");
    let title = match record.text("event_title") {
        Some(event) => format!("{name} - {event}"),
        None => name,
    };
    let tickets = match record.display_value("tickets") {
        tickets if tickets.is_empty() => "1".to_owned(),
        tickets => tickets,
    };

    CardSummary {
        title,
        lines: vec![
            contact_line(record),
            line("Tickets", tickets),
            received(record),
        ],
        body: record.text("message").map(str::to_owned),
        highlighted: !record.flag("is_confirmed"),
        ..CardSummary::default()
    }
}

pub(super) fn tutorial_card(record: &Record) -> CardSummary {
    CardSummary {
        title: or_na(record, "title"),
        image_url: record.text("thumbnail_url").map(str::to_owned),
        lines: vec![
            line("Category", or_na(record, "category")),
            line("Difficulty", or_na(record, "difficulty")),
            line("Duration", or_na(record, "duration")),
            line("Order", record.display_value("display_order")),
        ],
        body: record.text("description").map(str::to_owned),
        ..CardSummary::default()
    }
}
