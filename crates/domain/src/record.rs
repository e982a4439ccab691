use std::fmt::{Display, Formatter};
use std::str::FromStr;

use coachdesk_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Closed set of record kinds managed by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordTypeId {
    /// Coaching booking requests submitted from the public site.
    Bookings,
    /// Contact form messages.
    Contacts,
    /// Service pricing tiers.
    Services,
    /// Client testimonials with before/after images.
    Testimonials,
    /// Merchandise products.
    Merchandise,
    /// Blog and vlog posts.
    Posts,
    /// Weekly class schedule entries.
    Schedule,
    /// Public events.
    Events,
    /// Bookings made against events.
    EventBookings,
    /// Exercise tutorials.
    Tutorials,
}

impl RecordTypeId {
    /// Every record type, in navigation order.
    pub const ALL: [Self; 10] = [
        Self::Bookings,
        Self::Contacts,
        Self::Services,
        Self::Testimonials,
        Self::Merchandise,
        Self::Posts,
        Self::Schedule,
        Self::Events,
        Self::EventBookings,
        Self::Tutorials,
    ];

    /// Returns the stable marker, which is also the storage collection name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bookings => "bookings",
            Self::Contacts => "contacts",
            Self::Services => "services",
            Self::Testimonials => "testimonials",
            Self::Merchandise => "merchandise",
            Self::Posts => "posts",
            Self::Schedule => "schedule",
            Self::Events => "events",
            Self::EventBookings => "event_bookings",
            Self::Tutorials => "tutorials",
        }
    }
}

impl FromStr for RecordTypeId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown record type '{value}'")))
    }
}

impl Display for RecordTypeId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// One persisted row of a record type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    record_type: RecordTypeId,
    id: NonEmptyString,
    fields: Map<String, Value>,
}

impl Record {
    /// Creates a record from an identifier and its field values.
    pub fn new(
        record_type: RecordTypeId,
        id: impl Into<String>,
        fields: Map<String, Value>,
    ) -> AppResult<Self> {
        Ok(Self {
            record_type,
            id: NonEmptyString::new(id)?,
            fields,
        })
    }

    /// Builds a record from a backend row, lifting the `id` column out of the payload.
    pub fn from_row(record_type: RecordTypeId, row: Value) -> AppResult<Self> {
        let Value::Object(mut fields) = row else {
            return Err(AppError::Persistence(format!(
                "row for '{record_type}' is not a JSON object"
            )));
        };

        let id = match fields.remove("id") {
            Some(Value::String(id)) => id,
            Some(Value::Number(id)) => id.to_string(),
            _ => {
                return Err(AppError::Persistence(format!(
                    "row for '{record_type}' has no usable id"
                )));
            }
        };

        Self::new(record_type, id, fields)
    }

    /// Returns the record type.
    #[must_use]
    pub fn record_type(&self) -> RecordTypeId {
        self.record_type
    }

    /// Returns the stable record identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns every field value except the identifier.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Returns one raw field value.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns a string field, treating empty strings as absent.
    #[must_use]
    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(Value::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    /// Renders any scalar field as display text. Null and missing values render empty.
    #[must_use]
    pub fn display_value(&self, field: &str) -> String {
        match self.fields.get(field) {
            Some(Value::String(value)) => value.clone(),
            Some(Value::Number(value)) => value.to_string(),
            Some(Value::Bool(value)) => value.to_string(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    /// Returns a boolean status flag. Missing flags are false.
    #[must_use]
    pub fn flag(&self, field: &str) -> bool {
        self.fields
            .get(field)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Returns the creation timestamp column when the collection carries one.
    #[must_use]
    pub fn created_at(&self) -> Option<&str> {
        self.text("created_at")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Record, RecordTypeId};

    #[test]
    fn record_type_markers_round_trip() {
        for record_type in RecordTypeId::ALL {
            let parsed = record_type.as_str().parse::<RecordTypeId>();
            assert_eq!(parsed.ok(), Some(record_type));
        }
    }

    #[test]
    fn unknown_record_type_is_rejected() {
        assert!("newsletter".parse::<RecordTypeId>().is_err());
    }

    #[test]
    fn from_row_accepts_numeric_ids() {
        let record = Record::from_row(
            RecordTypeId::Schedule,
            json!({"id": 42, "class_name": "HIIT", "day_of_week": 3}),
        )
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(record.id(), "42");
        assert!(record.get("id").is_none());
        assert_eq!(record.display_value("day_of_week"), "3");
    }

    #[test]
    fn from_row_rejects_rows_without_id() {
        let result = Record::from_row(RecordTypeId::Posts, json!({"title": "Untitled"}));
        assert!(result.is_err());
    }

    #[test]
    fn text_treats_blank_strings_as_missing() {
        let record = Record::from_row(
            RecordTypeId::Testimonials,
            json!({"id": "t-1", "program_type": "  ", "video_url": null}),
        )
        .unwrap_or_else(|_| unreachable!());

        assert!(record.text("program_type").is_none());
        assert!(record.text("video_url").is_none());
        assert!(!record.flag("is_read"));
    }
}
