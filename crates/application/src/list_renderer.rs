use coachdesk_domain::{CardSummary, ListLayout, Record, RecordType, WEEKDAYS};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::action_dispatcher::ActionMarker;

/// One button on a card or list header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionControl {
    /// Stable action marker posted to the action endpoint.
    pub marker: String,
    /// Button text.
    pub label: String,
    /// Presentation hint (`add`, `edit`, `delete`, `toggle`).
    pub style: &'static str,
    /// Current flag value, posted along with toggles.
    pub current: Option<bool>,
}

/// Render model of one record card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    /// Record type marker.
    pub record_type: &'static str,
    /// Record identifier.
    pub record_id: String,
    /// Summary produced by the record type's card template.
    pub summary: CardSummary,
    /// Single-line card label.
    pub label: String,
    /// Action row.
    pub actions: Vec<ActionControl>,
}

/// One weekday column of the schedule grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayColumn {
    /// Weekday name.
    pub day: &'static str,
    /// Cards scheduled on that day.
    pub cards: Vec<CardView>,
}

/// Body of a list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum ListBody {
    /// No records.
    Empty {
        /// Fixed placeholder text.
        placeholder: &'static str,
    },
    /// Cards in sort order.
    Cards {
        /// Cards.
        cards: Vec<CardView>,
    },
    /// Seven day columns, Monday first. Rows without a valid weekday follow
    /// in a trailing "Unscheduled" column.
    WeeklyGrid {
        /// Columns.
        columns: Vec<DayColumn>,
    },
}

/// Render model of a record list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListView {
    /// Record type marker.
    pub record_type: &'static str,
    /// Section heading.
    pub heading: &'static str,
    /// "Add New" control for types that support creation.
    pub add_control: Option<ActionControl>,
    /// Body.
    pub body: ListBody,
}

impl ListView {
    /// Returns every card regardless of layout.
    #[must_use]
    pub fn cards(&self) -> Vec<&CardView> {
        match &self.body {
            ListBody::Empty { .. } => Vec::new(),
            ListBody::Cards { cards } => cards.iter().collect(),
            ListBody::WeeklyGrid { columns } => {
                columns.iter().flat_map(|column| &column.cards).collect()
            }
        }
    }
}

const UNSCHEDULED_COLUMN: &str = "Unscheduled";

/// Renders the list view of `records`.
#[must_use]
pub fn render_list(record_type: &'static RecordType, records: &[Record]) -> ListView {
    let capabilities = record_type.capabilities();
    let add_control = capabilities.can_create().then(|| ActionControl {
        marker: ActionMarker::Add.as_marker(),
        label: format!("Add New {}", record_type.noun()),
        style: "add",
        current: None,
    });

    let body = if records.is_empty() {
        ListBody::Empty {
            placeholder: record_type.empty_placeholder(),
        }
    } else {
        match record_type.layout() {
            ListLayout::Cards => ListBody::Cards {
                cards: records
                    .iter()
                    .map(|record| render_card(record_type, record))
                    .collect(),
            },
            ListLayout::WeeklyGrid { day_field } => ListBody::WeeklyGrid {
                columns: weekly_columns(record_type, records, day_field),
            },
        }
    };

    ListView {
        record_type: record_type.collection(),
        heading: record_type.heading(),
        add_control,
        body,
    }
}

/// Renders one card with its action row.
#[must_use]
pub fn render_card(record_type: &'static RecordType, record: &Record) -> CardView {
    let capabilities = record_type.capabilities();
    let mut actions = Vec::new();

    for toggle in capabilities.toggles() {
        let current = record.flag(toggle.field());
        actions.push(ActionControl {
            marker: ActionMarker::Toggle {
                field: toggle.field().to_owned(),
            }
            .as_marker(),
            label: toggle.button_label(current),
            style: "toggle",
            current: Some(current),
        });
    }
    if capabilities.can_edit() {
        actions.push(ActionControl {
            marker: ActionMarker::Edit.as_marker(),
            label: "Edit".to_owned(),
            style: "edit",
            current: None,
        });
    }
    if capabilities.can_delete() {
        actions.push(ActionControl {
            marker: ActionMarker::Delete.as_marker(),
            label: "Delete".to_owned(),
            style: "delete",
            current: None,
        });
    }

    let summary = record_type.summarize(record);
    CardView {
        record_type: record_type.collection(),
        record_id: record.id().to_owned(),
        label: summary.label(),
        summary,
        actions,
    }
}

fn weekly_columns(
    record_type: &'static RecordType,
    records: &[Record],
    day_field: &str,
) -> Vec<DayColumn> {
    let mut columns: Vec<DayColumn> = WEEKDAYS
        .into_iter()
        .map(|day| DayColumn {
            day,
            cards: Vec::new(),
        })
        .collect();
    let mut unscheduled = Vec::new();

    for record in records {
        let day = match record.get(day_field) {
            Some(Value::Number(number)) => number.as_u64(),
            Some(Value::String(text)) => text.trim().parse::<u64>().ok(),
            _ => None,
        };
        let column = day
            .and_then(|day| usize::try_from(day).ok())
            .and_then(|day| day.checked_sub(1))
            .and_then(|index| columns.get_mut(index));

        match column {
            Some(column) => column.cards.push(render_card(record_type, record)),
            None => {
                warn!(
                    record_type = %record_type.id(),
                    record_id = record.id(),
                    "record has no valid weekday"
                );
                unscheduled.push(render_card(record_type, record));
            }
        }
    }

    if !unscheduled.is_empty() {
        columns.push(DayColumn {
            day: UNSCHEDULED_COLUMN,
            cards: unscheduled,
        });
    }
    columns
}
