use serde::Serialize;

use crate::field::FieldDescriptor;
use crate::record::{Record, RecordTypeId};

/// Sort direction for list ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Returns stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Default list ordering of a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    /// Field to order by.
    pub field: &'static str,
    /// Direction.
    pub direction: SortDirection,
}

/// Boolean status flag exposed as a one-click toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleDescriptor {
    field: &'static str,
    on_label: &'static str,
    off_label: &'static str,
}

impl ToggleDescriptor {
    /// Creates a toggle for `field`, naming its true and false states.
    #[must_use]
    pub const fn new(field: &'static str, on_label: &'static str, off_label: &'static str) -> Self {
        Self {
            field,
            on_label,
            off_label,
        }
    }

    /// Returns the flag field name.
    #[must_use]
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Returns the name of the state the flag moves to when toggled from `current`.
    #[must_use]
    pub fn next_state_name(&self, current: bool) -> &'static str {
        if current {
            self.off_label
        } else {
            self.on_label
        }
    }

    /// Returns the button label for a flag currently at `current`.
    #[must_use]
    pub fn button_label(&self, current: bool) -> String {
        format!("Mark as {}", self.next_state_name(current))
    }
}

/// Actions a record type supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordCapabilities {
    pub(crate) create: bool,
    pub(crate) edit: bool,
    pub(crate) delete: bool,
    pub(crate) toggles: &'static [ToggleDescriptor],
}

impl RecordCapabilities {
    /// Returns whether new records can be created.
    #[must_use]
    pub fn can_create(&self) -> bool {
        self.create
    }

    /// Returns whether records can be edited in place.
    #[must_use]
    pub fn can_edit(&self) -> bool {
        self.edit
    }

    /// Returns whether records can be deleted.
    #[must_use]
    pub fn can_delete(&self) -> bool {
        self.delete
    }

    /// Returns the status toggles.
    #[must_use]
    pub fn toggles(&self) -> &'static [ToggleDescriptor] {
        self.toggles
    }
}

/// How a list of records is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListLayout {
    /// One card per record, in sort order.
    Cards,
    /// Seven day columns keyed by an integer day-of-week field (1 = Monday).
    WeeklyGrid {
        /// Field holding the day number.
        day_field: &'static str,
    },
}

/// One labelled line on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardLine {
    /// Line label.
    pub label: &'static str,
    /// Line value.
    pub value: String,
}

/// Summary view of a record rendered inside its card.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CardSummary {
    /// Headline.
    pub title: String,
    /// Secondary headline, rendered beside or under the title.
    pub subtitle: Option<String>,
    /// Optional cover image.
    pub image_url: Option<String>,
    /// Labelled metadata lines.
    pub lines: Vec<CardLine>,
    /// Free-form body text.
    pub body: Option<String>,
    /// Whether the card is flagged for attention (unread, uncontacted).
    pub highlighted: bool,
}

impl CardSummary {
    /// Returns the single-line card label: title followed by subtitle.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.subtitle {
            Some(subtitle) => format!("{} {}", self.title, subtitle),
            None => self.title.clone(),
        }
    }
}

/// Renders the summary of one record.
pub type CardTemplate = fn(&Record) -> CardSummary;

/// Static description of one record type.
#[derive(Debug, Clone, Copy)]
pub struct RecordType {
    pub(crate) id: RecordTypeId,
    pub(crate) heading: &'static str,
    pub(crate) noun: &'static str,
    pub(crate) fields: &'static [FieldDescriptor],
    pub(crate) sort: SortOrder,
    pub(crate) capabilities: RecordCapabilities,
    pub(crate) layout: ListLayout,
    pub(crate) empty_placeholder: &'static str,
    pub(crate) card_template: CardTemplate,
}

impl RecordType {
    /// Returns the record type identifier.
    #[must_use]
    pub fn id(&self) -> RecordTypeId {
        self.id
    }

    /// Returns the storage collection name.
    #[must_use]
    pub fn collection(&self) -> &'static str {
        self.id.as_str()
    }

    /// Returns the list view heading.
    #[must_use]
    pub fn heading(&self) -> &'static str {
        self.heading
    }

    /// Returns the singular noun used in form titles and notifications.
    #[must_use]
    pub fn noun(&self) -> &'static str {
        self.noun
    }

    /// Returns the ordered form fields.
    #[must_use]
    pub fn fields(&self) -> &'static [FieldDescriptor] {
        self.fields
    }

    /// Finds one field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Returns the default list ordering.
    #[must_use]
    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    /// Returns supported actions.
    #[must_use]
    pub fn capabilities(&self) -> RecordCapabilities {
        self.capabilities
    }

    /// Finds the toggle bound to `field`.
    #[must_use]
    pub fn toggle(&self, field: &str) -> Option<&'static ToggleDescriptor> {
        self.capabilities
            .toggles
            .iter()
            .find(|toggle| toggle.field() == field)
    }

    /// Returns the list layout.
    #[must_use]
    pub fn layout(&self) -> ListLayout {
        self.layout
    }

    /// Returns the fixed text shown when the list is empty.
    #[must_use]
    pub fn empty_placeholder(&self) -> &'static str {
        self.empty_placeholder
    }

    /// Renders the card summary for one record.
    #[must_use]
    pub fn summarize(&self, record: &Record) -> CardSummary {
        (self.card_template)(record)
    }
}
