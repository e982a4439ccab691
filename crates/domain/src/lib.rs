//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod catalog;
mod field;
mod navigation;
mod record;
mod record_type;
mod validation;

pub use catalog::{WEEKDAYS, record_type};
pub use field::{
    FieldDescriptor, FieldKind, NumberKind, PRICING_TIER_FIELDS, SelectOption,
    UploadFailurePolicy, UploadTarget,
};
pub use navigation::{NAVIGATION, NavigationEntry, SectionTarget, resolve_navigation_target};
pub use record::{Record, RecordTypeId};
pub use record_type::{
    CardLine, CardSummary, CardTemplate, ListLayout, RecordCapabilities, RecordType, SortDirection,
    SortOrder, ToggleDescriptor,
};
pub use validation::validate_video_url;
