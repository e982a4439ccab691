//! Static record type catalog for the coaching dashboard.

mod cards;

use crate::field::{
    FieldDescriptor, FieldKind, NumberKind, SelectOption, UploadFailurePolicy, UploadTarget,
};
use crate::record::RecordTypeId;
use crate::record_type::{
    ListLayout, RecordCapabilities, RecordType, SortDirection, SortOrder, ToggleDescriptor,
};

/// Day column names of the weekly schedule, Monday first.
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const NEWEST_FIRST: SortOrder = SortOrder {
    field: "created_at",
    direction: SortDirection::Desc,
};

const fn inbox(toggles: &'static [ToggleDescriptor]) -> RecordCapabilities {
    RecordCapabilities {
        create: false,
        edit: false,
        delete: true,
        toggles,
    }
}

const BOOKING_TOGGLES: [ToggleDescriptor; 1] =
    [ToggleDescriptor::new("is_contacted", "Contacted", "Pending")];
const CONTACT_TOGGLES: [ToggleDescriptor; 1] =
    [ToggleDescriptor::new("is_read", "Read", "Unread")];
const EVENT_BOOKING_TOGGLES: [ToggleDescriptor; 1] =
    [ToggleDescriptor::new("is_confirmed", "Confirmed", "Pending")];

const FULL_CRUD: RecordCapabilities = RecordCapabilities {
    create: true,
    edit: true,
    delete: true,
    toggles: &[],
};

const fn abort_on_failure(bucket: &'static str, path_prefix: &'static str) -> FieldKind {
    FieldKind::File(UploadTarget {
        bucket,
        path_prefix,
        failure_policy: UploadFailurePolicy::AbortSubmit,
    })
}

const WEEKDAY_OPTIONS: [SelectOption; 7] = [
    SelectOption { value: "1", label: "Monday" },
    SelectOption { value: "2", label: "Tuesday" },
    SelectOption { value: "3", label: "Wednesday" },
    SelectOption { value: "4", label: "Thursday" },
    SelectOption { value: "5", label: "Friday" },
    SelectOption { value: "6", label: "Saturday" },
    SelectOption { value: "7", label: "Sunday" },
];

const POST_TYPE_OPTIONS: [SelectOption; 2] = [
    SelectOption { value: "blog", label: "Blog" },
    SelectOption { value: "vlog", label: "Vlog" },
];

const EVENT_STATUS_OPTIONS: [SelectOption; 4] = [
    SelectOption { value: "upcoming", label: "Upcoming" },
    SelectOption { value: "ongoing", label: "Ongoing" },
    SelectOption { value: "completed", label: "Completed" },
    SelectOption { value: "cancelled", label: "Cancelled" },
];

const TUTORIAL_CATEGORY_OPTIONS: [SelectOption; 5] = [
    SelectOption { value: "upper-body", label: "Upper Body" },
    SelectOption { value: "lower-body", label: "Lower Body" },
    SelectOption { value: "core", label: "Core" },
    SelectOption { value: "full-body", label: "Full Body" },
    SelectOption { value: "mobility", label: "Mobility" },
];

const TUTORIAL_DIFFICULTY_OPTIONS: [SelectOption; 3] = [
    SelectOption { value: "beginner", label: "Beginner" },
    SelectOption { value: "intermediate", label: "Intermediate" },
    SelectOption { value: "advanced", label: "Advanced" },
];

static BOOKINGS: RecordType = RecordType {
    id: RecordTypeId::Bookings,
    heading: "View Booking Requests",
    noun: "Booking",
    fields: &[
        FieldDescriptor::new("full_name", "Full Name", FieldKind::Text).required(),
        FieldDescriptor::new("email", "Email", FieldKind::Text).required(),
        FieldDescriptor::new("phone", "Phone", FieldKind::Text),
        FieldDescriptor::new("service", "Service", FieldKind::Text),
        FieldDescriptor::new("message", "Message", FieldKind::TextArea),
    ],
    sort: NEWEST_FIRST,
    capabilities: inbox(&BOOKING_TOGGLES),
    layout: ListLayout::Cards,
    empty_placeholder: "No booking requests yet.",
    card_template: cards::booking_card,
};

static CONTACTS: RecordType = RecordType {
    id: RecordTypeId::Contacts,
    heading: "View Contacts",
    noun: "Contact",
    fields: &[
        FieldDescriptor::new("full_name", "Full Name", FieldKind::Text).required(),
        FieldDescriptor::new("email", "Email", FieldKind::Text).required(),
        FieldDescriptor::new("subject", "Subject", FieldKind::Text),
        FieldDescriptor::new("message", "Message", FieldKind::TextArea).required(),
    ],
    sort: NEWEST_FIRST,
    capabilities: inbox(&CONTACT_TOGGLES),
    layout: ListLayout::Cards,
    empty_placeholder: "No contact messages yet.",
    card_template: cards::contact_card,
};

static SERVICES: RecordType = RecordType {
    id: RecordTypeId::Services,
    heading: "Manage Service Pricing",
    noun: "Pricing",
    fields: &[
        FieldDescriptor::new("pricing", "Pricing Tiers", FieldKind::PricingTiers).required(),
    ],
    sort: SortOrder {
        field: "id",
        direction: SortDirection::Asc,
    },
    capabilities: RecordCapabilities {
        create: false,
        edit: true,
        delete: false,
        toggles: &[],
    },
    layout: ListLayout::Cards,
    empty_placeholder: "No services found. Please set up the services table in the backend.",
    card_template: cards::service_card,
};

static TESTIMONIALS: RecordType = RecordType {
    id: RecordTypeId::Testimonials,
    heading: "Manage Testimonials",
    noun: "Testimonial",
    fields: &[
        FieldDescriptor::new("client_name", "Client Name", FieldKind::Text).required(),
        FieldDescriptor::new("program_type", "Program Type", FieldKind::Text),
        FieldDescriptor::new("quote", "Quote", FieldKind::TextArea).required(),
        FieldDescriptor::new(
            "image_before_url",
            "\"Before\" Image",
            abort_on_failure("testimonials-images", "testimonial-before"),
        )
        .required(),
        FieldDescriptor::new(
            "image_after_url",
            "\"After\" Image",
            abort_on_failure("testimonials-images", "testimonial-after"),
        )
        .required(),
        FieldDescriptor::new("video_url", "Video URL (optional, e.g., YouTube)", FieldKind::Url)
            .placeholder("https://www.youtube.com/watch?v=..."),
    ],
    sort: NEWEST_FIRST,
    capabilities: FULL_CRUD,
    layout: ListLayout::Cards,
    empty_placeholder: "No testimonials found. Click \"Add New\" to start.",
    card_template: cards::testimonial_card,
};

static MERCHANDISE: RecordType = RecordType {
    id: RecordTypeId::Merchandise,
    heading: "Manage Merchandise",
    noun: "Product",
    fields: &[
        FieldDescriptor::new("name", "Product Name", FieldKind::Text).required(),
        FieldDescriptor::new(
            "price",
            "Price (e.g., 25.00)",
            FieldKind::Number(NumberKind::Decimal),
        )
        .required(),
        FieldDescriptor::new("description", "Description", FieldKind::TextArea),
        FieldDescriptor::new(
            "image_url",
            "Product Image",
            abort_on_failure("merchandise-images", "merch"),
        )
        .required(),
    ],
    sort: NEWEST_FIRST,
    capabilities: FULL_CRUD,
    layout: ListLayout::Cards,
    empty_placeholder: "No products found. Click \"Add New\" to start.",
    card_template: cards::merchandise_card,
};

static POSTS: RecordType = RecordType {
    id: RecordTypeId::Posts,
    heading: "Manage Posts",
    noun: "Post",
    fields: &[
        FieldDescriptor::new("title", "Title", FieldKind::Text).required(),
        FieldDescriptor::new(
            "post_type",
            "Post Type",
            FieldKind::Select {
                options: &POST_TYPE_OPTIONS,
                integer_values: false,
            },
        )
        .required(),
        FieldDescriptor::new("content", "Content", FieldKind::RichText),
        FieldDescriptor::new("video_url", "Video URL (for vlogs, e.g., YouTube)", FieldKind::Url)
            .placeholder("https://www.youtube.com/watch?v=..."),
        FieldDescriptor::new("image_url", "Cover Image", abort_on_failure("post-images", "post"))
            .required(),
    ],
    sort: NEWEST_FIRST,
    capabilities: FULL_CRUD,
    layout: ListLayout::Cards,
    empty_placeholder: "No posts found. Click \"Add New\" to start.",
    card_template: cards::post_card,
};

static SCHEDULE: RecordType = RecordType {
    id: RecordTypeId::Schedule,
    heading: "Manage Schedule",
    noun: "Class",
    fields: &[
        FieldDescriptor::new("class_name", "Class Name", FieldKind::Text).required(),
        FieldDescriptor::new(
            "day_of_week",
            "Day of Week",
            FieldKind::Select {
                options: &WEEKDAY_OPTIONS,
                integer_values: true,
            },
        )
        .required(),
        FieldDescriptor::new("start_time", "Start Time", FieldKind::Time).required(),
        FieldDescriptor::new("end_time", "End Time", FieldKind::Time).required(),
    ],
    sort: SortOrder {
        field: "start_time",
        direction: SortDirection::Asc,
    },
    capabilities: FULL_CRUD,
    layout: ListLayout::WeeklyGrid {
        day_field: "day_of_week",
    },
    empty_placeholder: "No classes scheduled yet.",
    card_template: cards::schedule_card,
};

static EVENTS: RecordType = RecordType {
    id: RecordTypeId::Events,
    heading: "Manage Events",
    noun: "Event",
    fields: &[
        FieldDescriptor::new("title", "Event Title", FieldKind::Text).required(),
        FieldDescriptor::new("description", "Description", FieldKind::TextArea),
        FieldDescriptor::new("event_date", "Date", FieldKind::Date).required(),
        FieldDescriptor::new("event_time", "Time", FieldKind::Time).required(),
        FieldDescriptor::new("location", "Location", FieldKind::Text).required(),
        FieldDescriptor::new("event_type", "Event Type", FieldKind::Text)
            .placeholder("Workshop, Bootcamp, Retreat..."),
        FieldDescriptor::new(
            "status",
            "Status",
            FieldKind::Select {
                options: &EVENT_STATUS_OPTIONS,
                integer_values: false,
            },
        ),
        FieldDescriptor::new(
            "poster_url",
            "Event Poster",
            abort_on_failure("event-posters", "event-poster"),
        )
        .required(),
    ],
    sort: SortOrder {
        field: "event_date",
        direction: SortDirection::Desc,
    },
    capabilities: FULL_CRUD,
    layout: ListLayout::Cards,
    empty_placeholder: "No events found. Click \"Add New\" to start.",
    card_template: cards::event_card,
};

static EVENT_BOOKINGS: RecordType = RecordType {
    id: RecordTypeId::EventBookings,
    heading: "View Event Bookings",
    noun: "Event Booking",
    fields: &[
        FieldDescriptor::new("event_title", "Event", FieldKind::Text),
        FieldDescriptor::new("full_name", "Full Name", FieldKind::Text).required(),
        FieldDescriptor::new("email", "Email", FieldKind::Text).required(),
        FieldDescriptor::new("phone", "Phone", FieldKind::Text),
        FieldDescriptor::new("tickets", "Tickets", FieldKind::Number(NumberKind::Integer)),
        FieldDescriptor::new("message", "Message", FieldKind::TextArea),
    ],
    sort: NEWEST_FIRST,
    capabilities: inbox(&EVENT_BOOKING_TOGGLES),
    layout: ListLayout::Cards,
    empty_placeholder: "No event bookings yet.",
    card_template: cards::event_booking_card,
};

static TUTORIALS: RecordType = RecordType {
    id: RecordTypeId::Tutorials,
    heading: "Manage Tutorials",
    noun: "Tutorial",
    fields: &[
        FieldDescriptor::new("title", "Title", FieldKind::Text).required(),
        FieldDescriptor::new(
            "category",
            "Category",
            FieldKind::Select {
                options: &TUTORIAL_CATEGORY_OPTIONS,
                integer_values: false,
            },
        )
        .required(),
        FieldDescriptor::new(
            "difficulty",
            "Difficulty",
            FieldKind::Select {
                options: &TUTORIAL_DIFFICULTY_OPTIONS,
                integer_values: false,
            },
        )
        .required(),
        FieldDescriptor::new("duration", "Duration (mm:ss)", FieldKind::Text)
            .placeholder("8:45")
            .required(),
        FieldDescriptor::new(
            "display_order",
            "Display Order",
            FieldKind::Number(NumberKind::Integer),
        )
        .required(),
        FieldDescriptor::new("video_url", "Video URL", FieldKind::Url)
            .placeholder("https://www.youtube.com/watch?v=..."),
        FieldDescriptor::new(
            "thumbnail_url",
            "Thumbnail (optional)",
            FieldKind::File(UploadTarget {
                bucket: "tutorial-images",
                path_prefix: "tutorial",
                failure_policy: UploadFailurePolicy::BestEffort,
            }),
        ),
        FieldDescriptor::new("description", "Description", FieldKind::TextArea),
    ],
    sort: SortOrder {
        field: "display_order",
        direction: SortDirection::Asc,
    },
    capabilities: FULL_CRUD,
    layout: ListLayout::Cards,
    empty_placeholder: "No tutorials found. Click \"Add New\" to start.",
    card_template: cards::tutorial_card,
};

/// Returns the static description of a record type.
#[must_use]
pub fn record_type(id: RecordTypeId) -> &'static RecordType {
    match id {
        RecordTypeId::Bookings => &BOOKINGS,
        RecordTypeId::Contacts => &CONTACTS,
        RecordTypeId::Services => &SERVICES,
        RecordTypeId::Testimonials => &TESTIMONIALS,
        RecordTypeId::Merchandise => &MERCHANDISE,
        RecordTypeId::Posts => &POSTS,
        RecordTypeId::Schedule => &SCHEDULE,
        RecordTypeId::Events => &EVENTS,
        RecordTypeId::EventBookings => &EVENT_BOOKINGS,
        RecordTypeId::Tutorials => &TUTORIALS,
    }
}
