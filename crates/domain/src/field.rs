/// One choice in a select input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    /// Submitted value.
    pub value: &'static str,
    /// Human-readable label.
    pub label: &'static str,
}

/// Numeric input flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    /// Whole numbers, stored as JSON integers.
    Integer,
    /// Two-decimal amounts, stored as JSON floats.
    Decimal,
}

/// What happens to a submit when the upload for one file field fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFailurePolicy {
    /// Abort the submit before any record mutation.
    AbortSubmit,
    /// Log the failure and keep the previous value.
    BestEffort,
}

/// Storage destination for a file field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTarget {
    /// Object storage bucket.
    pub bucket: &'static str,
    /// Prefix for generated object paths.
    pub path_prefix: &'static str,
    /// Failure handling for this field.
    pub failure_policy: UploadFailurePolicy,
}

/// Input kind of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text.
    Text,
    /// Multi-line text.
    TextArea,
    /// Fixed choice list.
    Select {
        /// Available choices.
        options: &'static [SelectOption],
        /// Whether submitted values are stored as integers.
        integer_values: bool,
    },
    /// Calendar date (`YYYY-MM-DD`).
    Date,
    /// Wall-clock time (`HH:MM`).
    Time,
    /// Numeric input.
    Number(NumberKind),
    /// Absolute http(s) link, validated before any backend call.
    Url,
    /// File uploaded to object storage and stored as its public URL.
    File(UploadTarget),
    /// Rich-text HTML produced by the editor widget.
    RichText,
    /// Repeating pricing tiers stored as `{"tiers": [{name, price, note}]}`.
    PricingTiers,
}

impl FieldKind {
    /// Returns the stable input kind name used by the form markup.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::TextArea => "textarea",
            Self::Select { .. } => "select",
            Self::Date => "date",
            Self::Time => "time",
            Self::Number(_) => "number",
            Self::Url => "url",
            Self::File(_) => "file",
            Self::RichText => "rich-text",
            Self::PricingTiers => "pricing-tiers",
        }
    }
}

/// Sub-fields of one pricing tier, in form order.
pub const PRICING_TIER_FIELDS: [&str; 3] = ["name", "price", "note"];

/// Declarative description of one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: &'static str,
    label: &'static str,
    kind: FieldKind,
    required: bool,
    placeholder: Option<&'static str>,
}

impl FieldDescriptor {
    /// Creates an optional field of the given kind.
    #[must_use]
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            placeholder: None,
        }
    }

    /// Marks the field as required.
    #[must_use]
    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    /// Sets placeholder text shown in the empty input.
    #[must_use]
    pub const fn placeholder(self, placeholder: &'static str) -> Self {
        Self {
            placeholder: Some(placeholder),
            ..self
        }
    }

    /// Returns the storage field name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the form label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Returns the input kind.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns whether a value must be supplied.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns placeholder text.
    #[must_use]
    pub fn placeholder_text(&self) -> Option<&'static str> {
        self.placeholder
    }

    /// Returns the upload target for file fields.
    #[must_use]
    pub fn upload_target(&self) -> Option<UploadTarget> {
        match self.kind {
            FieldKind::File(target) => Some(target),
            _ => None,
        }
    }
}
