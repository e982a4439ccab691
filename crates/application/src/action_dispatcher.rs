use std::str::FromStr;

use coachdesk_core::{AppError, AppResult};
use coachdesk_domain::{RecordType, RecordTypeId, ToggleDescriptor, record_type};

/// Stable action marker carried by list controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionMarker {
    /// Open the create form.
    Add,
    /// Open the edit form of one record.
    Edit,
    /// Ask for confirmation, then delete one record.
    Delete,
    /// Flip one status flag of a record.
    Toggle {
        /// Flag field name.
        field: String,
    },
}

impl ActionMarker {
    /// Returns the marker string posted by the control.
    #[must_use]
    pub fn as_marker(&self) -> String {
        match self {
            Self::Add => "add".to_owned(),
            Self::Edit => "edit".to_owned(),
            Self::Delete => "delete".to_owned(),
            Self::Toggle { field } => format!("toggle:{field}"),
        }
    }
}

impl FromStr for ActionMarker {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "add" => Ok(Self::Add),
            "edit" => Ok(Self::Edit),
            "delete" => Ok(Self::Delete),
            other => match other.strip_prefix("toggle:") {
                Some(field) if !field.is_empty() => Ok(Self::Toggle {
                    field: field.to_owned(),
                }),
                _ => Err(AppError::Validation(format!("unknown action '{value}'"))),
            },
        }
    }
}

/// Raw action request posted by a list control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionRequest {
    /// Action marker.
    pub action: String,
    /// Record type marker of the card.
    pub record_type: String,
    /// Record identifier for record-bound actions.
    pub record_id: Option<String>,
    /// Current flag state for toggles (`true`/`false`).
    pub current: Option<String>,
}

/// Operation selected for an action request.
#[derive(Debug, Clone)]
pub enum ResolvedAction {
    /// Open an empty create form.
    OpenCreateForm {
        /// Target record type.
        record_type: &'static RecordType,
    },
    /// Load a record and open its edit form.
    OpenEditForm {
        /// Target record type.
        record_type: &'static RecordType,
        /// Record to edit.
        record_id: String,
    },
    /// Ask the admin to confirm deletion.
    ConfirmDelete {
        /// Target record type.
        record_type: &'static RecordType,
        /// Record to delete.
        record_id: String,
    },
    /// Flip one status flag.
    Toggle {
        /// Target record type.
        record_type: &'static RecordType,
        /// Record to update.
        record_id: String,
        /// Flag descriptor.
        toggle: &'static ToggleDescriptor,
        /// Flag value shown on the card when the control was pressed.
        current: bool,
    },
}

/// Maps an action request to exactly one operation, or a validation error.
pub fn resolve_action(request: &ActionRequest) -> AppResult<ResolvedAction> {
    let action = request.action.parse::<ActionMarker>()?;
    let record_type = record_type(request.record_type.parse::<RecordTypeId>()?);
    let capabilities = record_type.capabilities();
    let unsupported = || {
        AppError::Validation(format!(
            "{} does not support '{}'",
            record_type.collection(),
            request.action
        ))
    };

    match action {
        ActionMarker::Add if capabilities.can_create() => {
            Ok(ResolvedAction::OpenCreateForm { record_type })
        }
        ActionMarker::Edit if capabilities.can_edit() => Ok(ResolvedAction::OpenEditForm {
            record_type,
            record_id: required_record_id(request)?,
        }),
        ActionMarker::Delete if capabilities.can_delete() => Ok(ResolvedAction::ConfirmDelete {
            record_type,
            record_id: required_record_id(request)?,
        }),
        ActionMarker::Toggle { field } => {
            let toggle = record_type.toggle(&field).ok_or_else(unsupported)?;
            Ok(ResolvedAction::Toggle {
                record_type,
                record_id: required_record_id(request)?,
                toggle,
                current: current_flag(request)?,
            })
        }
        _ => Err(unsupported()),
    }
}

fn required_record_id(request: &ActionRequest) -> AppResult<String> {
    request
        .record_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| {
            AppError::Validation(format!("action '{}' requires a record id", request.action))
        })
}

fn current_flag(request: &ActionRequest) -> AppResult<bool> {
    match request.current.as_deref() {
        Some("true") => Ok(true),
        Some("false") | None => Ok(false),
        Some(other) => Err(AppError::Validation(format!(
            "invalid flag state '{other}'"
        ))),
    }
}
