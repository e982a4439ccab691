use std::collections::BTreeMap;

use coachdesk_core::{AppError, AppResult};
use coachdesk_domain::{
    FieldDescriptor, FieldKind, NumberKind, PRICING_TIER_FIELDS, Record, RecordType,
    validate_video_url,
};
use serde::Serialize;
use serde_json::{Map, Number, Value};

#[cfg(test)]
mod tests;

/// Toolbar configuration handed to the rich-text editor widget.
pub const RICH_TEXT_TOOLBAR: &str = r#"[[{"font":[]}],[{"header":[1,2,3,4,5,6,false]}],["bold","italic","underline","strike"],[{"color":[]},{"background":[]}],[{"script":"sub"},{"script":"super"}],[{"list":"ordered"},{"list":"bullet"}],[{"indent":"-1"},{"indent":"+1"}],[{"direction":"rtl"}],[{"align":[]}],["link","image","video","blockquote","code-block"],["clean"]]"#;

const EMPTY_EDITOR_MARKUP: &str = "<p><br></p>";

/// Whether a form creates a new record or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    /// Insert a new record.
    Create,
    /// Patch an existing record.
    Edit {
        /// Record being edited.
        record_id: String,
    },
}

/// File chosen in a form's file input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagedFile {
    /// File field name.
    pub field: String,
    /// Original file name.
    pub file_name: String,
    /// Declared content type.
    pub content_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl StagedFile {
    /// Returns whether the input was left empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.file_name.trim().is_empty() || self.bytes.is_empty()
    }
}

/// Values posted by a generated form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSubmission {
    /// Record type marker of the form.
    pub record_type: String,
    /// Token of the form instance that was rendered and posted.
    pub form_token: String,
    /// Text inputs keyed by input name.
    pub values: BTreeMap<String, String>,
    /// File inputs.
    pub files: Vec<StagedFile>,
}

impl FormSubmission {
    /// Returns the trimmed value of one input, if non-blank.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Returns the non-empty staged file for one field.
    #[must_use]
    pub fn file(&self, field: &str) -> Option<&StagedFile> {
        self.files
            .iter()
            .find(|file| file.field == field && !file.is_empty())
    }
}

/// One choice of a rendered select input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOptionView {
    /// Submitted value.
    pub value: &'static str,
    /// Visible label.
    pub label: &'static str,
    /// Whether the option is pre-selected.
    pub selected: bool,
}

/// One row of the pricing tier editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PricingTierView {
    /// Position in the tier list.
    pub index: usize,
    /// Tier name.
    pub name: String,
    /// Tier price.
    pub price: String,
    /// Optional note.
    pub note: String,
}

/// Render model of one form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormFieldView {
    /// Input name.
    pub name: &'static str,
    /// Label text.
    pub label: &'static str,
    /// Input kind name.
    pub kind: &'static str,
    /// Whether the input is required.
    pub required: bool,
    /// Placeholder text.
    pub placeholder: Option<&'static str>,
    /// Current draft value.
    pub value: String,
    /// Number input step.
    pub step: Option<&'static str>,
    /// Select choices.
    pub options: Vec<SelectOptionView>,
    /// Asset URL currently stored on the record, for file previews.
    pub current_asset_url: Option<String>,
    /// Pricing tier rows, including one blank row for additions.
    pub tiers: Vec<PricingTierView>,
}

/// Render model of an open form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    /// Record type marker.
    pub record_type: &'static str,
    /// Identifies this opening of the form; posted back with the values.
    pub form_token: String,
    /// Form heading.
    pub title: String,
    /// `create` or `edit`.
    pub mode: &'static str,
    /// Record being edited.
    pub record_id: Option<String>,
    /// Submit button label.
    pub submit_label: &'static str,
    /// Inputs in descriptor order.
    pub fields: Vec<FormFieldView>,
    /// Editor toolbar configuration, present when the form has a rich-text input.
    pub rich_text_toolbar: Option<&'static str>,
}

/// In-memory state of one open form.
///
/// The draft holds raw input values keyed by input name so that a failed
/// submit re-renders exactly what the admin entered.
#[derive(Debug, Clone)]
pub struct FormHandle {
    record_type: &'static RecordType,
    token: String,
    mode: FormMode,
    draft: BTreeMap<String, String>,
    assets: BTreeMap<&'static str, String>,
    existing: Option<Record>,
}

impl FormHandle {
    /// Opens a form. Edit forms are pre-filled from `current`, file inputs
    /// excepted: those expose the stored asset URL instead.
    #[must_use]
    pub fn open(record_type: &'static RecordType, mode: FormMode, current: Option<Record>) -> Self {
        let mut draft = BTreeMap::new();
        let mut assets = BTreeMap::new();

        if let Some(record) = &current {
            for field in record_type.fields() {
                match field.kind() {
                    FieldKind::File(_) => {
                        if let Some(url) = record.text(field.name()) {
                            assets.insert(field.name(), url.to_owned());
                        }
                    }
                    FieldKind::PricingTiers => {
                        draft.extend(pricing_draft(field.name(), record.get(field.name())));
                    }
                    kind => {
                        draft.insert(
                            field.name().to_owned(),
                            draft_value(kind, &record.display_value(field.name())),
                        );
                    }
                }
            }
        }

        Self {
            record_type,
            token: String::new(),
            mode,
            draft,
            assets,
            existing: current,
        }
    }

    /// Tags this opening of the form. Submissions must echo the token back.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    /// Returns the token identifying this opening of the form.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the record type of the form.
    #[must_use]
    pub fn record_type(&self) -> &'static RecordType {
        self.record_type
    }

    /// Returns the form mode.
    #[must_use]
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Returns the record loaded for editing.
    #[must_use]
    pub fn existing(&self) -> Option<&Record> {
        self.existing.as_ref()
    }

    /// Replaces the draft with submitted text values.
    pub fn retain(&mut self, submission: &FormSubmission) {
        self.draft = submission.values.clone();
    }

    /// Returns the draft value of one input.
    #[must_use]
    pub fn draft_value(&self, name: &str) -> Option<&str> {
        self.draft.get(name).map(String::as_str)
    }

    /// Projects the form into its render model.
    #[must_use]
    pub fn view(&self) -> FormView {
        let fields = self
            .record_type
            .fields()
            .iter()
            .map(|field| self.field_view(field))
            .collect();
        let has_rich_text = self
            .record_type
            .fields()
            .iter()
            .any(|field| field.kind() == FieldKind::RichText);

        let (title, mode, record_id, submit_label) = match &self.mode {
            FormMode::Create => (
                format!("Add New {}", self.record_type.noun()),
                "create",
                None,
                "Save",
            ),
            FormMode::Edit { record_id } => (
                format!("Edit {}", self.record_type.noun()),
                "edit",
                Some(record_id.clone()),
                "Save Changes",
            ),
        };

        FormView {
            record_type: self.record_type.collection(),
            form_token: self.token.clone(),
            title,
            mode,
            record_id,
            submit_label,
            fields,
            rich_text_toolbar: has_rich_text.then_some(RICH_TEXT_TOOLBAR),
        }
    }

    fn field_view(&self, field: &FieldDescriptor) -> FormFieldView {
        let value = self.draft_value(field.name()).unwrap_or_default().to_owned();
        let options = match field.kind() {
            FieldKind::Select { options, .. } => options
                .iter()
                .map(|option| SelectOptionView {
                    value: option.value,
                    label: option.label,
                    selected: option.value == value,
                })
                .collect(),
            _ => Vec::new(),
        };
        let step = match field.kind() {
            FieldKind::Number(NumberKind::Integer) => Some("1"),
            FieldKind::Number(NumberKind::Decimal) => Some("0.01"),
            _ => None,
        };
        let tiers = match field.kind() {
            FieldKind::PricingTiers => self.tier_rows(field.name()),
            _ => Vec::new(),
        };
        // File inputs are never pre-filled; they preview the stored asset.
        let required = match field.kind() {
            FieldKind::File(_) => field.is_required() && self.mode == FormMode::Create,
            _ => field.is_required(),
        };

        FormFieldView {
            name: field.name(),
            label: field.label(),
            kind: field.kind().as_str(),
            required,
            placeholder: field.placeholder_text(),
            value,
            step,
            options,
            current_asset_url: self.assets.get(field.name()).cloned(),
            tiers,
        }
    }

    fn tier_rows(&self, field: &str) -> Vec<PricingTierView> {
        let mut rows: BTreeMap<usize, PricingTierView> = BTreeMap::new();
        for (key, value) in &self.draft {
            let Some((index, sub_field)) = parse_tier_key(field, key) else {
                continue;
            };
            let row = rows.entry(index).or_default();
            match sub_field {
                "name" => row.name = value.clone(),
                "price" => row.price = value.clone(),
                _ => row.note = value.clone(),
            }
        }

        let mut tiers: Vec<PricingTierView> = rows
            .into_values()
            .filter(|row| !(row.name.is_empty() && row.price.is_empty() && row.note.is_empty()))
            .collect();
        tiers.push(PricingTierView::default());
        for (index, tier) in tiers.iter_mut().enumerate() {
            tier.index = index;
        }
        tiers
    }
}

/// Builds the typed record payload from a submission.
///
/// File fields are left out; they are filled in by upload staging.
pub fn extract_fields(
    record_type: &RecordType,
    submission: &FormSubmission,
) -> AppResult<Map<String, Value>> {
    let mut fields = Map::new();

    for field in record_type.fields() {
        let value = match field.kind() {
            FieldKind::File(_) => continue,
            FieldKind::PricingTiers => extract_pricing(field, submission)?,
            FieldKind::RichText => {
                let markup = submission
                    .value(field.name())
                    .filter(|markup| *markup != EMPTY_EDITOR_MARKUP);
                match markup {
                    Some(markup) => Value::String(markup.to_owned()),
                    None => missing(field)?,
                }
            }
            kind => match submission.value(field.name()) {
                Some(raw) => coerce(field, kind, raw)?,
                None => missing(field)?,
            },
        };
        fields.insert(field.name().to_owned(), value);
    }

    Ok(fields)
}

fn missing(field: &FieldDescriptor) -> AppResult<Value> {
    if field.is_required() {
        return Err(AppError::Validation(format!("{} is required.", field.label())));
    }

    Ok(Value::Null)
}

fn coerce(field: &FieldDescriptor, kind: FieldKind, raw: &str) -> AppResult<Value> {
    match kind {
        FieldKind::Select {
            options,
            integer_values,
        } => {
            if !options.iter().any(|option| option.value == raw) {
                return Err(AppError::Validation(format!(
                    "'{raw}' is not a valid choice for {}.",
                    field.label()
                )));
            }
            if integer_values {
                return parse_integer(field, raw);
            }
            Ok(Value::String(raw.to_owned()))
        }
        FieldKind::Number(NumberKind::Integer) => parse_integer(field, raw),
        FieldKind::Number(NumberKind::Decimal) => parse_decimal(field.label(), raw),
        FieldKind::Url => {
            validate_video_url(field.label(), raw)?;
            Ok(Value::String(raw.to_owned()))
        }
        _ => Ok(Value::String(raw.to_owned())),
    }
}

fn parse_integer(field: &FieldDescriptor, raw: &str) -> AppResult<Value> {
    raw.parse::<i64>()
        .map(Value::from)
        .map_err(|_| AppError::Validation(format!("{} must be a whole number.", field.label())))
}

fn parse_decimal(label: &str, raw: &str) -> AppResult<Value> {
    if let Ok(whole) = raw.parse::<i64>() {
        return Ok(Value::from(whole));
    }

    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| AppError::Validation(format!("{label} must be a number.")))
}

fn extract_pricing(field: &FieldDescriptor, submission: &FormSubmission) -> AppResult<Value> {
    let mut rows: BTreeMap<usize, BTreeMap<&str, &str>> = BTreeMap::new();
    for (key, value) in &submission.values {
        let Some((index, sub_field)) = parse_tier_key(field.name(), key) else {
            continue;
        };
        let value = value.trim();
        if !value.is_empty() {
            rows.entry(index).or_default().insert(sub_field, value);
        }
    }

    let mut tiers = Vec::new();
    for (position, row) in rows.into_values().enumerate() {
        let tier_number = position + 1;
        let name = row.get("name").ok_or_else(|| {
            AppError::Validation(format!("Tier {tier_number} needs a name."))
        })?;
        let price = row.get("price").ok_or_else(|| {
            AppError::Validation(format!("Tier {tier_number} needs a price."))
        })?;

        let mut tier = Map::new();
        tier.insert("name".to_owned(), Value::String((*name).to_owned()));
        tier.insert("price".to_owned(), parse_decimal("Tier price", price)?);
        tier.insert(
            "note".to_owned(),
            Value::String(row.get("note").copied().unwrap_or_default().to_owned()),
        );
        tiers.push(Value::Object(tier));
    }

    if tiers.is_empty() && field.is_required() {
        return Err(AppError::Validation(format!(
            "{} needs at least one tier.",
            field.label()
        )));
    }

    let mut pricing = Map::new();
    pricing.insert("tiers".to_owned(), Value::Array(tiers));
    Ok(Value::Object(pricing))
}

/// Returns the input name of one pricing tier sub-field.
#[must_use]
pub fn tier_input_name(field: &str, index: usize, sub_field: &str) -> String {
    format!("{field}[{index}].{sub_field}")
}

fn parse_tier_key<'a>(field: &str, key: &'a str) -> Option<(usize, &'a str)> {
    let rest = key.strip_prefix(field)?.strip_prefix('[')?;
    let (index, sub_field) = rest.split_once("].")?;
    let index = index.parse::<usize>().ok()?;
    PRICING_TIER_FIELDS
        .contains(&sub_field)
        .then_some((index, sub_field))
}

fn pricing_draft(field: &str, pricing: Option<&Value>) -> BTreeMap<String, String> {
    let tiers = pricing
        .and_then(|pricing| pricing.get("tiers"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut draft = BTreeMap::new();
    for (index, tier) in tiers.iter().enumerate() {
        for sub_field in PRICING_TIER_FIELDS {
            let value = match tier.get(sub_field) {
                Some(Value::String(text)) => text.clone(),
                Some(Value::Number(number)) => number.to_string(),
                _ => String::new(),
            };
            draft.insert(tier_input_name(field, index, sub_field), value);
        }
    }
    draft
}

fn draft_value(kind: FieldKind, stored: &str) -> String {
    match kind {
        FieldKind::Time => stored.chars().take(5).collect(),
        FieldKind::Date => stored.chars().take(10).collect(),
        _ => stored.to_owned(),
    }
}
