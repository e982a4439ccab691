use std::collections::BTreeMap;

use coachdesk_domain::{Record, RecordTypeId, record_type};
use serde_json::json;

use super::{FormHandle, FormMode, FormSubmission, extract_fields, tier_input_name};

fn submission(record_type: RecordTypeId, values: &[(&str, &str)]) -> FormSubmission {
    FormSubmission {
        record_type: record_type.as_str().to_owned(),
        form_token: String::new(),
        values: values
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect::<BTreeMap<_, _>>(),
        files: Vec::new(),
    }
}

#[test]
fn schedule_values_are_typed() {
    let fields = extract_fields(
        record_type(RecordTypeId::Schedule),
        &submission(
            RecordTypeId::Schedule,
            &[
                ("class_name", "HIIT"),
                ("day_of_week", "3"),
                ("start_time", "07:00"),
                ("end_time", "08:00"),
            ],
        ),
    );

    let fields = fields.unwrap_or_default();
    assert_eq!(fields.get("day_of_week"), Some(&json!(3)));
    assert_eq!(fields.get("class_name"), Some(&json!("HIIT")));
}

#[test]
fn missing_required_value_is_a_validation_error() {
    let result = extract_fields(
        record_type(RecordTypeId::Tutorials),
        &submission(RecordTypeId::Tutorials, &[("title", "Squat Form")]),
    );

    assert!(
        matches!(result, Err(coachdesk_core::AppError::Validation(message)) if message == "Category is required.")
    );
}

#[test]
fn invalid_video_url_is_rejected_before_any_backend_call() {
    let result = extract_fields(
        record_type(RecordTypeId::Testimonials),
        &submission(
            RecordTypeId::Testimonials,
            &[
                ("client_name", "Amina"),
                ("quote", "Best coach"),
                ("video_url", "not a link"),
            ],
        ),
    );

    assert!(result.is_err());
}

#[test]
fn optional_blank_values_become_null_and_files_are_skipped() {
    let fields = extract_fields(
        record_type(RecordTypeId::Merchandise),
        &submission(
            RecordTypeId::Merchandise,
            &[("name", "Tee"), ("price", "25.50"), ("description", " ")],
        ),
    )
    .unwrap_or_default();

    assert_eq!(fields.get("price"), Some(&json!(25.5)));
    assert_eq!(fields.get("description"), Some(&json!(null)));
    assert!(!fields.contains_key("image_url"));
}

#[test]
fn empty_rich_text_editor_is_treated_as_blank() {
    let fields = extract_fields(
        record_type(RecordTypeId::Posts),
        &submission(
            RecordTypeId::Posts,
            &[("title", "Week 1"), ("post_type", "blog"), ("content", "<p><br></p>")],
        ),
    )
    .unwrap_or_default();

    assert_eq!(fields.get("content"), Some(&json!(null)));
}

#[test]
fn select_rejects_values_outside_its_options() {
    let result = extract_fields(
        record_type(RecordTypeId::Posts),
        &submission(
            RecordTypeId::Posts,
            &[("title", "Week 1"), ("post_type", "podcast")],
        ),
    );

    assert!(result.is_err());
}

#[test]
fn pricing_tiers_skip_blank_rows_and_require_name_and_price() {
    let name = |index, sub| tier_input_name("pricing", index, sub);
    let mut values = BTreeMap::new();
    values.insert(name(0, "name"), "Monthly".to_owned());
    values.insert(name(0, "price"), "5000".to_owned());
    values.insert(name(0, "note"), String::new());
    values.insert(name(1, "name"), String::new());
    values.insert(name(1, "price"), String::new());
    let services = FormSubmission {
        record_type: "services".to_owned(),
        form_token: String::new(),
        values,
        files: Vec::new(),
    };

    let fields = extract_fields(record_type(RecordTypeId::Services), &services);
    assert_eq!(
        fields.unwrap_or_default().get("pricing"),
        Some(&json!({"tiers": [{"name": "Monthly", "price": 5000, "note": ""}]}))
    );

    let mut incomplete = services.clone();
    incomplete.values.insert(name(2, "name"), "Quarterly".to_owned());
    assert!(extract_fields(record_type(RecordTypeId::Services), &incomplete).is_err());
}

#[test]
fn edit_form_is_prefilled_except_for_files() {
    let record = Record::from_row(
        RecordTypeId::Posts,
        json!({"id": "p-1", "title": "Week 1", "post_type": "vlog",
               "content": "<h1>Hi</h1>", "image_url": "https://cdn.example/post.jpg"}),
    )
    .unwrap_or_else(|_| unreachable!());

    let handle = FormHandle::open(
        record_type(RecordTypeId::Posts),
        FormMode::Edit {
            record_id: "p-1".to_owned(),
        },
        Some(record),
    );
    let view = handle.view();

    assert_eq!(view.title, "Edit Post");
    assert!(view.rich_text_toolbar.is_some());
    let content = view.fields.iter().find(|field| field.name == "content");
    assert_eq!(content.map(|field| field.value.as_str()), Some("<h1>Hi</h1>"));
    let image = view.fields.iter().find(|field| field.name == "image_url");
    assert_eq!(image.map(|field| field.value.as_str()), Some(""));
    assert_eq!(
        image.and_then(|field| field.current_asset_url.as_deref()),
        Some("https://cdn.example/post.jpg")
    );
    let post_type = view.fields.iter().find(|field| field.name == "post_type");
    assert!(
        post_type
            .map(|field| field.options.iter().any(|option| option.value == "vlog" && option.selected))
            .unwrap_or(false)
    );
}

#[test]
fn retained_draft_is_rendered_back() {
    let mut handle = FormHandle::open(record_type(RecordTypeId::Events), FormMode::Create, None);
    handle.retain(&submission(RecordTypeId::Events, &[("title", "Bootcamp")]));

    let view = handle.view();
    assert_eq!(view.title, "Add New Event");
    assert_eq!(view.fields[0].value, "Bootcamp");
    assert!(view.rich_text_toolbar.is_none());
}

#[test]
fn service_form_exposes_existing_tiers_plus_blank_row() {
    let record = Record::from_row(
        RecordTypeId::Services,
        json!({"id": "online", "pricing": {"tiers": [
            {"name": "Monthly", "price": 5000, "note": "billed monthly"}
        ]}}),
    )
    .unwrap_or_else(|_| unreachable!());
    let handle = FormHandle::open(
        record_type(RecordTypeId::Services),
        FormMode::Edit {
            record_id: "online".to_owned(),
        },
        Some(record),
    );

    let tiers = &handle.view().fields[0].tiers;
    assert_eq!(tiers.len(), 2);
    assert_eq!(tiers[0].price, "5000");
    assert_eq!(tiers[1].index, 1);
    assert!(tiers[1].name.is_empty());
}
