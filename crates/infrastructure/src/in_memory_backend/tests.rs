use coachdesk_application::{
    AuthProvider, BackendConnector, Credentials, ObjectStorage, RecordStore,
};
use coachdesk_core::AppError;
use coachdesk_domain::{SortDirection, SortOrder};
use serde_json::{Map, Value, json};

use super::InMemoryBackend;

fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(fields) => fields,
        _ => Map::new(),
    }
}

#[tokio::test]
async fn insert_assigns_id_and_created_at() {
    let backend = InMemoryBackend::new();

    let row = backend
        .insert_row("posts", fields(json!({"title": "Week 1"})))
        .await
        .unwrap_or_default();

    assert!(row.get("id").and_then(Value::as_str).is_some());
    assert!(row.get("created_at").and_then(Value::as_str).is_some());
}

#[tokio::test]
async fn list_honours_sort_order() {
    let backend = InMemoryBackend::new();
    for (title, order) in [("Lunges", 2), ("Squat Form", 0), ("Plank", 1)] {
        let seeded = backend
            .seed_row("tutorials", json!({"title": title, "display_order": order}))
            .await;
        assert!(seeded.is_ok());
    }

    let ascending = backend
        .list_rows(
            "tutorials",
            SortOrder {
                field: "display_order",
                direction: SortDirection::Asc,
            },
        )
        .await
        .unwrap_or_default();
    let titles: Vec<&str> = ascending
        .iter()
        .filter_map(|row| row.get("title").and_then(Value::as_str))
        .collect();

    assert_eq!(titles, ["Squat Form", "Plank", "Lunges"]);
}

#[tokio::test]
async fn update_patches_only_given_fields() {
    let backend = InMemoryBackend::new();
    let seeded = backend
        .seed_row(
            "contacts",
            json!({"id": "c-1", "subject": "Hello", "is_read": false}),
        )
        .await;
    assert!(seeded.is_ok());

    let updated = backend
        .update_row("contacts", "c-1", fields(json!({"is_read": true})))
        .await
        .unwrap_or_default();

    assert_eq!(updated, json!({"id": "c-1", "subject": "Hello", "is_read": true}));
}

#[tokio::test]
async fn update_of_missing_row_is_a_persistence_error() {
    let backend = InMemoryBackend::new();
    let result = backend
        .update_row("contacts", "missing", fields(json!({"is_read": true})))
        .await;

    assert!(matches!(result, Err(AppError::Persistence(_))));
}

#[tokio::test]
async fn delete_removes_row() {
    let backend = InMemoryBackend::new();
    let seeded = backend.seed_row("events", json!({"id": 7, "title": "Bootcamp"})).await;
    assert!(seeded.is_ok());

    assert!(backend.delete_row("events", "7").await.is_ok());
    let found = backend.find_row("events", "7").await;
    assert!(matches!(found, Ok(None)));
}

#[tokio::test]
async fn uploaded_objects_are_served_back() {
    let backend = InMemoryBackend::new();
    let uploaded = backend
        .upload_object("post-images", "post-1-cover.jpg", "image/jpeg", vec![1, 2, 3])
        .await;
    assert!(uploaded.is_ok());

    let duplicate = backend
        .upload_object("post-images", "post-1-cover.jpg", "image/jpeg", vec![4])
        .await;
    assert!(duplicate.is_err());

    let stored = backend.object("post-images", "post-1-cover.jpg").await;
    assert_eq!(stored.map(|object| object.bytes), Some(vec![1, 2, 3]));
    assert_eq!(
        backend.public_url("post-images", "post-1-cover.jpg"),
        "/dev-storage/post-images/post-1-cover.jpg"
    );
}

#[tokio::test]
async fn sign_in_checks_password_and_sign_out_ends_session() {
    let backend = InMemoryBackend::new();
    backend.add_admin("Coach@Studio.example", "correct horse").await;

    let rejected = backend
        .sign_in(&Credentials {
            email: "coach@studio.example".to_owned(),
            password: "hunter2".to_owned(),
        })
        .await;
    assert!(matches!(
        rejected,
        Err(AppError::Unauthorized(message)) if message == "Invalid login credentials"
    ));

    let session = backend
        .sign_in(&Credentials {
            email: "coach@studio.example".to_owned(),
            password: "correct horse".to_owned(),
        })
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(session.identity.email(), "coach@studio.example");
    assert_eq!(backend.active_sessions().await, 1);

    let handles = backend.connect(&session);
    let listed = handles
        .records
        .list_rows(
            "posts",
            SortOrder {
                field: "created_at",
                direction: SortDirection::Desc,
            },
        )
        .await;
    assert!(listed.is_ok());

    assert!(backend.sign_out(&session.access_token).await.is_ok());
    assert_eq!(backend.active_sessions().await, 0);
    let after_sign_out = handles.records.find_row("posts", "p-1").await;
    assert!(matches!(after_sign_out, Err(AppError::Unauthorized(_))));
}
