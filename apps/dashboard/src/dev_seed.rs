use coachdesk_core::AppResult;
use coachdesk_domain::RecordTypeId;
use coachdesk_infrastructure::InMemoryBackend;
use serde_json::json;
use tracing::info;

/// Prepares the in-memory backend with the admin account and the rows the
/// dashboard expects to exist.
pub async fn run(
    backend: &InMemoryBackend,
    admin_email: &str,
    admin_password: &str,
) -> AppResult<()> {
    backend.add_admin(admin_email, admin_password).await;

    let services = [
        json!({"id": "one-on-one", "pricing": {"tiers": [
            {"name": "Single Session", "price": 2500, "note": "60 minutes"},
            {"name": "10 Sessions", "price": 22000, "note": ""}
        ]}}),
        json!({"id": "online", "pricing": {"tiers": [
            {"name": "Monthly", "price": 5000, "note": "billed monthly"}
        ]}}),
        json!({"id": "nutrition", "pricing": {"tiers": [
            {"name": "Consultation", "price": 3000, "note": ""}
        ]}}),
    ];
    for service in services {
        backend.seed_row(RecordTypeId::Services.as_str(), service).await?;
    }

    backend
        .seed_row(
            RecordTypeId::Bookings.as_str(),
            json!({
                "full_name": "Amina Wanjiru",
                "email": "amina@example.com",
                "phone": "+254700000001",
                "service": "One-on-One Personal Training",
                "message": "Looking to start in the mornings.",
                "is_contacted": false,
                "created_at": "2026-10-01T08:30:00Z"
            }),
        )
        .await?;
    backend
        .seed_row(
            RecordTypeId::Schedule.as_str(),
            json!({
                "class_name": "HIIT",
                "day_of_week": 3,
                "start_time": "07:00:00",
                "end_time": "08:00:00"
            }),
        )
        .await?;

    info!(admin = admin_email, "seeded in-memory backend");
    Ok(())
}
