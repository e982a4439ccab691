use coachdesk_core::{AdminIdentity, AppError, AppResult};
use coachdesk_domain::{NAVIGATION, Record, RecordType, record_type};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::action_dispatcher::{ActionRequest, ResolvedAction, resolve_action};
use crate::backend_ports::BackendHandles;
use crate::form_builder::{FormHandle, FormMode, FormSubmission, extract_fields};
use crate::list_renderer::render_list;
use crate::navigation_router::{NavigationRouter, RouterState};
use crate::notification::Notification;
use crate::record_adapter::RecordAdapter;
use crate::upload_staging::UploadStager;

mod content_area;


pub use content_area::{ContentArea, ContentView, RenderTicket};

/// Delete awaiting an explicit answer from the admin.
#[derive(Debug, Clone)]
struct PendingConfirmation {
    record_type: &'static RecordType,
    record_id: String,
}

/// Render model of the delete confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmationView {
    /// Dialog title.
    pub title: &'static str,
    /// Dialog text.
    pub text: &'static str,
    /// Label of the confirming button.
    pub confirm_label: &'static str,
    /// Record type marker of the record to delete.
    pub record_type: &'static str,
    /// Record to delete.
    pub record_id: String,
}

/// One navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationItemView {
    /// Navigation identifier.
    pub target_id: &'static str,
    /// Link text.
    pub label: &'static str,
    /// Whether this is the selected section.
    pub active: bool,
}

/// Full render model of the dashboard for one admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkbenchView {
    /// Header display name.
    pub admin_name: String,
    /// Signed-in email.
    pub admin_email: String,
    /// Navigation links.
    pub navigation: Vec<NavigationItemView>,
    /// Content area.
    pub content: ContentView,
    /// Open delete confirmation.
    pub confirmation: Option<ConfirmationView>,
    /// Toasts raised since the previous render.
    pub notifications: Vec<Notification>,
    /// The backend rejected the admin's access token; the admin must sign in again.
    pub session_expired: bool,
}

#[derive(Default)]
struct WorkbenchState {
    router: NavigationRouter,
    content: ContentArea,
    open_form: Option<FormHandle>,
    pending_confirmation: Option<PendingConfirmation>,
    notifications: Vec<Notification>,
    forms_opened: u64,
    session_expired: bool,
}

impl WorkbenchState {
    fn next_form_token(&mut self) -> String {
        self.forms_opened += 1;
        format!("form-{}", self.forms_opened)
    }

    fn report_failure(&mut self, error: &AppError, context: &str) -> String {
        if matches!(error, AppError::Unauthorized(_)) {
            self.session_expired = true;
        }
        let message = failure_message(error, context);
        self.notifications.push(Notification::error(message.clone()));
        message
    }
}

/// Per-admin workflow engine behind the dashboard.
///
/// The lock is only held for state transitions, never across backend calls.
pub struct Workbench {
    identity: AdminIdentity,
    backend: BackendHandles,
    state: Mutex<WorkbenchState>,
}

impl Workbench {
    /// Creates a workbench for a signed-in admin.
    #[must_use]
    pub fn new(identity: AdminIdentity, backend: BackendHandles) -> Self {
        Self {
            identity,
            backend,
            state: Mutex::new(WorkbenchState::default()),
        }
    }

    /// Returns the signed-in admin.
    #[must_use]
    pub fn identity(&self) -> &AdminIdentity {
        &self.identity
    }

    /// Greets the admin and mounts the default section.
    pub async fn mount(&self, default_section: &str) {
        self.notify(Notification::welcome()).await;
        self.select_section(default_section).await;
    }

    /// Switches sections. Any open form or pending confirmation is discarded.
    pub async fn select_section(&self, target_id: &str) {
        let load = {
            let mut state = self.state.lock().await;
            state.open_form = None;
            state.pending_confirmation = None;

            match state.router.select(target_id) {
                RouterState::Active(id) => {
                    let record_type = record_type(id);
                    let ticket = state.content.begin(ContentView::Loading {
                        heading: record_type.heading(),
                    });
                    Some((record_type, ticket))
                }
                RouterState::Placeholder { title, .. } => {
                    state.content.show(ContentView::Placeholder { title });
                    None
                }
                RouterState::NoSection => {
                    state.content.show(ContentView::Welcome);
                    None
                }
            }
        };

        if let Some((record_type, ticket)) = load {
            self.load_list(record_type, ticket).await;
        }
    }

    /// Handles one list control press.
    pub async fn dispatch(&self, request: &ActionRequest) {
        let action = match resolve_action(request) {
            Ok(action) => action,
            Err(error) => {
                self.notify(Notification::error(error.user_message())).await;
                return;
            }
        };

        match action {
            ResolvedAction::OpenCreateForm { record_type } => {
                let mut state = self.state.lock().await;
                let form = FormHandle::open(record_type, FormMode::Create, None)
                    .with_token(state.next_form_token());
                state.pending_confirmation = None;
                state.content.show(ContentView::Form(form.view()));
                state.open_form = Some(form);
            }
            ResolvedAction::OpenEditForm {
                record_type,
                record_id,
            } => self.open_edit_form(record_type, record_id).await,
            ResolvedAction::ConfirmDelete {
                record_type,
                record_id,
            } => {
                let mut state = self.state.lock().await;
                state.pending_confirmation = Some(PendingConfirmation {
                    record_type,
                    record_id,
                });
            }
            ResolvedAction::Toggle {
                record_type,
                record_id,
                toggle,
                current,
            } => {
                let next_state = toggle.next_state_name(current);
                let result = self
                    .adapter(record_type)
                    .toggle(&record_id, toggle.field(), current)
                    .await;

                match result {
                    Ok(_) => {
                        info!(
                            record_type = %record_type.id(),
                            record_id = %record_id,
                            field = toggle.field(),
                            "toggled status flag"
                        );
                        self.notify(Notification::success(format!(
                            "{} marked as {next_state}.",
                            record_type.noun()
                        )))
                        .await;
                    }
                    Err(error) => {
                        self.state
                            .lock()
                            .await
                            .report_failure(&error, "Could not update status.");
                    }
                }
                self.reload_active_section().await;
            }
        }
    }

    /// Answers the pending delete confirmation. Declining makes no backend call.
    pub async fn resolve_confirmation(&self, confirmed: bool) {
        let pending = self.state.lock().await.pending_confirmation.take();
        let Some(pending) = pending else {
            debug!("confirmation answered with nothing pending");
            return;
        };

        if !confirmed {
            self.notify(Notification::deletion_cancelled()).await;
            return;
        }

        let result = self
            .adapter(pending.record_type)
            .delete(&pending.record_id)
            .await;
        match result {
            Ok(()) => {
                info!(
                    record_type = %pending.record_type.id(),
                    record_id = %pending.record_id,
                    "deleted record"
                );
                self.notify(Notification::success("Item deleted successfully!"))
                    .await;
            }
            Err(error) => {
                self.state
                    .lock()
                    .await
                    .report_failure(&error, "Failed to delete item. Please try again.");
            }
        }
        self.reload_active_section().await;
    }

    /// Submits the open form: extract, validate, stage uploads, then persist.
    ///
    /// On failure the form stays open with the submitted values.
    pub async fn submit_form(&self, submission: FormSubmission) {
        let started = {
            let mut state = self.state.lock().await;
            let submitted_form_is_open = state.open_form.as_ref().is_some_and(|form| {
                form.record_type().collection() == submission.record_type
                    && form.token() == submission.form_token
            });
            // Taking the form marks it in flight; a resubmission finds nothing open.
            let form = if submitted_form_is_open {
                state.open_form.take()
            } else {
                None
            };
            form.map(|form| {
                let ticket = state.content.begin(ContentView::Loading {
                    heading: form.record_type().heading(),
                });
                (form, ticket)
            })
        };
        let Some((mut form, ticket)) = started else {
            self.notify(Notification::error("This form is no longer open."))
                .await;
            return;
        };

        let record_type = form.record_type();
        let result = self.save(&form, &submission).await;

        let mut state = self.state.lock().await;
        match result {
            Ok(record) => {
                let verb = match form.mode() {
                    FormMode::Create => "added",
                    FormMode::Edit { .. } => "updated",
                };
                info!(
                    record_type = %record_type.id(),
                    record_id = record.id(),
                    verb,
                    "saved form"
                );
                state.notifications.push(Notification::success(format!(
                    "{} {verb} successfully!",
                    record_type.noun()
                )));
                if state.content.is_current(ticket) {
                    drop(state);
                    self.reload_active_section().await;
                }
            }
            Err(error) => {
                state.report_failure(
                    &error,
                    &format!("Failed to save {}.", record_type.noun().to_lowercase()),
                );
                form.retain(&submission);
                if state.content.commit(ticket, ContentView::Form(form.view())) {
                    state.open_form = Some(form);
                } else {
                    debug!(
                        generation = ticket.generation(),
                        "form closed while saving, dropping retained draft"
                    );
                }
            }
        }
    }

    /// Queues a toast for the next render.
    pub async fn notify(&self, notification: Notification) {
        self.state.lock().await.notifications.push(notification);
    }

    /// Returns the current render model and drains pending toasts.
    pub async fn snapshot(&self) -> WorkbenchView {
        let mut state = self.state.lock().await;
        let active = state.router.active_target_id();

        WorkbenchView {
            admin_name: self.identity.display_name().to_owned(),
            admin_email: self.identity.email().to_owned(),
            navigation: NAVIGATION
                .iter()
                .map(|entry| NavigationItemView {
                    target_id: entry.target_id,
                    label: entry.label,
                    active: active == Some(entry.target_id),
                })
                .collect(),
            content: state.content.view().clone(),
            confirmation: state
                .pending_confirmation
                .as_ref()
                .map(|pending| ConfirmationView {
                    title: "Are you sure?",
                    text: "This action cannot be undone.",
                    confirm_label: "Delete",
                    record_type: pending.record_type.collection(),
                    record_id: pending.record_id.clone(),
                }),
            notifications: std::mem::take(&mut state.notifications),
            session_expired: state.session_expired,
        }
    }

    fn adapter(&self, record_type: &'static RecordType) -> RecordAdapter {
        RecordAdapter::new(record_type, self.backend.records.clone())
    }

    async fn save(&self, form: &FormHandle, submission: &FormSubmission) -> AppResult<Record> {
        let record_type = form.record_type();
        let mut fields = extract_fields(record_type, submission)?;
        UploadStager::new(self.backend.storage.clone())
            .stage(record_type, form.mode(), submission, &mut fields)
            .await?;

        let adapter = self.adapter(record_type);
        match form.mode() {
            FormMode::Create => adapter.create(fields).await,
            FormMode::Edit { record_id } => adapter.update(record_id, fields).await,
        }
    }

    async fn open_edit_form(&self, record_type: &'static RecordType, record_id: String) {
        let ticket = {
            let mut state = self.state.lock().await;
            state.open_form = None;
            state.pending_confirmation = None;
            state.content.begin(ContentView::Loading {
                heading: record_type.heading(),
            })
        };

        let result = self.adapter(record_type).get_one(&record_id).await;

        let mut state = self.state.lock().await;
        match result {
            Ok(record) => {
                let form = FormHandle::open(record_type, FormMode::Edit { record_id }, Some(record))
                    .with_token(state.next_form_token());
                if state.content.commit(ticket, ContentView::Form(form.view())) {
                    state.open_form = Some(form);
                }
            }
            Err(error) => {
                state.report_failure(
                    &error,
                    &format!("Could not load {} data.", record_type.noun().to_lowercase()),
                );
                drop(state);
                self.reload_active_section().await;
            }
        }
    }

    async fn reload_active_section(&self) {
        let load = {
            let mut state = self.state.lock().await;
            match state.router.state() {
                RouterState::Active(id) => {
                    let record_type = record_type(id);
                    state.open_form = None;
                    let ticket = state.content.begin(ContentView::Loading {
                        heading: record_type.heading(),
                    });
                    Some((record_type, ticket))
                }
                RouterState::NoSection | RouterState::Placeholder { .. } => None,
            }
        };

        if let Some((record_type, ticket)) = load {
            self.load_list(record_type, ticket).await;
        }
    }

    async fn load_list(&self, record_type: &'static RecordType, ticket: RenderTicket) {
        let result = self.adapter(record_type).list().await;

        let mut state = self.state.lock().await;
        if !state.content.is_current(ticket) {
            debug!(
                record_type = %record_type.id(),
                generation = ticket.generation(),
                "discarded stale list render"
            );
            return;
        }

        let view = match result {
            Ok(records) => ContentView::List(render_list(record_type, &records)),
            Err(error) => {
                let context = format!("Could not load {}.", record_type.collection());
                ContentView::LoadFailed {
                    heading: record_type.heading(),
                    message: state.report_failure(&error, &context),
                }
            }
        };
        state.content.commit(ticket, view);
    }
}

fn failure_message(error: &AppError, context: &str) -> String {
    match error {
        AppError::Validation(_) | AppError::Upload { .. } => error.user_message(),
        _ => format!("{context} {}", error.user_message()),
    }
}
