//! Application services and ports.

#![forbid(unsafe_code)]

mod action_dispatcher;
mod backend_ports;
mod form_builder;
mod list_renderer;
mod navigation_router;
mod notification;
mod record_adapter;
mod session_gate;
mod upload_staging;
mod workbench;

pub use action_dispatcher::{ActionMarker, ActionRequest, ResolvedAction, resolve_action};
pub use backend_ports::{
    AuthProvider, AuthSession, BackendConnector, BackendHandles, Credentials, ObjectStorage,
    RecordStore,
};
pub use form_builder::{
    FormFieldView, FormHandle, FormMode, FormSubmission, FormView, PricingTierView,
    RICH_TEXT_TOOLBAR, SelectOptionView, StagedFile, extract_fields, tier_input_name,
};
pub use list_renderer::{ActionControl, CardView, DayColumn, ListBody, ListView, render_list};
pub use navigation_router::{NavigationRouter, RouterState};
pub use notification::{Notification, NotificationKind};
pub use record_adapter::RecordAdapter;
pub use session_gate::{GateState, SessionGate};
pub use upload_staging::{UploadStager, object_path};
pub use workbench::{
    ConfirmationView, ContentArea, ContentView, NavigationItemView, RenderTicket, Workbench,
    WorkbenchView,
};
