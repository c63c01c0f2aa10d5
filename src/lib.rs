//! FScape admin core
//!
//! Platform-independent half of the admin dashboard: session and route
//! guarding, the REST client, the generic list controller and the dialog/form
//! workflow. The browser shell in `frontend/` drives these types from Leptos
//! signals; tests drive them directly.

pub mod client;
pub mod config;
pub mod controller;
pub mod dialog;
pub mod error;
pub mod form;
pub mod guard;
pub mod query;
pub mod request;
pub mod resource;
pub mod route;
pub mod session;

pub use fscape_admin_shared as shared;

pub use client::ApiClient;
pub use config::{AppConfig, DemoAccount, SupportContact};
pub use controller::{FetchTicket, ListController, LoadState};
pub use dialog::{ConfirmedDelete, ConfirmedToggle, DialogState};
pub use error::{AuthError, FieldErrors, HttpError, ResourceError, SubmitError, UploadError};
pub use form::{FormDraft, FormMode, FormWorkflow};
pub use guard::NavigationDecision;
pub use query::{ActivityFilter, ListRequest, QueryState, SortDirection};
pub use request::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};
pub use resource::DashboardSummary;
pub use route::AppRoute;
pub use session::{Credentials, Principal, SessionState, SessionStore};
