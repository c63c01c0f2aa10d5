//! Backend access for components.

use fscape_admin_shared::{Building, Location, Resource, Room, RoomType};
use fscape_admin::{ApiClient, AppConfig, DemoAccount, ResourceError, SupportContact};
use leptos::prelude::*;
use tracing::info;

use crate::web::{FetchTransport, Preferences};

pub type AdminClient = ApiClient<FetchTransport>;

/// Runtime configuration shared through context. Clients are built on demand
/// so a changed API base applies to the next request.
#[derive(Clone, Copy)]
pub struct ApiContext {
    config: RwSignal<AppConfig>,
}

impl ApiContext {
    pub fn new() -> Self {
        let config = AppConfig::from_build_env().with_api_base_override(Preferences::api_base().as_deref());
        info!(api_base = %config.api_base, page_size = config.page_size, "configuration loaded");
        Self {
            config: RwSignal::new(config),
        }
    }

    pub fn client(&self) -> AdminClient {
        self.config
            .with_untracked(|c| ApiClient::new(&c.api_base, FetchTransport))
    }

    pub fn api_base(&self) -> String {
        self.config.with(|c| c.api_base.clone())
    }

    pub fn page_size(&self) -> u32 {
        self.config.with_untracked(|c| c.page_size)
    }

    pub fn demo_account(&self) -> DemoAccount {
        self.config.with_untracked(|c| c.demo_account.clone())
    }

    pub fn support(&self) -> SupportContact {
        self.config.with_untracked(|c| c.support.clone())
    }

    /// Persists a user-supplied base. A blank value drops the override and
    /// returns to the build-time default.
    pub fn set_api_base(&self, raw: &str) {
        match fscape_admin::config::normalize_base(raw) {
            Some(base) => {
                if !Preferences::set_api_base(&base) {
                    tracing::warn!("could not persist the API base");
                }
                self.config.update(|c| c.api_base = base);
            }
            None => {
                Preferences::clear_api_base();
                let default = AppConfig::from_build_env().api_base;
                self.config.update(|c| c.api_base = default);
            }
        }
        info!(api_base = %self.config.with_untracked(|c| c.api_base.clone()), "API base changed");
    }
}

pub fn use_api() -> ApiContext {
    use_context::<ApiContext>().expect("ApiContext should be provided")
}

/// `(value, label)` pairs for a reference select, keyed by collection path.
pub async fn reference_options(client: &AdminClient, path: &str) -> Result<Vec<(String, String)>, ResourceError> {
    fn pairs<T: Resource>(items: Vec<T>) -> Vec<(String, String)> {
        items
            .iter()
            .map(|item| (item.id().to_string(), item.title()))
            .collect()
    }

    match path {
        p if p == Location::PATH => client.options::<Location>().await.map(pairs),
        p if p == Building::PATH => client.options::<Building>().await.map(pairs),
        p if p == RoomType::PATH => client.options::<RoomType>().await.map(pairs),
        p if p == Room::PATH => client.options::<Room>().await.map(pairs),
        _ => Ok(Vec::new()),
    }
}
