//! Route definitions
//!
//! Pure domain model of the dashboard's client-side routes. No DOM access
//! here; the browser router lives in the frontend crate.

use fscape_admin_shared::ResourceId;
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum AppRoute {
    #[default]
    Login,
    Forbidden,
    Dashboard,
    Accounts,
    AccountCreate,
    Buildings,
    BuildingCreate,
    Rooms,
    RoomCreate,
    RoomDetail(ResourceId),
    RoomTypes,
    Assets,
    AssetCreate,
    Locations,
    Universities,
}

impl AppRoute {
    /// Parses a location path. Query strings, fragments and a trailing slash
    /// are ignored. `None` means the path matches no route.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        let route = match path {
            "/" => Self::Dashboard,
            "/login" => Self::Login,
            "/403" => Self::Forbidden,
            "/accounts" => Self::Accounts,
            "/accounts/create" => Self::AccountCreate,
            "/buildings" => Self::Buildings,
            "/buildings/create" => Self::BuildingCreate,
            "/rooms" => Self::Rooms,
            "/rooms/create" => Self::RoomCreate,
            "/rooms/types" => Self::RoomTypes,
            "/assets" => Self::Assets,
            "/assets/create" => Self::AssetCreate,
            "/locations" => Self::Locations,
            "/universities" => Self::Universities,
            other => {
                let id = other.strip_prefix("/rooms/")?;
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                Self::RoomDetail(ResourceId::from(id))
            }
        };
        Some(route)
    }

    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/login".into(),
            Self::Forbidden => "/403".into(),
            Self::Dashboard => "/".into(),
            Self::Accounts => "/accounts".into(),
            Self::AccountCreate => "/accounts/create".into(),
            Self::Buildings => "/buildings".into(),
            Self::BuildingCreate => "/buildings/create".into(),
            Self::Rooms => "/rooms".into(),
            Self::RoomCreate => "/rooms/create".into(),
            Self::RoomDetail(id) => format!("/rooms/{}", id),
            Self::RoomTypes => "/rooms/types".into(),
            Self::Assets => "/assets".into(),
            Self::AssetCreate => "/assets/create".into(),
            Self::Locations => "/locations".into(),
            Self::Universities => "/universities".into(),
        }
    }

    /// Whether the route needs an authenticated principal.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login | Self::Forbidden)
    }

    /// Authenticated users are sent away from these routes.
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }

    /// Target for paths that match nothing.
    pub fn fallback() -> Self {
        Self::Dashboard
    }

    /// Sidebar entry this route belongs to.
    pub fn section(&self) -> AppRoute {
        match self {
            Self::AccountCreate => Self::Accounts,
            Self::BuildingCreate => Self::Buildings,
            Self::RoomCreate | Self::RoomDetail(_) => Self::Rooms,
            Self::AssetCreate => Self::Assets,
            other => other.clone(),
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}
