//! Per-resource presentation: table columns, fixed filters and routes.

use fscape_admin::AppRoute;
use fscape_admin::form::{
    AccountDraft, AssetDraft, BuildingDraft, FormDraft, LocationDraft, RoomDraft, RoomTypeDraft,
    UniversityDraft,
};
use fscape_admin_shared::date::display_date;
use fscape_admin_shared::{
    Account, AccountRole, Asset, AssetStatus, AssetType, Building, Location, Resource, Room,
    RoomStatus, RoomType, University,
};

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub label: &'static str,
    /// Sort field, when the column is sortable.
    pub sort: Option<&'static str>,
}

const fn col(label: &'static str) -> Column {
    Column { label, sort: None }
}

const fn sorted(label: &'static str, field: &'static str) -> Column {
    Column {
        label,
        sort: Some(field),
    }
}

/// A select over fixed `(value, label)` options.
#[derive(Debug, Clone, Copy)]
pub struct FilterSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub options: &'static [(&'static str, &'static str)],
}

const MISSING: &str = "—";

pub trait ResourceView: Resource + Send + Sync {
    type Draft: FormDraft<Target = Self> + Send + Sync;

    const HEADING: &'static str;
    const COLUMNS: &'static [Column];
    const FILTERS: &'static [FilterSpec] = &[];

    /// One display string per entry in [`Self::COLUMNS`].
    fn cells(&self) -> Vec<String>;

    fn list_route() -> AppRoute;

    /// Standalone create page; `None` creates through the dialog.
    fn create_route() -> Option<AppRoute> {
        None
    }

    fn detail_route(&self) -> Option<AppRoute> {
        None
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| MISSING.to_string())
}

fn number(value: Option<i64>) -> String {
    value.map(|n| n.to_string()).unwrap_or_else(|| MISSING.to_string())
}

fn active(flag: bool) -> String {
    if flag { "Active" } else { "Inactive" }.to_string()
}

/// Whole dong with thousands separators, e.g. `4,500,000 ₫`.
pub fn money(value: Option<f64>) -> String {
    let Some(amount) = value else {
        return MISSING.to_string();
    };
    let digits = format!("{:.0}", amount.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{} ₫", sign, grouped)
}

impl ResourceView for Account {
    type Draft = AccountDraft;

    const HEADING: &'static str = "Accounts";
    const COLUMNS: &'static [Column] = &[
        sorted("Name", "name"),
        sorted("Email", "email"),
        col("Phone"),
        col("Role"),
        col("Status"),
        sorted("Created", "createdAt"),
    ];
    const FILTERS: &'static [FilterSpec] = &[FilterSpec {
        key: "role",
        label: "Role",
        options: AccountRole::OPTIONS,
    }];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            text(&self.phone),
            self.role.label().to_string(),
            active(self.is_active),
            display_date(self.created_at.as_ref()),
        ]
    }

    fn list_route() -> AppRoute {
        AppRoute::Accounts
    }

    fn create_route() -> Option<AppRoute> {
        Some(AppRoute::AccountCreate)
    }
}

impl ResourceView for Building {
    type Draft = BuildingDraft;

    const HEADING: &'static str = "Buildings";
    const COLUMNS: &'static [Column] = &[
        sorted("Name", "name"),
        col("Location"),
        col("Address"),
        sorted("Floors", "total_floors"),
        col("Status"),
        sorted("Created", "created_at"),
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            text(&self.location_name),
            text(&self.address),
            number(self.total_floors),
            active(self.is_active),
            display_date(self.created_at.as_ref()),
        ]
    }

    fn list_route() -> AppRoute {
        AppRoute::Buildings
    }

    fn create_route() -> Option<AppRoute> {
        Some(AppRoute::BuildingCreate)
    }
}

impl ResourceView for Room {
    type Draft = RoomDraft;

    const HEADING: &'static str = "Rooms";
    const COLUMNS: &'static [Column] = &[
        sorted("Room", "room_number"),
        col("Building"),
        col("Type"),
        sorted("Floor", "floor"),
        col("Status"),
        sorted("Price", "price"),
        col("Capacity"),
    ];
    const FILTERS: &'static [FilterSpec] = &[FilterSpec {
        key: "status",
        label: "Status",
        options: RoomStatus::OPTIONS,
    }];

    fn cells(&self) -> Vec<String> {
        vec![
            self.room_number.clone(),
            text(&self.building_name),
            text(&self.room_type_name),
            number(self.floor),
            self.status.label().to_string(),
            money(self.price),
            number(self.max_occupancy),
        ]
    }

    fn list_route() -> AppRoute {
        AppRoute::Rooms
    }

    fn create_route() -> Option<AppRoute> {
        Some(AppRoute::RoomCreate)
    }

    fn detail_route(&self) -> Option<AppRoute> {
        Some(AppRoute::RoomDetail(self.id.clone()))
    }
}

impl ResourceView for RoomType {
    type Draft = RoomTypeDraft;

    const HEADING: &'static str = "Room types";
    const COLUMNS: &'static [Column] = &[
        col("Name"),
        col("Description"),
        col("Status"),
        sorted("Created", "created_at"),
        sorted("Updated", "updated_at"),
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            text(&self.description),
            active(self.is_active),
            display_date(self.created_at.as_ref()),
            display_date(self.updated_at.as_ref()),
        ]
    }

    fn list_route() -> AppRoute {
        AppRoute::RoomTypes
    }
}

impl ResourceView for Asset {
    type Draft = AssetDraft;

    const HEADING: &'static str = "Assets";
    const COLUMNS: &'static [Column] = &[
        sorted("Name", "name"),
        col("Type"),
        col("Condition"),
        col("Status"),
        col("Location"),
        sorted("Purchased", "purchase_date"),
        sorted("Price", "price"),
    ];
    const FILTERS: &'static [FilterSpec] = &[
        FilterSpec {
            key: "type",
            label: "Type",
            options: AssetType::OPTIONS,
        },
        FilterSpec {
            key: "status",
            label: "Status",
            options: AssetStatus::OPTIONS,
        },
    ];

    fn cells(&self) -> Vec<String> {
        let place = match (&self.building_name, &self.room_number) {
            (Some(building), Some(room)) => format!("{} · {}", building, room),
            (Some(building), None) => building.clone(),
            (None, Some(room)) => room.clone(),
            (None, None) => MISSING.to_string(),
        };
        vec![
            self.name.clone(),
            self.asset_type.label().to_string(),
            self.condition.label().to_string(),
            self.status.label().to_string(),
            place,
            display_date(self.purchase_date.as_ref()),
            money(self.price),
        ]
    }

    fn list_route() -> AppRoute {
        AppRoute::Assets
    }

    fn create_route() -> Option<AppRoute> {
        Some(AppRoute::AssetCreate)
    }
}

impl ResourceView for Location {
    type Draft = LocationDraft;

    const HEADING: &'static str = "Locations";
    const COLUMNS: &'static [Column] = &[
        sorted("Name", "name"),
        col("Description"),
        col("Status"),
        sorted("Created", "created_at"),
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            text(&self.description),
            active(self.is_active),
            display_date(self.created_at.as_ref()),
        ]
    }

    fn list_route() -> AppRoute {
        AppRoute::Locations
    }
}

impl ResourceView for University {
    type Draft = UniversityDraft;

    const HEADING: &'static str = "Universities";
    const COLUMNS: &'static [Column] = &[
        sorted("Name", "name"),
        col("Address"),
        col("Status"),
        sorted("Created", "created_at"),
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            text(&self.address),
            active(self.is_active),
            display_date(self.created_at.as_ref()),
        ]
    }

    fn list_route() -> AppRoute {
        AppRoute::Universities
    }
}
