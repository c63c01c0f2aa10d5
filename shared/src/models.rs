//! Resource schemas
//!
//! Shapes follow what the FScape API returns today. Fields the dashboard does
//! not strictly need are optional so a partially populated record still
//! renders.

use crate::date::lenient_timestamp;
use crate::protocol::{Resource, SortKey, SortMode};
use crate::{ResourceId, Timestamp, default_true, lenient_f64, lenient_i64, lenient_id};
use serde::{Deserialize, Serialize};

/// Declares a serde enum with a fallback variant plus `value()`/`label()`
/// tables used by filters and selects.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => ($value:literal, $label:literal)),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant,)+
            #[serde(other)]
            Unknown,
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// `(value, label)` pairs for select inputs.
            pub const OPTIONS: &'static [(&'static str, &'static str)] = &[$(($value, $label)),+];

            pub fn value(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                    $name::Unknown => "unknown",
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                    $name::Unknown => "Unknown",
                }
            }

            pub fn from_value(raw: &str) -> Self {
                match raw {
                    $($value => $name::$variant,)+
                    _ => $name::Unknown,
                }
            }

        }
    };
}

labelled_enum! {
    pub enum AccountRole {
        Admin => ("admin", "Admin"),
        Manager => ("manager", "Manager"),
        Staff => ("staff", "Staff"),
    }
}

labelled_enum! {
    pub enum AssetType {
        Furniture => ("furniture", "Furniture"),
        Electronics => ("electronics", "Electronics / Appliances"),
        Bedding => ("bedding", "Bedding"),
        Safety => ("safety", "Safety / Fire"),
        Other => ("other", "Other"),
    }
}

labelled_enum! {
    pub enum AssetCondition {
        New => ("new", "New"),
        Good => ("good", "Good"),
        Fair => ("fair", "Worn"),
        Poor => ("poor", "Needs repair"),
        Broken => ("broken", "Broken"),
    }
}

labelled_enum! {
    pub enum AssetStatus {
        Active => ("active", "In use"),
        Maintenance => ("maintenance", "Under maintenance"),
        Stored => ("stored", "In storage"),
        Lost => ("lost", "Lost"),
        Disposed => ("disposed", "Disposed"),
    }
}

labelled_enum! {
    pub enum RoomStatus {
        Available => ("available", "Available"),
        Occupied => ("occupied", "Occupied"),
        Maintenance => ("maintenance", "Maintenance"),
    }
}

fn text_key(text: &str) -> SortKey {
    SortKey::from(text)
}

// =========================================================
// Account
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default = "unknown_role")]
    pub role: AccountRole,
    #[serde(rename = "isActive", alias = "is_active", default = "default_true")]
    pub is_active: bool,
    #[serde(
        rename = "createdAt",
        alias = "created_at",
        default,
        deserialize_with = "lenient_timestamp"
    )]
    pub created_at: Option<Timestamp>,
    #[serde(
        rename = "updatedAt",
        alias = "updated_at",
        default,
        deserialize_with = "lenient_timestamp"
    )]
    pub updated_at: Option<Timestamp>,
}

fn unknown_role() -> AccountRole {
    AccountRole::Unknown
}

impl Resource for Account {
    const PATH: &'static str = "accounts";
    const NAME: &'static str = "account";
    const FILTER_KEYS: &'static [&'static str] = &["role", "isActive"];
    const SORTABLE: &'static [&'static str] = &["name", "email", "createdAt"];
    const ACTIVE_FIELD: Option<&'static str> = Some("isActive");

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn title(&self) -> String {
        if self.name.is_empty() {
            self.email.clone()
        } else {
            self.name.clone()
        }
    }

    fn active_flag(&self) -> Option<bool> {
        Some(self.is_active)
    }

    fn sort_key(&self, field: &str) -> SortKey {
        match field {
            "name" => text_key(&self.name),
            "email" => text_key(&self.email),
            "createdAt" => self.created_at.as_ref().into(),
            _ => SortKey::Missing,
        }
    }
}

// =========================================================
// Asset
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default = "unknown_asset_type")]
    pub asset_type: AssetType,
    #[serde(default = "unknown_condition")]
    pub condition: AssetCondition,
    #[serde(default = "unknown_asset_status")]
    pub status: AssetStatus,
    #[serde(alias = "buildingId", default, deserialize_with = "lenient_id")]
    pub building_id: Option<ResourceId>,
    #[serde(alias = "roomId", default, deserialize_with = "lenient_id")]
    pub room_id: Option<ResourceId>,
    #[serde(alias = "buildingName", default)]
    pub building_name: Option<String>,
    #[serde(alias = "roomNumber", default)]
    pub room_number: Option<String>,
    #[serde(alias = "purchaseDate", default, deserialize_with = "lenient_timestamp")]
    pub purchase_date: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    #[serde(alias = "createdAt", default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(alias = "updatedAt", default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<Timestamp>,
}

fn unknown_asset_type() -> AssetType {
    AssetType::Unknown
}

fn unknown_condition() -> AssetCondition {
    AssetCondition::Unknown
}

fn unknown_asset_status() -> AssetStatus {
    AssetStatus::Unknown
}

impl Resource for Asset {
    const PATH: &'static str = "assets";
    const NAME: &'static str = "asset";
    const FILTER_KEYS: &'static [&'static str] = &["type", "status", "building_id"];
    const SORTABLE: &'static [&'static str] = &["name", "price", "purchase_date"];

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn title(&self) -> String {
        self.name.clone()
    }

    fn sort_key(&self, field: &str) -> SortKey {
        match field {
            "name" => text_key(&self.name),
            "price" => self.price.into(),
            "purchase_date" => self.purchase_date.as_ref().into(),
            _ => SortKey::Missing,
        }
    }
}

// =========================================================
// Building
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub location_id: Option<ResourceId>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_floors: Option<i64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<Timestamp>,
}

impl Resource for Building {
    const PATH: &'static str = "buildings";
    const NAME: &'static str = "building";
    const FILTER_KEYS: &'static [&'static str] = &["is_active", "location_id"];
    const SORTABLE: &'static [&'static str] = &["name", "total_floors", "created_at"];
    const ACTIVE_FIELD: Option<&'static str> = Some("is_active");

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn title(&self) -> String {
        self.name.clone()
    }

    fn active_flag(&self) -> Option<bool> {
        Some(self.is_active)
    }

    fn sort_key(&self, field: &str) -> SortKey {
        match field {
            "name" => text_key(&self.name),
            "total_floors" => self.total_floors.map(|n| n as f64).into(),
            "created_at" => self.created_at.as_ref().into(),
            _ => SortKey::Missing,
        }
    }
}

// =========================================================
// Room
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: ResourceId,
    #[serde(alias = "roomNumber", alias = "name", default)]
    pub room_number: String,
    #[serde(alias = "buildingId", default, deserialize_with = "lenient_id")]
    pub building_id: Option<ResourceId>,
    #[serde(alias = "buildingName", default)]
    pub building_name: Option<String>,
    #[serde(alias = "roomTypeId", alias = "type_id", default, deserialize_with = "lenient_id")]
    pub room_type_id: Option<ResourceId>,
    #[serde(alias = "roomTypeName", default)]
    pub room_type_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub floor: Option<i64>,
    #[serde(default = "unknown_room_status")]
    pub status: RoomStatus,
    #[serde(alias = "price_per_month", default, deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    #[serde(alias = "size", default, deserialize_with = "lenient_f64")]
    pub area: Option<f64>,
    #[serde(alias = "maxOccupancy", alias = "capacity", default, deserialize_with = "lenient_i64")]
    pub max_occupancy: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(alias = "createdAt", default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(alias = "updatedAt", default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<Timestamp>,
}

fn unknown_room_status() -> RoomStatus {
    RoomStatus::Unknown
}

impl Resource for Room {
    const PATH: &'static str = "rooms";
    const NAME: &'static str = "room";
    const FILTER_KEYS: &'static [&'static str] = &["status", "building_id", "room_type_id"];
    const SORTABLE: &'static [&'static str] = &["room_number", "floor", "price", "created_at"];
    const SORT_MODE: SortMode = SortMode::Server;

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn title(&self) -> String {
        self.room_number.clone()
    }

    fn sort_key(&self, field: &str) -> SortKey {
        match field {
            "room_number" => text_key(&self.room_number),
            "floor" => self.floor.map(|n| n as f64).into(),
            "price" => self.price.into(),
            "created_at" => self.created_at.as_ref().into(),
            _ => SortKey::Missing,
        }
    }
}

// =========================================================
// Room type
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomType {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<Timestamp>,
}

impl Resource for RoomType {
    const PATH: &'static str = "room-types";
    const NAME: &'static str = "room type";
    const FILTER_KEYS: &'static [&'static str] = &["is_active"];
    const SORTABLE: &'static [&'static str] = &["created_at", "updated_at"];
    const ACTIVE_FIELD: Option<&'static str> = Some("is_active");

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn title(&self) -> String {
        self.name.clone()
    }

    fn active_flag(&self) -> Option<bool> {
        Some(self.is_active)
    }

    fn sort_key(&self, field: &str) -> SortKey {
        match field {
            "created_at" => self.created_at.as_ref().into(),
            "updated_at" => self.updated_at.as_ref().into(),
            _ => SortKey::Missing,
        }
    }
}

// =========================================================
// Location
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<Timestamp>,
}

impl Resource for Location {
    const PATH: &'static str = "locations";
    const NAME: &'static str = "location";
    const FILTER_KEYS: &'static [&'static str] = &["is_active"];
    const SORTABLE: &'static [&'static str] = &["name", "created_at"];
    const ACTIVE_FIELD: Option<&'static str> = Some("is_active");

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn title(&self) -> String {
        self.name.clone()
    }

    fn active_flag(&self) -> Option<bool> {
        Some(self.is_active)
    }

    fn sort_key(&self, field: &str) -> SortKey {
        match field {
            "name" => text_key(&self.name),
            "created_at" => self.created_at.as_ref().into(),
            _ => SortKey::Missing,
        }
    }
}

// =========================================================
// University
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct University {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub location_id: Option<ResourceId>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<Timestamp>,
}

impl Resource for University {
    const PATH: &'static str = "universities";
    const NAME: &'static str = "university";
    const FILTER_KEYS: &'static [&'static str] = &["is_active", "location_id"];
    const SORTABLE: &'static [&'static str] = &["name", "created_at"];
    const ACTIVE_FIELD: Option<&'static str> = Some("is_active");

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn title(&self) -> String {
        self.name.clone()
    }

    fn active_flag(&self) -> Option<bool> {
        Some(self.is_active)
    }

    fn sort_key(&self, field: &str) -> SortKey {
        match field {
            "name" => text_key(&self.name),
            "created_at" => self.created_at.as_ref().into(),
            _ => SortKey::Missing,
        }
    }
}
