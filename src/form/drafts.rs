use chrono::NaiveDate;
use fscape_admin_shared::{
    Account, AccountRole, Asset, AssetCondition, AssetStatus, AssetType, Building, Location,
    ResourceId, Room, RoomStatus, RoomType, University,
};
use serde::Serialize;

use super::{
    FieldKind, FieldSpec, FormDraft, FormMode, check_decimal, check_optional, flag, optional_id,
    optional_text, parse_optional, require,
};
use crate::error::FieldErrors;

fn flag_text(active: bool) -> String {
    active.to_string()
}

fn number_text<N: ToString>(n: Option<N>) -> String {
    n.map(|n| n.to_string()).unwrap_or_default()
}

fn id_text(id: Option<&ResourceId>) -> String {
    id.map(ResourceId::to_string).unwrap_or_default()
}

fn choice_is_known(errors: &mut FieldErrors, key: &'static str, known: bool, message: &str) {
    if !known {
        errors.insert(key, message);
    }
}

// =========================================================
// Building
// =========================================================

text_draft! {
    BuildingDraft {
        name,
        location_id,
        address,
        description,
        total_floors,
        latitude,
        longitude,
        is_active,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildingPayload {
    pub name: String,
    pub location_id: ResourceId,
    pub address: String,
    pub description: Option<String>,
    pub total_floors: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_active: bool,
    pub images: Vec<String>,
}

impl FormDraft for BuildingDraft {
    type Target = Building;
    type Payload = BuildingPayload;

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("name", "Name", FieldKind::Text).required(),
        FieldSpec::new("location_id", "Location", FieldKind::Reference("locations")).required(),
        FieldSpec::new("address", "Address", FieldKind::Text).required(),
        FieldSpec::new("total_floors", "Floors", FieldKind::Number),
        FieldSpec::new("latitude", "Latitude", FieldKind::Number),
        FieldSpec::new("longitude", "Longitude", FieldKind::Number),
        FieldSpec::new("is_active", "Status", FieldKind::Toggle),
        FieldSpec::new("description", "Description", FieldKind::TextArea),
    ];
    const ACCEPTS_IMAGES: bool = true;

    fn blank() -> Self {
        Self {
            is_active: flag_text(true),
            ..Self::default()
        }
    }

    fn from_resource(b: &Building) -> Self {
        Self {
            name: b.name.clone(),
            location_id: id_text(b.location_id.as_ref()),
            address: b.address.clone().unwrap_or_default(),
            description: b.description.clone().unwrap_or_default(),
            total_floors: number_text(b.total_floors),
            latitude: number_text(b.latitude),
            longitude: number_text(b.longitude),
            is_active: flag_text(b.is_active),
        }
    }

    fn existing_images(b: &Building) -> Vec<String> {
        b.images.clone()
    }

    fn validate(&self, _mode: &FormMode) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name, "Building name is required");
        require(&mut errors, "location_id", &self.location_id, "Choose a location");
        require(&mut errors, "address", &self.address, "Address is required");
        check_optional::<i64>(
            &mut errors,
            "total_floors",
            &self.total_floors,
            |n| *n > 0,
            "Floors must be a positive whole number",
        );
        check_decimal(
            &mut errors,
            "latitude",
            &self.latitude,
            |n| (-90.0..=90.0).contains(&n),
            "Latitude must be between -90 and 90",
        );
        check_decimal(
            &mut errors,
            "longitude",
            &self.longitude,
            |n| (-180.0..=180.0).contains(&n),
            "Longitude must be between -180 and 180",
        );
        errors
    }

    fn to_payload(&self, images: Vec<String>) -> BuildingPayload {
        BuildingPayload {
            name: self.name.trim().to_string(),
            location_id: ResourceId::from(self.location_id.trim()),
            address: self.address.trim().to_string(),
            description: optional_text(&self.description),
            total_floors: parse_optional(&self.total_floors).ok().flatten(),
            latitude: parse_optional(&self.latitude).ok().flatten(),
            longitude: parse_optional(&self.longitude).ok().flatten(),
            is_active: flag(&self.is_active),
            images,
        }
    }
}

// =========================================================
// Room
// =========================================================

text_draft! {
    RoomDraft {
        room_number,
        building_id,
        room_type_id,
        floor,
        status,
        price,
        area,
        max_occupancy,
        description,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomPayload {
    pub room_number: String,
    pub building_id: ResourceId,
    pub room_type_id: ResourceId,
    pub floor: Option<i64>,
    pub status: RoomStatus,
    pub price: Option<f64>,
    pub area: Option<f64>,
    pub max_occupancy: i64,
    pub description: Option<String>,
    pub images: Vec<String>,
}

impl FormDraft for RoomDraft {
    type Target = Room;
    type Payload = RoomPayload;

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("room_number", "Room number", FieldKind::Text).required(),
        FieldSpec::new("building_id", "Building", FieldKind::Reference("buildings")).required(),
        FieldSpec::new("room_type_id", "Room type", FieldKind::Reference("room-types")).required(),
        FieldSpec::new("floor", "Floor", FieldKind::Number),
        FieldSpec::new("status", "Status", FieldKind::Choice(RoomStatus::OPTIONS)),
        FieldSpec::new("price", "Monthly price", FieldKind::Number),
        FieldSpec::new("area", "Area (m²)", FieldKind::Number),
        FieldSpec::new("max_occupancy", "Max occupancy", FieldKind::Number),
        FieldSpec::new("description", "Description", FieldKind::TextArea),
    ];
    const ACCEPTS_IMAGES: bool = true;

    fn blank() -> Self {
        Self {
            status: RoomStatus::Available.value().to_string(),
            max_occupancy: "1".to_string(),
            ..Self::default()
        }
    }

    fn from_resource(r: &Room) -> Self {
        Self {
            room_number: r.room_number.clone(),
            building_id: id_text(r.building_id.as_ref()),
            room_type_id: id_text(r.room_type_id.as_ref()),
            floor: number_text(r.floor),
            status: r.status.value().to_string(),
            price: number_text(r.price),
            area: number_text(r.area),
            max_occupancy: number_text(r.max_occupancy),
            description: r.description.clone().unwrap_or_default(),
        }
    }

    fn existing_images(r: &Room) -> Vec<String> {
        r.images.clone()
    }

    fn validate(&self, _mode: &FormMode) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "room_number", &self.room_number, "Room number is required");
        require(&mut errors, "building_id", &self.building_id, "Choose a building");
        require(&mut errors, "room_type_id", &self.room_type_id, "Choose a room type");
        check_optional::<i64>(&mut errors, "floor", &self.floor, |n| *n >= 0, "Floor must be 0 or higher");
        check_decimal(&mut errors, "price", &self.price, |n| n > 0.0, "Price must be greater than 0");
        check_decimal(&mut errors, "area", &self.area, |n| n > 0.0, "Area must be greater than 0");
        check_optional::<i64>(
            &mut errors,
            "max_occupancy",
            &self.max_occupancy,
            |n| *n >= 1,
            "At least one occupant",
        );
        choice_is_known(
            &mut errors,
            "status",
            RoomStatus::from_value(&self.status) != RoomStatus::Unknown,
            "Choose a status",
        );
        errors
    }

    fn to_payload(&self, images: Vec<String>) -> RoomPayload {
        RoomPayload {
            room_number: self.room_number.trim().to_string(),
            building_id: ResourceId::from(self.building_id.trim()),
            room_type_id: ResourceId::from(self.room_type_id.trim()),
            floor: parse_optional(&self.floor).ok().flatten(),
            status: RoomStatus::from_value(&self.status),
            price: parse_optional(&self.price).ok().flatten(),
            area: parse_optional(&self.area).ok().flatten(),
            max_occupancy: parse_optional(&self.max_occupancy).ok().flatten().unwrap_or(1),
            description: optional_text(&self.description),
            images,
        }
    }
}

// =========================================================
// Room type, location
// =========================================================

text_draft! {
    RoomTypeDraft { name, description, is_active }
}

/// Body shared by the name/description/flag resources.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedPayload {
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

const NAMED_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("name", "Name", FieldKind::Text).required(),
    FieldSpec::new("description", "Description", FieldKind::TextArea),
    FieldSpec::new("is_active", "Status", FieldKind::Toggle),
];

impl FormDraft for RoomTypeDraft {
    type Target = RoomType;
    type Payload = NamedPayload;

    const FIELDS: &'static [FieldSpec] = NAMED_FIELDS;

    fn blank() -> Self {
        Self {
            is_active: flag_text(true),
            ..Self::default()
        }
    }

    fn from_resource(t: &RoomType) -> Self {
        Self {
            name: t.name.clone(),
            description: t.description.clone().unwrap_or_default(),
            is_active: flag_text(t.is_active),
        }
    }

    fn validate(&self, _mode: &FormMode) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name, "Name is required");
        errors
    }

    fn to_payload(&self, _images: Vec<String>) -> NamedPayload {
        NamedPayload {
            name: self.name.trim().to_string(),
            description: optional_text(&self.description),
            is_active: flag(&self.is_active),
        }
    }
}

text_draft! {
    LocationDraft { name, description, is_active }
}

impl FormDraft for LocationDraft {
    type Target = Location;
    type Payload = NamedPayload;

    const FIELDS: &'static [FieldSpec] = NAMED_FIELDS;

    fn blank() -> Self {
        Self {
            is_active: flag_text(true),
            ..Self::default()
        }
    }

    fn from_resource(l: &Location) -> Self {
        Self {
            name: l.name.clone(),
            description: l.description.clone().unwrap_or_default(),
            is_active: flag_text(l.is_active),
        }
    }

    fn validate(&self, _mode: &FormMode) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name, "Location name is required");
        errors
    }

    fn to_payload(&self, _images: Vec<String>) -> NamedPayload {
        NamedPayload {
            name: self.name.trim().to_string(),
            description: optional_text(&self.description),
            is_active: flag(&self.is_active),
        }
    }
}

// =========================================================
// University
// =========================================================

text_draft! {
    UniversityDraft { name, address, location_id, is_active }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniversityPayload {
    pub name: String,
    pub address: Option<String>,
    pub location_id: Option<ResourceId>,
    pub is_active: bool,
}

impl FormDraft for UniversityDraft {
    type Target = University;
    type Payload = UniversityPayload;

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("name", "Name", FieldKind::Text).required(),
        FieldSpec::new("address", "Address", FieldKind::Text),
        FieldSpec::new("location_id", "Location", FieldKind::Reference("locations")),
        FieldSpec::new("is_active", "Status", FieldKind::Toggle),
    ];

    fn blank() -> Self {
        Self {
            is_active: flag_text(true),
            ..Self::default()
        }
    }

    fn from_resource(u: &University) -> Self {
        Self {
            name: u.name.clone(),
            address: u.address.clone().unwrap_or_default(),
            location_id: id_text(u.location_id.as_ref()),
            is_active: flag_text(u.is_active),
        }
    }

    fn validate(&self, _mode: &FormMode) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name, "University name is required");
        errors
    }

    fn to_payload(&self, _images: Vec<String>) -> UniversityPayload {
        UniversityPayload {
            name: self.name.trim().to_string(),
            address: optional_text(&self.address),
            location_id: optional_id(&self.location_id),
            is_active: flag(&self.is_active),
        }
    }
}

// =========================================================
// Account
// =========================================================

text_draft! {
    AccountDraft { name, email, phone, role, password, confirm_password }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountPayload {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: AccountRole,
    /// Omitted on edit when left blank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl FormDraft for AccountDraft {
    type Target = Account;
    type Payload = AccountPayload;

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("name", "Full name", FieldKind::Text).required(),
        FieldSpec::new("email", "Email", FieldKind::Email).required(),
        FieldSpec::new("phone", "Phone", FieldKind::Text),
        FieldSpec::new("role", "Role", FieldKind::Choice(AccountRole::OPTIONS)),
        FieldSpec::new("password", "Password", FieldKind::Password)
            .required()
            .create_only(),
        FieldSpec::new("confirm_password", "Confirm password", FieldKind::Password)
            .required()
            .create_only(),
    ];

    fn blank() -> Self {
        Self {
            role: AccountRole::Staff.value().to_string(),
            ..Self::default()
        }
    }

    fn from_resource(a: &Account) -> Self {
        Self {
            name: a.name.clone(),
            email: a.email.clone(),
            phone: a.phone.clone().unwrap_or_default(),
            role: a.role.value().to_string(),
            ..Self::default()
        }
    }

    fn validate(&self, mode: &FormMode) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name, "Name is required");
        require(&mut errors, "email", &self.email, "Email is required");
        if !self.email.trim().is_empty() && !self.email.contains('@') {
            errors.insert("email", "Enter a valid email address");
        }
        choice_is_known(
            &mut errors,
            "role",
            AccountRole::from_value(&self.role) != AccountRole::Unknown,
            "Choose a role",
        );
        if matches!(mode, FormMode::Create) {
            require(&mut errors, "password", &self.password, "Password is required");
        }
        if !self.password.is_empty() && self.password != self.confirm_password {
            errors.insert("confirm_password", "Passwords do not match");
        }
        errors
    }

    fn to_payload(&self, _images: Vec<String>) -> AccountPayload {
        AccountPayload {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: optional_text(&self.phone),
            role: AccountRole::from_value(&self.role),
            password: (!self.password.is_empty()).then(|| self.password.clone()),
        }
    }
}

// =========================================================
// Asset
// =========================================================

pub const PURCHASE_DATE_FORMAT: &str = "%Y-%m-%d";

text_draft! {
    AssetDraft {
        name,
        asset_type,
        condition,
        status,
        building_id,
        room_id,
        purchase_date,
        price,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetPayload {
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub condition: AssetCondition,
    pub status: AssetStatus,
    pub building_id: Option<ResourceId>,
    pub room_id: Option<ResourceId>,
    pub purchase_date: Option<String>,
    pub price: Option<f64>,
}

impl FormDraft for AssetDraft {
    type Target = Asset;
    type Payload = AssetPayload;

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("name", "Name", FieldKind::Text).required(),
        FieldSpec::new("asset_type", "Type", FieldKind::Choice(AssetType::OPTIONS)),
        FieldSpec::new("condition", "Condition", FieldKind::Choice(AssetCondition::OPTIONS)),
        FieldSpec::new("status", "Status", FieldKind::Choice(AssetStatus::OPTIONS)),
        FieldSpec::new("building_id", "Building", FieldKind::Reference("buildings")),
        FieldSpec::new("room_id", "Room", FieldKind::Reference("rooms")),
        FieldSpec::new("purchase_date", "Purchase date", FieldKind::Date),
        FieldSpec::new("price", "Price", FieldKind::Number),
    ];

    fn blank() -> Self {
        Self {
            asset_type: AssetType::Furniture.value().to_string(),
            condition: AssetCondition::Good.value().to_string(),
            status: AssetStatus::Active.value().to_string(),
            ..Self::default()
        }
    }

    fn from_resource(a: &Asset) -> Self {
        Self {
            name: a.name.clone(),
            asset_type: a.asset_type.value().to_string(),
            condition: a.condition.value().to_string(),
            status: a.status.value().to_string(),
            building_id: id_text(a.building_id.as_ref()),
            room_id: id_text(a.room_id.as_ref()),
            purchase_date: a
                .purchase_date
                .map(|d| d.as_datetime().format(PURCHASE_DATE_FORMAT).to_string())
                .unwrap_or_default(),
            price: number_text(a.price),
        }
    }

    fn validate(&self, _mode: &FormMode) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name, "Asset name is required");
        check_decimal(&mut errors, "price", &self.price, |n| n >= 0.0, "Price cannot be negative");
        let date = self.purchase_date.trim();
        if !date.is_empty() && NaiveDate::parse_from_str(date, PURCHASE_DATE_FORMAT).is_err() {
            errors.insert("purchase_date", "Use the YYYY-MM-DD format");
        }
        choice_is_known(
            &mut errors,
            "asset_type",
            AssetType::from_value(&self.asset_type) != AssetType::Unknown,
            "Choose a type",
        );
        choice_is_known(
            &mut errors,
            "condition",
            AssetCondition::from_value(&self.condition) != AssetCondition::Unknown,
            "Choose a condition",
        );
        choice_is_known(
            &mut errors,
            "status",
            AssetStatus::from_value(&self.status) != AssetStatus::Unknown,
            "Choose a status",
        );
        errors
    }

    fn to_payload(&self, _images: Vec<String>) -> AssetPayload {
        AssetPayload {
            name: self.name.trim().to_string(),
            asset_type: AssetType::from_value(&self.asset_type),
            condition: AssetCondition::from_value(&self.condition),
            status: AssetStatus::from_value(&self.status),
            building_id: optional_id(&self.building_id),
            room_id: optional_id(&self.room_id),
            purchase_date: optional_text(&self.purchase_date),
            price: parse_optional(&self.price).ok().flatten(),
        }
    }
}
