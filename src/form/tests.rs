use super::*;
use crate::error::UploadError;
use crate::request::{HttpMethod, MockHttpClient};
use fscape_admin_shared::{Account, Building, Room, RoomStatus, RoomType};
use serde_json::json;

const BASE: &str = "http://api.test";

fn client() -> ApiClient<MockHttpClient> {
    ApiClient::new(BASE, MockHttpClient::new())
}

fn filled_building() -> FormWorkflow<BuildingDraft> {
    let mut form = FormWorkflow::<BuildingDraft>::create();
    form.set_field("name", " FScape FPT ");
    form.set_field("location_id", "2");
    form.set_field("address", "Lo E2a-7, D1, Thu Duc");
    form
}

struct FixedUploader(Vec<String>);

#[async_trait::async_trait(?Send)]
impl ImageUploader for FixedUploader {
    async fn upload_images(&self, images: &[DraftImage]) -> Result<Vec<String>, UploadError> {
        Ok(self.0.iter().take(images.len()).cloned().collect())
    }
}

// =========================================================
// Validation
// =========================================================

#[test]
fn building_requires_name_location_and_address() {
    let mut form = FormWorkflow::<BuildingDraft>::create();
    let err = form.prepare().unwrap_err();
    let SubmitError::Invalid(errors) = err else {
        panic!("expected field errors");
    };
    assert!(errors.contains("name"));
    assert!(errors.contains("location_id"));
    assert!(errors.contains("address"));
    assert!(!form.is_submitting());
}

#[test]
fn building_numbers_are_checked_when_present() {
    let mut form = filled_building();
    form.set_field("total_floors", "0");
    form.set_field("latitude", "ninety");
    form.set_field("longitude", "106.8");
    assert!(!form.validate());
    assert!(form.error("total_floors").is_some());
    assert!(form.error("latitude").is_some());
    assert!(form.error("longitude").is_none());
}

#[test]
fn editing_a_field_clears_its_error() {
    let mut form = FormWorkflow::<BuildingDraft>::create();
    form.validate();
    assert!(form.error("name").is_some());
    form.set_field("name", "A");
    assert!(form.error("name").is_none());
    assert!(form.error("address").is_some());
    assert!(!form.set_field("colour", "red"));
}

#[test]
fn room_rules() {
    let mut form = FormWorkflow::<RoomDraft>::create();
    assert_eq!(form.value("status"), "available");
    form.set_field("room_number", "A-301");
    form.set_field("building_id", "1");
    form.set_field("room_type_id", "3");
    form.set_field("floor", "-1");
    form.set_field("price", "0");
    form.set_field("max_occupancy", "0");
    assert!(!form.validate());
    assert_eq!(form.errors().len(), 3);

    form.set_field("floor", "0");
    form.set_field("price", "4500000");
    form.set_field("max_occupancy", "");
    let payload = form.prepare().unwrap();
    assert_eq!(payload.floor, Some(0));
    assert_eq!(payload.max_occupancy, 1);
    assert_eq!(payload.status, RoomStatus::Available);
}

#[test]
fn non_finite_numbers_are_rejected() {
    let mut room = FormWorkflow::<RoomDraft>::create();
    room.set_field("room_number", "A-301");
    room.set_field("building_id", "1");
    room.set_field("room_type_id", "3");
    room.set_field("price", "inf");
    room.set_field("area", "1e400");
    assert!(!room.validate());
    assert!(room.error("price").is_some());
    assert!(room.error("area").is_some());

    room.set_field("price", "NaN");
    room.set_field("area", "24.5");
    assert!(!room.validate());
    assert!(room.error("price").is_some());
    assert!(room.error("area").is_none());

    let mut asset = FormWorkflow::<AssetDraft>::create();
    asset.set_field("name", "Desk lamp");
    asset.set_field("price", "infinity");
    assert!(!asset.validate());
    assert!(asset.error("price").is_some());

    let mut building = filled_building();
    building.set_field("latitude", "NaN");
    building.set_field("longitude", "-inf");
    assert!(!building.validate());
    assert!(building.error("latitude").is_some());
    assert!(building.error("longitude").is_some());
}

#[test]
fn account_passwords_must_match_on_create() {
    let mut form = FormWorkflow::<AccountDraft>::create();
    form.set_field("name", "Trang");
    form.set_field("email", "trang.fscape.vn");
    form.set_field("password", "secret1");
    form.set_field("confirm_password", "secret2");
    assert!(!form.validate());
    assert!(form.error("email").is_some());
    assert_eq!(form.error("confirm_password"), Some("Passwords do not match"));

    form.set_field("email", "trang@fscape.vn");
    form.set_field("confirm_password", "secret1");
    let payload = form.prepare().unwrap();
    assert_eq!(
        serde_json::to_value(&payload).unwrap(),
        json!({
            "name": "Trang",
            "email": "trang@fscape.vn",
            "phone": null,
            "role": "staff",
            "password": "secret1"
        })
    );
}

#[test]
fn account_edit_keeps_password_optional() {
    let account: Account = serde_json::from_value(json!({
        "id": 4, "name": "Minh", "email": "minh@fscape.vn", "role": "manager"
    }))
    .unwrap();
    let mut form = FormWorkflow::<AccountDraft>::edit(&account);
    assert_eq!(form.mode(), &FormMode::Edit("4".into()));
    assert!(form.fields().all(|f| !f.create_only));

    let payload = form.prepare().unwrap();
    let body = serde_json::to_value(&payload).unwrap();
    assert!(body.get("password").is_none());
    assert_eq!(body["role"], "manager");
}

#[test]
fn asset_date_and_price_formats() {
    let mut form = FormWorkflow::<AssetDraft>::create();
    form.set_field("name", "Desk lamp");
    form.set_field("purchase_date", "20/02/2024");
    form.set_field("price", "-5");
    form.set_field("asset_type", "lighting");
    assert!(!form.validate());
    assert_eq!(form.errors().len(), 3);

    form.set_field("purchase_date", "2024-02-20");
    form.set_field("price", "350000");
    form.set_field("asset_type", "electronics");
    let body = serde_json::to_value(form.prepare().unwrap()).unwrap();
    assert_eq!(body["type"], "electronics");
    assert_eq!(body["condition"], "good");
    assert_eq!(body["purchase_date"], "2024-02-20");
}

#[test]
fn blank_optional_text_is_sent_as_null() {
    let mut form = filled_building();
    form.set_field("description", "   ");
    let body = serde_json::to_value(form.prepare().unwrap()).unwrap();
    assert_eq!(body["name"], "FScape FPT");
    assert_eq!(body["description"], serde_json::Value::Null);
    assert_eq!(body["is_active"], true);
}

#[test]
fn edit_seeds_from_the_record() {
    let room_type: RoomType = serde_json::from_value(json!({
        "id": 9, "name": "Studio", "description": "Private bath", "is_active": false
    }))
    .unwrap();
    let form = FormWorkflow::<RoomTypeDraft>::edit(&room_type);
    assert_eq!(form.value("name"), "Studio");
    assert_eq!(form.value("is_active"), "false");
}

#[test]
fn dialog_state_picks_the_form_mode() {
    let mut dialog = DialogState::<Building>::default();
    assert!(FormWorkflow::<BuildingDraft>::for_dialog(&dialog).is_none());
    dialog.open_create();
    let form = FormWorkflow::<BuildingDraft>::for_dialog(&dialog).unwrap();
    assert_eq!(form.mode(), &FormMode::Create);
}

// =========================================================
// Submission
// =========================================================

#[tokio::test]
async fn invalid_forms_send_nothing() {
    let client = client();
    let mut controller = ListController::<Building>::new(10);
    let mut form = FormWorkflow::<BuildingDraft>::create();

    let err = form.submit(&mut controller, &client).await.unwrap_err();
    assert!(matches!(err, SubmitError::Invalid(_)));
    assert_eq!(client.transport().request_count(), 0);
}

#[tokio::test]
async fn remote_failure_keeps_the_form_open_with_the_message() {
    let client = client();
    client.transport().mock_response(
        HttpMethod::Post,
        &format!("{}/api/buildings", BASE),
        409,
        json!({"message": "Building already exists"}),
    );
    let mut controller = ListController::<Building>::new(10);
    let mut form = filled_building();

    let err = form.submit(&mut controller, &client).await.unwrap_err();
    assert!(matches!(err, SubmitError::Remote(_)));
    assert_eq!(form.submit_error(), Some("Building already exists"));
    assert!(!form.is_submitting());
    assert_eq!(form.value("name"), " FScape FPT ");
}

#[tokio::test]
async fn edit_submits_put_and_refetches() {
    let client = client();
    let room: Room = serde_json::from_value(json!({
        "id": 12, "room_number": "B-205", "building_id": 1, "room_type_id": 2, "status": "occupied"
    }))
    .unwrap();
    client.transport().mock_response(
        HttpMethod::Put,
        &format!("{}/api/rooms/12", BASE),
        200,
        json!({"data": {"id": 12}}),
    );
    client.transport().mock_response(
        HttpMethod::Get,
        &format!("{}/api/rooms?page=1&limit=10", BASE),
        200,
        json!({"data": [], "total": 0}),
    );

    let mut controller = ListController::<Room>::new(10);
    let mut form = FormWorkflow::<RoomDraft>::edit(&room);
    form.set_field("status", "maintenance");
    form.submit(&mut controller, &client).await.unwrap();

    let put = &client.transport().requests_to(HttpMethod::Put)[0];
    let body: serde_json::Value = serde_json::from_str(put.body.as_deref().unwrap()).unwrap();
    assert_eq!(body["status"], "maintenance");
    assert_eq!(body["room_number"], "B-205");
    assert_eq!(client.transport().requests_to(HttpMethod::Get).len(), 1);
}

#[tokio::test]
async fn uploaded_images_join_the_payload() {
    let client = client();
    client.transport().mock_response(
        HttpMethod::Post,
        &format!("{}/api/buildings", BASE),
        201,
        json!({"id": 30}),
    );
    let mut form = filled_building();
    form.attachments_mut()
        .add("front.jpg", "image/jpeg", "blob:front")
        .unwrap();

    let uploader = FixedUploader(vec!["https://cdn.fscape.vn/front.jpg".into()]);
    form.save_with_uploads(&client, &uploader).await.unwrap();

    let sent = client.transport().last_request().unwrap();
    let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(body["images"], json!(["https://cdn.fscape.vn/front.jpg"]));
    assert!(form.attachments().is_empty());
}

#[tokio::test]
async fn missing_uploader_saves_without_new_images() {
    let client = client();
    client.transport().mock_response(
        HttpMethod::Post,
        &format!("{}/api/buildings", BASE),
        201,
        json!({}),
    );
    let mut form = filled_building();
    form.attachments_mut().add("a.png", "image/png", "blob:a").unwrap();

    form.save_with_uploads(&client, &NoUploader).await.unwrap();

    let sent = client.transport().last_request().unwrap();
    let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(body["images"], json!([]));
    assert_eq!(form.attachments().len(), 1);
}
