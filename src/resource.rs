//! Typed resource operations on top of [`ApiClient`].

use fscape_admin_shared::{
    Account, Building, DataEnvelope, PageEnvelope, PageResult, Resource, ResourceId, Room,
    RoomStatus,
};
use futures::join;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::ResourceError;
use crate::query::ListRequest;
use crate::request::HttpTransport;

/// Upper bound used when loading select options.
pub const OPTIONS_LIMIT: u32 = 100;

fn schema_error<T: Resource>(detail: impl ToString) -> ResourceError {
    ResourceError::Schema {
        resource: T::NAME,
        detail: detail.to_string(),
    }
}

/// Accepts `{ "data": x }` or a bare `x`.
fn decode_item<T: DeserializeOwned>(body: Value) -> Result<T, serde_json::Error> {
    match serde_json::from_value::<DataEnvelope<T>>(body.clone()) {
        Ok(envelope) => Ok(envelope.data),
        Err(_) => serde_json::from_value(body),
    }
}

fn decode_page<T: Resource>(body: Value, request: &ListRequest) -> Result<PageResult<T>, ResourceError> {
    let envelope = match body {
        Value::Null => PageEnvelope {
            data: Vec::new(),
            total: None,
            page: None,
            total_pages: None,
        },
        items @ Value::Array(_) => PageEnvelope {
            data: serde_json::from_value(items).map_err(schema_error::<T>)?,
            total: None,
            page: None,
            total_pages: None,
        },
        other => serde_json::from_value(other).map_err(schema_error::<T>)?,
    };
    Ok(envelope.into_page(request.page, request.limit))
}

impl<H: HttpTransport> ApiClient<H> {
    /// `GET /api/{resource}` with the request's query.
    pub async fn list<T: Resource>(&self, request: &ListRequest) -> Result<PageResult<T>, ResourceError> {
        let body = self.get(&T::collection_path(), &request.to_query()).await?;
        let page = decode_page::<T>(body, request)?;
        debug!(
            resource = T::NAME,
            page = page.current_page,
            total_pages = page.total_pages,
            items = page.items.len(),
            "page decoded"
        );
        Ok(page)
    }

    pub async fn fetch_one<T: Resource>(&self, id: &ResourceId) -> Result<T, ResourceError> {
        let body = self.get(&T::item_path(id), &[]).await?;
        decode_item(body).map_err(schema_error::<T>)
    }

    /// Creates a record. The echoed record is returned when the body decodes
    /// as one; acknowledgement-only bodies yield `None`.
    pub async fn create<T: Resource, P: Serialize>(&self, payload: &P) -> Result<Option<T>, ResourceError> {
        let body = serde_json::to_value(payload).map_err(schema_error::<T>)?;
        let echoed = self.post(&T::collection_path(), &body).await?;
        Ok(decode_item(echoed).ok())
    }

    pub async fn update<T: Resource, P: Serialize>(
        &self,
        id: &ResourceId,
        payload: &P,
    ) -> Result<Option<T>, ResourceError> {
        let body = serde_json::to_value(payload).map_err(schema_error::<T>)?;
        let echoed = self.put(&T::item_path(id), &body).await?;
        Ok(decode_item(echoed).ok())
    }

    /// `PUT /api/{resource}/{id}` with `{ <active field>: active }`.
    pub async fn set_active<T: Resource>(&self, id: &ResourceId, active: bool) -> Result<(), ResourceError> {
        let field = T::ACTIVE_FIELD.ok_or(ResourceError::NotToggleable { resource: T::NAME })?;
        let mut body = Map::new();
        body.insert(field.to_string(), Value::Bool(active));
        self.put(&T::item_path(id), &Value::Object(body)).await?;
        Ok(())
    }

    pub async fn remove<T: Resource>(&self, id: &ResourceId) -> Result<(), ResourceError> {
        self.delete(&T::item_path(id)).await?;
        Ok(())
    }

    /// Active records for a select input.
    pub async fn options<T: Resource>(&self) -> Result<Vec<T>, ResourceError> {
        let mut request = ListRequest::new(1, OPTIONS_LIMIT);
        if let Some(field) = T::ACTIVE_FIELD.filter(|f| T::FILTER_KEYS.contains(f)) {
            request = request.with_param(field, "true");
        }
        Ok(self.list::<T>(&request).await?.items)
    }

    /// Headline counts for the overview page. Each count is fetched
    /// concurrently and fails independently.
    pub async fn dashboard_summary(&self) -> DashboardSummary {
        let one = ListRequest::new(1, 1);
        let occupied = ListRequest::new(1, 1).with_param("status", RoomStatus::Occupied.value());
        let active_accounts = ListRequest::new(1, 1).with_param("isActive", "true");

        let (rooms, occupied, buildings, accounts) = join!(
            self.list::<Room>(&one),
            self.list::<Room>(&occupied),
            self.list::<Building>(&one),
            self.list::<Account>(&active_accounts),
        );

        DashboardSummary {
            rooms: rooms.map(|p| p.total_count).ok(),
            occupied_rooms: occupied.map(|p| p.total_count).ok(),
            buildings: buildings.map(|p| p.total_count).ok(),
            active_accounts: accounts.map(|p| p.total_count).ok(),
        }
    }
}

/// Collection totals; `None` when that count could not be loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DashboardSummary {
    pub rooms: Option<u64>,
    pub occupied_rooms: Option<u64>,
    pub buildings: Option<u64>,
    pub active_accounts: Option<u64>,
}

impl DashboardSummary {
    /// Occupied share of all rooms, in percent.
    pub fn occupancy_rate(&self) -> Option<f64> {
        match (self.rooms, self.occupied_rooms) {
            (Some(total), Some(occupied)) if total > 0 => Some(occupied as f64 * 100.0 / total as f64),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{HttpMethod, MockHttpClient};
    use fscape_admin_shared::{Asset, Location, RoomType};
    use serde_json::json;

    const BASE: &str = "http://api.test";

    fn client() -> ApiClient<MockHttpClient> {
        ApiClient::new(BASE, MockHttpClient::new())
    }

    #[tokio::test]
    async fn list_decodes_page_and_metadata() {
        let client = client();
        client.transport().mock_response(
            HttpMethod::Get,
            &format!("{}/api/room-types?page=2&limit=10", BASE),
            200,
            json!({
                "data": [{"id": 5, "name": "Studio", "is_active": true}],
                "total": 11,
                "page": 2,
                "totalPages": 2
            }),
        );

        let page = client.list::<RoomType>(&ListRequest::new(2, 10)).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Studio");
        assert_eq!(page.current_page, 2);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn missing_data_is_an_empty_page() {
        let client = client();
        client.transport().mock_response(
            HttpMethod::Get,
            &format!("{}/api/locations?page=1&limit=10", BASE),
            200,
            json!({}),
        );
        let page = client.list::<Location>(&ListRequest::new(1, 10)).await.unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn malformed_records_are_schema_errors() {
        let client = client();
        client.transport().mock_response(
            HttpMethod::Get,
            &format!("{}/api/assets?page=1&limit=10", BASE),
            200,
            json!({"data": [{"name": "no id"}]}),
        );
        let err = client.list::<Asset>(&ListRequest::new(1, 10)).await.unwrap_err();
        assert!(matches!(err, ResourceError::Schema { resource: "asset", .. }));
    }

    #[tokio::test]
    async fn fetch_one_accepts_enveloped_and_bare_records() {
        let client = client();
        let url = format!("{}/api/rooms/8", BASE);
        client.transport().mock_response(
            HttpMethod::Get,
            &url,
            200,
            json!({"data": {"id": 8, "room_number": "A-301", "status": "occupied"}}),
        );
        client.transport().mock_response(
            HttpMethod::Get,
            &url,
            200,
            json!({"id": 8, "roomNumber": "A-301"}),
        );

        let id = ResourceId::from("8");
        let first: Room = client.fetch_one(&id).await.unwrap();
        assert_eq!(first.status, RoomStatus::Occupied);
        let second: Room = client.fetch_one(&id).await.unwrap();
        assert_eq!(second.room_number, "A-301");
    }

    #[tokio::test]
    async fn set_active_uses_the_resource_flag_name() {
        let client = client();
        client.transport().mock_response(
            HttpMethod::Put,
            &format!("{}/api/accounts/3", BASE),
            200,
            json!({"ok": true}),
        );
        client
            .set_active::<Account>(&ResourceId::from("3"), false)
            .await
            .unwrap();
        let sent = client.transport().last_request().unwrap();
        assert_eq!(sent.body.as_deref(), Some(r#"{"isActive":false}"#));
    }

    #[tokio::test]
    async fn status_resources_cannot_be_toggled() {
        let client = client();
        let err = client
            .set_active::<Room>(&ResourceId::from("1"), true)
            .await
            .unwrap_err();
        assert_eq!(err, ResourceError::NotToggleable { resource: "room" });
        assert_eq!(client.transport().request_count(), 0);
    }

    #[tokio::test]
    async fn create_tolerates_ack_bodies() {
        let client = client();
        client.transport().mock_response(
            HttpMethod::Post,
            &format!("{}/api/locations", BASE),
            201,
            json!({"success": true}),
        );
        let created = client
            .create::<Location, _>(&json!({"name": "Thu Duc"}))
            .await
            .unwrap();
        assert!(created.is_none());
    }

    #[tokio::test]
    async fn options_request_active_records_only() {
        let client = client();
        client.transport().mock_response(
            HttpMethod::Get,
            &format!("{}/api/buildings?page=1&limit=100&is_active=true", BASE),
            200,
            json!({"data": [{"id": 1, "name": "FScape FPT"}]}),
        );
        let buildings = client.options::<Building>().await.unwrap();
        assert_eq!(buildings.len(), 1);
    }

    #[tokio::test]
    async fn dashboard_counts_fail_independently() {
        let client = client();
        let transport = client.transport();
        transport.mock_response(
            HttpMethod::Get,
            &format!("{}/api/rooms?page=1&limit=1", BASE),
            200,
            json!({"data": [], "total": 170}),
        );
        transport.mock_response(
            HttpMethod::Get,
            &format!("{}/api/rooms?page=1&limit=1&status=occupied", BASE),
            200,
            json!({"data": [], "total": 85}),
        );
        transport.mock_response(
            HttpMethod::Get,
            &format!("{}/api/buildings?page=1&limit=1", BASE),
            500,
            json!({"message": "down"}),
        );

        let summary = client.dashboard_summary().await;
        assert_eq!(summary.rooms, Some(170));
        assert_eq!(summary.buildings, None);
        assert_eq!(summary.active_accounts, None);
        assert_eq!(summary.occupancy_rate(), Some(50.0));
    }
}
