use super::*;
use crate::dialog::DialogState;
use crate::error::HttpError;
use crate::request::{HttpMethod, MockHttpClient};
use fscape_admin_shared::{Building, Room, RoomType};
use serde_json::{Value, json};

const BASE: &str = "http://api.test";

fn client() -> ApiClient<MockHttpClient> {
    ApiClient::new(BASE, MockHttpClient::new())
}

fn buildings(ids: std::ops::RangeInclusive<u32>) -> Vec<Value> {
    ids.map(|id| json!({"id": id, "name": format!("Building {}", id), "is_active": true}))
        .collect()
}

fn mock_list(client: &ApiClient<MockHttpClient>, query: &str, body: Value) {
    client.transport().mock_response(
        HttpMethod::Get,
        &format!("{}/api/buildings?{}", BASE, query),
        200,
        body,
    );
}

fn page_of<T: Resource>(items: Vec<T>, current_page: u32, total: u64) -> PageResult<T> {
    PageResult {
        items,
        total_count: total,
        current_page,
        total_pages: PageResult::<T>::total_pages_for(total, 10),
    }
}

// =========================================================
// Pagination
// =========================================================

#[tokio::test]
async fn pages_are_bounded_by_the_loaded_total() {
    let client = client();
    mock_list(
        &client,
        "page=1&limit=10",
        json!({"data": buildings(1..=10), "total": 25}),
    );
    mock_list(
        &client,
        "page=3&limit=10",
        json!({"data": buildings(21..=25), "total": 25, "page": 3}),
    );

    let mut controller = ListController::<Building>::new(10);
    assert!(controller.load(&client).await);
    assert_eq!(controller.total_pages(), 3);

    let err = controller.set_page(4).unwrap_err();
    assert_eq!(
        err,
        ResourceError::PageOutOfRange {
            requested: 4,
            total_pages: 3
        }
    );
    assert!(controller.set_page(0).is_err());
    assert_eq!(controller.current_page(), 1);
    assert_eq!(client.transport().request_count(), 1);

    let ticket = controller.set_page(3).unwrap();
    assert!(controller.run(&client, ticket).await);
    assert_eq!(controller.current_page(), 3);
    assert_eq!(controller.items().len(), 5);
}

#[test]
fn every_page_in_range_is_reachable() {
    let mut controller = ListController::<Building>::new(10);
    let ticket = controller.refresh();
    controller.complete_fetch(ticket, Ok(page_of(Vec::new(), 1, 45)));

    for n in 1..=5 {
        let ticket = controller.set_page(n).unwrap();
        assert_eq!(ticket.request().page, n);
        assert_eq!(controller.current_page(), n);
        controller.complete_fetch(ticket, Ok(page_of(Vec::new(), n, 45)));
    }
}

// =========================================================
// Query changes
// =========================================================

#[test]
fn same_search_twice_issues_one_request() {
    let mut controller = ListController::<Building>::new(10);
    assert!(controller.set_search("fpt").is_some());
    let before = controller.query().clone();
    assert!(controller.set_search("fpt").is_none());
    assert_eq!(controller.query(), &before);
}

#[test]
fn filters_reset_to_the_first_page() {
    let mut controller = ListController::<Building>::new(10);
    let ticket = controller.refresh();
    controller.complete_fetch(ticket, Ok(page_of(Vec::new(), 1, 30)));
    controller.set_page(3).unwrap();

    let ticket = controller
        .set_filter("location_id", Some("4".into()))
        .unwrap()
        .unwrap();
    assert_eq!(controller.current_page(), 1);
    assert_eq!(ticket.request().param("location_id"), Some("4"));

    let ticket = controller.set_activity(ActivityFilter::Inactive).unwrap().unwrap();
    assert_eq!(ticket.request().param("is_active"), Some("false"));
    assert_eq!(controller.activity(), ActivityFilter::Inactive);
}

#[test]
fn undeclared_filters_and_sorts_are_rejected() {
    let mut controller = ListController::<Building>::new(10);
    assert!(matches!(
        controller.set_filter("colour", Some("red".into())),
        Err(ResourceError::UnknownFilter { .. })
    ));
    assert!(matches!(
        controller.set_sort("colour"),
        Err(ResourceError::UnsortableField { .. })
    ));
    assert!(!controller.is_loading());
}

#[test]
fn server_sorted_resources_refetch_with_sort_params() {
    let mut controller = ListController::<Room>::new(10);
    let ticket = controller.set_sort("price").unwrap().unwrap();
    assert_eq!(ticket.request().param("sort"), Some("price"));
    assert_eq!(ticket.request().param("dir"), Some("asc"));

    let ticket = controller.set_sort("price").unwrap().unwrap();
    assert_eq!(ticket.request().param("dir"), Some("desc"));
}

#[test]
fn client_sorted_resources_reorder_without_a_request() {
    let types: Vec<RoomType> = serde_json::from_value(json!([
        {"id": 1, "name": "Studio", "created_at": "2024-03-01T00:00:00Z"},
        {"id": 2, "name": "Dorm", "created_at": "2024-01-01T00:00:00Z"},
        {"id": 3, "name": "Suite"},
        {"id": 4, "name": "Twin", "created_at": "2024-02-01T00:00:00Z"}
    ]))
    .unwrap();

    let mut controller = ListController::<RoomType>::new(10);
    let ticket = controller.refresh();
    controller.complete_fetch(ticket, Ok(page_of(types, 1, 4)));

    assert!(controller.set_sort("created_at").unwrap().is_none());
    let ids: Vec<&str> = controller.items().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["2", "4", "1", "3"]);

    assert!(controller.set_sort("created_at").unwrap().is_none());
    let ids: Vec<&str> = controller.items().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["1", "4", "2", "3"]);
    assert!(matches!(controller.state(), LoadState::Loaded(_)));
}

// =========================================================
// Sequencing
// =========================================================

#[test]
fn stale_responses_are_discarded() {
    let mut controller = ListController::<Building>::new(10);
    let first = controller.set_search("a").unwrap();
    let second = controller.set_search("ab").unwrap();
    assert!(second.seq() > first.seq());

    let late: Vec<Building> = serde_json::from_value(json!(buildings(1..=3))).unwrap();
    assert!(!controller.complete_fetch(first, Ok(page_of(late, 1, 3))));
    assert!(controller.is_loading());
    assert!(controller.items().is_empty());

    assert!(controller.complete_fetch(second, Ok(page_of(Vec::new(), 1, 0))));
    assert!(matches!(controller.state(), LoadState::Loaded(_)));
}

#[test]
fn stale_failure_does_not_clobber_a_newer_page() {
    let mut controller = ListController::<Building>::new(10);
    let first = controller.refresh();
    let second = controller.refresh();
    assert!(controller.complete_fetch(second, Ok(page_of(Vec::new(), 1, 0))));
    assert!(!controller.complete_fetch(first, Err(HttpError::network().into())));
    assert!(controller.error().is_none());
}

// =========================================================
// Failures and retry
// =========================================================

#[tokio::test]
async fn failed_fetch_can_be_retried() {
    let client = client();
    client.transport().mock_response(
        HttpMethod::Get,
        &format!("{}/api/buildings?page=1&limit=10", BASE),
        503,
        json!({"message": "Service unavailable"}),
    );
    mock_list(&client, "page=1&limit=10", json!({"data": buildings(1..=2), "total": 2}));

    let mut controller = ListController::<Building>::new(10);
    assert!(controller.retry().is_none());
    controller.load(&client).await;
    assert_eq!(controller.error(), Some("Service unavailable"));

    let ticket = controller.retry().unwrap();
    controller.run(&client, ticket).await;
    assert_eq!(controller.items().len(), 2);
    assert_eq!(client.transport().request_count(), 2);
}

// =========================================================
// Mutations
// =========================================================

#[tokio::test]
async fn toggle_flips_the_flag_and_refetches() {
    let client = client();
    mock_list(
        &client,
        "page=1&limit=10",
        json!({"data": [{"id": 7, "name": "FScape FPT", "is_active": true}], "total": 1}),
    );
    mock_list(
        &client,
        "page=1&limit=10",
        json!({"data": [{"id": 7, "name": "FScape FPT", "is_active": false}], "total": 1}),
    );
    client.transport().mock_response(
        HttpMethod::Put,
        &format!("{}/api/buildings/7", BASE),
        200,
        json!({"id": 7, "is_active": false}),
    );

    let mut controller = ListController::<Building>::new(10);
    controller.load(&client).await;

    let mut dialog = DialogState::default();
    dialog.ask_toggle(controller.items()[0].clone()).unwrap();
    let confirmed = dialog.confirm_toggle().unwrap();
    controller.toggle_active(&client, confirmed).await.unwrap();

    let puts = client.transport().requests_to(HttpMethod::Put);
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].url, format!("{}/api/buildings/7", BASE));
    assert_eq!(puts[0].body.as_deref(), Some(r#"{"is_active":false}"#));
    assert!(!controller.items()[0].is_active);
}

#[tokio::test]
async fn driver_run_on_a_copy_outranks_an_older_fetch() {
    let client = client();
    mock_list(&client, "page=1&limit=10", json!({"data": buildings(2..=2), "total": 1}));
    client.transport().mock_response(
        HttpMethod::Delete,
        &format!("{}/api/buildings/1", BASE),
        200,
        json!({}),
    );

    let mut controller = ListController::<Building>::new(10);
    let in_flight = controller.refresh();

    let mut copy = controller.clone();
    let mut dialog = DialogState::default();
    dialog.ask_delete(serde_json::from_value(json!({"id": 1, "name": "Building 1"})).unwrap());
    copy.remove(&client, dialog.confirm_delete().unwrap()).await.unwrap();
    controller = copy;

    let late = page_of(Vec::new(), 1, 0);
    assert!(!controller.complete_fetch(in_flight, Ok(late)));
    assert_eq!(controller.total_count(), 1);
    assert_eq!(controller.items()[0].id.as_str(), "2");
}

#[tokio::test]
async fn failed_delete_keeps_the_loaded_page() {
    let client = client();
    mock_list(&client, "page=1&limit=10", json!({"data": buildings(1..=3), "total": 3}));
    client.transport().mock_response(
        HttpMethod::Delete,
        &format!("{}/api/buildings/99", BASE),
        404,
        json!({"message": "Building not found"}),
    );

    let mut controller = ListController::<Building>::new(10);
    controller.load(&client).await;
    let before = controller.state().clone();

    let ghost: Building = serde_json::from_value(json!({"id": 99, "name": "Gone"})).unwrap();
    let mut dialog = DialogState::default();
    dialog.ask_delete(ghost);
    let err = controller
        .remove(&client, dialog.confirm_delete().unwrap())
        .await
        .unwrap_err();

    assert_eq!(err, ResourceError::Http(HttpError::new(404, "Building not found")));
    assert_eq!(err.status(), Some(404));
    assert_eq!(controller.state(), &before);
    assert_eq!(client.transport().requests_to(HttpMethod::Get).len(), 1);
}

#[tokio::test]
async fn deleting_the_last_row_steps_back_a_page() {
    let client = client();
    mock_list(&client, "page=1&limit=10", json!({"data": buildings(1..=10), "total": 11}));
    mock_list(
        &client,
        "page=2&limit=10",
        json!({"data": buildings(11..=11), "total": 11, "page": 2}),
    );
    client.transport().mock_raw(
        HttpMethod::Delete,
        &format!("{}/api/buildings/11", BASE),
        204,
        "",
    );

    let mut controller = ListController::<Building>::new(10);
    controller.load(&client).await;
    let ticket = controller.set_page(2).unwrap();
    controller.run(&client, ticket).await;
    assert_eq!(controller.items().len(), 1);

    let mut dialog = DialogState::default();
    dialog.ask_delete(controller.items()[0].clone());
    controller
        .remove(&client, dialog.confirm_delete().unwrap())
        .await
        .unwrap();

    assert_eq!(controller.current_page(), 1);
    let last = client.transport().last_request().unwrap();
    assert_eq!(last.url, format!("{}/api/buildings?page=1&limit=10", BASE));
}

#[tokio::test]
async fn failed_create_leaves_state_untouched() {
    let client = client();
    mock_list(&client, "page=1&limit=10", json!({"data": buildings(1..=1), "total": 1}));
    client.transport().mock_response(
        HttpMethod::Post,
        &format!("{}/api/buildings", BASE),
        400,
        json!({"message": "name is required"}),
    );

    let mut controller = ListController::<Building>::new(10);
    controller.load(&client).await;
    let err = controller
        .create(&client, &json!({"name": ""}))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "name is required");
    assert_eq!(controller.items().len(), 1);
    assert_eq!(client.transport().request_count(), 2);
}

#[tokio::test]
async fn update_refetches_current_page() {
    let client = client();
    mock_list(&client, "page=1&limit=10", json!({"data": buildings(1..=1), "total": 1}));
    client.transport().mock_response(
        HttpMethod::Put,
        &format!("{}/api/buildings/1", BASE),
        200,
        json!({"data": {"id": 1, "name": "Renamed"}}),
    );

    let mut controller = ListController::<Building>::new(10);
    controller.load(&client).await;
    controller
        .update(&client, &ResourceId::from("1"), &json!({"name": "Renamed"}))
        .await
        .unwrap();
    assert_eq!(client.transport().requests_to(HttpMethod::Get).len(), 2);
}
