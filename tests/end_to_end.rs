//! Customer and staff flows wired through the views against a mock backend.

mod common;

use std::sync::Arc;

use chrono::Utc;
use common::{
    ADMIN_PASSWORD, ADMIN_USER, CREATED_ID, CREATED_TOKEN, MockBackend, order_json,
};
use lockopener::api::{AdminOrderQuery, ApiClient};
use lockopener::common::{LocalOrder, OrderStatus};
use lockopener::errors::{AdminError, ViewError};
use lockopener::forms::{OrderEdit, OrderForm};
use lockopener::i18n::PL;
use lockopener::poller::{PrunePolicy, RemovalReason, StatusPoller};
use lockopener::registry::OrderRegistry;
use lockopener::storage::{
    ADMIN_BASIC_USER, KeyValueStore, MemoryStore, SharedStore, admin_credentials,
    save_admin_credentials,
};
use lockopener::views::{
    AdminSession, AuthState, Navigation, OrderSuccess, TrackedOrders, load_order_detail,
    load_public_status, submit_order,
};
use serde_json::json;

struct Harness {
    backend: MockBackend,
    store: SharedStore,
    api: ApiClient,
    registry: OrderRegistry,
}

async fn harness() -> Harness {
    let backend = MockBackend::start().await;
    let store: SharedStore = MemoryStore::shared();
    let api = ApiClient::new(&backend.base_url(), store.clone()).unwrap();
    let registry = OrderRegistry::new(store.clone());
    Harness {
        backend,
        store,
        api,
        registry,
    }
}

fn jan_kowalski() -> OrderForm {
    OrderForm {
        name: "Jan Kowalski".to_string(),
        phone: "+48123456789".to_string(),
        street: "Główna 1".to_string(),
        city: "Kraków".to_string(),
        gdpr: true,
    }
}

#[tokio::test]
async fn test_submit_then_track_new_order() {
    let h = harness().await;

    let navigation = submit_order(&h.api, jan_kowalski(), &PL).await.unwrap();
    let Navigation::OrderSuccess {
        order_id,
        view_token,
    } = navigation;
    assert_eq!(order_id, CREATED_ID);
    assert_eq!(view_token, CREATED_TOKEN);

    let page = OrderSuccess::new(&h.registry)
        .enter(Some(&order_id), Some(&view_token), Utc::now(), &PL)
        .unwrap();
    assert!(page.tracked);
    assert_eq!(page.number, "#3f4e5d");

    let records = h.registry.list().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, CREATED_ID);
    assert_eq!(records[0].token, CREATED_TOKEN);

    let sent = h.backend.last_call("POST", "/orders").unwrap().json();
    assert_eq!(sent["address"], json!({ "street": "Główna 1", "city": "Kraków" }));
}

#[tokio::test]
async fn test_invalid_phone_never_reaches_backend() {
    let h = harness().await;
    let form = OrderForm {
        phone: "12ab".to_string(),
        ..jan_kowalski()
    };

    let err = submit_order(&h.api, form, &PL).await.unwrap_err();
    match err {
        ViewError::Validation(errors) => assert!(errors.has_field("phone")),
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(h.backend.call_count(), 0);
}

#[tokio::test]
async fn test_view_without_token_makes_no_request() {
    let h = harness().await;
    h.backend.set_order_status("a1", "pending");

    let err = load_order_detail(&h.api, "a1", None, &PL).await.unwrap_err();
    assert!(matches!(err, ViewError::AccessTokenMissing(_)));
    assert_eq!(err.to_string(), "Token dostępu nie został podany");
    assert_eq!(h.backend.call_count(), 0);
}

#[tokio::test]
async fn test_view_with_token_loads_order() {
    let h = harness().await;
    h.backend.set_order_status("a1", "in_progress");

    let detail = load_order_detail(&h.api, "a1", Some("tok"), &PL).await.unwrap();
    assert_eq!(detail.order.id, "a1");
    assert_eq!(detail.number(), "#a1");
}

#[tokio::test]
async fn test_public_status_needs_no_token() {
    let h = harness().await;

    let status = load_public_status(&h.api, "a1", &PL).await.unwrap();
    assert_eq!(status.status, OrderStatus::Assigned);
    assert!(h.backend.last_call("GET", "/orders/a1/status-public").is_some());
}

#[tokio::test]
async fn test_sweep_prunes_finished_and_missing_orders() {
    let h = harness().await;
    let now = Utc::now();
    for id in ["active", "finished", "gone", "broken"] {
        h.registry
            .add(LocalOrder::new(id, format!("tok-{}", id), now))
            .unwrap();
    }
    h.backend.set_order_status("active", "pending");
    h.backend.set_order_status("finished", "done");
    h.backend
        .set_order("broken", 500, json!({ "error": "Internal error" }));

    let poller = StatusPoller::new(
        Arc::new(h.api.clone()),
        h.registry.clone(),
        PrunePolicy::default(),
    );
    let view = TrackedOrders::new(poller);
    let (rows, report) = view.load(now, &PL).await.unwrap();

    let mut removed = report.removed_ids();
    removed.sort();
    assert_eq!(removed, vec!["finished".to_string(), "gone".to_string()]);
    assert!(
        report
            .removed
            .iter()
            .any(|(id, reason)| id == "gone" && *reason == RemovalReason::NotFound)
    );
    assert_eq!(report.failures.len(), 1);

    let mut ids: Vec<_> = rows.iter().map(|r| r.record.id.clone()).collect();
    ids.sort();
    assert_eq!(ids, vec!["active".to_string(), "broken".to_string()]);
    assert_eq!(rows[0].title, "Twoje zamówienie numer 1");
}

#[tokio::test]
async fn test_bad_request_pruned_only_when_enabled() {
    let h = harness().await;
    h.registry
        .add(LocalOrder::new("stale", "tok", Utc::now()))
        .unwrap();
    h.backend
        .set_order("stale", 400, json!({ "error": "Invalid token" }));

    let keep = StatusPoller::new(
        Arc::new(h.api.clone()),
        h.registry.clone(),
        PrunePolicy::default(),
    );
    keep.sweep().await.unwrap();
    assert_eq!(h.registry.list().unwrap().len(), 1);

    let prune = StatusPoller::new(
        Arc::new(h.api.clone()),
        h.registry.clone(),
        PrunePolicy {
            prune_on_bad_request: true,
        },
    );
    let report = prune.sweep().await.unwrap();
    assert_eq!(report.removed_ids(), vec!["stale".to_string()]);
    assert!(h.registry.list().unwrap().is_empty());
}

#[tokio::test]
async fn test_admin_login_rejected_stores_nothing() {
    let h = harness().await;
    let mut session = AdminSession::new(h.api.clone(), &PL, "Kraków");

    let err = session.login(ADMIN_USER, "wrong").await.unwrap_err();
    assert!(matches!(err, AdminError::InvalidCredentials(_)));
    assert_eq!(err.to_string(), "Nieprawidłowy login lub hasło");
    assert!(!session.is_authenticated());
    assert!(h.store.get(ADMIN_BASIC_USER).unwrap().is_none());
}

#[tokio::test]
async fn test_admin_login_then_board() {
    let h = harness().await;
    let mut session = AdminSession::new(h.api.clone(), &PL, "Kraków");

    session.login(ADMIN_USER, ADMIN_PASSWORD).await.unwrap();
    assert!(admin_credentials(h.store.as_ref()).unwrap().is_some());

    let board = session.load_board().await.unwrap();
    assert_eq!(board.active.len(), 1);
    assert_eq!(board.completed.len(), 1);
    assert!(board.find("b2").is_some());

    session.mark_done("a1").await.unwrap();
    session.delete("b2").await.unwrap();
}

#[tokio::test]
async fn test_admin_list_edit_and_purge() {
    let h = harness().await;
    let mut session = AdminSession::new(h.api.clone(), &PL, "Kraków");
    session.login(ADMIN_USER, ADMIN_PASSWORD).await.unwrap();

    let query = AdminOrderQuery {
        status: Some(OrderStatus::Assigned),
        ..AdminOrderQuery::default()
    };
    let list = session.list(&query).await.unwrap();
    assert_eq!(list.total, Some(12));

    let edit = OrderEdit {
        phone: Some("600100200".to_string()),
        ..OrderEdit::default()
    };
    session.edit("a1", edit).await.unwrap();
    let sent = h.backend.last_call("PUT", "/admin/orders/a1").unwrap().json();
    assert_eq!(
        sent,
        json!({ "client": { "name": "Jan Kowalski", "phone": "600100200" } })
    );

    session.purge("b2").await.unwrap();
    assert!(h.backend.last_call("DELETE", "/admin/orders/b2").is_some());
}

#[tokio::test]
async fn test_invalid_edit_sends_nothing() {
    let h = harness().await;
    let mut session = AdminSession::new(h.api.clone(), &PL, "Kraków");
    session.login(ADMIN_USER, ADMIN_PASSWORD).await.unwrap();
    let before = h.backend.call_count();

    let err = session.edit("a1", OrderEdit::default()).await.unwrap_err();
    assert!(matches!(err, AdminError::Validation(_)));
    assert_eq!(h.backend.call_count(), before);
}

#[tokio::test]
async fn test_cached_credentials_restore_session() {
    let h = harness().await;
    save_admin_credentials(h.store.as_ref(), ADMIN_USER, ADMIN_PASSWORD).unwrap();
    let mut session = AdminSession::new(h.api.clone(), &PL, "Kraków");

    let state = session.check_auth().await.unwrap().clone();
    assert_eq!(
        state,
        AuthState::Authenticated {
            username: ADMIN_USER.to_string()
        }
    );
}

#[tokio::test]
async fn test_rejected_cached_credentials_are_cleared() {
    let h = harness().await;
    save_admin_credentials(h.store.as_ref(), ADMIN_USER, "stale").unwrap();
    let mut session = AdminSession::new(h.api.clone(), &PL, "Kraków");

    let state = session.check_auth().await.unwrap().clone();
    assert_eq!(state, AuthState::Anonymous);
    assert!(admin_credentials(h.store.as_ref()).unwrap().is_none());
}

#[tokio::test]
async fn test_unauthorized_admin_call_expires_session() {
    let h = harness().await;
    let mut session = AdminSession::new(h.api.clone(), &PL, "Kraków");
    session.login(ADMIN_USER, ADMIN_PASSWORD).await.unwrap();

    h.backend.revoke_admin();
    let err = session.load_board().await.unwrap_err();

    assert!(matches!(err, AdminError::SessionExpired(_)));
    assert!(!session.is_authenticated());
    assert!(admin_credentials(h.store.as_ref()).unwrap().is_none());
}

#[tokio::test]
async fn test_order_json_fixture_matches_client_model() {
    let order: lockopener::common::Order =
        serde_json::from_value(order_json("x", "cancelled")).unwrap();
    assert!(!order.is_active());
}
