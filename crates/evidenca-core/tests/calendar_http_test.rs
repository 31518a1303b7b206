#![allow(clippy::unwrap_used)]
// End-to-end calendar flows through the real HTTP client against wiremock.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use evidenca_core::{
    Bay, CalendarOptions, ClientConfig, CoreError, EntityId, EventDraft, Point,
    ResourceCalendarView, Role, Session, User,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn session() -> Session {
    Session::new(
        SecretString::from("tok-1".to_string()),
        User {
            id: EntityId::Number(4),
            email: Some("ana@example.com".into()),
            first_name: "Ana".into(),
            last_name: "Novak".into(),
            role: Role::Admin,
        },
    )
}

async fn setup() -> (MockServer, ResourceCalendarView<evidenca_api::EvidencaClient>) {
    let server = MockServer::start().await;
    let mut config = ClientConfig::new(Url::parse(&server.uri()).unwrap());
    config.token = Some(SecretString::from("tok-1".to_string()));
    let client = config.build_client().unwrap();
    let view = ResourceCalendarView::new(client, session(), CalendarOptions::default());
    (server, view)
}

async fn mount_bay1(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/events"))
        .and(query_param("calendar", "Bay-1"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": false,
            "data": [
                { "id": 5, "title": "Oil", "calendar": "Bay-1", "user_id": 7,
                  "start": "2024-05-03T09:00:00.000Z", "end": "2024-05-03T09:30:00.000Z",
                  "first_name": "Bor", "last_name": "Kos" },
                { "id": 6, "title": "Broken dates", "calendar": "Bay-1",
                  "start": "not a date", "end": null }
            ]
        })))
        .mount(server)
        .await;
}

// ── Flows ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_appends_server_event() {
    let (server, mut view) = setup().await;
    mount_bay1(&server).await;

    Mock::given(method("POST"))
        .and(path("/add-event"))
        .and(body_partial_json(json!({ "title": "Service", "calendar": "Bay-1", "user_id": 4 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": false,
            "data": { "id": 9, "title": "Service", "calendar": "Bay-1",
                      "start": "2024-05-01T09:00", "end": "2024-05-01T10:00" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(view.mount().await.unwrap(), 2);
    assert!(view.events()[1].start.is_none());

    view.open_add_form();
    *view.add_draft_mut() = EventDraft::new("Service", "2024-05-01T09:00", "2024-05-01T10:00");
    view.create_event().await.unwrap();

    assert_eq!(view.events().len(), 3);
    let created = view.find(&EntityId::Number(9)).unwrap();
    assert_eq!(created.calendar, Bay::Bay1);
    assert_eq!(created.owner_name, "Ana Novak");
    assert!(!view.is_add_open());
}

#[tokio::test]
async fn test_rejected_save_leaves_state() {
    let (server, mut view) = setup().await;
    mount_bay1(&server).await;

    Mock::given(method("PUT"))
        .and(path("/update-event/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": true })))
        .expect(1)
        .mount(&server)
        .await;

    view.mount().await.unwrap();
    view.select_event(&EntityId::Number(5), Point::new(100, 40));
    assert!(view.open_editor());
    view.edit_draft_mut().title = "Renamed".into();

    let err = view.save_edit().await.unwrap_err();

    assert!(matches!(err, CoreError::Rejected { .. }), "got: {err:?}");
    assert_eq!(view.find(&EntityId::Number(5)).unwrap().title, "Oil");
    assert!(view.is_edit_open());
    assert_eq!(view.last_error(), Some("Rejected by the back end: request failed"));
}

#[tokio::test]
async fn test_delete_removes_event() {
    let (server, mut view) = setup().await;
    mount_bay1(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/delete-event/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": false })))
        .expect(1)
        .mount(&server)
        .await;

    view.mount().await.unwrap();
    view.select_event(&EntityId::Number(5), Point::default());
    view.delete_selected().await.unwrap();

    assert!(view.find(&EntityId::Number(5)).is_none());
    assert!(view.selection().is_none());
}

#[tokio::test]
async fn test_switching_bay_refetches() {
    let (server, mut view) = setup().await;
    mount_bay1(&server).await;

    Mock::given(method("GET"))
        .and(path("/events"))
        .and(query_param("calendar", "Bay-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": false,
            "data": [{ "id": 11, "title": "Alignment", "calendar": "Bay-2",
                       "start": "2024-05-04T08:00", "end": "2024-05-04T09:00" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    view.mount().await.unwrap();
    view.switch_calendar(Bay::Bay2).await.unwrap();

    let ids: Vec<_> = view.events().iter().filter_map(|e| e.id.clone()).collect();
    assert_eq!(ids, vec![EntityId::Number(11)]);
}
