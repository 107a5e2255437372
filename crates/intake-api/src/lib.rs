//! JSON REST API for applicant intake.
//!
//! Exposes an axum [`Router`] backed by any
//! [`intake_core::store::ApplicantStore`]. Auth, TLS, and transport concerns
//! are the caller's responsibility.

pub mod applicants;
pub mod error;
pub mod properties;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use intake_core::store::ApplicantStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ApplicantStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Per-property intake and retrieval
    .route(
      "/properties/{property_id}/applicants",
      get(properties::list::<S>).post(properties::create_manual::<S>),
    )
    .route(
      "/properties/{property_id}/external-applicants",
      post(properties::create_portal::<S>),
    )
    // Single applicants
    .route(
      "/applicants/{id}",
      get(applicants::get_one::<S>).patch(applicants::revise::<S>),
    )
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, Response, StatusCode, header},
  };
  use intake_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use uuid::Uuid;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
      Some(json) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(req).await.unwrap()
  }

  async fn json_body(resp: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  fn manual_body(first_name: &str, email: &str) -> Value {
    json!({
      "email": email,
      "firstName": first_name,
      "lastName": "Doe",
      "userComment": "I am a comment",
      "salutation": "MRS",
    })
  }

  fn portal_body() -> Value {
    json!({
      "email": "john.doe@example.com",
      "firstName": "John",
      "lastName": "Doe",
      "applicantComment": "Applicant comment",
      "salutation": "MRS",
      "wbsPresent": true,
      "pets": false,
      "numberOfPersons": 3,
      "earliestMoveInDate": "2024-01-01",
    })
  }

  async fn create_manual(app: &Router, property: Uuid, first_name: &str, email: &str) -> String {
    let uri = format!("/properties/{property}/applicants");
    let resp = send(app, "POST", &uri, Some(manual_body(first_name, email))).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    json_body(resp).await["id"].as_str().unwrap().to_owned()
  }

  async fn set(app: &Router, id: &str, revision: Value) {
    let resp = send(app, "PATCH", &format!("/applicants/{id}"), Some(revision)).await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  async fn list(app: &Router, property: Uuid, query: &str) -> Vec<Value> {
    let resp = send(app, "GET", &format!("/properties/{property}/applicants{query}"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    json_body(resp).await.as_array().unwrap().clone()
  }

  fn names(applicants: &[Value]) -> Vec<&str> {
    applicants
      .iter()
      .map(|a| a["firstName"].as_str().unwrap())
      .collect()
  }

  // ── Manual creation ─────────────────────────────────────────────────────────

  #[tokio::test]
  async fn manual_create_returns_201_with_location() {
    let app = app().await;
    let uri = format!("/properties/{}/applicants", Uuid::new_v4());

    let resp = send(&app, "POST", &uri, Some(manual_body("John", "john.doe@example.com"))).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let location = resp
      .headers()
      .get(header::LOCATION)
      .unwrap()
      .to_str()
      .unwrap()
      .to_owned();
    let id = json_body(resp).await["id"].as_str().unwrap().to_owned();
    assert_eq!(location, format!("/applicants/{id}"));

    let fetched = json_body(send(&app, "GET", &location, None).await).await;
    assert_eq!(fetched["email"], "john.doe@example.com");
    assert_eq!(fetched["firstName"], "John");
    assert_eq!(fetched["lastName"], "Doe");
    assert_eq!(fetched["userComment"], "I am a comment");
    assert_eq!(fetched["salutation"], "MRS");
    assert_eq!(fetched["creationSource"], "MANUAL");
    assert_eq!(fetched["status"], "CREATED");
  }

  #[tokio::test]
  async fn manual_create_accepts_legacy_comment_key() {
    let app = app().await;
    let uri = format!("/properties/{}/applicants", Uuid::new_v4());
    let body = json!({
      "email": "john.doe@example.com",
      "firstName": "John",
      "lastName": "Doe",
      "comment": "This is a comment",
    });

    let resp = send(&app, "POST", &uri, Some(body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let id = json_body(resp).await["id"].as_str().unwrap().to_owned();

    let fetched = json_body(send(&app, "GET", &format!("/applicants/{id}"), None).await).await;
    assert_eq!(fetched["userComment"], "This is a comment");
    assert!(fetched["salutation"].is_null());
  }

  #[tokio::test]
  async fn manual_create_rejects_invalid_input() {
    let app = app().await;
    let property = Uuid::new_v4();
    let uri = format!("/properties/{property}/applicants");

    let bodies = [
      json!({ "email": "invalid-email", "firstName": "John", "lastName": "Doe" }),
      json!({ "firstName": "John", "lastName": "Doe" }),
      json!({ "email": "john.doe@example.com", "lastName": "Doe" }),
      json!({ "email": "john.doe@example.com", "firstName": "John" }),
      json!({ "email": "john.doe@example.com", "firstName": "John", "lastName": "  " }),
      json!({ "email": "john.doe@example.com", "firstName": "John", "lastName": "Doe", "salutation": "MX" }),
    ];
    for body in bodies {
      let resp = send(&app, "POST", &uri, Some(body.clone())).await;
      assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{body}");
      assert!(json_body(resp).await["error"].is_string());
    }

    assert!(list(&app, property, "").await.is_empty());
  }

  #[tokio::test]
  async fn create_rejects_malformed_property_id() {
    let app = app().await;
    let resp = send(
      &app,
      "POST",
      "/properties/not-a-uuid/applicants",
      Some(manual_body("John", "john.doe@example.com")),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  // ── Portal creation ─────────────────────────────────────────────────────────

  #[tokio::test]
  async fn portal_create_stores_all_fields() {
    let app = app().await;
    let uri = format!("/properties/{}/external-applicants", Uuid::new_v4());

    let resp = send(&app, "POST", &uri, Some(portal_body())).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let id = json_body(resp).await["id"].as_str().unwrap().to_owned();

    let fetched = json_body(send(&app, "GET", &format!("/applicants/{id}"), None).await).await;
    assert_eq!(fetched["email"], "john.doe@example.com");
    assert_eq!(fetched["firstName"], "John");
    assert_eq!(fetched["applicantComment"], "Applicant comment");
    assert_eq!(fetched["salutation"], "MRS");
    assert_eq!(fetched["wbsPresent"], true);
    assert_eq!(fetched["pets"], false);
    assert_eq!(fetched["numberOfPersons"], 3);
    assert_eq!(fetched["earliestMoveInDate"], "2024-01-01");
    assert_eq!(fetched["creationSource"], "PORTAL");
    assert_eq!(fetched["status"], "CREATED");
  }

  #[tokio::test]
  async fn portal_create_stamps_iso_utc_timestamp() {
    let app = app().await;
    let uri = format!("/properties/{}/external-applicants", Uuid::new_v4());

    let before = chrono::Utc::now();
    let resp = send(&app, "POST", &uri, Some(portal_body())).await;
    let id = json_body(resp).await["id"].as_str().unwrap().to_owned();

    let fetched = json_body(send(&app, "GET", &format!("/applicants/{id}"), None).await).await;
    let stamp = fetched["creationTimestamp"].as_str().unwrap();

    // YYYY-MM-DDTHH:MM:SS.ffffffZ
    assert_eq!(stamp.len(), 27, "{stamp}");
    assert!(stamp.ends_with('Z'), "{stamp}");
    assert_eq!(&stamp[10..11], "T");
    assert_eq!(&stamp[19..20], ".");

    let parsed = chrono::DateTime::parse_from_rfc3339(stamp).unwrap();
    let delta = parsed.with_timezone(&chrono::Utc) - before;
    assert!(delta.num_seconds().abs() < 5, "{delta}");
  }

  #[tokio::test]
  async fn portal_create_without_first_name() {
    let app = app().await;
    let uri = format!("/properties/{}/external-applicants", Uuid::new_v4());
    let body = json!({ "email": "portal@example.com", "lastName": "Doe" });

    let resp = send(&app, "POST", &uri, Some(body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let id = json_body(resp).await["id"].as_str().unwrap().to_owned();

    let fetched = json_body(send(&app, "GET", &format!("/applicants/{id}"), None).await).await;
    assert!(fetched["firstName"].is_null());
    assert_eq!(fetched["wbsPresent"], false);
    assert_eq!(fetched["pets"], false);
  }

  // ── Retrieval ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn get_unknown_applicant_is_404() {
    let app = app().await;
    let resp = send(&app, "GET", &format!("/applicants/{}", Uuid::new_v4()), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&app, "GET", "/applicants/not-an-id", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn list_returns_newest_first_for_one_property() {
    let app = app().await;
    let property = Uuid::new_v4();
    let email = "john.doe@example.com";

    let rick = create_manual(&app, property, "Rick", email).await;
    let morty = create_manual(&app, property, "Morty", email).await;
    create_manual(&app, property, "Summer", email).await;
    create_manual(&app, Uuid::new_v4(), "Greg", email).await;

    set(&app, &rick, json!({ "status": "INVITED" })).await;
    set(&app, &morty, json!({ "status": "DECLINED" })).await;

    let all = list(&app, property, "").await;
    assert_eq!(names(&all), ["Summer", "Morty", "Rick"]);
  }

  #[tokio::test]
  async fn list_filters_by_status() {
    let app = app().await;
    let property = Uuid::new_v4();
    let email = "john.doe@example.com";

    create_manual(&app, property, "Chiara", email).await;
    let thorsten = create_manual(&app, property, "Thorsten", email).await;
    let andi = create_manual(&app, property, "Andi", email).await;
    let lisa = create_manual(&app, property, "Lisa", email).await;

    set(&app, &thorsten, json!({ "status": "INVITED" })).await;
    set(&app, &lisa, json!({ "status": "INVITED" })).await;
    set(&app, &andi, json!({ "status": "DECLINED" })).await;

    let invited = list(&app, property, "?status=INVITED").await;
    assert_eq!(names(&invited), ["Lisa", "Thorsten"]);

    let declined = list(&app, property, "?status=DECLINED").await;
    assert_eq!(names(&declined), ["Andi"]);
  }

  #[tokio::test]
  async fn list_filters_by_part_of_email() {
    let app = app().await;
    let property = Uuid::new_v4();

    create_manual(&app, property, "Christina", "christina@gmail.com").await;
    create_manual(&app, property, "Thorsten", "thorsten@example.com").await;
    create_manual(&app, property, "Chris", "chris@gmail.com").await;

    let hits = list(&app, property, "?partOfEmail=chris").await;
    assert_eq!(names(&hits), ["Chris", "Christina"]);
  }

  #[tokio::test]
  async fn list_filters_by_all_parameters() {
    let app = app().await;
    let property = Uuid::new_v4();

    let seeds = [
      ("Chiara", "chiara@example.com", "INVITED", 3, true),
      ("Chris", "chris@example.com", "INVITED", 3, false),
      ("Christina", "christina@example.com", "INVITED", 2, true),
      ("Richard", "richard@example.com", "DECLINED", 3, true),
      ("Thorsten", "thorsten@example.com", "INVITED", 3, true),
    ];
    for (name, email, status, persons, wbs) in seeds {
      let id = create_manual(&app, property, name, email).await;
      set(&app, &id, json!({
        "status": status,
        "numberOfPersons": persons,
        "wbsPresent": wbs,
      }))
      .await;
    }

    let hits = list(
      &app,
      property,
      "?status=INVITED&partOfEmail=ch&numberOfPersons=3&wbsPresent=true",
    )
    .await;
    assert_eq!(names(&hits), ["Chiara"]);
  }

  #[tokio::test]
  async fn list_rejects_unknown_status() {
    let app = app().await;
    let uri = format!("/properties/{}/applicants?status=MAYBE", Uuid::new_v4());
    let resp = send(&app, "GET", &uri, None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  // ── Revision ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn revise_requires_fields_and_existing_applicant() {
    let app = app().await;
    let id = create_manual(&app, Uuid::new_v4(), "John", "john.doe@example.com").await;

    let resp = send(&app, "PATCH", &format!("/applicants/{id}"), Some(json!({}))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = send(
      &app,
      "PATCH",
      &format!("/applicants/{}", Uuid::new_v4()),
      Some(json!({ "status": "INVITED" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
