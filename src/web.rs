//! The HTTP surface: a reload route and the match-lookup form endpoint.
//!
//! Responses are JSON; rendering is left to whatever sits in front.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Json, Redirect, Response},
    routing::get,
    Router,
};
use log::{error, info};
use serde::{Deserialize, Serialize};
use snafu::prelude::*;

use rotation_match::{distinct_blocks, find_matches, AssignmentRecord, RecordStore};

use crate::roster::{self, config_reader::AppConfig, RosterError, RosterResult};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
    pub config: Arc<AppConfig>,
}

#[derive(Debug, Clone)]
pub struct ApiError {
    pub message: String,
    pub code: StatusCode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ApiErrorResponse {
    message: String,
}

impl From<RosterError> for ApiError {
    fn from(err: RosterError) -> Self {
        // The full diagnostic goes to the log; the caller gets a mapped
        // message without internal detail.
        error!("Error while loading the roster: {}", err);
        let (code, message) = match &err {
            RosterError::MissingCredential {} => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "No spreadsheet credential is configured.",
            ),
            RosterError::EmptyRoster {} => (
                StatusCode::BAD_GATEWAY,
                "The roster range contains no rows.",
            ),
            RosterError::Fetch { .. } | RosterError::FetchStatus { .. } => (
                StatusCode::BAD_GATEWAY,
                "The spreadsheet service could not be reached.",
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "The roster could not be loaded.",
            ),
        };
        ApiError {
            message: message.to_string(),
            code,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.code,
            Json(ApiErrorResponse {
                message: self.message,
            }),
        )
            .into_response()
    }
}

/// The JSON view of an assignment record.
#[derive(Debug, Clone, Serialize)]
struct RecordView {
    name: String,
    contact: String,
    email: String,
    specialty: String,
    block: String,
    location: String,
    #[serde(rename = "tradeStatus")]
    trade_status: String,
}

impl From<&AssignmentRecord> for RecordView {
    fn from(r: &AssignmentRecord) -> Self {
        RecordView {
            name: r.name.clone(),
            contact: r.contact.clone(),
            email: r.email.clone(),
            specialty: r.specialty.clone(),
            block: r.block.clone(),
            location: r.location.clone(),
            trade_status: r.trade_status.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct MatchResponse {
    blocks: Vec<String>,
    matches: Vec<RecordView>,
    message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchForm {
    pub name: String,
    pub block: String,
}

async fn reload_handler(State(state): State<AppState>) -> Result<Redirect, ApiError> {
    let records = roster::load_records(&state.config).await?;
    info!("reload: {:?} assignment records", records.len());
    state.store.replace(records);
    Ok(Redirect::to("/find_matches"))
}

async fn blank_form_handler(State(state): State<AppState>) -> Json<MatchResponse> {
    let records = state.store.all();
    Json(MatchResponse {
        blocks: distinct_blocks(&records),
        matches: Vec::new(),
        message: None,
    })
}

async fn find_matches_handler(
    State(state): State<AppState>,
    Form(form): Form<MatchForm>,
) -> Json<MatchResponse> {
    let records = state.store.all();
    let outcome = find_matches(&records, &form.name, &form.block);
    Json(MatchResponse {
        blocks: distinct_blocks(&records),
        matches: outcome.matches.iter().map(RecordView::from).collect(),
        message: outcome.message,
    })
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(reload_handler))
        .route(
            "/find_matches",
            get(blank_form_handler).post(find_matches_handler),
        )
        .with_state(state)
}

pub async fn serve(state: AppState) -> RosterResult<()> {
    let (host, port) = match &state.config.server {
        Some(s) => (
            s.host.clone().unwrap_or_else(|| "0.0.0.0".to_string()),
            s.port.unwrap_or(3000),
        ),
        None => ("0.0.0.0".to_string(), 3000),
    };
    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => whatever!("bad listen address {}:{}: {:?}", host, port, e),
    };
    info!("listening on {:?}", addr);
    if let Err(e) = axum::Server::bind(&addr)
        .serve(router(state).into_make_service())
        .await
    {
        whatever!("server error: {:?}", e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use axum::http::Request;
    use rotation_match::{builder::Builder, RosterRules};
    use tower::ServiceExt;

    fn surgery_roster() -> Vec<AssignmentRecord> {
        Builder::new(&RosterRules::default())
            .student("Alice Lee", "", "alice@example.edu")
            .assign("Round 1", "Surgery", "City Hospital")
            .unwrap()
            .assign("Round 2", "Pediatrics", "Children's Hospital")
            .unwrap()
            .student("Bob Tan", "555-0199", "bob@example.edu")
            .assign("Round 1", "Surgery", "County Hospital")
            .unwrap()
            .records()
    }

    fn test_state(records: Vec<AssignmentRecord>) -> AppState {
        let store = Arc::new(RecordStore::new());
        store.replace(records);
        AppState {
            store,
            config: Arc::new(AppConfig::default()),
        }
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn form_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/find_matches")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn post_find_matches_returns_peers() {
        let app = router(test_state(surgery_roster()));
        let response = app
            .oneshot(form_request("name=Alice+Lee&block=Round+1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let js = body_json(response).await;
        assert_eq!(js["message"], serde_json::Value::Null);
        let matches = js["matches"].as_array().unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0]["name"], "Bob Tan");
        assert_eq!(matches[0]["contact"], "555-0199");
        assert_eq!(matches[0]["tradeStatus"], "open");
        assert_eq!(
            js["blocks"].as_array().unwrap().len(),
            2 // Round 1 and Round 2
        );
    }

    #[tokio::test]
    async fn unknown_student_gets_a_message() {
        let app = router(test_state(surgery_roster()));
        let response = app
            .oneshot(form_request("name=Nobody&block=Round+1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let js = body_json(response).await;
        assert_eq!(js["message"], "No rotation found for Nobody in Round 1.");
        assert!(js["matches"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_find_matches_lists_blocks_only() {
        let app = router(test_state(surgery_roster()));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/find_matches")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let js = body_json(response).await;
        assert_eq!(js["blocks"], serde_json::json!(["Round 1", "Round 2"]));
        assert!(js["matches"].as_array().unwrap().is_empty());
        assert_eq!(js["message"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn reload_failure_reports_mapped_error_and_keeps_records() {
        // No sources configured: the reload fails, the store is untouched.
        let state = test_state(surgery_roster());
        let app = router(state.clone());
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let js = body_json(response).await;
        assert_eq!(js["message"], "The roster could not be loaded.");
        assert_eq!(state.store.all().len(), 3);
    }
}
