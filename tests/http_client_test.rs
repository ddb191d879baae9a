//! HTTP AI client against an in-process axum server.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use shifting_shapes::adapter::{AiClient, AiError, BoardRequest, HttpAiClient};
use shifting_shapes::core::Grid;
use shifting_shapes::types::Cell;

#[derive(Clone, Default)]
struct Recorded {
    bodies: Arc<Mutex<Vec<(String, Value)>>>,
}

async fn get_board(State(rec): State<Recorded>, Json(body): Json<Value>) -> String {
    rec.bodies.lock().unwrap().push(("getBoard".to_string(), body));
    // A chatty model wrapping its answer in a fenced block.
    "Here is my move:\n```json\n{\"board\": [[0,0,0],[1,1,1],[0,1,0]], \"predict\": [\"line\", \"tee\"]}\n```\nGood luck!"
        .to_string()
}

async fn predict(State(rec): State<Recorded>, Json(body): Json<Value>) -> String {
    rec.bodies.lock().unwrap().push(("predict".to_string(), body));
    "It looks like a snake".to_string()
}

async fn failing(Json(_body): Json<Value>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "upstream", "details": "model offline"})),
    )
}

async fn legacy(Json(_body): Json<Value>) -> Json<Value> {
    Json(json!([[0, 0, 0], [0, 1, 0], [0, 0, 0]]))
}

async fn wrong_size(Json(_body): Json<Value>) -> Json<Value> {
    Json(json!({"board": [[0, 1], [1, 0]], "predict": "dots"}))
}

async fn serve(app: Router) -> anyhow::Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

fn client(base: &str) -> HttpAiClient {
    HttpAiClient::new(base, 3, Duration::from_secs(5)).expect("client")
}

fn middle_row() -> Grid {
    Grid::from_cells([Cell::new(0, 1), Cell::new(1, 1), Cell::new(2, 1)], 3)
}

#[tokio::test]
async fn get_board_unwraps_fenced_reply() -> anyhow::Result<()> {
    let rec = Recorded::default();
    let app = Router::new()
        .route("/getBoard", post(get_board))
        .route("/predict", post(predict))
        .with_state(rec.clone());
    let base = serve(app).await?;
    let ai = client(&format!("{base}/"));

    let request = BoardRequest::new(&middle_row()).with_debug_context("unit");
    let reply = ai.get_board(&request).await?;

    assert_eq!(reply.predict, vec!["line".to_string(), "tee".to_string()]);
    // Row 0 is the top, so the extra 1 in the last row is y = 0.
    assert!(reply.board.is_occupied(Cell::new(1, 0)));
    assert_eq!(reply.board.count(), 4);

    let bodies = rec.bodies.lock().unwrap().clone();
    assert_eq!(bodies.len(), 1);
    assert_eq!(
        bodies[0].1,
        json!({"board": [[0, 0, 0], [1, 1, 1], [0, 0, 0]], "debug": 1, "context": "unit"})
    );
    Ok(())
}

#[tokio::test]
async fn predict_posts_bare_grid_and_returns_text() -> anyhow::Result<()> {
    let rec = Recorded::default();
    let app = Router::new()
        .route("/predict", post(predict))
        .with_state(rec.clone());
    let base = serve(app).await?;

    let text = client(&base).predict(&middle_row()).await?;
    assert_eq!(text, "It looks like a snake");

    let bodies = rec.bodies.lock().unwrap().clone();
    assert_eq!(bodies[0].1, json!([[0, 0, 0], [1, 1, 1], [0, 0, 0]]));
    Ok(())
}

#[tokio::test]
async fn error_status_carries_details() -> anyhow::Result<()> {
    let base = serve(Router::new().route("/getBoard", post(failing))).await?;

    let err = client(&base)
        .get_board(&BoardRequest::new(&middle_row()))
        .await
        .unwrap_err();
    match &err {
        AiError::Status { status, details } => {
            assert_eq!(*status, 500);
            assert_eq!(details.as_deref(), Some("model offline"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
    assert_eq!(err.user_message(), "AI error 500: model offline");
    Ok(())
}

#[tokio::test]
async fn legacy_bare_grid_is_accepted() -> anyhow::Result<()> {
    let base = serve(Router::new().route("/getBoard", post(legacy))).await?;

    let reply = client(&base)
        .get_board(&BoardRequest::new(&middle_row()))
        .await?;
    assert!(reply.predict.is_empty());
    assert_eq!(reply.board.cells(), vec![Cell::new(1, 1)]);
    Ok(())
}

#[tokio::test]
async fn wrong_board_size_is_a_parse_error() -> anyhow::Result<()> {
    let base = serve(Router::new().route("/getBoard", post(wrong_size))).await?;

    let err = client(&base)
        .get_board(&BoardRequest::new(&middle_row()))
        .await
        .unwrap_err();
    assert!(err.is_parse_error());
    assert_eq!(err.user_message(), "unexpected data from AI");
    Ok(())
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    // Bind then drop to get a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}"))
        .predict(&middle_row())
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::Transport(_)));
    assert_eq!(err.user_message(), "AI request failed");
}
