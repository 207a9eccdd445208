//! HTTP + WebSocket API for RPS Arena
//!
//! Endpoints:
//! - POST /session/new - Create new session
//! - GET /session/{id} - Get session snapshot
//! - POST /session/{id}/mode - Select mode (zeroes scores)
//! - POST /session/{id}/move - Submit a move
//! - POST /session/{id}/next - Advance to the next round
//! - DELETE /session/{id} - Close a session
//! - WS /ws/{id} - Live snapshots
//! - GET /health - Health check

use axum::{
    extract::{Path, State, WebSocketUpgrade, rejection::JsonRejection, ws::{Message, WebSocket}},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};

use crate::core::Game;
use crate::error::GameError;
use crate::types::{Mode, Move, Seat, SessionSnapshot};
use crate::UPDATE_CHANNEL_CAPACITY;

/// One hosted game
pub struct HostedSession {
    pub id: String,
    pub game: Game,
    pub update_tx: broadcast::Sender<SessionSnapshot>,
}

impl HostedSession {
    /// Publish a snapshot to WebSocket subscribers
    fn publish(&self, snapshot: &SessionSnapshot) {
        // Err only means nobody is subscribed
        let delivered = self.update_tx.send(snapshot.clone()).unwrap_or(0);
        debug!(session = %self.id, delivered, reason = snapshot.reason.code(), "snapshot published");
    }
}

/// App state
pub struct AppState {
    pub sessions: RwLock<HashMap<String, HostedSession>>,
}

/// Create new session request
#[derive(Debug, Deserialize)]
pub struct NewSessionRequest {
    pub mode: Option<String>,
    pub seed: Option<u64>,
}

/// Create new session response
#[derive(Debug, Serialize)]
pub struct NewSessionResponse {
    pub session_id: String,
    pub websocket_url: String,
    pub snapshot: SessionSnapshot,
}

/// Select mode request
#[derive(Debug, Deserialize)]
pub struct ModeRequest {
    pub mode: String,
}

/// Submit move request
#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    #[serde(rename = "move")]
    pub mv: String,
    pub seat: Option<String>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions_active: usize,
}

/// Error body for 4xx responses
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

/// API failure
#[derive(Debug)]
pub enum ApiError {
    SessionNotFound(String),
    BadInput(GameError),
    BadBody(JsonRejection),
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        ApiError::BadInput(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadBody(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::SessionNotFound(id) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: "session_not_found".to_string(),
                    message: format!("no session '{}'", id),
                },
            ),
            ApiError::BadInput(err) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: err.code().to_string(),
                    message: err.to_string(),
                },
            ),
            ApiError::BadBody(rejection) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "invalid_body".to_string(),
                    message: rejection.body_text(),
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

/// Create the API router
pub fn create_router() -> Router {
    let state = Arc::new(AppState {
        sessions: RwLock::new(HashMap::new()),
    });

    Router::new()
        .route("/health", get(health))
        .route("/session/new", post(create_session))
        .route("/session/:id", get(get_session).delete(close_session))
        .route("/session/:id/mode", post(select_mode))
        .route("/session/:id/move", post(submit_move))
        .route("/session/:id/next", post(advance_round))
        .route("/ws/:id", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sessions = state.sessions.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        sessions_active: sessions.len(),
    })
}

/// Create new session
async fn create_session(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewSessionRequest>, JsonRejection>,
) -> Result<Json<NewSessionResponse>, ApiError> {
    let Json(req) = body?;
    let mode = match req.mode.as_deref() {
        Some(m) => m.parse::<Mode>()?,
        None => Mode::default(),
    };

    let game = match req.seed {
        Some(seed) => Game::seeded(mode, seed),
        None => Game::new(mode),
    };

    let session_id = generate_session_id();
    let snapshot = game.snapshot();
    let (tx, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);

    let session = HostedSession {
        id: session_id.clone(),
        game,
        update_tx: tx,
    };

    let mut sessions = state.sessions.write().await;
    sessions.insert(session_id.clone(), session);
    info!(session = %session_id, %mode, "session created");

    Ok(Json(NewSessionResponse {
        session_id: session_id.clone(),
        websocket_url: format!("/ws/{}", session_id),
        snapshot,
    }))
}

/// Get session snapshot
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(ApiError::SessionNotFound(id))?;
    Ok(Json(session.game.snapshot()))
}

/// Close a session; live sockets end when its channel drops
async fn close_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.remove(&id).ok_or(ApiError::SessionNotFound(id))?;
    info!(session = %session.id, rounds = session.game.session().rounds_played(), "session closed");
    Ok(StatusCode::NO_CONTENT)
}

/// Select mode
async fn select_mode(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<ModeRequest>, JsonRejection>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let Json(req) = body?;
    let mode = req.mode.parse::<Mode>()?;
    with_session(&state, id, |game| game.select_mode(mode)).await
}

/// Submit a move
async fn submit_move(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let Json(req) = body?;
    let mv = req.mv.parse::<Move>()?;
    let seat = req.seat.as_deref().map(str::parse::<Seat>).transpose()?;
    with_session(&state, id, |game| match seat {
        Some(seat) => game.submit_move_as(seat, mv),
        None => game.submit_move(mv),
    })
    .await
}

/// Advance to the next round
async fn advance_round(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    with_session(&state, id, Game::advance_round).await
}

/// Apply one update to a session under the write lock, then broadcast
async fn with_session<F>(state: &AppState, id: String, update: F) -> Result<Json<SessionSnapshot>, ApiError>
where
    F: FnOnce(&mut Game) -> SessionSnapshot,
{
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(ApiError::SessionNotFound(id))?;

    let snapshot = update(&mut session.game);
    session.publish(&snapshot);
    Ok(Json(snapshot))
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, ApiError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or_else(|| ApiError::SessionNotFound(id.clone()))?;
    let rx = session.update_tx.subscribe();
    let initial = session.game.snapshot();
    drop(sessions);

    Ok(ws.on_upgrade(move |socket| async move {
        handle_websocket(socket, initial, rx).await;
    }))
}

/// Handle WebSocket connection: current snapshot first, then every update
async fn handle_websocket(
    socket: WebSocket,
    initial: SessionSnapshot,
    mut rx: broadcast::Receiver<SessionSnapshot>,
) {
    let (mut sender, mut receiver) = socket.split();

    let to_message = |snapshot: &SessionSnapshot| {
        Message::Text(serde_json::to_string(snapshot).unwrap_or_default())
    };

    if sender.send(to_message(&initial)).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            update = rx.recv() => match update {
                Ok(snapshot) => {
                    if sender.send(to_message(&snapshot)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "websocket subscriber lagging");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                Some(Ok(_)) => {}
            },
        }
    }
}

/// Generate session ID
fn generate_session_id() -> String {
    format!("session_{:016x}", rand::random::<u64>())
}

/// Run the API server
pub async fn run_server(addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "RPS Arena API listening");
    println!("✊ RPS Arena API running on {}", addr);
    println!("  POST /session/new       - Create session");
    println!("  GET  /session/:id       - Get snapshot");
    println!("  POST /session/:id/mode  - Select mode");
    println!("  POST /session/:id/move  - Submit move");
    println!("  POST /session/:id/next  - Next round");
    println!("  DELETE /session/:id     - Close session");
    println!("  WS   /ws/:id            - Live updates");
    println!("  GET  /health            - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}
