mod assets;
mod error;

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::{Path, Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::{
    auth,
    config::{MapboxConfig, RanchConfig},
    ranch::{fence_polygon, Animal, Gate, GeoPoint, RANCH_CENTER},
    simulators::{CameraReading, ChuteReading, SensorReport},
    state::RanchState,
};

pub use error::ApiError;

pub struct AppState {
    pub ranch: RanchState,
    pub mapbox: MapboxConfig,
    pub static_dir: PathBuf,
    pub media_dir: PathBuf,
}

impl AppState {
    pub fn from_config(config: &RanchConfig) -> Self {
        Self {
            ranch: RanchState::new(config.seed),
            mapbox: config.mapbox.clone(),
            static_dir: config.static_dir.clone(),
            media_dir: config.media_dir.clone(),
        }
    }
}

/// Sign-in body. Missing or null fields count as empty strings.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Reads a sign-in body regardless of its content type. Anything that is
    /// not a JSON object yields empty credentials, which are then rejected.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or_default()
    }

    pub fn password(&self) -> &str {
        self.password.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub status: &'static str,
    pub user: String,
}

#[derive(Serialize)]
struct SensorsEnvelope {
    sensors: SensorReport,
}

#[derive(Serialize)]
struct HerdEnvelope {
    herd: Vec<Animal>,
}

#[derive(Serialize)]
struct GatesEnvelope {
    gates: Vec<Gate>,
}

#[derive(Serialize)]
struct ChuteEnvelope {
    chute: ChuteReading,
}

#[derive(Serialize)]
struct CamerasEnvelope {
    cameras: Vec<CameraReading>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapConfig {
    mapbox_token: Option<String>,
    ranch_center: GeoPoint,
    fence: FenceGeometry,
}

#[derive(Serialize)]
struct FenceGeometry {
    coordinates: Vec<[f64; 2]>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/sensors", get(sensors))
        .route("/api/herd", get(herd))
        .route("/api/gates", get(gates))
        .route("/api/chute", get(chute))
        .route("/api/cameras", get(cameras))
        .route("/api/config", get(map_config))
        .route("/static/*path", get(static_asset))
        .route("/media/*path", get(media_asset))
        .fallback(spa_fallback)
        .layer(middleware::from_fn(cors))
        .with_state(state)
}

pub async fn run(config: RanchConfig) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.port))?;

    let state = Arc::new(AppState::from_config(&config));
    info!(seed = state.ranch.seed(), "ranch layout generated");
    if !state.static_dir.exists() {
        warn!(
            dir = %state.static_dir.display(),
            "frontend build not found; only the API will be served"
        );
    }

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("3 Strands ranch telemetry listening on http://{addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down ranch telemetry");
}

async fn cors(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        allow_any_origin(response.headers_mut());
        return response;
    }
    let mut response = next.run(request).await;
    allow_any_origin(response.headers_mut());
    response
}

fn allow_any_origin(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("*"),
    );
}

/// Every malformed body (wrong content type, bad JSON, null fields) is
/// answered with the same 401 as a wrong password.
async fn login(body: Bytes) -> Result<Json<LoginResponse>, ApiError> {
    let payload = LoginRequest::from_body(&body);
    match auth::authenticate(payload.username(), payload.password()) {
        Ok(user) => {
            info!(%user, "login accepted");
            Ok(Json(LoginResponse { status: "ok", user }))
        }
        Err(err) => {
            warn!(username = %payload.username().trim(), "login rejected");
            Err(err.into())
        }
    }
}

async fn sensors(State(state): State<Arc<AppState>>) -> Json<SensorsEnvelope> {
    let sensors = state.ranch.sensors();
    debug!(system = ?sensors.system.status, "sensor sweep");
    Json(SensorsEnvelope { sensors })
}

async fn herd(State(state): State<Arc<AppState>>) -> Json<HerdEnvelope> {
    Json(HerdEnvelope {
        herd: state.ranch.herd_view(),
    })
}

/// Not idempotent: every call flips one gate before answering.
async fn gates(State(state): State<Arc<AppState>>) -> Json<GatesEnvelope> {
    Json(GatesEnvelope {
        gates: state.ranch.poll_gates(),
    })
}

async fn chute(State(state): State<Arc<AppState>>) -> Result<Json<ChuteEnvelope>, ApiError> {
    let chute = state
        .ranch
        .chute(Utc::now())
        .ok_or_else(|| ApiError::NotFound("No animals on record".into()))?;
    debug!(animal = %chute.id, weight = chute.weight, "chute reading");
    Ok(Json(ChuteEnvelope { chute }))
}

async fn cameras(State(state): State<Arc<AppState>>) -> Json<CamerasEnvelope> {
    Json(CamerasEnvelope {
        cameras: state.ranch.cameras(),
    })
}

async fn map_config(State(state): State<Arc<AppState>>) -> Json<MapConfig> {
    let mapbox_token = state.mapbox.resolve_token();
    if mapbox_token.is_none() {
        debug!("no mapbox token configured");
    }
    Json(MapConfig {
        mapbox_token,
        ranch_center: RANCH_CENTER,
        fence: FenceGeometry {
            coordinates: fence_polygon(),
        },
    })
}

async fn static_asset(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Response, ApiError> {
    assets::serve(&state.static_dir.join("static"), &path).await
}

async fn media_asset(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Response, ApiError> {
    assets::serve(&state.media_dir, &path).await
}

/// Serves build files from the static root, falling back to `index.html` so
/// client-side routes resolve. `/api` paths never fall through.
async fn spa_fallback(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
) -> Result<Response, ApiError> {
    let path = uri.path();
    let readable = method == Method::GET || method == Method::HEAD;
    if !readable || path.starts_with("/api") {
        return Err(ApiError::NotFound(format!("No route for {method} {path}")));
    }
    if let Ok(response) = assets::serve(&state.static_dir, path).await {
        return Ok(response);
    }
    assets::serve_file(&state.static_dir.join("index.html")).await
}
