use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::{
    cmp::Ordering,
    path::PathBuf,
    sync::{
        atomic::{AtomicU64, Ordering as AtomicOrdering},
        Arc,
    },
    time::{Instant, SystemTime, UNIX_EPOCH},
};
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};

use crate::config::BASE_PATH;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DIST_DIR: &str = "dist";
const DEFAULT_ASSET_MAX_AGE_SECONDS: u64 = 3_600;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const ASSET_MAX_AGE_SECONDS_BOUNDS: (u64, u64) = (0, 365 * 24 * 60 * 60);
const REQUEST_ID_HEADER: &str = "x-request-id";

static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LogLevel {
    Debug,
    Info,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(level: LogLevel) -> u8 {
            match level {
                LogLevel::Debug => 0,
                LogLevel::Info => 1,
            }
        }

        rank(*self).cmp(&rank(*other))
    }
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
        }
    }
}

#[derive(Clone, Debug)]
pub struct HostConfig {
    port: u16,
    dist_dir: PathBuf,
    base_path: String,
    asset_max_age_seconds: u64,
    log_level: LogLevel,
}

impl HostConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source; unset, blank or invalid
    /// values fall back to the defaults.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let dist_dir = non_empty(lookup("DIST_DIR"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIST_DIR));
        let base_path = normalize_base_path(
            non_empty(lookup("BASE_PATH"))
                .as_deref()
                .unwrap_or(BASE_PATH),
        );
        let asset_max_age_seconds = lookup("ASSET_MAX_AGE_SECONDS")
            .and_then(|value| parse_u64_with_bounds(&value, ASSET_MAX_AGE_SECONDS_BOUNDS))
            .unwrap_or(DEFAULT_ASSET_MAX_AGE_SECONDS);

        Self {
            port,
            dist_dir,
            base_path,
            asset_max_age_seconds,
            log_level: parse_log_level(lookup("LOG_LEVEL").as_deref(), DEFAULT_LOG_LEVEL),
        }
    }

    fn index_file(&self) -> PathBuf {
        self.dist_dir.join("index.html")
    }

    fn asset_cache_control(&self) -> HeaderValue {
        cache_control(&format!("public, max-age={}", self.asset_max_age_seconds))
    }
}

#[derive(Clone)]
struct AppState {
    config: Arc<HostConfig>,
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = HostConfig::from_env();
    let bind_address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&bind_address).await?;

    log_event(
        &config,
        LogLevel::Info,
        "server_listening",
        json!({
            "address": format!("http://127.0.0.1:{}{}/", config.port, config.base_path),
            "distDir": config.dist_dir.display().to_string(),
        }),
    );

    axum::serve(listener, router(config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

fn router(config: HostConfig) -> Router {
    let static_service =
        ServeDir::new(&config.dist_dir).fallback(ServeFile::new(config.index_file()));
    let base_path = config.base_path.clone();
    let state = AppState {
        config: Arc::new(config),
    };

    let app = Router::new().route("/healthz", get(healthz));
    let app = if base_path.is_empty() {
        app.fallback_service(static_service)
    } else {
        let target = format!("{base_path}/");
        app.route("/", get(move || async move { Redirect::temporary(&target) }))
            .nest_service(&base_path, static_service)
    };

    app.layer(middleware::from_fn_with_state(state.clone(), tag_response))
        .with_state(state)
}

#[derive(Serialize)]
struct Health {
    ok: bool,
    version: &'static str,
}

async fn healthz() -> impl IntoResponse {
    let mut headers = HeaderMap::new();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    let health = Health {
        ok: true,
        version: env!("CARGO_PKG_VERSION"),
    };
    (StatusCode::OK, headers, Json(health))
}

/// Stamps every response with a request id and a cache policy, then logs it.
async fn tag_response(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(request.headers());
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let mut response = next.run(request).await;

    if response.status().is_success() && !response.headers().contains_key(header::CACHE_CONTROL) {
        let is_html = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("text/html"));
        let policy = if is_html {
            HeaderValue::from_static("no-cache")
        } else {
            state.config.asset_cache_control()
        };
        response.headers_mut().insert(header::CACHE_CONTROL, policy);
    }
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    let status = response.status();
    let level = if path == "/healthz" {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    log_event(
        &state.config,
        level,
        "http_request",
        json!({
            "requestId": request_id,
            "method": method,
            "path": path,
            "status": status.as_u16(),
            "durationMs": started.elapsed().as_millis() as u64,
        }),
    );

    response
}

/// Leading slash, no trailing slash; the site root becomes the empty string.
fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

fn cache_control(value: &str) -> HeaderValue {
    HeaderValue::from_str(value).unwrap_or_else(|_| HeaderValue::from_static("no-store"))
}

fn parse_u64_with_bounds(value: &str, bounds: (u64, u64)) -> Option<u64> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|value| (bounds.0..=bounds.1).contains(value))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_log_level(value: Option<&str>, default: LogLevel) -> LogLevel {
    match value.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
        Some("debug") => LogLevel::Debug,
        Some("info") => LogLevel::Info,
        _ => default,
    }
}

fn now_unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis())
        .unwrap_or(0)
}

fn now_unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_secs())
        .unwrap_or(0)
}

fn generate_request_id() -> String {
    let counter = REQUEST_ID_COUNTER.fetch_add(1, AtomicOrdering::Relaxed);
    format!("req-{}-{counter}", now_unix_millis())
}

fn resolve_request_id(headers: &HeaderMap) -> String {
    let value = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|raw| raw.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string);

    value.unwrap_or_else(generate_request_id)
}

fn log_event(config: &HostConfig, level: LogLevel, event: &str, fields: serde_json::Value) {
    if let Some(line) = event_line(config, level, event, fields) {
        println!("{line}");
    }
}

/// The JSON line for an event, or `None` when it sits below the configured level.
fn event_line(
    config: &HostConfig,
    level: LogLevel,
    event: &str,
    fields: serde_json::Value,
) -> Option<String> {
    if level < config.log_level {
        return None;
    }

    let mut payload = serde_json::Map::new();
    payload.insert(
        "ts".to_string(),
        serde_json::Value::Number(serde_json::Number::from(now_unix_seconds())),
    );
    payload.insert("level".to_string(), serde_json::Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), serde_json::Value::String(event.to_string()));

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    Some(serde_json::Value::Object(payload).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::redirect::Policy;
    use std::net::SocketAddr;

    const INDEX_HTML: &str = "<!doctype html><title>Saran M</title><div id=\"app\"></div>";

    /// A throwaway dist dir, removed when the guard drops.
    struct TestDist(PathBuf);

    impl TestDist {
        fn new() -> Self {
            let dir =
                std::env::temp_dir().join(format!("saran-portfolio-{}", generate_request_id()));
            std::fs::create_dir_all(dir.join("textures")).expect("create dist dir");
            std::fs::write(dir.join("index.html"), INDEX_HTML).expect("write index");
            std::fs::write(dir.join("app.js"), "console.log('hi');").expect("write script");
            std::fs::write(dir.join("textures/earth.png"), [0x89, b'P', b'N', b'G'])
                .expect("write png");
            Self(dir)
        }

        fn path(&self) -> PathBuf {
            self.0.clone()
        }
    }

    impl Drop for TestDist {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    fn test_config(dist_dir: PathBuf) -> HostConfig {
        HostConfig {
            port: 0,
            dist_dir,
            base_path: normalize_base_path(BASE_PATH),
            asset_max_age_seconds: 120,
            log_level: LogLevel::Info,
        }
    }

    async fn spawn_host(config: HostConfig) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let address = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router(config)).await.expect("serve");
        });
        address
    }

    fn client() -> reqwest::Client {
        reqwest::Client::builder()
            .redirect(Policy::none())
            .build()
            .expect("client")
    }

    #[test]
    fn base_path_is_normalized() {
        assert_eq!(normalize_base_path("/saran"), "/saran");
        assert_eq!(normalize_base_path("saran/"), "/saran");
        assert_eq!(normalize_base_path(" / "), "");
        assert_eq!(normalize_base_path("/a/b/"), "/a/b");
    }

    #[test]
    fn bounded_parse_rejects_out_of_range_values() {
        assert_eq!(parse_u64_with_bounds(" 60 ", ASSET_MAX_AGE_SECONDS_BOUNDS), Some(60));
        assert_eq!(parse_u64_with_bounds("0", ASSET_MAX_AGE_SECONDS_BOUNDS), Some(0));
        assert_eq!(parse_u64_with_bounds("99999999999", ASSET_MAX_AGE_SECONDS_BOUNDS), None);
        assert_eq!(parse_u64_with_bounds("soon", ASSET_MAX_AGE_SECONDS_BOUNDS), None);
    }

    #[test]
    fn config_defaults_apply_when_variables_are_unset_or_invalid() {
        let config = HostConfig::from_lookup(|_| None);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.dist_dir, PathBuf::from(DEFAULT_DIST_DIR));
        assert_eq!(config.base_path, "/saran");
        assert_eq!(config.asset_max_age_seconds, DEFAULT_ASSET_MAX_AGE_SECONDS);
        assert_eq!(config.log_level, LogLevel::Info);

        let config = HostConfig::from_lookup(|name| {
            let value = match name {
                "PORT" => "not-a-port",
                "DIST_DIR" => "   ",
                "ASSET_MAX_AGE_SECONDS" => "99999999999",
                "LOG_LEVEL" => "verbose",
                _ => return None,
            };
            Some(value.to_string())
        });
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.dist_dir, PathBuf::from(DEFAULT_DIST_DIR));
        assert_eq!(config.asset_max_age_seconds, DEFAULT_ASSET_MAX_AGE_SECONDS);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn config_reads_overrides() {
        let config = HostConfig::from_lookup(|name| {
            let value = match name {
                "PORT" => " 9000 ",
                "DIST_DIR" => "public",
                "BASE_PATH" => "portfolio/",
                "ASSET_MAX_AGE_SECONDS" => "0",
                "LOG_LEVEL" => "DEBUG",
                _ => return None,
            };
            Some(value.to_string())
        });
        assert_eq!(config.port, 9000);
        assert_eq!(config.dist_dir, PathBuf::from("public"));
        assert_eq!(config.base_path, "/portfolio");
        assert_eq!(config.asset_max_age_seconds, 0);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn log_level_folds_case_and_falls_back() {
        assert_eq!(parse_log_level(Some(" Debug "), LogLevel::Info), LogLevel::Debug);
        assert_eq!(parse_log_level(Some("INFO"), LogLevel::Debug), LogLevel::Info);
        assert_eq!(parse_log_level(Some("trace"), LogLevel::Info), LogLevel::Info);
        assert_eq!(parse_log_level(None, LogLevel::Debug), LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
    }

    #[test]
    fn events_below_the_configured_level_are_dropped() {
        let dist = PathBuf::from("unused");
        let info_config = test_config(dist.clone());
        assert_eq!(
            event_line(&info_config, LogLevel::Debug, "request", json!({})),
            None
        );

        let line = event_line(&info_config, LogLevel::Info, "request", json!({ "status": 200 }))
            .expect("info event is written");
        let parsed: serde_json::Value = serde_json::from_str(&line).expect("json line");
        assert_eq!(parsed["level"], json!("info"));
        assert_eq!(parsed["event"], json!("request"));
        assert_eq!(parsed["status"], json!(200));
        assert!(parsed["ts"].is_u64());

        let debug_config = HostConfig {
            log_level: LogLevel::Debug,
            ..test_config(dist)
        };
        assert!(event_line(&debug_config, LogLevel::Debug, "request", json!({})).is_some());
    }

    #[test]
    fn incoming_request_id_is_reused_when_present() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("  abc-123 "));
        assert_eq!(resolve_request_id(&headers), "abc-123");

        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("   "));
        assert!(resolve_request_id(&headers).starts_with("req-"));
    }

    #[tokio::test]
    async fn healthz_reports_ok_with_request_id() {
        let dist = TestDist::new();
        let address = spawn_host(test_config(dist.path())).await;

        let response = client()
            .get(format!("http://{address}/healthz"))
            .header(REQUEST_ID_HEADER, "probe-1")
            .send()
            .await
            .expect("healthz response");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(
            response.headers().get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok()),
            Some("probe-1")
        );
        assert_eq!(
            response.headers().get("cache-control").and_then(|v| v.to_str().ok()),
            Some("no-store")
        );
        let body: serde_json::Value = response.json().await.expect("json body");
        assert_eq!(body["ok"], json!(true));
        assert_eq!(body["version"], json!(env!("CARGO_PKG_VERSION")));
    }

    #[tokio::test]
    async fn root_redirects_into_base_path() {
        let dist = TestDist::new();
        let address = spawn_host(test_config(dist.path())).await;

        let response = client()
            .get(format!("http://{address}/"))
            .send()
            .await
            .expect("root response");

        assert!(response.status().is_redirection());
        assert_eq!(
            response.headers().get("location").and_then(|v| v.to_str().ok()),
            Some("/saran/")
        );
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn assets_are_cached_and_html_is_not() {
        let dist = TestDist::new();
        let address = spawn_host(test_config(dist.path())).await;
        let client = client();

        let asset = client
            .get(format!("http://{address}/saran/textures/earth.png"))
            .send()
            .await
            .expect("asset response");
        assert_eq!(asset.status(), reqwest::StatusCode::OK);
        assert_eq!(
            asset.headers().get("cache-control").and_then(|v| v.to_str().ok()),
            Some("public, max-age=120")
        );

        let index = client
            .get(format!("http://{address}/saran/"))
            .send()
            .await
            .expect("index response");
        assert_eq!(index.status(), reqwest::StatusCode::OK);
        assert_eq!(
            index.headers().get("cache-control").and_then(|v| v.to_str().ok()),
            Some("no-cache")
        );
        assert_eq!(index.text().await.expect("index body"), INDEX_HTML);
    }

    #[tokio::test]
    async fn unknown_routes_fall_back_to_index() {
        let dist = TestDist::new();
        let address = spawn_host(test_config(dist.path())).await;

        let response = client()
            .get(format!("http://{address}/saran/projects/42"))
            .send()
            .await
            .expect("fallback response");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(response.text().await.expect("fallback body"), INDEX_HTML);
    }

    #[tokio::test]
    async fn paths_outside_base_are_not_found() {
        let dist = TestDist::new();
        let address = spawn_host(test_config(dist.path())).await;

        let response = client()
            .get(format!("http://{address}/elsewhere/app.js"))
            .send()
            .await
            .expect("outside response");

        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    }
}
