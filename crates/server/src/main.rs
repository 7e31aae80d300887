use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use deck_core::Deck;
use tracing::{info, warn};

mod config;

use config::{load_settings, prepare_deck_dir};

#[derive(Clone)]
struct AppState {
    deck_root: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let deck_root = prepare_deck_dir(&settings.deck_dir)?;

    let deck = Deck::discover(&deck_root)?;
    if deck.is_empty() {
        warn!(path = %deck_root.display(), "no slides found in deck directory");
    } else {
        info!(slides = deck.len(), path = %deck_root.display(), "deck ready");
    }

    let state = Arc::new(AppState { deck_root });
    let app = build_router(state);

    let addr: SocketAddr = settings.bind_addr.parse()?;
    info!(%addr, "deck server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/", get(serve_index))
        .fallback(serve_asset)
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn serve_index(State(state): State<Arc<AppState>>) -> Response {
    file_response(&state.deck_root.join("index.html"), StatusCode::OK)
        .await
        .unwrap_or_else(|| missing_index(&state.deck_root))
}

/// Catch-all static handler: present files are served as-is, anything else
/// falls back to the index document with a 404 status.
async fn serve_asset(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    if let Some(path) = resolve_request_path(&state.deck_root, uri.path()) {
        if let Some(response) = file_response(&path, StatusCode::OK).await {
            return response;
        }
    }
    index_fallback(&state).await
}

async fn index_fallback(state: &AppState) -> Response {
    file_response(&state.deck_root.join("index.html"), StatusCode::NOT_FOUND)
        .await
        .unwrap_or_else(|| missing_index(&state.deck_root))
}

fn missing_index(deck_root: &Path) -> Response {
    warn!(path = %deck_root.display(), "deck has no index.html");
    (StatusCode::NOT_FOUND, "not found").into_response()
}

async fn file_response(path: &Path, status: StatusCode) -> Option<Response> {
    let bytes = tokio::fs::read(path).await.ok()?;
    let content_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string();
    Some((status, [(header::CONTENT_TYPE, content_type)], bytes).into_response())
}

/// Maps a request path onto the deck directory. Segments are
/// percent-decoded before joining; empty and `.` segments are dropped, and a
/// `..`, slash, or backslash segment (encoded or not) makes the whole path
/// unmatched rather than escaping the deck root.
fn resolve_request_path(deck_root: &Path, request_path: &str) -> Option<PathBuf> {
    let trimmed = request_path.trim_start_matches('/');
    if trimmed.is_empty() {
        return Some(deck_root.join("index.html"));
    }

    let mut path = deck_root.to_path_buf();
    for segment in trimmed.split('/') {
        let decoded = urlencoding::decode(segment).ok()?;
        if decoded.is_empty() || decoded == "." {
            continue;
        }
        if decoded == ".." || decoded.contains('/') || decoded.contains('\\') {
            return None;
        }
        path.push(decoded.as_ref());
    }
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use std::{
        env, fs,
        time::{SystemTime, UNIX_EPOCH},
    };
    use tower::ServiceExt;

    fn test_deck() -> PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let dir = env::temp_dir().join(format!("deck_server_test_{suffix}"));
        fs::create_dir_all(dir.join("common/css")).expect("deck dirs");
        fs::write(
            dir.join("index.html"),
            "<html><title>Course Home</title><body>course index</body></html>",
        )
        .expect("index");
        fs::write(
            dir.join("slide-01.html"),
            "<html><title>Slide One</title><body class=\"slide\">one</body></html>",
        )
        .expect("slide");
        fs::write(dir.join("common/css/style.css"), "body { margin: 0; }").expect("css");
        dir
    }

    fn test_app(deck_root: PathBuf) -> Router {
        build_router(Arc::new(AppState { deck_root }))
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        String::from_utf8(bytes.to_vec()).expect("utf8 body")
    }

    #[tokio::test]
    async fn root_serves_the_index_document() {
        let dir = test_deck();
        let app = test_app(dir.clone());

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html"
        );
        assert!(body_text(response).await.contains("course index"));

        fs::remove_dir_all(dir).expect("cleanup");
    }

    #[tokio::test]
    async fn present_files_are_served_with_their_content_type() {
        let dir = test_deck();
        let app = test_app(dir.clone());

        let response = app
            .clone()
            .oneshot(
                Request::get("/slide-01.html")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html");

        let response = app
            .oneshot(
                Request::get("/common/css/style.css")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");

        fs::remove_dir_all(dir).expect("cleanup");
    }

    #[tokio::test]
    async fn unmatched_paths_fall_back_to_the_index_with_404() {
        let dir = test_deck();
        let app = test_app(dir.clone());

        let response = app
            .oneshot(
                Request::get("/week-99/missing.html")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("course index"));

        fs::remove_dir_all(dir).expect("cleanup");
    }

    #[tokio::test]
    async fn traversal_attempts_are_treated_as_unmatched() {
        let dir = test_deck();
        let secret = dir.parent().expect("parent").join("deck_server_secret.txt");
        fs::write(&secret, "secret").expect("secret");
        let app = test_app(dir.clone());

        let response = app
            .oneshot(
                Request::get("/../deck_server_secret.txt")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("course index"));

        fs::remove_file(secret).expect("cleanup secret");
        fs::remove_dir_all(dir).expect("cleanup");
    }

    #[tokio::test]
    async fn percent_encoded_paths_are_decoded_before_lookup() {
        let dir = test_deck();
        let app = test_app(dir.clone());

        let response = app
            .oneshot(
                Request::get("/slide%2D01.html")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html");

        fs::remove_dir_all(dir).expect("cleanup");
    }

    #[tokio::test]
    async fn non_get_requests_to_unmatched_paths_get_the_index_fallback() {
        let dir = test_deck();
        let app = test_app(dir.clone());

        let response = app
            .oneshot(
                Request::post("/week-99/missing.html")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("course index"));

        fs::remove_dir_all(dir).expect("cleanup");
    }

    #[tokio::test]
    async fn healthz_answers_ok() {
        let dir = test_deck();
        let app = test_app(dir.clone());

        let response = app
            .oneshot(Request::get("/healthz").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        fs::remove_dir_all(dir).expect("cleanup");
    }

    #[test]
    fn resolve_rejects_parent_and_backslash_segments() {
        let root = Path::new("/srv/deck");
        assert_eq!(resolve_request_path(root, "/../etc/passwd"), None);
        assert_eq!(resolve_request_path(root, "/a/..\\b"), None);
        assert_eq!(
            resolve_request_path(root, "/week-1/slide-01.html"),
            Some(PathBuf::from("/srv/deck/week-1/slide-01.html"))
        );
        assert_eq!(
            resolve_request_path(root, "/"),
            Some(PathBuf::from("/srv/deck/index.html"))
        );
    }

    #[test]
    fn resolve_decodes_segments_and_rejects_encoded_traversal() {
        let root = Path::new("/srv/deck");
        assert_eq!(
            resolve_request_path(root, "/slide%2D01.html"),
            Some(PathBuf::from("/srv/deck/slide-01.html"))
        );
        assert_eq!(
            resolve_request_path(root, "/week%201/notes.html"),
            Some(PathBuf::from("/srv/deck/week 1/notes.html"))
        );
        assert_eq!(resolve_request_path(root, "/%2E%2E/etc/passwd"), None);
        assert_eq!(resolve_request_path(root, "/a%2F..%2Fb"), None);
        assert_eq!(resolve_request_path(root, "/a%5Cb"), None);
    }
}
