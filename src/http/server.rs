//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router (search, health, admin)
//! - Wire up middleware (request ID, tracing, timeout)
//! - Resolve queries against the live table and redirect
//! - Recompile the table whenever a new config arrives

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::admin::setup_admin_router;
use crate::bangs::{load_catalogs, VendorCatalogs};
use crate::compiler::{compile, CompiledTable};
use crate::config::schema::RedirectStatus;
use crate::config::RouterConfig;
use crate::http::request::{
    make_request_span, propagate_request_id_layer, request_id, set_request_id_layer,
};
use crate::observability::metrics;
use crate::resolver::resolve_detailed;
use crate::store::{FileStore, MemoryStore, StoreResult, TableStore};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TableStore>,
    pub config: Arc<ArcSwap<RouterConfig>>,
}

impl AppState {
    pub fn new(config: RouterConfig, store: Arc<dyn TableStore>) -> Self {
        Self {
            store,
            config: Arc::new(ArcSwap::from_pointee(config)),
        }
    }
}

/// Applies config updates: recompiles the `[search]` document and swaps the
/// result into the store.
pub struct TableUpdater {
    state: AppState,
    catalogs: VendorCatalogs,
}

impl TableUpdater {
    pub fn new(state: AppState, catalogs: VendorCatalogs) -> Self {
        Self { state, catalogs }
    }

    /// Compile the current config into the store.
    pub fn rebuild(&self) -> StoreResult<()> {
        let config = self.state.config.load();
        let table = compile(&config.search, &self.catalogs);
        let entries = table.len();

        self.state.store.replace(table)?;
        metrics::record_compile();
        tracing::info!(entries, "Compiled table installed");
        Ok(())
    }

    /// Compile `config` and install it together with the resulting table.
    ///
    /// The live config and catalogs only change once the store accepted the
    /// new table; on error the previous config keeps serving with the
    /// previous table.
    pub async fn apply(&mut self, config: RouterConfig) -> StoreResult<()> {
        let previous = self.state.config.load_full();

        let catalogs = (previous.catalog != config.catalog).then(|| load_catalogs(&config.catalog));
        let table = compile(&config.search, catalogs.as_ref().unwrap_or(&self.catalogs));
        let entries = table.len();
        self.install(table).await?;

        if let Some(catalogs) = catalogs {
            self.catalogs = catalogs;
        }
        if previous.listener != config.listener || previous.http.request_timeout_secs != config.http.request_timeout_secs {
            tracing::warn!("Listener and timeout changes take effect after restart");
        }
        self.state.config.store(Arc::new(config));

        metrics::record_compile();
        tracing::info!(entries, "Compiled table installed");
        Ok(())
    }

    /// Replace the stored table on the blocking pool.
    async fn install(&self, table: CompiledTable) -> StoreResult<()> {
        let store = Arc::clone(&self.state.store);
        tokio::task::spawn_blocking(move || store.replace(table)).await?
    }
}

/// HTTP server for the bang router.
pub struct HttpServer {
    router: Router,
    updater: TableUpdater,
}

impl HttpServer {
    /// Create a server backed by the store named in `config.store`
    /// (in-memory when unset), with the table compiled from `config`.
    pub fn new(config: RouterConfig) -> StoreResult<Self> {
        let store: Arc<dyn TableStore> = match &config.store.path {
            Some(path) => Arc::new(FileStore::open(path)?),
            None => Arc::new(MemoryStore::default()),
        };
        Self::with_store(config, store)
    }

    pub fn with_store(config: RouterConfig, store: Arc<dyn TableStore>) -> StoreResult<Self> {
        let catalogs = load_catalogs(&config.catalog);
        let timeout = Duration::from_secs(config.http.request_timeout_secs);

        let state = AppState::new(config, store);
        let updater = TableUpdater::new(state.clone(), catalogs);
        updater.rebuild()?;

        let router = Self::build_router(state, timeout);
        Ok(Self { router, updater })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState, timeout: Duration) -> Router {
        Router::new()
            .route("/", get(search_handler))
            .route("/search", get(search_handler))
            .route("/health", get(health_handler))
            .merge(setup_admin_router(state.clone()))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                    .layer(propagate_request_id_layer())
                    .layer(TimeoutLayer::new(timeout)),
            )
    }

    /// The router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// State shared by the handlers and the updater.
    pub fn state(&self) -> &AppState {
        &self.updater.state
    }

    /// Serve on `listener` until `shutdown` fires, applying every config
    /// received on `config_updates`.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<RouterConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let mut updater = self.updater;
        let mut update_shutdown = shutdown.resubscribe();
        let update_task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    update = config_updates.recv() => match update {
                        Some(config) => {
                            if let Err(e) = updater.apply(config).await {
                                tracing::error!(error = %e, "Failed to install recompiled table, keeping current config");
                            }
                        }
                        None => break,
                    },
                    _ = update_shutdown.recv() => break,
                }
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        update_task.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

impl From<RedirectStatus> for StatusCode {
    fn from(status: RedirectStatus) -> Self {
        match status {
            RedirectStatus::Found => StatusCode::FOUND,
            RedirectStatus::SeeOther => StatusCode::SEE_OTHER,
            RedirectStatus::Temporary => StatusCode::TEMPORARY_REDIRECT,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    q: Option<String>,
}

/// Resolve `q` and redirect to the destination.
async fn search_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> Response {
    let request_id = request_id(&headers);

    let Some(query) = params.q.filter(|q| !q.trim().is_empty()) else {
        return (StatusCode::BAD_REQUEST, "Missing search query").into_response();
    };

    let table = state.store.load();
    let resolution = resolve_detailed(&query, &table);
    metrics::record_resolution(resolution.outcome);

    tracing::debug!(
        request_id = %request_id,
        outcome = resolution.outcome.as_str(),
        bang = ?resolution.bang,
        "Query resolved"
    );

    let Some(location) = location_header(&resolution.url) else {
        tracing::error!(request_id = %request_id, url = %resolution.url, "Destination is not a valid Location");
        return (StatusCode::INTERNAL_SERVER_ERROR, "Invalid destination URL").into_response();
    };

    let status = StatusCode::from(state.config.load().http.redirect_status);
    (status, [(header::LOCATION, location)]).into_response()
}

async fn health_handler() -> &'static str {
    "ok"
}

/// Header value for `url`. Anything but a plain ASCII header value is
/// normalized through `url::Url` first, which percent-encodes non-ASCII.
fn location_header(url: &str) -> Option<HeaderValue> {
    if url.is_ascii() {
        if let Ok(value) = HeaderValue::from_str(url) {
            return Some(value);
        }
    }

    let normalized = url::Url::parse(url).ok()?;
    HeaderValue::from_str(normalized.as_str()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::config::validation::normalize_search;
    use crate::config::BangOverride;
    use crate::store::StoreError;

    fn config_with_override(bang: &str, url: &str) -> RouterConfig {
        let mut config = RouterConfig::default();
        config.search.use_vendor_bangs = false;
        config.search.bang_overrides.push(BangOverride::new(bang, url));
        normalize_search(&mut config.search);
        config
    }

    /// Memory store whose writes can be made to fail.
    #[derive(Default)]
    struct BrokenDiskStore {
        memory: MemoryStore,
        failing: AtomicBool,
    }

    impl TableStore for BrokenDiskStore {
        fn load(&self) -> Arc<CompiledTable> {
            self.memory.load()
        }

        fn replace(&self, table: CompiledTable) -> StoreResult<()> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(StoreError::Io(std::io::Error::other("disk full")));
            }
            self.memory.replace(table)
        }
    }

    #[test]
    fn test_location_header_passes_ascii_through() {
        let value = location_header("https://example.com/?q=a+b").unwrap();
        assert_eq!(value, "https://example.com/?q=a+b");
    }

    #[test]
    fn test_location_header_normalizes_non_ascii() {
        let value = location_header("https://example.com/wiki/café").unwrap();
        assert_eq!(value, "https://example.com/wiki/caf%C3%A9");

        let value = location_header("https://example.com/?q=naïve résumé").unwrap();
        assert!(value.to_str().unwrap().is_ascii());
        assert!(value.to_str().unwrap().contains("na%C3%AFve"));
    }

    #[test]
    fn test_location_header_rejects_garbage() {
        assert!(location_header("not a url\u{7f}é").is_none());
    }

    #[test]
    fn test_redirect_status_codes() {
        assert_eq!(StatusCode::from(RedirectStatus::Found), StatusCode::FOUND);
        assert_eq!(StatusCode::from(RedirectStatus::SeeOther), StatusCode::SEE_OTHER);
        assert_eq!(
            StatusCode::from(RedirectStatus::Temporary),
            StatusCode::TEMPORARY_REDIRECT
        );
    }

    #[tokio::test]
    async fn test_raw_override_location_is_percent_encoded() {
        let mut config = config_with_override("raw", "https://raw.example/{query}");
        config.search.bang_overrides[0].url_encode_placeholder = false;
        config.search.bang_overrides[0].url_encode_space_to_plus = false;
        let server = HttpServer::with_store(config, Arc::new(MemoryStore::default())).unwrap();

        let request = Request::builder()
            .uri("/search?q=!raw%20caf%C3%A9")
            .body(Body::empty())
            .unwrap();
        let response = server.router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "https://raw.example/caf%C3%A9"
        );
    }

    #[tokio::test]
    async fn test_updater_recompiles_on_apply() {
        let store = Arc::new(MemoryStore::default());
        let state = AppState::new(config_with_override("x", "https://x.example/{query}"), store.clone());
        let mut updater = TableUpdater::new(state, VendorCatalogs::new());
        updater.rebuild().unwrap();
        assert!(store.load().get("_b_x").is_some());

        updater
            .apply(config_with_override("y", "https://y.example/{query}"))
            .await
            .unwrap();
        let table = store.load();
        assert!(table.get("_b_x").is_none());
        assert_eq!(table.get("_b_y"), Some("3https://y.example/{query}"));
    }

    #[tokio::test]
    async fn test_failed_apply_keeps_previous_config() {
        let store = Arc::new(BrokenDiskStore::default());
        let mut server = HttpServer::with_store(
            config_with_override("x", "https://x.example/{query}"),
            store.clone(),
        )
        .unwrap();
        store.failing.store(true, Ordering::SeqCst);

        let mut next = config_with_override("y", "https://y.example/{query}");
        next.http.redirect_status = RedirectStatus::Found;
        assert!(server.updater.apply(next).await.is_err());

        let config = server.state().config.load();
        assert_eq!(config.http.redirect_status, RedirectStatus::SeeOther);
        assert_eq!(config.search.bang_overrides[0].bang, "x");

        let table = server.state().store.load();
        assert_eq!(table.get("_b_x"), Some("3https://x.example/{query}"));
        assert!(table.get("_b_y").is_none());
    }
}
