pub mod shutdown;

use crate::config::Config;
use crate::metrics::Exporter;
use crate::redis::Store;
use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

struct ServerState<S> {
    exporter: Exporter<S>,
    endpoint: String,
}

/// HTTP front end serving the exporter's metrics.
pub struct Server<S> {
    state: Arc<ServerState<S>>,
    addr: String,
}

impl<S: Store + 'static> Server<S> {
    pub fn new(exporter: Exporter<S>, config: &Config) -> Self {
        Self {
            state: Arc::new(ServerState {
                exporter,
                endpoint: config.metrics.endpoint.clone(),
            }),
            addr: format!("{}:{}", config.server.host, config.server.port),
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(landing_page::<S>))
            .route(&self.state.endpoint, get(metrics_handler::<S>))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Bind and serve until SIGINT/SIGTERM.
    pub async fn serve(self) -> Result<()> {
        let listener = TcpListener::bind(&self.addr)
            .await
            .with_context(|| format!("Failed to bind {}", self.addr))?;

        info!("exporter listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown::shutdown_signal())
            .await?;

        info!("exporter stopped");
        Ok(())
    }
}

async fn metrics_handler<S: Store + 'static>(
    State(state): State<Arc<ServerState<S>>>,
) -> Response {
    match state.exporter.render().await {
        Ok(body) => ([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body).into_response(),
        Err(e) => {
            error!(error = %e, "error encoding metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn landing_page<S: Store + 'static>(
    State(state): State<Arc<ServerState<S>>>,
) -> Html<String> {
    Html(format!(
        r#"<html>
<head><title>Redis Exporter</title></head>
<body>
<h1>Redis Exporter</h1>
<p>Version {}</p>
<p><a href="{}">Metrics</a></p>
</body>
</html>
"#,
        crate::VERSION,
        state.endpoint
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::testing::FakeStore;
    use crate::metrics::RedisCollector;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn server(store: FakeStore, config: &Config) -> Server<FakeStore> {
        let collector = RedisCollector::new(store, &config.metrics.namespace).unwrap();
        Server::new(Exporter::new(collector).unwrap(), config)
    }

    async fn fetch(router: Router, uri: &str) -> (StatusCode, String, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response.into_body().collect().await.unwrap().to_bytes();

        (status, content_type, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let store = FakeStore::new()
            .with_info("redis_version:7.2.4\r\nrole:master\r\n")
            .with_keys(3);
        let server = server(store, &Config::default());

        let (status, content_type, body) = fetch(server.router(), "/metrics").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, prometheus::TEXT_FORMAT);
        assert!(body.contains("redis_keys 3"));
        assert!(body.contains(r#"version="7.2.4""#));
    }

    #[tokio::test]
    async fn test_store_down_still_answers_ok() {
        let server = server(FakeStore::new(), &Config::default());

        let (status, _, body) = fetch(server.router(), "/metrics").await;

        assert_eq!(status, StatusCode::OK);
        assert!(!body.contains("redis_keys"));
    }

    #[tokio::test]
    async fn test_custom_endpoint() {
        let mut config = Config::default();
        config.metrics.endpoint = "/probe".to_string();
        let server = server(FakeStore::new().with_keys(1), &config);

        let (status, _, body) = fetch(server.router(), "/probe").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("redis_keys 1"));

        let (status, _, _) = fetch(server.router(), "/metrics").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_landing_page_links_metrics() {
        let server = server(FakeStore::new(), &Config::default());

        let (status, _, body) = fetch(server.router(), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"<a href="/metrics">"#));
    }

    #[tokio::test]
    async fn test_landing_page_does_not_query_store() {
        let server = server(FakeStore::new(), &Config::default());

        fetch(server.router(), "/").await;
        assert_eq!(server.state.exporter.collector().store().info_calls(), 0);
    }
}
