use std::net::SocketAddr;
use std::str::FromStr;

use tracing_subscriber::EnvFilter;

use er_finder::cache::{CacheConfig, CachedFeedSource};
use er_finder::feed::{FeedBackend, FeedClient, FeedConfig, FixtureFeeds};
use er_finder::hospital::DepartmentRules;
use er_finder::ranking::RankingConfig;
use er_finder::web::{AppState, create_router};

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "er_finder=info,tower_http=info";

/// Listen address used when `ER_BIND` is unset.
const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Read and parse an optional environment variable.
///
/// Unparsable values are reported and ignored.
fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(var = name, value = %raw, "ignoring unparsable environment variable");
            None
        }
    }
}

/// Pick the feed backend: recorded fixtures if configured, else the live API.
fn feed_backend() -> FeedBackend {
    if let Ok(dir) = std::env::var("ER_FIXTURE_DIR") {
        let fixtures = FixtureFeeds::load(&dir).expect("Failed to load fixture feeds");
        tracing::info!(%dir, "serving recorded feeds");
        return FeedBackend::Fixture(fixtures);
    }

    let service_key = std::env::var("ER_SERVICE_KEY").unwrap_or_else(|_| {
        tracing::warn!("ER_SERVICE_KEY not set. API calls will fail.");
        String::new()
    });

    let mut config = FeedConfig::new(service_key);
    if let Ok(base_url) = std::env::var("ER_BASE_URL") {
        config = config.with_base_url(base_url);
    }
    if let Some(rows) = env_parse("ER_NUM_OF_ROWS") {
        config = config.with_num_of_rows(rows);
    }
    if let Some(secs) = env_parse("ER_TIMEOUT_SECS") {
        config = config.with_timeout(secs);
    }

    tracing::info!(
        base_url = %config.base_url,
        rows = config.num_of_rows,
        "using live feeds"
    );
    FeedBackend::Live(FeedClient::new(config).expect("Failed to create feed client"))
}

/// Ranking configuration, with department rules from `ER_DEPARTMENT_RULES` if set.
fn ranking_config() -> RankingConfig {
    let config = RankingConfig::default();
    match std::env::var("ER_DEPARTMENT_RULES") {
        Ok(path) => {
            let rules =
                DepartmentRules::from_json_file(&path).expect("Failed to load department rules");
            tracing::info!(%path, rules = rules.rules.len(), "loaded department rules");
            config.with_departments(rules)
        }
        Err(_) => config,
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let feeds = CachedFeedSource::new(feed_backend(), &CacheConfig::default());
    let state = AppState::new(feeds, ranking_config());
    let app = create_router(state);

    let addr: SocketAddr = std::env::var("ER_BIND")
        .unwrap_or_else(|_| DEFAULT_BIND.to_string())
        .parse()
        .expect("ER_BIND must be a socket address");

    tracing::info!("Emergency room finder listening on http://{addr}");
    tracing::info!("  GET /health                    - Health check");
    tracing::info!("  GET /hospitals?lat=..&lon=..   - Ranked emergency rooms");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}
