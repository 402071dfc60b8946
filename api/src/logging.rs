use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Env;

/// Installs the global subscriber. `RUST_LOG` wins over the defaults; JSON
/// lines are emitted in production, human readable output otherwise.
pub fn init(env: Env) {
    let default_directives = match env {
        Env::Production => "info",
        Env::Dev | Env::Staging => "blog_api=debug,tower_http=debug,info",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    let registry = tracing_subscriber::registry().with(env_filter);

    match env {
        Env::Production => registry
            .with(fmt::layer().json().with_target(true).with_current_span(true))
            .init(),
        Env::Dev | Env::Staging => registry.with(fmt::layer().with_target(true)).init(),
    }

    tracing::info!(?env, "Logging initialized");
}
