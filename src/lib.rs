// src/lib.rs

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod config;
pub mod jobs;
pub mod scrapers;

pub mod services {
    pub mod ntfy;
    pub mod title_date;
}

/// Install the fmt subscriber, honouring `RUST_LOG` when set.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tasting_watch=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
