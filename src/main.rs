use tasting_watch::config::WatchConfig;
use tasting_watch::jobs::saturday_watch::{run_once, RunOutcome};

// One pass per invocation; the daily trigger lives in cron / the CI scheduler
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    tasting_watch::init_tracing();

    let config = WatchConfig::from_env();

    match run_once(&config).await {
        RunOutcome::Aborted => {
            tracing::warn!("Run aborted before classification");
        }
        RunOutcome::Completed(summary) => {
            tracing::info!(
                "Run complete: {} events, {} dated, {} on Saturday, {} notifications sent ({} skipped, {} failed)",
                summary.total_events,
                summary.dated_events,
                summary.saturday_matches.len(),
                summary.notifications_sent,
                summary.notifications_skipped,
                summary.notifications_failed
            );

            match serde_json::to_string(&summary) {
                Ok(json) => tracing::debug!("Run summary: {}", json),
                Err(e) => tracing::warn!("Failed to serialize run summary: {}", e),
            }
        }
    }
}
