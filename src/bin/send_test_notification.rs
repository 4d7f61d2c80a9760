// src/bin/send_test_notification.rs
//
// Sends a single test push to the configured ntfy topic.
// Usage: cargo run --bin send_test_notification

use tasting_watch::config::WatchConfig;
use tasting_watch::services::ntfy::{dispatch, Delivery, Notification, NtfyNotifier, Priority};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    tasting_watch::init_tracing();

    let config = WatchConfig::from_env();

    let notifier = match NtfyNotifier::new(config.ntfy_base_url.clone(), config.notify_timeout) {
        Ok(notifier) => notifier,
        Err(e) => {
            tracing::error!("Failed to create ntfy notifier: {}", e);
            return;
        }
    };

    tracing::info!(
        "Sending test notification to topic '{}'",
        config.notification_topic
    );

    let notification = Notification {
        title: "Teste do Scrapper de Vinhos 🍷".to_string(),
        message: "Esta é uma mensagem de teste para confirmar que as notificações estão funcionando corretamente.".to_string(),
        click_url: Some("https://cavenacional.com.br/".to_string()),
        priority: Priority::High,
        tags: "tada".to_string(),
    };

    match dispatch(&notifier, &config.notification_topic, &notification).await {
        Some(Delivery::Sent) => tracing::info!("Test done, check your phone for the notification"),
        Some(Delivery::Skipped) => tracing::warn!("Nothing sent: NTFY_TOPIC is empty"),
        None => tracing::warn!("Test notification could not be delivered"),
    }
}
