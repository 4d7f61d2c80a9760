use chrono::{Datelike, Local, Weekday};
use serde::Serialize;

use crate::config::WatchConfig;
use crate::scrapers::cave_nacional::TastingScraper;
use crate::scrapers::{FetchError, TastingEvent};
use crate::services::ntfy::{
    dispatch, Delivery, DisabledNotifier, Notification, Notifier, NotifyError, NtfyNotifier,
    Priority,
};
use crate::services::title_date::{parse_leading_date_in_year, weekday_label};

pub const NO_RESULTS_TITLE: &str = "🍷 Nenhuma degustação de sábado";
pub const NO_RESULTS_MESSAGE: &str = "O scraper rodou, mas não encontrou novos eventos para sábado.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total_events: usize,
    pub dated_events: usize,
    pub saturday_matches: Vec<TastingEvent>,
    pub notifications_sent: usize,
    pub notifications_skipped: usize,
    pub notifications_failed: usize,
    pub no_results_notified: bool,
}

impl RunSummary {
    fn record(&mut self, delivery: Option<Delivery>) {
        match delivery {
            Some(Delivery::Sent) => self.notifications_sent += 1,
            Some(Delivery::Skipped) => self.notifications_skipped += 1,
            None => self.notifications_failed += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The listing could not be fetched; nothing was classified or sent
    Aborted,
    Completed(RunSummary),
}

/// Decides which tasting events are worth a push notification.
pub struct SaturdayWatch<'a> {
    notifier: &'a dyn Notifier,
    topic: String,
    notify_on_empty: bool,
    year: i32,
}

impl<'a> SaturdayWatch<'a> {
    pub fn new(config: &WatchConfig, notifier: &'a dyn Notifier) -> Self {
        Self {
            notifier,
            topic: config.notification_topic.clone(),
            notify_on_empty: config.notify_on_empty,
            year: Local::now().year(),
        }
    }

    /// Resolve title dates against `year` instead of the current one.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub async fn classify_and_notify(
        &self,
        records: Result<Vec<TastingEvent>, FetchError>,
    ) -> RunOutcome {
        let events = match records {
            Ok(events) => events,
            Err(e) => {
                tracing::error!("Could not fetch the tasting events list, aborting run: {}", e);
                return RunOutcome::Aborted;
            }
        };

        tracing::info!("Found {} tasting events", events.len());

        let mut summary = RunSummary {
            total_events: events.len(),
            ..Default::default()
        };

        for (i, event) in events.iter().enumerate() {
            let position = i + 1;

            let Some(date) = parse_leading_date_in_year(&event.title, self.year) else {
                tracing::debug!(
                    "{}. {} - {} (Data não identificada)",
                    position,
                    event.title,
                    event.price
                );
                continue;
            };

            summary.dated_events += 1;
            let weekday = date.weekday();
            tracing::debug!(
                "{}. {} - {} ({})",
                position,
                event.title,
                event.price,
                weekday_label(weekday)
            );

            if weekday == Weekday::Sat {
                tracing::info!("Found a Saturday tasting: '{}'", event.title);

                let delivery = dispatch(self.notifier, &self.topic, &saturday_notification(event)).await;
                summary.record(delivery);
                summary.saturday_matches.push(event.clone());
            }
        }

        if summary.saturday_matches.is_empty() {
            tracing::info!("No tastings found on upcoming Saturdays");

            if self.notify_on_empty {
                tracing::info!("Sending 'no results' notification as configured");

                let delivery = dispatch(self.notifier, &self.topic, &no_results_notification()).await;
                summary.record(delivery);
                summary.no_results_notified = delivery == Some(Delivery::Sent);
            }
        }

        RunOutcome::Completed(summary)
    }
}

pub fn saturday_notification(event: &TastingEvent) -> Notification {
    Notification {
        title: format!("🍷 {}", event.title),
        message: format!("Preço: {}", event.price),
        click_url: Some(event.link.clone()),
        priority: Priority::High,
        tags: "tada".to_string(),
    }
}

pub fn no_results_notification() -> Notification {
    Notification {
        title: NO_RESULTS_TITLE.to_string(),
        message: NO_RESULTS_MESSAGE.to_string(),
        click_url: None,
        priority: Priority::Default,
        tags: "information_source".to_string(),
    }
}

/// One full pass: fetch the listing, classify, notify.
pub async fn run_once(config: &WatchConfig) -> RunOutcome {
    let notifier = NtfyNotifier::new(config.ntfy_base_url.clone(), config.notify_timeout);
    run_with_notifier(config, notifier).await
}

/// Same as [`run_once`] with the notifier supplied by the caller. A notifier
/// that failed to build only disables notifications for this run.
pub async fn run_with_notifier<N: Notifier>(
    config: &WatchConfig,
    notifier: Result<N, NotifyError>,
) -> RunOutcome {
    tracing::info!("Starting tasting events scraping run");

    let notifier: &dyn Notifier = match &notifier {
        Ok(notifier) => notifier,
        Err(e) => {
            tracing::error!("Failed to create notifier, continuing without notifications: {}", e);
            &DisabledNotifier
        }
    };

    let records = match TastingScraper::new(config.scraper_config()) {
        Ok(scraper) => scraper.fetch_events(&config.target_url).await,
        Err(e) => Err(e),
    };

    SaturdayWatch::new(config, notifier)
        .classify_and_notify(records)
        .await
}
