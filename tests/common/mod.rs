#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Weekday};
use std::sync::Mutex;

use tasting_watch::scrapers::TastingEvent;
use tasting_watch::services::ntfy::{Delivery, Notification, Notifier, NotifyError};

/// Records every notification instead of sending it.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, Notification)>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<(String, Notification)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(
        &self,
        topic: &str,
        notification: &Notification,
    ) -> Result<Delivery, NotifyError> {
        if topic.trim().is_empty() {
            return Ok(Delivery::Skipped);
        }
        self.sent
            .lock()
            .unwrap()
            .push((topic.to_string(), notification.clone()));
        Ok(Delivery::Sent)
    }
}

/// Fails every delivery with an invalid-header error, counting attempts.
#[derive(Default)]
pub struct FailingNotifier {
    attempts: Mutex<usize>,
}

impl FailingNotifier {
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl Notifier for FailingNotifier {
    async fn notify(
        &self,
        _topic: &str,
        _notification: &Notification,
    ) -> Result<Delivery, NotifyError> {
        *self.attempts.lock().unwrap() += 1;
        let source = reqwest::header::HeaderValue::from_bytes(b"\n").unwrap_err();
        Err(NotifyError::InvalidHeader {
            header: "Title",
            source,
        })
    }
}

pub fn event(title: &str) -> TastingEvent {
    TastingEvent {
        title: title.to_string(),
        price: "R$ 150,00".to_string(),
        link: format!("https://cavenacional.com.br/{}", title.len()),
    }
}

/// First `n` dates of `year` that fall on `weekday`, formatted as "DD-MM".
pub fn dates_on(year: i32, weekday: Weekday, n: usize) -> Vec<String> {
    let mut date = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
    let mut out = Vec::new();
    while out.len() < n {
        if date.weekday() == weekday {
            out.push(date.format("%d-%m").to_string());
        }
        date = date.succ_opt().unwrap();
    }
    out
}

pub fn listing_html(cards: &[(&str, &str, Option<&str>)]) -> String {
    let cards: String = cards
        .iter()
        .map(|(title, href, price)| {
            let price = price
                .map(|p| format!(r#"<span class="price">{}</span>"#, p))
                .unwrap_or_default();
            format!(
                r#"<article class="product-miniature js-product-miniature">
                     <div class="thumbnail-container">
                       <div class="product-description">
                         <h2 class="h3 product-title"><a href="{}">{}</a></h2>
                         <div class="product-price-and-shipping">{}</div>
                       </div>
                     </div>
                   </article>"#,
                href, title, price
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html><html><head><title>Degustações</title></head>
           <body><section id="products"><div id="js-product-list"><div class="products row">{}</div></div></section></body></html>"#,
        cards
    )
}
