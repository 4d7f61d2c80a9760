use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

use super::TastingEvent;

/// Price recorded for a card that has no price element.
pub const PRICE_NOT_AVAILABLE: &str = "N/A";

lazy_static! {
    static ref CARD_SELECTOR: Selector =
        Selector::parse("#js-product-list .product-miniature").unwrap();
    static ref TITLE_LINK_SELECTOR: Selector =
        Selector::parse(".product-description h2 a").unwrap();
    static ref PRICE_SELECTOR: Selector = Selector::parse(".price").unwrap();
}

/// Extract tasting events from the listing page, in document order.
///
/// Cards without a title link are skipped. Cards without a price get
/// [`PRICE_NOT_AVAILABLE`].
pub fn extract_events_from_html(html: &str) -> Vec<TastingEvent> {
    let document = Html::parse_document(html);
    let mut events = Vec::new();

    for (index, card) in document.select(&CARD_SELECTOR).enumerate() {
        let Some(anchor) = card.select(&TITLE_LINK_SELECTOR).next() else {
            tracing::debug!("Product card {} has no title link, skipping", index + 1);
            continue;
        };

        let price = card
            .select(&PRICE_SELECTOR)
            .next()
            .map(element_text)
            .unwrap_or_else(|| PRICE_NOT_AVAILABLE.to_string());

        events.push(TastingEvent {
            title: element_text(anchor),
            price,
            link: anchor.value().attr("href").unwrap_or_default().to_string(),
        });
    }

    events
}

/// Text nodes concatenated as-is, then whitespace runs (including nbsp)
/// collapsed and trimmed
fn element_text(element: ElementRef<'_>) -> String {
    let text: String = element.text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
