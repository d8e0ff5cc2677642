use std::collections::BTreeSet;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use reqwest::blocking::Client;
use scraper::{Html, Selector};
use url::Url;

use crate::fetcher;

const PAGE_PAUSE: Duration = Duration::from_millis(600);

/// Walk a category's listing pages and return every distinct product URL,
/// sorted. A failed listing-page fetch aborts the crawl for this category.
pub fn find_product_links(client: &Client, base: &Url, category_url: &str) -> Result<Vec<String>> {
    let mut seen = BTreeSet::new();
    let mut next = Some(category_url.to_string());

    while let Some(url) = next {
        let html = fetcher::fetch_html(client, &url)?;
        let doc = Html::parse_document(&html);

        collect_product_links(&doc, base, &mut seen);
        next = next_page_url(&doc, base);
        thread::sleep(PAGE_PAUSE); // be polite
    }

    Ok(seen.into_iter().collect())
}

// WooCommerce grid anchors first, then any anchor into /producto/ as a
// catch-all for themes without the standard loop classes.
fn collect_product_links(doc: &Html, base: &Url, seen: &mut BTreeSet<String>) {
    let grid = Selector::parse("ul.products li.product a.woocommerce-LoopProduct-link").unwrap();
    let generic = Selector::parse(r#"a[href*="/producto/"]"#).unwrap();

    for anchor in doc.select(&grid).chain(doc.select(&generic)) {
        if let Some(href) = anchor.value().attr("href") {
            if let Ok(resolved) = base.join(href) {
                seen.insert(resolved.to_string());
            }
        }
    }
}

fn next_page_url(doc: &Html, base: &Url) -> Option<String> {
    let next = Selector::parse(r#"a.next, a[rel="next"]"#).unwrap();
    doc.select(&next)
        .next()
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| base.join(href).ok())
        .map(|u| u.to_string())
}
