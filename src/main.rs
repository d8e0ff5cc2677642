mod fetcher;
mod discovery;
mod parser;
mod models;
mod archiver;

use std::fs;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};
use url::Url;

use crate::models::{Catalog, ProductRecord};

const BASE: &str = "https://www.marcosymarcos.mx/";
const CATEGORY_URLS: &[&str] = &[
    "https://www.marcosymarcos.mx/categoria/molduras/poliestireno/",
];

const IMG_DIR: &str = "img/molduras";
const OUT_JSON: &str = "data/molduras_scraped.json";

const PRODUCT_PAUSE: Duration = Duration::from_millis(600);

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    fs::create_dir_all(IMG_DIR)?;

    let client = fetcher::build_client()?;
    let base = Url::parse(BASE)?;
    let mut catalog = Catalog::new();

    for category in CATEGORY_URLS {
        info!("category: {}", category);

        for product_url in discovery::find_product_links(&client, &base, category)? {
            let page = match fetcher::fetch_html(&client, &product_url)
                .and_then(|html| parser::parse_product(&product_url, &base, &html))
            {
                Ok(page) => page,
                Err(e) => {
                    warn!("error on {}: {:#}", product_url, e);
                    continue;
                }
            };

            if catalog.contains(&page.id) {
                continue;
            }
            info!("- {} {}", page.id, page.name);

            let img_path = format!("{}/{}.jpg", IMG_DIR, page.id);
            let downloaded = fetcher::download_image(&client, page.img_url.as_deref(), &img_path);

            catalog.insert(ProductRecord {
                id: page.id,
                name: page.name,
                width_cm: page.width_cm,
                color: page.color,
                style: page.style,
                img: downloaded.then_some(img_path),
            });
            thread::sleep(PRODUCT_PAUSE); // be polite
        }
    }

    archiver::save_catalog(&catalog, OUT_JSON)?;
    info!("done: {} => {} molduras", OUT_JSON, catalog.len());
    Ok(())
}
