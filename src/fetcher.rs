use std::fs::File;
use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use reqwest::blocking::Client;
use reqwest::redirect;
use tracing::warn;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/122.0 Safari/537.36";

const PAGE_TIMEOUT: Duration = Duration::from_secs(30);
const IMAGE_TIMEOUT: Duration = Duration::from_secs(40);

pub fn build_client() -> Result<Client> {
    let client = Client::builder()
        .redirect(redirect::Policy::limited(10))
        .timeout(PAGE_TIMEOUT)
        .build()?;
    Ok(client)
}

pub fn fetch_html(client: &Client, url: &str) -> Result<String> {
    let body = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .send()?
        .error_for_status()?
        .text()?;
    Ok(body)
}

/// Fetch `url` and write the body to `path`. Failures are logged here and
/// reported as `false`; a missing URL fails without touching the network.
pub fn download_image(client: &Client, url: Option<&str>, path: &str) -> bool {
    let Some(url) = url else {
        return false;
    };
    match fetch_image(client, url, path) {
        Ok(()) => true,
        Err(e) => {
            warn!("could not download {}: {:#}", url, e);
            false
        }
    }
}

fn fetch_image(client: &Client, url: &str, path: &str) -> Result<()> {
    let bytes = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .timeout(IMAGE_TIMEOUT)
        .send()?
        .error_for_status()?
        .bytes()?;

    let mut file = File::create(path)?;
    file.write_all(&bytes)?;
    Ok(())
}
