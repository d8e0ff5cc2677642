use scraper::{Html, Selector};
use anyhow::{Context, Result};
use regex::Regex;
use url::Url;

use crate::models::ProductPage;

/// Keyword -> hex color, scanned in order against the lowercased name.
/// First match in table order wins.
const COLOR_TABLE: &[(&str, &str)] = &[
    ("negro", "#111111"),
    ("blanco", "#f5f5f5"),
    ("nogal", "#6b3f21"),
    ("caoba", "#7a3b1f"),
    ("chocolate", "#4b2b1a"),
    ("natural", "#c9b18c"),
    ("maple", "#e0b977"),
    ("wengue", "#3a2a1a"),
    ("roble", "#916c44"),
    ("azul", "#1f3a5a"),
    ("gris", "#777777"),
    ("plata", "#c0c0c0"),
    ("dorado", "#c7a446"),
    ("oro", "#c7a446"),
    ("bronce", "#8c6b3f"),
    ("marfil", "#f0eee6"),
];

const METAL_KEYWORDS: &[&str] = &["plata", "dorado", "oro", "bronce", "metal"];

pub fn parse_product(url: &str, base: &Url, html: &str) -> Result<ProductPage> {
    let doc = Html::parse_document(html);

    let name = extract_title(&doc).unwrap_or_else(|| slug_from_url(url));
    let id = extract_sku(&doc)
        .and_then(|s| clean_id(&s))
        .or_else(|| clean_id(&slug_from_url(url)))
        .with_context(|| format!("no usable id for {}", url))?;
    let img_url = extract_image_url(&doc, base);

    let width_cm = parse_width_cm(&name);
    let (style, color) = guess_style_and_color(&name);

    Ok(ProductPage {
        id,
        name,
        width_cm,
        color: color.to_string(),
        style: style.to_string(),
        img_url,
    })
}

fn extract_title(doc: &Html) -> Option<String> {
    for sel in ["h1.product_title", "h1.entry-title"] {
        let selector = Selector::parse(sel).unwrap();
        if let Some(el) = doc.select(&selector).next() {
            let text = el.text().collect::<Vec<_>>().join(" ");
            return Some(collapse_whitespace(&text));
        }
    }
    None
}

fn extract_sku(doc: &Html) -> Option<String> {
    for sel in ["span.sku", ".sku", ".product_meta .sku"] {
        let selector = Selector::parse(sel).unwrap();
        if let Some(el) = doc.select(&selector).next() {
            return Some(el.text().collect::<String>().trim().to_string());
        }
    }
    None
}

// og:image meta, then gallery image, then featured image. First non-empty
// source wins; the order is part of the observable output.
fn extract_image_url(doc: &Html, base: &Url) -> Option<String> {
    let og = Selector::parse(r#"meta[property="og:image"]"#).unwrap();
    if let Some(content) = doc
        .select(&og)
        .next()
        .and_then(|m| m.value().attr("content"))
        .filter(|c| !c.is_empty())
    {
        return resolve(base, content);
    }

    let gallery = Selector::parse(".woocommerce-product-gallery__image img").unwrap();
    if let Some(img) = doc.select(&gallery).next() {
        let src = img
            .value()
            .attr("data-large_image")
            .filter(|s| !s.is_empty())
            .or_else(|| img.value().attr("src").filter(|s| !s.is_empty()));
        if let Some(src) = src {
            return resolve(base, src);
        }
    }

    let featured = Selector::parse("img.wp-post-image").unwrap();
    if let Some(src) = doc
        .select(&featured)
        .next()
        .and_then(|i| i.value().attr("src"))
        .filter(|s| !s.is_empty())
    {
        return resolve(base, src);
    }

    None
}

fn resolve(base: &Url, href: &str) -> Option<String> {
    base.join(href).ok().map(|u| u.to_string())
}

pub fn slug_from_url(url: &str) -> String {
    let path = Url::parse(url)
        .map(|u| u.path().to_string())
        .unwrap_or_default();
    let last = path.trim_matches('/').rsplit('/').next().unwrap_or("");
    let slug = if last.is_empty() { "producto" } else { last };
    slug.to_uppercase().replace('-', "_")
}

/// Uppercase and keep only `[A-Z0-9_-]`; `None` when nothing survives.
pub fn clean_id(text: &str) -> Option<String> {
    let re = Regex::new(r"[^A-Z0-9_-]+").unwrap();
    let cleaned = re
        .replace_all(&text.trim().to_uppercase(), "")
        .into_owned();
    if cleaned.is_empty() { None } else { Some(cleaned) }
}

/// First numeric token followed by "cm" in the name; decimal commas are
/// normalized to periods.
pub fn parse_width_cm(text: &str) -> Option<f64> {
    let re = Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*cm").unwrap();
    let caps = re.captures(text)?;
    caps[1].replace(',', ".").parse().ok()
}

pub fn guess_style_and_color(name: &str) -> (&'static str, &'static str) {
    let t = name.to_lowercase();

    let mut color = "#555555";
    for (keyword, hex) in COLOR_TABLE {
        if t.contains(keyword) {
            color = hex;
            break;
        }
    }

    let style = if METAL_KEYWORDS.iter().any(|k| t.contains(k)) {
        "metal"
    } else {
        "grain"
    };
    (style, color)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
