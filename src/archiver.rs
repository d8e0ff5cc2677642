use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::models::Catalog;

pub fn save_catalog(catalog: &Catalog, filename: &str) -> Result<()> {
    if let Some(dir) = Path::new(filename).parent() {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(catalog.records())?;
    let mut file = File::create(filename)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_catalog_still_writes_a_file() {
        let path = std::env::temp_dir().join("molduras_scraper_empty_catalog.json");
        let path = path.to_str().unwrap();

        save_catalog(&Catalog::new(), path).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "[]");

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn overwrites_previous_output() {
        use crate::models::ProductRecord;

        let path = std::env::temp_dir().join("molduras_scraper_overwrite.json");
        let path = path.to_str().unwrap();
        fs::write(path, "stale contents").unwrap();

        let mut catalog = Catalog::new();
        catalog.insert(ProductRecord {
            id: "MOL-1".to_string(),
            name: "Moldura Nogal 3.0 cm".to_string(),
            width_cm: Some(3.0),
            color: "#6b3f21".to_string(),
            style: "grain".to_string(),
            img: Some("img/molduras/MOL-1.jpg".to_string()),
        });
        save_catalog(&catalog, path).unwrap();

        let written = fs::read_to_string(path).unwrap();
        assert!(written.starts_with('['));
        assert!(written.contains("\"id\": \"MOL-1\""));
        assert!(!written.contains("stale"));

        fs::remove_file(path).unwrap();
    }
}
