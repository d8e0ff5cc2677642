use std::collections::HashSet;

use serde::{Serialize, Deserialize};

/// Extraction result for one product page. `img_url` still points at the
/// remote image; the local path is decided after the download attempt.
pub struct ProductPage {
    pub id: String,
    pub name: String,
    pub width_cm: Option<f64>,
    pub color: String,
    pub style: String,
    pub img_url: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub width_cm: Option<f64>,
    pub color: String,
    pub style: String,
    pub img: Option<String>,
}

/// Id-keyed collection that keeps insertion order. The first record for a
/// given id wins; later duplicates are dropped.
#[derive(Default)]
pub struct Catalog {
    records: Vec<ProductRecord>,
    seen: HashSet<String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    /// Returns false when a record with the same id is already present.
    pub fn insert(&mut self, record: ProductRecord) -> bool {
        if !self.seen.insert(record.id.clone()) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str) -> ProductRecord {
        ProductRecord {
            id: id.to_string(),
            name: name.to_string(),
            width_cm: None,
            color: "#555555".to_string(),
            style: "grain".to_string(),
            img: None,
        }
    }

    #[test]
    fn first_record_wins() {
        let mut catalog = Catalog::new();
        assert!(catalog.is_empty());
        assert!(catalog.insert(record("MOL-1", "first")));
        assert!(!catalog.insert(record("MOL-1", "second")));

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.records()[0].name, "first");
    }

    #[test]
    fn keeps_insertion_order() {
        let mut catalog = Catalog::new();
        catalog.insert(record("ZZZ", "late alphabet"));
        catalog.insert(record("AAA", "early alphabet"));

        let ids: Vec<&str> = catalog.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["ZZZ", "AAA"]);
        assert!(catalog.contains("AAA"));
        assert!(!catalog.contains("BBB"));
    }

    #[test]
    fn record_serializes_with_nulls_and_unescaped_text() {
        let mut rec = record("MOL-2", "Marco Metálico");
        rec.width_cm = Some(2.5);

        let json = serde_json::to_string_pretty(&rec).unwrap();
        assert!(json.contains("\"width_cm\": 2.5"));
        assert!(json.contains("\"img\": null"));
        assert!(json.contains("Metálico"));
    }
}
