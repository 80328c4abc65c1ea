//! Tabular serialization of the result collection.
//!
//! One row per product, columns in discovery-field order:
//! url, title, price_display, current_price, original_price.

use std::path::Path;

use anyhow::{Context, Result};

use crate::core::types::Product;

pub fn write_csv(path: &Path, products: &[Product]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to open {} for writing", path.display()))?;
    for product in products {
        writer.serialize(product)?;
    }
    writer.flush()?;
    Ok(())
}

/// The same table as a string, for clipboard mirroring.
pub fn to_csv_string(products: &[Product]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for product in products {
        writer.serialize(product)?;
    }
    let bytes = writer.into_inner().context("csv writer flush failed")?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Product> {
        vec![Product {
            url: "https://www.etsy.com/listing/123/mug".into(),
            title: "Mug – Handmade".into(),
            price_display: "Original Price $45.00 $30.00".into(),
            current_price: "30.00".into(),
            original_price: "45.00".into(),
        }]
    }

    #[test]
    fn header_order_matches_columns() {
        let out = to_csv_string(&sample()).unwrap();
        let header = out.lines().next().unwrap();
        assert_eq!(
            header,
            "url,title,price_display,current_price,original_price"
        );
    }

    #[test]
    fn one_row_per_product() {
        let out = to_csv_string(&sample()).unwrap();
        assert_eq!(out.lines().count(), 2);
        assert!(out.contains("https://www.etsy.com/listing/123/mug"));
    }
}
