use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A product candidate tracked across pipeline cycles.
///
/// The name is the snapshot key and is immutable for the lifetime of a
/// tracking run; the keyword is what the signal sources are queried with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedProduct {
    pub name: String,
    /// Search term sent to external sources; defaults to the lowercased name.
    pub keyword: Option<String>,
}

impl TrackedProduct {
    /// Returns the search keyword for this product.
    #[must_use]
    pub fn keyword(&self) -> String {
        self.keyword
            .clone()
            .unwrap_or_else(|| self.name.to_lowercase())
    }
}

#[derive(Debug, Deserialize)]
pub struct ProductsFile {
    pub products: Vec<TrackedProduct>,
}

/// Load and validate the tracked-products configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_products(path: &Path) -> Result<ProductsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ProductsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let products_file: ProductsFile =
        serde_yaml::from_str(&content).map_err(ConfigError::ProductsFileParse)?;

    validate_products(&products_file)?;

    Ok(products_file)
}

fn validate_products(products_file: &ProductsFile) -> Result<(), ConfigError> {
    if products_file.products.is_empty() {
        return Err(ConfigError::Validation(
            "products list must not be empty".to_string(),
        ));
    }

    let mut seen_names = HashSet::new();

    for product in &products_file.products {
        if product.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "product name must be non-empty".to_string(),
            ));
        }

        if let Some(keyword) = &product.keyword {
            if keyword.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "product '{}' has an empty keyword",
                    product.name
                )));
            }
        }

        let lower_name = product.name.to_lowercase();
        if !seen_names.insert(lower_name) {
            return Err(ConfigError::Validation(format!(
                "duplicate product name: '{}'",
                product.name
            )));
        }
    }

    Ok(())
}
