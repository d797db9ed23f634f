use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One storefront category, scraped as an independent unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// URL path segment under the storefront base, e.g. `"warzywa"`.
    pub slug: String,
    /// Human-readable name used in log lines. Falls back to the slug.
    #[serde(default)]
    pub label: Option<String>,
}

impl CategoryConfig {
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            label: None,
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.slug)
    }

    /// Listing page URL for `page` (1-based) of this category under `base_url`.
    #[must_use]
    pub fn page_url(&self, base_url: &str, page: u32) -> String {
        format!("{}/{}/?page={page}", base_url.trim_end_matches('/'), self.slug)
    }
}

/// Whether a run covers the whole category list or one category.
///
/// Single-category output omits the category column and leaves
/// [`crate::ProductRecord::category`] empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Single,
    Multi,
}

impl RunMode {
    #[must_use]
    pub fn includes_category(self) -> bool {
        matches!(self, RunMode::Multi)
    }

    /// Category value stamped onto each record for `category`.
    #[must_use]
    pub fn record_category(self, category: &CategoryConfig) -> String {
        match self {
            RunMode::Multi => category.slug.clone(),
            RunMode::Single => String::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CategoriesFile {
    pub categories: Vec<CategoryConfig>,
}

impl CategoriesFile {
    #[must_use]
    pub fn find(&self, slug: &str) -> Option<&CategoryConfig> {
        self.categories.iter().find(|c| c.slug == slug)
    }
}

/// Load and validate the category list from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_categories(path: &Path) -> Result<CategoriesFile, ConfigError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ConfigError::CategoriesFileIo {
            path: path.display().to_string(),
            source: e,
        })?;

    let categories_file: CategoriesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::CategoriesFileParse)?;

    validate_categories(&categories_file)?;

    Ok(categories_file)
}

fn validate_categories(categories_file: &CategoriesFile) -> Result<(), ConfigError> {
    if categories_file.categories.is_empty() {
        return Err(ConfigError::Validation(
            "at least one category must be configured".to_string(),
        ));
    }

    let mut seen = HashSet::new();

    for category in &categories_file.categories {
        if category.slug.is_empty() {
            return Err(ConfigError::Validation(
                "category slug must be non-empty".to_string(),
            ));
        }

        if !is_valid_slug(&category.slug) {
            return Err(ConfigError::Validation(format!(
                "category slug '{}' may only contain lowercase ASCII letters, digits, and '-'",
                category.slug
            )));
        }

        if !seen.insert(category.slug.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category slug: '{}'",
                category.slug
            )));
        }
    }

    Ok(())
}

fn is_valid_slug(slug: &str) -> bool {
    slug.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
#[path = "categories_test.rs"]
mod tests;
