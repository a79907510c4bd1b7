//! Listing request values shared by the acquisition controller and both
//! product stores.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// A filterable product attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Category,
    Brand,
}

impl Facet {
    /// Field name used by both stores for this facet.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Facet::Category => "category",
            Facet::Brand => "brand",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    PriceAsc,
    PriceDesc,
    TitleAsc,
    TitleDesc,
}

impl SortKey {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::TitleAsc => "title-asc",
            SortKey::TitleDesc => "title-desc",
        }
    }

    /// The product field this key orders by.
    #[must_use]
    pub fn field(self) -> &'static str {
        match self {
            SortKey::PriceAsc | SortKey::PriceDesc => "price",
            SortKey::TitleAsc | SortKey::TitleDesc => "title",
        }
    }

    #[must_use]
    pub fn is_descending(self) -> bool {
        matches!(self, SortKey::PriceDesc | SortKey::TitleDesc)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort key \"{0}\" (expected price-asc, price-desc, title-asc, or title-desc)")]
pub struct ParseSortKeyError(pub String);

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "price-asc" => Ok(SortKey::PriceAsc),
            "price-desc" => Ok(SortKey::PriceDesc),
            "title-asc" => Ok(SortKey::TitleAsc),
            "title-desc" => Ok(SortKey::TitleDesc),
            _ => Err(ParseSortKeyError(s.to_string())),
        }
    }
}

/// Which backing store the acquisition controller currently reads from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    #[default]
    Primary,
    Fallback,
}

impl fmt::Display for SourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceMode::Primary => f.write_str("primary"),
            SourceMode::Fallback => f.write_str("fallback"),
        }
    }
}

/// An immutable listing request: facet filters, sort order, and page.
///
/// Facet values are kept in sorted sets, so two requests selecting the same
/// values in a different order compare equal. A facet with no selected
/// values is the same as no filter on that facet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    filters: BTreeMap<Facet, BTreeSet<String>>,
    sort: SortKey,
    page: u32,
    page_size: u32,
}

impl Default for FetchRequest {
    fn default() -> Self {
        Self {
            filters: BTreeMap::new(),
            sort: SortKey::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FetchRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `values` to the selection for `facet`. Blank values are ignored.
    #[must_use]
    pub fn with_filter<I, S>(mut self, facet: Facet, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let selected = self.filters.entry(facet).or_default();
        selected.extend(
            values
                .into_iter()
                .map(Into::into)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        );
        if selected.is_empty() {
            self.filters.remove(&facet);
        }
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Sets the 1-based page number. Zero is clamped to the first page.
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    #[must_use]
    pub fn filters(&self) -> &BTreeMap<Facet, BTreeSet<String>> {
        &self.filters
    }

    /// Selected values for `facet`, if any.
    #[must_use]
    pub fn selected(&self, facet: Facet) -> Option<&BTreeSet<String>> {
        self.filters.get(&facet)
    }

    #[must_use]
    pub fn sort(&self) -> SortKey {
        self.sort
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_order_is_irrelevant() {
        let a = FetchRequest::new().with_filter(Facet::Category, ["women", "men"]);
        let b = FetchRequest::new().with_filter(Facet::Category, ["men", "women"]);
        assert_eq!(a, b);
    }

    #[test]
    fn duplicate_and_blank_values_collapse() {
        let req = FetchRequest::new().with_filter(Facet::Brand, ["nike", " nike ", ""]);
        let brands = req.selected(Facet::Brand).unwrap();
        assert_eq!(brands.len(), 1);
        assert!(brands.contains("nike"));
    }

    #[test]
    fn empty_selection_is_no_filter() {
        let req = FetchRequest::new().with_filter(Facet::Category, Vec::<String>::new());
        assert!(req.filters().is_empty());
        assert_eq!(req, FetchRequest::new());
    }

    #[test]
    fn page_and_size_are_clamped_to_one() {
        let req = FetchRequest::new().with_page(0).with_page_size(0);
        assert_eq!(req.page(), 1);
        assert_eq!(req.page_size(), 1);
    }

    #[test]
    fn sort_key_parses_and_displays() {
        for key in [
            SortKey::PriceAsc,
            SortKey::PriceDesc,
            SortKey::TitleAsc,
            SortKey::TitleDesc,
        ] {
            assert_eq!(key.as_str().parse::<SortKey>(), Ok(key));
        }
        assert_eq!("PRICE-DESC".parse::<SortKey>(), Ok(SortKey::PriceDesc));
        assert!("cheapest".parse::<SortKey>().is_err());
    }

    #[test]
    fn sort_key_field_and_direction() {
        assert_eq!(SortKey::TitleDesc.field(), "title");
        assert!(SortKey::TitleDesc.is_descending());
        assert_eq!(SortKey::PriceAsc.field(), "price");
        assert!(!SortKey::PriceAsc.is_descending());
    }

    #[test]
    fn default_mode_is_primary() {
        assert_eq!(SourceMode::default(), SourceMode::Primary);
    }
}
