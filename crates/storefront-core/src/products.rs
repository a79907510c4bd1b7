use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// A product record as served by either backing store.
///
/// The schema is owned by the stores; this type only carries the fields the
/// listing view needs and does not enforce the stores' invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store identifier. The primary store serializes it as `_id`.
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    /// Discounted price; zero means the product is not on sale.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub sale_price: Decimal,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub total_stock: u32,
    /// Image URL, if the product has one.
    #[serde(default)]
    pub image: Option<String>,
}

impl Product {
    /// Returns `true` when a positive sale price below the list price is set.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.sale_price > Decimal::ZERO && self.sale_price < self.price
    }

    /// The price a shopper pays right now.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        if self.is_on_sale() {
            self.sale_price
        } else {
            self.price
        }
    }

    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.total_stock > 0
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Decimal>::deserialize(deserializer)?.unwrap_or(Decimal::ZERO))
}

/// Paging metadata reported by a backing store alongside its records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_count: u64,
    pub page: u32,
    pub total_pages: u32,
}

impl PageInfo {
    /// Derives the page count from a known total.
    #[must_use]
    pub fn derive(total_count: u64, page: u32, page_size: u32) -> Self {
        let page_size = u64::from(page_size.max(1));
        let total_pages = u32::try_from(total_count.div_ceil(page_size)).unwrap_or(u32::MAX);
        Self {
            total_count,
            page,
            total_pages,
        }
    }

    /// Estimates paging from the records on the requested page alone, for a
    /// store that reported neither a total nor a page count. The estimate
    /// never places `page` past the last page.
    #[must_use]
    pub fn from_page_records(records: usize, page: u32, page_size: u32) -> Self {
        let page = page.max(1);
        let before = u64::from(page - 1) * u64::from(page_size.max(1));
        let mut info = Self::derive(before + records as u64, page, page_size);
        info.total_pages = info.total_pages.max(page);
        info
    }
}

/// One page of products returned by a successful acquisition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub info: PageInfo,
}

impl ProductPage {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_product(price: &str, sale_price: &str, total_stock: u32) -> Product {
        Product {
            id: "p-1".to_string(),
            title: "Canvas Sneaker".to_string(),
            description: None,
            price: dec(price),
            sale_price: dec(sale_price),
            category: "footwear".to_string(),
            brand: "nike".to_string(),
            total_stock,
            image: None,
        }
    }

    #[test]
    fn zero_sale_price_means_not_on_sale() {
        let product = make_product("49.99", "0", 3);
        assert!(!product.is_on_sale());
        assert_eq!(product.effective_price(), dec("49.99"));
    }

    #[test]
    fn sale_price_below_list_price_is_effective() {
        let product = make_product("49.99", "39.99", 3);
        assert!(product.is_on_sale());
        assert_eq!(product.effective_price(), dec("39.99"));
    }

    #[test]
    fn sale_price_above_list_price_is_ignored() {
        let product = make_product("49.99", "59.99", 3);
        assert!(!product.is_on_sale());
        assert_eq!(product.effective_price(), dec("49.99"));
    }

    #[test]
    fn zero_stock_is_out_of_stock() {
        assert!(!make_product("10", "0", 0).in_stock());
        assert!(make_product("10", "0", 1).in_stock());
    }

    #[test]
    fn deserializes_mongo_style_id_and_null_sale_price() {
        let json = serde_json::json!({
            "_id": "65f0c0ffee",
            "title": "Linen Shirt",
            "price": 30,
            "salePrice": null,
            "category": "men",
            "brand": "levi",
            "totalStock": 12,
            "image": "https://cdn.example.com/shirt.png"
        });
        let product: Product = serde_json::from_value(json).unwrap();
        assert_eq!(product.id, "65f0c0ffee");
        assert_eq!(product.price, dec("30"));
        assert_eq!(product.sale_price, Decimal::ZERO);
        assert_eq!(product.total_stock, 12);
        assert_eq!(
            product.image.as_deref(),
            Some("https://cdn.example.com/shirt.png")
        );
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = serde_json::json!({ "id": "x", "title": "Bare", "price": "5.00" });
        let product: Product = serde_json::from_value(json).unwrap();
        assert_eq!(product.sale_price, Decimal::ZERO);
        assert_eq!(product.total_stock, 0);
        assert!(product.category.is_empty());
        assert!(product.image.is_none());
    }

    #[test]
    fn page_info_derive_rounds_up() {
        let info = PageInfo::derive(41, 1, 20);
        assert_eq!(info.total_pages, 3);
        assert_eq!(PageInfo::derive(0, 1, 20).total_pages, 0);
        assert_eq!(PageInfo::derive(40, 2, 20).total_pages, 2);
    }

    #[test]
    fn page_records_estimate_counts_earlier_pages() {
        let info = PageInfo::from_page_records(5, 3, 20);
        assert_eq!(info.total_count, 45);
        assert_eq!(info.page, 3);
        assert_eq!(info.total_pages, 3);
    }

    #[test]
    fn page_records_estimate_never_ends_before_requested_page() {
        let info = PageInfo::from_page_records(0, 4, 10);
        assert!(info.page <= info.total_pages, "got {info:?}");
        assert_eq!(PageInfo::from_page_records(0, 1, 10).total_pages, 1);
    }
}
