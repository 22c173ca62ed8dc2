//! Client-side narrowing of an already fetched product list.

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use crate::products::Product;

/// Ordering applied by [`ListingFilter::apply`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Keep the catalog order.
    #[default]
    Default,
    /// Cheapest first.
    PriceAscending,
    /// Most expensive first.
    PriceDescending,
}

/// Brand, price and ordering filter for a product listing.
///
/// # Example
///
/// ```rust,ignore
/// use rust_decimal::Decimal;
/// use storefront_catalog::products::{ListingFilter, SortOrder};
///
/// let filter = ListingFilter {
///     brand: Some("Apple".to_string()),
///     price_range: Some((Decimal::ZERO, Decimal::new(1000, 0))),
///     sort: SortOrder::PriceAscending,
/// };
/// let visible = filter.apply(&products);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingFilter {
    /// Exact brand to keep; `None` keeps every brand.
    pub brand: Option<String>,
    /// Inclusive price bounds.
    pub price_range: Option<(Decimal, Decimal)>,
    /// Result ordering.
    pub sort: SortOrder,
}

impl ListingFilter {
    /// Returns the matching products in the requested order.
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut filtered: Vec<Product> = products
            .iter()
            .filter(|product| {
                self.brand
                    .as_ref()
                    .map_or(true, |brand| product.brand.as_ref() == Some(brand))
            })
            .filter(|product| {
                self.price_range
                    .map_or(true, |(min, max)| product.price >= min && product.price <= max)
            })
            .cloned()
            .collect();

        match self.sort {
            SortOrder::Default => {}
            SortOrder::PriceAscending => filtered.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOrder::PriceDescending => filtered.sort_by(|a, b| b.price.cmp(&a.price)),
        }
        filtered
    }
}

/// Distinct non-blank brands, sorted.
#[must_use]
pub fn brands(products: &[Product]) -> Vec<String> {
    products
        .iter()
        .filter_map(|product| product.brand.as_deref())
        .map(str::trim)
        .filter(|brand| !brand.is_empty())
        .map(ToString::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Highest price rounded up to the next hundred, or `None` for an empty list.
#[must_use]
pub fn price_ceiling(products: &[Product]) -> Option<Decimal> {
    let hundred = Decimal::ONE_HUNDRED;
    products
        .iter()
        .map(|product| product.price)
        .max()
        .map(|max| (max / hundred).ceil() * hundred)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, brand: Option<&str>, price: i64) -> Product {
        Product::new(
            id.to_string(),
            format!("Product {id}"),
            String::new(),
            Decimal::new(price, 0),
            String::new(),
            "smartphones".to_string(),
            None,
            None,
            brand.map(ToString::to_string),
        )
    }

    fn sample() -> Vec<Product> {
        vec![
            product("1", Some("Apple"), 999),
            product("2", Some("Samsung"), 499),
            product("3", Some("Apple"), 299),
            product("4", None, 50),
            product("5", Some("  "), 1299),
        ]
    }

    #[test]
    fn test_default_filter_keeps_everything_in_order() {
        let ids: Vec<_> = ListingFilter::default()
            .apply(&sample())
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_brand_filter_is_exact() {
        let filter = ListingFilter {
            brand: Some("Apple".to_string()),
            ..ListingFilter::default()
        };
        let ids: Vec<_> = filter.apply(&sample()).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let filter = ListingFilter {
            price_range: Some((Decimal::new(299, 0), Decimal::new(999, 0))),
            ..ListingFilter::default()
        };
        let ids: Vec<_> = filter.apply(&sample()).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn test_sorting_by_price() {
        let ascending = ListingFilter {
            sort: SortOrder::PriceAscending,
            ..ListingFilter::default()
        };
        let ids: Vec<_> = ascending.apply(&sample()).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, ["4", "3", "2", "1", "5"]);

        let descending = ListingFilter {
            sort: SortOrder::PriceDescending,
            ..ListingFilter::default()
        };
        let ids: Vec<_> = descending.apply(&sample()).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, ["5", "1", "2", "3", "4"]);
    }

    #[test]
    fn test_brands_are_unique_sorted_and_non_blank() {
        assert_eq!(brands(&sample()), ["Apple", "Samsung"]);
    }

    #[test]
    fn test_price_ceiling_rounds_up_to_hundred() {
        assert_eq!(price_ceiling(&sample()), Some(Decimal::new(1300, 0)));
        assert_eq!(
            price_ceiling(&[product("1", None, 700)]),
            Some(Decimal::new(700, 0))
        );
        assert_eq!(price_ceiling(&[]), None);
    }
}
