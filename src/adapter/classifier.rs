//! Keyword heuristics that sort catalog products into electronics, phones
//! and accessories.
//!
//! Matching is case-insensitive substring search over the title,
//! description and category. The rules are plain tables so they can be
//! replaced wholesale; misclassification is possible and never an error.

use regex::Regex;

use crate::error::ConfigError;
use crate::products::Product;

/// Matches numbered handset models such as "Mi 11", "Redmi Note 12" or "Poco X5".
pub const DEFAULT_HANDSET_PATTERN: &str =
    r"(?i)\b(mi\s*\d+|redmi\s*(?:note\s*)?\d+|poco\s*(x|f|m)\d+)\b";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}

/// Keyword and category tables driving a [`Classifier`].
///
/// # Example
///
/// ```rust
/// use storefront_catalog::adapter::ClassifierRules;
///
/// let mut rules = ClassifierRules::default();
/// rules.electronic_categories.push("gaming".to_string());
///
/// let rules = rules.with_handset_pattern(r"(?i)\bpixel\s*\d+\b").unwrap();
/// assert!(rules.handset_pattern().is_match("Pixel 8 Pro"));
/// ```
#[derive(Clone, Debug)]
pub struct ClassifierRules {
    /// Category slugs (substring match) that are electronics outright.
    pub electronic_categories: Vec<String>,
    /// Title/description keywords that mark electronics.
    pub electronic_keywords: Vec<String>,
    /// Keywords naming the phone handsets to pick out.
    pub phone_keywords: Vec<String>,
    /// Category slugs (exact match) holding phone handsets.
    pub phone_categories: Vec<String>,
    /// Keywords that rule a product out as a phone handset.
    pub phone_exclusion_keywords: Vec<String>,
    /// Keywords marking an item in a phone category as an accessory.
    pub handset_accessory_keywords: Vec<String>,
    /// Keywords for watches and clocks, never accessories.
    pub watch_keywords: Vec<String>,
    /// Clothing, food, furniture and cosmetics keywords, never accessories.
    pub excluded_keywords: Vec<String>,
    /// Keywords that mark an electronic product as an accessory.
    pub accessory_keywords: Vec<String>,
    /// Brands whose handsets are kept out of accessory results.
    pub handset_brands: Vec<HandsetBrand>,
    handset_pattern: Regex,
}

/// A brand whose titles usually name a handset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandsetBrand {
    /// Title keywords naming the brand.
    pub names: Vec<String>,
    /// Title keywords showing the item is an accessory for the brand.
    pub exempt_keywords: Vec<String>,
    /// Whether the title must also match the handset model pattern.
    pub requires_model_pattern: bool,
}

impl HandsetBrand {
    /// Creates a brand entry from string slices.
    #[must_use]
    pub fn new(names: &[&str], exempt_keywords: &[&str], requires_model_pattern: bool) -> Self {
        Self {
            names: strings(names),
            exempt_keywords: strings(exempt_keywords),
            requires_model_pattern,
        }
    }

    fn lowercased(mut self) -> Self {
        lowercase_all(&mut self.names);
        lowercase_all(&mut self.exempt_keywords);
        self
    }
}

impl ClassifierRules {
    /// Replaces the handset model pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if the pattern does not compile.
    pub fn with_handset_pattern(mut self, pattern: &str) -> Result<Self, ConfigError> {
        self.handset_pattern = Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(self)
    }

    /// Returns the handset model pattern.
    #[must_use]
    pub const fn handset_pattern(&self) -> &Regex {
        &self.handset_pattern
    }

    fn lowercased(mut self) -> Self {
        for table in [
            &mut self.electronic_categories,
            &mut self.electronic_keywords,
            &mut self.phone_keywords,
            &mut self.phone_categories,
            &mut self.phone_exclusion_keywords,
            &mut self.handset_accessory_keywords,
            &mut self.watch_keywords,
            &mut self.excluded_keywords,
            &mut self.accessory_keywords,
        ] {
            lowercase_all(table);
        }
        self.handset_brands = self
            .handset_brands
            .into_iter()
            .map(HandsetBrand::lowercased)
            .collect();
        self
    }
}

impl Default for ClassifierRules {
    /// The built-in electronics storefront tables.
    ///
    /// # Panics
    ///
    /// Never in practice: [`DEFAULT_HANDSET_PATTERN`] is a valid pattern.
    fn default() -> Self {
        Self {
            electronic_categories: strings(&[
                "smartphones",
                "laptops",
                "tablets",
                "mobile-accessories",
                "electronics",
                "audio",
            ]),
            electronic_keywords: strings(&[
                "phone",
                "iphone",
                "galaxy",
                "pixel",
                "xiaomi",
                "mi ",
                "redmi",
                "poco",
                "laptop",
                "notebook",
                "macbook",
                "tablet",
                "airpods",
                "earbuds",
                "headphone",
                "earphone",
                "charger",
                "power bank",
                "smartwatch",
                "watch",
            ]),
            phone_keywords: strings(&["iphone"]),
            phone_categories: strings(&["smartphones"]),
            phone_exclusion_keywords: strings(&[
                "case",
                "charger",
                "cable",
                "cover",
                "protector",
                "stand",
                "mount",
            ]),
            handset_accessory_keywords: strings(&[
                "case",
                "charger",
                "cable",
                "cover",
                "protector",
                "stand",
                "mount",
                "adapter",
                "power bank",
            ]),
            watch_keywords: strings(&["watch", "clock", "timepiece", "wristwatch", "smartwatch"]),
            excluded_keywords: strings(&[
                "dress",
                "shirt",
                "pants",
                "jacket",
                "perfume",
                "fragrance",
                "skincare",
                "lotion",
                "cream",
                "food",
                "groceries",
                "furniture",
            ]),
            accessory_keywords: strings(&[
                "case",
                "charger",
                "cable",
                "headphone",
                "earphone",
                "earbud",
                "protector",
                "stand",
                "mount",
                "cover",
                "adapter",
                "power bank",
                "wireless charger",
                "bluetooth",
                "speaker",
                "dock",
                "holder",
                "grip",
                "ring",
                "sticker",
                "skin",
                "tempered glass",
                "screen protector",
                "airpods",
                "earbuds",
            ]),
            handset_brands: vec![
                HandsetBrand::new(&["iphone"], &["case", "charger", "cover"], false),
                HandsetBrand::new(&["samsung", "galaxy"], &["case", "charger"], false),
                HandsetBrand::new(&["xiaomi", "mi "], &["case", "charger"], true),
            ],
            handset_pattern: Regex::new(DEFAULT_HANDSET_PATTERN)
                .expect("default handset pattern is valid"),
        }
    }
}

/// Pure predicates over [`Product`] driven by [`ClassifierRules`].
///
/// # Example
///
/// ```rust
/// use storefront_catalog::adapter::{to_product, Classifier};
/// use storefront_catalog::catalog::RawProduct;
///
/// let raw: RawProduct = serde_json::from_value(serde_json::json!({
///     "id": 1, "title": "iPhone Silicone Case", "price": 19.99, "category": "smartphones"
/// })).unwrap();
/// let product = to_product(&raw);
///
/// let classifier = Classifier::default();
/// assert!(classifier.is_electronic(&product));
/// assert!(classifier.is_accessory(&product));
/// assert!(!classifier.is_phone(&product));
/// ```
#[derive(Clone, Debug)]
pub struct Classifier {
    rules: ClassifierRules,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(ClassifierRules::default())
    }
}

impl Classifier {
    /// Creates a classifier; table entries are lowercased.
    #[must_use]
    pub fn new(rules: ClassifierRules) -> Self {
        Self {
            rules: rules.lowercased(),
        }
    }

    /// Returns the active rules.
    #[must_use]
    pub const fn rules(&self) -> &ClassifierRules {
        &self.rules
    }

    /// Electronics: an electronics category, or an electronics keyword in
    /// the title or description.
    #[must_use]
    pub fn is_electronic(&self, product: &Product) -> bool {
        let category = product.category.to_lowercase();
        if self
            .rules
            .electronic_categories
            .iter()
            .any(|c| category.contains(c.as_str()))
        {
            return true;
        }
        contains_any(&product.search_text(), &self.rules.electronic_keywords)
    }

    /// A phone handset: a phone keyword in the text and no phone exclusion
    /// keyword. In a phone category, a title naming the phone is enough as
    /// long as the title itself carries no exclusion keyword.
    #[must_use]
    pub fn is_phone(&self, product: &Product) -> bool {
        let rules = &self.rules;
        let title = product.title.to_lowercase();
        let description = product.description.to_lowercase();
        let category = product.category.to_lowercase();

        let title_names_phone = contains_any(&title, &rules.phone_keywords);
        let title_names_accessory = contains_any(&title, &rules.phone_exclusion_keywords);
        if title_names_phone && !title_names_accessory && rules.phone_categories.contains(&category)
        {
            return true;
        }

        (title_names_phone || contains_any(&description, &rules.phone_keywords))
            && !title_names_accessory
            && !contains_any(&description, &rules.phone_exclusion_keywords)
    }

    /// An electronic accessory.
    ///
    /// Watches and clocks never qualify. In a phone category an explicit
    /// accessory keyword is required. Elsewhere the product must be
    /// electronic, carry an accessory keyword, and be neither a recognizable
    /// handset nor clothing, food, furniture or cosmetics.
    #[must_use]
    pub fn is_accessory(&self, product: &Product) -> bool {
        let rules = &self.rules;
        let title = product.title.to_lowercase();
        let description = product.description.to_lowercase();
        let category = product.category.to_lowercase();
        let in_any = |keywords: &[String]| {
            contains_any(&title, keywords) || contains_any(&description, keywords)
        };

        if in_any(&rules.watch_keywords) || contains_any(&category, &rules.watch_keywords) {
            return false;
        }

        if rules.phone_categories.contains(&category) {
            return in_any(&rules.handset_accessory_keywords);
        }

        if self.is_handset_title(&title) {
            return false;
        }

        if in_any(&rules.excluded_keywords) || contains_any(&category, &rules.excluded_keywords) {
            return false;
        }

        self.is_electronic(product) && in_any(&rules.accessory_keywords)
    }

    fn is_handset_title(&self, title: &str) -> bool {
        self.rules.handset_brands.iter().any(|brand| {
            contains_any(title, &brand.names)
                && !contains_any(title, &brand.exempt_keywords)
                && (!brand.requires_model_pattern || self.rules.handset_pattern.is_match(title))
        })
    }
}

fn lowercase_all(table: &mut [String]) {
    for entry in table.iter_mut() {
        *entry = entry.to_lowercase();
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle.as_str()))
}
