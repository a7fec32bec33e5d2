//! Domain types for the remote catalog.
//!
//! Field names follow the catalog's camelCase JSON. Everything beyond the
//! summary fields is optional on the wire; display fallbacks live on the
//! accessor methods so the raw payload stays faithful.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shopfront_core::{Price, ProductId};

// =============================================================================
// Listing Types
// =============================================================================

/// A product as it appears in a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub discount_percentage: Option<f64>,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub brand: Option<String>,
}

/// One page of a listing, search or category response.
///
/// `Default` is the empty page a failed request leaves behind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<ProductSummary>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
}

impl ProductPage {
    /// Whether the page holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Filter and pagination for a listing request.
///
/// A non-empty `query` wins over `category`; only one filter applies at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub skip: u64,
    pub limit: u32,
    pub category: Option<String>,
    pub query: Option<String>,
}

/// Which endpoint a [`ProductQuery`] resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingRoute<'a> {
    /// Full-text search; category is ignored.
    Search(&'a str),
    /// Category listing.
    Category(&'a str),
    /// Plain paginated listing.
    All,
}

impl ProductQuery {
    /// Query for a 1-based page with no filters.
    #[must_use]
    pub fn page(page: u32, limit: u32) -> Self {
        Self {
            skip: shopfront_core::skip_for_page(page, limit),
            limit,
            category: None,
            query: None,
        }
    }

    /// Resolve the filter precedence: search, then category, then everything.
    #[must_use]
    pub fn route(&self) -> ListingRoute<'_> {
        if let Some(q) = self.query.as_deref().filter(|q| !q.is_empty()) {
            return ListingRoute::Search(q);
        }
        if let Some(c) = self.category.as_deref().filter(|c| !c.is_empty()) {
            return ListingRoute::Category(c);
        }
        ListingRoute::All
    }
}

// =============================================================================
// Detail Types
// =============================================================================

/// A customer review on a product detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default)]
    pub reviewer_name: String,
    #[serde(default)]
    pub reviewer_email: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// Physical dimensions in centimetres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub depth: f64,
}

/// Barcode and bookkeeping metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMeta {
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub qr_code: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Everything the catalog knows about one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub dimensions: Dimensions,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub warranty_information: Option<String>,
    #[serde(default)]
    pub shipping_information: Option<String>,
    #[serde(default)]
    pub availability_status: Option<String>,
    #[serde(default)]
    pub return_policy: Option<String>,
    #[serde(default)]
    pub minimum_order_quantity: Option<u32>,
    #[serde(default)]
    pub meta: ProductMeta,
}

impl ProductDetail {
    /// Brand, or a placeholder when the catalog has none.
    #[must_use]
    pub fn brand(&self) -> &str {
        self.brand.as_deref().unwrap_or("Unknown Brand")
    }

    /// Stock keeping unit, or `N/A`.
    #[must_use]
    pub fn sku(&self) -> &str {
        self.sku.as_deref().unwrap_or("N/A")
    }

    #[must_use]
    pub fn warranty_information(&self) -> &str {
        self.warranty_information
            .as_deref()
            .unwrap_or("No warranty information available.")
    }

    #[must_use]
    pub fn shipping_information(&self) -> &str {
        self.shipping_information
            .as_deref()
            .unwrap_or("No shipping information available.")
    }

    #[must_use]
    pub fn return_policy(&self) -> &str {
        self.return_policy
            .as_deref()
            .unwrap_or("No return policy available.")
    }

    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Image shown first: the first gallery image, else the thumbnail.
    #[must_use]
    pub fn hero_image(&self) -> Option<&str> {
        self.images
            .first()
            .map(String::as_str)
            .or_else(|| Some(self.thumbnail.as_str()).filter(|t| !t.is_empty()))
    }

    /// Price before the advertised discount.
    #[must_use]
    pub fn price_before_discount(&self) -> Price {
        self.price.before_discount(self.discount_percentage)
    }
}
