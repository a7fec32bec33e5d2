//! Status enums for remote catalog operations.

use serde::{Deserialize, Serialize};

/// Progress of one remote catalog operation.
///
/// Each operation owns one slot; a transition overwrites the previous value
/// and no history is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// No request has been issued yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request to settle returned a payload.
    Succeeded,
    /// The last request to settle failed.
    Failed,
}

impl RequestStatus {
    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether the last request settled (either way).
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Loading => write!(f, "loading"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// The remote catalog operations tracked by the state store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogOperation {
    /// Paginated / filtered product listing.
    ProductList,
    /// Category names.
    Categories,
    /// A single product's detail.
    ProductDetail,
}

impl CatalogOperation {
    /// All operations, in display order.
    pub const ALL: [Self; 3] = [Self::ProductList, Self::Categories, Self::ProductDetail];
}

impl std::fmt::Display for CatalogOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProductList => write!(f, "product_list"),
            Self::Categories => write!(f, "categories"),
            Self::ProductDetail => write!(f, "product_detail"),
        }
    }
}
