//! Application state store for catalog data.
//!
//! One [`CatalogState`] holds the current listing page, the category names,
//! the product detail and a [`RequestStatus`] per remote operation. It changes
//! only through [`Action`]s applied by [`reduce`]:
//!
//! - `*Pending` sets the operation's status to `Loading`
//! - `*Fulfilled` replaces the payload wholesale and sets `Succeeded`
//! - `*Rejected` clears the payload to empty and sets `Failed`
//!
//! [`CatalogStore`] is the shared handle the controller and the view layer
//! use; it is injected, never global.

mod controller;

use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use shopfront_core::{CatalogOperation, RequestStatus};
use tracing::debug;

use crate::catalog::{ProductDetail, ProductPage, RemoteError};

pub use controller::CatalogController;

/// Status slot for each remote operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusSlots {
    pub product_list: RequestStatus,
    pub categories: RequestStatus,
    pub product_detail: RequestStatus,
}

impl StatusSlots {
    /// Status of one operation.
    #[must_use]
    pub const fn get(&self, operation: CatalogOperation) -> RequestStatus {
        match operation {
            CatalogOperation::ProductList => self.product_list,
            CatalogOperation::Categories => self.categories,
            CatalogOperation::ProductDetail => self.product_detail,
        }
    }

    fn slot_mut(&mut self, operation: CatalogOperation) -> &mut RequestStatus {
        match operation {
            CatalogOperation::ProductList => &mut self.product_list,
            CatalogOperation::Categories => &mut self.categories,
            CatalogOperation::ProductDetail => &mut self.product_detail,
        }
    }
}

/// Last failure per remote operation, cleared when the operation next starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorSlots {
    pub product_list: Option<RemoteError>,
    pub categories: Option<RemoteError>,
    pub product_detail: Option<RemoteError>,
}

impl ErrorSlots {
    /// Last failure of one operation.
    #[must_use]
    pub const fn get(&self, operation: CatalogOperation) -> Option<&RemoteError> {
        match operation {
            CatalogOperation::ProductList => self.product_list.as_ref(),
            CatalogOperation::Categories => self.categories.as_ref(),
            CatalogOperation::ProductDetail => self.product_detail.as_ref(),
        }
    }

    fn slot_mut(&mut self, operation: CatalogOperation) -> &mut Option<RemoteError> {
        match operation {
            CatalogOperation::ProductList => &mut self.product_list,
            CatalogOperation::Categories => &mut self.categories,
            CatalogOperation::ProductDetail => &mut self.product_detail,
        }
    }
}

/// Everything the view layer renders catalog pages from.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogState {
    pub product_list: ProductPage,
    pub categories: Vec<String>,
    pub product_detail: Option<ProductDetail>,
    pub status: StatusSlots,
    pub errors: ErrorSlots,
}

/// A state transition.
#[derive(Debug, Clone)]
pub enum Action {
    ProductListPending,
    ProductListFulfilled(ProductPage),
    ProductListRejected(RemoteError),
    CategoriesPending,
    CategoriesFulfilled(Vec<String>),
    CategoriesRejected(RemoteError),
    ProductDetailPending,
    ProductDetailFulfilled(Box<ProductDetail>),
    ProductDetailRejected(RemoteError),
    /// Back to the initial state.
    Reset,
}

impl Action {
    /// The operation this action belongs to (`None` for `Reset`).
    #[must_use]
    pub const fn operation(&self) -> Option<CatalogOperation> {
        match self {
            Self::ProductListPending
            | Self::ProductListFulfilled(_)
            | Self::ProductListRejected(_) => Some(CatalogOperation::ProductList),
            Self::CategoriesPending | Self::CategoriesFulfilled(_) | Self::CategoriesRejected(_) => {
                Some(CatalogOperation::Categories)
            }
            Self::ProductDetailPending
            | Self::ProductDetailFulfilled(_)
            | Self::ProductDetailRejected(_) => Some(CatalogOperation::ProductDetail),
            Self::Reset => None,
        }
    }

    /// Short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ProductListPending | Self::CategoriesPending | Self::ProductDetailPending => {
                "pending"
            }
            Self::ProductListFulfilled(_)
            | Self::CategoriesFulfilled(_)
            | Self::ProductDetailFulfilled(_) => "fulfilled",
            Self::ProductListRejected(_)
            | Self::CategoriesRejected(_)
            | Self::ProductDetailRejected(_) => "rejected",
            Self::Reset => "reset",
        }
    }
}

/// Apply one action to the state.
pub fn reduce(state: &mut CatalogState, action: Action) {
    use CatalogOperation as Op;

    match action {
        Action::Reset => *state = CatalogState::default(),

        Action::ProductListPending => begin(state, Op::ProductList),
        Action::ProductListFulfilled(page) => {
            state.product_list = page;
            succeed(state, Op::ProductList);
        }
        Action::ProductListRejected(err) => {
            state.product_list = ProductPage::default();
            fail(state, Op::ProductList, err);
        }

        Action::CategoriesPending => begin(state, Op::Categories),
        Action::CategoriesFulfilled(categories) => {
            state.categories = categories;
            succeed(state, Op::Categories);
        }
        Action::CategoriesRejected(err) => {
            state.categories = Vec::new();
            fail(state, Op::Categories, err);
        }

        Action::ProductDetailPending => begin(state, Op::ProductDetail),
        Action::ProductDetailFulfilled(detail) => {
            state.product_detail = Some(*detail);
            succeed(state, Op::ProductDetail);
        }
        Action::ProductDetailRejected(err) => {
            state.product_detail = None;
            fail(state, Op::ProductDetail, err);
        }
    }
}

fn begin(state: &mut CatalogState, operation: CatalogOperation) {
    *state.errors.slot_mut(operation) = None;
    *state.status.slot_mut(operation) = RequestStatus::Loading;
}

fn succeed(state: &mut CatalogState, operation: CatalogOperation) {
    *state.status.slot_mut(operation) = RequestStatus::Succeeded;
}

fn fail(state: &mut CatalogState, operation: CatalogOperation, err: RemoteError) {
    *state.errors.slot_mut(operation) = Some(err);
    *state.status.slot_mut(operation) = RequestStatus::Failed;
}

/// Shared, cloneable handle to the catalog state.
#[derive(Clone, Default)]
pub struct CatalogStore {
    state: Arc<RwLock<CatalogState>>,
}

impl CatalogStore {
    /// Create a store holding the initial state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an action.
    pub fn dispatch(&self, action: Action) {
        debug!(
            operation = ?action.operation(),
            action = action.name(),
            "Dispatching catalog action"
        );
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        reduce(&mut state, action);
    }

    /// A copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> CatalogState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Current status of one operation.
    #[must_use]
    pub fn status(&self, operation: CatalogOperation) -> RequestStatus {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .status
            .get(operation)
    }
}
