//! Catalog commands: listing, categories and product detail.

use std::io::Write;

use clap::Args;
use shopfront_core::{DEFAULT_PAGE_SIZE, PAGE_SIZES, ProductId};
use shopfront_storefront::catalog::ProductQuery;
use shopfront_storefront::state::AppState;
use tracing::instrument;

use super::CommandError;
use crate::render;

/// Listing filters and pagination.
#[derive(Debug, Clone, Args)]
pub struct ListingArgs {
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Products per page (10, 20 or 30)
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, value_parser = parse_page_size)]
    pub limit: u32,

    /// Only products in this category (ignored when searching)
    #[arg(long)]
    pub category: Option<String>,

    /// Search text
    #[arg(long, short)]
    pub query: Option<String>,
}

impl Default for ListingArgs {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            category: None,
            query: None,
        }
    }
}

impl ListingArgs {
    fn to_query(&self) -> ProductQuery {
        ProductQuery {
            category: self.category.clone(),
            query: self.query.clone(),
            ..ProductQuery::page(self.page, self.limit)
        }
    }
}

fn parse_page_size(raw: &str) -> Result<u32, String> {
    let size: u32 = raw.parse().map_err(|e| format!("{e}"))?;
    if PAGE_SIZES.contains(&size) {
        Ok(size)
    } else {
        Err(format!("page size must be one of {PAGE_SIZES:?}"))
    }
}

/// List one page of products.
///
/// # Errors
///
/// Returns `CommandError` if the catalog request fails or output cannot be
/// written.
#[instrument(skip(state, out))]
pub async fn products(
    state: &AppState,
    args: &ListingArgs,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    state.catalog().load_products(&args.to_query()).await?;
    render::product_list(out, &state.store().snapshot(), args.page, args.limit)?;
    Ok(())
}

/// List the category names.
///
/// # Errors
///
/// Returns `CommandError` if the catalog request fails or output cannot be
/// written.
#[instrument(skip(state, out))]
pub async fn categories(state: &AppState, out: &mut impl Write) -> Result<(), CommandError> {
    state.catalog().load_categories().await?;
    render::categories(out, &state.store().snapshot())?;
    Ok(())
}

/// Show one product in full.
///
/// # Errors
///
/// Returns `CommandError` if the catalog request fails or output cannot be
/// written.
#[instrument(skip(state, out))]
pub async fn product(
    state: &AppState,
    id: ProductId,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    state.catalog().load_product(id).await?;
    render::product_detail(out, &state.store().snapshot())?;
    Ok(())
}
