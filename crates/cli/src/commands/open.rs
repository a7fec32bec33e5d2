//! Path navigation: render whatever view a route resolves to.

use std::io::Write;

use shopfront_storefront::error::add_breadcrumb;
use shopfront_storefront::routes::Route;
use shopfront_storefront::state::AppState;
use tracing::{debug, instrument};

use super::CommandError;
use super::catalog::{self, ListingArgs};
use crate::render;

/// Open the view for `path`.
///
/// Views that need a session show the login form instead when logged out.
///
/// # Errors
///
/// Returns `CommandError` if the view's data cannot be loaded or output fails.
#[instrument(skip(state, out))]
pub async fn open(state: &AppState, path: &str, out: &mut impl Write) -> Result<(), CommandError> {
    let route = Route::parse(path);
    add_breadcrumb("navigation", "Opened view", Some(&[("path", path)]));

    let user = state.accounts().current_user()?;
    if route.requires_session() && user.is_none() {
        debug!(%route, "No session, redirecting to login");
        writeln!(out, "Sign in required, redirecting to {}", Route::Login)?;
        render::form(out, &Route::Login, None)?;
        return Ok(());
    }

    match &route {
        Route::Catalog => catalog::products(state, &ListingArgs::default(), out).await,
        Route::ProductDetail(id) => catalog::product(state, *id, out).await,
        Route::Login | Route::Signup | Route::Profile | Route::ChangePassword => {
            render::form(out, &route, user.as_ref())?;
            Ok(())
        }
        Route::NotFound(path) => {
            render::not_found(out, path)?;
            Ok(())
        }
    }
}
