//! Terminal views.
//!
//! Each view reads the catalog state or an account record and writes plain
//! text to the given writer.

use std::io::{self, Write};

use shopfront_core::{CatalogOperation, RequestStatus, page_count};
use shopfront_storefront::catalog::{ProductDetail, ProductSummary};
use shopfront_storefront::models::UserRecord;
use shopfront_storefront::routes::Route;
use shopfront_storefront::store::CatalogState;

const MAX_DESCRIPTION: usize = 80;

/// Write the status line for an operation that has not succeeded.
///
/// Returns `true` when the caller should render the payload.
fn status_line(
    out: &mut impl Write,
    state: &CatalogState,
    operation: CatalogOperation,
) -> io::Result<bool> {
    match state.status.get(operation) {
        RequestStatus::Loading => {
            writeln!(out, "Loading...")?;
            Ok(false)
        }
        RequestStatus::Failed => {
            let message = state
                .errors
                .get(operation)
                .map_or("Error occurred", |err| err.message.as_str());
            writeln!(out, "Error: {message}")?;
            Ok(false)
        }
        RequestStatus::Idle | RequestStatus::Succeeded => Ok(true),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut.trim_end())
}

fn summary_line(out: &mut impl Write, product: &ProductSummary) -> io::Result<()> {
    writeln!(
        out,
        "#{:<4} {}  {}  ({:.1}/5)  [{}]",
        product.id.as_u64(),
        product.title,
        product.price,
        product.rating,
        product.category
    )?;
    writeln!(out, "      {}", truncate(&product.description, MAX_DESCRIPTION))
}

/// Product listing with the pagination footer.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn product_list(
    out: &mut impl Write,
    state: &CatalogState,
    page: u32,
    limit: u32,
) -> io::Result<()> {
    if !status_line(out, state, CatalogOperation::ProductList)? {
        return Ok(());
    }

    let listing = &state.product_list;
    if listing.products.is_empty() {
        return writeln!(out, "No products found.");
    }

    for product in &listing.products {
        summary_line(out, product)?;
    }

    let pages = page_count(listing.total, limit);
    writeln!(out)?;
    writeln!(
        out,
        "Page {page} of {pages} ({} products, {limit} per page)",
        listing.total
    )
}

/// Category names, one per line.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn categories(out: &mut impl Write, state: &CatalogState) -> io::Result<()> {
    if !status_line(out, state, CatalogOperation::Categories)? {
        return Ok(());
    }
    if state.categories.is_empty() {
        return writeln!(out, "No categories.");
    }
    for category in &state.categories {
        writeln!(out, "{category}")?;
    }
    Ok(())
}

/// Full product detail page.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn product_detail(out: &mut impl Write, state: &CatalogState) -> io::Result<()> {
    if !status_line(out, state, CatalogOperation::ProductDetail)? {
        return Ok(());
    }
    let Some(product) = state.product_detail.as_ref() else {
        return writeln!(out, "Product Title Not Available");
    };
    detail_body(out, product)
}

fn detail_body(out: &mut impl Write, product: &ProductDetail) -> io::Result<()> {
    writeln!(out, "{}", product.title)?;
    writeln!(out, "Rating: {:.1}/5", product.rating)?;
    if let Some(image) = product.hero_image() {
        writeln!(out, "Image: {image}")?;
    }
    writeln!(out)?;
    writeln!(out, "{}", product.description)?;
    writeln!(out)?;

    if product.discount_percentage > 0.0 {
        writeln!(
            out,
            "Price: {} (was {}, {:.2}% off)",
            product.price,
            product.price_before_discount(),
            product.discount_percentage
        )?;
    } else {
        writeln!(out, "Price: {}", product.price)?;
    }
    writeln!(out, "Brand: {}", product.brand())?;
    writeln!(out, "Category: {}", product.category)?;
    writeln!(out, "SKU: {}", product.sku())?;
    writeln!(
        out,
        "Availability: {} ({} in stock)",
        product
            .availability_status
            .as_deref()
            .unwrap_or(if product.in_stock() { "In Stock" } else { "Out of Stock" }),
        product.stock
    )?;
    if let Some(minimum) = product.minimum_order_quantity {
        writeln!(out, "Minimum order: {minimum}")?;
    }
    if !product.tags.is_empty() {
        writeln!(out, "Tags: {}", product.tags.join(", "))?;
    }
    if let Some(weight) = product.weight {
        writeln!(out, "Weight: {weight}")?;
    }
    let dimensions = &product.dimensions;
    writeln!(
        out,
        "Dimensions: {} x {} x {}",
        dimensions.width, dimensions.height, dimensions.depth
    )?;
    writeln!(out, "Warranty: {}", product.warranty_information())?;
    writeln!(out, "Shipping: {}", product.shipping_information())?;
    writeln!(out, "Returns: {}", product.return_policy())?;
    writeln!(
        out,
        "Barcode: {}",
        product.meta.barcode.as_deref().unwrap_or("N/A")
    )?;

    writeln!(out)?;
    if product.reviews.is_empty() {
        return writeln!(out, "No reviews yet.");
    }
    writeln!(out, "Reviews ({}):", product.reviews.len())?;
    for review in &product.reviews {
        let date = review
            .date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        writeln!(
            out,
            "  {:.0}/5  {}  {date}",
            review.rating, review.reviewer_name
        )?;
        writeln!(out, "        {}", review.comment)?;
    }
    Ok(())
}

/// Account summary for the logged-in user, or a sign-in hint.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn account(out: &mut impl Write, user: Option<&UserRecord>) -> io::Result<()> {
    let Some(user) = user else {
        return writeln!(out, "Not logged in. Sign in at {}", Route::Login);
    };
    writeln!(out, "[{}] {}", user.initials(), user.full_name())?;
    writeln!(out, "Email: {}", user.email)?;
    writeln!(out, "Mobile: {}", user.mobile)
}

/// Fields of a form view, with current values where known.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn form(out: &mut impl Write, route: &Route, user: Option<&UserRecord>) -> io::Result<()> {
    writeln!(out, "{}", route.title())?;
    let current = |value: fn(&UserRecord) -> String| user.map(value).unwrap_or_default();
    let fields: Vec<(&str, String)> = match route {
        Route::Login => vec![("email", String::new()), ("password", String::new())],
        Route::Signup => [
            "first-name",
            "last-name",
            "email",
            "mobile",
            "password",
            "confirm-password",
        ]
        .into_iter()
        .map(|flag| (flag, String::new()))
        .collect(),
        Route::Profile => vec![
            ("first-name", current(|u| u.first_name.clone())),
            ("last-name", current(|u| u.last_name.clone())),
            ("email", current(|u| u.email.to_string())),
            ("mobile", current(|u| u.mobile.to_string())),
        ],
        Route::ChangePassword => ["current", "new", "confirm"]
            .into_iter()
            .map(|flag| (flag, String::new()))
            .collect(),
        _ => Vec::new(),
    };
    for (flag, value) in fields {
        if value.is_empty() {
            writeln!(out, "  --{flag}")?;
        } else {
            writeln!(out, "  --{flag} (currently {value})")?;
        }
    }
    Ok(())
}

/// The not-found page.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn not_found(out: &mut impl Write, path: &str) -> io::Result<()> {
    writeln!(out, "404 - Page Not Found: {path}")?;
    writeln!(out, "Back to the catalog: {}", Route::Catalog)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopfront_core::{Email, Mobile, Price, ProductId};
    use shopfront_storefront::catalog::{ProductPage, RemoteError};
    use shopfront_storefront::store::{Action, reduce};

    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn summary(id: u64, title: &str) -> ProductSummary {
        ProductSummary {
            id: ProductId::new(id),
            title: title.to_string(),
            description: "A product".to_string(),
            price: Price::from_cents(999),
            rating: 4.56,
            category: "beauty".to_string(),
            thumbnail: String::new(),
            discount_percentage: None,
            stock: None,
            brand: None,
        }
    }

    #[test]
    fn test_product_list_footer() {
        let mut state = CatalogState::default();
        reduce(
            &mut state,
            Action::ProductListFulfilled(ProductPage {
                products: vec![summary(1, "Mascara"), summary(2, "Lipstick")],
                total: 35,
                skip: 0,
                limit: 10,
            }),
        );

        let text = render(|out| product_list(out, &state, 1, 10));
        assert!(text.contains("#1    Mascara  $9.99  (4.6/5)  [beauty]"));
        assert!(text.contains("Page 1 of 4 (35 products, 10 per page)"));
    }

    #[test]
    fn test_product_list_failed_shows_message() {
        let mut state = CatalogState::default();
        reduce(
            &mut state,
            Action::ProductListRejected(RemoteError {
                status: 410,
                message: "Request failed with status code 500".to_string(),
                errors: Vec::new(),
            }),
        );
        let text = render(|out| product_list(out, &state, 1, 10));
        assert_eq!(text, "Error: Request failed with status code 500\n");
    }

    #[test]
    fn test_product_list_loading_and_empty() {
        let mut state = CatalogState::default();
        reduce(&mut state, Action::ProductListPending);
        assert_eq!(render(|out| product_list(out, &state, 1, 10)), "Loading...\n");

        reduce(&mut state, Action::ProductListFulfilled(ProductPage::default()));
        assert_eq!(
            render(|out| product_list(out, &state, 1, 10)),
            "No products found.\n"
        );
    }

    #[test]
    fn test_categories() {
        let mut state = CatalogState::default();
        reduce(
            &mut state,
            Action::CategoriesFulfilled(vec!["beauty".to_string(), "laptops".to_string()]),
        );
        assert_eq!(render(|out| categories(out, &state)), "beauty\nlaptops\n");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer sentence", 10), "a much...");
    }

    #[test]
    fn test_account_view() {
        let user = UserRecord {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: Email::parse("jane@example.com").unwrap(),
            mobile: Mobile::parse("0123456789").unwrap(),
            password: "envelope".to_string(),
        };
        let text = render(|out| account(out, Some(&user)));
        assert!(text.starts_with("[JD] Jane Doe\n"));
        assert!(!text.contains("envelope"));

        let text = render(|out| account(out, None));
        assert_eq!(text, "Not logged in. Sign in at /signin\n");
    }

    #[test]
    fn test_profile_form_prefills_current_values() {
        let user = UserRecord {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: Email::parse("jane@example.com").unwrap(),
            mobile: Mobile::parse("0123456789").unwrap(),
            password: "envelope".to_string(),
        };
        let text = render(|out| form(out, &Route::Profile, Some(&user)));
        assert!(text.starts_with("Profile Update\n"));
        assert!(text.contains("  --email (currently jane@example.com)\n"));

        let text = render(|out| form(out, &Route::Login, None));
        assert_eq!(text, "Login\n  --email\n  --password\n");
    }

    #[test]
    fn test_not_found() {
        let text = render(|out| not_found(out, "/cart"));
        assert!(text.starts_with("404 - Page Not Found: /cart\n"));
    }
}
