//! Navigation routes.
//!
//! ```text
//! /              - Product catalog (listing, search, categories)
//! /product/{id}  - Product detail
//! /signin        - Login form
//! /signup        - Signup form
//! /profile       - Profile form (requires login)
//! /password      - Password change form (requires login)
//! *              - Not found
//! ```

use core::fmt;

use shopfront_core::ProductId;

/// A view the application can navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Catalog,
    ProductDetail(ProductId),
    Login,
    Signup,
    Profile,
    ChangePassword,
    /// Any other path, kept as given.
    NotFound(String),
}

impl Route {
    /// Resolve a path to a route.
    ///
    /// A query string, fragment or trailing slash is ignored. A product path
    /// whose id is not a number resolves to `NotFound`.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let trimmed = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');

        match trimmed {
            "" => Self::Catalog,
            "/signin" => Self::Login,
            "/signup" => Self::Signup,
            "/profile" => Self::Profile,
            "/password" => Self::ChangePassword,
            other => other
                .strip_prefix("/product/")
                .and_then(|id| id.parse::<ProductId>().ok())
                .map_or_else(|| Self::NotFound(path.to_string()), Self::ProductDetail),
        }
    }

    /// Views that send a logged-out user to [`Route::Login`] instead.
    #[must_use]
    pub const fn requires_session(&self) -> bool {
        matches!(self, Self::Profile | Self::ChangePassword)
    }

    /// Heading shown above the view.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Catalog => "Products",
            Self::ProductDetail(_) => "Product Detail",
            Self::Login => "Login",
            Self::Signup => "Signup",
            Self::Profile => "Profile Update",
            Self::ChangePassword => "Change Password",
            Self::NotFound(_) => "Page Not Found",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog => write!(f, "/"),
            Self::ProductDetail(id) => write!(f, "/product/{id}"),
            Self::Login => write!(f, "/signin"),
            Self::Signup => write!(f, "/signup"),
            Self::Profile => write!(f, "/profile"),
            Self::ChangePassword => write!(f, "/password"),
            Self::NotFound(path) => write!(f, "{path}"),
        }
    }
}
