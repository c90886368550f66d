//! Routes between the customer views and the static header links.

use std::fmt;
use std::str::FromStr;

use super::customer::{CustomerId, CustomerIdValidationError};

/// A navigable view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// Customer list, `/`.
    List,
    /// Create form, `/add`.
    Create,
    /// Edit form for one customer, `/edit/{id}`.
    Edit(CustomerId),
}

impl Route {
    /// Path for this route.
    ///
    /// # Examples
    /// ```
    /// use frontend::domain::{CustomerId, Route};
    ///
    /// let id = CustomerId::new("12").expect("valid id");
    /// assert_eq!(Route::Edit(id).path(), "/edit/12");
    /// assert_eq!(Route::Create.path(), "/add");
    /// ```
    pub fn path(&self) -> String {
        match self {
            Self::List => "/".to_owned(),
            Self::Create => "/add".to_owned(),
            Self::Edit(id) => format!("/edit/{id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Errors raised when parsing a path into a [`Route`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteParseError {
    /// No view is mounted at the path.
    #[error("no view is mounted at `{path}`")]
    Unknown { path: String },
    /// The edit path carries an unusable identifier.
    #[error("invalid customer id in `{path}`: {source}")]
    InvalidId {
        path: String,
        source: CustomerIdValidationError,
    },
}

impl FromStr for Route {
    type Err = RouteParseError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        match path {
            "/" | "" => Ok(Self::List),
            "/add" => Ok(Self::Create),
            _ => {
                let raw_id = path
                    .strip_prefix("/edit/")
                    .ok_or_else(|| RouteParseError::Unknown {
                        path: path.to_owned(),
                    })?;
                let id = CustomerId::new(raw_id).map_err(|source| RouteParseError::InvalidId {
                    path: path.to_owned(),
                    source,
                })?;
                Ok(Self::Edit(id))
            }
        }
    }
}

/// A link in the static application header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLink {
    /// Link text.
    pub label: &'static str,
    /// Whether the link is styled as the primary action.
    pub primary: bool,
}

/// Brand shown in the application header.
pub const HEADER_BRAND: &str = "Customer Service";

/// Header navigation, in display order.
pub fn header_links() -> [(HeaderLink, Route); 2] {
    [
        (
            HeaderLink {
                label: "All Customers",
                primary: false,
            },
            Route::List,
        ),
        (
            HeaderLink {
                label: "Add Customer",
                primary: true,
            },
            Route::Create,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/", Route::List)]
    #[case("/add", Route::Create)]
    #[case("/edit/17", Route::Edit(CustomerId::new("17").expect("valid id")))]
    fn parses_mounted_paths(#[case] path: &str, #[case] expected: Route) {
        let route: Route = path.parse().expect("route parses");
        assert_eq!(route, expected);
        assert_eq!(route.path(), path);
    }

    #[rstest]
    #[case("/customers")]
    #[case("/edit")]
    #[case("/delete/3")]
    fn rejects_unknown_paths(#[case] path: &str) {
        let error = path.parse::<Route>().expect_err("unknown path");
        assert!(matches!(error, RouteParseError::Unknown { .. }), "{error}");
    }

    #[test]
    fn rejects_edit_paths_with_nested_segments() {
        let error = "/edit/3/extra".parse::<Route>().expect_err("bad id");
        assert!(matches!(error, RouteParseError::InvalidId { .. }), "{error}");
    }

    #[test]
    fn header_links_point_at_list_and_create() {
        let routes = header_links().map(|(_, route)| route);
        assert_eq!(routes, [Route::List, Route::Create]);
    }
}
