use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use thiserror::Error;

use crate::models::ProductId;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RouteError {
    #[error("No route matches '{0}'")]
    Unknown(String),
}

/// Application states reachable through a URL fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Index,
    Item(ProductId),
    Summary(ProductId),
}

#[derive(Clone, Copy)]
enum RouteName {
    Index,
    Item,
    Summary,
}

lazy_static! {
    // "" , "item/:id", "summary/:id"
    static ref ROUTES: Vec<(Regex, RouteName)> = vec![
        (Regex::new(r"^$").unwrap(), RouteName::Index),
        (Regex::new(r"^item/([^/?]+)$").unwrap(), RouteName::Item),
        (Regex::new(r"^summary/([^/?]+)$").unwrap(), RouteName::Summary),
    ];
}

impl Route {
    /// Matches a fragment against the route table. A leading `#` is ignored.
    pub fn parse(fragment: &str) -> Result<Self, RouteError> {
        let path = fragment.trim();
        let path = path.strip_prefix('#').unwrap_or(path);

        for (pattern, name) in ROUTES.iter() {
            let Some(captures) = pattern.captures(path) else {
                continue;
            };
            let id = || ProductId::from(&captures[1]);
            return Ok(match name {
                RouteName::Index => Route::Index,
                RouteName::Item => Route::Item(id()),
                RouteName::Summary => Route::Summary(id()),
            });
        }

        Err(RouteError::Unknown(fragment.to_string()))
    }

    pub fn product_id(&self) -> Option<&ProductId> {
        match self {
            Route::Index => None,
            Route::Item(id) | Route::Summary(id) => Some(id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Index => write!(f, ""),
            Route::Item(id) => write!(f, "item/{}", id),
            Route::Summary(id) => write!(f, "summary/{}", id),
        }
    }
}
