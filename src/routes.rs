//! Named routes and HTTP-like methods.
//!
//! Pages receive a [`RouteTable`] at construction and resolve the endpoints
//! they submit to. The resolved path is an opaque string to everything except
//! the backend.

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Errors raised while resolving a route.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("unknown route: {0}")]
    UnknownRoute(String),
}

/// Request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        };
        f.write_str(s)
    }
}

/// Route name → path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    routes: IndexMap<String, String>,
}

const DEFAULT_ROUTES: &[(&str, &str)] = &[
    ("home", "/"),
    ("dashboard", "/dashboard"),
    ("login", "/login"),
    ("register", "/register"),
    ("profile.edit", "/settings/profile"),
    ("profile.update", "/settings/profile"),
    ("password.edit", "/settings/password"),
    ("password.update", "/settings/password"),
    ("appearance", "/settings/appearance"),
    ("verification.send", "/email/verification-notification"),
];

impl Default for RouteTable {
    fn default() -> Self {
        DEFAULT_ROUTES
            .iter()
            .fold(Self::empty(), |table, (name, path)| table.with_route(*name, *path))
    }
}

impl RouteTable {
    /// Creates an empty table.
    pub fn empty() -> Self {
        Self {
            routes: IndexMap::new(),
        }
    }

    /// Adds or replaces a route.
    pub fn with_route(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.routes.insert(name.into(), path.into());
        self
    }

    /// Applies overrides on top of this table. Later entries win.
    pub fn with_overrides(self, overrides: &BTreeMap<String, String>) -> Self {
        overrides
            .iter()
            .fold(self, |table, (name, path)| table.with_route(name.as_str(), path.as_str()))
    }

    /// Returns the path registered under `name`.
    pub fn resolve(&self, name: &str) -> Result<&str, RouteError> {
        self.routes
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| RouteError::UnknownRoute(name.to_string()))
    }

    /// Returns the number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if no route is registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
