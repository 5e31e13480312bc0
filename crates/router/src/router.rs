//! History-aware router.
//!
//! Every transition goes through [`Router::navigate`], so programmatic pushes,
//! replaces and back/forward traversal are all checked by the guard.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use rhc_auth::{Session, SessionManager};

use crate::guard::{GuardDecision, NavigationGuard, RedirectReason};
use crate::rule::RouteConfigError;
use crate::table::{RouteTable, normalize_path};

/// Upper bound on redirects followed for one navigation.
pub const MAX_REDIRECTS: usize = 8;

/// Read access to the current session, injected into the router.
pub trait SessionSource: Send + Sync {
    fn session(&self) -> Session;
}

impl SessionSource for SessionManager {
    fn session(&self) -> Session {
        self.snapshot()
    }
}

impl SessionSource for Session {
    fn session(&self) -> Session {
        self.clone()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("no route matches '{0}'")]
    NotFound(String),

    #[error("navigation to '{path}' exceeded {hops} redirects")]
    RedirectLoop { path: String, hops: usize },

    #[error("no history entry in that direction")]
    NoHistory,
}

/// Completed navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// Path as requested by the caller.
    pub requested: String,
    /// Path that was finally displayed.
    pub path: String,
    pub route_name: String,
    pub params: BTreeMap<String, String>,
    pub redirected: bool,
    /// Last guard denial on the way, if any.
    pub guard_reason: Option<RedirectReason>,
}

pub struct Router {
    table: RouteTable,
    guard: NavigationGuard,
    session: Arc<dyn SessionSource>,
    entries: Vec<String>,
    position: usize,
}

impl core::fmt::Debug for Router {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Router")
            .field("guard", &self.guard)
            .field("entries", &self.entries)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

impl Router {
    pub fn new(table: RouteTable, session: Arc<dyn SessionSource>) -> Self {
        Self::with_guard(table, NavigationGuard::default(), session)
    }

    pub fn with_guard(table: RouteTable, guard: NavigationGuard, session: Arc<dyn SessionSource>) -> Self {
        Self {
            table,
            guard,
            session,
            entries: Vec::new(),
            position: 0,
        }
    }

    /// Router over the application's route table.
    pub fn standard(session: Arc<dyn SessionSource>) -> Result<Self, RouteConfigError> {
        Ok(Self::new(RouteTable::standard()?, session))
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.position).map(String::as_str)
    }

    pub fn history(&self) -> &[String] {
        &self.entries
    }

    /// Resolve a navigation without touching history.
    pub fn navigate(&self, requested: &str) -> Result<Navigation, NavigationError> {
        let session = self.session.session();
        let mut target = normalize_path(requested);
        let mut redirected = false;
        let mut guard_reason = None;

        for _ in 0..=MAX_REDIRECTS {
            let resolved = self
                .table
                .resolve(&target)
                .ok_or_else(|| NavigationError::NotFound(target.clone()))?;

            if let Some(next) = &resolved.route.redirect {
                tracing::debug!(from = %target, to = %next, route = %resolved.route.name, "route redirect");
                target = normalize_path(next);
                redirected = true;
                continue;
            }

            match self.guard.check(&target, &resolved.route.meta, &session) {
                GuardDecision::Allow => {
                    return Ok(Navigation {
                        requested: requested.to_string(),
                        path: resolved.path,
                        route_name: resolved.route.name.clone(),
                        params: resolved.params,
                        redirected,
                        guard_reason,
                    });
                }
                GuardDecision::Redirect { to, reason } => {
                    target = normalize_path(&to);
                    redirected = true;
                    guard_reason = Some(reason);
                }
            }
        }

        tracing::warn!(requested, "redirect limit reached");
        Err(NavigationError::RedirectLoop {
            path: requested.to_string(),
            hops: MAX_REDIRECTS,
        })
    }

    /// Navigate and add a history entry, dropping any forward entries.
    pub fn push(&mut self, path: &str) -> Result<Navigation, NavigationError> {
        let navigation = self.navigate(path)?;
        if !self.entries.is_empty() {
            self.entries.truncate(self.position + 1);
        }
        self.entries.push(navigation.path.clone());
        self.position = self.entries.len() - 1;
        Ok(navigation)
    }

    /// Navigate and overwrite the current history entry.
    pub fn replace(&mut self, path: &str) -> Result<Navigation, NavigationError> {
        let navigation = self.navigate(path)?;
        match self.entries.get_mut(self.position) {
            Some(entry) => *entry = navigation.path.clone(),
            None => {
                self.entries.push(navigation.path.clone());
                self.position = 0;
            }
        }
        Ok(navigation)
    }

    pub fn back(&mut self) -> Result<Navigation, NavigationError> {
        if self.position == 0 || self.entries.is_empty() {
            return Err(NavigationError::NoHistory);
        }
        self.traverse(self.position - 1)
    }

    pub fn forward(&mut self) -> Result<Navigation, NavigationError> {
        if self.position + 1 >= self.entries.len() {
            return Err(NavigationError::NoHistory);
        }
        self.traverse(self.position + 1)
    }

    /// Re-run the guard for a history entry; a redirect rewrites that entry.
    fn traverse(&mut self, index: usize) -> Result<Navigation, NavigationError> {
        let navigation = self.navigate(&self.entries[index])?;
        self.position = index;
        self.entries[index] = navigation.path.clone();
        Ok(navigation)
    }
}
