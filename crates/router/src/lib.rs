//! `rhc-router`: client-side routing with authentication and role guards.
//!
//! Route definitions carry a [`RouteAccessRule`]; the [`NavigationGuard`]
//! decides every transition synchronously from the current session, and the
//! [`Router`] runs it for pushes, replaces and history traversal alike.

pub mod guard;
pub mod router;
pub mod rule;
pub mod table;

pub use guard::{GuardDecision, NavigationGuard, RedirectReason};
pub use router::{Navigation, NavigationError, Router, SessionSource};
pub use rule::{RouteAccessRule, RouteConfigError};
pub use table::{ResolvedRoute, RouteDefinition, RouteTable};

/// Path of the login view.
pub const LOGIN_PATH: &str = "/login";

/// Path of the home view.
pub const HOME_PATH: &str = "/";
