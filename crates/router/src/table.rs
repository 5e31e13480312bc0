//! Route table: definitions, path matching and load-time validation.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::rule::{RouteAccessRule, RouteConfigError};

/// One entry of the route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDefinition {
    /// Pattern such as `/payment/success`, `/clients/:id` or `/:rest(.*)*`.
    pub path: String,
    pub name: String,
    #[serde(default)]
    pub meta: RouteAccessRule,
    /// When set, the route is not a view: navigation continues at this path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl RouteDefinition {
    pub fn new(path: impl Into<String>, name: impl Into<String>, meta: RouteAccessRule) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            meta,
            redirect: None,
        }
    }

    pub fn redirect(path: impl Into<String>, name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            meta: RouteAccessRule::public(),
            redirect: Some(target.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
    CatchAll(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pattern {
    segments: Vec<Segment>,
}

impl Pattern {
    fn parse(path: &str) -> Result<Self, RouteConfigError> {
        let invalid = |reason: &str| RouteConfigError::InvalidPath {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        if !path.starts_with('/') {
            return Err(invalid("must start with '/'"));
        }

        let raw: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let mut segments = Vec::with_capacity(raw.len());
        for (i, seg) in raw.iter().enumerate() {
            let Some(param) = seg.strip_prefix(':') else {
                segments.push(Segment::Static((*seg).to_string()));
                continue;
            };
            if let Some(name) = param.strip_suffix("(.*)*") {
                if i + 1 != raw.len() {
                    return Err(invalid("catch-all parameter must be the last segment"));
                }
                if name.is_empty() {
                    return Err(invalid("catch-all parameter needs a name"));
                }
                segments.push(Segment::CatchAll(name.to_string()));
            } else if param.is_empty() || !param.chars().all(|c| c.is_alphanumeric() || c == '_') {
                return Err(invalid("parameter names must be alphanumeric"));
            } else {
                segments.push(Segment::Param(param.to_string()));
            }
        }
        Ok(Self { segments })
    }

    fn is_catch_all(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::CatchAll(_)))
    }

    fn matches(&self, parts: &[&str]) -> Option<BTreeMap<String, String>> {
        let mut params = BTreeMap::new();
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::CatchAll(name) => {
                    params.insert(name.clone(), parts[i.min(parts.len())..].join("/"));
                    return Some(params);
                }
                Segment::Static(expected) => {
                    if parts.get(i) != Some(&expected.as_str()) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let value = parts.get(i)?;
                    params.insert(name.clone(), (*value).to_string());
                }
            }
        }
        (parts.len() == self.segments.len()).then_some(params)
    }
}

/// Strip query string and fragment, collapse duplicate slashes and drop a
/// trailing slash.
pub fn normalize_path(path: &str) -> String {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let parts: Vec<&str> = path[..end].split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", parts.join("/"))
}

/// A matched route plus the parameters extracted from the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute<'a> {
    pub route: &'a RouteDefinition,
    pub path: String,
    pub params: BTreeMap<String, String>,
}

/// Ordered route table; the first matching definition wins.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<(RouteDefinition, Pattern)>,
}

impl RouteTable {
    /// Build and validate a table.
    pub fn new(routes: Vec<RouteDefinition>) -> Result<Self, RouteConfigError> {
        let mut compiled = Vec::with_capacity(routes.len());
        for route in routes {
            let pattern = Pattern::parse(&route.path)?;
            compiled.push((route, pattern));
        }
        let table = Self { routes: compiled };
        table.validate()?;
        Ok(table)
    }

    /// Load a table from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, RouteConfigError> {
        let routes: Vec<RouteDefinition> =
            serde_json::from_str(json).map_err(|e| RouteConfigError::Malformed(e.to_string()))?;
        Self::new(routes)
    }

    fn validate(&self) -> Result<(), RouteConfigError> {
        let mut names = HashSet::new();
        let mut paths = HashSet::new();
        let mut catch_all: Option<&str> = None;

        for (route, pattern) in &self.routes {
            route.meta.validate(&route.name)?;

            if !names.insert(route.name.as_str()) {
                return Err(RouteConfigError::DuplicateName(route.name.clone()));
            }
            if !paths.insert(normalize_path(&route.path)) {
                return Err(RouteConfigError::DuplicatePath(route.path.clone()));
            }
            if let Some(catch_all) = catch_all {
                return Err(RouteConfigError::ShadowedRoute {
                    catch_all: catch_all.to_string(),
                    shadowed: route.name.clone(),
                });
            }
            if pattern.is_catch_all() {
                catch_all = Some(route.name.as_str());
            }
        }

        for (route, _) in &self.routes {
            let Some(target) = &route.redirect else {
                continue;
            };
            let lands_on_view = self
                .resolve(target)
                .is_some_and(|resolved| resolved.route.redirect.is_none());
            if !lands_on_view {
                return Err(RouteConfigError::DanglingRedirect {
                    name: route.name.clone(),
                    target: target.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute<'_>> {
        let path = normalize_path(path);
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        self.routes.iter().find_map(|(route, pattern)| {
            pattern.matches(&parts).map(|params| ResolvedRoute {
                route,
                path: path.clone(),
                params,
            })
        })
    }

    pub fn get(&self, name: &str) -> Option<&RouteDefinition> {
        self.routes.iter().map(|(r, _)| r).find(|r| r.name == name)
    }

    pub fn routes(&self) -> impl Iterator<Item = &RouteDefinition> {
        self.routes.iter().map(|(r, _)| r)
    }

    /// The application's route table.
    pub fn standard() -> Result<Self, RouteConfigError> {
        let staff = ["admin", "ADMIN", "employee", "EMPLOYEE"];
        let routes = vec![
            RouteDefinition::new("/", "home", RouteAccessRule::public()),
            RouteDefinition::new("/login", "login", RouteAccessRule::guest_only()),
            RouteDefinition::new(
                "/admin",
                "admin-dashboard",
                RouteAccessRule::authenticated().with_roles(staff),
            ),
            RouteDefinition::new("/compras", "purchases-dashboard", RouteAccessRule::authenticated()),
            RouteDefinition::new("/accounting", "client-accounting", RouteAccessRule::authenticated()),
            RouteDefinition::new("/clientes", "client-portal", RouteAccessRule::authenticated()),
            RouteDefinition::new("/calendario", "calendar", RouteAccessRule::public()),
            RouteDefinition::new("/acceso-cliente", "client-access", RouteAccessRule::public()),
            RouteDefinition::new(
                "/acceso-rhc",
                "rhc-access",
                RouteAccessRule::authenticated().with_roles(staff),
            ),
            RouteDefinition::new("/payment/success", "payment-success", RouteAccessRule::public()),
            RouteDefinition::new("/payment/failure", "payment-failure", RouteAccessRule::public()),
            RouteDefinition::new("/payment/pending", "payment-pending", RouteAccessRule::public()),
            RouteDefinition::redirect("/:pathMatch(.*)*", "not-found", "/"),
        ];
        Self::new(routes)
    }
}
