//! # Route Files
//!
//! Declarative route tables for the CLI and for services that prefer
//! configuration over code. Every handler is a `Type@method` reference, so a
//! route file is always dispatched through a
//! [`HandlerResolver`](crate::handlers::HandlerResolver).
//!
//! ## Format
//!
//! YAML (`.yaml`/`.yml`), JSON (`.json`) or TOML (`.toml`), chosen by file
//! extension:
//!
//! ```yaml
//! base_path: /api
//! not_found: Errors@notFound
//! before:
//!   - methods: "*"
//!     pattern: /admin/.*
//!     handler: Auth@check
//! routes:
//!   - methods: GET
//!     pattern: /users/{id}
//!     handler: Users@show
//!   - methods: [PUT, PATCH]
//!     pattern: /users/{id}
//!     handler: Users@update
//! groups:
//!   - prefix: /v1
//!     routes:
//!       - pattern: /health
//!         handler: Health@check
//! ```
//!
//! `methods` defaults to `*`. Within a file or group, `before` entries are
//! registered first, then `routes`, then nested `groups`.

use crate::error::RouterError;
use crate::method::Methods;
use crate::router::{Registrar, RouteGroup, Router};
use crate::runtime_config::RuntimeConfig;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// A single method name, a `|`-separated list, `*`, or a list of names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MethodSpec {
    One(String),
    Many(Vec<String>),
}

impl Default for MethodSpec {
    fn default() -> Self {
        MethodSpec::One("*".to_string())
    }
}

impl From<&MethodSpec> for Methods {
    fn from(value: &MethodSpec) -> Self {
        match value {
            MethodSpec::One(s) => Methods::from(s.as_str()),
            MethodSpec::Many(list) => Methods::from(list.clone()),
        }
    }
}

/// One route or before-middleware binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    #[serde(default)]
    pub methods: MethodSpec,
    pub pattern: String,
    pub handler: String,
}

/// Bindings registered under a shared prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupEntry {
    pub prefix: String,
    #[serde(default)]
    pub before: Vec<RouteEntry>,
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
    #[serde(default)]
    pub groups: Vec<GroupEntry>,
}

/// Top-level route file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteFile {
    #[serde(default)]
    pub base_path: Option<String>,
    #[serde(default)]
    pub not_found: Option<String>,
    #[serde(default)]
    pub before: Vec<RouteEntry>,
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
    #[serde(default)]
    pub groups: Vec<GroupEntry>,
}

/// Serialization format of a route file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteFileFormat {
    Yaml,
    Json,
    Toml,
}

impl RouteFileFormat {
    /// Pick a format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "yaml" | "yml" => Ok(RouteFileFormat::Yaml),
            "json" => Ok(RouteFileFormat::Json),
            "toml" => Ok(RouteFileFormat::Toml),
            other => bail!(
                "unsupported route file extension '{}' for {}",
                other,
                path.display()
            ),
        }
    }
}

impl RouteFile {
    /// Read and parse a route file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = RouteFileFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read route file {}", path.display()))?;
        let file = Self::parse(&content, format)
            .with_context(|| format!("failed to parse route file {}", path.display()))?;
        info!(
            path = %path.display(),
            routes = file.routes.len(),
            groups = file.groups.len(),
            before = file.before.len(),
            "Route file loaded"
        );
        Ok(file)
    }

    /// Parse route file content in the given format
    pub fn parse(content: &str, format: RouteFileFormat) -> Result<Self> {
        let file = match format {
            RouteFileFormat::Yaml => serde_yaml::from_str(content)?,
            RouteFileFormat::Json => serde_json::from_str(content)?,
            RouteFileFormat::Toml => toml::from_str(content)?,
        };
        Ok(file)
    }

    /// Build a router with default runtime settings
    pub fn build_router<T>(&self) -> Result<Router<T>, RouterError> {
        self.build_router_with_config(&RuntimeConfig::default())
    }

    /// Build a router; a `base_path` in the file overrides the one in `config`
    pub fn build_router_with_config<T>(
        &self,
        config: &RuntimeConfig,
    ) -> Result<Router<T>, RouterError> {
        let mut router = Router::with_config(config);
        if let Some(base_path) = &self.base_path {
            router.set_base_path(base_path);
        }
        if let Some(not_found) = &self.not_found {
            router.set_route_not_found_handler(not_found.as_str())?;
        }
        register_entries::<T, _>(&mut router, &self.before, &self.routes)?;
        for group in &self.groups {
            router.group(&group.prefix, |g| register_group(g, group))?;
        }
        Ok(router)
    }
}

fn register_entries<T, R: Registrar<T>>(
    registrar: &mut R,
    before: &[RouteEntry],
    routes: &[RouteEntry],
) -> Result<(), RouterError> {
    for entry in before {
        registrar.before(&entry.methods, &entry.pattern, entry.handler.as_str())?;
    }
    for entry in routes {
        registrar.add_route(&entry.methods, &entry.pattern, entry.handler.as_str())?;
    }
    Ok(())
}

fn register_group<T>(group: &mut RouteGroup<'_, T>, entry: &GroupEntry) -> Result<(), RouterError> {
    register_entries::<T, _>(group, &entry.before, &entry.routes)?;
    for child in &entry.groups {
        group.group(&child.prefix, |nested| register_group(nested, child))?;
    }
    Ok(())
}
