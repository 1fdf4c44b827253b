use anyhow::{bail, Context};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use super::table::RouteTable;
use super::types::RouteDefinition;

/// Document formats a route source may be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteSourceFormat {
    Json,
    Yaml,
    Toml,
}

impl RouteSourceFormat {
    /// Pick a parser from the file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(RouteSourceFormat::Json),
            "yaml" | "yml" => Some(RouteSourceFormat::Yaml),
            "toml" => Some(RouteSourceFormat::Toml),
            _ => None,
        }
    }

    /// Parse `content` into a generic document, keeping mapping order. Blank
    /// content is an empty document.
    ///
    /// # Errors
    ///
    /// Returns the underlying parser's error.
    pub fn parse(self, content: &str) -> anyhow::Result<Value> {
        if content.trim().is_empty() {
            return Ok(Value::Null);
        }
        let value = match self {
            RouteSourceFormat::Json => serde_json::from_str(content)?,
            RouteSourceFormat::Yaml => serde_yaml::from_str(content)?,
            RouteSourceFormat::Toml => toml::from_str(content)?,
        };
        Ok(value)
    }
}

#[derive(Debug, Default, Deserialize)]
struct RouteDocument {
    #[serde(default)]
    routes: Option<Map<String, Value>>,
    #[serde(default)]
    controllers: Option<HashMap<String, String>>,
}

impl RouteTable {
    /// Load a route source file.
    ///
    /// A missing file yields an empty table, leaving resolution to the
    /// convention fallback.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, has an unknown extension, does not
    /// parse, or contains an invalid route definition.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "Route source not found, using convention routing only");
            return Ok(RouteTable::default());
        }
        let format = match RouteSourceFormat::from_path(path) {
            Some(f) => f,
            None => bail!("unsupported route source format: {}", path.display()),
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read route source {}", path.display()))?;
        let table = Self::parse_str(&content, format)
            .with_context(|| format!("failed to load route source {}", path.display()))?;
        info!(
            path = %path.display(),
            format = ?format,
            routes_count = table.len(),
            aliases_count = table.controller_aliases().len(),
            "Routing table loaded"
        );
        Ok(table)
    }

    /// Build a table from document text in the given format.
    ///
    /// # Errors
    ///
    /// See [`RouteTable::load`].
    pub fn parse_str(content: &str, format: RouteSourceFormat) -> anyhow::Result<Self> {
        Self::from_document(format.parse(content)?)
    }

    /// Build a table from an already parsed document. `null` is an empty table.
    ///
    /// # Errors
    ///
    /// Fails when a section has the wrong shape or a route is invalid.
    pub fn from_document(document: Value) -> anyhow::Result<Self> {
        if document.is_null() {
            return Ok(RouteTable::default());
        }
        let doc: RouteDocument =
            serde_json::from_value(document).context("route source has an invalid layout")?;

        let mut table = RouteTable::default();
        for (name, raw) in doc.routes.unwrap_or_default() {
            let route: RouteDefinition = serde_json::from_value(raw)
                .with_context(|| format!("invalid definition for route '{name}'"))?;
            debug!(route_name = %name, pattern = %route.route, callback = %route.target, "Declared route");
            table.add_route(&name, route);
        }
        for (token, controller) in doc.controllers.unwrap_or_default() {
            table.add_alias(&token, &controller);
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(RouteSourceFormat::from_path(Path::new("r.json")), Some(RouteSourceFormat::Json));
        assert_eq!(RouteSourceFormat::from_path(Path::new("r.YML")), Some(RouteSourceFormat::Yaml));
        assert_eq!(RouteSourceFormat::from_path(Path::new("r.toml")), Some(RouteSourceFormat::Toml));
        assert_eq!(RouteSourceFormat::from_path(Path::new("routes")), None);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let table = RouteTable::from_document(json!({})).unwrap();
        assert!(table.is_empty());
        assert!(table.controller_aliases().is_empty());

        let table = RouteTable::from_document(json!({ "routes": null })).unwrap();
        assert!(table.is_empty());

        assert!(RouteTable::from_document(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_document_order_kept() {
        let yaml = r#"
routes:
  zeta: { route: "/z", callback: "Z::list" }
  alpha: { route: "/a", callback: "A::list" }
  mid: { route: "/m", callback: "M::list" }
controllers:
  people: Users
"#;
        let table = RouteTable::parse_str(yaml, RouteSourceFormat::Yaml).unwrap();
        let names: Vec<_> = table.declared_routes().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
        assert_eq!(table.controller_aliases().get("people").map(String::as_str), Some("Users"));
    }

    #[test]
    fn test_invalid_route_names_the_route() {
        let err = RouteTable::from_document(json!({
            "routes": { "broken": { "route": "/x", "callback": "no-separator" } }
        }))
        .unwrap_err();
        assert!(format!("{err:#}").contains("broken"));
    }
}
