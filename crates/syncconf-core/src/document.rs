//! The in-memory `sync.conf` document: a flat JSON object plus one nested
//! `management_server` object for server-scoped keys.

use crate::constants::{MANAGEMENT_SERVER_KEY, MANAGEMENT_SERVER_PARAMS};
use crate::error::ConfigError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;
use tracing::{info, warn};

/// True when `name` belongs inside the `management_server` sub-object.
pub fn is_management_server_param(name: &str) -> bool {
    MANAGEMENT_SERVER_PARAMS.contains(&name)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDocument {
    root: Map<String, Value>,
}

impl ConfigDocument {
    /// Read and parse `path` as a JSON object.
    ///
    /// A file that cannot be opened propagates as an I/O error. Content that
    /// is not a valid JSON object is reported together with the raw content,
    /// which the CLI turns into an exit-code-1 failure.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let root: Map<String, Value> =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidJson {
                path: path.display().to_string(),
                message: e.to_string(),
                content: content.clone(),
            })?;
        Ok(Self { root })
    }

    /// Serialize the full document and overwrite `path`.
    /// Truncate-then-write; a failure mid-write is not recovered.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_pretty_string()?)?;
        Ok(())
    }

    /// Pretty JSON with 4-space indentation and a trailing newline.
    pub fn to_pretty_string(&self) -> Result<String, ConfigError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.root
            .serialize(&mut ser)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        buf.push(b'\n');
        String::from_utf8(buf).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Set `name` to `value`, routing reserved names into the
    /// `management_server` sub-object (created when absent).
    pub fn set(&mut self, name: &str, value: Value) {
        info!("Setting '{}' to '{}'", name, value);

        if is_management_server_param(name) {
            let nested = self
                .root
                .entry(MANAGEMENT_SERVER_KEY.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            // A scalar squatting on the reserved key cannot hold sub-keys;
            // replace it with a fresh object.
            if !nested.is_object() {
                *nested = Value::Object(Map::new());
            }
            if let Value::Object(map) = nested {
                map.insert(name.to_string(), value);
            }
        } else {
            self.root.insert(name.to_string(), value);
        }
    }

    /// Remove `name` from the top level, else from the `management_server`
    /// sub-object. An absent name is a non-fatal warning; returns whether
    /// anything was actually removed.
    pub fn delete(&mut self, name: &str) -> bool {
        info!("Deleting '{}'", name);

        if self.root.remove(name).is_some() {
            return true;
        }
        if let Some(Value::Object(nested)) = self.root.get_mut(MANAGEMENT_SERVER_KEY) {
            if nested.remove(name).is_some() {
                return true;
            }
        }

        warn!("Can't find '{}' in sync.conf. Skipping", name);
        false
    }

    /// Routed read: looks where [`set`](Self::set) would have written.
    pub fn get(&self, name: &str) -> Option<&Value> {
        if is_management_server_param(name) {
            self.root
                .get(MANAGEMENT_SERVER_KEY)
                .and_then(|v| v.as_object())
                .and_then(|m| m.get(name))
        } else {
            self.root.get(name)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }
}

impl From<Map<String, Value>> for ConfigDocument {
    fn from(root: Map<String, Value>) -> Self {
        Self { root }
    }
}

impl fmt::Display for ConfigDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_pretty_string() {
            Ok(s) => f.write_str(s.trim_end()),
            Err(_) => f.write_str("<unserializable sync.conf>"),
        }
    }
}
