//! The shadowsocks client's `gui-config.json`.
//!
//! Only the `configs` array belongs to this crate. Every other key is kept as
//! raw JSON, in its original position, and written back unchanged.

use crate::error::UpdateError;
use crate::server::ServerRecord;

use log::info;
use serde_json::{json, Map, Value};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Key holding the server list.
pub const SERVERS_KEY: &str = "configs";

/// A loaded client configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuiConfig {
    fields: Map<String, Value>,
}

impl GuiConfig {
    /// Read and validate a client configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, UpdateError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| UpdateError::InputUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|reason| UpdateError::InvalidInput {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Parse a client configuration from JSON text.
    pub fn from_json(content: &str) -> Result<Self, String> {
        let value: Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
        let Value::Object(fields) = value else {
            return Err("top level is not an object".to_string());
        };
        // a client that kept no servers may have written `null`
        match fields.get(SERVERS_KEY) {
            None | Some(Value::Null) | Some(Value::Array(_)) => {}
            Some(_) => return Err(format!("`{}` is not an array", SERVERS_KEY)),
        }
        Ok(Self { fields })
    }

    /// Look up a pass-through field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Number of entries currently in the server list.
    pub fn server_count(&self) -> usize {
        self.fields
            .get(SERVERS_KEY)
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Replace the whole server list, leaving every other field alone.
    pub fn merge_servers(mut self, servers: &[ServerRecord]) -> Self {
        let servers = servers.iter().map(|s| json!(s)).collect();
        self.fields.insert(SERVERS_KEY.to_string(), Value::Array(servers));
        self
    }

    /// Serialize to JSON text.
    pub fn to_json(&self, pretty: bool) -> String {
        let value = Value::Object(self.fields.clone());
        if pretty {
            format!("{:#}", value)
        } else {
            value.to_string()
        }
    }

    /// Write the configuration to `path`.
    ///
    /// The file is replaced in one step; on error the old contents remain.
    pub fn save(&self, path: impl AsRef<Path>, pretty: bool) -> Result<(), UpdateError> {
        let path = path.as_ref();
        let persistence = |source: std::io::Error| UpdateError::Persistence {
            path: path.to_path_buf(),
            source,
        };

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let mut tmp = NamedTempFile::new_in(&dir).map_err(persistence)?;
        tmp.write_all(self.to_json(pretty).as_bytes()).map_err(persistence)?;
        tmp.as_file().sync_all().map_err(persistence)?;
        tmp.persist(path).map_err(|e| persistence(e.error))?;

        info!("Wrote {} servers to {}", self.server_count(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUI: &str = r#"{"configs":[{"server":"old"}],"strategy":null,"index":2,"localPort":1080,"hotkey":{"ShowLogs":"Ctrl+L"}}"#;

    #[test]
    fn merge_replaces_only_configs() {
        let config = GuiConfig::from_json(GUI).unwrap();
        let servers = vec![ServerRecord::new("A", "h", 1, "m", "p")];
        let merged = config.clone().merge_servers(&servers);

        assert_eq!(merged.server_count(), 1);
        assert_eq!(merged.get("index"), Some(&json!(2)));
        assert_eq!(merged.get("strategy"), Some(&Value::Null));
        assert_eq!(merged.get("hotkey"), config.get("hotkey"));
        assert_eq!(merged.get("configs").unwrap()[0]["remarks"], json!("A"));
    }

    #[test]
    fn merge_keeps_key_order() {
        let merged = GuiConfig::from_json(GUI).unwrap().merge_servers(&[]);
        assert_eq!(
            merged.to_json(false),
            r#"{"configs":[],"strategy":null,"index":2,"localPort":1080,"hotkey":{"ShowLogs":"Ctrl+L"}}"#
        );
    }

    #[test]
    fn merge_adds_missing_configs() {
        let merged = GuiConfig::from_json(r#"{"index":0}"#)
            .unwrap()
            .merge_servers(&[]);
        assert_eq!(merged.to_json(false), r#"{"index":0,"configs":[]}"#);
    }

    #[test]
    fn rejects_non_object_root() {
        assert!(GuiConfig::from_json("[]").is_err());
        assert!(GuiConfig::from_json("not json").is_err());
    }

    #[test]
    fn rejects_non_array_configs() {
        assert!(GuiConfig::from_json(r#"{"configs": {}}"#).is_err());
        assert!(GuiConfig::from_json(r#"{"configs": "none"}"#).is_err());
    }

    #[test]
    fn null_configs_loads_and_merges() {
        let config = GuiConfig::from_json(r#"{"configs":null,"index":0,"global":true}"#).unwrap();
        assert_eq!(config.server_count(), 0);

        let servers = vec![ServerRecord::new("A", "h", 1, "m", "p")];
        let merged = config.merge_servers(&servers);
        assert_eq!(merged.server_count(), 1);
        assert_eq!(merged.get("index"), Some(&json!(0)));
        assert_eq!(merged.get("global"), Some(&json!(true)));
        assert_eq!(
            GuiConfig::from_json(r#"{"configs":null,"index":0}"#)
                .unwrap()
                .merge_servers(&[])
                .to_json(false),
            r#"{"configs":[],"index":0}"#
        );
    }

    #[test]
    fn opaque_strategy_round_trips() {
        let raw = r#"{"configs":[],"strategy":{"kind":[1,"two",{"three":3.5}]}}"#;
        let config = GuiConfig::from_json(raw).unwrap();
        assert_eq!(config.to_json(false), raw);
    }
}
