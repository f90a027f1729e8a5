// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Nested layer parameters with dotted-path access (`"stdp.a_plus"`).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use sem_structures::{Result, SemError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerParams {
    tree: Map<String, Value>,
}

impl LayerParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON object
    ///
    /// # Errors
    /// `SemError::Value` if `value` is not an object.
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(tree) => Ok(Self { tree }),
            other => Err(SemError::value(format!(
                "layer parameters must be an object, got {}",
                other
            ))),
        }
    }

    fn lookup(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.tree.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.lookup(path).is_some()
    }

    /// Typed value at `path`
    ///
    /// # Errors
    /// - `SemError::Key` if nothing is stored at `path`
    /// - `SemError::Value` if the stored value is not a `T`
    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let value = self
            .lookup(path)
            .ok_or_else(|| SemError::key(format!("Missing required parameter '{}'", path)))?;
        T::deserialize(value)
            .map_err(|e| SemError::value(format!("Invalid value for parameter '{}': {}", path, e)))
    }

    /// Typed value at `path`, `None` when absent
    pub fn get_opt<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        if self.contains(path) {
            self.get(path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Typed value at `path`, `default` when absent
    pub fn get_or<T: DeserializeOwned>(&self, path: &str, default: T) -> Result<T> {
        Ok(self.get_opt(path)?.unwrap_or(default))
    }

    /// Store `value` at `path`, creating intermediate objects as needed.
    ///
    /// # Errors
    /// `SemError::Value` if an intermediate node exists and is not an object,
    /// or `value` cannot be serialized.
    pub fn put<T: Serialize>(&mut self, path: &str, value: T) -> Result<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| SemError::value(format!("Cannot store parameter '{}': {}", path, e)))?;

        let mut parts: Vec<&str> = path.split('.').collect();
        let leaf = match parts.pop() {
            Some(leaf) if !leaf.is_empty() => leaf,
            _ => return Err(SemError::key(format!("Invalid parameter path '{}'", path))),
        };

        let mut node = &mut self.tree;
        for part in parts {
            let entry = node
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            node = match entry {
                Value::Object(map) => map,
                _ => {
                    return Err(SemError::value(format!(
                        "Parameter '{}' is not a group, cannot store '{}'",
                        part, path
                    )))
                }
            };
        }
        node.insert(leaf.to_string(), value);
        Ok(())
    }

    /// Builder form of [`put`](Self::put)
    pub fn with<T: Serialize>(mut self, path: &str, value: T) -> Result<Self> {
        self.put(path, value)?;
        Ok(self)
    }

    pub fn as_json(&self) -> &Map<String, Value> {
        &self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dotted_paths() {
        let mut params = LayerParams::new();
        params.put("nb_afferents", 3).unwrap();
        params.put("stdp.a_plus", 0.1f32).unwrap();

        assert_eq!(params.get::<usize>("nb_afferents").unwrap(), 3);
        assert_eq!(params.get::<f32>("stdp.a_plus").unwrap(), 0.1);
        assert_eq!(params.as_json()["stdp"], json!({"a_plus": 0.1f32}));
    }

    #[test]
    fn test_missing_and_invalid() {
        let params = LayerParams::from_json(json!({"n": -1, "name": "x"})).unwrap();

        assert!(matches!(params.get::<f32>("absent"), Err(SemError::Key(_))));
        assert!(matches!(params.get::<usize>("n"), Err(SemError::Value(_))));
        assert!(matches!(params.get::<f32>("name"), Err(SemError::Value(_))));
        assert!(matches!(params.get::<f32>("name.deeper"), Err(SemError::Key(_))));
    }

    #[test]
    fn test_defaults() {
        let params = LayerParams::from_json(json!({"len_history": 7})).unwrap();
        assert_eq!(params.get_or("len_history", 5usize).unwrap(), 7);
        assert_eq!(params.get_or("delta_t", 1000.0f32).unwrap(), 1000.0);
        assert_eq!(params.get_opt::<u64>("seed").unwrap(), None);
    }

    #[test]
    fn test_put_through_scalar_fails() {
        let mut params = LayerParams::new();
        params.put("a", 1).unwrap();
        assert!(matches!(params.put("a.b", 2), Err(SemError::Value(_))));
    }

    #[test]
    fn test_from_json_requires_object() {
        assert!(LayerParams::from_json(json!([1, 2])).is_err());
    }
}
