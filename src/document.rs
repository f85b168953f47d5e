//! The OpenAPI document model.
//!
//! A [`Document`] is created empty, mutated while the manifest and its
//! packages are traversed, and handed to the emitter read-only once the
//! traversal has completed without error. All maps are `BTreeMap` so that
//! repeated runs over an unchanged tree serialize byte-identically.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete OpenAPI document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// OpenAPI version
    pub openapi: String,
    /// API info
    pub info: Info,
    /// Server entries, in the order they were created
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
    /// API paths (URL path -> PathItem)
    pub paths: BTreeMap<String, PathItem>,
    /// Components (schemas, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
}

/// OpenAPI Info object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Info {
    /// API title
    pub title: String,
    /// API version
    pub version: String,
    /// API description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Terms-of-service URL
    #[serde(rename = "termsOfService", skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,
    /// Contact information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
}

/// OpenAPI Contact object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// OpenAPI Server object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Server {
    /// Server URL
    pub url: String,
}

/// OpenAPI PathItem object - all operations registered for a single path
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
}

/// OpenAPI Operation object - a single API operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Responses, keyed by status code
    pub responses: BTreeMap<String, Response>,
}

/// OpenAPI Response object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Response {
    /// Response description
    pub description: String,
}

/// OpenAPI Components object. Schemas are produced by collaborators that
/// understand struct declarations; the core only carries them through.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas: Option<BTreeMap<String, serde_json::Value>>,
}

impl Document {
    /// Create an empty document targeting OpenAPI 3.0.1.
    pub fn new() -> Self {
        Self {
            openapi: "3.0.1".to_string(),
            info: Info::default(),
            servers: Vec::new(),
            paths: BTreeMap::new(),
            components: None,
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl PathItem {
    /// Mutable slot for the given lower-case HTTP method, if it is one the
    /// document model knows about.
    pub fn slot_mut(&mut self, method: &str) -> Option<&mut Option<Operation>> {
        match method {
            "get" => Some(&mut self.get),
            "post" => Some(&mut self.post),
            "put" => Some(&mut self.put),
            "delete" => Some(&mut self.delete),
            "patch" => Some(&mut self.patch),
            "options" => Some(&mut self.options),
            "head" => Some(&mut self.head),
            _ => None,
        }
    }
}
