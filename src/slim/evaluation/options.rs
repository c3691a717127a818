//! Evaluation options
//!
//! Options are plain serde data so hosts can load them from JSON:
//!
//! ```json
//! { "attrForRefName": "data-refname" }
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EvaluateOptions {
    /// When set, every element bound with `@name` also gets this attribute, carrying
    /// the binding name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attr_for_ref_name: Option<String>,
}

impl EvaluateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attr_for_ref_name(mut self, name: impl Into<String>) -> Self {
        self.attr_for_ref_name = Some(name.into());
        self
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
