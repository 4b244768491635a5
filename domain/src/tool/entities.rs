//! Tool domain entities

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Value shape a tool parameter accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParamKind {
    Text,
    /// Integer restricted to a closed set of choices
    Choice { choices: Vec<i64> },
}

/// One argument of a lookup tool. Every parameter is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    pub description: String,
    pub kind: ParamKind,
}

impl ToolParameter {
    pub fn text(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind: ParamKind::Text,
        }
    }

    pub fn choice(
        name: impl Into<String>,
        description: impl Into<String>,
        choices: impl IntoIterator<Item = i64>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind: ParamKind::Choice {
                choices: choices.into_iter().collect(),
            },
        }
    }
}

/// A tool the completion backend may call mid-reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Name the model refers to the tool by (e.g. "ads_search")
    pub name: String,
    pub description: String,
    pub parameters: Vec<ToolParameter>,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn param(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }
}

/// A tool invocation requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Backend-assigned id pairing the result with the call
    pub id: String,
    pub tool_name: String,
    pub arguments: Map<String, Value>,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, tool_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tool_name: tool_name.into(),
            arguments: Map::new(),
        }
    }

    /// Decode a JSON-encoded argument object.
    ///
    /// Anything that is not a JSON object leaves the call without arguments,
    /// so validation reports the missing fields back to the model.
    pub fn from_json_arguments(
        id: impl Into<String>,
        tool_name: impl Into<String>,
        raw: &str,
    ) -> Self {
        let mut call = Self::new(id, tool_name);
        if let Ok(Value::Object(arguments)) = serde_json::from_str(raw) {
            call.arguments = arguments;
        }
        call
    }

    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    pub fn str_arg(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(Value::as_str)
    }

    /// Integer argument; numeric strings such as `"2"` are accepted too
    pub fn int_arg(&self, key: &str) -> Option<i64> {
        match self.arguments.get(key)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn required_str(&self, key: &str) -> Result<&str, String> {
        self.str_arg(key)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| format!("missing required argument '{}'", key))
    }
}
