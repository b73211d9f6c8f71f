use crate::ToolError;
use regex::Regex;
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Boolean,
}

impl ParamKind {
    pub fn json_type(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Boolean => value.is_boolean(),
        }
    }
}

/// One declared input of a tool.
///
/// A default always implies the parameter is optional; the constructors keep that invariant.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    name: &'static str,
    description: String,
    kind: ParamKind,
    required: bool,
    default: Option<Value>,
    pattern: Option<Regex>,
}

impl ParamSpec {
    pub fn required(name: &'static str, kind: ParamKind, description: impl Into<String>) -> Self {
        Self {
            name,
            description: description.into(),
            kind,
            required: true,
            default: None,
            pattern: None,
        }
    }

    pub fn optional(name: &'static str, kind: ParamKind, description: impl Into<String>) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind, description)
        }
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.required = false;
        self.default = Some(default.into());
        self
    }

    /// Restrict string values to `pattern`.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.pattern = Some(Regex::new(pattern)?);
        Ok(self)
    }

    fn pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(Regex::as_str)
    }

    fn schema(&self) -> Value {
        let mut prop = Map::new();
        prop.insert("type".to_string(), json!(self.kind.json_type()));
        prop.insert("description".to_string(), json!(self.description));
        if let Some(default) = self.default.as_ref() {
            prop.insert("default".to_string(), default.clone());
        }
        if let Some(pattern) = self.pattern() {
            prop.insert("pattern".to_string(), json!(pattern));
        }
        Value::Object(prop)
    }

    fn check(&self, value: &Value) -> Result<(), ToolError> {
        if !self.kind.accepts(value) {
            return Err(ToolError::ArgumentTypeMismatch {
                name: self.name.to_string(),
                expected: self.kind.json_type(),
            });
        }
        if let (Some(pattern), Some(text)) = (self.pattern.as_ref(), value.as_str()) {
            if !pattern.is_match(text) {
                return Err(ToolError::ArgumentPatternMismatch {
                    name: self.name.to_string(),
                    pattern: pattern.as_str().to_string(),
                });
            }
        }
        Ok(())
    }
}

/// A named, schema-typed operation in the tool catalog.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: String,
    pub params: Vec<ParamSpec>,
    /// Whether the tool changes repository or remote state.
    pub mutating: bool,
}

impl ToolSpec {
    pub fn new(name: &'static str, description: impl Into<String>) -> Self {
        Self {
            name,
            description: description.into(),
            params: Vec::new(),
            mutating: false,
        }
    }

    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    pub fn mutating(mut self) -> Self {
        self.mutating = true;
        self
    }

    /// JSON Schema (draft 2020-12 subset) of the tool input, as advertised to clients.
    pub fn input_schema(&self) -> Map<String, Value> {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for param in &self.params {
            properties.insert(param.name.to_string(), param.schema());
            if param.required {
                required.push(json!(param.name));
            }
        }

        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_string(), Value::Array(required));
        }
        schema
    }

    /// Check `args` against the declared parameters.
    ///
    /// Declared defaults are substituted for omitted optional parameters. Undeclared keys are
    /// dropped. `null` counts as omitted.
    pub fn validate(&self, args: Option<&Map<String, Value>>) -> Result<ToolArgs, ToolError> {
        let mut values = Map::new();
        for param in &self.params {
            let provided = args
                .and_then(|args| args.get(param.name))
                .filter(|value| !value.is_null());
            match provided {
                Some(value) => {
                    param.check(value)?;
                    values.insert(param.name.to_string(), value.clone());
                }
                None => {
                    if let Some(default) = param.default.as_ref() {
                        values.insert(param.name.to_string(), default.clone());
                    } else if param.required {
                        return Err(ToolError::MissingRequiredArgument {
                            name: param.name.to_string(),
                        });
                    }
                }
            }
        }
        Ok(ToolArgs { values })
    }

    /// Argument names that `args` carries but the tool does not declare.
    pub fn undeclared<'a>(&self, args: Option<&'a Map<String, Value>>) -> Vec<&'a str> {
        let Some(args) = args else {
            return Vec::new();
        };
        args.keys()
            .map(String::as_str)
            .filter(|key| !self.params.iter().any(|param| param.name == *key))
            .collect()
    }
}

/// Arguments that passed [`ToolSpec::validate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArgs {
    values: Map<String, Value>,
}

impl ToolArgs {
    pub fn str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Value::as_str)
    }

    pub fn require_str(&self, name: &str) -> Result<&str, ToolError> {
        self.str(name)
            .ok_or_else(|| ToolError::MissingRequiredArgument {
                name: name.to_string(),
            })
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.values.get(name).and_then(Value::as_bool)
    }
}
