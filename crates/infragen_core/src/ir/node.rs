//! Top-level declarations.

use serde::{Deserialize, Serialize};

use super::Expression;

/// A top-level declaration in a program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Node {
    Resource(Resource),
    LocalVariable(LocalVariable),
    OutputVariable(OutputVariable),
    ConfigVariable(ConfigVariable),
    /// A nested program instantiated as a unit. Not part of the structured-document surface.
    Component(Component),
}

impl Node {
    /// Declared name, unique within the program.
    pub fn name(&self) -> &str {
        match self {
            Node::Resource(r) => &r.name,
            Node::LocalVariable(v) => &v.name,
            Node::OutputVariable(v) => &v.name,
            Node::ConfigVariable(v) => &v.name,
            Node::Component(c) => &c.name,
        }
    }

    /// Name used in the deployed stack; defaults to [`Node::name`].
    pub fn logical_name(&self) -> &str {
        match self {
            Node::Resource(r) => r.logical_name(),
            Node::LocalVariable(v) => v.logical_name(),
            Node::OutputVariable(v) => v.logical_name(),
            Node::ConfigVariable(v) => v.logical_name(),
            Node::Component(c) => c.logical_name(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Resource(_) => "Resource",
            Node::LocalVariable(_) => "LocalVariable",
            Node::OutputVariable(_) => "OutputVariable",
            Node::ConfigVariable(_) => "ConfigVariable",
            Node::Component(_) => "Component",
        }
    }
}

/// A named expression: resource input, resource option or component input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: Expression,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: Expression) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

fn or_name<'a>(logical_name: &'a Option<String>, name: &'a str) -> &'a str {
    logical_name.as_deref().unwrap_or(name)
}

/// A provider resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub name: String,
    /// Provider type token, e.g. `aws:s3/bucket:Bucket`.
    pub token: String,
    #[serde(default)]
    pub logical_name: Option<String>,
    /// Input properties in declaration order.
    #[serde(default)]
    pub inputs: Vec<Attribute>,
    /// Resource options (`dependsOn`, `protect`, `parent`, ...) in declaration order.
    #[serde(default)]
    pub options: Vec<Attribute>,
}

impl Resource {
    pub fn new(name: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            token: token.into(),
            logical_name: None,
            inputs: Vec::new(),
            options: Vec::new(),
        }
    }

    pub fn with_logical_name(mut self, logical_name: impl Into<String>) -> Self {
        self.logical_name = Some(logical_name.into());
        self
    }

    pub fn with_input(mut self, name: impl Into<String>, value: Expression) -> Self {
        self.inputs.push(Attribute::new(name, value));
        self
    }

    pub fn with_option(mut self, name: impl Into<String>, value: Expression) -> Self {
        self.options.push(Attribute::new(name, value));
        self
    }

    pub fn logical_name(&self) -> &str {
        or_name(&self.logical_name, &self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalVariable {
    pub name: String,
    #[serde(default)]
    pub logical_name: Option<String>,
    pub definition: Expression,
}

impl LocalVariable {
    pub fn new(name: impl Into<String>, definition: Expression) -> Self {
        Self {
            name: name.into(),
            logical_name: None,
            definition,
        }
    }

    pub fn with_logical_name(mut self, logical_name: impl Into<String>) -> Self {
        self.logical_name = Some(logical_name.into());
        self
    }

    pub fn logical_name(&self) -> &str {
        or_name(&self.logical_name, &self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputVariable {
    pub name: String,
    #[serde(default)]
    pub logical_name: Option<String>,
    pub value: Expression,
}

impl OutputVariable {
    pub fn new(name: impl Into<String>, value: Expression) -> Self {
        Self {
            name: name.into(),
            logical_name: None,
            value,
        }
    }

    pub fn with_logical_name(mut self, logical_name: impl Into<String>) -> Self {
        self.logical_name = Some(logical_name.into());
        self
    }

    pub fn logical_name(&self) -> &str {
        or_name(&self.logical_name, &self.name)
    }
}

/// Declared type of a configuration variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigType {
    String,
    Number,
    Int,
    Bool,
    #[default]
    Unknown,
}

impl ConfigType {
    /// Spelling used in program source and in generated documents.
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigType::String => "string",
            ConfigType::Number => "number",
            ConfigType::Int => "int",
            ConfigType::Bool => "bool",
            ConfigType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ConfigType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigVariable {
    pub name: String,
    #[serde(default)]
    pub logical_name: Option<String>,
    #[serde(default)]
    pub config_type: ConfigType,
    #[serde(default)]
    pub default_value: Option<Expression>,
}

impl ConfigVariable {
    pub fn new(name: impl Into<String>, config_type: ConfigType) -> Self {
        Self {
            name: name.into(),
            logical_name: None,
            config_type,
            default_value: None,
        }
    }

    pub fn with_logical_name(mut self, logical_name: impl Into<String>) -> Self {
        self.logical_name = Some(logical_name.into());
        self
    }

    pub fn with_default(mut self, default_value: Expression) -> Self {
        self.default_value = Some(default_value);
        self
    }

    pub fn logical_name(&self) -> &str {
        or_name(&self.logical_name, &self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub name: String,
    #[serde(default)]
    pub logical_name: Option<String>,
    /// Path to the component's program directory.
    pub source: String,
    #[serde(default)]
    pub inputs: Vec<Attribute>,
}

impl Component {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            logical_name: None,
            source: source.into(),
            inputs: Vec::new(),
        }
    }

    pub fn logical_name(&self) -> &str {
        or_name(&self.logical_name, &self.name)
    }
}

macro_rules! impl_into_node {
    ($($ty:ident),* $(,)?) => {
        $(
            impl From<$ty> for Node {
                fn from(value: $ty) -> Self {
                    Node::$ty(value)
                }
            }
        )*
    };
}

impl_into_node!(Resource, LocalVariable, OutputVariable, ConfigVariable, Component);
