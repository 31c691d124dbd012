//! Declarative output schemas.
//!
//! A [`Schema`] is a plain description of named fields (type, required flag,
//! description, optional numeric bounds). It drives two independent concerns:
//! [`validate`] checks decoded JSON against it, and [`render_instructions`] turns it
//! into provider-facing format instructions in one of several [`InstructionStyle`]s.

mod render;
mod validate;

pub use render::{json_schema, render_instructions, InstructionStyle};
pub use validate::{validate, validate_object};

use crate::error::BuildError;

/// Type of a schema field.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldType {
    String,
    /// Integral numbers only; `2.5` is a mismatch.
    Integer,
    Number,
    Boolean,
    /// A string restricted to the listed values.
    Enum(Vec<String>),
    List(Box<FieldType>),
    /// Any JSON value, accepted as is.
    Any,
}

impl FieldType {
    /// Name used in instructions and type-mismatch errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Enum(_) => "string",
            FieldType::List(_) => "array",
            FieldType::Any => "any",
        }
    }
}

/// One declared field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSchema {
    pub name: String,
    pub ty: FieldType,
    pub required: bool,
    pub description: String,
    /// Accept compatible string/number/boolean spellings, e.g. `"42"` for an integer.
    pub coerce: bool,
    /// Exclusive lower bound for numeric fields.
    pub greater_than: Option<f64>,
    /// Exclusive upper bound for numeric fields.
    pub less_than: Option<f64>,
}

impl FieldSchema {
    /// Required field without coercion or bounds.
    pub fn new(name: impl Into<String>, ty: FieldType, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty,
            required: true,
            description: description.into(),
            coerce: false,
            greater_than: None,
            less_than: None,
        }
    }

    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, FieldType::String, description)
    }

    pub fn integer(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, FieldType::Integer, description)
    }

    pub fn number(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, FieldType::Number, description)
    }

    pub fn boolean(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, FieldType::Boolean, description)
    }

    pub fn enumeration<I, S>(
        name: impl Into<String>,
        allowed: I,
        description: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed = allowed.into_iter().map(Into::into).collect();
        Self::new(name, FieldType::Enum(allowed), description)
    }

    pub fn list(name: impl Into<String>, item: FieldType, description: impl Into<String>) -> Self {
        Self::new(name, FieldType::List(Box::new(item)), description)
    }

    /// Field may be absent or null.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn coerce(mut self) -> Self {
        self.coerce = true;
        self
    }

    pub fn gt(mut self, bound: f64) -> Self {
        self.greater_than = Some(bound);
        self
    }

    pub fn lt(mut self, bound: f64) -> Self {
        self.less_than = Some(bound);
        self
    }
}

/// Named set of fields; field names are unique and keep declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    name: String,
    description: Option<String>,
    fields: Vec<FieldSchema>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    /// Builds a schema from `fields`, rejecting duplicate names.
    pub fn from_fields(
        name: impl Into<String>,
        fields: impl IntoIterator<Item = FieldSchema>,
    ) -> Result<Self, BuildError> {
        fields
            .into_iter()
            .try_fold(Self::new(name), |schema, field| schema.field(field))
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a field. Fails with `DuplicateField` if the name is already declared.
    pub fn field(mut self, field: FieldSchema) -> Result<Self, BuildError> {
        if self.get(&field.name).is_some() {
            return Err(BuildError::DuplicateField(field.name));
        }
        self.fields.push(field);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }
}
