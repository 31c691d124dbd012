//! Output parsers: turn a model response into a structured value.
//!
//! - [`ParserNode::text`]: the response text as a string.
//! - [`ParserNode::json`]: decoded JSON (fences and surrounding prose tolerated).
//! - [`ParserNode::structured`]: decoded JSON validated against a [`Schema`].

mod failure;
mod json;

pub use failure::ParseFailure;

use async_trait::async_trait;

use crate::error::RunnableError;
use crate::runnable::Runnable;
use crate::schema::{render_instructions, validate, InstructionStyle, Schema};
use crate::value::Value;

/// Format instructions of the plain JSON parser.
pub const JSON_FORMAT_INSTRUCTIONS: &str = "Return a JSON object.";

#[derive(Clone, Debug)]
enum ParserKind {
    Text,
    Json,
    Structured {
        schema: Schema,
        style: InstructionStyle,
    },
}

/// Parses a model response (a message or its text).
///
/// Failures are `RunnableError::Parse` carrying the raw text and the [`ParseFailure`].
#[derive(Clone, Debug)]
pub struct ParserNode {
    name: String,
    kind: ParserKind,
}

impl ParserNode {
    /// Returns the response text unchanged.
    pub fn text() -> Self {
        Self {
            name: "StrOutputParser".to_string(),
            kind: ParserKind::Text,
        }
    }

    /// Decodes the response as JSON.
    pub fn json() -> Self {
        Self {
            name: "JsonOutputParser".to_string(),
            kind: ParserKind::Json,
        }
    }

    /// Decodes the response as a JSON object and validates it against `schema`.
    pub fn structured(schema: Schema) -> Self {
        Self {
            name: "StructuredOutputParser".to_string(),
            kind: ParserKind::Structured {
                schema,
                style: InstructionStyle::default(),
            },
        }
    }

    /// Instruction style of a structured parser; no effect on other parsers.
    pub fn with_instruction_style(mut self, new_style: InstructionStyle) -> Self {
        if let ParserKind::Structured { style, .. } = &mut self.kind {
            *style = new_style;
        }
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn schema(&self) -> Option<&Schema> {
        match &self.kind {
            ParserKind::Structured { schema, .. } => Some(schema),
            _ => None,
        }
    }

    /// Text to show the model so its answer parses; empty for the text parser.
    pub fn format_instructions(&self) -> String {
        match &self.kind {
            ParserKind::Text => String::new(),
            ParserKind::Json => JSON_FORMAT_INSTRUCTIONS.to_string(),
            ParserKind::Structured { schema, style } => render_instructions(schema, *style),
        }
    }

    /// Parses raw response text.
    pub fn parse(&self, text: &str) -> Result<Value, ParseFailure> {
        match &self.kind {
            ParserKind::Text => Ok(Value::from(text)),
            ParserKind::Json => json::parse_json(text).map(Value::from),
            ParserKind::Structured { schema, .. } => {
                let decoded = json::parse_json(text)?;
                validate(schema, &decoded)
            }
        }
    }
}

#[async_trait]
impl Runnable for ParserNode {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, input: Value) -> Result<Value, RunnableError> {
        let raw = match input.as_text() {
            Some(text) => text,
            None => {
                return Err(RunnableError::InvalidInput {
                    node: self.name.clone(),
                    expected: "a model response or its text",
                    input,
                })
            }
        };
        self.parse(raw).map_err(|source| {
            tracing::debug!(node = %self.name, %source, "Response did not parse");
            RunnableError::Parse {
                node: self.name.clone(),
                raw: raw.to_string(),
                source,
            }
        })
    }
}
