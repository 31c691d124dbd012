//! Tools: named functions a chat model can ask to call.
//!
//! A [`Tool`] pairs a function with an argument [`Schema`]. Its [`ToolSpec`] is bound
//! to a model (e.g. `ChatOpenAI::with_tools`); the model answers with
//! [`ToolCall`]s, which [`Toolkit::call`] dispatches and turns into tool messages for
//! the next turn.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{BuildError, RunnableError};
use crate::message::{Message, ToolCall};
use crate::parser::ParseFailure;
use crate::runnable::LambdaNode;
use crate::schema::{json_schema, validate, Schema};
use crate::value::Value;

/// Tool description sent to a model: name, description and JSON schema of the arguments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: Option<String>,
    pub input_schema: serde_json::Value,
}

type ToolFn = Arc<dyn Fn(Value) -> Result<Value, RunnableError> + Send + Sync>;

/// A callable tool with schema-checked arguments.
#[derive(Clone)]
pub struct Tool {
    name: String,
    description: String,
    schema: Schema,
    func: ToolFn,
}

impl Tool {
    /// Builds a tool. The name must be 1 to 64 ASCII letters, digits, `_` or `-`, and
    /// the description must not be empty (models choose tools by it).
    pub fn new<F>(
        name: impl Into<String>,
        description: impl Into<String>,
        schema: Schema,
        func: F,
    ) -> Result<Self, BuildError>
    where
        F: Fn(Value) -> Result<Value, RunnableError> + Send + Sync + 'static,
    {
        let name = name.into();
        let description = description.into();
        let valid_name = !name.is_empty()
            && name.len() <= 64
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid_name {
            return Err(BuildError::InvalidTool(format!("invalid tool name `{}`", name)));
        }
        if description.trim().is_empty() {
            return Err(BuildError::InvalidTool(format!(
                "tool `{}` needs a description",
                name
            )));
        }
        Ok(Self {
            name,
            description,
            schema,
            func: Arc::new(func),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name.clone(),
            description: Some(self.description.clone()),
            input_schema: json_schema(&self.schema),
        }
    }

    /// Validates `args` against the argument schema, then calls the function with the
    /// validated mapping. Invalid arguments fail with `RunnableError::Parse`.
    pub fn invoke(&self, args: &Value) -> Result<Value, RunnableError> {
        let json = args.to_json();
        let validated = validate(&self.schema, &json).map_err(|source| RunnableError::Parse {
            node: self.name.clone(),
            raw: json.to_string(),
            source,
        })?;
        (self.func)(validated)
    }

    /// Runs a model-requested call and returns the result as a tool message that
    /// carries the call id. Empty arguments are read as `{}`.
    pub fn invoke_call(&self, call: &ToolCall) -> Result<Message, RunnableError> {
        let raw = call.arguments.trim();
        let args: serde_json::Value = if raw.is_empty() {
            serde_json::Value::Object(Default::default())
        } else {
            serde_json::from_str(raw).map_err(|e| RunnableError::Parse {
                node: self.name.clone(),
                raw: call.arguments.clone(),
                source: ParseFailure::InvalidJson(e.to_string()),
            })?
        };
        let out = self.invoke(&Value::from(args))?;
        tracing::debug!(tool = %self.name, call_id = ?call.id, "Tool call complete");
        Ok(Message::tool(out.to_string(), call.id.clone()))
    }

    /// Adapts the tool as a node taking the argument mapping as input.
    pub fn into_node(self) -> LambdaNode {
        let name = self.name.clone();
        LambdaNode::new(move |args: Value| self.invoke(&args)).with_name(name)
    }
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

/// A set of tools with unique names.
#[derive(Clone, Debug, Default)]
pub struct Toolkit {
    tools: Vec<Tool>,
}

impl Toolkit {
    pub fn new(tools: impl IntoIterator<Item = Tool>) -> Result<Self, BuildError> {
        tools
            .into_iter()
            .try_fold(Self::default(), |kit, tool| kit.with(tool))
    }

    /// Adds a tool; a second tool with the same name is rejected.
    pub fn with(mut self, tool: Tool) -> Result<Self, BuildError> {
        if self.get(tool.name()).is_some() {
            return Err(BuildError::InvalidTool(format!(
                "duplicate tool `{}`",
                tool.name()
            )));
        }
        self.tools.push(tool);
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Specs of every tool, for binding to a model.
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(Tool::spec).collect()
    }

    /// Dispatches `call` to the named tool.
    pub fn call(&self, call: &ToolCall) -> Result<Message, RunnableError> {
        self.get(&call.name)
            .ok_or_else(|| RunnableError::ExecutionFailed(format!("unknown tool `{}`", call.name)))?
            .invoke_call(call)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
