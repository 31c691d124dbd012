//! Prompt nodes: fill named slots from the input mapping.
//!
//! A text prompt renders to a `Value::String`; a chat prompt renders to a list of
//! messages, optionally splicing in caller-supplied history through a placeholder.

mod template;

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::{BuildError, RunnableError};
use crate::message::Message;
use crate::runnable::Runnable;
use crate::value::Value;

pub use template::Template;

/// One entry of a chat prompt.
#[derive(Clone, Debug, PartialEq)]
pub enum MessageTemplate {
    System(Template),
    User(Template),
    Assistant(Template),
    /// Spliced in from the input slot `variable`, which must hold a message or a list of
    /// messages. When `optional`, a missing slot contributes nothing.
    Placeholder { variable: String, optional: bool },
}

impl MessageTemplate {
    pub fn system(template: &str) -> Result<Self, BuildError> {
        Template::parse(template).map(MessageTemplate::System)
    }

    pub fn user(template: &str) -> Result<Self, BuildError> {
        Template::parse(template).map(MessageTemplate::User)
    }

    pub fn assistant(template: &str) -> Result<Self, BuildError> {
        Template::parse(template).map(MessageTemplate::Assistant)
    }

    pub fn placeholder(variable: impl Into<String>) -> Self {
        MessageTemplate::Placeholder {
            variable: variable.into(),
            optional: false,
        }
    }

    pub fn optional_placeholder(variable: impl Into<String>) -> Self {
        MessageTemplate::Placeholder {
            variable: variable.into(),
            optional: true,
        }
    }

    /// Slots that must be bound for this entry to render.
    fn required_variables(&self) -> Vec<&str> {
        match self {
            MessageTemplate::System(t) | MessageTemplate::User(t) | MessageTemplate::Assistant(t) => {
                t.variables()
            }
            MessageTemplate::Placeholder {
                variable,
                optional: false,
            } => vec![variable.as_str()],
            MessageTemplate::Placeholder { optional: true, .. } => Vec::new(),
        }
    }
}

#[derive(Clone, Debug)]
enum PromptKind {
    Text(Template),
    Chat(Vec<MessageTemplate>),
}

/// Prompt formatter: substitutes input values into named slots.
///
/// The required slot set is fixed at construction: every slot in the template that
/// is not bound by a partial. A missing required slot is a hard
/// `MissingVariable` failure; input keys that match no slot are ignored.
///
/// A non-mapping input is accepted only when exactly one slot is required; the whole
/// input is bound to that slot (so a parser's string output can feed
/// `"Summarize {text}"` directly).
#[derive(Clone, Debug)]
pub struct PromptNode {
    name: String,
    kind: PromptKind,
    partials: BTreeMap<String, Value>,
    input_variables: Vec<String>,
}

impl PromptNode {
    /// Text prompt from a template such as `"Write a joke about {topic}"`.
    pub fn new(template: &str) -> Result<Self, BuildError> {
        let template = Template::parse(template)?;
        Ok(Self::build("PromptTemplate", PromptKind::Text(template)))
    }

    /// Chat prompt from message templates; renders to a list of messages.
    pub fn chat(messages: Vec<MessageTemplate>) -> Self {
        Self::build("ChatPromptTemplate", PromptKind::Chat(messages))
    }

    fn build(name: &str, kind: PromptKind) -> Self {
        let mut node = Self {
            name: name.to_string(),
            kind,
            partials: BTreeMap::new(),
            input_variables: Vec::new(),
        };
        node.refresh_input_variables();
        node
    }

    /// Pre-binds a slot, e.g. `format_instructions`. It is no longer required from the
    /// input; an input value for the same slot still takes precedence.
    pub fn with_partial(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.partials.insert(name.into(), value.into());
        self.refresh_input_variables();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Slots that must be supplied by the input, in order of first appearance.
    pub fn input_variables(&self) -> &[String] {
        &self.input_variables
    }

    fn refresh_input_variables(&mut self) {
        let mut names: Vec<String> = Vec::new();
        let all: Vec<&str> = match &self.kind {
            PromptKind::Text(t) => t.variables(),
            PromptKind::Chat(messages) => messages
                .iter()
                .flat_map(MessageTemplate::required_variables)
                .collect(),
        };
        for name in all {
            if !self.partials.contains_key(name) && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        self.input_variables = names;
    }

    /// Formats the prompt for `input` without going through a pipeline.
    pub fn format(&self, input: &Value) -> Result<Value, RunnableError> {
        let single;
        let bindings: &BTreeMap<String, Value> = match input {
            Value::Map(map) => map,
            other if self.input_variables.len() == 1 => {
                single = BTreeMap::from([(self.input_variables[0].clone(), other.clone())]);
                &single
            }
            other => {
                return Err(RunnableError::InvalidInput {
                    node: self.name.clone(),
                    expected: "a mapping of prompt variables",
                    input: other.clone(),
                })
            }
        };

        if let Some(missing) = self
            .input_variables
            .iter()
            .find(|name| !bindings.contains_key(name.as_str()))
        {
            return Err(self.missing(missing, input));
        }

        let lookup = |name: &str| bindings.get(name).or_else(|| self.partials.get(name));

        match &self.kind {
            PromptKind::Text(template) => template
                .render(|name| lookup(name).map(Value::to_string))
                .map(Value::String)
                .map_err(|name| self.missing(&name, input)),
            PromptKind::Chat(templates) => {
                let mut messages = Vec::with_capacity(templates.len());
                for entry in templates {
                    let render = |t: &Template| {
                        t.render(|name| lookup(name).map(Value::to_string))
                            .map_err(|name| self.missing(&name, input))
                    };
                    match entry {
                        MessageTemplate::System(t) => messages.push(Message::system(render(t)?)),
                        MessageTemplate::User(t) => messages.push(Message::user(render(t)?)),
                        MessageTemplate::Assistant(t) => {
                            messages.push(Message::assistant(render(t)?))
                        }
                        MessageTemplate::Placeholder { variable, optional } => {
                            match lookup(variable.as_str()) {
                                Some(value) => match value.to_messages() {
                                    Some(history) => messages.extend(history),
                                    None => {
                                        return Err(RunnableError::InvalidInput {
                                            node: self.name.clone(),
                                            expected: "a list of messages for a placeholder",
                                            input: value.clone(),
                                        })
                                    }
                                },
                                None if *optional => {}
                                None => return Err(self.missing(variable, input)),
                            }
                        }
                    }
                }
                Ok(Value::from(messages))
            }
        }
    }

    fn missing(&self, variable: &str, input: &Value) -> RunnableError {
        RunnableError::MissingVariable {
            node: self.name.clone(),
            variable: variable.to_string(),
            input: input.clone(),
        }
    }
}

#[async_trait]
impl Runnable for PromptNode {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, input: Value) -> Result<Value, RunnableError> {
        self.format(&input)
    }
}
