//! Demo catalogue: one subcommand per pipeline, with its default input and the
//! scripted replies used by `--mock`.

use std::sync::Arc;

use clap::Subcommand;
use langchain::{
    BuildError, ChatModel, ChatResponse, Message, MockChatModel, Node, ToolCall, Value,
};

use crate::pipelines;

const SVM_TEXT: &str = "Support vector machines (SVMs) are a set of supervised learning methods \
used for classification, regression and outliers detection. They are effective in high \
dimensional spaces and memory efficient, since they use a subset of training points in the \
decision function. SVMs do not directly provide probability estimates.";

/// A runnable demo and its arguments.
#[derive(Clone, Debug, PartialEq, Subcommand)]
pub enum Demo {
    /// prompt | model | parser: three facts about a topic.
    Simple {
        #[arg(default_value = "UFC")]
        topic: String,
    },
    /// Two chained model calls: describe a profession, then summarize it.
    Sequential {
        #[arg(default_value = "AI engineer")]
        profession: String,
    },
    /// Notes and questions generated in parallel, then merged.
    Parallel {
        #[arg(default_value = SVM_TEXT)]
        topic: String,
    },
    /// Classify feedback sentiment and reply with the matching branch.
    Conditional {
        #[arg(default_value = "worst smartphone, i am very disappointed")]
        feedback: String,
    },
    /// A joke and its explanation.
    Joke {
        #[arg(default_value = "AI")]
        topic: String,
    },
    /// A joke and its word count.
    WordCount {
        #[arg(default_value = "AI")]
        topic: String,
    },
    /// A report, summarized only when it is too long.
    Report {
        #[arg(default_value = "Runnable Branch")]
        topic: String,
        /// Summarize when the report has more words than this.
        #[arg(long, default_value_t = pipelines::REPORT_WORD_LIMIT)]
        max_words: usize,
    },
    /// A fictional person as free-form JSON.
    Json,
    /// A fictional person validated against a schema.
    Person {
        #[arg(default_value = "Indian")]
        place: String,
    },
    /// Three facts as a structured object.
    Facts {
        #[arg(default_value = "milky way")]
        topic: String,
    },
    /// Let the model call a multiply tool and answer with its result.
    ToolCall {
        #[arg(default_value = "what is the multiplication of 3 * 39?")]
        question: String,
    },
    /// Interactive chat with caller-owned history; type `exit` to quit.
    Chat {
        /// System prompt for the session.
        #[arg(long, default_value = "You are a helpful assistant.")]
        system: String,
    },
}

impl Demo {
    pub fn name(&self) -> &'static str {
        match self {
            Demo::Simple { .. } => "simple",
            Demo::Sequential { .. } => "sequential",
            Demo::Parallel { .. } => "parallel",
            Demo::Conditional { .. } => "conditional",
            Demo::Joke { .. } => "joke",
            Demo::WordCount { .. } => "word-count",
            Demo::Report { .. } => "report",
            Demo::Json => "json",
            Demo::Person { .. } => "person",
            Demo::Facts { .. } => "facts",
            Demo::ToolCall { .. } => "tool-call",
            Demo::Chat { .. } => "chat",
        }
    }

    /// The demo's pipeline; `None` for the tool-call loop and the chat session, which
    /// drive the model turn by turn.
    pub fn build(&self, model: &Arc<dyn ChatModel>) -> Result<Option<Node>, BuildError> {
        let node = match self {
            Demo::Simple { .. } => pipelines::simple_chain(model)?,
            Demo::Sequential { .. } => pipelines::sequential_chain(model)?,
            Demo::Parallel { .. } => pipelines::parallel_chain(model)?,
            Demo::Conditional { .. } => pipelines::conditional_chain(model)?,
            Demo::Joke { .. } => pipelines::joke_chain(model)?,
            Demo::WordCount { .. } => pipelines::word_count_chain(model)?,
            Demo::Report { max_words, .. } => pipelines::report_chain(model, *max_words)?,
            Demo::Json => pipelines::json_chain(model)?,
            Demo::Person { .. } => pipelines::person_chain(model)?,
            Demo::Facts { .. } => pipelines::facts_chain(model)?,
            Demo::ToolCall { .. } | Demo::Chat { .. } => return Ok(None),
        };
        Ok(Some(node))
    }

    /// Input mapping for the pipeline.
    pub fn input(&self) -> Value {
        match self {
            Demo::Simple { topic }
            | Demo::Parallel { topic }
            | Demo::Joke { topic }
            | Demo::WordCount { topic }
            | Demo::Report { topic, .. }
            | Demo::Facts { topic } => Value::map([("topic", topic.as_str())]),
            Demo::Sequential { profession } => Value::map([("profession", profession.as_str())]),
            Demo::Conditional { feedback } => Value::map([("text", feedback.as_str())]),
            Demo::Person { place } => Value::map([("place", place.as_str())]),
            Demo::ToolCall { question } => Value::from(question.as_str()),
            Demo::Json | Demo::Chat { .. } => Value::Map(Default::default()),
        }
    }

    /// Scripted model for `--mock`: replies shaped like what each pipeline expects.
    pub fn mock_model(&self) -> MockChatModel {
        match self {
            Demo::Conditional { .. } => MockChatModel::from_fn(|messages| {
                let prompt = last_content(messages);
                let reply = if prompt.starts_with("Classify") {
                    let lower = prompt.to_lowercase();
                    let negative = ["worst", "disappointed", "bad", "broke"]
                        .iter()
                        .any(|w| lower.contains(w));
                    let sentiment = if negative { "negative" } else { "positive" };
                    format!("{{\"sentiment\": \"{}\"}}", sentiment)
                } else {
                    mock_reply(messages)
                };
                Ok(ChatResponse::text(reply))
            }),
            Demo::Json => MockChatModel::with_text([
                r#"{"name": "Asha Rao", "age": 29, "city": "Pune"}"#,
            ]),
            Demo::Person { .. } => MockChatModel::with_text([
                "```json\n{\"name\": \"Arjun Mehta\", \"age\": \"34\", \"city\": \"Jaipur\"}\n```",
            ]),
            Demo::Facts { .. } => MockChatModel::with_text([concat!(
                "```json\n{\n",
                "\t\"fact_1\": \"The Milky Way is a barred spiral galaxy.\",\n",
                "\t\"fact_2\": \"It is about 100,000 light-years across.\",\n",
                "\t\"fact_3\": \"Sagittarius A* sits at its center.\"\n",
                "}\n```",
            )]),
            Demo::ToolCall { .. } => MockChatModel::new(vec![
                ChatResponse::text("").with_tool_calls(vec![ToolCall {
                    id: Some("call_mock_1".to_string()),
                    name: "multiply".to_string(),
                    arguments: r#"{"a": 3, "b": 39}"#.to_string(),
                }]),
                ChatResponse::text("The multiplication of 3 * 39 is 117."),
            ]),
            _ => MockChatModel::from_fn(|messages| Ok(ChatResponse::text(mock_reply(messages)))),
        }
    }
}

fn last_content(messages: &[Message]) -> &str {
    messages.last().map(Message::content).unwrap_or_default()
}

/// `[mock] <first line of the prompt>`, cut to 80 characters.
fn mock_reply(messages: &[Message]) -> String {
    let first_line = last_content(messages).lines().next().unwrap_or_default();
    let clipped: String = first_line.chars().take(80).collect();
    format!("[mock] {}", clipped)
}
