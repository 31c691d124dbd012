//! Pipeline builders for each demo.
//!
//! Every builder takes the chat model to use and returns a composed [`Node`]. Input
//! keys are listed on each builder.

use std::sync::Arc;

use langchain::{
    BranchNode, BuildError, ChatModel, FieldSchema, FieldType, InstructionStyle, LambdaNode,
    ModelNode, Node, ParallelNode, ParserNode, PassthroughNode, PromptNode, RunnableError, Schema,
    Tool, Value,
};

/// Default word limit above which [`report_chain`] summarizes.
pub const REPORT_WORD_LIMIT: usize = 500;

fn llm(model: &Arc<dyn ChatModel>) -> ModelNode {
    ModelNode::new(model.clone())
}

/// `prompt | model | text parser` for a one-template step.
fn ask(model: &Arc<dyn ChatModel>, template: &str) -> Result<Node, BuildError> {
    Ok(PromptNode::new(template)? | llm(model) | ParserNode::text())
}

/// Input: `{topic}`.
pub fn simple_chain(model: &Arc<dyn ChatModel>) -> Result<Node, BuildError> {
    ask(model, "Give me 3 facts about {topic}.")
}

/// Input: `{profession}`. The first answer is summarized by a second call.
pub fn sequential_chain(model: &Arc<dyn ChatModel>) -> Result<Node, BuildError> {
    Ok(ask(model, "What is an {profession} and what do they do?")?
        | ask(model, "Summarize the {text} in 5 bullet points.")?)
}

/// Input: `{topic}`. Notes and quiz questions are generated in parallel, then merged.
pub fn parallel_chain(model: &Arc<dyn ChatModel>) -> Result<Node, BuildError> {
    let fan_out = ParallelNode::new()
        .branch("notes", ask(model, "Generate short notes for the following {topic}")?)
        .branch("ques", ask(model, "Generate 5 questions for the following {topic}")?);
    Ok(fan_out
        | ask(
            model,
            "Merge the provided notes and questions into a single document.\nnotes -> {notes}\nquestions -> {ques}",
        )?)
}

/// Schema of the sentiment classifier.
pub fn sentiment_schema() -> Result<Schema, BuildError> {
    Schema::from_fields(
        "Feedback",
        [FieldSchema::enumeration(
            "sentiment",
            ["positive", "negative"],
            "Give the sentiment of the feedback",
        )],
    )
}

/// Input: `{text}`. Classifies the feedback, then replies with the chain for its sentiment.
///
/// The feedback text travels next to the classification so the reply prompts can quote it.
pub fn conditional_chain(model: &Arc<dyn ChatModel>) -> Result<Node, BuildError> {
    let parser = ParserNode::structured(sentiment_schema()?);
    let classify = PromptNode::new(
        "Classify the sentiment of the following text as positive or negative\n{text}\n{format_instructions}",
    )?
    .with_partial("format_instructions", parser.format_instructions())
        | llm(model)
        | parser;

    let feedback = LambdaNode::new(|input: Value| {
        input
            .get("text")
            .cloned()
            .ok_or_else(|| RunnableError::ExecutionFailed("input has no `text`".to_string()))
    })
    .with_name("feedback");

    let is = |wanted: &'static str| {
        move |v: &Value| {
            v.get("classification")
                .and_then(|c| c.get("sentiment"))
                .and_then(Value::as_str)
                == Some(wanted)
        }
    };

    let reply = BranchNode::new()
        .when(
            is("positive"),
            ask(model, "Reply in one line to this positive feedback\n{feedback}")?,
        )
        .when(
            is("negative"),
            ask(model, "Reply in one line to this negative feedback\n{feedback}")?,
        )
        .otherwise(LambdaNode::new(|_| Ok(Value::from("no sentiment found"))).with_name("no_sentiment"));

    Ok(ParallelNode::new()
        .branch("classification", classify)
        .branch("feedback", feedback)
        | reply)
}

/// Input: `{topic}`. Tells a joke and explains it, keeping the joke next to the explanation.
pub fn joke_chain(model: &Arc<dyn ChatModel>) -> Result<Node, BuildError> {
    Ok(ask(model, "Write a joke about {topic}")?
        | ParallelNode::new()
            .branch("joke", PassthroughNode::new())
            .branch("explanation", ask(model, "Explain the joke from {response}")?))
}

/// Number of whitespace-separated words in the input text.
pub fn word_counter() -> LambdaNode {
    LambdaNode::new(|input: Value| {
        let text = input.as_text().ok_or_else(|| {
            RunnableError::ExecutionFailed(format!("cannot count words in a {}", input.type_name()))
        })?;
        Ok(Value::from(text.split_whitespace().count()))
    })
    .with_name("word_counter")
}

/// Input: `{topic}`. Tells a joke and counts its words.
pub fn word_count_chain(model: &Arc<dyn ChatModel>) -> Result<Node, BuildError> {
    Ok(ask(model, "Write a joke about {topic}")?
        | ParallelNode::new()
            .branch("joke", PassthroughNode::new())
            .branch("count", word_counter()))
}

/// Input: `{topic}`. Writes a report and summarizes it only when longer than `max_words`.
pub fn report_chain(model: &Arc<dyn ChatModel>, max_words: usize) -> Result<Node, BuildError> {
    let too_long = move |v: &Value| {
        v.as_text()
            .map(|t| t.split_whitespace().count() > max_words)
            .unwrap_or(false)
    };
    Ok(ask(model, "Write a short report about {topic}")?
        | BranchNode::new()
            .when(too_long, ask(model, "Summarize the following {text}")?)
            .otherwise(PassthroughNode::new()))
}

/// No input slots. Asks for a fictional person as free-form JSON.
pub fn json_chain(model: &Arc<dyn ChatModel>) -> Result<Node, BuildError> {
    let parser = ParserNode::json();
    Ok(PromptNode::new(
        "Give me the name, age and city of a fictional person\n{format_instruction}",
    )?
    .with_partial("format_instruction", parser.format_instructions())
        | llm(model)
        | parser)
}

/// Schema of a generated person: adults only, age accepted as a numeric string.
pub fn person_schema() -> Result<Schema, BuildError> {
    Ok(Schema::from_fields(
        "Person",
        [
            FieldSchema::string("name", "Name of the person"),
            FieldSchema::integer("age", "Age of the person").gt(18.0).coerce(),
            FieldSchema::string("city", "City the person is from"),
        ],
    )?
    .with_description("A fictional person"))
}

/// Input: `{place}`. Generates a person validated against [`person_schema`].
pub fn person_chain(model: &Arc<dyn ChatModel>) -> Result<Node, BuildError> {
    let parser = ParserNode::structured(person_schema()?);
    Ok(PromptNode::new(
        "Generate the name, age and city of a fictional {place} person\n{format_instructions}",
    )?
    .with_partial("format_instructions", parser.format_instructions())
        | llm(model)
        | parser)
}

/// Schema of three facts, rendered as a ```json snippet.
pub fn facts_schema() -> Result<Schema, BuildError> {
    Schema::from_fields(
        "Facts",
        (1..=3).map(|i| {
            FieldSchema::string(format!("fact_{}", i), format!("fact {} about the topic", i))
        }),
    )
}

/// Input: `{topic}`. Three facts as a structured object.
pub fn facts_chain(model: &Arc<dyn ChatModel>) -> Result<Node, BuildError> {
    let parser =
        ParserNode::structured(facts_schema()?).with_instruction_style(InstructionStyle::JsonSnippet);
    Ok(PromptNode::new("Give me 3 facts about the {topic}\n{format_instructions}")?
        .with_partial("format_instructions", parser.format_instructions())
        | llm(model)
        | parser)
}

/// `multiply(a, b)`: product of two numbers rounded to 2 decimals.
pub fn multiply_tool() -> Result<Tool, BuildError> {
    let args = Schema::from_fields(
        "multiply",
        [
            FieldSchema::new("a", FieldType::Number, "First number").coerce(),
            FieldSchema::new("b", FieldType::Number, "Second number").coerce(),
        ],
    )?;
    Tool::new(
        "multiply",
        "Given 2 numbers this tool returns their multiplication",
        args,
        |v: Value| {
            let a = v.get("a").and_then(Value::as_f64).unwrap_or_default();
            let b = v.get("b").and_then(Value::as_f64).unwrap_or_default();
            Ok(Value::from((a * b * 100.0).round() / 100.0))
        },
    )
}
