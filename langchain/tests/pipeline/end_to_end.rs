//! Prompt → model → parser chains against the mock chat model.

use std::sync::Arc;

use langchain::{
    BranchNode, ChatResponse, FieldSchema, Message, MessageTemplate, MockChatModel, ModelNode,
    Node, ParallelNode, ParseFailure, ParserNode, PassthroughNode, PromptNode, Runnable,
    RunnableError, Schema, Tool, ToolCall, Toolkit, Value,
};

use crate::common::upper;

fn review_schema() -> Schema {
    Schema::from_fields(
        "Review",
        [
            FieldSchema::string("summary", "One sentence summary"),
            FieldSchema::enumeration("sentiment", ["pos", "neg"], "Overall sentiment"),
        ],
    )
    .unwrap()
}

/// **Scenario**: "Hi {name}" with {name: Ana} yields "Hi Ana"; {} fails with MissingVariable.
#[tokio::test]
async fn prompt_fills_slot_or_reports_missing_variable() {
    let prompt = PromptNode::new("Hi {name}").unwrap();
    assert_eq!(
        prompt.invoke(Value::map([("name", "Ana")])).await.unwrap(),
        Value::from("Hi Ana")
    );
    match prompt.invoke(Value::Map(Default::default())).await {
        Err(RunnableError::MissingVariable { node, variable, .. }) => {
            assert_eq!(node, "PromptTemplate");
            assert_eq!(variable, "name");
        }
        other => panic!("expected MissingVariable, got {:?}", other),
    }
}

/// **Scenario**: Sequence(Prompt("Topic: {t}"), upper, Passthrough) on {t: ai} is "TOPIC: AI".
#[tokio::test]
async fn prompt_lambda_passthrough_chain() {
    let chain = PromptNode::new("Topic: {t}").unwrap() | upper() | PassthroughNode::new();
    let out = chain.invoke(Value::map([("t", "ai")])).await.unwrap();
    assert_eq!(out, Value::from("TOPIC: AI"));
}

/// **Scenario**: Passthrough is the identity for every kind of value.
#[tokio::test]
async fn passthrough_is_identity() {
    let p = PassthroughNode::new();
    for x in [
        Value::Null,
        Value::from(3),
        Value::from("s"),
        Value::map([("a", 1)]),
        Value::from(vec![Message::user("hi")]),
    ] {
        assert_eq!(p.invoke(x.clone()).await.unwrap(), x);
    }
}

/// **Scenario**: The structured parser accepts a conforming object and rejects a missing
/// field or a value outside the enum, keeping the raw text.
#[tokio::test]
async fn structured_parser_enforces_schema() {
    let parser = ParserNode::structured(review_schema());

    let ok = parser
        .invoke(Value::from(r#"{"summary": "ok", "sentiment": "pos"}"#))
        .await
        .unwrap();
    assert_eq!(ok.get("summary"), Some(&Value::from("ok")));
    assert_eq!(ok.get("sentiment"), Some(&Value::from("pos")));

    match parser.invoke(Value::from(r#"{"summary": "ok"}"#)).await {
        Err(RunnableError::Parse { source, .. }) => {
            assert_eq!(source, ParseFailure::MissingField("sentiment".into()))
        }
        other => panic!("expected Parse error, got {:?}", other),
    }

    let raw = r#"{"summary": "ok", "sentiment": "neutral"}"#;
    match parser.invoke(Value::from(raw)).await {
        Err(RunnableError::Parse { raw: got, source, .. }) => {
            assert_eq!(got, raw);
            assert!(matches!(source, ParseFailure::NotInEnum { .. }));
        }
        other => panic!("expected Parse error, got {:?}", other),
    }
}

/// **Scenario**: prompt | model | text parser sends the formatted prompt as one user message.
#[tokio::test]
async fn prompt_model_parser_chain() {
    let mock = Arc::new(MockChatModel::with_text(["Why did the cat sit on the laptop?"]));
    let chain = PromptNode::new("Tell me a joke about {topic}").unwrap()
        | ModelNode::new(mock.clone())
        | ParserNode::text();

    let out = chain.invoke(Value::map([("topic", "cats")])).await.unwrap();
    assert_eq!(out, Value::from("Why did the cat sit on the laptop?"));
    assert_eq!(
        mock.calls(),
        vec![vec![Message::user("Tell me a joke about cats")]]
    );
}

/// **Scenario**: Structured output with format instructions feeds a branch that routes on
/// the parsed sentiment.
#[tokio::test]
async fn classify_then_route() {
    let parser = ParserNode::structured(review_schema());
    let classifier = Arc::new(MockChatModel::with_text([
        "```json\n{\"summary\": \"Broke after a day\", \"sentiment\": \"neg\"}\n```",
    ]));
    let prompt = PromptNode::new("Classify this feedback: {feedback}\n{format_instructions}")
        .unwrap()
        .with_partial("format_instructions", parser.format_instructions());

    let respond = |template: &str| PromptNode::new(template).unwrap() | upper();
    let router = BranchNode::new()
        .when(
            |v: &Value| v.get("sentiment").and_then(Value::as_str) == Some("pos"),
            respond("thanks: {summary}"),
        )
        .when(
            |v: &Value| v.get("sentiment").and_then(Value::as_str) == Some("neg"),
            respond("sorry: {summary}"),
        );

    let chain = prompt | ModelNode::new(classifier.clone()) | parser | router;
    let out = chain
        .invoke(Value::map([("feedback", "The product broke after one day.")]))
        .await
        .unwrap();
    assert_eq!(out, Value::from("SORRY: BROKE AFTER A DAY"));

    let sent = classifier.calls()[0][0].content().to_string();
    assert!(sent.contains("The product broke after one day."));
    assert!(sent.contains("JSON schema"), "{}", sent);
}

/// **Scenario**: Two model chains run in parallel on the same topic and a final step
/// combines them.
#[tokio::test]
async fn parallel_chains_then_combine() {
    let joke = Arc::new(MockChatModel::with_text(["a joke"]));
    let poem = Arc::new(MockChatModel::with_text(["a poem"]));
    let par = ParallelNode::new()
        .branch(
            "joke",
            PromptNode::new("Joke about {topic}").unwrap()
                | ModelNode::new(joke)
                | ParserNode::text(),
        )
        .branch(
            "poem",
            PromptNode::new("Poem about {topic}").unwrap()
                | ModelNode::new(poem)
                | ParserNode::text(),
        )
        .branch("topic", PassthroughNode::new());
    let combine = PromptNode::new("Joke: {joke}\nPoem: {poem}").unwrap();
    let chain: Node = par | combine;

    let out = chain.invoke(Value::map([("topic", "sea")])).await.unwrap();
    assert_eq!(out, Value::from("Joke: a joke\nPoem: a poem"));
}

/// **Scenario**: A chat prompt splices caller-owned history; the caller appends each turn.
#[tokio::test]
async fn chat_history_is_caller_owned() {
    let model = Arc::new(MockChatModel::with_text(["first answer", "second answer"]));
    let chain = PromptNode::chat(vec![
        MessageTemplate::system("You are a helpful assistant").unwrap(),
        MessageTemplate::placeholder("history"),
        MessageTemplate::user("{question}").unwrap(),
    ]) | ModelNode::new(model.clone())
        | ParserNode::text();

    let mut history: Vec<Message> = Vec::new();
    for question in ["q1", "q2"] {
        let answer = chain
            .invoke(Value::map([
                ("history", Value::from(history.clone())),
                ("question", Value::from(question)),
            ]))
            .await
            .unwrap();
        history.push(Message::user(question));
        history.push(Message::assistant(answer.to_string()));
    }

    let calls = model.calls();
    assert_eq!(calls[0].len(), 2);
    assert_eq!(
        calls[1],
        vec![
            Message::system("You are a helpful assistant"),
            Message::user("q1"),
            Message::assistant("first answer"),
            Message::user("q2"),
        ]
    );
}

/// **Scenario**: A tool call round trip: the model asks for a tool, the toolkit answers,
/// and the model sees the tool message on the next turn.
#[tokio::test]
async fn tool_call_round_trip() {
    let args = Schema::from_fields(
        "multiply",
        [
            FieldSchema::integer("a", "First factor"),
            FieldSchema::integer("b", "Second factor"),
        ],
    )
    .unwrap();
    let multiply = Tool::new("multiply", "Multiply two integers", args, |v: Value| {
        let a = v.get("a").and_then(Value::as_i64).unwrap_or_default();
        let b = v.get("b").and_then(Value::as_i64).unwrap_or_default();
        Ok(Value::from(a * b))
    })
    .unwrap();
    let toolkit = Toolkit::new([multiply]).unwrap();

    let call = ToolCall {
        id: Some("call-7".into()),
        name: "multiply".into(),
        arguments: r#"{"a": 6, "b": 7}"#.into(),
    };
    let model = Arc::new(MockChatModel::new(vec![
        ChatResponse::text("").with_tool_calls(vec![call]),
        ChatResponse::text("6 times 7 is 42"),
    ]));
    let node = ModelNode::new(model.clone());

    let mut messages = vec![Message::user("What is 6 times 7?")];
    let reply = node.invoke(Value::from(messages.clone())).await.unwrap();
    let assistant = reply.as_message().cloned().unwrap();
    assert_eq!(assistant.tool_calls().len(), 1);
    messages.push(assistant.clone());
    for call in assistant.tool_calls() {
        messages.push(toolkit.call(call).unwrap());
    }
    let final_reply = node.invoke(Value::from(messages)).await.unwrap();

    assert_eq!(final_reply.as_text(), Some("6 times 7 is 42"));
    let second_turn = &model.calls()[1];
    assert_eq!(
        second_turn.last(),
        Some(&Message::tool("42", Some("call-7".into())))
    );
}

#[test]
fn draw_ascii_shows_composed_tree() {
    let chain = PromptNode::new("Topic: {t}").unwrap()
        | ParallelNode::new()
            .branch("a", upper())
            .branch("b", PassthroughNode::new());
    let drawn = chain.draw_ascii();
    assert!(drawn.starts_with("RunnableSequence"), "{}", drawn);
    assert!(drawn.contains("a: upper"), "{}", drawn);
    assert!(drawn.contains("b: RunnablePassthrough"), "{}", drawn);
}
