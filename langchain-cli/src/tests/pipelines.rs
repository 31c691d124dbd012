//! Unit tests for the demo pipeline builders.
//!
//! Each test wires a builder to a mock model and checks both the output and what the
//! model was sent.

use std::sync::Arc;

use langchain::{
    ChatModel, ChatResponse, Message, MockChatModel, ParseFailure, Runnable, RunnableError, Value,
};

use crate::pipelines::*;

fn model(mock: &Arc<MockChatModel>) -> Arc<dyn ChatModel> {
    mock.clone()
}

fn prompts(mock: &MockChatModel) -> Vec<String> {
    mock.calls()
        .iter()
        .map(|msgs| msgs.last().map(|m| m.content().to_string()).unwrap_or_default())
        .collect()
}

/// **Scenario**: The simple chain formats the topic into the prompt and returns the reply text.
#[tokio::test]
async fn simple_chain_returns_reply_text() {
    let mock = Arc::new(MockChatModel::with_text(["1. 2. 3."]));
    let out = simple_chain(&model(&mock))
        .unwrap()
        .invoke(Value::map([("topic", "UFC")]))
        .await
        .unwrap();
    assert_eq!(out, Value::from("1. 2. 3."));
    assert_eq!(prompts(&mock), vec!["Give me 3 facts about UFC."]);
}

/// **Scenario**: The second step of the sequential chain receives the first answer.
#[tokio::test]
async fn sequential_chain_feeds_first_answer_into_summary() {
    let mock = Arc::new(MockChatModel::with_text(["They build models.", "- builds models"]));
    let out = sequential_chain(&model(&mock))
        .unwrap()
        .invoke(Value::map([("profession", "AI engineer")]))
        .await
        .unwrap();
    assert_eq!(out, Value::from("- builds models"));
    assert_eq!(
        prompts(&mock),
        vec![
            "What is an AI engineer and what do they do?",
            "Summarize the They build models. in 5 bullet points.",
        ]
    );
}

/// **Scenario**: The merge prompt receives both parallel outputs by name.
#[tokio::test]
async fn parallel_chain_merges_both_branches() {
    let mock = Arc::new(MockChatModel::from_fn(|msgs| {
        let prompt = msgs.last().map(Message::content).unwrap_or_default();
        let reply = if prompt.starts_with("Generate short notes") {
            "NOTES"
        } else if prompt.starts_with("Generate 5 questions") {
            "QUESTIONS"
        } else {
            "MERGED"
        };
        Ok(ChatResponse::text(reply))
    }));
    let out = parallel_chain(&model(&mock))
        .unwrap()
        .invoke(Value::map([("topic", "SVM")]))
        .await
        .unwrap();
    assert_eq!(out, Value::from("MERGED"));
    let merge_prompt = prompts(&mock).pop().unwrap();
    assert!(merge_prompt.contains("notes -> NOTES"), "{}", merge_prompt);
    assert!(merge_prompt.contains("questions -> QUESTIONS"), "{}", merge_prompt);
}

fn sentiment_mock(sentiment: &'static str) -> Arc<MockChatModel> {
    Arc::new(MockChatModel::from_fn(move |msgs| {
        let prompt = msgs.last().map(Message::content).unwrap_or_default();
        if prompt.starts_with("Classify") {
            Ok(ChatResponse::text(format!("{{\"sentiment\": \"{}\"}}", sentiment)))
        } else {
            Ok(ChatResponse::text(format!("reply to: {}", prompt)))
        }
    }))
}

/// **Scenario**: Negative feedback is routed to the negative reply prompt with the original text.
#[tokio::test]
async fn conditional_chain_routes_negative_feedback() {
    let mock = sentiment_mock("negative");
    let out = conditional_chain(&model(&mock))
        .unwrap()
        .invoke(Value::map([("text", "worst phone ever")]))
        .await
        .unwrap();
    assert_eq!(
        out,
        Value::from("reply to: Reply in one line to this negative feedback\nworst phone ever")
    );
    assert!(prompts(&mock)[0].contains("worst phone ever"));
}

#[tokio::test]
async fn conditional_chain_routes_positive_feedback() {
    let mock = sentiment_mock("positive");
    let out = conditional_chain(&model(&mock))
        .unwrap()
        .invoke(Value::map([("text", "superb battery")]))
        .await
        .unwrap();
    assert!(out.to_string().contains("positive feedback"), "{}", out);
}

/// **Scenario**: A classifier answer outside the enum fails with a parse error, before any reply.
#[tokio::test]
async fn conditional_chain_rejects_unknown_sentiment() {
    let mock = sentiment_mock("neutral");
    let err = conditional_chain(&model(&mock))
        .unwrap()
        .invoke(Value::map([("text", "it is a phone")]))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RunnableError::Parse {
            source: ParseFailure::NotInEnum { .. },
            ..
        }
    ));
    assert_eq!(mock.call_count(), 1);
}

/// **Scenario**: The joke chain keeps the joke and explains it from the joke text.
#[tokio::test]
async fn joke_chain_keeps_joke_and_explains_it() {
    let mock = Arc::new(MockChatModel::with_text(["a short joke", "because it is short"]));
    let out = joke_chain(&model(&mock))
        .unwrap()
        .invoke(Value::map([("topic", "AI")]))
        .await
        .unwrap();
    assert_eq!(out.get("joke"), Some(&Value::from("a short joke")));
    assert_eq!(out.get("explanation"), Some(&Value::from("because it is short")));
    assert_eq!(prompts(&mock)[1], "Explain the joke from a short joke");
}

#[tokio::test]
async fn word_count_chain_counts_joke_words() {
    let mock = Arc::new(MockChatModel::with_text(["why did the robot cross"]));
    let out = word_count_chain(&model(&mock))
        .unwrap()
        .invoke(Value::map([("topic", "AI")]))
        .await
        .unwrap();
    assert_eq!(out.get("count"), Some(&Value::from(5usize)));
    assert_eq!(out.get("joke"), Some(&Value::from("why did the robot cross")));
}

/// **Scenario**: A report over the word limit is summarized; a short one passes through.
#[tokio::test]
async fn report_chain_summarizes_only_long_reports() {
    let mock = Arc::new(MockChatModel::with_text(["one two three four", "summary"]));
    let chain = report_chain(&model(&mock), 3).unwrap();
    let out = chain.invoke(Value::map([("topic", "x")])).await.unwrap();
    assert_eq!(out, Value::from("summary"));

    let short = Arc::new(MockChatModel::with_text(["one two"]));
    let chain = report_chain(&model(&short), 3).unwrap();
    let out = chain.invoke(Value::map([("topic", "x")])).await.unwrap();
    assert_eq!(out, Value::from("one two"));
    assert_eq!(short.call_count(), 1);
}

#[tokio::test]
async fn json_chain_needs_no_input_and_sends_instructions() {
    let mock = Arc::new(MockChatModel::with_text([r#"{"name": "A", "age": 30, "city": "B"}"#]));
    let out = json_chain(&model(&mock))
        .unwrap()
        .invoke(Value::Map(Default::default()))
        .await
        .unwrap();
    assert_eq!(out.get("age").and_then(Value::as_i64), Some(30));
    assert!(prompts(&mock)[0].ends_with("Return a JSON object."));
}

/// **Scenario**: The person schema coerces a numeric-string age and enforces age > 18.
#[tokio::test]
async fn person_chain_coerces_age_and_enforces_bound() {
    let mock = Arc::new(MockChatModel::with_text([
        r#"{"name": "Li Wei", "age": "34", "city": "Chengdu"}"#,
        r#"{"name": "Kid", "age": 12, "city": "Nowhere"}"#,
    ]));
    let chain = person_chain(&model(&mock)).unwrap();
    let input = Value::map([("place", "chinese")]);

    let adult = chain.invoke(input.clone()).await.unwrap();
    assert_eq!(adult.get("age"), Some(&Value::from(34)));

    let err = chain.invoke(input).await.unwrap_err();
    assert!(matches!(
        err,
        RunnableError::Parse {
            source: ParseFailure::OutOfRange { .. },
            ..
        }
    ));
}

#[tokio::test]
async fn facts_chain_uses_snippet_instructions() {
    let mock = Arc::new(MockChatModel::with_text([
        "```json\n{\"fact_1\": \"a\", \"fact_2\": \"b\", \"fact_3\": \"c\"}\n```",
    ]));
    let out = facts_chain(&model(&mock))
        .unwrap()
        .invoke(Value::map([("topic", "milky way")]))
        .await
        .unwrap();
    assert_eq!(out.get("fact_3"), Some(&Value::from("c")));
    assert!(prompts(&mock)[0].contains("\"fact_1\": string  // fact 1 about the topic"));
}

#[test]
fn multiply_tool_rounds_to_two_decimals() {
    let tool = multiply_tool().unwrap();
    let out = tool
        .invoke(&Value::map([("a", Value::from(0.333)), ("b", Value::from(1))]))
        .unwrap();
    assert_eq!(out, Value::from(0.33));
    assert_eq!(tool.spec().name, "multiply");
}
