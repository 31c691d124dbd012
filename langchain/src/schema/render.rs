//! Rendering a [`Schema`] into model-facing format instructions.
//!
//! Pure functions over the schema description; validation never depends on them.

use serde_json::{json, Map, Value as Json};

use super::{FieldSchema, FieldType, Schema};

/// How a schema is presented to the model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InstructionStyle {
    /// Full JSON schema document with an explanatory preamble.
    #[default]
    JsonSchema,
    /// A ```json snippet listing each field with its type and a `//` description.
    JsonSnippet,
    /// Markdown bullet list, one field per line.
    BulletList,
}

/// JSON schema (draft 7 subset) for `schema`. Also used as a tool's input schema.
pub fn json_schema(schema: &Schema) -> Json {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for field in schema.fields() {
        properties.insert(field.name.clone(), field_schema(field));
        if field.required {
            required.push(Json::from(field.name.clone()));
        }
    }

    let mut root = Map::new();
    root.insert("title".into(), json!(schema.name()));
    if let Some(description) = schema.description() {
        root.insert("description".into(), json!(description));
    }
    root.insert("type".into(), json!("object"));
    root.insert("properties".into(), Json::Object(properties));
    root.insert("required".into(), Json::Array(required));
    Json::Object(root)
}

fn field_schema(field: &FieldSchema) -> Json {
    let mut out = match type_schema(&field.ty) {
        Json::Object(map) => map,
        _ => Map::new(),
    };
    if !field.description.is_empty() {
        out.insert("description".into(), json!(field.description));
    }
    if let Some(gt) = field.greater_than {
        out.insert("exclusiveMinimum".into(), json!(gt));
    }
    if let Some(lt) = field.less_than {
        out.insert("exclusiveMaximum".into(), json!(lt));
    }
    Json::Object(out)
}

fn type_schema(ty: &FieldType) -> Json {
    match ty {
        FieldType::Any => json!({}),
        FieldType::Enum(allowed) => json!({ "type": "string", "enum": allowed }),
        FieldType::List(item) => json!({ "type": "array", "items": type_schema(item) }),
        other => json!({ "type": other.type_name() }),
    }
}

/// Renders `schema` as instruction text in the given style.
pub fn render_instructions(schema: &Schema, style: InstructionStyle) -> String {
    match style {
        InstructionStyle::JsonSchema => render_json_schema(schema),
        InstructionStyle::JsonSnippet => render_snippet(schema),
        InstructionStyle::BulletList => render_bullets(schema),
    }
}

fn render_json_schema(schema: &Schema) -> String {
    // Pretty printing a serde_json::Value cannot fail.
    let body = serde_json::to_string_pretty(&json_schema(schema)).unwrap_or_default();
    format!(
        "The output should be formatted as a JSON instance that conforms to the JSON schema below.\n\n\
         As an example, for the schema {{\"properties\": {{\"foo\": {{\"title\": \"Foo\", \"description\": \"a list of strings\", \"type\": \"array\", \"items\": {{\"type\": \"string\"}}}}}}, \"required\": [\"foo\"]}}\n\
         the object {{\"foo\": [\"bar\", \"baz\"]}} is a well-formatted instance of the schema. \
         The object {{\"properties\": {{\"foo\": [\"bar\", \"baz\"]}}}} is not well-formatted.\n\n\
         Here is the output schema:\n```\n{}\n```",
        body
    )
}

fn render_snippet(schema: &Schema) -> String {
    let lines: Vec<String> = schema
        .fields()
        .iter()
        .map(|f| {
            let optional = if f.required { "" } else { " (optional)" };
            format!("\t\"{}\": {}  // {}{}", f.name, type_label(&f.ty), f.description, optional)
        })
        .collect();
    format!(
        "The output should be a markdown code snippet formatted in the following schema, \
         including the leading and trailing \"```json\" and \"```\":\n\n```json\n{{\n{}\n}}\n```",
        lines.join("\n")
    )
}

fn render_bullets(schema: &Schema) -> String {
    let mut out = String::from("Respond with a single JSON object with these fields:\n");
    for f in schema.fields() {
        let presence = if f.required { "required" } else { "optional" };
        out.push_str(&format!(
            "- `{}` ({}, {}): {}\n",
            f.name,
            type_label(&f.ty),
            presence,
            f.description
        ));
    }
    out.push_str("Return only the JSON object, without commentary.");
    out
}

/// Short human-readable type, e.g. `one of "pos", "neg"` or `list of integer`.
fn type_label(ty: &FieldType) -> String {
    match ty {
        FieldType::Enum(allowed) => {
            let quoted: Vec<String> = allowed.iter().map(|a| format!("\"{}\"", a)).collect();
            format!("one of {}", quoted.join(", "))
        }
        FieldType::List(item) => format!("list of {}", type_label(item)),
        other => other.type_name().to_string(),
    }
}
