//! Response parsing and request serialization tests for the Gemini API.
//!
//! These tests validate that real-world JSON responses deserialize correctly
//! into our types (text answers, function calls, missing fields) and that
//! request bodies serialize to the exact wire names the API expects
//! (camelCase keys, `HARM_CATEGORY_*` enums, task types).

use crate::generation::{
    Content, FunctionCall, FunctionDeclaration, GenerateContentRequest, GenerationConfig,
    GenerationResponse, GenerationResult, HarmBlockThreshold, HarmCategory, Part, Role,
    SafetySetting, Tool,
};
use crate::{Error, Model, TaskType};
use crate::embedding::EmbedContentRequest;
use serde_json::json;

// ── Basic text response ─────────────────────────────────────────────

#[test]
fn parse_simple_text_response() {
    let json = json!({
        "candidates": [{
            "content": {
                "parts": [{"text": "Hello, world!"}],
                "role": "model"
            },
            "finishReason": "STOP",
            "index": 0
        }]
    });

    let resp: GenerationResponse = serde_json::from_value(json).unwrap();
    assert_eq!(resp.text(), "Hello, world!");
    assert_eq!(resp.candidates.len(), 1);
    assert_eq!(resp.candidates[0].finish_reason.as_deref(), Some("STOP"));
    assert!(resp.function_calls().is_empty());
}

#[test]
fn parse_multi_part_text_response() {
    let json = json!({
        "candidates": [{
            "content": {
                "parts": [{"text": "part one, "}, {"text": "part two"}],
                "role": "model"
            }
        }]
    });

    let resp: GenerationResponse = serde_json::from_value(json).unwrap();
    assert_eq!(resp.text(), "part one, part two");
}

// ── Function call response ──────────────────────────────────────────

#[test]
fn parse_function_call_response() {
    let json = json!({
        "candidates": [{
            "content": {
                "parts": [{
                    "functionCall": {
                        "name": "get_weather",
                        "args": {"location": "Nairobi"}
                    }
                }],
                "role": "model"
            }
        }]
    });

    let resp: GenerationResponse = serde_json::from_value(json).unwrap();
    let calls = resp.function_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].name, "get_weather");
    assert_eq!(calls[0].args["location"], "Nairobi");
    assert_eq!(resp.text(), "");
}

#[test]
fn parse_function_call_without_args() {
    let json = json!({
        "candidates": [{
            "content": {
                "parts": [{"functionCall": {"name": "list_documents"}}],
                "role": "model"
            }
        }]
    });

    let resp: GenerationResponse = serde_json::from_value(json).unwrap();
    let calls = resp.function_calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].args.is_null());
}

// ── Tagged result extraction ────────────────────────────────────────

#[test]
fn into_result_final_answer() {
    let resp: GenerationResponse = serde_json::from_value(json!({
        "candidates": [{"content": {"parts": [{"text": "42"}], "role": "model"}}]
    }))
    .unwrap();

    assert_eq!(resp.into_result().unwrap(), GenerationResult::FinalAnswer("42".into()));
}

#[test]
fn into_result_tool_calls() {
    let resp: GenerationResponse = serde_json::from_value(json!({
        "candidates": [{
            "content": {
                "parts": [
                    {"functionCall": {"name": "get_weather", "args": {"location": "Oslo"}}},
                    {"functionCall": {"name": "schedule_meeting", "args": {"topic": "standup"}}}
                ],
                "role": "model"
            }
        }]
    }))
    .unwrap();

    match resp.into_result().unwrap() {
        GenerationResult::ToolCalls(calls) => {
            assert_eq!(calls.len(), 2);
            assert_eq!(calls[0].name, "get_weather");
            assert_eq!(calls[1].name, "schedule_meeting");
        }
        other => panic!("expected tool calls, got {other:?}"),
    }
}

#[test]
fn into_result_empty_response_is_an_error() {
    let resp: GenerationResponse = serde_json::from_value(json!({"candidates": []})).unwrap();
    assert!(matches!(resp.into_result(), Err(Error::EmptyResponse)));

    // A candidate with no parts is just as empty.
    let resp: GenerationResponse = serde_json::from_value(json!({
        "candidates": [{"content": {"parts": [], "role": "model"}, "finishReason": "SAFETY"}]
    }))
    .unwrap();
    assert!(matches!(resp.into_result(), Err(Error::EmptyResponse)));
}

// ── Request serialization ───────────────────────────────────────────

#[test]
fn serialize_conversational_request() {
    let request = GenerateContentRequest {
        contents: vec![
            Content::user("What's the weather in Oslo?"),
            Content::model_function_calls(vec![FunctionCall {
                name: "get_weather".into(),
                args: json!({"location": "Oslo"}),
            }]),
            Content::function_responses(vec![crate::generation::FunctionResponse {
                name: "get_weather".into(),
                response: json!({"temp_c": 4}),
            }]),
        ],
        system_instruction: Some(Content::text("You are a helpful assistant.")),
        tools: Some(vec![Tool::new(vec![FunctionDeclaration {
            name: "get_weather".into(),
            description: "Look up current weather".into(),
            parameters: json!({"type": "object", "properties": {"location": {"type": "string"}}}),
        }])]),
        safety_settings: Some(SafetySetting::all_categories(HarmBlockThreshold::BlockOnlyHigh)),
        generation_config: Some(GenerationConfig {
            temperature: Some(0.2),
            max_output_tokens: Some(1024),
            ..Default::default()
        }),
    };

    let value = serde_json::to_value(&request).unwrap();

    assert_eq!(value["contents"][0]["role"], "user");
    assert_eq!(value["contents"][1]["parts"][0]["functionCall"]["name"], "get_weather");
    assert_eq!(value["contents"][2]["parts"][0]["functionResponse"]["response"]["temp_c"], 4);
    // System instruction has no role on the wire.
    assert!(value["systemInstruction"].get("role").is_none());
    assert_eq!(value["tools"][0]["functionDeclarations"][0]["name"], "get_weather");
    assert_eq!(value["generationConfig"]["maxOutputTokens"], 1024);
    assert!(value["generationConfig"].get("topK").is_none());
}

#[test]
fn serialize_safety_settings_wire_names() {
    let settings = SafetySetting::all_categories(HarmBlockThreshold::BlockMediumAndAbove);
    let value = serde_json::to_value(&settings).unwrap();

    let categories: Vec<&str> =
        value.as_array().unwrap().iter().map(|s| s["category"].as_str().unwrap()).collect();
    assert_eq!(
        categories,
        vec![
            "HARM_CATEGORY_HARASSMENT",
            "HARM_CATEGORY_HATE_SPEECH",
            "HARM_CATEGORY_SEXUALLY_EXPLICIT",
            "HARM_CATEGORY_DANGEROUS_CONTENT",
        ]
    );
    assert_eq!(value[0]["threshold"], "BLOCK_MEDIUM_AND_ABOVE");

    let one = SafetySetting::new(HarmCategory::Harassment, HarmBlockThreshold::BlockNone);
    assert_eq!(serde_json::to_value(one).unwrap()["threshold"], "BLOCK_NONE");
}

#[test]
fn serialize_embed_request() {
    let request = EmbedContentRequest {
        model: Model::GeminiEmbedding001.to_string(),
        content: Content::text("hello world"),
        task_type: Some(TaskType::RetrievalDocument),
        output_dimensionality: Some(768),
    };

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["model"], "models/gemini-embedding-001");
    assert_eq!(value["taskType"], "RETRIEVAL_DOCUMENT");
    assert_eq!(value["outputDimensionality"], 768);
    assert_eq!(value["content"]["parts"][0]["text"], "hello world");

    let query = EmbedContentRequest {
        model: Model::GeminiEmbedding001.to_string(),
        content: Content::text("hello world"),
        task_type: Some(TaskType::RetrievalQuery),
        output_dimensionality: Some(768),
    };
    assert_eq!(serde_json::to_value(&query).unwrap()["taskType"], "RETRIEVAL_QUERY");
}

// ── Part round-trips ────────────────────────────────────────────────

#[test]
fn part_roundtrip_preserves_variant() {
    let parts = vec![
        Part::Text { text: "hi".into() },
        Part::FunctionCall {
            function_call: FunctionCall { name: "f".into(), args: json!({"a": 1}) },
        },
        Part::FunctionResponse {
            function_response: crate::generation::FunctionResponse {
                name: "f".into(),
                response: json!({"ok": true}),
            },
        },
    ];

    let value = serde_json::to_value(&parts).unwrap();
    let back: Vec<Part> = serde_json::from_value(value).unwrap();
    assert_eq!(parts, back);
}

#[test]
fn content_helpers_tag_roles() {
    assert_eq!(Content::user("q").role, Some(Role::User));
    assert_eq!(Content::model("a").role, Some(Role::Model));
    assert_eq!(Content::text("sys").role, None);
    // Tool results are folded back in as a user turn.
    assert_eq!(Content::function_responses(vec![]).role, Some(Role::User));
}

// ── Model names ─────────────────────────────────────────────────────

#[test]
fn model_names() {
    assert_eq!(Model::default().to_string(), "models/gemini-2.5-flash");
    assert_eq!(Model::GeminiEmbedding001.as_str(), "models/gemini-embedding-001");

    let tuned: Model = "tunedModels/corvus-support-1a2b".into();
    assert_eq!(tuned.as_str(), "tunedModels/corvus-support-1a2b");
}
