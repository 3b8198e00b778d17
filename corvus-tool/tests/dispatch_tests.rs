//! Dispatcher state-machine tests with a scripted chat model.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use corvus_gemini::{Content, FunctionCall, GenerationResult, Part, Role};
use corvus_tool::{ChatModel, ChatOptions, DispatchError, Dispatcher, Tool, ToolError, ToolRegistry};
use serde_json::{Value, json};

/// A chat model that replays a fixed script and records every conversation
/// it was called with.
struct ScriptedModel {
    script: Mutex<VecDeque<GenerationResult>>,
    calls: Mutex<Vec<Vec<Content>>>,
}

impl ScriptedModel {
    fn new(script: Vec<GenerationResult>) -> Arc<Self> {
        Arc::new(Self { script: Mutex::new(script.into()), calls: Mutex::new(Vec::new()) })
    }

    fn recorded_calls(&self) -> Vec<Vec<Content>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn generate(
        &self,
        conversation: Vec<Content>,
        _options: &ChatOptions,
    ) -> Result<GenerationResult, DispatchError> {
        self.calls.lock().unwrap().push(conversation);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(DispatchError::Generation(corvus_gemini::Error::EmptyResponse))
    }
}

/// A tool that succeeds and echoes its arguments.
struct EchoTool;

#[async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &str {
        "echo"
    }
    fn description(&self) -> &str {
        "Echo the arguments back"
    }
    fn parameters_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }
    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        Ok(json!({ "echoed": args }))
    }
}

/// A tool that always fails.
struct BrokenTool;

#[async_trait]
impl Tool for BrokenTool {
    fn name(&self) -> &str {
        "broken"
    }
    fn description(&self) -> &str {
        "Always fails"
    }
    fn parameters_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }
    async fn execute(&self, _args: Value) -> Result<Value, ToolError> {
        Err(ToolError::Execution { tool: "broken".to_string(), message: "boom".to_string() })
    }
}

fn registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(EchoTool));
    registry.register(Arc::new(BrokenTool));
    registry
}

fn call(name: &str) -> FunctionCall {
    FunctionCall { name: name.to_string(), args: json!({"input": name}) }
}

/// Extract the function-response parts of a conversation turn.
fn response_parts(content: &Content) -> Vec<(&str, &Value)> {
    content
        .parts
        .iter()
        .filter_map(|part| match part {
            Part::FunctionResponse { function_response } => {
                Some((function_response.name.as_str(), &function_response.response))
            }
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn final_answer_passes_through_without_tools() {
    let model = ScriptedModel::new(vec![GenerationResult::FinalAnswer("done".into())]);
    let dispatcher = Dispatcher::new(model.clone(), registry());

    let answer =
        dispatcher.run(vec![Content::user("hi")], &ChatOptions::default()).await.unwrap();

    assert_eq!(answer, "done");
    assert_eq!(model.recorded_calls().len(), 1);
}

#[tokio::test]
async fn mixed_success_and_failure_produces_two_results_and_one_followup() {
    let model = ScriptedModel::new(vec![
        GenerationResult::ToolCalls(vec![call("echo"), call("broken")]),
        GenerationResult::FinalAnswer("final".into()),
    ]);
    let dispatcher = Dispatcher::new(model.clone(), registry());

    let answer =
        dispatcher.run(vec![Content::user("do both")], &ChatOptions::default()).await.unwrap();
    assert_eq!(answer, "final");

    // Exactly one follow-up generation call was made.
    let calls = model.recorded_calls();
    assert_eq!(calls.len(), 2);

    // The follow-up conversation ends with a single user turn batching
    // exactly two function responses, in request order.
    let followup = calls[1].last().unwrap();
    assert_eq!(followup.role, Some(Role::User));
    let responses = response_parts(followup);
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0].0, "echo");
    assert_eq!(responses[0].1["echoed"]["input"], "echo");
    assert_eq!(responses[1].0, "broken");
    assert!(responses[1].1["error"].as_str().unwrap().contains("boom"));

    // The model's own call turn was echoed back before the results.
    let call_turn = &calls[1][calls[1].len() - 2];
    assert_eq!(call_turn.role, Some(Role::Model));
    assert_eq!(call_turn.parts.len(), 2);
}

#[tokio::test]
async fn unknown_tool_yields_error_result_and_round_continues() {
    let model = ScriptedModel::new(vec![
        GenerationResult::ToolCalls(vec![call("nonexistent")]),
        GenerationResult::FinalAnswer("recovered".into()),
    ]);
    let dispatcher = Dispatcher::new(model.clone(), registry());

    let answer =
        dispatcher.run(vec![Content::user("go")], &ChatOptions::default()).await.unwrap();
    assert_eq!(answer, "recovered");

    let calls = model.recorded_calls();
    let responses = response_parts(calls[1].last().unwrap());
    assert_eq!(responses.len(), 1);
    assert!(responses[0].1["error"].as_str().unwrap().contains("unknown tool"));
}

#[tokio::test]
async fn followup_tool_calls_are_surfaced_not_discarded() {
    let model = ScriptedModel::new(vec![
        GenerationResult::ToolCalls(vec![call("echo")]),
        GenerationResult::ToolCalls(vec![call("echo")]),
    ]);
    let dispatcher = Dispatcher::new(model.clone(), registry());

    let err =
        dispatcher.run(vec![Content::user("loop")], &ChatOptions::default()).await.unwrap_err();
    assert!(matches!(err, DispatchError::UnresolvedToolCalls));

    // The single-round policy still made exactly one follow-up call.
    assert_eq!(model.recorded_calls().len(), 2);
}

#[tokio::test]
async fn generation_failure_propagates() {
    // Empty script: the first generate call fails.
    let model = ScriptedModel::new(vec![]);
    let dispatcher = Dispatcher::new(model, registry());

    let err =
        dispatcher.run(vec![Content::user("hi")], &ChatOptions::default()).await.unwrap_err();
    assert!(matches!(err, DispatchError::Generation(_)));
}

#[test]
fn registry_declarations_are_sorted_and_complete() {
    let declarations = registry().declarations();
    let names: Vec<&str> = declarations.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["broken", "echo"]);
}
