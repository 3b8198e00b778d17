//! The [`Tool`] trait and the name-to-handler registry.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use corvus_gemini::FunctionDeclaration;
use serde_json::Value;

use crate::error::ToolError;

/// An operation the generative model may invoke by name.
///
/// Implementations execute against an external collaborator and return the
/// raw JSON payload to fold back into the conversation. Argument validation
/// belongs to the tool; the dispatcher passes `args` through untouched.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The name the model uses to invoke this tool.
    fn name(&self) -> &str;

    /// One-line description shown to the model.
    fn description(&self) -> &str;

    /// JSON-schema object describing the accepted arguments.
    fn parameters_schema(&self) -> Value;

    /// Execute the tool with the model-supplied arguments.
    async fn execute(&self, args: Value) -> Result<Value, ToolError>;

    /// The declaration advertised to the model for this tool.
    fn declaration(&self) -> FunctionDeclaration {
        FunctionDeclaration {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

/// A fixed mapping from tool names to handlers.
///
/// Built once at startup and shared read-only with the dispatcher; nothing
/// registers tools mid-request.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its declared name, replacing any previous
    /// registration for that name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Look up a handler by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Declarations for every registered tool.
    pub fn declarations(&self) -> Vec<FunctionDeclaration> {
        let mut declarations: Vec<FunctionDeclaration> =
            self.tools.values().map(|tool| tool.declaration()).collect();
        declarations.sort_by(|a, b| a.name.cmp(&b.name));
        declarations
    }

    /// Whether no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }
}
