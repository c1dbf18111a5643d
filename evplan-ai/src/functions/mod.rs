//! Named, schema-described callables
//!
//! Each callable is a typed [`EventFunction`]. The registry stores them
//! behind [`FunctionDyn`], which moves the boundary to `serde_json::Value`
//! so in-process callers and the HTTP layer invoke them the same way.

mod events;
mod records;

pub use events::{GenerateEventThemes, RefineEventPlan};
pub use records::{
    FetchModerators, FetchParticipants, ModeratorsInput, ModeratorsOutput, ParticipantsInput,
    ParticipantsOutput,
};

use crate::llm::CompletionClient;
use evplan_common::DatabaseManager;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Invalid input for {function}: {message}")]
    InvalidInput { function: String, message: String },

    #[error("Failed to serialize output of {function}: {message}")]
    Serialization { function: String, message: String },
}

/// Discovery record for one callable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
    pub output_schema: Value,
}

/// A typed callable with declared input and output shapes
pub trait EventFunction: Send + Sync + 'static {
    type Args: DeserializeOwned + JsonSchema + Send;
    type Output: Serialize + JsonSchema + Send;

    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn call(
        &self,
        args: Self::Args,
    ) -> impl Future<Output = Result<Self::Output, RegistryError>> + Send;
}

type InvokeFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, RegistryError>> + Send + 'a>>;

/// Object-safe form of [`EventFunction`]
pub trait FunctionDyn: Send + Sync {
    fn descriptor(&self) -> FunctionDescriptor;
    fn invoke<'a>(&'a self, input: Value) -> InvokeFuture<'a>;
}

impl<F: EventFunction> FunctionDyn for F {
    fn descriptor(&self) -> FunctionDescriptor {
        FunctionDescriptor {
            name: EventFunction::name(self).to_string(),
            description: self.description().to_string(),
            input_schema: schemars::schema_for!(F::Args).to_value(),
            output_schema: schemars::schema_for!(F::Output).to_value(),
        }
    }

    fn invoke<'a>(&'a self, input: Value) -> InvokeFuture<'a> {
        Box::pin(async move {
            let function = EventFunction::name(self);

            // a missing body means "no arguments"
            let input = if input.is_null() {
                Value::Object(Default::default())
            } else {
                input
            };

            let args: F::Args =
                serde_json::from_value(input).map_err(|e| RegistryError::InvalidInput {
                    function: function.to_string(),
                    message: e.to_string(),
                })?;

            let output = self.call(args).await?;

            serde_json::to_value(output).map_err(|e| RegistryError::Serialization {
                function: function.to_string(),
                message: e.to_string(),
            })
        })
    }
}

/// Name → callable map
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: BTreeMap<&'static str, Arc<dyn FunctionDyn>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the four event-planning functions
    pub fn with_event_functions(client: CompletionClient, db: DatabaseManager) -> Self {
        let mut registry = Self::new();
        registry.register(GenerateEventThemes::new(client.clone()));
        registry.register(RefineEventPlan::new(client));
        registry.register(FetchModerators::new(db.clone()));
        registry.register(FetchParticipants::new(db));
        registry
    }

    /// Add a function. A later registration under the same name replaces the earlier one.
    pub fn register<F: EventFunction>(&mut self, function: F) {
        let name = EventFunction::name(&function);
        if self.functions.insert(name, Arc::new(function)).is_some() {
            warn!(function = name, "Replaced previously registered function");
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&'static str> {
        self.functions.keys().copied().collect()
    }

    pub fn descriptors(&self) -> Vec<FunctionDescriptor> {
        self.functions.values().map(|f| f.descriptor()).collect()
    }

    pub fn describe(&self, name: &str) -> Result<FunctionDescriptor, RegistryError> {
        self.functions
            .get(name)
            .map(|f| f.descriptor())
            .ok_or_else(|| RegistryError::UnknownFunction(name.to_string()))
    }

    /// Invoke `name` with a JSON input, returning its JSON output
    pub async fn invoke(&self, name: &str, input: Value) -> Result<Value, RegistryError> {
        let function = self
            .functions
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownFunction(name.to_string()))?;

        let invocation_id = Uuid::new_v4();
        let span = info_span!("invoke", function = name, %invocation_id);

        async move {
            debug!("Invoking function");
            let result = function.invoke(input).await;
            match &result {
                Ok(_) => info!("Function completed"),
                Err(e) => warn!(error = %e, "Function rejected invocation"),
            }
            result
        }
        .instrument(span)
        .await
    }
}
