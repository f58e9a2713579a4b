//! Shared test helpers: travel tools and event builders.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use roc_bridge::config::RocConfig;
use roc_bridge::error::RocError;
use roc_bridge::roc::{ReturnControlProcessor, ScriptedPrompt};
use roc_bridge::tools::{AgentTool, ToolRegistry};
use serde_json::{json, Value};

/// Counts how many times each test tool ran.
#[derive(Debug, Default)]
pub struct CallCounter {
    weather: AtomicUsize,
    booking: AtomicUsize,
}

impl CallCounter {
    pub fn weather(&self) -> usize {
        self.weather.load(Ordering::SeqCst)
    }

    pub fn booking(&self) -> usize {
        self.booking.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.weather() + self.booking()
    }
}

/// Registry with a sync `get_weather`, an async `book_hotel` and a failing `get_traffic`.
pub fn travel_registry(counter: Arc<CallCounter>) -> ToolRegistry {
    let weather_counter = counter.clone();
    let booking_counter = counter;
    ToolRegistry::new()
        .with(AgentTool::from_sync(
            "get_weather",
            "Weather for a city",
            move |args, _ctx| {
                weather_counter.weather.fetch_add(1, Ordering::SeqCst);
                let city = args.get_str("city")?;
                Ok(json!(format!("{city}: 24C, light drizzle")))
            },
        ))
        .with(AgentTool::new(
            "book_hotel",
            "Book a hotel",
            move |args, _ctx| {
                let counter = booking_counter.clone();
                async move {
                    tokio::task::yield_now().await;
                    counter.booking.fetch_add(1, Ordering::SeqCst);
                    Ok(json!({
                        "hotel": args.get_str("hotel")?,
                        "nights": args.get_i64("nights")?,
                        "breakfast": args.get_bool("breakfast").unwrap_or(false),
                    }))
                }
            },
        ))
        .with(AgentTool::from_sync("get_traffic", "Traffic report", |_, _| {
            Err(RocError::tool("get_traffic", "traffic API unreachable"))
        }))
}

pub fn processor(registry: ToolRegistry, answers: &[&str]) -> (ReturnControlProcessor, Arc<ScriptedPrompt>) {
    processor_with_config(registry, answers, &RocConfig::default())
}

pub fn processor_with_config(
    registry: ToolRegistry,
    answers: &[&str],
    config: &RocConfig,
) -> (ReturnControlProcessor, Arc<ScriptedPrompt>) {
    let prompt = Arc::new(ScriptedPrompt::new(answers.iter().copied()));
    let processor = ReturnControlProcessor::with_config(Arc::new(registry), prompt.clone(), config);
    (processor, prompt)
}

/// A `functionInvocationInput` entry.
pub fn function_input(function: &str, invocation_type: &str, parameters: Value) -> Value {
    json!({
        "functionInvocationInput": {
            "actionGroup": "TravelActions",
            "agentId": "INLINE_AGENT",
            "function": function,
            "actionInvocationType": invocation_type,
            "parameters": parameters,
        }
    })
}

pub fn event(invocation_id: &str, inputs: Vec<Value>) -> Value {
    json!({ "invocationId": invocation_id, "invocationInputs": inputs })
}

pub fn weather_input(city: &str) -> Value {
    function_input(
        "get_weather",
        "RESULT",
        json!([{ "name": "city", "type": "string", "value": city }]),
    )
}

pub fn booking_input(invocation_type: &str) -> Value {
    function_input(
        "book_hotel",
        invocation_type,
        json!([
            { "name": "hotel", "type": "string", "value": "The Leela Palace" },
            { "name": "nights", "type": "number", "value": "2" },
            { "name": "breakfast", "type": "boolean", "value": "true" }
        ]),
    )
}
