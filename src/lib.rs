//! roc-bridge — return-of-control event processing
//!
//! A remote agent runtime can hand tool calls back to the host instead of
//! running them itself. This crate takes such a batch of requests, coerces
//! their string-encoded parameters, optionally asks the user for
//! confirmation, runs the matching local tools and builds the session state
//! the runtime expects on its next turn.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use roc_bridge::prelude::*;
//!
//! # async fn example(event: serde_json::Value) -> roc_bridge::error::Result<()> {
//! let registry = ToolRegistry::new().with(AgentTool::from_sync(
//!     "get_weather",
//!     "Current weather for a city",
//!     |args, _ctx| Ok(serde_json::json!(format!("{}: 24C", args.get_str("city")?))),
//! ));
//! let processor = ReturnControlProcessor::new(Arc::new(registry));
//! let state = processor.process_json(&serde_json::Value::Null, &event).await?;
//! println!("{}", state.to_value()?);
//! # Ok(())
//! # }
//! ```

pub mod coerce;
pub mod config;
pub mod error;
pub mod prelude;
pub mod roc;
pub mod tools;
pub mod types;
pub mod util;

#[cfg(feature = "cli")]
pub mod cli;
