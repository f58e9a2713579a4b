//! Return-of-control processing: invoker, confirmation gate, batch processor.

pub mod confirmation;
pub mod invoker;
pub mod processor;

pub use confirmation::{
    ConfirmationGate, ConfirmationPrompt, ConfirmationTarget, GateState, ScriptedPrompt,
    StdioPrompt, REPROMPT_MESSAGE,
};
pub use invoker::{stringify_output, ToolInvoker};
pub use processor::{validate_session_state, ReturnControlProcessor};
