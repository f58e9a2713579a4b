//! Wire types exchanged with the remote agent runtime.

pub mod event;
pub mod result;

pub use event::{
    ActionInvocationType, FunctionInvocationInput, InvocationInput, ParameterDescriptor,
    ParameterType, ReturnControlEvent,
};
pub use result::{
    ConfirmationState, FunctionResult, ResponseBody, ResponseState, ReturnControlResult,
    SessionStateOut, ACCESS_DENIED_MESSAGE, RESERVED_SESSION_KEYS,
};
