//! Interactive confirmation before a tool call is run or reported.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};

use super::invoker::ToolInvoker;
use crate::error::{Result, RocError};
use crate::tools::{Tool, ToolArguments};
use crate::types::{ConfirmationState, FunctionInvocationInput, FunctionResult, ACCESS_DENIED_MESSAGE};

/// Printed when an answer is neither yes nor no.
pub const REPROMPT_MESSAGE: &str = "Please enter 'y' for yes or 'n' for no.";

/// Line-oriented channel to the user.
#[async_trait]
pub trait ConfirmationPrompt: Send + Sync {
    /// Show `prompt` and read one line. `Ok(None)` means the input is closed.
    async fn ask(&self, prompt: &str) -> Result<Option<String>>;

    /// Show an informational line.
    async fn notify(&self, message: &str) -> Result<()>;
}

/// Prompts on stdout and reads answers from stdin.
pub struct StdioPrompt {
    stdin: tokio::sync::Mutex<BufReader<Stdin>>,
}

impl StdioPrompt {
    pub fn new() -> Self {
        Self {
            stdin: tokio::sync::Mutex::new(BufReader::new(tokio::io::stdin())),
        }
    }
}

impl Default for StdioPrompt {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfirmationPrompt for StdioPrompt {
    async fn ask(&self, prompt: &str) -> Result<Option<String>> {
        let mut stdin = self.stdin.lock().await;
        let mut stdout = tokio::io::stdout();
        stdout.write_all(prompt.as_bytes()).await?;
        stdout.flush().await?;

        let mut line = String::new();
        if stdin.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    async fn notify(&self, message: &str) -> Result<()> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(message.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
        Ok(())
    }
}

/// Replays canned answers. For tests and non-interactive hosts.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<String>>,
    transcript: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            transcript: Mutex::new(Vec::new()),
        }
    }

    /// Every prompt and notice shown so far, in order.
    pub fn transcript(&self) -> Vec<String> {
        self.transcript
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default()
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.answers.lock().map(|a| a.len()).unwrap_or_default()
    }

    fn record(&self, line: &str) -> Result<()> {
        self.transcript
            .lock()
            .map_err(|_| RocError::InvalidState("prompt transcript poisoned".into()))?
            .push(line.to_string());
        Ok(())
    }
}

#[async_trait]
impl ConfirmationPrompt for ScriptedPrompt {
    async fn ask(&self, prompt: &str) -> Result<Option<String>> {
        self.record(prompt)?;
        let answer = self
            .answers
            .lock()
            .map_err(|_| RocError::InvalidState("prompt answers poisoned".into()))?
            .pop_front();
        Ok(answer)
    }

    async fn notify(&self, message: &str) -> Result<()> {
        self.record(message)
    }
}

/// States of one confirmation exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    AwaitingInput,
    Approved,
    Denied,
}

impl GateState {
    /// Next state after reading `answer`. Only yes/no tokens are terminal.
    pub fn from_answer(answer: &str) -> Self {
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => Self::Approved,
            "n" | "no" => Self::Denied,
            _ => Self::AwaitingInput,
        }
    }
}

/// What the user is asked about.
#[derive(Clone, Copy)]
pub enum ConfirmationTarget<'a> {
    /// A resolved tool; approval may run it.
    Tool(&'a dyn Tool),
    /// A function name shown for display only.
    Name(&'a str),
}

impl ConfirmationTarget<'_> {
    pub fn display_name(&self) -> &str {
        match self {
            Self::Tool(tool) => tool.name(),
            Self::Name(name) => name,
        }
    }
}

/// Asks the user before a tool call and produces the matching fragment.
pub struct ConfirmationGate {
    prompt: Arc<dyn ConfirmationPrompt>,
    invoker: ToolInvoker,
    max_attempts: Option<u32>,
    denial_message: String,
}

impl ConfirmationGate {
    pub fn new(prompt: Arc<dyn ConfirmationPrompt>, invoker: ToolInvoker) -> Self {
        Self {
            prompt,
            invoker,
            max_attempts: None,
            denial_message: ACCESS_DENIED_MESSAGE.to_string(),
        }
    }

    /// Give up with [`RocError::InvalidState`] after this many unrecognized answers.
    pub fn with_max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_denial_message(mut self, message: impl Into<String>) -> Self {
        self.denial_message = message.into();
        self
    }

    /// Prompt until the user approves or denies, then build the fragment.
    ///
    /// | decision | `include_result` | fragment |
    /// |---|---|---|
    /// | approve | true | tool output + `CONFIRM` |
    /// | approve | false | bare `CONFIRM`, tool not run |
    /// | deny | true | denial message + `DENY`, tool not run |
    /// | deny | false | bare `DENY` |
    pub async fn confirm(
        &self,
        request: &FunctionInvocationInput,
        target: ConfirmationTarget<'_>,
        args: &ToolArguments,
        include_result: bool,
    ) -> Result<FunctionResult> {
        let state = self.await_decision(target.display_name(), args).await?;
        tracing::info!(function = %request.function, decision = ?state, include_result, "confirmation answered");

        match (state, include_result) {
            (GateState::Approved, true) => match target {
                ConfirmationTarget::Tool(tool) => {
                    self.invoker
                        .invoke(request, tool, args, Some(ConfirmationState::Confirm))
                        .await
                }
                ConfirmationTarget::Name(name) => Err(RocError::InvalidArgument(format!(
                    "cannot produce a result for {name}: no tool was resolved"
                ))),
            },
            (GateState::Approved, false) => Ok(FunctionResult::decision(request, ConfirmationState::Confirm)),
            (GateState::Denied, true) => Ok(FunctionResult::success(request, self.denial_message.clone())
                .with_confirmation(ConfirmationState::Deny)),
            (GateState::Denied, false) => Ok(FunctionResult::decision(request, ConfirmationState::Deny)),
            (GateState::AwaitingInput, _) => Err(RocError::InvalidState(
                "confirmation finished without a decision".into(),
            )),
        }
    }

    async fn await_decision(&self, tool_name: &str, args: &ToolArguments) -> Result<GateState> {
        let message = format!(
            "Do you want to proceed with {tool_name} with parameters : {}? (y/n): ",
            args.to_value()
        );
        let mut attempts = 0u32;
        loop {
            if self.max_attempts.is_some_and(|max| attempts >= max) {
                return Err(RocError::InvalidState(format!(
                    "no yes/no answer for {tool_name} after {attempts} attempts"
                )));
            }
            attempts += 1;

            let answer = self.prompt.ask(&message).await?.ok_or_else(|| {
                RocError::InvalidState(format!("input closed while confirming {tool_name}"))
            })?;
            match GateState::from_answer(&answer) {
                GateState::AwaitingInput => {
                    tracing::debug!(tool = tool_name, answer = %answer.trim(), "unrecognized confirmation answer");
                    self.prompt.notify(REPROMPT_MESSAGE).await?;
                }
                decided => return Ok(decided),
            }
        }
    }
}

impl std::fmt::Debug for ConfirmationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfirmationGate")
            .field("invoker", &self.invoker)
            .field("max_attempts", &self.max_attempts)
            .field("denial_message", &self.denial_message)
            .finish()
    }
}
