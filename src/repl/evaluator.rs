//! Evaluator capabilities injected into the REPL state machine.
//!
//! The REPL treats an evaluator as an opaque string-to-string function. Two
//! flavors exist: [`Evaluator`] answers synchronously inside the reducer, and
//! [`AsyncEvaluator`] answers later through [`crate::repl::Session`].

use crate::error::EvalError;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Prefix placed in front of an evaluator failure when it becomes a response.
pub const ERROR_MARKER: &str = "error: ";

/// Synchronous evaluator capability.
pub trait Evaluator {
    fn evaluate(&mut self, request: &str) -> Result<String, EvalError>;
}

/// Asynchronous evaluator capability.
#[async_trait]
pub trait AsyncEvaluator: Send {
    async fn evaluate(&mut self, request: &str) -> Result<String, EvalError>;
}

/// Turn an evaluator outcome into the response text stored in history.
pub fn response_text(outcome: Result<String, EvalError>) -> String {
    match outcome {
        Ok(response) => response,
        Err(err) => format!("{ERROR_MARKER}{err}"),
    }
}

/// Evaluator that answers with the request itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoEvaluator;

impl Evaluator for EchoEvaluator {
    fn evaluate(&mut self, request: &str) -> Result<String, EvalError> {
        Ok(request.to_string())
    }
}

/// Adapter that lets a closure act as an [`Evaluator`].
pub struct FnEvaluator<F>(pub F);

impl<F> Evaluator for FnEvaluator<F>
where
    F: FnMut(&str) -> Result<String, EvalError>,
{
    fn evaluate(&mut self, request: &str) -> Result<String, EvalError> {
        (self.0)(request)
    }
}

/// Runs a synchronous evaluator behind the async interface.
pub struct Blocking<E>(pub E);

#[async_trait]
impl<E> AsyncEvaluator for Blocking<E>
where
    E: Evaluator + Send,
{
    async fn evaluate(&mut self, request: &str) -> Result<String, EvalError> {
        self.0.evaluate(request)
    }
}

/// Spawns an external program once per request.
///
/// The request plus a trailing newline is written to the program's stdin.
/// The response is stdout followed by stderr. A non-zero exit status is not a
/// failure: whatever the program printed is the answer.
#[derive(Debug, Clone)]
pub struct CommandEvaluator {
    program: String,
    args: Vec<String>,
    strip_trailing_newline: bool,
    timeout: Option<Duration>,
}

impl CommandEvaluator {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            strip_trailing_newline: true,
            timeout: None,
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Keep or drop one trailing newline of the combined output.
    pub fn with_strip_trailing_newline(mut self, strip: bool) -> Self {
        self.strip_trailing_newline = strip;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Parse a whitespace-separated command line such as `"python3 -i"`.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program).with_args(parts.collect()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    async fn run(&self, request: &str) -> Result<String, EvalError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(EvalError::Spawn)?;

        if let Some(mut stdin) = child.stdin.take() {
            let mut payload = request.as_bytes().to_vec();
            payload.push(b'\n');
            match stdin.write_all(&payload).await {
                // Programs that never read stdin may exit before we finish writing.
                Err(err) if err.kind() == std::io::ErrorKind::BrokenPipe => {}
                other => other?,
            }
            // Dropping stdin closes the pipe so line-oriented programs see EOF.
        }

        let output = child.wait_with_output().await?;
        tracing::debug!(
            program = %self.program,
            status = ?output.status.code(),
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "evaluator process finished"
        );

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        if self.strip_trailing_newline && text.ends_with('\n') {
            text.pop();
            if text.ends_with('\r') {
                text.pop();
            }
        }
        Ok(text)
    }
}

#[async_trait]
impl AsyncEvaluator for CommandEvaluator {
    async fn evaluate(&mut self, request: &str) -> Result<String, EvalError> {
        match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, self.run(request)).await {
                Ok(result) => result,
                Err(_) => Err(EvalError::Timeout(limit)),
            },
            None => self.run(request).await,
        }
    }
}
