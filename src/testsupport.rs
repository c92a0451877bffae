//! Shared test fixtures for config, reducer and session tests.

use crate::error::EvalError;
use crate::repl::Evaluator;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!("eml-repl-{prefix}-{millis}-{suffix}"));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Evaluator with canned answers that records every request it sees.
///
/// Unknown requests fail with `EvalError::Unavailable`.
#[derive(Debug, Default)]
pub struct ScriptedEvaluator {
    answers: HashMap<String, String>,
    requests: Vec<String>,
}

impl ScriptedEvaluator {
    pub fn new<const N: usize>(answers: [(&str, &str); N]) -> Self {
        Self {
            answers: answers
                .into_iter()
                .map(|(q, r)| (q.to_string(), r.to_string()))
                .collect(),
            requests: Vec::new(),
        }
    }

    pub fn requests(&self) -> &[String] {
        &self.requests
    }
}

impl Evaluator for ScriptedEvaluator {
    fn evaluate(&mut self, request: &str) -> Result<String, EvalError> {
        self.requests.push(request.to_string());
        self.answers
            .get(request)
            .cloned()
            .ok_or_else(|| EvalError::Unavailable(format!("no scripted answer for `{request}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_dir_fixture_writes_nested_files() {
        let fixture = TestTempDir::new("fixture");
        let file = fixture.write_text("nested/file.txt", "hello");
        assert_eq!(fs::read_to_string(file).unwrap(), "hello");
        assert!(fixture.path().exists());
    }

    #[test]
    fn scripted_evaluator_answers_and_records() {
        let mut eval = ScriptedEvaluator::new([("a", "1")]);
        assert_eq!(eval.evaluate("a").unwrap(), "1");
        assert!(eval.evaluate("b").is_err());
        assert_eq!(eval.requests(), &["a".to_string(), "b".to_string()]);
    }
}
