//! GenerationExecutor - drives a batch of tasks through the key pool.
//!
//! Execution is strictly sequential: one task at a time, one backend call at
//! a time. A single rotation cursor is shared across the whole batch and is
//! never reset between tasks, so load spreads over the pool even when every
//! call succeeds. A key that fails is rotated past, not evicted; each task
//! gets at most `pool.len()` attempts before it is marked failed and the
//! batch moves on.

use std::time::Duration;

use crate::assembler;
use crate::collector::TaskResult;
use crate::gemini::{GeminiClient, GeminiError};
use crate::keys::{mask_key, KeyPool};
use crate::planner::Task;

/// Fixed delay between failed attempts, to avoid hammering a possibly
/// rate-limited backend.
pub const DEFAULT_ATTEMPT_DELAY: Duration = Duration::from_millis(500);

/// The narrow generation contract the executor depends on. Any backend with
/// equivalent semantics is substitutable; tests use scripted fakes.
#[allow(async_fn_in_trait)]
pub trait GenerationBackend {
    async fn generate(
        &self,
        api_key: &str,
        model: &str,
        instruction: &str,
    ) -> Result<String, GeminiError>;
}

impl GenerationBackend for GeminiClient {
    async fn generate(
        &self,
        api_key: &str,
        model: &str,
        instruction: &str,
    ) -> Result<String, GeminiError> {
        GeminiClient::generate(self, api_key, model, instruction).await
    }
}

/// Errors that abort a batch before any task runs.
#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    #[error("Key pool is empty")]
    EmptyPool,
}

/// Sequential batch executor over a rotating key pool.
pub struct GenerationExecutor {
    attempt_delay: Duration,
}

impl Default for GenerationExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationExecutor {
    pub fn new() -> Self {
        Self {
            attempt_delay: DEFAULT_ATTEMPT_DELAY,
        }
    }

    /// Create an executor with a custom inter-attempt delay. Tests use
    /// `Duration::ZERO`.
    pub fn with_attempt_delay(attempt_delay: Duration) -> Self {
        Self { attempt_delay }
    }

    /// Run every task to completion or exhaustion, in task order.
    ///
    /// A single bad key never stops the batch as long as another key can
    /// serve the task; a task for which every key fails is marked failed
    /// and the batch continues. Partial failure is normal, not exceptional.
    ///
    /// # Errors
    ///
    /// Returns `ExecutorError::EmptyPool` if the pool has no entries.
    pub async fn run<B: GenerationBackend>(
        &self,
        tasks: &[Task],
        pool: &KeyPool,
        backend: &B,
    ) -> Result<Vec<TaskResult>, ExecutorError> {
        if pool.is_empty() {
            return Err(ExecutorError::EmptyPool);
        }

        let mut cursor = 0usize;
        let mut results = Vec::with_capacity(tasks.len());

        for task in tasks {
            let mut attempts = 0;
            let mut outcome = None;

            while outcome.is_none() && attempts < pool.len() {
                let (entry, next) = pool.entry_at(cursor).ok_or(ExecutorError::EmptyPool)?;
                cursor = next;

                let instruction = assembler::assemble(task);
                let response = match backend.generate(&entry.key, &entry.model, &instruction).await
                {
                    Ok(text) if text.trim().is_empty() => Err(GeminiError::EmptyResponse),
                    other => other,
                };

                match response {
                    Ok(text) => {
                        let positive = assembler::post_process(&text, task);
                        let negative = task
                            .use_negative
                            .then(|| assembler::stock_negative(task.platform).to_string());
                        log::info!(
                            "task {}/{} [{}] generated ({} chars)",
                            task.index + 1,
                            tasks.len(),
                            task.label,
                            positive.len()
                        );
                        outcome = Some(TaskResult::Completed {
                            label: task.label.clone(),
                            positive,
                            negative,
                        });
                    }
                    Err(e) => {
                        log::warn!(
                            "task {} attempt with key {} failed: {}",
                            task.index + 1,
                            mask_key(&entry.key),
                            e
                        );
                        attempts += 1;
                        if self.attempt_delay > Duration::ZERO {
                            tokio::time::sleep(self.attempt_delay).await;
                        }
                    }
                }
            }

            results.push(outcome.unwrap_or_else(|| {
                log::warn!(
                    "task {} [{}] failed: pool exhausted after {} attempts",
                    task.index + 1,
                    task.label,
                    attempts
                );
                TaskResult::Failed {
                    label: task.label.clone(),
                }
            }));
        }

        Ok(results)
    }
}
