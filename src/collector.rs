//! Result collection: batch aggregation and flat-text export.

use crate::planner::Platform;

/// Separator line between export blocks.
const EXPORT_RULE: &str = "--------------------";

/// Outcome of one task, produced exactly once per task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    /// A generated prompt, with the stock negative text when enabled.
    Completed {
        label: String,
        positive: String,
        negative: Option<String>,
    },
    /// Every key in the pool failed for this task.
    Failed { label: String },
}

impl TaskResult {
    pub fn is_success(&self) -> bool {
        matches!(self, TaskResult::Completed { .. })
    }

    pub fn label(&self) -> &str {
        match self {
            TaskResult::Completed { label, .. } => label,
            TaskResult::Failed { label } => label,
        }
    }
}

/// Ordered outcomes of one batch, in task order.
#[derive(Debug)]
pub struct BatchResult {
    pub platform: Platform,
    pub topic: String,
    pub results: Vec<TaskResult>,
}

impl BatchResult {
    pub fn new(platform: Platform, topic: String) -> Self {
        Self {
            platform,
            topic,
            results: Vec::new(),
        }
    }

    /// Aggregate the executor's per-task outcomes into a batch result.
    pub fn from_results(platform: Platform, topic: String, results: Vec<TaskResult>) -> Self {
        Self {
            platform,
            topic,
            results,
        }
    }

    pub fn push(&mut self, result: TaskResult) {
        self.results.push(result);
    }

    /// Number of tasks that produced a prompt.
    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    /// Number of tasks requested.
    pub fn requested_count(&self) -> usize {
        self.results.len()
    }

    /// Whether nothing in the batch succeeded. Partial success is still
    /// reported as success with counts.
    pub fn is_total_failure(&self) -> bool {
        self.success_count() == 0
    }

    /// Render the batch as flat UTF-8 export text.
    ///
    /// A header with platform and topic, then one block per successful task:
    /// `[label]`, `POSITIVE:`, optional `NEGATIVE:`, separated by a rule line.
    pub fn export_text(&self) -> String {
        let mut out = format!(
            "PLATFORM: {}\nTOPIC: {}\n\n",
            self.platform.display_name(),
            self.topic
        );

        for result in &self.results {
            if let TaskResult::Completed {
                label,
                positive,
                negative,
            } = result
            {
                out.push_str(&format!("[{}]\nPOSITIVE: {}\n", label, positive));
                if let Some(negative) = negative {
                    out.push_str(&format!("NEGATIVE: {}\n", negative));
                }
                out.push_str(&format!("\n{}\n\n", EXPORT_RULE));
            }
        }

        out
    }
}
