use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// One checklist entry. Persisted as `{"text": ..., "done": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub text: String,
    pub done: bool,
}

impl Goal {
    /// New pending goal. Text is trimmed and must not end up empty.
    pub fn new(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CoreError::invalid("goal", "please enter a goal"));
        }
        Ok(Self {
            text: text.to_string(),
            done: false,
        })
    }

    pub(crate) fn is_valid(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// What the display sink gets whenever the goal list changes.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalsView<'a> {
    pub goals: &'a [Goal],
    pub completed: usize,
    pub total: usize,
    pub summary: String,
}

impl<'a> GoalsView<'a> {
    pub fn new(goals: &'a [Goal]) -> Self {
        let completed = goals.iter().filter(|g| g.done).count();
        let total = goals.len();
        Self {
            goals,
            completed,
            total,
            summary: summary_line(completed, total),
        }
    }
}

pub fn summary_line(completed: usize, total: usize) -> String {
    format!("Completed {completed} / {total} goals")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_text() {
        let goal = Goal::new("  Run 5k \n").unwrap();
        assert_eq!(goal.text, "Run 5k");
        assert!(!goal.done);
    }

    #[test]
    fn new_rejects_blank_text() {
        assert!(matches!(Goal::new(""), Err(CoreError::InvalidInput { .. })));
        assert!(matches!(Goal::new(" \t "), Err(CoreError::InvalidInput { .. })));
    }

    #[test]
    fn view_counts_completed() {
        let goals = vec![
            Goal { text: "a".into(), done: true },
            Goal { text: "b".into(), done: false },
            Goal { text: "c".into(), done: true },
        ];
        let view = GoalsView::new(&goals);
        assert_eq!(view.completed, 2);
        assert_eq!(view.total, 3);
        assert_eq!(view.summary, "Completed 2 / 3 goals");
    }

    #[test]
    fn deserializes_persisted_shape() {
        let goals: Vec<Goal> =
            serde_json::from_str(r#"[{"text":"Read","done":false},{"text":"Walk","done":true}]"#)
                .unwrap();
        assert_eq!(goals[1], Goal { text: "Walk".into(), done: true });
    }
}
