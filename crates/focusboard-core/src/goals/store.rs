//! GoalStore: the ordered goal checklist and its persistence.
//!
//! The whole sequence is written to the persistent store after every
//! mutation and read back once at startup. Positions (0-based) are the only
//! identity a goal has.

use chrono::Utc;

use super::csv::goals_to_csv;
use super::goal::{Goal, GoalsView};
use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::sinks::{AlertChannel, DisplaySink, FileDelivery};
use crate::storage::{PersistentStore, GOALS_KEY};

const CLEAR_PROMPT: &str = "Are you sure you want to clear all goals?";

pub struct GoalStore<S, D, A> {
    goals: Vec<Goal>,
    store: S,
    sink: D,
    alert: A,
}

impl<S: PersistentStore, D: DisplaySink, A: AlertChannel> GoalStore<S, D, A> {
    /// Restore the goal list from `store`.
    ///
    /// An absent, unreadable or malformed value yields an empty list; this
    /// never fails.
    pub fn load(store: S, sink: D, alert: A) -> Self {
        let goals = match store.get(GOALS_KEY) {
            Ok(Some(raw)) => decode_goals(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring stored goals");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored goals");
                Vec::new()
            }
        };
        tracing::debug!(count = goals.len(), "goals loaded");
        Self {
            goals,
            store,
            sink,
            alert,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn view(&self) -> GoalsView<'_> {
        GoalsView::new(&self.goals)
    }

    /// "Completed X / Y goals"
    pub fn summary(&self) -> String {
        self.view().summary
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    pub fn alert(&self) -> &A {
        &self.alert
    }

    pub fn alert_mut(&mut self) -> &mut A {
        &mut self.alert
    }

    /// Push the full list and summary to the display sink.
    pub fn render(&mut self) {
        let view = GoalsView::new(&self.goals);
        self.sink.render_goals(&view);
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn add(&mut self, text: &str) -> Result<Event> {
        let goal = Goal::new(text)?;
        let event = Event::GoalAdded {
            index: self.goals.len(),
            text: goal.text.clone(),
            at: Utc::now(),
        };
        self.goals.push(goal);
        self.commit();
        Ok(event)
    }

    pub fn toggle_done(&mut self, index: usize) -> Result<Event> {
        self.check_index(index)?;
        let goal = &mut self.goals[index];
        goal.done = !goal.done;
        let done = goal.done;
        self.commit();
        Ok(Event::GoalToggled {
            index,
            done,
            at: Utc::now(),
        })
    }

    pub fn delete(&mut self, index: usize) -> Result<Event> {
        self.check_index(index)?;
        let removed = self.goals.remove(index);
        self.commit();
        Ok(Event::GoalDeleted {
            index,
            text: removed.text,
            at: Utc::now(),
        })
    }

    /// Empty the list after the alert channel confirms.
    ///
    /// Returns `None` when the user declines.
    pub fn clear_all(&mut self) -> Option<Event> {
        if !self.alert.confirm(CLEAR_PROMPT) {
            tracing::debug!("clear declined");
            return None;
        }
        let removed = self.goals.len();
        self.goals.clear();
        self.commit();
        Some(Event::GoalsCleared {
            removed,
            at: Utc::now(),
        })
    }

    /// Render the list as CSV.
    pub fn export_csv(&self) -> Result<String> {
        if self.goals.is_empty() {
            return Err(CoreError::NothingToExport);
        }
        Ok(goals_to_csv(&self.goals))
    }

    /// Render the list as CSV and hand it to `delivery` under `filename`.
    pub fn export(&self, delivery: &mut impl FileDelivery, filename: &str) -> Result<Event> {
        let document = self.export_csv()?;
        delivery.deliver(filename, &document)?;
        tracing::info!(filename, rows = self.goals.len(), "goals exported");
        Ok(Event::GoalsExported {
            filename: filename.to_string(),
            rows: self.goals.len(),
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.goals.len() {
            return Err(CoreError::IndexOutOfRange {
                index,
                len: self.goals.len(),
            });
        }
        Ok(())
    }

    /// Persist, then render. A failed write keeps the in-memory list.
    fn commit(&mut self) {
        if let Err(e) = self.persist() {
            tracing::warn!(error = %e, "failed to save goals");
            self.alert.notify(&format!("Could not save goals: {e}"));
        }
        self.render();
    }

    fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.goals)?;
        self.store.set(GOALS_KEY, &json)?;
        Ok(())
    }
}

fn decode_goals(raw: &str) -> Result<Vec<Goal>> {
    let malformed = |message: String| CoreError::StoreReadMalformed {
        key: GOALS_KEY.to_string(),
        message,
    };
    let goals: Vec<Goal> = serde_json::from_str(raw).map_err(|e| malformed(e.to_string()))?;
    if let Some(pos) = goals.iter().position(|g| !g.is_valid()) {
        return Err(malformed(format!("goal {pos} has empty text")));
    }
    Ok(goals)
}
