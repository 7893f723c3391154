mod csv;
mod goal;
mod store;

pub use csv::{goals_to_csv, CSV_HEADER};
pub use goal::{summary_line, Goal, GoalsView};
pub use store::GoalStore;
