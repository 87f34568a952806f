//! SQLite storage implementation for goal plans.

mod model;
mod repository;

pub use model::GoalPlanDB;
pub use repository::GoalPlanRepository;
