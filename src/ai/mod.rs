//! AI planning for the computer-controlled side.
//!
//! Three interchangeable tiers share the `Planner` trait. A planner only
//! reads a `PlannerView`; it never mutates the match. The engine applies
//! whatever `Decision` comes back.

pub mod decision;
pub mod policy;
pub mod search;

pub use decision::{Decision, PlannerView};
pub use policy::{
    planner_for, Difficulty, EasyPlanner, MediumPlanner, Planner, CRITICAL_HEALTH_RATIO,
};
pub use search::{Candidate, HardPlanner};
