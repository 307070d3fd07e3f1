//! A GraphQL-to-relational mutation planner.
//!
//! Given a single top-level write request (create, update, upsert, delete)
//! against a typed schema, [`planner::Planner`] compiles the request's
//! nested input tree into an ordered, flat sequence of [`mutaction::Mutaction`]
//! values that a downstream executor (out of scope here) runs atomically
//! against storage. The planner itself never touches storage: it is a pure
//! function of the schema, the path being operated on, and the typed
//! arguments, plus two injected collaborators (an ID generator and a
//! metrics sink).

pub mod args;
pub mod error;
pub mod id_gen;
pub mod metrics;
pub mod mutaction;
pub mod nested;
pub mod path;
pub mod planner;
pub mod schema;
pub mod value;

pub use error::{PlannerError, PlannerResult};
pub use mutaction::Mutaction;
pub use planner::Planner;
