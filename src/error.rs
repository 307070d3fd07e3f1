use thiserror::Error;

/// The single structured error kind the planner can raise on its own account.
///
/// Everything else a collaborator returns (a malformed arg map, a missing
/// related model) is treated as opaque and propagated via `?` without being
/// wrapped further, per the planner's error handling design: it does not
/// interpret collaborator failures, only its own invariant violations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlannerError {
    #[error("the relation `{field}` on `{model}` is required but no create or connect satisfies it")]
    RelationIsRequired { field: String, model: String },

    #[error("collaborator error: {0}")]
    Collaborator(String),
}

pub type PlannerResult<T> = Result<T, PlannerError>;
