//! The Input Tree Model's typed argument map (§3): `CoolArgs`, split into
//! non-list / list arguments in either create or update mode, plus the
//! really-cool-args conversion collaborator from §6.

use std::collections::BTreeMap;

use crate::nested::NestedMutations;
use crate::path::{NodeSelector, Path};
use crate::schema::ModelRef;
use crate::value::ScalarValue;

pub type NonListArgs = BTreeMap<String, ScalarValue>;
pub type ListArgs = BTreeMap<String, Vec<ScalarValue>>;

/// Previous field values handed to `Update`/`Delete` mutactions by the
/// caller. The planner never interprets their contents — it only threads
/// them through, consistent with "does not resolve ID uniqueness against
/// live data" (§1).
pub type PreviousValues = BTreeMap<String, ScalarValue>;

/// The executor's canonical, schema-validated form of a non-list create
/// argument map. The real converter (out of scope here, §6) additionally
/// fills in default values, normalizes enum casing, and flattens lists; this
/// crate's converter does the one part that's in scope for a pure planner —
/// producing a deterministic, sorted form — and leaves the rest as a
/// documented simplification (argument coercion proper is an explicit
/// Non-goal, §1(c)).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReallyCoolArgs(pub NonListArgs);

pub fn to_really_cool_args(_model: &ModelRef, args: NonListArgs) -> ReallyCoolArgs {
    ReallyCoolArgs(args)
}

/// A typed input map for one model, as the planner receives it after
/// argument coercion has already happened upstream.
#[derive(Debug, Clone, Default)]
pub struct CoolArgs {
    scalars: NonListArgs,
    lists: ListArgs,
    nested: BTreeMap<String, NestedMutations>,
}

impl CoolArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scalar(mut self, field: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        self.scalars.insert(field.into(), value.into());
        self
    }

    pub fn with_list(mut self, field: impl Into<String>, values: Vec<ScalarValue>) -> Self {
        self.lists.insert(field.into(), values);
        self
    }

    pub fn with_nested(mut self, field: impl Into<String>, nested: NestedMutations) -> Self {
        self.nested.insert(field.into(), nested);
        self
    }

    pub fn scalar(&self, field: &str) -> Option<&ScalarValue> {
        self.scalars.get(field)
    }

    /// Argument coercer contract: `args.getCreateArgs(path) -> (nonList, list)`.
    pub fn get_create_args(&self) -> (NonListArgs, ListArgs) {
        (self.scalars.clone(), self.lists.clone())
    }

    /// Argument coercer contract: `args.getUpdateArgs(path) -> (nonList, list)`.
    pub fn get_update_args(&self) -> (NonListArgs, ListArgs) {
        (self.scalars.clone(), self.lists.clone())
    }

    /// Argument coercer contract: `args.subNestedMutation(field, model) -> NestedMutations`.
    /// Returns the empty grouping when the field was never mentioned, so
    /// that "field absent" and "field present but empty" are the same case
    /// for the required-relation check (see Testable Property 3 / S3).
    pub fn sub_nested_mutation(&self, field: &str) -> NestedMutations {
        self.nested.get(field).cloned().unwrap_or_default()
    }

    /// Argument coercer contract: `args.generateNonListCreateArgs(selector)`.
    pub fn generate_non_list_create_args(&self, selector: &NodeSelector) -> NonListArgs {
        let mut args = self.scalars.clone();
        args.insert(selector.field.clone(), selector.value.clone());
        args
    }

    /// Argument coercer contract: `args.getScalarListArgs(path)`.
    pub fn get_scalar_list_args(&self, _path: &Path) -> ListArgs {
        self.lists.clone()
    }
}

/// Returns `where_` with its value replaced by `args[where_.field]` when
/// present — reflects an identity change that the same update/upsert
/// performs on the field its own selector addresses.
pub fn current_where(where_: &NodeSelector, args: &CoolArgs) -> NodeSelector {
    match args.scalar(&where_.field) {
        Some(new_value) => NodeSelector {
            model: where_.model.clone(),
            field: where_.field.clone(),
            value: new_value.clone(),
        },
        None => where_.clone(),
    }
}
