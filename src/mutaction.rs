//! The output alphabet (§3, §6): the tagged `Mutaction` variants the planner
//! emits, each carrying `(Project, Path)` plus operation-specific arguments.
//! A downstream executor (out of scope here) runs these against storage.

use crate::args::{ListArgs, NonListArgs, PreviousValues, ReallyCoolArgs};
use crate::path::{NodeSelector, Path};
use crate::schema::Project;

#[derive(Debug, Clone)]
pub enum Mutaction {
    VerifyWhere {
        project: Project,
        selector: NodeSelector,
    },
    VerifyConnection {
        project: Project,
        path: Path,
    },
    CreateDataItem {
        project: Project,
        path: Path,
        non_list_args: ReallyCoolArgs,
        list_args: ListArgs,
    },
    UpdateDataItem {
        project: Project,
        path: Path,
        non_list_args: NonListArgs,
        list_args: ListArgs,
        previous_values: PreviousValues,
    },
    DeleteDataItem {
        project: Project,
        path: Path,
        previous_values: PreviousValues,
    },
    DeleteDataItemNested {
        project: Project,
        path: Path,
    },
    DeleteRelationCheck {
        project: Project,
        path: Path,
    },
    UpsertDataItem {
        project: Project,
        path: Path,
        create_where: NodeSelector,
        updated_where: NodeSelector,
        create_non_list: ReallyCoolArgs,
        create_list: ListArgs,
        update_non_list: NonListArgs,
        update_list: ListArgs,
    },
    UpsertDataItemIfInRelationWith {
        project: Project,
        path: Path,
        create_where: NodeSelector,
        create_non_list: ReallyCoolArgs,
        create_list: ListArgs,
        update_non_list: NonListArgs,
        update_list: ListArgs,
        path_for_update_branch: Path,
    },
    NestedCreateRelation {
        project: Project,
        path: Path,
        top_is_create: bool,
    },
    NestedConnectRelation {
        project: Project,
        path: Path,
        top_is_create: bool,
    },
    NestedDisconnectRelation {
        project: Project,
        path: Path,
    },
    NestedUpdateDataItem {
        project: Project,
        path: Path,
        non_list_args: NonListArgs,
        list_args: ListArgs,
    },
    CascadingDeleteRelationMutactions {
        project: Project,
        path: Path,
    },
}

impl Mutaction {
    /// The path every variant carries, used by tests that assert the
    /// ordering contract (§4.4) without matching on every variant.
    pub fn path(&self) -> &Path {
        match self {
            Mutaction::VerifyWhere { selector, .. } => {
                // VerifyWhere is keyed by a selector, not a path; callers
                // that need "the path this probe concerns" should match on
                // the variant directly instead of calling this helper.
                panic!("VerifyWhere has no Path, only a NodeSelector ({selector:?})")
            }
            Mutaction::VerifyConnection { path, .. }
            | Mutaction::CreateDataItem { path, .. }
            | Mutaction::UpdateDataItem { path, .. }
            | Mutaction::DeleteDataItem { path, .. }
            | Mutaction::DeleteDataItemNested { path, .. }
            | Mutaction::DeleteRelationCheck { path, .. }
            | Mutaction::UpsertDataItem { path, .. }
            | Mutaction::UpsertDataItemIfInRelationWith { path, .. }
            | Mutaction::NestedCreateRelation { path, .. }
            | Mutaction::NestedConnectRelation { path, .. }
            | Mutaction::NestedDisconnectRelation { path, .. }
            | Mutaction::NestedUpdateDataItem { path, .. }
            | Mutaction::CascadingDeleteRelationMutactions { path, .. } => path,
        }
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            Mutaction::VerifyWhere { .. } => "VerifyWhere",
            Mutaction::VerifyConnection { .. } => "VerifyConnection",
            Mutaction::CreateDataItem { .. } => "CreateDataItem",
            Mutaction::UpdateDataItem { .. } => "UpdateDataItem",
            Mutaction::DeleteDataItem { .. } => "DeleteDataItem",
            Mutaction::DeleteDataItemNested { .. } => "DeleteDataItemNested",
            Mutaction::DeleteRelationCheck { .. } => "DeleteRelationCheck",
            Mutaction::UpsertDataItem { .. } => "UpsertDataItem",
            Mutaction::UpsertDataItemIfInRelationWith { .. } => "UpsertDataItemIfInRelationWith",
            Mutaction::NestedCreateRelation { .. } => "NestedCreateRelation",
            Mutaction::NestedConnectRelation { .. } => "NestedConnectRelation",
            Mutaction::NestedDisconnectRelation { .. } => "NestedDisconnectRelation",
            Mutaction::NestedUpdateDataItem { .. } => "NestedUpdateDataItem",
            Mutaction::CascadingDeleteRelationMutactions { .. } => "CascadingDeleteRelationMutactions",
        }
    }
}
