//! Black-box scenario tests against the five public entry points, exercising
//! the properties and scenarios the planner is expected to satisfy.

mod common;

use common::{build_project, NullMetricsSink, SequentialIdGenerator};
use mutation_planner::args::CoolArgs;
use mutation_planner::error::PlannerError;
use mutation_planner::mutaction::Mutaction;
use mutation_planner::nested::{NestedCreate, NestedDelete, NestedMutations, NestedUpdate};
use mutation_planner::path::{Edge, NodeSelector, Path};
use mutation_planner::planner::Planner;

fn planner() -> Planner {
    Planner::new(Box::new(SequentialIdGenerator::default()), Box::new(NullMetricsSink))
}

/// S1: a top-level create with a nested create emits the parent's
/// `CreateDataItem` first, then the child's `CreateDataItem` +
/// `NestedCreateRelation`, in that order, with the child's path pinned to
/// the freshly minted ID.
#[test]
fn create_with_nested_create_emits_parent_then_child() {
    let project = build_project();
    let user_model = project.schema.find_model("User").unwrap();
    let profile_model = project.schema.find_model("Profile").unwrap();

    let profile_data = CoolArgs::new().with_scalar("bio", "hi").with_nested(
        "user",
        NestedMutations {
            creates: vec![NestedCreate {
                data: CoolArgs::new().with_scalar("name", "Ada"),
            }],
            ..Default::default()
        },
    );

    let path = Path::from_model(profile_model);
    let result = planner().for_create(&project, &path, &profile_data).unwrap();

    assert_eq!(result.len(), 3);
    assert_eq!(result[0].variant_name(), "CreateDataItem");
    assert_eq!(result[1].variant_name(), "CreateDataItem");
    assert_eq!(result[2].variant_name(), "NestedCreateRelation");

    match &result[1] {
        Mutaction::CreateDataItem { path, .. } => {
            assert_eq!(path.last_model().name, "User");
        }
        other => panic!("expected CreateDataItem, got {other:?}"),
    }
    let _ = user_model;
}

/// S3: creating a `Profile` with no nested data for its required `user`
/// relation fails with `RelationIsRequired`, even though the field was
/// never mentioned at all — absence and explicit emptiness are the same
/// failure.
#[test]
fn create_missing_required_relation_fails() {
    let project = build_project();
    let profile_model = project.schema.find_model("Profile").unwrap();
    let path = Path::from_model(profile_model);
    let args = CoolArgs::new().with_scalar("bio", "hi");

    let err = planner().for_create(&project, &path, &args).unwrap_err();
    assert_eq!(
        err,
        PlannerError::RelationIsRequired {
            field: "user".into(),
            model: "Profile".into(),
        }
    );
}

/// S4: a nested delete addressed by a `where` pins its `VerifyConnection`
/// and `DeleteDataItemNested` paths to the concrete child node — the last
/// edge must be a `NodeEdge` carrying that selector, not an unidentified
/// `ModelEdge` on the `posts` field.
#[test]
fn nested_delete_pins_child_path_to_its_where_selector() {
    let project = build_project();
    let user_model = project.schema.find_model("User").unwrap();
    let post_model = project.schema.find_model("Post").unwrap();
    let path = Path::from_model(user_model);

    let child_selector = NodeSelector::new(post_model, "id", "p1");
    let args = CoolArgs::new().with_scalar("name", "Ada").with_nested(
        "posts",
        NestedMutations {
            deletes: vec![NestedDelete {
                selector: Some(child_selector.clone()),
            }],
            ..Default::default()
        },
    );

    let result = planner().for_update(&project, &path, &args, Default::default()).unwrap();

    let pinned = |path: &Path| match path.edges().last() {
        Some(Edge::NodeEdge { selector, .. }) => selector == &child_selector,
        _ => false,
    };

    let verify_connection_pinned = result.iter().any(|m| match m {
        Mutaction::VerifyConnection { path, .. } => pinned(path),
        _ => false,
    });
    let delete_pinned = result.iter().any(|m| match m {
        Mutaction::DeleteDataItemNested { path, .. } => pinned(path),
        _ => false,
    });

    assert!(verify_connection_pinned, "VerifyConnection must be pinned to Post#p1, not an unidentified ModelEdge");
    assert!(delete_pinned, "DeleteDataItemNested must be pinned to Post#p1, not an unidentified ModelEdge");
}

/// S5: deleting a `User` with posts and comments cascades deepest-edge
/// first — every `Comment` path is emitted before the `Post` path that
/// reaches it.
#[test]
fn delete_cascades_deepest_edge_first() {
    let project = build_project();
    let user_model = project.schema.find_model("User").unwrap();
    let selector = NodeSelector::new(user_model, "id", "u1");
    let path = Path::from_node(selector);

    let result = planner().for_delete(&project, &path, Default::default()).unwrap();

    assert_eq!(result.first().unwrap().variant_name(), "VerifyWhere");

    let cascade_positions: Vec<(usize, String)> = result
        .iter()
        .enumerate()
        .filter_map(|(i, m)| match m {
            Mutaction::CascadingDeleteRelationMutactions { path, .. } => Some((i, path.last_model().name.clone())),
            _ => None,
        })
        .collect();

    let comment_pos = cascade_positions.iter().find(|(_, name)| name == "Comment").unwrap().0;
    let post_pos = cascade_positions.iter().find(|(_, name)| name == "Post").unwrap().0;
    assert!(comment_pos < post_pos, "Comment cascade must be emitted before Post cascade");

    let last_two: Vec<_> = result.iter().rev().take(2).map(Mutaction::variant_name).collect();
    assert_eq!(last_two, vec!["DeleteDataItem", "DeleteRelationCheck"]);
}

/// S6: upsert emits exactly one `UpsertDataItem`, even when the create
/// branch carries nested mutations of its own — nested expansion under
/// upsert is suppressed by design.
#[test]
fn upsert_never_expands_nested_mutations() {
    let project = build_project();
    let user_model = project.schema.find_model("User").unwrap();
    let path = Path::from_model(user_model.clone());

    let create_args = CoolArgs::new().with_scalar("name", "Ada").with_nested(
        "posts",
        NestedMutations {
            creates: vec![NestedCreate {
                data: CoolArgs::new().with_scalar("title", "Hello"),
            }],
            ..Default::default()
        },
    );
    let update_args = CoolArgs::new().with_scalar("name", "Ada Lovelace");

    let result = planner()
        .for_upsert(
            &project,
            &path,
            NodeSelector::new(user_model.clone(), "id", "u1"),
            NodeSelector::new(user_model, "id", "u1"),
            &create_args,
            &update_args,
        )
        .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].variant_name(), "UpsertDataItem");
}

/// S7: duplicate where-probes are not deduplicated — two nested updates
/// addressing the same selector both get their own `VerifyWhere`.
#[test]
fn duplicate_where_probes_are_not_deduplicated() {
    let project = build_project();
    let user_model = project.schema.find_model("User").unwrap();
    let post_model = project.schema.find_model("Post").unwrap();
    let path = Path::from_model(user_model);

    let dup_selector = NodeSelector::new(post_model, "id", "p1");
    let args = CoolArgs::new().with_scalar("name", "Ada").with_nested(
        "posts",
        NestedMutations {
            updates: vec![
                NestedUpdate::ByWhere {
                    where_: dup_selector.clone(),
                    data: CoolArgs::new().with_scalar("title", "A"),
                },
                NestedUpdate::ByWhere {
                    where_: dup_selector,
                    data: CoolArgs::new().with_scalar("title", "B"),
                },
            ],
            ..Default::default()
        },
    );

    let result = planner().for_create(&project, &path, &args).unwrap();
    let where_probe_count = result.iter().filter(|m| m.variant_name() == "VerifyWhere").count();
    assert_eq!(where_probe_count, 2, "both identical where-probes must be emitted");
}
