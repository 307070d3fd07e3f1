//! Fixture schema and deterministic collaborators shared by the scenario
//! tests. `User` / `Profile` / `Post` / `Comment` give a one-required-1:1
//! relation (for the required-relation check), a cascading 1:many
//! (`User.posts`), and a second cascading hop (`Post.comments`) so the
//! cascading delete resolver's multi-level ordering is exercised.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use mutation_planner::id_gen::IdGenerator;
use mutation_planner::metrics::MetricsSink;
use mutation_planner::schema::{Field, Model, ModelRef, OnDelete, Project, Schema};

/// Build order matters: a relation field embeds a snapshot of its target's
/// `Arc<Model>` at the moment the field is created, so a model must be
/// fully built (all the relation fields a traversal will walk through)
/// *before* anything else embeds a reference to it. Each `let` below is
/// final the moment it's bound; nothing is rebuilt after another field
/// captures it.
pub fn build_project() -> Project {
    let profile_base = Model::new("Profile", "id", scalars(&[("id", true), ("bio", false)]));
    let comment_base = Model::new("Comment", "id", scalars(&[("id", true), ("text", true)]));
    let user_base = Model::new("User", "id", scalars(&[("id", true), ("name", true)]));

    let post = add_fields(
        &Model::new("Post", "id", scalars(&[("id", true), ("title", true)])),
        vec![
            Field::relation("author", user_base.clone(), true, false, OnDelete::Restrict, "posts"),
            Field::relation("comments", comment_base.clone(), false, true, OnDelete::Cascade, "post"),
        ],
    );

    let user = add_fields(
        &user_base,
        vec![
            Field::relation("profile", profile_base.clone(), false, false, OnDelete::Restrict, "user"),
            Field::relation("posts", post.clone(), false, true, OnDelete::Cascade, "author"),
        ],
    );

    let profile = add_fields(
        &profile_base,
        vec![Field::relation("user", user.clone(), true, false, OnDelete::Restrict, "profile")],
    );

    let comment = add_fields(
        &comment_base,
        vec![Field::relation("post", post.clone(), true, false, OnDelete::Restrict, "comments")],
    );

    let schema = Schema::new(vec![user, profile, post, comment]);
    Project::new("test-project", schema)
}

fn scalars(specs: &[(&str, bool)]) -> Vec<mutation_planner::schema::FieldRef> {
    specs.iter().map(|(name, required)| Arc::new(Field::scalar(*name, *required, false))).collect()
}

fn add_fields(model: &ModelRef, extra: Vec<Field>) -> ModelRef {
    let mut fields: Vec<_> = model.fields.clone();
    fields.extend(extra.into_iter().map(Arc::new));
    Model::new(model.name.clone(), model.id_field.clone(), fields)
}

/// A sequential, reproducible stand-in for `CuidGenerator`: every minted ID
/// is `fresh-N`, so scenario assertions can reference concrete strings
/// instead of wildcard-matching a real `cuid`.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator(AtomicU64);

impl IdGenerator for SequentialIdGenerator {
    fn fresh_id(&self) -> String {
        let n = self.0.fetch_add(1, Ordering::SeqCst);
        format!("fresh-{n}")
    }
}

/// Discards every increment; scenario tests only assert on the emitted
/// mutaction vector, not on side-channel metrics.
#[derive(Debug, Default)]
pub struct NullMetricsSink;

impl MetricsSink for NullMetricsSink {
    fn increment_mutactions(&self, _project_id: &str, _by: u64) {}
}
