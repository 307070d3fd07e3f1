//! The Path Algebra (§2, §3): an immutable traversal from a root model
//! through relation edges to a current node.
//!
//! `Path` is small and frequently extended, so it uses structural sharing
//! via `Vec` clones rather than in-place mutation — every extender returns a
//! new `Path`, per the teacher's general preference for persistent,
//! immutable query-building types (`QueryGraph` nodes are never mutated in
//! place either; edges are added, never rewritten).

use crate::schema::{FieldRef, ModelRef};
use crate::value::ScalarValue;

/// A unique-key identifier for a node on one model: `(Model, field, value)`.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSelector {
    pub model: ModelRef,
    pub field: String,
    pub value: ScalarValue,
}

impl NodeSelector {
    pub fn new(model: ModelRef, field: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        Self {
            model,
            field: field.into(),
            value: value.into(),
        }
    }

    /// The canonical ID selector used to address freshly created nodes.
    pub fn for_id(model: ModelRef, id: impl Into<ScalarValue>) -> Self {
        let field = model.id_field.clone();
        Self {
            model,
            field,
            value: id.into(),
        }
    }
}

/// What a `Path` is rooted at: either a specific identified node, or just a
/// model (no node identified yet — the shape a fresh top-level `Create`
/// walks before any row exists).
#[derive(Debug, Clone)]
pub enum Root {
    Node(NodeSelector),
    Model(ModelRef),
}

impl Root {
    pub fn model(&self) -> ModelRef {
        match self {
            Root::Node(selector) => selector.model.clone(),
            Root::Model(model) => model.clone(),
        }
    }
}

/// One step of a `Path`: either a traversal to an unidentified node of the
/// related model (`ModelEdge`), or one pinned to a specific node
/// (`NodeEdge`).
#[derive(Debug, Clone)]
pub enum Edge {
    NodeEdge { field: FieldRef, selector: NodeSelector },
    ModelEdge { field: FieldRef },
}

impl Edge {
    pub fn field(&self) -> &FieldRef {
        match self {
            Edge::NodeEdge { field, .. } => field,
            Edge::ModelEdge { field } => field,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Path {
    root: Root,
    edges: Vec<Edge>,
}

impl Path {
    pub fn from_node(selector: NodeSelector) -> Self {
        Self {
            root: Root::Node(selector),
            edges: Vec::new(),
        }
    }

    pub fn from_model(model: ModelRef) -> Self {
        Self {
            root: Root::Model(model),
            edges: Vec::new(),
        }
    }

    pub fn root(&self) -> &Root {
        &self.root
    }

    /// The identified selector at the root, when the path happens to be
    /// rooted at one. `forDelete` requires this; `forCreate` never has it.
    pub fn root_selector(&self) -> Option<&NodeSelector> {
        match &self.root {
            Root::Node(selector) => Some(selector),
            Root::Model(_) => None,
        }
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The related model of the last edge, or the root's model when the
    /// path is empty.
    pub fn last_model(&self) -> ModelRef {
        match self.edges.last() {
            Some(edge) => edge.field().related_model(),
            None => self.root.model(),
        }
    }

    /// Appends a traversal through `field`, targeting some (yet
    /// unidentified) node of the related model.
    pub fn extend(&self, field: FieldRef) -> Path {
        let mut edges = self.edges.clone();
        edges.push(Edge::ModelEdge { field });
        Path {
            root: self.root.clone(),
            edges,
        }
    }

    /// Replaces a trailing `ModelEdge` with a `NodeEdge` carrying `selector`.
    pub fn last_edge_to_node_edge(&self, selector: NodeSelector) -> Path {
        let mut edges = self.edges.clone();
        let field = match edges.pop() {
            Some(edge) => edge.field().clone(),
            None => panic!("lastEdgeToNodeEdge called on a path with no edges"),
        };
        edges.push(Edge::NodeEdge { field, selector });
        Path {
            root: self.root.clone(),
            edges,
        }
    }

    pub fn remove_last_edge(&self) -> Path {
        let mut edges = self.edges.clone();
        edges.pop().expect("removeLastEdge called on a path with no edges");
        Path {
            root: self.root.clone(),
            edges,
        }
    }

    /// Relation fields of `lastModel`, excluding the inverse of the last
    /// edge's field — the field we'd be walking straight back through.
    pub fn relation_fields_not_on_path_on_last_model(&self) -> Vec<FieldRef> {
        let excluded = self.edges.last().and_then(|edge| edge.field().opposite_field_name().map(str::to_owned));
        self.last_model()
            .relation_fields()
            .filter(|field| Some(field.name.clone()) != excluded)
            .cloned()
            .collect()
    }

    /// Replaces the root selector's value with the new value `args` assigns
    /// to the same field, if any — keeps subsequent `NodeEdge`s referring to
    /// the post-update identity after an update that renames its own key.
    pub fn updated_root(&self, args: &std::collections::BTreeMap<String, ScalarValue>) -> Path {
        match &self.root {
            Root::Node(selector) => match args.get(&selector.field) {
                Some(new_value) => Path {
                    root: Root::Node(NodeSelector {
                        model: selector.model.clone(),
                        field: selector.field.clone(),
                        value: new_value.clone(),
                    }),
                    edges: self.edges.clone(),
                },
                None => self.clone(),
            },
            Root::Model(_) => self.clone(),
        }
    }

    /// A structural key used to deduplicate paths in the cascading delete
    /// resolver's frontier set. `Path` otherwise carries `Arc<Model>`s that
    /// don't implement `Eq`/`Hash` cheaply, so equality is defined by this
    /// signature rather than by a derived impl.
    pub fn signature(&self) -> String {
        let mut out = match &self.root {
            Root::Node(selector) => format!("N:{}.{}={:?}", selector.model.name, selector.field, selector.value),
            Root::Model(model) => format!("M:{}", model.name),
        };
        for edge in &self.edges {
            match edge {
                Edge::ModelEdge { field } => out.push_str(&format!("/{}", field.name)),
                Edge::NodeEdge { field, selector } => {
                    out.push_str(&format!("/{}#{}={:?}", field.name, selector.field, selector.value))
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Model, OnDelete};
    use std::sync::Arc;

    /// `post`'s `comments` field points at the fully-built `comment` (with
    /// its own back-reference), so a path extended through it lands on a
    /// model whose relation fields are complete enough to test the
    /// opposite-field exclusion below.
    fn two_model_schema() -> (ModelRef, ModelRef) {
        let post_stub = Model::new("Post", "id", vec![Arc::new(crate::schema::Field::scalar("id", true, false))]);
        let back_field = crate::schema::Field::relation("post", post_stub, true, false, OnDelete::Restrict, "comments");
        let comment = Model::new(
            "Comment",
            "id",
            vec![Arc::new(crate::schema::Field::scalar("id", true, false)), Arc::new(back_field)],
        );
        let post_field = crate::schema::Field::relation("comments", comment.clone(), false, true, OnDelete::Cascade, "post");
        let post = Model::new("Post", "id", vec![Arc::new(post_field)]);
        (post, comment)
    }

    #[test]
    fn extend_then_last_edge_to_node_edge_replaces_trailing_edge() {
        let (post, comment) = two_model_schema();
        let field = post.relation_fields().next().unwrap().clone();
        let path = Path::from_model(post).extend(field);

        assert!(matches!(path.edges().last(), Some(Edge::ModelEdge { .. })));

        let selector = NodeSelector::for_id(comment, "c1");
        let pinned = path.last_edge_to_node_edge(selector);
        assert!(matches!(pinned.edges().last(), Some(Edge::NodeEdge { .. })));
        assert_eq!(pinned.edges().len(), path.edges().len());
    }

    #[test]
    fn signature_distinguishes_model_edge_from_node_edge() {
        let (post, comment) = two_model_schema();
        let field = post.relation_fields().next().unwrap().clone();
        let model_edge_path = Path::from_model(post.clone()).extend(field.clone());
        let node_edge_path = Path::from_model(post)
            .extend(field)
            .last_edge_to_node_edge(NodeSelector::for_id(comment, "c1"));

        assert_ne!(model_edge_path.signature(), node_edge_path.signature());
    }

    #[test]
    fn relation_fields_not_on_path_excludes_opposite_of_last_edge() {
        let (post, comment) = two_model_schema();
        let field = post.relation_fields().next().unwrap().clone();
        let path = Path::from_model(post).extend(field);

        assert!(path.relation_fields_not_on_path_on_last_model().is_empty());
        let _ = &comment;
    }
}
