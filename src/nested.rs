//! The Input Tree Model's per-relation-field groupings (§3): creates,
//! connects, disconnects, deletes, updates and upserts, each carrying its
//! own selector (where applicable) and payload data.

use crate::args::CoolArgs;
use crate::path::NodeSelector;

#[derive(Debug, Clone)]
pub struct NestedCreate {
    pub data: CoolArgs,
}

/// Connects and disconnects are always addressed by a `where` selector in
/// practice, but the type keeps it optional to mirror the byWhere/byRelation
/// distinction the spec draws for every other nested kind.
#[derive(Debug, Clone)]
pub struct NestedConnect {
    pub selector: Option<NodeSelector>,
}

#[derive(Debug, Clone)]
pub struct NestedDisconnect {
    pub selector: Option<NodeSelector>,
}

#[derive(Debug, Clone)]
pub struct NestedDelete {
    pub selector: Option<NodeSelector>,
}

#[derive(Debug, Clone)]
pub enum NestedUpdate {
    ByWhere { where_: NodeSelector, data: CoolArgs },
    ByRelation { data: CoolArgs },
}

impl NestedUpdate {
    pub fn selector(&self) -> Option<&NodeSelector> {
        match self {
            NestedUpdate::ByWhere { where_, .. } => Some(where_),
            NestedUpdate::ByRelation { .. } => None,
        }
    }

    pub fn data(&self) -> &CoolArgs {
        match self {
            NestedUpdate::ByWhere { data, .. } => data,
            NestedUpdate::ByRelation { data } => data,
        }
    }
}

#[derive(Debug, Clone)]
pub enum NestedUpsert {
    ByWhere {
        where_: NodeSelector,
        create: CoolArgs,
        update: CoolArgs,
    },
    ByRelation {
        create: CoolArgs,
        update: CoolArgs,
    },
}

impl NestedUpsert {
    pub fn selector(&self) -> Option<&NodeSelector> {
        match self {
            NestedUpsert::ByWhere { where_, .. } => Some(where_),
            NestedUpsert::ByRelation { .. } => None,
        }
    }

    pub fn create(&self) -> &CoolArgs {
        match self {
            NestedUpsert::ByWhere { create, .. } => create,
            NestedUpsert::ByRelation { create, .. } => create,
        }
    }

    pub fn update(&self) -> &CoolArgs {
        match self {
            NestedUpsert::ByWhere { update, .. } => update,
            NestedUpsert::ByRelation { update, .. } => update,
        }
    }
}

/// The per-relation-field grouping of nested mutation fragments. An absent
/// relation field and one whose grouping is entirely empty are
/// indistinguishable here by design (see `CoolArgs::sub_nested_mutation`).
#[derive(Debug, Clone, Default)]
pub struct NestedMutations {
    pub creates: Vec<NestedCreate>,
    pub connects: Vec<NestedConnect>,
    pub disconnects: Vec<NestedDisconnect>,
    pub deletes: Vec<NestedDelete>,
    pub updates: Vec<NestedUpdate>,
    pub upserts: Vec<NestedUpsert>,
}

impl NestedMutations {
    pub fn is_empty(&self) -> bool {
        self.creates.is_empty()
            && self.connects.is_empty()
            && self.disconnects.is_empty()
            && self.deletes.is_empty()
            && self.updates.is_empty()
            && self.upserts.is_empty()
    }

    /// The where-probe selectors for §4.2 step 1, in
    /// updates ∪ deletes ∪ connects ∪ disconnects order, `NestedWhere`
    /// children only.
    pub fn where_probes(&self) -> Vec<NodeSelector> {
        let mut out = Vec::new();
        out.extend(self.updates.iter().filter_map(|u| u.selector().cloned()));
        out.extend(self.deletes.iter().filter_map(|d| d.selector.clone()));
        out.extend(self.connects.iter().filter_map(|c| c.selector.clone()));
        out.extend(self.disconnects.iter().filter_map(|d| d.selector.clone()));
        out
    }
}
