//! The Cascading Delete Resolver (§4.3): walks every `cascade`-flagged
//! relation field reachable from `start`, emitting one
//! `CascadingDeleteRelationMutactions` per path, deepest edge first.
//!
//! The walk is breadth-first over a frontier of paths rather than a single
//! recursive descent, because §4.3 orders emission by depth (deepest first)
//! rather than by discovery order: collecting each depth's frontier before
//! emitting anything lets us reverse once at the end instead of threading a
//! depth-ordered buffer through the recursion.

use crate::mutaction::Mutaction;
use crate::path::Path;
use crate::schema::Project;

/// Cycle guard: a schema can declare a cascade cycle (A cascades to B
/// cascades back to A) that the literal algorithm has no base case for.
/// Bounding frontier depth keeps that a loud, finite result instead of an
/// unbounded walk; no real schema graph is expected to need anywhere near
/// this many hops.
const MAX_CASCADE_DEPTH: usize = 64;

/// Collects every path reachable from `start` by following `cascade: true`
/// relation edges, frontier by frontier, deduplicated within each frontier
/// by `Path::signature()` (distinct call sites can reach the same related
/// node through different edges; each structural path is only queued once
/// per round).
fn collect_cascading_paths(start: &Path) -> Vec<Vec<Path>> {
    let mut frontiers = Vec::new();
    let mut frontier = vec![start.clone()];

    for _ in 0..MAX_CASCADE_DEPTH {
        let mut next = Vec::new();
        let mut seen = std::collections::HashSet::new();

        for path in &frontier {
            for field in path.relation_fields_not_on_path_on_last_model() {
                if !field.cascades() {
                    continue;
                }
                let extended = path.extend(field);
                let sig = extended.signature();
                if seen.insert(sig) {
                    next.push(extended);
                }
            }
        }

        if next.is_empty() {
            break;
        }
        // §4.3: ties within one depth are emitted in the input enumeration
        // order of this collection pass, not re-sorted — callers rely on
        // that order being stable across runs.
        frontiers.push(next.clone());
        frontier = next;
    }

    frontiers
}

/// §4.3: deepest-edge-first emission. `collect_cascading_paths` returns
/// frontiers in discovery (shallow-to-deep) order; reversing gives the
/// deepest-first emission the resolver requires, so that a child row's
/// cascade mutactions run before the parent edge that reaches it is
/// resolved.
pub fn cascading_delete(project: &Project, start: &Path) -> Vec<Mutaction> {
    let frontiers = collect_cascading_paths(start);

    frontiers
        .into_iter()
        .rev()
        .flatten()
        .map(|path| Mutaction::CascadingDeleteRelationMutactions {
            project: project.clone(),
            path,
        })
        .collect()
}
