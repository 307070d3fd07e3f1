//! The nested expander (§4.2) and its per-kind helpers (§§4.2.1–4.2.6).
//! Ordering here is normative (§4.4): tests depend on it.

use super::Planner;
use crate::args::{current_where, to_really_cool_args, CoolArgs};
use crate::error::{PlannerError, PlannerResult};
use crate::mutaction::Mutaction;
use crate::nested::{NestedConnect, NestedCreate, NestedDelete, NestedDisconnect, NestedUpdate, NestedUpsert};
use crate::path::{NodeSelector, Path};
use crate::schema::{FieldRef, Project};

/// `path.extend(field)`, pinned to `selector` when the child carries one
/// (prisma1 `NodeEdge(field, where)` semantics, §4.2). Connect, disconnect
/// and delete children are always addressed by a concrete node once a
/// `where` is given, so their `VerifyConnection`/relation/delete mutactions
/// must identify that node rather than leave an unidentified `ModelEdge`.
fn extend_pinned(path: &Path, field: &FieldRef, selector: Option<&NodeSelector>) -> Path {
    let extended = path.extend(field.clone());
    match selector {
        Some(selector) => extended.last_edge_to_node_edge(selector.clone()),
        None => extended,
    }
}

impl Planner {
    pub(crate) fn expand_nested(
        &self,
        project: &Project,
        args: &CoolArgs,
        path: &Path,
        triggered_from_create: bool,
    ) -> PlannerResult<Vec<Mutaction>> {
        let mut out = Vec::new();
        let last_model_name = path.last_model().name.clone();

        for field in path.relation_fields_not_on_path_on_last_model() {
            let sub = args.sub_nested_mutation(&field.name);
            let create_like_empty = sub.creates.is_empty() && sub.connects.is_empty();

            // Required-relation check (§4.2): evaluated regardless of
            // whether the field was mentioned at all, because an entirely
            // absent required relation on a create must fail the same way
            // an explicitly-empty one does (see S3).
            if triggered_from_create && field.is_required && create_like_empty {
                tracing::debug!(field = %field.name, model = %last_model_name, "required relation has no create or connect");
                return Err(PlannerError::RelationIsRequired {
                    field: field.name.clone(),
                    model: last_model_name,
                });
            }

            if sub.is_empty() {
                continue;
            }

            tracing::trace!(field = %field.name, model = %last_model_name, "expanding nested mutation group");

            // 1. where-probes
            for selector in sub.where_probes() {
                out.push(Mutaction::VerifyWhere {
                    project: project.clone(),
                    selector,
                });
            }

            // 2. connection-probes: updates ∪ deletes ∪ disconnects
            for _ in &sub.updates {
                out.push(Mutaction::VerifyConnection {
                    project: project.clone(),
                    path: path.extend(field.clone()),
                });
            }
            for delete in &sub.deletes {
                out.push(Mutaction::VerifyConnection {
                    project: project.clone(),
                    path: extend_pinned(path, &field, delete.selector.as_ref()),
                });
            }
            for disconnect in &sub.disconnects {
                out.push(Mutaction::VerifyConnection {
                    project: project.clone(),
                    path: extend_pinned(path, &field, disconnect.selector.as_ref()),
                });
            }

            // 3. create-like group: creates, then connects
            for create in &sub.creates {
                out.extend(self.expand_nested_create(project, path, &field, create, triggered_from_create)?);
            }
            for connect in &sub.connects {
                out.push(self.expand_nested_connect(project, path, &field, connect, triggered_from_create));
            }

            // 4. other group: disconnects, deletes, updates, upserts
            for disconnect in &sub.disconnects {
                out.push(self.expand_nested_disconnect(project, path, &field, disconnect));
            }
            for delete in &sub.deletes {
                out.extend(self.expand_nested_delete(project, path, &field, delete));
            }
            for update in &sub.updates {
                out.extend(self.expand_nested_update(project, path, &field, update)?);
            }
            for upsert in &sub.upserts {
                out.push(self.expand_nested_upsert(project, path, &field, upsert));
            }
        }

        Ok(out)
    }

    /// §4.2.1 Nested Create.
    fn expand_nested_create(
        &self,
        project: &Project,
        path: &Path,
        field: &FieldRef,
        create: &NestedCreate,
        triggered_from_create: bool,
    ) -> PlannerResult<Vec<Mutaction>> {
        let mut out = Vec::new();
        let related_model = field.related_model();
        let new_id = self.id_generator.fresh_id();
        let create_where = crate::path::NodeSelector::for_id(related_model.clone(), new_id);

        let extended_path = path.extend(field.clone()).last_edge_to_node_edge(create_where.clone());
        let non_list_args = create.data.generate_non_list_create_args(&create_where);
        let list_args = create.data.get_scalar_list_args(&extended_path);

        out.push(Mutaction::CreateDataItem {
            project: project.clone(),
            path: extended_path.clone(),
            non_list_args: to_really_cool_args(&related_model, non_list_args),
            list_args,
        });
        out.push(Mutaction::NestedCreateRelation {
            project: project.clone(),
            path: extended_path.clone(),
            top_is_create: triggered_from_create,
        });
        out.extend(self.expand_nested(project, &create.data, &extended_path, true)?);

        Ok(out)
    }

    /// §4.2.2 Nested Connect.
    fn expand_nested_connect(
        &self,
        project: &Project,
        path: &Path,
        field: &FieldRef,
        connect: &NestedConnect,
        triggered_from_create: bool,
    ) -> Mutaction {
        Mutaction::NestedConnectRelation {
            project: project.clone(),
            path: extend_pinned(path, field, connect.selector.as_ref()),
            top_is_create: triggered_from_create,
        }
    }

    /// §4.2.3 Nested Disconnect.
    fn expand_nested_disconnect(
        &self,
        project: &Project,
        path: &Path,
        field: &FieldRef,
        disconnect: &NestedDisconnect,
    ) -> Mutaction {
        Mutaction::NestedDisconnectRelation {
            project: project.clone(),
            path: extend_pinned(path, field, disconnect.selector.as_ref()),
        }
    }

    /// §4.2.4 Nested Delete.
    fn expand_nested_delete(&self, project: &Project, path: &Path, field: &FieldRef, delete: &NestedDelete) -> Vec<Mutaction> {
        let mut out = Vec::new();
        let extended_path = extend_pinned(path, field, delete.selector.as_ref());

        out.extend(self.cascading_delete(project, &extended_path));
        out.push(Mutaction::DeleteRelationCheck {
            project: project.clone(),
            path: extended_path.clone(),
        });
        out.push(Mutaction::DeleteDataItemNested {
            project: project.clone(),
            path: extended_path,
        });

        out
    }

    /// §4.2.5 Nested Update.
    fn expand_nested_update(
        &self,
        project: &Project,
        path: &Path,
        field: &FieldRef,
        update: &NestedUpdate,
    ) -> PlannerResult<Vec<Mutaction>> {
        let extended_path = path.extend(field.clone());
        let data = update.data();
        let (non_list_args, list_args) = data.get_update_args();

        let updated_path = match update {
            NestedUpdate::ByWhere { where_, data } => extended_path.last_edge_to_node_edge(current_where(where_, data)),
            NestedUpdate::ByRelation { .. } => extended_path.clone(),
        };

        let mut out = vec![Mutaction::NestedUpdateDataItem {
            project: project.clone(),
            path: extended_path,
            non_list_args,
            list_args,
        }];
        out.extend(self.expand_nested(project, data, &updated_path, false)?);

        Ok(out)
    }

    /// §4.2.6 Nested Upsert. Nested expansion of either branch is
    /// intentionally suppressed, as at the top level (§4.1.3, §9).
    fn expand_nested_upsert(&self, project: &Project, path: &Path, field: &FieldRef, upsert: &NestedUpsert) -> Mutaction {
        let extended_path = path.extend(field.clone());
        let related_model = field.related_model();
        let new_id = self.id_generator.fresh_id();
        let create_where = crate::path::NodeSelector::for_id(related_model.clone(), new_id);

        let (create_non_list, create_list) = upsert.create().get_create_args();
        let (update_non_list, update_list) = upsert.update().get_update_args();

        let final_path = match upsert {
            NestedUpsert::ByWhere { where_, update, .. } => {
                extended_path.last_edge_to_node_edge(current_where(where_, update))
            }
            NestedUpsert::ByRelation { .. } => extended_path.clone(),
        };

        Mutaction::UpsertDataItemIfInRelationWith {
            project: project.clone(),
            path: extended_path,
            create_where,
            create_non_list: to_really_cool_args(&related_model, create_non_list),
            create_list,
            update_non_list,
            update_list,
            path_for_update_branch: final_path,
        }
    }
}
