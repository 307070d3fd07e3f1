//! The planner's public surface (§6): five entry points compiling a typed
//! input tree into an ordered `Vec<Mutaction>`.

mod cascade;
mod expand;

use crate::args::{to_really_cool_args, CoolArgs, PreviousValues};
use crate::error::PlannerResult;
use crate::id_gen::{CuidGenerator, IdGenerator};
use crate::metrics::{GlobalMetricsSink, MetricsSink};
use crate::mutaction::Mutaction;
use crate::path::{NodeSelector, Path};
use crate::schema::Project;

/// Holds the two injected collaborators (§6a) the planner needs beyond the
/// read-only schema: an ID generator and a metrics sink. Neither is shared
/// mutable state in the usual sense — the planner calls them but never reads
/// their internals back — so the planner itself stays a pure function of
/// its arguments plus these two side channels, as §5 requires.
pub struct Planner {
    id_generator: Box<dyn IdGenerator>,
    metrics: Box<dyn MetricsSink>,
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(Box::new(CuidGenerator), Box::new(GlobalMetricsSink))
    }
}

impl Planner {
    pub fn new(id_generator: Box<dyn IdGenerator>, metrics: Box<dyn MetricsSink>) -> Self {
        Self { id_generator, metrics }
    }

    fn record_metrics(&self, project: &Project, emitted: usize) {
        self.metrics.increment_mutactions(&project.id, emitted as u64);
    }

    /// §4.1.1 Create: `[CreateDataItem, ...nested]`.
    #[tracing::instrument(skip(self, args), fields(model = %path.last_model().name))]
    pub fn for_create(&self, project: &Project, path: &Path, args: &CoolArgs) -> PlannerResult<Vec<Mutaction>> {
        let mut out = Vec::new();
        let (non_list, list) = args.get_create_args();
        let model = path.last_model();

        out.push(Mutaction::CreateDataItem {
            project: project.clone(),
            path: path.clone(),
            non_list_args: to_really_cool_args(&model, non_list),
            list_args: list,
        });
        out.extend(self.expand_nested(project, args, path, true)?);

        self.record_metrics(project, out.len());
        Ok(out)
    }

    /// §4.1.2 Update: `[UpdateDataItem, ...nested]`, recursing against
    /// `path.updatedRoot(args)` so later `NodeEdge`s see the post-update
    /// identity.
    #[tracing::instrument(skip(self, args), fields(model = %path.last_model().name))]
    pub fn for_update(
        &self,
        project: &Project,
        path: &Path,
        args: &CoolArgs,
        previous_values: PreviousValues,
    ) -> PlannerResult<Vec<Mutaction>> {
        let mut out = Vec::new();
        let (non_list, list) = args.get_update_args();
        let updated_path = path.updated_root(&non_list);

        out.push(Mutaction::UpdateDataItem {
            project: project.clone(),
            path: path.clone(),
            non_list_args: non_list,
            list_args: list,
            previous_values,
        });
        out.extend(self.expand_nested(project, args, &updated_path, false)?);

        self.record_metrics(project, out.len());
        Ok(out)
    }

    /// §4.1.3 Upsert: exactly one `UpsertDataItem`. Nested expansion of
    /// either branch is intentionally suppressed — see DESIGN.md and §9.
    #[tracing::instrument(skip(self, create_args, update_args), fields(model = %path.last_model().name))]
    pub fn for_upsert(
        &self,
        project: &Project,
        path: &Path,
        create_where: NodeSelector,
        updated_where: NodeSelector,
        create_args: &CoolArgs,
        update_args: &CoolArgs,
    ) -> PlannerResult<Vec<Mutaction>> {
        let model = path.last_model();
        let (create_non_list, create_list) = create_args.get_create_args();
        let (update_non_list, update_list) = update_args.get_update_args();

        let out = vec![Mutaction::UpsertDataItem {
            project: project.clone(),
            path: path.clone(),
            create_where,
            updated_where,
            create_non_list: to_really_cool_args(&model, create_non_list),
            create_list,
            update_non_list,
            update_list,
        }];

        self.record_metrics(project, out.len());
        Ok(out)
    }

    /// §4.1.4 Delete: `[VerifyWhere, ...cascades, DeleteRelationCheck, DeleteDataItem]`.
    #[tracing::instrument(skip(self, previous_values), fields(model = %path.last_model().name))]
    pub fn for_delete(
        &self,
        project: &Project,
        path: &Path,
        previous_values: PreviousValues,
    ) -> PlannerResult<Vec<Mutaction>> {
        let root_selector = path
            .root_selector()
            .expect("forDelete requires a path rooted at an identified node")
            .clone();

        let mut out = vec![Mutaction::VerifyWhere {
            project: project.clone(),
            selector: root_selector,
        }];
        out.extend(self.cascading_delete(project, path));
        out.push(Mutaction::DeleteRelationCheck {
            project: project.clone(),
            path: path.clone(),
        });
        out.push(Mutaction::DeleteDataItem {
            project: project.clone(),
            path: path.clone(),
            previous_values,
        });

        self.record_metrics(project, out.len());
        Ok(out)
    }

    /// §4.3 Cascading Delete Resolver, reusable directly per §6.
    #[tracing::instrument(skip(self), fields(model = %start.last_model().name))]
    pub fn cascading_delete(&self, project: &Project, start: &Path) -> Vec<Mutaction> {
        cascade::cascading_delete(project, start)
    }
}
