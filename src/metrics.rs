use std::fmt;

/// The metrics sink collaborator from §6: the planner's only piece of
/// process-wide shared state, incremented with atomic-add semantics once per
/// top-level expansion.
pub trait MetricsSink: fmt::Debug + Send + Sync {
    fn increment_mutactions(&self, project_id: &str, by: u64);
}

/// Default sink, backed by the `metrics` facade crate — the same crate the
/// teacher's `prisma-metrics` / `query-engine/metrics` libraries build on
/// rather than a bespoke counter type.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn increment_mutactions(&self, project_id: &str, by: u64) {
        metrics::counter!("mutation_planner_mutactions_total", by, "project_id" => project_id.to_owned());
    }
}
