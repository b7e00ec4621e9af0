//! Prerequisite links are never enforced when courses are loaded. These
//! checks report the links that do not hold up, for callers that want to
//! know.

use petgraph::{algo::tarjan_scc, graphmap::DiGraphMap};

use crate::domain::{Catalog, CourseId};

/// A prerequisite naming a course that [`Catalog::lookup`] cannot find.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingPrerequisite {
    /// The course that lists the prerequisite.
    pub course: CourseId,
    /// The prerequisite identifier, as stored on the course.
    pub prerequisite: String,
}

/// Finds every prerequisite that does not resolve to a course in the catalog.
///
/// Results are ordered by course (catalog order), then by the position of
/// the prerequisite on that course.
#[must_use]
pub fn dangling_prerequisites(catalog: &Catalog) -> Vec<DanglingPrerequisite> {
    catalog
        .iter()
        .flat_map(|course| {
            course
                .prerequisites()
                .iter()
                .filter(move |prerequisite| !catalog.contains(prerequisite))
                .map(move |prerequisite| DanglingPrerequisite {
                    course: course.identifier().clone(),
                    prerequisite: prerequisite.clone(),
                })
        })
        .collect()
}

/// Finds groups of courses that are (transitively) prerequisites of
/// themselves.
///
/// Only resolvable prerequisites take part. Each cycle lists its members in
/// catalog order, and cycles are ordered by their first member.
#[must_use]
pub fn prerequisite_cycles(catalog: &Catalog) -> Vec<Vec<CourseId>> {
    // Nodes are catalog keys. Edges point from a course to its prerequisite.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::with_capacity(catalog.len(), 0);
    for (key, course) in catalog.entries() {
        graph.add_node(key);
        for prerequisite in course.prerequisites() {
            if let Some((prerequisite_key, _)) = catalog.resolve(prerequisite) {
                graph.add_edge(key, prerequisite_key, ());
            }
        }
    }

    let mut cycles: Vec<Vec<&str>> = tarjan_scc(&graph)
        .into_iter()
        .filter(|component| {
            component.len() > 1 || graph.contains_edge(component[0], component[0])
        })
        .map(|mut component| {
            component.sort_unstable();
            component
        })
        .collect();
    cycles.sort_unstable();

    cycles
        .into_iter()
        .map(|component| {
            component
                .into_iter()
                .filter_map(|key| catalog.get_by_key(key))
                .map(|course| course.identifier().clone())
                .collect()
        })
        .collect()
}
