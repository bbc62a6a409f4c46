//! Depth-first artifact ordering and package-level module ordering.

use std::collections::HashSet;

use petgraph::graph::DiGraph;
use petgraph::visit::Topo;

use crate::core::artifact::ArtifactId;
use crate::core::module::ModuleId;
use crate::core::registry::Registry;
use crate::resolver::errors::ResolveError;

/// Visit state for the depth-first walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Resolve the artifact build order for `root`.
///
/// Walks the root module's artifacts in creation order (main library
/// before test executable), descending into each artifact's dependency
/// list in declaration order. Output is post-order: by the time an
/// artifact appears, all of its dependencies already have. Each artifact
/// appears exactly once, so repeated dependency declarations never
/// duplicate linkage.
///
/// Encountering an in-progress artifact during descent means the edges
/// are cyclic; the error carries the path from the root artifact down
/// through the repeated node.
pub fn resolve(registry: &Registry, root: ModuleId) -> Result<Vec<ArtifactId>, ResolveError> {
    let mut marks = vec![Mark::Unvisited; registry.artifact_count()];
    let mut stack = Vec::new();
    let mut order = Vec::new();

    for &artifact in registry.module(root).artifacts() {
        visit(registry, artifact, &mut marks, &mut stack, &mut order)?;
    }

    tracing::debug!(
        root = %registry.module(root).name(),
        artifacts = order.len(),
        "resolved build order"
    );
    Ok(order)
}

fn visit(
    registry: &Registry,
    artifact: ArtifactId,
    marks: &mut [Mark],
    stack: &mut Vec<ArtifactId>,
    order: &mut Vec<ArtifactId>,
) -> Result<(), ResolveError> {
    match marks[artifact.index()] {
        Mark::Done => return Ok(()),
        Mark::InProgress => {
            // The whole descent stack, root first, closed by the repeated
            // artifact.
            let mut path: Vec<String> = stack
                .iter()
                .map(|&a| registry.artifact(a).name().to_string())
                .collect();
            path.push(registry.artifact(artifact).name().to_string());
            return Err(ResolveError::CycleDetected { path });
        }
        Mark::Unvisited => {}
    }

    marks[artifact.index()] = Mark::InProgress;
    stack.push(artifact);

    for &dependency in registry.artifact(artifact).dependencies() {
        visit(registry, dependency, marks, stack, order)?;
    }

    stack.pop();
    marks[artifact.index()] = Mark::Done;
    order.push(artifact);

    Ok(())
}

/// Package-level module order for the subgraph reachable from `root`,
/// dependencies before dependents.
///
/// This is the order a generator lists packages in; linkage correctness
/// comes from [`resolve`], which remains the authoritative cycle check
/// with full path reporting.
pub fn module_order(registry: &Registry, root: ModuleId) -> Result<Vec<ModuleId>, ResolveError> {
    let mut graph = DiGraph::<ModuleId, ()>::new();
    let mut nodes = Vec::with_capacity(registry.len());

    for module in registry.modules() {
        nodes.push(graph.add_node(module.id()));
    }
    for module in registry.modules() {
        for &child in module.children() {
            let (from, to) = (nodes[module.id().index()], nodes[child.index()]);
            if !graph.contains_edge(from, to) {
                graph.add_edge(from, to, ());
            }
        }
    }

    // Modules reachable from the root through package-level edges.
    let mut reachable = HashSet::new();
    let mut pending = vec![root];
    while let Some(current) = pending.pop() {
        if reachable.insert(current) {
            pending.extend(registry.module(current).children());
        }
    }

    let mut order = Vec::new();
    let mut topo = Topo::new(&graph);
    while let Some(node) = topo.next(&graph) {
        order.push(graph[node]);
    }
    // Topo yields dependents first along our edge direction; the build
    // wants dependencies first.
    order.reverse();
    order.retain(|id| reachable.contains(id));

    // Topo silently skips nodes on cycles.
    if order.len() != reachable.len() {
        let ordered: HashSet<ModuleId> = order.iter().copied().collect();
        let modules = registry
            .modules()
            .filter(|m| reachable.contains(&m.id()) && !ordered.contains(&m.id()))
            .map(|m| m.name().to_string())
            .collect();
        return Err(ResolveError::ModuleCycle { modules });
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::artifact::ArtifactKind;
    use crate::core::builder::ModuleBuilder;

    fn leaf(registry: &mut Registry, name: &str) -> ModuleId {
        ModuleBuilder::new(registry, name, "github.com/example")
            .build()
            .unwrap()
    }

    #[test]
    fn test_dependencies_precede_dependents() {
        let mut registry = Registry::new();
        leaf(&mut registry, "cbase");

        let uuid = ModuleBuilder::new(&mut registry, "uuid", "github.com/example")
            .depends_on("cbase")
            .with_test()
            .build()
            .unwrap();

        let order = resolve(&registry, uuid).unwrap();
        let names: Vec<&str> = order
            .iter()
            .map(|&a| registry.artifact(a).name().as_str())
            .collect();

        assert_eq!(names, vec!["cbase", "uuid", "uuid_test"]);
    }

    #[test]
    fn test_shared_dependency_emitted_once() {
        let mut registry = Registry::new();
        leaf(&mut registry, "cbase");
        let _hash = ModuleBuilder::new(&mut registry, "chash", "github.com/example")
            .depends_on("cbase")
            .build()
            .unwrap();

        let uuid = ModuleBuilder::new(&mut registry, "uuid", "github.com/example")
            .depends_on("cbase")
            .depends_on("chash")
            .build()
            .unwrap();

        let order = resolve(&registry, uuid).unwrap();
        let names: Vec<&str> = order
            .iter()
            .map(|&a| registry.artifact(a).name().as_str())
            .collect();

        assert_eq!(names, vec!["cbase", "chash", "uuid"]);
    }

    #[test]
    fn test_cycle_reports_path() {
        let mut registry = Registry::new();
        let module = registry.register("tangle", "github.com/example").unwrap();
        let a = registry.add_artifact(module, ArtifactKind::Library, "a").unwrap();
        let b = registry.add_artifact(module, ArtifactKind::Library, "b").unwrap();
        let c = registry.add_artifact(module, ArtifactKind::Library, "c").unwrap();

        registry.add_dependency(a, b).unwrap();
        registry.add_dependency(b, c).unwrap();
        registry.add_dependency(c, a).unwrap();

        let err = resolve(&registry, module).unwrap_err();
        assert_eq!(
            err,
            ResolveError::CycleDetected {
                path: vec!["a".into(), "b".into(), "c".into(), "a".into()],
            }
        );
    }

    #[test]
    fn test_cycle_path_starts_at_the_root() {
        let mut registry = Registry::new();
        let module = registry.register("tangle", "github.com/example").unwrap();
        let root = registry.add_artifact(module, ArtifactKind::Executable, "app").unwrap();
        let x = registry.add_artifact(module, ArtifactKind::Library, "x").unwrap();
        let y = registry.add_artifact(module, ArtifactKind::Library, "y").unwrap();

        registry.add_dependency(root, x).unwrap();
        registry.add_dependency(x, y).unwrap();
        registry.add_dependency(y, x).unwrap();

        let err = resolve(&registry, module).unwrap_err();
        // The path keeps the descent from the root artifact, not just the
        // cycle segment.
        assert_eq!(
            err,
            ResolveError::CycleDetected {
                path: vec!["app".into(), "x".into(), "y".into(), "x".into()],
            }
        );
    }

    #[test]
    fn test_independent_artifacts_follow_registration_order() {
        let mut registry = Registry::new();
        leaf(&mut registry, "ctime");
        leaf(&mut registry, "chash");
        leaf(&mut registry, "crandom");

        let uuid = ModuleBuilder::new(&mut registry, "uuid", "github.com/example")
            .depends_on("ctime")
            .depends_on("chash")
            .depends_on("crandom")
            .build()
            .unwrap();

        let order = resolve(&registry, uuid).unwrap();
        let names: Vec<&str> = order
            .iter()
            .map(|&a| registry.artifact(a).name().as_str())
            .collect();

        assert_eq!(names, vec!["ctime", "chash", "crandom", "uuid"]);
    }

    #[test]
    fn test_module_order_reachable_only() {
        let mut registry = Registry::new();
        leaf(&mut registry, "cbase");
        leaf(&mut registry, "unrelated");

        let uuid = ModuleBuilder::new(&mut registry, "uuid", "github.com/example")
            .depends_on("cbase")
            .build()
            .unwrap();

        let order = module_order(&registry, uuid).unwrap();
        let names: Vec<&str> = order
            .iter()
            .map(|&m| registry.module(m).name().as_str())
            .collect();

        assert_eq!(names, vec!["cbase", "uuid"]);
    }

    #[test]
    fn test_module_order_detects_package_cycle() {
        let mut registry = Registry::new();
        let a = registry.register("a", "org").unwrap();
        let b = registry.register("b", "org").unwrap();
        registry.add_child(a, b);
        registry.add_child(b, a);

        let err = module_order(&registry, a).unwrap_err();
        assert_eq!(
            err,
            ResolveError::ModuleCycle {
                modules: vec!["a".into(), "b".into()],
            }
        );
    }
}
