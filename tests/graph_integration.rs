//! End-to-end tests over the registry, builder, and resolver.

use slipway::{ops, BuildOrder, ModuleBuilder, Registry, RegistryError};

const ORG: &str = "github.com/example";

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Register the full dependency set of the uuid module: a unit-test
/// framework and entry shim (test-only), plus the four libraries the main
/// library links against.
fn declare_uuid_world(registry: &mut Registry) -> slipway::ModuleId {
    for leaf in ["cunittest", "centry", "cbase", "ctime", "chash", "crandom"] {
        ModuleBuilder::new(registry, leaf, ORG).build().unwrap();
    }

    ModuleBuilder::new(registry, "cuuid", ORG)
        .test_depends_on("cunittest")
        .test_depends_on("centry")
        .depends_on("cbase")
        .depends_on("ctime")
        .depends_on("chash")
        .depends_on("crandom")
        .with_test()
        .build()
        .unwrap()
}

#[test]
fn leaf_plus_dependent_resolves_in_link_order() {
    init_logging();
    let mut registry = Registry::new();

    ModuleBuilder::new(&mut registry, "base", ORG).build().unwrap();
    let uuid = ModuleBuilder::new(&mut registry, "uuid", ORG)
        .depends_on("base")
        .with_test()
        .build()
        .unwrap();

    let order = BuildOrder::for_module(&registry, uuid).unwrap();
    assert_eq!(order.artifact_names(), vec!["base", "uuid", "uuid_test"]);
}

#[test]
fn full_module_world_resolves_test_last() {
    init_logging();
    let mut registry = Registry::new();
    let uuid = declare_uuid_world(&mut registry);

    let order = BuildOrder::for_module(&registry, uuid).unwrap();
    let names = order.artifact_names();

    // Test executable last; test-only libraries are pulled in between the
    // main library and the test.
    assert_eq!(
        names,
        vec!["cbase", "ctime", "chash", "crandom", "cuuid", "cunittest", "centry", "cuuid_test"]
    );

    // Topological invariant: every linked artifact appears strictly
    // earlier than the artifact linking it.
    for (position, entry) in order.artifacts.iter().enumerate() {
        for link in &entry.links {
            let dep_position = order
                .artifacts
                .iter()
                .position(|e| e.artifact == *link)
                .unwrap();
            assert!(
                dep_position < position,
                "{} must appear before {}",
                link,
                entry.artifact
            );
        }
    }

    // Package-level order lists the root last.
    assert_eq!(order.modules.last().map(|m| m.as_str()), Some("cuuid"));
}

#[test]
fn resolution_is_deterministic_across_runs() {
    init_logging();

    let mut first = Registry::new();
    let mut second = Registry::new();
    let root_a = declare_uuid_world(&mut first);
    let root_b = declare_uuid_world(&mut second);

    let order_a = BuildOrder::for_module(&first, root_a).unwrap();
    let order_b = BuildOrder::for_module(&second, root_b).unwrap();

    assert_eq!(order_a.artifact_names(), order_b.artifact_names());
    assert_eq!(order_a.modules, order_b.modules);
}

#[test]
fn repeated_get_package_reuses_the_module() {
    init_logging();
    let mut registry = Registry::new();

    let first = declare_uuid_world(&mut registry);
    let artifact_count = registry.artifact_count();
    let module_count = registry.len();

    let second = declare_uuid_world(&mut registry);

    assert_eq!(first, second);
    assert_eq!(registry.artifact_count(), artifact_count);
    assert_eq!(registry.len(), module_count);
}

#[test]
fn unregistered_dependency_is_an_error() {
    init_logging();
    let mut registry = Registry::new();

    let err = ModuleBuilder::new(&mut registry, "cuuid", ORG)
        .depends_on("crandom")
        .build()
        .unwrap_err();

    assert!(matches!(err, RegistryError::MissingDependency { .. }));
    assert!(err.to_string().contains("crandom"));
}

#[test]
fn emitted_json_is_consumable_by_a_generator() {
    init_logging();
    let mut registry = Registry::new();
    declare_uuid_world(&mut registry);

    let json = ops::emit_build_order(&registry, "cuuid").unwrap();
    let decoded: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(decoded["root"], "cuuid");
    let artifacts = decoded["artifacts"].as_array().unwrap();
    assert_eq!(artifacts.len(), 8);

    // The test executable links the framework, the shim, every library
    // the main library links, and the main library itself.
    let test_entry = artifacts.last().unwrap();
    assert_eq!(test_entry["artifact"], "cuuid_test");
    assert_eq!(test_entry["kind"], "executable");
    let links: Vec<&str> = test_entry["links"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(
        links,
        vec!["cunittest", "centry", "cbase", "ctime", "chash", "crandom", "cuuid"]
    );
}
