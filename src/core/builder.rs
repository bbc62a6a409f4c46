//! Module construction - wiring a library and its paired test executable.
//!
//! The builder implements the get-package flow: validate that every named
//! dependency module is already registered, register the module, create
//! its main library and attach linkage to each dependency's main library,
//! then create the `<name>_test` executable. The test executable links
//! everything the library links plus the library itself; the library never
//! depends on the test.
//!
//! Package-level and artifact-level attachment are deliberately separate
//! surfaces: a module can depend on another module's package while linking
//! its library only into the test executable (the usual shape for a
//! unit-test framework), which `test_depends_on` expresses.

use crate::core::artifact::ArtifactKind;
use crate::core::module::ModuleId;
use crate::core::registry::{Registry, RegistryError};
use crate::util::InternedString;

/// Builder for a module, its main library, and its test executable.
pub struct ModuleBuilder<'a> {
    registry: &'a mut Registry,
    name: InternedString,
    organization: InternedString,
    /// Modules linked into both the library and the test executable.
    link_deps: Vec<InternedString>,
    /// Modules linked into the test executable only.
    test_only_deps: Vec<InternedString>,
    with_test: bool,
}

impl<'a> ModuleBuilder<'a> {
    /// Start describing a module.
    pub fn new(
        registry: &'a mut Registry,
        name: impl AsRef<str>,
        organization: impl AsRef<str>,
    ) -> Self {
        ModuleBuilder {
            registry,
            name: InternedString::new(name),
            organization: InternedString::new(organization),
            link_deps: Vec::new(),
            test_only_deps: Vec::new(),
            with_test: false,
        }
    }

    /// Link the named module's main library into this module's library
    /// (and, transitively, into the test executable).
    pub fn depends_on(mut self, module: impl AsRef<str>) -> Self {
        self.link_deps.push(InternedString::new(module));
        self
    }

    /// Link the named module's main library into the test executable only.
    pub fn test_depends_on(mut self, module: impl AsRef<str>) -> Self {
        self.test_only_deps.push(InternedString::new(module));
        self
    }

    /// Also create a `<name>_test` executable.
    pub fn with_test(mut self) -> Self {
        self.with_test = true;
        self
    }

    /// Register the module and create its artifacts.
    ///
    /// Fails before touching the registry: `MissingDependency` if a named
    /// dependency is not registered, `NoMainLibrary` if it has nothing to
    /// link against. Calling `build` again for an already-built module
    /// returns it unchanged.
    pub fn build(self) -> Result<ModuleId, RegistryError> {
        // Every dependency must already be registered and expose a main
        // library to link against. Validated before any mutation so a
        // failed build leaves no half-wired module behind.
        for dep in self.link_deps.iter().chain(&self.test_only_deps) {
            if !self.registry.contains(dep) {
                return Err(RegistryError::MissingDependency {
                    module: self.name,
                    dependency: *dep,
                });
            }
            self.registry.main_library_of(dep)?;
        }

        let module = self.registry.register(self.name, self.organization)?;

        if self.registry.module(module).main_library().is_some() {
            tracing::debug!(module = %self.name, "module already built, reusing");
            return Ok(module);
        }

        // Package-level edges, declaration order: test-only deps first,
        // then link deps, matching how the artifacts will link.
        for dep in self.test_only_deps.iter().chain(&self.link_deps) {
            let child = self.registry.lookup(dep)?;
            self.registry.add_child(module, child);
        }

        let library = self
            .registry
            .add_artifact(module, ArtifactKind::Library, self.name)?;
        self.registry.set_main_library(module, library);

        let mut linked = Vec::with_capacity(self.link_deps.len());
        for dep in &self.link_deps {
            let dep_library = self.registry.main_library_of(dep)?;
            self.registry.add_dependency(library, dep_library)?;
            linked.push(dep_library);
        }

        if self.with_test {
            let test_name = format!("{}_test", self.name);
            let test = self
                .registry
                .add_artifact(module, ArtifactKind::Executable, test_name)?;
            self.registry.set_test_artifact(module, test);

            for dep in &self.test_only_deps {
                let dep_library = self.registry.main_library_of(dep)?;
                self.registry.add_dependency(test, dep_library)?;
            }
            for &dep_library in &linked {
                self.registry.add_dependency(test, dep_library)?;
            }
            // The test links the library under test; never the reverse.
            self.registry.add_dependency(test, library)?;
        }

        tracing::debug!(module = %self.name, test = self.with_test, "built module");
        Ok(module)
    }
}
