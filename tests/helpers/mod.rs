//! Shared test fixtures: synthetic object universes and pipeline setup.

#![allow(dead_code)]

use stubgen::listeners;
use stubgen::pipeline::{Environment, Pipeline};
use stubgen::runtime::memory::MemoryUniverse;
use stubgen::runtime::trackers::{DefinitionTracker, MixinTracker};
use stubgen::runtime::{GenericRegistry, PathUnit, SymbolSet};

/// Root of the unit under inspection in fixture universes.
pub const UNIT_ROOT: &str = "lib/acme";

/// Everything a pipeline borrows, owned in one place so tests can build an
/// environment from a single binding.
pub struct Fixture {
    pub universe: MemoryUniverse,
    pub unit: PathUnit,
    pub payload: SymbolSet,
    pub bootstrap: SymbolSet,
    pub generics: GenericRegistry,
    pub definitions: DefinitionTracker,
    pub mixins: MixinTracker,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            universe: MemoryUniverse::new(),
            unit: PathUnit::new(UNIT_ROOT),
            payload: SymbolSet::new(),
            bootstrap: SymbolSet::new(),
            generics: GenericRegistry::new(),
            definitions: DefinitionTracker::new(),
            mixins: MixinTracker::new(),
        }
    }

    pub fn env(&self) -> Environment<'_> {
        Environment {
            runtime: &self.universe,
            unit: &self.unit,
            payload: &self.payload,
            bootstrap: &self.bootstrap,
            generics: &self.generics,
            definitions: &self.definitions,
        }
    }

    /// A bare pipeline with no listeners registered.
    pub fn pipeline(&self) -> Pipeline<'_> {
        Pipeline::new(self.env())
    }

    /// A pipeline carrying the built-in listener set.
    pub fn enriched_pipeline(&self) -> Pipeline<'_> {
        let mut pipeline = Pipeline::new(self.env());
        for listener in listeners::default_set(&self.mixins) {
            pipeline.add_listener(listener);
        }
        pipeline
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Path of a file inside the unit under inspection.
pub fn unit_file(name: &str) -> String {
    format!("{UNIT_ROOT}/{name}")
}

/// Path of a file outside the unit under inspection.
pub fn foreign_file(name: &str) -> String {
    format!("vendor/ext/{name}")
}
