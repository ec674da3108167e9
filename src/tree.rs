//! Tree orchestration: the render backend seam and the regenerate/clear
//! lifecycle over the expand → interpret → build pipeline.

use crate::branch::{BranchBuilder, BranchDescriptor};
use crate::error::TreeError;
use crate::grammar::{RuleSet, expand};
use crate::interpreter::{PointRecord, TreeInterpreter};
use crate::turtle::JitterSource;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Highest supported expansion depth. The default rule set grows the
/// string by 13x per iteration, so this also bounds the walk length.
pub const MAX_ITERATIONS: u32 = 6;

/// Generation-time configuration consumed by [`TreeGenerator::regenerate`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Seed string the expansion starts from.
    pub axiom: String,
    /// Number of rewrite passes, in `0..=MAX_ITERATIONS`.
    pub iterations: u32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            axiom: "F".to_owned(),
            iterations: 3,
        }
    }
}

impl TreeConfig {
    /// Builds a config with `iterations` clamped into the supported range.
    ///
    /// Clamping is a courtesy for configuration-loading hosts; the
    /// generator itself rejects out-of-range values instead of clamping.
    pub fn clamped(axiom: impl Into<String>, iterations: u32) -> Self {
        Self {
            axiom: axiom.into(),
            iterations: iterations.min(MAX_ITERATIONS),
        }
    }
}

/// The scene-graph seam. Implemented by the hosting engine; the generator
/// only ever instantiates, places, reparents, and destroys through it.
///
/// Handles passed to [`destroy`](RenderBackend::destroy) are owned by the
/// backend thereafter; the generator keeps them solely to tear the previous
/// tree down on the next regeneration.
pub trait RenderBackend {
    /// Opaque identifier for one instantiated visual object.
    type Handle;
    /// Reference to the branch asset/prefab to instantiate from.
    type PrefabRef;
    /// Reference to a node in the external scene graph.
    type NodeRef;
    /// Backend-side failure, surfaced as [`TreeError::RenderBackend`].
    type Error: Display;

    fn instantiate(
        &mut self,
        prefab: &Self::PrefabRef,
        parent: &Self::NodeRef,
    ) -> Result<Self::Handle, Self::Error>;

    fn set_transform(
        &mut self,
        handle: &Self::Handle,
        position: Vec3,
        rotation: Quat,
        scale: Vec3,
    ) -> Result<(), Self::Error>;

    fn reparent(&mut self, handle: &Self::Handle, parent: &Self::NodeRef)
    -> Result<(), Self::Error>;

    fn destroy(&mut self, handle: Self::Handle) -> Result<(), Self::Error>;
}

/// Owns one tree: its configuration, the fixed rule set, the last run's
/// intermediate products, and the registry of instantiated branches.
///
/// All state is scoped to the instance, so multiple independent trees can
/// coexist against the same backend.
pub struct TreeGenerator<B: RenderBackend> {
    config: TreeConfig,
    interpreter: TreeInterpreter,
    builder: BranchBuilder,
    rules: RuleSet,
    prefab: B::PrefabRef,
    parent: B::NodeRef,
    container: Option<B::NodeRef>,
    expanded: String,
    points: Vec<PointRecord>,
    branches: Vec<B::Handle>,
}

impl<B: RenderBackend> TreeGenerator<B> {
    pub fn new(config: TreeConfig, prefab: B::PrefabRef, parent: B::NodeRef) -> Self {
        Self {
            config,
            interpreter: TreeInterpreter::default(),
            builder: BranchBuilder::default(),
            rules: RuleSet::new(),
            prefab,
            parent,
            container: None,
            expanded: String::new(),
            points: Vec::new(),
            branches: Vec::new(),
        }
    }

    /// Swaps in a non-default interpreter (builder pattern).
    pub fn with_interpreter(mut self, interpreter: TreeInterpreter) -> Self {
        self.interpreter = interpreter;
        self
    }

    /// Swaps in a non-default branch builder (builder pattern).
    pub fn with_builder(mut self, builder: BranchBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// Reparents every placed branch under `container` after instantiation,
    /// so a host can keep the whole tree under one scene node.
    pub fn with_container(mut self, container: B::NodeRef) -> Self {
        self.container = Some(container);
        self
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: TreeConfig) {
        self.config = config;
    }

    /// The fully expanded symbol string from the last regeneration.
    pub fn expanded(&self) -> &str {
        &self.expanded
    }

    /// The point list from the last regeneration.
    pub fn points(&self) -> &[PointRecord] {
        &self.points
    }

    /// Number of branches currently instantiated.
    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }

    /// Tears down the previous tree and builds a fresh one from the
    /// current configuration.
    ///
    /// The pipeline runs to completion synchronously: clear, install the
    /// fixed rule set, expand, interpret, derive descriptors, then
    /// instantiate and place one visual object per descriptor, recording
    /// each handle for the next teardown.
    ///
    /// # Errors
    ///
    /// - [`TreeError::Configuration`] when `iterations > MAX_ITERATIONS`,
    ///   checked before any state is touched.
    /// - [`TreeError::UnbalancedBracket`] from interpretation.
    /// - [`TreeError::RenderBackend`] when the backend fails; branches
    ///   already created this run are destroyed again (best effort) so a
    ///   failed call never leaves a half-built tree registered.
    pub fn regenerate<J: JitterSource>(
        &mut self,
        backend: &mut B,
        jitter: &mut J,
    ) -> Result<(), TreeError> {
        if self.config.iterations > MAX_ITERATIONS {
            return Err(TreeError::Configuration {
                got: self.config.iterations,
                max: MAX_ITERATIONS,
            });
        }

        self.clear(backend)?;
        self.rules = RuleSet::tree_default();
        self.expanded = expand(&self.config.axiom, &self.rules, self.config.iterations);
        self.points = self.interpreter.interpret(&self.expanded, jitter)?;

        let descriptors = self.builder.build(&self.points);
        for descriptor in &descriptors {
            if let Err(err) = self.instantiate_branch(backend, descriptor) {
                self.rollback(backend);
                return Err(err);
            }
        }
        Ok(())
    }

    /// Destroys every instantiated branch and empties the registry, rule
    /// table, and intermediate products.
    pub fn clear(&mut self, backend: &mut B) -> Result<(), TreeError> {
        self.rules.clear();
        self.points.clear();
        self.expanded.clear();
        for handle in self.branches.drain(..) {
            backend
                .destroy(handle)
                .map_err(|e| TreeError::RenderBackend(e.to_string()))?;
        }
        Ok(())
    }

    fn instantiate_branch(
        &mut self,
        backend: &mut B,
        descriptor: &BranchDescriptor,
    ) -> Result<(), TreeError> {
        let handle = backend
            .instantiate(&self.prefab, &self.parent)
            .map_err(|e| TreeError::RenderBackend(e.to_string()))?;
        let placed = backend
            .set_transform(&handle, descriptor.start, descriptor.rotation, descriptor.scale)
            .map_err(|e| TreeError::RenderBackend(e.to_string()))
            .and_then(|()| match &self.container {
                Some(container) => backend
                    .reparent(&handle, container)
                    .map_err(|e| TreeError::RenderBackend(e.to_string())),
                None => Ok(()),
            });
        match placed {
            Ok(()) => {
                self.branches.push(handle);
                Ok(())
            }
            Err(err) => {
                let _ = backend.destroy(handle);
                Err(err)
            }
        }
    }

    /// Best-effort teardown of branches created during a failed run; the
    /// original error is what reaches the caller.
    fn rollback(&mut self, backend: &mut B) {
        for handle in self.branches.drain(..) {
            let _ = backend.destroy(handle);
        }
    }
}
