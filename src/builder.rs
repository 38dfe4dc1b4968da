use crate::constructor::{Constructible, DependencyShape};
use crate::logging;
use crate::registry::{DependencyRegistry, EntryState};
use crate::selector::{ConstructorSelector, SelectedConstructor};
use crate::synthesizer::{MockSynthesizer, StrictSynthesizer};
use crate::{BuilderError, Result};
use serde::Serialize;
use std::any::Any;

/// Start building an instance of `S`
pub fn make<S: Constructible>() -> Result<Builder<S>> {
    Builder::new()
}

/// Builds one instance of a system under test.
///
/// Dependencies passed to [`Builder::with`] are used as given; every other
/// parameter of the selected constructor receives a strict substitute when
/// [`Builder::build`] runs. Capability parameters are keyed by their `Arc`
/// type, so supply them as `with::<Arc<dyn Trait>>(..)`.
pub struct Builder<S> {
    selected: SelectedConstructor<S>,
    registry: DependencyRegistry,
    synthesizer: Box<dyn MockSynthesizer>,
}

impl<S: Constructible> Builder<S> {
    pub fn new() -> Result<Self> {
        let selected = ConstructorSelector::select::<S>()?;
        Ok(Self::from_selected(selected))
    }
}

impl<S> Builder<S> {
    pub fn from_selected(selected: SelectedConstructor<S>) -> Self {
        let registry = DependencyRegistry::initialize(&selected);
        Self {
            selected,
            registry,
            synthesizer: Box::new(StrictSynthesizer),
        }
    }

    /// Replace the synthesizer used for dependencies nobody supplied
    pub fn with_synthesizer<M: MockSynthesizer + 'static>(mut self, synthesizer: M) -> Self {
        self.synthesizer = Box::new(synthesizer);
        self
    }

    /// Use `dependency` for every parameter of type `D`
    pub fn with<D: Any>(mut self, dependency: D) -> Result<Self> {
        self.registry.override_with(Some(dependency))?;
        Ok(self)
    }

    /// Pass "no value" for parameters of type `D` instead of a substitute
    pub fn with_none<D: Any>(mut self) -> Result<Self> {
        self.registry.override_with::<D>(None)?;
        Ok(self)
    }

    /// Use `dependency` if present, otherwise keep the strict substitute
    pub fn with_or_default<D: Any>(mut self, dependency: Option<D>) -> Result<Self> {
        self.registry.override_if_present(dependency)?;
        Ok(self)
    }

    pub fn constructor(&self) -> &SelectedConstructor<S> {
        &self.selected
    }

    /// How each parameter will be filled if [`Builder::build`] ran now
    pub fn resolution_plan(&self) -> ResolutionPlan {
        let parameters = self
            .selected
            .parameters()
            .iter()
            .enumerate()
            .map(|(position, parameter)| PlannedParameter {
                position,
                dependency: parameter.dependency().name(),
                shape: parameter.shape(),
                state: self
                    .registry
                    .state(parameter.dependency())
                    .unwrap_or(EntryState::Unresolved),
            })
            .collect();

        ResolutionPlan {
            sut: self.selected.sut(),
            constructor: self.selected.name(),
            parameters,
        }
    }

    /// Synthesize what is still missing and run the selected constructor.
    ///
    /// An error returned by the constructor itself comes back as
    /// [`BuilderError::Constructor`] holding the original error.
    pub fn build(mut self) -> Result<S> {
        let synthesized = self.registry.resolve_remaining(self.synthesizer.as_ref())?;
        let arguments = self.registry.materialize(&self.selected);
        let sut = self
            .selected
            .invoke(&arguments)
            .map_err(BuilderError::Constructor)?;

        logging::log_sut_built(self.selected.sut(), arguments.len(), synthesized);
        Ok(sut)
    }
}

/// Snapshot of how a builder will fill its constructor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionPlan {
    pub sut: &'static str,
    pub constructor: &'static str,
    pub parameters: Vec<PlannedParameter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedParameter {
    pub position: usize,
    pub dependency: &'static str,
    pub shape: DependencyShape,
    pub state: EntryState,
}

impl ResolutionPlan {
    /// Parameters that will receive a synthesized substitute
    pub fn to_synthesize(&self) -> impl Iterator<Item = &PlannedParameter> {
        self.parameters
            .iter()
            .filter(|parameter| parameter.state == EntryState::Unresolved)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
