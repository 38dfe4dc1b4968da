use crate::constructor::{Arguments, DependencyType, Parameter};
use crate::logging;
use crate::selector::SelectedConstructor;
use crate::synthesizer::MockSynthesizer;
use crate::{BuilderError, Result};
use serde::Serialize;
use std::any::Any;
use std::collections::HashMap;

/// Where a dependency entry stands in resolution
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryState {
    /// Nobody supplied a value; a substitute will be synthesized
    Unresolved,
    /// Supplied with a value
    Explicit,
    /// Supplied as "no value"; passed to the constructor as none
    ExplicitNone,
    /// Filled in by a synthesizer
    Synthesized,
}

enum Entry {
    Unresolved,
    Explicit(Option<Box<dyn Any>>),
    Synthesized(Box<dyn Any>),
}

impl Entry {
    fn state(&self) -> EntryState {
        match self {
            Entry::Unresolved => EntryState::Unresolved,
            Entry::Explicit(Some(_)) => EntryState::Explicit,
            Entry::Explicit(None) => EntryState::ExplicitNone,
            Entry::Synthesized(_) => EntryState::Synthesized,
        }
    }

    fn value(&self) -> Option<&dyn Any> {
        match self {
            Entry::Explicit(Some(value)) | Entry::Synthesized(value) => Some(&**value),
            Entry::Explicit(None) | Entry::Unresolved => None,
        }
    }
}

struct Slot {
    parameter: Parameter,
    entry: Entry,
}

/// Dependency values for one builder, keyed by the distinct parameter types
/// of its selected constructor.
///
/// Two parameters of the same type share one entry.
pub struct DependencyRegistry {
    sut: &'static str,
    order: Vec<DependencyType>,
    slots: HashMap<DependencyType, Slot>,
}

impl DependencyRegistry {
    /// One unresolved entry per distinct parameter type
    pub fn initialize<S>(selected: &SelectedConstructor<S>) -> Self {
        let mut order = Vec::new();
        let mut slots = HashMap::new();

        for parameter in selected.parameters() {
            let dependency = parameter.dependency();
            if slots.contains_key(&dependency) {
                continue;
            }
            order.push(dependency);
            slots.insert(
                dependency,
                Slot {
                    parameter: *parameter,
                    entry: Entry::Unresolved,
                },
            );
        }

        Self {
            sut: selected.sut(),
            order,
            slots,
        }
    }

    pub fn contains(&self, dependency: DependencyType) -> bool {
        self.slots.contains_key(&dependency)
    }

    pub fn state(&self, dependency: DependencyType) -> Option<EntryState> {
        self.slots.get(&dependency).map(|slot| slot.entry.state())
    }

    /// Number of distinct dependency types
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Set the entry for `D`. `None` records an explicit "no value", which is
    /// never replaced by a substitute.
    pub fn override_with<D: Any>(&mut self, value: Option<D>) -> Result<()> {
        let dependency = DependencyType::of::<D>();
        let slot = self.slot_mut(dependency)?;
        let explicit = value.is_some();
        slot.entry = Entry::Explicit(value.map(|value| Box::new(value) as Box<dyn Any>));
        logging::log_dependency_overridden(self.sut, dependency.name(), explicit);
        Ok(())
    }

    /// Like [`DependencyRegistry::override_with`], but `None` leaves the entry
    /// as it was. The type is still checked.
    pub fn override_if_present<D: Any>(&mut self, value: Option<D>) -> Result<()> {
        match value {
            Some(value) => self.override_with(Some(value)),
            None => {
                let dependency = DependencyType::of::<D>();
                self.slot_mut(dependency)?;
                logging::log_override_skipped(self.sut, dependency.name());
                Ok(())
            }
        }
    }

    /// Synthesize a substitute for every entry nobody touched
    pub fn resolve_remaining(&mut self, synthesizer: &dyn MockSynthesizer) -> Result<usize> {
        let mut synthesized = 0;

        for dependency in &self.order {
            let Some(slot) = self.slots.get_mut(dependency) else {
                continue;
            };
            if !matches!(slot.entry, Entry::Unresolved) {
                continue;
            }
            let value = synthesizer.synthesize(&slot.parameter)?;
            slot.entry = Entry::Synthesized(value);
            logging::log_dependency_synthesized(self.sut, dependency.name());
            synthesized += 1;
        }

        Ok(synthesized)
    }

    /// Constructor arguments in parameter order
    pub fn materialize<'a, S>(&'a self, selected: &SelectedConstructor<S>) -> Arguments<'a> {
        let slots = selected
            .parameters()
            .iter()
            .map(|parameter| {
                let dependency = parameter.dependency();
                let value = self
                    .slots
                    .get(&dependency)
                    .and_then(|slot| slot.entry.value());
                (dependency, value)
            })
            .collect();

        Arguments::new(self.sut, slots)
    }

    fn slot_mut(&mut self, dependency: DependencyType) -> Result<&mut Slot> {
        let sut = self.sut;
        self.slots
            .get_mut(&dependency)
            .ok_or(BuilderError::UnknownDependency {
                sut,
                dependency: dependency.name(),
            })
    }
}
