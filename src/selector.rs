use crate::constructor::{Arguments, BoxError, Constructible, Constructor, Parameter};
use crate::logging;
use crate::{BuilderError, Result};
use std::any::type_name;
use std::fmt;

/// The constructor a builder will invoke, fixed for the builder's lifetime
pub struct SelectedConstructor<S> {
    sut: &'static str,
    constructor: Constructor<S>,
}

impl<S> fmt::Debug for SelectedConstructor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedConstructor")
            .field("sut", &self.sut)
            .field("constructor", &self.constructor)
            .finish()
    }
}

impl<S> SelectedConstructor<S> {
    pub fn sut(&self) -> &'static str {
        self.sut
    }

    pub fn name(&self) -> &'static str {
        self.constructor.name()
    }

    pub fn parameters(&self) -> &[Parameter] {
        self.constructor.parameters()
    }

    pub fn invoke(&self, arguments: &Arguments<'_>) -> std::result::Result<S, BoxError> {
        self.constructor.invoke(arguments)
    }
}

/// Picks the constructor to build a system under test with
pub struct ConstructorSelector;

impl ConstructorSelector {
    pub fn select<S: Constructible>() -> Result<SelectedConstructor<S>> {
        Self::select_from(type_name::<S>(), S::constructors())
    }

    /// Select among `constructors` for the type named `sut`.
    ///
    /// Only public constructors are candidates. With several, the one taking
    /// the most parameters wins and ties go to the first declared.
    pub fn select_from<S>(
        sut: &'static str,
        constructors: Vec<Constructor<S>>,
    ) -> Result<SelectedConstructor<S>> {
        let mut selected: Option<Constructor<S>> = None;

        for constructor in constructors.into_iter().filter(Constructor::is_public) {
            let longer = selected
                .as_ref()
                .map_or(true, |current| constructor.arity() > current.arity());
            if longer {
                selected = Some(constructor);
            }
        }

        let constructor = selected.ok_or(BuilderError::NoPublicConstructor { sut })?;
        logging::log_constructor_selected(sut, constructor.name(), constructor.arity());

        Ok(SelectedConstructor { sut, constructor })
    }
}
