use crate::constructor::{DependencyShape, Parameter};
use crate::{BuilderError, Result};
use std::any::Any;

/// Produces a stand-in for a dependency nobody supplied
pub trait MockSynthesizer {
    fn synthesize(&self, parameter: &Parameter) -> Result<Box<dyn Any>>;
}

/// Default synthesizer.
///
/// Capabilities become fresh strict substitutes, default-constructible types
/// become `T::default()`, and anything else is refused with
/// [`BuilderError::CannotSynthesize`].
#[derive(Clone, Copy, Debug, Default)]
pub struct StrictSynthesizer;

impl MockSynthesizer for StrictSynthesizer {
    fn synthesize(&self, parameter: &Parameter) -> Result<Box<dyn Any>> {
        let cannot = || BuilderError::CannotSynthesize {
            dependency: parameter.dependency().name(),
        };

        match parameter.shape() {
            DependencyShape::Concrete => Err(cannot()),
            DependencyShape::Capability | DependencyShape::DefaultConstructible => {
                parameter.substitute().ok_or_else(cannot)
            }
        }
    }
}
