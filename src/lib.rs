//! Build a system under test whose constructor takes more dependencies than a
//! test cares about.
//!
//! ```
//! use bloat_builder::{make, Capability, Constructible, Constructor, StrictMock};
//! use std::sync::Arc;
//!
//! pub trait Clock {
//!     fn now(&self) -> u64;
//! }
//!
//! struct StrictClock(StrictMock);
//!
//! impl Clock for StrictClock {
//!     fn now(&self) -> u64 {
//!         self.0.call("now", ())
//!     }
//! }
//!
//! impl Capability for dyn Clock {
//!     fn strict_substitute() -> Arc<Self> {
//!         Arc::new(StrictClock(StrictMock::of::<dyn Clock>()))
//!     }
//! }
//!
//! struct FixedClock;
//!
//! impl Clock for FixedClock {
//!     fn now(&self) -> u64 {
//!         42
//!     }
//! }
//!
//! struct Scheduler {
//!     clock: Arc<dyn Clock>,
//! }
//!
//! impl Constructible for Scheduler {
//!     fn constructors() -> Vec<Constructor<Self>> {
//!         vec![Constructor::public("new", |args| {
//!             Ok(Scheduler { clock: args.require(0)? })
//!         })
//!         .capability::<dyn Clock>()]
//!     }
//! }
//!
//! # fn main() -> bloat_builder::Result<()> {
//! let scheduler = make::<Scheduler>()?
//!     .with::<Arc<dyn Clock>>(Arc::new(FixedClock))?
//!     .build()?;
//! assert_eq!(scheduler.clock.now(), 42);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod constructor;
pub mod logging;
pub mod registry;
pub mod selector;
pub mod synthesizer;

use miette::Diagnostic;

pub use bloat_builder_mock::{CallAssertions, Capability, MockError, MockResult, StrictMock};
pub use builder::{make, Builder, PlannedParameter, ResolutionPlan};
pub use constructor::{
    ArgumentError, Arguments, BoxError, Constructible, Constructor, DependencyShape,
    DependencyType, Parameter,
};
pub use registry::{DependencyRegistry, EntryState};
pub use selector::{ConstructorSelector, SelectedConstructor};
pub use synthesizer::{MockSynthesizer, StrictSynthesizer};

/// Result type alias for the builder
pub type Result<T> = std::result::Result<T, BuilderError>;

/// Error types for the builder
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum BuilderError {
    #[error("bloat-builder only works for types that have at least one public constructor. {sut} has no public constructors")]
    #[diagnostic(
        code(builder::no_public_constructor),
        help("Return at least one `Constructor::public` from `Constructible::constructors`.")
    )]
    NoPublicConstructor { sut: &'static str },

    #[error("The (longest) constructor of '{sut}' does not take a {dependency}")]
    #[diagnostic(
        code(builder::unknown_dependency),
        help("Pass the exact parameter type. Capability parameters are `Arc<dyn Trait>`, e.g. `with::<Arc<dyn Trait>>(..)`.")
    )]
    UnknownDependency {
        sut: &'static str,
        dependency: &'static str,
    },

    #[error("Cannot synthesize a substitute for {dependency}")]
    #[diagnostic(
        code(builder::cannot_synthesize),
        help("Concrete dependencies that need constructor arguments are never filled in automatically. Supply one with `Builder::with`.")
    )]
    CannotSynthesize { dependency: &'static str },

    /// The constructor of the system under test rejected its arguments
    #[error(transparent)]
    #[diagnostic(code(builder::constructor_failed))]
    Constructor(BoxError),
}
