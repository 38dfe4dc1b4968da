use std::sync::Arc;

/// An interface-shaped dependency that can be replaced by a strict substitute.
///
/// Implement it on the trait object type, so a builder can hand out
/// `Arc<dyn Trait>` values for parameters nobody supplied:
///
/// ```
/// use bloat_builder_mock::{Capability, StrictMock};
/// use std::sync::Arc;
///
/// pub trait Clock {
///     fn now(&self) -> u64;
/// }
///
/// struct StrictClock(StrictMock);
///
/// impl Clock for StrictClock {
///     fn now(&self) -> u64 {
///         self.0.call("now", ())
///     }
/// }
///
/// impl Capability for dyn Clock {
///     fn strict_substitute() -> Arc<Self> {
///         Arc::new(StrictClock(StrictMock::of::<dyn Clock>()))
///     }
/// }
///
/// let clock = <dyn Clock>::strict_substitute();
/// let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| clock.now()));
/// assert!(outcome.is_err());
/// ```
pub trait Capability: 'static {
    /// A fresh substitute with nothing configured
    fn strict_substitute() -> Arc<Self>;
}
