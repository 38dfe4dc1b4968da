//! Constructor tables for types built by [`crate::Builder`].
//!
//! Rust has no runtime reflection over constructors, so a system under test
//! describes its own: every [`Constructor`] carries a visibility, the ordered
//! list of parameter types and a function that receives the resolved
//! [`Arguments`] and produces the instance.

use bloat_builder_mock::Capability;
use miette::Diagnostic;
use serde::Serialize;
use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use thiserror::Error;

/// Error type returned by constructor functions
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

type Invoke<S> = Box<dyn Fn(&Arguments<'_>) -> Result<S, BoxError>>;
type Synthesize = fn() -> Box<dyn Any>;

/// Types that expose a constructor table
pub trait Constructible: Sized + 'static {
    /// All constructors, in declaration order
    fn constructors() -> Vec<Constructor<Self>>;
}

/// Identity of a dependency: the exact Rust type a parameter receives
#[derive(Clone, Copy, Debug)]
pub struct DependencyType {
    id: TypeId,
    name: &'static str,
}

impl DependencyType {
    pub fn of<D: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<D>(),
            name: type_name::<D>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for DependencyType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for DependencyType {}

impl Hash for DependencyType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// How a dependency may be synthesized when nobody supplies it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyShape {
    /// Interface-shaped, passed as `Arc<dyn Trait>`; always has a strict substitute
    Capability,
    /// Concrete with a parameterless path (`Default`)
    DefaultConstructible,
    /// Concrete and needs arguments; must be supplied explicitly
    Concrete,
}

/// One constructor parameter
#[derive(Clone, Copy)]
pub struct Parameter {
    dependency: DependencyType,
    shape: DependencyShape,
    synthesize: Option<Synthesize>,
}

impl Parameter {
    /// A capability parameter of type `Arc<C>`
    pub fn capability<C: ?Sized + Capability>() -> Self {
        Self {
            dependency: DependencyType::of::<Arc<C>>(),
            shape: DependencyShape::Capability,
            synthesize: Some(strict_capability::<C>),
        }
    }

    pub fn defaultable<T: Default + Clone + 'static>() -> Self {
        Self {
            dependency: DependencyType::of::<T>(),
            shape: DependencyShape::DefaultConstructible,
            synthesize: Some(default_value::<T>),
        }
    }

    pub fn value<T: Clone + 'static>() -> Self {
        Self {
            dependency: DependencyType::of::<T>(),
            shape: DependencyShape::Concrete,
            synthesize: None,
        }
    }

    pub fn dependency(&self) -> DependencyType {
        self.dependency
    }

    pub fn shape(&self) -> DependencyShape {
        self.shape
    }

    /// Produce a fresh substitute, if this parameter has a parameterless path
    pub fn substitute(&self) -> Option<Box<dyn Any>> {
        self.synthesize.map(|synthesize| synthesize())
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("dependency", &self.dependency.name)
            .field("shape", &self.shape)
            .finish()
    }
}

fn strict_capability<C: ?Sized + Capability>() -> Box<dyn Any> {
    Box::new(C::strict_substitute())
}

fn default_value<T: Default + 'static>() -> Box<dyn Any> {
    Box::new(T::default())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Visibility {
    Public,
    NonPublic,
}

/// A constructor of `S`: visibility, parameter list and the function that runs it.
///
/// ```
/// use bloat_builder::{Constructible, Constructor};
///
/// #[derive(Clone)]
/// struct Port(u16);
///
/// struct Listener {
///     port: Port,
/// }
///
/// impl Constructible for Listener {
///     fn constructors() -> Vec<Constructor<Self>> {
///         vec![Constructor::public("new", |args| {
///             Ok(Listener { port: args.require(0)? })
///         })
///         .value::<Port>()]
///     }
/// }
///
/// let listener = bloat_builder::make::<Listener>()
///     .and_then(|builder| builder.with(Port(8080)))
///     .and_then(|builder| builder.build())
///     .unwrap();
/// assert_eq!(listener.port.0, 8080);
/// ```
pub struct Constructor<S> {
    name: &'static str,
    visibility: Visibility,
    parameters: Vec<Parameter>,
    invoke: Invoke<S>,
}

impl<S> Constructor<S> {
    pub fn public<F>(name: &'static str, invoke: F) -> Self
    where
        F: Fn(&Arguments<'_>) -> Result<S, BoxError> + 'static,
    {
        Self::declare(name, Visibility::Public, invoke)
    }

    /// A constructor that exists but is never selected
    pub fn non_public<F>(name: &'static str, invoke: F) -> Self
    where
        F: Fn(&Arguments<'_>) -> Result<S, BoxError> + 'static,
    {
        Self::declare(name, Visibility::NonPublic, invoke)
    }

    fn declare<F>(name: &'static str, visibility: Visibility, invoke: F) -> Self
    where
        F: Fn(&Arguments<'_>) -> Result<S, BoxError> + 'static,
    {
        Self {
            name,
            visibility,
            parameters: Vec::new(),
            invoke: Box::new(invoke),
        }
    }

    /// Append an `Arc<C>` parameter
    pub fn capability<C: ?Sized + Capability>(self) -> Self {
        self.param(Parameter::capability::<C>())
    }

    /// Append a concrete parameter that falls back to `T::default()`
    pub fn defaultable<T: Default + Clone + 'static>(self) -> Self {
        self.param(Parameter::defaultable::<T>())
    }

    /// Append a concrete parameter that must be supplied explicitly
    pub fn value<T: Clone + 'static>(self) -> Self {
        self.param(Parameter::value::<T>())
    }

    pub fn param(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    pub fn invoke(&self, arguments: &Arguments<'_>) -> Result<S, BoxError> {
        (self.invoke)(arguments)
    }
}

impl<S> fmt::Debug for Constructor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("name", &self.name)
            .field("visibility", &self.visibility)
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// Failures reading [`Arguments`] inside a constructor function
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ArgumentError {
    #[error("Value cannot be none: parameter {position} ({dependency}) of {sut}")]
    #[diagnostic(
        code(arguments::missing),
        help("The dependency was explicitly set to none with `Builder::with_none`.")
    )]
    Missing {
        sut: &'static str,
        position: usize,
        dependency: &'static str,
    },

    #[error("Parameter {position} of {sut} is declared as {declared}, not {requested}")]
    #[diagnostic(code(arguments::type_mismatch))]
    TypeMismatch {
        sut: &'static str,
        position: usize,
        declared: &'static str,
        requested: &'static str,
    },

    #[error("Constructor of {sut} takes {len} parameters, there is no parameter {position}")]
    #[diagnostic(code(arguments::out_of_range))]
    OutOfRange {
        sut: &'static str,
        position: usize,
        len: usize,
    },
}

/// Resolved constructor arguments, in parameter order
pub struct Arguments<'a> {
    sut: &'static str,
    slots: Vec<(DependencyType, Option<&'a dyn Any>)>,
}

impl<'a> Arguments<'a> {
    pub(crate) fn new(sut: &'static str, slots: Vec<(DependencyType, Option<&'a dyn Any>)>) -> Self {
        Self { sut, slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The value at `position`, or `None` when it was explicitly set to none
    pub fn optional<D: Clone + 'static>(&self, position: usize) -> Result<Option<D>, ArgumentError> {
        let (dependency, value) = self.slots.get(position).ok_or(ArgumentError::OutOfRange {
            sut: self.sut,
            position,
            len: self.slots.len(),
        })?;

        let Some(value) = value else {
            return Ok(None);
        };

        value
            .downcast_ref::<D>()
            .cloned()
            .map(Some)
            .ok_or(ArgumentError::TypeMismatch {
                sut: self.sut,
                position,
                declared: dependency.name(),
                requested: type_name::<D>(),
            })
    }

    /// The value at `position`; an explicit none is an error
    pub fn require<D: Clone + 'static>(&self, position: usize) -> Result<D, ArgumentError> {
        self.optional(position)?.ok_or_else(|| ArgumentError::Missing {
            sut: self.sut,
            position,
            dependency: self.slots[position].0.name(),
        })
    }
}
