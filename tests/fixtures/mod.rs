//! Fixture types for builder tests
//!
//! Two systems under test with bloated constructors, the capabilities they
//! depend on, strict substitutes for those capabilities, and one concrete
//! value type that needs constructor arguments.

#![allow(dead_code)]

use bloat_builder::{ArgumentError, BoxError, Capability, Constructible, Constructor, StrictMock};
use std::sync::Arc;

pub trait DependencyA {
    fn parse(&self, input: &str) -> i32;
}

pub trait DependencyB {
    fn describe(&self, number: i32) -> String;
}

/// Real implementation of [`DependencyA`]: parses a decimal number
pub struct DecimalParser;

impl DependencyA for DecimalParser {
    fn parse(&self, input: &str) -> i32 {
        input.trim().parse().unwrap_or_default()
    }
}

#[derive(Debug)]
pub struct StrictDependencyA(StrictMock);

impl Default for StrictDependencyA {
    fn default() -> Self {
        Self::new()
    }
}

impl StrictDependencyA {
    pub fn new() -> Self {
        Self(StrictMock::of::<dyn DependencyA>())
    }

    pub fn mock(&self) -> &StrictMock {
        &self.0
    }
}

impl DependencyA for StrictDependencyA {
    fn parse(&self, input: &str) -> i32 {
        self.0.call("parse", input.to_string())
    }
}

impl Capability for dyn DependencyA {
    fn strict_substitute() -> Arc<Self> {
        Arc::new(StrictDependencyA::new())
    }
}

pub struct StrictDependencyB(StrictMock);

impl DependencyB for StrictDependencyB {
    fn describe(&self, number: i32) -> String {
        self.0.call("describe", number)
    }
}

impl Capability for dyn DependencyB {
    fn strict_substitute() -> Arc<Self> {
        Arc::new(StrictDependencyB(StrictMock::of::<dyn DependencyB>()))
    }
}

/// Value-like dependency; only constructible with arguments
#[derive(Clone, Debug, PartialEq)]
pub struct Coordinates {
    x: i32,
    y: i32,
}

impl Coordinates {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }
}

/// A SUT that only depends on capabilities
pub struct AbstractOnlyService {
    a: Arc<dyn DependencyA>,
    b: Arc<dyn DependencyB>,
}

impl AbstractOnlyService {
    pub fn new(a: Arc<dyn DependencyA>, b: Arc<dyn DependencyB>) -> Self {
        Self { a, b }
    }

    pub fn double_parsed(&self, input: &str) -> f64 {
        f64::from(self.a.parse(input)) * 2.0
    }

    pub fn describe(&self, number: i32) -> String {
        self.b.describe(number)
    }

    pub fn a(&self) -> &Arc<dyn DependencyA> {
        &self.a
    }
}

impl Constructible for AbstractOnlyService {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![Constructor::public("new", |args| {
            Ok(AbstractOnlyService::new(args.require(0)?, args.require(1)?))
        })
        .capability::<dyn DependencyA>()
        .capability::<dyn DependencyB>()]
    }
}

/// A SUT that also takes a concrete value type
pub struct MixedDependencyService {
    a: Arc<dyn DependencyA>,
    origin: Coordinates,
}

impl MixedDependencyService {
    pub fn origin(&self) -> &Coordinates {
        &self.origin
    }
}

impl Constructible for MixedDependencyService {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![
            Constructor::public("with_defaults", |_| {
                Ok(MixedDependencyService {
                    a: Arc::new(DecimalParser),
                    origin: Coordinates::new(0, 0),
                })
            }),
            Constructor::public("new", |args| {
                Ok(MixedDependencyService {
                    a: args.require(0)?,
                    origin: args.require(1)?,
                })
            })
            .capability::<dyn DependencyA>()
            .value::<Coordinates>(),
        ]
    }
}

/// Rejected by [`ValidatingService`] for coordinates outside the first quadrant
#[derive(Debug, thiserror::Error)]
#[error("coordinates ({x}, {y}) are outside the first quadrant")]
pub struct OutOfBounds {
    pub x: i32,
    pub y: i32,
}

/// A SUT whose own constructor validates its arguments
pub struct ValidatingService {
    origin: Coordinates,
}

impl ValidatingService {
    pub fn new(origin: Coordinates) -> Result<Self, OutOfBounds> {
        if origin.x < 0 || origin.y < 0 {
            return Err(OutOfBounds {
                x: origin.x,
                y: origin.y,
            });
        }
        Ok(Self { origin })
    }
}

impl Constructible for ValidatingService {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![Constructor::public("new", |args| {
            let origin: Coordinates = args.require(0)?;
            ValidatingService::new(origin).map_err(BoxError::from)
        })
        .value::<Coordinates>()]
    }
}

/// A SUT taking the same capability twice
pub struct TwinParserService {
    pub left: Arc<dyn DependencyA>,
    pub right: Arc<dyn DependencyA>,
}

impl Constructible for TwinParserService {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![Constructor::public("new", |args| {
            Ok(TwinParserService {
                left: args.require(0)?,
                right: args.require(1)?,
            })
        })
        .capability::<dyn DependencyA>()
        .capability::<dyn DependencyA>()]
    }
}

/// A SUT that can only be created through a non-public constructor
pub struct Singleton;

impl Constructible for Singleton {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![Constructor::non_public("instance", |_| Ok(Singleton))]
    }
}

/// Position of the missing argument, if that is why a constructor failed
pub fn missing_position(err: &BoxError) -> Option<usize> {
    match err.downcast_ref::<ArgumentError>() {
        Some(ArgumentError::Missing { position, .. }) => Some(*position),
        _ => None,
    }
}
