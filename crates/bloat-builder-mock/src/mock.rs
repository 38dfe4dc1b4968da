use miette::Diagnostic;
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{debug, warn};

/// Result type for calls routed through a strict substitute
pub type MockResult<T> = Result<T, MockError>;

/// Failures raised by a strict substitute at call time
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum MockError {
    #[error("Strict substitute for `{capability}` received an unconfigured call to `{method}`")]
    #[diagnostic(
        code(mock::unconfigured_invocation),
        help("Supply a real implementation with `Builder::with`, or configure the call with `StrictMock::on` before exercising the SUT.")
    )]
    UnconfiguredInvocation {
        capability: &'static str,
        method: String,
    },

    #[error("Call to `{capability}::{method}` does not match the configured argument or return types")]
    #[diagnostic(
        code(mock::signature_mismatch),
        help("The closure given to `StrictMock::on` must accept the argument type passed to `call` and return the type the caller expects.")
    )]
    SignatureMismatch {
        capability: &'static str,
        method: String,
    },
}

type Responder = Arc<dyn Fn(&dyn Any) -> Option<Box<dyn Any>> + Send + Sync>;

/// One invocation seen by a strict substitute
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallRecord {
    pub method: String,
    pub configured: bool,
}

/// Call table behind a hand-written strict substitute.
///
/// A substitute forwards every trait method to [`StrictMock::call`] (or
/// [`StrictMock::try_call`] for fallible methods) with the method name and its
/// arguments packed into one value. Methods that were never configured with
/// [`StrictMock::on`] or [`StrictMock::returning`] fail instead of producing a
/// default value.
pub struct StrictMock {
    capability: &'static str,
    responders: Mutex<HashMap<String, Responder>>,
    calls: Mutex<Vec<CallRecord>>,
}

impl StrictMock {
    pub fn new(capability: &'static str) -> Self {
        Self {
            capability,
            responders: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a substitute table named after the capability type `C`
    pub fn of<C: ?Sized>() -> Self {
        Self::new(type_name::<C>())
    }

    pub fn capability(&self) -> &'static str {
        self.capability
    }

    /// Configure `method` to answer with `responder(args)`
    pub fn on<A, R, F>(&self, method: &str, responder: F) -> &Self
    where
        A: 'static,
        R: 'static,
        F: Fn(&A) -> R + Send + Sync + 'static,
    {
        let responder: Responder = Arc::new(move |args: &dyn Any| {
            args.downcast_ref::<A>()
                .map(|args| Box::new(responder(args)) as Box<dyn Any>)
        });
        lock(&self.responders).insert(method.to_string(), responder);
        debug!(capability = self.capability, method, "Configured strict substitute call");
        self
    }

    /// Configure `method` to return a clone of `value` whatever its arguments
    pub fn returning<R>(&self, method: &str, value: R) -> &Self
    where
        R: Clone + Send + Sync + 'static,
    {
        let responder: Responder =
            Arc::new(move |_: &dyn Any| Some(Box::new(value.clone()) as Box<dyn Any>));
        lock(&self.responders).insert(method.to_string(), responder);
        debug!(capability = self.capability, method, "Configured strict substitute call");
        self
    }

    pub fn is_configured(&self, method: &str) -> bool {
        lock(&self.responders).contains_key(method)
    }

    /// Route one call through the table
    pub fn try_call<A, R>(&self, method: &str, args: A) -> MockResult<R>
    where
        A: 'static,
        R: 'static,
    {
        // Released before the responder runs so it may call back into this mock
        let responder = lock(&self.responders).get(method).cloned();
        lock(&self.calls).push(CallRecord {
            method: method.to_string(),
            configured: responder.is_some(),
        });

        let Some(responder) = responder else {
            warn!(
                capability = self.capability,
                method, "Unconfigured call on strict substitute"
            );
            return Err(MockError::UnconfiguredInvocation {
                capability: self.capability,
                method: method.to_string(),
            });
        };

        responder(&args as &dyn Any)
            .and_then(|value| value.downcast::<R>().ok())
            .map(|value| *value)
            .ok_or_else(|| MockError::SignatureMismatch {
                capability: self.capability,
                method: method.to_string(),
            })
    }

    /// Like [`StrictMock::try_call`], but fails loudly by panicking with the
    /// [`MockError`] message. Use from infallible trait methods.
    #[track_caller]
    pub fn call<A, R>(&self, method: &str, args: A) -> R
    where
        A: 'static,
        R: 'static,
    {
        match self.try_call(method, args) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn calls(&self) -> Vec<CallRecord> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self, method: &str) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|call| call.method == method)
            .count()
    }
}

impl fmt::Debug for StrictMock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut configured: Vec<String> = lock(&self.responders).keys().cloned().collect();
        configured.sort();
        f.debug_struct("StrictMock")
            .field("capability", &self.capability)
            .field("configured", &configured)
            .field("calls", &lock(&self.calls).len())
            .finish()
    }
}

// A responder that panicked must not turn every later call into a poison error.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
