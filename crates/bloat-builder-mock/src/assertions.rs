use crate::mock::StrictMock;

/// Assertions over the call log of a [`StrictMock`]
pub struct CallAssertions<'a> {
    mock: &'a StrictMock,
}

impl<'a> CallAssertions<'a> {
    pub fn new(mock: &'a StrictMock) -> Self {
        Self { mock }
    }

    #[track_caller]
    pub fn assert_called(&self, method: &str) {
        assert!(
            self.mock.call_count(method) > 0,
            "expected `{}::{}` to be called, calls were {:?}",
            self.mock.capability(),
            method,
            self.mock.calls()
        );
    }

    #[track_caller]
    pub fn assert_not_called(&self, method: &str) {
        assert_eq!(
            self.mock.call_count(method),
            0,
            "expected `{}::{}` not to be called",
            self.mock.capability(),
            method
        );
    }

    #[track_caller]
    pub fn assert_called_times(&self, method: &str, expected: usize) {
        assert_eq!(
            self.mock.call_count(method),
            expected,
            "unexpected call count for `{}::{}`",
            self.mock.capability(),
            method
        );
    }

    /// Fails if any call reached the substitute without a configured answer
    #[track_caller]
    pub fn assert_no_unconfigured_calls(&self) {
        let unconfigured: Vec<String> = self
            .mock
            .calls()
            .into_iter()
            .filter(|call| !call.configured)
            .map(|call| call.method)
            .collect();
        assert!(
            unconfigured.is_empty(),
            "`{}` received unconfigured calls: {:?}",
            self.mock.capability(),
            unconfigured
        );
    }
}
