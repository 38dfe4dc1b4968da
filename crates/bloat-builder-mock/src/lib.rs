pub mod assertions;
pub mod capability;
pub mod mock;

pub use assertions::CallAssertions;
pub use capability::Capability;
pub use mock::{CallRecord, MockError, MockResult, StrictMock};
