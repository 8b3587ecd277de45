//! Testing utilities
pub mod fakes;
pub mod fixtures;
pub mod test_context;

pub use test_context::TestContext;
