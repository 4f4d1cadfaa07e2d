pub mod analyzer;
pub mod controller;
pub mod error;
pub mod evaluator;
pub mod frame;
pub mod registry;
pub mod trajectory;

pub use controller::*;
pub use error::AimError;
pub use evaluator::*;
pub use frame::*;
pub use registry::*;
pub use trajectory::*;
