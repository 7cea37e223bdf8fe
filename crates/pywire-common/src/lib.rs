//! Shared types for the PyWire shell runtime: the error taxonomy and the
//! integer status codes exposed at the C ABI.

pub mod errors;
pub mod status;

pub use errors::RuntimeError;
pub use status::status_code;

pub type Result<T> = std::result::Result<T, RuntimeError>;
