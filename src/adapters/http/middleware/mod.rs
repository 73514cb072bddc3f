//! HTTP middleware for axum.
//!
//! - `panic` - Panic-to-500 conversion for `CatchPanicLayer`
//! - `request_id` - UUID request ids for `SetRequestIdLayer`

pub mod panic;
pub mod request_id;

pub use panic::handle_panic;
pub use request_id::MakeRequestUuid;
