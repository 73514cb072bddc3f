//! Payment event handlers that run after a webhook is verified.

mod logging;

pub use logging::{
    logging_handlers, LogPaymentCanceled, LogPaymentCreated, LogPaymentFailed, LogPaymentSucceeded,
};
