//! Observability module - request correlation.

mod request_id;

pub use request_id::{REQUEST_ID_HEADER, echo_request_id};
