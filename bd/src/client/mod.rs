//! EventClient module for BurstDispatch
//!
//! The dispatcher only sees the [`EventClient`] trait; [`HttpEventClient`]
//! is the REST implementation talking to the ingestion API.

mod error;
mod http;
mod traits;

pub use error::TransportError;
pub use http::HttpEventClient;
pub use traits::EventClient;
