//! HTTP integrations: install script download and deployment notifications

pub mod newrelic;
pub mod transport;

pub use newrelic::NewRelicNotification;
pub use transport::{HttpTransport, ReqwestTransport};
