//! HTTP transport adapters.
//!
//! - `ReqwestTransport` - production client
//! - `MockTransport` - scripted responses and request capture for tests

mod mock_transport;
mod reqwest_transport;

pub use mock_transport::MockTransport;
pub use reqwest_transport::ReqwestTransport;
