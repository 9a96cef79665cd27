pub mod protocol;
pub mod request_client;
pub mod template_resolver;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_support;

pub use protocol::{KeyExpectation, KeyPresence, RESULT_ACCEPTED, TEMPLATE_ACCEPTED, TEMPLATE_FOUND};
pub use request_client::RequestClient;
pub use template_resolver::TemplateResolver;
pub use transport::{HttpTransport, Transport, TransportError, TransportResult};
