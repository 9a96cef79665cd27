use tracing::{debug, info, warn};

use crate::client::protocol::{
    GetResultTemplateRequest, InsertResultTemplateRequest, TEMPLATE_ACCEPTED, TEMPLATE_FOUND,
};
use crate::client::request_client::RequestClient;
use crate::client::transport::Transport;
use crate::error::{LoaderError, Result};
use crate::models::{template_identifier, TemplateDescriptor};
use crate::writers::ResultEncoding;

/// Finds the result template for a property/offering pair, registering it
/// when the service does not know it yet.
pub struct TemplateResolver<'a, T: Transport> {
    client: &'a RequestClient<T>,
    encoding: ResultEncoding,
}

impl<'a, T: Transport> TemplateResolver<'a, T> {
    pub fn new(client: &'a RequestClient<T>) -> Self {
        Self {
            client,
            encoding: ResultEncoding::default(),
        }
    }

    /// Look up an existing template.
    ///
    /// Returns `Ok(None)` when the service answers with `exceptions`, and
    /// [`LoaderError::EndpointFailure`] only when the endpoint cannot be reached.
    pub async fn resolve(
        &self,
        observed_property: &str,
        offering: &str,
        endpoint: &str,
    ) -> Result<Option<String>> {
        let request = GetResultTemplateRequest::new(observed_property, offering);

        match self.client.exchange(&request, endpoint).await {
            Ok(response) if TEMPLATE_FOUND.is_met(&response) => {
                let identifier = template_identifier(observed_property, offering);
                debug!("Found existing template {}", identifier);
                Ok(Some(identifier))
            }
            Ok(_) => Ok(None),
            Err(e) if e.is_unreachable() => Err(LoaderError::EndpointFailure(format!(
                "{} while looking up result template: {}",
                endpoint, e
            ))),
            Err(e) => {
                warn!("Template lookup returned an unusable response: {}", e);
                Ok(None)
            }
        }
    }

    /// Register the template described by `descriptor` and return its identifier.
    pub async fn create(&self, descriptor: &TemplateDescriptor, endpoint: &str) -> Result<String> {
        let request = InsertResultTemplateRequest::new(descriptor, self.encoding);

        if self.client.send(&request, TEMPLATE_ACCEPTED, endpoint).await {
            Ok(descriptor.identifier.clone())
        } else {
            Err(LoaderError::TemplateFailure(format!(
                "the template {} could not be created",
                descriptor.identifier
            )))
        }
    }

    pub async fn resolve_or_create(
        &self,
        descriptor: &TemplateDescriptor,
        endpoint: &str,
    ) -> Result<String> {
        info!("Checking if template already exists");
        if let Some(identifier) = self
            .resolve(&descriptor.observed_property, &descriptor.offering, endpoint)
            .await?
        {
            return Ok(identifier);
        }

        info!("Creating template {}", descriptor.identifier);
        self.create(descriptor, endpoint).await
    }
}
