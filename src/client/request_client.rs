use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::client::protocol::KeyExpectation;
use crate::client::transport::{Transport, TransportError, TransportResult};

/// Sends SOS requests and reduces each response to success or failure.
///
/// No retries happen here; the batch uploader owns the retry policy.
pub struct RequestClient<T: Transport> {
    transport: T,
}

impl<T: Transport> RequestClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `payload` and return the parsed response, or the transport failure.
    pub async fn exchange<P: Serialize + ?Sized>(
        &self,
        payload: &P,
        endpoint: &str,
    ) -> TransportResult<Value> {
        let body =
            serde_json::to_value(payload).map_err(|e| TransportError::Decode(e.to_string()))?;
        self.transport.post_json(endpoint, &body).await
    }

    /// Returns `true` iff the request was answered and the answer meets `expectation`.
    pub async fn send<P: Serialize + ?Sized>(
        &self,
        payload: &P,
        expectation: KeyExpectation,
        endpoint: &str,
    ) -> bool {
        match self.exchange(payload, endpoint).await {
            Ok(response) => {
                let met = expectation.is_met(&response);
                if !met {
                    debug!(
                        "Response did not meet expectation {:?} on '{}'",
                        expectation.presence, expectation.key
                    );
                }
                met
            }
            Err(e) => {
                warn!("Request to {} failed: {}", endpoint, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::protocol::{RESULT_ACCEPTED, TEMPLATE_ACCEPTED};
    use crate::client::test_support::ScriptedTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_send_checks_key_absence() {
        let transport = ScriptedTransport::new(|_| Ok(json!({"exceptions": [{"code": "x"}]})));
        let client = RequestClient::new(transport);

        assert!(!client.send(&json!({"a": 1}), RESULT_ACCEPTED, "test-endpoint").await);
        assert_eq!(client.transport().request_count(), 1);
        assert_eq!(client.transport().endpoints(), vec!["test-endpoint"]);
    }

    #[tokio::test]
    async fn test_send_checks_key_presence() {
        let transport = ScriptedTransport::new(|_| Ok(json!({"acceptedTemplate": "O-F"})));
        let client = RequestClient::new(transport);

        assert!(client.send(&json!({}), TEMPLATE_ACCEPTED, "test-endpoint").await);
        assert!(client.send(&json!({}), RESULT_ACCEPTED, "test-endpoint").await);
    }

    #[tokio::test]
    async fn test_transport_failure_is_false() {
        let transport =
            ScriptedTransport::new(|_| Err(TransportError::Unreachable("refused".into())));
        let client = RequestClient::new(transport);

        assert!(!client.send(&json!({}), RESULT_ACCEPTED, "test-endpoint").await);
        assert!(client
            .exchange(&json!({}), "test-endpoint")
            .await
            .unwrap_err()
            .is_unreachable());
    }

    #[tokio::test]
    async fn test_payload_is_sent_as_json() {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Probe {
            observed_property: &'static str,
        }

        let transport = ScriptedTransport::new(|_| Ok(json!({})));
        let client = RequestClient::new(transport);
        client
            .send(&Probe { observed_property: "O" }, RESULT_ACCEPTED, "e")
            .await;

        assert_eq!(
            client.transport().requests(),
            vec![json!({"observedProperty": "O"})]
        );
    }
}
