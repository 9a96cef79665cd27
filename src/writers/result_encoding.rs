use serde::Serialize;

use crate::models::Observation;
use crate::utils::constants::{BLOCK_SEPARATOR, TOKEN_SEPARATOR};

/// Separators registered with a result template and used to flatten rows
/// into a single `resultValues` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEncoding {
    pub token_separator: &'static str,
    pub block_separator: &'static str,
}

impl Default for ResultEncoding {
    fn default() -> Self {
        Self {
            token_separator: TOKEN_SEPARATOR,
            block_separator: BLOCK_SEPARATOR,
        }
    }
}

impl ResultEncoding {
    pub fn encode_row(&self, observation: &Observation) -> String {
        format!(
            "{}{}{}",
            observation.formatted_timestamp(),
            self.token_separator,
            observation.formatted_value()
        )
    }

    pub fn encode_block(&self, observations: &[Observation]) -> String {
        observations
            .iter()
            .map(|o| self.encode_row(o))
            .collect::<Vec<_>>()
            .join(self.block_separator)
    }
}
