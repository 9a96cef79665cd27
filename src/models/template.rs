use serde::{Deserialize, Serialize};
use validator::Validate;

/// Derive the result template identifier for an observed property and offering.
///
/// Resolution and creation both go through this function so that re-running a
/// load against an already provisioned endpoint finds the same template.
pub fn template_identifier(observed_property: &str, offering: &str) -> String {
    format!("{}-{}", observed_property, offering)
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FeatureOfInterest {
    #[validate(length(min = 1))]
    pub identifier: String,

    pub name: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResultFieldSpec {
    #[validate(length(min = 1))]
    pub name: String,

    pub definition: String,

    pub unit: String,
}

/// Metadata needed only when a template has to be registered.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TemplateMetadata {
    #[validate(nested)]
    pub feature: FeatureOfInterest,

    #[validate(nested)]
    pub result_field: ResultFieldSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateDescriptor {
    pub identifier: String,
    pub procedure: String,
    pub observed_property: String,
    pub offering: String,
    pub feature: FeatureOfInterest,
    pub result_field: ResultFieldSpec,
}

impl TemplateDescriptor {
    pub fn new(
        procedure: impl Into<String>,
        observed_property: impl Into<String>,
        offering: impl Into<String>,
        metadata: TemplateMetadata,
    ) -> Self {
        let observed_property = observed_property.into();
        let offering = offering.into();

        Self {
            identifier: template_identifier(&observed_property, &offering),
            procedure: procedure.into(),
            observed_property,
            offering,
            feature: metadata.feature,
            result_field: metadata.result_field,
        }
    }
}
