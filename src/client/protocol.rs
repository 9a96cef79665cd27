//! Request bodies for the SOS 2.0 JSON binding and the response checks that
//! decide whether each request succeeded.

use serde::Serialize;
use serde_json::Value;

use crate::models::TemplateDescriptor;
use crate::utils::constants::{
    CRS_EPSG_4326, FIELD_TYPE_QUANTITY, FIELD_TYPE_TIME, GREGORIAN_UOM, KEY_ACCEPTED_TEMPLATE,
    KEY_EXCEPTIONS, OBSERVATION_TYPE_MEASUREMENT, PHENOMENON_TIME_DEFINITION,
    PHENOMENON_TIME_FIELD, REQUEST_GET_RESULT_TEMPLATE, REQUEST_INSERT_RESULT,
    REQUEST_INSERT_RESULT_TEMPLATE, SAMPLED_FEATURE_WORLD, SOS_SERVICE, SOS_VERSION,
    TEMPLATE_PLACEHOLDER, UNKNOWN_CODESPACE,
};
use crate::writers::ResultEncoding;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPresence {
    Present,
    Absent,
}

/// Success test on a parsed response: a top-level key must be present or absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyExpectation {
    pub key: &'static str,
    pub presence: KeyPresence,
}

impl KeyExpectation {
    pub const fn present(key: &'static str) -> Self {
        Self {
            key,
            presence: KeyPresence::Present,
        }
    }

    pub const fn absent(key: &'static str) -> Self {
        Self {
            key,
            presence: KeyPresence::Absent,
        }
    }

    /// Non-object responses never meet an expectation.
    pub fn is_met(&self, response: &Value) -> bool {
        match response.as_object() {
            Some(object) => match self.presence {
                KeyPresence::Present => object.contains_key(self.key),
                KeyPresence::Absent => !object.contains_key(self.key),
            },
            None => false,
        }
    }
}

/// `GetResultTemplate` found a template.
pub const TEMPLATE_FOUND: KeyExpectation = KeyExpectation::absent(KEY_EXCEPTIONS);
/// `InsertResultTemplate` registered the template.
pub const TEMPLATE_ACCEPTED: KeyExpectation = KeyExpectation::present(KEY_ACCEPTED_TEMPLATE);
/// `InsertResult` stored the rows.
pub const RESULT_ACCEPTED: KeyExpectation = KeyExpectation::absent(KEY_EXCEPTIONS);

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetResultTemplateRequest {
    pub request: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub offering: String,
    pub observed_property: String,
}

impl GetResultTemplateRequest {
    pub fn new(observed_property: &str, offering: &str) -> Self {
        Self {
            request: REQUEST_GET_RESULT_TEMPLATE,
            service: SOS_SERVICE,
            version: SOS_VERSION,
            offering: offering.to_string(),
            observed_property: observed_property.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CodedValue {
    pub value: String,
    pub codespace: &'static str,
}

impl CodedValue {
    fn unknown(value: &str) -> Self {
        Self {
            value: value.to_string(),
            codespace: UNKNOWN_CODESPACE,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CrsProperties {
    pub name: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Crs {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub properties: CrsProperties,
}

#[derive(Debug, Clone, Serialize)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub coordinates: [f64; 2],
    pub crs: Crs,
}

impl PointGeometry {
    pub fn wgs84(latitude: f64, longitude: f64) -> Self {
        Self {
            kind: "Point",
            coordinates: [latitude, longitude],
            crs: Crs {
                kind: "name",
                properties: CrsProperties {
                    name: CRS_EPSG_4326,
                },
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureOfInterestBody {
    pub identifier: CodedValue,
    pub name: Vec<CodedValue>,
    pub sampled_feature: Vec<&'static str>,
    pub geometry: PointGeometry,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationTemplate {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub procedure: String,
    pub observed_property: String,
    pub feature_of_interest: FeatureOfInterestBody,
    pub phenomenon_time: &'static str,
    pub result_time: &'static str,
    pub result: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultStructureField {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: String,
    pub definition: String,
    pub uom: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultStructure {
    pub fields: Vec<ResultStructureField>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResultTemplateRequest {
    pub request: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub identifier: String,
    pub offering: String,
    pub observation_template: ObservationTemplate,
    pub result_structure: ResultStructure,
    pub result_encoding: ResultEncoding,
}

impl InsertResultTemplateRequest {
    pub fn new(descriptor: &TemplateDescriptor, encoding: ResultEncoding) -> Self {
        let feature = &descriptor.feature;
        let result_field = &descriptor.result_field;

        Self {
            request: REQUEST_INSERT_RESULT_TEMPLATE,
            service: SOS_SERVICE,
            version: SOS_VERSION,
            identifier: descriptor.identifier.clone(),
            offering: descriptor.offering.clone(),
            observation_template: ObservationTemplate {
                kind: OBSERVATION_TYPE_MEASUREMENT,
                procedure: descriptor.procedure.clone(),
                observed_property: descriptor.observed_property.clone(),
                feature_of_interest: FeatureOfInterestBody {
                    identifier: CodedValue::unknown(&feature.identifier),
                    name: vec![CodedValue::unknown(&feature.name)],
                    sampled_feature: vec![SAMPLED_FEATURE_WORLD],
                    geometry: PointGeometry::wgs84(feature.latitude, feature.longitude),
                },
                phenomenon_time: TEMPLATE_PLACEHOLDER,
                result_time: TEMPLATE_PLACEHOLDER,
                result: "",
            },
            result_structure: ResultStructure {
                fields: vec![
                    ResultStructureField {
                        kind: FIELD_TYPE_TIME,
                        name: PHENOMENON_TIME_FIELD.to_string(),
                        definition: PHENOMENON_TIME_DEFINITION.to_string(),
                        uom: GREGORIAN_UOM.to_string(),
                    },
                    ResultStructureField {
                        kind: FIELD_TYPE_QUANTITY,
                        name: result_field.name.clone(),
                        definition: result_field.definition.clone(),
                        uom: result_field.unit.clone(),
                    },
                ],
            },
            result_encoding: encoding,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResultRequest {
    pub request: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub template_identifier: String,
    pub result_values: String,
}

impl InsertResultRequest {
    pub fn new(template_identifier: &str, result_values: String) -> Self {
        Self {
            request: REQUEST_INSERT_RESULT,
            service: SOS_SERVICE,
            version: SOS_VERSION,
            template_identifier: template_identifier.to_string(),
            result_values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeatureOfInterest, ResultFieldSpec, TemplateMetadata};
    use serde_json::json;

    fn descriptor() -> TemplateDescriptor {
        TemplateDescriptor::new(
            "test-procedure",
            "test-property",
            "test-offering",
            TemplateMetadata {
                feature: FeatureOfInterest {
                    identifier: "test-feature".to_string(),
                    name: "test-feature-name".to_string(),
                    latitude: 22.0,
                    longitude: 22.0,
                },
                result_field: ResultFieldSpec {
                    name: "test-result-name".to_string(),
                    definition: "test-result-definition".to_string(),
                    unit: "m".to_string(),
                },
            },
        )
    }

    #[test]
    fn test_key_expectations() {
        let exceptions = json!({"version": "2.0.0", "exceptions": []});
        let accepted = json!({"acceptedTemplate": "test-property-test-offering"});

        assert!(!TEMPLATE_FOUND.is_met(&exceptions));
        assert!(TEMPLATE_FOUND.is_met(&accepted));
        assert!(TEMPLATE_ACCEPTED.is_met(&accepted));
        assert!(!TEMPLATE_ACCEPTED.is_met(&exceptions));
        assert!(!RESULT_ACCEPTED.is_met(&json!(["exceptions"])));
        assert!(!TEMPLATE_ACCEPTED.is_met(&json!("acceptedTemplate")));
    }

    #[test]
    fn test_get_result_template_body() {
        let body = serde_json::to_value(GetResultTemplateRequest::new(
            "test-property",
            "test-offering",
        ))
        .unwrap();

        assert_eq!(
            body,
            json!({
                "request": "GetResultTemplate",
                "service": "SOS",
                "version": "2.0.0",
                "offering": "test-offering",
                "observedProperty": "test-property"
            })
        );
    }

    #[test]
    fn test_insert_result_template_body() {
        let request = InsertResultTemplateRequest::new(&descriptor(), ResultEncoding::default());
        let body = serde_json::to_value(request).unwrap();

        assert_eq!(
            body,
            json!({
                "request": "InsertResultTemplate",
                "service": "SOS",
                "version": "2.0.0",
                "identifier": "test-property-test-offering",
                "offering": "test-offering",
                "observationTemplate": {
                    "type": "http://www.opengis.net/def/observationType/OGC-OM/2.0/OM_Measurement",
                    "procedure": "test-procedure",
                    "observedProperty": "test-property",
                    "featureOfInterest": {
                        "identifier": {
                            "value": "test-feature",
                            "codespace": "http://www.opengis.net/def/nil/OGC/0/unknown"
                        },
                        "name": [{
                            "value": "test-feature-name",
                            "codespace": "http://www.opengis.net/def/nil/OGC/0/unknown"
                        }],
                        "sampledFeature": ["http://www.52north.org/test/featureOfInterest/world"],
                        "geometry": {
                            "type": "Point",
                            "coordinates": [22.0, 22.0],
                            "crs": {"type": "name", "properties": {"name": "EPSG:4326"}}
                        }
                    },
                    "phenomenonTime": "template",
                    "resultTime": "template",
                    "result": ""
                },
                "resultStructure": {
                    "fields": [
                        {
                            "type": "time",
                            "name": "phenomenonTime",
                            "definition": "http://www.opengis.net/def/property/OGC/0/PhenomenonTime",
                            "uom": "http://www.opengis.net/def/uom/ISO-8601/0/Gregorian"
                        },
                        {
                            "type": "quantity",
                            "name": "test-result-name",
                            "definition": "test-result-definition",
                            "uom": "m"
                        }
                    ]
                },
                "resultEncoding": {"tokenSeparator": ",", "blockSeparator": "#"}
            })
        );
    }

    #[test]
    fn test_insert_result_body() {
        let body = serde_json::to_value(InsertResultRequest::new(
            "O-F",
            "2015-01-01T00:00:00,23".to_string(),
        ))
        .unwrap();

        assert_eq!(body["request"], "InsertResult");
        assert_eq!(body["templateIdentifier"], "O-F");
        assert_eq!(body["resultValues"], "2015-01-01T00:00:00,23");
    }
}
