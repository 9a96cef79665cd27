/// SOS service identification
pub const SOS_SERVICE: &str = "SOS";
pub const SOS_VERSION: &str = "2.0.0";

/// Request names
pub const REQUEST_GET_RESULT_TEMPLATE: &str = "GetResultTemplate";
pub const REQUEST_INSERT_RESULT_TEMPLATE: &str = "InsertResultTemplate";
pub const REQUEST_INSERT_RESULT: &str = "InsertResult";

/// Top-level response keys
pub const KEY_EXCEPTIONS: &str = "exceptions";
pub const KEY_ACCEPTED_TEMPLATE: &str = "acceptedTemplate";

/// Result encoding separators
pub const TOKEN_SEPARATOR: &str = ",";
pub const BLOCK_SEPARATOR: &str = "#";

/// Token written for an observation without a value
pub const MISSING_VALUE_TOKEN: &str = "nan";

/// Observation file layout
pub const COLUMN_DATETIME: &str = "datetime";
pub const COLUMN_VALUE: &str = "value";
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
pub const DATETIME_LENGTH: usize = 19;

/// Observation model URIs
pub const OBSERVATION_TYPE_MEASUREMENT: &str =
    "http://www.opengis.net/def/observationType/OGC-OM/2.0/OM_Measurement";
pub const UNKNOWN_CODESPACE: &str = "http://www.opengis.net/def/nil/OGC/0/unknown";
pub const SAMPLED_FEATURE_WORLD: &str = "http://www.52north.org/test/featureOfInterest/world";
pub const PHENOMENON_TIME_FIELD: &str = "phenomenonTime";
pub const PHENOMENON_TIME_DEFINITION: &str =
    "http://www.opengis.net/def/property/OGC/0/PhenomenonTime";
pub const GREGORIAN_UOM: &str = "http://www.opengis.net/def/uom/ISO-8601/0/Gregorian";
pub const CRS_EPSG_4326: &str = "EPSG:4326";
pub const TEMPLATE_PLACEHOLDER: &str = "template";

/// Result structure field types
pub const FIELD_TYPE_TIME: &str = "time";
pub const FIELD_TYPE_QUANTITY: &str = "quantity";

/// Processing defaults
pub const DEFAULT_BATCH_SIZE: usize = 200;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "SOS_LOADER";
