pub mod observation;
pub mod result_code;
pub mod template;

pub use observation::{Observation, ObservationSet};
pub use result_code::ResultCode;
pub use template::{
    template_identifier, FeatureOfInterest, ResultFieldSpec, TemplateDescriptor, TemplateMetadata,
};
