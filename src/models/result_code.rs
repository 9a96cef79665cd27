use serde::{Deserialize, Serialize};

/// Terminal outcome of a load run, doubling as the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultCode {
    ObservationsOk = 0,
    MissingParameters = 1,
    EndpointFailure = 2,
    TemplateFailure = 3,
    ParseFailure = 4,
}

impl ResultCode {
    pub fn as_exit_code(&self) -> u8 {
        *self as u8
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResultCode::ObservationsOk)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ResultCode::ObservationsOk => "OBSERVATIONS_OK",
            ResultCode::MissingParameters => "MISSING_PARAMETERS",
            ResultCode::EndpointFailure => "ENDPOINT_FAILURE",
            ResultCode::TemplateFailure => "TEMPLATE_FAILURE",
            ResultCode::ParseFailure => "PARSE_FAILURE",
        }
    }
}

impl std::fmt::Display for ResultCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<ResultCode> for std::process::ExitCode {
    fn from(code: ResultCode) -> Self {
        std::process::ExitCode::from(code.as_exit_code())
    }
}
