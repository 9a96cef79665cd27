use clap::Parser;
use std::path::PathBuf;

use crate::loader::LoadRequest;
use crate::models::{FeatureOfInterest, ResultFieldSpec, TemplateMetadata};

#[derive(Parser, Debug)]
#[command(name = "sos-loader")]
#[command(about = "Load timestamped observations from CSV into a Sensor Observation Service")]
#[command(version)]
pub struct Cli {
    #[arg(help = "CSV file with 'datetime' and 'value' columns")]
    pub observations_file: PathBuf,

    #[arg(help = "Procedure URI")]
    pub procedure: String,

    #[arg(help = "Observed property URI")]
    pub observed_property: String,

    #[arg(help = "Offering URI")]
    pub offering: String,

    #[arg(help = "Feature of interest identifier")]
    pub feature_identifier: String,

    #[arg(help = "Feature of interest name")]
    pub feature_name: String,

    #[arg(allow_negative_numbers = true, help = "Feature latitude (WGS84)")]
    pub feature_latitude: f64,

    #[arg(allow_negative_numbers = true, help = "Feature longitude (WGS84)")]
    pub feature_longitude: f64,

    #[arg(help = "Result field name")]
    pub result_name: String,

    #[arg(help = "Result field definition URI")]
    pub result_definition: String,

    #[arg(help = "Result unit of measure")]
    pub result_unit: String,

    #[arg(help = "SOS JSON binding endpoint URL")]
    pub endpoint: String,

    #[arg(long, help = "Rows per InsertResult request [default: 200]")]
    pub batch_size: Option<usize>,

    #[arg(long, help = "Request timeout in seconds [default: 30]")]
    pub timeout_secs: Option<u64>,

    #[arg(long, help = "Settings file (TOML, YAML or JSON)")]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        help = "Read, validate and deduplicate the file without contacting the service"
    )]
    pub validate_only: bool,

    #[arg(short, long, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short,
        long,
        conflicts_with = "verbose",
        help = "Only log warnings and errors, hide progress"
    )]
    pub quiet: bool,
}

impl Cli {
    pub fn metadata(&self) -> TemplateMetadata {
        TemplateMetadata {
            feature: FeatureOfInterest {
                identifier: self.feature_identifier.clone(),
                name: self.feature_name.clone(),
                latitude: self.feature_latitude,
                longitude: self.feature_longitude,
            },
            result_field: ResultFieldSpec {
                name: self.result_name.clone(),
                definition: self.result_definition.clone(),
                unit: self.result_unit.clone(),
            },
        }
    }

    pub fn to_load_request(&self) -> LoadRequest {
        LoadRequest {
            observations_path: self.observations_file.clone(),
            procedure: self.procedure.clone(),
            observed_property: self.observed_property.clone(),
            offering: self.offering.clone(),
            metadata: self.metadata(),
            endpoint: self.endpoint.clone(),
        }
    }

    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    const POSITIONALS: [&str; 12] = [
        "observations.csv",
        "http://www.52north.org/test/procedure/9",
        "http://www.52north.org/test/observableProperty/9_3",
        "http://www.52north.org/test/offering/9",
        "http://www.52north.org/test/featureOfInterest/9",
        "52°North",
        "51.883906",
        "7.727958",
        "test_observable_property_9_3",
        "http://www.52north.org/test/observableProperty/9_3",
        "test_unit_9_3",
        "http://localhost:8080/52n-sos-webapp/service",
    ];

    fn argv(extra: &[&str]) -> Vec<String> {
        let mut args = vec!["sos-loader".to_string()];
        args.extend(POSITIONALS.iter().map(|arg| arg.to_string()));
        args.extend(extra.iter().map(|arg| arg.to_string()));
        args
    }

    #[test]
    fn test_twelve_positionals() {
        let cli = Cli::try_parse_from(argv(&[])).unwrap();

        assert_eq!(cli.observations_file, PathBuf::from("observations.csv"));
        assert_eq!(cli.feature_latitude, 51.883906);
        assert_eq!(cli.feature_longitude, 7.727958);
        assert_eq!(cli.endpoint, "http://localhost:8080/52n-sos-webapp/service");
        assert!(cli.batch_size.is_none());
        assert!(!cli.validate_only);
        assert_eq!(cli.get_log_level(), "info");

        let request = cli.to_load_request();
        assert_eq!(request.metadata.feature.name, "52°North");
        assert_eq!(request.metadata.result_field.unit, "test_unit_9_3");
        assert_eq!(
            request.descriptor().identifier,
            "http://www.52north.org/test/observableProperty/9_3-http://www.52north.org/test/offering/9"
        );
    }

    #[test]
    fn test_wrong_arity_is_rejected() {
        let mut short = argv(&[]);
        short.pop();
        assert!(Cli::try_parse_from(short).is_err());

        assert!(Cli::try_parse_from(argv(&["unexpected"])).is_err());
    }

    #[test]
    fn test_unparsable_coordinate_is_rejected() {
        let mut args = argv(&[]);
        args[7] = "north".to_string();

        let err = Cli::try_parse_from(args).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_negative_coordinates() {
        let mut args = argv(&[]);
        args[7] = "-33.86".to_string();
        args[8] = "-151.2".to_string();

        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.feature_latitude, -33.86);
        assert_eq!(cli.feature_longitude, -151.2);
    }

    #[test]
    fn test_optional_flags() {
        let cli = Cli::try_parse_from(argv(&[
            "--batch-size",
            "50",
            "--timeout-secs",
            "5",
            "--validate-only",
            "-q",
        ]))
        .unwrap();

        assert_eq!(cli.batch_size, Some(50));
        assert_eq!(cli.timeout_secs, Some(5));
        assert!(cli.validate_only);
        assert!(!cli.show_progress());
        assert_eq!(cli.get_log_level(), "warn");

        assert!(Cli::try_parse_from(argv(&["-q", "-v"])).is_err());
    }

    #[test]
    fn test_help_and_version() {
        let help = Cli::try_parse_from(["sos-loader", "--help"]).unwrap_err();
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);

        let version = Cli::try_parse_from(["sos-loader", "--version"]).unwrap_err();
        assert_eq!(version.kind(), ErrorKind::DisplayVersion);
    }
}
