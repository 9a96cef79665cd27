use tracing::{debug, error, info};

use crate::cli::args::Cli;
use crate::client::HttpTransport;
use crate::config::LoaderConfig;
use crate::error::Result;
use crate::loader::{LoadSummary, ObservationLoader};
use crate::models::ResultCode;

/// Run the loader for parsed arguments and report the terminal result code.
pub async fn run(cli: Cli) -> ResultCode {
    setup_logging(&cli);

    match execute(&cli).await {
        Ok(summary) => {
            info!("{}", summary.summary());
            info!("Finished with {}", ResultCode::ObservationsOk);
            ResultCode::ObservationsOk
        }
        Err(e) => {
            let code = e.result_code();
            error!("{}", e);
            error!("Finished with {}", code);
            code
        }
    }
}

pub async fn execute(cli: &Cli) -> Result<LoadSummary> {
    let config = LoaderConfig::load(cli.config.as_deref())?
        .with_overrides(cli.batch_size, cli.timeout_secs)?;
    debug!("Using {:?}", config);

    let request = cli.to_load_request();
    let transport = HttpTransport::from_config(&config)?;
    let loader = ObservationLoader::new(transport, config).with_progress(cli.show_progress());

    if cli.validate_only {
        let summary = loader.validate_only(&request)?;
        info!("Validation complete - nothing was uploaded");
        return Ok(summary);
    }

    info!("Loading observations into {}", request.endpoint);
    loader.load(&request).await
}

fn setup_logging(cli: &Cli) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let log_level = cli.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sos_loader={}", log_level)));

    let initialized = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .try_init();

    if initialized.is_ok() {
        debug!("Logging initialized at level: {}", log_level);
    }
}
