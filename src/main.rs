use clap::error::ErrorKind;
use clap::Parser;
use sos_loader::cli::{run, Cli};
use sos_loader::ResultCode;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if let Err(print_err) = e.print() {
                eprintln!("{}\n{}", e, print_err);
            }
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ResultCode::MissingParameters.into(),
            };
        }
    };

    run(cli).await.into()
}
