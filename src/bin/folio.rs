use clap::Parser;
use folio::admin::AdminError;
use folio::cli::utils::output_error;
use folio::cli::{Cli, OutputFormat};
use folio::error::ClientError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    // Quiet by default so command output stays clean; RUST_LOG opts in
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let output_format = OutputFormat::from_cli(&cli);

    if let Err(e) = folio::cli::run(cli).await {
        let error_code = e
            .chain()
            .find_map(|cause| match cause.downcast_ref::<AdminError>() {
                Some(AdminError::Client(client_error)) => Some(client_error),
                Some(AdminError::Form(_)) => None,
                None => cause.downcast_ref::<ClientError>(),
            })
            .map(|client_error| client_error.kind().as_str());

        match (&output_format, std::env::var("CLI_VERBOSE").as_deref()) {
            (OutputFormat::Json, _) => output_error(&output_format, &e.to_string(), error_code)?,
            (_, Ok("true")) | (_, Ok("1")) => eprintln!("Error: {e:?}"),
            _ => eprintln!("Error: {e}"),
        }
        std::process::exit(1);
    }

    Ok(())
}
