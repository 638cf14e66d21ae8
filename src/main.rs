// Entrypoint: parse three positionals, upload the image, print the answer.
// File and transport errors propagate out of `main` and end the process
// with a non-zero status.

use image_upload::{api::ApiClient, cli::Args, ui};
use std::io;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = match Args::from_raw(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => {
            debug!(error = %e, "rejected arguments");
            ui::print_usage(&mut io::stdout())?;
            std::process::exit(1);
        }
    };

    let api = ApiClient::default_endpoint()?;
    let outcome = api.upload_image(&args.image_path, &args.token, &args.parent_id)?;

    ui::print_outcome(&mut io::stdout().lock(), &outcome)?;

    let json = outcome.json();
    if outcome.is_success() {
        if let Some(id) = json.file_id() {
            info!(%id, "image stored");
        }
    } else if let Some(msg) = json.error_message() {
        warn!(status = outcome.status, error = msg, "upload rejected");
    }
    Ok(())
}
