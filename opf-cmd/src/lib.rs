//! Command implementations for the OPF CLI.
//!
//! `upload` posts a CSV to the processing backend and saves the response;
//! `chart` drives the same dashboard controllers the web page uses and
//! prints every panel's chart state as JSON.

use clap::Subcommand;

pub mod chart;
pub mod upload;

#[derive(Subcommand)]
pub enum Command {
    /// Post a production CSV to the backend and save the JSON response
    Upload {
        /// Backend origin, e.g. http://localhost:5000
        #[arg(short = 'e', long)]
        endpoint: String,

        /// Production CSV to upload
        #[arg(short = 'f', long)]
        file: String,

        /// Where to write the response body (defaults to stdout)
        #[arg(short = 'o', long)]
        out: Option<String>,

        /// Client timeout in seconds
        #[arg(long, default_value_t = 60)]
        timeout_secs: u64,
    },

    /// Load a response, optionally run fit and forecast, and print chart states
    Chart {
        /// Saved response JSON to replay instead of contacting a backend
        #[arg(short = 'r', long, conflicts_with_all = ["endpoint", "file"])]
        response: Option<String>,

        /// Backend origin to upload to
        #[arg(short = 'e', long, requires = "file")]
        endpoint: Option<String>,

        /// Production CSV to upload
        #[arg(short = 'f', long, requires = "endpoint")]
        file: Option<String>,

        /// Run the fit comparison after loading
        #[arg(long)]
        fit: bool,

        /// Overlay the percentile forecast after loading
        #[arg(long)]
        forecast: bool,

        /// Seed for the fit's placeholder noise (random when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Number of ensemble members to draw with the forecast
        #[arg(long, default_value_t = 0)]
        ensemble: usize,

        /// Where to write the chart report (defaults to stdout)
        #[arg(short = 'o', long)]
        out: Option<String>,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Upload {
            endpoint,
            file,
            out,
            timeout_secs,
        } => upload::run_upload(&endpoint, &file, out.as_deref(), timeout_secs).await,
        Command::Chart {
            response,
            endpoint,
            file,
            fit,
            forecast,
            seed,
            ensemble,
            out,
        } => {
            let source = match (response, endpoint, file) {
                (Some(path), _, _) => chart::Source::Replay(path),
                (None, Some(endpoint), Some(file)) => chart::Source::Upload { endpoint, file },
                _ => anyhow::bail!("pass either --response or both --endpoint and --file"),
            };
            let options = chart::ChartOptions {
                fit,
                forecast,
                seed,
                ensemble,
            };
            chart::run_chart(source, options, out.as_deref()).await
        }
    }
}

/// Write `contents` to `out`, or to stdout when no path is given.
pub(crate) fn write_output(out: Option<&str>, contents: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, contents)?;
            log::info!("Wrote {}", path);
        }
        None => println!("{}", contents),
    }
    Ok(())
}
