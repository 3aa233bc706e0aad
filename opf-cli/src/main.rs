//! opf-cli: run the production dashboard without a browser.
//!
//! `upload` sends a well's production CSV to the `/procesar` backend and
//! keeps the response; `chart` loads a response (live or saved) into the
//! same controllers the web page uses and prints what the Oil, Water, BSW,
//! accumulated-oil and decline charts would draw. Set `RUST_LOG=info` to
//! see row counts, MSE values and forecast trimming.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "opf-cli",
    version,
    about = "Upload well production CSVs and inspect fit/forecast chart output",
    long_about = "Upload well production CSVs to the forecasting backend, then replay \
                  the response through the dashboard to inspect observed vs simulated \
                  series, MSE, the decline curve and the P10/P50/P90 forecast overlay."
)]
struct Cli {
    #[command(subcommand)]
    command: opf_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    opf_cmd::run(Cli::parse().command).await
}
