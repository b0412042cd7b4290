//! lndconnect CLI - show a QR code wallets scan to connect to LND.

mod commands;
mod config;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::commands::Output;
use crate::config::{LndPaths, UriOptions, DEFAULT_QR_FILE};

#[derive(Parser)]
#[command(name = "lndconnect")]
#[command(about = "Generate an lndconnect QR code or URI", long_about = None)]
struct Cli {
    #[command(flatten)]
    paths: LndPaths,

    #[command(flatten)]
    uri: UriOptions,

    /// Display the URI instead of a QR code
    #[arg(short = 'j', long, conflicts_with = "image")]
    url: bool,

    /// Write the QR code to an image file instead of the terminal
    #[arg(short, long)]
    image: bool,

    /// Where --image writes the QR code
    #[arg(long, value_name = "FILE", default_value = DEFAULT_QR_FILE)]
    image_path: PathBuf,
}

impl Cli {
    fn output(&self) -> Output {
        if self.url {
            Output::Url
        } else if self.image {
            Output::Image(self.image_path.clone())
        } else {
            Output::Terminal
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("lndconnect=info".parse()?)
                .add_directive("lndconnect_core=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    let cli = Cli::parse();

    commands::generate(&cli.paths, &cli.uri, cli.output()).await?;

    Ok(())
}
