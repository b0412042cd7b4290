//! Generate command implementation.

use std::path::PathBuf;

use lndconnect_core::{AddressResolver, ConsensusLookup};

use crate::config::{connection_request, LndPaths, UriOptions};
use crate::ui::{print_hint, print_qr_code, write_qr_png, FILE_STYLE, TERMINAL_STYLE};

/// How the finished URI is shown
#[derive(Debug, Clone)]
pub enum Output {
    /// Plain URI text
    Url,
    /// PNG file at the given path
    Image(PathBuf),
    /// QR code in the terminal
    Terminal,
}

/// Build the lndconnect URI and present it.
pub async fn generate(paths: &LndPaths, opts: &UriOptions, output: Output) -> anyhow::Result<()> {
    let request = connection_request(paths, opts)?;

    let resolver = AddressResolver::new(ConsensusLookup::new()?);
    let uri = lndconnect_core::connection_uri(&request, &resolver).await?;

    match output {
        Output::Url => println!("{}", uri),
        Output::Image(path) => {
            write_qr_png(uri.as_str(), &FILE_STYLE, &path)?;
            tracing::info!("Wrote QR Code to file \"{}\"", path.display());
        }
        Output::Terminal => {
            print_qr_code(uri.as_str(), &TERMINAL_STYLE)?;
            print_hint();
        }
    }

    Ok(())
}
