//! Command-line configuration and default LND paths.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use lndconnect_core::constants::DEFAULT_PORT;
use lndconnect_core::credentials::read_credential;
use lndconnect_core::{ConnectionRequest, TokenPaths, TokenScope};

/// Default QR image written by `--image`
pub const DEFAULT_QR_FILE: &str = "lndconnect-qr.png";

/// Where LND keeps its certificate and macaroons
#[derive(Args, Debug, Clone)]
pub struct LndPaths {
    /// LND base directory
    #[arg(long, value_name = "DIR")]
    pub lnddir: Option<PathBuf>,

    /// TLS certificate [default: <lnddir>/tls.cert]
    #[arg(long, value_name = "FILE")]
    pub tlscertpath: Option<PathBuf>,

    /// LND data directory [default: <lnddir>/data]
    #[arg(long, value_name = "DIR")]
    pub datadir: Option<PathBuf>,

    /// Chain the node runs on
    #[arg(long, default_value = "bitcoin")]
    pub chain: String,

    /// Network the node runs on
    #[arg(long, default_value = "mainnet")]
    pub network: String,

    /// Admin macaroon [default: <datadir>/chain/<chain>/<network>/admin.macaroon]
    #[arg(long, value_name = "FILE")]
    pub adminmacaroonpath: Option<PathBuf>,

    /// Read-only macaroon
    #[arg(long, value_name = "FILE")]
    pub readonlymacaroonpath: Option<PathBuf>,

    /// Invoice macaroon
    #[arg(long, value_name = "FILE")]
    pub invoicemacaroonpath: Option<PathBuf>,
}

impl LndPaths {
    fn lnd_dir(&self) -> PathBuf {
        self.lnddir.clone().unwrap_or_else(default_lnd_dir)
    }

    /// Resolved certificate path
    pub fn tls_cert(&self) -> PathBuf {
        self.tlscertpath
            .clone()
            .unwrap_or_else(|| self.lnd_dir().join("tls.cert"))
    }

    /// Resolved macaroon paths
    pub fn macaroons(&self) -> TokenPaths {
        let data_dir = self
            .datadir
            .clone()
            .unwrap_or_else(|| self.lnd_dir().join("data"));
        let network_dir = data_dir.join("chain").join(&self.chain).join(&self.network);

        let pick = |explicit: &Option<PathBuf>, name: &str| {
            explicit.clone().unwrap_or_else(|| network_dir.join(name))
        };

        TokenPaths {
            admin: pick(&self.adminmacaroonpath, "admin.macaroon"),
            readonly: pick(&self.readonlymacaroonpath, "readonly.macaroon"),
            invoice: pick(&self.invoicemacaroonpath, "invoice.macaroon"),
        }
    }
}

/// What goes into the URI
#[derive(Args, Debug, Clone)]
pub struct UriOptions {
    /// Host to advertise instead of the discovered one
    #[arg(long)]
    pub host: Option<String>,

    /// Advertise the local network IP
    #[arg(short = 'l', long)]
    pub localip: bool,

    /// Advertise 127.0.0.1
    #[arg(long)]
    pub localhost: bool,

    /// gRPC port to advertise
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Leave the TLS certificate out of the URI
    #[arg(long)]
    pub nocert: bool,

    /// Use the read-only macaroon
    #[arg(long, conflicts_with = "invoice")]
    pub readonly: bool,

    /// Use the invoice macaroon
    #[arg(long)]
    pub invoice: bool,

    /// Extra query parameter as key=value (repeatable)
    #[arg(short, long, value_name = "KEY=VALUE")]
    pub query: Vec<String>,
}

impl UriOptions {
    /// Macaroon scope selected by the flags
    pub fn token_scope(&self) -> TokenScope {
        match (self.readonly, self.invoice) {
            (_, true) => TokenScope::Invoice,
            (true, false) => TokenScope::ReadOnly,
            (false, false) => TokenScope::Admin,
        }
    }
}

/// Read credentials from disk and assemble a request.
pub fn connection_request(
    paths: &LndPaths,
    opts: &UriOptions,
) -> anyhow::Result<ConnectionRequest> {
    let certificate = if opts.nocert {
        None
    } else {
        Some(read_credential(&paths.tls_cert()).context("could not load TLS certificate")?)
    };

    let scope = opts.token_scope();
    let macaroons = paths.macaroons();
    let token = read_credential(macaroons.select(scope))
        .with_context(|| format!("could not load {:?} macaroon", scope))?;

    Ok(ConnectionRequest {
        host: opts.host.clone(),
        use_local_ip: opts.localip,
        use_loopback: opts.localhost,
        port: opts.port,
        certificate,
        token_scope: scope,
        token,
        extra_params: opts.query.clone(),
    })
}

/// Platform application directory LND uses by default
pub fn default_lnd_dir() -> PathBuf {
    if cfg!(target_os = "macos") {
        app_dir(dirs::data_dir(), "Lnd")
    } else if cfg!(windows) {
        app_dir(dirs::data_local_dir(), "Lnd")
    } else {
        app_dir(dirs::home_dir(), ".lnd")
    }
}

fn app_dir(base: Option<PathBuf>, name: &str) -> PathBuf {
    base.unwrap_or_else(|| PathBuf::from(".")).join(name)
}
