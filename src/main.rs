//! # Colectivos Map
//!
//! Fetches live colectivo positions once, then prints the filtered map view.

mod provider;
mod render;
mod repl;

use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colectivos::view::{DEFAULT_ICON_URL, Icon};
use colectivos::{FilterInput, Session, Source, fetch_vehicles};
use realtime::{Clock, Config};
use tracing_subscriber::EnvFilter;

use crate::provider::Provider;
use crate::render::Format;

#[derive(Parser, Debug)]
#[command(author, version, about = "Live colectivo positions for Buenos Aires")]
struct Args {
    /// Route prefix, e.g. `152` (case-sensitive)
    #[arg(long, default_value = "")]
    route: String,

    /// Target latitude for the 1 km proximity filter
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    lat: String,

    /// Target longitude for the 1 km proximity filter
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    lon: String,

    /// API base URL (overrides `TRANSPORT_API_URL`)
    #[arg(long)]
    base_url: Option<String>,

    /// Fetch deadline in milliseconds (overrides `FETCH_TIMEOUT_MS`)
    #[arg(long)]
    timeout_ms: Option<u64>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Read filter commands from stdin after the first view
    #[arg(long)]
    interactive: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let provider = Provider::new()?;

    let mut source = Source::from_config(&provider).await;
    if let Some(base_url) = args.base_url {
        source.base_url = base_url;
    }
    if let Some(millis) = args.timeout_ms {
        source.timeout = Duration::from_millis(millis);
    }

    let icon_url = Config::get(&provider, "MARKER_ICON_URL")
        .await
        .unwrap_or_else(|_| DEFAULT_ICON_URL.to_string());
    let icon = Icon::new(icon_url);

    let snapshot = fetch_vehicles(&source, &provider).await;
    let mut session = Session::new(snapshot);
    session.apply(&FilterInput { route: args.route, latitude: args.lat, longitude: args.lon });

    let mut out = io::stdout().lock();
    if args.interactive {
        repl::run(&mut session, &provider, &icon, args.format, io::stdin().lock(), &mut out)
    } else {
        let view = session.view(provider.now(), icon);
        render::write(&mut out, session.snapshot(), &view, args.format)
    }
}
