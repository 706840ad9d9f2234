//! Walks one account through create, fetch and delete against a running
//! accounts API, printing each response.

use std::path::PathBuf;

use account_client::{decode_account, extract_identity, pretty_print, Client, Envelope, Parameters};
use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about = "Create, fetch and delete an account")]
struct Args {
    /// Host name or IP of the accounts API.
    #[arg(long, env = "ACCOUNT_API_HOST", default_value = "localhost")]
    host: String,

    /// Empty means 8080.
    #[arg(long, env = "ACCOUNT_API_PORT", default_value = "")]
    port: String,

    /// `http` or `https`; empty means http.
    #[arg(long, env = "ACCOUNT_API_PROTOCOL", default_value = "")]
    protocol: String,

    #[arg(long, default_value = "/v1/organisation/")]
    base_path: String,

    #[arg(long, default_value = "accounts")]
    resource: String,

    /// JSON:API document to create.
    #[arg(long, default_value = "demo/data/account_create.json")]
    payload: PathBuf,
}

fn show(label: &str, envelope: &Envelope) {
    println!("{label}: status {}", envelope.status_code);
    if envelope.body().is_empty() {
        return;
    }
    match pretty_print(envelope.body()) {
        Ok(text) => println!("{text}"),
        Err(err) => println!("(unprintable body: {err})"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let params = Parameters::new(args.base_path.as_str(), args.resource.as_str());
    let client = Client::new(&args.host, &args.port, &args.protocol, params)?;
    tracing::info!(target_uri = client.target_uri(), "client ready");

    let payload = std::fs::read(&args.payload)
        .with_context(|| format!("reading payload {}", args.payload.display()))?;

    let created = client.create(&payload, None)?;
    show("create", &created);
    if !created.is_success() {
        bail!("create returned status {}", created.status_code);
    }
    let identity = extract_identity(created.body())?;

    let fetched = client.fetch(&identity.id, None)?;
    show("fetch", &fetched);
    let account = decode_account(fetched.body())?;
    println!("id: {}", account.data.id);
    println!("type: {}", account.data.kind.as_deref().unwrap_or("-"));

    let deleted = client.delete(&identity.id, identity.version, None)?;
    show("delete", &deleted);

    let v2 = client.reconfigure(Parameters::new("/v2/organisation/", args.resource.as_str()))?;
    tracing::info!(target_uri = v2.target_uri(), "reconfigured client");

    Ok(())
}
