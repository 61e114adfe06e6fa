//! `userdatactl fetch` - Fetch userdata, validate it, and optionally save it.

use anyhow::{Context as _, Result};
use tracing::{info, warn};
use userdata::{decode, CancellationToken, Fetcher};

use super::Context;
use crate::cli::args::FetchArgs;
use crate::cmdline;
use crate::output;

pub async fn execute(ctx: Context, args: FetchArgs) -> Result<()> {
    let endpoint = resolve_endpoint(&ctx, &args)?;

    let retry = ctx.config.retry_config(&args.retry);
    info!(endpoint = %endpoint, budget = ?retry.budget, "fetching userdata");

    let fetcher = Fetcher::builder(retry)
        .timeout(ctx.config.timeout(&args.retry))
        .build()?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling fetch");
            on_interrupt.cancel();
        }
    });

    let bytes = fetcher.fetch_with_cancel(&endpoint, &cancel).await?;
    let config = decode(&bytes).context("provisioning endpoint served invalid userdata")?;

    // Only a document that decoded is written out.
    if let Some(path) = &args.save {
        std::fs::write(path, &bytes)
            .with_context(|| format!("writing userdata to {}", path.display()))?;
        info!(path = %path.display(), bytes = bytes.len(), "saved userdata");
    }

    println!("{}", output::render(&config, ctx.output_format, ctx.color())?);

    Ok(())
}

/// Endpoint from the argument or env var, then the config file, then the
/// kernel command line.
fn resolve_endpoint(ctx: &Context, args: &FetchArgs) -> Result<String> {
    args.endpoint
        .clone()
        .or_else(|| ctx.config.endpoint.clone())
        .or_else(|| cmdline::endpoint_from(cmdline::PROC_CMDLINE))
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Provisioning endpoint required.\n\n\
                 Set it with one of:\n  \
                 1. userdatactl fetch <URL>\n  \
                 2. USERDATA_ENDPOINT environment variable\n  \
                 3. endpoint = \"<URL>\" in the config file\n  \
                 4. {}=<URL> on the kernel command line",
                cmdline::ENDPOINT_PARAM
            )
        })
}
