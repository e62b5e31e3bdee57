use std::io::{self, Write};
use std::sync::Arc;

use p4access::advisor::{Advice, Advisor};
use p4access::broker::{self, TriggerArgs};
use p4access::config::Config;
use p4access::core::AccessResult;
use p4access::logging;
use p4access::p4::P4Command;

async fn advise(config: &Config) -> AccessResult<Advice> {
    let args = TriggerArgs::read(io::stdin().lock())?;
    tracing::info!(
        "Request from {}: {} access to {}",
        args.user,
        args.req_access,
        args.path
    );

    let advisor = Advisor::new(Arc::new(P4Command::from_config(config)));
    advisor
        .advise_path(&args.user, &args.path, &args.req_access)
        .await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Without config we don't know where to log, so fall back to defaults
    let (config, config_err) = match Config::from_env() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    let _guard = logging::init_logging_or_stderr(&config);

    tracing::info!("=== p4access starting ===");

    let result = match config_err {
        Some(e) => Err(e),
        None => advise(&config).await,
    };

    // The broker treats a non-zero exit as its own failure, so always exit 0
    let reply = match result {
        Ok(advice) => {
            match serde_json::to_string(&advice) {
                Ok(json) => tracing::info!("Advice: {}", json),
                Err(e) => tracing::warn!("Failed to serialize advice: {}", e),
            }
            broker::respond(&advice)
        }
        Err(e) => {
            tracing::error!("Failing, err recvd: {}", e);
            broker::reject(&e, config.leak)
        }
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(reply.as_bytes())?;
    stdout.flush()?;

    tracing::info!("=== p4access done ===");

    Ok(())
}
