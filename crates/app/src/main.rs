//! `rhc-inspect [ROLE] [PATH...]`
//!
//! Prints, as JSON, the capabilities of `ROLE` and where each `PATH` lands for
//! a user holding it. `-` as the role inspects a logged-out session.

use anyhow::Context;

use rhc_client::ClientConfig;

fn main() -> anyhow::Result<()> {
    rhc_observability::init();

    let mut args = std::env::args().skip(1);
    let role = args.next();
    let paths: Vec<String> = args.collect();

    let config = ClientConfig::from_env();
    tracing::info!(role = role.as_deref(), paths = paths.len(), policy = ?config.policy, "inspecting");

    let report = rhc_app::inspect(config.policy, role.as_deref(), &paths)?;
    let json = serde_json::to_string_pretty(&report).context("failed to encode report")?;
    println!("{json}");
    Ok(())
}
