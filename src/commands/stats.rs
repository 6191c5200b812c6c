use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use clap::Parser;
use ohno::IntoAppError;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Emit compact JSON instead of pretty-printed JSON
    #[arg(long)]
    pub compact: bool,
}

/// Compute the stats report and print it as JSON
///
/// # Errors
///
/// Returns an error if setup fails or any required source cannot be reached
pub async fn print_stats<H: Host>(host: &mut H, args: &StatsArgs) -> Result<()> {
    let common = Common::new(&args.common)?;
    let report = common.state.stats.report().await?;

    let json = if args.compact {
        serde_json::to_string(report.as_ref())
    } else {
        serde_json::to_string_pretty(report.as_ref())
    }
    .into_app_err("serializing stats report")?;

    let _ = writeln!(host.output(), "{json}");
    Ok(())
}
