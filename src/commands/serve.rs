use super::common::{Common, CommonArgs};
use crate::Result;
use crate::server;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Address to listen on, overriding the configured `bind`
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,
}

/// Run the documentation backend until interrupted
///
/// # Errors
///
/// Returns an error if setup fails or the server cannot be started
pub async fn serve_docs(args: &ServeArgs) -> Result<()> {
    let common = Common::new(&args.common)?;
    let bind = args.bind.as_deref().unwrap_or(&common.config.bind).to_string();

    server::serve(common.state, &bind).await
}
