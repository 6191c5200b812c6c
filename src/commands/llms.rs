use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use crate::llms::generate;
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct LlmsArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Write the document to a file instead of to the terminal
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,
}

/// Generate `llms.txt`
///
/// # Errors
///
/// Returns an error if setup fails or the output file cannot be written
pub async fn print_llms<H: Host>(host: &mut H, args: &LlmsArgs) -> Result<()> {
    let common = Common::new(&args.common)?;
    let state = &common.state;
    let text = generate(&state.llms, &state.registry, &state.stats, &state.docs).await;

    if let Some(path) = &args.output {
        fs::write(path, &text).into_app_err_with(|| format!("writing '{path}'"))?;
        let _ = writeln!(host.output(), "Generated {path}");
    } else {
        let _ = write!(host.output(), "{text}");
    }

    Ok(())
}
