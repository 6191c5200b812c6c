//! Command dispatch logic for seo-docs

use super::{
    InitArgs, LlmsArgs, NavArgs, ServeArgs, StatsArgs, ValidateArgs, init_config, print_llms, print_navigation, print_stats, serve_docs,
    validate_config,
};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "seo-docs", author, version, long_about = None)]
#[command(about = "Documentation backend for the SEO module family")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve stats, markdown, navigation and llms.txt over HTTP
    Serve(Box<ServeArgs>),
    /// Compute the module stats report and print it as JSON
    Stats(Box<StatsArgs>),
    /// Generate llms.txt
    Llms(Box<LlmsArgs>),
    /// Print the navigation tree of a module
    Nav(Box<NavArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        Command::Serve(serve_args) => serve_docs(serve_args).await,
        Command::Stats(stats_args) => print_stats(host, stats_args).await,
        Command::Llms(llms_args) => print_llms(host, llms_args).await,
        Command::Nav(nav_args) => print_navigation(host, nav_args).await,
        Command::Init(init_args) => init_config(host, init_args),
        Command::Validate(validate_args) => validate_config(host, validate_args),
    }
}
