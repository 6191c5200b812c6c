use super::Host;
use super::common::{Common, CommonArgs, init_logging};
use crate::Result;
use crate::nav::{NavigationNode, build_tree, transform};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ohno::{IntoAppError, bail};
use std::fs;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct NavArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Module whose navigation tree is printed
    #[arg(value_name = "SLUG", required_unless_present = "input")]
    pub slug: Option<String>,

    /// Transform a navigation tree read from a JSON file instead of building one from the docs
    #[arg(long, value_name = "PATH", conflicts_with = "slug")]
    pub input: Option<Utf8PathBuf>,

    /// Print the tree as built, without the menu transformation
    #[arg(long)]
    pub raw: bool,
}

/// Print a module's navigation tree as JSON
///
/// # Errors
///
/// Returns an error if the module is unknown, its docs cannot be indexed, or the input file is invalid
pub async fn print_navigation<H: Host>(host: &mut H, args: &NavArgs) -> Result<()> {
    let tree = if let Some(input) = &args.input {
        init_logging(args.common.log_level);
        read_tree(input)?
    } else {
        let common = Common::new(&args.common)?;
        let Some(slug) = args.slug.as_deref() else {
            bail!("a module slug or --input is required");
        };

        if common.state.registry.find(slug).is_none() {
            bail!("unknown module '{slug}'");
        }

        let index = common.state.docs.index(slug).await?;
        build_tree(slug, index.pages())
    };

    let tree = if args.raw { tree } else { transform(tree) };
    let json = serde_json::to_string_pretty(&tree).into_app_err("serializing navigation tree")?;

    let _ = writeln!(host.output(), "{json}");
    Ok(())
}

fn read_tree(path: &Utf8Path) -> Result<Vec<NavigationNode>> {
    let text = fs::read_to_string(path).into_app_err_with(|| format!("reading navigation file '{path}'"))?;
    serde_json::from_str(&text).into_app_err_with(|| format!("parsing navigation file '{path}'"))
}
