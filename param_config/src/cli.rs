//! Command-line surface for build options.
//!
//! [`BuildArgs`] derives [`clap::Args`] so host binaries can flatten it into
//! their own parser and hand the result to the builder.

use clap::Args;

use crate::options::BuildOptions;

/// Flags selecting what to build.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use param_config::{BuildArgs, BuildOptions};
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(flatten)]
///     build: BuildArgs,
/// }
///
/// let cli = Cli::parse_from(["render", "--prefix", "/app/schema", "--pretty", "--sort-by-dependencies"]);
/// let options = BuildOptions::from(cli.build);
/// assert_eq!(options, BuildOptions::json("/app/schema", true));
/// ```
#[derive(Args, Clone, Debug, PartialEq, Eq)]
pub struct BuildArgs {
    /// Parameter path to read; repeat to merge several prefixes in order.
    #[arg(long = "prefix", value_name = "PATH", required = true)]
    pub prefixes: Vec<String>,

    /// Keep full parameter keys instead of paths relative to each prefix.
    #[arg(long)]
    pub keep_prefix: bool,

    /// Indent JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Build a YAML rules document instead of a JSON tree.
    #[arg(long)]
    pub yaml_rules: bool,

    /// Reorder the `types` sequence so referenced types come first.
    #[arg(long)]
    pub sort_by_dependencies: bool,
}

impl From<BuildArgs> for BuildOptions {
    fn from(args: BuildArgs) -> Self {
        Self {
            prefixes: args.prefixes,
            strip_prefix: !args.keep_prefix,
            json_output: args.pretty,
            yaml_rules: args.yaml_rules,
            sort_by_dependencies: args.sort_by_dependencies,
        }
    }
}
