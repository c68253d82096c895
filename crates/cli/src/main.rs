use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use jarviz::commands::{couplings_command, list_classes_command, ClassSource, ListClassesArgs};
use jarviz::init_logging;

/// Class enumeration and method coupling graphs for Java archives.
///
/// This CLI is a thin wrapper around `jarviz-core` (exposed in code as `jarviz_core`).
#[derive(Parser, Debug)]
#[command(
    name = "jarviz",
    version,
    about = "Class enumeration and method coupling graphs for Java archives",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct SourceArgs {
    /// Path to a jar file.
    #[arg(long)]
    jar: Option<String>,

    /// Artifact coordinates (`group:artifact:version[:packaging[:classifier]]`).
    #[arg(long)]
    artifact: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every class an archive defines, sorted by name.
    ///
    /// Classes visible only through the bootstrap classpath are never listed.
    /// Classes that fail verification are reported separately and skipped.
    ListClasses {
        #[command(flatten)]
        source: SourceArgs,

        /// Config file (`.json`, `.yaml` or `.yml`).
        #[arg(long)]
        config: Option<String>,

        /// Local artifact repository used to resolve `--artifact`.
        #[arg(long)]
        repo: Option<String>,

        /// Only list classes whose name starts with this prefix (repeatable).
        #[arg(long)]
        include: Vec<String>,

        /// Skip classes whose name starts with this prefix (repeatable).
        #[arg(long)]
        exclude: Vec<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Deduplicate, filter and sort recorded method couplings.
    Couplings {
        /// JSON file holding an array of coupling records.
        #[arg(long)]
        edges: String,

        /// Config file (`.json`, `.yaml` or `.yml`).
        #[arg(long)]
        config: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::ListClasses { source, config, repo, include, exclude, json } => {
            let source = match (source.jar, source.artifact) {
                (Some(jar), _) => ClassSource::Jar(jar),
                (None, Some(artifact)) => ClassSource::Artifact(artifact),
                (None, None) => return Err(anyhow!("Either --jar or --artifact is required")),
            };
            list_classes_command(ListClassesArgs { source, config, repo, include, exclude, json })?
        }
        Command::Couplings { edges, config, json } => {
            couplings_command(&edges, config.as_deref(), json)?
        }
    }

    Ok(())
}
