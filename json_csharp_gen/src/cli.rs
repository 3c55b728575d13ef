//! Command-line plumbing shared by both binaries.

use crate::confirm::ConsoleConfirm;
use crate::pipeline::{self, PipelineOptions, SchemaSource};
use crate::settings::{DEFAULT_NAMESPACE, JsonLibrary};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Flags accepted by every binary.
#[derive(Debug, Clone, clap::Args)]
pub struct CommonArgs {
    /// JSON file to read (sample data or a JSON Schema).
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// File to write; defaults to `<input-stem>.cs` in the current directory.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Namespace of the generated types.
    #[arg(short, long, env = "JSONCSGEN_NAMESPACE", default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Overwrite an existing output file without asking.
    #[arg(short, long)]
    pub force: bool,

    /// Log debug details.
    #[arg(short, long)]
    pub verbose: bool,

    /// Serializer whose attributes decorate the generated properties.
    #[arg(long, value_enum, default_value_t = JsonLibrary::SystemTextJson)]
    pub json_library: JsonLibrary,
}

impl CommonArgs {
    /// Pipeline options for these flags; `emit_schema` and `detect_formats` are left to the caller.
    #[must_use]
    pub fn into_options(self, source: SchemaSource) -> PipelineOptions {
        PipelineOptions {
            input: self.input,
            output: self.output,
            namespace: self.namespace,
            force: self.force,
            source,
            json_library: self.json_library,
            ..PipelineOptions::default()
        }
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let default_level: LevelFilter = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let env_filter: EnvFilter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
    if installed.is_err() {
        tracing::debug!("log subscriber already installed");
    }
}

/// Run the pipeline against the console and map the outcome to an exit code.
#[must_use]
pub fn run(options: &PipelineOptions) -> ExitCode {
    let result = std::env::current_dir()
        .map_err(Into::into)
        .and_then(|cwd| pipeline::run(options, &mut ConsoleConfirm::stdio(), &cwd));
    match result {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{err}");
            err.exit_code()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        common: CommonArgs,
    }

    #[test]
    fn defaults() {
        let cli = TestCli::try_parse_from(["test", "--input", "data.json"]).expect("parses");
        assert_eq!(Some(PathBuf::from("data.json")), cli.common.input);
        assert_eq!(None, cli.common.output);
        assert!(!cli.common.force);
        assert!(!cli.common.verbose);
        assert_eq!(JsonLibrary::SystemTextJson, cli.common.json_library);
    }

    #[test]
    fn input_is_optional_at_parse_time() {
        let cli = TestCli::try_parse_from(["test"]).expect("parses");
        assert_eq!(None, cli.common.input);
    }

    #[test]
    fn all_flags() {
        let cli = TestCli::try_parse_from([
            "test",
            "-i",
            "in.json",
            "-o",
            "Out.cs",
            "-n",
            "Acme.Models",
            "--force",
            "--verbose",
            "--json-library",
            "newtonsoft-json",
        ])
        .expect("parses");
        let options: PipelineOptions = cli.common.into_options(SchemaSource::Declared);
        assert_eq!(Some(PathBuf::from("in.json")), options.input);
        assert_eq!(Some(PathBuf::from("Out.cs")), options.output);
        assert_eq!("Acme.Models", options.namespace);
        assert!(options.force);
        assert_eq!(SchemaSource::Declared, options.source);
        assert_eq!(JsonLibrary::NewtonsoftJson, options.json_library);
        assert!(!options.emit_schema);
        assert!(options.detect_formats);
    }
}
