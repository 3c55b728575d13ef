//! Binary to generate C# model classes from JSON sample data or a JSON Schema.
//!
//! Usage: `jsoncsgen --input person.json [--output Person.cs] [--schema]`
//!
//! Documents containing `$schema` are loaded as schemas; anything else is
//! treated as sample data and a schema is inferred from it.

use std::process::ExitCode;

use clap::Parser;
use json_csharp_gen::cli::{self, CommonArgs};
use json_csharp_gen::pipeline::{PipelineOptions, SchemaSource};

#[derive(Debug, Parser)]
#[command(name = "jsoncsgen", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    /// Also write `<input-stem>.schema.json` next to the generated file.
    #[arg(short, long)]
    schema: bool,

    /// Keep inferred strings plain instead of detecting date, uuid and uri formats.
    #[arg(long)]
    no_detect_formats: bool,
}

fn main() -> ExitCode {
    let args = Cli::parse();
    cli::init_logging(args.common.verbose);

    let options = PipelineOptions {
        emit_schema: args.schema,
        detect_formats: !args.no_detect_formats,
        ..args.common.into_options(SchemaSource::Auto)
    };
    cli::run(&options)
}
