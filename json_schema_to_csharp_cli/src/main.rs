//! Binary to generate C# model classes from a JSON Schema file.
//!
//! Usage: `json-schema-to-csharp-cli --input order.schema.json [--output Order.cs]`
//!
//! The input is always loaded as a declared schema; no inference happens.

use std::process::ExitCode;

use clap::Parser;
use json_csharp_gen::cli::{self, CommonArgs};
use json_csharp_gen::pipeline::SchemaSource;

#[derive(Debug, Parser)]
#[command(name = "json-schema-to-csharp-cli", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> ExitCode {
    let args = Cli::parse();
    cli::init_logging(args.common.verbose);
    cli::run(&args.common.into_options(SchemaSource::Declared))
}
