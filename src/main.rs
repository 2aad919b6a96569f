use idm_ts_gen::codegen::{backend::typescript, CodeGenerator};
use idm_ts_gen::config::{GeneratorConfig, DEFAULT_CONFIG_DIR, DEFAULT_OUTPUT};
use idm_ts_gen::filter::Filter;
use idm_ts_gen::types::ValueKind;

use clap::builder::FalseyValueParser;
use clap::{Args, Parser, Subcommand};
use log::warn;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(version, about = "Generate TypeScript types for identity management scripts")]
struct IdmTsGen {
    #[clap(subcommand)]
    subcommand: Command,
}

#[derive(Subcommand)]
enum Command {
    Generate {
        #[clap(subcommand)]
        target: GenerateTarget,
    },
    /// Print the query filter string of a JSON filter expression
    Filter { expression: String },
}

#[derive(Subcommand)]
enum GenerateTarget {
    /// Types for managed and system objects
    Types(TypesArgs),
}

#[derive(Args)]
struct TypesArgs {
    /// Directory holding managed.json and provisioner.openicf-*.json
    #[clap(long, env = "IDM_CONFIG_DIR", default_value = DEFAULT_CONFIG_DIR)]
    config_dir: PathBuf,
    #[clap(long, short, env = "IDM_TS_TYPES", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
    /// Use `any` instead of `unknown` for open managed object shapes
    #[clap(long, env = "IDM_TS_MANAGED_ANY", value_parser = FalseyValueParser::new())]
    managed_any: bool,
    /// Use `any` instead of `unknown` for open connector object shapes
    #[clap(long, env = "IDM_TS_CONNECTOR_ANY", value_parser = FalseyValueParser::new())]
    connector_any: bool,
    /// Module `idmObject` and `ReferenceType` are imported from
    #[clap(long, env = "IDM_TS_RUNTIME_MODULE", default_value = typescript::DEFAULT_RUNTIME_MODULE)]
    runtime_module: String,
    /// Formatter command reading stdin, `{file}` is replaced with the output path
    #[clap(long, env = "IDM_TS_FORMATTER")]
    formatter: Option<String>,
}

impl From<TypesArgs> for GeneratorConfig {
    fn from(args: TypesArgs) -> Self {
        GeneratorConfig {
            config_dir: args.config_dir,
            output: args.output,
            managed_values: ValueKind::from_any_flag(args.managed_any),
            connector_values: ValueKind::from_any_flag(args.connector_any),
            runtime_module: args.runtime_module,
            formatter: args.formatter,
        }
    }
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Generate { target } => match target {
            GenerateTarget::Types(args) => {
                let config = GeneratorConfig::from(args);
                let backend = typescript::Codegen::new(config.runtime_module.clone());
                let mut codegen = CodeGenerator::new(config, Box::new(backend));
                let types = codegen.generate()?;
                if !types.warnings.is_empty() {
                    warn!("generated with {} warnings", types.warnings.len());
                }
                println!(
                    "Wrote typescript types to [{}]",
                    codegen.config().output.display()
                );
            }
        },
        Command::Filter { expression } => {
            let filter: Filter = serde_json::from_str(&expression)?;
            println!("{filter}");
        }
    }
    Ok(())
}

fn main() {
    pretty_env_logger::init();
    let idm_ts_gen = IdmTsGen::parse();

    if let Err(e) = run(idm_ts_gen.subcommand) {
        eprintln!("error: {e}");
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }
}
