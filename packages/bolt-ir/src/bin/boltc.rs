//! Bolt compiler CLI
//!
//! Reads a program (JSON AST from an external front end), compiles it to a
//! CUDA host unit plus a kernel unit and prints the per-function analysis
//! report.
//!
//! # Usage
//!
//! ```bash
//! # Compile with defaults, units land in the current directory
//! boltc program.json
//!
//! # Extra global bindings, custom config, JSON report, CFG dumps
//! boltc program.json --env env.json --config boltc.yaml --out-dir build --report json --dot
//! ```

use bolt_ir::{CompileError, CompilerConfig, Compiler, Program, TypeEnvironment};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "boltc")]
#[command(author, version, about = "Compile Bolt programs to CUDA C++", long_about = None)]
struct Cli {
    /// Program AST as JSON
    program: PathBuf,

    /// Global type environment as JSON, merged over the function return types
    #[arg(long)]
    env: Option<PathBuf>,

    /// Compiler configuration (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the generated units
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Analysis report format
    #[arg(long, value_enum, default_value = "text")]
    report: ReportFormat,

    /// Also write one Graphviz file per function
    #[arg(long)]
    dot: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
    None,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error[{}]: {}", err.kind().as_str(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CompileError> {
    let program: Program = serde_json::from_str(&std::fs::read_to_string(&cli.program)?)?;

    let mut env = TypeEnvironment::from_program(&program)?;
    if let Some(path) = &cli.env {
        let extra: TypeEnvironment = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        env.merge(extra)?;
    }

    let config = match &cli.config {
        Some(path) => CompilerConfig::from_yaml_file(path)?,
        None => CompilerConfig::default(),
    };

    let output = Compiler::new(config, &env).compile(&program)?;
    for path in output.write_to(&cli.out_dir)? {
        eprintln!("wrote {}", path.display());
    }

    if cli.dot {
        for (function, dot) in &output.flow_graphs {
            let path = dot_path(&cli.out_dir, function);
            std::fs::write(&path, dot)?;
            eprintln!("wrote {}", path.display());
        }
    }

    match cli.report {
        ReportFormat::Text => {
            for report in &output.reports {
                println!("{}", report);
            }
        }
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&output.reports)?),
        ReportFormat::None => {}
    }

    Ok(())
}

fn dot_path(dir: &Path, function: &str) -> PathBuf {
    dir.join(format!("{}.cfg.dot", function))
}
