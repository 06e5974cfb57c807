use std::path::{Path, PathBuf};

use clap::Parser;

use crate::config::CfgsumConfig;
use crate::runner::{DEFAULT_OUTPUT, RunOptions};
use crate::types::DefaultLiteral;

#[derive(Parser, Debug)]
#[command(name = "cfgsum")]
#[command(about = "Summarise calculator sections of .cfg files into a workbook")]
#[command(version)]
pub struct Args {
    /// Input .cfg file or .csv listing .cfg files
    #[arg(short, long)]
    pub infile: PathBuf,

    /// Output workbook (.xlsx, or .json for a machine-readable dump)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub outfile: PathBuf,

    /// Optional .csv listing native source files (registration + implementations)
    #[arg(short, long)]
    pub cpp: Option<PathBuf>,

    /// Cut displayed cfg paths after this repository-root fragment
    #[arg(long)]
    pub repo_marker: Option<String>,

    /// How settings defaults are reported (verbatim, zero-as-absent)
    #[arg(long, value_parser = parse_default_literal)]
    pub default_literal: Option<DefaultLiteral>,

    /// Also list registrations that no configured type claims
    #[arg(long)]
    pub all_registrations: bool,

    /// Config file (default: .cfgsum/config.toml in the working directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

fn parse_default_literal(raw: &str) -> Result<DefaultLiteral, String> {
    DefaultLiteral::parse(raw).ok_or_else(|| "expected verbatim or zero-as-absent".to_string())
}

impl Args {
    /// Merge CLI flags over the config file found relative to `cwd`.
    pub fn into_run_options(self, cwd: &Path) -> RunOptions {
        let mut config = match self.config.as_deref() {
            Some(path) => CfgsumConfig::load_from_path(path),
            None => CfgsumConfig::load(cwd),
        };
        if let Some(marker) = self.repo_marker {
            config.report.repo_root_marker = Some(marker);
        }
        if let Some(literal) = self.default_literal {
            config.native.default_literal = literal;
        }

        RunOptions {
            input: self.infile,
            output: self.outfile,
            native_list: self.cpp,
            config,
            include_unattributed: self.all_registrations,
        }
    }
}
