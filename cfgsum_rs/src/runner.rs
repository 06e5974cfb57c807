use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::cfg::ConfigParser;
use crate::config::CfgsumConfig;
use crate::fs_utils::{read_list_file, resolve_config_inputs};
use crate::inventory::{Inventory, InventoryOptions};
use crate::native::{NativeIndex, NativeMiner};
use crate::report::{EmitStats, OutputFormat, ReportLayout, Workbook, emit, write_workbook};
use crate::types::FunctorRecord;

pub const DEFAULT_OUTPUT: &str = "./cfg_summary.xlsx";

#[derive(Clone, Debug)]
pub struct RunOptions {
    /// A `.cfg` file or a `.csv` list of them.
    pub input: PathBuf,
    pub output: PathBuf,
    /// Optional `.csv` list of native source files.
    pub native_list: Option<PathBuf>,
    pub config: CfgsumConfig,
    pub include_unattributed: bool,
}

impl RunOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            native_list: None,
            config: CfgsumConfig::default(),
            include_unattributed: false,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    pub cfg_files: usize,
    pub cfg_skipped: usize,
    pub functors: usize,
    pub calculator_types: usize,
    pub native_files: usize,
    pub registrations: usize,
    pub emitted: EmitStats,
    pub output: PathBuf,
    pub format: Option<OutputFormat>,
}

/// Parse every listed cfg file; missing or unreadable files are skipped.
pub fn parse_config_files(parser: &ConfigParser, files: &[PathBuf]) -> (Vec<FunctorRecord>, usize) {
    let mut records = Vec::new();
    let mut skipped = 0;
    for file in files {
        if !file.is_file() {
            warn!("cfg file {} not found, skipping", file.display());
            skipped += 1;
            continue;
        }
        match parser.parse_file(file) {
            Ok(parsed) => {
                debug!("{}: {} sections", file.display(), parsed.len());
                records.extend(parsed);
            }
            Err(e) => {
                warn!("failed to read {}: {}", file.display(), e);
                skipped += 1;
            }
        }
    }
    (records, skipped)
}

fn collect_native(miner: &NativeMiner, list: Option<&Path>) -> (NativeIndex, usize) {
    let Some(list) = list else {
        return (NativeIndex::default(), 0);
    };
    match read_list_file(list) {
        Ok(paths) => (miner.mine_all(&paths), paths.len()),
        Err(e) => {
            warn!("{e}; continuing without native sources");
            (NativeIndex::default(), 0)
        }
    }
}

/// Full pipeline: parse, mine, group, lay out and write the workbook.
pub fn run(options: &RunOptions) -> Result<RunSummary> {
    let cfg_files = resolve_config_inputs(&options.input)?;
    info!("inventorying {} cfg file(s)", cfg_files.len());

    let parser = ConfigParser::from_config(&options.config.parser);
    let (records, cfg_skipped) = parse_config_files(&parser, &cfg_files);
    let functors = records.len();

    let miner = NativeMiner::from_config(&options.config.native);
    let (native, native_files) = collect_native(&miner, options.native_list.as_deref());
    info!(
        "native sources: {} file(s), {} registration(s), {} implementation(s) with defaults",
        native_files,
        native.registration_count(),
        native.defaults.len()
    );

    let inventory = Inventory::build(
        records,
        &native,
        &InventoryOptions {
            repo_root_marker: options.config.report.repo_root_marker.clone(),
            include_unattributed: options.include_unattributed,
        },
    );

    let mut workbook = Workbook::new();
    let emitted = emit(
        &inventory,
        &mut workbook,
        &ReportLayout::from_config(&options.config.report),
    );
    let format = write_workbook(&workbook, &options.output)
        .with_context(|| format!("writing report to {}", options.output.display()))?;
    info!(
        "wrote {} type sheet(s) and {} summary row(s) to {}",
        emitted.type_sheets,
        emitted.summary_rows,
        options.output.display()
    );

    Ok(RunSummary {
        cfg_files: cfg_files.len(),
        cfg_skipped,
        functors,
        calculator_types: inventory.reports.len(),
        native_files,
        registrations: native.registration_count(),
        emitted,
        output: options.output.clone(),
        format: Some(format),
    })
}
