//! # geom 命令实现
//!
//! 将每个日志中最后一个几何块写为 Gaussian 输入文件 (.com)。
//!
//! ## 功能
//! - 批量处理（文件级失败不中断）
//! - 已存在的输出默认跳过（`--overwrite` 覆盖）
//! - 输出到日志所在目录或 `--output-dir`
//!
//! ## 依赖关系
//! - 使用 `cli/geom.rs` 定义的参数
//! - 使用 `parsers/LogParser`, `parsers/com.rs`
//! - 使用 `batch/runner.rs`, `utils/output.rs`

use super::{collect_inputs, report_failures};
use crate::batch::{BatchRunner, ProcessResult, LOG_EXTENSIONS};
use crate::cli::geom::GeomArgs;
use crate::config::GaulogConfig;
use crate::error::{GaulogError, Result};
use crate::models::molecule::formula;
use crate::parsers::com::{to_com_string, ComHeader};
use crate::parsers::{LogParser, LogSource, RankingOptions};
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};

/// 单个文件的转换设置
struct GeomJob<'a> {
    parser: LogParser,
    header: ComHeader,
    output_dir: Option<&'a Path>,
    overwrite: bool,
}

/// 执行 geom 命令
pub fn execute(args: GeomArgs, config: &GaulogConfig) -> Result<()> {
    output::print_header("Final Geometry to Gaussian Input");

    let files = collect_inputs(&args.input, LOG_EXTENSIONS)?;

    if let Some(ref dir) = args.output_dir {
        fs::create_dir_all(dir).map_err(|e| GaulogError::FileWriteError {
            path: dir.display().to_string(),
            source: e,
        })?;
    }

    let job = GeomJob {
        parser: LogParser::new(config, RankingOptions::default())?,
        header: ComHeader {
            route: args.route.clone(),
            title: args.title.clone(),
            charge: args.charge,
            multiplicity: args.multiplicity,
        },
        output_dir: args.output_dir.as_deref(),
        overwrite: args.overwrite,
    };

    let runner = BatchRunner::new(args.input.jobs);
    let result = runner.run(&files, "Writing .com", |path| process_file(path, &job));

    for message in &result.messages {
        match message {
            ProcessResult::Success(msg) => output::print_success(msg),
            ProcessResult::Skipped(msg) => output::print_skip(msg),
            ProcessResult::Failed(..) => {}
        }
    }

    output::print_separator();
    output::print_done(&format!(
        "Wrote {} / {} files ({} skipped, {} failed)",
        result.success,
        result.total(),
        result.skipped,
        result.failed
    ));
    report_failures(&result);

    Ok(())
}

fn output_path(log: &Path, output_dir: Option<&Path>) -> (String, PathBuf) {
    let stem = log
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "geometry".to_string());
    let dir = output_dir
        .map(Path::to_path_buf)
        .or_else(|| log.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    let path = dir.join(format!("{}.com", stem));
    (stem, path)
}

fn process_file(log: &Path, job: &GeomJob<'_>) -> ProcessResult {
    let name = log.display().to_string();
    let (stem, target) = output_path(log, job.output_dir);

    if target.exists() && !job.overwrite {
        return ProcessResult::Skipped(format!("{} already exists", target.display()));
    }

    let source = match LogSource::open(log) {
        Ok(s) => s,
        Err(e) => return ProcessResult::Failed(name, e.to_string()),
    };
    let state = job.parser.accumulate(&source);

    if state.last_geometry.is_empty() {
        return ProcessResult::Skipped(format!("No geometry found in {}", name));
    }

    let content = to_com_string(&stem, &state.last_geometry, &job.header);
    match fs::write(&target, content) {
        Ok(()) => ProcessResult::Success(format!(
            "{} -> {} ({}, {} atoms)",
            name,
            target.display(),
            formula(&state.last_geometry),
            state.last_geometry.len()
        )),
        Err(e) => ProcessResult::Failed(name, format!("cannot write {}: {}", target.display(), e)),
    }
}
