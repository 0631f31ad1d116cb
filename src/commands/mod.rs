//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `config.rs`, `batch/`, `parsers/`, `report/`, `external/`, `utils/`
//! - 子模块: summary, tddft, geom, dct, lambda

pub mod dct;
pub mod geom;
pub mod lambda;
pub mod summary;
pub mod tddft;

use crate::batch::{BatchResult, FileCollector};
use crate::cli::input::InputArgs;
use crate::cli::{Cli, Commands};
use crate::config::GaulogConfig;
use crate::error::Result;
use crate::utils::output;

use std::path::{Path, PathBuf};

/// 执行命令
pub fn run(cli: Cli) -> Result<()> {
    let config = GaulogConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Summary(args) => summary::execute(args, &config),
        Commands::Tddft(args) => tddft::execute(args, &config),
        Commands::Geom(args) => geom::execute(args, &config),
        Commands::Dct(args) => dct::execute(args, &config),
        Commands::Lambda(args) => lambda::execute(args),
    }
}

/// 收集输入文件并打印数量与前几个文件名；没有匹配文件时只警告
pub(crate) fn collect_inputs(input: &InputArgs, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let files = FileCollector::new(input.paths.clone())
        .with_extensions(extensions)
        .recursive(!input.no_recurse)
        .collect()?;

    output::print_info(&format!("Found {} files", files.len()));
    if files.is_empty() {
        let pattern = if input.paths.is_empty() {
            format!(". (*.{})", extensions.join(", *."))
        } else {
            input.paths.join(" ")
        };
        output::print_warning(&format!("No matching files found with pattern: {}", pattern));
        return Ok(files);
    }

    let examples: Vec<String> = files
        .iter()
        .take(5)
        .map(|p| crate::parsers::file_name(p))
        .collect();
    output::print_examples(&examples);

    Ok(files)
}

/// 与 .fchk 同名的 .log，其次 .out
pub(crate) fn sibling_log(fchk: &Path) -> Option<PathBuf> {
    ["log", "out"]
        .iter()
        .map(|ext| fchk.with_extension(ext))
        .find(|p| p.is_file())
}

/// 打印失败列表（最多 10 条）
pub(crate) fn report_failures(result: &BatchResult) {
    if result.failures.is_empty() {
        return;
    }
    output::print_warning("Failed files:");
    for (path, err) in result.failures.iter().take(10) {
        output::print_error(&format!("  {}: {}", path, err));
    }
    if result.failures.len() > 10 {
        output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_sibling_log_prefers_log() {
        let tmp = TempDir::new().unwrap();
        let fchk = tmp.path().join("mol.fchk");
        fs::write(&fchk, "").unwrap();
        assert_eq!(sibling_log(&fchk), None);

        fs::write(tmp.path().join("mol.out"), "").unwrap();
        assert_eq!(sibling_log(&fchk), Some(tmp.path().join("mol.out")));

        fs::write(tmp.path().join("mol.log"), "").unwrap();
        assert_eq!(sibling_log(&fchk), Some(tmp.path().join("mol.log")));
    }

    #[test]
    fn test_collect_inputs_empty_directory_is_empty_batch() {
        let tmp = TempDir::new().unwrap();
        let input = InputArgs {
            paths: vec![tmp.path().display().to_string()],
            no_recurse: false,
            jobs: 1,
        };
        let files = collect_inputs(&input, crate::batch::LOG_EXTENSIONS).unwrap();
        assert!(files.is_empty());
    }
}
