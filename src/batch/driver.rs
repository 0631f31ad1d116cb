//! # 日志批量解析
//!
//! 对收集到的日志文件逐个运行解析流水线。单个文件失败时生成带原因的
//! 占位记录，批处理继续进行。
//!
//! ## 依赖关系
//! - 被 `commands/summary.rs`, `commands/tddft.rs` 调用
//! - 使用 `parsers/LogParser`, `batch/runner.rs`

use super::runner::BatchRunner;
use crate::models::Record;
use crate::parsers::{self, LogParser};

use std::path::PathBuf;

/// 解析全部文件，返回与输入同序的记录
pub fn parse_logs(parser: &LogParser, files: &[PathBuf], runner: &BatchRunner) -> Vec<Record> {
    log::debug!("Parsing {} files with {} jobs", files.len(), runner.jobs());
    runner.map(files, "Parsing logs", |path| {
        parser.parse_file(path).unwrap_or_else(|e| {
            log::warn!("{}: {}", path.display(), error_chain(&e));
            Record::failed(parsers::file_name(path), error_chain(&e))
        })
    })
}

/// 每个文件一行诊断信息（debug 级别）
pub fn log_diagnostics(records: &[Record]) {
    for record in records {
        log::debug!("{}", record.diagnostic_line());
    }
}

/// 错误及其 source 链拼接为一行
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GaulogConfig;
    use crate::models::TerminationStatus;
    use crate::parsers::RankingOptions;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_failed_file_does_not_abort_batch() {
        let tmp = TempDir::new().unwrap();
        let good = tmp.path().join("01_gs.log");
        fs::write(
            &good,
            " SCF Done:  E(RB3LYP) =  -40.5\n Normal termination of Gaussian 16\n",
        )
        .unwrap();
        let missing = tmp.path().join("02_missing.log");

        let parser = LogParser::new(&GaulogConfig::default(), RankingOptions::default()).unwrap();
        let records = parse_logs(&parser, &[good, missing], &BatchRunner::new(1));

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].termination, TerminationStatus::Normal);
        assert_eq!(records[0].energy_value, Some(-40.5));
        assert!(records[0].error.is_none());

        assert_eq!(records[1].filename, "02_missing.log");
        assert!(records[1].error.as_deref().unwrap().contains("02_missing.log"));
    }

    #[test]
    fn test_error_chain_includes_source() {
        let err = crate::error::GaulogError::FileReadError {
            path: "a.log".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(error_chain(&err), "Failed to read file: a.log: gone");
    }
}
