//! # 解析器模块
//!
//! Gaussian 日志的单次扫描解析流水线，以及 .fchk 读取和 .com 生成。
//!
//! ```text
//! LogSource -> SectionScanner -> FactAccumulator -> build_record -> Record
//! ```
//!
//! ## 依赖关系
//! - 被 `batch/` 与 `commands/` 使用
//! - 使用 `models/`, `config.rs`
//! - 子模块: source, scanner, accumulator, builder, fchk, com

pub mod accumulator;
pub mod builder;
pub mod com;
pub mod fchk;
pub mod scanner;
pub mod source;

pub use accumulator::{AccumulatedState, FactAccumulator};
pub use builder::{RankingOptions, RecordOptions};
pub use scanner::SectionScanner;
pub use source::LogSource;

use crate::config::GaulogConfig;
use crate::error::Result;
use crate::models::Record;
use std::path::Path;

/// 可在线程间共享的日志解析器
#[derive(Debug, Clone)]
pub struct LogParser {
    scanner: SectionScanner,
    options: RecordOptions,
}

impl LogParser {
    pub fn new(config: &GaulogConfig, ranking: RankingOptions) -> Result<Self> {
        let step_map = config.step_map();
        if step_map.is_empty() {
            log::debug!("No step energy map; using TD-DFT then SCF energy");
        }
        Ok(LogParser {
            scanner: SectionScanner::new(&config.labels, &config.scan)?,
            options: RecordOptions { step_map, ranking },
        })
    }

    /// 解析单个日志文件；只有文件读取失败会返回错误
    pub fn parse_file(&self, path: &Path) -> Result<Record> {
        let source = LogSource::open(path)?;
        Ok(self.parse_source(&file_name(path), &source))
    }

    pub fn parse_source(&self, filename: &str, source: &LogSource) -> Record {
        let state = self.accumulate(source);
        builder::build_record(filename, &state, &self.options)
    }

    pub fn accumulate(&self, source: &LogSource) -> AccumulatedState {
        FactAccumulator::accumulate(self.scanner.scan(source))
    }
}

/// 路径中的文件名部分
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
