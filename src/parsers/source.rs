//! # 日志行读取
//!
//! 将日志文件读入有序行序列。非法 UTF-8 字节被替换而不是报错。
//!
//! ## 依赖关系
//! - 被 `parsers/scanner.rs`, `parsers/mod.rs` 使用

use crate::error::{GaulogError, Result};
use std::fs;
use std::path::Path;

/// 带行号的只读日志行
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLine<'a> {
    /// 0 起始行号
    pub index: usize,
    pub text: &'a str,
}

/// 一个日志文件的全部行
#[derive(Debug, Clone, Default)]
pub struct LogSource {
    lines: Vec<String>,
}

impl LogSource {
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| GaulogError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(Self::from_bytes(&bytes))
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_text(&String::from_utf8_lossy(bytes))
    }

    pub fn from_text(text: &str) -> Self {
        LogSource {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = LogLine<'_>> {
        self.lines
            .iter()
            .enumerate()
            .map(|(index, text)| LogLine { index, text })
    }

    pub fn as_slice(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let bytes = b"SCF Done:  E(RB3LYP) =  -1.0\n\xff\xfe broken\r\n Normal termination\n";
        let source = LogSource::from_bytes(bytes);
        assert_eq!(source.len(), 3);
        assert!(source.as_slice()[1].ends_with(" broken"));
        assert_eq!(source.as_slice()[2], " Normal termination");
    }

    #[test]
    fn test_line_indices() {
        let source = LogSource::from_text("a\nb\nc");
        let indices: Vec<usize> = source.lines().map(|l| l.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_open_missing_file() {
        assert!(LogSource::open(Path::new("/nonexistent/gaulog/test.log")).is_err());
    }
}
