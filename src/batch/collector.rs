//! # 文件收集器
//!
//! 根据输入路径、glob 模式或目录收集待处理文件列表。
//!
//! ## 功能
//! - 支持单文件、目录与 glob 模式输入（默认当前目录）
//! - 按扩展名过滤（`log`/`out` 或 `fchk`）
//! - 递归目录搜索（可关闭）
//! - 去重（先出现者保留）后按文件名自然排序
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 展开模式
//! - 使用 `batch/natsort.rs` 排序

use super::natsort::natural_cmp;
use crate::error::{GaulogError, Result};

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// 日志文件扩展名
pub const LOG_EXTENSIONS: &[&str] = &["log", "out"];

/// 波函数文件扩展名
pub const FCHK_EXTENSIONS: &[&str] = &["fchk"];

/// 文件收集器
pub struct FileCollector {
    /// 输入路径 / 模式
    inputs: Vec<String>,
    /// 接受的扩展名（小写）
    extensions: Vec<String>,
    /// 是否递归
    recursive: bool,
}

impl FileCollector {
    /// 创建新的文件收集器；无输入时使用当前目录
    pub fn new(inputs: Vec<String>) -> Self {
        let inputs = if inputs.is_empty() {
            vec![".".to_string()]
        } else {
            inputs
        };
        Self {
            inputs,
            extensions: LOG_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            recursive: true,
        }
    }

    /// 设置接受的扩展名
    pub fn with_extensions(mut self, extensions: &[&str]) -> Self {
        self.extensions = extensions.iter().map(|s| s.to_lowercase()).collect();
        self
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        for input in &self.inputs {
            self.expand(input, &mut found)?;
        }

        let mut seen = HashSet::new();
        let mut files: Vec<PathBuf> = found
            .into_iter()
            .filter(|p| seen.insert(normalize(p)))
            .collect();

        files.sort_by(|a, b| {
            natural_cmp(&file_name_of(a), &file_name_of(b))
                .then_with(|| natural_cmp(&a.to_string_lossy(), &b.to_string_lossy()))
        });

        Ok(files)
    }

    fn expand(&self, input: &str, out: &mut Vec<PathBuf>) -> Result<()> {
        if is_glob(input) {
            let entries = glob::glob(input).map_err(|e| {
                GaulogError::InvalidArgument(format!("bad pattern '{}': {}", input, e))
            })?;
            let mut matched = false;
            for entry in entries {
                match entry {
                    Ok(path) => {
                        matched = true;
                        self.add_path(&path, out)?;
                    }
                    Err(e) => log::warn!("Skipping unreadable match: {}", e),
                }
            }
            if !matched {
                log::warn!("Pattern '{}' matched nothing", input);
            }
            return Ok(());
        }

        let path = Path::new(input);
        if path.exists() {
            self.add_path(path, out)
        } else {
            log::warn!("Input '{}' does not exist", input);
            Ok(())
        }
    }

    fn add_path(&self, path: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
        if path.is_dir() {
            self.walk_dir(path, out)
        } else {
            if path.is_file() && self.matches_extension(path) {
                out.push(path.to_path_buf());
            }
            Ok(())
        }
    }

    /// 目录本身不可读时失败；其下个别条目不可读时跳过
    fn walk_dir(&self, dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
        let max_depth = if self.recursive { usize::MAX } else { 1 };

        for entry in WalkDir::new(dir).max_depth(max_depth) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) if e.depth() == 0 => {
                    return Err(GaulogError::FileReadError {
                        path: dir.display().to_string(),
                        source: e.into(),
                    });
                }
                Err(e) => {
                    log::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if entry.file_type().is_file() && self.matches_extension(entry.path()) {
                out.push(entry.into_path());
            }
        }

        Ok(())
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
            .unwrap_or(false)
    }
}

fn is_glob(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

/// 去掉 `./` 成分后的路径，用于去重
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "x").unwrap();
        path
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        files.iter().map(|p| file_name_of(p)).collect()
    }

    #[test]
    fn test_directory_natural_order_and_filter() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "m_10.log");
        touch(tmp.path(), "m_2.log");
        touch(tmp.path(), "m_1.out");
        touch(tmp.path(), "m_3.chk");
        touch(tmp.path(), "sub/m_4.LOG");

        let files = FileCollector::new(vec![tmp.path().display().to_string()])
            .collect()
            .unwrap();
        assert_eq!(names(&files), vec!["m_1.out", "m_2.log", "m_4.LOG", "m_10.log"]);
    }

    #[test]
    fn test_no_recurse() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.log");
        touch(tmp.path(), "sub/b.log");

        let files = FileCollector::new(vec![tmp.path().display().to_string()])
            .recursive(false)
            .collect()
            .unwrap();
        assert_eq!(names(&files), vec!["a.log"]);
    }

    #[test]
    fn test_dedup_first_occurrence() {
        let tmp = TempDir::new().unwrap();
        let file = touch(tmp.path(), "01_gs.log");

        let dir = tmp.path().display().to_string();
        let files = FileCollector::new(vec![
            file.display().to_string(),
            dir.clone(),
            format!("{}/*.log", dir),
        ])
        .collect()
        .unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_fchk_extensions() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.log");
        touch(tmp.path(), "a.fchk");

        let files = FileCollector::new(vec![tmp.path().display().to_string()])
            .with_extensions(FCHK_EXTENSIONS)
            .collect()
            .unwrap();
        assert_eq!(names(&files), vec!["a.fchk"]);
    }

    #[test]
    fn test_missing_input_is_skipped() {
        let files = FileCollector::new(vec!["/nonexistent/gaulog/dir".to_string()])
            .collect()
            .unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_invalid_glob() {
        let result = FileCollector::new(vec!["[".to_string()]).collect();
        assert!(matches!(result, Err(GaulogError::InvalidArgument(_))));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("./a/./b.log")), PathBuf::from("a/b.log"));
    }
}
