//! # 批量执行器
//!
//! 按文件执行批量处理任务，结果保持输入顺序。
//!
//! ## 功能
//! - `jobs = 1` 时严格顺序执行，`jobs = 0` 使用全部核心
//! - 基于 rayon 的并行迭代（线程池创建失败时退回顺序执行）
//! - 进度条显示
//! - 成功 / 跳过 / 失败统计
//!
//! ## 依赖关系
//! - 被 `batch/driver.rs` 与 `commands/` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::utils::progress;

use rayon::prelude::*;
use std::path::PathBuf;

/// 单个文件处理结果
#[derive(Debug, Clone)]
pub enum ProcessResult {
    /// 处理成功
    Success(String),
    /// 跳过（如文件已存在）
    Skipped(String),
    /// 处理失败
    Failed(String, String), // (文件路径, 错误信息)
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    pub success: usize,
    pub skipped: usize,
    pub failed: usize,
    /// 失败详情
    pub failures: Vec<(String, String)>,
    /// 成功与跳过的消息，按输入顺序
    pub messages: Vec<ProcessResult>,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult) {
        match &result {
            ProcessResult::Success(_) => self.success += 1,
            ProcessResult::Skipped(_) => self.skipped += 1,
            ProcessResult::Failed(path, err) => {
                self.failed += 1;
                self.failures.push((path.clone(), err.clone()));
                return;
            }
        }
        self.messages.push(result);
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 对每个文件执行 `processor`，返回与输入同序的结果
    pub fn map<T, F>(&self, files: &[PathBuf], message: &str, processor: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&PathBuf) -> T + Sync + Send,
    {
        let pb = progress::create_progress_bar(files.len() as u64, message);

        let step = |file: &PathBuf| {
            let result = processor(file);
            pb.inc(1);
            result
        };

        let results: Vec<T> = if self.jobs <= 1 || files.len() <= 1 {
            files.iter().map(step).collect()
        } else {
            match rayon::ThreadPoolBuilder::new()
                .num_threads(self.jobs)
                .build()
            {
                // par_iter + collect 保持输入顺序
                Ok(pool) => pool.install(|| files.par_iter().map(step).collect()),
                Err(e) => {
                    log::warn!("Thread pool unavailable ({}), running sequentially", e);
                    files.iter().map(step).collect()
                }
            }
        };

        pb.finish_and_clear();
        results
    }

    /// 处理文件列表并汇总统计
    pub fn run<F>(&self, files: &[PathBuf], message: &str, processor: F) -> BatchResult
    where
        F: Fn(&PathBuf) -> ProcessResult + Sync + Send,
    {
        let mut batch_result = BatchResult::default();
        for result in self.map(files, message, processor) {
            batch_result.merge(result);
        }
        batch_result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(n: usize) -> Vec<PathBuf> {
        (0..n).map(|i| PathBuf::from(format!("{:02}.log", i))).collect()
    }

    #[test]
    fn test_map_preserves_order() {
        let files = paths(32);
        for jobs in [1, 4] {
            let names = BatchRunner::new(jobs).map(&files, "test", |p| p.display().to_string());
            let expected: Vec<String> = files.iter().map(|p| p.display().to_string()).collect();
            assert_eq!(names, expected);
        }
    }

    #[test]
    fn test_zero_jobs_uses_all_cores() {
        assert!(BatchRunner::new(0).jobs() >= 1);
        assert_eq!(BatchRunner::new(3).jobs(), 3);
    }

    #[test]
    fn test_run_counts() {
        let files = paths(3);
        let result = BatchRunner::new(1).run(&files, "test", |p| {
            match p.to_str() {
                Some("00.log") => ProcessResult::Success("ok".to_string()),
                Some("01.log") => ProcessResult::Skipped("exists".to_string()),
                _ => ProcessResult::Failed(p.display().to_string(), "boom".to_string()),
            }
        });
        assert_eq!(result.success, 1);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.failed, 1);
        assert_eq!(result.total(), 3);
        assert_eq!(result.failures, vec![("02.log".to_string(), "boom".to_string())]);
        assert_eq!(result.messages.len(), 2);
    }
}
