//! # 批量处理模块
//!
//! 提供统一的文件批量处理能力。
//!
//! ## 功能
//! - 收集路径 / glob / 目录输入并自然排序
//! - 按输入顺序执行（可选并行）
//! - 文件级失败转换为占位记录
//! - 进度反馈与统计
//!
//! ## 依赖关系
//! - 被各命令模块使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod driver;
pub mod natsort;
pub mod runner;

pub use collector::{FileCollector, FCHK_EXTENSIONS, LOG_EXTENSIONS};
pub use runner::{BatchResult, BatchRunner, ProcessResult};
