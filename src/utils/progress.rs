//! # 进度条工具
//!
//! 封装 `indicatif`。单个文件的批次不显示进度条；
//! 标准错误不是终端时 indicatif 自动隐藏。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 使用
//! - 使用 `indicatif` crate

use indicatif::{ProgressBar, ProgressStyle};

const FILE_BAR_TEMPLATE: &str =
    "{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len} files ({eta})";

/// 按文件计数的进度条
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    if len < 2 {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(FILE_BAR_TEMPLATE)
            .expect("static progress template must parse")
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}
