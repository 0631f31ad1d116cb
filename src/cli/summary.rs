//! # summary 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/summary.rs`

use super::input::InputArgs;
use clap::Args;
use std::path::PathBuf;

/// summary 子命令参数
#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output CSV file
    #[arg(short, long, default_value = "summary.csv")]
    pub output: PathBuf,

    /// Plot energy against file order (PNG)
    #[arg(long)]
    pub plot: Option<PathBuf>,
}
