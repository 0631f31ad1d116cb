//! # tddft 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/tddft.rs`

use super::input::InputArgs;
use clap::Args;
use std::path::PathBuf;

/// tddft 子命令参数
#[derive(Args, Debug)]
pub struct TddftArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// |coefficient| at or above which a transition is significant
    #[arg(long, default_value_t = 0.30)]
    pub threshold: f64,

    /// Number of dominant transitions to report
    #[arg(long, default_value_t = 3)]
    pub top: usize,

    /// Output CSV file
    #[arg(short, long, default_value = "td_tddft_summary.csv")]
    pub output: PathBuf,
}
