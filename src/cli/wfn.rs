//! # dct / lambda 子命令 CLI 定义
//!
//! 两个子命令都以 .fchk 为输入，并调用外部 Multiwfn。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/dct.rs`, `commands/lambda.rs`

use super::input::InputArgs;
use crate::external::multiwfn::MULTIWFN_ENV;
use clap::Args;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────
// dCT
// ─────────────────────────────────────────────────────────────

/// dct 子命令参数
#[derive(Args, Debug)]
pub struct DctArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Multiwfn executable
    #[arg(long, env = MULTIWFN_ENV, default_value = "Multiwfn")]
    pub multiwfn: PathBuf,

    /// Highest excited state to analyze
    #[arg(long, default_value_t = 3)]
    pub states: u32,

    /// Output CSV file (optimized-state rows go to <stem>_opt_root.csv)
    #[arg(short, long, default_value = "results_dct.csv")]
    pub output: PathBuf,
}

// ─────────────────────────────────────────────────────────────
// lambda
// ─────────────────────────────────────────────────────────────

/// lambda 子命令参数
#[derive(Args, Debug)]
pub struct LambdaArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Multiwfn executable
    #[arg(long, env = MULTIWFN_ENV, default_value = "Multiwfn")]
    pub multiwfn: PathBuf,

    /// Excited state index
    #[arg(long, default_value_t = 1)]
    pub state: u32,

    /// Output CSV file
    #[arg(short, long, default_value = "results_lambda.csv")]
    pub output: PathBuf,

    /// Plot lambda against file order (PNG)
    #[arg(long)]
    pub plot: Option<PathBuf>,
}
