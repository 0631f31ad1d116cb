//! # geom 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/geom.rs`

use super::input::InputArgs;
use crate::parsers::com::DEFAULT_ROUTE;
use clap::Args;
use std::path::PathBuf;

/// geom 子命令参数
#[derive(Args, Debug)]
pub struct GeomArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Route line of the generated input
    #[arg(long, default_value = DEFAULT_ROUTE)]
    pub route: String,

    /// Title line of the generated input
    #[arg(long, default_value = "Title Card Required")]
    pub title: String,

    /// Molecular charge
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub charge: i32,

    /// Spin multiplicity
    #[arg(long, default_value_t = 1)]
    pub multiplicity: u32,

    /// Output directory (default: next to each log)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Overwrite existing .com files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}
