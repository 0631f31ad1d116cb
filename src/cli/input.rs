//! # 通用输入参数
//!
//! 各子命令共享的输入定义：路径 / glob / 目录、递归开关、并行作业数。
//!
//! ## 依赖关系
//! - 被 `cli/` 各子命令通过 `#[command(flatten)]` 使用

use clap::Args;

/// 输入文件选择
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Files, directories or glob patterns (default: current directory)
    pub paths: Vec<String>,

    /// Do not descend into subdirectories
    #[arg(long, default_value_t = false)]
    pub no_recurse: bool,

    /// Number of parallel jobs (0 = all cores, 1 = sequential)
    #[arg(short, long, default_value_t = 1)]
    pub jobs: usize,
}
