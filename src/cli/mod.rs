//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `summary`: 每个日志一行的结果汇总
//! - `tddft`: TD-DFT 优化激发态报告
//! - `geom`: 最终几何结构导出为 .com
//! - `dct`: 电荷转移质心距离 (Multiwfn)
//! - `lambda`: lambda 指数 (Multiwfn)
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: input, summary, tddft, geom, wfn

pub mod geom;
pub mod input;
pub mod summary;
pub mod tddft;
pub mod wfn;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// gaulog - Gaussian 日志解析与汇总工具
#[derive(Parser, Debug)]
#[command(name = "gaulog")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Extract and summarize results from Gaussian output logs", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Print one diagnostic line per file (debug log level)
    #[arg(long, global = true, default_value_t = false)]
    pub debug: bool,

    /// Configuration file (default: ./gaulog.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize termination, frequencies and energies of each log
    Summary(summary::SummaryArgs),

    /// Report the optimized excited state and its dominant transitions
    Tddft(tddft::TddftArgs),

    /// Write the final geometry of each log as a Gaussian input (.com)
    Geom(geom::GeomArgs),

    /// Charge-transfer centroid distance of the final excited states (Multiwfn)
    Dct(wfn::DctArgs),

    /// Lambda index of one excited state per .fchk (Multiwfn)
    Lambda(wfn::LambdaArgs),
}
