//! # gaulog - Gaussian 日志解析与汇总工具
//!
//! 将分散的日志处理脚本用 Rust 重构，统一成单一可执行文件。
//!
//! ## 子命令
//! - `summary` - 终止状态、频率、能量汇总
//! - `tddft`   - TD-DFT 优化激发态与主要跃迁
//! - `geom`    - 最终几何结构导出为 .com
//! - `dct`     - 电荷转移质心距离 (Multiwfn)
//! - `lambda`  - lambda 指数 (Multiwfn)
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/     (文件收集与批量执行)
//!   │     ├── parsers/   (日志扫描、累积、记录构建)
//!   │     ├── report/    (表格、CSV、图表)
//!   │     ├── external/  (Multiwfn)
//!   │     └── models/    (数据模型)
//!   ├── config.rs   (TOML 配置)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod config;
mod error;
mod external;
mod models;
mod parsers;
mod report;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    let mut logger = env_logger::Builder::new();
    logger
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .format_timestamp(None);
    enable_debug(&mut logger, cli.debug);
    logger.init();

    if let Err(e) = commands::run(cli) {
        utils::output::print_error(&batch::driver::error_chain(&e));
        std::process::exit(1);
    }
}

/// `--debug` 在 RUST_LOG 之后应用，本 crate 的日志始终提升到 debug
fn enable_debug(builder: &mut env_logger::Builder, debug: bool) {
    if debug {
        builder.filter_module(env!("CARGO_CRATE_NAME"), log::LevelFilter::Debug);
    }
}
