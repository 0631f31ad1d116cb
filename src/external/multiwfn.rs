//! # Multiwfn 命令脚本
//!
//! - 电荷转移质心距离 (dCT)：主功能 100 → 11，给定轨道对
//! - lambda 指数：主功能 18 → 14，读取同名 .log/.out 中的激发态
//!
//! ## 依赖关系
//! - 被 `commands/dct.rs`, `commands/lambda.rs` 调用
//! - 使用 `external/mod.rs` 的 ComputeTool

use super::{extract_labeled_value, CommandScript, ComputeTool};
use crate::error::Result;

use std::path::Path;

/// Multiwfn 可执行文件路径的环境变量
pub const MULTIWFN_ENV: &str = "MULTIWFN_PATH";

pub const CENTROID_LABEL: &str = "Centroid distance";
pub const LAMBDA_LABEL: &str = "lambda =";

/// 轨道对 `from,to` 的质心距离脚本
pub fn dct_script(from_orbital: u32, to_orbital: u32) -> CommandScript {
    CommandScript::new([
        "100".to_string(),
        "11".to_string(),
        format!("{},{}", from_orbital, to_orbital),
        "n".to_string(),
        "0,0".to_string(),
        "0".to_string(),
        "q".to_string(),
    ])
}

/// 指定激发态的 lambda 指数脚本；空行让 Multiwfn 自动载入同名日志
pub fn lambda_script(state: u32) -> CommandScript {
    CommandScript::new([
        "18".to_string(),
        "14".to_string(),
        String::new(),
        state.to_string(),
        "n".to_string(),
        "n".to_string(),
        "0".to_string(),
        "q".to_string(),
    ])
}

/// 质心距离 (Å)；输出中没有该值时为 None
pub fn centroid_distance(
    tool: &dyn ComputeTool,
    fchk: &Path,
    from_orbital: u32,
    to_orbital: u32,
) -> Result<Option<f64>> {
    let stdout = tool.run(&dct_script(from_orbital, to_orbital), fchk)?;
    Ok(extract_labeled_value(&stdout, CENTROID_LABEL))
}

/// lambda 指数；输出中没有该值时为 None
pub fn lambda_index(tool: &dyn ComputeTool, fchk: &Path, state: u32) -> Result<Option<f64>> {
    let stdout = tool.run(&lambda_script(state), fchk)?;
    Ok(extract_labeled_value(&stdout, LAMBDA_LABEL))
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::sync::Mutex;

    /// 返回固定输出并记录收到的脚本
    pub struct FakeTool {
        pub stdout: String,
        pub calls: Mutex<Vec<(CommandScript, String)>>,
    }

    impl FakeTool {
        pub fn new(stdout: &str) -> Self {
            FakeTool {
                stdout: stdout.to_string(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl ComputeTool for FakeTool {
        fn run(&self, script: &CommandScript, input: &Path) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((script.clone(), input.display().to_string()));
            Ok(self.stdout.clone())
        }
    }
}
