//! # 外部计算工具
//!
//! 外部程序（Multiwfn）被视为黑盒：给定有序命令脚本与输入文件，返回标准输出文本。
//! 核心只按标签查找一个数值，未找到时结果为空而不是错误。
//!
//! ## 依赖关系
//! - 被 `commands/dct.rs`, `commands/lambda.rs` 调用
//! - 子模块: multiwfn (命令脚本与结果标签)

pub mod multiwfn;

use crate::error::{GaulogError, Result};

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// 逐行写入外部程序标准输入的命令脚本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandScript(pub Vec<String>);

impl CommandScript {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandScript(lines.into_iter().map(Into::into).collect())
    }

    /// 以换行连接，末尾补一个换行
    pub fn to_stdin(&self) -> String {
        let mut text = self.0.join("\n");
        text.push('\n');
        text
    }
}

/// 外部计算工具接口
pub trait ComputeTool: Sync {
    /// 对输入文件执行脚本，返回标准输出
    fn run(&self, script: &CommandScript, input: &Path) -> Result<String>;
}

/// 以子进程方式运行的外部程序
#[derive(Debug, Clone)]
pub struct ProcessTool {
    program: PathBuf,
}

impl ProcessTool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn name(&self) -> String {
        self.program.display().to_string()
    }
}

impl ComputeTool for ProcessTool {
    /// 在输入文件所在目录运行，以便程序找到同名的 .log/.out
    fn run(&self, script: &CommandScript, input: &Path) -> Result<String> {
        let mut cmd = Command::new(&self.program);
        match (input.parent(), input.file_name()) {
            (Some(dir), Some(name)) if !dir.as_os_str().is_empty() => {
                cmd.current_dir(dir).arg(name);
            }
            _ => {
                cmd.arg(input);
            }
        }

        let mut child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => GaulogError::CommandNotFound {
                    command: self.name(),
                },
                _ => GaulogError::CommandFailed {
                    command: self.name(),
                    stderr: e.to_string(),
                },
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // 程序可能在读完脚本前退出
            if let Err(e) = stdin.write_all(script.to_stdin().as_bytes()) {
                log::debug!("{}: stdin closed early: {}", self.name(), e);
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| GaulogError::CommandFailed {
                command: self.name(),
                stderr: e.to_string(),
            })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            Err(GaulogError::CommandFailed {
                command: format!("{} {}", self.name(), input.display()),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            })
        }
    }
}

/// 在第一行包含 `label` 的输出中取数值：
/// 标签之后最后一个 `:` 或 `=` 之后的第一个 token
pub fn extract_labeled_value(text: &str, label: &str) -> Option<f64> {
    let line = text.lines().find(|l| l.contains(label))?;
    let start = line.find(label)? + label.len();
    let rest = &line[start..];
    let value = match rest.rfind([':', '=']) {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };
    value
        .split_whitespace()
        .next()
        .and_then(|t| t.parse::<f64>().ok())
}
