//! # 美化输出工具
//!
//! 提供统一的终端状态行样式：`[OK]`, `[WARN]`, `[ERR]`, `[*]`, `[SKIP]`, `[DONE]`。
//! 错误写到标准错误，其余写到标准输出。
//!
//! ## 依赖关系
//! - 被 `commands/`, `report/` 与 `main.rs` 使用
//! - 使用 `colored` crate

use colored::{ColoredString, Colorize};

/// 状态行标签
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Ok,
    Warn,
    Err,
    Info,
    Skip,
    Done,
}

impl Tag {
    fn label(self) -> ColoredString {
        match self {
            Tag::Ok => "[OK]".green().bold(),
            Tag::Warn => "[WARN]".yellow().bold(),
            Tag::Err => "[ERR]".red().bold(),
            Tag::Info => "[*]".blue().bold(),
            Tag::Skip => "[SKIP]".dimmed(),
            Tag::Done => "[DONE]".green().bold(),
        }
    }
}

fn line(tag: Tag, msg: &str) -> String {
    format!("{} {}", tag.label(), msg)
}

fn emit(tag: Tag, msg: &str) {
    match tag {
        Tag::Err => eprintln!("{}", line(tag, msg)),
        _ => println!("{}", line(tag, msg)),
    }
}

pub fn print_success(msg: &str) {
    emit(Tag::Ok, msg);
}

pub fn print_error(msg: &str) {
    emit(Tag::Err, msg);
}

pub fn print_warning(msg: &str) {
    emit(Tag::Warn, msg);
}

pub fn print_info(msg: &str) {
    emit(Tag::Info, msg);
}

pub fn print_skip(msg: &str) {
    emit(Tag::Skip, msg);
}

pub fn print_done(msg: &str) {
    emit(Tag::Done, msg);
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let rule = "─".repeat(60);
    println!("\n{}", rule.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", rule.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", "─".repeat(60).dimmed());
}

/// 打印前几个文件名作为示例
pub fn print_examples(names: &[String]) {
    if names.is_empty() {
        return;
    }
    println!("    {} {}", "e.g.".dimmed(), names.join(", "));
}
