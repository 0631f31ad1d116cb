//! # 终端表格
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `tabled` 渲染，`utils/output.rs` 打印标题

use crate::utils::output;

use tabled::{Table, Tabled};

/// 打印带标题的表格；无数据时不输出
pub fn print_table<T: Tabled>(title: &str, rows: &[T]) {
    if rows.is_empty() {
        return;
    }
    output::print_header(title);
    println!("{}", Table::new(rows));
}

/// 连续重复的值只保留第一个，用于按文件名分组显示
pub fn merge_repeated(values: &[String]) -> Vec<String> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            if i > 0 && values[i - 1] == *v {
                String::new()
            } else {
                v.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_repeated() {
        let names: Vec<String> = ["a.fchk", "a.fchk", "a.fchk", "b.fchk", "a.fchk"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            merge_repeated(&names),
            vec!["a.fchk", "", "", "b.fchk", "a.fchk"]
        );
    }
}
