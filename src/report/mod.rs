//! # 报告输出模块
//!
//! 结果行统一派生 `tabled::Tabled`，同一行类型既用于终端表格也用于 CSV
//! 导出，列顺序由结构体字段顺序固定。
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 子模块: export (CSV), table (终端表格), plot (折线图)

pub mod export;
pub mod plot;
pub mod table;

pub use export::write_csv;
pub use plot::{line_plot, PlotSpec};
pub use table::{merge_repeated, print_table};

/// 可选值的单元格文本：缺失时为空
pub fn cell<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// 可选浮点数按固定小数位输出
pub fn cell_f64(value: Option<f64>, precision: usize) -> String {
    value
        .map(|v| format!("{:.*}", precision, v))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells() {
        assert_eq!(cell(Some(3)), "3");
        assert_eq!(cell::<u32>(None), "");
        assert_eq!(cell(Some(true)), "true");
        assert_eq!(cell_f64(Some(-113.66), 8), "-113.66000000");
        assert_eq!(cell_f64(None, 4), "");
    }
}
