//! # summary 命令实现
//!
//! 每个日志一行：步骤、终止状态、频率检查、能量类型与数值、激发态与振子强度。
//!
//! ## 功能
//! - 批量解析日志（文件级失败不中断）
//! - 终端表格与 CSV 输出
//! - 可选能量折线图
//!
//! ## 依赖关系
//! - 使用 `cli/summary.rs` 定义的参数
//! - 使用 `parsers/LogParser`, `batch/driver.rs`, `report/`
//! - 使用 `utils/output.rs`

use super::collect_inputs;
use crate::batch::{driver, BatchRunner, LOG_EXTENSIONS};
use crate::cli::summary::SummaryArgs;
use crate::config::GaulogConfig;
use crate::error::Result;
use crate::models::{Record, TerminationStatus};
use crate::parsers::{LogParser, RankingOptions};
use crate::report::{self, cell, cell_f64, PlotSpec};
use crate::utils::output;

use plotters::style::BLUE;
use tabled::Tabled;

/// 汇总结果行
#[derive(Debug, Clone, Tabled)]
pub struct SummaryRow {
    #[tabled(rename = "Step")]
    pub step: String,
    #[tabled(rename = "Filename")]
    pub filename: String,
    #[tabled(rename = "Termination")]
    pub termination: String,
    #[tabled(rename = "Freq_Status")]
    pub freq_status: String,
    #[tabled(rename = "Lowest_Freq_cm-1")]
    pub lowest_freq: String,
    #[tabled(rename = "Energy_Type")]
    pub energy_type: String,
    #[tabled(rename = "Root")]
    pub root: String,
    #[tabled(rename = "State")]
    pub state: String,
    #[tabled(rename = "Energy_Hartree")]
    pub energy: String,
    #[tabled(rename = "Oscillator_Strength")]
    pub oscillator_strength: String,
    #[tabled(rename = "Details")]
    pub details: String,
}

impl From<&Record> for SummaryRow {
    fn from(r: &Record) -> Self {
        SummaryRow {
            step: r.step_label.clone().unwrap_or_else(|| "Unknown".to_string()),
            filename: r.filename.clone(),
            termination: r.termination.to_string(),
            freq_status: r.frequency_status.to_string(),
            lowest_freq: cell_f64(r.lowest_frequency, 4),
            energy_type: r.energy_kind.to_string(),
            root: cell(r.declared_root),
            state: cell(r.resolved_excited_state()),
            energy: cell_f64(r.energy_value, 8),
            oscillator_strength: cell_f64(r.oscillator_strength(), 4),
            details: details(r),
        }
    }
}

/// 文件级错误优先，其次异常终止时的末尾几行
fn details(r: &Record) -> String {
    if let Some(ref e) = r.error {
        return e.clone();
    }
    match r.termination {
        TerminationStatus::Normal => String::new(),
        TerminationStatus::Error => r
            .termination_tail
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join(" | "),
    }
}

/// 执行 summary 命令
pub fn execute(args: SummaryArgs, config: &GaulogConfig) -> Result<()> {
    output::print_header("Gaussian Log Summary");

    let files = collect_inputs(&args.input, LOG_EXTENSIONS)?;
    let parser = LogParser::new(config, RankingOptions::default())?;
    let runner = BatchRunner::new(args.input.jobs);

    let records = driver::parse_logs(&parser, &files, &runner);
    let rows: Vec<SummaryRow> = records.iter().map(SummaryRow::from).collect();

    report::print_table("Results", &rows);

    report::write_csv(&rows, &args.output)?;
    output::print_success(&format!(
        "Wrote {} rows to '{}'",
        rows.len(),
        args.output.display()
    ));

    if let Some(ref plot_path) = args.plot {
        let points: Vec<(f64, f64)> = records
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.energy_value.map(|e| ((i + 1) as f64, e)))
            .collect();
        if points.is_empty() {
            output::print_warning("No energies to plot.");
        } else {
            let spec = PlotSpec {
                title: "Energy vs File Order",
                x_desc: "File",
                y_desc: "Energy (Hartree)",
                series: "Energy",
                color: BLUE,
            };
            report::line_plot(&points, &spec, plot_path)?;
            output::print_success(&format!("Plot saved to '{}'", plot_path.display()));
        }
    }

    summarize_status(&records);
    driver::log_diagnostics(&records);

    Ok(())
}

/// 打印异常终止 / 失败文件数量
pub(crate) fn summarize_status(records: &[Record]) {
    let failed = records.iter().filter(|r| r.error.is_some()).count();
    let abnormal = records
        .iter()
        .filter(|r| r.error.is_none() && r.termination == TerminationStatus::Error)
        .count();

    if failed > 0 {
        output::print_warning(&format!("{} files could not be read", failed));
    }
    if abnormal > 0 {
        output::print_warning(&format!("{} logs did not terminate normally", abnormal));
    }
    output::print_done(&format!("Processed {} files", records.len()));
}
