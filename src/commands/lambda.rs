//! # lambda 命令实现
//!
//! 对每个 .fchk（需有同名 .log/.out）调用 Multiwfn 计算指定激发态的 lambda 指数。
//!
//! ## 依赖关系
//! - 使用 `cli/wfn.rs` 定义的参数
//! - 使用 `external/multiwfn.rs`, `report/`, `batch/runner.rs`

use super::{collect_inputs, report_failures, sibling_log};
use crate::batch::{BatchResult, BatchRunner, ProcessResult, FCHK_EXTENSIONS};
use crate::cli::wfn::LambdaArgs;
use crate::error::{GaulogError, Result};
use crate::external::{multiwfn, ComputeTool, ProcessTool};
use crate::parsers;
use crate::report::{self, PlotSpec};
use crate::utils::output;

use plotters::style::GREEN;
use std::path::Path;
use tabled::Tabled;

/// lambda 结果行
#[derive(Debug, Clone, PartialEq, Tabled)]
pub struct LambdaRow {
    #[tabled(rename = "Filename")]
    pub filename: String,
    #[tabled(rename = "State")]
    pub state: u32,
    #[tabled(rename = "Lambda")]
    pub lambda: String,
}

/// 执行 lambda 命令
pub fn execute(args: LambdaArgs) -> Result<()> {
    output::print_header("Lambda Index");

    if args.state == 0 {
        return Err(GaulogError::InvalidArgument(
            "--state must be at least 1".to_string(),
        ));
    }

    let files = collect_inputs(&args.input, FCHK_EXTENSIONS)?;
    let tool = ProcessTool::new(&args.multiwfn);
    output::print_info(&format!(
        "Calculating lambda for state {} with {}",
        args.state,
        args.multiwfn.display()
    ));

    let runner = BatchRunner::new(args.input.jobs);
    let outcomes = runner.map(&files, "Running Multiwfn", |fchk| {
        process_file(fchk, &tool, args.state)
    });

    let mut rows = Vec::new();
    let mut values = Vec::new();
    let mut result = BatchResult::default();
    for (fchk, outcome) in files.iter().zip(outcomes) {
        match outcome {
            Ok(value) => {
                result.merge(ProcessResult::Success(fchk.display().to_string()));
                values.push(value);
                rows.push(LambdaRow {
                    filename: parsers::file_name(fchk),
                    state: args.state,
                    lambda: format!("{:.6}", value),
                });
            }
            Err(reason) => result.merge(ProcessResult::Failed(fchk.display().to_string(), reason)),
        }
    }

    report::print_table(&format!("Lambda Index (State {})", args.state), &rows);

    report::write_csv(&rows, &args.output)?;
    output::print_success(&format!(
        "Wrote {} rows to '{}'",
        rows.len(),
        args.output.display()
    ));

    if let Some(ref plot_path) = args.plot {
        if values.is_empty() {
            output::print_warning("No lambda values to plot.");
        } else {
            let points: Vec<(f64, f64)> = values
                .iter()
                .enumerate()
                .map(|(i, v)| ((i + 1) as f64, *v))
                .collect();
            let title = format!("Lambda Index (State {}) vs Scan Step", args.state);
            let spec = PlotSpec {
                title: &title,
                x_desc: "Scan Step",
                y_desc: "Lambda Index",
                series: "Lambda",
                color: GREEN,
            };
            report::line_plot(&points, &spec, plot_path)?;
            output::print_success(&format!("Plot saved to '{}'", plot_path.display()));
        }
    }

    output::print_done(&format!(
        "Processed {} / {} files",
        result.success,
        result.total()
    ));
    report_failures(&result);

    Ok(())
}

fn process_file(fchk: &Path, tool: &dyn ComputeTool, state: u32) -> std::result::Result<f64, String> {
    if sibling_log(fchk).is_none() {
        return Err("No .log/.out file".to_string());
    }
    match multiwfn::lambda_index(tool, fchk, state) {
        Ok(Some(value)) => Ok(value),
        Ok(None) => Err("Value not found".to_string()),
        Err(e) => Err(e.to_string()),
    }
}
