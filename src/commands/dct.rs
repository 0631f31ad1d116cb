//! # dct 命令实现
//!
//! 对每个 .fchk（需有同名 .log/.out）：取日志中最后一个激发态列表，
//! 对前 N 个激发态的主导轨道对调用 Multiwfn 计算电荷转移质心距离。
//!
//! ## 功能
//! - HOMO/LUMO 轨道特征标签（HOMO 来自 .fchk 的 α 电子数）
//! - 优化态标记为 Interest
//! - 终端表格按文件名分组
//! - 完整 CSV 与只含优化态的 `<stem>_opt_root.csv`
//!
//! ## 依赖关系
//! - 使用 `cli/wfn.rs` 定义的参数
//! - 使用 `parsers/LogParser`, `parsers/fchk.rs`
//! - 使用 `external/multiwfn.rs`, `report/`, `batch/runner.rs`

use super::{collect_inputs, report_failures, sibling_log};
use crate::batch::{BatchResult, BatchRunner, ProcessResult, FCHK_EXTENSIONS};
use crate::cli::wfn::DctArgs;
use crate::config::GaulogConfig;
use crate::error::Result;
use crate::external::{multiwfn, ComputeTool, ProcessTool};
use crate::parsers::{self, fchk, LogParser, RankingOptions};
use crate::report::{self, cell_f64, merge_repeated};
use crate::utils::output;

use std::path::{Path, PathBuf};
use tabled::Tabled;

/// 单个激发态的结果行
#[derive(Debug, Clone, PartialEq, Tabled)]
pub struct DctRow {
    #[tabled(rename = "Filename")]
    pub filename: String,
    #[tabled(rename = "State")]
    pub state: u32,
    #[tabled(rename = "Interest")]
    pub interest: String,
    #[tabled(rename = "f-value")]
    pub f_value: String,
    #[tabled(rename = "Orbitals")]
    pub orbitals: String,
    #[tabled(rename = "Character")]
    pub character: String,
    #[tabled(rename = "dCT (Ang)")]
    pub dct: String,
}

impl DctRow {
    fn is_interest(&self) -> bool {
        !self.interest.is_empty()
    }
}

/// 单个文件的处理结果：行与（可选的）问题说明
type FileOutcome = std::result::Result<(Vec<DctRow>, Vec<String>), String>;

/// 执行 dct 命令
pub fn execute(args: DctArgs, config: &GaulogConfig) -> Result<()> {
    output::print_header("Charge-Transfer Distance (dCT)");

    let files = collect_inputs(&args.input, FCHK_EXTENSIONS)?;
    let parser = LogParser::new(config, RankingOptions::default())?;
    let tool = ProcessTool::new(&args.multiwfn);
    output::print_info(&format!("Using Multiwfn: {}", args.multiwfn.display()));

    let runner = BatchRunner::new(args.input.jobs);
    let outcomes = runner.map(&files, "Running Multiwfn", |fchk| {
        process_file(fchk, &parser, &tool, args.states)
    });

    let mut rows = Vec::new();
    let mut result = BatchResult::default();
    for (fchk, outcome) in files.iter().zip(outcomes) {
        match outcome {
            Ok((file_rows, problems)) => {
                for problem in problems {
                    output::print_warning(&format!("{}: {}", fchk.display(), problem));
                }
                result.merge(ProcessResult::Success(fchk.display().to_string()));
                rows.extend(file_rows);
            }
            Err(reason) => result.merge(ProcessResult::Failed(fchk.display().to_string(), reason)),
        }
    }

    report::print_table("Final Excited States", &display_rows(&rows));

    let interest: Vec<DctRow> = rows.iter().filter(|r| r.is_interest()).cloned().collect();
    let summary_path = opt_root_path(&args.output);

    report::write_csv(&rows, &args.output)?;
    report::write_csv(&interest, &summary_path)?;
    output::print_success(&format!(
        "Wrote {} rows to '{}' and {} optimized-state rows to '{}'",
        rows.len(),
        args.output.display(),
        interest.len(),
        summary_path.display()
    ));

    output::print_done(&format!(
        "Processed {} / {} files",
        result.success,
        result.total()
    ));
    report_failures(&result);

    Ok(())
}

/// 终端显示：文件名按组合并，优化态以 `*` 标记
fn display_rows(rows: &[DctRow]) -> Vec<DctRow> {
    let names: Vec<String> = rows.iter().map(|r| r.filename.clone()).collect();
    rows.iter()
        .zip(merge_repeated(&names))
        .map(|(row, name)| DctRow {
            filename: name,
            interest: if row.is_interest() {
                "* YES".to_string()
            } else {
                String::new()
            },
            ..row.clone()
        })
        .collect()
}

/// `results.csv` -> `results_opt_root.csv`
fn opt_root_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "results".to_string());
    output.with_file_name(format!("{}_opt_root.csv", stem))
}

fn process_file(
    fchk_path: &Path,
    parser: &LogParser,
    tool: &dyn ComputeTool,
    max_states: u32,
) -> FileOutcome {
    let log_path = sibling_log(fchk_path).ok_or_else(|| "No .log/.out file".to_string())?;

    let homo = fchk::read_homo_index(fchk_path)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "No 'Number of alpha electrons' in .fchk".to_string())?;

    let record = parser.parse_file(&log_path).map_err(|e| e.to_string())?;
    if record.final_states.is_empty() {
        return Err("No excited states in log".to_string());
    }

    let filename = parsers::file_name(fchk_path);
    let mut rows = Vec::new();
    let mut problems = Vec::new();

    for state in record
        .final_states
        .iter()
        .filter(|s| s.state_index() <= max_states)
    {
        let Some(pair) = state.dominant_transition() else {
            continue;
        };
        let (from, to) = (pair.from_orbital, pair.to_orbital);

        let dct = match multiwfn::centroid_distance(tool, fchk_path, from, to) {
            Ok(Some(v)) => Some(v),
            Ok(None) => {
                problems.push(format!("state {}: no centroid distance in output", state.state_index()));
                None
            }
            Err(e) => {
                problems.push(format!("state {}: {}", state.state_index(), e));
                None
            }
        };

        rows.push(DctRow {
            filename: filename.clone(),
            state: state.state_index(),
            interest: if state.flagged { "YES".to_string() } else { String::new() },
            f_value: format!("{:.4}", state.header.oscillator_strength),
            orbitals: format!("{},{}", from, to),
            character: format!(
                "{}->{}",
                fchk::orbital_label(from, homo),
                fchk::orbital_label(to, homo)
            ),
            dct: cell_f64(dct, 4),
        });
    }

    Ok((rows, problems))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::multiwfn::fake::FakeTool;
    use std::fs;
    use tempfile::TempDir;

    const LOG: &str = r#" Excitation energies and oscillator strengths:

 Excited State   1:      Singlet-A      3.0000 eV  413.28 nm  f=0.1000  <S**2>=0.000
      44 -> 46         0.20000
      45 -> 46         0.65000

 Excitation energies and oscillator strengths:

 Excited State   1:      Singlet-A      2.9000 eV  427.53 nm  f=0.1100  <S**2>=0.000
      45 -> 46         0.66000
 This state for optimization and/or second-order correction.

 Excited State   2:      Singlet-A      3.5000 eV  354.24 nm  f=0.0200  <S**2>=0.000
      44 -> 46         0.60000
      45 -> 47         0.30000

 Excited State   3:      Singlet-A      3.9000 eV  317.91 nm  f=0.0010  <S**2>=0.000

 Excited State   4:      Singlet-A      4.2000 eV  295.20 nm  f=0.3000  <S**2>=0.000
      45 -> 48         0.70000
 Normal termination of Gaussian 16
"#;

    fn setup() -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let fchk_path = tmp.path().join("mol.fchk");
        fs::write(
            &fchk_path,
            "mol\nNumber of alpha electrons                  I               45\n",
        )
        .unwrap();
        fs::write(tmp.path().join("mol.log"), LOG).unwrap();
        (tmp, fchk_path)
    }

    fn parser() -> LogParser {
        LogParser::new(&GaulogConfig::default(), RankingOptions::default()).unwrap()
    }

    #[test]
    fn test_rows_from_final_section() {
        let (_tmp, fchk_path) = setup();
        let tool = FakeTool::new(" Centroid distance between C+ and C-:   1.2345 Angstrom\n");

        let (rows, problems) = process_file(&fchk_path, &parser(), &tool, 3).unwrap();
        assert!(problems.is_empty());

        // state 3 没有跃迁行，state 4 超出范围
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            DctRow {
                filename: "mol.fchk".to_string(),
                state: 1,
                interest: "YES".to_string(),
                f_value: "0.1100".to_string(),
                orbitals: "45,46".to_string(),
                character: "HOMO->LUMO".to_string(),
                dct: "1.2345".to_string(),
            }
        );
        assert_eq!(rows[1].orbitals, "44,46");
        assert_eq!(rows[1].character, "H-1->LUMO");
        assert_eq!(rows[1].interest, "");

        let calls = tool.calls.lock().unwrap();
        assert_eq!(calls[1].0, multiwfn::dct_script(44, 46));
    }

    #[test]
    fn test_missing_value_keeps_row() {
        let (_tmp, fchk_path) = setup();
        let tool = FakeTool::new("nothing useful\n");
        let (rows, problems) = process_file(&fchk_path, &parser(), &tool, 1).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].dct, "");
        assert_eq!(problems.len(), 1);
    }

    #[test]
    fn test_missing_log_is_failure() {
        let tmp = TempDir::new().unwrap();
        let fchk_path = tmp.path().join("lonely.fchk");
        fs::write(&fchk_path, "Number of alpha electrons  I  10\n").unwrap();
        let tool = FakeTool::new("");
        assert_eq!(
            process_file(&fchk_path, &parser(), &tool, 3),
            Err("No .log/.out file".to_string())
        );
    }

    #[test]
    fn test_display_rows_grouped() {
        let row = |name: &str, state: u32, interest: &str| DctRow {
            filename: name.to_string(),
            state,
            interest: interest.to_string(),
            f_value: String::new(),
            orbitals: String::new(),
            character: String::new(),
            dct: String::new(),
        };
        let shown = display_rows(&[row("a", 1, ""), row("a", 2, "YES"), row("b", 1, "")]);
        let names: Vec<&str> = shown.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(names, vec!["a", "", "b"]);
        assert_eq!(shown[1].interest, "* YES");
    }

    #[test]
    fn test_opt_root_path() {
        assert_eq!(
            opt_root_path(Path::new("out/results_dct.csv")),
            PathBuf::from("out/results_dct_opt_root.csv")
        );
    }
}
