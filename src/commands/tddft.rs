//! # tddft 命令实现
//!
//! 报告每个日志最终优化的激发态：路由行 root、优化态、是否一致、TD-DFT 总能量、
//! 激发能、波长、振子强度与主要跃迁。
//!
//! ## 依赖关系
//! - 使用 `cli/tddft.rs` 定义的参数
//! - 使用 `parsers/LogParser`, `batch/driver.rs`, `report/`
//! - 使用 `utils/output.rs`

use super::collect_inputs;
use super::summary::summarize_status;
use crate::batch::{driver, BatchRunner, LOG_EXTENSIONS};
use crate::cli::tddft::TddftArgs;
use crate::config::GaulogConfig;
use crate::error::{GaulogError, Result};
use crate::models::Record;
use crate::parsers::{LogParser, RankingOptions};
use crate::report::{self, cell};
use crate::utils::output;

use tabled::Tabled;

/// TD-DFT 结果行
#[derive(Debug, Clone, Tabled)]
pub struct TddftRow {
    #[tabled(rename = "file")]
    pub file: String,
    #[tabled(rename = "Root_in_route")]
    pub root_in_route: String,
    #[tabled(rename = "optimized_state_final")]
    pub optimized_state: String,
    #[tabled(rename = "root_matches_final")]
    pub root_matches: String,
    #[tabled(rename = "TD_total_energy_Ha_final")]
    pub td_energy: String,
    #[tabled(rename = "excitation_eV_final")]
    pub excitation_ev: String,
    #[tabled(rename = "wavelength_nm_final")]
    pub wavelength_nm: String,
    #[tabled(rename = "f_osc_final")]
    pub f_osc: String,
    #[tabled(rename = "num_transitions_final")]
    pub num_transitions: usize,
    #[tabled(rename = "adjacent_present")]
    pub adjacent_present: String,
    #[tabled(rename = "adjacent_dominant")]
    pub adjacent_dominant: String,
    #[tabled(rename = "dominant_transitions")]
    pub dominant_transitions: String,
    #[tabled(rename = "error")]
    pub error: String,
}

impl From<&Record> for TddftRow {
    fn from(r: &Record) -> Self {
        let state = r.resolved_state.as_ref();
        TddftRow {
            file: r.filename.clone(),
            root_in_route: cell(r.declared_root),
            optimized_state: cell(r.resolved_excited_state()),
            root_matches: cell(r.root_matches()),
            td_energy: cell(state.and_then(|s| s.total_energy)),
            excitation_ev: cell(state.map(|s| s.header.excitation_ev)),
            wavelength_nm: cell(state.map(|s| s.header.wavelength_nm)),
            f_osc: cell(state.map(|s| s.header.oscillator_strength)),
            num_transitions: r.transition_count(),
            adjacent_present: cell(r.adjacent_present),
            adjacent_dominant: cell(r.adjacent_dominant),
            dominant_transitions: r
                .dominant_transitions
                .iter()
                .map(|t| t.label())
                .collect::<Vec<_>>()
                .join("; "),
            error: r.error.clone().unwrap_or_default(),
        }
    }
}

/// 终端显示用的精简行
#[derive(Debug, Clone, Tabled)]
struct TddftView {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Root")]
    root: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Match")]
    matches: String,
    #[tabled(rename = "E_TD (Ha)")]
    td_energy: String,
    #[tabled(rename = "f")]
    f_osc: String,
    #[tabled(rename = "Top transition")]
    top: String,
}

impl From<&TddftRow> for TddftView {
    fn from(row: &TddftRow) -> Self {
        TddftView {
            file: row.file.clone(),
            root: row.root_in_route.clone(),
            state: row.optimized_state.clone(),
            matches: row.root_matches.clone(),
            td_energy: row.td_energy.clone(),
            f_osc: row.f_osc.clone(),
            top: row
                .dominant_transitions
                .split("; ")
                .next()
                .unwrap_or_default()
                .to_string(),
        }
    }
}

fn ranking_options(args: &TddftArgs) -> Result<RankingOptions> {
    if !args.threshold.is_finite() || args.threshold < 0.0 {
        return Err(GaulogError::InvalidArgument(format!(
            "--threshold must be a non-negative number, got {}",
            args.threshold
        )));
    }
    Ok(RankingOptions {
        threshold: args.threshold,
        top_k: args.top,
    })
}

/// 执行 tddft 命令
pub fn execute(args: TddftArgs, config: &GaulogConfig) -> Result<()> {
    output::print_header("TD-DFT Optimized State Report");

    let ranking = ranking_options(&args)?;
    let files = collect_inputs(&args.input, LOG_EXTENSIONS)?;
    let parser = LogParser::new(config, ranking)?;
    let runner = BatchRunner::new(args.input.jobs);

    let records = driver::parse_logs(&parser, &files, &runner);
    let rows: Vec<TddftRow> = records.iter().map(TddftRow::from).collect();

    let view: Vec<TddftView> = rows.iter().map(TddftView::from).collect();
    report::print_table("Optimized Excited States", &view);

    report::write_csv(&rows, &args.output)?;
    output::print_success(&format!(
        "Wrote {} rows to '{}'",
        rows.len(),
        args.output.display()
    ));

    let mismatched = records
        .iter()
        .filter(|r| r.root_matches() == Some(false))
        .count();
    if mismatched > 0 {
        output::print_warning(&format!(
            "{} files optimized a different state than the route root",
            mismatched
        ));
    }

    summarize_status(&records);
    driver::log_diagnostics(&records);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::LogSource;

    const LOG: &str = r#" #p td(nstates=3,root=1) opt
 Excitation energies and oscillator strengths:

 Excited State   1:      Singlet-A      3.1025 eV  399.62 nm  f=0.8123  <S**2>=0.000
      45 -> 46         0.69012
      44 -> 46        -0.10234
 This state for optimization and/or second-order correction.
 Total Energy, E(TD-HF/TD-DFT) =  -1234.45678901
 Normal termination of Gaussian 16
"#;

    #[test]
    fn test_row_columns() {
        let parser = LogParser::new(&GaulogConfig::default(), RankingOptions::default()).unwrap();
        let record = parser.parse_source("04_td.log", &LogSource::from_text(LOG));
        let row = TddftRow::from(&record);

        assert_eq!(row.root_in_route, "1");
        assert_eq!(row.optimized_state, "1");
        assert_eq!(row.root_matches, "true");
        assert_eq!(row.td_energy, "-1234.45678901");
        assert_eq!(row.excitation_ev, "3.1025");
        assert_eq!(row.wavelength_nm, "399.62");
        assert_eq!(row.f_osc, "0.8123");
        assert_eq!(row.num_transitions, 2);
        assert_eq!(row.adjacent_present, "true");
        assert_eq!(row.adjacent_dominant, "true");
        assert_eq!(
            row.dominant_transitions,
            "45->46 (Δ=1, coeff=0.69012, adjacent, significant); 44->46 (Δ=2, coeff=-0.10234)"
        );
        assert_eq!(row.error, "");

        let view = TddftView::from(&row);
        assert_eq!(view.top, "45->46 (Δ=1, coeff=0.69012, adjacent, significant)");
    }

    #[test]
    fn test_row_without_excited_state() {
        let row = TddftRow::from(&Record::failed("gone.log", "Failed to read file"));
        assert_eq!(row.optimized_state, "");
        assert_eq!(row.root_matches, "");
        assert_eq!(row.num_transitions, 0);
        assert_eq!(row.error, "Failed to read file");
    }

    #[test]
    fn test_root_without_resolved_state_leaves_match_empty() {
        let parser = LogParser::new(&GaulogConfig::default(), RankingOptions::default()).unwrap();
        let record = parser.parse_source(
            "05_gs.log",
            &LogSource::from_text(" #p td(root=2)\n SCF Done:  E(RB3LYP) =  -1.0\n"),
        );
        let row = TddftRow::from(&record);

        assert_eq!(row.root_in_route, "2");
        assert_eq!(row.optimized_state, "");
        assert_eq!(row.root_matches, "");
        assert_eq!(record.root_matches(), None);
    }
}
