//! # Gaussian 日志分段扫描器
//!
//! 对日志做一次前向扫描，识别各分段标记并发出类型化事件 (`Event`)。
//! 除两个固定窗口外不回看：末尾 5 行判断终止状态，前导窗口查找路由行 `root=N`。
//!
//! ## 识别的行
//! ```text
//!  #p td(root=2) b3lyp/6-31g(d) opt freq              -> RootDirective
//!  SCF Done:  E(RB3LYP) =  -1234.56789012     A.U.    -> EnergyLine(Scf)
//!  Excitation energies and oscillator strengths:       -> ExcitationSection
//!  Excited State   2:  Singlet-A  3.1025 eV  399.62 nm  f=0.8123
//!       45 -> 46         0.69012                        -> TransitionLine
//!  This state for optimization and/or second-order correction.
//!  Total Energy, E(TD-HF/TD-DFT) =  -1234.45678901      -> EnergyLine(Tddft)
//!  Total energy after correction   =  -1234.4601         -> EnergyLine(Corrected)
//!  Full mass-weighted force constant matrix:
//!  Low frequencies ---   -0.0012    0.0008    0.0010
//!  ******    1 imaginary frequencies (negative Signs) ******
//!  C     0.000000    1.402000    0.000000               -> GeometryAtomLine
//!  Normal termination of Gaussian 16
//! ```
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `parsers/source.rs`, `models/event.rs`
//! - 使用 `regex` 匹配

use super::source::{LogLine, LogSource};
use crate::config::{EnergyLabels, ScanSettings};
use crate::error::{GaulogError, Result};
use crate::models::{Atom, EnergyKind, Event, ExcitedStateHeader, Transition};

use regex::Regex;
use std::sync::LazyLock;

/// 终止窗口行数
pub const TERMINATION_WINDOW: usize = 5;

const NORMAL_TERMINATION: &str = "Normal termination";
const MASS_WEIGHTED_MARKER: &str = "Full mass-weighted force constant matrix";
const LOW_FREQUENCIES: &str = "Low frequencies ---";
const NEGATIVE_FREQ_BANNER: &str = "imaginary frequencies (negative Signs)";
const EXCITATION_SECTION: &str = "Excitation energies and oscillator strengths";

static ROOT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)root\s*=\s*(\d+)").expect("static regex must compile"));

static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)Excited State\s+(\d+)\s*:\s*(\S+(?:\s+[A-Za-z]\S*)?)\s+(-?\d+\.\d*)\s*eV\s+(-?\d+\.\d*)\s*nm\s+f\s*=\s*(-?\d+\.\d*)",
    )
    .expect("static regex must compile")
});

static TRANSITION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)[AB]?\s*->\s*(\d+)[AB]?\s+([-+]?\d*\.?\d+)\s*$")
        .expect("static regex must compile")
});

static OPT_FLAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)This state for optimization").expect("static regex must compile")
});

static ATOM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*([A-Z][a-z]?)\s+([-+]?\d+\.\d+)\s+([-+]?\d+\.\d+)\s+([-+]?\d+\.\d+)\s*$",
    )
    .expect("static regex must compile")
});

/// 扫描期间的最小上下文：是否有打开的激发块、是否仍在收集跃迁行
#[derive(Debug, Default)]
struct ScanCursor {
    block_open: bool,
    collecting: bool,
    root_found: bool,
}

/// 分段扫描器
///
/// 能量标签在构造时编译为正则，之后可在多个线程间共享。
#[derive(Debug, Clone)]
pub struct SectionScanner {
    energy_patterns: Vec<(EnergyKind, Regex)>,
    route_window: usize,
}

impl SectionScanner {
    pub fn new(labels: &EnergyLabels, scan: &ScanSettings) -> Result<Self> {
        let energy_patterns = [
            (EnergyKind::Scf, &labels.scf, "="),
            (EnergyKind::Tddft, &labels.tddft, "="),
            (EnergyKind::Corrected, &labels.corrected, "=?"),
        ]
        .into_iter()
        .map(|(kind, label, eq)| {
            let pattern = format!(
                r"{}[^=]*?{}\s*([-+]?\d+\.\d+(?:[DdEe][-+]?\d+)?)",
                regex::escape(label.trim()),
                eq
            );
            Regex::new(&pattern)
                .map(|re| (kind, re))
                .map_err(|e| GaulogError::ConfigError {
                    path: "labels".to_string(),
                    reason: e.to_string(),
                })
        })
        .collect::<Result<Vec<_>>>()?;

        Ok(SectionScanner {
            energy_patterns,
            route_window: scan.route_window,
        })
    }

    /// 扫描整个文件，返回按行序排列的事件，终止状态事件位于末尾
    pub fn scan(&self, source: &LogSource) -> Vec<Event> {
        let mut events = Vec::new();
        let mut cursor = ScanCursor::default();

        for line in source.lines() {
            self.scan_line(line, &mut cursor, &mut events);
        }

        events.push(termination_event(source.as_slice()));
        events
    }

    fn scan_line(&self, line: LogLine<'_>, cursor: &mut ScanCursor, events: &mut Vec<Event>) {
        let LogLine { index, text } = line;

        if !cursor.root_found && index < self.route_window && text.trim_start().starts_with('#')
        {
            if let Some(state_index) = ROOT_RE
                .captures(text)
                .and_then(|c| c[1].parse::<u32>().ok())
            {
                cursor.root_found = true;
                events.push(Event::RootDirective {
                    line_index: index,
                    state_index,
                });
                return;
            }
        }

        if let Some(header) = parse_header(text, index) {
            cursor.block_open = true;
            cursor.collecting = true;
            events.push(Event::ExcitedStateHeader(header));
            return;
        }

        if cursor.collecting {
            if let Some(transition) = parse_transition(text) {
                events.push(Event::TransitionLine {
                    line_index: index,
                    transition,
                });
                return;
            }
            // 非跃迁行结束收集，但块本身仍然打开
            cursor.collecting = false;
        }

        if cursor.block_open && OPT_FLAG_RE.is_match(text) {
            events.push(Event::OptimizationRootFlag { line_index: index });
            return;
        }

        if text.contains(EXCITATION_SECTION) {
            cursor.block_open = false;
            events.push(Event::ExcitationSection { line_index: index });
            return;
        }

        for (kind, re) in &self.energy_patterns {
            if let Some(value) = re.captures(text).and_then(|c| parse_fortran_float(&c[1])) {
                events.push(Event::EnergyLine {
                    line_index: index,
                    kind: *kind,
                    value,
                });
                return;
            }
        }

        if text.contains(MASS_WEIGHTED_MARKER) {
            events.push(Event::MassWeightedMarker { line_index: index });
            return;
        }

        if text.contains(LOW_FREQUENCIES) {
            if let Some(values) = parse_frequency_values(text) {
                events.push(Event::FrequencyLine {
                    line_index: index,
                    values,
                });
            }
            return;
        }

        if text.contains(NEGATIVE_FREQ_BANNER) {
            events.push(Event::NegativeFrequencyFlag { line_index: index });
            return;
        }

        if let Some(atom) = parse_atom(text) {
            events.push(Event::GeometryAtomLine {
                line_index: index,
                atom,
            });
        }
    }
}

/// 末尾窗口判断是否正常终止；诊断信息保留最后 5 个非空行所在窗口的原文
fn termination_event(lines: &[String]) -> Event {
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .map(|i| i + 1)
        .unwrap_or(0);
    let window = &lines[end.saturating_sub(TERMINATION_WINDOW)..end];
    let ok = window.iter().any(|l| l.contains(NORMAL_TERMINATION));

    Event::Termination {
        ok,
        tail: window.to_vec(),
    }
}

fn parse_header(text: &str, line_index: usize) -> Option<ExcitedStateHeader> {
    let caps = HEADER_RE.captures(text)?;
    Some(ExcitedStateHeader {
        state_index: caps[1].parse().ok()?,
        multiplicity: caps[2].to_string(),
        excitation_ev: caps[3].parse().ok()?,
        wavelength_nm: caps[4].parse().ok()?,
        oscillator_strength: caps[5].parse().ok()?,
        line_index,
    })
}

fn parse_transition(text: &str) -> Option<Transition> {
    let caps = TRANSITION_RE.captures(text)?;
    Some(Transition::new(
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    ))
}

/// 第 4 个 token 起全部解析为浮点数；尾部为空或任一 token 非法时不发出事件
fn parse_frequency_values(text: &str) -> Option<Vec<f64>> {
    let values = text
        .split_whitespace()
        .skip(3)
        .map(|t| t.parse::<f64>().ok())
        .collect::<Option<Vec<f64>>>()?;
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

fn parse_atom(text: &str) -> Option<Atom> {
    let caps = ATOM_RE.captures(text)?;
    Some(Atom::new(
        &caps[1],
        [
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
            caps[4].parse().ok()?,
        ],
    ))
}

/// 兼容 Fortran 风格指数 (`-0.1234D+04`)
fn parse_fortran_float(s: &str) -> Option<f64> {
    s.replace(['D', 'd'], "E").parse().ok()
}
