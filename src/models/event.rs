//! # 扫描事件模型
//!
//! `SectionScanner` 对日志做单次前向扫描时发出的类型化事件。
//! 事件顺序与行顺序一致（`line_index` 单调递增），终止状态事件总是最后一个。
//!
//! ## 依赖关系
//! - 由 `parsers/scanner.rs` 产生
//! - 由 `parsers/accumulator.rs` 消费

use super::molecule::Atom;
use serde::{Deserialize, Serialize};

/// 能量类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyKind {
    /// SCF 基态总能量 ("SCF Done:")
    Scf,
    /// TD-DFT 激发态总能量 ("Total Energy, E(TD-HF/TD-DFT)")
    Tddft,
    /// cLR 溶剂化校正后的总能量 ("Total energy after correction")
    Corrected,
}

impl std::fmt::Display for EnergyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnergyKind::Scf => write!(f, "SCF Done"),
            EnergyKind::Tddft => write!(f, "TD-DFT Total"),
            EnergyKind::Corrected => write!(f, "cLR Corrected"),
        }
    }
}

/// 激发态标题行
///
/// ```text
///  Excited State   2:      Singlet-A      3.1025 eV  399.62 nm  f=0.8123  <S**2>=0.000
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcitedStateHeader {
    pub state_index: u32,
    /// 自旋多重度/对称性标签，如 `Singlet-A`
    pub multiplicity: String,
    pub excitation_ev: f64,
    pub wavelength_nm: f64,
    pub oscillator_strength: f64,
    pub line_index: usize,
}

/// 单个轨道跃迁 `from -> to  coefficient`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub from_orbital: u32,
    pub to_orbital: u32,
    pub coefficient: f64,
}

impl Transition {
    pub fn new(from_orbital: u32, to_orbital: u32, coefficient: f64) -> Self {
        Transition {
            from_orbital,
            to_orbital,
            coefficient,
        }
    }

    /// 轨道编号差 (to - from)
    pub fn delta(&self) -> i64 {
        self.to_orbital as i64 - self.from_orbital as i64
    }

    /// 是否为相邻轨道跃迁 (|Δ| = 1)
    pub fn is_adjacent(&self) -> bool {
        self.delta().abs() == 1
    }
}

/// 扫描事件
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// 末尾窗口推断的终止状态；`tail` 为文件最后 5 行原文
    Termination { ok: bool, tail: Vec<String> },

    /// "Full mass-weighted force constant matrix:"
    MassWeightedMarker { line_index: usize },

    /// "Low frequencies ---" 行，第 4 个 token 起的数值
    FrequencyLine { line_index: usize, values: Vec<f64> },

    /// "imaginary frequencies (negative Signs)"
    NegativeFrequencyFlag { line_index: usize },

    EnergyLine {
        line_index: usize,
        kind: EnergyKind,
        value: f64,
    },

    /// "Excitation energies and oscillator strengths:"，每个优化步的新激发态列表
    ExcitationSection { line_index: usize },

    ExcitedStateHeader(ExcitedStateHeader),

    TransitionLine {
        line_index: usize,
        transition: Transition,
    },

    /// "This state for optimization and/or second-order correction."
    OptimizationRootFlag { line_index: usize },

    /// 路由行中的 `root=N`
    RootDirective { line_index: usize, state_index: u32 },

    GeometryAtomLine { line_index: usize, atom: Atom },
}

impl Event {
    /// 事件所在行号；终止状态事件没有行号
    pub fn line_index(&self) -> Option<usize> {
        match self {
            Event::Termination { .. } => None,
            Event::MassWeightedMarker { line_index }
            | Event::FrequencyLine { line_index, .. }
            | Event::NegativeFrequencyFlag { line_index }
            | Event::EnergyLine { line_index, .. }
            | Event::ExcitationSection { line_index }
            | Event::TransitionLine { line_index, .. }
            | Event::OptimizationRootFlag { line_index }
            | Event::RootDirective { line_index, .. }
            | Event::GeometryAtomLine { line_index, .. } => Some(*line_index),
            Event::ExcitedStateHeader(header) => Some(header.line_index),
        }
    }
}
