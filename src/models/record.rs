//! # 单文件解析结果模型
//!
//! 每个输入日志对应一条 `Record`，构建后不可变，交给报告层输出。
//!
//! ## 依赖关系
//! - 由 `parsers/builder.rs` 构建
//! - 被 `commands/` 与 `report/` 使用

use super::event::{EnergyKind, ExcitedStateHeader, Transition};
use super::molecule::Atom;
use serde::{Deserialize, Serialize};

/// 作业终止状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationStatus {
    Normal,
    Error,
}

impl std::fmt::Display for TerminationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationStatus::Normal => write!(f, "Normal"),
            TerminationStatus::Error => write!(f, "Error"),
        }
    }
}

/// 频率检查结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrequencyStatus {
    Ok,
    NegativeFrequency,
    Incomplete,
    NoFrequencyCalc,
}

impl std::fmt::Display for FrequencyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrequencyStatus::Ok => write!(f, "OK"),
            FrequencyStatus::NegativeFrequency => write!(f, "NEGATIVE FREQ"),
            FrequencyStatus::Incomplete => write!(f, "Incomplete data"),
            FrequencyStatus::NoFrequencyCalc => write!(f, "No Freq Calc"),
        }
    }
}

/// 最终选用的能量来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyChoice {
    /// 步骤映射要求的类型且已找到
    Expected(EnergyKind),
    TddftFallback,
    ScfFallback,
    None,
}

impl std::fmt::Display for EnergyChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnergyChoice::Expected(kind) => write!(f, "{}", kind),
            EnergyChoice::TddftFallback => write!(f, "TD-DFT (Fallback)"),
            EnergyChoice::ScfFallback => write!(f, "SCF (Fallback)"),
            EnergyChoice::None => write!(f, "None"),
        }
    }
}

/// 一个已关闭的激发块：标题行 + 其跃迁 + 块内打印的 TD-DFT 总能量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcitedState {
    pub header: ExcitedStateHeader,
    pub transitions: Vec<Transition>,
    pub total_energy: Option<f64>,
    /// 块内出现过 "This state for optimization"
    pub flagged: bool,
}

impl ExcitedState {
    pub fn new(header: ExcitedStateHeader) -> Self {
        ExcitedState {
            header,
            transitions: Vec::new(),
            total_energy: None,
            flagged: false,
        }
    }

    pub fn state_index(&self) -> u32 {
        self.header.state_index
    }

    /// |系数| 最大的跃迁（并列时取先出现者）
    pub fn dominant_transition(&self) -> Option<&Transition> {
        self.transitions.iter().fold(None, |best, t| match best {
            Some(b) if b.coefficient.abs() >= t.coefficient.abs() => Some(b),
            _ => Some(t),
        })
    }
}

/// 排序后的主要跃迁
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedTransition {
    pub transition: Transition,
    pub adjacent: bool,
    pub significant: bool,
}

impl RankedTransition {
    /// `5->6 (Δ=1, coeff=0.55000, adjacent, significant)`
    pub fn label(&self) -> String {
        let t = &self.transition;
        let mut tags = Vec::new();
        if self.adjacent {
            tags.push("adjacent");
        }
        if self.significant {
            tags.push("significant");
        }
        let tag_str = if tags.is_empty() {
            String::new()
        } else {
            format!(", {}", tags.join(", "))
        };
        format!(
            "{}->{} (Δ={}, coeff={:.5}{})",
            t.from_orbital,
            t.to_orbital,
            t.delta(),
            t.coefficient,
            tag_str
        )
    }
}

/// 单个日志文件的规范化结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// 文件名（不含目录）
    pub filename: String,

    /// 文件名开头的数字串，如 `05_opt.log` -> `05`
    pub step_label: Option<String>,

    pub termination: TerminationStatus,

    /// 终止异常时保留的最后几行
    pub termination_tail: Vec<String>,

    pub frequency_status: FrequencyStatus,

    /// 所有 "Low frequencies" 行中的最小值 (cm⁻¹)
    pub lowest_frequency: Option<f64>,

    pub energy_kind: EnergyChoice,

    /// 能量 (Hartree)
    pub energy_value: Option<f64>,

    /// 路由行声明的 root
    pub declared_root: Option<u32>,

    /// 步骤映射为基态 (SCF) 时不报告激发态
    pub ground_state: bool,

    pub resolved_state: Option<ExcitedState>,

    pub dominant_transitions: Vec<RankedTransition>,

    pub adjacent_present: Option<bool>,

    pub adjacent_dominant: Option<bool>,

    /// 最后一个激发态列表中的全部激发态
    pub final_states: Vec<ExcitedState>,

    pub final_geometry: Vec<Atom>,

    /// 文件级失败原因
    pub error: Option<String>,
}

impl Record {
    /// 文件无法处理时的占位记录
    pub fn failed(filename: impl Into<String>, reason: impl Into<String>) -> Self {
        Record {
            filename: filename.into(),
            step_label: None,
            termination: TerminationStatus::Error,
            termination_tail: Vec::new(),
            frequency_status: FrequencyStatus::NoFrequencyCalc,
            lowest_frequency: None,
            energy_kind: EnergyChoice::None,
            energy_value: None,
            declared_root: None,
            ground_state: false,
            resolved_state: None,
            dominant_transitions: Vec::new(),
            adjacent_present: None,
            adjacent_dominant: None,
            final_states: Vec::new(),
            final_geometry: Vec::new(),
            error: Some(reason.into()),
        }
    }

    pub fn resolved_excited_state(&self) -> Option<u32> {
        self.resolved_state.as_ref().map(|s| s.state_index())
    }

    pub fn oscillator_strength(&self) -> Option<f64> {
        self.resolved_state
            .as_ref()
            .map(|s| s.header.oscillator_strength)
    }

    /// 路由行 root 与最终选定激发态是否一致（任一缺失时为 None）
    pub fn root_matches(&self) -> Option<bool> {
        match (self.declared_root, self.resolved_excited_state()) {
            (Some(root), Some(state)) => Some(root == state),
            _ => None,
        }
    }

    pub fn transition_count(&self) -> usize {
        self.resolved_state
            .as_ref()
            .map(|s| s.transitions.len())
            .unwrap_or(0)
    }

    /// `--debug` 模式下每个文件一行的诊断信息
    pub fn diagnostic_line(&self) -> String {
        fn opt<T: std::fmt::Display>(v: Option<T>) -> String {
            v.map(|x| x.to_string()).unwrap_or_else(|| "None".to_string())
        }
        let mut line = format!(
            "[{}] Root={}  State={}  Match={}  Energy={} ({})  Freq={}  Term={}",
            self.filename,
            opt(self.declared_root),
            opt(self.resolved_excited_state()),
            opt(self.root_matches()),
            opt(self.energy_value),
            self.energy_kind,
            self.frequency_status,
            self.termination,
        );
        if let Some(ref e) = self.error {
            line.push_str(&format!("  Error={}", e));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(idx: u32) -> ExcitedStateHeader {
        ExcitedStateHeader {
            state_index: idx,
            multiplicity: "Singlet-A".to_string(),
            excitation_ev: 3.0,
            wavelength_nm: 413.0,
            oscillator_strength: 0.5,
            line_index: 0,
        }
    }

    #[test]
    fn test_dominant_transition_uses_absolute_value() {
        let mut state = ExcitedState::new(header(1));
        state.transitions = vec![
            Transition::new(10, 11, 0.3),
            Transition::new(9, 11, -0.6),
            Transition::new(10, 12, 0.6),
        ];
        let best = state.dominant_transition().unwrap();
        assert_eq!((best.from_orbital, best.to_orbital), (9, 11));
    }

    #[test]
    fn test_ranked_label() {
        let ranked = RankedTransition {
            transition: Transition::new(5, 6, 0.55),
            adjacent: true,
            significant: true,
        };
        assert_eq!(
            ranked.label(),
            "5->6 (Δ=1, coeff=0.55000, adjacent, significant)"
        );

        let plain = RankedTransition {
            transition: Transition::new(6, 8, -0.12),
            adjacent: false,
            significant: false,
        };
        assert_eq!(plain.label(), "6->8 (Δ=2, coeff=-0.12000)");
    }

    #[test]
    fn test_root_matches() {
        let mut record = Record::failed("a.log", "x");
        assert_eq!(record.root_matches(), None);

        record.declared_root = Some(2);
        assert_eq!(record.root_matches(), None);

        record.resolved_state = Some(ExcitedState::new(header(2)));
        assert_eq!(record.root_matches(), Some(true));

        record.resolved_state = Some(ExcitedState::new(header(3)));
        assert_eq!(record.root_matches(), Some(false));
    }
}
