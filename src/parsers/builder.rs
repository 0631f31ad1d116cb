//! # 记录构建
//!
//! 由累积状态、文件名元数据与步骤映射生成一条 `Record`。
//! 纯函数：无 I/O，不修改输入，相同输入总是得到相同记录。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `parsers/accumulator.rs`, `config.rs`, `models/`

use super::accumulator::AccumulatedState;
use crate::config::StepEnergyMap;
use crate::models::{
    EnergyChoice, EnergyKind, RankedTransition, Record, TerminationStatus, Transition,
};

/// 默认显著性阈值 |coeff|
pub const DEFAULT_THRESHOLD: f64 = 0.30;

/// 默认列出的主要跃迁数
pub const DEFAULT_TOP_K: usize = 3;

/// 跃迁排序参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingOptions {
    pub threshold: f64,
    pub top_k: usize,
}

impl Default for RankingOptions {
    fn default() -> Self {
        RankingOptions {
            threshold: DEFAULT_THRESHOLD,
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// 记录构建参数
#[derive(Debug, Clone, Default)]
pub struct RecordOptions {
    pub step_map: StepEnergyMap,
    pub ranking: RankingOptions,
}

/// 跃迁排序结果
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionRanking {
    pub dominant: Vec<RankedTransition>,
    /// 任一 |Δ|=1 且 |coeff| ≥ 阈值 的跃迁
    pub adjacent_present: bool,
    /// 前 K 个中存在 |Δ|=1 的跃迁
    pub adjacent_dominant: bool,
}

/// 文件名开头的数字串作为步骤标签
pub fn step_label(filename: &str) -> Option<String> {
    let digits: String = filename.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}

/// 按 |coeff| 降序（稳定）排序并取前 K 个
pub fn rank_transitions(transitions: &[Transition], options: &RankingOptions) -> TransitionRanking {
    let mut sorted = transitions.to_vec();
    sorted.sort_by(|a, b| {
        b.coefficient
            .abs()
            .partial_cmp(&a.coefficient.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let significant = |t: &Transition| t.coefficient.abs() >= options.threshold;

    let adjacent_present = sorted.iter().any(|t| t.is_adjacent() && significant(t));

    let dominant: Vec<RankedTransition> = sorted
        .iter()
        .take(options.top_k)
        .map(|t| RankedTransition {
            transition: *t,
            adjacent: t.is_adjacent(),
            significant: significant(t),
        })
        .collect();

    let adjacent_dominant = dominant.iter().any(|r| r.adjacent);

    TransitionRanking {
        dominant,
        adjacent_present,
        adjacent_dominant,
    }
}

/// 选择能量：期望类型优先，否则 TD-DFT → SCF 回退
fn select_energy(state: &AccumulatedState, expected: Option<EnergyKind>) -> (EnergyChoice, Option<f64>) {
    if let Some(kind) = expected {
        if let Some(value) = state.energy(kind) {
            return (EnergyChoice::Expected(kind), Some(value));
        }
    }
    if let Some(value) = state.last_tddft_energy {
        return (EnergyChoice::TddftFallback, Some(value));
    }
    if let Some(value) = state.last_scf_energy {
        return (EnergyChoice::ScfFallback, Some(value));
    }
    (EnergyChoice::None, None)
}

/// 构建单个文件的记录
pub fn build_record(filename: &str, state: &AccumulatedState, options: &RecordOptions) -> Record {
    let step_label = step_label(filename);
    let expected = step_label
        .as_deref()
        .and_then(|s| options.step_map.expected_kind(s));
    let ground_state = expected == Some(EnergyKind::Scf);

    let (energy_kind, energy_value) = select_energy(state, expected);

    let termination = state.termination_status();
    let termination_tail = match termination {
        TerminationStatus::Normal => Vec::new(),
        TerminationStatus::Error if state.termination_tail.is_empty() => {
            vec!["(empty log)".to_string()]
        }
        TerminationStatus::Error => state.termination_tail.clone(),
    };

    let resolved_state = if ground_state {
        None
    } else {
        state.resolved_state().cloned()
    };

    let (dominant_transitions, adjacent_present, adjacent_dominant) = match resolved_state {
        Some(ref s) => {
            let ranking = rank_transitions(&s.transitions, &options.ranking);
            (
                ranking.dominant,
                Some(ranking.adjacent_present),
                Some(ranking.adjacent_dominant),
            )
        }
        None => (Vec::new(), None, None),
    };

    Record {
        filename: filename.to_string(),
        step_label,
        termination,
        termination_tail,
        frequency_status: state.frequency_status(),
        lowest_frequency: state.min_frequency_seen,
        energy_kind,
        energy_value,
        declared_root: state.declared_root,
        ground_state,
        resolved_state,
        dominant_transitions,
        adjacent_present,
        adjacent_dominant,
        final_states: state.final_section.clone(),
        final_geometry: state.last_geometry.clone(),
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExcitedState, ExcitedStateHeader};

    fn state_with(idx: u32, transitions: Vec<Transition>) -> ExcitedState {
        let mut s = ExcitedState::new(ExcitedStateHeader {
            state_index: idx,
            multiplicity: "Singlet-A".to_string(),
            excitation_ev: 2.5,
            wavelength_nm: 495.9,
            oscillator_strength: 0.42,
            line_index: 3,
        });
        s.transitions = transitions;
        s
    }

    #[test]
    fn test_step_label() {
        assert_eq!(step_label("05_opt_S1.log"), Some("05".to_string()));
        assert_eq!(step_label("mol_05.log"), None);
    }

    #[test]
    fn test_rank_transitions() {
        let transitions = vec![
            Transition::new(5, 6, 0.55),
            Transition::new(6, 7, 0.12),
            Transition::new(5, 7, 0.31),
        ];
        let options = RankingOptions {
            threshold: 0.30,
            top_k: 2,
        };
        let ranking = rank_transitions(&transitions, &options);
        let top: Vec<Transition> = ranking.dominant.iter().map(|r| r.transition).collect();
        assert_eq!(
            top,
            vec![Transition::new(5, 6, 0.55), Transition::new(5, 7, 0.31)]
        );
        assert!(ranking.adjacent_present);
        assert!(ranking.adjacent_dominant);
        assert!(ranking.dominant[1].significant);
        assert!(!ranking.dominant[1].adjacent);
    }

    #[test]
    fn test_adjacent_below_threshold() {
        let transitions = vec![Transition::new(5, 7, -0.60), Transition::new(6, 7, 0.20)];
        let ranking = rank_transitions(&transitions, &RankingOptions::default());
        assert!(!ranking.adjacent_present);
        assert!(ranking.adjacent_dominant);
    }

    #[test]
    fn test_energy_selection_and_fallback() {
        let mut state = AccumulatedState {
            last_scf_energy: Some(-10.0),
            last_tddft_energy: Some(-9.8),
            ..AccumulatedState::default()
        };
        let options = RecordOptions {
            step_map: StepEnergyMap::step_maker(),
            ..RecordOptions::default()
        };

        let record = build_record("01_gs.log", &state, &options);
        assert_eq!(record.energy_kind, EnergyChoice::Expected(EnergyKind::Scf));
        assert_eq!(record.energy_value, Some(-10.0));
        assert!(record.ground_state);

        // 03 期望 cLR，但未出现 -> TD-DFT 回退
        let record = build_record("03_clr.log", &state, &options);
        assert_eq!(record.energy_kind, EnergyChoice::TddftFallback);
        assert_eq!(record.energy_value, Some(-9.8));

        state.last_tddft_energy = None;
        let record = build_record("99_x.log", &state, &options);
        assert_eq!(record.energy_kind, EnergyChoice::ScfFallback);

        state.last_scf_energy = None;
        let record = build_record("x.log", &state, &options);
        assert_eq!(record.energy_kind, EnergyChoice::None);
        assert_eq!(record.energy_value, None);
    }

    #[test]
    fn test_ground_state_step_hides_excited_state() {
        let s = state_with(2, vec![Transition::new(5, 6, 0.7)]);
        let state = AccumulatedState {
            last_state: Some(s),
            last_scf_energy: Some(-1.0),
            ..AccumulatedState::default()
        };
        let options = RecordOptions {
            step_map: StepEnergyMap::step_maker(),
            ..RecordOptions::default()
        };
        let record = build_record("05_gs.log", &state, &options);
        assert_eq!(record.resolved_excited_state(), None);
        assert_eq!(record.oscillator_strength(), None);
        assert_eq!(record.adjacent_present, None);

        let record = build_record("02_td.log", &state, &options);
        assert_eq!(record.resolved_excited_state(), Some(2));
        assert_eq!(record.oscillator_strength(), Some(0.42));
        assert_eq!(record.adjacent_present, Some(true));
    }

    #[test]
    fn test_error_termination_tail() {
        let state = AccumulatedState::default();
        let record = build_record("empty.log", &state, &RecordOptions::default());
        assert_eq!(record.termination, TerminationStatus::Error);
        assert!(!record.termination_tail.is_empty());
    }

    #[test]
    fn test_build_does_not_mutate_and_is_deterministic() {
        let state = AccumulatedState {
            last_state: Some(state_with(1, vec![Transition::new(1, 2, 0.4)])),
            termination_ok: true,
            ..AccumulatedState::default()
        };
        let before = state.clone();
        let a = build_record("a.log", &state, &RecordOptions::default());
        let b = build_record("a.log", &state, &RecordOptions::default());
        assert_eq!(a, b);
        assert_eq!(state, before);
        assert!(a.termination_tail.is_empty());
    }
}
