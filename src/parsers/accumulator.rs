//! # 事件累加器
//!
//! 按顺序消费扫描事件，维护"最后一次出现"的能量、当前打开的激发块、
//! 频率检查状态与最后一个几何块。每个文件使用全新的累加器，不跨文件共享。
//!
//! ## 激发块生命周期
//! - 标题行打开新块（关闭上一个块）
//! - 下一个标题行、新的激发态列表或文件结束时关闭
//! - 关闭时写入：被标记块 / 每个 state 的最新块 / 最后一个块 / 当前列表
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `models/`

use crate::models::{
    Atom, EnergyKind, Event, ExcitedState, FrequencyStatus, TerminationStatus,
};
use std::collections::BTreeMap;

/// 单个文件扫描结束后的累积状态
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccumulatedState {
    pub last_scf_energy: Option<f64>,
    pub last_tddft_energy: Option<f64>,
    pub last_corrected_energy: Option<f64>,

    /// 路由行声明的 root
    pub declared_root: Option<u32>,

    /// 最后一个收到优化标记的块
    pub flagged_state: Option<ExcitedState>,
    /// 每个 state_index 最后一次出现的块
    pub latest_by_state: BTreeMap<u32, ExcitedState>,
    /// 最后一个块
    pub last_state: Option<ExcitedState>,
    /// 最后一个激发态列表中的全部块
    pub final_section: Vec<ExcitedState>,

    pub mass_weighted_seen: bool,
    /// 质量加权标记之后的频率行数
    pub rows_after_marker: usize,
    /// 质量加权标记之后第二行的第一个值
    pub second_row_lead: Option<f64>,
    /// 全部频率行数
    pub frequency_rows: usize,
    pub min_frequency_seen: Option<f64>,
    pub negative_frequency_flag: bool,

    pub termination_ok: bool,
    pub termination_tail: Vec<String>,

    pub last_geometry: Vec<Atom>,
}

impl AccumulatedState {
    pub fn energy(&self, kind: EnergyKind) -> Option<f64> {
        match kind {
            EnergyKind::Scf => self.last_scf_energy,
            EnergyKind::Tddft => self.last_tddft_energy,
            EnergyKind::Corrected => self.last_corrected_energy,
        }
    }

    /// 激发态选择优先级：
    /// 1. 最后一个优化标记对应的块
    /// 2. state_index 等于声明 root 的最后一个块
    /// 3. 最后一个块
    pub fn resolved_state(&self) -> Option<&ExcitedState> {
        self.flagged_state
            .as_ref()
            .or_else(|| {
                self.declared_root
                    .and_then(|root| self.latest_by_state.get(&root))
            })
            .or(self.last_state.as_ref())
    }

    pub fn termination_status(&self) -> TerminationStatus {
        if self.termination_ok {
            TerminationStatus::Normal
        } else {
            TerminationStatus::Error
        }
    }

    pub fn frequency_status(&self) -> FrequencyStatus {
        if self.negative_frequency_flag || self.second_row_lead.is_some_and(|v| v < 0.0) {
            return FrequencyStatus::NegativeFrequency;
        }

        if self.mass_weighted_seen {
            return if self.rows_after_marker < 2 {
                FrequencyStatus::Incomplete
            } else {
                FrequencyStatus::Ok
            };
        }

        // 没有质量加权标记的单次列表：按最小值判断
        if self.frequency_rows > 0 {
            return match self.min_frequency_seen {
                Some(v) if v < 0.0 => FrequencyStatus::NegativeFrequency,
                _ => FrequencyStatus::Ok,
            };
        }

        FrequencyStatus::NoFrequencyCalc
    }
}

/// 事件累加器
#[derive(Debug, Default)]
pub struct FactAccumulator {
    state: AccumulatedState,
    open_block: Option<ExcitedState>,
    pending_geometry: Vec<Atom>,
    last_geometry_line: Option<usize>,
}

impl FactAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 依次应用全部事件并结束
    pub fn accumulate(events: impl IntoIterator<Item = Event>) -> AccumulatedState {
        let mut acc = Self::new();
        for event in events {
            acc.apply(event);
        }
        acc.finish()
    }

    pub fn apply(&mut self, event: Event) {
        match event {
            Event::Termination { ok, tail } => {
                self.state.termination_ok = ok;
                self.state.termination_tail = tail;
            }
            Event::MassWeightedMarker { .. } => {
                self.state.mass_weighted_seen = true;
            }
            Event::FrequencyLine { values, .. } => self.apply_frequency_row(&values),
            Event::NegativeFrequencyFlag { .. } => {
                self.state.negative_frequency_flag = true;
            }
            Event::EnergyLine { kind, value, .. } => {
                match kind {
                    EnergyKind::Scf => self.state.last_scf_energy = Some(value),
                    EnergyKind::Tddft => {
                        self.state.last_tddft_energy = Some(value);
                        if let Some(block) = self.open_block.as_mut() {
                            block.total_energy = Some(value);
                        }
                    }
                    EnergyKind::Corrected => self.state.last_corrected_energy = Some(value),
                }
            }
            Event::ExcitationSection { .. } => {
                self.close_block();
                self.state.final_section.clear();
            }
            Event::ExcitedStateHeader(header) => {
                self.close_block();
                self.open_block = Some(ExcitedState::new(header));
            }
            Event::TransitionLine { transition, .. } => {
                if let Some(block) = self.open_block.as_mut() {
                    block.transitions.push(transition);
                }
            }
            Event::OptimizationRootFlag { .. } => {
                if let Some(block) = self.open_block.as_mut() {
                    block.flagged = true;
                }
            }
            Event::RootDirective { state_index, .. } => {
                if self.state.declared_root.is_none() {
                    self.state.declared_root = Some(state_index);
                }
            }
            Event::GeometryAtomLine { line_index, atom } => {
                let contiguous = self
                    .last_geometry_line
                    .is_some_and(|prev| prev + 1 == line_index);
                if !contiguous {
                    self.flush_geometry();
                }
                self.pending_geometry.push(atom);
                self.last_geometry_line = Some(line_index);
            }
        }
    }

    /// 关闭打开的块与几何块，返回最终状态
    pub fn finish(mut self) -> AccumulatedState {
        self.close_block();
        self.flush_geometry();
        self.state
    }

    fn apply_frequency_row(&mut self, values: &[f64]) {
        self.state.frequency_rows += 1;

        let row_min = values.iter().copied().fold(f64::INFINITY, f64::min);
        self.state.min_frequency_seen = Some(match self.state.min_frequency_seen {
            Some(current) => current.min(row_min),
            None => row_min,
        });

        if self.state.mass_weighted_seen {
            self.state.rows_after_marker += 1;
            if self.state.rows_after_marker == 2 {
                self.state.second_row_lead = values.first().copied();
            }
        }
    }

    fn close_block(&mut self) {
        let Some(block) = self.open_block.take() else {
            return;
        };
        if block.flagged {
            self.state.flagged_state = Some(block.clone());
        }
        self.state
            .latest_by_state
            .insert(block.state_index(), block.clone());
        self.state.final_section.push(block.clone());
        self.state.last_state = Some(block);
    }

    /// 新的连续原子行替换之前保存的几何块
    fn flush_geometry(&mut self) {
        if !self.pending_geometry.is_empty() {
            self.state.last_geometry = std::mem::take(&mut self.pending_geometry);
        }
    }
}
