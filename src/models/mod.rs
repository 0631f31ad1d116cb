//! # 数据模型模块
//!
//! 定义扫描事件、单文件结果记录与分子几何。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `report/` 和 `commands/` 使用
//! - 子模块: event, record, molecule

pub mod event;
pub mod molecule;
pub mod record;

pub use event::{EnergyKind, Event, ExcitedStateHeader, Transition};
pub use molecule::Atom;
pub use record::{
    EnergyChoice, ExcitedState, FrequencyStatus, RankedTransition, Record, TerminationStatus,
};
