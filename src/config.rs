//! # 配置模块
//!
//! 从 TOML 文件加载解析配置：步骤标签 → 期望能量类型映射、能量行标签、
//! 路由行扫描窗口。
//!
//! ## 查找顺序
//! 1. `--config <path>` 显式指定
//! 2. 当前目录下的 `gaulog.toml`
//! 3. 内置默认值（空映射）
//!
//! ## 配置示例
//! ```toml
//! preset = "step-maker"
//!
//! [steps]
//! "16" = "tddft"
//!
//! [labels]
//! scf = "SCF Done:"
//!
//! [scan]
//! route_window = 400
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/event.rs` 的 EnergyKind

use crate::error::{GaulogError, Result};
use crate::models::EnergyKind;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// 当前目录下自动加载的配置文件名
pub const LOCAL_CONFIG_FILE: &str = "gaulog.toml";

/// 内置步骤表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepPreset {
    /// 01/05/07/11/15 → SCF, 02/04/08/12/13 → TD-DFT, 03/06/10/14 → cLR
    StepMaker,
}

/// 能量行标签（子串匹配，之后为 `=` 与数值）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnergyLabels {
    pub scf: String,
    pub tddft: String,
    pub corrected: String,
}

impl Default for EnergyLabels {
    fn default() -> Self {
        EnergyLabels {
            scf: "SCF Done:".to_string(),
            tddft: "Total Energy, E(TD-HF/TD-DFT)".to_string(),
            corrected: "Total energy after correction".to_string(),
        }
    }
}

/// 扫描参数
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanSettings {
    /// 查找 `# ... root=N` 路由行的前导行数
    pub route_window: usize,
}

impl Default for ScanSettings {
    fn default() -> Self {
        ScanSettings { route_window: 400 }
    }
}

/// gaulog 配置
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GaulogConfig {
    pub preset: Option<StepPreset>,
    pub steps: BTreeMap<String, EnergyKind>,
    pub labels: EnergyLabels,
    pub scan: ScanSettings,
}

impl GaulogConfig {
    /// 按查找顺序加载配置
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(GaulogError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            return Self::from_file(path);
        }

        let local = Path::new(LOCAL_CONFIG_FILE);
        if local.is_file() {
            log::info!("Loading configuration from ./{}", LOCAL_CONFIG_FILE);
            return Self::from_file(local);
        }

        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| GaulogError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&text, &path.display().to_string())
    }

    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self> {
        let config: GaulogConfig = toml::from_str(text).map_err(|e| GaulogError::ConfigError {
            path: origin.to_string(),
            reason: e.to_string(),
        })?;

        if config.scan.route_window == 0 {
            return Err(GaulogError::ConfigError {
                path: origin.to_string(),
                reason: "scan.route_window must be at least 1".to_string(),
            });
        }
        for (name, label) in [
            ("scf", &config.labels.scf),
            ("tddft", &config.labels.tddft),
            ("corrected", &config.labels.corrected),
        ] {
            if label.trim().is_empty() {
                return Err(GaulogError::ConfigError {
                    path: origin.to_string(),
                    reason: format!("labels.{} must not be empty", name),
                });
            }
        }

        Ok(config)
    }

    /// 合并预设与显式 `[steps]`（显式条目优先）
    pub fn step_map(&self) -> StepEnergyMap {
        let mut map = match self.preset {
            Some(StepPreset::StepMaker) => StepEnergyMap::step_maker(),
            None => StepEnergyMap::default(),
        };
        for (step, kind) in &self.steps {
            map.insert(step.clone(), *kind);
        }
        map
    }
}

/// 步骤标签 → 期望能量类型
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepEnergyMap {
    entries: BTreeMap<String, EnergyKind>,
}

impl StepEnergyMap {
    pub fn step_maker() -> Self {
        let mut map = StepEnergyMap::default();
        for step in ["01", "05", "07", "11", "15"] {
            map.insert(step, EnergyKind::Scf);
        }
        for step in ["02", "04", "08", "12", "13"] {
            map.insert(step, EnergyKind::Tddft);
        }
        for step in ["03", "06", "10", "14"] {
            map.insert(step, EnergyKind::Corrected);
        }
        map
    }

    pub fn insert(&mut self, step: impl Into<String>, kind: EnergyKind) {
        self.entries.insert(step.into(), kind);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 精确匹配优先，其次按数值匹配（`5` 与 `05` 视为同一步）
    pub fn expected_kind(&self, step: &str) -> Option<EnergyKind> {
        if let Some(kind) = self.entries.get(step) {
            return Some(*kind);
        }
        let wanted: u64 = step.parse().ok()?;
        self.entries
            .iter()
            .find(|(key, _)| key.parse::<u64>().ok() == Some(wanted))
            .map(|(_, kind)| *kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaulogConfig::default();
        assert_eq!(config.scan.route_window, 400);
        assert_eq!(config.labels.scf, "SCF Done:");
        assert!(config.step_map().is_empty());
    }

    #[test]
    fn test_preset_with_override() {
        let text = r#"
preset = "step-maker"

[steps]
"05" = "tddft"
"16" = "corrected"
"#;
        let config = GaulogConfig::from_toml_str(text, "test").unwrap();
        let map = config.step_map();
        assert_eq!(map.expected_kind("01"), Some(EnergyKind::Scf));
        assert_eq!(map.expected_kind("05"), Some(EnergyKind::Tddft));
        assert_eq!(map.expected_kind("16"), Some(EnergyKind::Corrected));
        assert_eq!(map.expected_kind("09"), None);
    }

    #[test]
    fn test_numeric_step_match() {
        let map = StepEnergyMap::step_maker();
        assert_eq!(map.expected_kind("2"), Some(EnergyKind::Tddft));
        assert_eq!(map.expected_kind("abc"), None);
    }

    #[test]
    fn test_partial_labels_keep_defaults() {
        let text = r#"
[labels]
scf = "SCF Done:  E(UM062X)"
"#;
        let config = GaulogConfig::from_toml_str(text, "test").unwrap();
        assert_eq!(config.labels.scf, "SCF Done:  E(UM062X)");
        assert_eq!(config.labels.tddft, "Total Energy, E(TD-HF/TD-DFT)");
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(GaulogConfig::from_toml_str("[steps]\n\"01\" = \"mp2\"\n", "test").is_err());
        assert!(GaulogConfig::from_toml_str("[scan]\nroute_window = 0\n", "test").is_err());
        assert!(GaulogConfig::from_toml_str("[labels]\nscf = \" \"\n", "test").is_err());
        assert!(GaulogConfig::from_toml_str("unknown = 1\n", "test").is_err());
    }
}
