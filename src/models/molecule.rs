//! # 分子几何数据模型
//!
//! 日志中最后一个几何块的原子列表（笛卡尔坐标，Å）。
//!
//! ## 依赖关系
//! - 被 `parsers/scanner.rs`, `parsers/accumulator.rs`, `parsers/com.rs` 使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 原子信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    /// 元素符号
    pub element: String,

    /// 笛卡尔坐标 [x, y, z] (Å)
    pub position: [f64; 3],
}

impl Atom {
    pub fn new(element: impl Into<String>, position: [f64; 3]) -> Self {
        Atom {
            element: element.into(),
            position,
        }
    }
}

/// 计算化学式（元素按字母序，计数为 1 时省略）
pub fn formula(atoms: &[Atom]) -> String {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();

    for atom in atoms {
        *counts.entry(atom.element.as_str()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(el, count)| {
            if count == 1 {
                el.to_string()
            } else {
                format!("{}{}", el, count)
            }
        })
        .collect::<Vec<_>>()
        .join("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formula_water() {
        let atoms = vec![
            Atom::new("O", [0.0, 0.0, 0.0]),
            Atom::new("H", [0.757, 0.586, 0.0]),
            Atom::new("H", [-0.757, 0.586, 0.0]),
        ];
        assert_eq!(formula(&atoms), "H2O");
    }

    #[test]
    fn test_formula_empty() {
        assert_eq!(formula(&[]), "");
    }
}
