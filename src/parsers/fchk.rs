//! # Gaussian formatted checkpoint (.fchk) 读取
//!
//! 只读取 HOMO 编号（α 电子数），用于把轨道编号转换为 HOMO/LUMO 标签。
//!
//! ## 依赖关系
//! - 被 `commands/dct.rs` 使用

use crate::error::{GaulogError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// 读取 "Number of alpha electrons" 作为 HOMO 编号
pub fn read_homo_index(path: &Path) -> Result<Option<u32>> {
    let file = File::open(path).map_err(|e| GaulogError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let reader = BufReader::new(file);
    for line in reader.split(b'\n') {
        let bytes = line.map_err(|e| GaulogError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        let line = String::from_utf8_lossy(&bytes);
        if line.contains("Number of alpha electrons") {
            let token = line.split_whitespace().last().unwrap_or_default();
            return token.parse().map(Some).map_err(|_| GaulogError::ParseError {
                format: "fchk".to_string(),
                path: path.display().to_string(),
                reason: format!("bad alpha electron count '{}'", token),
            });
        }
    }

    Ok(None)
}

/// 轨道编号相对 HOMO 的标签：`HOMO`, `LUMO`, `H-1`, `L+1`
pub fn orbital_label(orbital: u32, homo: u32) -> String {
    let diff = orbital as i64 - homo as i64;
    match diff {
        0 => "HOMO".to_string(),
        1 => "LUMO".to_string(),
        d if d < 0 => format!("H{}", d),
        d => format!("L+{}", d - 1),
    }
}
