//! # CSV 导出
//!
//! 将任意 `Tabled` 行写入 CSV：表头取自 `Tabled::headers()`，
//! 单元格取自 `Tabled::fields()`。
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{GaulogError, Result};

use std::path::Path;
use tabled::Tabled;

/// 导出结果行为 CSV
pub fn write_csv<T: Tabled>(rows: &[T], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path).map_err(GaulogError::CsvError)?;

    let headers: Vec<String> = T::headers().into_iter().map(|h| h.into_owned()).collect();
    wtr.write_record(&headers).map_err(GaulogError::CsvError)?;

    for row in rows {
        let fields: Vec<String> = row.fields().into_iter().map(|f| f.into_owned()).collect();
        wtr.write_record(&fields).map_err(GaulogError::CsvError)?;
    }

    wtr.flush().map_err(|e| GaulogError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "Filename")]
        file: String,
        #[tabled(rename = "Energy_Hartree")]
        energy: String,
    }

    #[test]
    fn test_write_csv_fixed_columns() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.csv");
        let rows = vec![
            Row {
                file: "01_gs.log".to_string(),
                energy: "-40.5".to_string(),
            },
            Row {
                file: "02, td.log".to_string(),
                energy: String::new(),
            },
        ];

        write_csv(&rows, &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "Filename,Energy_Hartree\n01_gs.log,-40.5\n\"02, td.log\",\n"
        );
    }

    #[test]
    fn test_unwritable_output() {
        let rows: Vec<Row> = Vec::new();
        assert!(write_csv(&rows, Path::new("/nonexistent/gaulog/out.csv")).is_err());
    }
}
