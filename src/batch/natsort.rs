//! # 自然排序
//!
//! 文件名按数字段 / 非数字段交替比较：数字段按整数值，文本段忽略大小写，
//! 因此 `m_2.log` 排在 `m_10.log` 之前。
//!
//! ## 依赖关系
//! - 被 `batch/collector.rs` 使用

use std::cmp::Ordering;

#[derive(Debug, PartialEq, Eq)]
enum Chunk<'a> {
    Number(&'a str),
    Text(String),
}

fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = s.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        let digit = c.is_ascii_digit();
        let end = match chars.peek() {
            Some(&(_, next)) if next.is_ascii_digit() == digit => continue,
            Some(&(j, _)) => j,
            None => s.len(),
        };
        let part = &s[start..end];
        out.push(if digit {
            Chunk::Number(part)
        } else {
            Chunk::Text(part.to_lowercase())
        });
        start = end;
    }

    out
}

/// 整数比较：去掉前导零后先比长度再逐位比较，不受位数上限影响
fn compare_numbers(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// 自然排序比较
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let left = chunks(a);
    let right = chunks(b);

    for (x, y) in left.iter().zip(right.iter()) {
        let ord = match (x, y) {
            (Chunk::Number(p), Chunk::Number(q)) => compare_numbers(p, q),
            (Chunk::Text(p), Chunk::Text(q)) => p.cmp(q),
            (Chunk::Number(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Number(_)) => Ordering::Greater,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }

    left.len()
        .cmp(&right.len())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut v: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        v.sort_by(|a, b| natural_cmp(a, b));
        v
    }

    #[test]
    fn test_numeric_runs() {
        assert_eq!(
            sorted(&["m_10.log", "m_2.log", "m_1.log"]),
            vec!["m_1.log", "m_2.log", "m_10.log"]
        );
    }

    #[test]
    fn test_step_prefixes() {
        assert_eq!(
            sorted(&["11_opt.log", "02_td.log", "1_gs.log", "10_clr.log"]),
            vec!["1_gs.log", "02_td.log", "10_clr.log", "11_opt.log"]
        );
    }

    #[test]
    fn test_case_insensitive_text() {
        assert_eq!(natural_cmp("Mol_b.log", "mol_a.log"), Ordering::Greater);
        assert_eq!(natural_cmp("MOL.log", "mol.log"), Ordering::Less);
    }

    #[test]
    fn test_leading_zeros_and_long_numbers() {
        assert_eq!(natural_cmp("007", "7"), Ordering::Less);
        assert_eq!(
            natural_cmp("x99999999999999999999999", "x100000000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn test_chunks() {
        assert_eq!(
            chunks("Ab12c"),
            vec![
                Chunk::Text("ab".to_string()),
                Chunk::Number("12"),
                Chunk::Text("c".to_string())
            ]
        );
        assert!(chunks("").is_empty());
    }
}
