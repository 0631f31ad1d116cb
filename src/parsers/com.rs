//! # Gaussian 输入文件 (.com) 生成
//!
//! 将日志中最后一个几何块写成新的 Gaussian 输入。
//!
//! ## 格式
//! ```text
//! %chk=<name>.chk
//! #p opt freq b3lyp/6-31g(d)
//!
//! Title Card Required
//!
//! 0 1
//! C      0.00000000    1.40200000    0.00000000
//! ...
//!
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/geom.rs` 使用
//! - 使用 `models/molecule.rs`

use crate::models::Atom;

/// 默认路由行
pub const DEFAULT_ROUTE: &str = "#p opt freq b3lyp/6-31g(d)";

/// .com 文件头参数
#[derive(Debug, Clone)]
pub struct ComHeader {
    pub route: String,
    pub title: String,
    pub charge: i32,
    pub multiplicity: u32,
}

impl Default for ComHeader {
    fn default() -> Self {
        ComHeader {
            route: DEFAULT_ROUTE.to_string(),
            title: "Title Card Required".to_string(),
            charge: 0,
            multiplicity: 1,
        }
    }
}

/// 生成 .com 文件内容
pub fn to_com_string(name: &str, atoms: &[Atom], header: &ComHeader) -> String {
    let mut lines = Vec::new();

    lines.push(format!("%chk={}.chk", name));
    lines.push(header.route.clone());
    lines.push(String::new());
    lines.push(header.title.clone());
    lines.push(String::new());
    lines.push(format!("{} {}", header.charge, header.multiplicity));

    for atom in atoms {
        lines.push(format!(
            "{:<2} {:>14.8} {:>14.8} {:>14.8}",
            atom.element, atom.position[0], atom.position[1], atom.position[2]
        ));
    }

    // Gaussian 要求分子说明以空行结束
    lines.push(String::new());
    lines.push(String::new());

    lines.join("\n")
}
