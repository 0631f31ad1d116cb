//! # 折线图
//!
//! 按文件顺序绘制一个数值序列（能量、lambda 指数），标记最低点。
//!
//! ## 依赖关系
//! - 被 `commands/summary.rs`, `commands/lambda.rs` 调用
//! - 使用 `plotters` 渲染 PNG

use crate::error::{GaulogError, Result};

use plotters::prelude::*;
use std::path::Path;

/// 图表文字与颜色
#[derive(Debug, Clone)]
pub struct PlotSpec<'a> {
    pub title: &'a str,
    pub x_desc: &'a str,
    pub y_desc: &'a str,
    pub series: &'a str,
    pub color: RGBColor,
}

fn plot_err<E: std::fmt::Display>(e: E) -> GaulogError {
    GaulogError::PlotError(e.to_string())
}

/// 绘制 (x, y) 折线图；x 通常为 1 起始的文件序号
pub fn line_plot(points: &[(f64, f64)], spec: &PlotSpec<'_>, output_path: &Path) -> Result<()> {
    if points.is_empty() {
        return Err(GaulogError::PlotError("No data to plot".to_string()));
    }

    let (x_min, x_max) = bounds(points.iter().map(|(x, _)| *x));
    let (y_min, y_max) = bounds(points.iter().map(|(_, y)| *y));
    let x_margin = 0.5;
    let y_margin = ((y_max - y_min).abs() * 0.1).max(1e-6);

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(spec.title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(
            (x_min - x_margin)..(x_max + x_margin),
            (y_min - y_margin)..(y_max + y_margin),
        )
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc(spec.x_desc)
        .y_desc(spec.y_desc)
        .draw()
        .map_err(plot_err)?;

    let color = spec.color;

    chart
        .draw_series(
            points
                .iter()
                .map(|(x, y)| Circle::new((*x, *y), 5, color.filled())),
        )
        .map_err(plot_err)?
        .label(spec.series)
        .legend(move |(x, y)| Circle::new((x + 10, y), 5, color.filled()));

    chart
        .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
        .map_err(plot_err)?;

    // 标记最低点
    if let Some((min_x, min_y)) = points
        .iter()
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    {
        chart
            .draw_series(std::iter::once(Circle::new(
                (*min_x, *min_y),
                8,
                GREEN.filled(),
            )))
            .map_err(plot_err)?
            .label("Lowest")
            .legend(|(x, y)| Circle::new((x + 10, y), 5, GREEN.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;

    Ok(())
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}
