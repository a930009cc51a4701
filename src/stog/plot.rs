//! # 结果图表
//!
//! 使用 `plotters` 为各阶段结果生成 PNG 折线图，非交互式。
//!
//! ## 依赖关系
//! - 被 `stog/pipeline.rs` 调用
//! - 使用 `plotters` 渲染图表

use crate::error::{Result, StogError};
use crate::models::Curve;

use plotters::prelude::*;
use std::path::Path;

/// 图表尺寸
pub const PLOT_SIZE: (u32, u32) = (1000, 600);

const PALETTE: [RGBColor; 4] = [
    RGBColor(0, 102, 204),
    RGBColor(204, 51, 0),
    RGBColor(0, 153, 76),
    RGBColor(128, 0, 153),
];

/// 一条带图例的曲线
pub struct Series<'a> {
    pub label: &'a str,
    pub curve: &'a Curve,
}

/// 绘制一组曲线到 PNG 文件
pub fn plot_curves(
    series: &[Series<'_>],
    title: &str,
    x_desc: &str,
    y_desc: &str,
    output_path: &Path,
) -> Result<()> {
    let root = BitMapBackend::new(output_path, PLOT_SIZE).into_drawing_area();
    draw_chart(&root, series, title, x_desc, y_desc)?;
    root.present()
        .map_err(|e| StogError::PlotError(e.to_string()))?;
    Ok(())
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    series: &[Series<'_>],
    title: &str,
    x_desc: &str,
    y_desc: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| StogError::PlotError(format!("{:?}", e)))?;

    let (x_range, y_range) = bounds(series)?;

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| StogError::PlotError(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| StogError::PlotError(format!("{:?}", e)))?;

    for (i, s) in series.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        chart
            .draw_series(LineSeries::new(s.curve.points(), color.stroke_width(2)))
            .map_err(|e| StogError::PlotError(format!("{:?}", e)))?
            .label(s.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| StogError::PlotError(format!("{:?}", e)))?;

    Ok(())
}

/// 所有曲线的 x / y 范围，y 方向留 5% 边距
fn bounds(series: &[Series<'_>]) -> Result<(std::ops::Range<f64>, std::ops::Range<f64>)> {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for (x, y) in series.iter().flat_map(|s| s.curve.points()) {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        if y.is_finite() {
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    }

    if !(x_min < x_max) || !(y_min <= y_max) {
        return Err(StogError::PlotError("nothing to plot".to_string()));
    }

    let pad = ((y_max - y_min) * 0.05).max(1e-6);
    Ok((x_min..x_max, (y_min - pad)..(y_max + pad)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_cover_all_series() {
        let a = Curve::new(vec![0.5, 1.0], vec![0.0, 2.0]).unwrap();
        let b = Curve::new(vec![0.1, 3.0], vec![-1.0, 1.0]).unwrap();
        let series = [
            Series { label: "a", curve: &a },
            Series { label: "b", curve: &b },
        ];
        let (x, y) = bounds(&series).unwrap();
        assert_eq!(x, 0.1..3.0);
        assert!(y.start < -1.0 && y.end > 2.0);
    }

    #[test]
    fn test_single_point_has_no_range() {
        let a = Curve::new(vec![1.0], vec![1.0]).unwrap();
        let err = bounds(&[Series { label: "a", curve: &a }]).unwrap_err();
        assert!(matches!(err, StogError::PlotError(_)));
    }
}
