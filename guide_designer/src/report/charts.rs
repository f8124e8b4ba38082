use anyhow::{anyhow, Result};
use plotters::prelude::*;
use std::path::Path;

use crate::models::ScoredCandidate;

const CHART_SIZE: (u32, u32) = (900, 650);

const GC_COLOUR: RGBColor = RGBColor(255, 140, 0);
const CPG_COLOUR: RGBColor = RGBColor(138, 43, 226);
const OFF_TARGET_COLOUR: RGBColor = RGBColor(34, 139, 34);

/// Line chart of GC%, CpG (scaled x100 onto the percent axis) and
/// off-target score per ranked guide, x-axis labeled by guide position.
pub fn draw_guide_metrics_chart(ranked: &[ScoredCandidate], output_path: &Path) -> Result<()> {
    if ranked.is_empty() {
        return Err(anyhow!("no ranked guides to chart"));
    }

    let caption_font = ("sans-serif bold", 26);
    let axis_font = ("sans-serif", 22);
    let label_font = ("sans-serif", 18);

    let root = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| anyhow!("failed to clear chart canvas: {}", e))?;

    let x_max = ranked.len() as f64 - 0.5;
    let mut chart = ChartBuilder::on(&root)
        .caption("Guide metrics by rank", caption_font)
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5..x_max, 0.0..105.0)
        .map_err(|e| anyhow!("failed to build chart axes: {}", e))?;

    let positions: Vec<String> = ranked.iter().map(|c| c.position.to_string()).collect();
    chart
        .configure_mesh()
        .x_desc("Guide position")
        .y_desc("Score")
        .x_labels(ranked.len())
        .x_label_formatter(&|x| {
            let index = x.round();
            if index < 0.0 {
                return String::new();
            }
            positions
                .get(index as usize)
                .cloned()
                .unwrap_or_default()
        })
        .axis_desc_style(axis_font)
        .label_style(label_font)
        .draw()
        .map_err(|e| anyhow!("failed to draw chart mesh: {}", e))?;

    let series: [(&str, RGBColor, Vec<f64>); 3] = [
        (
            "GC %",
            GC_COLOUR,
            ranked.iter().map(|c| c.gc_score).collect(),
        ),
        (
            "CpG (x100)",
            CPG_COLOUR,
            ranked.iter().map(|c| c.cpg_density * 100.0).collect(),
        ),
        (
            "Off-target",
            OFF_TARGET_COLOUR,
            ranked.iter().map(|c| c.off_target_score).collect(),
        ),
    ];

    for (name, colour, values) in &series {
        let colour = *colour;
        chart
            .draw_series(LineSeries::new(
                values.iter().enumerate().map(|(i, &v)| (i as f64, v)),
                colour.stroke_width(3),
            ))
            .map_err(|e| anyhow!("failed to draw {} series: {}", name, e))?
            .label(*name)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 25, y)], colour.stroke_width(3))
            });
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(label_font)
        .legend_area_size(25)
        .position(SeriesLabelPosition::UpperRight)
        .draw()
        .map_err(|e| anyhow!("failed to draw chart legend: {}", e))?;

    root.present()
        .map_err(|e| anyhow!("failed to write {}: {}", output_path.display(), e))?;

    Ok(())
}
