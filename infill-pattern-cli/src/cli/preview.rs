//! Preview command: render a request's outlines and infill to SVG.

use std::path::Path as FsPath;

use anyhow::{Context, Result};

use infill_pattern_core::{bounding_box, BoundingBox, Path, Point};

use super::common::{parse_request, read_input, run_request, write_output};

/// Execute the preview command.
pub fn cmd_preview(input: Option<&FsPath>, output: Option<&FsPath>) -> Result<()> {
    let request = parse_request(&read_input(input)?)?;
    let outlines = request.outlines();
    let infill = run_request(&request)?;

    let svg = paths_to_svg(&outlines, &infill.lines).context("nothing to preview")?;
    write_output(output, &svg)
}

/// Outlines in grey, infill lines in black.
///
/// Returns `None` when there is no geometry to frame.
pub fn paths_to_svg(outlines: &[Path], lines: &[Path]) -> Option<String> {
    let bbox = bounding_box(outlines).ok()?;
    let pad = (bbox.max_extent() / 20).max(1);
    let stroke = (bbox.max_extent() as f64 / 500.0).max(0.5);

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">
<rect x="{}" y="{}" width="100%" height="100%" fill="white"/>
"#,
        bbox.min.x - pad,
        bbox.min.y - pad,
        bbox.width() + 2 * pad,
        bbox.height() + 2 * pad,
        bbox.min.x - pad,
        bbox.min.y - pad,
    ));

    // Draw outlines (gray)
    svg.push_str(&format!(r##"<g stroke="#cccccc" stroke-width="{stroke}" fill="none">"##));
    svg.push('\n');
    for outline in outlines.iter().filter(|p| p.len() >= 2) {
        svg.push_str(&format!("  <polygon points=\"{}\"/>\n", points_attr(outline, &bbox)));
    }
    svg.push_str("</g>\n");

    // Draw infill lines (black)
    svg.push_str(&format!(
        r#"<g stroke="black" stroke-width="{stroke}" stroke-linecap="round" fill="none">"#
    ));
    svg.push('\n');
    for line in lines.iter().filter(|p| p.len() >= 2) {
        svg.push_str(&format!("  <polyline points=\"{}\"/>\n", points_attr(line, &bbox)));
    }
    svg.push_str("</g>\n</svg>\n");

    Some(svg)
}

/// "x1,y1 x2,y2 ..." with y flipped so +y points up like on the build plate.
fn points_attr(path: &[Point], bbox: &BoundingBox) -> String {
    path.iter()
        .map(|p| format!("{},{}", p.x, bbox.min.y + bbox.max.y - p.y))
        .collect::<Vec<_>>()
        .join(" ")
}
