//! SVG export of the shelf map panel.
//!
//! Writes the same nodes, edges and legend the live panel paints, so a
//! saved file can be shared outside the application.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::api::OptimizationGoal;
use crate::constants::{HUE_MAXIMIZE, HUE_MINIMIZE_EVEN, HUE_MINIMIZE_ODD, MAP_NODE_SIZE};
use crate::error::Result;
use crate::geometry::Vec2f;
use crate::palette::{RelationTier, hsl_to_rgb};
use crate::text::title_case;
use crate::viz::ShelfMapView;

const LEGEND_WIDTH: f32 = 260.0;
const NODE_FALLBACK_FILL: &str = "#9e9e9e";

/// Writes the map as an SVG file sized to the on-screen container plus a
/// legend column on the right.
pub fn export_shelf_map<P: AsRef<Path>>(
    view: &ShelfMapView,
    goal: OptimizationGoal,
    container: Vec2f,
    out_path: P,
) -> Result<()> {
    let mut f = BufWriter::new(File::create(out_path)?);
    write_shelf_map(&mut f, view, goal, container)?;
    f.flush()?;
    Ok(())
}

pub fn write_shelf_map<W: Write>(
    w: &mut W,
    view: &ShelfMapView,
    goal: OptimizationGoal,
    container: Vec2f,
) -> Result<()> {
    let width = (container.x + LEGEND_WIDTH).ceil() as i32;
    let height = container.y.ceil() as i32;

    writeln!(
        w,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"##,
    )?;
    writeln!(
        w,
        r##"<rect x="0" y="0" width="{width}" height="{height}" fill="white"/>"##,
    )?;
    writeln!(
        w,
        r##"<rect x="0" y="0" width="{}" height="{height}" fill="#fafafa" stroke="#e0e0e0"/>"##,
        container.x
    )?;

    // Edges go under the nodes
    for edge in &view.edges {
        let dash = if edge.dashed {
            r#" stroke-dasharray="6 4""#
        } else {
            ""
        };
        writeln!(
            w,
            r##"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{:.1}" stroke-opacity="{:.3}"{}/>"##,
            edge.a.x,
            edge.a.y,
            edge.b.x,
            edge.b.y,
            edge.color.hex(),
            edge.width,
            edge.opacity,
            dash
        )?;

        if let Some(label) = &edge.label {
            let mid_x = (edge.a.x + edge.b.x) / 2.0;
            let mid_y = (edge.a.y + edge.b.y) / 2.0;
            writeln!(
                w,
                r##"<text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="10" text-anchor="middle" fill="#555">{}</text>"##,
                mid_x,
                mid_y - 4.0,
                xml_encode(&label.text)
            )?;
        }
    }

    let radius = MAP_NODE_SIZE / 2.0;
    for node in &view.nodes {
        let fill = node
            .color
            .map(|c| c.hex())
            .unwrap_or_else(|| NODE_FALLBACK_FILL.to_string());
        writeln!(
            w,
            r##"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" stroke="#fff" stroke-width="2"/>"##,
            node.center.x, node.center.y, radius, fill
        )?;
        writeln!(
            w,
            r##"<text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="10" text-anchor="middle" fill="#fff">{}</text>"##,
            node.center.x,
            node.center.y - 2.0,
            xml_encode(&node.shelf)
        )?;
        if let Some(category) = &node.category {
            writeln!(
                w,
                r##"<text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="8" text-anchor="middle" fill="#fff" fill-opacity="0.85">{}</text>"##,
                node.center.x,
                node.center.y + 9.0,
                xml_encode(&title_case(category))
            )?;
        }
    }

    write_legend(w, goal, container.x + 10.0)?;
    writeln!(w, "</svg>")?;
    Ok(())
}

fn write_legend<W: Write>(w: &mut W, goal: OptimizationGoal, x0: f32) -> Result<()> {
    let mut y = 24.0;
    let heading = |w: &mut W, y: &mut f32, text: &str| -> Result<()> {
        writeln!(
            w,
            r##"<text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="12" font-weight="bold" fill="#333">{}</text>"##,
            x0, y, text
        )?;
        *y += 20.0;
        Ok(())
    };

    match goal {
        OptimizationGoal::Maximize => {
            heading(w, &mut y, "Kategori Puanı")?;
            let stops = [
                (20.0, "Yüksek puanlı"),
                (50.0, "Orta puanlı"),
                (80.0, "Düşük puanlı"),
            ];
            for (lightness, label) in stops {
                let color = hsl_to_rgb(HUE_MAXIMIZE, 100.0, lightness);
                write_chip(w, x0, y, &color.hex(), label)?;
                y += 18.0;
            }
        }
        OptimizationGoal::Minimize => {
            heading(w, &mut y, "Raf Grupları")?;
            let chips = [
                (HUE_MINIMIZE_EVEN, 30.0, "Grup 1 - yüksek puanlı"),
                (HUE_MINIMIZE_ODD, 30.0, "Grup 2 - yüksek puanlı"),
                (HUE_MINIMIZE_EVEN, 70.0, "Grup 1 - düşük puanlı"),
                (HUE_MINIMIZE_ODD, 70.0, "Grup 2 - düşük puanlı"),
            ];
            for (hue, lightness, label) in chips {
                let color = hsl_to_rgb(hue, 70.0, lightness);
                write_chip(w, x0, y, &color.hex(), label)?;
                y += 18.0;
            }
        }
    }

    y += 8.0;
    heading(w, &mut y, "İlişki Çizgileri")?;
    let tiers = [
        (RelationTier::VeryStrong, "Çok güçlü (&gt;3)"),
        (RelationTier::Strong, "Güçlü (&gt;2)"),
        (RelationTier::Moderate, "Orta (&gt;1.5)"),
        (RelationTier::Weak, "Zayıf (&gt;1.2)"),
    ];
    for (tier, label) in tiers {
        let (color, _) = match goal {
            OptimizationGoal::Maximize => tier.edge_style_maximize(),
            OptimizationGoal::Minimize => tier.edge_style_minimize(),
        };
        let dash = match goal {
            OptimizationGoal::Maximize => "",
            OptimizationGoal::Minimize => r#" stroke-dasharray="6 4""#,
        };
        writeln!(
            w,
            r##"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{:.1}"{}/>"##,
            x0,
            y - 4.0,
            x0 + 24.0,
            y - 4.0,
            color.hex(),
            tier.edge_width(),
            dash
        )?;
        writeln!(
            w,
            r##"<text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="11" fill="#333">{}</text>"##,
            x0 + 32.0,
            y,
            label
        )?;
        y += 18.0;
    }

    if goal == OptimizationGoal::Minimize {
        writeln!(
            w,
            r##"<text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="10" font-style="italic" fill="#555">Soluk çizgiler başarılı ayrıştırmayı gösterir.</text>"##,
            x0,
            y + 4.0
        )?;
    }

    Ok(())
}

fn write_chip<W: Write>(w: &mut W, x0: f32, y: f32, color: &str, label: &str) -> Result<()> {
    writeln!(
        w,
        r##"<rect x="{:.1}" y="{:.1}" width="12" height="12" rx="2" fill="{}"/>"##,
        x0,
        y - 11.0,
        color
    )?;
    writeln!(
        w,
        r##"<text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="11" fill="#333">{}</text>"##,
        x0 + 20.0,
        y,
        xml_encode(label)
    )?;
    Ok(())
}

fn xml_encode(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '&' => "&amp;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&apos;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::VisualizationPayload;
    use std::collections::HashMap;

    fn small_view(goal: OptimizationGoal) -> (ShelfMapView, Vec2f) {
        let mut shelf_positions = HashMap::new();
        shelf_positions.insert("Raf 1".to_string(), Vec2f::new(0.0, 0.0));
        shelf_positions.insert("Raf <2>".to_string(), Vec2f::new(100.0, 100.0));
        let payload = VisualizationPayload {
            shelf_positions,
            optimization_type: goal,
            ..Default::default()
        };
        let container = Vec2f::new(500.0, 400.0);
        (ShelfMapView::build(&payload, container), container)
    }

    #[test]
    fn test_export_writes_nodes_and_legend() {
        let (view, container) = small_view(OptimizationGoal::Maximize);
        let mut buf = Vec::new();
        write_shelf_map(&mut buf, &view, OptimizationGoal::Maximize, container).unwrap();
        let svg = String::from_utf8(buf).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains("Raf 1"));
        assert!(svg.contains("Kategori Puanı"));
    }

    #[test]
    fn test_export_escapes_shelf_names() {
        let (view, container) = small_view(OptimizationGoal::Maximize);
        let mut buf = Vec::new();
        write_shelf_map(&mut buf, &view, OptimizationGoal::Maximize, container).unwrap();
        let svg = String::from_utf8(buf).unwrap();
        assert!(svg.contains("Raf &lt;2&gt;"));
        assert!(!svg.contains("Raf <2>"));
    }

    #[test]
    fn test_minimize_legend_has_groups_and_dashes() {
        let (view, container) = small_view(OptimizationGoal::Minimize);
        let mut buf = Vec::new();
        write_shelf_map(&mut buf, &view, OptimizationGoal::Minimize, container).unwrap();
        let svg = String::from_utf8(buf).unwrap();
        assert!(svg.contains("Raf Grupları"));
        assert!(svg.contains("stroke-dasharray"));
        assert!(svg.contains("ayrıştırmayı"));
    }

    #[test]
    fn test_export_to_file() {
        let (view, container) = small_view(OptimizationGoal::Maximize);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.svg");
        export_shelf_map(&view, OptimizationGoal::Maximize, container, &path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("<svg"));
    }
}
