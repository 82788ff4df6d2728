//! SVG heatmap rendering: band scales, a diverging color scale, and
//! the grid itself. Width is taken once from the container width the
//! caller passes in; there is no resize handling.

use crate::logging::{log, obj, v_num, Domain, Level};
use crate::model::CorrelationCell;

pub const MARGIN_TOP: f64 = 40.0;
pub const MARGIN_RIGHT: f64 = 20.0;
pub const MARGIN_BOTTOM: f64 = 60.0;
pub const MARGIN_LEFT: f64 = 70.0;
pub const TOTAL_HEIGHT: f64 = 400.0;

/// Ordinal band scale: evenly spaced bands with inner and outer
/// padding, centered in the range.
pub struct BandScale {
    positions: Vec<f64>,
    bandwidth: f64,
}

impl BandScale {
    /// `reverse` flips band order within the range, which is how the
    /// y axis puts the first member at the bottom.
    pub fn new(n: usize, span: f64, padding: f64, reverse: bool) -> Self {
        let count = n as f64;
        let step = span / (count - padding + 2.0 * padding).max(1.0);
        let start = (span - step * (count - padding)) / 2.0;
        let bandwidth = step * (1.0 - padding);
        let mut positions: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
        if reverse {
            positions.reverse();
        }
        Self { positions, bandwidth }
    }

    pub fn position(&self, index: usize) -> f64 {
        self.positions[index]
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }
}

fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round().clamp(0.0, 255.0) as u8
}

fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    (
        lerp_channel(a.0, b.0, t),
        lerp_channel(a.1, b.1, t),
        lerp_channel(a.2, b.2, t),
    )
}

const OPPOSE: (u8, u8, u8) = (0xef, 0x44, 0x44); // #ef4444
const NEUTRAL: (u8, u8, u8) = (0xf8, 0xfa, 0xfc); // #f8fafc
const ALIGN: (u8, u8, u8) = (0x3b, 0x82, 0xf6); // #3b82f6

/// Diverging linear scale: red at -1, near-white at 0, blue at +1.
pub fn diverging_color(value: f64) -> String {
    let v = value.clamp(-1.0, 1.0);
    let (r, g, b) = if v < 0.0 {
        lerp_rgb(OPPOSE, NEUTRAL, v + 1.0)
    } else {
        lerp_rgb(NEUTRAL, ALIGN, v)
    };
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Draw the full heatmap. `container_width` is the bounding-box width
/// of the placeholder the chart replaces.
pub fn render_matrix_svg(cells: &[CorrelationCell], members: &[&str], container_width: f64) -> String {
    let width = (container_width - MARGIN_LEFT - MARGIN_RIGHT).max(0.0);
    let height = TOTAL_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let x = BandScale::new(members.len(), width, 0.05, false);
    let y = BandScale::new(members.len(), height, 0.05, true);
    let index_of = |name: &str| members.iter().position(|m| *m == name);

    let mut svg = format!(
        concat!(
            r#"<svg width="{w}" height="{h}" xmlns="http://www.w3.org/2000/svg">"#,
            "<style>rect.cell:hover{{stroke:#1e293b;stroke-width:2}}</style>",
            r#"<g transform="translate({mx},{my})">"#
        ),
        w = width + MARGIN_LEFT + MARGIN_RIGHT,
        h = TOTAL_HEIGHT,
        mx = MARGIN_LEFT,
        my = MARGIN_TOP,
    );

    let mut drawn = 0usize;
    for cell in cells {
        let (Some(ci), Some(ri)) = (index_of(&cell.member_a), index_of(&cell.member_b)) else {
            continue;
        };
        svg.push_str(&format!(
            concat!(
                r#"<rect class="cell cursor-pointer transition-opacity hover:opacity-80" "#,
                r#"x="{x:.2}" y="{y:.2}" width="{bw:.2}" height="{bh:.2}" rx="4" fill="{fill}"/>"#
            ),
            x = x.position(ci),
            y = y.position(ri),
            bw = x.bandwidth(),
            bh = y.bandwidth(),
            fill = diverging_color(cell.value),
        ));
        drawn += 1;
    }

    // Left axis labels, one per member row.
    for (i, member) in members.iter().enumerate() {
        svg.push_str(&format!(
            concat!(
                r#"<text x="-8" y="{y:.2}" text-anchor="end" dominant-baseline="middle" "#,
                r#"font-size="10" font-weight="600">{label}</text>"#
            ),
            y = y.position(i) + y.bandwidth() / 2.0,
            label = member,
        ));
    }

    // Bottom axis labels, rotated for legibility.
    for (i, member) in members.iter().enumerate() {
        let cx = x.position(i) + x.bandwidth() / 2.0;
        svg.push_str(&format!(
            concat!(
                r#"<text transform="translate({cx:.2},{cy:.2}) rotate(-45)" text-anchor="end" "#,
                r#"dx="-.8em" dy=".15em" font-size="10" font-weight="600">{label}</text>"#
            ),
            cx = cx,
            cy = height + 12.0,
            label = member,
        ));
    }

    svg.push_str("</g></svg>");
    log(
        Level::Debug,
        Domain::Matrix,
        "svg_rendered",
        obj(&[
            ("cells_drawn", v_num(drawn as f64)),
            ("container_width", v_num(container_width)),
        ]),
    );
    svg
}
