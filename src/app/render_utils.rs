use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2, vec2};

use bubble_timeline::chart::QuadtreeCell;

pub(super) const BACKGROUND: Color32 = Color32::from_rgb(19, 23, 29);
pub(super) const AXIS_COLOR: Color32 = Color32::from_gray(170);

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

/// Dark text on light fills, light text on dark ones.
pub(super) fn label_color(fill: Color32) -> Color32 {
    let luminance =
        (0.299 * fill.r() as f32) + (0.587 * fill.g() as f32) + (0.114 * fill.b() as f32);
    if luminance > 150.0 {
        Color32::from_gray(24)
    } else {
        Color32::from_gray(245)
    }
}

pub(super) fn chart_to_screen(rect: Rect, position: Vec2) -> Pos2 {
    rect.min + position
}

pub(super) fn draw_quadtree_cells(painter: &Painter, rect: Rect, cells: &[QuadtreeCell]) {
    for cell in cells {
        let min = chart_to_screen(rect, cell.center - vec2(cell.half_extent, cell.half_extent));
        let max = chart_to_screen(rect, cell.center + vec2(cell.half_extent, cell.half_extent));

        let alpha = if cell.is_leaf { 110 } else { 55 };
        let line_width: f32 = (1.4_f32 - (cell.depth as f32 * 0.09_f32)).clamp(0.45_f32, 1.4_f32);
        let stroke = Stroke::new(
            line_width,
            Color32::from_rgba_unmultiplied(106, 198, 255, alpha),
        );

        let top_right = Pos2::new(max.x, min.y);
        let bottom_left = Pos2::new(min.x, max.y);
        painter.line_segment([min, top_right], stroke);
        painter.line_segment([top_right, max], stroke);
        painter.line_segment([max, bottom_left], stroke);
        painter.line_segment([bottom_left, min], stroke);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_endpoints_return_inputs() {
        let base = Color32::from_rgb(10, 20, 30);
        let overlay = Color32::from_rgb(200, 100, 0);
        assert_eq!(blend_color(base, overlay, 0.0), base);
        assert_eq!(blend_color(base, overlay, 1.0), overlay);
    }

    #[test]
    fn label_colour_contrasts_with_fill() {
        assert_eq!(label_color(Color32::from_rgb(0xf7, 0xfc, 0xb9)), Color32::from_gray(24));
        assert_eq!(label_color(Color32::from_rgb(0x75, 0x6b, 0xb1)), Color32::from_gray(245));
    }
}
