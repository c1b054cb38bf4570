/// Extra horizontal space counted per glyph when fitting a label.
pub const GLYPH_SPACING: f32 = 1.0;

pub fn font_size(radius: f32) -> f32 {
    radius.max(0.0).sqrt() * 2.4
}

/// Downward shift that centres the text's x-height on the circle centre.
pub fn baseline_offset(radius: f32) -> f32 {
    radius.max(0.0).sqrt() * 2.5 / 4.0
}

/// Average advance of one glyph of a measured label, plus spacing.
pub fn symbol_width(text_width: f32, char_count: usize) -> f32 {
    if char_count == 0 {
        return GLYPH_SPACING;
    }
    text_width / char_count as f32 + GLYPH_SPACING
}

/// Longest prefix whose glyphs fit across the circle's diameter, minus one
/// trailing glyph of inner margin. Works on chars, never splitting UTF-8.
pub fn trim_label(label: &str, symbol_width: f32, radius: f32) -> String {
    let char_count = label.chars().count();
    let diameter = if radius.is_finite() {
        radius.max(0.0) * 2.0
    } else {
        0.0
    };

    let mut fit = char_count;
    if symbol_width.is_finite() && symbol_width > 0.0 {
        while fit > 0 && fit as f32 * symbol_width > diameter {
            fit -= 1;
        }
    }

    label.chars().take(fit.saturating_sub(1)).collect()
}
