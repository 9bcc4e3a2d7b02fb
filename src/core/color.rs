// sRGB hex colors and the conversions the renderer needs.

/// Split `0xRRGGBB` into sRGB components in \[0, 1\].
#[inline]
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}

#[inline]
pub fn lerp_rgb(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Hex color to linear RGB, ready for an sRGB render target.
#[inline]
pub fn hex_to_linear(hex: u32) -> [f32; 3] {
    let [r, g, b] = hex_to_rgb(hex);
    [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b)]
}
