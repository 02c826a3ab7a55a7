use palette::{FromColor, Srgb, Yxy};

/// sRGB to CIE 1931 xy chromaticity, the hub's native color representation.
///
/// Black has no chromaticity and maps to (0, 0).
pub fn rgb_to_xy(r: u8, g: u8, b: u8) -> (f32, f32) {
    if r == 0 && g == 0 && b == 0 {
        return (0.0, 0.0);
    }

    let rgb = Srgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
    );
    let yxy = Yxy::from_color(rgb.into_linear());

    (yxy.x, yxy.y)
}
