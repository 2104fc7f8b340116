/// Splits a 0xRRGGBB colour into sRGB components in [0, 1]
pub fn hex_to_srgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// 0xRRGGBB to linear RGB, for shading on an sRGB surface
pub fn hex_to_linear(hex: u32) -> [f32; 3] {
    hex_to_srgb(hex).map(srgb_to_linear)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_srgb_channels() {
        let rgb = hex_to_srgb(0x6188ea);
        assert!((rgb[0] - 0x61 as f32 / 255.0).abs() < 1e-6);
        assert!((rgb[1] - 0x88 as f32 / 255.0).abs() < 1e-6);
        assert!((rgb[2] - 0xea as f32 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_linear_endpoints() {
        assert_eq!(hex_to_linear(0x000000), [0.0, 0.0, 0.0]);
        let white = hex_to_linear(0xffffff);
        assert!(white.iter().all(|c| (c - 1.0).abs() < 1e-5));
    }

    #[test]
    fn test_linear_is_darker_than_srgb() {
        let srgb = hex_to_srgb(0x404040);
        let linear = hex_to_linear(0x404040);
        assert!(linear[0] < srgb[0]);
    }
}
