use rand::Rng;

/// A random light, soft colour as `#rrggbb`.
///
/// Hue is uniform over the wheel; saturation stays in 30–85 % and lightness
/// in 65–85 % so every layer reads well on a dark background.
pub fn pastel<R: Rng + ?Sized>(rng: &mut R) -> String {
    let hue = rng.gen_range(0.0..360.0);
    let saturation = rng.gen_range(30.0..85.0);
    let lightness = rng.gen_range(65.0..85.0);
    hsl_to_hex(hue, saturation, lightness)
}

/// Convert HSL (degrees, percent, percent) to a hex colour string.
pub fn hsl_to_hex(hue: f64, saturation: f64, lightness: f64) -> String {
    let s = saturation / 100.0;
    let l = lightness / 100.0;

    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let h = hue / 360.0;
        (
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    };

    format!("#{:02x}{:02x}{:02x}", to_byte(r), to_byte(g), to_byte(b))
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_byte(channel: f64) -> u8 {
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Parse `#rrggbb` into its channels.
pub fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn primary_hues() {
        assert_eq!(hsl_to_hex(0.0, 100.0, 50.0), "#ff0000");
        assert_eq!(hsl_to_hex(120.0, 100.0, 50.0), "#00ff00");
        assert_eq!(hsl_to_hex(240.0, 100.0, 50.0), "#0000ff");
    }

    #[test]
    fn grey_when_unsaturated() {
        assert_eq!(hsl_to_hex(200.0, 0.0, 50.0), "#808080");
    }

    #[test]
    fn pastels_are_light() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let color = pastel(&mut rng);
            let (r, g, b) = parse_hex(&color).unwrap();
            // Lightness ≥ 65 % keeps the brightest channel high.
            assert!(r.max(g).max(b) >= 165, "{color}");
        }
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_hex("#12345"), None);
        assert_eq!(parse_hex("123456"), None);
        assert_eq!(parse_hex("#zz0000"), None);
        assert_eq!(parse_hex("#0a0B0c"), Some((10, 11, 12)));
    }
}
