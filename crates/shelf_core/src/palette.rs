use strum_macros::Display;

use crate::constants::{
    CONFIDENCE_HIGH, CONFIDENCE_MEDIUM, LIFT_MODERATE, LIFT_STRONG, LIFT_VERY_STRONG, LIFT_WEAK,
    PALETTE_LEN, RANK_LIGHTNESS_BASE, RANK_LIGHTNESS_MAX, RANK_LIGHTNESS_STEP,
};

/// Plain sRGB triple, framework independent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Hex string without alpha, for SVG output
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Converts HSL (h in degrees, s and l in 0..=100) to sRGB.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Rgb {
    let h = h.rem_euclid(360.0);
    let s = (s / 100.0).clamp(0.0, 1.0);
    let l = (l / 100.0).clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    Rgb::new(
        ((r1 + m) * 255.0).round() as u8,
        ((g1 + m) * 255.0).round() as u8,
        ((b1 + m) * 255.0).round() as u8,
    )
}

/// One entry of the fixed shelf color palette: the three style slots a
/// shelf widget uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShelfTheme {
    pub name: &'static str,
    pub fill: Rgb,
    pub border: Rgb,
    pub text: Rgb,
}

const SHELF_THEMES: [ShelfTheme; PALETTE_LEN] = [
    ShelfTheme {
        name: "kahve",
        fill: Rgb::new(0xd7, 0xcc, 0xc8),
        border: Rgb::new(0x8d, 0x6e, 0x63),
        text: Rgb::new(0x3e, 0x27, 0x23),
    },
    ShelfTheme {
        name: "mavi",
        fill: Rgb::new(0xbb, 0xde, 0xfb),
        border: Rgb::new(0x42, 0xa5, 0xf5),
        text: Rgb::new(0x0d, 0x47, 0xa1),
    },
    ShelfTheme {
        name: "yesil",
        fill: Rgb::new(0xc8, 0xe6, 0xc9),
        border: Rgb::new(0x66, 0xbb, 0x6a),
        text: Rgb::new(0x1b, 0x5e, 0x20),
    },
    ShelfTheme {
        name: "sari",
        fill: Rgb::new(0xff, 0xf9, 0xc4),
        border: Rgb::new(0xff, 0xee, 0x58),
        text: Rgb::new(0x82, 0x77, 0x17),
    },
    ShelfTheme {
        name: "mor",
        fill: Rgb::new(0xe1, 0xbe, 0xe7),
        border: Rgb::new(0xab, 0x47, 0xbc),
        text: Rgb::new(0x4a, 0x14, 0x8c),
    },
    ShelfTheme {
        name: "turuncu",
        fill: Rgb::new(0xff, 0xe0, 0xb2),
        border: Rgb::new(0xff, 0xa7, 0x26),
        text: Rgb::new(0xe6, 0x51, 0x00),
    },
    ShelfTheme {
        name: "camgobegi",
        fill: Rgb::new(0xb2, 0xeb, 0xf2),
        border: Rgb::new(0x26, 0xc6, 0xda),
        text: Rgb::new(0x00, 0x60, 0x64),
    },
    ShelfTheme {
        name: "pembe",
        fill: Rgb::new(0xf8, 0xbb, 0xd0),
        border: Rgb::new(0xec, 0x40, 0x7a),
        text: Rgb::new(0x88, 0x0e, 0x4f),
    },
];

/// Returns the palette entry for a stored theme index.
///
/// The palette is a closed table: out-of-range indices clamp to the last
/// entry instead of round-tripping unchecked through shelf state.
pub fn shelf_theme(index: usize) -> &'static ShelfTheme {
    &SHELF_THEMES[index.min(PALETTE_LEN - 1)]
}

/// Cyclic palette index for a freshly created shelf id.
pub fn theme_index_for_id(id: u32) -> usize {
    (id.saturating_sub(1) as usize) % PALETTE_LEN
}

/// Rule card tier by confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ConfidenceTier {
    #[strum(serialize = "Yüksek Güven")]
    High,
    #[strum(serialize = "Orta Güven")]
    Medium,
    #[strum(serialize = "Düşük Güven")]
    Low,
}

impl ConfidenceTier {
    pub fn of(confidence: f64) -> Self {
        if confidence > CONFIDENCE_HIGH {
            ConfidenceTier::High
        } else if confidence > CONFIDENCE_MEDIUM {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    /// Accent color of the rule card's left border
    pub fn accent(&self) -> Rgb {
        match self {
            ConfidenceTier::High => Rgb::new(0x28, 0xa7, 0x45),
            ConfidenceTier::Medium => Rgb::new(0x00, 0x7b, 0xff),
            ConfidenceTier::Low => Rgb::new(0x6c, 0x75, 0x7d),
        }
    }
}

/// Relation strength class shared by map edges, matrix cells and details
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum RelationTier {
    #[strum(serialize = "Çok Güçlü İlişki")]
    VeryStrong,
    #[strum(serialize = "Güçlü İlişki")]
    Strong,
    #[strum(serialize = "Orta İlişki")]
    Moderate,
    #[strum(serialize = "Zayıf İlişki")]
    Weak,
    #[strum(serialize = "Çok Zayıf İlişki")]
    VeryWeak,
}

impl RelationTier {
    pub fn of(lift: f64) -> Self {
        if lift > LIFT_VERY_STRONG {
            RelationTier::VeryStrong
        } else if lift > LIFT_STRONG {
            RelationTier::Strong
        } else if lift > LIFT_MODERATE {
            RelationTier::Moderate
        } else if lift > LIFT_WEAK {
            RelationTier::Weak
        } else {
            RelationTier::VeryWeak
        }
    }

    /// Edge stroke width on the shelf map
    pub fn edge_width(&self) -> f32 {
        match self {
            RelationTier::VeryStrong => 4.0,
            RelationTier::Strong => 3.0,
            RelationTier::Moderate => 2.0,
            RelationTier::Weak => 1.5,
            RelationTier::VeryWeak => 1.0,
        }
    }

    /// Edge color and base opacity for maximize mode (greens down to gray)
    pub fn edge_style_maximize(&self) -> (Rgb, f32) {
        match self {
            RelationTier::VeryStrong => (Rgb::new(40, 167, 69), 0.7),
            RelationTier::Strong => (Rgb::new(92, 184, 92), 0.6),
            RelationTier::Moderate => (Rgb::new(23, 162, 184), 0.5),
            RelationTier::Weak => (Rgb::new(108, 117, 125), 0.4),
            RelationTier::VeryWeak => (Rgb::new(200, 200, 200), 0.5),
        }
    }

    /// Edge color and base opacity for minimize mode (reds down to orange)
    pub fn edge_style_minimize(&self) -> (Rgb, f32) {
        match self {
            RelationTier::VeryStrong => (Rgb::new(220, 53, 69), 0.7),
            RelationTier::Strong => (Rgb::new(255, 107, 107), 0.6),
            RelationTier::Moderate => (Rgb::new(255, 193, 7), 0.5),
            RelationTier::Weak => (Rgb::new(255, 136, 0), 0.4),
            RelationTier::VeryWeak => (Rgb::new(200, 200, 200), 0.5),
        }
    }

    /// Fill for a relationship matrix cell
    pub fn cell_color(&self) -> Rgb {
        match self {
            RelationTier::VeryStrong => Rgb::new(0x1b, 0x5e, 0x20),
            RelationTier::Strong => Rgb::new(0x2e, 0x7d, 0x32),
            RelationTier::Moderate => Rgb::new(0x66, 0xbb, 0x6a),
            RelationTier::Weak => Rgb::new(0xa5, 0xd6, 0xa7),
            RelationTier::VeryWeak => Rgb::new(0xe8, 0xf5, 0xe9),
        }
    }

    /// Dark cells need light text
    pub fn cell_text_color(&self) -> Rgb {
        match self {
            RelationTier::VeryStrong | RelationTier::Strong => Rgb::new(0xff, 0xff, 0xff),
            _ => Rgb::new(0x21, 0x21, 0x21),
        }
    }
}

/// Node lightness for a backend-supplied rank (rank 1 is darkest).
pub fn rank_lightness(rank: u32) -> f32 {
    (RANK_LIGHTNESS_BASE + rank as f32 * RANK_LIGHTNESS_STEP).min(RANK_LIGHTNESS_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shelf_theme_clamps_out_of_range() {
        // Stored indices beyond the palette must not panic, they clamp
        assert_eq!(shelf_theme(PALETTE_LEN + 5), &SHELF_THEMES[PALETTE_LEN - 1]);
        assert_eq!(shelf_theme(0), &SHELF_THEMES[0]);
    }

    #[test]
    fn test_theme_index_cycles() {
        assert_eq!(theme_index_for_id(1), 0);
        assert_eq!(theme_index_for_id(8), 7);
        assert_eq!(theme_index_for_id(9), 0);
        assert_eq!(theme_index_for_id(0), 0); // defensive: id 0 never allocated
    }

    #[test]
    fn test_confidence_tiers() {
        assert_eq!(ConfidenceTier::of(0.71), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::of(0.7), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::of(0.41), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::of(0.4), ConfidenceTier::Low);
    }

    #[test]
    fn test_relation_tiers() {
        assert_eq!(RelationTier::of(3.1), RelationTier::VeryStrong);
        assert_eq!(RelationTier::of(3.0), RelationTier::Strong);
        assert_eq!(RelationTier::of(2.5), RelationTier::Strong);
        assert_eq!(RelationTier::of(1.6), RelationTier::Moderate);
        assert_eq!(RelationTier::of(1.25), RelationTier::Weak);
        assert_eq!(RelationTier::of(1.05), RelationTier::VeryWeak);
    }

    #[test]
    fn test_rank_lightness_saturates() {
        assert_eq!(rank_lightness(1), 30.0);
        assert_eq!(rank_lightness(3), 50.0);
        assert_eq!(rank_lightness(50), 90.0);
    }

    #[test]
    fn test_hsl_to_rgb_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 100.0, 50.0), Rgb::new(255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, 100.0, 50.0), Rgb::new(0, 255, 0));
        assert_eq!(hsl_to_rgb(240.0, 100.0, 50.0), Rgb::new(0, 0, 255));
        assert_eq!(hsl_to_rgb(0.0, 0.0, 100.0), Rgb::new(255, 255, 255));
    }
}
