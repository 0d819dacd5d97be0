use std::str::FromStr;

use eframe::egui::Color32;
use palette::Srgb;

// ---------------------------------------------------------------------------
// Fixed two-colour palette
// ---------------------------------------------------------------------------

/// Fill for the first selected neighbourhood.
pub const FIRST_HEX: &str = "#ae68d4";
/// Fill for the second selected neighbourhood.
pub const SECOND_HEX: &str = "#6993db";
/// Outline shared by every density area.
pub const OUTLINE_HEX: &str = "#a75ea8";
/// Area opacity; curves overlap and must stay readable.
pub const AREA_OPACITY: f32 = 0.4;

/// An sRGB colour kept in both the forms the chart needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartColor(Srgb<u8>);

impl ChartColor {
    /// Parse a `#rrggbb` literal. Falls back to gray on malformed input.
    pub fn from_hex(hex: &str) -> Self {
        let rgb = Srgb::<u8>::from_str(hex).unwrap_or_else(|e| {
            log::warn!("bad colour literal {hex:?}: {e}");
            Srgb::new(128, 128, 128)
        });
        ChartColor(rgb)
    }

    pub fn to_color32(self) -> Color32 {
        Color32::from_rgb(self.0.red, self.0.green, self.0.blue)
    }

    /// Same colour with the area opacity applied, for filled regions.
    pub fn to_area_color32(self) -> Color32 {
        Color32::from_rgba_unmultiplied(
            self.0.red,
            self.0.green,
            self.0.blue,
            (AREA_OPACITY * 255.0).round() as u8,
        )
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0.red, self.0.green, self.0.blue)
    }
}

// ---------------------------------------------------------------------------
// Colour domain: selected name → colour
// ---------------------------------------------------------------------------

/// Maps the two currently selected neighbourhoods onto the fixed palette.
///
/// The domain is keyed to the selection, not to the data: whichever name is
/// picked in the first selector gets [`FIRST_HEX`], the second gets
/// [`SECOND_HEX`]. Selecting the same name twice yields a single entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorDomain {
    entries: Vec<(String, ChartColor)>,
}

impl ColorDomain {
    pub fn for_pair(first: &str, second: &str) -> Self {
        let mut entries = vec![(first.to_string(), ChartColor::from_hex(FIRST_HEX))];
        if second != first {
            entries.push((second.to_string(), ChartColor::from_hex(SECOND_HEX)));
        }
        ColorDomain { entries }
    }

    /// Look up the colour for a selected name.
    pub fn color_for(&self, name: &str) -> Option<ChartColor> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| *c)
    }

    /// Legend entries in selection order.
    pub fn legend_entries(&self) -> &[(String, ChartColor)] {
        &self.entries
    }
}
