use crate::error::{RaceError, RaceResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Console makers in chronological order of their first console, with brand colours.
pub const MAKER_COLOURS: [(&str, Rgb8); 7] = [
    ("Magnavox", Rgb8::new(0xb4, 0x00, 0x00)),
    ("Atari", Rgb8::new(0x5a, 0x3a, 0x22)),
    ("Mattel", Rgb8::new(0xd4, 0xaf, 0x37)),
    ("Nintendo", Rgb8::new(0xe6, 0x00, 0x12)),
    ("Sega", Rgb8::new(0xff, 0x99, 0x00)),
    ("Sony", Rgb8::new(0x00, 0x30, 0x87)),
    ("Microsoft", Rgb8::new(0x0e, 0x7a, 0x0d)),
];

/// Ordinal company -> colour mapping.
///
/// Unknown companies are appended to the domain on first lookup and take the next colour,
/// wrapping around the range.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    domain: Vec<String>,
    range: Vec<Rgb8>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            domain: MAKER_COLOURS.iter().map(|(c, _)| c.to_string()).collect(),
            range: MAKER_COLOURS.iter().map(|(_, rgb)| *rgb).collect(),
        }
    }
}

impl Palette {
    pub fn new(range: Vec<Rgb8>) -> RaceResult<Self> {
        if range.is_empty() {
            return Err(RaceError::config("palette needs at least one colour"));
        }
        Ok(Self {
            domain: Vec::new(),
            range,
        })
    }

    pub fn colour(&mut self, company: &str) -> Rgb8 {
        let slot = match self.domain.iter().position(|c| c == company) {
            Some(i) => i,
            None => {
                self.domain.push(company.to_string());
                self.domain.len() - 1
            }
        };
        self.range[slot % self.range.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_lowercase_rrggbb() {
        assert_eq!(Rgb8::new(255, 153, 0).to_hex(), "#ff9900");
    }

    #[test]
    fn known_makers_keep_brand_colours() {
        let mut p = Palette::default();
        assert_eq!(p.colour("Nintendo").to_hex(), "#e60012");
        assert_eq!(p.colour("Microsoft").to_hex(), "#0e7a0d");
    }

    #[test]
    fn unknown_companies_wrap_around_range() {
        let mut p = Palette::default();
        // eighth domain slot wraps to the first colour
        assert_eq!(p.colour("Coleco"), p.colour("Magnavox"));
        assert_eq!(p.colour("NEC"), p.colour("Atari"));
        assert_eq!(p.colour("Coleco"), MAKER_COLOURS[0].1);
    }

    #[test]
    fn custom_palette_assigns_in_first_seen_order() {
        let mut p = Palette::new(vec![Rgb8::new(1, 2, 3), Rgb8::new(4, 5, 6)]).unwrap();
        assert_eq!(p.colour("B"), Rgb8::new(1, 2, 3));
        assert_eq!(p.colour("A"), Rgb8::new(4, 5, 6));
        assert_eq!(p.colour("B"), Rgb8::new(1, 2, 3));
        assert!(Palette::new(vec![]).is_err());
    }
}
