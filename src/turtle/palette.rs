use crate::foundation::core::Rgba8;
use crate::foundation::error::{CakewalkError, CakewalkResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

impl Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let s = if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        };
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_literal(&s).map_err(serde::de::Error::custom)
    }
}

/// Result of color resolution: a palette hit or a literal fallback.
///
/// An explicit two-variant outcome rather than implicit coercion, so callers
/// can tell a themed color from a raw one when they care.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolvedColor {
    Named(Rgba8),
    Literal(Rgba8),
}

impl ResolvedColor {
    pub fn rgba(self) -> Rgba8 {
        match self {
            Self::Named(c) | Self::Literal(c) => c,
        }
    }
}

/// Immutable named-color table plus the ordered confetti color list.
///
/// Deserializable from JSON (`name -> "#RRGGBB[AA]"`); missing fields fall
/// back to the built-in birthday theme.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    colors: BTreeMap<String, Rgba8>,
    confetti: Vec<Rgba8>,
}

impl Default for Palette {
    fn default() -> Self {
        let named = [
            ("light_green", Rgba8::rgb(0xc5, 0xe8, 0xc8)),
            ("medium_green", Rgba8::rgb(0xa3, 0xd2, 0xa7)),
            ("light_yellow", Rgba8::rgb(0xf7, 0xe8, 0xaa)),
            ("cream", Rgba8::rgb(0xff, 0xfc, 0xeb)),
            ("off_white", Rgba8::rgb(0xff, 0xfd, 0xf4)),
            ("brown", Rgba8::rgb(0x8b, 0x5a, 0x2b)),
            ("dark_brown", Rgba8::rgb(0x5e, 0x44, 0x25)),
            ("orange", Rgba8::rgb(0xff, 0xa5, 0x00)),
            ("golden_yellow", Rgba8::rgb(0xff, 0xb7, 0x32)),
            ("teal", Rgba8::rgb(0x66, 0xcc, 0xcc)),
            ("flame_orange", Rgba8::rgb(0xff, 0x66, 0x00)),
            ("sky_blue", Rgba8::rgb(0x87, 0xce, 0xeb)),
            ("light_steel", Rgba8::rgb(0xb0, 0xc4, 0xde)),
        ];
        let confetti = [
            Rgba8::rgb(0x4c, 0xaf, 0x50),
            Rgba8::rgb(0xff, 0xc1, 0x07),
            Rgba8::rgb(0x21, 0x96, 0xf3),
            Rgba8::rgb(0xff, 0x57, 0x22),
            Rgba8::rgb(0x9c, 0x27, 0xb0),
            Rgba8::rgb(0x3f, 0x51, 0xb5),
            Rgba8::rgb(0x00, 0xbc, 0xd4),
            Rgba8::rgb(0x00, 0x96, 0x88),
        ];

        Self {
            colors: named
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v))
                .collect(),
            confetti: confetti.to_vec(),
        }
    }
}

impl Palette {
    /// Resolve a palette key, falling back to a literal color value on miss.
    ///
    /// Only a double miss (not a key, not parseable as a literal) errors.
    pub fn resolve(&self, spec: &str) -> CakewalkResult<ResolvedColor> {
        if let Some(&c) = self.colors.get(spec) {
            return Ok(ResolvedColor::Named(c));
        }
        parse_literal(spec)
            .map(ResolvedColor::Literal)
            .map_err(CakewalkError::color)
    }

    pub fn confetti(&self) -> &[Rgba8] {
        &self.confetti
    }

    pub fn validate(&self) -> CakewalkResult<()> {
        if self.confetti.is_empty() {
            return Err(CakewalkError::validation(
                "palette confetti list must be non-empty",
            ));
        }
        Ok(())
    }
}

/// Parse a literal color: `#RRGGBB`, `#RRGGBBAA`, or one of the few CSS
/// names the scene passes as raw canvas colors.
fn parse_literal(s: &str) -> Result<Rgba8, String> {
    let trimmed = s.trim();
    if let Some(hex) = trimmed.strip_prefix('#') {
        return parse_hex(hex);
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "white" => Ok(Rgba8::WHITE),
        "black" => Ok(Rgba8::BLACK),
        "gray" | "grey" => Ok(Rgba8::rgb(0x80, 0x80, 0x80)),
        "gold" => Ok(Rgba8::rgb(0xff, 0xd7, 0x00)),
        _ => Err(format!("unknown color \"{trimmed}\"")),
    }
}

fn parse_hex(s: &str) -> Result<Rgba8, String> {
    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    // Length and slicing below are byte-based; non-ASCII input must not
    // reach them or a multi-byte char would split at a slice boundary.
    if !s.is_ascii() {
        return Err(format!("invalid hex color \"#{s}\""));
    }

    match s.len() {
        6 => Ok(Rgba8::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(Rgba8::rgba(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        )),
        _ => Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/turtle/palette.rs"]
mod tests;
