use std::fmt;

use serde::{Deserialize, Serialize};

/// Default palette offered to clients.
pub const PALETTE: [&str; 17] = [
    "#ff0000", "#ff8800", "#ffff00", "#88ff00", "#00ff00", "#00ff88", "#00ffff", "#0088ff",
    "#0000ff", "#8800ff", "#ff00ff", "#ff0088", "#8B4513", "#ffffff", "#cccccc", "#888888",
    "#000000",
];

/// `#RRGGBB` colour. Case is preserved as given.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn parse(raw: &str) -> Option<Self> {
        is_hex_color(raw).then(|| HexColor(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Matches `^#[0-9A-Fa-f]{6}$`.
pub fn is_hex_color(raw: &str) -> bool {
    let b = raw.as_bytes();
    b.len() == 7 && b[0] == b'#' && b[1..].iter().all(u8::is_ascii_hexdigit)
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_hex_color(&value) {
            Ok(HexColor(value))
        } else {
            Err(format!("invalid hex colour: {value}"))
        }
    }
}

impl From<HexColor> for String {
    fn from(c: HexColor) -> Self {
        c.0
    }
}
