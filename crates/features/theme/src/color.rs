use serde::{Deserialize, Serialize};
use std::fmt;

/// A CSS color: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`, `rgba()`, `hsl()`, `hsla()`
/// or `transparent`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", schema(value_type = String, example = "#f59e0b"))]
pub struct Color(String);

impl Color {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `value` is one of the accepted CSS forms.
    #[must_use]
    pub fn is_valid(value: &str) -> bool {
        let value = value.trim().to_ascii_lowercase();
        if value == "transparent" {
            return true;
        }
        if let Some(hex) = value.strip_prefix('#') {
            return matches!(hex.len(), 3 | 4 | 6 | 8) && hex.bytes().all(|b| b.is_ascii_hexdigit());
        }

        let Some((function, rest)) = value.split_once('(') else {
            return false;
        };
        let Some(arguments) = rest.strip_suffix(')') else {
            return false;
        };
        if !matches!(function.trim(), "rgb" | "rgba" | "hsl" | "hsla") {
            return false;
        }

        let parts: Vec<&str> = arguments
            .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();

        matches!(parts.len(), 3 | 4) && parts.iter().all(|part| is_number(part))
    }
}

fn is_number(part: &str) -> bool {
    let digits = part.strip_suffix('%').or_else(|| part.strip_suffix("deg")).unwrap_or(part);
    !digits.is_empty() && digits.parse::<f64>().is_ok_and(f64::is_finite)
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if Self::is_valid(&value) {
            Ok(Self(value.trim().to_owned()))
        } else {
            Err(format!("`{value}` is not a valid CSS color"))
        }
    }
}

/// Trusted literals only (defaults); input from clients goes through `TryFrom<String>`.
impl From<&'static str> for Color {
    fn from(value: &'static str) -> Self {
        Self(value.to_owned())
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_css_forms() {
        for value in [
            "#fff",
            "#FFFA",
            "#0b0f1a",
            "#00000080",
            "transparent",
            "rgb(255, 255, 255)",
            "rgba(0,0,0,0.5)",
            "rgb(0 0 0 / 50%)",
            "hsl(210deg 40% 50%)",
            "HSLA(210, 40%, 50%, .3)",
        ] {
            assert!(Color::is_valid(value), "{value} should be accepted");
        }
    }

    #[test]
    fn rejects_everything_else() {
        for value in ["", "red", "#ggg", "#12345", "rgb(1,2)", "rgb(1,2,3", "url(x)", "rgb(a,b,c)"] {
            assert!(!Color::is_valid(value), "{value} should be rejected");
        }
    }

    #[test]
    fn deserialization_validates_and_trims() {
        let color: Color = serde_json::from_str("\" #abc \"").unwrap();
        assert_eq!(color.as_str(), "#abc");
        assert!(serde_json::from_str::<Color>("\"blue\"").is_err());
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#abc\"");
    }
}
