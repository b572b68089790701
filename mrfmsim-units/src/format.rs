//! Display formats for units and quantities
//!
//! Format specifications follow the usual short codes:
//! - `D`: default, `meter / second ** 2`
//! - `P`: pretty, `meter/second²`
//! - `C`: compact, `meter/second**2`
//!
//! A leading `~` switches to abbreviated symbols (`~P` renders `m/s²`).

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use crate::{UnitError, UnitTerm};

/// Layout of a unit expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Style {
    #[default]
    Default,
    Pretty,
    Compact,
}

/// A unit display format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Format {
    pub style: Style,
    /// Use symbols (`m`) instead of names (`meter`)
    pub abbreviated: bool,
}

impl Format {
    /// `D`
    pub const DEFAULT: Format = Format { style: Style::Default, abbreviated: false };

    /// `~P`
    pub const SHORT_PRETTY: Format = Format { style: Style::Pretty, abbreviated: true };

    /// `~C`
    pub const SHORT_COMPACT: Format = Format { style: Style::Compact, abbreviated: true };

    fn product_separator(&self) -> &'static str {
        match self.style {
            Style::Default => " * ",
            Style::Pretty => "·",
            Style::Compact => "*",
        }
    }

    fn quotient_separator(&self) -> &'static str {
        match self.style {
            Style::Default => " / ",
            Style::Pretty | Style::Compact => "/",
        }
    }

    fn power(&self, base: &str, exponent: u32) -> String {
        if exponent == 1 {
            return base.to_string();
        }
        match self.style {
            Style::Default => format!("{} ** {}", base, exponent),
            Style::Pretty => format!("{}{}", base, superscript(exponent)),
            Style::Compact => format!("{}**{}", base, exponent),
        }
    }

    /// Render a unit expression.
    ///
    /// Positive powers come first joined by the product separator, then each
    /// negative power is appended after a quotient separator.
    pub fn render(&self, terms: &[UnitTerm]) -> String {
        let label = |t: &UnitTerm| -> String {
            let base = if self.abbreviated { &t.symbol } else { &t.name };
            self.power(base, t.exponent.unsigned_abs())
        };

        let numerator: Vec<String> = terms.iter().filter(|t| t.exponent > 0).map(label).collect();
        let denominator: Vec<String> = terms.iter().filter(|t| t.exponent < 0).map(label).collect();

        let mut out = if numerator.is_empty() {
            if denominator.is_empty() {
                return String::new();
            }
            "1".to_string()
        } else {
            numerator.join(self.product_separator())
        };
        for term in denominator {
            out.push_str(self.quotient_separator());
            out.push_str(&term);
        }
        out
    }
}

fn superscript(exponent: u32) -> String {
    exponent
        .to_string()
        .chars()
        .map(|c| match c {
            '0' => '⁰',
            '1' => '¹',
            '2' => '²',
            '3' => '³',
            '4' => '⁴',
            '5' => '⁵',
            '6' => '⁶',
            '7' => '⁷',
            '8' => '⁸',
            '9' => '⁹',
            other => other,
        })
        .collect()
}

impl FromStr for Format {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (abbreviated, code) = match s.strip_prefix('~') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let style = match code {
            "" | "D" => Style::Default,
            "P" => Style::Pretty,
            "C" => Style::Compact,
            _ => return Err(UnitError::invalid_expression(s, "unknown format specification")),
        };
        Ok(Format { style, abbreviated })
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.abbreviated {
            write!(f, "~")?;
        }
        let code = match self.style {
            Style::Default => "D",
            Style::Pretty => "P",
            Style::Compact => "C",
        };
        write!(f, "{}", code)
    }
}

impl TryFrom<String> for Format {
    type Error = UnitError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Format> for String {
    fn from(format: Format) -> Self {
        format.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(symbol: &str, name: &str, exponent: i32) -> UnitTerm {
        UnitTerm {
            symbol: symbol.to_string(),
            name: name.to_string(),
            exponent,
        }
    }

    fn force_terms() -> Vec<UnitTerm> {
        vec![term("kg", "kilogram", 1), term("m", "meter", 1), term("s", "second", -2)]
    }

    #[test]
    fn test_render_styles() {
        let terms = force_terms();
        assert_eq!(Format::DEFAULT.render(&terms), "kilogram * meter / second ** 2");
        assert_eq!(Format::SHORT_PRETTY.render(&terms), "kg·m/s²");
        assert_eq!(Format::SHORT_COMPACT.render(&terms), "kg*m/s**2");
    }

    #[test]
    fn test_render_denominator_only() {
        let terms = vec![term("s", "second", -1)];
        assert_eq!(Format::SHORT_PRETTY.render(&terms), "1/s");
        assert_eq!(Format::DEFAULT.render(&terms), "1 / second");
        assert_eq!(Format::SHORT_PRETTY.render(&[]), "");
    }

    #[test]
    fn test_render_extreme_exponent() {
        let terms = vec![term("m", "meter", i32::MIN)];
        assert_eq!(Format::SHORT_PRETTY.render(&terms), "1/m²¹⁴⁷⁴⁸³⁶⁴⁸");
        assert_eq!(Format::DEFAULT.render(&terms), "1 / meter ** 2147483648");
    }

    #[test]
    fn test_parse_and_display() {
        let format: Format = "~P".parse().unwrap();
        assert_eq!(format, Format::SHORT_PRETTY);
        assert_eq!(format.to_string(), "~P");
        assert_eq!("".parse::<Format>().unwrap(), Format::DEFAULT);
        assert!("X".parse::<Format>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Format::SHORT_PRETTY).unwrap();
        assert_eq!(json, "\"~P\"");
        let back: Format = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Format::SHORT_PRETTY);
    }
}
