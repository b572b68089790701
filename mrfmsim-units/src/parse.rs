//! Unit string parsing - parse expressions like "nm", "kg*m/s^2" or "meter / second ** 2"

use crate::units::UnitTable;
use crate::{Unit, UnitError};

/// Parse a unit string into a Unit
///
/// Supported formats:
/// - Simple: "m", "mT", "nanometer"
/// - Powers: "m^2", "s**-1", "m²", "s⁻¹"
/// - Products: "m*s", "kg·m", "N m"
/// - Quotients: "m/s", "kg/m^2/s"
/// - Dimensionless: "", "1", "1/s"
pub fn parse_unit(table: &UnitTable, s: &str) -> Result<Unit, UnitError> {
    let s = s.trim();

    if s.is_empty() {
        // Empty string = dimensionless
        return Ok(Unit::dimensionless());
    }

    // Try simple lookup first
    if let Some(unit) = table.lookup(s) {
        return Ok(unit);
    }

    // Parse complex expression
    parse_unit_expression(table, s)
}

/// Parse a complex unit expression like "kg*m/s^2"
fn parse_unit_expression(table: &UnitTable, s: &str) -> Result<Unit, UnitError> {
    if s.contains(['(', ')']) {
        return Err(UnitError::invalid_expression(s, "parentheses are not supported"));
    }

    let normalized = normalize(s);
    let mut parts = normalized.split('/');

    // split always yields at least one part
    let numerator = parts.next().unwrap_or_default();
    if numerator.trim().is_empty() {
        return Err(UnitError::invalid_expression(s, "missing numerator"));
    }
    let mut result = parse_product(table, s, numerator)?;

    for part in parts {
        if part.trim().is_empty() {
            return Err(UnitError::invalid_expression(s, "missing denominator"));
        }
        result = result.try_divide(&parse_product(table, s, part)?)?;
    }

    Ok(result)
}

/// Rewrite `**` as `^` and glue exponents to their base ("s ** 2" -> "s^2")
fn normalize(s: &str) -> String {
    let mut out = s.replace("**", "^");
    while out.contains(" ^") || out.contains("^ ") {
        out = out.replace(" ^", "^").replace("^ ", "^");
    }
    out
}

/// Parse a product of units like "kg*m" or "m^2 s"
fn parse_product(table: &UnitTable, expr: &str, s: &str) -> Result<Unit, UnitError> {
    s.split(['*', '·', ' '])
        .filter(|p| !p.is_empty())
        .try_fold(Unit::dimensionless(), |acc, factor| {
            acc.try_multiply(&parse_power(table, expr, factor)?)
        })
}

/// Parse a unit with optional power like "m^2", "s^-1" or "m²"
fn parse_power(table: &UnitTable, expr: &str, s: &str) -> Result<Unit, UnitError> {
    // Check for power notation
    if let Some((base, exp_str)) = s.split_once('^') {
        let exponent: i32 = exp_str
            .parse()
            .map_err(|_| UnitError::invalid_expression(expr, format!("invalid exponent '{}'", exp_str)))?;
        return lookup_base_unit(table, expr, base)?.try_power(exponent);
    }

    // Check for superscript notation (², ⁻¹, etc.)
    if let Some((base, exponent)) = parse_superscript(s) {
        return lookup_base_unit(table, expr, base)?.try_power(exponent);
    }

    // Simple unit
    lookup_base_unit(table, expr, s)
}

/// Split trailing superscript exponents like m², s⁻¹
fn parse_superscript(s: &str) -> Option<(&str, i32)> {
    let start = s
        .char_indices()
        .rev()
        .take_while(|(_, c)| from_superscript(*c).is_some())
        .last()
        .map(|(i, _)| i)?;

    let digits: String = s[start..].chars().filter_map(from_superscript).collect();
    let exponent = digits.parse().ok()?;
    Some((&s[..start], exponent))
}

fn from_superscript(c: char) -> Option<char> {
    let plain = match c {
        '⁻' => '-',
        '⁰' => '0',
        '¹' => '1',
        '²' => '2',
        '³' => '3',
        '⁴' => '4',
        '⁵' => '5',
        '⁶' => '6',
        '⁷' => '7',
        '⁸' => '8',
        '⁹' => '9',
        _ => return None,
    };
    Some(plain)
}

/// Look up an atomic unit by symbol, name or alias
fn lookup_base_unit(table: &UnitTable, expr: &str, s: &str) -> Result<Unit, UnitError> {
    let s = s.trim();

    if s.is_empty() {
        return Err(UnitError::invalid_expression(expr, "missing unit before exponent"));
    }
    if s == "1" {
        return Ok(Unit::dimensionless());
    }

    table
        .lookup(s)
        .ok_or_else(|| UnitError::UnknownUnit(s.to_string()))
}

/// Parse a quantity string like "5 m", "100kg" or "1e-9 N"
pub fn parse_quantity_string(table: &UnitTable, s: &str) -> Result<(f64, Unit), UnitError> {
    let s = s.trim();
    let split_pos = number_prefix_len(s);

    if split_pos == 0 {
        return Err(UnitError::invalid_expression(s, "no number found"));
    }

    let num_str = &s[..split_pos];
    let unit_str = s[split_pos..].trim();

    let value: f64 = num_str
        .parse()
        .map_err(|_| UnitError::invalid_expression(s, format!("invalid number '{}'", num_str)))?;

    Ok((value, parse_unit(table, unit_str)?))
}

/// Byte length of the leading floating point literal
fn number_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let mantissa_start = end;
    while end < bytes.len() && (bytes[end].is_ascii_digit() || bytes[end] == b'.') {
        end += 1;
    }
    if end == mantissa_start {
        return 0;
    }

    // Exponent only when digits follow, so "5 eV" and "5eV" keep their unit
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }
    end
}
