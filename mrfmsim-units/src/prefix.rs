//! SI prefixes

/// A decimal SI prefix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prefix {
    pub name: &'static str,
    pub symbol: &'static str,
    pub factor: f64,
}

const fn prefix(name: &'static str, symbol: &'static str, factor: f64) -> Prefix {
    Prefix { name, symbol, factor }
}

/// name, symbol, scale
pub static PREFIXES: [Prefix; 20] = [
    prefix("yotta", "Y", 1e24),
    prefix("zetta", "Z", 1e21),
    prefix("exa", "E", 1e18),
    prefix("peta", "P", 1e15),
    prefix("tera", "T", 1e12),
    prefix("giga", "G", 1e9),
    prefix("mega", "M", 1e6),
    prefix("kilo", "k", 1e3),
    prefix("hecto", "h", 1e2),
    prefix("deka", "da", 1e1),
    prefix("deci", "d", 1e-1),
    prefix("centi", "c", 1e-2),
    prefix("milli", "m", 1e-3),
    prefix("micro", "µ", 1e-6),
    prefix("nano", "n", 1e-9),
    prefix("pico", "p", 1e-12),
    prefix("femto", "f", 1e-15),
    prefix("atto", "a", 1e-18),
    prefix("zepto", "z", 1e-21),
    prefix("yocto", "y", 1e-24),
];

/// Extra spellings accepted for prefix symbols
const SYMBOL_ALIASES: [(&str, &str); 2] = [("u", "µ"), ("μ", "µ")];

fn by_symbol(symbol: &str) -> Option<&'static Prefix> {
    let symbol = SYMBOL_ALIASES
        .iter()
        .find(|(alias, _)| *alias == symbol)
        .map_or(symbol, |(_, canonical)| *canonical);
    PREFIXES.iter().find(|p| p.symbol == symbol)
}

/// Split a prefixed symbol such as "mT" into (prefix, remainder).
///
/// Returns every split whose prefix part is a known prefix symbol, longest
/// prefix first; the caller decides which remainder names a unit.
pub fn split_symbol(s: &str) -> Vec<(&'static Prefix, &str)> {
    let mut splits: Vec<(&'static Prefix, &str)> = s
        .char_indices()
        .skip(1)
        .map(|(i, _)| s.split_at(i))
        .filter_map(|(head, rest)| by_symbol(head).map(|p| (p, rest)))
        .collect();
    splits.sort_by_key(|(p, _)| std::cmp::Reverse(p.symbol.chars().count()));
    splits
}

/// Split a prefixed long name such as "attonewton" into (prefix, remainder)
pub fn split_name(s: &str) -> Option<(&'static Prefix, &str)> {
    PREFIXES
        .iter()
        .filter_map(|p| s.strip_prefix(p.name).map(|rest| (p, rest)))
        .find(|(_, rest)| !rest.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_symbol() {
        let splits = split_symbol("mT");
        assert_eq!(splits.len(), 1);
        assert_eq!(splits[0].0.name, "milli");
        assert_eq!(splits[0].1, "T");
    }

    #[test]
    fn test_split_symbol_prefers_longest() {
        // "dam" may be deka-meter or deci-"am"
        let splits = split_symbol("dam");
        assert_eq!(splits[0].0.name, "deka");
        assert_eq!(splits[0].1, "m");
    }

    #[test]
    fn test_micro_spellings() {
        for s in ["ug", "µg", "μg"] {
            let splits = split_symbol(s);
            assert_eq!(splits[0].0.name, "micro", "{}", s);
            assert_eq!(splits[0].1, "g");
        }
    }

    #[test]
    fn test_split_name() {
        let (p, rest) = split_name("attonewton").unwrap();
        assert_eq!(p.factor, 1e-18);
        assert_eq!(rest, "newton");
        assert!(split_name("milli").is_none());
        assert!(split_name("meter").is_none());
    }
}
