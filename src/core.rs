//! Rule tables and compiled patterns.
//!
//! Every rewrite table is declared here and assembled once by
//! [`VachanInner::new`]; nothing is mutated afterwards, so a single
//! instance can be shared freely across threads.

use regex::Regex;
use std::collections::{HashMap, HashSet};

/// How an abbreviation token is terminated in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DotRule {
    /// The trailing period is optional (titles: "Mr", "Mr.").
    Optional,
    /// The trailing period is required (months, organizations), so the
    /// bare word is left alone ("Jan" the name vs "Jan." the month).
    Required,
}

/// Title and honorific abbreviations; the period is optional.
const TITLE_ABBREVIATIONS: [(&str, &str); 21] = [
    ("Mr", "Mister"),
    ("Mrs", "Misses"),
    ("Ms", "Miss"),
    ("Dr", "Doctor"),
    ("Prof", "Professor"),
    ("Hon'ble", "Honourable"),
    ("Sr", "Senior"),
    ("Jr", "Junior"),
    ("St", "Saint"),
    ("Rev", "Reverend"),
    ("Fr", "Father"),
    ("Smt", "Srimati"),
    ("Sh", "Shri"),
    ("Er", "Engineer"),
    ("Ar", "Architect"),
    ("Col", "Colonel"),
    ("Gen", "General"),
    ("Capt", "Captain"),
    ("Maj", "Major"),
    ("Lt", "Lieutenant"),
    ("Sgt", "Sergeant"),
];

/// Organization, place and month abbreviations; the period is required.
const DOTTED_ABBREVIATIONS: [(&str, &str); 26] = [
    ("Dept", "Department"),
    ("Org", "Organization"),
    ("Univ", "University"),
    ("Ltd", "Limited"),
    ("Pvt", "Private"),
    ("Dist", "District"),
    ("Hwy", "Highway"),
    ("Ave", "Avenue"),
    ("Rd", "Road"),
    ("Inc", "Incorporated"),
    ("Co", "Company"),
    ("Bros", "Brothers"),
    ("Est", "Established"),
    ("Mfg", "Manufacturing"),
    ("Regd", "Registered"),
    ("Jan", "January"),
    ("Feb", "February"),
    ("Mar", "March"),
    ("Apr", "April"),
    ("Jun", "June"),
    ("Jul", "July"),
    ("Aug", "August"),
    ("Sept", "September"),
    ("Oct", "October"),
    ("Nov", "November"),
    ("Dec", "December"),
];

/// Prefix codes for letter-number combinations ("Q3", "Ch5", "V1.2").
/// Matching is case-insensitive; the lookup is exact, with the literal
/// prefix as fallback.
const LETTER_PREFIXES: [(&str, &str); 20] = [
    ("Q", "Quarter"),
    ("P", "Phase"),
    ("V", "Version"),
    ("Ch", "Chapter"),
    ("Fig", "Figure"),
    ("Sec", "Section"),
    ("App", "Appendix"),
    ("Vol", "Volume"),
    ("Pg", "Page"),
    ("Rev", "Revision"),
    ("ID", "ID"),
    ("No", "Number"),
    ("Ref", "Reference"),
    ("Table", "Table"),
    ("Type", "Type"),
    ("Level", "Level"),
    ("Grade", "Grade"),
    ("Stage", "Stage"),
    ("Step", "Step"),
    ("Part", "Part"),
];

/// Measurement unit symbols; case-sensitive ("MB" is not "mb").
const MEASUREMENT_UNITS: [(&str, &str); 23] = [
    ("°C", "degrees celsius"),
    ("°F", "degrees fahrenheit"),
    ("m", "metres"),
    ("cm", "centimetres"),
    ("mm", "millimetres"),
    ("km", "kilometres"),
    ("g", "grams"),
    ("kg", "kilograms"),
    ("mg", "milligrams"),
    ("l", "litres"),
    ("ml", "millilitres"),
    ("B", "bytes"),
    ("KB", "kilobytes"),
    ("MB", "megabytes"),
    ("GB", "gigabytes"),
    ("TB", "terabytes"),
    ("Hz", "hertz"),
    ("kHz", "kilohertz"),
    ("MHz", "megahertz"),
    ("GHz", "gigahertz"),
    ("m²", "square metres"),
    ("cm²", "square centimetres"),
    ("mm²", "square millimetres"),
];

/// Standalone symbols spelled out with padding spaces. The percent sign
/// stays in the table but is skipped at apply time; the percentage stage
/// owns it.
pub(crate) const SYMBOLS: [(&str, &str); 24] = [
    ("%", "percent"),
    ("@", "at"),
    ("&", "and"),
    ("+", "plus"),
    ("=", "equals"),
    ("/", "per"),
    ("#", "number"),
    ("*", "asterisk"),
    ("°", "degrees"),
    ("§", "section"),
    ("¶", "paragraph"),
    ("©", "copyright"),
    ("®", "registered"),
    ("™", "trademark"),
    ("~", "approximately"),
    ("^", "power"),
    ("<", "less than"),
    (">", "greater than"),
    ("≤", "less than or equal to"),
    ("≥", "greater than or equal to"),
    ("±", "plus or minus"),
    ("≈", "approximately equal to"),
    ("≠", "not equal to"),
    ("∞", "infinity"),
];

const CURRENCY_SYMBOLS: [(&str, &str); 6] = [
    ("Rs", "Rupees"),
    ("Rs.", "Rupees"),
    ("₹", "Rupees"),
    ("$", "Dollars"),
    ("€", "Euros"),
    ("£", "Pounds"),
];

/// Words that mark regnal or papal context for a following Roman numeral.
const TITLES: [&str; 17] = [
    "King", "Queen", "Pope", "Emperor", "Empress", "Czar", "Cardinal", "Bishop", "Saint",
    "Patriarch", "Caliph", "Sheikh", "Khan", "Sultan", "Rajah", "Maharaja", "Maharani",
];

#[derive(Debug)]
pub(crate) struct VachanInner {
    /// (pattern, replacement) in priority order; the "Govt.of" compound
    /// rule must stay ahead of the generic "Govt." rule.
    pub(crate) abbreviations: Vec<(Regex, String)>,
    pub(crate) letter_prefixes: HashMap<&'static str, &'static str>,
    pub(crate) letter_number_re: Regex,
    pub(crate) measurement_units: HashMap<&'static str, &'static str>,
    pub(crate) unit_re: Regex,
    pub(crate) currency_symbols: HashMap<&'static str, &'static str>,
    pub(crate) titles: HashSet<&'static str>,
}

impl VachanInner {
    pub(crate) fn new() -> Self {
        Self {
            abbreviations: build_abbreviation_rules(),
            letter_prefixes: LETTER_PREFIXES.into_iter().collect(),
            letter_number_re: build_letter_number_pattern(),
            measurement_units: MEASUREMENT_UNITS.into_iter().collect(),
            unit_re: build_unit_pattern(),
            currency_symbols: CURRENCY_SYMBOLS.into_iter().collect(),
            titles: TITLES.into_iter().collect(),
        }
    }
}

fn abbreviation_rule(abbr: &str, replacement: &str, dot: DotRule) -> (Regex, String) {
    let dot_pattern = match dot {
        DotRule::Optional => r"\.?",
        DotRule::Required => r"\.",
    };
    let pattern = format!(r"(?i)\b{}{dot_pattern}([\s,;:]|$)", regex::escape(abbr));
    (Regex::new(&pattern).unwrap(), format!("{replacement}$1"))
}

fn build_abbreviation_rules() -> Vec<(Regex, String)> {
    let mut rules = Vec::new();
    for (abbr, replacement) in TITLE_ABBREVIATIONS {
        rules.push(abbreviation_rule(abbr, replacement, DotRule::Optional));
    }
    // Compound form first: "Govt.of" has no space before "of".
    rules.push((
        Regex::new(r"(?i)\bGovt\.?of").unwrap(),
        "Government of".to_string(),
    ));
    rules.push(abbreviation_rule("Govt", "Government", DotRule::Optional));
    for (abbr, replacement) in DOTTED_ABBREVIATIONS {
        rules.push(abbreviation_rule(abbr, replacement, DotRule::Required));
    }
    rules
}

/// Longest-first alternation keeps single-letter tokens from shadowing
/// multi-letter ones under the matcher's leftmost-first semantics.
fn longest_first_alternation<'a, I: IntoIterator<Item = &'a str>>(tokens: I) -> String {
    let mut tokens: Vec<&str> = tokens.into_iter().collect();
    tokens.sort_by_key(|t| std::cmp::Reverse(t.chars().count()));
    tokens
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|")
}

fn build_letter_number_pattern() -> Regex {
    let codes = longest_first_alternation(LETTER_PREFIXES.iter().map(|(code, _)| *code));
    let pattern = format!(r"((?i:{codes})|[A-Z])(\d+)(\.\d+)?");
    Regex::new(&pattern).unwrap()
}

fn build_unit_pattern() -> Regex {
    // Units ending in '²' get no trailing word boundary: the superscript
    // is not a word character, so `\b` would never match after it.
    let superscript = longest_first_alternation(
        MEASUREMENT_UNITS
            .iter()
            .map(|(unit, _)| *unit)
            .filter(|unit| unit.ends_with('²')),
    );
    let plain = longest_first_alternation(
        MEASUREMENT_UNITS
            .iter()
            .map(|(unit, _)| *unit)
            .filter(|unit| !unit.ends_with('²')),
    );
    let pattern = format!(r"([+-]?\d+(?:\.\d+)?)\s*(?:({superscript})|({plain})\b)");
    Regex::new(&pattern).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_build_once() {
        let inner = VachanInner::new();
        assert_eq!(inner.letter_prefixes["Q"], "Quarter");
        assert_eq!(inner.measurement_units["kg"], "kilograms");
        assert_eq!(inner.currency_symbols["₹"], "Rupees");
        assert!(inner.titles.contains("Maharani"));
    }

    #[test]
    fn compound_rule_precedes_generic_govt() {
        let inner = VachanInner::new();
        let compound = inner
            .abbreviations
            .iter()
            .position(|(re, _)| re.as_str().contains("Govt\\.?of"))
            .unwrap();
        let generic = inner
            .abbreviations
            .iter()
            .position(|(_, repl)| repl == "Government$1")
            .unwrap();
        assert!(compound < generic);
    }

    #[test]
    fn unit_alternation_prefers_longer_tokens() {
        let inner = VachanInner::new();
        let caps = inner.unit_re.captures("5kHz").unwrap();
        assert_eq!(&caps[3], "kHz");
        let caps = inner.unit_re.captures("5m²").unwrap();
        assert_eq!(&caps[2], "m²");
        let caps = inner.unit_re.captures("5mm").unwrap();
        assert_eq!(&caps[3], "mm");
    }
}
