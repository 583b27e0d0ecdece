//! The staged rewrite pipeline.
//!
//! [`VachanInner::process_text`] pushes one string through ten ordered
//! stages: punctuation, abbreviations, letter-number codes, percentages,
//! numeric ordinals, measurement units, Roman numerals, symbols, the
//! number/currency/year-range resolver, and whitespace collapse. Stages
//! only consume and produce plain text, so they compose by successive
//! substitution; no stage re-scans its own output.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::core::{SYMBOLS, VachanInner};
use crate::numbers::{NUMBER_LOOKUP, roman_to_int, to_cardinal, to_ordinal, words_for_numeric};

static PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*%").unwrap());
static ORDINAL_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d+)(st|nd|rd|th)\b").unwrap());
static ROMAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[IVXLCDMivxlcdm]+\b").unwrap());
static ROMAN_VALID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^M{0,3}(CM|CD|D?C{0,3})(XC|XL|L?X{0,3})(IX|IV|V?I{0,3})$").unwrap()
});
/// One left-to-right pass; the year-range branch must come before the
/// bare-number branch or the number branch would eat the first four
/// digits of every range.
static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{4}-\d{2}|(?:Rs\.|₹|\$|€|£)\s*\d+(?:\.\d+)?|-?\d+(?:\.\d+)?(?:\s*(?:AD|BCE|BC|CE))?")
        .unwrap()
});
static YEAR_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})$").unwrap());
static CURRENCY_AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(Rs\.|₹|\$|€|£)\s*(\d+(?:\.\d+)?)$").unwrap());
static NUMBER_ERA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-?\d+(?:\.\d+)?)(?:\s*(AD|BCE|BC|CE))?$").unwrap());

/// Capitalized function words that start sentences but never name a
/// person, excluded from regnal-context detection.
const NAME_STOPWORDS: [&str; 18] = [
    "The", "A", "An", "In", "On", "At", "Of", "By", "To", "For", "From", "With", "And", "Or",
    "But", "As", "Is", "Was",
];

impl VachanInner {
    /// Applies all rewrite stages in order and returns the spoken-word
    /// rendering of `text`. Pure given the tables; unrecognized text is
    /// always preserved verbatim.
    pub(crate) fn process_text(&self, text: &str) -> String {
        let text = strip_punctuation(text);
        let text = self.expand_abbreviations(&text);
        let text = self.combine_letter_numbers(&text);
        let text = self.expand_percentages(&text);
        let text = expand_numeric_ordinals(&text);
        let text = self.expand_measurement_units(&text);
        let text = self.convert_roman_numerals(&text);
        let text = expand_symbols(&text);
        let text = self.resolve_numbers(&text);
        collapse_whitespace(&text)
    }

    fn expand_abbreviations(&self, text: &str) -> String {
        let mut text = text.to_string();
        for (pattern, replacement) in &self.abbreviations {
            text = pattern.replace_all(&text, replacement.as_str()).to_string();
        }
        text
    }

    fn combine_letter_numbers(&self, text: &str) -> String {
        self.letter_number_re
            .replace_all(text, |caps: &Captures| {
                let prefix = &caps[1];
                let expanded = self.letter_prefixes.get(prefix).copied().unwrap_or(prefix);
                let words = match caps.get(3) {
                    Some(fraction) => {
                        words_for_numeric(&format!("{}{}", &caps[2], fraction.as_str()))
                    }
                    None => words_for_numeric(&caps[2]),
                };
                match words {
                    Some(words) => format!("{expanded} {words}"),
                    None => caps[0].to_string(),
                }
            })
            .to_string()
    }

    fn expand_percentages(&self, text: &str) -> String {
        PERCENT_RE
            .replace_all(text, |caps: &Captures| match words_for_numeric(&caps[1]) {
                Some(words) => format!("{words} percent"),
                None => caps[0].to_string(),
            })
            .to_string()
    }

    fn expand_measurement_units(&self, text: &str) -> String {
        self.unit_re
            .replace_all(text, |caps: &Captures| {
                let number = &caps[1];
                let unit = caps
                    .get(2)
                    .or_else(|| caps.get(3))
                    .map(|m| m.as_str())
                    .unwrap_or_default();
                let (sign_word, digits) = match number.strip_prefix('-') {
                    Some(rest) => ("minus ", rest),
                    None => match number.strip_prefix('+') {
                        Some(rest) => ("plus ", rest),
                        None => ("", number),
                    },
                };
                let Some(words) = words_for_numeric(digits) else {
                    return caps[0].to_string();
                };
                let unit_words = self.measurement_units.get(unit).copied().unwrap_or(unit);
                format!("{sign_word}{words} {unit_words}")
            })
            .to_string()
    }

    fn convert_roman_numerals(&self, text: &str) -> String {
        ROMAN_RE
            .replace_all(text, |caps: &Captures| {
                let m = caps.get(0).expect("match group 0 always present");
                self.roman_replacement(text, m.start(), m.end(), m.as_str())
            })
            .to_string()
    }

    /// Decides whether a candidate letter run is read as a numeral, and
    /// in which form. Context comes from the immediately adjacent
    /// whitespace-delimited words in the full text.
    fn roman_replacement(&self, text: &str, start: usize, end: usize, run: &str) -> String {
        if run.chars().any(|c| !c.is_ascii_uppercase()) {
            return run.to_string();
        }
        if !ROMAN_VALID_RE.is_match(run) {
            return run.to_string();
        }
        let preceding = text[..start].split_whitespace().next_back();
        let following = text[end..].split_whitespace().next();
        let titled = preceding.is_some_and(|w| self.titles.contains(w));

        // "I" is the pronoun unless a regnal title directly precedes it.
        if run == "I" && !titled {
            return run.to_string();
        }
        // Other single letters next to single-character words are
        // initials or enumerations, not numerals.
        if run.chars().count() == 1
            && (preceding.is_some_and(|w| w.chars().count() == 1)
                || following.is_some_and(|w| w.chars().count() == 1))
        {
            return run.to_string();
        }

        let value = roman_to_int(run);
        if titled || preceding.is_some_and(name_like) {
            to_ordinal(value)
        } else {
            to_cardinal(value)
        }
    }

    fn resolve_numbers(&self, text: &str) -> String {
        NUMBER_RE
            .replace_all(text, |caps: &Captures| {
                let token = &caps[0];
                if let Some(range) = YEAR_RANGE_RE.captures(token) {
                    return year_range_words(&range[1], &range[2]);
                }
                if let Some(currency) = CURRENCY_AMOUNT_RE.captures(token) {
                    let name = self
                        .currency_symbols
                        .get(&currency[1])
                        .copied()
                        .unwrap_or(&currency[1]);
                    // The amount re-enters the full pipeline so embedded
                    // decimals are handled uniformly.
                    return format!("{name} {}", self.process_text(&currency[2]));
                }
                if let Some(number) = NUMBER_ERA_RE.captures(token) {
                    let (sign_word, digits) = match number[1].strip_prefix('-') {
                        Some(rest) => ("minus ", rest.to_string()),
                        None => ("", number[1].to_string()),
                    };
                    if let Some(words) = words_for_numeric(&digits) {
                        return match number.get(2) {
                            Some(era) => format!("{sign_word}{words} {}", era.as_str()),
                            None => format!("{sign_word}{words}"),
                        };
                    }
                }
                token.to_string()
            })
            .to_string()
    }
}

/// Strips commas and converts hyphens to spaces, keeping exactly two
/// hyphen uses alive: the four-digit/two-digit year-range join and a
/// unary sign directly before a digit.
fn strip_punctuation(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    for (i, &c) in chars.iter().enumerate() {
        match c {
            ',' => {}
            '-' if joins_year_range(&chars, i) || signs_a_number(&chars, i) => out.push('-'),
            '-' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}

fn joins_year_range(chars: &[char], i: usize) -> bool {
    i >= 4
        && chars[i - 4..i].iter().all(|c| c.is_ascii_digit())
        && (i == 4 || !chars[i - 5].is_ascii_digit())
        && chars.get(i + 1).is_some_and(|c| c.is_ascii_digit())
        && chars.get(i + 2).is_some_and(|c| c.is_ascii_digit())
        && !chars.get(i + 3).is_some_and(|c| c.is_ascii_digit())
}

fn signs_a_number(chars: &[char], i: usize) -> bool {
    (i == 0 || chars[i - 1].is_whitespace())
        && chars.get(i + 1).is_some_and(|c| c.is_ascii_digit())
}

fn expand_numeric_ordinals(text: &str) -> String {
    ORDINAL_SUFFIX_RE
        .replace_all(text, |caps: &Captures| {
            // The literal suffix is ignored; "2st" reads as "second".
            match caps[1].parse::<u64>() {
                Ok(n) => to_ordinal(n),
                Err(_) => caps[0].to_string(),
            }
        })
        .to_string()
}

fn expand_symbols(text: &str) -> String {
    let mut text = text.to_string();
    for (symbol, word) in SYMBOLS {
        if symbol == "%" {
            continue;
        }
        if text.contains(symbol) {
            text = text.replace(symbol, &format!(" {word} "));
        }
    }
    text
}

/// Both halves read in the "twenty .." style; the century digits are
/// not inspected. The joining hyphen is the one hyphen that survives
/// into the output.
fn year_range_words(full_year: &str, short_year: &str) -> String {
    let lookup = &*NUMBER_LOOKUP;
    let decade: usize = full_year[2..].parse().unwrap_or(0);
    let short: usize = short_year.parse().unwrap_or(0);
    format!("twenty {}-twenty {}", lookup[decade], lookup[short])
}

fn name_like(word: &str) -> bool {
    if NAME_STOPWORDS.contains(&word) {
        return false;
    }
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let rest: Vec<char> = chars.collect();
    first.is_uppercase() && !rest.is_empty() && rest.iter().all(|c| c.is_lowercase())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use crate::Vachan;

    fn normalize(text: &str) -> String {
        Vachan::new().normalize_string(text)
    }

    #[test]
    fn strips_commas_and_hyphens() {
        assert_eq!(normalize("well-known fact"), "well known fact");
        assert_eq!(normalize("a, b, and c"), "a b and c");
    }

    #[test]
    fn expands_titles() {
        assert_eq!(normalize("Mr. Smith"), "Mister Smith");
        assert_eq!(normalize("Dr. Rao and Prof. Iyer"), "Doctor Rao and Professor Iyer");
        assert_eq!(normalize("Smt. Devi"), "Srimati Devi");
    }

    #[test]
    fn compound_government_rule_wins() {
        assert_eq!(normalize("Govt.of India"), "Government of India");
        assert_eq!(normalize("the Govt. said"), "the Government said");
    }

    #[test]
    fn months_require_the_period() {
        assert_eq!(normalize("on Jan. Jan stayed home"), "on January Jan stayed home");
        assert_eq!(normalize("Dec. Aug. Oct."), "December August October");
    }

    #[test]
    fn combines_letter_numbers() {
        assert_eq!(normalize("Q2 results"), "Quarter two results");
        assert_eq!(normalize("Ch5 and Sec12"), "Chapter five and Section twelve");
        assert_eq!(normalize("V1.2 shipped"), "Version one point two shipped");
        // Unknown prefixes fall back to the literal letter.
        assert_eq!(normalize("B7 vitamin"), "B seven vitamin");
    }

    #[test]
    fn expands_percentages() {
        assert_eq!(normalize("50%"), "fifty percent");
        assert_eq!(normalize("8.5% interest"), "eight point five percent interest");
        assert_eq!(normalize("rose 12 %"), "rose twelve percent");
    }

    #[test]
    fn expands_numeric_ordinals() {
        assert_eq!(normalize("1st"), "first");
        assert_eq!(normalize("3rd prize"), "third prize");
        assert_eq!(normalize("the 21st century"), "the twenty-first century");
        // Suffix-digit agreement is not checked.
        assert_eq!(normalize("2st"), "second");
    }

    #[test]
    fn expands_measurement_units() {
        assert_eq!(normalize("5°C"), "five degrees celsius");
        assert_eq!(normalize("-3°C"), "minus three degrees celsius");
        assert_eq!(normalize("3.5kg"), "three point five kilograms");
        assert_eq!(normalize("+40 km"), "plus forty kilometres");
        assert_eq!(normalize("2GHz and 10m²"), "two gigahertz and ten square metres");
    }

    #[test]
    fn roman_numerals_in_context() {
        assert_eq!(normalize("Henry VIII"), "Henry eighth");
        assert_eq!(normalize("XIV"), "fourteen");
        assert_eq!(normalize("King I"), "King first");
        assert_eq!(normalize("I went home"), "I went home");
        // "I" stays a pronoun even after a name; only the title set
        // converts it.
        assert_eq!(normalize("Henry I"), "Henry I");
        assert_eq!(normalize("Pope Benedict XVI"), "Pope Benedict sixteenth");
    }

    #[test]
    fn roman_numerals_left_alone() {
        // Not fully uppercase.
        assert_eq!(normalize("Xi visited"), "Xi visited");
        // Invalid grammar.
        assert_eq!(normalize("CIVIL MIX IIII"), "CIVIL one thousand nine IIII");
        // Single letter next to a single-character word.
        assert_eq!(normalize("M. Night"), "M. Night");
    }

    #[test]
    fn determiners_do_not_make_regnal_context() {
        assert_eq!(normalize("The XIV summit"), "The fourteen summit");
    }

    #[test]
    fn expands_symbols() {
        assert_eq!(normalize("a & b"), "a and b");
        assert_eq!(normalize("5 / day"), "five per day");
        assert_eq!(normalize("x = 4"), "x equals four");
    }

    #[test]
    fn resolves_currency() {
        assert_eq!(normalize("Rs. 100"), "Rupees one hundred");
        assert_eq!(normalize("₹2500"), "Rupees two thousand five hundred");
        assert_eq!(normalize("$99.99"), "Dollars ninety-nine point nine nine");
        assert_eq!(normalize("£5 and €20"), "Pounds five and Euros twenty");
    }

    #[test]
    fn resolves_year_ranges() {
        assert_eq!(normalize("2024-25"), "twenty twenty-four-twenty twenty-five");
        assert_eq!(
            normalize("the FY 2024-25 budget"),
            "the FY twenty twenty-four-twenty twenty-five budget"
        );
        // Not a year range: three digits after the hyphen.
        assert_eq!(
            normalize("2024-256"),
            "two thousand twenty-four two hundred fifty-six"
        );
    }

    #[test]
    fn resolves_bare_numbers_and_eras() {
        assert_eq!(normalize("in 1947"), "in one thousand nine hundred forty-seven");
        assert_eq!(normalize("500 AD"), "five hundred AD");
        assert_eq!(normalize("44 BC"), "forty-four BC");
        assert_eq!(normalize("3.14"), "three point one four");
        assert_eq!(normalize("-5"), "minus five");
    }

    #[test]
    fn oversized_numbers_pass_through() {
        let big = "123456789012345678901234567890";
        assert_eq!(normalize(big), big);
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize("  a   b  "), "a b");
    }

    #[test]
    fn pipeline_is_stable_on_its_own_output() {
        let corpus = [
            "Mr. Smith paid $40 at the store",
            "It is 5°C outside",
            "She came 3rd in Sec5",
            "Govt.of India and the Dept. of Finance",
            "Pope Benedict XVI spoke for 10 minutes",
            "I went home at 6",
        ];
        let vachan = Vachan::new();
        for text in corpus {
            let once = vachan.normalize_string(text);
            let twice = vachan.normalize_string(&once);
            assert_eq!(twice, once, "pipeline not stable for {text:?}");
        }
    }
}
