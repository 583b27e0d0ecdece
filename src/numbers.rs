//! Number-to-words engines.
//!
//! Cardinal and ordinal rendering in the Indian numbering system
//! (hundred, thousand, lakh, crore), digit-by-digit decimal fractions,
//! and Roman numeral valuation.

use std::sync::LazyLock;

const UNITS: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// Scales in descending magnitude; each contributes at most one group
/// per number.
const SCALES: [(&str, u64); 4] = [
    ("crore", 10_000_000),
    ("lakh", 100_000),
    ("thousand", 1_000),
    ("hundred", 100),
];

/// Irreducible ordinal forms: 0..=20 and the decades.
const ORDINALS: [(u64, &str); 28] = [
    (0, "zeroth"),
    (1, "first"),
    (2, "second"),
    (3, "third"),
    (4, "fourth"),
    (5, "fifth"),
    (6, "sixth"),
    (7, "seventh"),
    (8, "eighth"),
    (9, "ninth"),
    (10, "tenth"),
    (11, "eleventh"),
    (12, "twelfth"),
    (13, "thirteenth"),
    (14, "fourteenth"),
    (15, "fifteenth"),
    (16, "sixteenth"),
    (17, "seventeenth"),
    (18, "eighteenth"),
    (19, "nineteenth"),
    (20, "twentieth"),
    (30, "thirtieth"),
    (40, "fortieth"),
    (50, "fiftieth"),
    (60, "sixtieth"),
    (70, "seventieth"),
    (80, "eightieth"),
    (90, "ninetieth"),
];

const ORDINAL_EXCEPTIONS: [(&str, &str); 18] = [
    ("one", "first"),
    ("two", "second"),
    ("three", "third"),
    ("four", "fourth"),
    ("five", "fifth"),
    ("six", "sixth"),
    ("seven", "seventh"),
    ("eight", "eighth"),
    ("nine", "ninth"),
    ("ten", "tenth"),
    ("twenty", "twentieth"),
    ("thirty", "thirtieth"),
    ("forty", "fortieth"),
    ("fifty", "fiftieth"),
    ("sixty", "sixtieth"),
    ("seventy", "seventieth"),
    ("eighty", "eightieth"),
    ("ninety", "ninetieth"),
];

/// Word lookup for 0..=99, built once; compound tens-units forms are
/// joined with a hyphen.
pub(crate) static NUMBER_LOOKUP: LazyLock<Vec<String>> = LazyLock::new(|| {
    (0..100)
        .map(|i: usize| {
            if i < 20 {
                UNITS[i].to_string()
            } else if i % 10 == 0 {
                TENS[i / 10].to_string()
            } else {
                format!("{}-{}", TENS[i / 10], UNITS[i % 10])
            }
        })
        .collect()
});

fn direct_ordinal(n: u64) -> Option<&'static str> {
    ORDINALS.iter().find(|(v, _)| *v == n).map(|(_, w)| *w)
}

/// Converts a non-negative integer to words using the Indian numbering
/// system.
///
/// # Example
/// ```
/// assert_eq!(vachan::numbers::to_cardinal(250_000), "two lakh fifty thousand");
/// ```
pub fn to_cardinal(n: u64) -> String {
    if n == 0 {
        return UNITS[0].to_string();
    }
    let mut parts = Vec::new();
    let mut remaining = n;
    for (scale, magnitude) in SCALES {
        if remaining >= magnitude {
            let count = remaining / magnitude;
            remaining %= magnitude;
            parts.push(format!("{} {scale}", to_cardinal(count)));
        }
    }
    if remaining > 0 {
        parts.push(NUMBER_LOOKUP[remaining as usize].clone());
    }
    parts.join(" ")
}

/// Ordinal form of a scale word. Lakh and crore have no distinct
/// ordinal form and pass through unchanged.
fn scale_ordinal(scale: &str) -> String {
    match scale {
        "hundred" => "hundredth".to_string(),
        "thousand" => "thousandth".to_string(),
        "lakh" | "crore" => scale.to_string(),
        other => format!("{other}th"),
    }
}

/// Ordinal form of a cardinal word; compounds like "twenty-one" are
/// ordinalized on the units side only.
fn ordinal_word(word: &str) -> String {
    if let Some(&(_, ord)) = ORDINAL_EXCEPTIONS.iter().find(|(c, _)| *c == word) {
        return ord.to_string();
    }
    if let Some((tens, ones)) = word.split_once('-') {
        let tail = ORDINAL_EXCEPTIONS
            .iter()
            .find(|(c, _)| *c == ones)
            .map(|(_, o)| o.to_string())
            .unwrap_or_else(|| format!("{ones}th"));
        return format!("{tens}-{tail}");
    }
    format!("{word}th")
}

/// Converts a non-negative integer to its ordinal word form.
///
/// When a scale group consumes the entire remainder the scale word
/// itself is ordinalized ("one hundredth"); otherwise only the final
/// term is ("one hundred twenty-first").
pub fn to_ordinal(n: u64) -> String {
    if let Some(word) = direct_ordinal(n) {
        return word.to_string();
    }
    let mut parts = Vec::new();
    let mut remaining = n;
    for (scale, magnitude) in SCALES {
        if remaining >= magnitude {
            let count = remaining / magnitude;
            remaining %= magnitude;
            let scale_word = if remaining == 0 {
                scale_ordinal(scale)
            } else {
                scale.to_string()
            };
            parts.push(format!("{} {scale_word}", to_cardinal(count)));
        }
    }
    if remaining > 0 {
        match direct_ordinal(remaining) {
            Some(word) => parts.push(word.to_string()),
            None => parts.push(ordinal_word(&NUMBER_LOOKUP[remaining as usize])),
        }
    }
    parts.join(" ")
}

/// Renders a numeral string with exactly one `.` as
/// "<integer words> point <digit-by-digit fraction>". Anything that
/// fails to parse as `integer.integer` falls back to plain integer
/// interpretation; `None` means even that failed.
pub fn decimal_to_words(s: &str) -> Option<String> {
    if let Some((int_part, frac_part)) = s.split_once('.')
        && !frac_part.is_empty()
        && frac_part.bytes().all(|b| b.is_ascii_digit())
        && let Ok(integer) = int_part.parse::<u64>()
    {
        let fraction = frac_part
            .bytes()
            .map(|b| UNITS[(b - b'0') as usize])
            .collect::<Vec<_>>()
            .join(" ");
        return Some(format!("{} point {fraction}", to_cardinal(integer)));
    }
    s.parse::<u64>().ok().map(to_cardinal)
}

/// Words for a bare numeral token, decimal or integer.
pub(crate) fn words_for_numeric(s: &str) -> Option<String> {
    if s.contains('.') {
        decimal_to_words(s)
    } else {
        s.parse::<u64>().ok().map(to_cardinal)
    }
}

/// Classic subtractive-pair valuation, scanning right to left and
/// flipping sign when a lower value precedes a strictly higher one.
pub fn roman_to_int(roman: &str) -> u64 {
    let mut total: i64 = 0;
    let mut prev: i64 = 0;
    for c in roman.chars().rev() {
        let value = match c.to_ascii_uppercase() {
            'I' => 1,
            'V' => 5,
            'X' => 10,
            'L' => 50,
            'C' => 100,
            'D' => 500,
            'M' => 1000,
            _ => 0,
        };
        if value < prev {
            total -= value;
        } else {
            total += value;
        }
        prev = value;
    }
    total.max(0) as u64
}
