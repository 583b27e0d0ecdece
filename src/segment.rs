//! Sentence segmentation and length classification.
//!
//! Consumers of the normalized text: a splitter that breaks on
//! sentence-final punctuation without splitting inside initials,
//! dotted abbreviation chains or decimal numbers, and a five-band
//! word-count classifier for dataset bucketing.

use serde::Serialize;

/// Splits text into sentences on `.`, `!` and `?`.
///
/// A period is not a boundary when it follows a single capital letter
/// ("J. Smith"), sits inside a dotted abbreviation chain ("U.S.A."),
/// or separates digits ("3.14"). Runs of closing punctuation ("?!",
/// "...") stay attached to their sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;

    for (j, &(offset, c)) in chars.iter().enumerate() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let next = chars.get(j + 1).map(|&(_, c)| c);
        // Keep punctuation runs together.
        if matches!(next, Some('.') | Some('!') | Some('?')) {
            continue;
        }
        if c == '.' && period_is_protected(&chars, j) {
            continue;
        }
        let end = offset + c.len_utf8();
        let sentence = text[start..end].trim();
        if !sentence.is_empty() {
            sentences.push(sentence.to_string());
        }
        start = end;
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }
    sentences
}

fn period_is_protected(chars: &[(usize, char)], j: usize) -> bool {
    let prev = j.checked_sub(1).and_then(|i| chars.get(i)).map(|&(_, c)| c);
    let before_prev = j.checked_sub(2).and_then(|i| chars.get(i)).map(|&(_, c)| c);
    let next = chars.get(j + 1).map(|&(_, c)| c);

    // Decimal point or a dotted chain continuing without a space.
    if next.is_some_and(|c| c.is_alphanumeric()) {
        return true;
    }
    // Single-capital initial ("J. Smith") or the tail of a dotted
    // abbreviation chain ("U.S.A. headquarters").
    if prev.is_some_and(|c| c.is_ascii_uppercase())
        && before_prev.is_none_or(|c| c.is_whitespace() || c == '.')
    {
        return true;
    }
    false
}

/// Word-count bands for sentence-length bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LengthBand {
    #[serde(rename = "1-4")]
    OneToFour,
    #[serde(rename = "5-8")]
    FiveToEight,
    #[serde(rename = "9-11")]
    NineToEleven,
    #[serde(rename = "12-15")]
    TwelveToFifteen,
    #[serde(rename = "16+")]
    SixteenPlus,
}

impl LengthBand {
    pub fn for_count(words: usize) -> Self {
        match words {
            0..=4 => LengthBand::OneToFour,
            5..=8 => LengthBand::FiveToEight,
            9..=11 => LengthBand::NineToEleven,
            12..=15 => LengthBand::TwelveToFifteen,
            _ => LengthBand::SixteenPlus,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LengthBand::OneToFour => "1-4",
            LengthBand::FiveToEight => "5-8",
            LengthBand::NineToEleven => "9-11",
            LengthBand::TwelveToFifteen => "12-15",
            LengthBand::SixteenPlus => "16+",
        }
    }
}

/// Whitespace token count, the measure the bands are defined over.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
