use std::{fs::File, io::BufReader};
use vachan::{NormFormat, Vachan};

fn normalize_fixture(input_path: &str, parallel: bool) -> String {
    let vachan = Vachan::new();
    let mut buf = vec![];
    let reader = BufReader::new(File::open(input_path).unwrap());
    if parallel {
        vachan
            .normalize_file_parallel(reader, &mut buf, None, NormFormat::Plain, None, true)
            .unwrap();
    } else {
        vachan
            .normalize_file(reader, &mut buf, None, NormFormat::Plain, None, true)
            .unwrap();
    }
    String::from_utf8(buf).unwrap().replace("\r\n", "\n")
}

#[test]
fn test_news_corpus_normalization() {
    let actual = normalize_fixture(
        concat!(env!("CARGO_MANIFEST_DIR"), "/tests/test/sentences.txt"),
        false,
    );
    let expected = include_str!("test/sentences.norm-ref.txt").replace("\r\n", "\n");
    assert_eq!(actual, expected);
}

#[test]
fn test_parallel_matches_sequential() {
    let input = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/test/sentences.txt");
    assert_eq!(normalize_fixture(input, true), normalize_fixture(input, false));
}

#[test]
fn test_max_lines_limits_output() {
    let vachan = Vachan::new();
    let mut buf = vec![];
    let reader = BufReader::new(File::open(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/test/sentences.txt"
    )).unwrap());
    vachan
        .normalize_file(reader, &mut buf, None, NormFormat::Plain, Some(2), true)
        .unwrap();
    let output = String::from_utf8(buf).unwrap();
    assert_eq!(output.lines().count(), 2);
}

#[test]
fn test_records_format_emits_valid_json() {
    let vachan = Vachan::new();
    let mut buf = vec![];
    let input = "::domain finance The Govt. sanctioned Rs. 4500000 for 3 projects. Work starts on 1st Apr. 2026.\n";
    vachan
        .normalize_file(
            BufReader::new(input.as_bytes()),
            &mut buf,
            None,
            NormFormat::Records,
            None,
            true,
        )
        .unwrap();
    let output = String::from_utf8(buf).unwrap();

    let records: Vec<serde_json::Value> = output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(record["domain"], "finance");
        let words = record["words"].as_u64().unwrap();
        assert_eq!(
            words,
            record["text"].as_str().unwrap().split_whitespace().count() as u64
        );
        assert!(record["band"].is_string());
    }
    assert_eq!(
        records[0]["text"],
        "The Government sanctioned Rupees forty-five lakh for three projects."
    );
    assert_eq!(records[0]["band"], "9-11");
    assert_eq!(
        records[1]["text"],
        "Work starts on first April two thousand twenty-six."
    );
    assert_eq!(records[1]["band"], "5-8");
}

#[test]
fn test_sentences_format_splits_lines() {
    let vachan = Vachan::new();
    let mut buf = vec![];
    let input = "It cost Rs. 500. Mr. Rao paid in full.\n";
    vachan
        .normalize_file(
            BufReader::new(input.as_bytes()),
            &mut buf,
            None,
            NormFormat::Sentences,
            None,
            true,
        )
        .unwrap();
    let output = String::from_utf8(buf).unwrap();
    assert_eq!(
        output,
        "It cost Rupees five hundred.\nMister Rao paid in full.\n"
    );
}
