//! End-to-end tests for the command processor.

use std::io::Write;

use inbox_cli::{IngestPolicy, Processor, ProcessorConfig, RunSummary, WriterSink};

fn run(input: &[&str]) -> (Vec<String>, RunSummary) {
    let mut processor = Processor::new(ProcessorConfig::default());
    let mut out = Vec::new();
    let summary = processor.run(input.iter().copied(), &mut out).unwrap();
    (out, summary)
}

fn preview(sender: &str, subject: &str, date: &str) -> Vec<String> {
    vec![
        "Next email:".to_string(),
        format!("Sender: {}", sender),
        format!("Subject: {}", subject),
        format!("Date: {}", date),
        String::new(),
    ]
}

#[test]
fn test_priority_then_date_then_arrival() {
    let (out, summary) = run(&[
        "EMAIL Boss,\"Hi\",01-01-2030",
        "EMAIL Peer,\"Lo\",01-01-2030",
        "EMAIL Boss,\"Hi2\",01-01-2020",
        "COUNT",
        "NEXT",
        "READ",
        "NEXT",
        "READ",
        "NEXT",
    ]);

    let mut expected = vec!["There are 3 emails to read.".to_string(), String::new()];
    expected.extend(preview("Boss", "\"Hi\"", "01-01-2030"));
    expected.extend(preview("Boss", "\"Hi2\"", "01-01-2020"));
    expected.extend(preview("Peer", "\"Lo\"", "01-01-2030"));

    assert_eq!(out, expected);
    assert_eq!(summary.queued, 3);
    assert_eq!(summary.reads, 2);
    assert_eq!(summary.previews, 3);
}

#[test]
fn test_empty_queue() {
    let (out, summary) = run(&["NEXT", "COUNT", "READ", "COUNT"]);

    assert_eq!(
        out,
        vec![
            "No emails to read.",
            "",
            "There are 0 emails to read.",
            "",
            "There are 0 emails to read.",
            ""
        ]
    );
    assert_eq!(summary.reads, 0);
}

#[test]
fn test_same_rank_same_date_reads_in_arrival_order() {
    let (out, _) = run(&[
        "EMAIL Subordinate,first,05-05-2025",
        "EMAIL Subordinate,second,05-05-2025",
        "EMAIL Subordinate,third,05-05-2025",
        "NEXT",
        "READ",
        "NEXT",
        "READ",
        "NEXT",
    ]);

    let subjects: Vec<&str> = out
        .iter()
        .filter_map(|line| line.strip_prefix("Subject: "))
        .collect();
    assert_eq!(subjects, vec!["first", "second", "third"]);
}

#[test]
fn test_unknown_category_ranks_last() {
    let (out, _) = run(&[
        "EMAIL Stranger,spam,12-31-2099",
        "EMAIL OtherPerson,note,01-01-2000",
        "NEXT",
    ]);
    assert_eq!(out[1], "Sender: OtherPerson");
}

#[test]
fn test_preview_is_stable_until_read() {
    // A higher-ranked email arriving after NEXT does not change the preview,
    // but READ removes the true top.
    let (out, summary) = run(&[
        "EMAIL Peer,old,01-01-2030",
        "NEXT",
        "EMAIL Boss,urgent,01-01-2030",
        "NEXT",
        "READ",
        "NEXT",
    ]);

    let mut expected = preview("Peer", "old", "01-01-2030");
    expected.extend(preview("Peer", "old", "01-01-2030"));
    expected.extend(preview("Peer", "old", "01-01-2030"));
    assert_eq!(out, expected);
    assert_eq!(summary.reads, 1);
}

#[test]
fn test_strict_policy_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "EMAIL Boss,ok,01-01-2030").unwrap();
    writeln!(file, "EMAIL Boss,missing date").unwrap();
    writeln!(file, "EMAIL Boss,bad date,13-45-2030").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "COUNT").unwrap();
    file.flush().unwrap();

    let reader = std::io::BufReader::new(std::fs::File::open(file.path()).unwrap());
    let config = ProcessorConfig::new().with_policy(IngestPolicy::Strict);
    let mut processor = Processor::new(config);
    let mut sink = WriterSink::new(Vec::new());

    let summary = processor.run_reader(reader, &mut sink).unwrap();

    let text = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(text, "There are 1 emails to read.\n\n");
    assert_eq!(summary.lines, 5);
    assert_eq!(summary.blank, 1);
    assert_eq!(summary.malformed, 2);
    assert_eq!(summary.skipped, 2);
}

#[test]
fn test_lenient_bad_date_sorts_as_epoch() {
    let (out, _) = run(&[
        "EMAIL Boss,undated,not-a-date",
        "EMAIL Boss,dated,01-02-1970",
        "NEXT",
        "READ",
        "NEXT",
    ]);

    assert_eq!(out[2], "Subject: dated");
    assert_eq!(out[7], "Subject: undated");
    // The raw date text is shown as entered
    assert_eq!(out[8], "Date: not-a-date");
}
