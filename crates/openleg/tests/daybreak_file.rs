use chrono::NaiveDate;
use openleg::daybreak::{DaybreakDocType, DaybreakError, DaybreakFile};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write daybreak fixture");
    path
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn classifies_and_dates_every_doc_type() {
    let dir = TempDir::new().expect("temp dir");

    for doc_type in DaybreakDocType::ordered() {
        let name = format!("20150107{}", doc_type.local_file_ext());
        let record = DaybreakFile::open(write_file(dir.path(), &name, "")).expect("record builds");

        assert_eq!(record.doc_type(), doc_type);
        assert_eq!(record.report_date(), Some(date(2015, 1, 7)));
        assert_eq!(record.file_name(), name);
        assert!(record.staged().is_none());
        assert!(!record.is_archived());
    }
}

#[test]
fn unrecognized_name_is_a_classification_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(dir.path(), "20150107.sobi.txt", "");

    match DaybreakFile::open(&path) {
        Err(DaybreakError::UnrecognizedDocType { path: reported }) => assert_eq!(reported, path),
        other => panic!("expected classification error, got {other:?}"),
    }
}

#[test]
fn missing_file_is_reported_before_classification() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("not-a-daybreak-file.bin");

    match DaybreakFile::open(&path) {
        Err(DaybreakError::FileNotFound { path: reported }) => {
            assert!(reported.is_absolute());
            assert_eq!(reported, path);
        }
        other => panic!("expected not-found error, got {other:?}"),
    }
}

#[test]
fn report_date_time_is_start_of_day() {
    let dir = TempDir::new().expect("temp dir");
    let record = DaybreakFile::open(write_file(dir.path(), "20140301.senate.high.html", ""))
        .expect("record builds");

    let start = record.report_date_time().expect("dated record");
    assert_eq!(start, date(2014, 3, 1).and_hms_opt(0, 0, 0).expect("midnight"));
    assert_eq!(start.date(), record.report_date().expect("dated record"));
}

#[test]
fn construction_is_a_pure_function_of_the_name() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(dir.path(), "20141231.assembly.low.html", "");

    let first = DaybreakFile::open(&path).expect("first record");
    let second = DaybreakFile::open(&path).expect("second record");

    assert_eq!(first.doc_type(), second.doc_type());
    assert_eq!(first.report_date(), second.report_date());
    assert_eq!(first, second);
}

#[test]
fn bad_embedded_date_degrades_instead_of_failing() {
    let dir = TempDir::new().expect("temp dir");

    for name in [
        "20140999.page_file.txt",
        "20141301.page_file.txt",
        "latest.page_file.txt",
    ] {
        let record =
            DaybreakFile::open(write_file(dir.path(), name, "")).expect("record still builds");
        assert_eq!(record.doc_type(), DaybreakDocType::PageFile);
        assert!(record.report_date().is_none(), "{name} should be undated");
        assert!(record.report_date_time().is_none());
    }
}

#[test]
fn archived_flag_is_independent_of_classification() {
    let dir = TempDir::new().expect("temp dir");
    let mut record = DaybreakFile::open(write_file(dir.path(), "20140915.page_file.txt", ""))
        .expect("record builds");

    assert!(record.to_string().contains("archived: false"));
    record.set_archived(true);

    assert_eq!(record.doc_type(), DaybreakDocType::PageFile);
    assert_eq!(record.report_date(), Some(date(2014, 9, 15)));
    let rendered = record.to_string();
    assert!(rendered.contains("archived: true"));
    assert!(rendered.contains("report_date: 2014-09-15"));
    assert!(rendered.contains("doc_type: page_file"));
}

#[test]
fn with_state_restores_lifecycle() {
    let dir = TempDir::new().expect("temp dir");
    let staged = date(2014, 9, 16).and_hms_opt(7, 45, 0).expect("valid time");
    let record = DaybreakFile::with_state(
        write_file(dir.path(), "20140915.senate.low.html", ""),
        Some(staged),
        true,
    )
    .expect("record builds");

    assert_eq!(record.staged(), Some(staged));
    assert!(record.is_archived());
    assert!(record.to_string().contains("staged: 2014-09-16 07:45:00"));
}

#[test]
fn reclassify_moves_type_and_date_together() {
    let dir = TempDir::new().expect("temp dir");
    let mut record = DaybreakFile::open(write_file(dir.path(), "20140915.senate.low.html", ""))
        .expect("record builds");

    record.reclassify(DaybreakDocType::SenateHigh, Some(date(2014, 9, 14)));

    assert_eq!(record.doc_type(), DaybreakDocType::SenateHigh);
    assert_eq!(record.report_date(), Some(date(2014, 9, 14)));
}

#[test]
fn text_reads_whole_file() {
    let dir = TempDir::new().expect("temp dir");
    let record = DaybreakFile::open(write_file(
        dir.path(),
        "20140915.page_file.txt",
        "line one\nline two\n",
    ))
    .expect("record builds");

    assert_eq!(record.text().expect("text readable"), "line one\nline two\n");
}

#[test]
fn text_failure_names_the_record() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(dir.path(), "20140915.page_file.txt", "gone soon");
    let record = DaybreakFile::open(&path).expect("record builds");
    fs::remove_file(&path).expect("remove fixture");

    match record.text() {
        Err(err @ DaybreakError::Read { .. }) => {
            let message = err.to_string();
            assert!(message.contains("20140915.page_file.txt"));
            assert!(message.contains("doc_type: page_file"));
        }
        other => panic!("expected read error, got {other:?}"),
    }
}
