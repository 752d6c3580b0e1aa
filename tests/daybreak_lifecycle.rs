use chrono::{NaiveDate, NaiveDateTime};
use openleg::daybreak::{
    read_manifest, write_manifest, DaybreakDocType, DaybreakFile, DaybreakStaging,
};
use std::fs;

fn staged_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2014, 9, 16)
        .expect("valid date")
        .and_hms_opt(6, 0, 0)
        .expect("valid time")
}

#[test]
fn batch_survives_a_restart_through_the_manifest() {
    let root = tempfile::tempdir().expect("temp dir");
    let incoming = root.path().join("incoming");
    fs::create_dir_all(&incoming).expect("incoming dir");
    let staging = DaybreakStaging::new(root.path().join("staging"), root.path().join("archive"));

    for name in [
        "20140915.page_file.txt",
        "20140915.senate.low.html",
        "20140915.assembly.high.html",
    ] {
        let path = incoming.join(name);
        fs::write(&path, name).expect("write incoming");
        staging.stage(&path, staged_at()).expect("stage succeeds");
    }

    let mut records = staging.collect().expect("collect succeeds");
    assert_eq!(records.len(), 3);
    // collect rebuilds from disk, so staging times are not known here
    assert!(records.iter().all(|record| record.staged().is_none()));
    for record in &mut records {
        record.set_staged(Some(staged_at()));
    }

    let page_file = records
        .iter_mut()
        .find(|record| record.doc_type() == DaybreakDocType::PageFile)
        .expect("page file staged");
    staging.archive(page_file).expect("archive succeeds");

    let mut manifest = Vec::new();
    write_manifest(&mut manifest, &records).expect("manifest written");

    let restored: Vec<DaybreakFile> = read_manifest(manifest.as_slice())
        .expect("manifest parses")
        .iter()
        .map(|entry| entry.rehydrate().expect("record rehydrates"))
        .collect();

    assert_eq!(restored, records);
    let archived: Vec<_> = restored.iter().filter(|record| record.is_archived()).collect();
    assert_eq!(archived.len(), 1);
    assert_eq!(
        archived[0].text().expect("archived file readable"),
        "20140915.page_file.txt"
    );
    assert!(restored
        .iter()
        .all(|record| record.staged() == Some(staged_at())));
}
