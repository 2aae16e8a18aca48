use chrono::{NaiveDate, NaiveTime};
use std::io::Write;
use study_ahead::import::{TextEncoding, decode_text, find_header_offset};
use study_ahead::{ImportError, import_classes, parse_classes};
use tempfile::NamedTempFile;

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

const HEADER: &str = "\"Betreff\",\"Beginnt am\",\"Beginnt um\",\"Endet am\",\"Endet um\",\"Ort\",\"Beschreibung\"";

fn export(rows: &[&str]) -> String {
    let mut text = String::from("Kalender: Wintersemester\n\n");
    text.push_str(HEADER);
    text.push('\n');
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    text
}

#[test]
fn groups_by_normalized_subject_and_sorts_by_date() {
    let text = export(&[
        "\"Mathematik :: Vorlesung\",\"17.03.2025\",\"08:15:00\",\"17.03.2025\",\"09:45:00\",\"HS 1\",\"\"",
        "\"Physik::Übung\",\"12.03.2025\",\"10:00:00\",\"12.03.2025\",\"11:30:00\",\"\",\"Blatt 3\"",
        "\"Mathematik :: Übung\",\"10.03.2025\",\"12:00:00\",\"10.03.2025\",\"13:30:00\",\"R 204\",\"\"",
    ]);
    let import = parse_classes(&text).unwrap();

    assert_eq!(import.classes.len(), 3);
    assert_eq!(import.skipped_rows, 0);
    assert_eq!(import.subjects.names().collect::<Vec<_>>(), vec!["Mathematik", "Physik"]);

    let math = import.subjects.classes("Mathematik");
    assert_eq!(math.len(), 2);
    assert_eq!(math[0].start_date, d(2025, 3, 10));
    assert_eq!(math[0].start_time, NaiveTime::from_hms_opt(12, 0, 0).unwrap());
    assert_eq!(math[0].location.as_deref(), Some("R 204"));
    assert_eq!(math[1].start_date, d(2025, 3, 17));

    let physics = import.subjects.classes("Physik");
    assert_eq!(physics[0].location, None);
    assert_eq!(physics[0].description.as_deref(), Some("Blatt 3"));
    assert_eq!(physics[0].subject, "Physik::Übung");
}

#[test]
fn missing_header_is_fatal() {
    let err = parse_classes("Subject,Start Date\nMath,10.03.2025\n").unwrap_err();
    assert!(matches!(err, ImportError::HeaderNotFound));
}

#[test]
fn rows_with_bad_dates_or_times_are_skipped() {
    let text = export(&[
        "\"Mathematik\",\"2025-03-10\",\"08:15:00\",,,\"HS 1\",\"\"",
        "\"Mathematik\",\"11.03.2025\",\"8 Uhr\",,,\"HS 1\",\"\"",
        "\"Physik\",\"12.03.2025\",\"10:00:00\",,,\"HS 2\",\"\"",
    ]);
    let import = parse_classes(&text).unwrap();
    assert_eq!(import.skipped_rows, 2);
    assert_eq!(import.classes.len(), 1);
    assert_eq!(import.classes[0].subject, "Physik");
}

#[test]
fn rows_without_subject_or_date_are_ignored_silently() {
    let text = export(&[
        "\"\",\"12.03.2025\",\"10:00:00\",,,\"\",\"\"",
        "\"Physik\",\"\",\"10:00:00\",,,\"\",\"\"",
        "\"Physik\",\"12.03.2025\",\"10:00:00\",,,\"\",\"\"",
    ]);
    let import = parse_classes(&text).unwrap();
    assert_eq!(import.skipped_rows, 0);
    assert_eq!(import.classes.len(), 1);
}

#[test]
fn equal_dates_keep_import_order() {
    let text = export(&[
        "\"Chemie :: A\",\"12.03.2025\",\"08:00:00\",,,\"\",\"\"",
        "\"Chemie :: B\",\"12.03.2025\",\"14:00:00\",,,\"\",\"\"",
        "\"Chemie :: C\",\"01.03.2025\",\"14:00:00\",,,\"\",\"\"",
    ]);
    let import = parse_classes(&text).unwrap();
    let subjects: Vec<&str> = import
        .subjects
        .classes("Chemie")
        .iter()
        .map(|c| c.subject.as_str())
        .collect();
    assert_eq!(subjects, vec!["Chemie :: C", "Chemie :: A", "Chemie :: B"]);
}

#[test]
fn header_offset_points_at_header_line() {
    let text = export(&[]);
    let offset = find_header_offset(&text).unwrap();
    assert!(text[offset..].starts_with(HEADER));
    assert_eq!(find_header_offset("no header here\n"), None);
}

#[test]
fn latin1_export_falls_back_from_utf8() {
    let (encoding, text) = decode_text("Grüße".as_bytes());
    assert_eq!(encoding, TextEncoding::Utf8);
    assert_eq!(text, "Grüße");

    let mut bytes = Vec::new();
    bytes.extend_from_slice(HEADER.as_bytes());
    bytes.push(b'\n');
    bytes.extend_from_slice(b"\"Mathematik f\xfcr Ingenieure :: VO\",\"10.03.2025\",\"08:15:00\",,,\"\",\"\"\n");

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&bytes).unwrap();
    let import = import_classes(file.path()).unwrap();

    assert_eq!(import.encoding, TextEncoding::Latin1);
    assert_eq!(
        import.subjects.names().collect::<Vec<_>>(),
        vec!["Mathematik für Ingenieure"]
    );
}

#[test]
fn unreadable_path_reports_io_error() {
    let err = import_classes("/definitely/not/here/classes.csv").unwrap_err();
    assert!(matches!(err, ImportError::Io { .. }));
}
