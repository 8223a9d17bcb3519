//! CSV encoding and decoding of task records.
//!
//! The store file is UTF-8 CSV with a single header line:
//!
//! ```text
//! ID,Description,CreatedAt,IsComplete
//! 1,Buy groceries,2025-05-12T10:00:00Z,false
//! 2,"Call Ann, then Bob",2024-07-27T16:45:19-05:00,true
//! ```
//!
//! Descriptions containing commas, quotes, or newlines are quoted per RFC 4180.

use crate::error::{Error, Result};
use crate::tasks::models::Task;
use chrono::DateTime;

/// Header fields written as the first line of every store file.
pub const HEADER_FIELDS: [&str; 4] = ["ID", "Description", "CreatedAt", "IsComplete"];

/// The header line, including its terminator.
pub const HEADER_LINE: &str = "ID,Description,CreatedAt,IsComplete\n";

/// Number of fields a record must carry.
const RECORD_FIELDS: usize = 4;

/// Decode the full contents of a store file.
///
/// Empty input decodes to no tasks. Otherwise the first line is treated as the header
/// and skipped. Decoding stops at the first bad record and returns its error.
///
/// # Errors
///
/// Returns `MalformedRecord`, `InvalidId`, `InvalidTimestamp`, or
/// `InvalidCompletionFlag` for the first record that fails to parse, or `Csv` if the
/// input is not valid CSV text.
pub fn decode(data: &[u8]) -> Result<Vec<Task>> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let mut reader =
        csv::ReaderBuilder::new().has_headers(false).flexible(true).from_reader(data);

    let mut tasks = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        if index == 0 {
            continue;
        }
        let line = record.position().map_or(0, csv::Position::line);
        tasks.push(decode_record(&record, line)?);
    }
    Ok(tasks)
}

fn decode_record(record: &csv::StringRecord, line: u64) -> Result<Task> {
    if record.len() < RECORD_FIELDS {
        return Err(Error::MalformedRecord {
            line,
            fields: record.len(),
            record: record.iter().collect::<Vec<_>>().join(","),
        });
    }

    let id_text = &record[0];
    let id = id_text
        .parse::<u64>()
        .map_err(|_| Error::InvalidId { line, value: id_text.to_string() })?;

    let created_text = &record[2];
    let created_at = DateTime::parse_from_rfc3339(created_text).map_err(|source| {
        Error::InvalidTimestamp { line, value: created_text.to_string(), source }
    })?;

    let flag_text = &record[3];
    let is_completed = parse_flag(flag_text)
        .ok_or_else(|| Error::InvalidCompletionFlag { line, value: flag_text.to_string() })?;

    Ok(Task { id, description: record[1].to_string(), created_at, is_completed })
}

/// Parse a completion flag, accepting the usual textual booleans in any case.
fn parse_flag(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Some(true),
        "false" | "f" | "0" => Some(false),
        _ => None,
    }
}

/// Encode tasks as a complete store file: the header line followed by one line per task.
///
/// # Errors
///
/// Returns an error only if the CSV writer fails, which does not happen for in-memory
/// buffers in practice.
pub fn encode(tasks: &[Task]) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(HEADER_LINE.len() + tasks.len() * 64);
    {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(&mut buf);

        writer.write_record(HEADER_FIELDS)?;
        for task in tasks {
            writer.write_record([
                task.id.to_string().as_str(),
                task.description.as_str(),
                task.created_at_rfc3339().as_str(),
                if task.is_completed { "true" } else { "false" },
            ])?;
        }
        writer.flush()?;
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use proptest::prelude::*;

    fn at(offset_secs: i32, y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(offset_secs).unwrap().with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_decode_tasks() {
        let data = b"ID,Description,CreatedAt,IsComplete
1,My new task,2024-07-27T16:45:19-05:00,true
2,Finish this video,2024-07-27T16:45:26-05:00,true
3,Find a video editor,2024-07-27T16:45:31-05:00,false";

        let tasks = decode(data).unwrap();
        let want = vec![
            Task {
                id: 1,
                description: "My new task".to_string(),
                created_at: at(-5 * 3600, 2024, 7, 27, 16, 45, 19),
                is_completed: true,
            },
            Task {
                id: 2,
                description: "Finish this video".to_string(),
                created_at: at(-5 * 3600, 2024, 7, 27, 16, 45, 26),
                is_completed: true,
            },
            Task {
                id: 3,
                description: "Find a video editor".to_string(),
                created_at: at(-5 * 3600, 2024, 7, 27, 16, 45, 31),
                is_completed: false,
            },
        ];
        assert_eq!(tasks, want);
        assert_eq!(tasks[0].created_at.offset().local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn test_decode_empty_input() {
        assert!(decode(b"").unwrap().is_empty());
    }

    #[test]
    fn test_decode_header_only() {
        assert!(decode(HEADER_LINE.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_decode_crlf_line_endings() {
        let data = b"ID,Description,CreatedAt,IsComplete\r\n1,A,2025-05-12T10:00:00Z,false\r\n2,B,2025-05-12T11:00:00Z,true\r\n";
        let tasks = decode(data).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1].description, "B");
        assert!(tasks[1].is_completed);
    }

    #[test]
    fn test_decode_header_is_not_validated() {
        let data = b"whatever,goes,here\n7,Task,2025-05-12T10:00:00Z,false\n";
        let tasks = decode(data).unwrap();
        assert_eq!(tasks[0].id, 7);
    }

    #[test]
    fn test_decode_malformed_record() {
        let err = decode(b"ID,Description,CreatedAt,IsComplete\n1,Test,2025-05-12T10:00:00Z")
            .unwrap_err();
        match err {
            Error::MalformedRecord { line, fields, record } => {
                assert_eq!(line, 2);
                assert_eq!(fields, 3);
                assert_eq!(record, "1,Test,2025-05-12T10:00:00Z");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_extra_fields_ignored() {
        let tasks =
            decode(b"ID,Description,CreatedAt,IsComplete\n1,Test,2025-05-12T10:00:00Z,true,extra\n")
                .unwrap();
        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].is_completed);
    }

    #[test]
    fn test_decode_invalid_id() {
        let err = decode(b"ID,Description,CreatedAt,IsComplete\nfoo,Test,2025-05-12T10:00:00Z,true")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidId { line: 2, ref value } if value == "foo"));
        assert!(err.to_string().contains("failed to parse ID"));
    }

    #[test]
    fn test_decode_negative_id_rejected() {
        let err = decode(b"ID,Description,CreatedAt,IsComplete\n-1,Test,2025-05-12T10:00:00Z,true")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidId { .. }));
    }

    #[test]
    fn test_decode_invalid_timestamp() {
        let err = decode(b"ID,Description,CreatedAt,IsComplete\n1,Test,notatime,true").unwrap_err();
        assert!(matches!(err, Error::InvalidTimestamp { ref value, .. } if value == "notatime"));
        assert!(err.to_string().contains("failed to parse CreatedAt"));
    }

    #[test]
    fn test_decode_invalid_completion_flag() {
        let err = decode(b"ID,Description,CreatedAt,IsComplete\n1,Test,2025-05-12T10:00:00Z,notabool")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidCompletionFlag { ref value, .. } if value == "notabool"));
        assert!(err.to_string().contains("failed to parse IsCompleted"));
    }

    #[test]
    fn test_decode_is_all_or_nothing() {
        let data = b"ID,Description,CreatedAt,IsComplete
1,Good,2025-05-12T10:00:00Z,false
2,Good too,2025-05-12T10:00:00Z,false
x,Bad,2025-05-12T10:00:00Z,false
4,Never read,2025-05-12T10:00:00Z,false";
        let err = decode(data).unwrap_err();
        assert!(matches!(err, Error::InvalidId { line: 4, .. }));
    }

    #[test]
    fn test_decode_flag_spellings() {
        for (text, want) in
            [("true", true), ("TRUE", true), ("True", true), ("t", true), ("1", true)]
                .into_iter()
                .chain([("false", false), ("FALSE", false), ("F", false), ("0", false)])
        {
            assert_eq!(parse_flag(text), Some(want), "flag {text}");
        }
        assert_eq!(parse_flag("yes"), None);
        assert_eq!(parse_flag(""), None);
    }

    #[test]
    fn test_decode_invalid_utf8() {
        let mut data = b"ID,Description,CreatedAt,IsComplete\n1,".to_vec();
        data.extend_from_slice(&[0xff, 0xfe]);
        data.extend_from_slice(b",2025-05-12T10:00:00Z,false\n");
        assert!(matches!(decode(&data).unwrap_err(), Error::Csv(_)));
    }

    #[test]
    fn test_encode_empty_is_header_only() {
        assert_eq!(encode(&[]).unwrap(), HEADER_LINE.as_bytes());
    }

    #[test]
    fn test_encode_format() {
        let mut done = Task::new(2, "Finish this video", at(-5 * 3600, 2024, 7, 27, 16, 45, 26));
        done.is_completed = true;
        let tasks = vec![Task::new(1, "Buy groceries", at(0, 2025, 5, 12, 10, 0, 0)), done];

        let text = String::from_utf8(encode(&tasks).unwrap()).unwrap();
        assert_eq!(
            text,
            "ID,Description,CreatedAt,IsComplete\n\
             1,Buy groceries,2025-05-12T10:00:00Z,false\n\
             2,Finish this video,2024-07-27T16:45:26-05:00,true\n"
        );
    }

    #[test]
    fn test_encode_quotes_delimiters() {
        let tasks = vec![Task::new(
            1,
            "Call Ann, then \"Bob\"\nand Carol",
            at(0, 2025, 5, 12, 10, 0, 0),
        )];
        let bytes = encode(&tasks).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.contains("\"Call Ann, then \"\"Bob\"\"\nand Carol\""));
        assert_eq!(decode(&bytes).unwrap(), tasks);
    }

    #[test]
    fn test_round_trip_keeps_subsecond_precision() {
        let created = at(3600, 2025, 5, 12, 10, 0, 0) + chrono::Duration::milliseconds(250);
        let tasks = vec![Task::new(9, "Precise", created)];
        let decoded = decode(&encode(&tasks).unwrap()).unwrap();
        assert_eq!(decoded, tasks);
        assert_eq!(decoded[0].created_at.offset(), created.offset());
    }

    fn arb_task() -> impl Strategy<Value = Task> {
        (
            any::<u64>(),
            any::<String>(),
            0i64..=4_000_000_000,
            0u32..1_000_000_000,
            -1439i32..=1439,
            any::<bool>(),
        )
            .prop_map(|(id, description, secs, nanos, offset_minutes, is_completed)| {
                let offset = FixedOffset::east_opt(offset_minutes * 60).unwrap();
                let created_at =
                    DateTime::from_timestamp(secs, nanos).unwrap().with_timezone(&offset);
                Task { id, description, created_at, is_completed }
            })
    }

    proptest! {
        #[test]
        fn prop_decode_inverts_encode(tasks in prop::collection::vec(arb_task(), 0..8)) {
            let decoded = decode(&encode(&tasks).unwrap()).unwrap();
            prop_assert_eq!(decoded, tasks);
        }
    }
}
