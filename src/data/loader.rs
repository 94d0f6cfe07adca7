use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::Result;

use super::model::{Group, GroupSlot, PartitionedSamples};
use crate::error::ReportError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the sample file at `path` and distribute it over `slots`.
///
/// Line `i` (0-based) goes to slot `i / group_size`. Lines past
/// `slots.len() * group_size` are read but neither parsed nor stored.
pub fn load_groups(path: &Path, slots: &[GroupSlot], group_size: usize) -> Result<PartitionedSamples> {
    let file = File::open(path).map_err(|source| ReportError::InputMissing {
        path: path.to_path_buf(),
        source,
    })?;

    let samples = partition_samples(BufReader::new(file), slots, group_size).map_err(|e| {
        match e.downcast::<std::io::Error>() {
            Ok(source) => ReportError::InputRead {
                path: path.to_path_buf(),
                source,
            }
            .into(),
            Err(other) => other,
        }
    })?;

    log::info!(
        "Loaded {} samples from {} ({} lines)",
        samples.stored(),
        path.display(),
        samples.lines_read
    );
    if samples.discarded > 0 {
        log::warn!(
            "{} lines beyond the first {} were ignored",
            samples.discarded,
            slots.len() * group_size
        );
    }

    Ok(samples)
}

// ---------------------------------------------------------------------------
// Partitioning
// ---------------------------------------------------------------------------

/// Partition any line-oriented reader. Only the first whitespace-delimited
/// token of each line is used.
pub fn partition_samples<R: BufRead>(
    reader: R,
    slots: &[GroupSlot],
    group_size: usize,
) -> Result<PartitionedSamples> {
    let capacity = slots.len() * group_size;
    let mut groups: Vec<Group> = slots
        .iter()
        .map(|slot| Group::from_slot(slot, group_size))
        .collect();

    let mut lines_read = 0usize;
    for line in reader.split(b'\n') {
        let bytes = line?;
        let index = lines_read;
        lines_read += 1;

        if index >= capacity {
            continue;
        }

        let text = String::from_utf8_lossy(&bytes);
        let value = parse_first_token(&text, index + 1)?;
        groups[index / group_size].values.push(value);
    }

    for group in &groups {
        log::debug!("Group {}: {} samples", group.label, group.len());
    }

    Ok(PartitionedSamples {
        groups,
        lines_read,
        discarded: lines_read.saturating_sub(capacity),
    })
}

fn parse_first_token(text: &str, line: usize) -> Result<f64, ReportError> {
    let token = text
        .split_whitespace()
        .next()
        .ok_or(ReportError::MissingValue { line })?;

    token.parse::<f64>().map_err(|source| ReportError::Parse {
        line,
        token: token.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn slots() -> Vec<GroupSlot> {
        ReportConfig::default().slots().unwrap()
    }

    fn numbered_lines(n: usize) -> String {
        (0..n).map(|i| format!("{i}\n")).collect()
    }

    fn sizes(samples: &PartitionedSamples) -> Vec<usize> {
        samples.groups.iter().map(|g| g.len()).collect()
    }

    #[test]
    fn full_input_fills_every_group_in_order() {
        let samples = partition_samples(Cursor::new(numbered_lines(600)), &slots(), 100).unwrap();
        assert_eq!(sizes(&samples), vec![100; 6]);
        assert_eq!(samples.discarded, 0);

        let b = &samples.groups[1];
        assert_eq!(b.label, "B");
        let expected: Vec<f64> = (100..200).map(|i| i as f64).collect();
        assert_eq!(b.values, expected);
    }

    #[test]
    fn short_input_fills_left_to_right() {
        let samples = partition_samples(Cursor::new(numbered_lines(250)), &slots(), 100).unwrap();
        assert_eq!(sizes(&samples), vec![100, 100, 50, 0, 0, 0]);
        assert_eq!(samples.groups[2].values.last(), Some(&249.0));
    }

    #[test]
    fn lines_past_capacity_are_consumed_but_ignored() {
        let mut input = numbered_lines(600);
        input.push_str("not a number\n\n601\n");
        let samples = partition_samples(Cursor::new(input), &slots(), 100).unwrap();
        assert_eq!(samples.lines_read, 603);
        assert_eq!(samples.discarded, 3);
        assert_eq!(samples.stored(), 600);
    }

    #[test]
    fn only_first_token_is_used() {
        let input = "0.000012 extra columns\r\n  3.5\tfoo\n1e-3\n";
        let samples = partition_samples(Cursor::new(input), &slots(), 100).unwrap();
        assert_eq!(samples.groups[0].values, vec![0.000012, 3.5, 0.001]);
    }

    #[test]
    fn non_numeric_token_reports_line() {
        let input = "1.0\n2.0\nabc 4.0\n";
        let err = partition_samples(Cursor::new(input), &slots(), 100).unwrap_err();
        match err.downcast_ref::<ReportError>() {
            Some(ReportError::Parse { line, token, .. }) => {
                assert_eq!(*line, 3);
                assert_eq!(token, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn blank_line_in_range_is_an_error() {
        let input = "1.0\n\n2.0\n";
        let err = partition_samples(Cursor::new(input), &slots(), 100).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReportError>(),
            Some(ReportError::MissingValue { line: 2 })
        ));
    }

    #[test]
    fn custom_group_size_moves_boundaries() {
        let samples = partition_samples(Cursor::new(numbered_lines(7)), &slots(), 3).unwrap();
        assert_eq!(sizes(&samples), vec![3, 3, 1, 0, 0, 0]);
        assert_eq!(samples.groups[2].values, vec![6.0]);
    }

    #[test]
    fn missing_file_is_input_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_groups(&dir.path().join("data.txt"), &slots(), 100).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReportError>(),
            Some(ReportError::InputMissing { .. })
        ));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");
        std::fs::write(&path, numbered_lines(120)).unwrap();

        let samples = load_groups(&path, &slots(), 100).unwrap();
        assert_eq!(sizes(&samples), vec![100, 20, 0, 0, 0, 0]);
    }
}
