/// Read / write whitespace-separated numbers as plain text
///
/// Blank lines, and anything following a `#`, are ignored.

use std::fs;
use std::io::Write;
use std::path::Path;

use ndarray::ArrayView2;

use crate::{Error, Result};

fn data_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(n, line)| (n + 1, line.split('#').next().unwrap_or_default().trim()))
        .filter(|(_, line)| !line.is_empty())
}

fn parse_line(path: &Path, line_number: usize, line: &str) -> Result<Vec<f64>> {
    line.split_whitespace()
        .map(|token| token.parse::<f64>().map_err(|_| Error::Parse {
            path: path.to_path_buf(),
            line: line_number,
            token: token.to_string(),
        }))
        .collect()
}

/// All numbers in the file, in order, regardless of their layout into lines.
pub fn read_values(path: &Path) -> Result<Vec<f64>> {
    let text = fs::read_to_string(path)?;
    let mut values = vec![];
    for (n, line) in data_lines(&text) {
        values.extend(parse_line(path, n, line)?);
    }
    Ok(values)
}

/// One vector per non-empty line.
pub fn read_rows(path: &Path) -> Result<Vec<Vec<f64>>> {
    let text = fs::read_to_string(path)?;
    data_lines(&text)
        .map(|(n, line)| parse_line(path, n, line))
        .collect()
}

pub fn write_rows(mut writer: impl Write, rows: ArrayView2<f64>) -> std::io::Result<()> {
    for row in rows.rows() {
        let line = row.iter().map(f64::to_string).collect::<Vec<_>>().join(" ");
        writeln!(writer, "{line}")?;
    }
    writer.flush()
}
