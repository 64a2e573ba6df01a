use serde::Serialize;
use std::fmt::Display;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Plain-text listing for flock, night, and ledger views.
///
/// Columns are left-aligned and padded to the widest cell; no box drawing,
/// so the output stays grep- and diff-friendly.
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn row<I, C>(&mut self, cells: I)
    where
        I: IntoIterator<Item = C>,
        C: Display,
    {
        self.rows.push(cells.into_iter().map(|c| c.to_string()).collect());
    }

    pub fn print(&self) {
        print!("{}", self.render());
    }

    fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.len()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                widths[i] = widths[i].max(cell.len());
            }
        }

        let mut out = String::new();
        render_line(&mut out, self.headers.iter().map(|h| h.to_string()), &widths);
        render_line(&mut out, widths.iter().map(|w| "-".repeat(*w)), &widths);
        for row in &self.rows {
            render_line(&mut out, row.iter().cloned(), &widths);
        }
        out
    }
}

fn render_line(out: &mut String, cells: impl Iterator<Item = String>, widths: &[usize]) {
    let padded: Vec<String> = cells
        .zip(widths.iter().copied())
        .map(|(cell, w)| format!("{cell:<w$}"))
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
