//! Output formats for `propdesk table`.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde_json::Value;

use propdesk_core::{TableBody, TableView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Aligned columns for the terminal.
    Text,
    Csv,
    /// The visible records themselves, unrendered.
    Json,
}

pub fn render(view: &TableView<'_, Value>, visible: &[&Value], format: Format) -> Result<String> {
    match format {
        Format::Text => Ok(text(view)),
        Format::Csv => csv(view),
        Format::Json => {
            let mut out = serde_json::to_string_pretty(visible)?;
            out.push('\n');
            Ok(out)
        }
    }
}

fn text(view: &TableView<'_, Value>) -> String {
    let headers: Vec<String> = view
        .headers
        .iter()
        .map(|h| match h.sorted {
            Some(dir) => format!("{} {}", h.label, dir.arrow()),
            None => h.label.clone(),
        })
        .collect();
    let rows: Vec<Vec<&str>> = match &view.body {
        TableBody::Rows(rows) => rows
            .iter()
            .map(|r| r.cells.iter().map(|c| c.text.as_str()).collect())
            .collect(),
        _ => Vec::new(),
    };

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: &[&str]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{c:<w$}"))
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
    let mut out = line(&header_refs);
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');

    match &view.body {
        TableBody::Empty { message, .. } => {
            out.push_str(message);
            out.push('\n');
        }
        _ => {
            for row in &rows {
                out.push_str(&line(row));
                out.push('\n');
            }
            out.push_str(&format!("\n{} rows\n", view.visible));
        }
    }
    out
}

fn csv(view: &TableView<'_, Value>) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(view.headers.iter().map(|h| h.label.as_str()))?;
    if let TableBody::Rows(rows) = &view.body {
        for row in rows {
            wtr.write_record(row.cells.iter().map(|c| c.text.as_str()))?;
        }
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}
