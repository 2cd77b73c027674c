//! Dashboard report rendering.
//!
//! Assembles the presentation sections in dashboard order: load confirmation,
//! overview metrics, data preview, column details, numeric statistics, and
//! categorical statistics. Sections fail independently: a section that cannot
//! be built degrades to its user-visible message while the rest of the report
//! still renders.

use std::fmt::Write as _;

use csvsight_core::{Table, TableProfile};
use serde::Serialize;

/// Section fallback messages shown when a computation cannot be displayed.
const METRICS_FALLBACK: &str = "Could not calculate summary metrics";
const PREVIEW_FALLBACK: &str = "Could not render data preview";
const COLUMN_DETAILS_FALLBACK: &str = "Could not generate column details";
const NUMERIC_FALLBACK: &str = "Could not calculate numeric statistics";
const CATEGORICAL_FALLBACK: &str = "Could not calculate categorical statistics";

/// Rendering options for the textual report formats.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Emit markdown headings and pipe tables instead of plain text
    pub markdown: bool,
    /// Number of leading rows shown in the data preview
    pub preview_rows: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            markdown: false,
            preview_rows: 5,
        }
    }
}

/// Renders the full dashboard report as text or markdown.
pub fn render_report(table: &Table, profile: &TableProfile, options: &ReportOptions) -> String {
    let mut sections = Vec::new();

    sections.push(title_section(table, options.markdown));
    sections.push(resolve(overview_section(profile, options.markdown), METRICS_FALLBACK));
    sections.push(resolve(
        preview_section(table, options),
        PREVIEW_FALLBACK,
    ));
    sections.push(resolve(
        column_details_section(profile, options.markdown),
        COLUMN_DETAILS_FALLBACK,
    ));
    sections.push(resolve(
        numeric_section(profile, options.markdown),
        NUMERIC_FALLBACK,
    ));
    sections.push(resolve(
        categorical_section(profile, options.markdown),
        CATEGORICAL_FALLBACK,
    ));

    sections.join("\n")
}

/// JSON report payload: the profile plus the data preview.
#[derive(Serialize)]
struct JsonReport<'a> {
    source: &'a str,
    preview_columns: Vec<String>,
    preview_rows: Vec<Vec<String>>,
    profile: &'a TableProfile,
}

/// Renders the report as pretty-printed JSON.
pub fn render_json_report(
    table: &Table,
    profile: &TableProfile,
    options: &ReportOptions,
) -> csvsight_core::Result<String> {
    let shown = preview_row_limit(table, options.preview_rows);
    let report = JsonReport {
        source: table.name(),
        preview_columns: table
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
        preview_rows: (0..shown)
            .map(|index| {
                table
                    .row(index)
                    .into_iter()
                    .map(|cell| cell.to_string())
                    .collect()
            })
            .collect(),
        profile,
    };

    serde_json::to_string_pretty(&report)
        .map_err(|e| csvsight_core::CsvSightError::serialization("JSON report", e))
}

/// Resolves a section build result to its text, or to its fallback message.
fn resolve(section: Result<String, std::fmt::Error>, fallback: &str) -> String {
    match section {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("{}: {}", fallback, e);
            format!("{}.\n", fallback)
        }
    }
}

fn heading(title: &str, markdown: bool) -> String {
    if markdown {
        format!("## {}\n", title)
    } else {
        format!("== {} ==\n", title)
    }
}

fn title_section(table: &Table, markdown: bool) -> String {
    let mut out = String::new();
    if markdown {
        out.push_str(&format!("# CSV Report: {}\n\n", table.name()));
    } else {
        out.push_str(&format!("CSV Report: {}\n\n", table.name()));
    }
    out.push_str(&format!(
        "Loaded {} rows and {} columns.\n",
        table.row_count(),
        table.column_count()
    ));
    out
}

fn overview_section(profile: &TableProfile, markdown: bool) -> Result<String, std::fmt::Error> {
    let mut out = heading("Overview", markdown);
    writeln!(out, "Rows: {}", profile.row_count)?;
    writeln!(out, "Columns: {}", profile.column_count)?;
    writeln!(out, "Missing cells: {}%", profile.missing_percentage)?;
    writeln!(out, "Duplicate rows: {}", profile.duplicate_row_count)?;
    Ok(out)
}

fn preview_section(table: &Table, options: &ReportOptions) -> Result<String, std::fmt::Error> {
    let shown = preview_row_limit(table, options.preview_rows);
    let mut out = heading(
        &format!("Data Preview (first {} rows)", options.preview_rows),
        options.markdown,
    );

    if table.column_count() == 0 {
        writeln!(out, "(empty table)")?;
        return Ok(out);
    }

    let headers: Vec<String> = table
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    let rows: Vec<Vec<String>> = (0..shown)
        .map(|index| {
            table
                .row(index)
                .into_iter()
                .map(|cell| cell.to_string())
                .collect()
        })
        .collect();

    out.push_str(&render_table(&headers, &rows, options.markdown)?);
    Ok(out)
}

fn column_details_section(
    profile: &TableProfile,
    markdown: bool,
) -> Result<String, std::fmt::Error> {
    let mut out = heading("Column Details", markdown);

    if profile.columns.is_empty() {
        writeln!(out, "(no columns)")?;
        return Ok(out);
    }

    let headers = [
        "Column",
        "Type",
        "Non-Missing",
        "Missing",
        "Missing %",
        "Unique",
    ]
    .map(str::to_string);
    let rows: Vec<Vec<String>> = profile
        .columns
        .iter()
        .map(|info| {
            vec![
                info.name.clone(),
                info.data_type.to_string(),
                info.non_missing_count.to_string(),
                info.missing_count.to_string(),
                info.missing_percentage.to_string(),
                info.distinct_count.to_string(),
            ]
        })
        .collect();

    out.push_str(&render_table(&headers, &rows, markdown)?);
    Ok(out)
}

fn numeric_section(profile: &TableProfile, markdown: bool) -> Result<String, std::fmt::Error> {
    let mut out = heading("Numeric Statistics", markdown);

    let Some(summaries) = &profile.numeric else {
        writeln!(out, "No numeric columns found.")?;
        return Ok(out);
    };

    let headers = [
        "Column", "Count", "Mean", "Std Dev", "Min", "25%", "50%", "75%", "Max",
    ]
    .map(str::to_string);
    let rows: Vec<Vec<String>> = summaries
        .iter()
        .map(|summary| {
            vec![
                summary.name.clone(),
                summary.count.to_string(),
                format_optional(summary.mean),
                format_optional(summary.std_dev),
                format_optional(summary.min),
                format_optional(summary.q25),
                format_optional(summary.median),
                format_optional(summary.q75),
                format_optional(summary.max),
            ]
        })
        .collect();

    out.push_str(&render_table(&headers, &rows, markdown)?);
    Ok(out)
}

fn categorical_section(profile: &TableProfile, markdown: bool) -> Result<String, std::fmt::Error> {
    let mut out = heading("Categorical Statistics", markdown);

    let Some(summaries) = &profile.categorical else {
        writeln!(out, "No categorical columns found.")?;
        return Ok(out);
    };

    let headers = ["Column", "Count", "Unique", "Top", "Frequency"].map(str::to_string);
    let rows: Vec<Vec<String>> = summaries
        .iter()
        .map(|summary| {
            vec![
                summary.name.clone(),
                summary.count.to_string(),
                summary.distinct_count.to_string(),
                summary.mode.clone().unwrap_or_default(),
                summary
                    .mode_count
                    .map(|count| count.to_string())
                    .unwrap_or_default(),
            ]
        })
        .collect();

    out.push_str(&render_table(&headers, &rows, markdown)?);
    Ok(out)
}

fn preview_row_limit(table: &Table, requested: usize) -> usize {
    requested.min(table.row_count() as usize)
}

/// Formats an optional statistic; absent values render as an empty cell.
fn format_optional(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_default()
}

/// Formats a statistic with up to four decimal places, trimming zeros.
fn format_number(value: f64) -> String {
    let mut text = format!("{:.4}", value);
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    text
}

/// Renders a table as aligned plain text or a markdown pipe table.
fn render_table(
    headers: &[String],
    rows: &[Vec<String>],
    markdown: bool,
) -> Result<String, std::fmt::Error> {
    let mut widths: Vec<usize> = headers.iter().map(String::len).collect();
    for row in rows {
        for (index, cell) in row.iter().enumerate() {
            if cell.len() > widths[index] {
                widths[index] = cell.len();
            }
        }
    }

    let mut out = String::new();
    let render_row = |out: &mut String, cells: &[String]| -> std::fmt::Result {
        if markdown {
            write!(out, "|")?;
            for (cell, width) in cells.iter().zip(widths.iter().copied()) {
                write!(out, " {:<width$} |", cell, width = width)?;
            }
        } else {
            for (index, (cell, width)) in cells.iter().zip(widths.iter().copied()).enumerate() {
                if index > 0 {
                    write!(out, "  ")?;
                }
                write!(out, "{:<width$}", cell, width = width)?;
            }
        }
        writeln!(out)
    };

    render_row(&mut out, headers)?;

    if markdown {
        write!(out, "|")?;
        for width in widths.iter().copied() {
            write!(out, " {:-<width$} |", "", width = width)?;
        }
        writeln!(out)?;
    } else {
        let total: usize = widths.iter().sum::<usize>() + 2 * (widths.len().saturating_sub(1));
        writeln!(out, "{}", "-".repeat(total))?;
    }

    for row in rows {
        render_row(&mut out, row)?;
    }

    Ok(out)
}
