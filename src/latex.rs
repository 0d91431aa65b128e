//! LaTeX rendering of a [`ProcessTable`].

use crate::{api::ProcessMetadata, error::PARSE_FAILURE_MSG, table::ProcessTable};
use chrono::NaiveDate;
use std::fmt::Display;

const DATE_FORMAT: &str = "%B %-d, %Y";
const NOT_SPECIFIED: &str = "Not specified";
const NO_DESCRIPTION: &str = "No description available";
const EMPTY_CELL: &str = "--";
const TITLE_SUFFIXES: [&str; 2] = [".bpmn", ".xml"];

const TABLE_HEADER: [&str; 6] = [
    r"\textbf{Step}",
    r"\textbf{Process}",
    r"\textbf{Task}",
    r"\textbf{Procedure}",
    r"\textbf{Tools/Refs}",
    r"\textbf{Role}",
];
const DETAILS_HEADER: [&str; 4] = [
    r"\textbf{Process Name}",
    r"\textbf{Description}",
    r"\textbf{Process Owner}",
    r"\textbf{Process Manager}",
];

/// File name without a trailing `.bpmn` or `.xml`.
pub fn document_title(file_name: &str) -> &str {
    TITLE_SUFFIXES
        .iter()
        .find_map(|suffix| file_name.strip_suffix(suffix))
        .unwrap_or(file_name)
}

pub fn render_document(
    table: &ProcessTable,
    file_name: &str,
    metadata: Option<&ProcessMetadata>,
    date: NaiveDate,
) -> String {
    Document {
        title: document_title(file_name),
        date,
        body: Body::Table { table, metadata },
    }
    .to_string()
}

/// Document put in place of the table when the diagram cannot be read.
pub fn render_error_document(file_name: &str, date: NaiveDate) -> String {
    Document {
        title: document_title(file_name),
        date,
        body: Body::Error,
    }
    .to_string()
}

/// Escape LaTeX special characters. Runs of whitespace, line breaks included,
/// become one space.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for (index, word) in text.split_whitespace().enumerate() {
        if index > 0 {
            escaped.push(' ');
        }
        for c in word.chars() {
            match c {
                '\\' => escaped.push_str(r"\textbackslash{}"),
                '~' => escaped.push_str(r"\textasciitilde{}"),
                '^' => escaped.push_str(r"\textasciicircum{}"),
                '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                    escaped.push('\\');
                    escaped.push(c);
                }
                c => escaped.push(c),
            }
        }
    }
    escaped
}

struct Document<'a> {
    title: &'a str,
    date: NaiveDate,
    body: Body<'a>,
}

enum Body<'a> {
    Table {
        table: &'a ProcessTable,
        metadata: Option<&'a ProcessMetadata>,
    },
    Error,
}

impl Display for Document<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, r"\documentclass[11pt]{{article}}")?;
        writeln!(f, r"\usepackage[utf8]{{inputenc}}")?;
        writeln!(f, r"\usepackage[margin=2cm]{{geometry}}")?;
        writeln!(f, r"\usepackage{{longtable}}")?;
        writeln!(f, r"\usepackage{{array}}")?;
        writeln!(f)?;
        writeln!(f, r"\title{{{}}}", escape(self.title))?;
        writeln!(f, r"\date{{Generated on {}}}", self.date.format(DATE_FORMAT))?;
        writeln!(f)?;
        writeln!(f, r"\begin{{document}}")?;
        writeln!(f, r"\maketitle")?;
        writeln!(f)?;
        match &self.body {
            Body::Table { table, metadata } => {
                write_process_table(f, table)?;
                writeln!(f)?;
                write_process_details(f, *metadata)?;
            }
            Body::Error => {
                writeln!(f, r"\section*{{Process Table}}")?;
                writeln!(f, r"\textbf{{Error: {PARSE_FAILURE_MSG}}}")?;
                writeln!(f)?;
                writeln!(
                    f,
                    "The diagram could not be read as BPMN 2.0 XML. \
                     Export it again from the editor and regenerate this document."
                )?;
            }
        }
        writeln!(f)?;
        writeln!(f, r"\end{{document}}")
    }
}

fn write_process_table(f: &mut std::fmt::Formatter<'_>, table: &ProcessTable) -> std::fmt::Result {
    writeln!(f, r"\section*{{Process Table}}")?;
    writeln!(
        f,
        r"\begin{{longtable}}{{|p{{1.2cm}}|p{{2.6cm}}|p{{3cm}}|p{{3.4cm}}|p{{2.2cm}}|p{{2.2cm}}|}}"
    )?;
    writeln!(f, r"\hline")?;
    write_row(f, &TABLE_HEADER)?;
    writeln!(f, r"\hline")?;
    writeln!(f, r"\endhead")?;
    for row in table.rows() {
        let tools = if row.tools_references.is_empty() {
            EMPTY_CELL.to_string()
        } else {
            escape(&row.tools_references)
        };
        write_row(
            f,
            &[
                escape(&row.step_seq),
                escape(&row.process_name),
                escape(&row.task),
                escape(&row.procedure),
                tools,
                escape(&row.role),
            ],
        )?;
        writeln!(f, r"\hline")?;
    }
    writeln!(f, r"\end{{longtable}}")
}

fn write_process_details(
    f: &mut std::fmt::Formatter<'_>,
    metadata: Option<&ProcessMetadata>,
) -> std::fmt::Result {
    let field = |value: Option<&Option<String>>, default: &str| {
        value
            .and_then(Option::as_deref)
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| default.to_string(), escape)
    };

    writeln!(f, r"\section*{{Process Details}}")?;
    writeln!(f, r"\begin{{longtable}}{{|p{{3cm}}|p{{5.4cm}}|p{{3.2cm}}|p{{3.2cm}}|}}")?;
    writeln!(f, r"\hline")?;
    write_row(f, &DETAILS_HEADER)?;
    writeln!(f, r"\hline")?;
    write_row(
        f,
        &[
            field(metadata.map(|m| &m.process_name), NOT_SPECIFIED),
            field(metadata.map(|m| &m.description), NO_DESCRIPTION),
            field(metadata.map(|m| &m.process_owner), NOT_SPECIFIED),
            field(metadata.map(|m| &m.process_manager), NOT_SPECIFIED),
        ],
    )?;
    writeln!(f, r"\hline")?;
    writeln!(f, r"\end{{longtable}}")
}

fn write_row<S: AsRef<str>>(f: &mut std::fmt::Formatter<'_>, cells: &[S]) -> std::fmt::Result {
    let cells: Vec<&str> = cells.iter().map(AsRef::as_ref).collect();
    writeln!(f, r"{} \\", cells.join(" & "))
}
