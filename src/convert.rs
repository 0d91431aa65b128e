use crate::{
    api::{BpmnDocument, FileType, ProcessMetadata, Warning},
    diagram::Diagram,
    error::Error,
    latex::{render_document, render_error_document},
    table::ProcessTable,
};
use chrono::{Local, NaiveDate};

/// Turns BPMN XML into a LaTeX process document.
///
/// ```
/// use bpmn_latex::{Converter, ProcessMetadata};
///
/// let latex = Converter::new()
///     .metadata(ProcessMetadata::new("Refund Flow", "Handles refunds", "Alice", "Bob"))
///     .convert(include_str!("../demos/approval.bpmn"), "approval.bpmn")
///     .document;
/// ```
#[derive(Debug, Default, Clone)]
pub struct Converter {
    date: Option<NaiveDate>,
    metadata: Option<ProcessMetadata>,
}

/// Output of one conversion.
///
/// `document` is always a complete LaTeX document. When the diagram could not
/// be read it is the error document and `error` tells why.
#[derive(Debug)]
pub struct Conversion {
    pub document: String,
    pub warnings: Vec<Warning>,
    pub error: Option<Error>,
}

impl Conversion {
    pub fn is_error_document(&self) -> bool {
        self.error.is_some()
    }
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Date printed in the title block. Today when not set.
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date.replace(date);
        self
    }

    /// Fields for the "Process Details" section.
    pub fn metadata(mut self, metadata: ProcessMetadata) -> Self {
        self.metadata.replace(metadata);
        self
    }

    pub fn convert(&self, bpmn: &str, file_name: &str) -> Conversion {
        self.convert_with(bpmn, file_name, self.metadata.as_ref())
    }

    /// Convert a stored file, using its name for the title and its metadata
    /// over the converter's own.
    pub fn convert_document(&self, document: &BpmnDocument) -> Conversion {
        if document.file_type != FileType::Bpmn {
            log::warn!(
                "Converting {} ({}) stored as {:?}",
                document.name,
                document.file_id,
                document.file_type
            );
        }
        let metadata = document
            .process_metadata
            .as_ref()
            .or(self.metadata.as_ref());
        self.convert_with(&document.content, &document.name, metadata)
    }

    fn convert_with(
        &self,
        bpmn: &str,
        file_name: &str,
        metadata: Option<&ProcessMetadata>,
    ) -> Conversion {
        let date = self.date.unwrap_or_else(|| Local::now().date_naive());
        match bpmn.parse::<Diagram>() {
            Ok(diagram) => {
                let table = ProcessTable::build(&diagram);
                Conversion {
                    document: render_document(&table, file_name, metadata, date),
                    warnings: table.into_warnings(),
                    error: None,
                }
            }
            Err(error) => {
                log::warn!("Could not parse BPMN diagram {file_name}: {error}");
                Conversion {
                    document: render_error_document(file_name, date),
                    warnings: Vec::new(),
                    error: Some(error),
                }
            }
        }
    }
}

/// Render `bpmn` as a LaTeX process document titled after `file_name`.
///
/// Never fails: input that cannot be read yields a document carrying an error notice.
pub fn convert_bpmn_to_table(
    bpmn: &str,
    file_name: &str,
    metadata: Option<&ProcessMetadata>,
) -> String {
    Converter::new()
        .convert_with(bpmn, file_name, metadata)
        .document
}
