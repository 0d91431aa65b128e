//! # bpmn-latex
//!
//! `bpmn-latex` reads a Business Process Model and Notation (BPMN) 2.0 diagram, as exported by <https://demo.bpmn.io/new>,
//! and writes the companion LaTeX documentation for it: one table row per task, grouped by the lane that owns it.
//!
//! - Lanes are numbered top to bottom as they are drawn, tasks in the order they appear in the diagram.
//! - Lanes may sit in a process `laneSet` or under a collaboration participant.
//! - Never fails. Input that cannot be read turns into a document with an error notice.
//! - Pure and synchronous. No I/O besides the optional file reader.
//!
//! Tasks that belong to no lane are left out of the table. They are reported as [`Warning`]s and logged.
//!
//! ## Example
//!
//! ### Cargo.toml
//! ```toml
//! [dependencies]
//! bpmn-latex = "0.1"
//! log = "0.4"
//! pretty_env_logger = "0.5"
//! ```
//! ### main.rs
//!
//! ```
//! use bpmn_latex::{Converter, ProcessMetadata};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     pretty_env_logger::init();
//!
//!     let bpmn = std::fs::read_to_string("demos/approval.bpmn")?;
//!     let conversion = Converter::new()
//!         .metadata(ProcessMetadata::new("Purchase Approval", "Approves purchases", "Alice", "Bob"))
//!         .convert(&bpmn, "approval.bpmn");
//!
//!     for warning in &conversion.warnings {
//!         eprintln!("{warning}");
//!     }
//!     println!("{}", conversion.document);
//!     Ok(())
//! }
//! ```

mod api;
mod bpmn;
mod convert;
mod diagram;
mod error;
pub mod latex;
mod table;

pub use api::{BpmnDocument, FileType, ProcessMetadata, Warning};
pub use bpmn::{Bounds, ElementType, Waypoint};
pub use convert::{Conversion, Converter, convert_bpmn_to_table};
pub use diagram::{Diagram, Lane, ProcessElement, SequenceFlow};
pub use error::{Error, Result};
pub use table::{ProcessTable, ProcessTableRow};
