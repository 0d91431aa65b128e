use serde::Deserialize;
use std::fmt::Display;

/// Descriptive fields shown in the "Process Details" section.
///
/// Missing or empty fields are rendered with a placeholder. Field names match
/// the camelCase JSON used by the file store (`processName`, `processOwner`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessMetadata {
    pub process_name: Option<String>,
    pub description: Option<String>,
    pub process_owner: Option<String>,
    pub process_manager: Option<String>,
}

impl ProcessMetadata {
    pub fn new(
        process_name: impl Into<String>,
        description: impl Into<String>,
        process_owner: impl Into<String>,
        process_manager: impl Into<String>,
    ) -> Self {
        Self {
            process_name: Some(process_name.into()),
            description: Some(description.into()),
            process_owner: Some(process_owner.into()),
            process_manager: Some(process_manager.into()),
        }
    }
}

/// Kind of file kept in the file store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    #[default]
    Bpmn,
    Latex,
}

/// A stored diagram record as handed over by the file store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BpmnDocument {
    #[serde(default)]
    pub file_id: String,
    #[serde(default)]
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub file_type: FileType,
    pub content: String,
    #[serde(default)]
    pub process_metadata: Option<ProcessMetadata>,
}

/// Something in the diagram that did not make it into the table as one might expect.
/// The rendered document is the same with or without these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Task that no lane lists, so it has no row.
    OrphanTask { id: String, name: String },
    /// Lane without a diagram shape. It is ordered as if it sat at the top.
    LaneWithoutShape { lane: String },
    /// Lane lists an id that has no diagram element.
    DanglingMembership { lane: String, element: String },
}

impl Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::OrphanTask { id, name } => {
                write!(f, r#"Task "{name}" ({id}) belongs to no lane and is left out"#)
            }
            Warning::LaneWithoutShape { lane } => write!(f, "Lane {lane} has no shape"),
            Warning::DanglingMembership { lane, element } => {
                write!(f, "Lane {lane} references unknown element {element}")
            }
        }
    }
}
