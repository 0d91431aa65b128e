use crate::{
    api::Warning,
    bpmn::ElementType,
    diagram::{Diagram, Lane, ProcessElement},
};
use std::collections::HashSet;

const DEFAULT_PROCESS_NAME: &str = "Process Name";
const DEFAULT_ROLE: &str = "Actor";

/// One task in the process table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessTableRow {
    /// `<lane>.<task>`, both counted from 1.
    pub step_seq: String,
    pub process_name: String,
    pub task: String,
    /// BPMN has no procedure text, so this repeats the task name.
    pub procedure: String,
    /// Always empty. Nothing in BPMN feeds it.
    pub tools_references: String,
    pub role: String,
}

/// Tasks grouped by lane, lanes ordered top to bottom as drawn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessTable {
    process_name: String,
    rows: Vec<ProcessTableRow>,
    warnings: Vec<Warning>,
}

impl ProcessTable {
    pub fn build(diagram: &Diagram) -> Self {
        let mut warnings = Vec::new();
        let process_name = process_name(diagram);

        let mut lanes: Vec<(&Lane, f64)> = diagram
            .lanes()
            .iter()
            .map(|lane| {
                let y = diagram.element(&lane.id).map(|shape| shape.y);
                if y.is_none() {
                    warnings.push(Warning::LaneWithoutShape {
                        lane: lane.id.clone(),
                    });
                }
                (lane, y.unwrap_or_default())
            })
            .collect();
        // Stable, so lanes at the same height keep document order.
        lanes.sort_by(|(_, a), (_, b)| a.total_cmp(b));

        let mut rows = Vec::new();
        for (lane_index, (lane, _)) in lanes.iter().enumerate() {
            let role = if lane.name.trim().is_empty() {
                DEFAULT_ROLE
            } else {
                lane.name.as_str()
            };

            let tasks = diagram
                .elements()
                .iter()
                .filter(|element| is_task(element) && lane.elements.contains(&element.id));
            for (task_index, task) in tasks.enumerate() {
                rows.push(ProcessTableRow {
                    step_seq: format!("{}.{}", lane_index + 1, task_index + 1),
                    process_name: process_name.clone(),
                    task: task.name.clone(),
                    procedure: task.name.clone(),
                    tools_references: String::new(),
                    role: role.into(),
                });
            }
        }

        warnings.extend(membership_warnings(diagram));
        for warning in &warnings {
            log::warn!("{warning}");
        }

        Self {
            process_name,
            rows,
            warnings,
        }
    }

    pub fn process_name(&self) -> &str {
        &self.process_name
    }

    pub fn rows(&self) -> &[ProcessTableRow] {
        &self.rows
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub(crate) fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

impl From<&Diagram> for ProcessTable {
    fn from(diagram: &Diagram) -> Self {
        ProcessTable::build(diagram)
    }
}

fn is_task(element: &ProcessElement) -> bool {
    element.element_type == ElementType::Task
}

// First participant, then first lane, then a fixed placeholder.
fn process_name(diagram: &Diagram) -> String {
    let participant = diagram
        .elements()
        .iter()
        .find(|element| element.element_type == ElementType::Participant)
        .map(|participant| participant.name.as_str());
    let lane = diagram.lanes().first().map(|lane| lane.name.as_str());

    [participant, lane]
        .into_iter()
        .flatten()
        .find(|name| !name.trim().is_empty())
        .unwrap_or(DEFAULT_PROCESS_NAME)
        .to_string()
}

fn membership_warnings(diagram: &Diagram) -> Vec<Warning> {
    let members: HashSet<&str> = diagram
        .lanes()
        .iter()
        .flat_map(|lane| lane.elements.iter().map(String::as_str))
        .collect();
    let known: HashSet<&str> = diagram.elements().iter().map(|e| e.id.as_str()).collect();
    let known = &known;

    let orphans = diagram
        .elements()
        .iter()
        .filter(|element| is_task(element) && !members.contains(element.id.as_str()))
        .map(|task| Warning::OrphanTask {
            id: task.id.clone(),
            name: task.name.clone(),
        });
    let dangling = diagram.lanes().iter().flat_map(|lane| {
        lane.elements
            .iter()
            .filter(move |id| !known.contains(id.as_str()))
            .map(move |id| Warning::DanglingMembership {
                lane: lane.id.clone(),
                element: id.clone(),
            })
    });
    orphans.chain(dangling).collect()
}
