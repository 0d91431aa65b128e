pub mod reader;

use crate::{
    bpmn::{Definitions, ElementType, LaneNode, Waypoint},
    error::{Error, Result},
};
use reader::read_xml;
use std::{
    collections::{HashMap, HashSet},
    path::Path,
    str::FromStr,
};

const DEFAULT_PARTICIPANT_NAME: &str = "Participant";
const DEFAULT_START_NAME: &str = "Start";
const DEFAULT_TASK_NAME: &str = "Task";
const DEFAULT_END_NAME: &str = "End";
const DEFAULT_ELEMENT_NAME: &str = "Element";

/// A diagram element with its resolved name, type and layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessElement {
    pub id: String,
    pub name: String,
    pub element_type: ElementType,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Directed edge between two elements. References that cannot be resolved are empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceFlow {
    pub id: String,
    pub source_ref: String,
    pub target_ref: String,
    pub waypoints: Vec<Waypoint>,
}

/// Swimlane and the ids of the flow nodes it owns, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Lane {
    pub id: String,
    pub name: String,
    pub elements: Vec<String>,
}

/// Flat view of a BPMN document: every drawn element, every drawn flow and every lane.
#[derive(Debug, Default)]
pub struct Diagram {
    elements: Vec<ProcessElement>,
    flows: Vec<SequenceFlow>,
    lanes: Vec<Lane>,
}

impl Diagram {
    /// Read a diagram from a BPMN file.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let root = read_xml(quick_xml::Reader::from_file(path)?)?;
        Ok(Definitions::from(&root).into())
    }

    pub fn elements(&self) -> &[ProcessElement] {
        &self.elements
    }

    pub fn flows(&self) -> &[SequenceFlow] {
        &self.flows
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn element(&self, id: &str) -> Option<&ProcessElement> {
        self.elements.iter().find(|element| element.id == id)
    }
}

impl FromStr for Diagram {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let root = read_xml(quick_xml::Reader::from_str(s))?;
        Ok(Definitions::from(&root).into())
    }
}

impl From<Definitions> for Diagram {
    fn from(definitions: Definitions) -> Self {
        Diagram::from(&definitions)
    }
}

impl From<&Definitions> for Diagram {
    fn from(definitions: &Definitions) -> Self {
        let types = type_index(definitions);

        let mut elements: Vec<ProcessElement> = definitions
            .shapes
            .iter()
            .map(|shape| {
                let id = shape.bpmn_element.as_str();
                ProcessElement {
                    id: id.into(),
                    name: resolve_name(definitions, id),
                    element_type: types
                        .get(id)
                        .copied()
                        .unwrap_or_else(|| ElementType::from_id_marker(id)),
                    x: shape.bounds.x,
                    y: shape.bounds.y,
                    width: shape.bounds.width,
                    height: shape.bounds.height,
                }
            })
            .collect();

        let flows: Vec<SequenceFlow> = definitions
            .edges
            .iter()
            .map(|edge| {
                let flow = definitions
                    .processes
                    .iter()
                    .flat_map(|process| &process.flows)
                    .find(|flow| flow.id == edge.bpmn_element);
                SequenceFlow {
                    id: edge.bpmn_element.clone(),
                    source_ref: flow.map(|flow| flow.source_ref.clone()).unwrap_or_default(),
                    target_ref: flow.map(|flow| flow.target_ref.clone()).unwrap_or_default(),
                    waypoints: edge.waypoints.clone(),
                }
            })
            .collect();

        let mut lanes = Vec::new();
        let mut seen = HashSet::new();
        let mut collect_lanes = |found: &[LaneNode]| {
            for lane in found {
                if seen.insert(lane.id.clone()) {
                    lanes.push(Lane {
                        id: lane.id.clone(),
                        name: lane.name.clone().unwrap_or_default(),
                        elements: lane.flow_node_refs.clone(),
                    });
                }
            }
        };

        // Participants carry no bounds used for the table.
        for participant in &definitions.participants {
            elements.push(ProcessElement {
                id: participant.id.clone(),
                name: participant.name.clone().unwrap_or_default(),
                element_type: ElementType::Participant,
                x: 0.0,
                y: 0.0,
                width: 0.0,
                height: 0.0,
            });
            collect_lanes(&participant.lanes);
        }
        for process in &definitions.processes {
            collect_lanes(&process.lanes);
        }

        log::debug!(
            "Extracted {} elements, {} flows, {} lanes",
            elements.len(),
            flows.len(),
            lanes.len()
        );

        Diagram {
            elements,
            flows,
            lanes,
        }
    }
}

// Type of every id that has a logical element. The first place an id shows up wins.
fn type_index(definitions: &Definitions) -> HashMap<&str, ElementType> {
    let mut types = HashMap::new();
    for participant in &definitions.participants {
        types
            .entry(participant.id.as_str())
            .or_insert(ElementType::Participant);
    }
    let lanes = definitions
        .participants
        .iter()
        .flat_map(|participant| &participant.lanes)
        .chain(definitions.processes.iter().flat_map(|process| &process.lanes));
    for lane in lanes {
        types.entry(lane.id.as_str()).or_insert(ElementType::Lane);
    }
    for node in definitions.processes.iter().flat_map(|process| &process.nodes) {
        if let Some(element_type) = node.element_type() {
            types.entry(node.id.as_str()).or_insert(element_type);
        }
    }
    types
}

// Participants, then start events, tasks and end events. The first list holding
// the id decides the name, or its default when the name is missing.
fn resolve_name(definitions: &Definitions, id: &str) -> String {
    fn named(name: Option<&String>, default: &str) -> String {
        name.filter(|name| !name.is_empty())
            .map_or_else(|| default.to_string(), String::clone)
    }

    if let Some(participant) = definitions.participants.iter().find(|p| p.id == id) {
        return named(participant.name.as_ref(), DEFAULT_PARTICIPANT_NAME);
    }

    [
        (ElementType::StartEvent, DEFAULT_START_NAME),
        (ElementType::Task, DEFAULT_TASK_NAME),
        (ElementType::EndEvent, DEFAULT_END_NAME),
    ]
    .into_iter()
    .find_map(|(element_type, default)| {
        definitions
            .processes
            .iter()
            .flat_map(|process| &process.nodes)
            .find(|node| node.id == id && node.element_type() == Some(element_type))
            .map(|node| named(node.name.as_ref(), default))
    })
    .unwrap_or_else(|| DEFAULT_ELEMENT_NAME.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    static APPROVAL: &str = include_str!("../demos/approval.bpmn");

    #[test]
    fn extracts_elements_in_shape_order() -> Result<(), Box<dyn std::error::Error>> {
        let diagram: Diagram = APPROVAL.parse()?;
        let ids: Vec<&str> = diagram.elements().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "Participant_1",
                "Lane_Approver",
                "Lane_Requester",
                "Start_1",
                "T2",
                "T1",
                "End_1",
                "Participant_1"
            ]
        );

        let submit = diagram.element("T1").ok_or("T1 missing")?;
        assert_eq!(submit.element_type, ElementType::Task);
        assert_eq!(submit.name, "Submit Request");
        assert_eq!((submit.x, submit.y), (280.0, 90.0));

        let end = diagram.element("End_1").ok_or("End_1 missing")?;
        assert_eq!(end.element_type, ElementType::EndEvent);
        assert_eq!(end.name, DEFAULT_END_NAME);

        let lane = diagram.element("Lane_Approver").ok_or("lane missing")?;
        assert_eq!(lane.element_type, ElementType::Lane);
        assert_eq!(lane.name, DEFAULT_ELEMENT_NAME);

        let sentinel = diagram.elements().last().ok_or("no participant")?;
        assert_eq!(sentinel.element_type, ElementType::Participant);
        assert_eq!(sentinel.name, "Purchase Approval");
        assert_eq!(sentinel.width, 0.0);
        Ok(())
    }

    #[test]
    fn resolves_flow_endpoints() -> Result<(), Box<dyn std::error::Error>> {
        let diagram: Diagram = APPROVAL.parse()?;
        let flow = &diagram.flows()[1];
        assert_eq!(flow.id, "Flow_2");
        assert_eq!(flow.source_ref, "T1");
        assert_eq!(flow.target_ref, "T2");
        assert_eq!(flow.waypoints.len(), 4);
        assert_eq!(flow.waypoints[2], Waypoint { x: 400.0, y: 270.0 });
        Ok(())
    }

    #[test]
    fn dangling_edge_resolves_to_empty() -> Result<(), Box<dyn std::error::Error>> {
        let diagram: Diagram = r#"<definitions><BPMNDiagram><BPMNPlane>
            <BPMNEdge bpmnElement="Flow_9"><waypoint x="1" y="2"/></BPMNEdge>
            </BPMNPlane></BPMNDiagram></definitions>"#
            .parse()?;
        assert_eq!(diagram.flows()[0].source_ref, "");
        assert_eq!(diagram.flows()[0].target_ref, "");
        assert_eq!(diagram.flows()[0].waypoints.len(), 1);
        Ok(())
    }

    #[test]
    fn default_names_follow_lookup_order() -> Result<(), Box<dyn std::error::Error>> {
        let diagram: Diagram = r#"<definitions>
            <collaboration><participant id="Pool"/></collaboration>
            <process id="P">
              <startEvent id="S"/><task id="T" name=""/><endEvent id="E"/>
              <exclusiveGateway id="G" name="Decide"/>
            </process>
            <BPMNDiagram><BPMNPlane>
              <BPMNShape bpmnElement="Pool"><Bounds x="0" y="0" width="1" height="1"/></BPMNShape>
              <BPMNShape bpmnElement="S"><Bounds x="0" y="0" width="1" height="1"/></BPMNShape>
              <BPMNShape bpmnElement="T"><Bounds x="0" y="0" width="1" height="1"/></BPMNShape>
              <BPMNShape bpmnElement="E"><Bounds x="0" y="0" width="1" height="1"/></BPMNShape>
              <BPMNShape bpmnElement="G"><Bounds x="0" y="0" width="1" height="1"/></BPMNShape>
            </BPMNPlane></BPMNDiagram>
            </definitions>"#
            .parse()?;
        let names: Vec<&str> = diagram.elements().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Participant", "Start", "Task", "End", "Element", ""]);
        assert_eq!(diagram.elements()[4].element_type, ElementType::Gateway);
        Ok(())
    }

    #[test]
    fn shapes_without_logical_element_use_id_marker() -> Result<(), Box<dyn std::error::Error>> {
        let diagram: Diagram = r#"<definitions><BPMNDiagram><BPMNPlane>
            <BPMNShape bpmnElement="Activity_0x"><Bounds x="0" y="0" width="1" height="1"/></BPMNShape>
            <BPMNShape bpmnElement="Thing_1"><Bounds x="0" y="0" width="1" height="1"/></BPMNShape>
            </BPMNPlane></BPMNDiagram></definitions>"#
            .parse()?;
        assert_eq!(diagram.elements()[0].element_type, ElementType::Task);
        assert_eq!(diagram.elements()[1].element_type, ElementType::Unknown);
        Ok(())
    }

    #[test]
    fn lanes_from_both_locations_are_merged() -> Result<(), Box<dyn std::error::Error>> {
        let diagram: Diagram = r#"<definitions>
            <collaboration>
              <participant id="Pool_A"><laneSet><lane id="L1" name="Clerk">
                <flowNodeRef>T1</flowNodeRef></lane></laneSet></participant>
              <participant id="Pool_B"><laneSet><lane id="L2"/></laneSet></participant>
            </collaboration>
            <process id="P"><laneSet>
              <lane id="L1" name="Duplicate"/>
              <lane id="L3" name="Boss"><flowNodeRef>T2</flowNodeRef><flowNodeRef>T3</flowNodeRef></lane>
            </laneSet></process>
            </definitions>"#
            .parse()?;
        let lanes = diagram.lanes();
        assert_eq!(lanes.len(), 3);
        assert_eq!(lanes[0].name, "Clerk");
        assert_eq!(lanes[1].name, "");
        assert!(lanes[1].elements.is_empty());
        assert_eq!(lanes[2].elements, ["T2", "T3"]);
        assert_eq!(diagram.elements().len(), 2);
        Ok(())
    }

    #[test]
    fn reads_from_file() -> Result<(), Box<dyn std::error::Error>> {
        let diagram = Diagram::new("demos/default.bpmn")?;
        assert_eq!(diagram.lanes().len(), 1);
        assert_eq!(diagram.flows().len(), 2);
        assert!(Diagram::new("demos/missing.bpmn").is_err());
        Ok(())
    }
}
