use crate::diagram::reader::XmlNode;
use std::fmt::Display;

// Definitions
const COLLABORATION: &str = "collaboration";
const PARTICIPANT: &str = "participant";
const PROCESS: &str = "process";
const LANE_SET: &str = "laneSet";
const LANE: &str = "lane";
const FLOW_NODE_REF: &str = "flowNodeRef";
const SEQUENCE_FLOW: &str = "sequenceFlow";

// Diagram interchange
const BPMN_DIAGRAM: &str = "BPMNDiagram";
const BPMN_PLANE: &str = "BPMNPlane";
const BPMN_SHAPE: &str = "BPMNShape";
const BPMN_EDGE: &str = "BPMNEdge";
const BOUNDS: &str = "Bounds";
const WAYPOINT: &str = "waypoint";

// Attributes
const ATTR_ID: &str = "id";
const ATTR_NAME: &str = "name";
const ATTR_BPMN_ELEMENT: &str = "bpmnElement";
const ATTR_SOURCE_REF: &str = "sourceRef";
const ATTR_TARGET_REF: &str = "targetRef";

const TASK_TAGS: [&str; 11] = [
    "task",
    "userTask",
    "serviceTask",
    "sendTask",
    "receiveTask",
    "manualTask",
    "businessRuleTask",
    "scriptTask",
    "callActivity",
    "subProcess",
    "transaction",
];

const GATEWAY_TAGS: [&str; 5] = [
    "exclusiveGateway",
    "parallelGateway",
    "inclusiveGateway",
    "eventBasedGateway",
    "complexGateway",
];

/// Kind of a diagram element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    StartEvent,
    EndEvent,
    Task,
    Gateway,
    Participant,
    Lane,
    Unknown,
}

impl ElementType {
    /// Type named by a BPMN tag, if the tag is one this crate knows.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "startEvent" => ElementType::StartEvent,
            "endEvent" => ElementType::EndEvent,
            PARTICIPANT => ElementType::Participant,
            LANE => ElementType::Lane,
            tag if TASK_TAGS.contains(&tag) => ElementType::Task,
            tag if GATEWAY_TAGS.contains(&tag) => ElementType::Gateway,
            _ => return None,
        })
    }

    /// Guess the type from the marker modelers put into generated ids,
    /// such as `StartEvent_1` or `Activity_0x1y2z`. First match wins.
    pub fn from_id_marker(id: &str) -> Self {
        if id.contains("StartEvent") {
            ElementType::StartEvent
        } else if id.contains("EndEvent") {
            ElementType::EndEvent
        } else if id.contains("Task") || id.contains("Activity") {
            ElementType::Task
        } else if id.contains("Gateway") {
            ElementType::Gateway
        } else if id.contains("Participant") {
            ElementType::Participant
        } else if id.contains("Lane") {
            ElementType::Lane
        } else {
            ElementType::Unknown
        }
    }
}

impl Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self, f)
    }
}

/// Top-level constructs of one BPMN document, in document order.
#[derive(Debug, Default)]
pub struct Definitions {
    pub participants: Vec<Participant>,
    pub processes: Vec<ProcessBody>,
    pub shapes: Vec<Shape>,
    pub edges: Vec<Edge>,
}

#[derive(Debug)]
pub struct Participant {
    pub id: String,
    pub name: Option<String>,
    pub lanes: Vec<LaneNode>,
}

#[derive(Debug, Default)]
pub struct ProcessBody {
    pub id: String,
    pub nodes: Vec<FlowNode>,
    pub flows: Vec<FlowRef>,
    pub lanes: Vec<LaneNode>,
}

/// Logical flow node inside a process.
#[derive(Debug)]
pub struct FlowNode {
    pub id: String,
    pub name: Option<String>,
    pub tag: String,
}

impl FlowNode {
    pub fn element_type(&self) -> Option<ElementType> {
        ElementType::from_tag(&self.tag)
    }
}

#[derive(Debug)]
pub struct FlowRef {
    pub id: String,
    pub source_ref: String,
    pub target_ref: String,
}

#[derive(Debug)]
pub struct LaneNode {
    pub id: String,
    pub name: Option<String>,
    pub flow_node_refs: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug)]
pub struct Shape {
    pub bpmn_element: String,
    pub bounds: Bounds,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug)]
pub struct Edge {
    pub bpmn_element: String,
    pub waypoints: Vec<Waypoint>,
}

impl From<&XmlNode> for Definitions {
    fn from(root: &XmlNode) -> Self {
        let participants = root
            .path(&[COLLABORATION, PARTICIPANT])
            .into_iter()
            .filter_map(|node| {
                Some(Participant {
                    id: node.attr(ATTR_ID)?.into(),
                    name: name_of(node),
                    lanes: lanes_of(node),
                })
            })
            .collect();

        let processes = root.all(PROCESS).map(process_body).collect();

        let plane = root.path(&[BPMN_DIAGRAM, BPMN_PLANE]);
        let mut shapes = Vec::new();
        for node in plane.iter().flat_map(|plane| plane.all(BPMN_SHAPE)) {
            let Some(bpmn_element) = node.attr(ATTR_BPMN_ELEMENT) else {
                log::debug!("Skipped shape {:?} without bpmnElement", node.attr(ATTR_ID));
                continue;
            };
            let Some(bounds) = node.first(BOUNDS) else {
                log::debug!("Skipped shape for {bpmn_element} without bounds");
                continue;
            };
            shapes.push(Shape {
                bpmn_element: bpmn_element.into(),
                bounds: Bounds {
                    x: coordinate(bounds, "x", bpmn_element),
                    y: coordinate(bounds, "y", bpmn_element),
                    width: coordinate(bounds, "width", bpmn_element),
                    height: coordinate(bounds, "height", bpmn_element),
                },
            });
        }

        let mut edges = Vec::new();
        for node in plane.iter().flat_map(|plane| plane.all(BPMN_EDGE)) {
            let Some(bpmn_element) = node.attr(ATTR_BPMN_ELEMENT) else {
                log::debug!("Skipped edge {:?} without bpmnElement", node.attr(ATTR_ID));
                continue;
            };
            let waypoints = node
                .all(WAYPOINT)
                .map(|point| Waypoint {
                    x: coordinate(point, "x", bpmn_element),
                    y: coordinate(point, "y", bpmn_element),
                })
                .collect();
            edges.push(Edge {
                bpmn_element: bpmn_element.into(),
                waypoints,
            });
        }

        Self {
            participants,
            processes,
            shapes,
            edges,
        }
    }
}

fn process_body(node: &XmlNode) -> ProcessBody {
    let mut body = ProcessBody {
        id: node.attr(ATTR_ID).unwrap_or_default().into(),
        lanes: lanes_of(node),
        ..Default::default()
    };

    for child in node.children() {
        let Some(id) = child.attr(ATTR_ID) else {
            continue;
        };
        if child.name() == SEQUENCE_FLOW {
            body.flows.push(FlowRef {
                id: id.into(),
                source_ref: child.attr(ATTR_SOURCE_REF).unwrap_or_default().into(),
                target_ref: child.attr(ATTR_TARGET_REF).unwrap_or_default().into(),
            });
        } else if child.name() != LANE_SET {
            body.nodes.push(FlowNode {
                id: id.into(),
                name: name_of(child),
                tag: child.name().into(),
            });
        }
    }
    body
}

// Lanes of a laneSet directly under `node`. Nested child lane sets are not followed.
fn lanes_of(node: &XmlNode) -> Vec<LaneNode> {
    node.path(&[LANE_SET, LANE])
        .into_iter()
        .filter_map(|lane| {
            Some(LaneNode {
                id: lane.attr(ATTR_ID)?.into(),
                name: name_of(lane),
                flow_node_refs: lane
                    .all(FLOW_NODE_REF)
                    .map(XmlNode::text)
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
                    .collect(),
            })
        })
        .collect()
}

fn name_of(node: &XmlNode) -> Option<String> {
    node.attr(ATTR_NAME).map(str::to_string)
}

// Missing or unreadable coordinates count as 0, the same place an unshaped lane sorts at.
fn coordinate(node: &XmlNode, attribute: &str, element: &str) -> f64 {
    let value = node.attr(attribute);
    match value
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
    {
        Some(coordinate) => coordinate,
        None => {
            log::warn!("Invalid {attribute}={value:?} on {element}, using 0");
            0.0
        }
    }
}
