/// Element of a parsed XML document.
///
/// Names are local names with the namespace prefix removed, so `bpmn:task`,
/// `bpmn2:task` and `task` all read as `task`. Attributes live apart from
/// children, and repeated children are always kept as a list no matter how
/// many occur, which is what [`XmlNode::all`] walks.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct XmlNode {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
    text: String,
}

impl XmlNode {
    pub(crate) fn new(name: impl Into<String>, attributes: Vec<(String, String)>) -> Self {
        Self {
            name: name.into(),
            attributes,
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v.as_str()))
    }

    /// Trimmed text content. Empty when the element has none.
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Every direct child with this local name, in document order.
    pub fn all<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a XmlNode> {
        self.children.iter().filter(move |child| child.name == name)
    }

    pub fn first(&self, name: &str) -> Option<&XmlNode> {
        self.all(name).next()
    }

    /// Nodes reached by following `path` one child name at a time, fanning out
    /// over repeated children at every step.
    pub fn path(&self, path: &[&str]) -> Vec<&XmlNode> {
        path.iter().fold(vec![self], |nodes, name| {
            nodes.into_iter().flat_map(|node| node.all(name)).collect()
        })
    }

    pub(crate) fn push_child(&mut self, child: XmlNode) {
        self.children.push(child);
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, children: Vec<XmlNode>) -> XmlNode {
        let mut node = XmlNode::new(name, vec![("id".into(), format!("{name}_1"))]);
        children.into_iter().for_each(|child| node.push_child(child));
        node
    }

    #[test]
    fn single_and_repeated_children_read_the_same() {
        let one = node("laneSet", vec![node("lane", vec![])]);
        let many = node("laneSet", vec![node("lane", vec![]), node("lane", vec![])]);
        assert_eq!(one.all("lane").count(), 1);
        assert_eq!(many.all("lane").count(), 2);
        assert_eq!(one.all("missing").count(), 0);
    }

    #[test]
    fn path_fans_out() {
        let root = node(
            "definitions",
            vec![
                node("process", vec![node("task", vec![]), node("task", vec![])]),
                node("process", vec![node("task", vec![])]),
            ],
        );
        assert_eq!(root.path(&["process", "task"]).len(), 3);
        assert!(root.path(&["collaboration", "participant"]).is_empty());
        assert_eq!(root.path(&[]).len(), 1);
    }

    #[test]
    fn attributes_and_text() {
        let mut lane_ref = XmlNode::new("flowNodeRef", vec![]);
        lane_ref.push_text("\n  Task_1 ");
        assert_eq!(lane_ref.text(), "Task_1");
        assert_eq!(node("task", vec![]).attr("id"), Some("task_1"));
        assert_eq!(node("task", vec![]).attr("name"), None);
    }
}
