use super::node::XmlNode;
use crate::error::{Error, Result};

//
// stack: [
//            definitions,          <- root, still open
//            process,              <- open child of definitions
//            laneSet,              <- innermost open element, receives text
//        ]
//
// Closing an element pops it and appends it to the new top of the stack.
// Closing the last one makes it the root.
//

#[derive(Default)]
pub(super) struct TreeBuilder {
    root: Option<XmlNode>,
    stack: Vec<XmlNode>,
}

impl TreeBuilder {
    pub(super) fn start(&mut self, node: XmlNode) -> Result<()> {
        if self.stack.is_empty()
            && let Some(root) = &self.root
        {
            return Err(Error::MultipleRoots(format!("{} after {}", node.name(), root.name())));
        }
        self.stack.push(node);
        Ok(())
    }

    pub(super) fn empty(&mut self, node: XmlNode) -> Result<()> {
        self.start(node)?;
        self.end()
    }

    // Text outside the root element is whitespace or junk the reader already let through.
    pub(super) fn text(&mut self, value: &str) {
        if let Some(node) = self.stack.last_mut() {
            node.push_text(value);
        }
    }

    pub(super) fn end(&mut self) -> Result<()> {
        let Some(node) = self.stack.pop() else {
            return Err(Error::UnexpectedEnd("no open element".into()));
        };

        match self.stack.last_mut() {
            Some(parent) => parent.push_child(node),
            None => self.root = Some(node),
        }
        Ok(())
    }

    pub(super) fn finish(mut self) -> Result<XmlNode> {
        if let Some(open) = self.stack.pop() {
            return Err(Error::UnclosedElement(open.name().into()));
        }
        self.root.ok_or(Error::EmptyDocument)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str) -> XmlNode {
        XmlNode::new(name, Vec::new())
    }

    #[test]
    fn nests_children() -> Result<(), Box<dyn std::error::Error>> {
        let mut builder = TreeBuilder::default();
        builder.start(node("definitions"))?;
        builder.start(node("laneSet"))?;
        builder.start(node("flowNodeRef"))?;
        builder.text("Task_1");
        builder.end()?;
        builder.empty(node("lane"))?;
        builder.end()?;
        builder.end()?;

        let root = builder.finish()?;
        assert_eq!(root.name(), "definitions");
        assert_eq!(root.path(&["laneSet", "flowNodeRef"])[0].text(), "Task_1");
        assert_eq!(root.path(&["laneSet", "lane"]).len(), 1);
        Ok(())
    }

    #[test]
    fn rejects_broken_structure() -> Result<(), Box<dyn std::error::Error>> {
        assert!(matches!(TreeBuilder::default().finish(), Err(Error::EmptyDocument)));

        let mut unclosed = TreeBuilder::default();
        unclosed.start(node("definitions"))?;
        assert!(matches!(unclosed.finish(), Err(Error::UnclosedElement(name)) if name == "definitions"));

        let mut two_roots = TreeBuilder::default();
        two_roots.empty(node("a"))?;
        assert!(matches!(two_roots.start(node("b")), Err(Error::MultipleRoots(_))));

        assert!(matches!(TreeBuilder::default().end(), Err(Error::UnexpectedEnd(_))));
        Ok(())
    }
}
