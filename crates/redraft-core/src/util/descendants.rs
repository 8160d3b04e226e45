use crate::xml::arena::XmlDocument;
use crate::xml::node::XmlNodeData;
use indextree::NodeId;

/// Pre-order walk below `node` that neither yields nor enters any node the
/// predicate prunes. Used to collect runs without descending into deleted
/// revisions or nested text boxes.
pub fn descendants_trimmed<'a, F>(
    doc: &'a XmlDocument,
    node: NodeId,
    prune: F,
) -> impl Iterator<Item = NodeId> + 'a
where
    F: Fn(&XmlNodeData) -> bool + 'a,
{
    TrimmedWalk {
        doc,
        stack: vec![node],
        prune,
    }
}

struct TrimmedWalk<'a, F> {
    doc: &'a XmlDocument,
    stack: Vec<NodeId>,
    prune: F,
}

impl<F> Iterator for TrimmedWalk<'_, F>
where
    F: Fn(&XmlNodeData) -> bool,
{
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while let Some(current) = self.stack.pop() {
            let Some(data) = self.doc.get(current) else {
                continue;
            };
            if (self.prune)(data) {
                continue;
            }

            let mark = self.stack.len();
            self.stack.extend(self.doc.children(current));
            self.stack[mark..].reverse();

            return Some(current);
        }
        None
    }
}
