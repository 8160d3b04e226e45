use super::node::XmlNodeData;
use super::xname::{XAttribute, XName};
use indextree::{Arena, NodeId};

/// Owned XML tree. Nodes live in an arena and are addressed by `NodeId`, so
/// edits are "find node by predicate, replace its payload" rather than
/// namespace-aware queries against borrowed markup.
#[derive(Clone, Debug)]
pub struct XmlDocument {
    arena: Arena<XmlNodeData>,
    root: Option<NodeId>,
}

impl XmlDocument {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&XmlNodeData> {
        self.arena.get(id).map(|node| node.get())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut XmlNodeData> {
        self.arena.get_mut(id).map(|node| node.get_mut())
    }

    pub fn add_root(&mut self, data: XmlNodeData) -> NodeId {
        let id = self.arena.new_node(data);
        self.root = Some(id);
        id
    }

    pub fn add_child(&mut self, parent: NodeId, data: XmlNodeData) -> NodeId {
        let child = self.arena.new_node(data);
        parent.append(child, &mut self.arena);
        child
    }

    pub fn add_before(&mut self, sibling: NodeId, data: XmlNodeData) -> NodeId {
        let new_node = self.arena.new_node(data);
        sibling.insert_before(new_node, &mut self.arena);
        new_node
    }

    pub fn add_after(&mut self, sibling: NodeId, data: XmlNodeData) -> NodeId {
        let new_node = self.arena.new_node(data);
        sibling.insert_after(new_node, &mut self.arena);
        new_node
    }

    /// Removes `node` together with everything below it.
    pub fn remove(&mut self, node: NodeId) {
        node.remove_subtree(&mut self.arena);
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &XName, value: &str) {
        if let Some(attrs) = self.get_mut(node).and_then(|data| data.attributes_mut()) {
            if let Some(attr) = attrs.iter_mut().find(|a| &a.name == name) {
                attr.value = value.to_string();
            } else {
                attrs.push(XAttribute::new(name.clone(), value));
            }
        }
    }

    pub fn children(&self, parent: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        parent.children(&self.arena)
    }

    /// `node` itself followed by all nodes below it, in document order.
    pub fn descendants(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        node.descendants(&self.arena)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena.get(node)?.parent()
    }

    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        node.ancestors(&self.arena)
    }

    pub fn is_named(&self, node: NodeId, name: &XName) -> bool {
        self.get(node)
            .and_then(|data| data.name())
            .map(|n| n == name)
            .unwrap_or(false)
    }

    /// Child elements of `parent` called `name`.
    pub fn elements_by_name(&self, parent: NodeId, name: XName) -> impl Iterator<Item = NodeId> + '_ {
        self.children(parent)
            .filter(move |&child| self.is_named(child, &name))
    }

    pub fn first_child_by_name(&self, parent: NodeId, name: XName) -> Option<NodeId> {
        self.elements_by_name(parent, name).next()
    }

    /// Elements called `name` anywhere below `node` (including `node`).
    pub fn descendants_by_name(&self, node: NodeId, name: XName) -> impl Iterator<Item = NodeId> + '_ {
        self.descendants(node)
            .filter(move |&desc| self.is_named(desc, &name))
    }

    pub fn attribute(&self, node: NodeId, name: &XName) -> Option<&str> {
        self.get(node)?
            .attributes()?
            .iter()
            .find(|attr| attr.name == *name)
            .map(|attr| attr.value.as_str())
    }

    /// Payload of a text or CDATA node.
    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.get(node)?.text_content()
    }

    /// Concatenation of every text node below `node`.
    pub fn inner_text(&self, node: NodeId) -> String {
        self.descendants(node)
            .filter_map(|desc| self.text(desc))
            .collect()
    }
}

impl Default for XmlDocument {
    fn default() -> Self {
        Self::new()
    }
}
