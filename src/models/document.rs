// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! In-memory UI tree for the registration page.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Removing a node only
//! detaches it from its parent, so ids held elsewhere never dangle; detached
//! nodes are simply skipped by every document-order query.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::attachment::FileMeta;

/// Stable handle to a node in a [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Input control flavours we distinguish when wiring events and rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputType {
    Text,
    Email,
    Tel,
    Number,
    Date,
    Password,
    Radio,
    Checkbox,
    File,
}

/// Element tag of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag {
    Form,
    Div,
    Span,
    Label,
    Icon,
    Button,
    Select,
    Input(InputType),
}

/// A single element with its classes, attributes, and control state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub tag: Tag,
    pub id: Option<String>,
    pub name: Option<String>,
    pub text: String,
    pub value: String,
    pub default_value: String,
    pub checked: bool,
    pub required: bool,
    pub readonly: bool,
    pub hidden: bool,
    /// Options of a select control.
    pub options: Vec<String>,
    /// Files attached to a file control.
    pub files: Vec<FileMeta>,
    classes: BTreeSet<String>,
    attrs: BTreeMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            id: None,
            name: None,
            text: String::new(),
            value: String::new(),
            default_value: String::new(),
            checked: false,
            required: false,
            readonly: false,
            hidden: false,
            options: Vec::new(),
            files: Vec::new(),
            classes: BTreeSet::new(),
            attrs: BTreeMap::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn input(kind: InputType) -> Self {
        Self::new(Tag::Input(kind))
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Set both the current and the reset value.
    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self.default_value = value.to_string();
        self
    }

    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attrs.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    /// Swap one class for another; no-op when `from` is absent.
    pub fn replace_class(&mut self, from: &str, to: &str) -> bool {
        if self.classes.remove(from) {
            self.classes.insert(to.to_string());
            true
        } else {
            false
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn set_attr(&mut self, key: &str, value: &str) {
        self.attrs.insert(key.to_string(), value.to_string());
    }

    pub fn remove_attr(&mut self, key: &str) {
        self.attrs.remove(key);
    }

    pub fn input_type(&self) -> Option<InputType> {
        match self.tag {
            Tag::Input(kind) => Some(kind),
            _ => None,
        }
    }

    /// Inputs, selects: anything holding a user-entered value.
    pub fn is_control(&self) -> bool {
        matches!(self.tag, Tag::Input(_) | Tag::Select)
    }

    /// Radio buttons and checkboxes are validated per group, never per field.
    pub fn is_choice(&self) -> bool {
        matches!(
            self.tag,
            Tag::Input(InputType::Radio) | Tag::Input(InputType::Checkbox)
        )
    }
}

/// Arena-backed element tree rooted at a single form node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(Tag::Form)],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Add a node to the arena without attaching it.
    pub fn create(&mut self, mut node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = None;
        node.children.clear();
        self.nodes.push(node);
        id
    }

    /// Create a node and attach it as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = self.create(node);
        self.append_child(parent, id);
        id
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Attach `node` as the sibling directly following `anchor`.
    ///
    /// Returns `false` when the anchor is not attached anywhere.
    pub fn insert_after(&mut self, anchor: NodeId, node: NodeId) -> bool {
        let Some(parent) = self.nodes[anchor.0].parent else {
            return false;
        };
        self.detach(node);
        let siblings = &mut self.nodes[parent.0].children;
        let pos = siblings
            .iter()
            .position(|c| *c == anchor)
            .map(|p| p + 1)
            .unwrap_or(siblings.len());
        siblings.insert(pos, node);
        self.nodes[node.0].parent = Some(parent);
        true
    }

    /// Remove a node (and its subtree) from the tree.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != node);
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.nodes[node.0].parent?;
        let siblings = &self.nodes[parent.0].children;
        let pos = siblings.iter().position(|c| *c == node)?;
        siblings.get(pos + 1).copied()
    }

    /// Nearest ancestor-or-self carrying `class`.
    pub fn closest(&self, node: NodeId, class: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            if self.nodes[id.0].has_class(class) {
                return Some(id);
            }
            current = self.nodes[id.0].parent;
        }
        None
    }

    /// Pre-order descendants of `node`, excluding the node itself.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[node.0].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        out
    }

    /// First descendant of `scope` (document order) matching the predicate.
    pub fn query_in(&self, scope: NodeId, pred: impl Fn(&Node) -> bool) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|id| pred(&self.nodes[id.0]))
    }

    /// All attached nodes matching the predicate, in document order.
    pub fn query_all(&self, pred: impl Fn(&Node) -> bool) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|id| pred(&self.nodes[id.0]))
            .collect()
    }

    /// First attached node matching the predicate, in document order.
    pub fn query(&self, pred: impl Fn(&Node) -> bool) -> Option<NodeId> {
        self.query_in(self.root, pred)
    }

    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        self.query(|n| n.id.as_deref() == Some(id))
    }

    pub fn by_name(&self, name: &str) -> Vec<NodeId> {
        self.query_all(|n| n.name.as_deref() == Some(name))
    }

    pub fn value(&self, node: NodeId) -> &str {
        &self.nodes[node.0].value
    }

    pub fn set_value(&mut self, node: NodeId, value: impl Into<String>) {
        self.nodes[node.0].value = value.into();
    }

    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        self.nodes[node.0].text = text.into();
    }

    /// Name/value pairs of every attached control that would be submitted.
    pub fn form_data(&self) -> Vec<(String, String)> {
        let mut data = Vec::new();
        for id in self.query_all(Node::is_control) {
            let node = &self.nodes[id.0];
            let Some(key) = node.name.clone().or_else(|| node.id.clone()) else {
                continue;
            };
            match node.input_type() {
                Some(InputType::Radio) | Some(InputType::Checkbox) => {
                    if node.checked {
                        data.push((key, node.value.clone()));
                    }
                }
                Some(InputType::File) => {
                    for file in &node.files {
                        data.push((key.clone(), file.name.clone()));
                    }
                }
                _ => data.push((key, node.value.clone())),
            }
        }
        data
    }
}
