//! Core domain types for lineage graphs.
//!
//! Nodes and edges live in dense arenas inside
//! [`GraphModel`](crate::graph::model::GraphModel) and are addressed by the
//! integer handles defined here. Highlight state is an explicit [`TagSet`]
//! per element.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Handles
// ---------------------------------------------------------------------------

/// Handle of a node inside a graph's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdx(pub(crate) usize);

impl NodeIdx {
    /// Position of the node in insertion order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle of an edge inside a graph's edge arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeIdx(pub(crate) usize);

impl EdgeIdx {
    /// Position of the edge in insertion order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Either kind of graph element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementRef {
    Node(NodeIdx),
    Edge(EdgeIdx),
}

// ---------------------------------------------------------------------------
// ElementSet
// ---------------------------------------------------------------------------

/// An ordered set of node and edge handles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementSet {
    pub nodes: BTreeSet<NodeIdx>,
    pub edges: BTreeSet<EdgeIdx>,
}

impl ElementSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, element: ElementRef) -> bool {
        match element {
            ElementRef::Node(n) => self.nodes.insert(n),
            ElementRef::Edge(e) => self.edges.insert(e),
        }
    }

    pub fn contains(&self, element: ElementRef) -> bool {
        match element {
            ElementRef::Node(n) => self.nodes.contains(&n),
            ElementRef::Edge(e) => self.edges.contains(&e),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len() + self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Elements present in either set.
    pub fn union(&self, other: &ElementSet) -> ElementSet {
        ElementSet {
            nodes: self.nodes.union(&other.nodes).copied().collect(),
            edges: self.edges.union(&other.edges).copied().collect(),
        }
    }

    /// Elements of `self` absent from `other`.
    pub fn difference(&self, other: &ElementSet) -> ElementSet {
        ElementSet {
            nodes: self.nodes.difference(&other.nodes).copied().collect(),
            edges: self.edges.difference(&other.edges).copied().collect(),
        }
    }

    /// Iterate nodes first, then edges, each in handle order.
    pub fn iter(&self) -> impl Iterator<Item = ElementRef> + '_ {
        self.nodes
            .iter()
            .map(|&n| ElementRef::Node(n))
            .chain(self.edges.iter().map(|&e| ElementRef::Edge(e)))
    }
}

impl FromIterator<ElementRef> for ElementSet {
    fn from_iter<I: IntoIterator<Item = ElementRef>>(iter: I) -> Self {
        let mut set = ElementSet::new();
        for element in iter {
            set.insert(element);
        }
        set
    }
}

impl Extend<ElementRef> for ElementSet {
    fn extend<I: IntoIterator<Item = ElementRef>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Which way a lineage traversal walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Follow incoming edges backward.
    Ancestors,
    /// Follow outgoing edges forward.
    Descendants,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Ancestors, Direction::Descendants];

    /// Singular form used inside generation tags.
    pub fn tag_label(&self) -> &'static str {
        match self {
            Self::Ancestors => "ancestor",
            Self::Descendants => "descendant",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ancestors => "ancestors",
            Self::Descendants => "descendants",
        }
    }

    /// Parse from a loose string (case-insensitive, singular accepted).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ancestors" | "ancestor" => Some(Self::Ancestors),
            "descendants" | "descendant" => Some(Self::Descendants),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_loose(s).ok_or_else(|| {
            format!("unknown direction '{s}' (expected: ancestors, descendants)")
        })
    }
}

// ---------------------------------------------------------------------------
// Tag
// ---------------------------------------------------------------------------

/// A single highlight marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Part of the current selection neighborhood.
    Highlighted,
    /// Reached at a (saturated) generation index in one direction.
    Generation { direction: Direction, index: u8 },
    /// The focal node itself.
    Selected,
    /// Outside the highlighted neighborhood.
    Dimmed,
}

impl Tag {
    pub fn generation(direction: Direction, index: u8) -> Self {
        Self::Generation { direction, index }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Highlighted => f.write_str("highlighted"),
            Self::Generation { direction, index } => {
                write!(f, "generation:{}:{}", direction.tag_label(), index)
            }
            Self::Selected => f.write_str("selected"),
            Self::Dimmed => f.write_str("dimmed"),
        }
    }
}

impl FromStr for Tag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "highlighted" => return Ok(Self::Highlighted),
            "selected" => return Ok(Self::Selected),
            "dimmed" => return Ok(Self::Dimmed),
            _ => {}
        }
        let mut parts = s.splitn(3, ':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("generation"), Some(dir), Some(index)) => {
                let direction = match dir {
                    "ancestor" => Direction::Ancestors,
                    "descendant" => Direction::Descendants,
                    _ => return Err(format!("unknown generation direction in tag '{s}'")),
                };
                let index = index
                    .parse::<u8>()
                    .map_err(|e| format!("bad generation index in tag '{s}': {e}"))?;
                Ok(Self::Generation { direction, index })
            }
            _ => Err(format!("unknown tag '{s}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// TagSet
// ---------------------------------------------------------------------------

/// Highlight state of one element.
///
/// Holds at most one generation index per direction: inserting a second
/// generation tag for the same direction replaces the first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagSet {
    highlighted: bool,
    selected: bool,
    dimmed: bool,
    ancestor: Option<u8>,
    descendant: Option<u8>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: Tag) {
        match tag {
            Tag::Highlighted => self.highlighted = true,
            Tag::Selected => self.selected = true,
            Tag::Dimmed => self.dimmed = true,
            Tag::Generation { direction, index } => *self.slot_mut(direction) = Some(index),
        }
    }

    /// Remove `tag`; returns whether it was present.
    pub fn remove(&mut self, tag: Tag) -> bool {
        let was = self.contains(tag);
        match tag {
            Tag::Highlighted => self.highlighted = false,
            Tag::Selected => self.selected = false,
            Tag::Dimmed => self.dimmed = false,
            Tag::Generation { direction, .. } => {
                if was {
                    *self.slot_mut(direction) = None;
                }
            }
        }
        was
    }

    pub fn contains(&self, tag: Tag) -> bool {
        match tag {
            Tag::Highlighted => self.highlighted,
            Tag::Selected => self.selected,
            Tag::Dimmed => self.dimmed,
            Tag::Generation { direction, index } => self.generation(direction) == Some(index),
        }
    }

    /// Generation index carried for `direction`, if any.
    pub fn generation(&self, direction: Direction) -> Option<u8> {
        match direction {
            Direction::Ancestors => self.ancestor,
            Direction::Descendants => self.descendant,
        }
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_dimmed(&self) -> bool {
        self.dimmed
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Tags in a stable order: highlighted, generations, selected, dimmed.
    pub fn iter(&self) -> impl Iterator<Item = Tag> {
        let generations = Direction::ALL
            .into_iter()
            .filter_map(|d| self.generation(d).map(|index| Tag::generation(d, index)));
        self.highlighted
            .then_some(Tag::Highlighted)
            .into_iter()
            .chain(generations.collect::<Vec<_>>())
            .chain(self.selected.then_some(Tag::Selected))
            .chain(self.dimmed.then_some(Tag::Dimmed))
    }

    /// Tags rendered as renderer class names.
    pub fn classes(&self) -> Vec<String> {
        self.iter().map(|t| t.to_string()).collect()
    }

    fn slot_mut(&mut self, direction: Direction) -> &mut Option<u8> {
        match direction {
            Direction::Ancestors => &mut self.ancestor,
            Direction::Descendants => &mut self.descendant,
        }
    }
}

// ---------------------------------------------------------------------------
// Node / Edge
// ---------------------------------------------------------------------------

/// Raw layout coordinates, as supplied by the graph description.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

/// A graph node and its mutable highlight state.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub name: String,
    /// Synthetic placeholder (e.g. a layout bend point); never a navigation source.
    pub dummy: bool,
    pub href: Option<String>,
    pub position: Position,
    pub tags: TagSet,
    /// Position lock applied by highlighting; released by reset.
    pub locked: bool,
}

/// A directed edge between two nodes of the same graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: NodeIdx,
    pub target: NodeIdx,
    pub tags: TagSet,
}

impl Edge {
    /// Whether source and target are the same node.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// The endpoint a traversal in `direction` arrives at.
    pub fn far_end(&self, direction: Direction) -> NodeIdx {
        match direction {
            Direction::Ancestors => self.source,
            Direction::Descendants => self.target,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_display() {
        assert_eq!(Tag::Highlighted.to_string(), "highlighted");
        assert_eq!(
            Tag::generation(Direction::Ancestors, 3).to_string(),
            "generation:ancestor:3"
        );
        assert_eq!(
            Tag::generation(Direction::Descendants, 9).to_string(),
            "generation:descendant:9"
        );
        assert_eq!(Tag::Selected.to_string(), "selected");
        assert_eq!(Tag::Dimmed.to_string(), "dimmed");
    }

    #[test]
    fn tag_parse_roundtrip() {
        for tag in [
            Tag::Highlighted,
            Tag::Selected,
            Tag::Dimmed,
            Tag::generation(Direction::Ancestors, 0),
            Tag::generation(Direction::Descendants, 9),
        ] {
            assert_eq!(tag.to_string().parse::<Tag>(), Ok(tag));
        }
    }

    #[test]
    fn tag_parse_rejects_garbage() {
        assert!("glowing".parse::<Tag>().is_err());
        assert!("generation:sideways:1".parse::<Tag>().is_err());
        assert!("generation:ancestor:x".parse::<Tag>().is_err());
        assert!("generation:ancestor".parse::<Tag>().is_err());
    }

    #[test]
    fn direction_loose_parsing() {
        assert_eq!(Direction::from_str_loose("Ancestors"), Some(Direction::Ancestors));
        assert_eq!(Direction::from_str_loose(" descendant "), Some(Direction::Descendants));
        assert_eq!(Direction::from_str_loose("sideways"), None);
        assert_eq!(Direction::from_str_loose("up"), None);
        assert_eq!(Direction::from_str_loose("out"), None);
        assert!("both".parse::<Direction>().is_err());
    }

    #[test]
    fn tagset_keeps_one_generation_per_direction() {
        let mut tags = TagSet::new();
        tags.insert(Tag::generation(Direction::Descendants, 1));
        tags.insert(Tag::generation(Direction::Descendants, 4));
        tags.insert(Tag::generation(Direction::Ancestors, 2));

        assert_eq!(tags.generation(Direction::Descendants), Some(4));
        assert_eq!(tags.generation(Direction::Ancestors), Some(2));
        assert!(!tags.contains(Tag::generation(Direction::Descendants, 1)));
    }

    #[test]
    fn tagset_remove_generation_requires_matching_index() {
        let mut tags = TagSet::new();
        tags.insert(Tag::generation(Direction::Ancestors, 2));
        assert!(!tags.remove(Tag::generation(Direction::Ancestors, 5)));
        assert_eq!(tags.generation(Direction::Ancestors), Some(2));
        assert!(tags.remove(Tag::generation(Direction::Ancestors, 2)));
        assert!(tags.is_empty());
    }

    #[test]
    fn tagset_classes_are_ordered() {
        let mut tags = TagSet::new();
        tags.insert(Tag::Dimmed);
        tags.insert(Tag::Selected);
        tags.insert(Tag::generation(Direction::Descendants, 0));
        tags.insert(Tag::generation(Direction::Ancestors, 1));
        tags.insert(Tag::Highlighted);
        assert_eq!(
            tags.classes(),
            vec![
                "highlighted",
                "generation:ancestor:1",
                "generation:descendant:0",
                "selected",
                "dimmed"
            ]
        );
    }

    #[test]
    fn tagset_clear() {
        let mut tags = TagSet::new();
        tags.insert(Tag::Highlighted);
        tags.insert(Tag::Selected);
        assert!(!tags.is_empty());
        tags.clear();
        assert!(tags.is_empty());
        assert_eq!(tags.iter().count(), 0);
    }

    #[test]
    fn element_set_operations() {
        let a: ElementSet = [
            ElementRef::Node(NodeIdx(0)),
            ElementRef::Node(NodeIdx(1)),
            ElementRef::Edge(EdgeIdx(0)),
        ]
        .into_iter()
        .collect();
        let b: ElementSet = [ElementRef::Node(NodeIdx(1)), ElementRef::Edge(EdgeIdx(1))]
            .into_iter()
            .collect();

        let u = a.union(&b);
        assert_eq!(u.len(), 4);
        let d = a.difference(&b);
        assert_eq!(d.len(), 2);
        assert!(d.contains(ElementRef::Node(NodeIdx(0))));
        assert!(!d.contains(ElementRef::Node(NodeIdx(1))));
        assert!(ElementSet::new().is_empty());
    }

    #[test]
    fn edge_far_end_follows_direction() {
        let e = Edge {
            source: NodeIdx(0),
            target: NodeIdx(1),
            tags: TagSet::new(),
        };
        assert_eq!(e.far_end(Direction::Descendants), NodeIdx(1));
        assert_eq!(e.far_end(Direction::Ancestors), NodeIdx(0));
        assert!(!e.is_self_loop());
    }
}
