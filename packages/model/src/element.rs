use crate::id::ElementId;
use serde::{Deserialize, Serialize};

/// Number of text sections a fresh element carries.
pub const SECTION_COUNT: usize = 3;

/// Height assigned to a section the host has not measured yet.
pub const DEFAULT_SECTION_HEIGHT: f64 = 24.0;

/// Width assigned to an element until the host measures its text.
pub const DEFAULT_WIDTH: f64 = 160.0;

/// Which side of its parent an element's subtree is laid out on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    #[default]
    Right,
    Left,
}

impl Direction {
    /// Horizontal sign applied to layout offsets.
    pub fn sign(self) -> f64 {
        match self {
            Direction::Right => 1.0,
            Direction::Left => -1.0,
        }
    }
}

/// Connector decoration drawn at one end of the edge to the parent.
/// Purely cosmetic; the model only stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Marker {
    #[default]
    None,
    Arrow,
    Circle,
    Square,
}

/// A node in the diagram tree.
///
/// Elements live in a flat store keyed by id; `parent_id` is `None` only for
/// a root. `order` is the zero-based sibling rank (dense within a parent),
/// `depth` counts from 1 at the root, and `children` caches the number of
/// elements whose `parent_id` points here. Geometry is owned by the layout
/// engine; `section_heights` is written by the host when it measures text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    pub parent_id: Option<ElementId>,
    pub order: usize,
    pub depth: u32,
    pub children: usize,
    pub texts: Vec<String>,
    pub section_heights: Vec<f64>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub editing: bool,
    pub selected: bool,
    pub visible: bool,
    pub tentative: bool,
    pub start_marker: Marker,
    pub end_marker: Marker,
    pub direction: Direction,
}

impl Element {
    /// Create a root element (depth 1, no parent).
    pub fn root(id: ElementId) -> Self {
        Self {
            id,
            parent_id: None,
            order: 0,
            depth: 1,
            children: 0,
            texts: vec![String::new(); SECTION_COUNT],
            section_heights: vec![DEFAULT_SECTION_HEIGHT; SECTION_COUNT],
            x: 0.0,
            y: 0.0,
            width: DEFAULT_WIDTH,
            height: DEFAULT_SECTION_HEIGHT * SECTION_COUNT as f64,
            editing: false,
            selected: false,
            visible: true,
            tentative: false,
            start_marker: Marker::None,
            end_marker: Marker::None,
            direction: Direction::Right,
        }
    }

    /// Create a child of `parent` at sibling position `order`.
    /// The child inherits the parent's layout side.
    pub fn child_of(id: ElementId, parent: &Element, order: usize) -> Self {
        let mut element = Self::root(id);
        element.parent_id = Some(parent.id.clone());
        element.order = order;
        element.depth = parent.depth + 1;
        element.direction = parent.direction;
        element
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Total height of the stacked sections.
    pub fn section_span(&self) -> f64 {
        self.section_heights.iter().sum()
    }
}
