//! # Graph Search
//!
//! Depth-first search over the four directional links, used for shortkey
//! lookup and level jumps. The search remembers which link it arrived
//! through and never expands the link pointing straight back:
//!
//! ```text
//! arrived via   expands
//! ───────────   ──────────────────────────
//! (start)       after, right, left, before
//! after         after, right, left
//! right         after, right, before
//! left          after, left, before
//! before        right, left, before
//! ```
//!
//! Nodes are tested in preorder and the first match wins. The same node can
//! be reached again through a different link and then expands a different
//! set of neighbors, so the visited set is keyed by (node, arrival). That
//! keeps wrap-around menus (e.g. a vertical list whose last item links back
//! to the first) from looping forever without hiding anything.

use crate::core::item::{Direction, ItemId, MenuItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arrival {
    Start,
    Via(Direction),
}

impl Arrival {
    const COUNT: usize = 5;

    fn slot(self) -> usize {
        match self {
            Arrival::Start => 0,
            Arrival::Via(Direction::Before) => 1,
            Arrival::Via(Direction::After) => 2,
            Arrival::Via(Direction::Left) => 3,
            Arrival::Via(Direction::Right) => 4,
        }
    }

    fn expansion(self) -> &'static [Direction] {
        use Direction::*;
        match self {
            Arrival::Start => &[After, Right, Left, Before],
            Arrival::Via(After) => &[After, Right, Left],
            Arrival::Via(Right) => &[After, Right, Before],
            Arrival::Via(Left) => &[After, Left, Before],
            Arrival::Via(Before) => &[Right, Left, Before],
        }
    }
}

/// Whether the starting node itself is a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StartNode {
    Include,
    Skip,
}

/// Returns the first item in search order for which `matches` holds.
pub(crate) fn depth_first(
    items: &[MenuItem],
    start: ItemId,
    start_node: StartNode,
    matches: impl Fn(&MenuItem) -> bool,
) -> Option<ItemId> {
    let root = items.get(start.0)?;
    let mut expanded = vec![[false; Arrival::COUNT]; items.len()];
    let mut tested = vec![false; items.len()];
    let mut stack: Vec<(ItemId, Arrival)> = Vec::new();

    match start_node {
        StartNode::Include => stack.push((start, Arrival::Start)),
        StartNode::Skip => {
            tested[start.0] = true;
            expanded[start.0][Arrival::Start.slot()] = true;
            push_neighbors(&mut stack, root, Arrival::Start);
        }
    }

    while let Some((id, arrival)) = stack.pop() {
        let Some(item) = items.get(id.0) else {
            continue;
        };
        if expanded[id.0][arrival.slot()] {
            continue;
        }
        expanded[id.0][arrival.slot()] = true;

        if !tested[id.0] {
            tested[id.0] = true;
            if matches(item) {
                return Some(id);
            }
        }
        push_neighbors(&mut stack, item, arrival);
    }

    None
}

/// Pushes in reverse so the first direction in the expansion order pops first.
fn push_neighbors(stack: &mut Vec<(ItemId, Arrival)>, item: &MenuItem, arrival: Arrival) {
    for &direction in arrival.expansion().iter().rev() {
        if let Some(next) = item.neighbor(direction) {
            stack.push((next, Arrival::Via(direction)));
        }
    }
}
