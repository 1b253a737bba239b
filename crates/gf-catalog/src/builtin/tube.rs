//! Tube parts: plain friction passages in various shapes.

use crate::builtin::unit_size;
use crate::part::Part;
use crate::registry::PartSpec;
use crate::route::{Transitions, both_ways};
use gf_geometry::{CENTER, GridPoint, LEFT, RIGHT, UP};

fn straight_transitions(_: &Part) -> Transitions {
    let mut t = Transitions::new();
    both_ways(&mut t, LEFT, RIGHT);
    t
}

fn elbow_transitions(_: &Part) -> Transitions {
    let mut t = Transitions::new();
    both_ways(&mut t, UP, RIGHT);
    t
}

fn all_to_all(arms: &[GridPoint]) -> Transitions {
    let mut t = Transitions::new();
    for (i, &a) in arms.iter().enumerate() {
        for &b in &arms[i + 1..] {
            both_ways(&mut t, a, b);
        }
    }
    t
}

fn tee_transitions(_: &Part) -> Transitions {
    all_to_all(&[UP, LEFT, RIGHT])
}

fn cross_transitions(_: &Part) -> Transitions {
    all_to_all(&[UP, LEFT, RIGHT, gf_geometry::DOWN])
}

fn dip_transitions(_: &Part) -> Transitions {
    // Reaches from the left edge into the cell center, where container
    // parts expose their contents.
    let mut t = Transitions::new();
    both_ways(&mut t, LEFT, CENTER);
    t
}

pub fn straight() -> PartSpec {
    PartSpec {
        type_id: "StraightTube",
        size: unit_size,
        transitions: straight_transitions,
        interact: None,
    }
}

pub fn elbow() -> PartSpec {
    PartSpec {
        type_id: "ElbowTube",
        size: unit_size,
        transitions: elbow_transitions,
        interact: None,
    }
}

pub fn tee() -> PartSpec {
    PartSpec {
        type_id: "TeeTube",
        size: unit_size,
        transitions: tee_transitions,
        interact: None,
    }
}

pub fn cross() -> PartSpec {
    PartSpec {
        type_id: "CrossTube",
        size: unit_size,
        transitions: cross_transitions,
        interact: None,
    }
}

pub fn dip() -> PartSpec {
    PartSpec {
        type_id: "DipTube",
        size: unit_size,
        transitions: dip_transitions,
        interact: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_is_symmetric() {
        let t = straight_transitions(&Part::new("StraightTube", 0, 0));
        assert_eq!(t[&LEFT][0].out, RIGHT);
        assert_eq!(t[&RIGHT][0].out, LEFT);
    }

    #[test]
    fn tee_connects_every_arm_pair() {
        let t = tee_transitions(&Part::new("TeeTube", 0, 0));
        // Three arms, each with routes to the other two.
        assert_eq!(t.len(), 3);
        for routes in t.values() {
            assert_eq!(routes.len(), 2);
        }
    }

    #[test]
    fn cross_connects_every_arm_pair() {
        let t = cross_transitions(&Part::new("CrossTube", 0, 0));
        assert_eq!(t.len(), 4);
        for routes in t.values() {
            assert_eq!(routes.len(), 3);
        }
    }
}
