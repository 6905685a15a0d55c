//! Connector endpoint resolution.
//!
//! A connector leaves its source at the midpoint of one edge and arrives at
//! the midpoint of an edge of its target. Each end is either pinned to a
//! named [`Side`] or left to [`SideHint::Auto`], in which case the edge facing
//! the other rectangle is chosen.
//!
//! # Auto selection
//!
//! With `dx`/`dy` the displacement from the source center to the target
//! center:
//!
//! - `|dx| >= |dy|`: left/right edges. The source leaves through its right
//!   edge when `dx > 0` and its left edge otherwise; the target uses the
//!   opposite edge.
//! - `|dx| < |dy|`: top/bottom edges, chosen the same way from `dy`.
//!
//! Equal displacements resolve horizontally so output is reproducible.
//! Swapping source and target mirrors the chosen pair of edges, except when
//! both centers coincide, where the source always leaves through its left
//! edge.

use std::{fmt, str::FromStr};

use crate::{
    error::StyleError,
    geometry::{Bounds, Point, Side},
};

/// Requested edge for one end of a connector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SideHint {
    /// Pick the edge facing the other rectangle
    #[default]
    Auto,
    /// Always use the given edge
    Fixed(Side),
}

impl From<Side> for SideHint {
    fn from(side: Side) -> Self {
        Self::Fixed(side)
    }
}

impl FromStr for SideHint {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "auto" {
            return Ok(Self::Auto);
        }
        s.parse().map(Self::Fixed)
    }
}

impl fmt::Display for SideHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Fixed(side) => side.fmt(f),
        }
    }
}

/// Resolved endpoints of a connector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchors {
    start: Point,
    end: Point,
    from_side: Side,
    to_side: Side,
}

impl Anchors {
    /// Point where the connector leaves the source
    pub fn start(&self) -> Point {
        self.start
    }

    /// Point where the connector reaches the target
    pub fn end(&self) -> Point {
        self.end
    }

    /// Source edge the start point lies on
    pub fn from_side(&self) -> Side {
        self.from_side
    }

    /// Target edge the end point lies on
    pub fn to_side(&self) -> Side {
        self.to_side
    }
}

/// Returns the pair of edges facing each other for two rectangles.
///
/// The first side belongs to `source`, the second to `target`.
pub fn facing_sides(source: Bounds, target: Bounds) -> (Side, Side) {
    let delta = target.center().sub_point(source.center());
    let (dx, dy) = (delta.x(), delta.y());

    let from = if dx.abs() >= dy.abs() {
        if dx > 0.0 { Side::Right } else { Side::Left }
    } else if dy > 0.0 {
        Side::Bottom
    } else {
        Side::Top
    };

    (from, from.opposite())
}

/// Computes the start and end points of a connector between two rectangles.
///
/// Never fails: zero-sized rectangles act as points.
///
/// # Examples
///
/// ```
/// # use drafter_core::anchor::{resolve, SideHint};
/// # use drafter_core::geometry::{Bounds, Point, Size};
/// let source = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 50.0));
/// let target = Bounds::new_from_top_left(Point::new(300.0, 0.0), Size::new(100.0, 50.0));
///
/// let anchors = resolve(source, target, SideHint::Auto, SideHint::Auto);
/// assert_eq!(anchors.start(), Point::new(100.0, 25.0));
/// assert_eq!(anchors.end(), Point::new(300.0, 25.0));
/// ```
pub fn resolve(source: Bounds, target: Bounds, from: SideHint, to: SideHint) -> Anchors {
    let (auto_from, auto_to) = facing_sides(source, target);

    let from_side = match from {
        SideHint::Auto => auto_from,
        SideHint::Fixed(side) => side,
    };
    let to_side = match to {
        SideHint::Auto => auto_to,
        SideHint::Fixed(side) => side,
    };

    Anchors {
        start: source.edge_midpoint(from_side),
        end: target.edge_midpoint(to_side),
        from_side,
        to_side,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Bounds {
        Bounds::new_from_top_left(Point::new(x, y), Size::new(w, h))
    }

    #[test]
    fn test_auto_horizontal_left_to_right() {
        let anchors = resolve(
            rect(0.0, 0.0, 100.0, 50.0),
            rect(300.0, 0.0, 100.0, 50.0),
            SideHint::Auto,
            SideHint::Auto,
        );

        assert_eq!(anchors.start(), Point::new(100.0, 25.0));
        assert_eq!(anchors.end(), Point::new(300.0, 25.0));
        assert_eq!(anchors.from_side(), Side::Right);
        assert_eq!(anchors.to_side(), Side::Left);
    }

    #[test]
    fn test_auto_horizontal_right_to_left() {
        let anchors = resolve(
            rect(300.0, 0.0, 100.0, 50.0),
            rect(0.0, 0.0, 100.0, 50.0),
            SideHint::Auto,
            SideHint::Auto,
        );

        assert_eq!(anchors.from_side(), Side::Left);
        assert_eq!(anchors.to_side(), Side::Right);
        assert_eq!(anchors.start(), Point::new(300.0, 25.0));
        assert_eq!(anchors.end(), Point::new(100.0, 25.0));
    }

    #[test]
    fn test_auto_vertical() {
        let anchors = resolve(
            rect(100.0, 100.0, 150.0, 60.0),
            rect(100.0, 240.0, 150.0, 60.0),
            SideHint::Auto,
            SideHint::Auto,
        );

        assert_eq!(anchors.from_side(), Side::Bottom);
        assert_eq!(anchors.to_side(), Side::Top);
        assert_eq!(anchors.start(), Point::new(175.0, 160.0));
        assert_eq!(anchors.end(), Point::new(175.0, 240.0));
    }

    #[test]
    fn test_auto_upwards() {
        let anchors = resolve(
            rect(0.0, 300.0, 100.0, 50.0),
            rect(0.0, 0.0, 100.0, 50.0),
            SideHint::Auto,
            SideHint::Auto,
        );

        assert_eq!(anchors.from_side(), Side::Top);
        assert_eq!(anchors.to_side(), Side::Bottom);
    }

    #[test]
    fn test_diagonal_tie_prefers_horizontal() {
        // Centers at (50, 50) and (150, 150)
        let anchors = resolve(
            rect(0.0, 0.0, 100.0, 100.0),
            rect(100.0, 100.0, 100.0, 100.0),
            SideHint::Auto,
            SideHint::Auto,
        );

        assert_eq!(anchors.from_side(), Side::Right);
        assert_eq!(anchors.to_side(), Side::Left);
    }

    #[test]
    fn test_explicit_sides() {
        let anchors = resolve(
            rect(0.0, 0.0, 100.0, 50.0),
            rect(300.0, 0.0, 100.0, 50.0),
            Side::Bottom.into(),
            Side::Top.into(),
        );

        assert_eq!(anchors.start(), Point::new(50.0, 50.0));
        assert_eq!(anchors.end(), Point::new(350.0, 0.0));
    }

    #[test]
    fn test_mixed_hints() {
        let anchors = resolve(
            rect(0.0, 0.0, 100.0, 50.0),
            rect(300.0, 0.0, 100.0, 50.0),
            Side::Top.into(),
            SideHint::Auto,
        );

        assert_eq!(anchors.from_side(), Side::Top);
        assert_eq!(anchors.to_side(), Side::Left);
        assert_eq!(anchors.start(), Point::new(50.0, 0.0));
        assert_eq!(anchors.end(), Point::new(300.0, 25.0));
    }

    #[test]
    fn test_degenerate_rectangles() {
        let anchors = resolve(
            rect(10.0, 10.0, 0.0, 0.0),
            rect(10.0, 90.0, 0.0, 0.0),
            SideHint::Auto,
            SideHint::Auto,
        );

        assert_eq!(anchors.start(), Point::new(10.0, 10.0));
        assert_eq!(anchors.end(), Point::new(10.0, 90.0));
        assert_eq!(anchors.from_side(), Side::Bottom);
    }

    #[test]
    fn test_coincident_centers() {
        let bounds = rect(0.0, 0.0, 100.0, 50.0);
        let anchors = resolve(bounds, bounds, SideHint::Auto, SideHint::Auto);

        assert_eq!(anchors.from_side(), Side::Left);
        assert_eq!(anchors.to_side(), Side::Right);
    }

    #[test]
    fn test_side_hint_from_str() {
        assert_eq!("auto".parse::<SideHint>().unwrap(), SideHint::Auto);
        assert_eq!(
            "right".parse::<SideHint>().unwrap(),
            SideHint::Fixed(Side::Right)
        );
        assert_eq!(SideHint::Fixed(Side::Top).to_string(), "top");
        assert!("diagonal".parse::<SideHint>().is_err());
    }
}
