use core::fmt;

use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::render::Painter;
use crate::world::World;

use super::{BoxShape, Segment, Shape, DEFAULT_COLOR};

/// Closed set of shapes a [`Group`] can hold.
#[derive(Debug, Clone)]
pub enum Element {
    Box(BoxShape),
    Segment(Segment),
    Group(Group),
}

impl Element {
    pub fn as_box_mut(&mut self) -> Option<&mut BoxShape> {
        match self {
            Element::Box(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut Group> {
        match self {
            Element::Group(g) => Some(g),
            _ => None,
        }
    }

    /// Moves the element by `delta`, keeping its on-screen orientation.
    fn translate(&mut self, delta: Vec2) {
        match self {
            Element::Box(b) => b.translate_by(delta),
            Element::Segment(s) => s.translate_by(delta),
            Element::Group(g) => {
                let to = g.center() + delta;
                g.set_position(to.x, to.y);
            }
        }
    }

    /// Rotation currently applied when drawing. Differs from `angle` for a
    /// leaf whose rotation was dropped by `set_position`.
    fn rendered_angle(&self) -> f32 {
        match self {
            Element::Box(b) => b.rendered_angle(),
            Element::Segment(s) => s.rendered_angle(),
            Element::Group(g) => g.angle(),
        }
    }

    /// Scales without re-applying a dropped rotation.
    fn rescale(&mut self, sx: f32, sy: f32) {
        match self {
            Element::Box(b) => b.rescale(sx, sy),
            Element::Segment(s) => s.rescale(sx, sy),
            Element::Group(g) => g.scale(sx, sy),
        }
    }
}

impl From<BoxShape> for Element {
    fn from(b: BoxShape) -> Self {
        Element::Box(b)
    }
}

impl From<Segment> for Element {
    fn from(s: Segment) -> Self {
        Element::Segment(s)
    }
}

impl From<Group> for Element {
    fn from(g: Group) -> Self {
        Element::Group(g)
    }
}

impl Shape for Element {
    fn set_position(&mut self, x: f32, y: f32) {
        match self {
            Element::Box(b) => b.set_position(x, y),
            Element::Segment(s) => s.set_position(x, y),
            Element::Group(g) => g.set_position(x, y),
        }
    }

    fn rotate(&mut self, angle: f32) {
        match self {
            Element::Box(b) => b.rotate(angle),
            Element::Segment(s) => s.rotate(angle),
            Element::Group(g) => g.rotate(angle),
        }
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        match self {
            Element::Box(b) => b.scale(sx, sy),
            Element::Segment(s) => s.scale(sx, sy),
            Element::Group(g) => g.scale(sx, sy),
        }
    }

    fn set_color(&mut self, color: Color) {
        match self {
            Element::Box(b) => b.set_color(color),
            Element::Segment(s) => s.set_color(color),
            Element::Group(g) => g.set_color(color),
        }
    }

    fn color(&self) -> Color {
        match self {
            Element::Box(b) => b.color(),
            Element::Segment(s) => s.color(),
            Element::Group(g) => g.color(),
        }
    }

    fn attach_to_world(&mut self, world: &dyn World) {
        match self {
            Element::Box(b) => b.attach_to_world(world),
            Element::Segment(s) => s.attach_to_world(world),
            Element::Group(g) => g.attach_to_world(world),
        }
    }

    fn center(&self) -> Vec2 {
        match self {
            Element::Box(b) => b.center(),
            Element::Segment(s) => s.center(),
            Element::Group(g) => g.center(),
        }
    }

    fn size(&self) -> Vec2 {
        match self {
            Element::Box(b) => b.size(),
            Element::Segment(s) => s.size(),
            Element::Group(g) => g.size(),
        }
    }

    fn angle(&self) -> f32 {
        match self {
            Element::Box(b) => b.angle(),
            Element::Segment(s) => s.angle(),
            Element::Group(g) => g.angle(),
        }
    }

    fn scale_factor(&self) -> Vec2 {
        match self {
            Element::Box(b) => b.scale_factor(),
            Element::Segment(s) => s.scale_factor(),
            Element::Group(g) => g.scale_factor(),
        }
    }

    fn bounds(&self) -> Rect {
        match self {
            Element::Box(b) => b.bounds(),
            Element::Segment(s) => s.bounds(),
            Element::Group(g) => g.bounds(),
        }
    }

    fn draw(&self, painter: &Painter<'_>) {
        match self {
            Element::Box(b) => b.draw(painter),
            Element::Segment(s) => s.draw(painter),
            Element::Group(g) => g.draw(painter),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Box(b) => fmt::Display::fmt(b, f),
            Element::Segment(s) => fmt::Display::fmt(s, f),
            Element::Group(g) => fmt::Display::fmt(g, f),
        }
    }
}

/// Ordered collection of shapes transformed as one rigid body.
///
/// Aggregation rule: the group's bounds are the union of its children's
/// axis-aligned bounds (`center ± size / 2`, rotation ignored); `center` and
/// `size` are the center and size of that union. An empty group sits at the
/// origin with zero size.
///
/// Transforms act on the children:
/// - `set_position` translates every child by the same offset; orientations
///   are kept
/// - `rotate` turns every child about the group center by the difference
///   between the new and the current group angle
/// - `scale` scales child offsets from the group center and child scales by
///   the ratio between the new and the current group scale
///
/// Children are drawn in insertion order, so later children end up on top.
#[derive(Debug, Clone)]
pub struct Group {
    children: Vec<Element>,
    angle: f32,
    scale: Vec2,
    color: Color,
}

impl Default for Group {
    fn default() -> Self {
        Self {
            children: Vec::new(),
            angle: 0.0,
            scale: Vec2::splat(1.0),
            color: DEFAULT_COLOR,
        }
    }
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `child` after the existing children.
    pub fn append(&mut self, child: impl Into<Element>) {
        self.children.push(child.into());
    }

    /// Returns the `index`-th child.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn get_at(&mut self, index: usize) -> &mut Element {
        let len = self.children.len();
        match self.children.get_mut(index) {
            Some(child) => child,
            None => panic!("group child index {index} out of range (group has {len} children)"),
        }
    }

    pub fn get(&self, index: usize) -> Option<&Element> {
        self.children.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.children.iter()
    }
}

impl Shape for Group {
    fn set_position(&mut self, x: f32, y: f32) {
        let delta = Vec2::new(x, y) - self.center();
        for child in &mut self.children {
            child.translate(delta);
        }
    }

    fn rotate(&mut self, angle: f32) {
        let delta = angle - self.angle;
        let pivot = self.center();

        for child in &mut self.children {
            let from = child.center();
            let to = pivot + (from - pivot).rotated(delta);
            child.translate(to - from);
            let child_angle = child.rendered_angle();
            child.rotate(child_angle + delta);
        }

        self.angle = angle;
    }

    /// Scaling is relative to the current group scale. A zero factor
    /// collapses child offsets and child scales on that axis for good: a later
    /// non-zero factor is applied as-is to the collapsed children and cannot
    /// restore them.
    fn scale(&mut self, sx: f32, sy: f32) {
        let ratio = |new: f32, old: f32| if old == 0.0 { new } else { new / old };
        let r = Vec2::new(ratio(sx, self.scale.x), ratio(sy, self.scale.y));
        let pivot = self.center();

        for child in &mut self.children {
            let from = child.center();
            let to = pivot + (from - pivot).mul_elem(r);
            child.translate(to - from);
            let s = child.scale_factor().mul_elem(r);
            child.rescale(s.x, s.y);
        }

        self.scale = Vec2::new(sx, sy);
    }

    /// Colors every child (and records the color for `color`).
    fn set_color(&mut self, color: Color) {
        self.color = color;
        for child in &mut self.children {
            child.set_color(color);
        }
    }

    fn color(&self) -> Color {
        self.color
    }

    fn attach_to_world(&mut self, world: &dyn World) {
        for child in &mut self.children {
            child.attach_to_world(world);
        }
    }

    fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    fn size(&self) -> Vec2 {
        self.bounds().size
    }

    fn angle(&self) -> f32 {
        self.angle
    }

    fn scale_factor(&self) -> Vec2 {
        self.scale
    }

    fn bounds(&self) -> Rect {
        self.children
            .iter()
            .map(Shape::bounds)
            .reduce(Rect::union)
            .unwrap_or_default()
    }

    fn draw(&self, painter: &Painter<'_>) {
        for child in &self.children {
            child.draw(painter);
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.center(), self.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::OrthoWorld;
    use glam::{Mat4, Vec4};

    fn near(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    fn boxed(w: f32, h: f32, x: f32, y: f32) -> BoxShape {
        let mut b = BoxShape::new(w, h);
        b.set_position(x, y);
        b
    }

    /// Two small boxes plus a big one, nested like the reference scenes.
    fn scene() -> Group {
        let mut inner = Group::new();
        inner.append(boxed(20.0, 20.0, 30.0, 40.0));
        let mut b2 = boxed(50.0, 50.0, 45.0, -25.0);
        b2.rotate(10.0);
        inner.append(b2);

        let mut outer = Group::new();
        outer.append(inner);
        outer.append(boxed(100.0, 100.0, 160.0, 0.0));
        outer
    }

    fn world_of(m: Mat4, x: f32, y: f32) -> Vec2 {
        let p = m * Vec4::new(x, y, 0.0, 1.0);
        Vec2::new(p.x, p.y)
    }

    #[test]
    fn empty_group_sits_at_origin() {
        let g = Group::new();
        assert!(g.is_empty());
        assert_eq!(g.center(), Vec2::zero());
        assert_eq!(g.size(), Vec2::zero());
    }

    #[test]
    fn append_keeps_insertion_order() {
        let mut g = Group::new();
        g.append(BoxShape::new(1.0, 1.0));
        g.append(Segment::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(g.len(), 2);
        assert!(matches!(g.get(0), Some(Element::Box(_))));
        assert!(matches!(g.get(1), Some(Element::Segment(_))));
        assert!(g.get(2).is_none());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn get_at_out_of_range_panics() {
        let mut g = Group::new();
        g.append(BoxShape::new(1.0, 1.0));
        g.get_at(1);
    }

    #[test]
    fn get_at_returns_mutable_child() {
        let mut g = scene();
        g.get_at(1).set_position(200.0, 0.0);
        assert_eq!(g.get_at(1).center(), Vec2::new(200.0, 0.0));
    }

    #[test]
    fn bounds_union_children() {
        let mut g = Group::new();
        g.append(boxed(2.0, 2.0, 0.0, 0.0));
        g.append(boxed(2.0, 4.0, 10.0, 0.0));
        assert_eq!(g.bounds(), Rect::new(-1.0, -2.0, 12.0, 4.0));
        assert_eq!(g.center(), Vec2::new(5.0, 0.0));
        assert_eq!(g.size(), Vec2::new(12.0, 4.0));
    }

    #[test]
    fn position_translates_children_and_keeps_rotation() {
        let mut g = scene();
        let c = g.center();
        g.set_position(c.x + 20.0, c.y + 15.0);

        assert!(near(g.center(), c + Vec2::new(20.0, 15.0)));

        let inner = g.get_at(0).as_group_mut().expect("inner group");
        let b2 = inner.get_at(1).as_box_mut().expect("rotated box");
        assert!(near(b2.center(), Vec2::new(65.0, -10.0)));
        assert_eq!(b2.angle(), 10.0);
        // Local +X still points 10 degrees above world +X.
        let tip = world_of(b2.model_matrix(), 1.0, 0.0) - b2.center();
        assert!(near(tip, Vec2::new(1.0, 0.0).rotated(10.0)));
    }

    #[test]
    fn position_keeps_dropped_rotation_dropped() {
        let mut b = BoxShape::new(10.0, 10.0);
        b.rotate(20.0);
        b.set_position(30.0, 0.0);
        let mut g = Group::new();
        g.append(b);

        g.set_position(100.0, 0.0);

        let b = g.get_at(0).as_box_mut().expect("box");
        assert_eq!(b.center(), Vec2::new(100.0, 0.0));
        let tip = world_of(b.model_matrix(), 1.0, 0.0) - b.center();
        assert!(near(tip, Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn rotate_starts_from_rendered_rotation() {
        let mut b = BoxShape::new(10.0, 10.0);
        b.rotate(20.0);
        b.set_position(0.0, 0.0);
        let mut g = Group::new();
        g.append(b);

        g.rotate(30.0);

        let b = g.get_at(0).as_box_mut().expect("box");
        assert_eq!(b.angle(), 30.0);
        let tip = world_of(b.model_matrix(), 1.0, 0.0) - b.center();
        assert!(near(tip, Vec2::new(1.0, 0.0).rotated(30.0)));
    }

    #[test]
    fn rotate_moves_children_about_group_center() {
        let mut g = Group::new();
        g.append(boxed(2.0, 2.0, 0.0, 0.0));
        g.append(boxed(2.0, 2.0, 10.0, 0.0));
        g.rotate(90.0);

        assert_eq!(g.angle(), 90.0);
        assert!(near(g.get_at(0).center(), Vec2::new(5.0, -5.0)));
        assert!(near(g.get_at(1).center(), Vec2::new(5.0, 5.0)));
        assert_eq!(g.get_at(0).angle(), 90.0);
        assert_eq!(g.get_at(1).angle(), 90.0);
    }

    #[test]
    fn nested_rotation_is_rigid() {
        let mut g = scene();
        let pivot = g.center();

        // World position of a corner of the rotated inner box, before.
        let corner_before = {
            let inner = g.get_at(0).as_group_mut().expect("inner group");
            let b2 = inner.get_at(1).as_box_mut().expect("box");
            world_of(b2.model_matrix(), 25.0, 25.0)
        };

        g.rotate(25.0);

        let corner_after = {
            let inner = g.get_at(0).as_group_mut().expect("inner group");
            let b2 = inner.get_at(1).as_box_mut().expect("box");
            assert!((b2.angle() - 35.0).abs() < 1e-4);
            world_of(b2.model_matrix(), 25.0, 25.0)
        };

        let expected = pivot + (corner_before - pivot).rotated(25.0);
        assert!(near(corner_after, expected));
    }

    #[test]
    fn rotate_is_absolute() {
        let mut g = Group::new();
        g.append(boxed(2.0, 2.0, 0.0, 0.0));
        g.append(boxed(2.0, 2.0, 10.0, 0.0));
        g.rotate(30.0);
        g.rotate(30.0);
        assert_eq!(g.get_at(0).angle(), 30.0);
    }

    #[test]
    fn scale_spreads_children_from_center() {
        let mut g = Group::new();
        g.append(boxed(2.0, 2.0, 0.0, 0.0));
        g.append(boxed(2.0, 2.0, 10.0, 0.0));
        g.scale(2.0, 2.0);

        assert!(near(g.get_at(0).center(), Vec2::new(-5.0, 0.0)));
        assert!(near(g.get_at(1).center(), Vec2::new(15.0, 0.0)));
        assert_eq!(g.get_at(1).size(), Vec2::new(4.0, 4.0));
        assert_eq!(g.scale_factor(), Vec2::new(2.0, 2.0));
    }

    #[test]
    fn scale_does_not_restore_dropped_rotation() {
        let mut b = BoxShape::new(2.0, 2.0);
        b.rotate(45.0);
        b.set_position(0.0, 0.0);
        let mut g = Group::new();
        g.append(b);

        g.scale(2.0, 2.0);

        let b = g.get_at(0).as_box_mut().expect("box");
        assert_eq!(b.model_matrix(), Mat4::from_scale(glam::Vec3::new(2.0, 2.0, 1.0)));
    }

    #[test]
    fn zero_scale_collapses_children_for_good() {
        let mut g = Group::new();
        g.append(boxed(2.0, 2.0, 0.0, 0.0));
        g.append(boxed(2.0, 2.0, 10.0, 0.0));

        g.scale(0.0, 0.0);
        g.scale(1.0, 1.0);

        assert!(near(g.get_at(0).center(), Vec2::new(5.0, 0.0)));
        assert!(near(g.get_at(1).center(), Vec2::new(5.0, 0.0)));
        assert_eq!(g.get_at(1).size(), Vec2::zero());
        assert_eq!(g.scale_factor(), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn color_and_world_reach_every_descendant() {
        let mut g = scene();
        let world = OrthoWorld::new(320.0, 480.0);
        g.set_color(Color::YELLOW);
        g.attach_to_world(&world);

        let inner = g.get_at(0).as_group_mut().expect("inner group");
        let b1 = inner.get_at(0).as_box_mut().expect("box");
        assert_eq!(b1.color(), Color::YELLOW);
        assert_eq!(b1.projection_matrix(), world.projection());
        assert_eq!(g.color(), Color::YELLOW);
    }
}
