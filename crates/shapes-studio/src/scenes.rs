//! Demo scenes, one per shape feature.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::bail;
use shapes_engine::render::Texture;
use shapes_engine::{BoxShape, Color, Element, Group, OrthoWorld, Segment, Shape, Vec2};

/// UVs covering the whole texture, in triangle-strip vertex order.
pub const FULL_UV: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];

/// UVs covering the lower-left quarter of the texture.
pub const QUARTER_UV: [[f32; 2]; 4] = [[0.0, 0.0], [0.5, 0.0], [0.0, 0.5], [0.5, 0.5]];

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Scene {
    Box,
    BoxRotated,
    BoxTranslated,
    BoxYellow,
    BoxScaled,
    Segment,
    BoxTextured,
    BoxTexturedRotated,
    BoxPartialTexture,
    Group,
    GroupTranslated,
    GroupRotated,
}

impl Scene {
    pub const ALL: [Scene; 12] = [
        Scene::Box,
        Scene::BoxRotated,
        Scene::BoxTranslated,
        Scene::BoxYellow,
        Scene::BoxScaled,
        Scene::Segment,
        Scene::BoxTextured,
        Scene::BoxTexturedRotated,
        Scene::BoxPartialTexture,
        Scene::Group,
        Scene::GroupTranslated,
        Scene::GroupRotated,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scene::Box => "box",
            Scene::BoxRotated => "box-rotated",
            Scene::BoxTranslated => "box-translated",
            Scene::BoxYellow => "box-yellow",
            Scene::BoxScaled => "box-scaled",
            Scene::Segment => "segment",
            Scene::BoxTextured => "box-textured",
            Scene::BoxTexturedRotated => "box-textured-rotated",
            Scene::BoxPartialTexture => "box-partial-texture",
            Scene::Group => "group",
            Scene::GroupTranslated => "group-translated",
            Scene::GroupRotated => "group-rotated",
        }
    }

    pub fn needs_texture(self) -> bool {
        matches!(
            self,
            Scene::BoxTextured | Scene::BoxTexturedRotated | Scene::BoxPartialTexture
        )
    }

    /// Builds the scene's shapes, attached to `world`.
    ///
    /// `texture` is only read by texture scenes; they fall back to an
    /// untextured box when it is `None`.
    pub fn build(self, world: &OrthoWorld, texture: Option<&Arc<Texture>>) -> Vec<Element> {
        let c = world.center();

        let mut shapes: Vec<Element> = match self {
            Scene::Box => vec![centered_box(c).into()],
            Scene::BoxRotated => {
                let mut b = centered_box(c);
                b.rotate(20.0);
                vec![b.into()]
            }
            Scene::BoxTranslated => {
                let mut b = BoxShape::new(100.0, 100.0);
                b.set_position(111.0, 0.0);
                vec![b.into()]
            }
            Scene::BoxYellow => {
                let mut b = centered_box(c);
                b.set_color(Color::YELLOW);
                vec![b.into()]
            }
            Scene::BoxScaled => {
                let mut b = centered_box(c);
                b.scale(1.5, 1.5);
                vec![b.into()]
            }
            Scene::Segment => vec![Segment::with_color(81.5, -40.0, 238.5, 44.0, Color::RED).into()],
            Scene::BoxTextured => vec![textured_box(c, texture, FULL_UV).into()],
            Scene::BoxTexturedRotated => {
                let mut b = textured_box(c, texture, FULL_UV);
                b.rotate(20.0);
                vec![b.into()]
            }
            Scene::BoxPartialTexture => {
                let mut b = textured_box(c, texture, QUARTER_UV);
                b.rotate(20.0);
                vec![b.into()]
            }
            Scene::Group => {
                let mut group = Group::new();
                group.append(small_boxes(20.0));
                group.append(BoxShape::new(100.0, 100.0));
                group.get_at(1).set_position(c.x, c.y);
                vec![group.into()]
            }
            Scene::GroupTranslated => {
                let mut group = nested_group(c);
                let gc = group.center();
                group.set_position(gc.x + 20.0, gc.y + 15.0);
                vec![group.into()]
            }
            Scene::GroupRotated => {
                let mut group = nested_group(c);
                group.rotate(25.0);
                vec![group.into()]
            }
        };

        for shape in &mut shapes {
            shape.attach_to_world(world);
        }
        shapes
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scene {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Scene::ALL.into_iter().find(|scene| scene.name() == s) {
            Some(scene) => Ok(scene),
            None => bail!("unknown scene {s:?} (try --list)"),
        }
    }
}

fn centered_box(c: Vec2) -> BoxShape {
    let mut b = BoxShape::new(100.0, 100.0);
    b.set_position(c.x, c.y);
    b
}

fn textured_box(c: Vec2, texture: Option<&Arc<Texture>>, uv: [[f32; 2]; 4]) -> BoxShape {
    let mut b = centered_box(c);
    match texture {
        Some(texture) => b.set_texture(Arc::clone(texture), uv),
        None => log::warn!("no texture loaded, drawing untextured box"),
    }
    b
}

/// A 20x20 box at (30, 40) and a 50x50 box at (45, -25) turned by `angle`.
fn small_boxes(angle: f32) -> Group {
    let mut b1 = BoxShape::new(20.0, 20.0);
    b1.set_position(30.0, 40.0);
    let mut b2 = BoxShape::new(50.0, 50.0);
    b2.set_position(45.0, -25.0);
    b2.rotate(angle);

    let mut group = Group::new();
    group.append(b1);
    group.append(b2);
    group
}

/// The small boxes plus a 100x100 box centered on the surface.
fn nested_group(c: Vec2) -> Group {
    let mut group = Group::new();
    group.append(small_boxes(10.0));
    group.append(centered_box(c));
    group
}

/// 8x8 checkerboard, red and white cells, 64x64 pixels.
pub fn checker_image() -> image::RgbaImage {
    image::RgbaImage::from_fn(64, 64, |x, y| {
        if (x / 8 + y / 8) % 2 == 0 {
            image::Rgba([0xff, 0, 0, 0xff])
        } else {
            image::Rgba([0xff, 0xff, 0xff, 0xff])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for scene in Scene::ALL {
            assert_eq!(scene.name().parse::<Scene>().unwrap(), scene);
        }
        assert!("triangle".parse::<Scene>().is_err());
    }

    #[test]
    fn box_scene_is_centered() {
        let world = OrthoWorld::new(320.0, 480.0);
        let shapes = Scene::Box.build(&world, None);
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].center(), Vec2::new(160.0, 0.0));
    }

    #[test]
    fn segment_scene_spans_its_endpoints() {
        let world = OrthoWorld::new(320.0, 480.0);
        let shapes = Scene::Segment.build(&world, None);
        assert_eq!(shapes[0].center(), Vec2::new(160.0, 2.0));
        assert_eq!(shapes[0].size(), Vec2::new(157.0, 84.0));
        assert_eq!(shapes[0].color(), Color::RED);
    }

    #[test]
    fn group_scene_nests_the_small_boxes() {
        let world = OrthoWorld::new(320.0, 480.0);
        let mut shapes = Scene::Group.build(&world, None);
        let group = shapes[0].as_group_mut().unwrap();
        assert_eq!(group.len(), 2);
        assert_eq!(group.get_at(1).center(), Vec2::new(160.0, 0.0));
        let inner = group.get_at(0).as_group_mut().unwrap();
        assert_eq!(inner.get_at(1).angle(), 20.0);
    }

    #[test]
    fn group_translated_scene_moves_by_offset() {
        let world = OrthoWorld::new(320.0, 480.0);
        let plain = nested_group(world.center()).center();
        let moved = Scene::GroupTranslated.build(&world, None)[0].center();
        assert!((moved.x - plain.x - 20.0).abs() < 1e-3);
        assert!((moved.y - plain.y - 15.0).abs() < 1e-3);
    }

    #[test]
    fn group_rotated_scene_turns_every_box() {
        let world = OrthoWorld::new(320.0, 480.0);
        let mut shapes = Scene::GroupRotated.build(&world, None);
        let group = shapes[0].as_group_mut().unwrap();
        assert_eq!(group.angle(), 25.0);
        assert_eq!(group.get_at(1).angle(), 25.0);
        let inner = group.get_at(0).as_group_mut().unwrap();
        assert!((inner.get_at(1).angle() - 35.0).abs() < 1e-4);
    }

    #[test]
    fn checker_alternates() {
        let img = checker_image();
        assert_eq!(img.get_pixel(0, 0).0, [0xff, 0, 0, 0xff]);
        assert_eq!(img.get_pixel(8, 0).0, [0xff, 0xff, 0xff, 0xff]);
    }
}
