use super::Vec2;

/// Axis-aligned rectangle in world units.
///
/// `origin` is the minimum corner (lowest x and y); with the +Y up convention of
/// shape space that is the bottom-left corner.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Rectangle of `size` centered on `center`.
    #[inline]
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self {
            origin: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x, self.origin.y + self.size.y)
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size / 2.0
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let (a, b) = (self.min(), self.max());
        let min = Vec2::new(a.x.min(b.x), a.y.min(b.y));
        let max = Vec2::new(a.x.max(b.x), a.y.max(b.y));
        Self::from_origin_size(min, max - min)
    }

    /// Bounding rectangle of `self` and `other`.
    ///
    /// Degenerate (zero-area) rectangles still contribute their corners, so the
    /// union of a horizontal segment's bounds with anything keeps the segment.
    #[inline]
    pub fn union(self, other: Rect) -> Rect {
        let a = self.normalized();
        let b = other.normalized();
        let min = Vec2::new(a.origin.x.min(b.origin.x), a.origin.y.min(b.origin.y));
        let amax = a.max();
        let bmax = b.max();
        let max = Vec2::new(amax.x.max(bmax.x), amax.y.max(bmax.y));
        Rect::from_origin_size(min, max - min)
    }
}
