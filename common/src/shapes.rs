use rand::Rng;
use std::fmt;

/// An integer position on the map.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance. Saturates instead of overflowing for points
    /// at opposite corners of the coordinate range.
    pub fn distance_sq(&self, other: &Point) -> u64 {
        let dx = (self.x as i64 - other.x as i64).unsigned_abs();
        let dy = (self.y as i64 - other.y as i64).unsigned_abs();
        (dx * dx).saturating_add(dy * dy)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned rectangle anchored at its low corner.
///
/// Containment is half-open: a rectangle covers `x..x + width` and
/// `y..y + height`, so two rectangles sharing an edge never claim the same
/// point.
///
/// `u32` extents cover at most `2^32 - 1` cells per axis. No rectangle spans
/// the whole `i32` range: one anchored at `i32::MIN` stops short of
/// `i32::MAX`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Boundary {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Boundary {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of half-side `radius` centered on `center`, edges included.
    /// Corners are clamped to the `i32` range, and a side that would span all
    /// `2^32` values loses its last cell.
    pub fn around(center: Point, radius: u32) -> Self {
        let min_x = (center.x as i64 - radius as i64).max(i32::MIN as i64);
        let min_y = (center.y as i64 - radius as i64).max(i32::MIN as i64);
        let max_x = (center.x as i64 + radius as i64).min(i32::MAX as i64);
        let max_y = (center.y as i64 + radius as i64).min(i32::MAX as i64);
        Self {
            x: min_x as i32,
            y: min_y as i32,
            width: (max_x - min_x + 1).min(u32::MAX as i64) as u32,
            height: (max_y - min_y + 1).min(u32::MAX as i64) as u32,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn left(&self) -> i64 {
        self.x as i64
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    pub fn top(&self) -> i64 {
        self.y as i64
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        let (x, y) = (x as i64, y as i64);
        x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }

    pub fn contains_point(&self, point: Point) -> bool {
        self.contains(point.x, point.y)
    }

    /// True unless the rectangles are disjoint on either axis.
    pub fn intersects(&self, other: &Boundary) -> bool {
        !(other.left() >= self.right()
            || other.right() <= self.left()
            || other.top() >= self.bottom()
            || other.bottom() <= self.top())
    }

    /// Squared distance from `point` to the closest cell covered by this
    /// rectangle. Zero when the point is inside.
    pub fn distance_sq_to_point(&self, point: Point) -> u64 {
        let (px, py) = (point.x as i64, point.y as i64);
        let dx = if px < self.left() {
            self.left() - px
        } else if px >= self.right() {
            px - (self.right() - 1)
        } else {
            0
        };
        let dy = if py < self.top() {
            self.top() - py
        } else if py >= self.bottom() {
            py - (self.bottom() - 1)
        } else {
            0
        };
        let (dx, dy) = (dx.unsigned_abs(), dy.unsigned_abs());
        dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy))
    }

    /// Uniformly random point inside the rectangle, or `None` when it covers
    /// no cells.
    pub fn random_point_inside<R: Rng>(&self, rng: &mut R) -> Option<Point> {
        if self.is_empty() {
            return None;
        }
        let x = rng.gen_range(self.left()..self.right());
        let y = rng.gen_range(self.top()..self.bottom());
        Some(Point::new(x as i32, y as i32))
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[x: {}, y: {}, width: {}, height: {}]",
            self.x, self.y, self.width, self.height
        )
    }
}
