use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
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

    /// A `size`-sized rect whose center sits at `center`.
    #[inline]
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self::from_origin_size(center - size * 0.5, size)
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
        self.origin + self.size * 0.5
    }

    /// Same size, moved so its center is `center`.
    #[inline]
    pub fn with_center(self, center: Vec2) -> Self {
        Self::from_center_size(center, self.size)
    }

    #[inline]
    pub fn translated(self, delta: Vec2) -> Self {
        Self::from_origin_size(self.origin + delta, self.size)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let mut x = self.origin.x;
        let mut y = self.origin.y;
        let mut w = self.size.x;
        let mut h = self.size.y;

        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }

        Rect::new(x, y, w, h)
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let r = self.normalized();
        p.x >= r.origin.x
            && p.y >= r.origin.y
            && p.x < (r.origin.x + r.size.x)
            && p.y < (r.origin.y + r.size.y)
    }

    /// True when `other` lies entirely inside `self` (shared edges count).
    #[inline]
    pub fn contains_rect(self, other: Rect) -> bool {
        let a = self.normalized();
        let b = other.normalized();
        b.origin.x >= a.origin.x
            && b.origin.y >= a.origin.y
            && b.max().x <= a.max().x
            && b.max().y <= a.max().y
    }

    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let a = self.normalized();
        let b = other.normalized();

        let x0 = a.origin.x.max(b.origin.x);
        let y0 = a.origin.y.max(b.origin.y);
        let x1 = (a.origin.x + a.size.x).min(b.origin.x + b.size.x);
        let y1 = (a.origin.y + a.size.y).min(b.origin.y + b.size.y);

        let w = x1 - x0;
        let h = y1 - y0;

        if w <= 0.0 || h <= 0.0 {
            None
        } else {
            Some(Rect::new(x0, y0, w, h))
        }
    }

    /// Moves the rect the shortest distance that puts it inside `bounds`.
    ///
    /// On an axis where the rect is larger than `bounds` it is centered instead.
    pub fn clamped_within(self, bounds: Rect) -> Rect {
        let r = self.normalized();
        let b = bounds.normalized();

        let clamp_axis = |pos: f32, len: f32, lo: f32, span: f32| -> f32 {
            if len >= span {
                lo + (span - len) * 0.5
            } else {
                pos.clamp(lo, lo + span - len)
            }
        };

        Rect::new(
            clamp_axis(r.origin.x, r.size.x, b.origin.x, b.size.x),
            clamp_axis(r.origin.y, r.size.y, b.origin.y, b.size.y),
            r.size.x,
            r.size.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_positive_is_identity() {
        let rect = r(1.0, 2.0, 10.0, 20.0);
        assert_eq!(rect.normalized(), rect);
    }

    #[test]
    fn normalized_negative_extent_flips_origin() {
        let n = r(10.0, 10.0, -4.0, -3.0).normalized();
        assert_eq!(n, r(6.0, 7.0, 4.0, 3.0));
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_top_left_inclusive_bottom_right_exclusive() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Vec2::new(0.0, 0.0)));
        assert!(!rect.contains(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn contains_rect_accepts_shared_edges() {
        let outer = r(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains_rect(r(0.0, 0.0, 100.0, 100.0)));
        assert!(outer.contains_rect(r(10.0, 10.0, 5.0, 5.0)));
        assert!(!outer.contains_rect(r(95.0, 10.0, 10.0, 5.0)));
    }

    // ── intersect ─────────────────────────────────────────────────────────

    #[test]
    fn intersect_overlapping() {
        let a = r(0.0, 0.0, 10.0, 10.0);
        let b = r(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersect(b), Some(r(5.0, 5.0, 5.0, 5.0)));
    }

    #[test]
    fn intersect_touching_edge_returns_none() {
        let a = r(0.0, 0.0, 10.0, 10.0);
        let b = r(10.0, 0.0, 10.0, 10.0);
        assert!(a.intersect(b).is_none());
    }

    // ── centering ─────────────────────────────────────────────────────────

    #[test]
    fn with_center_keeps_size() {
        let moved = r(0.0, 0.0, 20.0, 10.0).with_center(Vec2::new(150.0, 100.0));
        assert_eq!(moved, r(140.0, 95.0, 20.0, 10.0));
        assert_eq!(moved.center(), Vec2::new(150.0, 100.0));
    }

    // ── clamped_within ────────────────────────────────────────────────────

    #[test]
    fn clamped_within_pulls_rect_back_inside() {
        let bounds = r(0.0, 0.0, 300.0, 200.0);
        assert_eq!(r(-5.0, 190.0, 20.0, 20.0).clamped_within(bounds), r(0.0, 180.0, 20.0, 20.0));
    }

    #[test]
    fn clamped_within_leaves_inner_rect_alone() {
        let bounds = r(0.0, 0.0, 300.0, 200.0);
        let inner = r(40.0, 40.0, 20.0, 20.0);
        assert_eq!(inner.clamped_within(bounds), inner);
    }

    #[test]
    fn clamped_within_centers_oversized_axis() {
        let bounds = r(0.0, 0.0, 100.0, 100.0);
        let wide = r(70.0, 10.0, 140.0, 20.0).clamped_within(bounds);
        assert_eq!(wide.origin.x, -20.0);
        assert_eq!(wide.origin.y, 10.0);
    }
}
