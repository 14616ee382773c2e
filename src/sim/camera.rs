//! Follow camera clamped to the world edges

use super::geometry::clamp;

/// Camera defines a view into world space
///
/// The view size never changes; only the center moves.
#[derive(Debug, Clone)]
pub struct Camera {
    /// World point at the center of the view
    pub center: [f32; 2],
    /// Width and height of the visible area in world units
    pub view_size: [f32; 2],
}

impl Camera {
    /// Create a camera whose view starts at the world origin
    pub fn new(view_size: [f32; 2]) -> Self {
        Self {
            center: [view_size[0] / 2.0, view_size[1] / 2.0],
            view_size,
        }
    }

    /// Centers on `target`, then clamps so the view stays inside the world
    ///
    /// The center is kept within `[view/2, world - view/2]` on each axis.
    pub fn follow(&mut self, target: [f32; 2], world_size: [f32; 2]) {
        let half_w = self.view_size[0] / 2.0;
        let half_h = self.view_size[1] / 2.0;
        self.center = [
            clamp(target[0], half_w, world_size[0] - half_w),
            clamp(target[1], half_h, world_size[1] - half_h),
        ];
    }

    /// Get the current view bounds
    pub fn view_bounds(&self) -> Bounds {
        let half_w = self.view_size[0] / 2.0;
        let half_h = self.view_size[1] / 2.0;
        Bounds::new(
            [self.center[0] - half_w, self.center[1] - half_h],
            [self.center[0] + half_w, self.center[1] + half_h],
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl Bounds {
    pub fn new(min: [f32; 2], max: [f32; 2]) -> Self {
        Self { min, max }
    }

    /// Bounds spanning `[0, size]` on both axes
    pub fn from_size(size: [f32; 2]) -> Self {
        Self::new([0.0, 0.0], size)
    }

    pub fn width(&self) -> f32 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f32 {
        self.max[1] - self.min[1]
    }

    pub fn center(&self) -> [f32; 2] {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: [f32; 2] = [800.0, 500.0];

    #[test]
    fn test_bounds_dimensions() {
        let bounds = Bounds::new([-1.0, -2.0], [3.0, 4.0]);
        assert_eq!(bounds.width(), 4.0);
        assert_eq!(bounds.height(), 6.0);
        assert_eq!(bounds.center(), [1.0, 1.0]);
    }

    #[test]
    fn test_follow_in_the_middle_tracks_target() {
        let mut camera = Camera::new([640.0, 480.0]);
        camera.follow([400.0, 250.0], WORLD);
        assert_eq!(camera.center, [400.0, 250.0]);
    }

    #[test]
    fn test_follow_clamps_at_lower_edges() {
        let mut camera = Camera::new([640.0, 480.0]);
        camera.follow([44.0, 44.0], WORLD);
        assert_eq!(camera.center, [320.0, 240.0]);
        assert_eq!(camera.view_bounds().min, [0.0, 0.0]);
    }

    #[test]
    fn test_follow_clamps_at_upper_edges() {
        let mut camera = Camera::new([640.0, 480.0]);
        camera.follow([790.0, 495.0], WORLD);
        assert_eq!(camera.center, [480.0, 260.0]);
        assert_eq!(camera.view_bounds().max, WORLD);
    }

    #[test]
    fn test_view_bounds() {
        let camera = Camera::new([640.0, 480.0]);
        let bounds = camera.view_bounds();
        assert_eq!(bounds, Bounds::from_size([640.0, 480.0]));
    }
}
