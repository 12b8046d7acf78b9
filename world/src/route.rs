use glam::Vec2;
use path_defence_core::PathPoint;

/// Polyline enemies walk from the spawn point to the terminal point.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    waypoints: Vec<Vec2>,
    cumulative: Vec<f32>,
}

impl Route {
    /// Builds a route from ordered waypoints.
    ///
    /// Returns `None` when fewer than two waypoints are provided or a
    /// coordinate is not finite.
    #[must_use]
    pub fn new(points: &[PathPoint]) -> Option<Self> {
        if points.len() < 2 || points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return None;
        }

        let waypoints: Vec<Vec2> = points.iter().map(|p| Vec2::new(p.x, p.y)).collect();
        let mut cumulative = Vec::with_capacity(waypoints.len());
        let mut travelled = 0.0;
        cumulative.push(travelled);
        for pair in waypoints.windows(2) {
            travelled += pair[0].distance(pair[1]);
            cumulative.push(travelled);
        }

        Some(Self {
            waypoints,
            cumulative,
        })
    }

    /// Straight horizontal route of the provided length starting at the origin.
    #[must_use]
    pub fn straight(length: f32) -> Self {
        let length = if length.is_finite() {
            length.max(0.0)
        } else {
            0.0
        };
        Self {
            waypoints: vec![Vec2::ZERO, Vec2::new(length, 0.0)],
            cumulative: vec![0.0, length],
        }
    }

    /// Total walking distance in world units.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Point where units enter the route.
    #[must_use]
    pub fn spawn_point(&self) -> PathPoint {
        self.point_at(0.0)
    }

    /// Point where units leave the route and damage the defender.
    #[must_use]
    pub fn terminal_point(&self) -> PathPoint {
        self.point_at(self.length())
    }

    /// Position after walking `distance` units along the route, clamped to its ends.
    #[must_use]
    pub fn point_at(&self, distance: f32) -> PathPoint {
        let distance = distance.clamp(0.0, self.length());
        let segment = self
            .cumulative
            .partition_point(|start| *start <= distance)
            .saturating_sub(1)
            .min(self.waypoints.len().saturating_sub(2));

        let from = self.waypoints[segment];
        let to = self.waypoints[segment + 1];
        let span = self.cumulative[segment + 1] - self.cumulative[segment];
        let position = if span <= f32::EPSILON {
            to
        } else {
            from.lerp(to, (distance - self.cumulative[segment]) / span)
        };
        PathPoint::new(position.x, position.y)
    }

    /// Waypoints in walking order.
    pub fn waypoints(&self) -> impl Iterator<Item = PathPoint> + '_ {
        self.waypoints
            .iter()
            .map(|point| PathPoint::new(point.x, point.y))
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::straight(1_000.0)
    }
}
