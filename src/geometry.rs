use egui::{Pos2, Vec2};

/// Below this length a segment has no usable direction for end-cap math.
pub const MIN_DIRECTION_LENGTH: f32 = 1.0;

/// Euclidean distance between two surface points.
pub fn distance(a: Pos2, b: Pos2) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

pub fn midpoint(a: Pos2, b: Pos2) -> Pos2 {
    Pos2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Unit vector rotated 90° from `b - a`.
///
/// Returns `None` when the points are closer than one pixel; callers skip
/// whatever they wanted to draw along that direction.
pub fn perpendicular_unit(a: Pos2, b: Pos2) -> Option<Vec2> {
    let len = distance(a, b);
    if len < MIN_DIRECTION_LENGTH {
        return None;
    }
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    Some(Vec2::new(-dy / len, dx / len))
}

/// The T-shaped end marker at `at`, perpendicular to the direction towards `remote`.
///
/// Returns the two endpoints of the cap stroke, or `None` for degenerate segments.
pub fn t_cap(at: Pos2, remote: Pos2, half_length: f32) -> Option<[Pos2; 2]> {
    let n = perpendicular_unit(at, remote)?;
    Some([at + n * half_length, at - n * half_length])
}
