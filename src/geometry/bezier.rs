use egui::Pos2;

/// Segments used when flattening one eyelid curve into a polyline.
pub const CURVE_SEGMENTS: usize = 24;

/// Evaluates a cubic bezier at `t` in `[0, 1]`.
pub fn cubic_point(points: &[Pos2; 4], t: f32) -> Pos2 {
    let [p0, p1, p2, p3] = *points;
    let u = 1.0 - t;
    let a = u * u * u;
    let b = 3.0 * u * u * t;
    let c = 3.0 * u * t * t;
    let d = t * t * t;
    Pos2::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

/// Samples `segments + 1` points along the curve, endpoints included.
pub fn flatten_cubic(points: &[Pos2; 4], segments: usize) -> Vec<Pos2> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| cubic_point(points, i as f32 / segments as f32))
        .collect()
}

/// Flattens a closed outline made of consecutive cubic curves.
/// The shared endpoint between curves is emitted once.
pub fn flatten_closed(curves: &[[Pos2; 4]], segments: usize) -> Vec<Pos2> {
    let mut outline = Vec::with_capacity(curves.len() * segments);
    for curve in curves {
        let mut pts = flatten_cubic(curve, segments);
        pts.pop();
        outline.extend(pts);
    }
    outline
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_endpoints_are_exact() {
        let curve = [pos2(0.0, 0.0), pos2(1.0, 5.0), pos2(4.0, 5.0), pos2(5.0, 0.0)];
        assert_eq!(cubic_point(&curve, 0.0), curve[0]);
        assert_eq!(cubic_point(&curve, 1.0), curve[3]);
    }

    #[test]
    fn test_flatten_counts() {
        let curve = [pos2(0.0, 0.0), pos2(1.0, 5.0), pos2(4.0, 5.0), pos2(5.0, 0.0)];
        assert_eq!(flatten_cubic(&curve, 8).len(), 9);
        let back = [curve[3], pos2(4.0, -5.0), pos2(1.0, -5.0), curve[0]];
        assert_eq!(flatten_closed(&[curve, back], 8).len(), 16);
    }
}
