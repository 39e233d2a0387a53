use egui::Pos2;

/// Point handles are hit within this multiple of their drawn radius.
pub const POINT_HIT_FACTOR: f32 = 2.0;
/// Rings are hit within a band of this multiple of the handle radius.
pub const RING_HIT_FACTOR: f32 = 1.5;

/// True when `pos` is close enough to grab a point handle drawn at `handle`.
pub fn hits_point(pos: Pos2, handle: Pos2, handle_radius: f32, factor: f32) -> bool {
    pos.distance(handle) < handle_radius * factor
}

/// True when `pos` lies on the tolerance band around a ring of `ring_radius`.
pub fn hits_ring(pos: Pos2, center: Pos2, ring_radius: f32, handle_radius: f32, factor: f32) -> bool {
    (pos.distance(center) - ring_radius).abs() < handle_radius * factor
}
