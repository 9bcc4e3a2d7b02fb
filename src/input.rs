use glam::Vec2;

/// Pointer position relative to a client rect, normalized to \[0, 1\] with y down.
///
/// A degenerate rect maps everything to the center.
#[inline]
pub fn client_to_uv(client: Vec2, rect_origin: Vec2, rect_size: Vec2) -> [f32; 2] {
    if rect_size.x > 0.0 && rect_size.y > 0.0 {
        let local = (client - rect_origin) / rect_size;
        [local.x.clamp(0.0, 1.0), local.y.clamp(0.0, 1.0)]
    } else {
        [0.5, 0.5]
    }
}

/// Tracks a single pressed pointer for orbit dragging.
#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub active: bool,
    pub pointer_id: i32,
    pub last: Vec2,
}

impl DragState {
    pub fn press(&mut self, pointer_id: i32, pos: Vec2) {
        self.active = true;
        self.pointer_id = pointer_id;
        self.last = pos;
    }

    /// Movement since the previous report, if this pointer is dragging.
    pub fn motion(&mut self, pointer_id: i32, pos: Vec2) -> Option<Vec2> {
        if !self.active || pointer_id != self.pointer_id {
            return None;
        }
        let delta = pos - self.last;
        self.last = pos;
        Some(delta)
    }

    pub fn release(&mut self, pointer_id: i32) {
        if pointer_id == self.pointer_id {
            self.active = false;
        }
    }
}
