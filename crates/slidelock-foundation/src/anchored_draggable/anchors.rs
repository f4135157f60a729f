/// Named resting position of the thumb.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Anchor {
    Start,
    End,
}

impl Anchor {
    pub fn opposite(self) -> Anchor {
        match self {
            Anchor::Start => Anchor::End,
            Anchor::End => Anchor::Start,
        }
    }
}

/// Pixel positions of both anchors along the drag axis.
///
/// `start <= end` always holds. When the track is too narrow for the thumb
/// both anchors collapse onto `start` and the anchors are degenerate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DraggableAnchors {
    start: f32,
    end: f32,
}

impl Default for DraggableAnchors {
    /// Unmeasured track: both anchors at zero.
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 0.0,
        }
    }
}

impl DraggableAnchors {
    /// Anchors at explicit positions. An `end` below `start` (or a non-finite
    /// value) collapses onto `start`.
    pub fn new(start: f32, end: f32) -> Self {
        let start = if start.is_finite() { start } else { 0.0 };
        let end = if end.is_finite() && end >= start {
            end
        } else {
            start
        };
        Self { start, end }
    }

    /// Anchors for a thumb of `thumb_size_px` travelling inside a track of
    /// `track_width_px` with `horizontal_padding_px` on both sides.
    pub fn compute(track_width_px: f32, thumb_size_px: f32, horizontal_padding_px: f32) -> Self {
        let end = track_width_px - thumb_size_px - 2.0 * horizontal_padding_px;
        Self::new(0.0, end)
    }

    pub fn position_of(&self, anchor: Anchor) -> f32 {
        match anchor {
            Anchor::Start => self.start,
            Anchor::End => self.end,
        }
    }

    pub fn min_position(&self) -> f32 {
        self.start
    }

    pub fn max_position(&self) -> f32 {
        self.end
    }

    /// Distance between the two anchors.
    pub fn span(&self) -> f32 {
        self.end - self.start
    }

    pub fn is_degenerate(&self) -> bool {
        self.span() <= f32::EPSILON
    }

    pub fn clamp(&self, offset: f32) -> f32 {
        if offset.is_nan() {
            return self.start;
        }
        offset.clamp(self.start, self.end)
    }

    /// Anchor nearest to `offset`; ties go to `End`.
    pub fn closest_anchor(&self, offset: f32) -> Anchor {
        if (offset - self.start).abs() < (self.end - offset).abs() {
            Anchor::Start
        } else {
            Anchor::End
        }
    }

    /// Pick the anchor a drag that started at `origin` should settle on when
    /// released at `offset` with `velocity` (px/s, positive toward `End`).
    ///
    /// A release at least `velocity_threshold` fast commits in the direction of
    /// motion. Otherwise the drag commits to the anchor ahead once it covered
    /// `positional_threshold` of the distance to it (reaching the threshold
    /// exactly counts), and falls back to `origin` if it did not.
    pub fn resolve_target(
        &self,
        origin: Anchor,
        offset: f32,
        velocity: f32,
        positional_threshold: f32,
        velocity_threshold: f32,
    ) -> Anchor {
        if self.is_degenerate() {
            return origin;
        }
        let velocity = if velocity.is_finite() { velocity } else { 0.0 };
        if velocity != 0.0 && velocity.abs() >= velocity_threshold {
            return if velocity > 0.0 {
                Anchor::End
            } else {
                Anchor::Start
            };
        }

        let origin_position = self.position_of(origin);
        let displacement = self.clamp(offset) - origin_position;
        if displacement == 0.0 {
            return origin;
        }
        let ahead = if displacement > 0.0 {
            Anchor::End
        } else {
            Anchor::Start
        };
        if ahead == origin {
            return origin;
        }
        let distance = (self.position_of(ahead) - origin_position).abs();
        let travelled = displacement.abs() / distance;
        if travelled >= positional_threshold {
            ahead
        } else {
            origin
        }
    }
}

/// `End` sits at `track_width - thumb_size - 2 * padding`, never below `Start`.
pub fn compute_anchors(
    track_width_px: f32,
    thumb_size_px: f32,
    horizontal_padding_px: f32,
) -> DraggableAnchors {
    DraggableAnchors::compute(track_width_px, thumb_size_px, horizontal_padding_px)
}
