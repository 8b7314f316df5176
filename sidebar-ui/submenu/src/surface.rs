use std::time::{Duration, Instant};

use crate::context::DEFAULT_TRANSITION_DURATION;
use crate::transition::{ContentHeight, ContentSurface, Overflow};

#[derive(Debug, Clone, Copy, PartialEq)]
struct HeightTween {
    from: f32,
    to: f32,
    started_at: Instant,
    duration: Duration,
}

impl HeightTween {
    fn value_at(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return self.to;
        }

        let elapsed = now.saturating_duration_since(self.started_at);
        let progress =
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0);
        self.from + (self.to - self.from) * ease_in_out(progress)
    }

    fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) >= self.duration
    }
}

fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Content panel backing the `iced` view of a submenu.
///
/// Applied heights behave like a CSS `height` transition: a change animates
/// only between two committed pixel values. Changing from
/// [`ContentHeight::Auto`] jumps, so collapsing commits a pixel height first.
#[derive(Debug, Clone)]
pub struct PanelSurface {
    natural_height: Option<f32>,
    height: ContentHeight,
    committed: ContentHeight,
    overflow: Overflow,
    tween: Option<HeightTween>,
    duration: Duration,
    now: Instant,
}

impl PanelSurface {
    pub fn new(open: bool) -> Self {
        let height = if open {
            ContentHeight::Auto
        } else {
            ContentHeight::Px(0.0)
        };

        Self {
            natural_height: None,
            height,
            committed: height,
            overflow: if open { Overflow::Auto } else { Overflow::Hidden },
            tween: None,
            duration: DEFAULT_TRANSITION_DURATION,
            now: Instant::now(),
        }
    }

    /// Record the natural height of the inner item list.
    pub fn set_natural_height(&mut self, height: Option<f32>) {
        self.natural_height = height.map(|height| height.max(0.0));
    }

    pub fn natural_height(&self) -> Option<f32> {
        self.natural_height
    }

    /// Whether a natural height was reported; unmeasured panels ignore
    /// every transition operation.
    pub fn is_measured(&self) -> bool {
        self.natural_height.is_some()
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Advance the clock used to start and sample height tweens.
    pub fn sync_clock(&mut self, now: Instant) {
        self.now = now;
        if self.tween.is_some_and(|tween| tween.is_finished(now)) {
            self.tween = None;
        }
    }

    /// Height most recently applied, ignoring any running tween.
    pub fn height(&self) -> ContentHeight {
        self.height
    }

    pub fn overflow(&self) -> Overflow {
        self.overflow
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Height to draw for the current frame.
    pub fn frame_height(&self) -> ContentHeight {
        match self.tween {
            Some(tween) => ContentHeight::Px(tween.value_at(self.now)),
            None => self.height,
        }
    }

    /// End of a frame: the applied height becomes the committed one.
    pub fn commit(&mut self) {
        self.committed = self.height;
    }

    fn committed_px(&self) -> Option<f32> {
        match self.tween {
            Some(tween) => Some(tween.value_at(self.now)),
            None => match self.committed {
                ContentHeight::Px(height) => Some(height),
                ContentHeight::Auto => None,
            },
        }
    }
}

impl ContentSurface for PanelSurface {
    fn is_mounted(&self) -> bool {
        self.is_measured()
    }

    fn measure_content_height(&self) -> Option<f32> {
        self.natural_height
    }

    fn set_overflow(&mut self, overflow: Overflow) {
        self.overflow = overflow;
    }

    fn set_height(&mut self, height: ContentHeight) {
        self.tween = match (self.committed_px(), height) {
            (Some(from), ContentHeight::Px(to))
                if (from - to).abs() > f32::EPSILON
                    && !self.duration.is_zero() =>
            {
                Some(HeightTween {
                    from,
                    to,
                    started_at: self.now,
                    duration: self.duration,
                })
            },
            _ => None,
        };
        self.height = height;
    }

    fn force_layout(&mut self) {
        self.commit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DURATION: Duration = Duration::from_millis(200);

    fn mounted(open: bool) -> PanelSurface {
        let mut surface = PanelSurface::new(open);
        surface.set_natural_height(Some(100.0));
        surface.set_duration(DURATION);
        surface
    }

    #[test]
    fn given_new_panel_then_initial_height_follows_open_flag() {
        assert_eq!(PanelSurface::new(true).height(), ContentHeight::Auto);
        assert_eq!(PanelSurface::new(false).height(), ContentHeight::Px(0.0));
        assert!(!PanelSurface::new(true).is_measured());
    }

    #[test]
    fn given_closed_panel_when_height_is_pinned_then_frames_interpolate() {
        let mut surface = mounted(false);
        let start = Instant::now();
        surface.sync_clock(start);

        surface.set_height(ContentHeight::Px(100.0));
        assert!(surface.is_animating());
        assert_eq!(surface.frame_height(), ContentHeight::Px(0.0));

        surface.sync_clock(start + DURATION / 2);
        match surface.frame_height() {
            ContentHeight::Px(height) => {
                assert!(height > 0.0 && height < 100.0)
            },
            ContentHeight::Auto => panic!("expected a pixel frame height"),
        }

        surface.sync_clock(start + DURATION);
        assert!(!surface.is_animating());
        assert_eq!(surface.frame_height(), ContentHeight::Px(100.0));
    }

    #[test]
    fn given_auto_panel_when_setting_pixels_without_layout_then_height_jumps() {
        let mut surface = mounted(true);

        surface.set_height(ContentHeight::Px(100.0));
        surface.set_height(ContentHeight::Px(0.0));

        assert!(!surface.is_animating());
        assert_eq!(surface.frame_height(), ContentHeight::Px(0.0));
    }

    #[test]
    fn given_auto_panel_when_layout_is_forced_then_collapse_animates() {
        let mut surface = mounted(true);
        let start = Instant::now();
        surface.sync_clock(start);

        surface.set_height(ContentHeight::Px(100.0));
        surface.force_layout();
        surface.set_height(ContentHeight::Px(0.0));

        assert!(surface.is_animating());
        assert_eq!(surface.frame_height(), ContentHeight::Px(100.0));
        assert_eq!(surface.height(), ContentHeight::Px(0.0));
    }

    #[test]
    fn given_zero_duration_when_setting_height_then_no_tween_starts() {
        let mut surface = mounted(false);
        surface.set_duration(Duration::ZERO);

        surface.set_height(ContentHeight::Px(100.0));

        assert!(!surface.is_animating());
    }
}
