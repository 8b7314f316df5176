use std::time::{Duration, Instant};

use iced::{Padding, Point, Rectangle, Size};

/// Gap between a trigger and its flyout.
pub const FLYOUT_GAP: f32 = 5.0;

/// Positioning helper keeping a flyout aligned to its trigger.
pub trait Positioner {
    /// Recompute the placement from the latest geometry.
    fn update(&mut self);
}

/// Hoverable flyout region in viewport coordinates.
///
/// The region starts at the trigger edge; `gap` pads the side facing the
/// trigger so the pointer never leaves a hover area on its way over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyoutAnchor {
    pub origin: Point,
    pub gap: Padding,
}

/// Side of the trigger a flyout is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    RightStart,
    LeftStart,
}

/// Places a flyout beside its trigger, flipping and shifting it to stay
/// inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyoutPositioner {
    trigger: Rectangle,
    content: Size,
    viewport: Option<Size>,
    rtl: bool,
    placement: Placement,
    position: Point,
}

impl FlyoutPositioner {
    pub fn new(rtl: bool) -> Self {
        Self {
            trigger: Rectangle::new(Point::ORIGIN, Size::ZERO),
            content: Size::ZERO,
            viewport: None,
            rtl,
            placement: preferred(rtl),
            position: Point::ORIGIN,
        }
    }

    pub fn set_trigger_bounds(&mut self, bounds: Rectangle) {
        self.trigger = bounds;
    }

    pub fn set_content_size(&mut self, size: Size) {
        self.content = size;
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = Some(viewport);
    }

    pub fn set_rtl(&mut self, rtl: bool) {
        self.rtl = rtl;
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Flyout origin computed by the last [`Positioner::update`].
    pub fn position(&self) -> Point {
        self.position
    }

    /// Flyout origin relative to the trigger's top-left corner.
    pub fn offset(&self) -> Point {
        Point::new(
            self.position.x - self.trigger.x,
            self.position.y - self.trigger.y,
        )
    }

    /// Region the flyout layer is anchored to, gap included.
    ///
    /// Coordinates are clamped at zero since they become layout padding.
    pub fn anchor(&self) -> FlyoutAnchor {
        let top = self.position.y.max(0.0);
        match self.placement {
            Placement::RightStart => FlyoutAnchor {
                origin: Point::new(
                    (self.position.x - FLYOUT_GAP).max(0.0),
                    top,
                ),
                gap: Padding {
                    left: FLYOUT_GAP,
                    ..Padding::ZERO
                },
            },
            Placement::LeftStart => FlyoutAnchor {
                origin: Point::new(self.position.x.max(0.0), top),
                gap: Padding {
                    right: FLYOUT_GAP,
                    ..Padding::ZERO
                },
            },
        }
    }

    fn compute(&self) -> (Placement, Point) {
        let right = self.trigger.x + self.trigger.width + FLYOUT_GAP;
        let left = self.trigger.x - FLYOUT_GAP - self.content.width;

        let mut placement = preferred(self.rtl);
        if let Some(viewport) = self.viewport {
            let overflows = match placement {
                Placement::RightStart => {
                    right + self.content.width > viewport.width
                },
                Placement::LeftStart => left < 0.0,
            };
            let fits_other = match placement {
                Placement::RightStart => left >= 0.0,
                Placement::LeftStart => {
                    right + self.content.width <= viewport.width
                },
            };
            if overflows && fits_other {
                placement = flip(placement);
            }
        }

        let x = match placement {
            Placement::RightStart => right,
            Placement::LeftStart => left,
        };

        let mut y = self.trigger.y;
        if let Some(viewport) = self.viewport {
            let max_y = (viewport.height - self.content.height).max(0.0);
            y = y.clamp(0.0, max_y);
        }

        (placement, Point::new(x, y))
    }
}

impl Positioner for FlyoutPositioner {
    fn update(&mut self) {
        let (placement, position) = self.compute();
        self.placement = placement;
        self.position = position;
    }
}

fn preferred(rtl: bool) -> Placement {
    if rtl {
        Placement::LeftStart
    } else {
        Placement::RightStart
    }
}

fn flip(placement: Placement) -> Placement {
    match placement {
        Placement::RightStart => Placement::LeftStart,
        Placement::LeftStart => Placement::RightStart,
    }
}

/// Deferred positioning recompute, run once the sidebar finished resizing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepositionSchedule {
    deadline: Option<Instant>,
}

impl RepositionSchedule {
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns `true` exactly once, when the deadline has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            },
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}
