use std::time::{Duration, Instant};

/// Height applied to the content panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContentHeight {
    /// Size to content.
    Auto,
    Px(f32),
}

/// Overflow policy of the content panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overflow {
    Hidden,
    /// Content may scroll inside the panel.
    Auto,
}

/// Rendering surface hosting a submenu's content panel.
///
/// The transition driver only decides *what* to apply; implementors decide
/// how measurement and styling are carried out.
pub trait ContentSurface {
    /// Whether the panel exists yet. Every operation is skipped otherwise.
    fn is_mounted(&self) -> bool;
    /// Natural height of the inner item list.
    fn measure_content_height(&self) -> Option<f32>;
    fn set_overflow(&mut self, overflow: Overflow);
    fn set_height(&mut self, height: ContentHeight);
    /// Commit pending style so the next change animates from it.
    fn force_layout(&mut self);
}

/// Phases of the expand/collapse animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    Closed,
    Opening,
    Open,
    Closing,
}

/// Identity of a scheduled transition completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransitionToken(u64);

#[derive(Debug, Clone, Copy)]
struct PendingTransition {
    token: TransitionToken,
    deadline: Instant,
}

/// Two-phase height transition state machine.
#[derive(Debug)]
pub struct TransitionDriver {
    phase: TransitionPhase,
    generation: u64,
    pending: Option<PendingTransition>,
}

impl TransitionDriver {
    pub fn new(open: bool) -> Self {
        Self {
            phase: if open {
                TransitionPhase::Open
            } else {
                TransitionPhase::Closed
            },
            generation: 0,
            pending: None,
        }
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Token of the completion still waiting for its deadline.
    pub fn pending_token(&self) -> Option<TransitionToken> {
        self.pending.map(|pending| pending.token)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|pending| pending.deadline)
    }

    /// Start expanding: pin the panel to its measured height, then relax it
    /// once `duration` has elapsed.
    pub fn expand(
        &mut self,
        surface: &mut dyn ContentSurface,
        now: Instant,
        duration: Duration,
    ) -> Option<TransitionToken> {
        self.cancel();

        if !surface.is_mounted() {
            log::debug!("submenu expand skipped: content not mounted");
            self.phase = TransitionPhase::Open;
            return None;
        }

        let height = surface.measure_content_height();
        surface.set_overflow(Overflow::Hidden);
        if let Some(height) = height {
            surface.set_height(ContentHeight::Px(height));
        }

        let token = self.next_token();
        self.pending = Some(PendingTransition {
            token,
            deadline: now + duration,
        });
        self.phase = TransitionPhase::Opening;
        log::debug!(
            "submenu expand started: token={token:?} height={height:?} \
             duration={duration:?}"
        );
        Some(token)
    }

    /// Collapse to zero height, starting from a concrete pixel value.
    pub fn collapse(&mut self, surface: &mut dyn ContentSurface) {
        self.cancel();

        if !surface.is_mounted() {
            log::debug!("submenu collapse skipped: content not mounted");
            self.phase = TransitionPhase::Closed;
            return;
        }

        self.phase = TransitionPhase::Closing;
        let height = surface.measure_content_height();
        surface.set_overflow(Overflow::Hidden);
        if let Some(height) = height {
            surface.set_height(ContentHeight::Px(height));
        }
        surface.force_layout();
        surface.set_height(ContentHeight::Px(0.0));
        self.phase = TransitionPhase::Closed;
        log::debug!("submenu collapse applied: height={height:?}");
    }

    /// Finish the transition identified by `token`.
    ///
    /// Returns `false` for stale or cancelled tokens, which leave the surface
    /// untouched.
    pub fn complete(
        &mut self,
        token: TransitionToken,
        surface: &mut dyn ContentSurface,
    ) -> bool {
        match self.pending {
            Some(pending) if pending.token == token => {},
            _ => {
                log::debug!("submenu transition ignored stale token={token:?}");
                return false;
            },
        }

        self.pending = None;
        self.phase = TransitionPhase::Open;
        if surface.is_mounted() {
            surface.set_overflow(Overflow::Auto);
            surface.set_height(ContentHeight::Auto);
        }
        true
    }

    /// Complete the pending transition if its deadline has elapsed.
    pub fn poll(
        &mut self,
        now: Instant,
        surface: &mut dyn ContentSurface,
    ) -> bool {
        match self.pending {
            Some(pending) if pending.deadline <= now => {
                self.complete(pending.token, surface)
            },
            _ => false,
        }
    }

    /// Drop the pending completion, if any.
    pub fn cancel(&mut self) -> Option<TransitionToken> {
        let token = self.pending.take().map(|pending| pending.token);
        if let Some(token) = token {
            log::debug!("submenu transition cancelled: token={token:?}");
        }
        token
    }

    fn next_token(&mut self) -> TransitionToken {
        self.generation += 1;
        TransitionToken(self.generation)
    }
}
