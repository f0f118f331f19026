//! Tooltip placement on hover.
//!
//! A tooltip is absolutely positioned inside its trigger and centered under
//! it by default. On pointer-enter it is measured against a bounding
//! container (the visible content area) and pinned flush to the left or
//! right edge of the container if the centered position would overflow.
//!
//! On pointer-leave the tooltip is force-hidden immediately, and its
//! placement is reset only after [`HIDE_RESET_DELAY`] (the CSS transition
//! length) so the alignment does not visibly jump while it fades out.
//!
//! The geometry is pure; the DOM side plugs in through [`TooltipSurface`].

use std::time::Duration;

/// Delay before a hidden tooltip returns to its default placement.
///
/// Must match the opacity/visibility transition in the stylesheet.
pub const HIDE_RESET_DELAY: Duration = Duration::from_millis(200);

/// An axis-aligned rectangle in CSS pixels (viewport coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Where a tooltip sits relative to its trigger.
///
/// Offsets are CSS `left` / `right` values for the tooltip, which is
/// positioned against the trigger element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Placement {
    /// Centered under the trigger (stylesheet default).
    #[default]
    Centered,
    /// Left edge pinned to the container's left edge.
    LeftFlush { left: f64 },
    /// Right edge pinned to the container's right edge.
    RightFlush { right: f64 },
}

impl Placement {
    /// Inline style changes for this placement.
    ///
    /// `None` means remove the inline property so the stylesheet default
    /// applies again.
    pub fn style_declarations(&self) -> [(&'static str, Option<String>); 3] {
        match *self {
            Placement::Centered => [("left", None), ("right", None), ("transform", None)],
            Placement::LeftFlush { left } => [
                ("left", Some(format!("{left}px"))),
                ("right", Some("auto".to_string())),
                ("transform", Some("none".to_string())),
            ],
            Placement::RightFlush { right } => [
                ("left", Some("auto".to_string())),
                ("right", Some(format!("{right}px"))),
                ("transform", Some("none".to_string())),
            ],
        }
    }
}

/// Everything measured on pointer-enter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// The tooltip at its default centered placement.
    pub tooltip: Rect,
    /// The trigger the tooltip is positioned against.
    pub trigger: Rect,
    /// The area the tooltip must stay inside.
    pub container: Rect,
}

/// Choose a placement that keeps the tooltip inside the container.
///
/// Returns `None` when the tooltip has no width (not laid out yet, or
/// under a hidden ancestor) or the container has no width; the caller then
/// keeps the default placement.
pub fn compute_placement(geometry: &Geometry) -> Option<Placement> {
    let Geometry {
        tooltip,
        trigger,
        container,
    } = geometry;

    if tooltip.width <= 0.0 || container.width <= 0.0 {
        return None;
    }

    if tooltip.left < container.left {
        Some(Placement::LeftFlush {
            left: container.left - trigger.left,
        })
    } else if tooltip.right() > container.right() {
        Some(Placement::RightFlush {
            right: trigger.right() - container.right(),
        })
    } else {
        Some(Placement::Centered)
    }
}

/// Where the pointer went when it left the trigger or tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveTarget {
    /// Onto the tooltip element.
    Tooltip,
    /// Onto the trigger element.
    Trigger,
    /// Anywhere outside the annotation's interactive region.
    Elsewhere,
}

/// Host side of one tooltip: measurement, styling and timers.
pub trait TooltipSurface {
    /// Measure tooltip, trigger and container. `None` if the container is
    /// missing.
    fn measure(&self) -> Option<Geometry>;

    /// Apply the inline style for `placement`.
    fn apply_placement(&mut self, placement: Placement);

    /// Set or clear the forced-hidden state (zero opacity, hidden visibility).
    fn set_force_hidden(&mut self, hidden: bool);

    /// Call [`HoverController::reset_fired`] with `token` after `delay`.
    fn schedule_reset(&mut self, delay: Duration, token: u64);
}

/// Hover state for one annotation's tooltip.
#[derive(Debug, Clone, Default)]
pub struct HoverController {
    hovering: bool,
    placement: Placement,
    force_hidden: bool,
    pending_reset: Option<u64>,
    next_token: u64,
}

impl HoverController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn is_force_hidden(&self) -> bool {
        self.force_hidden
    }

    pub fn pointer_enter<S: TooltipSurface>(&mut self, surface: &mut S) {
        self.hovering = true;
        // Any scheduled reset belongs to the previous hover.
        self.pending_reset = None;

        // Measure from the default placement, not a leftover one.
        if self.placement != Placement::Centered {
            self.placement = Placement::Centered;
            surface.apply_placement(Placement::Centered);
        }
        if self.force_hidden {
            self.force_hidden = false;
            surface.set_force_hidden(false);
        }

        let Some(geometry) = surface.measure() else {
            tracing::debug!(target: "tipmark::tooltip", "no container, keeping default placement");
            return;
        };
        let Some(placement) = compute_placement(&geometry) else {
            tracing::debug!(
                target: "tipmark::tooltip",
                tooltip_width = geometry.tooltip.width,
                "tooltip not measurable, keeping default placement"
            );
            return;
        };

        tracing::trace!(target: "tipmark::tooltip", ?placement, "placing tooltip");
        if placement != Placement::Centered {
            self.placement = placement;
            surface.apply_placement(placement);
        }
    }

    pub fn pointer_leave<S: TooltipSurface>(&mut self, surface: &mut S, target: LeaveTarget) {
        if target != LeaveTarget::Elsewhere {
            // Moving between trigger and tooltip keeps the hover alive.
            return;
        }

        self.hovering = false;
        self.force_hidden = true;
        surface.set_force_hidden(true);

        self.next_token += 1;
        let token = self.next_token;
        self.pending_reset = Some(token);
        surface.schedule_reset(HIDE_RESET_DELAY, token);
    }

    /// Timer callback. Returns whether the reset was applied; a superseded
    /// token is ignored.
    pub fn reset_fired<S: TooltipSurface>(&mut self, surface: &mut S, token: u64) -> bool {
        if self.pending_reset != Some(token) {
            return false;
        }
        self.pending_reset = None;

        self.placement = Placement::Centered;
        surface.apply_placement(Placement::Centered);
        self.force_hidden = false;
        surface.set_force_hidden(false);
        true
    }
}
