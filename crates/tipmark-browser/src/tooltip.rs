//! DOM tooltip surface and pointer wiring.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use tipmark_core::widget::{CLASS_FORCE_HIDDEN, CLASS_TOOLTIP};
use tipmark_core::{
    Geometry, HoverController, LeaveTarget, Placement, Rect, Result, TipmarkError, TooltipSurface,
};
use wasm_bindgen::JsCast;
use web_sys::{DomRect, Element, Event, HtmlElement, MouseEvent, Node};

use crate::js_error;

fn rect(r: &DomRect) -> Rect {
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

struct DomSurface {
    trigger: HtmlElement,
    tooltip: HtmlElement,
    container: Element,
    _timer: Option<Timeout>,
    state: Weak<RefCell<TooltipState>>,
}

impl DomSurface {
    fn try_measure(&self) -> Result<Geometry> {
        if !self.container.is_connected() {
            return Err(TipmarkError::measurement("container is not in the document"));
        }
        Ok(Geometry {
            tooltip: rect(&self.tooltip.get_bounding_client_rect()),
            trigger: rect(&self.trigger.get_bounding_client_rect()),
            container: rect(&self.container.get_bounding_client_rect()),
        })
    }
}

impl TooltipSurface for DomSurface {
    fn measure(&self) -> Option<Geometry> {
        self.try_measure()
            .inspect_err(|err| tracing::debug!(target: "tipmark::tooltip", %err))
            .ok()
    }

    fn apply_placement(&mut self, placement: Placement) {
        let style = self.tooltip.style();
        for (property, value) in placement.style_declarations() {
            let _ = match value {
                Some(value) => style.set_property(property, &value),
                None => style.remove_property(property).map(|_| ()),
            };
        }
    }

    fn set_force_hidden(&mut self, hidden: bool) {
        let classes = self.trigger.class_list();
        let _ = if hidden {
            classes.add_1(CLASS_FORCE_HIDDEN)
        } else {
            classes.remove_1(CLASS_FORCE_HIDDEN)
        };
    }

    fn schedule_reset(&mut self, delay: Duration, token: u64) {
        let state = self.state.clone();
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        // Replacing the handle cancels any earlier timer.
        self._timer = Some(Timeout::new(millis, move || {
            let Some(state) = state.upgrade() else {
                return;
            };
            let mut state = state.borrow_mut();
            let TooltipState {
                controller,
                surface,
            } = &mut *state;
            controller.reset_fired(surface, token);
        }));
    }
}

struct TooltipState {
    controller: HoverController,
    surface: DomSurface,
}

/// Live pointer handling for one widget. Dropping it removes the listeners
/// and cancels any pending reset.
pub struct TooltipBinding {
    state: Rc<RefCell<TooltipState>>,
    _enter: EventListener,
    _leave: EventListener,
}

impl TooltipBinding {
    pub fn placement(&self) -> Placement {
        self.state.borrow().controller.placement()
    }

    pub fn is_hovering(&self) -> bool {
        self.state.borrow().controller.is_hovering()
    }
}

/// Wire `trigger` (a collapsed widget's outer element) so its tooltip is
/// kept inside `container`.
pub fn attach_tooltip(trigger: &HtmlElement, container: &Element) -> Result<TooltipBinding> {
    let tooltip = trigger
        .query_selector(&format!(".{CLASS_TOOLTIP}"))
        .map_err(|e| TipmarkError::attachment(js_error(e)))?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| TipmarkError::attachment("widget has no tooltip element"))?;

    let state = Rc::new_cyclic(|weak| {
        RefCell::new(TooltipState {
            controller: HoverController::new(),
            surface: DomSurface {
                trigger: trigger.clone(),
                tooltip,
                container: container.clone(),
                _timer: None,
                state: weak.clone(),
            },
        })
    });

    let enter = {
        let state = Rc::downgrade(&state);
        EventListener::new(trigger, "pointerenter", move |_event| {
            let Some(state) = state.upgrade() else {
                return;
            };
            let mut state = state.borrow_mut();
            let TooltipState {
                controller,
                surface,
            } = &mut *state;
            controller.pointer_enter(surface);
        })
    };

    let leave = {
        let state = Rc::downgrade(&state);
        EventListener::new(trigger, "pointerleave", move |event| {
            let Some(state) = state.upgrade() else {
                return;
            };
            let mut state = state.borrow_mut();
            let target = leave_target(event, &state.surface);
            let TooltipState {
                controller,
                surface,
            } = &mut *state;
            controller.pointer_leave(surface, target);
        })
    };

    Ok(TooltipBinding {
        state,
        _enter: enter,
        _leave: leave,
    })
}

fn leave_target(event: &Event, surface: &DomSurface) -> LeaveTarget {
    let related = event
        .dyn_ref::<MouseEvent>()
        .and_then(|e| e.related_target())
        .and_then(|t| t.dyn_into::<Node>().ok());
    let Some(related) = related else {
        return LeaveTarget::Elsewhere;
    };

    if surface.tooltip.contains(Some(&related)) {
        LeaveTarget::Tooltip
    } else if surface.trigger.contains(Some(&related)) {
        LeaveTarget::Trigger
    } else {
        LeaveTarget::Elsewhere
    }
}
