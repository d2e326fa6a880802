//! Leptos DragDrop Utilities
//!
//! Simple drag-and-drop for Leptos using mouse events.
//! Uses movement threshold to distinguish click from drag.
//!
//! Generic over the dragged payload `D` (e.g. a card reference) and the drop
//! target key `T` (e.g. a column id).

use std::time::Duration;

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Marker bound for payloads and target keys stored in signals
pub trait DndKey: Clone + PartialEq + Send + Sync + 'static {}

impl<K> DndKey for K where K: Clone + PartialEq + Send + Sync + 'static {}

/// DnD state signals
pub struct DndSignals<D: DndKey, T: DndKey> {
    pub dragging_read: ReadSignal<Option<D>>,
    pub dragging_write: WriteSignal<Option<D>>,
    pub drop_target_read: ReadSignal<Option<T>>,
    pub drop_target_write: WriteSignal<Option<T>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending payload (mousedown but not yet dragging)
    pub pending_read: ReadSignal<Option<D>>,
    pub pending_write: WriteSignal<Option<D>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
}

impl<D: DndKey, T: DndKey> Clone for DndSignals<D, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: DndKey, T: DndKey> Copy for DndSignals<D, T> {}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

/// How long `drag_just_ended` stays set so the trailing click can be ignored
const DRAG_END_GRACE: Duration = Duration::from_millis(100);

/// True once the pointer has travelled far enough to count as a drag
pub fn exceeds_threshold(start: (i32, i32), current: (i32, i32)) -> bool {
    let dx = (current.0 - start.0).abs();
    let dy = (current.1 - start.1).abs();
    dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX
}

pub fn create_dnd_signals<D: DndKey, T: DndKey>() -> DndSignals<D, T> {
    let (dragging_read, dragging_write) = signal(None::<D>);
    let (drop_target_read, drop_target_write) = signal(None::<T>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_read, pending_write) = signal(None::<D>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    DndSignals {
        dragging_read,
        dragging_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_read,
        pending_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
    }
}

/// End drag operation
pub fn end_drag<D: DndKey, T: DndKey>(dnd: &DndSignals<D, T>) {
    dnd.dragging_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_write.set(None);
    dnd.drag_just_ended_write.set(true);

    let clear = dnd.drag_just_ended_write;
    set_timeout(move || clear.set(false), DRAG_END_GRACE);
}

/// Create mousedown handler for draggable elements
/// Records pending drag with start position
pub fn make_on_mousedown<D: DndKey, T: DndKey>(
    dnd: DndSignals<D, T>,
    payload: D,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        // Ignore if target is a control
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlTextAreaElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
        }
        dnd.pending_write.set(Some(payload.clone()));
        dnd.start_x_write.set(ev.client_x());
        dnd.start_y_write.set(ev.client_y());
    }
}

/// Create mouseenter handler for drop targets
pub fn make_on_target_mouseenter<D: DndKey, T: DndKey>(
    dnd: DndSignals<D, T>,
    target: T,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_read.with_untracked(Option::is_some) {
            dnd.drop_target_write.set(Some(target.clone()));
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave<D: DndKey, T: DndKey>(
    dnd: DndSignals<D, T>,
) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_read.with_untracked(Option::is_some) {
            dnd.drop_target_write.set(None);
        }
    }
}

/// Global listeners installed by [`bind_global_mouseup`]
pub struct DndListeners {
    mousemove: WindowListenerHandle,
    mouseup: WindowListenerHandle,
}

impl DndListeners {
    /// Detach both listeners
    pub fn remove(self) {
        self.mousemove.remove();
        self.mouseup.remove();
    }
}

/// Bind global mouseup (drop detection) and mousemove (drag start) handlers.
///
/// `on_drop` receives the dragged payload and the hovered target, or `None`
/// when the payload was released outside every target. Plain clicks never
/// reach `on_drop`. Call [`DndListeners::remove`] on cleanup.
pub fn bind_global_mouseup<D, T, F>(dnd: DndSignals<D, T>, on_drop: F) -> DndListeners
where
    D: DndKey,
    T: DndKey,
    F: Fn(D, Option<T>) + 'static,
{
    let mousemove = window_event_listener(leptos::ev::mousemove, move |ev: web_sys::MouseEvent| {
        let pending = dnd.pending_read.get_untracked();

        // If we have a pending drag and haven't started dragging yet
        if pending.is_some() && dnd.dragging_read.with_untracked(Option::is_none) {
            let start = (dnd.start_x_read.get_untracked(), dnd.start_y_read.get_untracked());
            if exceeds_threshold(start, (ev.client_x(), ev.client_y())) {
                dnd.dragging_write.set(pending);
            }
        }
    });

    let mouseup = window_event_listener(leptos::ev::mouseup, move |_ev: web_sys::MouseEvent| {
        let dragging = dnd.dragging_read.get_untracked();
        let drop_target = dnd.drop_target_read.get_untracked();

        // Clear pending state first
        dnd.pending_write.set(None);
        end_drag(&dnd);

        // Only an actual drag produces a drop; a click fires naturally on the element
        if let Some(dragged) = dragging {
            on_drop(dragged, drop_target);
        }
    });

    DndListeners { mousemove, mouseup }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_movement_is_a_click() {
        assert!(!exceeds_threshold((10, 10), (14, 15)));
        assert!(!exceeds_threshold((10, 10), (10, 10)));
    }

    #[test]
    fn test_movement_past_threshold_starts_drag() {
        assert!(exceeds_threshold((10, 10), (16, 10)));
        assert!(exceeds_threshold((10, 10), (10, 4)));
    }
}
