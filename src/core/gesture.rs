//! Hand landmarks to a boolean fist signal.
//!
//! The detector reports 21 normalized landmarks per hand. A closed fist pulls
//! the four fingertips in toward the wrist, so the summed wrist-to-fingertip
//! distance in the image plane drops below a fixed threshold. The result is
//! recomputed for every detector callback with no smoothing; values close to
//! the threshold can flicker between frames.

use crate::core::constants::HAND_LANDMARK_COUNT;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

pub const WRIST: usize = 0;
/// Index, middle, ring and pinky tips.
pub const FINGERTIPS: [usize; 4] = [8, 12, 16, 20];

/// One normalized landmark as delivered by the detector.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Distance in the x/y image plane; depth is ignored.
    #[inline]
    pub fn planar_distance(&self, other: &Landmark) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Sum of planar distances from the wrist to each fingertip.
///
/// Returns `None` for a partial hand (fewer than 21 landmarks).
pub fn fingertip_spread(landmarks: &[Landmark]) -> Option<f32> {
    if landmarks.len() < HAND_LANDMARK_COUNT {
        return None;
    }
    let wrist = landmarks[WRIST];
    Some(
        FINGERTIPS
            .iter()
            .map(|&i| wrist.planar_distance(&landmarks[i]))
            .sum(),
    )
}

#[derive(Clone, Copy, Debug)]
pub struct FistClassifier {
    pub threshold: f32,
}

impl FistClassifier {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// `true` when a hand is present and its fingertip spread is under the threshold.
    pub fn is_fist(&self, hand: Option<&[Landmark]>) -> bool {
        hand.and_then(fingertip_spread)
            .map(|spread| spread < self.threshold)
            .unwrap_or(false)
    }
}

// ---------------- Subscription plumbing ----------------

type Handler<T> = Rc<RefCell<dyn FnMut(T)>>;

struct Slots<T> {
    next_id: u64,
    handlers: Vec<(u64, Handler<T>)>,
}

/// Single-threaded fan-out of a value to every live subscriber.
pub struct SignalBus<T> {
    slots: Rc<RefCell<Slots<T>>>,
}

impl<T> Default for SignalBus<T> {
    fn default() -> Self {
        Self {
            slots: Rc::new(RefCell::new(Slots {
                next_id: 0,
                handlers: Vec::new(),
            })),
        }
    }
}

impl<T: Copy + 'static> SignalBus<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler`; it stays registered until the returned handle is
    /// dropped or explicitly unsubscribed.
    pub fn subscribe(&self, handler: impl FnMut(T) + 'static) -> Subscription {
        let id = {
            let mut slots = self.slots.borrow_mut();
            let id = slots.next_id;
            slots.next_id += 1;
            let handler: Handler<T> = Rc::new(RefCell::new(handler));
            slots.handlers.push((id, handler));
            id
        };
        let weak: Weak<RefCell<Slots<T>>> = Rc::downgrade(&self.slots);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(slots) = weak.upgrade() {
                    slots.borrow_mut().handlers.retain(|(h, _)| *h != id);
                }
            })),
        }
    }

    /// Deliver `value` to subscribers in registration order. Handlers may
    /// subscribe or unsubscribe while being called; changes apply to the next publish.
    /// A handler that publishes on its own bus is not re-entered.
    pub fn publish(&self, value: T) {
        let snapshot: Vec<Handler<T>> = self
            .slots
            .borrow()
            .handlers
            .iter()
            .map(|(_, h)| h.clone())
            .collect();
        for handler in snapshot {
            if let Ok(mut handler) = handler.try_borrow_mut() {
                (*handler)(value);
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.slots.borrow().handlers.len()
    }
}

/// Handle returned by [`SignalBus::subscribe`]. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

/// Classifier plus fan-out: the boundary the detector callback talks to.
pub struct GestureAdapter {
    classifier: FistClassifier,
    bus: SignalBus<bool>,
    closed: Cell<bool>,
}

impl GestureAdapter {
    pub fn new(threshold: f32) -> Self {
        Self {
            classifier: FistClassifier::new(threshold),
            bus: SignalBus::new(),
            closed: Cell::new(false),
        }
    }

    /// Classify one detector result and publish it. `None` means no hand was found.
    /// After [`GestureAdapter::close`] results are dropped without publishing.
    pub fn on_frame(&self, hand: Option<&[Landmark]>) -> bool {
        if self.closed.get() {
            return false;
        }
        let is_fist = self.classifier.is_fist(hand);
        self.bus.publish(is_fist);
        is_fist
    }

    pub fn on_signal(&self, handler: impl FnMut(bool) + 'static) -> Subscription {
        self.bus.subscribe(handler)
    }

    /// Stop publishing. The detector may still deliver a result or two
    /// while it shuts down.
    pub fn close(&self) {
        self.closed.set(true);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }
}
