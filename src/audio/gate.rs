use tracing::info;

/// User gestures browsers accept as permission to start audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    Click,
    TouchStart,
    KeyDown,
}

impl InteractionKind {
    pub const ALL: [InteractionKind; 3] = [
        InteractionKind::Click,
        InteractionKind::TouchStart,
        InteractionKind::KeyDown,
    ];

    /// DOM event type the listener is registered for.
    pub fn event_type(self) -> &'static str {
        match self {
            InteractionKind::Click => "click",
            InteractionKind::TouchStart => "touchstart",
            InteractionKind::KeyDown => "keydown",
        }
    }
}

/// Runs the audio unlock exactly once, on whichever gesture comes first.
pub struct InteractionGate {
    action: Option<Box<dyn FnOnce()>>,
    armed: Vec<InteractionKind>,
}

impl InteractionGate {
    pub fn new<F>(action: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self {
            action: Some(Box::new(action)),
            armed: InteractionKind::ALL.to_vec(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.action.is_none()
    }

    /// Whether the listener for `kind` is still registered.
    pub fn is_armed(&self, kind: InteractionKind) -> bool {
        self.armed.contains(&kind)
    }

    /// Called from the listener of `kind`. Returns `true` only for the event
    /// that actually enabled audio.
    pub fn fire(&mut self, kind: InteractionKind) -> bool {
        if !self.is_armed(kind) {
            return false;
        }
        // Each listener fires once, enabled or not.
        self.armed.retain(|armed| *armed != kind);

        let Some(action) = self.action.take() else {
            return false;
        };
        action();
        info!(trigger = kind.event_type(), "audio enabled by user interaction");
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use proptest::prelude::*;

    use super::*;

    fn counting_gate() -> (InteractionGate, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let gate = InteractionGate::new(move || counter.set(counter.get() + 1));
        (gate, count)
    }

    #[test]
    fn first_gesture_enables() {
        let (mut gate, count) = counting_gate();
        assert!(!gate.is_enabled());
        assert!(gate.fire(InteractionKind::TouchStart));
        assert!(gate.is_enabled());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn listeners_disarm_after_their_first_event() {
        let (mut gate, count) = counting_gate();
        gate.fire(InteractionKind::KeyDown);
        assert!(!gate.is_armed(InteractionKind::KeyDown));
        assert!(gate.is_armed(InteractionKind::Click));

        assert!(!gate.fire(InteractionKind::Click));
        assert!(!gate.is_armed(InteractionKind::Click));
        assert!(!gate.fire(InteractionKind::KeyDown));
        assert_eq!(count.get(), 1);
    }

    fn kind_strategy() -> impl Strategy<Value = InteractionKind> {
        prop_oneof![
            Just(InteractionKind::Click),
            Just(InteractionKind::TouchStart),
            Just(InteractionKind::KeyDown),
        ]
    }

    proptest! {
        #[test]
        fn enables_at_most_once(events in prop::collection::vec(kind_strategy(), 0..50)) {
            let (mut gate, count) = counting_gate();
            let enabled = events.iter().filter(|kind| gate.fire(**kind)).count();
            let expected = usize::from(!events.is_empty());
            prop_assert_eq!(enabled, expected);
            prop_assert_eq!(count.get() as usize, expected);
        }
    }
}
