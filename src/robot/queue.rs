//! Bounded FIFO of pending events.

use crate::core::Event;
use std::collections::VecDeque;
use tracing::warn;

/// Events waiting for dispatch, in arrival order.
#[derive(Clone, Debug)]
pub struct EventQueue<E> {
    events: VecDeque<E>,
    capacity: usize,
}

impl<E: Event> EventQueue<E> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an event. A full queue drops the event and returns `false`.
    pub fn push(&mut self, event: E) -> bool {
        if self.events.len() >= self.capacity {
            warn!(
                event = event.label(),
                capacity = self.capacity,
                "Event queue full, dropping event"
            );
            return false;
        }
        self.events.push_back(event);
        true
    }

    pub fn pop(&mut self) -> Option<E> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::robot::event::RobotEvent;

    #[test]
    fn pops_in_push_order() {
        let mut queue = EventQueue::with_capacity(4);
        queue.push(RobotEvent::Start);
        queue.push(RobotEvent::Timer);
        queue.push(RobotEvent::Encoder);

        assert_eq!(queue.pop(), Some(RobotEvent::Start));
        assert_eq!(queue.pop(), Some(RobotEvent::Timer));
        assert_eq!(queue.pop(), Some(RobotEvent::Encoder));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn full_queue_drops_new_events() {
        let mut queue = EventQueue::with_capacity(1);
        assert!(queue.push(RobotEvent::Start));
        assert!(!queue.push(RobotEvent::Timer));

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop(), Some(RobotEvent::Start));
        assert!(queue.is_empty());
    }

    #[test]
    fn clear_empties_queue() {
        let mut queue = EventQueue::with_capacity(2);
        queue.push(RobotEvent::Start);
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.capacity(), 2);
    }
}
