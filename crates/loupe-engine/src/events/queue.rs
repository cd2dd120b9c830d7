/// Outbox of pending notifications, drained once per frame.
#[derive(Debug)]
pub struct EventQueue<E> {
    pending: Vec<E>,
}

impl<E> EventQueue<E> {
    pub fn new() -> Self {
        Self { pending: Vec::new() }
    }

    #[inline]
    pub fn push(&mut self, ev: E) {
        self.pending.push(ev);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Events in the order they were pushed, without consuming them.
    #[inline]
    pub fn pending(&self) -> &[E] {
        &self.pending
    }

    /// Removes and yields all pending events in push order.
    pub fn drain(&mut self) -> std::vec::Drain<'_, E> {
        self.pending.drain(..)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}
