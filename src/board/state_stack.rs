/// A stack of reversible state (en passant target, castle rights, clocks).
/// The current value is always present; `pop` only restores values that were
/// pushed on top of the initial one.
#[derive(Clone, Debug)]
pub struct StateStack<T> {
    current: T,
    previous: Vec<T>,
}

impl<T: Clone> StateStack<T> {
    pub fn new(initial: T) -> Self {
        Self {
            current: initial,
            previous: Vec::new(),
        }
    }

    pub fn push(&mut self, value: T) -> T {
        let old = std::mem::replace(&mut self.current, value);
        self.previous.push(old);
        self.current.clone()
    }

    pub fn peek(&self) -> &T {
        &self.current
    }

    /// Restores the previous value and returns the one that was discarded.
    /// Returns `None` when only the initial value is left.
    pub fn pop(&mut self) -> Option<T> {
        let restored = self.previous.pop()?;
        Some(std::mem::replace(&mut self.current, restored))
    }

    /// Overwrites the current value without recording history (used while
    /// setting up a position).
    pub fn replace(&mut self, value: T) {
        self.current = value;
    }
}
