//! Request generations
//!
//! Every load that will write into the view state first takes a token from a
//! monotonically increasing counter. Navigation and newer loads advance the
//! counter, so a response carrying an older token is stale and is dropped.

/// Token identifying one in-flight load
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Monotonic request counter
#[derive(Debug, Clone, Default)]
pub struct Generation {
    current: u64,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load, superseding every earlier token
    pub fn next(&mut self) -> RequestToken {
        self.current += 1;
        RequestToken(self.current)
    }

    /// Invalidate in-flight loads without starting a new one
    pub fn invalidate(&mut self) {
        self.current += 1;
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.current
    }
}
