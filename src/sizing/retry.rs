/// Cap on consecutive next-frame measurement retries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

/// Consecutive deferred measurements since the last successful one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RetryBudget {
    used: u32,
}

impl RetryBudget {
    /// Records a deferred measurement; `true` if another frame may be requested.
    pub fn try_consume(&mut self, policy: RetryPolicy) -> bool {
        if self.used >= policy.max_attempts {
            return false;
        }
        self.used += 1;
        true
    }

    pub fn reset(&mut self) {
        self.used = 0;
    }

    pub fn used(&self) -> u32 {
        self.used
    }
}
