/// Guarantees that at most one operation is outstanding.
///
/// Acquired when a request is dispatched, released when its result is
/// delivered (or the transport is lost). Never busy without an outstanding
/// request and never idle while a result is pending.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SingleFlight {
    busy: bool,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate. Returns `false` if an operation is already in flight.
    pub fn try_acquire(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    pub fn release(&mut self) {
        self.busy = false;
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_until_release() {
        let mut gate = SingleFlight::new();
        assert!(gate.try_acquire());
        assert!(gate.is_busy());
        assert!(!gate.try_acquire());

        gate.release();
        assert!(!gate.is_busy());
        assert!(gate.try_acquire());
    }
}
