//! Epoch-stamped transient render flags
//!
//! These flags back short-lived visual state (completion badges, content
//! reveal) that the shell clears on a timer. Each arm bumps an epoch and
//! hands out a token; a timer that fires after the flag was re-armed or
//! explicitly cleared holds a stale token and its expiry is ignored, so
//! superseded timers never flip fresh state.

/// Token tied to one arming of a [`TransientFlag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagToken(u64);

/// A boolean render hint with stale-timer protection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransientFlag {
    set: bool,
    epoch: u64,
}

impl TransientFlag {
    /// Set the flag and return the token a deferred clear must present.
    pub fn arm(&mut self) -> FlagToken {
        self.set = true;
        self.epoch += 1;
        FlagToken(self.epoch)
    }

    /// Clear immediately, invalidating any outstanding token.
    pub fn clear(&mut self) {
        self.set = false;
        self.epoch += 1;
    }

    /// Clear only if `token` matches the current arming. Returns whether
    /// the flag was cleared.
    pub fn expire(&mut self, token: FlagToken) -> bool {
        if self.epoch == token.0 {
            self.set = false;
            true
        } else {
            false
        }
    }

    pub fn is_set(&self) -> bool {
        self.set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expire_clears_with_matching_token() {
        let mut flag = TransientFlag::default();
        let token = flag.arm();
        assert!(flag.is_set());
        assert!(flag.expire(token));
        assert!(!flag.is_set());
    }

    #[test]
    fn stale_token_does_not_clear_rearmed_flag() {
        let mut flag = TransientFlag::default();
        let stale = flag.arm();
        let fresh = flag.arm();
        assert!(!flag.expire(stale));
        assert!(flag.is_set());
        assert!(flag.expire(fresh));
    }

    #[test]
    fn explicit_clear_invalidates_pending_token() {
        let mut flag = TransientFlag::default();
        let token = flag.arm();
        flag.clear();
        assert!(!flag.expire(token));
    }
}
