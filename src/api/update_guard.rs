use std::cell::Cell;
use std::rc::Rc;

/// Suppresses derived updates (window-shift evaluation) while a
/// programmatic scroll write is in flight.
///
/// Each `suppress` call hands out a token; suppression lasts until every
/// outstanding token is dropped, so nested programmatic writes compose.
#[derive(Debug, Clone, Default)]
pub struct DerivedUpdateGuard {
    depth: Rc<Cell<usize>>,
}

/// Scoped suppression; releases on drop.
#[derive(Debug)]
#[must_use = "suppression ends as soon as the token is dropped"]
pub struct SuppressionToken {
    depth: Rc<Cell<usize>>,
}

impl DerivedUpdateGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn suppress(&self) -> SuppressionToken {
        self.depth.set(self.depth.get() + 1);
        SuppressionToken {
            depth: Rc::clone(&self.depth),
        }
    }

    #[must_use]
    pub fn is_suppressed(&self) -> bool {
        self.depth.get() > 0
    }
}

impl Drop for SuppressionToken {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::DerivedUpdateGuard;

    #[test]
    fn nested_tokens_release_in_any_order() {
        let guard = DerivedUpdateGuard::new();
        assert!(!guard.is_suppressed());

        let outer = guard.suppress();
        let inner = guard.suppress();
        drop(outer);
        assert!(guard.is_suppressed());
        drop(inner);
        assert!(!guard.is_suppressed());
    }

    #[test]
    fn clones_share_suppression_state() {
        let guard = DerivedUpdateGuard::new();
        let observer = guard.clone();
        let _token = guard.suppress();
        assert!(observer.is_suppressed());
    }
}
