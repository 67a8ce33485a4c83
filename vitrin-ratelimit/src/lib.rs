//! Fixed-window request rate governor.
//!
//! Admission control runs before any data access: each call is counted
//! against a fixed window keyed by (caller identity, route class), with
//! stricter ceilings on sensitive routes like login. Fixed windows trade
//! smoothness for O(1) memory and update cost per key. A caller can burst
//! up to twice the ceiling across a window edge, and that is accepted
//! behavior, not a bug to smooth away.
//!
//! Windows are reset lazily when their key is next touched; nothing sweeps
//! stale entries, since window lengths are short and staleness is bounded.

use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::warn;

/// Classes of routes sharing one ceiling each.
///
/// Sensitive routes get their own, stricter windows; everything else is
/// governed by the coarse general ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteClass {
    /// Ordinary catalog/content traffic.
    General,
    /// Login attempts.
    Login,
    /// Account registration.
    Register,
}

impl RouteClass {
    /// Default policy for this class.
    #[must_use]
    pub fn default_policy(self) -> RoutePolicy {
        match self {
            Self::General => RoutePolicy::new(100, Duration::from_secs(60)),
            Self::Login => RoutePolicy::new(5, Duration::from_secs(60)),
            Self::Register => RoutePolicy::new(3, Duration::from_secs(600)),
        }
    }
}

impl std::fmt::Display for RouteClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::General => "general",
            Self::Login => "login",
            Self::Register => "register",
        };
        f.write_str(name)
    }
}

/// Ceiling and window length for one route class.
#[derive(Debug, Clone, Copy)]
pub struct RoutePolicy {
    /// Maximum admitted calls per window.
    pub ceiling: u32,
    /// Window length.
    pub window: Duration,
}

impl RoutePolicy {
    #[must_use]
    pub const fn new(ceiling: u32, window: Duration) -> Self {
        Self { ceiling, window }
    }
}

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The call is admitted.
    Allow,
    /// The call is rejected; retry after the current window ends.
    Deny { retry_after: Duration },
}

impl Decision {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

struct Window {
    started: Instant,
    count: u32,
}

/// Fixed-window counters shared across all callers.
///
/// State is keyed by (identity, route class); every entry's check-and-count
/// runs under that key's own map lock, so unrelated callers never contend.
pub struct RateGovernor {
    general: RoutePolicy,
    login: RoutePolicy,
    register: RoutePolicy,
    windows: DashMap<(String, RouteClass), Window>,
}

impl RateGovernor {
    /// Governor with the default per-class policies.
    #[must_use]
    pub fn new() -> Self {
        Self {
            general: RouteClass::General.default_policy(),
            login: RouteClass::Login.default_policy(),
            register: RouteClass::Register.default_policy(),
            windows: DashMap::new(),
        }
    }

    /// Overrides the policy for one route class.
    #[must_use]
    pub fn with_policy(mut self, route: RouteClass, policy: RoutePolicy) -> Self {
        match route {
            RouteClass::General => self.general = policy,
            RouteClass::Login => self.login = policy,
            RouteClass::Register => self.register = policy,
        }
        self
    }

    /// The policy in effect for a route class.
    #[must_use]
    pub fn policy(&self, route: RouteClass) -> RoutePolicy {
        match route {
            RouteClass::General => self.general,
            RouteClass::Login => self.login,
            RouteClass::Register => self.register,
        }
    }

    /// Checks and counts one call for `identity` on `route`.
    ///
    /// A first call, or a call after the previous window expired, starts a
    /// fresh window with count 1 and is allowed; absent prior state is the
    /// normal case, not an error.
    pub fn admit(&self, identity: &str, route: RouteClass) -> Decision {
        self.admit_at(identity, route, Instant::now())
    }

    /// [`RateGovernor::admit`] with the clock injected, for deterministic
    /// tests and replay.
    pub fn admit_at(&self, identity: &str, route: RouteClass, now: Instant) -> Decision {
        let policy = self.policy(route);
        let mut entry = self
            .windows
            .entry((identity.to_string(), route))
            .or_insert_with(|| Window {
                started: now,
                count: 0,
            });

        let window = entry.value_mut();
        if now.saturating_duration_since(window.started) >= policy.window {
            // Lazy reset: the old window expired, reuse the slot.
            window.started = now;
            window.count = 0;
        }

        window.count = window.count.saturating_add(1);
        if window.count <= policy.ceiling {
            Decision::Allow
        } else {
            let elapsed = now.saturating_duration_since(window.started);
            let retry_after = policy.window.saturating_sub(elapsed);
            warn!(
                identity,
                route = %route,
                count = window.count,
                ceiling = policy.ceiling,
                retry_after_ms = retry_after.as_millis() as u64,
                "rate limit exceeded"
            );
            Decision::Deny { retry_after }
        }
    }

    /// Number of tracked (identity, route) windows, stale ones included.
    #[must_use]
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }
}

impl Default for RateGovernor {
    fn default() -> Self {
        Self::new()
    }
}
