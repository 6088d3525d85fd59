//! Depth/counter policy for paginated listing walks
//!
//! Each hierarchy level gets its own [`DepthPolicy`] instance for the run,
//! constructed by the pipeline and passed by reference into walks. Counters
//! are keyed by branch key (a listing page's heading text, or the empty
//! string where a level shares one run-wide counter) and only ever grow.

use std::collections::HashMap;
use std::sync::Mutex;

/// How many listing pages may be followed for one branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthCap {
    /// Follow next-page links forever
    Unlimited,

    /// Visit at most this many pages per branch (1 = first page only)
    Pages(u64),
}

impl DepthCap {
    /// Maps a raw config value to a cap: negative means unlimited
    pub fn from_config(raw: i64) -> Self {
        if raw < 0 {
            DepthCap::Unlimited
        } else {
            DepthCap::Pages(raw as u64)
        }
    }
}

/// Tracks pages-followed per branch and decides whether a walk may continue
///
/// Counters are behind a mutex because walks for different branches may run
/// concurrently. A race between [`should_continue`](Self::should_continue)
/// and [`increment`](Self::increment) on the same key can over-fetch by at
/// most one page past the cap; it can never cut a branch short.
#[derive(Debug)]
pub struct DepthPolicy {
    cap: DepthCap,
    counters: Mutex<HashMap<String, u64>>,
}

impl DepthPolicy {
    pub fn new(cap: DepthCap) -> Self {
        Self {
            cap,
            counters: Mutex::new(HashMap::new()),
        }
    }

    /// Whether the walker may follow a next-page link for this branch
    ///
    /// The first page of a branch is page one of its budget, and the walker
    /// asks before visiting each continuation page, so a cap of N permits N
    /// pages total: with the counter at c, continuing is allowed while
    /// `c + 1 < N`. A cap of 1 never follows a next-page link.
    pub fn should_continue(&self, branch_key: &str) -> bool {
        match self.cap {
            DepthCap::Unlimited => true,
            DepthCap::Pages(cap) => {
                let counters = self.counters.lock().unwrap();
                let followed = counters.get(branch_key).copied().unwrap_or(0);
                followed + 1 < cap
            }
        }
    }

    /// Records that one more continuation page was followed for this branch
    pub fn increment(&self, branch_key: &str) {
        let mut counters = self.counters.lock().unwrap();
        *counters.entry(branch_key.to_string()).or_insert(0) += 1;
    }

    /// Continuation pages followed so far for this branch
    pub fn pages_followed(&self, branch_key: &str) -> u64 {
        let counters = self.counters.lock().unwrap();
        counters.get(branch_key).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited_always_continues() {
        let policy = DepthPolicy::new(DepthCap::Unlimited);
        for _ in 0..100 {
            assert!(policy.should_continue("branch"));
            policy.increment("branch");
        }
    }

    #[test]
    fn test_cap_of_one_never_follows() {
        let policy = DepthPolicy::new(DepthCap::Pages(1));
        assert!(!policy.should_continue("branch"));
    }

    #[test]
    fn test_cap_of_three_follows_twice() {
        let policy = DepthPolicy::new(DepthCap::Pages(3));

        // Page 1 -> page 2
        assert!(policy.should_continue("branch"));
        policy.increment("branch");

        // Page 2 -> page 3
        assert!(policy.should_continue("branch"));
        policy.increment("branch");

        // Page 3 -> page 4 would exceed the cap
        assert!(!policy.should_continue("branch"));
        assert_eq!(policy.pages_followed("branch"), 2);
    }

    #[test]
    fn test_branches_have_independent_budgets() {
        let policy = DepthPolicy::new(DepthCap::Pages(2));

        assert!(policy.should_continue("rome"));
        policy.increment("rome");
        assert!(!policy.should_continue("rome"));

        // Exhausting "rome" leaves "milan" untouched
        assert!(policy.should_continue("milan"));
    }

    #[test]
    fn test_same_key_shares_one_counter() {
        let policy = DepthPolicy::new(DepthCap::Pages(2));

        policy.increment("rome");

        // A second page claiming the same branch key sees the same budget
        assert!(!policy.should_continue("rome"));
    }

    #[test]
    fn test_empty_key_is_a_valid_branch() {
        let policy = DepthPolicy::new(DepthCap::Pages(2));

        assert!(policy.should_continue(""));
        policy.increment("");
        assert!(!policy.should_continue(""));
    }

    #[test]
    fn test_from_config_mapping() {
        assert_eq!(DepthCap::from_config(-1), DepthCap::Unlimited);
        assert_eq!(DepthCap::from_config(0), DepthCap::Pages(0));
        assert_eq!(DepthCap::from_config(4), DepthCap::Pages(4));
    }
}
