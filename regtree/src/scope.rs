//! Allocation accounting for a tree and everything displayed from it.
//!
//! Every node record, name, label and item array is charged to the [`Scope`]
//! of the tree it belongs to and released when freed. A limit turns the scope
//! into a bounded arena, which is how allocation failure surfaces; the
//! residual counters are what leak checks look at.

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct Scope {
    limit: Option<usize>,
    used: usize,
    allocations: usize,
}

impl Scope {
    /// An unbounded scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// A scope that refuses to hold more than `bytes` at once.
    pub fn with_limit(bytes: usize) -> Self {
        Self {
            limit: Some(bytes),
            ..Default::default()
        }
    }

    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Bytes currently charged.
    pub fn used(&self) -> usize {
        self.used
    }

    /// Number of live allocations.
    pub fn allocations(&self) -> usize {
        self.allocations
    }

    /// Bytes still available, or `None` for an unbounded scope.
    pub fn remaining(&self) -> Option<usize> {
        self.limit.map(|limit| limit.saturating_sub(self.used))
    }

    /// Record one allocation of `bytes`.
    pub fn charge(&mut self, bytes: usize) -> Result<()> {
        if let Some(remaining) = self.remaining().filter(|&remaining| bytes > remaining) {
            return Err(Error::Exhausted {
                requested: bytes,
                remaining,
            });
        }
        self.used += bytes;
        self.allocations += 1;
        Ok(())
    }

    /// Record the release of one allocation of `bytes`.
    pub fn release(&mut self, bytes: usize) {
        debug_assert!(
            self.allocations > 0 && bytes <= self.used,
            "scope: release of {bytes} bytes without a matching charge"
        );
        self.used = self.used.saturating_sub(bytes);
        self.allocations = self.allocations.saturating_sub(1);
    }

    /// Charged copy of `s`.
    pub fn copy_str(&mut self, s: &str) -> Result<String> {
        self.prefixed("", s)
    }

    /// Charged `prefix` + `s`, released with `release(result.len())`.
    pub fn prefixed(&mut self, prefix: &str, s: &str) -> Result<String> {
        let len = prefix.len() + s.len();
        self.charge(len)?;

        let mut out = String::new();
        if out.try_reserve_exact(len).is_err() {
            self.release(len);
            return Err(Error::OutOfMemory(len));
        }
        out.push_str(prefix);
        out.push_str(s);
        Ok(out)
    }

    /// Charged, empty vector with room for exactly `count` elements.
    ///
    /// Release with `release(Scope::array_bytes::<T>(count))`.
    pub fn array<T>(&mut self, count: usize) -> Result<Vec<T>> {
        let bytes = Self::array_bytes::<T>(count);
        self.charge(bytes)?;

        let mut out = Vec::new();
        if out.try_reserve_exact(count).is_err() {
            self.release(bytes);
            return Err(Error::OutOfMemory(bytes));
        }
        Ok(out)
    }

    pub fn array_bytes<T>(count: usize) -> usize {
        count.saturating_mul(std::mem::size_of::<T>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_scope_counts() {
        let mut scope = Scope::new();
        let name = scope.copy_str("SOFTWARE").unwrap();
        assert_eq!(name, "SOFTWARE");
        assert_eq!(scope.used(), 8);
        assert_eq!(scope.allocations(), 1);
        assert_eq!(scope.remaining(), None);

        scope.release(name.len());
        assert_eq!(scope.used(), 0);
        assert_eq!(scope.allocations(), 0);
    }

    #[test]
    fn test_limit_refuses_oversized_charge() {
        let mut scope = Scope::with_limit(10);
        scope.charge(6).unwrap();
        assert_eq!(
            scope.charge(5),
            Err(Error::Exhausted {
                requested: 5,
                remaining: 4
            })
        );
        // A refused charge leaves the counters alone.
        assert_eq!(scope.used(), 6);
        assert_eq!(scope.allocations(), 1);
    }

    #[test]
    fn test_prefixed_charges_whole_string() {
        let mut scope = Scope::with_limit(5);
        assert_eq!(scope.prefixed("+", "beta").unwrap(), "+beta");
        assert_eq!(scope.remaining(), Some(0));
        assert!(scope.prefixed("+", "").is_err());
    }

    #[test]
    fn test_array_reserves_capacity() {
        let mut scope = Scope::new();
        let v: Vec<u64> = scope.array(4).unwrap();
        assert!(v.capacity() >= 4);
        assert_eq!(scope.used(), 32);
        scope.release(Scope::array_bytes::<u64>(4));
        assert_eq!(scope.used(), 0);
    }
}
