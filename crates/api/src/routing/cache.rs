//! Lookup-key to tenant-id cache
//!
//! Only the id a key resolved to is remembered. Callers re-read the tenant
//! record by id, so status and privacy changes take effect on the next
//! request instead of after the TTL.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tenantgate_shared::{Tenant, TenantId};

/// What a lookup key resolved to when it was last asked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachedLookup {
    Tenant(TenantId),
    /// The key matched no tenant
    Missing,
}

impl From<Option<&Tenant>> for CachedLookup {
    fn from(tenant: Option<&Tenant>) -> Self {
        tenant.map_or(Self::Missing, |t| Self::Tenant(t.id))
    }
}

struct Slot {
    lookup: CachedLookup,
    stored_at: Instant,
}

/// Thread-safe TTL map from lookup keys to tenant ids
pub struct TenantCache {
    slots: RwLock<HashMap<String, Slot>>,
    ttl: Duration,
}

impl TenantCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    fn is_fresh(&self, slot: &Slot) -> bool {
        slot.stored_at.elapsed() < self.ttl
    }

    /// `None` when the key was never stored or its slot has expired
    pub fn lookup(&self, key: &str) -> Option<CachedLookup> {
        let slots = self.slots.read().ok()?;
        slots
            .get(key)
            .filter(|slot| self.is_fresh(slot))
            .map(|slot| slot.lookup)
    }

    pub fn remember(&self, key: &str, lookup: CachedLookup) {
        if let Ok(mut slots) = self.slots.write() {
            slots.insert(
                key.to_string(),
                Slot {
                    lookup,
                    stored_at: Instant::now(),
                },
            );
        }
    }

    pub fn forget(&self, key: &str) {
        if let Ok(mut slots) = self.slots.write() {
            slots.remove(key);
        }
    }

    /// Drops expired slots, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let Ok(mut slots) = self.slots.write() else {
            return 0;
        };
        let before = slots.len();
        slots.retain(|_, slot| slot.stored_at.elapsed() < self.ttl);
        before - slots.len()
    }
}
