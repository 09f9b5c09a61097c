//! Process-wide thunk cache
//!
//! Each cache slot moves `Uncompiled -> Compiled` exactly once. The warm
//! path is a shard read plus an `Arc` downcast; the cold path takes the
//! slot's entry lock for the duration of the single compile step, so
//! concurrent first use of one signature performs exactly one compile and
//! the losers reuse the stored thunk.

use crate::error::InvokeError;
use crate::key::{MemberKey, ThunkKey};
use crate::thunk::{InstanceThunk, StaticThunk};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use rustc_hash::FxHasher;
use std::any::Any;
use std::hash::BuildHasherDefault;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

type Shared = Arc<dyn Any + Send + Sync>;
type FxBuildHasher = BuildHasherDefault<FxHasher>;

static GLOBAL: Lazy<ThunkCache> = Lazy::new(ThunkCache::new);

/// Shared cache of compiled invocation thunks, keyed by member signature.
///
/// Accessor instances never own thunks; the cache is a function of the
/// member signature, not of the wrapped object. The process-wide instance
/// lives behind [`ThunkCache::global`]; separate instances exist only so
/// tests can observe an isolated cache.
pub struct ThunkCache {
    thunks: DashMap<ThunkKey, Shared, FxBuildHasher>,
    compiles: AtomicU64,
    uncached: AtomicU64,
}

impl ThunkCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            thunks: DashMap::with_hasher(FxBuildHasher::default()),
            compiles: AtomicU64::new(0),
            uncached: AtomicU64::new(0),
        }
    }

    /// The process-wide cache used by generated accessors.
    pub fn global() -> &'static ThunkCache {
        &GLOBAL
    }

    /// Fetch or compile the thunk for an instance member of `T`.
    ///
    /// `compile` runs at most once per distinct signature for the lifetime
    /// of the process.
    pub fn instance<T, A, R, F>(
        &self,
        member: &'static MemberKey,
        compile: F,
    ) -> Result<Arc<InstanceThunk<T, A, R>>, InvokeError>
    where
        T: 'static,
        A: 'static,
        R: 'static,
        F: FnOnce() -> Box<dyn Fn(&mut T, A) -> R + Send + Sync>,
    {
        let key = ThunkKey::of::<T>(member);
        let slot = self.fetch_or_compile(key, member, move || {
            Arc::new(InstanceThunk::new(compile())) as Shared
        })?;
        slot.downcast::<InstanceThunk<T, A, R>>()
            .map_err(|_| InvokeError::ShapeMismatch {
                member: member.name.to_string(),
            })
    }

    /// Fetch or compile the thunk for a static member or constructor of
    /// declaring type `T` (`T` contributes only the key).
    pub fn static_member<T, A, R, F>(
        &self,
        member: &'static MemberKey,
        compile: F,
    ) -> Result<Arc<StaticThunk<A, R>>, InvokeError>
    where
        T: ?Sized + 'static,
        A: 'static,
        R: 'static,
        F: FnOnce() -> Box<dyn Fn(A) -> R + Send + Sync>,
    {
        let key = ThunkKey::of::<T>(member);
        let slot = self.fetch_or_compile(key, member, move || {
            Arc::new(StaticThunk::new(compile())) as Shared
        })?;
        slot.downcast::<StaticThunk<A, R>>()
            .map_err(|_| InvokeError::ShapeMismatch {
                member: member.name.to_string(),
            })
    }

    /// Fallback for member shapes that cannot be keyed (open generic
    /// parameters, lifetimes): run the access per-call, uncached.
    pub fn invoke_uncached<R>(&self, access: impl FnOnce() -> R) -> R {
        self.note_uncached();
        access()
    }

    /// Record an uncached invocation performed inline by the wrapper
    /// (async bodies cannot run inside a closure handed to the engine).
    pub fn note_uncached(&self) {
        self.uncached.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of compile steps executed so far.
    pub fn compile_count(&self) -> u64 {
        self.compiles.load(Ordering::Relaxed)
    }

    /// Number of uncached invocations so far.
    pub fn uncached_count(&self) -> u64 {
        self.uncached.load(Ordering::Relaxed)
    }

    /// Number of compiled thunks currently cached.
    pub fn len(&self) -> usize {
        self.thunks.len()
    }

    /// Whether no thunk has been compiled yet.
    pub fn is_empty(&self) -> bool {
        self.thunks.is_empty()
    }

    /// Drop all cached thunks (test support; slots recompile on next use).
    pub fn clear(&self) {
        self.thunks.clear();
    }

    fn fetch_or_compile(
        &self,
        key: ThunkKey,
        member: &'static MemberKey,
        compile: impl FnOnce() -> Shared,
    ) -> Result<Shared, InvokeError> {
        // Warm path: shard read lock only.
        if let Some(entry) = self.thunks.get(&key) {
            return Ok(entry.value().clone());
        }
        // Cold path: the entry lock is held across the compile step, so a
        // racing thread waits here and takes the occupied arm.
        match self.thunks.entry(key) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(vacant) => {
                self.compiles.fetch_add(1, Ordering::Relaxed);
                let thunk = panic::catch_unwind(AssertUnwindSafe(compile)).map_err(|payload| {
                    InvokeError::CompileFailed {
                        member: member.name.to_string(),
                        cause: panic_message(payload),
                    }
                })?;
                Ok(vacant.insert(thunk).value().clone())
            }
        }
    }
}

impl Default for ThunkCache {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::MemberKind;

    struct Counter {
        value: i32,
    }

    static BUMP: MemberKey = MemberKey::new(MemberKind::Method, "bump", "i32", false);
    static TOTAL: MemberKey = MemberKey::new(MemberKind::Method, "total", "", true);

    #[test]
    fn test_compile_once_then_reuse() {
        let cache = ThunkCache::new();
        for i in 0..3 {
            let thunk = cache
                .instance::<Counter, (i32,), i32, _>(&BUMP, || {
                    Box::new(|target, (delta,)| {
                        target.value += delta;
                        target.value
                    })
                })
                .unwrap();
            let mut counter = Counter { value: 0 };
            assert_eq!(thunk.call(&mut counter, (i,)), i);
        }
        assert_eq!(cache.compile_count(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_static_and_instance_slots_are_distinct() {
        let cache = ThunkCache::new();
        cache
            .instance::<Counter, (i32,), i32, _>(&BUMP, || {
                Box::new(|target, (delta,)| {
                    target.value += delta;
                    target.value
                })
            })
            .unwrap();
        cache
            .static_member::<Counter, (), i32, _>(&TOTAL, || Box::new(|()| 7))
            .unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.compile_count(), 2);
    }

    #[test]
    fn test_compile_panic_surfaces_with_cause() {
        let cache = ThunkCache::new();
        let result = cache.instance::<Counter, (), i32, _>(&BUMP, || panic!("no such member"));
        match result {
            Err(InvokeError::CompileFailed { member, cause }) => {
                assert_eq!(member, "bump");
                assert_eq!(cause, "no such member");
            }
            other => panic!("expected CompileFailed, got {other:?}"),
        }
        // The slot stays uncompiled; a later, working compile succeeds.
        assert!(cache.is_empty());
        let thunk = cache
            .instance::<Counter, (), i32, _>(&BUMP, || Box::new(|target, ()| target.value))
            .unwrap();
        let mut counter = Counter { value: 9 };
        assert_eq!(thunk.call(&mut counter, ()), 9);
    }

    #[test]
    fn test_signature_mismatch_is_shape_mismatch() {
        let cache = ThunkCache::new();
        cache
            .instance::<Counter, (), i32, _>(&TOTAL, || Box::new(|target, ()| target.value))
            .unwrap();
        let result =
            cache.instance::<Counter, (), String, _>(&TOTAL, || Box::new(|_, ()| String::new()));
        assert!(matches!(result, Err(InvokeError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_uncached_path_counts_and_forwards() {
        let cache = ThunkCache::new();
        let out = cache.invoke_uncached(|| 21 * 2);
        assert_eq!(out, 42);
        assert_eq!(cache.uncached_count(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear_forces_recompile() {
        let cache = ThunkCache::new();
        cache
            .static_member::<Counter, (), i32, _>(&TOTAL, || Box::new(|()| 1))
            .unwrap();
        cache.clear();
        cache
            .static_member::<Counter, (), i32, _>(&TOTAL, || Box::new(|()| 1))
            .unwrap();
        assert_eq!(cache.compile_count(), 2);
    }
}
