//! Process-wide type activation cache.
//!
//! # Concurrency
//!
//! * Reads are lock-free: an `ArcSwap` load of the current map snapshot.
//! * A miss takes the insertion lock, re-checks the latest snapshot, builds the
//!   [`ConstructorSet`] and publishes a new snapshot containing it.
//! * Published sets are immutable, so a reader never observes a partial set,
//!   and at most one set is ever installed per type.
//!
//! The insertion lock is one per cache, not one per type: first builds of two
//! different types run one after the other. It is held only while one set is
//! built, and building compiles descriptor wrappers without running a
//! registered constructor. Lookups of already published sets never wait on it.
//!
//! Zero-value fallbacks come from [`DefaultValueTable::global`].

use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::config::ActivatorOptions;
use crate::ctor::ConstructorSet;
use crate::defaults::DefaultValueTable;
use crate::key::TypeKey;
use crate::registry::TypeRegistry;

type SetMap = FxHashMap<TypeKey, Arc<ConstructorSet>>;

/// Lazily populated map from type identity to its [`ConstructorSet`].
///
/// Entries are never evicted.
pub struct ActivationCache {
	sets: ArcSwap<SetMap>,
	insert_lock: Mutex<()>,
	registry: Arc<TypeRegistry>,
	options: ActivatorOptions,
}

impl ActivationCache {
	pub fn new(registry: Arc<TypeRegistry>, options: ActivatorOptions) -> Self {
		Self {
			sets: ArcSwap::from_pointee(SetMap::default()),
			insert_lock: Mutex::new(()),
			registry,
			options,
		}
	}

	pub fn registry(&self) -> &TypeRegistry {
		&self.registry
	}

	pub fn options(&self) -> &ActivatorOptions {
		&self.options
	}

	/// Installed set for `ty`, if it has been built.
	pub fn get(&self, ty: TypeKey) -> Option<Arc<ConstructorSet>> {
		self.sets.load().get(&ty).cloned()
	}

	/// Returns the set for `ty`, building and publishing it on first use.
	pub fn get_or_build(&self, ty: TypeKey) -> Arc<ConstructorSet> {
		if let Some(set) = self.get(ty) {
			return set;
		}

		let _guard = self.insert_lock.lock();
		let current = self.sets.load_full();
		if let Some(set) = current.get(&ty) {
			return Arc::clone(set);
		}

		let set = Arc::new(ConstructorSet::build(ty, &self.registry, DefaultValueTable::global(), &self.options));
		let mut next = SetMap::clone(&current);
		next.insert(ty, Arc::clone(&set));
		self.sets.store(Arc::new(next));
		tracing::trace!(ty = ty.name(), cached = current.len() + 1, "published constructor set");
		set
	}

	pub fn contains(&self, ty: TypeKey) -> bool {
		self.sets.load().contains_key(&ty)
	}

	/// Number of installed sets.
	pub fn len(&self) -> usize {
		self.sets.load().len()
	}

	pub fn is_empty(&self) -> bool {
		self.sets.load().is_empty()
	}
}
