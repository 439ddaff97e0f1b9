//! Read-after-write cache in front of a backend.
//!
//! Listings are cached under an epoch. Any successful mutation bumps the epoch and
//! drops every listing at once, since one mentee edit also changes what the mentor
//! listing embeds.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use log::debug;

use super::{Repository, TagAssignment, TagOwner};
use crate::error::AppResult;
use crate::model::Entity;

struct Listing {
	epoch: u64,
	rows: Rc<dyn Any>,
}

pub struct CachedDirectory<D> {
	inner: D,
	epoch: Cell<u64>,
	listings: RefCell<HashMap<&'static str, Listing>>,
}

impl<D> CachedDirectory<D> {
	pub fn new(inner: D) -> Self {
		Self {
			inner,
			epoch: Cell::new(0),
			listings: RefCell::new(HashMap::new()),
		}
	}

	pub fn epoch(&self) -> u64 {
		self.epoch.get()
	}

	pub fn invalidate(&self) {
		self.epoch.set(self.epoch.get() + 1);
		self.listings.borrow_mut().clear();
		debug!("listing cache invalidated (epoch {})", self.epoch.get());
	}

	fn cached<E: Entity>(&self) -> Option<Vec<E>> {
		let listings = self.listings.borrow();
		let listing = listings.get(E::COLLECTION)?;
		if listing.epoch != self.epoch.get() {
			return None;
		}
		listing.rows.downcast_ref::<Vec<E>>().cloned()
	}

	/// A listing fetched across a mutation is not stored: it may predate the write.
	fn store<E: Entity>(&self, fetched_at: u64, rows: &[E]) {
		if fetched_at != self.epoch.get() {
			return;
		}
		self.listings.borrow_mut().insert(
			E::COLLECTION,
			Listing {
				epoch: fetched_at,
				rows: Rc::new(rows.to_vec()),
			},
		);
	}

	fn after_write<T>(&self, result: AppResult<T>) -> AppResult<T> {
		if result.is_ok() {
			self.invalidate();
		}
		result
	}
}

#[async_trait(?Send)]
impl<D, E> Repository<E> for CachedDirectory<D>
where
	D: Repository<E>,
	E: Entity,
{
	async fn list(&self) -> AppResult<Vec<E>> {
		if let Some(rows) = self.cached::<E>() {
			debug!("serving cached {} listing", E::COLLECTION);
			return Ok(rows);
		}
		let fetched_at = self.epoch.get();
		let rows = Repository::<E>::list(&self.inner).await?;
		self.store(fetched_at, &rows);
		Ok(rows)
	}

	async fn get_by_id(&self, id: &str) -> AppResult<E> {
		Repository::<E>::get_by_id(&self.inner, id).await
	}

	async fn create(&self, draft: E::Draft) -> AppResult<E> {
		self.after_write(Repository::<E>::create(&self.inner, draft).await)
	}

	async fn update(&self, id: &str, draft: E::Draft) -> AppResult<E> {
		self.after_write(Repository::<E>::update(&self.inner, id, draft).await)
	}

	async fn delete(&self, id: &str) -> AppResult<()> {
		self.after_write(Repository::<E>::delete(&self.inner, id).await)
	}
}

#[async_trait(?Send)]
impl<D: TagAssignment> TagAssignment for CachedDirectory<D> {
	async fn assign_tags(&self, owner: &TagOwner, tags: Vec<String>) -> AppResult<Vec<String>> {
		self.after_write(self.inner.assign_tags(owner, tags).await)
	}
}
