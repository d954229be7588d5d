//! In-memory student record store.
//!
//! The store is the single owner of the record set for one running session.
//! Views read it through [`StudentStore::list`] and [`StudentStore::get`] and
//! mutate it only through create, update, and delete.

mod id;
mod students;


pub use id::{IdGenerator, UuidGenerator};
pub use students::StudentStore;
