//! Email subscriber persistence port.
//!
//! Subscribers are unique by email address.

use async_trait::async_trait;

use crate::domain::engagement::EmailSubscriber;
use crate::domain::foundation::{DomainError, SubscriberId};

#[async_trait]
pub trait SubscriberRepository: Send + Sync {
    /// Inserts the subscriber, overwriting any existing row with the same email.
    ///
    /// Returns the id of the stored row, which is the existing id on conflict.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn upsert(&self, subscriber: &EmailSubscriber) -> Result<SubscriberId, DomainError>;

    /// Plain insert.
    ///
    /// # Errors
    ///
    /// - `DuplicateEmail` when the address is already stored
    /// - `DatabaseError` on any other persistence failure
    async fn insert(&self, subscriber: &EmailSubscriber) -> Result<SubscriberId, DomainError>;
}
