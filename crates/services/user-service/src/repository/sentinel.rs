//! Sentinel-valued view of the user repository.
//!
//! Collapses every outcome into a nullable value or a flag: `None` for
//! value-returning calls and `false` for the rest. Callers cannot tell a
//! missing record from an unreachable store, and an empty collection
//! reads the same as a failed query. Failures are still logged.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use tokio::task::JoinHandle;

use domain::{NewUser, UpdateUser, User};

use super::UserRepository;

/// Nullable/boolean facade over a [`UserRepository`].
#[derive(Clone)]
pub struct SentinelUserRepository {
    repo: Arc<dyn UserRepository>,
}

impl SentinelUserRepository {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// New id, or `None` on failure
    pub async fn insert(&self, user: NewUser) -> Option<String> {
        self.repo
            .insert(user)
            .await
            .map_err(|e| tracing::warn!("insert collapsed to None: {}", e))
            .ok()
    }

    pub async fn update(&self, id: &str, user: UpdateUser) -> bool {
        match self.repo.update(id, user).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("update collapsed to false: {}", e);
                false
            }
        }
    }

    pub async fn update_image(&self, id: &str, file: &Path) -> bool {
        match self.repo.update_image(id, file).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("update_image collapsed to false: {}", e);
                false
            }
        }
    }

    /// The record, or `None` when absent or on any error
    pub async fn get_by_id(&self, id: &str) -> Option<User> {
        self.repo
            .find_by_id(id)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("get_by_id collapsed to None: {}", e);
                None
            })
    }

    /// Every record, or `None` when the collection is empty or on any error
    pub async fn get_all(&self) -> Option<Vec<User>> {
        match self.repo.list().await {
            Ok(users) if !users.is_empty() => Some(users),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("get_all collapsed to None: {}", e);
                None
            }
        }
    }

    pub async fn delete(&self, id: &str) -> bool {
        match self.repo.delete(id).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("delete collapsed to false: {}", e);
                false
            }
        }
    }
}

/// Run a call in the background and hand its single result to `callback`.
///
/// The call is neither cancelled nor deduplicated; issuing the same call
/// twice runs it twice.
pub fn dispatch<T, Fut, C>(call: Fut, callback: C) -> JoinHandle<()>
where
    T: Send + 'static,
    Fut: Future<Output = T> + Send + 'static,
    C: FnOnce(T) + Send + 'static,
{
    tokio::spawn(async move {
        let value = call.await;
        callback(value);
    })
}

#[cfg(test)]
mod tests {
    use tokio::sync::oneshot;

    use super::*;
    use crate::repository::MockUserRepository;
    use common::AppError;

    fn sentinel(repo: MockUserRepository) -> SentinelUserRepository {
        SentinelUserRepository::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_empty_and_failed_get_all_look_the_same() {
        let mut empty = MockUserRepository::new();
        empty.expect_list().returning(|| Ok(vec![]));

        let mut failing = MockUserRepository::new();
        failing
            .expect_list()
            .returning(|| Err(AppError::store_unreachable("offline")));

        assert_eq!(sentinel(empty).get_all().await, None);
        assert_eq!(sentinel(failing).get_all().await, None);
    }

    #[tokio::test]
    async fn test_missing_and_failed_get_by_id_look_the_same() {
        let mut missing = MockUserRepository::new();
        missing.expect_find_by_id().returning(|_| Ok(None));

        let mut failing = MockUserRepository::new();
        failing
            .expect_find_by_id()
            .returning(|_| Err(AppError::PermissionDenied));

        assert_eq!(sentinel(missing).get_by_id("x").await, None);
        assert_eq!(sentinel(failing).get_by_id("x").await, None);
    }

    #[tokio::test]
    async fn test_boolean_operations() {
        let mut repo = MockUserRepository::new();
        repo.expect_update().returning(|_, _| Ok(()));
        repo.expect_delete()
            .returning(|_| Err(AppError::store_unreachable("offline")));
        repo.expect_update_image()
            .returning(|_, _| Err(AppError::url_fetch_failed("no url")));
        let repo = sentinel(repo);

        assert!(repo.update("x", UpdateUser::new("a", "b")).await);
        assert!(!repo.delete("x").await);
        assert!(!repo.update_image("x", Path::new("photo.png")).await);
    }

    #[tokio::test]
    async fn test_dispatch_delivers_single_value() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert()
            .times(1)
            .returning(|_| Ok("abc123".to_string()));
        let repo = sentinel(repo);

        let (tx, rx) = oneshot::channel();
        let call = {
            let repo = repo.clone();
            async move { repo.insert(NewUser::new("John Doe", "john@example.com")).await }
        };
        let handle = dispatch(call, move |id| {
            let _ = tx.send(id);
        });

        handle.await.unwrap();
        assert_eq!(rx.await.unwrap(), Some("abc123".to_string()));
    }
}
