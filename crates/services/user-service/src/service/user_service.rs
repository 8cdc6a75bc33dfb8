//! User service - Handles user-related business logic.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use common::{AppResult, OptionExt};
use domain::{NewUser, UpdateUser, User};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID
    async fn get_user(&self, id: &str) -> AppResult<User>;

    /// List all users. An empty collection is `Ok(vec![])`.
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Create a new user, returning the store-assigned id
    async fn create_user(&self, user: NewUser) -> AppResult<String>;

    /// Update name and email
    async fn update_user(&self, id: &str, user: UpdateUser) -> AppResult<()>;

    /// Upload a profile image and link it, returning its URL
    async fn update_user_image(&self, id: &str, file: &Path) -> AppResult<String>;

    /// Delete user
    async fn delete_user(&self, id: &str) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_user(&self, id: &str) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list().await
    }

    async fn create_user(&self, user: NewUser) -> AppResult<String> {
        user.check()?;
        self.repo.insert(user).await
    }

    async fn update_user(&self, id: &str, user: UpdateUser) -> AppResult<()> {
        user.check()?;
        self.repo.update(id, user).await
    }

    async fn update_user_image(&self, id: &str, file: &Path) -> AppResult<String> {
        self.repo.update_image(id, file).await
    }

    async fn delete_user(&self, id: &str) -> AppResult<()> {
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::repository::MockUserRepository;
    use common::AppError;

    fn create_test_user(id: &str) -> User {
        User::new(id, "Test User", "test@example.com")
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq("abc123"))
            .returning(|id| Ok(Some(create_test_user(id))));

        let service = UserManager::new(Arc::new(repo));
        let result = service.get_user("abc123").await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().id, "abc123");
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = UserManager::new(Arc::new(repo));
        let result = service.get_user("missing").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound));
    }

    #[tokio::test]
    async fn test_list_users_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .returning(|| Ok(vec![create_test_user("a"), create_test_user("b")]));

        let service = UserManager::new(Arc::new(repo));
        let result = service.list_users().await;

        assert_eq!(result.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_user_rejects_blank_name() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert().never();

        let service = UserManager::new(Arc::new(repo));
        let result = service.create_user(NewUser::new("", "a@b.c")).await;

        assert!(matches!(result, Err(AppError::Validation(msg)) if msg == "Name is required"));
    }

    #[tokio::test]
    async fn test_update_user_rejects_blank_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_update().never();

        let service = UserManager::new(Arc::new(repo));
        let result = service
            .update_user("abc123", UpdateUser::new("Jane", ""))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_user_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete().with(eq("abc123")).returning(|_| Ok(()));

        let service = UserManager::new(Arc::new(repo));
        tokio_test::assert_ok!(service.delete_user("abc123").await);
    }
}
