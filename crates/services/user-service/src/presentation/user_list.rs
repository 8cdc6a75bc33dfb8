//! Selectable user list.

use futures::future::join_all;

use common::AppResult;
use domain::User;

use super::image_loader::{ImageLoader, ImageSource};
use crate::service::UserService;

/// One display row per user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            image_url: user.image.clone(),
        }
    }
}

/// A row together with its resolved image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub row: UserRow,
    pub image: ImageSource,
}

/// Resolve every row's image concurrently. Failed images become placeholders.
pub async fn render_rows(rows: Vec<UserRow>, loader: &dyn ImageLoader) -> Vec<RenderedRow> {
    let images = join_all(rows.iter().map(|row| loader.resolve(&row.image_url))).await;
    rows.into_iter()
        .zip(images)
        .map(|(row, image)| RenderedRow { row, image })
        .collect()
}

/// Last-fetched list of users plus the callback fired on selection.
///
/// Starts out not loaded. Each successful refresh replaces the whole list.
pub struct UserList<F>
where
    F: Fn(&User),
{
    users: Option<Vec<User>>,
    on_select: F,
}

impl<F> UserList<F>
where
    F: Fn(&User),
{
    pub fn new(on_select: F) -> Self {
        Self {
            users: None,
            on_select,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.users.is_some()
    }

    /// Replace the displayed list wholesale.
    pub fn replace(&mut self, users: Vec<User>) {
        self.users = Some(users);
    }

    /// Fetch all users and replace the list.
    ///
    /// On failure the previous list stays in place and the error is returned.
    pub async fn refresh(&mut self, service: &dyn UserService) -> AppResult<usize> {
        let users = service.list_users().await?;
        let count = users.len();
        self.replace(users);
        Ok(count)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.users.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn users(&self) -> &[User] {
        self.users.as_deref().unwrap_or(&[])
    }

    pub fn rows(&self) -> Vec<UserRow> {
        self.users().iter().map(UserRow::from).collect()
    }

    /// Rows with their images resolved through `loader`.
    pub async fn render(&self, loader: &dyn ImageLoader) -> Vec<RenderedRow> {
        render_rows(self.rows(), loader).await
    }

    /// Fire the selection callback for the row at `index`.
    ///
    /// Returns `false` when there is no such row.
    pub fn select(&self, index: usize) -> bool {
        match self.users().get(index) {
            Some(user) => {
                (self.on_select)(user);
                true
            }
            None => false,
        }
    }
}
