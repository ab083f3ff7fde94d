use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local user store.
///
/// Enforces the same uniqueness rules as the `users` table. Used by tests
/// and for running the service without a database.
#[derive(Default)]
pub struct InMemoryUserRepository {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    last_id: i64,
    users: BTreeMap<i64, User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut state = self.state.write().await;

        if state.users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        if state.users.values().any(|u| u.username == user.username) {
            return Err(UserError::UsernameAlreadyExists(user.username.to_string()));
        }

        state.last_id += 1;
        let created = User {
            id: UserId(state.last_id),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        state.users.insert(created.id.0, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.state.read().await.users.get(&id.0).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| &u.email == email).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let state = self.state.read().await;
        Ok(state.users.values().rev().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::models::Username;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: Username::new(username.to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repository = InMemoryUserRepository::new();

        let first = repository.create(new_user("alice", "a@x.com")).await.unwrap();
        let second = repository.create(new_user("bob", "b@x.com")).await.unwrap();

        assert_eq!(first.id, UserId(1));
        assert_eq!(second.id, UserId(2));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_structured_conflict() {
        let repository = InMemoryUserRepository::new();
        repository.create(new_user("alice", "a@x.com")).await.unwrap();

        let result = repository.create(new_user("alice2", "a@x.com")).await;
        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_structured_conflict() {
        let repository = InMemoryUserRepository::new();
        repository.create(new_user("alice", "a@x.com")).await.unwrap();

        let result = repository.create(new_user("alice", "other@x.com")).await;
        assert!(matches!(result, Err(UserError::UsernameAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_lookups() {
        let repository = InMemoryUserRepository::new();
        let created = repository.create(new_user("alice", "a@x.com")).await.unwrap();

        let by_id = repository.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(by_id.username.as_str(), "alice");

        let email = EmailAddress::new("a@x.com".to_string()).unwrap();
        let by_email = repository.find_by_email(&email).await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);

        let missing = EmailAddress::new("nobody@x.com".to_string()).unwrap();
        assert!(repository.find_by_email(&missing).await.unwrap().is_none());
        assert!(repository.find_by_id(&UserId(42)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_all_newest_first() {
        let repository = InMemoryUserRepository::new();
        repository.create(new_user("alice", "a@x.com")).await.unwrap();
        repository.create(new_user("bob", "b@x.com")).await.unwrap();

        let users = repository.list_all().await.unwrap();
        let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["bob", "alice"]);
    }
}
