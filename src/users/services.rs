use tracing::{debug, instrument};
use uuid::Uuid;

use super::{
    error::UserServiceError, model::User, repo::UserRepository, repo_types::UserRecord,
};

pub(crate) fn new_user_id() -> String {
    Uuid::new_v4().to_string()
}

/// Assigns a fresh id, validates the fields and inserts the user.
#[instrument(skip(repo, name, email))]
pub async fn create_user(
    repo: &dyn UserRepository,
    name: Option<&str>,
    email: Option<&str>,
) -> Result<UserRecord, UserServiceError> {
    let id = new_user_id();
    let user = User::new(Some(&id), name, email)?;
    debug!(user_id = %user.id(), "creating user");
    Ok(repo.create(&user).await?)
}

/// Validates the new fields and overwrites the stored user. `None` when no
/// user has this id.
#[instrument(skip(repo, name, email))]
pub async fn update_user(
    repo: &dyn UserRepository,
    id: &str,
    name: Option<&str>,
    email: Option<&str>,
) -> Result<Option<UserRecord>, UserServiceError> {
    let user = User::new(Some(id), name, email)?;
    Ok(repo.update(&user).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::{
        error::StoreErrorKind, memory::InMemoryUserRepository, model::ValidationError,
    };

    #[test]
    fn generated_ids_are_distinct_uuids() {
        let a = new_user_id();
        let b = new_user_id();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let repo = InMemoryUserRepository::new();
        let created = create_user(&repo, Some("John Doe"), Some("john@example.com"))
            .await
            .unwrap();
        assert_eq!(created.name, "John Doe");
        assert_eq!(created.email, "john@example.com");

        let fetched = repo.get_by_id(&created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn create_rejects_invalid_input_without_touching_store() {
        let repo = InMemoryUserRepository::new();
        let err = create_user(&repo, Some("John123"), Some("a@b.com"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            UserServiceError::Validation(ValidationError::InvalidName)
        ));

        let err = create_user(&repo, Some("John Doe"), None).await.unwrap_err();
        assert!(matches!(
            err,
            UserServiceError::Validation(ValidationError::InvalidEmail)
        ));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_changes_fields_and_keeps_id() {
        let repo = InMemoryUserRepository::new();
        let jane = User::new(Some("1"), Some("Jane"), Some("jane@x.com")).unwrap();
        repo.create(&jane).await.unwrap();

        let updated = update_user(&repo, "1", Some("Jane Two"), Some("jane2@x.com"))
            .await
            .unwrap()
            .expect("user exists");
        assert_eq!(updated.id, "1");
        assert_eq!(updated.name, "Jane Two");
        assert_eq!(updated.email, "jane2@x.com");
    }

    #[tokio::test]
    async fn update_of_missing_user_is_none() {
        let repo = InMemoryUserRepository::new();
        for _ in 0..2 {
            let result = update_user(&repo, "999", Some("Nobody"), Some("no@body.com"))
                .await
                .unwrap();
            assert_eq!(result, None);
        }
    }

    #[tokio::test]
    async fn update_validates_before_storage() {
        let repo = InMemoryUserRepository::failing(StoreErrorKind::Connection);
        let err = update_user(&repo, "1", Some("Jane"), Some("nope"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            UserServiceError::Validation(ValidationError::InvalidEmail)
        ));
    }

    #[tokio::test]
    async fn store_errors_pass_through_unchanged() {
        let repo = InMemoryUserRepository::failing(StoreErrorKind::Connection);
        let err = create_user(&repo, Some("Jane"), Some("jane@x.com"))
            .await
            .unwrap_err();
        match err {
            UserServiceError::Store(e) => assert_eq!(e.kind(), StoreErrorKind::Connection),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn duplicate_ids_conflict_exactly_once() {
        let repo = InMemoryUserRepository::new();
        let first = User::new(Some("1"), Some("Jane"), Some("jane@x.com")).unwrap();
        let second = User::new(Some("1"), Some("Janet"), Some("janet@x.com")).unwrap();

        let (a, b) = tokio::join!(repo.create(&first), repo.create(&second));
        let conflicts = [a.as_ref().err(), b.as_ref().err()]
            .into_iter()
            .flatten()
            .filter(|e| e.is_unique_violation())
            .count();
        assert_eq!(conflicts, 1);
        assert_eq!(u8::from(a.is_ok()) + u8::from(b.is_ok()), 1);
    }

    #[tokio::test]
    async fn delete_on_empty_store_is_none() {
        let repo = InMemoryUserRepository::new();
        assert_eq!(repo.delete_by_id("999").await.unwrap(), None);
        assert_eq!(repo.get_by_id("999").await.unwrap(), None);
    }
}
