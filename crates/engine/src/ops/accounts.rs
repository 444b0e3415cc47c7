//! Registration, login and token verification.

use sea_orm::{QueryFilter, prelude::*};

use crate::{EngineError, ResultEngine, auth, users, users::User};

use super::{Engine, validate_email};

impl Engine {
    /// Registers a new user and returns a fresh token plus the created
    /// record.
    ///
    /// Email uniqueness is an exact, case-sensitive match.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> ResultEngine<(String, User)> {
        let email = validate_email(email)?;

        let existing = users::Entity::find()
            .filter(users::Column::Email.eq(email.clone()))
            .one(self.database())
            .await?;
        if existing.is_some() {
            return Err(EngineError::DuplicateEmail(email));
        }

        let user = User::new(email, name.to_string());
        let password_hash = auth::hash_password(password)?;
        users::Model::active(&user, password_hash)
            .insert(self.database())
            .await?;

        let token = self.auth().issue_token(&user.id, &user.email)?;
        Ok((token, user))
    }

    /// Checks credentials and returns a fresh token.
    ///
    /// Unknown email and wrong password both come back as
    /// [`EngineError::InvalidCredentials`] so callers cannot tell which
    /// one failed.
    pub async fn login(&self, email: &str, password: &str) -> ResultEngine<(String, User)> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(self.database())
            .await?
            .ok_or(EngineError::InvalidCredentials)?;

        if !auth::verify_password(password, &model.password_hash) {
            return Err(EngineError::InvalidCredentials);
        }

        let token = self.auth().issue_token(&model.id, &model.email)?;
        Ok((token, model.into()))
    }

    /// Stateless token check; no store access.
    pub fn verify_token(&self, token: &str) -> ResultEngine<String> {
        self.auth().verify_token(token)
    }

    /// Looks up a user by id, for callers that already hold a verified
    /// token.
    pub async fn user(&self, user_id: &str) -> ResultEngine<User> {
        users::Entity::find_by_id(user_id)
            .one(self.database())
            .await?
            .map(User::from)
            .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))
    }
}
