//! [`ActorEntity`] implementation for [`UserProfile`].

use crate::model::{UserCreate, UserId, UserProfile, UserUpdate};
use crate::user_actor::UserError;
use async_trait::async_trait;
use chrono::Utc;
use document_actor::ActorEntity;
use std::convert::Infallible;

/// Emails are stored trimmed and lowercased so lookups are case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn clean_phone(phone: Option<String>) -> Option<String> {
    phone
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
}

#[async_trait]
impl ActorEntity for UserProfile {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = UserError;

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, UserError> {
        let email = normalize_email(&params.email);
        if !email.contains('@') {
            return Err(UserError::ValidationError(format!(
                "invalid email {:?}",
                params.email
            )));
        }
        let name = match params.name.trim() {
            // Social providers may omit the display name
            "" => email.split('@').next().unwrap_or_default().to_string(),
            name => name.to_string(),
        };
        Ok(Self {
            id,
            name,
            email,
            phone: clean_phone(params.phone),
            photo_url: params.photo_url,
            role: params.role,
            created_at: Utc::now(),
        })
    }

    /// # Fields Updated
    /// - `name`: must not be blank
    /// - `phone`: an empty string clears it
    async fn on_update(&mut self, update: UserUpdate, _: &()) -> Result<(), UserError> {
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(UserError::ValidationError("name is required".into()));
            }
        }
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if update.phone.is_some() {
            self.phone = clean_phone(update.phone);
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: Infallible, _: &()) -> Result<(), UserError> {
        match action {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    fn create(name: &str, email: &str) -> UserCreate {
        UserCreate {
            name: name.into(),
            email: email.into(),
            phone: Some("  ".into()),
            photo_url: None,
            role: Role::Customer,
        }
    }

    #[test]
    fn profile_normalizes_email_and_defaults_name() {
        let profile =
            UserProfile::from_create_params(UserId(1), create("", " Ana@Shop.Test ")).unwrap();
        assert_eq!(profile.email, "ana@shop.test");
        assert_eq!(profile.name, "ana");
        assert_eq!(profile.phone, None);

        assert!(UserProfile::from_create_params(UserId(2), create("Ben", "not-an-email")).is_err());
    }

    #[tokio::test]
    async fn blank_name_edit_is_rejected() {
        let mut profile =
            UserProfile::from_create_params(UserId(1), create("Ana", "ana@shop.test")).unwrap();
        let edit = UserUpdate {
            name: Some(" ".into()),
            phone: Some("0917 555 0101".into()),
        };
        assert!(profile.on_update(edit, &()).await.is_err());
        assert_eq!(profile.phone, None);
        assert_eq!(profile.name, "Ana");
    }
}
