//! Profile store operations. One document per user, replaced wholesale.

use chrono::Utc;
use sea_orm::prelude::*;

use crate::profiles::{self, Profile, ProfileData};
use crate::ResultEngine;

use super::Engine;

impl Engine {
    pub async fn profile(&self, user_id: &str) -> ResultEngine<Option<Profile>> {
        profiles::Entity::find_by_id(user_id)
            .one(self.database())
            .await?
            .map(Profile::try_from)
            .transpose()
    }

    pub async fn save_profile(&self, user_id: &str, data: ProfileData) -> ResultEngine<Profile> {
        let profile = Profile {
            user_id: user_id.to_string(),
            data,
            created_at: Utc::now(),
        };

        let active = profiles::Model::active(&profile)?;
        let existing = profiles::Entity::find_by_id(user_id)
            .one(self.database())
            .await?;
        if existing.is_some() {
            active.update(self.database()).await?;
        } else {
            active.insert(self.database()).await?;
        }
        Ok(profile)
    }
}
