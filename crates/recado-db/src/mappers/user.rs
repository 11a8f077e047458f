//! User entity <-> model mapper

use recado_core::entities::User;
use recado_core::value_objects::Snowflake;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            email: model.email,
            full_name: model.full_name,
            avatar_url: model.avatar_url,
            profile_description: model.profile_description,
            theme: model.theme,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
