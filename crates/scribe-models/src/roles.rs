use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A named privilege tier. Higher `level` means more privilege.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub level: i32,
    pub description: String,
}

impl Role {
    /// Whether a holder of this role meets `required`.
    pub fn satisfies(&self, required: &Role) -> bool {
        self.level >= required.level
    }
}

/// Names of the roles seeded by the initial migration.
pub mod system_roles {
    pub const USER: &str = "user";
    pub const MODERATOR: &str = "moderator";
    pub const ADMIN: &str = "admin";

    /// `(name, level, description)` for every seeded role.
    pub const SEEDED: [(&str, i32, &str); 3] = [
        (USER, 1, "A user can create posts and comments"),
        (MODERATOR, 2, "A moderator can update other users' posts"),
        (ADMIN, 3, "An admin can update and delete other users' posts"),
    ];
}
