use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated caller, as handed over by the identity provider.
///
/// Name and avatar are copied into every bid, like and comment the actor
/// makes; later profile edits do not rewrite those snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: Uuid,
    pub name: String,
    pub avatar: Option<String>,
}

impl Actor {
    pub fn new(user_id: Uuid, name: impl Into<String>, avatar: Option<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
            avatar,
        }
    }
}
