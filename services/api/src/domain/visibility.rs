//! Read access to media.
//!
//! | tier         | anonymous | owner | other | other following owner |
//! |--------------|-----------|-------|-------|-----------------------|
//! | public       | allow     | allow | allow | allow                 |
//! | follower     | deny      | allow | deny  | allow                 |
//! | unrecognised | deny      | deny  | deny  | deny                  |

use uuid::Uuid;

use rmuse_domain::media::Permission;

use crate::domain::repository::FollowRepository;
use crate::domain::types::{Medium, User};
use crate::error::ApiError;

/// Decision before consulting the follow graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
    /// Allowed iff `follower` follows the medium's owner.
    IfFollowing { follower: Uuid },
}

pub fn access(requester: Option<&User>, medium: &Medium) -> Access {
    match (medium.tier(), requester) {
        (None, _) => Access::Deny,
        (Some(Permission::Public), _) => Access::Allow,
        (Some(Permission::Follower), None) => Access::Deny,
        (Some(Permission::Follower), Some(user)) if user.id == medium.user_id => Access::Allow,
        (Some(Permission::Follower), Some(user)) => Access::IfFollowing { follower: user.id },
    }
}

pub async fn can_read<F: FollowRepository>(
    follows: &F,
    requester: Option<&User>,
    medium: &Medium,
) -> Result<bool, ApiError> {
    match access(requester, medium) {
        Access::Allow => Ok(true),
        Access::Deny => Ok(false),
        Access::IfFollowing { follower } => follows.is_following(follower, medium.user_id).await,
    }
}
