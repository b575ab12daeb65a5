use crate::api::errors::ApiError;
use crate::entities::{UserId, UserRole};
use crate::relation::RelationError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AssignServiceError {
    #[error("admin access only")]
    AdminOnly,

    #[error("select {} first", .0.with_article())]
    NoBossSelected(UserRole),

    #[error("nothing selected")]
    NothingSelected,

    #[error("user {0} not found")]
    UnknownUser(UserId),

    #[error("user {0} is inactive and cannot be assigned")]
    InactiveUser(UserId),

    #[error("user {id} is {} and cannot hold assignments", .role.with_article())]
    NotABoss { id: UserId, role: UserRole },

    #[error("invalid assignment of user {child_id}: {source}")]
    InvalidEdge {
        child_id: UserId,
        #[source]
        source: RelationError,
    },

    #[error(transparent)]
    Api(#[from] ApiError),
}
