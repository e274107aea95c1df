//! Role-based access policy.
//!
//! Every endpoint names the resource and action it performs and asks
//! [`authorize`] before touching data. Authentication itself happens
//! earlier, in the API middleware.

use super::UserRole;
use crate::errors::{AppError, AppResult};

/// Resource families guarded by the policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Users,
    Genres,
    Movies,
    Favorites,
    Ratings,
    AdminConsole,
}

/// Operation attempted on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

impl Action {
    fn is_mutation_of_existing(self) -> bool {
        matches!(self, Action::Update | Action::Delete)
    }
}

/// Decide whether a caller with `role` may perform `action` on `resource`.
///
/// `is_owner` tells whether the caller created (movies) or owns
/// (favorites, ratings) the targeted row; it is ignored for reads and
/// creates.
pub fn authorize(role: UserRole, is_owner: bool, resource: Resource, action: Action) -> AppResult<()> {
    if role.is_admin() {
        return Ok(());
    }

    let allowed = match resource {
        Resource::Users | Resource::AdminConsole => false,
        Resource::Genres => !action.is_mutation_of_existing(),
        Resource::Movies | Resource::Favorites | Resource::Ratings => {
            !action.is_mutation_of_existing() || is_owner
        }
    };

    if allowed {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ACTIONS: [Action; 4] = [Action::Read, Action::Create, Action::Update, Action::Delete];

    #[test]
    fn test_admin_may_do_everything() {
        for resource in [
            Resource::Users,
            Resource::Genres,
            Resource::Movies,
            Resource::Favorites,
            Resource::Ratings,
            Resource::AdminConsole,
        ] {
            for action in ALL_ACTIONS {
                assert!(authorize(UserRole::Admin, false, resource, action).is_ok());
            }
        }
    }

    #[test]
    fn test_user_management_is_admin_only() {
        for action in ALL_ACTIONS {
            assert!(matches!(
                authorize(UserRole::User, true, Resource::Users, action),
                Err(AppError::Forbidden)
            ));
            assert!(authorize(UserRole::User, true, Resource::AdminConsole, action).is_err());
        }
    }

    #[test]
    fn test_genres_are_curated_by_admins() {
        assert!(authorize(UserRole::User, false, Resource::Genres, Action::Read).is_ok());
        assert!(authorize(UserRole::User, false, Resource::Genres, Action::Create).is_ok());
        assert!(authorize(UserRole::User, true, Resource::Genres, Action::Update).is_err());
        assert!(authorize(UserRole::User, true, Resource::Genres, Action::Delete).is_err());
    }

    #[test]
    fn test_owned_resources_need_ownership_to_change() {
        for resource in [Resource::Movies, Resource::Favorites, Resource::Ratings] {
            assert!(authorize(UserRole::User, false, resource, Action::Read).is_ok());
            assert!(authorize(UserRole::User, false, resource, Action::Create).is_ok());
            assert!(authorize(UserRole::User, false, resource, Action::Update).is_err());
            assert!(authorize(UserRole::User, false, resource, Action::Delete).is_err());
            assert!(authorize(UserRole::User, true, resource, Action::Update).is_ok());
            assert!(authorize(UserRole::User, true, resource, Action::Delete).is_ok());
        }
    }
}
