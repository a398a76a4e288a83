//! Authorization policy
//!
//! Pure decision functions over (viewer identity, target ownership).
//! Handlers translate the decision into a response; the unauthenticated
//! case carries the original destination for the post-login redirect.

use encore_common::Error;

/// Outcome of an authorization check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Forbidden,
    Unauthenticated,
}

impl Access {
    /// Turn a decision into a handler result; `next` is the destination
    /// preserved through the login redirect
    pub fn require(self, next: &str) -> Result<(), Error> {
        match self {
            Access::Allow => Ok(()),
            Access::Forbidden => Err(Error::Forbidden),
            Access::Unauthenticated => Err(Error::Unauthenticated {
                next: next.to_string(),
            }),
        }
    }
}

/// Editing or deleting a note: owner only
pub fn note_mutation(viewer: Option<i64>, note_owner: i64) -> Access {
    match viewer {
        None => Access::Unauthenticated,
        Some(id) if id == note_owner => Access::Allow,
        Some(_) => Access::Forbidden,
    }
}

/// Editing account info or changing the password: self only
pub fn account_mutation(viewer: Option<i64>, target_user: i64) -> Access {
    match viewer {
        None => Access::Unauthenticated,
        Some(id) if id == target_user => Access::Allow,
        Some(_) => Access::Forbidden,
    }
}

/// Profiles are public; private fields (email, full name, edit controls)
/// appear only when the viewer is looking at their own profile
pub fn show_private_fields(viewer: Option<i64>, profile_user: i64) -> bool {
    viewer == Some(profile_user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_may_mutate_their_note() {
        assert_eq!(note_mutation(Some(1), 1), Access::Allow);
    }

    #[test]
    fn non_owner_is_forbidden_not_unauthenticated() {
        assert_eq!(note_mutation(Some(1), 2), Access::Forbidden);
        assert_eq!(account_mutation(Some(7), 8), Access::Forbidden);
    }

    #[test]
    fn anonymous_viewer_is_unauthenticated() {
        assert_eq!(note_mutation(None, 2), Access::Unauthenticated);
        assert_eq!(account_mutation(None, 1), Access::Unauthenticated);
    }

    #[test]
    fn private_fields_only_for_self() {
        assert!(show_private_fields(Some(3), 3));
        assert!(!show_private_fields(Some(3), 4));
        assert!(!show_private_fields(None, 3));
    }

    #[test]
    fn require_maps_decisions_to_errors() {
        assert!(Access::Allow.require("/x").is_ok());
        assert!(matches!(
            Access::Forbidden.require("/x"),
            Err(Error::Forbidden)
        ));
        match Access::Unauthenticated.require("/notes/5/edit") {
            Err(Error::Unauthenticated { next }) => assert_eq!(next, "/notes/5/edit"),
            other => panic!("unexpected: {:?}", other.map(|_| ())),
        }
    }
}
