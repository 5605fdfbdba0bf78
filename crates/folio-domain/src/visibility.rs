//! Which content items a caller may see.

use uuid::Uuid;

/// Visibility scope applied to every content lookup.
///
/// Items outside the scope are indistinguishable from missing ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Administrators see every item.
    Everything,
    /// Everyone else sees only what they wrote.
    AuthoredBy(Uuid),
}

impl Visibility {
    pub fn for_caller(user_id: Uuid, is_admin: bool) -> Self {
        if is_admin {
            Self::Everything
        } else {
            Self::AuthoredBy(user_id)
        }
    }

    pub fn permits(&self, author_id: Uuid) -> bool {
        match self {
            Self::Everything => true,
            Self::AuthoredBy(id) => *id == author_id,
        }
    }
}
