//! Role names seeded in the `roles` table.

/// Full access, including user management.
pub const ROLE_ADMIN: &str = "admin";

/// Content management access (projects, posts, categories, inquiries).
pub const ROLE_STAFF: &str = "staff";

/// Whether a role may use the staff management API.
pub fn is_staff_role(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_STAFF
}
