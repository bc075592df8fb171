//! Permission checks against the static role table.

use tracing::debug;

use clinichub_core::error::AppError;
use clinichub_entity::user::UserRole;

use super::permissions::{Permission, PermissionTable};

/// Answers "may this role do that" questions.
///
/// Checks are pure lookups against the compiled-in table, so the enforcer
/// is cheap to clone and share across handlers.
#[derive(Debug, Clone, Default)]
pub struct RbacEnforcer {
    table: PermissionTable,
}

impl RbacEnforcer {
    pub fn new() -> Self {
        Self {
            table: PermissionTable::new(),
        }
    }

    /// Whether the role holds the permission. Absent means denied.
    pub fn has_permission(&self, role: &UserRole, permission: &Permission) -> bool {
        self.table.allows(role, permission)
    }

    /// Errors with `Forbidden` when the role lacks the permission.
    pub fn require_permission(
        &self,
        role: &UserRole,
        permission: &Permission,
    ) -> Result<(), AppError> {
        if self.has_permission(role, permission) {
            Ok(())
        } else {
            debug!(role = %role, permission = %permission, "permission denied");
            Err(AppError::forbidden(format!(
                "Role {role} does not have permission {permission}"
            )))
        }
    }

    /// Whether `actor` sits at or above `target` in the role hierarchy.
    ///
    /// Used for staff-on-staff operations so a nurse cannot deactivate a
    /// doctor even when both carry `user.update`-class permissions.
    pub fn can_act_for(&self, actor: &UserRole, target: &UserRole) -> bool {
        actor.can_act_for(target)
    }

    /// Errors with `Forbidden` when `actor` ranks below `target`.
    pub fn require_rank(&self, actor: &UserRole, target: &UserRole) -> Result<(), AppError> {
        if self.can_act_for(actor, target) {
            Ok(())
        } else {
            debug!(actor = %actor, target = %target, "rank check failed");
            Err(AppError::forbidden(format!(
                "Role {actor} cannot act on behalf of role {target}"
            )))
        }
    }

    /// All permissions granted to a role, as wire strings.
    pub fn permission_strings(&self, role: &UserRole) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .table
            .permissions_for(role)
            .iter()
            .map(Permission::as_str)
            .collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinichub_core::error::ErrorKind;

    #[test]
    fn test_require_permission_allows_and_denies() {
        let rbac = RbacEnforcer::new();
        assert!(
            rbac.require_permission(&UserRole::Admin, &Permission::UserDelete)
                .is_ok()
        );

        let err = rbac
            .require_permission(&UserRole::Nurse, &Permission::UserDelete)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[test]
    fn test_rank_ordering() {
        let rbac = RbacEnforcer::new();
        assert!(rbac.can_act_for(&UserRole::Admin, &UserRole::Doctor));
        assert!(rbac.can_act_for(&UserRole::Doctor, &UserRole::Nurse));
        assert!(!rbac.can_act_for(&UserRole::Nurse, &UserRole::Doctor));
        // Equal rank may act on equal rank.
        assert!(rbac.can_act_for(&UserRole::Pharmacist, &UserRole::LabTech));
    }

    #[test]
    fn test_permission_strings_are_sorted_wire_names() {
        let rbac = RbacEnforcer::new();
        let names = rbac.permission_strings(&UserRole::Pharmacist);
        assert_eq!(
            names,
            vec![
                "medication.manage",
                "patient.read",
                "prescription.fulfill",
                "prescription.read",
            ]
        );
    }
}
