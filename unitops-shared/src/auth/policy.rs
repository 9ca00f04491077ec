/// Role and business-unit access policy
///
/// Every handler runs its request through this module before touching domain
/// logic. The rules, exactly:
///
/// | Role     | Inventory           | Orders            | Feedback                         | Reports         |
/// |----------|---------------------|-------------------|----------------------------------|-----------------|
/// | admin    | full CRUD, any unit | view all          | view all                         | view all        |
/// | employee | CRUD own unit only  | view own unit     | view own unit (needs assignment) | own-unit scoped |
/// | customer | no access           | create only (own) | create only (named unit)         | no access       |
///
/// An employee action against a resource in a different unit is denied no
/// matter what the request says. The decision operates on the typed
/// [`AuthenticatedUser`] produced once at the boundary — policy checks never
/// touch the database.
///
/// # Example
///
/// ```
/// use unitops_shared::auth::middleware::AuthenticatedUser;
/// use unitops_shared::auth::policy::{check_unit_access, unit_scope, UnitScope};
/// use unitops_shared::models::user::Role;
/// use uuid::Uuid;
///
/// let unit = Uuid::new_v4();
/// let employee = AuthenticatedUser {
///     id: Uuid::new_v4(),
///     name: "Sam".to_string(),
///     email: "sam@example.com".to_string(),
///     role: Role::Employee,
///     unit_id: Some(unit),
/// };
///
/// assert_eq!(unit_scope(&employee), Ok(UnitScope::Unit(unit)));
/// assert!(check_unit_access(&employee, unit).is_ok());
/// assert!(check_unit_access(&employee, Uuid::new_v4()).is_err());
/// ```

use uuid::Uuid;

use super::middleware::AuthenticatedUser;
use crate::models::user::Role;

/// Error type for authorization checks
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthzError {
    /// The user's role may not perform this action
    #[error("Access denied: {action} requires {required}")]
    RoleDenied {
        /// Human-readable action label
        action: &'static str,
        /// Role(s) that may perform it
        required: &'static str,
    },

    /// The resource belongs to a different business unit than the employee's
    #[error("Resource belongs to a different business unit")]
    UnitMismatch,

    /// An employee action that needs a unit assignment, without one
    #[error("Employee is not assigned to a business unit")]
    MissingUnit,
}

/// Visibility scope derived from a user's role and unit assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitScope {
    /// All business units (admin)
    All,

    /// One business unit (employee)
    Unit(Uuid),
}

impl UnitScope {
    /// The unit filter to apply in queries: None means unscoped
    pub fn filter(&self) -> Option<Uuid> {
        match self {
            UnitScope::All => None,
            UnitScope::Unit(id) => Some(*id),
        }
    }
}

/// Requires the admin role
pub fn require_admin(user: &AuthenticatedUser) -> Result<(), AuthzError> {
    if user.role != Role::Admin {
        return Err(AuthzError::RoleDenied {
            action: "this operation",
            required: "admin",
        });
    }
    Ok(())
}

/// Requires the employee role
pub fn require_employee(user: &AuthenticatedUser) -> Result<(), AuthzError> {
    if user.role != Role::Employee {
        return Err(AuthzError::RoleDenied {
            action: "this operation",
            required: "employee",
        });
    }
    Ok(())
}

/// Requires the customer role
pub fn require_customer(user: &AuthenticatedUser) -> Result<(), AuthzError> {
    if user.role != Role::Customer {
        return Err(AuthzError::RoleDenied {
            action: "this operation",
            required: "customer",
        });
    }
    Ok(())
}

/// Requires a staff role (admin or employee)
pub fn require_staff(user: &AuthenticatedUser) -> Result<(), AuthzError> {
    if !user.role.is_staff() {
        return Err(AuthzError::RoleDenied {
            action: "this operation",
            required: "admin or employee",
        });
    }
    Ok(())
}

/// Derives the unit scope for read-side listings and reports
///
/// - admin: [`UnitScope::All`]
/// - employee: their assigned unit; [`AuthzError::MissingUnit`] when unassigned
/// - customer: denied
pub fn unit_scope(user: &AuthenticatedUser) -> Result<UnitScope, AuthzError> {
    match user.role {
        Role::Admin => Ok(UnitScope::All),
        Role::Employee => user
            .unit_id
            .map(UnitScope::Unit)
            .ok_or(AuthzError::MissingUnit),
        Role::Customer => Err(AuthzError::RoleDenied {
            action: "this operation",
            required: "admin or employee",
        }),
    }
}

/// Checks mutation access against a resource tagged with a unit
///
/// Admins pass for any unit. Employees pass only for their own unit,
/// independent of request parameters. Customers are always denied.
pub fn check_unit_access(user: &AuthenticatedUser, resource_unit: Uuid) -> Result<(), AuthzError> {
    match user.role {
        Role::Admin => Ok(()),
        Role::Employee => match user.unit_id {
            Some(own) if own == resource_unit => Ok(()),
            Some(_) => Err(AuthzError::UnitMismatch),
            None => Err(AuthzError::MissingUnit),
        },
        Role::Customer => Err(AuthzError::RoleDenied {
            action: "this operation",
            required: "admin or employee",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role, unit_id: Option<Uuid>) -> AuthenticatedUser {
        AuthenticatedUser {
            id: Uuid::new_v4(),
            name: "Test".to_string(),
            email: "test@example.com".to_string(),
            role,
            unit_id,
        }
    }

    #[test]
    fn test_require_admin() {
        assert!(require_admin(&user(Role::Admin, None)).is_ok());
        assert!(require_admin(&user(Role::Employee, None)).is_err());
        assert!(require_admin(&user(Role::Customer, None)).is_err());
    }

    #[test]
    fn test_require_customer() {
        assert!(require_customer(&user(Role::Customer, None)).is_ok());
        assert!(require_customer(&user(Role::Admin, None)).is_err());
        assert!(require_customer(&user(Role::Employee, None)).is_err());
    }

    #[test]
    fn test_require_staff() {
        assert!(require_staff(&user(Role::Admin, None)).is_ok());
        assert!(require_staff(&user(Role::Employee, Some(Uuid::new_v4()))).is_ok());
        assert!(require_staff(&user(Role::Customer, None)).is_err());
    }

    #[test]
    fn test_unit_scope_admin_sees_all() {
        assert_eq!(unit_scope(&user(Role::Admin, None)), Ok(UnitScope::All));
        // An admin's own assignment never narrows their scope
        let assigned = user(Role::Admin, Some(Uuid::new_v4()));
        assert_eq!(unit_scope(&assigned), Ok(UnitScope::All));
    }

    #[test]
    fn test_unit_scope_employee() {
        let unit = Uuid::new_v4();
        assert_eq!(
            unit_scope(&user(Role::Employee, Some(unit))),
            Ok(UnitScope::Unit(unit))
        );
        assert_eq!(
            unit_scope(&user(Role::Employee, None)),
            Err(AuthzError::MissingUnit)
        );
    }

    #[test]
    fn test_unit_scope_customer_denied() {
        assert!(matches!(
            unit_scope(&user(Role::Customer, None)),
            Err(AuthzError::RoleDenied { .. })
        ));
    }

    #[test]
    fn test_unit_scope_filter() {
        let unit = Uuid::new_v4();
        assert_eq!(UnitScope::All.filter(), None);
        assert_eq!(UnitScope::Unit(unit).filter(), Some(unit));
    }

    #[test]
    fn test_check_unit_access_admin_any_unit() {
        assert!(check_unit_access(&user(Role::Admin, None), Uuid::new_v4()).is_ok());
    }

    #[test]
    fn test_check_unit_access_employee_own_unit_only() {
        let own = Uuid::new_v4();
        let other = Uuid::new_v4();
        let employee = user(Role::Employee, Some(own));

        assert!(check_unit_access(&employee, own).is_ok());
        assert_eq!(
            check_unit_access(&employee, other),
            Err(AuthzError::UnitMismatch)
        );
    }

    #[test]
    fn test_check_unit_access_unassigned_employee() {
        let employee = user(Role::Employee, None);
        assert_eq!(
            check_unit_access(&employee, Uuid::new_v4()),
            Err(AuthzError::MissingUnit)
        );
    }

    #[test]
    fn test_check_unit_access_customer_denied() {
        let customer = user(Role::Customer, Some(Uuid::new_v4()));
        assert!(matches!(
            check_unit_access(&customer, Uuid::new_v4()),
            Err(AuthzError::RoleDenied { .. })
        ));
    }
}
