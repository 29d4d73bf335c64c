//! Role policy
//!
//! | Resource      | Read          | Write            |
//! |---------------|---------------|------------------|
//! | companies     | any role      | admin            |
//! | departments   | any role      | admin, manager   |
//! | employees     | any role      | admin, manager   |
//! | report        | any role      | (read-only)      |
//! | dashboard     | any role      | (read-only)      |
//! | account       | own account   | own account      |

use http::Method;
use shared::models::Role;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Companies,
    Departments,
    Employees,
    Report,
    Dashboard,
    Account,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Companies => "companies",
            Self::Departments => "departments",
            Self::Employees => "employees",
            Self::Report => "report",
            Self::Dashboard => "dashboard",
            Self::Account => "account",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// May an authenticated `role` perform `method` on `resource`?
pub fn can(role: Role, method: &Method, resource: Resource) -> bool {
    if is_safe_method(method) {
        return true;
    }
    match resource {
        Resource::Companies => role == Role::Admin,
        Resource::Departments | Resource::Employees => matches!(role, Role::Admin | Role::Manager),
        Resource::Report | Resource::Dashboard => false,
        Resource::Account => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WRITES: [Method; 4] = [Method::POST, Method::PUT, Method::PATCH, Method::DELETE];

    #[test]
    fn test_reads_allowed_for_every_role() {
        for role in [Role::Admin, Role::Manager, Role::Employee] {
            for resource in [
                Resource::Companies,
                Resource::Departments,
                Resource::Employees,
                Resource::Report,
                Resource::Dashboard,
            ] {
                assert!(can(role, &Method::GET, resource), "{role} GET {resource}");
                assert!(can(role, &Method::HEAD, resource));
            }
        }
    }

    #[test]
    fn test_company_writes_admin_only() {
        for method in WRITES {
            assert!(can(Role::Admin, &method, Resource::Companies));
            assert!(!can(Role::Manager, &method, Resource::Companies));
            assert!(!can(Role::Employee, &method, Resource::Companies));
        }
    }

    #[test]
    fn test_department_and_employee_writes() {
        for resource in [Resource::Departments, Resource::Employees] {
            for method in WRITES {
                assert!(can(Role::Admin, &method, resource));
                assert!(can(Role::Manager, &method, resource));
                assert!(!can(Role::Employee, &method, resource));
            }
        }
    }

    #[test]
    fn test_read_only_resources() {
        for resource in [Resource::Report, Resource::Dashboard] {
            assert!(!can(Role::Admin, &Method::POST, resource));
        }
    }
}
