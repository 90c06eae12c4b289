//! Static access grants and the policy that evaluates them.

use tracing::warn;

use super::{HETZNER_CI, Principal, Privilege, quote_ident, quote_literal};
use crate::error::{StoreError, StoreResult};

/// Authorization rule binding a principal to a set of table privileges.
///
/// DELETE can never be part of a grant: benchmark rows are append-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGrant {
    principal: Principal,
    privileges: Vec<Privilege>,
}

impl AccessGrant {
    /// Create a grant. Fails if `privileges` is empty or contains DELETE.
    pub fn new(principal: Principal, privileges: &[Privilege]) -> StoreResult<Self> {
        if privileges.is_empty() {
            return Err(StoreError::InvalidInput(format!(
                "Grant for '{}' must carry at least one privilege",
                principal
            )));
        }

        if privileges.contains(&Privilege::Delete) {
            return Err(StoreError::InvalidInput(format!(
                "Grant for '{}' cannot carry DELETE on append-only results",
                principal
            )));
        }

        let mut deduped: Vec<Privilege> = Vec::with_capacity(privileges.len());
        for privilege in privileges {
            if !deduped.contains(privilege) {
                deduped.push(*privilege);
            }
        }

        Ok(Self {
            principal,
            privileges: deduped,
        })
    }

    /// The provisioned grant: `hetzner-ci` may SELECT, INSERT and UPDATE.
    pub fn hetzner_ci() -> Self {
        Self {
            principal: Principal::new(HETZNER_CI),
            privileges: vec![Privilege::Select, Privilege::Insert, Privilege::Update],
        }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn privileges(&self) -> &[Privilege] {
        &self.privileges
    }

    pub fn permits(&self, principal: &Principal, privilege: Privilege) -> bool {
        &self.principal == principal && self.privileges.contains(&privilege)
    }

    fn privilege_list(&self) -> String {
        self.privileges
            .iter()
            .map(Privilege::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// PostgreSQL statements applying this grant on `table`.
    ///
    /// The role is created NOLOGIN when missing so the GRANT can bind to it;
    /// login credentials stay an administrative concern.
    pub fn grant_sql(&self, table: &str) -> String {
        let role = quote_ident(self.principal.as_str());

        format!(
            r#"
            DO $$
            BEGIN
                IF NOT EXISTS (SELECT 1 FROM pg_roles WHERE rolname = {literal}) THEN
                    CREATE ROLE {role} NOLOGIN;
                END IF;
            END
            $$;

            GRANT {privileges} ON {table} TO {role};
            "#,
            literal = quote_literal(self.principal.as_str()),
            role = role,
            privileges = self.privilege_list(),
            table = quote_ident(table),
        )
    }

    /// PostgreSQL statement withdrawing this grant from `table`.
    pub fn revoke_sql(&self, table: &str) -> String {
        format!(
            "REVOKE {} ON {} FROM {};",
            self.privilege_list(),
            quote_ident(table),
            quote_ident(self.principal.as_str()),
        )
    }
}

/// The set of grants in force for the results table.
///
/// Everything not explicitly granted is denied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    grants: Vec<AccessGrant>,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            grants: vec![AccessGrant::hetzner_ci()],
        }
    }
}

impl AccessPolicy {
    /// A policy with no grants at all.
    pub fn deny_all() -> Self {
        Self { grants: Vec::new() }
    }

    pub fn with_grant(mut self, grant: AccessGrant) -> Self {
        self.grants.push(grant);
        self
    }

    pub fn grants(&self) -> &[AccessGrant] {
        &self.grants
    }

    pub fn is_allowed(&self, principal: &Principal, privilege: Privilege) -> bool {
        if privilege == Privilege::Delete {
            return false;
        }

        self.grants
            .iter()
            .any(|grant| grant.permits(principal, privilege))
    }

    /// Check `principal` may perform `privilege`, failing with an authorization error.
    pub fn authorize(&self, principal: &Principal, privilege: Privilege) -> StoreResult<()> {
        if self.is_allowed(principal, privilege) {
            return Ok(());
        }

        warn!(principal = %principal, privilege = %privilege, "Authorization denied");

        Err(StoreError::Authorization {
            principal: principal.clone(),
            privilege,
        })
    }
}
