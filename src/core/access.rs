//! Règles d'accès par entité.
//!
//! Chaque entité déclare, pour les quatre opérations (lecture, création,
//! modification, suppression), un prédicat pur de la session courante.
//! Une opération refusée produit une erreur d'autorisation structurée,
//! jamais un résultat vide silencieux: 401 sans session, 403 avec une
//! session au rôle insuffisant.

use crate::core::auth::Session;
use crate::domain::user::Role;
use crate::infrastructure::error::{forbidden, unauthorized, AppResult};

/// Prédicat d'accès: décision à partir de la session (éventuellement absente)
pub type Predicate = fn(Option<&Session>) -> bool;

/// Opération soumise au contrôle d'accès
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Query,
    Create,
    Update,
    Delete,
}

/// Vrai si une session existe et porte le rôle superAdmin
pub fn is_super_admin(session: Option<&Session>) -> bool {
    matches!(session, Some(s) if s.role == Role::SuperAdmin)
}

/// Vrai si une session existe, quel que soit le rôle
pub fn is_authenticated(session: Option<&Session>) -> bool {
    session.is_some()
}

/// Toujours vrai
pub fn allow_all(_session: Option<&Session>) -> bool {
    true
}

/// Règles d'une entité, une par opération
#[derive(Debug, Clone, Copy)]
pub struct Access {
    pub query: Predicate,
    pub create: Predicate,
    pub update: Predicate,
    pub delete: Predicate,
}

impl Access {
    pub const fn unrestricted() -> Self {
        Access {
            query: allow_all,
            create: allow_all,
            update: allow_all,
            delete: allow_all,
        }
    }

    pub fn check(&self, operation: Operation, session: Option<&Session>) -> bool {
        let predicate = match operation {
            Operation::Query => self.query,
            Operation::Create => self.create,
            Operation::Update => self.update,
            Operation::Delete => self.delete,
        };
        predicate(session)
    }

    /// Applique la règle et traduit un refus en erreur d'autorisation
    pub fn require(&self, operation: Operation, session: Option<&Session>) -> AppResult<()> {
        if self.check(operation, session) {
            Ok(())
        } else if session.is_none() {
            Err(unauthorized("Authentification requise"))
        } else {
            Err(forbidden("Rôle insuffisant pour cette opération"))
        }
    }
}

/// Les comptes ne sont visibles qu'authentifié et ne se gèrent qu'en superAdmin
pub const USER_ACCESS: Access = Access {
    query: is_authenticated,
    create: is_super_admin,
    update: is_super_admin,
    delete: is_super_admin,
};

/// La page à propos se lit et se modifie authentifié, mais sa création et sa
/// suppression restent réservées au superAdmin
pub const ABOUT_ACCESS: Access = Access {
    query: is_authenticated,
    create: is_super_admin,
    update: is_authenticated,
    delete: is_super_admin,
};

// Le contenu public du site est sans restriction.
pub const TEXTE_ACCESS: Access = Access::unrestricted();
pub const IMAGE_ACCESS: Access = Access::unrestricted();
pub const EXPOSITION_ACCESS: Access = Access::unrestricted();
pub const TRAVAUX_ACCESS: Access = Access::unrestricted();
pub const SECTION_TRAVAUX_ACCESS: Access = Access::unrestricted();
pub const SECTION_ABOUT_ACCESS: Access = Access::unrestricted();

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::error::AppError;
    use uuid::Uuid;

    fn session(role: Role) -> Session {
        Session {
            user_id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn anonymous_cannot_query_users() {
        let result = USER_ACCESS.require(Operation::Query, None);
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn any_session_can_query_users() {
        let admin = session(Role::Admin);
        assert!(USER_ACCESS.require(Operation::Query, Some(&admin)).is_ok());
    }

    #[test]
    fn only_super_admin_manages_users() {
        let admin = session(Role::Admin);
        let super_admin = session(Role::SuperAdmin);

        for operation in [Operation::Create, Operation::Update, Operation::Delete] {
            assert!(matches!(
                USER_ACCESS.require(operation, Some(&admin)),
                Err(AppError::Forbidden(_))
            ));
            assert!(matches!(
                USER_ACCESS.require(operation, None),
                Err(AppError::Unauthorized(_))
            ));
            assert!(USER_ACCESS.require(operation, Some(&super_admin)).is_ok());
        }
    }

    #[test]
    fn about_update_is_open_to_any_session_but_delete_is_not() {
        let admin = session(Role::Admin);
        let super_admin = session(Role::SuperAdmin);

        assert!(ABOUT_ACCESS.require(Operation::Update, Some(&admin)).is_ok());
        assert!(matches!(
            ABOUT_ACCESS.require(Operation::Update, None),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            ABOUT_ACCESS.require(Operation::Delete, Some(&admin)),
            Err(AppError::Forbidden(_))
        ));
        assert!(ABOUT_ACCESS.require(Operation::Delete, Some(&super_admin)).is_ok());
        assert!(matches!(
            ABOUT_ACCESS.require(Operation::Create, Some(&admin)),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn public_content_is_unrestricted_for_anonymous() {
        for access in [
            TEXTE_ACCESS,
            IMAGE_ACCESS,
            EXPOSITION_ACCESS,
            TRAVAUX_ACCESS,
            SECTION_TRAVAUX_ACCESS,
            SECTION_ABOUT_ACCESS,
        ] {
            for operation in [
                Operation::Query,
                Operation::Create,
                Operation::Update,
                Operation::Delete,
            ] {
                assert!(access.require(operation, None).is_ok());
            }
        }
    }
}
