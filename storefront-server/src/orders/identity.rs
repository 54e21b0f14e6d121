//! Account Resolver
//!
//! Identity hints are tried in order and the first one that finds an account
//! wins. A hint that matches nothing falls through to the next; when every
//! hint misses the order is placed as a guest.

use shared::models::{Account, OrdererHints, OrdererInfo};
use sqlx::SqlitePool;

use crate::db::repository::{RepoResult, account};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityHint {
    /// Explicit account id in the request body
    AccountId(i64),
    /// Explicit sequential account number in the request body
    AccountNumber(i64),
    /// Account of the authenticated caller
    Session(i64),
}

impl IdentityHint {
    /// Lookup chain in priority order
    pub fn chain(hints: &OrdererHints, session_account: Option<i64>) -> Vec<IdentityHint> {
        [
            hints.account_id.map(Self::AccountId),
            hints.account_number.map(Self::AccountNumber),
            session_account.map(Self::Session),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[derive(Debug, Clone)]
pub struct AccountResolver {
    pool: SqlitePool,
}

impl AccountResolver {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// First account found along `chain`, or `None` for a guest
    ///
    /// Lookup errors are logged and treated as a miss.
    pub async fn resolve(&self, chain: &[IdentityHint]) -> Option<Account> {
        for hint in chain {
            match self.lookup(*hint).await {
                Ok(Some(account)) => {
                    tracing::debug!(?hint, account_id = account.id, "Orderer resolved");
                    return Some(account);
                }
                Ok(None) => tracing::debug!(?hint, "Identity hint matched no account"),
                Err(e) => tracing::warn!(?hint, error = %e, "Account lookup failed"),
            }
        }
        None
    }

    async fn lookup(&self, hint: IdentityHint) -> RepoResult<Option<Account>> {
        match hint {
            IdentityHint::AccountId(id) | IdentityHint::Session(id) => {
                account::find_by_id(&self.pool, id).await
            }
            IdentityHint::AccountNumber(number) => account::find_by_number(&self.pool, number).await,
        }
    }
}

/// Orderer snapshot for the order record
///
/// Contact fields come from the request; blanks are filled from the resolved
/// account.
pub fn orderer_info(hints: &OrdererHints, account: Option<&Account>) -> OrdererInfo {
    let non_blank = |value: &Option<String>| value.clone().filter(|v| !v.trim().is_empty());

    match account {
        Some(account) => OrdererInfo {
            account_id: Some(account.id),
            account_number: Some(account.account_number),
            name: if hints.name.trim().is_empty() {
                account.name.clone()
            } else {
                hints.name.clone()
            },
            email: non_blank(&hints.email).or_else(|| Some(account.email.clone())),
            phone: non_blank(&hints.phone).or_else(|| Some(account.phone.clone())),
        },
        None => OrdererInfo {
            account_id: None,
            account_number: None,
            name: hints.name.clone(),
            email: non_blank(&hints.email),
            phone: non_blank(&hints.phone),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;
    use shared::models::AccountCreate;

    async fn seed(pool: &SqlitePool, email: &str) -> Account {
        account::create(
            pool,
            AccountCreate {
                name: "Mona".into(),
                email: email.into(),
                phone: "0100".into(),
                address: None,
            },
        )
        .await
        .unwrap()
    }

    #[test]
    fn test_chain_order() {
        let hints = OrdererHints {
            account_id: Some(1),
            account_number: Some(2),
            ..Default::default()
        };
        assert_eq!(
            IdentityHint::chain(&hints, Some(3)),
            vec![
                IdentityHint::AccountId(1),
                IdentityHint::AccountNumber(2),
                IdentityHint::Session(3)
            ]
        );
        assert!(IdentityHint::chain(&OrdererHints::default(), None).is_empty());
    }

    #[tokio::test]
    async fn test_explicit_id_wins() {
        let pool = test_pool().await;
        let first = seed(&pool, "a@example.com").await;
        let second = seed(&pool, "b@example.com").await;
        let resolver = AccountResolver::new(pool);

        let chain = [
            IdentityHint::AccountId(first.id),
            IdentityHint::AccountNumber(second.account_number),
        ];
        assert_eq!(resolver.resolve(&chain).await.unwrap().id, first.id);
    }

    #[tokio::test]
    async fn test_miss_falls_through() {
        let pool = test_pool().await;
        let account = seed(&pool, "a@example.com").await;
        let resolver = AccountResolver::new(pool);

        let chain = [
            IdentityHint::AccountId(account.id + 1),
            IdentityHint::AccountNumber(9_999),
            IdentityHint::Session(account.id),
        ];
        assert_eq!(resolver.resolve(&chain).await.unwrap().id, account.id);
    }

    #[tokio::test]
    async fn test_all_misses_is_guest() {
        let pool = test_pool().await;
        let resolver = AccountResolver::new(pool);
        assert!(resolver.resolve(&[IdentityHint::AccountNumber(1)]).await.is_none());
        assert!(resolver.resolve(&[]).await.is_none());
    }

    #[tokio::test]
    async fn test_orderer_info_fills_blanks_from_account() {
        let pool = test_pool().await;
        let account = seed(&pool, "a@example.com").await;

        let hints = OrdererHints {
            name: "Mona S.".into(),
            phone: Some("  ".into()),
            ..Default::default()
        };
        let info = orderer_info(&hints, Some(&account));
        assert_eq!(info.account_id, Some(account.id));
        assert_eq!(info.account_number, Some(account.account_number));
        assert_eq!(info.name, "Mona S.");
        assert_eq!(info.email.as_deref(), Some("a@example.com"));
        assert_eq!(info.phone.as_deref(), Some("0100"));

        let guest = orderer_info(&hints, None);
        assert_eq!(guest.account_id, None);
        assert_eq!(guest.email, None);
        assert_eq!(guest.phone, None);
    }
}
