//! Account endpoint client
//!
//! Thin HTTP wrapper over the backend's GET/POST/PUT/DELETE account routes.
//! Every public operation normalizes the outcome: the parsed payload for GET,
//! a success boolean for mutations. Transport failures and non-2xx responses
//! are logged and surface as an empty list or `false`; nothing propagates
//! past this boundary. Callers must treat a falsy result as "operation not
//! applied" and leave local state alone.

use tracing::{debug, error};

use crate::account::{Account, AccountDraft, DeleteRequest};
use crate::config::AdminConfig;
use crate::error::Error;

/// Client for the account CRUD endpoint
#[derive(Debug, Clone)]
pub struct AccountClient {
    http: reqwest::Client,
    config: AdminConfig,
}

impl AccountClient {
    /// Create a new client with the given configuration
    pub fn new(config: AdminConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Get the configuration this client was built with
    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    /// Fetch all accounts. Returns an empty list on any failure.
    pub async fn fetch_accounts(&self) -> Vec<Account> {
        match self.try_fetch_accounts().await {
            Ok(accounts) => {
                debug!(count = accounts.len(), "fetched accounts");
                accounts
            }
            Err(e) => {
                error!("Failed to fetch accounts: {}", e);
                Vec::new()
            }
        }
    }

    /// Create a new account from a draft. Returns whether the backend
    /// accepted it.
    pub async fn add_account(&self, draft: &AccountDraft) -> bool {
        match self.try_add_account(draft).await {
            Ok(()) => {
                debug!(firstname = %draft.firstname, "account created");
                true
            }
            Err(e) => {
                error!("Failed to add new account: {}", e);
                false
            }
        }
    }

    /// Update an existing account. Returns whether the backend accepted it.
    pub async fn update_account(&self, account: &Account) -> bool {
        match self.try_update_account(account).await {
            Ok(()) => {
                debug!(id = %account.id, "account updated");
                true
            }
            Err(e) => {
                error!("Failed to update account: {}", e);
                false
            }
        }
    }

    /// Delete an account by id. Returns whether the backend accepted it.
    pub async fn delete_account(&self, id: &str) -> bool {
        match self.try_delete_account(id).await {
            Ok(()) => {
                debug!(id, "account deleted");
                true
            }
            Err(e) => {
                error!("Failed to delete account: {}", e);
                false
            }
        }
    }

    async fn try_fetch_accounts(&self) -> Result<Vec<Account>, Error> {
        let response = self.http.get(self.config.account_url()).send().await?;
        let response = Self::check_status(response)?;
        Ok(response.json().await?)
    }

    async fn try_add_account(&self, draft: &AccountDraft) -> Result<(), Error> {
        let response = self
            .http
            .post(self.config.account_url())
            .json(draft)
            .send()
            .await?;
        Self::check_status(response)?;
        Ok(())
    }

    async fn try_update_account(&self, account: &Account) -> Result<(), Error> {
        let response = self
            .http
            .put(self.config.account_url())
            .json(account)
            .send()
            .await?;
        Self::check_status(response)?;
        Ok(())
    }

    async fn try_delete_account(&self, id: &str) -> Result<(), Error> {
        let body = DeleteRequest { id: id.to_string() };
        let response = self
            .http
            .delete(self.config.account_url())
            .json(&body)
            .send()
            .await?;
        Self::check_status(response)?;
        Ok(())
    }

    fn check_status(response: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(Error::Api {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiRoot;

    #[test]
    fn test_client_uses_configured_endpoint() {
        let client = AccountClient::new(AdminConfig {
            base_url: "http://backend:9000".to_string(),
            api_root: ApiRoot::Development,
        });
        assert_eq!(
            client.config().account_url(),
            "http://backend:9000/Development/account"
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_yields_empty_list() {
        // Nothing listens here; the transport error must be swallowed
        let client = AccountClient::new(AdminConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            api_root: ApiRoot::Dev,
        });
        assert!(client.fetch_accounts().await.is_empty());
    }

    #[tokio::test]
    async fn test_mutation_failure_yields_false() {
        let client = AccountClient::new(AdminConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            api_root: ApiRoot::Dev,
        });
        assert!(!client.add_account(&AccountDraft::default()).await);
        assert!(!client.delete_account("42").await);
    }
}
