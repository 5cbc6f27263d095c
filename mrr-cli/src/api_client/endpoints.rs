//! Typed wrappers for each API capability.
//!
//! Every wrapper maps to exactly one [`ApiClient::send`] call.

use serde_json::Value;

use super::types::{ApiRequest, PathParam, ProfileAssignment, Query, RentalMessage};
use super::ApiClient;
use crate::error::Result;

impl ApiClient {
    // Information

    /// Test connectivity and return information about the caller.
    pub async fn whoami(&self) -> Result<Value> {
        self.send(&ApiRequest::get("/whoami")).await
    }

    pub async fn servers(&self) -> Result<Value> {
        self.send(&ApiRequest::get("/info/servers")).await
    }

    pub async fn algos(&self) -> Result<Value> {
        self.send(&ApiRequest::get("/info/algos")).await
    }

    pub async fn algo(&self, name: &PathParam) -> Result<Value> {
        self.send(&ApiRequest::get(format!("/info/algos/{name}"))).await
    }

    pub async fn currencies(&self) -> Result<Value> {
        self.send(&ApiRequest::get("/info/currencies")).await
    }

    pub async fn pricing(&self) -> Result<Value> {
        self.send(&ApiRequest::get("/pricing")).await
    }

    // Account

    pub async fn account(&self) -> Result<Value> {
        self.send(&ApiRequest::get("/account")).await
    }

    pub async fn account_balance(&self) -> Result<Value> {
        self.send(&ApiRequest::get("/account/balance")).await
    }

    /// List or search transaction history.
    pub async fn account_transactions(&self, filters: Query) -> Result<Value> {
        self.send(&ApiRequest::get_with_query("/account/transactions", filters))
            .await
    }

    /// List pool profiles, optionally filtered (e.g. by algo).
    pub async fn account_profiles(&self, filters: Query) -> Result<Value> {
        self.send(&ApiRequest::get_with_query("/account/profile", filters))
            .await
    }

    pub async fn create_account_profile(&self, profile: Value) -> Result<Value> {
        self.send(&ApiRequest::put("/account/profile", profile)).await
    }

    pub async fn account_profile(&self, id: &PathParam) -> Result<Value> {
        self.send(&ApiRequest::get(format!("/account/profile/{id}")))
            .await
    }

    pub async fn update_account_profile(&self, id: &PathParam, profile: Value) -> Result<Value> {
        self.send(&ApiRequest::put(format!("/account/profile/{id}"), profile))
            .await
    }

    pub async fn delete_account_profile(&self, id: &PathParam) -> Result<Value> {
        self.send(&ApiRequest::delete(format!("/account/profile/{id}")))
            .await
    }

    /// Test a pool for connectivity and functionality.
    pub async fn test_pool(&self, params: Query) -> Result<Value> {
        self.send(&ApiRequest::get_with_query("/account/pool/test", params))
            .await
    }

    // Rentals. `ids` may name several rentals separated by `;`.

    pub async fn rentals(&self, ids: &PathParam) -> Result<Value> {
        self.send(&ApiRequest::get(format!("/rental/{ids}"))).await
    }

    pub async fn create_rental(&self, rental: Value) -> Result<Value> {
        self.send(&ApiRequest::put("/rental", rental)).await
    }

    pub async fn apply_profile_to_rentals(
        &self,
        ids: &PathParam,
        profile_id: &PathParam,
    ) -> Result<Value> {
        let body = serde_json::to_value(ProfileAssignment {
            profile_id: profile_id.as_str(),
        })?;
        self.send(&ApiRequest::put(format!("/rental/{ids}/profile"), body))
            .await
    }

    pub async fn rental_pools(&self, ids: &PathParam) -> Result<Value> {
        self.send(&ApiRequest::get(format!("/rental/{ids}/pool"))).await
    }

    pub async fn add_replace_rental_pool(&self, ids: &PathParam, pool: Value) -> Result<Value> {
        self.send(&ApiRequest::put(format!("/rental/{ids}/pool"), pool))
            .await
    }

    pub async fn delete_rental_pool(&self, ids: &PathParam) -> Result<Value> {
        self.send(&ApiRequest::delete(format!("/rental/{ids}/pool")))
            .await
    }

    /// Purchase an extension on rentals.
    pub async fn extend_rental(&self, ids: &PathParam, extension: Value) -> Result<Value> {
        self.send(&ApiRequest::put(format!("/rental/{ids}/extend"), extension))
            .await
    }

    pub async fn rental_graph(&self, ids: &PathParam) -> Result<Value> {
        self.send(&ApiRequest::get(format!("/rental/{ids}/graph"))).await
    }

    /// Activity log entries.
    pub async fn rental_log(&self, ids: &PathParam) -> Result<Value> {
        self.send(&ApiRequest::get(format!("/rental/{ids}/log"))).await
    }

    pub async fn rental_messages(&self, ids: &PathParam) -> Result<Value> {
        self.send(&ApiRequest::get(format!("/rental/{ids}/message")))
            .await
    }

    pub async fn send_rental_message(&self, ids: &PathParam, message: &str) -> Result<Value> {
        let body = serde_json::to_value(RentalMessage { message })?;
        self.send(&ApiRequest::put(format!("/rental/{ids}/message"), body))
            .await
    }
}
