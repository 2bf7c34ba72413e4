//! mockall implementations of the storage-facing interfaces

use async_trait::async_trait;
use haven_api_types::{ListingId, ListingTable};
use haven_interfaces::{
    AuthError, AuthSession, AuthUser, DataSource, DatabaseError, IdentityProvider, QueryResult, TableQuery,
};
use mockall::mock;
use serde_json::Value;

mock! {
    pub DataSourceImpl {}

    #[async_trait]
    impl DataSource for DataSourceImpl {
        async fn execute(&self, query: TableQuery) -> Result<QueryResult, DatabaseError>;
        async fn fetch_by_id(&self, table: ListingTable, id: &ListingId) -> Result<Value, DatabaseError>;
        async fn health_check(&self) -> Result<(), DatabaseError>;
    }
}

mock! {
    pub IdentityProviderImpl {}

    #[async_trait]
    impl IdentityProvider for IdentityProviderImpl {
        async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError>;
        async fn exchange_code_for_session(&self, code: &str) -> Result<AuthSession, AuthError>;
        async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession, AuthError>;
        async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
    }
}
