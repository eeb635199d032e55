//! MongoDB connection management
//!
//! Wraps driver setup so the rest of the pipeline deals only with a
//! database handle and domain errors.

use crate::config::MongoConfig;
use crate::domain::{NrptiError, Result};
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use secrecy::ExposeSecret;
use std::time::Duration;

/// Connected MongoDB client scoped to the pipeline database
#[derive(Clone)]
pub struct MongoStoreClient {
    client: Client,
    database: Database,
}

impl MongoStoreClient {
    /// Connect using the configured connection string and database
    ///
    /// # Errors
    ///
    /// Returns `NrptiError::Database` if the connection string cannot be
    /// parsed or the client cannot be constructed. Connection problems
    /// surface lazily on first operation; call
    /// [`test_connection`](Self::test_connection) to fail fast.
    pub async fn connect(config: &MongoConfig) -> Result<Self> {
        let mut options = ClientOptions::parse(config.connection_string.expose_secret().as_ref())
            .await
            .map_err(|e| {
                NrptiError::Database(format!("Failed to parse MongoDB connection string: {e}"))
            })?;

        options.app_name = Some("nrpti-importer".to_string());
        options.server_selection_timeout = Some(Duration::from_secs(config.timeout_seconds));

        let client = Client::with_options(options)
            .map_err(|e| NrptiError::Database(format!("Failed to create MongoDB client: {e}")))?;
        let database = client.database(&config.database);

        tracing::debug!(database = %config.database, "MongoDB client created");

        Ok(Self { client, database })
    }

    /// Ping the server to verify connectivity and credentials
    pub async fn test_connection(&self) -> Result<()> {
        self.database
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| NrptiError::Database(format!("MongoDB ping failed: {e}")))?;

        tracing::info!(database = %self.database.name(), "MongoDB connection verified");
        Ok(())
    }

    /// Handle to the pipeline database
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Handle to the underlying driver client (admin commands)
    pub fn client(&self) -> &Client {
        &self.client
    }
}
