use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};

use crate::{config::Config, errors::AppResult, models::domain::User};

/// Handle on the credential store: one pooled client plus the users collection.
#[derive(Clone)]
pub struct Database {
    client: Client,
    db_name: String,
    users_collection: String,
}

/// Client settings derived from the config. Connect and server selection
/// share the credential lookup bound, so an unreachable store fails a login
/// inside that window instead of after the driver's 30 s default.
pub async fn client_options(config: &Config) -> AppResult<ClientOptions> {
    let mut options = ClientOptions::parse(&config.mongo_conn_string).await?;

    options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
    options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
    options.max_pool_size = Some(config.mongo_max_pool_size);
    options.connect_timeout = Some(config.credential_lookup_timeout);
    options.server_selection_timeout = Some(config.credential_lookup_timeout);

    Ok(options)
}

impl Database {
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let client = Client::with_options(client_options(config).await?)?;

        let db = Self {
            client,
            db_name: config.mongo_db_name.clone(),
            users_collection: config.users_collection.clone(),
        };
        db.health_check().await?;

        log::info!(
            "Connected to MongoDB database '{}' (users in '{}')",
            db.db_name,
            db.users_collection
        );

        Ok(db)
    }

    pub fn users(&self) -> Collection<User> {
        self.client
            .database(&self.db_name)
            .collection(&self.users_collection)
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}
