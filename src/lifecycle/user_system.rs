use super::Config;
use crate::framework::Dispatcher;
use crate::http;
use crate::store::{StoreActor, StoreError, UserStore};
use axum::Router;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

#[cfg(feature = "postgres")]
use crate::store::PostgresStore;

/// Failures while starting or stopping a [`UserSystem`].
#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A database URL was configured but the binary was built without Postgres support.
    #[error("database_url is set but the `postgres` feature is not enabled")]
    PostgresDisabled,

    #[error("Store actor task failed: {0}")]
    ActorFailed(#[from] JoinError),
}

/// Owns the shared store and the dispatcher built on top of it.
///
/// `UserSystem` is responsible for:
/// - **Store Selection**: the in-memory [`StoreActor`], or Postgres when a
///   database URL is configured
/// - **Dependency Wiring**: handing one `Arc<dyn UserStore>` to the [`Dispatcher`]
/// - **Lifecycle Management**: stopping the store actor on [`shutdown`](Self::shutdown)
///
/// # Example
///
/// ```rust
/// use user_dispatch::lifecycle::{Config, UserSystem};
///
/// #[tokio::main]
/// async fn main() {
///     let system = UserSystem::start(&Config::default()).await.unwrap();
///     let app = system.router();
///     // ... serve `app` ...
///     drop(app);
///     system.shutdown().await.unwrap();
/// }
/// ```
pub struct UserSystem {
    dispatcher: Dispatcher,

    /// Task handles for the running store actor (empty for Postgres).
    handles: Vec<JoinHandle<()>>,

    #[cfg(feature = "postgres")]
    postgres: Option<PostgresStore>,
}

impl UserSystem {
    /// Builds the store named by `config` and the dispatcher around it.
    ///
    /// # Errors
    ///
    /// Returns `SystemError::PostgresDisabled` when `database_url` is set in a
    /// build without the `postgres` feature, or `SystemError::Store` when the
    /// database cannot be reached or its schema cannot be created.
    pub async fn start(config: &Config) -> Result<Self, SystemError> {
        match config.database_url.as_deref() {
            None => Ok(Self::in_memory(config)),
            #[cfg(feature = "postgres")]
            Some(url) => {
                let store = PostgresStore::connect(url).await?;
                store.ensure_schema().await?;
                info!(max_in_flight = config.max_in_flight, "Started with Postgres store");
                let dispatcher = Dispatcher::new(Arc::new(store.clone()))
                    .with_max_in_flight(config.max_in_flight);
                Ok(Self {
                    dispatcher,
                    handles: Vec::new(),
                    postgres: Some(store),
                })
            }
            #[cfg(not(feature = "postgres"))]
            Some(_) => Err(SystemError::PostgresDisabled),
        }
    }

    /// Spawns the in-memory store actor and wires the dispatcher to it.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn in_memory(config: &Config) -> Self {
        let (actor, client) = StoreActor::new(config.store_buffer);
        let handle = tokio::spawn(actor.run());
        info!(max_in_flight = config.max_in_flight, "Started with in-memory store");

        let store: Arc<dyn UserStore> = Arc::new(client);
        Self {
            dispatcher: Dispatcher::new(store).with_max_in_flight(config.max_in_flight),
            handles: vec![handle],
            #[cfg(feature = "postgres")]
            postgres: None,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// The HTTP router, sharing this system's dispatcher.
    pub fn router(&self) -> Router {
        http::router(self.dispatcher.clone())
    }

    /// Gracefully shuts down the store.
    ///
    /// Dropping the dispatcher releases this system's store handle; the store
    /// actor exits once every other handle (routers, in-flight workers) is gone
    /// too, so drop routers before awaiting this.
    ///
    /// # Errors
    ///
    /// Returns `SystemError::ActorFailed` if the store actor task panicked.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");
        drop(self.dispatcher);

        #[cfg(feature = "postgres")]
        if let Some(store) = self.postgres {
            store.close().await;
        }

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Store actor task failed");
                return Err(e.into());
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::{RequestContext, Status};
    use crate::handlers::UserOperation;
    use std::time::Duration;

    #[tokio::test]
    async fn test_in_memory_round_trip_and_shutdown() {
        let system = UserSystem::start(&Config::default()).await.unwrap();
        let body = r#"{"name":"Alice","email":"alice@example.com","age":30}"#;
        let created = system
            .dispatcher()
            .dispatch(RequestContext::new().with_body(body), UserOperation::Create)
            .await;
        assert_eq!(created.user().map(|u| u.id), Some(1));

        let fetched = system
            .dispatcher()
            .dispatch(RequestContext::new().with_path_id("1"), UserOperation::FetchById)
            .await;
        assert_eq!(fetched.status, Status::Ok);

        tokio::time::timeout(Duration::from_secs(1), system.shutdown())
            .await
            .expect("shutdown should not hang")
            .unwrap();
    }

    #[tokio::test]
    async fn test_admission_limit_is_applied() {
        let config = Config {
            max_in_flight: 2,
            ..Config::default()
        };
        let system = UserSystem::start(&config).await.unwrap();
        assert_eq!(system.dispatcher().available_permits(), Some(2));
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_zero_store_buffer_is_clamped() {
        let config = Config {
            store_buffer: 0,
            ..Config::default()
        };
        let system = UserSystem::in_memory(&config);
        system.shutdown().await.unwrap();
    }

    #[cfg(not(feature = "postgres"))]
    #[tokio::test]
    async fn test_database_url_requires_postgres_feature() {
        let config = Config {
            database_url: Some("postgres://localhost/users".into()),
            ..Config::default()
        };
        let result = UserSystem::start(&config).await;
        assert!(matches!(result, Err(SystemError::PostgresDisabled)));
    }
}
