//! Process bootstrap.
//!
//! Startup is strictly sequential: the store connection must succeed before the background
//! service starts, and the background service must be running before the listener binds.
//! The service therefore never accepts traffic without a confirmed store.
//!
//! ```text
//! Init -> StoreConnecting -> StoreConnected -> Listening -> ShuttingDown -> Terminated
//!                         \-> StoreFailed -> Terminated
//! (shutdown requested while connecting)    -> ShuttingDown -> Terminated
//! ```

use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tokio::net::TcpListener;

use crate::server::{
    config::Config,
    error::startup::StartupError,
    middleware::cors::cors_layer,
    router::{router, HandlerGroups},
    scheduler::{BackgroundService, ServiceLifecycle},
    shutdown::ShutdownSignal,
    state::AppState,
};

/// Connects to the database.
///
/// Establishes a connection pool using the connection string from configuration. SQLx
/// statement logging is disabled; request tracing already covers the HTTP side.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database pool
/// - `Err(DbErr)` - Failed to connect to database
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    Database::connect(opt).await
}

/// Opens the persistent store during bootstrap.
pub trait StoreConnector: Send + Sync {
    fn connect(&self) -> impl Future<Output = Result<DatabaseConnection, DbErr>> + Send;
}

/// Connects through SeaORM using the configured database URL.
pub struct SeaOrmConnector {
    config: Config,
}

impl SeaOrmConnector {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl StoreConnector for SeaOrmConnector {
    async fn connect(&self) -> Result<DatabaseConnection, DbErr> {
        connect_to_database(&self.config).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    Init,
    StoreConnecting,
    StoreConnected,
    StoreFailed,
    Listening,
    ShuttingDown,
    Terminated,
}

/// Current bootstrap state, logging every transition.
#[derive(Debug)]
struct Phase {
    current: BootstrapState,
}

impl Phase {
    fn new() -> Self {
        Self {
            current: BootstrapState::Init,
        }
    }

    fn advance(&mut self, next: BootstrapState) {
        tracing::debug!("Bootstrap state {:?} -> {:?}", self.current, next);
        self.current = next;
    }
}

/// Outcome of a successful [`Bootstrap::prepare`].
pub enum Prepared<S> {
    /// Store connected, background service running, listener bound.
    Ready(ReadyServer<S>),
    /// Shutdown was requested before the store connected; nothing was bound.
    Interrupted,
}

/// Startup sequence for the API process.
///
/// The background service is built from the connected store, so it is given as a factory
/// rather than a value.
pub struct Bootstrap<C, F> {
    config: Config,
    connector: C,
    groups: HandlerGroups,
    make_service: F,
    phase: Phase,
}

impl<C, F, S> Bootstrap<C, F>
where
    C: StoreConnector,
    F: FnOnce(&DatabaseConnection) -> S,
    S: BackgroundService + 'static,
{
    /// Creates a bootstrap in the `Init` state.
    ///
    /// # Arguments
    /// - `config` - Application configuration (listener address, CORS, schedule)
    /// - `connector` - Opens the persistent store
    /// - `groups` - Handler groups mounted under the API prefixes
    /// - `make_service` - Builds the background service from the connected store
    pub fn new(config: Config, connector: C, groups: HandlerGroups, make_service: F) -> Self {
        Self {
            config,
            connector,
            groups,
            make_service,
            phase: Phase::new(),
        }
    }

    /// Connects the store, starts the background service and binds the listener.
    ///
    /// On any failure everything acquired so far is released again before returning.
    ///
    /// # Arguments
    /// - `shutdown` - Aborts the store connection attempt when fired
    ///
    /// # Returns
    /// - `Ok(Prepared::Ready)` - Listener bound, ready to serve
    /// - `Ok(Prepared::Interrupted)` - Shutdown requested before the store connected
    /// - `Err(StartupError::StoreConnection)` - Store refused the connection; nothing bound
    /// - `Err(StartupError::BackgroundService)` - Background service failed to start
    /// - `Err(StartupError::Bind)` - Listener address unavailable
    pub async fn prepare(
        self,
        shutdown: &mut ShutdownSignal,
    ) -> Result<Prepared<S>, StartupError> {
        let Self {
            config,
            connector,
            groups,
            make_service,
            mut phase,
        } = self;

        phase.advance(BootstrapState::StoreConnecting);

        let connected = tokio::select! {
            biased;
            _ = shutdown.wait() => None,
            result = connector.connect() => Some(result),
        };

        let db = match connected {
            None => {
                phase.advance(BootstrapState::ShuttingDown);
                tracing::info!("Shutdown requested before the database connected");
                phase.advance(BootstrapState::Terminated);
                return Ok(Prepared::Interrupted);
            }
            Some(Err(err)) => {
                phase.advance(BootstrapState::StoreFailed);
                tracing::error!("Database connection failed: {:?}", err);
                phase.advance(BootstrapState::Terminated);
                return Err(StartupError::StoreConnection(err));
            }
            Some(Ok(db)) => db,
        };

        phase.advance(BootstrapState::StoreConnected);
        tracing::info!("Database connected successfully!");

        let background = Arc::new(ServiceLifecycle::new(make_service(&db)));
        let app = router(groups, cors_layer(config.cors_allowed_origins.as_deref()))
            .with_state(AppState::new(db.clone()));

        if let Err(err) = background.start().await {
            tracing::error!("Failed to start {}: {}", background.service().name(), err);
            release_store(db).await;
            phase.advance(BootstrapState::Terminated);
            return Err(StartupError::BackgroundService(err));
        }

        let addr = config.bind_addr();
        let listener = match TcpListener::bind(addr).await {
            Ok(listener) => listener,
            Err(source) => {
                tracing::error!("Failed to bind {}: {}", addr, source);
                stop_background(&background).await;
                release_store(db).await;
                phase.advance(BootstrapState::Terminated);
                return Err(StartupError::Bind { addr, source });
            }
        };

        let port = listener
            .local_addr()
            .map(|local| local.port())
            .unwrap_or(config.port);

        phase.advance(BootstrapState::Listening);
        tracing::info!("Server is running on http://localhost:{}", port);

        Ok(Prepared::Ready(ReadyServer {
            listener,
            app,
            background,
            db,
            phase,
        }))
    }

    /// Runs the whole process lifetime: [`prepare`](Self::prepare), then serve until shutdown.
    pub async fn run(self, mut shutdown: ShutdownSignal) -> Result<(), StartupError> {
        match self.prepare(&mut shutdown).await? {
            Prepared::Ready(server) => server.serve(shutdown).await,
            Prepared::Interrupted => Ok(()),
        }
    }
}

/// Bound listener with everything it serves.
pub struct ReadyServer<S> {
    listener: TcpListener,
    app: Router,
    background: Arc<ServiceLifecycle<S>>,
    db: DatabaseConnection,
    phase: Phase,
}

impl<S: BackgroundService + 'static> ReadyServer<S> {
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn state(&self) -> BootstrapState {
        self.phase.current
    }

    pub fn background(&self) -> &Arc<ServiceLifecycle<S>> {
        &self.background
    }

    /// Serves requests until `shutdown` fires.
    ///
    /// When the signal fires the background service is stopped first, then the listener
    /// stops accepting and in-flight requests are drained. The store is closed last; a
    /// failure to close is logged and does not fail the shutdown.
    ///
    /// # Returns
    /// - `Ok(())` - Clean shutdown
    /// - `Err(StartupError::Serve)` - The server stopped with an I/O error
    pub async fn serve(self, mut shutdown: ShutdownSignal) -> Result<(), StartupError> {
        let Self {
            listener,
            app,
            background,
            db,
            mut phase,
        } = self;

        let on_signal = {
            let background = background.clone();

            async move {
                shutdown.wait().await;
                stop_background(&background).await;
                tracing::info!("Draining open connections");
            }
        };

        let served = axum::serve(listener, app)
            .with_graceful_shutdown(on_signal)
            .await;

        phase.advance(BootstrapState::ShuttingDown);

        // No-op after a signal; covers the server exiting on its own.
        stop_background(&background).await;
        release_store(db).await;

        phase.advance(BootstrapState::Terminated);

        served.map_err(StartupError::Serve)?;
        tracing::info!("Server stopped");

        Ok(())
    }
}

async fn stop_background<S: BackgroundService>(background: &ServiceLifecycle<S>) {
    if let Err(e) = background.stop().await {
        tracing::error!("Failed to stop {}: {}", background.service().name(), e);
    }
}

/// Closes the store pool, logging instead of failing.
async fn release_store(db: DatabaseConnection) {
    match db.close().await {
        Ok(()) => tracing::info!("Database connection closed"),
        Err(e) => tracing::warn!("Failed to close database connection: {}", e),
    }
}
