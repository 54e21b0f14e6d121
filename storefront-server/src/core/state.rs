//! Shared handler state

use std::sync::Arc;

use sqlx::SqlitePool;

use super::{BoxError, Config};
use crate::auth::JwtService;
use crate::db::DbService;
use crate::notify::{LogNotifier, Notifier, SesNotifier};
use crate::orders::OrderPipeline;
use crate::promotion::PromotionEvaluator;

/// Cloned into every handler; all fields are cheap handles
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub pool: SqlitePool,
    jwt_service: Arc<JwtService>,
    pub notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("environment", &self.config.environment)
            .field("jwt_service", &self.jwt_service)
            .finish_non_exhaustive()
    }
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool, notifier: Arc<dyn Notifier>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt_config()));
        Self {
            config: Arc::new(config),
            pool,
            jwt_service,
            notifier,
        }
    }

    /// Open the database, run migrations and pick the notifier
    pub async fn initialize(config: &Config) -> Result<Self, BoxError> {
        let db = DbService::new(&config.database_url).await?;
        tracing::info!(url = %config.database_url, "Database ready");

        let notifier: Arc<dyn Notifier> = match &config.ses_from_email {
            Some(from) => {
                tracing::info!(from = %from, "Order confirmations via SES");
                Arc::new(
                    SesNotifier::from_env(
                        from.clone(),
                        config.ses_region.clone(),
                        config.store_name.clone(),
                        config.currency.clone(),
                    )
                    .await,
                )
            }
            None => {
                tracing::warn!("SES_FROM_EMAIL not set, order confirmations are only logged");
                Arc::new(LogNotifier::new(
                    config.store_name.clone(),
                    config.currency.clone(),
                ))
            }
        };

        Ok(Self::new(config.clone(), db.pool, notifier))
    }

    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    pub fn order_pipeline(&self) -> OrderPipeline {
        OrderPipeline::new(self.pool.clone(), self.notifier.clone())
    }

    pub fn promotions(&self) -> PromotionEvaluator {
        PromotionEvaluator::new(self.pool.clone())
    }
}
