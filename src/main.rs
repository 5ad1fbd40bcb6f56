use std::error::Error;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use subscription_worker::adapters::billing::PlatformRouter;
use subscription_worker::adapters::events::RedisNotificationPublisher;
use subscription_worker::adapters::mysql::{
    connect_pool, MySqlCredentialReader, MySqlDeviceReader, MySqlSubscriptionRepository,
};
use subscription_worker::application::{
    OutcomePublisher, ProcessExpiredSubscriptionsCommand, ProcessExpiredSubscriptionsHandler,
};
use subscription_worker::config::AppConfig;
use subscription_worker::domain::subscription::ReceiptSuffixPolicy;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    tracing::info!(
        environment = ?config.worker.environment,
        batch_size = config.worker.batch_size,
        "Starting subscription worker"
    );

    let pool = connect_pool(&config.database).await?;
    let notifications = RedisNotificationPublisher::connect(&config.notifications).await?;

    let policy = Arc::new(ReceiptSuffixPolicy::new(config.worker.retry_base_delay()));
    let validator = PlatformRouter::from_config(&config.billing, policy)?;

    let handler = ProcessExpiredSubscriptionsHandler::new(
        Arc::new(MySqlSubscriptionRepository::new(pool.clone())),
        Arc::new(MySqlCredentialReader::new(pool.clone())),
        Arc::new(MySqlDeviceReader::new(pool.clone())),
        Arc::new(validator),
        OutcomePublisher::new(
            Arc::new(notifications),
            config.notifications.channel.clone(),
            config.notifications.publish_timeout(),
        ),
    );

    let result = handler
        .handle(ProcessExpiredSubscriptionsCommand {
            batch_size: config.worker.batch_size,
        })
        .await;

    pool.close().await;

    match result {
        Ok(report) => {
            if !report.is_clean() {
                for failure in &report.failures {
                    tracing::warn!(
                        subscription_id = %failure.subscription_id,
                        stage = failure.error.stage(),
                        error = %failure.error,
                        "Unreconciled subscription"
                    );
                }
            }
            tracing::info!(
                processed = report.processed(),
                failed = report.failures.len(),
                "Subscription worker finished"
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Reconcile pass aborted");
            Err(e.into())
        }
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.worker.log_level));

    if config.is_production() {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
