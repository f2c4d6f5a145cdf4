//! Scheduler for periodic maintenance tasks.
//!
//! This module provides a cron-based job scheduler that keeps the database tidy: expired
//! sessions are deleted and verification codes past their expiry are cleared.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::error::Error;

pub mod cleanup;
pub mod config;

use self::cleanup::{clear_expired_otps, delete_expired_sessions};

/// Job scheduler for background maintenance tasks.
pub struct Scheduler {
    db: DatabaseConnection,
    sched: JobScheduler,
}

impl Scheduler {
    /// Creates a new instance of [`Scheduler`].
    ///
    /// # Returns
    /// - `Ok(Scheduler)` - Successfully created scheduler instance
    /// - `Err(Error)` - Failed to initialize the underlying job scheduler
    pub async fn new(db: DatabaseConnection) -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;
        Ok(Self { db, sched })
    }

    /// Registers all scheduled jobs and starts the scheduler.
    ///
    /// The following jobs are registered:
    /// - Expired session cleanup
    /// - Expired verification code cleanup
    ///
    /// # Returns
    /// - `Ok(JobScheduler)` - The running scheduler, kept alive by the caller
    /// - `Err(Error)` - Failed to register a job or start the scheduler
    pub async fn start(mut self) -> Result<JobScheduler, Error> {
        self.schedule_job(
            config::session::CRON_EXPRESSION,
            "expired session",
            delete_expired_sessions,
        )
        .await?;

        self.schedule_job(
            config::otp::CRON_EXPRESSION,
            "expired OTP",
            clear_expired_otps,
        )
        .await?;

        self.sched.start().await?;

        Ok(self.sched)
    }

    /// Schedules a recurring job with the specified cron expression.
    ///
    /// On execution, the job logs the number of rows cleaned up (on success) or any error that
    /// occurred.
    ///
    /// # Arguments
    /// - `cron` - Cron expression defining when the job should run (e.g., "0 0 * * * *" for hourly)
    /// - `name` - Human-readable name for the job (used in log messages)
    /// - `function` - Async cleanup function returning the number of affected rows
    pub async fn schedule_job<F, Fut>(
        &mut self,
        cron: &str,
        name: &str,
        function: F,
    ) -> Result<(), Error>
    where
        F: Fn(DatabaseConnection) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<usize, Error>> + Send + 'static,
    {
        let db = self.db.clone();
        let name = name.to_string();
        let function = Arc::new(function);

        self.sched
            .add(Job::new_async(cron, move |_, _| {
                let db = db.clone();
                let name = name.clone();
                let function = Arc::clone(&function);

                Box::pin(async move {
                    match function(db).await {
                        Ok(count) => tracing::debug!("Cleaned up {} {} row(s)", count, name),
                        Err(e) => tracing::error!("Error running {} cleanup: {:?}", name, e),
                    }
                })
            })?)
            .await?;

        Ok(())
    }
}
