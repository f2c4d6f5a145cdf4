pub mod session {
    /// Cron expression for expired session cleanup
    /// Runs every hour at the top of the hour
    pub const CRON_EXPRESSION: &str = "0 0 * * * *";
}

pub mod otp {
    /// Cron expression for clearing expired verification codes
    /// Runs every hour at half past
    pub const CRON_EXPRESSION: &str = "0 30 * * * *";
}
