use async_trait::async_trait;

use crate::domain::auth::errors::AuditError;
use crate::domain::auth::models::AuditRecord;
use crate::domain::auth::ports::AuditSink;

/// Target of every audit event (`RUST_LOG=audit=info`).
pub const AUDIT_TARGET: &str = "audit";

/// [`AuditSink`] emitting one structured `tracing` event per record.
#[derive(Debug, Default, Clone)]
pub struct TracingAuditSink;

impl TracingAuditSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn record(&self, record: &AuditRecord) -> Result<(), AuditError> {
        let user_id = record
            .user_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());

        tracing::info!(
            target: AUDIT_TARGET,
            event = %record.event,
            user_id = %user_id,
            occurred_at = %record.occurred_at.to_rfc3339(),
            "Audit event"
        );

        Ok(())
    }
}
