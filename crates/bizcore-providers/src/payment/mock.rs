//! Mock payment provider
//!
//! Records charges in memory so refunds can be validated against them.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use bizcore_application::registry::{ProviderEntry, ProviderRegistry};
use bizcore_domain::error::{Error, Result};
use bizcore_domain::ports::providers::{
    ChargeReceipt, ChargeRequest, PaymentProvider, Provider, ProviderConfig,
};

/// Registry name of this provider
pub const PROVIDER_NAME: &str = "mock_pay";

/// Payment provider backed by an in-memory charge ledger
#[derive(Debug, Default)]
pub struct MockPaymentProvider {
    charges: DashMap<String, ChargeReceipt>,
}

impl MockPaymentProvider {
    /// Create a provider with an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of charges recorded so far
    pub fn charge_count(&self) -> usize {
        self.charges.len()
    }
}

#[async_trait]
impl Provider for MockPaymentProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn initialize(&self, _config: &ProviderConfig) -> Result<()> {
        Ok(())
    }

    async fn health(&self) -> Result<()> {
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.charges.clear();
        Ok(())
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn charge(&self, request: &ChargeRequest) -> Result<ChargeReceipt> {
        if request.amount_cents <= 0 {
            return Err(Error::invalid_argument("charge amount must be positive"));
        }
        let receipt = ChargeReceipt {
            charge_id: Uuid::new_v4().to_string(),
            amount_cents: request.amount_cents,
            currency: request.currency.clone(),
            created_at: Utc::now(),
        };
        self.charges.insert(receipt.charge_id.clone(), receipt.clone());
        Ok(receipt)
    }

    async fn refund(&self, charge_id: &str) -> Result<()> {
        if self.charges.remove(charge_id).is_none() {
            return Err(Error::not_found(format!("charge {charge_id}")));
        }
        Ok(())
    }
}

/// Register this provider
pub(crate) fn register(registry: &mut ProviderRegistry) {
    registry.payment.register(ProviderEntry::new(
        PROVIDER_NAME,
        "Mock payment provider with an in-memory charge ledger",
        |_config| {
            let provider: Arc<dyn PaymentProvider> = Arc::new(MockPaymentProvider::new());
            Ok(provider)
        },
    ));
}
