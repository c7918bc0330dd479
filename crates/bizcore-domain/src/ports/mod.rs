//! Port definitions
//!
//! Traits implemented by pluggable backends. Every backend category
//! shares the uniform [`providers::Provider`] lifecycle and adds a
//! small category-specific surface.

pub mod providers;

pub use providers::{
    AuthProvider, ChargeReceipt, ChargeRequest, DatabaseProvider, EmailMessage, EmailProvider,
    IdProvider, PaymentProvider, Principal, Provider, ProviderConfig, ScheduledJob,
    SchedulerProvider, StorageProvider, TabularProvider, TranslationProvider,
};
