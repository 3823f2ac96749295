//! Trait seam between the orchestrator and the outside world.
//!
//! The orchestrator never performs I/O itself. It emits a `Command::Verify`
//! and the host executes it against a `VerificationClient`, on whatever
//! thread it likes, then feeds the outcome back as an `Action`.

use veritas_contracts::{
    error::VeritasResult,
    request::VerificationRequest,
    response::FactCheckResponse,
};

/// The external verification service.
///
/// Implementations are the only code allowed to touch the network. They are
/// treated as opaque: the orchestrator only sees a report or an error.
pub trait VerificationClient: Send + Sync {
    /// Run one verification call.
    ///
    /// Must fail with `VeritasError::CredentialMissing` before any network
    /// I/O when no access credential is configured. Every other failure is
    /// reported as a single error whose `user_message()` is fit for display.
    fn verify(&self, request: &VerificationRequest) -> VeritasResult<FactCheckResponse>;
}

impl<T: VerificationClient + ?Sized> VerificationClient for Box<T> {
    fn verify(&self, request: &VerificationRequest) -> VeritasResult<FactCheckResponse> {
        (**self).verify(request)
    }
}

impl<T: VerificationClient + ?Sized> VerificationClient for std::sync::Arc<T> {
    fn verify(&self, request: &VerificationRequest) -> VeritasResult<FactCheckResponse> {
        (**self).verify(request)
    }
}
