//! # Code Generation Strategies
//!
//! The verification ledger takes its one-time-code source as an injected
//! strategy, selected once at construction. Production deployments use
//! [`RandomCodeGenerator`]; demo and test environments may opt into
//! [`FixedCodeGenerator`] explicitly. There is no ambient mode inspection:
//! whoever constructs the ledger decides.

use rand::Rng;
use ubr_core::OneTimeCode;

/// Source of one-time verification codes.
///
/// Implementations must be `Send + Sync` so the ledger can be shared across
/// async tasks behind an `Arc`. The trait is object-safe to support runtime
/// strategy selection (random vs. fixed).
pub trait CodeGenerator: Send + Sync {
    /// Produce the next code.
    fn generate(&self) -> OneTimeCode;

    /// Human-readable name of this strategy (e.g. for startup logs).
    fn name(&self) -> &str;
}

/// Uniformly random 6-digit codes. The production strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> OneTimeCode {
        let n: u32 = rand::thread_rng().gen_range(100_000..=999_999);
        OneTimeCode::new(n.to_string()).expect("six-digit range is always a valid code")
    }

    fn name(&self) -> &str {
        "RandomCodeGenerator"
    }
}

/// Always returns one configured code.
///
/// An explicit demo/test override: every challenge issued by a ledger built
/// on this strategy carries the same code, so scripted clients can complete
/// verification without reading a delivery channel. Must never be selected
/// by default — construction sites opt in deliberately and should log the
/// choice.
#[derive(Debug, Clone)]
pub struct FixedCodeGenerator {
    code: OneTimeCode,
}

impl FixedCodeGenerator {
    /// Create a fixed generator around the given code.
    pub fn new(code: OneTimeCode) -> Self {
        Self { code }
    }
}

impl CodeGenerator for FixedCodeGenerator {
    fn generate(&self) -> OneTimeCode {
        self.code.clone()
    }

    fn name(&self) -> &str {
        "FixedCodeGenerator"
    }
}
