use soroban_sdk::contracterror;

/// Error codes returned by every fallible entry point.
///
/// # Code ranges
/// | Range   | Purpose                        |
/// |---------|--------------------------------|
/// | 1 – 9   | Lifecycle / initialisation     |
/// | 10 – 19 | Authentication & authorisation |
/// | 20 – 29 | Resource not found             |
/// | 30 – 39 | Validation / input             |
/// | 40 – 49 | Stake state                    |
/// | 50 – 59 | External calls & arithmetic    |
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    // ── Lifecycle (1–9) ──────────────────────────────────────
    NotInitialized = 1,
    AlreadyInitialized = 2,

    // ── Auth (10–19) ─────────────────────────────────────────
    /// Caller is not the configured admin, or not the pending admin when
    /// accepting an ownership transfer.
    Unauthorized = 10,
    NoPendingAdmin = 11,

    // ── Not-found (20–29) ────────────────────────────────────
    PoolNotFound = 20,
    LevelNotFound = 21,

    // ── Validation (30–39) ───────────────────────────────────
    /// The token already backs a pool, or is this contract's own address.
    DuplicateOrInvalidToken = 30,
    /// `min_amount > max_amount`, or a negative lower bound.
    InvalidRange = 31,
    /// A deposit amount or claim count that is not strictly positive.
    ZeroAmount = 32,
    InvalidPeriod = 33,
    InvalidReward = 34,

    // ── Stake state (40–49) ──────────────────────────────────
    NoActiveStake = 40,
    /// Fewer periods have elapsed than the threshold, or the requested
    /// count exceeds the elapsed periods.
    NotEligible = 41,
    /// A claim worth a non-zero reward found no rewarding address set.
    RewardingAddressNotSet = 42,
    /// Another operation on the same stake is still in flight.
    StakeLocked = 44,

    // ── External calls & arithmetic (50–59) ──────────────────
    TransferFailed = 50,
    ArithmeticOverflow = 51,
}
