use anchor_lang::prelude::*;

/// Program-level errors. Pricing errors live in `amm::AmmError`.
#[error_code]
pub enum MarketError {
    // --- validation ---
    #[msg("Funding must be greater than zero")]
    InvalidFunding,
    #[msg("Claim value must be greater than zero and buy at least one claim")]
    InvalidClaimValue,
    #[msg("Initial YES probability must be between 1 and 99")]
    InvalidProbability,
    #[msg("Locked percentage must be between 1 and 99")]
    InvalidLockPercentage,
    #[msg("Question exceeds maximum length")]
    QuestionTooLong,
    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    // --- authorization ---
    #[msg("Only the market owner can perform this action")]
    Unauthorized,
    #[msg("Only the market oracle can report the outcome")]
    UnauthorizedReporter,

    // --- lifecycle ---
    #[msg("Market outcome has already been reported")]
    AlreadyReported,
    #[msg("Market outcome has not been reported yet")]
    NotYetReported,

    // --- reserves ---
    #[msg("Market YES reserve is too small")]
    InsufficientYesReserve,
    #[msg("Market NO reserve is too small")]
    InsufficientNoReserve,
    #[msg("Market collateral balance is too small")]
    InsufficientCollateral,
    #[msg("Holder has no winning claims")]
    NoWinningClaims,
    #[msg("Claim mint is not the winning claim")]
    InvalidClaimMint,
    #[msg("Slippage tolerance exceeded")]
    SlippageExceeded,

    // --- external transfers ---
    #[msg("Claim ledger rejected the transfer")]
    ClaimTransferFailed,
    #[msg("Collateral transfer was rejected")]
    CollateralTransferFailed,

    #[msg("Math operation overflow")]
    MathOverflow,
}
