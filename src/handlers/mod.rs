// Handlers are split by security tier:
// Public (no token) → Protected (valid `Token` header required)
pub mod public;
pub mod protected;
