// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Order data model, assembly, lifecycle and commands. Tier and payment
// selection live in `fulfillment`; subscribers live in `notification`.
//
// ============================================================================

pub mod order;
