//! # Dogana (Edge Access Gate)
//!
//! `dogana` is a small HTTP service that fronts a shipping-dashboard web
//! application and decides, per request, whether the caller may pass.
//!
//! The decision is a pure function of the request path and the presence of a
//! valid session credential:
//!
//! | session | route     | decision                                   |
//! |---------|-----------|--------------------------------------------|
//! | absent  | public    | allow                                      |
//! | absent  | protected | redirect to sign-in, keeping `redirect_url`|
//! | present | public    | redirect to the dashboard landing page     |
//! | present | protected | allow                                      |
//!
//! Webhook callback routes are always allowed regardless of credentials, and
//! unrecognized paths default to protected. Credential validity is delegated
//! to an external identity service; any verification failure or timeout fails
//! closed (the caller counts as unauthenticated).
//!
//! The route matcher table is compiled once at startup. A pattern that fails
//! to compile aborts the process: the gate never serves with an invalid table.

pub mod cli;
pub mod gate;
