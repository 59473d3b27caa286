//! Shared client-side state.
//!
//! The session store is the only stateful component; page-local state
//! (lists, modal flags, form fields) lives in signals inside each page.

pub mod session;
