//! Domain types for the RTL bridge.
//!
//! Everything in this module is a pure function of its inputs: no I/O, no
//! async, no rendering surface.  That keeps the rules that decide *where* the
//! embedded app may navigate and *how* a login starts testable on their own.
//!
//! - **`config`** – [`SdkConfig`](config::SdkConfig), the immutable triple of
//!   program id, environment and app URL scheme supplied by the host.
//! - **`navigation`** – [`NavigationPolicy`](navigation::NavigationPolicy),
//!   which splits URLs into first-party (stay inside the surface) and
//!   external (hand to the host).
//! - **`token_forward`** – Builds the login entry URL that carries the host's
//!   one-time token into the web app.

pub mod config;
pub mod navigation;
pub mod token_forward;
