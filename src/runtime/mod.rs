/// Runtime event stream payloads.
pub mod events;
/// Single-writer catalog handle.
pub mod handle;
