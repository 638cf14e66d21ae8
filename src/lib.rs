// Library root
// ------------
// The binary (`main.rs`) is a thin wrapper over these modules:
// - `cli`: positional argument parsing.
// - `api`: payload construction and the blocking upload call.
// - `ui`: the stdout report of the server's answer.
pub mod api;
pub mod cli;
pub mod ui;
