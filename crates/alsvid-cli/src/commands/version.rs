//! Version command implementation.

/// Print version information.
pub fn execute() {
    println!("alsvid {}", env!("CARGO_PKG_VERSION"));
}
