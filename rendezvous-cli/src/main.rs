//! Entry point for the `rendezvous` command-line interface.
#![forbid(unsafe_code)]

#[expect(
    clippy::print_stderr,
    reason = "the binary reports fatal errors on stderr"
)]
fn main() {
    rendezvous_cli::logging::init();
    if let Err(err) = rendezvous_cli::run() {
        eprintln!("rendezvous: {err}");
        std::process::exit(1);
    }
}
