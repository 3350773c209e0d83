#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = wheelnav_demo::run_from_env() {
        tracing::error!(%error, "demo failed");
        eprintln!("{error}");
        std::process::exit(error.exit_code());
    }
}
