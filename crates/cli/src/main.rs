fn main() {
    if let Err(e) = jarslim_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
