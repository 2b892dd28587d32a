mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}
