fn main() {
    if let Err(err) = sigbracket::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
