fn main() {
    if let Err(err) = bandcoach_lib::run() {
        eprintln!("bandcoach: {}", err);
        std::process::exit(1);
    }
}
