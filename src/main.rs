fn main() {
    if let Err(err) = treeslide::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
