#[tokio::main]
async fn main() {
    if let Err(err) = statusdiff::run().await {
        eprintln!("statusdiff failed to start: {}", err);
        std::process::exit(1);
    }
}
