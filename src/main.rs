#[tokio::main]
async fn main() {
    if let Err(e) = relay_offers::cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
