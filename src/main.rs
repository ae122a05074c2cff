#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    saran_portfolio::backend::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    saran_portfolio::frontend::run();
}
