#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rpa_ai_server::start().await
}
