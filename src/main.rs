#[tokio::main]
async fn main() -> anyhow::Result<()> {
    lgbtech::start_server().await
}
