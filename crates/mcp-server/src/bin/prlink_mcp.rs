use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    prlink_mcp::main_entry().await
}
