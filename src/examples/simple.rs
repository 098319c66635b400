//! Simple example of using ss-sub-update as a library.

use ss_sub_update::{RunSummary, UpdateConfig, Updater};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let providers: Vec<String> = std::env::args().skip(1).collect();
    if providers.is_empty() {
        eprintln!("usage: simple <subscription-url>...");
        return Ok(());
    }

    let config = UpdateConfig::builder()
        .providers(providers)
        // keep only Hong Kong and Japan servers
        .filters(vec!["HK", "JP"])
        .build();

    let updater = Updater::new(config);
    let result = updater.run().await;

    println!("{}", RunSummary::new(&updater.config.filters, &result));
    for server in &result.servers {
        println!("{}", serde_json::to_string(server)?);
    }

    Ok(())
}
