// storefront-client/examples/checkout.rs
// Scan-to-checkout walkthrough against a running backend

use storefront_client::{ClientConfig, OrderTracker, SessionManager, StorefrontApi, TableStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        println!("Usage: {} <session_token> <table_number>", args[0]);
        println!("  Example: {} tok123 5", args[0]);
        return Ok(());
    }

    let token = &args[1];
    let table_number: i64 = args[2].parse()?;

    let base_url = std::env::var("STOREFRONT_API_URL")
        .unwrap_or_else(|_| "http://localhost:8080".to_string());
    let data_dir = std::env::var("STOREFRONT_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
    std::fs::create_dir_all(&data_dir)?;

    let config = ClientConfig::new(&base_url).with_data_dir(&data_dir);
    let store = TableStore::open(config.store_path().expect("data dir is set"))?;
    let api = config.build_http_client();

    let mut session = SessionManager::new(api.clone(), store.clone());
    let mut tracker = OrderTracker::new(api.clone(), store);

    if !session.initialize_session(token, table_number).await {
        anyhow::bail!("Session rejected by {base_url}");
    }
    tracker.initialize_session(token, table_number);
    tracing::info!(table = table_number, "Session established");

    let menu = api.fetch_menu().await?;
    let Some(item) = menu.first() else {
        anyhow::bail!("Menu is empty");
    };
    tracing::info!(item = %item.name, price = item.price, "Adding first menu item");

    session.add_to_cart(item);
    session.add_to_cart(item);
    tracing::info!(
        items = session.total_items(),
        total = session.total_price(),
        "Cart ready"
    );

    let outcome = session.place_order(&mut tracker).await;
    if !outcome.success {
        anyhow::bail!("Checkout failed: {}", outcome.message);
    }

    let stats = tracker.order_stats();
    tracing::info!(
        orders = stats.total,
        pending = stats.pending,
        amount = stats.total_amount,
        "Order placed"
    );

    Ok(())
}
