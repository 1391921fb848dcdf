use asset_registry::{Asset, ListingsRegistry};
use log::{error, info};
use std::env;
use std::time::Instant;

fn main() {
    // Initialize the logger
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();

    let Some(listings_path) = args.first() else {
        eprintln!("Usage: asset-registry-cli <listings.csv> [conid_or_symbol] [exchange]");
        std::process::exit(2);
    };

    let start = Instant::now();
    let registry = match ListingsRegistry::from_path(listings_path) {
        Ok(registry) => registry,
        Err(e) => {
            error!("Failed to load listings: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        "Loaded {} listings in {} ms",
        registry.len(),
        start.elapsed().as_millis()
    );

    let Some(identifier_or_symbol) = args.get(1) else {
        println!("{} listings", registry.len());
        return;
    };

    match Asset::new(&registry, identifier_or_symbol, args.get(2).map(String::as_str)) {
        Ok(asset) => println!("{}", asset),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
