use asset_registry::{Asset, ListingsRegistry};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const LISTINGS_CSV: &str = "ConId,Symbol,SecType,PrimaryExchange,Timezone,ValidExchanges\n\
                            1,SPY,ETF,NYSE,America/New_York,\"NYSE,ARCA\"\n\
                            2,SPY,ETF,ARCA,America/New_York,ARCA\n\
                            265598,AAPL,STK,NASDAQ,America/New_York,\"SMART,ISLAND,NASDAQ\"\n";

fn benchmark_load_registry(c: &mut Criterion) {
    c.bench_function("load_registry", |b| {
        b.iter(|| ListingsRegistry::from_reader(black_box(LISTINGS_CSV.as_bytes())))
    });
}

fn benchmark_resolve_asset(c: &mut Criterion) {
    let registry = ListingsRegistry::from_reader(LISTINGS_CSV.as_bytes()).unwrap();

    c.bench_function("resolve_asset", |b| {
        b.iter(|| Asset::new(&registry, black_box("SPY"), black_box(Some("ARCA"))))
    });
}

criterion_group!(benches, benchmark_load_registry, benchmark_resolve_asset);
criterion_main!(benches);
