use api::config::FeedConfig;
use dioxus_logger::tracing;

fn main() {
    dioxus_logger::init(tracing::Level::INFO).expect("failed to init logger");

    // The price feed (scheduler + push-channel listener) runs on its own
    // runtime thread; the fullstack server owns the main one.
    std::thread::spawn(|| {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("failed to build feed runtime");

        let feed_config = FeedConfig::from_env();
        if let Err(e) = runtime.block_on(api::price_feed::run(feed_config)) {
            tracing::error!("price feed terminated: {e}");
        }
    });

    tracing::info!("starting fullstack pricing server");
    dioxus::launch(ui::App);
}
