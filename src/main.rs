use signalhub::{App, ConfigBuilder};

#[tokio::main]
async fn main() {
    let config = ConfigBuilder::new()
        .from_env()
        .build()
        .expect("invalid configuration");

    signalhub::init_tracing_with_config(&config);

    if let Err(err) = App::with_config(config).serve().await {
        tracing::error!(error = %err, "Server exited with error");
        std::process::exit(1);
    }
}
