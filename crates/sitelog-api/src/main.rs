use sitelog_core::Config;

// Use mimalloc as the global allocator for better performance and lower fragmentation,
// especially when running on musl-based systems inside containers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    sitelog_api::setup::init_telemetry();

    // Load configuration (fails fast on misconfiguration)
    let config = Config::from_env()?;

    // Initialize the application (database, storage, auth client, routes)
    let (_state, router) = sitelog_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    sitelog_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
