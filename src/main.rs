use std::env;

use dotenvy::dotenv;

use club_packages::models::config::ClientConfig;
use club_packages::models::definition::PackageDefinition;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let Some(path) = env::args().nth(1) else {
        log::error!("Usage: club-packages <package.yaml>");
        std::process::exit(2);
    };

    let client_config = match ClientConfig::load() {
        Ok(client_config) => client_config,
        Err(err) => {
            log::error!("Error loading client config: {err}");
            std::process::exit(1);
        }
    };

    let definition = match PackageDefinition::load(&path) {
        Ok(definition) => definition,
        Err(err) => {
            log::error!("Error loading package definition {path}: {err}");
            std::process::exit(1);
        }
    };

    match club_packages::run(client_config, definition).await {
        Ok(package_id) => println!("{package_id}"),
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    }
}
