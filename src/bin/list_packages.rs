//! Lists the business's packages; `delete <id>` and `toggle <id>` manage one.

use std::env;

use dotenvy::dotenv;

use club_packages::dto::packages::PackagesPageData;
use club_packages::models::config::ClientConfig;
use club_packages::repository::HttpRepository;
use club_packages::services::packages::{delete_package, load_packages, toggle_package_active};

fn print_packages(data: &PackagesPageData) {
    for package in &data.packages {
        let window = match (package.start_date, package.end_date) {
            (Some(start), Some(end)) => format!("{start} .. {end}"),
            _ => "-".to_string(),
        };
        println!(
            "{:>6}  {:<10} {:<8} {:<24} {}",
            package.id,
            package.status.label(),
            if package.is_active { "active" } else { "inactive" },
            window,
            package.business_name,
        );
    }
    println!(
        "{} packages, {} active, {} approved",
        data.total, data.active, data.approved
    );
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args: Vec<String> = env::args().skip(1).collect();

    let client_config = match ClientConfig::load() {
        Ok(client_config) => client_config,
        Err(err) => {
            log::error!("Error loading client config: {err}");
            std::process::exit(1);
        }
    };

    let repo = match HttpRepository::from_config(&client_config) {
        Ok(repo) => repo,
        Err(err) => {
            log::error!("Failed to build HTTP client: {err}");
            std::process::exit(1);
        }
    };

    let data = match load_packages(&repo).await {
        Ok(data) => data,
        Err(err) => {
            log::error!("Error loading packages: {err}");
            std::process::exit(1);
        }
    };

    let result = match args.as_slice() {
        [] => Ok(data),
        [command, id] if command == "delete" || command == "toggle" => {
            let Ok(id) = id.parse::<i32>() else {
                log::error!("Invalid package id: {id}");
                std::process::exit(2);
            };
            if command == "delete" {
                delete_package(&repo, data.packages, id).await
            } else {
                toggle_package_active(&repo, data.packages, id).await
            }
        }
        _ => {
            log::error!("Usage: list-packages [delete <id> | toggle <id>]");
            std::process::exit(2);
        }
    };

    match result {
        Ok(data) => print_packages(&data),
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    }
}
