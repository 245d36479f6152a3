//! Maintenance entry point: loads configuration, opens the database and
//! applies pending migrations.

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use env_logger::Env;

use recsite::db::establish_connection_pool;
use recsite::models::config::AppConfig;
use recsite::repository::{CategoryListQuery, CategoryReader, DieselRepository};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

fn main() {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let app_config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&app_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    if app_config.run_migrations {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                log::error!("Failed to get database connection: {e}");
                std::process::exit(1);
            }
        };
        match conn.run_pending_migrations(MIGRATIONS) {
            Ok(applied) => log::info!("Applied {} pending migrations", applied.len()),
            Err(e) => {
                log::error!("Failed to run migrations: {e}");
                std::process::exit(1);
            }
        }
    }

    let repo = DieselRepository::new(pool);
    match repo.list_categories(CategoryListQuery::default()) {
        Ok((total, _)) => log::info!(
            "Database {} is ready with {total} categories",
            app_config.database_url
        ),
        Err(e) => {
            log::error!("Failed to read categories: {e}");
            std::process::exit(1);
        }
    }
}
