//! Waymark CLI - Travel Journal City Store

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use waymark_core::{BackendConfig, CityDraft, CityId, CityStorage, StoreConfig};
use waymark_state::{CityStore, LocalCityStorage, RemoteCityStorage};

#[derive(Parser)]
#[command(name = "waymark")]
#[command(about = "Waymark - Travel Journal City Store")]
#[command(version)]
struct Cli {
    /// Data directory for the local backend
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// REST API base URL; switches to the remote backend
    #[arg(short, long)]
    remote: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all saved cities
    List,

    /// Show one city and select it
    Show {
        /// City identifier
        id: String,
    },

    /// Add a city
    Add {
        /// City name
        #[arg(short, long)]
        name: String,

        /// Country
        #[arg(short, long)]
        country: Option<String>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,

        /// Visit date
        #[arg(long)]
        date: Option<String>,
    },

    /// Remove a city
    Remove {
        /// City identifier
        id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let storage = build_storage(&config.backend)?;
    let store = Arc::new(CityStore::new(storage));

    store.initialize().await;
    bail_on_store_error(&store);

    match cli.command {
        Commands::List => {
            let cities = store.cities();

            if cities.is_empty() {
                println!("No cities saved yet.");
            } else {
                println!("{:<16} {:<24} {}", "Id", "Name", "Fields");
                println!("{:-<16} {:-<24} {:-<6}", "", "", "");
                for city in cities {
                    println!(
                        "{:<16} {:<24} {}",
                        city.id.to_string(),
                        city.name().unwrap_or("-"),
                        city.fields.len()
                    );
                }
            }
        }

        Commands::Show { id } => {
            let id = CityId::new(id);
            store.get_city(&id).await;
            bail_on_store_error(&store);

            if let Some(city) = store.current_city() {
                println!("Id:   {}", city.id);
                for (name, value) in &city.fields {
                    println!("{}: {}", name, value);
                }
            }
        }

        Commands::Add {
            name,
            country,
            notes,
            date,
        } => {
            let mut draft = CityDraft::new().with_field("name", name);
            if let Some(country) = country {
                draft = draft.with_field("country", country);
            }
            if let Some(notes) = notes {
                draft = draft.with_field("notes", notes);
            }
            if let Some(date) = date {
                draft = draft.with_field("date", date);
            }

            let city = store.create_city(draft).await;
            bail_on_store_error(&store);

            println!(
                "Saved city '{}' with id {}",
                city.name().unwrap_or("?"),
                city.id
            );
        }

        Commands::Remove { id } => {
            let id = CityId::new(id);
            store.delete_city(&id).await;
            bail_on_store_error(&store);

            println!("Removed city {}", id);
        }
    }

    Ok(())
}

fn build_config(cli: &Cli) -> StoreConfig {
    let backend = if let Some(base_url) = &cli.remote {
        BackendConfig::Remote {
            base_url: base_url.clone(),
        }
    } else {
        let data_dir = cli
            .data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join("waymark")))
            .unwrap_or_else(|| PathBuf::from("./data"));
        BackendConfig::Local { data_dir }
    };

    StoreConfig {
        backend,
        ..StoreConfig::default()
    }
}

fn build_storage(backend: &BackendConfig) -> anyhow::Result<Arc<dyn CityStorage>> {
    let storage: Arc<dyn CityStorage> = match backend {
        BackendConfig::Local { data_dir } => Arc::new(LocalCityStorage::open(data_dir)?),
        BackendConfig::Remote { base_url } => Arc::new(RemoteCityStorage::new(base_url)?),
    };
    Ok(storage)
}

fn bail_on_store_error(store: &CityStore) {
    let error = store.error();
    if !error.is_empty() {
        eprintln!("Error: {}", error);
        std::process::exit(1);
    }
}
