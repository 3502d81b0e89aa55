use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use costcraft_core::{assistant::Assistant, storage::FileStorage, store::RecordStore};
use std::path::PathBuf;

mod config;
mod report;

#[derive(Parser)]
#[command(name = "costcraft", version, about = "Product cost estimation and pricing toolkit")]
struct Cli {
    /// Directory holding the reference catalog and industry YAML files.
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,

    /// Directory where saved estimations and user records are stored.
    #[arg(long, default_value = "./data/storage")]
    storage_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a product estimation from a request file.
    Estimate {
        /// Estimation request YAML.
        #[arg(long, default_value = "costcraft-app/request.yaml")]
        request: PathBuf,
        /// Also write a CSV + markdown report under this directory.
        #[arg(long)]
        report_dir: Option<PathBuf>,
    },
    /// List saved estimations, most recent first.
    List {
        /// Case-insensitive search over name and description.
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one saved estimation in full.
    Show { id: String },
    /// Delete a saved estimation by id.
    Delete { id: String },
    /// Print the material catalog.
    Materials,
    /// Browse the industry directory.
    Industries {
        /// Case-insensitive search over name and description.
        #[arg(long)]
        search: Option<String>,
        /// Keep only industries carrying this tag.
        #[arg(long)]
        tag: Option<String>,
    },
    /// Register a new user and set the display name.
    Register {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        interests: Option<String>,
    },
    /// Store the display name used for greetings.
    Login { name: String },
    /// Forget the stored display name.
    Logout,
    /// Ask the assistant a question.
    Chat { message: String },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut store = RecordStore::new(
        FileStorage::new(&cli.storage_dir)
            .with_context(|| format!("Failed to open storage at {:?}", cli.storage_dir))?,
    );

    match cli.command {
        Command::Estimate {
            request,
            report_dir,
        } => {
            if let Some(name) = store.user_name() {
                println!("Welcome back, {}!", name);
            }
            let reference = config::ReferenceData::load(&cli.data_dir)?;
            let request = report::load_request(&request)?;
            report::run_estimation(&request, &reference, &mut store, report_dir.as_deref())?;
        }
        Command::List { search } => {
            let mut estimations = store.estimations();
            estimations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            if let Some(query) = &search {
                let query = query.to_lowercase();
                estimations.retain(|e| {
                    e.name.to_lowercase().contains(&query)
                        || e.description.to_lowercase().contains(&query)
                });
            }
            if estimations.is_empty() {
                println!(
                    "{}",
                    if search.is_some() {
                        "No estimations match your search criteria."
                    } else {
                        "You haven't saved any product estimations yet."
                    }
                );
            }
            for record in &estimations {
                println!("{}", report::format_listing(record));
            }
        }
        Command::Show { id } => {
            let estimations = store.estimations();
            match estimations.iter().find(|e| e.id == id) {
                Some(record) => report::print_details(record),
                None => bail!("No estimation with id '{}'", id),
            }
        }
        Command::Delete { id } => {
            if store.delete_estimation(&id) {
                println!("The product estimation has been removed.");
            } else {
                bail!("Could not delete the estimation");
            }
        }
        Command::Materials => {
            let reference = config::ReferenceData::load(&cli.data_dir)?;
            println!(
                "{:<18} {:>10} {:>10} {:>8} {:>10}",
                "Material", "Min", "Max", "Unit", "Default"
            );
            for name in reference.catalog.names() {
                // names() only yields keys present in the catalog
                let entry = reference.catalog.lookup(name).unwrap();
                let default = reference.catalog.default_cost_per_unit(name).unwrap();
                println!(
                    "{:<18} {:>10} {:>10} {:>8} {:>10}",
                    entry.name,
                    report::format_inr(entry.min),
                    report::format_inr(entry.max),
                    entry.unit,
                    report::format_inr(default)
                );
            }
        }
        Command::Industries { search, tag } => {
            let reference = config::ReferenceData::load(&cli.data_dir)?;
            let mut industries = reference.industries;
            if let Some(query) = &search {
                industries.retain(|i| i.matches_query(query));
            }
            if let Some(tag) = &tag {
                industries.retain(|i| i.has_tag(tag));
            }
            if industries.is_empty() {
                println!("No industries found.");
            }
            for industry in &industries {
                println!(
                    "{:<24} {:<18} {}",
                    industry.name,
                    industry.location,
                    industry.tags.join(", ")
                );
                println!("    {}", industry.description);
            }
        }
        Command::Register {
            full_name,
            email,
            interests,
        } => {
            let user = store.register_user(&full_name, &email, interests)?;
            println!("Welcome aboard, {}!", user.full_name);
        }
        Command::Login { name } => {
            store.set_user_name(&name)?;
            println!("Welcome back, {}!", name);
        }
        Command::Logout => {
            store.clear_user_name()?;
            println!("Logged out.");
        }
        Command::Chat { message } => {
            let mut assistant = Assistant::new();
            if let Some(response) = assistant.send(&message) {
                println!("{}", response);
            }
        }
    }

    Ok(())
}
