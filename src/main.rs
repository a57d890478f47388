mod cli;
mod config;
mod db;
mod error;
mod fmt;
mod models;
mod reports;
mod search;
mod sort;
mod state;
mod transfer;
mod validators;

use clap::Parser;

use cli::{Cli, Commands, SettingsCommands};
use validators::RecordFields;

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let data_dir = config::resolve_data_dir(cli.data_dir.as_deref());
    log::debug!("data dir: {}", data_dir.display());

    let result = match cli.command {
        Commands::Init { path } => cli::init::run(path.or(cli.data_dir)),
        Commands::Add {
            description,
            amount,
            category,
            date,
            receipt,
        } => cli::records::add(&data_dir, description, amount, category, date, receipt),
        Commands::Edit {
            id,
            description,
            amount,
            category,
            date,
            receipt,
        } => cli::records::edit(
            &data_dir,
            &id,
            RecordFields {
                description,
                amount,
                category,
                date,
                receipt_url: receipt,
            },
        ),
        Commands::Show { id } => cli::records::show(&data_dir, &id),
        Commands::Delete { id } => cli::records::delete(&data_dir, &id),
        Commands::List {
            search,
            case_sensitive,
            sort,
            html,
        } => cli::records::list(&data_dir, search.as_deref(), case_sensitive, &sort, html),
        Commands::Dashboard => cli::dashboard::run(&data_dir),
        Commands::Settings { command } => match command {
            SettingsCommands::Show => cli::settings::show(&data_dir),
            SettingsCommands::Currency { code } => cli::settings::currency(&data_dir, &code),
            SettingsCommands::Rates { usd, eur } => {
                cli::settings::rates(&data_dir, usd.as_deref(), eur.as_deref())
            },
            SettingsCommands::Cap { value } => cli::settings::cap(&data_dir, value.as_deref()),
            SettingsCommands::Categories { list } => cli::settings::categories(&data_dir, &list),
            SettingsCommands::Theme { mode } => cli::settings::theme(&data_dir, &mode),
        },
        Commands::Export { output } => cli::transfer::export(&data_dir, output.as_deref()),
        Commands::Import { file } => cli::transfer::import(&data_dir, &file),
        Commands::Seed { output } => cli::transfer::seed(output.as_deref()),
        Commands::Status => cli::status::run(&data_dir),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
