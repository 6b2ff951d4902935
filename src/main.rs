use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;
use simulado::{Catalog, RunOptions};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding the subject files
    #[arg(short, long, default_value = "materia")]
    materia: PathBuf,

    /// Subject to load immediately, skipping the selection screen
    #[arg(short, long)]
    subject: Option<String>,

    /// Log filter when RUST_LOG is unset
    #[arg(short, long, default_value = "error")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level)).init();

    let catalog = match Catalog::scan(&args.materia) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Erro ao listar matérias: {}", e);
            std::process::exit(1);
        }
    };

    let options = RunOptions {
        subject: args.subject,
    };

    if let Err(e) = simulado::run(catalog, options).await {
        eprintln!("Erro: {}", e);
        std::process::exit(1);
    }
}
