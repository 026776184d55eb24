use anyhow::Result;
use clap::Parser;

mod repl;

#[derive(Parser)]
#[command(name = "burrowdb")]
#[command(author, version, about = "Single-file B+Tree row store", long_about = None)]
struct Cli {
    /// Path to the database file
    #[arg(value_name = "DATABASE")]
    database: Option<String>,

    /// Open the database read-only
    #[arg(long)]
    read_only: bool,

    /// Page cache capacity in pages
    #[arg(long, default_value_t = 1000)]
    cache_size: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let database = match cli.database {
        Some(path) => path,
        None => {
            println!("Must supply a database filename.");
            std::process::exit(1);
        }
    };

    repl::start(&database, cli.read_only, cli.cache_size)
}
