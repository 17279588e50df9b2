//! University directory — entry point.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use uni_directory::slug_collisions;
use uni_directory_server::api::{explore, ExploreParams};
use uni_directory_server::config::open_directory;
use uni_directory_server::render::{render_countries, render_detail, render_table};
use uni_directory_server::types::ExploreResponse;

#[derive(Parser)]
#[command(
    name = "uni-directory",
    about = "University directory — search tuition, salary and visa data by country",
    version
)]
struct Cli {
    /// Directory holding the per-country dataset files.
    #[arg(short, long, global = true)]
    data_dir: Option<String>,

    /// JSON country catalog (defaults to the built-in table).
    #[arg(long, global = true)]
    catalog: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the explore API over HTTP.
    #[cfg(feature = "http")]
    Serve {
        /// Listen address (host:port).
        #[arg(long, default_value = "127.0.0.1:3100")]
        addr: String,
    },

    /// Search universities and print the matches.
    Search {
        /// Restrict to one country code.
        #[arg(short, long)]
        country: Option<String>,

        /// Text matched against name, city and programs.
        #[arg(short, long)]
        query: Option<String>,

        /// GRE requirement: yes or no.
        #[arg(long)]
        gre: Option<String>,

        /// Visa risk tier (low, medium, high).
        #[arg(long)]
        visa: Option<String>,

        /// Program keyword.
        #[arg(long)]
        program: Option<String>,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Show one university by country and slug.
    Show {
        country: String,
        slug: String,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// List configured countries with their university counts.
    Countries,

    /// Load every dataset and report counts, failures and slug collisions.
    Validate,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   uni-directory completions bash > ~/.local/share/bash-completion/completions/uni-directory
    ///   uni-directory completions zsh > ~/.zfunc/_uni-directory
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },

    /// Launch interactive REPL mode.
    Repl,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let open = || open_directory(cli.data_dir.as_deref(), cli.catalog.as_deref());

    match cli.command {
        #[cfg(feature = "http")]
        Commands::Serve { addr } => {
            use uni_directory_server::transport::HttpTransport;

            tracing::info!("University directory API");
            let transport = HttpTransport::new(open()?);
            transport.run(&addr).await?;
        }

        Commands::Search {
            country,
            query,
            gre,
            visa,
            program,
            json,
        } => {
            let params = ExploreParams {
                country,
                slug: None,
                q: query,
                gre,
                visa,
                program,
            };
            match explore(&open()?, &params)? {
                ExploreResponse::List {
                    universities,
                    countries,
                    total,
                } => {
                    if json {
                        let body = serde_json::json!({
                            "universities": universities,
                            "countries": countries,
                            "total": total,
                        });
                        println!("{}", serde_json::to_string_pretty(&body)?);
                    } else {
                        print!("{}", render_table(&universities));
                    }
                }
                ExploreResponse::University { university } => {
                    print!("{}", render_detail(&university));
                }
            }
        }

        Commands::Show {
            country,
            slug,
            json,
        } => {
            let params = ExploreParams {
                country: Some(country),
                slug: Some(slug),
                ..ExploreParams::default()
            };
            match explore(&open()?, &params) {
                Ok(ExploreResponse::University { university }) => {
                    if json {
                        let body = serde_json::json!({ "university": university });
                        println!("{}", serde_json::to_string_pretty(&body)?);
                    } else {
                        print!("{}", render_detail(&university));
                    }
                }
                Ok(ExploreResponse::List { .. }) => {
                    eprintln!("Both a country and a slug are required");
                    std::process::exit(2);
                }
                Err(e) if e.is_not_found() => {
                    eprintln!("{}", e.public_message());
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Commands::Countries => {
            print!("{}", render_countries(&open()?.countries()));
        }

        Commands::Validate => {
            let directory = open()?;
            let mut failed = 0;
            println!("Data dir: {}", directory.data_dir().display());
            for entry in directory.catalog().entries() {
                match directory.try_universities(&entry.code) {
                    Ok(universities) => {
                        println!(
                            "  {} {:<12} {} ({} universities)",
                            entry.display_flag(),
                            entry.code,
                            entry.file,
                            universities.len()
                        );
                        for collision in slug_collisions(&universities) {
                            println!(
                                "      slug collision '{}': '{}' shadows '{}'",
                                collision.slug, collision.first, collision.shadowed
                            );
                        }
                    }
                    Err(e) => {
                        failed += 1;
                        println!(
                            "  {} {:<12} {} FAILED: {e}",
                            entry.display_flag(),
                            entry.code,
                            entry.file
                        );
                    }
                }
            }
            if failed > 0 {
                eprintln!("{failed} dataset(s) failed to load");
                std::process::exit(1);
            }
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "uni-directory", &mut std::io::stdout());
        }

        Commands::Repl => {
            uni_directory_server::repl::run(&open()?)?;
        }
    }

    Ok(())
}
