//! Trivia CLI entry point.
//!
//! Parses arguments, resolves configuration once and dispatches to a
//! command. Errors go to stderr with a non-zero exit code.

mod args;

use std::error::Error;
use std::path::{Path, PathBuf};

use args::{Cli, Command};
use clap::Parser;
use log::info;
use trivia_core::db::open_store;
use trivia_core::{
    default_log_dir, default_log_level, init_logging, seed_default_categories,
    SqliteCategoryRepository, StoreConfig,
};
use trivia_server::{ServerConfig, TriviaServer};

type CliResult<T> = Result<T, Box<dyn Error>>;

fn main() {
    if let Err(err) = run(Cli::parse()) {
        eprintln!("trivia: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let Cli {
        db_path,
        log_level,
        log_dir,
        command,
    } = cli;
    let setup = Setup {
        db_path,
        log_level,
        log_dir,
    };

    match command {
        Command::Ping => {
            println!("trivia_core ping={}", trivia_core::ping());
            println!("trivia_core version={}", trivia_core::core_version());
            Ok(())
        }
        Command::Seed => {
            let config = setup.prepare()?;
            seed_store(&config.store)
        }
        Command::Serve { host, port, seed } => {
            let config = with_bind_overrides(setup.prepare()?, host, port);
            if seed {
                seed_store(&config.store)?;
            }
            serve(config)
        }
    }
}

/// Flags shared by the commands that touch the store.
struct Setup {
    db_path: Option<PathBuf>,
    log_level: Option<String>,
    log_dir: Option<PathBuf>,
}

impl Setup {
    /// Resolves configuration and starts logging.
    fn prepare(self) -> CliResult<ServerConfig> {
        let mut config = ServerConfig::from_env()?;
        if let Some(db_path) = self.db_path {
            config.store.db_path = db_path;
        }

        let level = self
            .log_level
            .unwrap_or_else(|| default_log_level().to_string());
        let log_dir = self.log_dir.unwrap_or_else(default_log_dir);
        init_logging(&level, &path_str(&log_dir)?)?;
        Ok(config)
    }
}

fn with_bind_overrides(
    mut config: ServerConfig,
    host: Option<String>,
    port: Option<u16>,
) -> ServerConfig {
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    config
}

fn seed_store(store: &StoreConfig) -> CliResult<()> {
    let conn = open_store(store)?;
    let inserted = seed_default_categories(&SqliteCategoryRepository::new(&conn))?;
    info!(
        "event=categories_seed module=cli status=ok inserted={} db_path={}",
        inserted,
        store.db_path.display()
    );
    println!(
        "seeded {inserted} categories into {}",
        store.db_path.display()
    );
    Ok(())
}

fn serve(config: ServerConfig) -> CliResult<()> {
    let server = TriviaServer::new(config);
    println!("listening on http://{}", server.socket_addr());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server.start())?;
    Ok(())
}

fn path_str(path: &Path) -> CliResult<String> {
    path.to_str()
        .map(str::to_string)
        .ok_or_else(|| format!("path `{}` is not valid UTF-8", path.display()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ping_needs_no_configuration() {
        let cli = Cli::try_parse_from(["trivia", "--log-level", "bogus", "ping"]).unwrap();
        assert!(run(cli).is_ok());
    }

    #[test]
    fn bind_overrides_replace_only_given_values() {
        let base = ServerConfig::default();
        let config = with_bind_overrides(base.clone(), None, Some(8080));
        assert_eq!(config.host, base.host);
        assert_eq!(config.port, 8080);

        let config = with_bind_overrides(base, Some("0.0.0.0".to_string()), None);
        assert_eq!(config.socket_addr(), "0.0.0.0:5000");
    }
}
