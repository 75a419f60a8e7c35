//! Console entry point: configuration, logging, and the entity chooser.

mod config;
mod forms;
mod input;
mod menu;
mod patient_menu;
mod screen;
mod vehicle_menu;

use std::io;

use anyhow::{Context, Result};

use cadastro_core::cep::ViaCep;
use cadastro_core::db::Database;

use crate::config::Config;
use crate::input::Prompter;

fn main() -> Result<()> {
    let config = Config::load()?;

    let default_level = if config.logging.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let db = Database::open(&config.database.path)
        .with_context(|| format!("abrindo o banco {}", config.database.path))?;
    log::info!("database ready at {}", config.database.path);

    let lookup = ViaCep::new();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock());

    screen::banner(prompter.writer(), "SISTEMA DE CADASTRO")?;
    loop {
        let choice = prompter.read_menu("Escolha o módulo:", &["Veículos", "Pacientes"], "Sair")?;
        match choice {
            Some(0) => vehicle_menu::run(&db, &mut prompter)?,
            Some(_) => patient_menu::run(&db, &mut prompter, &lookup)?,
            None => break,
        }
    }
    screen::banner(prompter.writer(), "ATÉ LOGO")?;
    Ok(())
}
