//! Fleet management menu.

use std::io::{BufRead, Write};

use anyhow::Result;

use cadastro_core::catalog::{Catalog, VehicleColumn};
use cadastro_core::db::{Database, DbResult};

use crate::forms;
use crate::input::Prompter;
use crate::menu::{self, Entity};
use crate::screen;

pub struct Vehicles;

impl Entity for Vehicles {
    type Column = VehicleColumn;
    const NOUN: &'static str = "veículo";
    const EXPORT_STEM: &'static str = "veiculos";

    fn delete_by_id(db: &Database, id: i64) -> DbResult<bool> {
        db.delete_vehicle(id)
    }

    fn delete_all(db: &Database) -> DbResult<usize> {
        db.delete_all_vehicles()
    }
}

fn insert<R: BufRead, W: Write>(db: &Database, prompter: &mut Prompter<R, W>) -> Result<()> {
    let vehicle = forms::vehicle_form(prompter)?;
    let id = db.insert_vehicle(&vehicle)?;
    log::info!("vehicle {id} inserted");
    writeln!(prompter.writer(), "Veículo cadastrado com o ID {id}.")?;
    Ok(())
}

fn update_full<R: BufRead, W: Write>(db: &Database, prompter: &mut Prompter<R, W>) -> Result<()> {
    if !menu::preview::<Vehicles, _, _>(db, prompter)? {
        return Ok(());
    }
    let id = prompter.read_int("ID do veículo a atualizar: ")?;
    if !menu::show_by_id::<Vehicles, _, _>(db, prompter, id)? {
        return Ok(());
    }
    writeln!(prompter.writer(), "Informe os novos dados:")?;
    let vehicle = forms::vehicle_form(prompter)?;
    if db.update_vehicle(id, &vehicle)? {
        writeln!(prompter.writer(), "Veículo atualizado.")?;
    } else {
        writeln!(prompter.writer(), "Nenhum veículo com o ID {id}.")?;
    }
    Ok(())
}

fn update_field<R: BufRead, W: Write>(db: &Database, prompter: &mut Prompter<R, W>) -> Result<()> {
    if !menu::preview::<Vehicles, _, _>(db, prompter)? {
        return Ok(());
    }
    let id = prompter.read_int("ID do veículo a atualizar: ")?;
    if !menu::show_by_id::<Vehicles, _, _>(db, prompter, id)? {
        return Ok(());
    }

    let columns: Vec<VehicleColumn> = VehicleColumn::all()
        .iter()
        .copied()
        .filter(|c| c.updatable())
        .collect();
    let labels: Vec<&str> = columns.iter().map(|c| c.label()).collect();
    let column = columns[prompter.read_choice("Campo a alterar:", &labels)?];

    let value = forms::vehicle_field_value(prompter, column)?;
    if db.update_vehicle_column(id, column, &value)? {
        writeln!(prompter.writer(), "Campo atualizado.")?;
    } else {
        writeln!(prompter.writer(), "Nenhum veículo com o ID {id}.")?;
    }
    Ok(())
}

/// Vehicle menu loop. Returns when the operator picks "Voltar".
pub fn run<R: BufRead, W: Write>(db: &Database, prompter: &mut Prompter<R, W>) -> Result<()> {
    loop {
        screen::banner(prompter.writer(), "GESTÃO DE VEÍCULOS")?;
        let choice = prompter.read_menu(
            "O que deseja fazer?",
            &[
                "Cadastrar veículo",
                "Consultar / exportar",
                "Atualizar todos os dados",
                "Atualizar um campo",
                "Excluir por ID",
                "Excluir todos",
            ],
            "Voltar",
        )?;
        let result = match choice {
            Some(0) => insert(db, prompter),
            Some(1) => menu::query_flow::<Vehicles, _, _>(db, prompter),
            Some(2) => update_full(db, prompter),
            Some(3) => update_field(db, prompter),
            Some(4) => menu::delete_flow::<Vehicles, _, _>(db, prompter),
            Some(_) => menu::delete_all_flow::<Vehicles, _, _>(db, prompter),
            None => return Ok(()),
        };
        if let Err(error) = result {
            log::error!("vehicle operation failed: {error:#}");
            writeln!(prompter.writer(), "Erro: {error}")?;
        }
        screen::separator(prompter.writer())?;
    }
}
