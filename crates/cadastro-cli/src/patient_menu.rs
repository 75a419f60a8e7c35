//! Patient management menu.

use std::io::{BufRead, Write};

use anyhow::Result;

use cadastro_core::catalog::{Catalog, PatientColumn};
use cadastro_core::cep::AddressLookup;
use cadastro_core::db::{Database, DbResult};
use cadastro_core::query::SqlValue;

use crate::forms;
use crate::input::Prompter;
use crate::menu::{self, Entity};
use crate::screen;

pub struct Patients;

impl Entity for Patients {
    type Column = PatientColumn;
    const NOUN: &'static str = "paciente";
    const EXPORT_STEM: &'static str = "pacientes";

    fn delete_by_id(db: &Database, id: i64) -> DbResult<bool> {
        db.delete_patient(id)
    }

    fn delete_all(db: &Database) -> DbResult<usize> {
        db.delete_all_patients()
    }
}

fn insert<R: BufRead, W: Write>(
    db: &Database,
    prompter: &mut Prompter<R, W>,
    lookup: &dyn AddressLookup,
) -> Result<()> {
    let patient = forms::patient_form(prompter, lookup)?;
    let id = db.insert_patient(&patient)?;
    log::info!("patient {id} inserted");
    writeln!(prompter.writer(), "Paciente cadastrado com o ID {id}.")?;
    Ok(())
}

fn update_full<R: BufRead, W: Write>(
    db: &Database,
    prompter: &mut Prompter<R, W>,
    lookup: &dyn AddressLookup,
) -> Result<()> {
    if !menu::preview::<Patients, _, _>(db, prompter)? {
        return Ok(());
    }
    let id = prompter.read_int("ID do paciente a atualizar: ")?;
    if !menu::show_by_id::<Patients, _, _>(db, prompter, id)? {
        return Ok(());
    }
    writeln!(prompter.writer(), "Informe os novos dados:")?;
    let patient = forms::patient_form(prompter, lookup)?;
    if db.update_patient(id, &patient)? {
        writeln!(prompter.writer(), "Paciente atualizado.")?;
    } else {
        writeln!(prompter.writer(), "Nenhum paciente com o ID {id}.")?;
    }
    Ok(())
}

/// Changing the CEP refreshes every address column from the lookup; other
/// columns take a single typed value.
fn update_field<R: BufRead, W: Write>(
    db: &Database,
    prompter: &mut Prompter<R, W>,
    lookup: &dyn AddressLookup,
) -> Result<()> {
    if !menu::preview::<Patients, _, _>(db, prompter)? {
        return Ok(());
    }
    let id = prompter.read_int("ID do paciente a atualizar: ")?;
    if !menu::show_by_id::<Patients, _, _>(db, prompter, id)? {
        return Ok(());
    }

    let columns: Vec<PatientColumn> = PatientColumn::all()
        .iter()
        .copied()
        .filter(|c| c.updatable())
        .collect();
    let labels: Vec<&str> = columns.iter().map(|c| c.label()).collect();
    let column = columns[prompter.read_choice("Campo a alterar:", &labels)?];

    let updated = if column == PatientColumn::Cep {
        let address = prompter.read_address(lookup)?;
        let changes = [
            (PatientColumn::Cep, address.cep),
            (PatientColumn::Rua, address.street),
            (PatientColumn::Bairro, address.neighborhood),
            (PatientColumn::Cidade, address.city),
            (PatientColumn::Estado, address.state),
        ];
        let mut all_found = true;
        for (column, value) in changes {
            all_found &= db.update_patient_column(id, column, &SqlValue::Text(value))?;
        }
        all_found
    } else {
        let value = forms::patient_field_value(prompter, column)?;
        db.update_patient_column(id, column, &value)?
    };

    if updated {
        writeln!(prompter.writer(), "Campo atualizado.")?;
    } else {
        writeln!(prompter.writer(), "Nenhum paciente com o ID {id}.")?;
    }
    Ok(())
}

/// Patient menu loop. Returns when the operator picks "Voltar".
pub fn run<R: BufRead, W: Write>(
    db: &Database,
    prompter: &mut Prompter<R, W>,
    lookup: &dyn AddressLookup,
) -> Result<()> {
    loop {
        screen::banner(prompter.writer(), "GESTÃO DE PACIENTES")?;
        let choice = prompter.read_menu(
            "O que deseja fazer?",
            &[
                "Cadastrar paciente",
                "Consultar / exportar",
                "Atualizar todos os dados",
                "Atualizar um campo",
                "Excluir por ID",
                "Excluir todos",
            ],
            "Voltar",
        )?;
        let result = match choice {
            Some(0) => insert(db, prompter, lookup),
            Some(1) => menu::query_flow::<Patients, _, _>(db, prompter),
            Some(2) => update_full(db, prompter, lookup),
            Some(3) => update_field(db, prompter, lookup),
            Some(4) => menu::delete_flow::<Patients, _, _>(db, prompter),
            Some(_) => menu::delete_all_flow::<Patients, _, _>(db, prompter),
            None => return Ok(()),
        };
        if let Err(error) = result {
            log::error!("patient operation failed: {error:#}");
            writeln!(prompter.writer(), "Erro: {error}")?;
        }
        screen::separator(prompter.writer())?;
    }
}
