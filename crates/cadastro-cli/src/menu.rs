//! Entity-independent menu machinery.
//!
//! Console flows parse operator input into a [`Command`] and hand it to
//! [`dispatch`], which touches the database but never the console. Both
//! entities reuse the same flows through the [`Entity`] trait.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use cadastro_core::catalog::Catalog;
use cadastro_core::db::{Database, DbResult};
use cadastro_core::export::{export_records, ExportFormat};
use cadastro_core::query::{fetch, Projection, Record, SearchFilter};
use cadastro_core::render::{render_table, render_vertical};

use crate::input::Prompter;

/// Per-entity hooks for the shared flows.
pub trait Entity {
    type Column: Catalog;

    /// Singular noun for messages ("veículo", "paciente").
    const NOUN: &'static str;
    /// Default export file stem.
    const EXPORT_STEM: &'static str;

    fn delete_by_id(db: &Database, id: i64) -> DbResult<bool>;
    fn delete_all(db: &Database) -> DbResult<usize>;
}

/// A fully-parsed operator request, free of any console state.
#[derive(Debug, Clone, PartialEq)]
pub enum Command<C: Catalog> {
    List {
        projection: Projection<C>,
        filter: SearchFilter<C>,
    },
    Export {
        projection: Projection<C>,
        filter: SearchFilter<C>,
        format: ExportFormat,
        base_name: String,
    },
    DeleteById(i64),
    DeleteAll,
}

#[derive(Debug)]
pub enum Outcome {
    Listed(Vec<Record>),
    Exported(PathBuf),
    Deleted(bool),
    Cleared(usize),
}

/// Execute a command against the database. No console involved.
pub fn dispatch<E: Entity>(db: &Database, command: Command<E::Column>) -> Result<Outcome> {
    match command {
        Command::List { projection, filter } => {
            let records = fetch(db, &projection, &filter)?;
            Ok(Outcome::Listed(records))
        }
        Command::Export {
            projection,
            filter,
            format,
            base_name,
        } => {
            let records = fetch(db, &projection, &filter)?;
            let path = export_records(&records, format, &base_name)?;
            Ok(Outcome::Exported(path))
        }
        Command::DeleteById(id) => Ok(Outcome::Deleted(E::delete_by_id(db, id)?)),
        Command::DeleteAll => Ok(Outcome::Cleared(E::delete_all(db)?)),
    }
}

/// Ask which rows to look at: everything, one id, or a text/numeric search
/// restricted to that column family's allow-list.
pub fn read_filter<C: Catalog, R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<SearchFilter<C>> {
    let mode = prompter.read_choice(
        "Filtro:",
        &[
            "Todos os registros",
            "Por ID",
            "Busca por texto",
            "Busca numérica",
        ],
    )?;
    match mode {
        0 => Ok(SearchFilter::All),
        1 => Ok(SearchFilter::ById(prompter.read_int("ID: ")?)),
        2 => {
            let columns: Vec<C> = C::all()
                .iter()
                .copied()
                .filter(|c| c.text_searchable())
                .collect();
            let labels: Vec<&str> = columns.iter().map(|c| c.label()).collect();
            let index = prompter.read_choice("Coluna da busca:", &labels)?;
            let needle = prompter.read_text("Texto a procurar: ")?;
            Ok(SearchFilter::Text {
                column: columns[index],
                needle,
            })
        }
        _ => {
            let columns: Vec<C> = C::all()
                .iter()
                .copied()
                .filter(|c| c.numeric_searchable())
                .collect();
            let labels: Vec<&str> = columns.iter().map(|c| c.label()).collect();
            let index = prompter.read_choice("Coluna da busca:", &labels)?;
            let op = prompter.read_numeric_op()?;
            let value = prompter.read_float("Valor: ")?;
            Ok(SearchFilter::Numeric {
                column: columns[index],
                op,
                value,
            })
        }
    }
}

fn show_records<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    records: &[Record],
) -> Result<()> {
    if records.len() == 1 {
        writeln!(prompter.writer(), "{}", render_vertical(&records[0]))?;
    } else if let Some(table) = render_table(records) {
        writeln!(prompter.writer(), "{table}")?;
    }
    Ok(())
}

/// Consultation flow: pick columns, pick a filter, show the result and
/// optionally export it.
pub fn query_flow<E: Entity, R: BufRead, W: Write>(
    db: &Database,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    if !db.table_has_rows(E::Column::TABLE)? {
        writeln!(prompter.writer(), "Nenhum registro cadastrado.")?;
        return Ok(());
    }

    let projection: Projection<E::Column> = prompter.read_columns()?;
    if projection.is_empty() {
        writeln!(prompter.writer(), "Nenhuma coluna selecionada.")?;
        return Ok(());
    }
    let filter = read_filter(prompter)?;

    let outcome = dispatch::<E>(
        db,
        Command::List {
            projection: projection.clone(),
            filter: filter.clone(),
        },
    )?;
    let records = match outcome {
        Outcome::Listed(records) => records,
        _ => unreachable!(),
    };
    if records.is_empty() {
        writeln!(prompter.writer(), "Nenhum registro encontrado.")?;
        return Ok(());
    }
    writeln!(prompter.writer(), "{} registro(s).", records.len())?;
    show_records(prompter, &records)?;

    if prompter.read_yes_no("Exportar o resultado? (S/N): ")? {
        let labels: Vec<&str> = ExportFormat::ALL.iter().map(|f| f.label()).collect();
        let index = prompter.read_choice("Formato:", &labels)?;
        let typed =
            prompter.read_optional_text(&format!("Nome do arquivo [{}]: ", E::EXPORT_STEM))?;
        let base_name = if typed.is_empty() {
            E::EXPORT_STEM.to_string()
        } else {
            typed
        };
        let outcome = dispatch::<E>(
            db,
            Command::Export {
                projection,
                filter,
                format: ExportFormat::ALL[index],
                base_name,
            },
        )?;
        if let Outcome::Exported(path) = outcome {
            writeln!(prompter.writer(), "Arquivo gerado: {}", path.display())?;
        }
    }
    Ok(())
}

/// Listing shown before id-based operations so the operator can see which
/// ids exist.
pub fn preview<E: Entity, R: BufRead, W: Write>(
    db: &Database,
    prompter: &mut Prompter<R, W>,
) -> Result<bool> {
    let records = fetch(
        db,
        &Projection::<E::Column>::all(),
        &SearchFilter::All,
    )?;
    if records.is_empty() {
        writeln!(prompter.writer(), "Nenhum registro cadastrado.")?;
        return Ok(false);
    }
    if let Some(table) = render_table(&records) {
        writeln!(prompter.writer(), "{table}")?;
    }
    Ok(true)
}

/// Show one record vertically before it gets edited. Returns whether the
/// id exists.
pub fn show_by_id<E: Entity, R: BufRead, W: Write>(
    db: &Database,
    prompter: &mut Prompter<R, W>,
    id: i64,
) -> Result<bool> {
    let records = fetch(
        db,
        &Projection::<E::Column>::all(),
        &SearchFilter::ById(id),
    )?;
    match records.first() {
        Some(record) => {
            writeln!(prompter.writer(), "{}", render_vertical(record))?;
            Ok(true)
        }
        None => {
            writeln!(prompter.writer(), "Nenhum registro com o ID {id}.")?;
            Ok(false)
        }
    }
}

/// Delete one record by id, with preview and confirmation. The store's
/// affected-row count decides the message; a missing id is not an error.
pub fn delete_flow<E: Entity, R: BufRead, W: Write>(
    db: &Database,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    if !preview::<E, _, _>(db, prompter)? {
        return Ok(());
    }
    let id = prompter.read_int(&format!("ID do {} a excluir: ", E::NOUN))?;
    if !prompter.read_yes_no("Confirma a exclusão? (S/N): ")? {
        writeln!(prompter.writer(), "Operação cancelada.")?;
        return Ok(());
    }
    match dispatch::<E>(db, Command::DeleteById(id))? {
        Outcome::Deleted(true) => writeln!(prompter.writer(), "Registro excluído.")?,
        Outcome::Deleted(false) => {
            writeln!(prompter.writer(), "Nenhum registro com o ID {id}.")?
        }
        _ => unreachable!(),
    }
    Ok(())
}

/// Wipe the table after a double confirmation.
pub fn delete_all_flow<E: Entity, R: BufRead, W: Write>(
    db: &Database,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    if !db.table_has_rows(E::Column::TABLE)? {
        writeln!(prompter.writer(), "Nenhum registro cadastrado.")?;
        return Ok(());
    }
    if !prompter.read_yes_no(&format!(
        "Excluir TODOS os registros de {}? (S/N): ",
        E::NOUN
    ))? {
        writeln!(prompter.writer(), "Operação cancelada.")?;
        return Ok(());
    }
    if !prompter.read_yes_no("Tem certeza? Esta ação não pode ser desfeita. (S/N): ")? {
        writeln!(prompter.writer(), "Operação cancelada.")?;
        return Ok(());
    }
    match dispatch::<E>(db, Command::DeleteAll)? {
        Outcome::Cleared(count) => {
            writeln!(prompter.writer(), "{count} registro(s) excluído(s).")?
        }
        _ => unreachable!(),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadastro_core::catalog::VehicleColumn;
    use cadastro_core::models::{FuelKind, Vehicle, VehicleStatus};
    use cadastro_core::query::NumericOp;
    use chrono::NaiveDate;
    use std::io::Cursor;

    use crate::vehicle_menu::Vehicles as VehicleEntity;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn seeded_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.insert_vehicle(&Vehicle {
            kind: "Carro".into(),
            brand: "Honda".into(),
            model: "Civic".into(),
            year: 2021,
            plate: "ABC1D23".into(),
            color: "Prata".into(),
            fuel: FuelKind::Flex,
            odometer: 35000,
            status: VehicleStatus::Disponivel,
            daily_rate: 150.5,
            acquired_on: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        })
        .unwrap();
        db
    }

    #[test]
    fn test_dispatch_list() {
        let db = seeded_db();
        let outcome = dispatch::<VehicleEntity>(
            &db,
            Command::List {
                projection: Projection::all(),
                filter: SearchFilter::All,
            },
        )
        .unwrap();
        match outcome {
            Outcome::Listed(records) => assert_eq!(records.len(), 1),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_dispatch_delete_reports_missing_id() {
        let db = seeded_db();
        match dispatch::<VehicleEntity>(&db, Command::DeleteById(99)).unwrap() {
            Outcome::Deleted(found) => assert!(!found),
            other => panic!("unexpected outcome: {other:?}"),
        }
        match dispatch::<VehicleEntity>(&db, Command::DeleteById(1)).unwrap() {
            Outcome::Deleted(found) => assert!(found),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_read_filter_numeric() {
        // mode 4 (numérica), column 2 (ano de fabricação), op, value
        let mut p = prompter("4\n2\n>\n2020\n");
        let filter: SearchFilter<VehicleColumn> = read_filter(&mut p).unwrap();
        assert_eq!(
            filter,
            SearchFilter::Numeric {
                column: VehicleColumn::AnoFabricacao,
                op: NumericOp::Gt,
                value: 2020.0,
            }
        );
    }

    #[test]
    fn test_read_filter_text_only_offers_allow_list() {
        // mode 3 (texto), column 1 within the text allow-list (Tipo), needle
        let mut p = prompter("3\n1\ncivic\n");
        let filter: SearchFilter<VehicleColumn> = read_filter(&mut p).unwrap();
        assert_eq!(
            filter,
            SearchFilter::Text {
                column: VehicleColumn::Tipo,
                needle: "civic".to_string(),
            }
        );
    }

    #[test]
    fn test_delete_flow_checks_affected_rows() {
        let db = seeded_db();
        let mut p = prompter("42\ns\n");
        delete_flow::<VehicleEntity, _, _>(&db, &mut p).unwrap();

        // Nothing was deleted and the flow said so.
        assert!(db.table_has_rows(VehicleColumn::TABLE).unwrap());
    }

    #[test]
    fn test_delete_all_flow_needs_double_confirmation() {
        let db = seeded_db();
        let mut p = prompter("s\nn\n");
        delete_all_flow::<VehicleEntity, _, _>(&db, &mut p).unwrap();
        assert!(db.table_has_rows(VehicleColumn::TABLE).unwrap());

        let mut p = prompter("s\ns\n");
        delete_all_flow::<VehicleEntity, _, _>(&db, &mut p).unwrap();
        assert!(!db.table_has_rows(VehicleColumn::TABLE).unwrap());
    }
}
