//! Projection and search integration tests.

use chrono::NaiveDate;
use proptest::prelude::*;

use cadastro_core::catalog::VehicleColumn;
use cadastro_core::db::Database;
use cadastro_core::models::{FuelKind, Vehicle, VehicleStatus};
use cadastro_core::query::{fetch, NumericOp, Projection, QueryError, SearchFilter, SqlValue};

fn make_vehicle(brand: &str, model: &str, plate: &str, year: i64, rate: f64) -> Vehicle {
    Vehicle {
        kind: "Carro".to_string(),
        brand: brand.to_string(),
        model: model.to_string(),
        year,
        plate: plate.to_string(),
        color: "Prata".to_string(),
        fuel: FuelKind::Flex,
        odometer: 20000,
        status: VehicleStatus::Disponivel,
        daily_rate: rate,
        acquired_on: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
    }
}

fn seeded_db() -> Database {
    let db = Database::open_in_memory().unwrap();
    db.insert_vehicle(&make_vehicle("Honda", "Civic", "ABC1D23", 2021, 150.5))
        .unwrap();
    db.insert_vehicle(&make_vehicle("Fiat", "Uno Mille", "DEF4G56", 2015, 80.0))
        .unwrap();
    db.insert_vehicle(&make_vehicle("Toyota", "Corolla", "HIJ7K89", 2023, 210.0))
        .unwrap();
    db
}

#[test]
fn test_fetch_all_returns_every_row() {
    let db = seeded_db();
    let records = fetch(&db, &Projection::<VehicleColumn>::all(), &SearchFilter::All).unwrap();
    assert_eq!(records.len(), 3);

    // Field names follow the projection's catalog order.
    let names = records[0].field_names();
    assert_eq!(names[0], "ID_VEICULO");
    assert_eq!(names[2], "MARCA");
}

#[test]
fn test_fetch_by_id_returns_at_most_one() {
    let db = seeded_db();
    let records = fetch(&db, &Projection::<VehicleColumn>::all(), &SearchFilter::ById(2)).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].get("MARCA"),
        Some(&SqlValue::Text("Fiat".to_string()))
    );

    let missing = fetch(&db, &Projection::<VehicleColumn>::all(), &SearchFilter::ById(999)).unwrap();
    assert!(missing.is_empty());
}

#[test]
fn test_text_search_is_case_insensitive_substring() {
    let db = seeded_db();
    let filter = SearchFilter::Text {
        column: VehicleColumn::Modelo,
        needle: "civic".to_string(),
    };
    let records = fetch(&db, &Projection::all(), &filter).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].get("MODELO"),
        Some(&SqlValue::Text("Civic".to_string()))
    );

    // Substring in the middle of the value still matches.
    let filter = SearchFilter::Text {
        column: VehicleColumn::Modelo,
        needle: "MILLE".to_string(),
    };
    assert_eq!(fetch(&db, &Projection::all(), &filter).unwrap().len(), 1);
}

#[test]
fn test_text_search_treats_sql_fragments_as_literals() {
    let db = seeded_db();
    // A hostile needle is just a needle; nothing in the table contains it.
    let filter = SearchFilter::Text {
        column: VehicleColumn::Marca,
        needle: "' OR '1'='1".to_string(),
    };
    let records = fetch(&db, &Projection::all(), &filter).unwrap();
    assert!(records.is_empty());

    // And the table is intact afterwards.
    let filter = SearchFilter::Text {
        column: VehicleColumn::Marca,
        needle: "x'; DROP TABLE T_VEICULOS; --".to_string(),
    };
    assert!(fetch(&db, &Projection::all(), &filter).unwrap().is_empty());
    assert_eq!(
        fetch(&db, &Projection::<VehicleColumn>::all(), &SearchFilter::All)
            .unwrap()
            .len(),
        3
    );
}

#[test]
fn test_numeric_search_is_strict() {
    let db = seeded_db();
    let filter = SearchFilter::Numeric {
        column: VehicleColumn::AnoFabricacao,
        op: NumericOp::Gt,
        value: 2021.0,
    };
    let records = fetch(&db, &Projection::all(), &filter).unwrap();
    // Strictly greater: 2021 itself is excluded.
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("ANO_FABRICACAO"), Some(&SqlValue::Integer(2023)));
}

#[test]
fn test_real_values_survive_storage() {
    let db = seeded_db();
    let mut projection = Projection::new();
    projection.select(VehicleColumn::ValorDiaria);
    projection.select(VehicleColumn::Marca);

    let filter = SearchFilter::Text {
        column: VehicleColumn::Marca,
        needle: "honda".to_string(),
    };
    let records = fetch(&db, &projection, &filter).unwrap();
    assert_eq!(records[0].get("VALOR_DIARIA"), Some(&SqlValue::Real(150.5)));
}

#[test]
fn test_stored_dates_display_in_brazilian_format() {
    let db = seeded_db();
    let mut projection = Projection::new();
    projection.select(VehicleColumn::DataAquisicao);

    let records = fetch(&db, &projection, &SearchFilter::ById(1)).unwrap();
    let value = records[0].get("DATA_AQUISICAO").unwrap();
    assert_eq!(cadastro_core::render::display_string(value), "31/01/2024");
}

#[test]
fn test_projection_controls_returned_fields() {
    let db = seeded_db();
    let mut projection = Projection::new();
    projection.select(VehicleColumn::Modelo);
    projection.select(VehicleColumn::Placa);
    projection.select(VehicleColumn::Modelo); // duplicate, ignored

    let records = fetch(&db, &projection, &SearchFilter::ById(1)).unwrap();
    assert_eq!(records[0].field_names(), vec!["MODELO", "PLACA"]);
}

#[test]
fn test_empty_projection_is_rejected() {
    let db = seeded_db();
    let projection: Projection<VehicleColumn> = Projection::new();
    let result = fetch(&db, &projection, &SearchFilter::All);
    assert!(matches!(result, Err(QueryError::EmptyProjection)));
}

#[test]
fn test_search_allow_lists_are_enforced() {
    let db = seeded_db();
    let filter = SearchFilter::Text {
        column: VehicleColumn::ValorDiaria,
        needle: "150".to_string(),
    };
    let result = fetch(&db, &Projection::all(), &filter);
    assert!(matches!(result, Err(QueryError::NotTextSearchable(_))));

    let filter = SearchFilter::Numeric {
        column: VehicleColumn::Modelo,
        op: NumericOp::Eq,
        value: 1.0,
    };
    let result = fetch(&db, &Projection::all(), &filter);
    assert!(matches!(result, Err(QueryError::NotNumericSearchable(_))));
}

proptest! {
    // The needle's letter case never changes which rows match.
    #[test]
    fn prop_text_search_ignores_needle_case(needle in "[a-zA-Z]{1,8}") {
        let db = seeded_db();
        let lower = fetch(&db, &Projection::all(), &SearchFilter::Text {
            column: VehicleColumn::Marca,
            needle: needle.to_lowercase(),
        }).unwrap();
        let upper = fetch(&db, &Projection::all(), &SearchFilter::Text {
            column: VehicleColumn::Marca,
            needle: needle.to_uppercase(),
        }).unwrap();
        prop_assert_eq!(lower.len(), upper.len());
    }

    // ">" and "<=" partition the table for any threshold.
    #[test]
    fn prop_numeric_ops_partition(threshold in 1990.0f64..2030.0) {
        let db = seeded_db();
        let above = fetch(&db, &Projection::all(), &SearchFilter::Numeric {
            column: VehicleColumn::AnoFabricacao,
            op: NumericOp::Gt,
            value: threshold,
        }).unwrap();
        let below = fetch(&db, &Projection::all(), &SearchFilter::Numeric {
            column: VehicleColumn::AnoFabricacao,
            op: NumericOp::Le,
            value: threshold,
        }).unwrap();
        prop_assert_eq!(above.len() + below.len(), 3);
    }
}
