//! Vehicle database operations.

use rusqlite::named_params;

use super::{Database, DbError, DbResult};
use crate::catalog::{Catalog, VehicleColumn};
use crate::models::Vehicle;
use crate::query::SqlValue;

impl Database {
    /// Insert a new vehicle, returning the generated id.
    pub fn insert_vehicle(&self, vehicle: &Vehicle) -> DbResult<i64> {
        self.conn.execute(
            r#"
            INSERT INTO T_VEICULOS (
                TIPO, MARCA, MODELO, ANO_FABRICACAO, PLACA, COR,
                COMBUSTIVEL, QUILOMETRAGEM, STATUS, VALOR_DIARIA, DATA_AQUISICAO
            ) VALUES (
                :tipo, :marca, :modelo, :ano_fabricacao, :placa, :cor,
                :combustivel, :quilometragem, :status, :valor_diaria, :data_aquisicao
            )
            "#,
            named_params! {
                ":tipo": vehicle.kind,
                ":marca": vehicle.brand,
                ":modelo": vehicle.model,
                ":ano_fabricacao": vehicle.year,
                ":placa": vehicle.plate,
                ":cor": vehicle.color,
                ":combustivel": vehicle.fuel.as_str(),
                ":quilometragem": vehicle.odometer,
                ":status": vehicle.status.as_str(),
                ":valor_diaria": vehicle.daily_rate,
                ":data_aquisicao": vehicle.acquired_on.format("%Y-%m-%d").to_string(),
            },
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Overwrite every column of an existing vehicle.
    pub fn update_vehicle(&self, id: i64, vehicle: &Vehicle) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE T_VEICULOS SET
                TIPO = :tipo,
                MARCA = :marca,
                MODELO = :modelo,
                ANO_FABRICACAO = :ano_fabricacao,
                PLACA = :placa,
                COR = :cor,
                COMBUSTIVEL = :combustivel,
                QUILOMETRAGEM = :quilometragem,
                STATUS = :status,
                VALOR_DIARIA = :valor_diaria,
                DATA_AQUISICAO = :data_aquisicao
            WHERE ID_VEICULO = :id
            "#,
            named_params! {
                ":id": id,
                ":tipo": vehicle.kind,
                ":marca": vehicle.brand,
                ":modelo": vehicle.model,
                ":ano_fabricacao": vehicle.year,
                ":placa": vehicle.plate,
                ":cor": vehicle.color,
                ":combustivel": vehicle.fuel.as_str(),
                ":quilometragem": vehicle.odometer,
                ":status": vehicle.status.as_str(),
                ":valor_diaria": vehicle.daily_rate,
                ":data_aquisicao": vehicle.acquired_on.format("%Y-%m-%d").to_string(),
            },
        )?;
        Ok(rows_affected > 0)
    }

    /// Overwrite a single column. The column must come from the updatable
    /// allow-list; the identifier is interpolated from the typed enum only.
    pub fn update_vehicle_column(
        &self,
        id: i64,
        column: VehicleColumn,
        value: &SqlValue,
    ) -> DbResult<bool> {
        if !column.updatable() {
            return Err(DbError::Constraint(format!(
                "column {} cannot be updated",
                column.as_str()
            )));
        }
        let sql = format!(
            "UPDATE T_VEICULOS SET {} = :value WHERE ID_VEICULO = :id",
            column.as_str()
        );
        let rows_affected = self
            .conn
            .execute(&sql, named_params! { ":value": value, ":id": id })?;
        Ok(rows_affected > 0)
    }

    /// Delete a vehicle by id. `false` means no such id.
    pub fn delete_vehicle(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM T_VEICULOS WHERE ID_VEICULO = :id", named_params! { ":id": id })?;
        Ok(rows_affected > 0)
    }

    /// Delete every vehicle, returning how many rows were removed.
    pub fn delete_all_vehicles(&self) -> DbResult<usize> {
        let rows_affected = self.conn.execute("DELETE FROM T_VEICULOS", [])?;
        Ok(rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FuelKind, VehicleStatus};
    use chrono::NaiveDate;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn sample_vehicle() -> Vehicle {
        Vehicle {
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
        }
    }

    #[test]
    fn test_insert_returns_generated_id() {
        let db = setup_db();
        let id = db.insert_vehicle(&sample_vehicle()).unwrap();
        assert_eq!(id, 1);

        let mut second = sample_vehicle();
        second.plate = "XYZ9A87".into();
        assert_eq!(db.insert_vehicle(&second).unwrap(), 2);
    }

    #[test]
    fn test_insert_duplicate_plate_fails() {
        let db = setup_db();
        db.insert_vehicle(&sample_vehicle()).unwrap();
        let result = db.insert_vehicle(&sample_vehicle());
        assert!(result.is_err());
    }

    #[test]
    fn test_update_all_fields() {
        let db = setup_db();
        let id = db.insert_vehicle(&sample_vehicle()).unwrap();

        let mut changed = sample_vehicle();
        changed.status = VehicleStatus::Alugado;
        changed.odometer = 36000;
        assert!(db.update_vehicle(id, &changed).unwrap());

        let status: String = db
            .conn()
            .query_row(
                "SELECT STATUS FROM T_VEICULOS WHERE ID_VEICULO = ?",
                [id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(status, "Alugado");
    }

    #[test]
    fn test_update_missing_id_reports_false() {
        let db = setup_db();
        assert!(!db.update_vehicle(99, &sample_vehicle()).unwrap());
    }

    #[test]
    fn test_update_single_column() {
        let db = setup_db();
        let id = db.insert_vehicle(&sample_vehicle()).unwrap();

        let ok = db
            .update_vehicle_column(id, VehicleColumn::Cor, &SqlValue::Text("Preto".into()))
            .unwrap();
        assert!(ok);

        let color: String = db
            .conn()
            .query_row(
                "SELECT COR FROM T_VEICULOS WHERE ID_VEICULO = ?",
                [id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(color, "Preto");
    }

    #[test]
    fn test_update_protected_column_rejected() {
        let db = setup_db();
        let id = db.insert_vehicle(&sample_vehicle()).unwrap();
        let result = db.update_vehicle_column(id, VehicleColumn::Id, &SqlValue::Integer(7));
        assert!(matches!(result, Err(DbError::Constraint(_))));
    }

    #[test]
    fn test_delete_reports_not_found() {
        let db = setup_db();
        let id = db.insert_vehicle(&sample_vehicle()).unwrap();

        assert!(db.delete_vehicle(id).unwrap());
        assert!(!db.delete_vehicle(id).unwrap());
        assert!(!db.delete_vehicle(424242).unwrap());
    }

    #[test]
    fn test_delete_all_returns_count() {
        let db = setup_db();
        db.insert_vehicle(&sample_vehicle()).unwrap();
        let mut second = sample_vehicle();
        second.plate = "XYZ9A87".into();
        db.insert_vehicle(&second).unwrap();

        assert_eq!(db.delete_all_vehicles().unwrap(), 2);
        assert_eq!(db.delete_all_vehicles().unwrap(), 0);
    }
}
