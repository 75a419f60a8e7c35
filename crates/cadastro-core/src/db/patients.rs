//! Patient database operations.

use rusqlite::named_params;

use super::{Database, DbError, DbResult};
use crate::catalog::{Catalog, PatientColumn};
use crate::models::{as_s_n, Patient};
use crate::query::SqlValue;

impl Database {
    /// Insert a new patient, returning the generated id.
    pub fn insert_patient(&self, patient: &Patient) -> DbResult<i64> {
        self.conn.execute(
            r#"
            INSERT INTO T_PACIENTE (
                NM_COMPLETO, DT_NASCIMENTO, SEXO, CPF, RG, ESTADO_CIVIL,
                BRASILEIRO, CEP, RUA, BAIRRO, CIDADE, ESTADO, NUMERO_ENDERECO,
                CELULAR, EMAIL, CONVENIO, DT_HORA_CONSULTA, TIPO_CONSULTA,
                ESPECIALIDADE, STATUS_CONSULTA
            ) VALUES (
                :nm_completo, :dt_nascimento, :sexo, :cpf, :rg, :estado_civil,
                :brasileiro, :cep, :rua, :bairro, :cidade, :estado, :numero_endereco,
                :celular, :email, :convenio, :dt_hora_consulta, :tipo_consulta,
                :especialidade, :status_consulta
            )
            "#,
            named_params! {
                ":nm_completo": patient.full_name,
                ":dt_nascimento": patient.birth_date.format("%Y-%m-%d").to_string(),
                ":sexo": patient.sex.as_str(),
                ":cpf": patient.cpf,
                ":rg": patient.rg,
                ":estado_civil": patient.marital_status.as_str(),
                ":brasileiro": as_s_n(patient.brazilian),
                ":cep": patient.address.cep,
                ":rua": patient.address.street,
                ":bairro": patient.address.neighborhood,
                ":cidade": patient.address.city,
                ":estado": patient.address.state,
                ":numero_endereco": patient.house_number,
                ":celular": patient.phone,
                ":email": patient.email,
                ":convenio": as_s_n(patient.insurance),
                ":dt_hora_consulta": patient.appointment_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                ":tipo_consulta": patient.appointment_kind.as_str(),
                ":especialidade": patient.specialty.as_str(),
                ":status_consulta": patient.appointment_status.as_str(),
            },
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Overwrite every editable column of an existing patient.
    pub fn update_patient(&self, id: i64, patient: &Patient) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE T_PACIENTE SET
                NM_COMPLETO = :nm_completo,
                DT_NASCIMENTO = :dt_nascimento,
                SEXO = :sexo,
                CPF = :cpf,
                RG = :rg,
                ESTADO_CIVIL = :estado_civil,
                BRASILEIRO = :brasileiro,
                CEP = :cep,
                RUA = :rua,
                BAIRRO = :bairro,
                CIDADE = :cidade,
                ESTADO = :estado,
                NUMERO_ENDERECO = :numero_endereco,
                CELULAR = :celular,
                EMAIL = :email,
                CONVENIO = :convenio,
                DT_HORA_CONSULTA = :dt_hora_consulta,
                TIPO_CONSULTA = :tipo_consulta,
                ESPECIALIDADE = :especialidade,
                STATUS_CONSULTA = :status_consulta
            WHERE ID_PACIENTE = :id
            "#,
            named_params! {
                ":id": id,
                ":nm_completo": patient.full_name,
                ":dt_nascimento": patient.birth_date.format("%Y-%m-%d").to_string(),
                ":sexo": patient.sex.as_str(),
                ":cpf": patient.cpf,
                ":rg": patient.rg,
                ":estado_civil": patient.marital_status.as_str(),
                ":brasileiro": as_s_n(patient.brazilian),
                ":cep": patient.address.cep,
                ":rua": patient.address.street,
                ":bairro": patient.address.neighborhood,
                ":cidade": patient.address.city,
                ":estado": patient.address.state,
                ":numero_endereco": patient.house_number,
                ":celular": patient.phone,
                ":email": patient.email,
                ":convenio": as_s_n(patient.insurance),
                ":dt_hora_consulta": patient.appointment_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                ":tipo_consulta": patient.appointment_kind.as_str(),
                ":especialidade": patient.specialty.as_str(),
                ":status_consulta": patient.appointment_status.as_str(),
            },
        )?;
        Ok(rows_affected > 0)
    }

    /// Overwrite a single column. The column must come from the updatable
    /// allow-list; the identifier is interpolated from the typed enum only.
    pub fn update_patient_column(
        &self,
        id: i64,
        column: PatientColumn,
        value: &SqlValue,
    ) -> DbResult<bool> {
        if !column.updatable() {
            return Err(DbError::Constraint(format!(
                "column {} cannot be updated",
                column.as_str()
            )));
        }
        let sql = format!(
            "UPDATE T_PACIENTE SET {} = :value WHERE ID_PACIENTE = :id",
            column.as_str()
        );
        let rows_affected = self
            .conn
            .execute(&sql, named_params! { ":value": value, ":id": id })?;
        Ok(rows_affected > 0)
    }

    /// Delete a patient by id. `false` means no such id.
    pub fn delete_patient(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM T_PACIENTE WHERE ID_PACIENTE = :id", named_params! { ":id": id })?;
        Ok(rows_affected > 0)
    }

    /// Delete every patient, returning how many rows were removed.
    pub fn delete_all_patients(&self) -> DbResult<usize> {
        let rows_affected = self.conn.execute("DELETE FROM T_PACIENTE", [])?;
        Ok(rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cep::Address;
    use crate::models::{
        AppointmentKind, AppointmentStatus, MaritalStatus, Sex, Specialty,
    };
    use chrono::{NaiveDate, NaiveDateTime};

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn sample_patient() -> Patient {
        Patient {
            full_name: "Maria da Silva".into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 12).unwrap(),
            sex: Sex::F,
            cpf: "12345678901".into(),
            rg: "123456789".into(),
            marital_status: MaritalStatus::Casado,
            brazilian: true,
            address: Address {
                cep: "01001-000".into(),
                street: "Praça da Sé".into(),
                neighborhood: "Sé".into(),
                city: "São Paulo".into(),
                state: "SP".into(),
            },
            house_number: 100,
            phone: "11987654321".into(),
            email: "maria@example.com".into(),
            insurance: true,
            appointment_at: NaiveDateTime::parse_from_str(
                "2025-03-10 14:30:00",
                "%Y-%m-%d %H:%M:%S",
            )
            .unwrap(),
            appointment_kind: AppointmentKind::Rotina,
            specialty: Specialty::ClinicoGeral,
            appointment_status: AppointmentStatus::Realizada,
        }
    }

    #[test]
    fn test_insert_returns_generated_id() {
        let db = setup_db();
        assert_eq!(db.insert_patient(&sample_patient()).unwrap(), 1);
        assert_eq!(db.insert_patient(&sample_patient()).unwrap(), 2);
    }

    #[test]
    fn test_insert_stores_s_n_flags() {
        let db = setup_db();
        let id = db.insert_patient(&sample_patient()).unwrap();

        let (brazilian, insurance): (String, String) = db
            .conn()
            .query_row(
                "SELECT BRASILEIRO, CONVENIO FROM T_PACIENTE WHERE ID_PACIENTE = ?",
                [id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(brazilian, "S");
        assert_eq!(insurance, "S");
    }

    #[test]
    fn test_update_all_fields() {
        let db = setup_db();
        let id = db.insert_patient(&sample_patient()).unwrap();

        let mut changed = sample_patient();
        changed.appointment_status = AppointmentStatus::Cancelada;
        changed.insurance = false;
        assert!(db.update_patient(id, &changed).unwrap());

        let (status, insurance): (String, String) = db
            .conn()
            .query_row(
                "SELECT STATUS_CONSULTA, CONVENIO FROM T_PACIENTE WHERE ID_PACIENTE = ?",
                [id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(status, "Cancelada");
        assert_eq!(insurance, "N");

        assert!(!db.update_patient(77, &sample_patient()).unwrap());
    }

    #[test]
    fn test_update_single_column() {
        let db = setup_db();
        let id = db.insert_patient(&sample_patient()).unwrap();

        let ok = db
            .update_patient_column(
                id,
                PatientColumn::Email,
                &SqlValue::Text("novo@example.com".into()),
            )
            .unwrap();
        assert!(ok);

        let email: String = db
            .conn()
            .query_row(
                "SELECT EMAIL FROM T_PACIENTE WHERE ID_PACIENTE = ?",
                [id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(email, "novo@example.com");
    }

    #[test]
    fn test_update_protected_column_rejected() {
        let db = setup_db();
        let id = db.insert_patient(&sample_patient()).unwrap();
        let result = db.update_patient_column(id, PatientColumn::Id, &SqlValue::Integer(9));
        assert!(matches!(result, Err(DbError::Constraint(_))));
    }

    #[test]
    fn test_update_missing_id_reports_false() {
        let db = setup_db();
        let ok = db
            .update_patient_column(55, PatientColumn::Cidade, &SqlValue::Text("Santos".into()))
            .unwrap();
        assert!(!ok);
    }

    #[test]
    fn test_delete_reports_not_found() {
        let db = setup_db();
        let id = db.insert_patient(&sample_patient()).unwrap();

        assert!(db.delete_patient(id).unwrap());
        assert!(!db.delete_patient(id).unwrap());
    }

    #[test]
    fn test_delete_all_returns_count() {
        let db = setup_db();
        db.insert_patient(&sample_patient()).unwrap();
        db.insert_patient(&sample_patient()).unwrap();

        assert_eq!(db.delete_all_patients().unwrap(), 2);
        assert_eq!(db.delete_all_patients().unwrap(), 0);
    }
}
