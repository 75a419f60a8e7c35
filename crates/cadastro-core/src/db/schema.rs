//! SQLite schema definition.

/// Complete database schema for cadastro.
///
/// Column names keep the Oracle deployment's spelling so the column catalogs
/// and user-facing exports are identical across both stores. Dates and
/// timestamps are stored as ISO text; the triggers refresh the last-update
/// timestamp the way the original deployment does server-side.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Fleet vehicles
-- ============================================================================

CREATE TABLE IF NOT EXISTS T_VEICULOS (
    ID_VEICULO              INTEGER PRIMARY KEY AUTOINCREMENT,
    TIPO                    TEXT NOT NULL,
    MARCA                   TEXT NOT NULL,
    MODELO                  TEXT NOT NULL,
    ANO_FABRICACAO          INTEGER NOT NULL,
    PLACA                   TEXT NOT NULL UNIQUE,
    COR                     TEXT,
    COMBUSTIVEL             TEXT,
    QUILOMETRAGEM           INTEGER DEFAULT 0,
    STATUS                  TEXT DEFAULT 'Disponível',
    VALOR_DIARIA            REAL NOT NULL,
    DATA_AQUISICAO          TEXT NOT NULL DEFAULT (date('now')),
    DATA_CADASTRO           TEXT NOT NULL DEFAULT (datetime('now')),
    DATA_ULTIMA_ATUALIZACAO TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TRIGGER IF NOT EXISTS trg_veiculos_atualizacao
AFTER UPDATE ON T_VEICULOS
FOR EACH ROW
BEGIN
    UPDATE T_VEICULOS
    SET DATA_ULTIMA_ATUALIZACAO = datetime('now')
    WHERE ID_VEICULO = new.ID_VEICULO;
END;

-- ============================================================================
-- Clinic patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS T_PACIENTE (
    ID_PACIENTE             INTEGER PRIMARY KEY AUTOINCREMENT,
    NM_COMPLETO             TEXT NOT NULL,
    DT_NASCIMENTO           TEXT NOT NULL,
    SEXO                    TEXT NOT NULL,
    CPF                     TEXT,
    RG                      TEXT,
    ESTADO_CIVIL            TEXT,
    BRASILEIRO              TEXT,             -- S/N
    CEP                     TEXT,
    RUA                     TEXT,
    BAIRRO                  TEXT,
    CIDADE                  TEXT,
    ESTADO                  TEXT,
    NUMERO_ENDERECO         INTEGER,
    CELULAR                 TEXT,
    EMAIL                   TEXT,
    CONVENIO                TEXT,             -- S/N
    DT_HORA_CONSULTA        TEXT,
    TIPO_CONSULTA           TEXT,
    ESPECIALIDADE           TEXT,
    STATUS_CONSULTA         TEXT,
    DT_CADASTRO             TEXT NOT NULL DEFAULT (date('now')),
    DT_ULTIMA_ATUALIZACAO   TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TRIGGER IF NOT EXISTS trg_paciente_atualizacao
AFTER UPDATE ON T_PACIENTE
FOR EACH ROW
BEGIN
    UPDATE T_PACIENTE
    SET DT_ULTIMA_ATUALIZACAO = datetime('now')
    WHERE ID_PACIENTE = new.ID_PACIENTE;
END;
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_valid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.execute_batch(SCHEMA);
        assert!(result.is_ok(), "Schema should be valid SQL: {:?}", result);
    }

    #[test]
    fn test_plate_unique() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        conn.execute(
            "INSERT INTO T_VEICULOS (TIPO, MARCA, MODELO, ANO_FABRICACAO, PLACA, VALOR_DIARIA)
             VALUES ('Carro', 'Honda', 'Civic', 2021, 'ABC1D23', 150.5)",
            [],
        )
        .unwrap();

        let dup = conn.execute(
            "INSERT INTO T_VEICULOS (TIPO, MARCA, MODELO, ANO_FABRICACAO, PLACA, VALOR_DIARIA)
             VALUES ('Carro', 'Honda', 'Fit', 2020, 'ABC1D23', 120.0)",
            [],
        );
        assert!(dup.is_err());
    }

    #[test]
    fn test_update_refreshes_last_update_timestamp() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        conn.execute(
            "INSERT INTO T_VEICULOS (TIPO, MARCA, MODELO, ANO_FABRICACAO, PLACA, VALOR_DIARIA,
                                     DATA_ULTIMA_ATUALIZACAO)
             VALUES ('Carro', 'Honda', 'Civic', 2021, 'ABC1D23', 150.5, '2000-01-01 00:00:00')",
            [],
        )
        .unwrap();

        conn.execute("UPDATE T_VEICULOS SET COR = 'Prata' WHERE ID_VEICULO = 1", [])
            .unwrap();

        let stamp: String = conn
            .query_row(
                "SELECT DATA_ULTIMA_ATUALIZACAO FROM T_VEICULOS WHERE ID_VEICULO = 1",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_ne!(stamp, "2000-01-01 00:00:00");
    }
}
