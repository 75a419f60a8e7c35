//! Entity forms: full-record prompts and single-field value prompts.

use std::io::{BufRead, Write};

use anyhow::{bail, Result};

use cadastro_core::catalog::{Catalog, PatientColumn, VehicleColumn};
use cadastro_core::cep::AddressLookup;
use cadastro_core::models::{
    as_s_n, AppointmentKind, AppointmentStatus, FuelKind, MaritalStatus, Patient, Sex, Specialty,
    Vehicle, VehicleStatus,
};
use cadastro_core::query::SqlValue;

use crate::input::Prompter;

fn choose<T: Copy, R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    title: &str,
    options: &[T],
    label: impl Fn(&T) -> &'static str,
) -> Result<T> {
    let labels: Vec<&str> = options.iter().map(|o| label(o)).collect();
    let index = prompter.read_choice(title, &labels)?;
    Ok(options[index])
}

fn read_fuel<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<FuelKind> {
    choose(prompter, "Combustível:", &FuelKind::ALL, FuelKind::as_str)
}

fn read_vehicle_status<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<VehicleStatus> {
    choose(
        prompter,
        "Status do veículo:",
        &VehicleStatus::ALL,
        VehicleStatus::as_str,
    )
}

/// Collect a complete vehicle from the console.
pub fn vehicle_form<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<Vehicle> {
    Ok(Vehicle {
        kind: prompter.read_text("Tipo (ex.: Carro, Moto): ")?,
        brand: prompter.read_text("Marca: ")?,
        model: prompter.read_text("Modelo: ")?,
        year: prompter.read_int_range("Ano de fabricação: ", 1900, 2100)?,
        plate: prompter.read_text("Placa: ")?.to_uppercase(),
        color: prompter.read_text("Cor: ")?,
        fuel: read_fuel(prompter)?,
        odometer: prompter.read_int_range("Quilometragem: ", 0, i64::MAX)?,
        status: read_vehicle_status(prompter)?,
        daily_rate: prompter.read_float("Valor da diária (R$): ")?,
        acquired_on: prompter.read_date("Data de aquisição (DD/MM/AAAA): ")?,
    })
}

/// Collect a complete patient from the console. The address comes from the
/// CEP lookup, never typed field by field.
pub fn patient_form<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    lookup: &dyn AddressLookup,
) -> Result<Patient> {
    Ok(Patient {
        full_name: prompter.read_text("Nome completo: ")?,
        birth_date: prompter.read_date("Data de nascimento (DD/MM/AAAA): ")?,
        sex: choose(prompter, "Sexo:", &[Sex::M, Sex::F], Sex::as_str)?,
        cpf: prompter.read_cpf()?,
        rg: prompter.read_rg()?,
        marital_status: choose(
            prompter,
            "Estado civil:",
            &MaritalStatus::ALL,
            MaritalStatus::as_str,
        )?,
        brazilian: prompter.read_yes_no("Brasileiro? (S/N): ")?,
        address: prompter.read_address(lookup)?,
        house_number: prompter.read_int_range("Número do endereço: ", 0, i64::MAX)?,
        phone: prompter.read_phone()?,
        email: prompter.read_email()?,
        insurance: prompter.read_yes_no("Possui convênio? (S/N): ")?,
        appointment_at: prompter.read_datetime("Data e hora da consulta (DD/MM/AAAA HH:MM): ")?,
        appointment_kind: choose(
            prompter,
            "Tipo de consulta:",
            &AppointmentKind::ALL,
            AppointmentKind::as_str,
        )?,
        specialty: choose(
            prompter,
            "Especialidade:",
            &Specialty::ALL,
            Specialty::as_str,
        )?,
        appointment_status: choose(
            prompter,
            "Status da consulta:",
            &AppointmentStatus::ALL,
            AppointmentStatus::as_str,
        )?,
    })
}

/// Prompt a replacement value for one vehicle column, typed per column.
pub fn vehicle_field_value<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    column: VehicleColumn,
) -> Result<SqlValue> {
    use VehicleColumn::*;
    let value = match column {
        Tipo => SqlValue::Text(prompter.read_text("Novo tipo: ")?),
        Marca => SqlValue::Text(prompter.read_text("Nova marca: ")?),
        Modelo => SqlValue::Text(prompter.read_text("Novo modelo: ")?),
        AnoFabricacao => {
            SqlValue::Integer(prompter.read_int_range("Novo ano de fabricação: ", 1900, 2100)?)
        }
        Placa => SqlValue::Text(prompter.read_text("Nova placa: ")?.to_uppercase()),
        Cor => SqlValue::Text(prompter.read_text("Nova cor: ")?),
        Combustivel => SqlValue::Text(read_fuel(prompter)?.as_str().to_string()),
        Quilometragem => {
            SqlValue::Integer(prompter.read_int_range("Nova quilometragem: ", 0, i64::MAX)?)
        }
        Status => SqlValue::Text(read_vehicle_status(prompter)?.as_str().to_string()),
        ValorDiaria => SqlValue::Real(prompter.read_float("Novo valor da diária (R$): ")?),
        DataAquisicao => SqlValue::Text(
            prompter
                .read_date("Nova data de aquisição (DD/MM/AAAA): ")?
                .format("%Y-%m-%d")
                .to_string(),
        ),
        Id | DataCadastro | DataUltimaAtualizacao => {
            bail!("coluna {} não pode ser alterada", column.as_str())
        }
    };
    Ok(value)
}

/// Prompt a replacement value for one patient column, typed per column.
/// The CEP column is handled by the menu (it refreshes the whole address).
pub fn patient_field_value<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    column: PatientColumn,
) -> Result<SqlValue> {
    use PatientColumn::*;
    let value = match column {
        NomeCompleto => SqlValue::Text(prompter.read_text("Novo nome completo: ")?),
        DataNascimento => SqlValue::Text(
            prompter
                .read_date("Nova data de nascimento (DD/MM/AAAA): ")?
                .format("%Y-%m-%d")
                .to_string(),
        ),
        Sexo => SqlValue::Text(
            choose(prompter, "Sexo:", &[Sex::M, Sex::F], Sex::as_str)?
                .as_str()
                .to_string(),
        ),
        Cpf => SqlValue::Text(prompter.read_cpf()?),
        Rg => SqlValue::Text(prompter.read_rg()?),
        EstadoCivil => SqlValue::Text(
            choose(
                prompter,
                "Estado civil:",
                &MaritalStatus::ALL,
                MaritalStatus::as_str,
            )?
            .as_str()
            .to_string(),
        ),
        Brasileiro => {
            SqlValue::Text(as_s_n(prompter.read_yes_no("Brasileiro? (S/N): ")?).to_string())
        }
        Rua => SqlValue::Text(prompter.read_text("Nova rua: ")?),
        NumeroEndereco => {
            SqlValue::Integer(prompter.read_int_range("Novo número do endereço: ", 0, i64::MAX)?)
        }
        Bairro => SqlValue::Text(prompter.read_text("Novo bairro: ")?),
        Cidade => SqlValue::Text(prompter.read_text("Nova cidade: ")?),
        Estado => SqlValue::Text(prompter.read_text("Novo estado (UF): ")?.to_uppercase()),
        Celular => SqlValue::Text(prompter.read_phone()?),
        Email => SqlValue::Text(prompter.read_email()?),
        Convenio => {
            SqlValue::Text(as_s_n(prompter.read_yes_no("Possui convênio? (S/N): ")?).to_string())
        }
        DataHoraConsulta => SqlValue::Text(
            prompter
                .read_datetime("Nova data e hora da consulta (DD/MM/AAAA HH:MM): ")?
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
        ),
        TipoConsulta => SqlValue::Text(
            choose(
                prompter,
                "Tipo de consulta:",
                &AppointmentKind::ALL,
                AppointmentKind::as_str,
            )?
            .as_str()
            .to_string(),
        ),
        Especialidade => SqlValue::Text(
            choose(
                prompter,
                "Especialidade:",
                &Specialty::ALL,
                Specialty::as_str,
            )?
            .as_str()
            .to_string(),
        ),
        StatusConsulta => SqlValue::Text(
            choose(
                prompter,
                "Status da consulta:",
                &AppointmentStatus::ALL,
                AppointmentStatus::as_str,
            )?
            .as_str()
            .to_string(),
        ),
        Cep | Id | DataCadastro | DataUltimaAtualizacao => {
            bail!("coluna {} não é alterada por este formulário", column.as_str())
        }
    };
    Ok(value)
}
