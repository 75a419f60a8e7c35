//! Patient and appointment models.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::cep::Address;

/// Patient sex as stored (single character).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Sex {
    M,
    F,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::M => "M",
            Sex::F => "F",
        }
    }
}

/// Marital status, restricted to the menu-driven set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MaritalStatus {
    Solteiro,
    Casado,
    Divorciado,
    Viuvo,
}

impl MaritalStatus {
    pub const ALL: [MaritalStatus; 4] = [
        MaritalStatus::Solteiro,
        MaritalStatus::Casado,
        MaritalStatus::Divorciado,
        MaritalStatus::Viuvo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaritalStatus::Solteiro => "Solteiro",
            MaritalStatus::Casado => "Casado",
            MaritalStatus::Divorciado => "Divorciado",
            MaritalStatus::Viuvo => "Viuvo",
        }
    }
}

/// Kind of the scheduled appointment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppointmentKind {
    Retorno,
    Emergencia,
    Rotina,
    Exame,
    Geral,
}

impl AppointmentKind {
    pub const ALL: [AppointmentKind; 5] = [
        AppointmentKind::Retorno,
        AppointmentKind::Emergencia,
        AppointmentKind::Rotina,
        AppointmentKind::Exame,
        AppointmentKind::Geral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentKind::Retorno => "Retorno",
            AppointmentKind::Emergencia => "Emergencia",
            AppointmentKind::Rotina => "Rotina",
            AppointmentKind::Exame => "Exame",
            AppointmentKind::Geral => "Geral",
        }
    }
}

/// Medical specialty of the appointment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Specialty {
    Cardiologia,
    Neurologia,
    Ortopedia,
    Dermatologia,
    Pediatria,
    Oftalmologia,
    ClinicoGeral,
}

impl Specialty {
    pub const ALL: [Specialty; 7] = [
        Specialty::Cardiologia,
        Specialty::Neurologia,
        Specialty::Ortopedia,
        Specialty::Dermatologia,
        Specialty::Pediatria,
        Specialty::Oftalmologia,
        Specialty::ClinicoGeral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Specialty::Cardiologia => "Cardiologia",
            Specialty::Neurologia => "Neurologia",
            Specialty::Ortopedia => "Ortopedia",
            Specialty::Dermatologia => "Dermatologia",
            Specialty::Pediatria => "Pediatria",
            Specialty::Oftalmologia => "Oftalmologia",
            Specialty::ClinicoGeral => "Clínico Geral",
        }
    }
}

/// Outcome status of the appointment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppointmentStatus {
    Realizada,
    Cancelada,
    Absenteismo,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 3] = [
        AppointmentStatus::Realizada,
        AppointmentStatus::Cancelada,
        AppointmentStatus::Absenteismo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Realizada => "Realizada",
            AppointmentStatus::Cancelada => "Cancelada",
            AppointmentStatus::Absenteismo => "Absenteísmo",
        }
    }
}

/// A patient record as collected from the registration form.
///
/// The identifier and the registration/last-update timestamps are generated
/// by the store; address fields come from the CEP lookup, never typed in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Full name
    pub full_name: String,
    /// Birth date
    pub birth_date: NaiveDate,
    /// Sex
    pub sex: Sex,
    /// CPF, exactly 11 digits
    pub cpf: String,
    /// RG, exactly 9 digits
    pub rg: String,
    /// Marital status
    pub marital_status: MaritalStatus,
    /// Brazilian national, stored as S/N
    pub brazilian: bool,
    /// Address resolved from the CEP lookup
    pub address: Address,
    /// House number
    pub house_number: i64,
    /// Mobile phone, DDD + number
    pub phone: String,
    /// E-mail
    pub email: String,
    /// Has health insurance, stored as S/N
    pub insurance: bool,
    /// Scheduled appointment date and time
    pub appointment_at: NaiveDateTime,
    /// Appointment kind
    pub appointment_kind: AppointmentKind,
    /// Medical specialty
    pub specialty: Specialty,
    /// Appointment status
    pub appointment_status: AppointmentStatus,
}

/// Render a boolean the way the schema stores it.
pub fn as_s_n(value: bool) -> &'static str {
    if value {
        "S"
    } else {
        "N"
    }
}
