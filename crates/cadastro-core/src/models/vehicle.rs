//! Vehicle models for the rental fleet.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fuel kind, restricted to the menu-driven set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FuelKind {
    Gasolina,
    Etanol,
    Flex,
    Diesel,
    Eletrico,
    Hibrido,
}

impl FuelKind {
    /// Every kind in menu order.
    pub const ALL: [FuelKind; 6] = [
        FuelKind::Gasolina,
        FuelKind::Etanol,
        FuelKind::Flex,
        FuelKind::Diesel,
        FuelKind::Eletrico,
        FuelKind::Hibrido,
    ];

    /// The stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelKind::Gasolina => "Gasolina",
            FuelKind::Etanol => "Etanol",
            FuelKind::Flex => "Flex",
            FuelKind::Diesel => "Diesel",
            FuelKind::Eletrico => "Eletrico",
            FuelKind::Hibrido => "Hibrido",
        }
    }
}

/// Fleet status of a vehicle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VehicleStatus {
    /// Available for rental
    Disponivel,
    /// Currently rented out
    Alugado,
    /// In the shop
    Manutencao,
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 3] = [
        VehicleStatus::Disponivel,
        VehicleStatus::Alugado,
        VehicleStatus::Manutencao,
    ];

    /// The stored string form (accented, as the original schema defaults).
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Disponivel => "Disponível",
            VehicleStatus::Alugado => "Alugado",
            VehicleStatus::Manutencao => "Manutenção",
        }
    }
}

/// A fleet vehicle as collected from the registration form.
///
/// The identifier and the registration/last-update timestamps are generated
/// by the store and never set by callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    /// Vehicle kind (e.g. "Carro", "Moto")
    pub kind: String,
    /// Manufacturer
    pub brand: String,
    /// Model name
    pub model: String,
    /// Manufacture year
    pub year: i64,
    /// License plate, unique in the store
    pub plate: String,
    /// Color
    pub color: String,
    /// Fuel kind
    pub fuel: FuelKind,
    /// Odometer reading in km
    pub odometer: i64,
    /// Fleet status
    pub status: VehicleStatus,
    /// Daily rental rate
    pub daily_rate: f64,
    /// Acquisition date
    pub acquired_on: NaiveDate,
}
