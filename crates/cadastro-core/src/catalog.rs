//! Typed column catalogs.
//!
//! Every table exposes a closed enum of its columns. Dynamic SQL interpolates
//! identifiers exclusively through these enums, so free-form strings can
//! never reach the statement text; filter values always travel as bind
//! parameters (see [`crate::query`]).

/// A closed, ordered catalog of the columns of one table.
pub trait Catalog: Copy + Eq + 'static {
    /// Table the catalog belongs to.
    const TABLE: &'static str;

    /// The generated primary-key column.
    const ID: Self;

    /// Every column in catalog (menu) order.
    fn all() -> &'static [Self];

    /// Canonical SQL identifier.
    fn as_str(&self) -> &'static str;

    /// Human-readable menu label.
    fn label(&self) -> &'static str;

    /// Whether the column may appear on the left side of a text search.
    fn text_searchable(&self) -> bool;

    /// Whether the column may appear on the left side of a numeric search.
    fn numeric_searchable(&self) -> bool;

    /// Whether the column may be overwritten by a single-field update.
    /// The id and the store-managed timestamps are never updatable.
    fn updatable(&self) -> bool;
}

/// Columns of `T_VEICULOS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleColumn {
    Id,
    Tipo,
    Marca,
    Modelo,
    AnoFabricacao,
    Placa,
    Cor,
    Combustivel,
    Quilometragem,
    Status,
    ValorDiaria,
    DataAquisicao,
    DataCadastro,
    DataUltimaAtualizacao,
}

impl Catalog for VehicleColumn {
    const TABLE: &'static str = "T_VEICULOS";
    const ID: Self = VehicleColumn::Id;

    fn all() -> &'static [Self] {
        use VehicleColumn::*;
        &[
            Id,
            Tipo,
            Marca,
            Modelo,
            AnoFabricacao,
            Placa,
            Cor,
            Combustivel,
            Quilometragem,
            Status,
            ValorDiaria,
            DataAquisicao,
            DataCadastro,
            DataUltimaAtualizacao,
        ]
    }

    fn as_str(&self) -> &'static str {
        use VehicleColumn::*;
        match self {
            Id => "ID_VEICULO",
            Tipo => "TIPO",
            Marca => "MARCA",
            Modelo => "MODELO",
            AnoFabricacao => "ANO_FABRICACAO",
            Placa => "PLACA",
            Cor => "COR",
            Combustivel => "COMBUSTIVEL",
            Quilometragem => "QUILOMETRAGEM",
            Status => "STATUS",
            ValorDiaria => "VALOR_DIARIA",
            DataAquisicao => "DATA_AQUISICAO",
            DataCadastro => "DATA_CADASTRO",
            DataUltimaAtualizacao => "DATA_ULTIMA_ATUALIZACAO",
        }
    }

    fn label(&self) -> &'static str {
        use VehicleColumn::*;
        match self {
            Id => "ID do veículo",
            Tipo => "Tipo",
            Marca => "Marca",
            Modelo => "Modelo",
            AnoFabricacao => "Ano de fabricação",
            Placa => "Placa",
            Cor => "Cor",
            Combustivel => "Combustível",
            Quilometragem => "Quilometragem",
            Status => "Status",
            ValorDiaria => "Valor da diária",
            DataAquisicao => "Data de aquisição",
            DataCadastro => "Data de cadastro",
            DataUltimaAtualizacao => "Data da última atualização",
        }
    }

    fn text_searchable(&self) -> bool {
        use VehicleColumn::*;
        matches!(self, Tipo | Marca | Modelo | Placa | Cor | Combustivel | Status)
    }

    fn numeric_searchable(&self) -> bool {
        use VehicleColumn::*;
        matches!(self, Id | AnoFabricacao | Quilometragem | ValorDiaria)
    }

    fn updatable(&self) -> bool {
        use VehicleColumn::*;
        !matches!(self, Id | DataCadastro | DataUltimaAtualizacao)
    }
}

/// Columns of `T_PACIENTE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatientColumn {
    Id,
    NomeCompleto,
    DataNascimento,
    Sexo,
    Cpf,
    Rg,
    EstadoCivil,
    Brasileiro,
    Cep,
    Rua,
    NumeroEndereco,
    Bairro,
    Cidade,
    Estado,
    Celular,
    Email,
    Convenio,
    DataHoraConsulta,
    TipoConsulta,
    Especialidade,
    StatusConsulta,
    DataCadastro,
    DataUltimaAtualizacao,
}

impl Catalog for PatientColumn {
    const TABLE: &'static str = "T_PACIENTE";
    const ID: Self = PatientColumn::Id;

    fn all() -> &'static [Self] {
        use PatientColumn::*;
        &[
            Id,
            NomeCompleto,
            DataNascimento,
            Sexo,
            Cpf,
            Rg,
            EstadoCivil,
            Brasileiro,
            Cep,
            Rua,
            NumeroEndereco,
            Bairro,
            Cidade,
            Estado,
            Celular,
            Email,
            Convenio,
            DataHoraConsulta,
            TipoConsulta,
            Especialidade,
            StatusConsulta,
            DataCadastro,
            DataUltimaAtualizacao,
        ]
    }

    fn as_str(&self) -> &'static str {
        use PatientColumn::*;
        match self {
            Id => "ID_PACIENTE",
            NomeCompleto => "NM_COMPLETO",
            DataNascimento => "DT_NASCIMENTO",
            Sexo => "SEXO",
            Cpf => "CPF",
            Rg => "RG",
            EstadoCivil => "ESTADO_CIVIL",
            Brasileiro => "BRASILEIRO",
            Cep => "CEP",
            Rua => "RUA",
            NumeroEndereco => "NUMERO_ENDERECO",
            Bairro => "BAIRRO",
            Cidade => "CIDADE",
            Estado => "ESTADO",
            Celular => "CELULAR",
            Email => "EMAIL",
            Convenio => "CONVENIO",
            DataHoraConsulta => "DT_HORA_CONSULTA",
            TipoConsulta => "TIPO_CONSULTA",
            Especialidade => "ESPECIALIDADE",
            StatusConsulta => "STATUS_CONSULTA",
            DataCadastro => "DT_CADASTRO",
            DataUltimaAtualizacao => "DT_ULTIMA_ATUALIZACAO",
        }
    }

    fn label(&self) -> &'static str {
        use PatientColumn::*;
        match self {
            Id => "ID do paciente",
            NomeCompleto => "Nome completo",
            DataNascimento => "Data de nascimento",
            Sexo => "Sexo",
            Cpf => "CPF",
            Rg => "RG",
            EstadoCivil => "Estado civil",
            Brasileiro => "Brasileiro (S/N)",
            Cep => "CEP",
            Rua => "Rua",
            NumeroEndereco => "Número do endereço",
            Bairro => "Bairro",
            Cidade => "Cidade",
            Estado => "Estado",
            Celular => "Celular",
            Email => "E-mail",
            Convenio => "Convênio (S/N)",
            DataHoraConsulta => "Data e hora da consulta",
            TipoConsulta => "Tipo de consulta",
            Especialidade => "Especialidade",
            StatusConsulta => "Status da consulta",
            DataCadastro => "Data de cadastro",
            DataUltimaAtualizacao => "Data da última atualização",
        }
    }

    fn text_searchable(&self) -> bool {
        use PatientColumn::*;
        matches!(
            self,
            NomeCompleto
                | EstadoCivil
                | Cep
                | Rua
                | Bairro
                | Cidade
                | Estado
                | Celular
                | Email
                | TipoConsulta
                | Especialidade
                | StatusConsulta
        )
    }

    fn numeric_searchable(&self) -> bool {
        use PatientColumn::*;
        matches!(self, Id | NumeroEndereco)
    }

    fn updatable(&self) -> bool {
        use PatientColumn::*;
        !matches!(self, Id | DataCadastro | DataUltimaAtualizacao)
    }
}
