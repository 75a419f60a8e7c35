//! CEP address lookup via the public ViaCEP service.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Address components resolved from a CEP.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Address {
    /// 8-digit CEP, no punctuation
    pub cep: String,
    /// Street (logradouro)
    pub street: String,
    /// Neighborhood (bairro)
    pub neighborhood: String,
    /// City (localidade)
    pub city: String,
    /// Two-letter state code (UF)
    pub state: String,
}

/// Lookup errors. Invalid code and not-found re-prompt at the form layer;
/// service unavailability is reported with its own message.
#[derive(Error, Debug)]
pub enum CepError {
    #[error("CEP must be exactly 8 digits")]
    InvalidCode,

    #[error("CEP not found")]
    NotFound,

    #[error("address service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// An address lookup service keyed on CEP.
pub trait AddressLookup {
    fn lookup(&self, cep: &str) -> Result<Address, CepError>;
}

/// Strip punctuation and validate the 8-digit shape.
pub fn normalize_cep(raw: &str) -> Result<String, CepError> {
    let digits: String = raw
        .chars()
        .filter(|c| !matches!(c, '-' | '.' | ' '))
        .collect();
    if digits.len() == 8 && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(digits)
    } else {
        Err(CepError::InvalidCode)
    }
}

/// ViaCEP client with an explicit timeout and capped retries on transport
/// failures. A well-formed "erro" response is a not-found, never retried.
pub struct ViaCep {
    agent: ureq::Agent,
    base_url: String,
    attempts: u32,
}

impl ViaCep {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
    pub const DEFAULT_ATTEMPTS: u32 = 3;

    pub fn new() -> Self {
        Self::with_base_url("https://viacep.com.br/ws".into())
    }

    /// Point the client at another endpoint (used by tests).
    pub fn with_base_url(base_url: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Self::DEFAULT_TIMEOUT)
            .build();
        Self {
            agent,
            base_url,
            attempts: Self::DEFAULT_ATTEMPTS,
        }
    }

    fn fetch_json(&self, cep: &str) -> Result<serde_json::Value, CepError> {
        let url = format!("{}/{}/json/", self.base_url, cep);
        let mut last_err = String::new();

        for attempt in 1..=self.attempts {
            match self.agent.get(&url).call() {
                Ok(response) => {
                    return response
                        .into_json()
                        .map_err(|e| CepError::ServiceUnavailable(e.to_string()));
                }
                // ViaCEP answers 400 for malformed codes.
                Err(ureq::Error::Status(400, _)) => return Err(CepError::InvalidCode),
                Err(ureq::Error::Status(code, _)) => {
                    last_err = format!("HTTP {code}");
                }
                Err(ureq::Error::Transport(t)) => {
                    last_err = t.to_string();
                }
            }
            log::warn!("CEP lookup attempt {attempt}/{} failed: {last_err}", self.attempts);
        }
        Err(CepError::ServiceUnavailable(last_err))
    }
}

impl Default for ViaCep {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressLookup for ViaCep {
    fn lookup(&self, cep: &str) -> Result<Address, CepError> {
        let cep = normalize_cep(cep)?;
        let body = self.fetch_json(&cep)?;

        // Not-found responses carry an "erro" marker instead of address fields.
        if body.get("erro").is_some() {
            return Err(CepError::NotFound);
        }

        let field = |name: &str| -> String {
            body.get(name)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };

        Ok(Address {
            cep: field("cep").replace('-', ""),
            street: field("logradouro"),
            neighborhood: field("bairro"),
            city: field("localidade"),
            state: field("uf"),
        })
    }
}
