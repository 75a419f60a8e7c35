//! Validated console input.
//!
//! Every reader loops until the operator types something acceptable, echoing
//! a short Portuguese hint on bad input. The prompter is generic over its
//! reader and writer so flows can be exercised from tests with canned input.

use std::io::{BufRead, Write};
use std::sync::OnceLock;

use anyhow::{anyhow, Result};
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use cadastro_core::catalog::Catalog;
use cadastro_core::cep::{Address, AddressLookup, CepError};
use cadastro_core::query::{NumericOp, Projection};
use cadastro_core::render::{DATETIME_FMT, DATE_FMT};

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}

pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// One trimmed line. Running out of input aborts the flow.
    fn read_raw(&mut self, prompt: &str) -> Result<String> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(anyhow!("entrada encerrada"));
        }
        Ok(line.trim().to_string())
    }

    fn complain(&mut self, hint: &str) -> Result<()> {
        writeln!(self.writer, "{hint}")?;
        Ok(())
    }

    /// Free text where an empty answer means "use the default".
    pub fn read_optional_text(&mut self, prompt: &str) -> Result<String> {
        self.read_raw(prompt)
    }

    /// Non-empty free text.
    pub fn read_text(&mut self, prompt: &str) -> Result<String> {
        loop {
            let value = self.read_raw(prompt)?;
            if !value.is_empty() {
                return Ok(value);
            }
            self.complain("Valor obrigatório.")?;
        }
    }

    pub fn read_int(&mut self, prompt: &str) -> Result<i64> {
        loop {
            let raw = self.read_raw(prompt)?;
            match raw.parse::<i64>() {
                Ok(value) => return Ok(value),
                Err(_) => self.complain("Digite um número inteiro válido.")?,
            }
        }
    }

    pub fn read_int_range(&mut self, prompt: &str, min: i64, max: i64) -> Result<i64> {
        loop {
            let value = self.read_int(prompt)?;
            if (min..=max).contains(&value) {
                return Ok(value);
            }
            self.complain(&format!("Digite um valor entre {min} e {max}."))?;
        }
    }

    /// Decimal number; a comma works as the decimal separator.
    pub fn read_float(&mut self, prompt: &str) -> Result<f64> {
        loop {
            let raw = self.read_raw(prompt)?.replace(',', ".");
            match raw.parse::<f64>() {
                Ok(value) => return Ok(value),
                Err(_) => self.complain("Digite um número válido (ex.: 150,50).")?,
            }
        }
    }

    /// Date as DD/MM/YYYY.
    pub fn read_date(&mut self, prompt: &str) -> Result<NaiveDate> {
        loop {
            let raw = self.read_raw(prompt)?;
            match NaiveDate::parse_from_str(&raw, DATE_FMT) {
                Ok(date) => return Ok(date),
                Err(_) => self.complain("Data inválida. Use o formato DD/MM/AAAA.")?,
            }
        }
    }

    /// Date and time as DD/MM/YYYY HH:MM.
    pub fn read_datetime(&mut self, prompt: &str) -> Result<NaiveDateTime> {
        loop {
            let raw = self.read_raw(prompt)?;
            match NaiveDateTime::parse_from_str(&raw, DATETIME_FMT) {
                Ok(at) => return Ok(at),
                Err(_) => {
                    self.complain("Data/hora inválida. Use o formato DD/MM/AAAA HH:MM.")?
                }
            }
        }
    }

    /// S/N question, decided by the first character.
    pub fn read_yes_no(&mut self, prompt: &str) -> Result<bool> {
        loop {
            let raw = self.read_raw(prompt)?;
            match raw.chars().next().map(|c| c.to_ascii_uppercase()) {
                Some('S') => return Ok(true),
                Some('N') => return Ok(false),
                _ => self.complain("Responda S ou N.")?,
            }
        }
    }

    /// Numbered menu over `options`, returning the chosen index.
    pub fn read_choice(&mut self, title: &str, options: &[&str]) -> Result<usize> {
        writeln!(self.writer, "{title}")?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.writer, "  {} - {}", i + 1, option)?;
        }
        let choice = self.read_int_range("Opção: ", 1, options.len() as i64)?;
        Ok((choice - 1) as usize)
    }

    /// Numbered menu with `0` as the leave option. `None` means leave.
    pub fn read_menu(
        &mut self,
        title: &str,
        options: &[&str],
        exit_label: &str,
    ) -> Result<Option<usize>> {
        writeln!(self.writer, "{title}")?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.writer, "  {} - {}", i + 1, option)?;
        }
        writeln!(self.writer, "  0 - {exit_label}")?;
        let choice = self.read_int_range("Opção: ", 0, options.len() as i64)?;
        if choice == 0 {
            Ok(None)
        } else {
            Ok(Some((choice - 1) as usize))
        }
    }

    fn read_digits(&mut self, prompt: &str, len: usize, hint: &str) -> Result<String> {
        loop {
            let raw = self.read_raw(prompt)?;
            let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
            if digits.len() == len && digits.len() == raw.replace(['.', '-', ' '], "").len() {
                return Ok(digits);
            }
            self.complain(hint)?;
        }
    }

    /// CPF, exactly 11 digits (separators tolerated).
    pub fn read_cpf(&mut self) -> Result<String> {
        self.read_digits("CPF (11 dígitos): ", 11, "CPF inválido. Digite 11 dígitos.")
    }

    /// RG, exactly 9 digits (separators tolerated).
    pub fn read_rg(&mut self) -> Result<String> {
        self.read_digits("RG (9 dígitos): ", 9, "RG inválido. Digite 9 dígitos.")
    }

    /// Mobile phone, DDD + number (10 or 11 digits).
    pub fn read_phone(&mut self) -> Result<String> {
        loop {
            let raw = self.read_raw("Celular (DDD + número): ")?;
            let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
            if digits.len() == 10 || digits.len() == 11 {
                return Ok(digits);
            }
            self.complain("Telefone inválido. Digite DDD + número (10 ou 11 dígitos).")?;
        }
    }

    pub fn read_email(&mut self) -> Result<String> {
        loop {
            let raw = self.read_raw("E-mail: ")?;
            if email_regex().is_match(&raw) {
                return Ok(raw);
            }
            self.complain("E-mail inválido.")?;
        }
    }

    /// Ask for a CEP and resolve the address through the lookup service.
    /// Unknown or malformed codes re-prompt; an unavailable service offers a
    /// retry before giving up.
    pub fn read_address(&mut self, lookup: &dyn AddressLookup) -> Result<Address> {
        loop {
            let cep = self.read_text("CEP (somente números): ")?;
            match lookup.lookup(&cep) {
                Ok(address) => {
                    writeln!(
                        self.writer,
                        "Endereço: {}, {} - {}/{}",
                        address.street, address.neighborhood, address.city, address.state
                    )?;
                    return Ok(address);
                }
                Err(CepError::InvalidCode) => {
                    self.complain("CEP inválido. Digite 8 dígitos.")?
                }
                Err(CepError::NotFound) => self.complain("CEP não encontrado.")?,
                Err(CepError::ServiceUnavailable(reason)) => {
                    log::warn!("consulta de CEP indisponível: {reason}");
                    self.complain("Serviço de CEP indisponível no momento.")?;
                    if !self.read_yes_no("Tentar novamente? (S/N): ")? {
                        return Err(anyhow!("serviço de CEP indisponível"));
                    }
                }
            }
        }
    }

    /// Relational operator for a numeric search.
    pub fn read_numeric_op(&mut self) -> Result<NumericOp> {
        loop {
            let raw = self.read_raw("Operador (=, >, <, >=, <=, <>): ")?;
            match NumericOp::parse(&raw) {
                Some(op) => return Ok(op),
                None => self.complain("Operador inválido.")?,
            }
        }
    }

    /// Interactive column selection.
    ///
    /// The operator picks columns by number, one at a time or as a comma
    /// list. `A` selects every column, `0` finishes the selection; a comma
    /// list also finishes it. Duplicates count once, in first-seen order;
    /// unrecognized tokens are skipped.
    pub fn read_columns<C: Catalog>(&mut self) -> Result<Projection<C>> {
        writeln!(self.writer, "Colunas disponíveis:")?;
        for (i, column) in C::all().iter().enumerate() {
            writeln!(self.writer, "  {} - {}", i + 1, column.label())?;
        }
        writeln!(self.writer, "  A - todas as colunas")?;
        writeln!(self.writer, "  0 - encerrar seleção")?;

        let mut projection = Projection::new();
        loop {
            let raw = self.read_raw("Coluna: ")?;
            if raw.eq_ignore_ascii_case("a") {
                return Ok(Projection::all());
            }
            if raw == "0" {
                return Ok(projection);
            }
            let finishes = raw.contains(',');
            for token in raw.split(',') {
                let token = token.trim();
                if token.eq_ignore_ascii_case("a") {
                    return Ok(Projection::all());
                }
                if let Ok(index) = token.parse::<usize>() {
                    if (1..=C::all().len()).contains(&index) {
                        projection.select(C::all()[index - 1]);
                    }
                }
            }
            if finishes {
                return Ok(projection);
            }
        }
    }
}
