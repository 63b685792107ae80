use std::io::{self, Write};

use serde::Serialize;

use crate::app::{AccessionsResult, FieldsResult, ReviseResult, SubmitResult};

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_submit(result: &SubmitResult) -> io::Result<()> {
        Self::print_json(result)
    }

    pub fn print_revise(result: &ReviseResult) -> io::Result<()> {
        Self::print_json(&result.body)
    }

    pub fn print_accessions(result: &AccessionsResult) -> io::Result<()> {
        Self::print_json(result)
    }

    pub fn print_fields(result: &FieldsResult) -> io::Result<()> {
        Self::print_json(result)
    }

    pub fn render<T: Serialize>(value: &T) -> io::Result<String> {
        serde_json::to_string_pretty(value).map_err(io::Error::other)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = Self::render(value)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}
