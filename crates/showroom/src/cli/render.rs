//! Terminal rendering of controller responses.

use std::io::{self, Write};

use crate::car::Car;
use crate::command::{CommandResponse, Model, PagePath};

use super::OutputFormat;

/// Write `response` to `out` in `format`.
///
/// # Errors
///
/// Returns an error if writing fails or JSON encoding fails.
pub fn render(
    response: &CommandResponse,
    format: OutputFormat,
    out: &mut impl Write,
) -> io::Result<()> {
    if format == OutputFormat::Json {
        serde_json::to_writer_pretty(&mut *out, response)?;
        return writeln!(out);
    }

    match response.model() {
        Model::Empty => match response.page() {
            PagePath::Result => writeln!(out, "Done."),
            page => writeln!(out, "{page}"),
        },
        Model::Car(car) => match format {
            OutputFormat::Table => write_table(std::slice::from_ref(car), out),
            _ => write_car(car, out),
        },
        Model::Cars(cars) => match format {
            OutputFormat::Table => write_table(cars, out),
            _ => cars.iter().try_for_each(|car| writeln!(out, "{car}")),
        },
        Model::Deleted { id, removed: true } => writeln!(out, "Deleted car {id}."),
        Model::Deleted { id, removed: false } => {
            writeln!(out, "No car with id {id}; nothing deleted.")
        }
        Model::Message(message) => writeln!(out, "{message}"),
        Model::Failure(message) => writeln!(out, "Error: {message}"),
    }
}

fn write_car(car: &Car, out: &mut impl Write) -> io::Result<()> {
    if let Some(id) = car.id() {
        writeln!(out, "Id:          {id}")?;
    }
    writeln!(out, "Name:        {}", car.name())?;
    writeln!(out, "Description: {}", car.description())
}

fn write_table(cars: &[Car], out: &mut impl Write) -> io::Result<()> {
    if cars.is_empty() {
        return writeln!(out, "No cars.");
    }

    let id_width = cars
        .iter()
        .filter_map(Car::id)
        .map(|id| id.to_string().len())
        .max()
        .unwrap_or(0)
        .max("ID".len());
    let name_width = cars
        .iter()
        .map(|car| car.name().chars().count())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    writeln!(out, "{:>id_width$}  {:<name_width$}  DESCRIPTION", "ID", "NAME")?;
    for car in cars {
        let id = car.id().map(|id| id.to_string()).unwrap_or_default();
        writeln!(
            out,
            "{id:>id_width$}  {:<name_width$}  {}",
            car.name(),
            car.description()
        )?;
    }
    Ok(())
}
