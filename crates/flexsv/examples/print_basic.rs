//! Basic printing example

use flexsv::{EscapeMode, Printer, PrinterBuilder, Value};

fn main() -> Result<(), flexsv::Error> {
    let mut printer = Printer::default_format();
    printer.write_row(["product", "seqn", "note"])?;
    printer.write_row_values(&[
        Value::from("agent"),
        Value::Integer(3_011_139),
        Value::from("plain, with comma"),
    ])?;
    printer.write_row_values(&[Value::from("anbs"), Value::Integer(2_478_338), Value::Null])?;

    print!("{}", printer.finish());

    // Escape only the separators the dialect actually uses.
    let mut builder = PrinterBuilder::strict();
    builder.escape_mode(EscapeMode::EnabledOnly);
    let mut printer = builder.build()?;
    printer.write_row(["semi;colons", "stay;bare"])?;
    print!("{}", printer.finish());

    Ok(())
}
