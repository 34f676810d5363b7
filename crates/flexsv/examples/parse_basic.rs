//! Basic parsing example

use flexsv::{Parser, ParserBuilder};

fn main() -> Result<(), flexsv::Error> {
    tracing_subscriber::fmt::init();

    let data = "product,seqn,flags\r\nagent,3011139,\r\nanbs,2478338,cdn\r\n";

    let doc = Parser::default_format().parse(data)?;

    println!("Parsed {} rows", doc.row_count());
    for (index, row) in doc.rows().iter().enumerate() {
        println!("  row {index}: {:?}", row.values());
    }

    // A custom dialect: semicolon columns, CRLF rows, rectangular documents.
    let mut builder = ParserBuilder::new();
    builder.semicolon(true).crlf(true).require_equal_columns(true);
    let doc = builder.build()?.parse("a;b\r\nc;d\r\n")?;
    println!("Custom dialect parsed {} rows", doc.row_count());

    Ok(())
}
