use prettytable::format::consts::FORMAT_CLEAN;
use prettytable::{Row, Table};

/// Build a borderless table with the given column titles.
pub fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_format(*FORMAT_CLEAN);
    table.set_titles(Row::from(header.to_vec()));
    table
}

pub fn add_row(table: &mut Table, cells: Vec<String>) {
    table.add_row(Row::from(cells));
}
