use super::ui;
use crate::core::ExchangeRateTable;

/// Renders the rate table with sources as rows and targets as columns.
pub fn render(table: &ExchangeRateTable) -> String {
    let codes = table.codes();
    let rows = table.sorted_rows();

    let mut output = ui::new_styled_table();
    let mut header = vec![ui::header_cell("From \\ To")];
    header.extend(codes.iter().map(|code| ui::header_cell(code)));
    output.set_header(header);

    for (source, row) in &rows {
        let mut cells = vec![ui::header_cell(source)];
        cells.extend(codes.iter().map(|target| match row.get(target) {
            Some(rate) => ui::rate_cell(*rate, source == target),
            None => ui::na_cell(),
        }));
        output.add_row(cells);
    }

    format!(
        "{}\n\n{}\n{}",
        ui::style_text("Exchange rates", ui::StyleType::Title),
        output,
        ui::style_text(
            "1 unit of the row currency buys this much of the column currency",
            ui::StyleType::Subtle
        )
    )
}

pub fn run(table: &ExchangeRateTable) {
    println!("{}", render(table));
}
