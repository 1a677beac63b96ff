use nest_pricing::ToolError;
use nest_pricing::build::{self, build_pricing_model};
use nest_pricing::emit::PricingSummary;
use nest_pricing::io::excel_read::SheetGrid;
use nest_pricing::model::{AddOn, CellValue};

fn text(value: &str) -> CellValue {
    CellValue::Text(value.to_string())
}

fn number(value: f64) -> CellValue {
    CellValue::Number(value)
}

/// Builds a 14-column grid; `cells` are `(data row, column, value)` triples.
fn pricing_grid(cells: Vec<(usize, usize, CellValue)>) -> SheetGrid {
    let height = cells.iter().map(|(row, _, _)| row + 1).max().unwrap_or(0);
    let mut rows = vec![vec![CellValue::Empty; 14]; height];
    for (row, column, value) in cells {
        rows[row][column] = value;
    }
    SheetGrid::new(vec![text("Preise Website")], rows)
}

fn combination_row(
    row: usize,
    label: &str,
    base: f64,
    per_module: f64,
) -> Vec<(usize, usize, CellValue)> {
    vec![
        (row, 2, text(label)),
        (row, 3, number(base)),
        (row, 4, number(per_module)),
    ]
}

#[test]
fn two_qualifying_rows_build_expected_model() {
    let mut cells = vec![(0, 13, text("2025-11-04")), (1, 2, text("Kombination"))];
    cells.extend(combination_row(2, "Holz, Fichte, Parkett", 10000.0, 50.0));
    cells.extend(combination_row(3, "Stahl, Eiche, ohne Belag", 12000.0, 60.0));

    let model = build_pricing_model(&pricing_grid(cells)).expect("model built");

    assert_eq!(model.base_combinations.len(), 2);
    assert_eq!(model.metadata.combinations_count, 2);
    assert!(model.metadata.has_ohne_belag);
    assert_eq!(model.metadata.last_updated, "2025-11-04");
    assert_eq!(model.price_range(), (10000.0, 12000.0));

    let second = &model.base_combinations[1];
    assert_eq!(second.gebaeudehuelle, "Stahl");
    assert_eq!(second.innenverkleidung, "Eiche");
    assert_eq!(second.fussboden, "ohne Belag");
    assert_eq!(second.per_module_price, 60.0);
    assert_eq!(second.original_name, "Stahl, Eiche, ohne Belag");

    let summary = PricingSummary::from_model(&model);
    assert_eq!(summary.total_combinations, 2);
    assert_eq!(summary.add_ons_count, 9);
    assert_eq!(
        summary.fussboden_types.into_iter().collect::<Vec<_>>(),
        ["Parkett", "ohne Belag"]
    );
}

#[test]
fn labels_are_trimmed_regardless_of_internal_whitespace() {
    let cells = combination_row(2, "  Holz ,   Fichte ,  Parkett  ", 1.0, 1.0);
    let model = build_pricing_model(&pricing_grid(cells)).expect("model built");

    let combo = &model.base_combinations[0];
    assert_eq!(
        (
            combo.gebaeudehuelle.as_str(),
            combo.innenverkleidung.as_str(),
            combo.fussboden.as_str()
        ),
        ("Holz", "Fichte", "Parkett")
    );
    assert_eq!(combo.original_name, "  Holz ,   Fichte ,  Parkett  ");
}

#[test]
fn decimal_comma_labels_keep_their_first_part_whole() {
    let mut cells = combination_row(2, "Holzlattung 2,5 cm, Fichte, Parkett", 9000.0, 45.0);
    cells.extend(combination_row(3, "Holz,Fichte,Parkett", 9500.0, 45.0));

    let model = build_pricing_model(&pricing_grid(cells)).expect("model built");

    assert_eq!(model.base_combinations.len(), 1);
    let combo = &model.base_combinations[0];
    assert_eq!(combo.gebaeudehuelle, "Holzlattung 2,5 cm");
    assert_eq!(combo.innenverkleidung, "Fichte");
    assert_eq!(combo.fussboden, "Parkett");
}

#[test]
fn unusable_add_on_price_keeps_the_combinations() {
    let mut cells = combination_row(2, "Holz, Fichte, Parkett", 10000.0, 50.0);
    cells.push((2, 5, number(1500.0)));
    cells.push((2, 12, text("auf Anfrage")));

    let model = build_pricing_model(&pricing_grid(cells)).expect("model built");

    assert_eq!(model.base_combinations.len(), 1);
    assert_eq!(model.add_ons[&AddOn::PvPanele], 1500.0);
    assert_eq!(model.add_ons[&AddOn::PlanungPro], 0.0);
    assert_eq!(model.add_ons.len(), AddOn::ALL.len());
}

#[test]
fn only_qualifying_rows_inside_the_scan_range_are_kept() {
    let mut cells = Vec::new();
    cells.extend(combination_row(1, "Header, row, ignored", 1.0, 1.0));
    cells.extend(combination_row(2, "Holz, Fichte, Parkett", 100.0, 1.0));
    cells.push((3, 3, number(200.0)));
    cells.extend(combination_row(4, "   ", 300.0, 1.0));
    cells.extend(combination_row(5, "Holz, Fichte", 400.0, 1.0));
    cells.extend(combination_row(28, "Stahl, Eiche, Fliesen", 500.0, 1.0));
    cells.extend(combination_row(29, "Stahl, Eiche, Beyond", 600.0, 1.0));

    let model = build_pricing_model(&pricing_grid(cells)).expect("model built");

    let names: Vec<&str> = model
        .base_combinations
        .iter()
        .map(|combo| combo.original_name.as_str())
        .collect();
    assert_eq!(names, ["Holz, Fichte, Parkett", "Stahl, Eiche, Fliesen"]);
    assert!(!model.metadata.has_ohne_belag);
}

#[test]
fn missing_prices_default_to_zero_and_numeric_text_is_accepted() {
    let cells = vec![
        (2, 2, text("Holz, Fichte, OHNE Belag")),
        (2, 4, text(" 75.5 ")),
        (2, 5, number(1500.0)),
        (2, 13, number(250.0)),
    ];

    let model = build_pricing_model(&pricing_grid(cells)).expect("model built");

    let combo = &model.base_combinations[0];
    assert_eq!(combo.base_price, 0.0);
    assert_eq!(combo.per_module_price, 75.5);
    assert!(model.metadata.has_ohne_belag);
    assert_eq!(model.metadata.last_updated, build::UNKNOWN_LAST_UPDATED);

    assert_eq!(model.add_ons.len(), AddOn::ALL.len());
    assert_eq!(model.add_ons[&AddOn::PvPanele], 1500.0);
    assert_eq!(model.add_ons[&AddOn::FensterAlu], 0.0);
    assert_eq!(model.add_ons[&AddOn::Grundstueckscheck], 250.0);
    let keys: Vec<AddOn> = model.add_ons.keys().copied().collect();
    assert_eq!(keys, AddOn::ALL);
}

#[test]
fn empty_sheet_yields_empty_model() {
    let model = build_pricing_model(&SheetGrid::new(Vec::new(), Vec::new())).expect("model built");

    assert!(model.base_combinations.is_empty());
    assert!(!model.metadata.has_ohne_belag);
    assert_eq!(model.price_range(), (0.0, 0.0));
    assert!(model.add_ons.values().all(|price| *price == 0.0));
}

#[test]
fn non_numeric_price_fails_the_whole_build() {
    let mut cells = combination_row(2, "Holz, Fichte, Parkett", 100.0, 1.0);
    cells.push((3, 2, text("Stahl, Eiche, Parkett")));
    cells.push((3, 3, text("auf Anfrage")));

    let error = build_pricing_model(&pricing_grid(cells)).expect_err("build rejected");

    match error {
        ToolError::InvalidCell { row, column, value } => {
            assert_eq!((row, column), (3, 3));
            assert_eq!(value, "auf Anfrage");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn negative_price_is_rejected() {
    let cells = combination_row(2, "Holz, Fichte, Parkett", -5.0, 1.0);
    assert!(matches!(
        build_pricing_model(&pricing_grid(cells)),
        Err(ToolError::InvalidCell { .. })
    ));
}
