use std::collections::BTreeSet;

use super::model::{MasterTable, CODE_COLUMN};

// ---------------------------------------------------------------------------
// Sample selection over the master inventory
// ---------------------------------------------------------------------------

/// Selected sample codes. Empty means nothing selected.
pub type Selection = BTreeSet<String>;

/// Return indices of master rows whose `Code` is in `selected`, in row order.
///
/// Duplicate codes are not collapsed: every matching row is returned.
pub fn selected_indices(master: &MasterTable, selected: &Selection) -> Vec<usize> {
    let Some(code_idx) = master.column_index(CODE_COLUMN) else {
        return Vec::new();
    };
    master
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| selected.contains(&row[code_idx].to_string()))
        .map(|(i, _)| i)
        .collect()
}

/// Project the selected rows onto `Code` plus one parameter column.
/// `None` if either column is missing.
pub fn code_and_parameter(
    master: &MasterTable,
    selected: &Selection,
    parameter: &str,
) -> Option<MasterTable> {
    let code_idx = master.column_index(CODE_COLUMN)?;
    let param_idx = master.column_index(parameter)?;
    let rows = selected_indices(master, selected)
        .into_iter()
        .map(|i| vec![master.rows[i][code_idx].clone(), master.rows[i][param_idx].clone()])
        .collect();
    Some(MasterTable {
        columns: vec![CODE_COLUMN.to_string(), parameter.to_string()],
        rows,
    })
}

/// `(code, value)` pairs for a bar chart of one parameter. Non-numeric cells
/// map to `None` so the caller can decide how to show gaps.
pub fn parameter_series(
    master: &MasterTable,
    selected: &Selection,
    parameter: &str,
) -> Vec<(String, Option<f64>)> {
    let Some(table) = code_and_parameter(master, selected, parameter) else {
        return Vec::new();
    };
    table
        .rows
        .into_iter()
        .map(|row| (row[0].to_string(), row[1].as_f64()))
        .collect()
}

/// Keep only the wanted parameters that the inventory actually has.
pub fn available_parameters(master: &MasterTable, wanted: &[String]) -> Vec<String> {
    wanted
        .iter()
        .filter(|p| master.column_index(p).is_some())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_master;
    use crate::data::model::MetadataValue;

    fn master() -> MasterTable {
        parse_master("Code,BET,pH,Feedstock\nBC01,512.5,7.1,pine\nBC02,300,6.5,oak\nBC03,,8,pine\n")
            .unwrap()
    }

    fn sel(codes: &[&str]) -> Selection {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn selection_keeps_row_order() {
        assert_eq!(selected_indices(&master(), &sel(&["BC03", "BC01"])), vec![0, 2]);
        assert!(selected_indices(&master(), &sel(&[])).is_empty());
    }

    #[test]
    fn projection_to_code_and_parameter() {
        let t = code_and_parameter(&master(), &sel(&["BC02"]), "pH").unwrap();
        assert_eq!(t.columns, vec!["Code", "pH"]);
        assert_eq!(t.rows, vec![vec![
            MetadataValue::String("BC02".into()),
            MetadataValue::Float(6.5),
        ]]);
        assert!(code_and_parameter(&master(), &sel(&["BC02"]), "Yield").is_none());
    }

    #[test]
    fn series_marks_gaps() {
        let s = parameter_series(&master(), &sel(&["BC01", "BC02", "BC03"]), "BET");
        assert_eq!(s, vec![
            ("BC01".to_string(), Some(512.5)),
            ("BC02".to_string(), Some(300.0)),
            ("BC03".to_string(), None),
        ]);
    }

    #[test]
    fn parameters_filtered_to_existing_columns() {
        let wanted = vec!["BET".to_string(), "Yield".to_string(), "pH".to_string()];
        assert_eq!(available_parameters(&master(), &wanted), vec!["BET", "pH"]);
    }
}
