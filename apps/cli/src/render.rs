//! Fixed-width text rendering for terminals.

use shared::domain::{ArtworkId, ArtworkRecord};

const COLUMNS: [(&str, usize); 6] = [
    ("ID", 8),
    ("Title", 36),
    ("Artist", 28),
    ("Origin", 14),
    ("Inscriptions", 20),
    ("Date Range", 13),
];

/// `marker` returns the checkbox state for a row, or `None` to omit the
/// checkbox column.
pub fn page_table(rows: &[ArtworkRecord], marker: impl Fn(ArtworkId) -> Option<bool>) -> String {
    let with_marker = rows.first().is_some_and(|row| marker(row.id).is_some());
    let mut out = String::new();

    if with_marker {
        out.push_str("    ");
    }
    let header: Vec<String> = COLUMNS
        .iter()
        .map(|(title, width)| cell(title, *width))
        .collect();
    out.push_str(header.join(" ").trim_end());
    out.push('\n');

    if rows.is_empty() {
        out.push_str("(no rows)\n");
        return out;
    }

    for row in rows {
        if let Some(checked) = marker(row.id) {
            out.push_str(checkbox(checked));
            out.push(' ');
        }
        let values = [
            row.id.to_string(),
            row.title.clone(),
            row.artist_display.clone(),
            row.place_of_origin.clone(),
            row.inscriptions.clone(),
            row.date_range_label(),
        ];
        let cells: Vec<String> = values
            .iter()
            .zip(COLUMNS.iter())
            .map(|(value, (_, width))| cell(value, *width))
            .collect();
        out.push_str(cells.join(" ").trim_end());
        out.push('\n');
    }
    out
}

pub fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Collapses whitespace and pads or truncates to exactly `width` characters.
fn cell(text: &str, width: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let len = flat.chars().count();
    if len > width {
        let mut clipped: String = flat.chars().take(width.saturating_sub(1)).collect();
        clipped.push('…');
        clipped
    } else {
        format!("{flat}{}", " ".repeat(width - len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_flattens_multiline_artist_text() {
        assert_eq!(
            cell("Vincent van Gogh\nDutch, 1853-1890", 40).trim_end(),
            "Vincent van Gogh Dutch, 1853-1890"
        );
    }

    #[test]
    fn cell_truncates_to_width() {
        let clipped = cell("A Sunday on La Grande Jatte", 10);
        assert_eq!(clipped.chars().count(), 10);
        assert!(clipped.ends_with('…'));
    }

    #[test]
    fn table_marks_selected_rows() {
        let rows = vec![
            ArtworkRecord {
                title: "The Bedroom".to_string(),
                ..ArtworkRecord::new(ArtworkId(28560))
            },
            ArtworkRecord::new(ArtworkId(27992)),
        ];

        let table = page_table(&rows, |id| Some(id == ArtworkId(28560)));
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("[x] 28560"));
        assert!(lines[1].contains("The Bedroom"));
        assert!(lines[2].starts_with("[ ] 27992"));
    }

    #[test]
    fn table_without_marker_has_no_checkbox_column() {
        let rows = vec![ArtworkRecord::new(ArtworkId(1))];

        let table = page_table(&rows, |_| None);

        assert!(table.lines().nth(1).is_some_and(|line| line.starts_with('1')));
    }

    #[test]
    fn empty_table_says_so() {
        let table = page_table(&[], |_| Some(false));
        assert!(table.ends_with("(no rows)\n"));
    }
}
