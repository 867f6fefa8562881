use colored::Colorize;
use passop_application::{CredentialManager, mask};
use passop_core::CredentialList;

pub fn run(manager: &CredentialManager, show_passwords: bool) {
    print_records(manager.records(), show_passwords);
}

pub fn print_records(records: &CredentialList, show_passwords: bool) {
    if records.is_empty() {
        println!("{}", "No passwords to show".bright_black());
        return;
    }

    let mut lines = format_rows(records, show_passwords).into_iter();
    if let Some(header) = lines.next() {
        println!("{}", header.bold());
    }
    for line in lines {
        println!("{}", line);
    }
}

/// Header plus one aligned row per record, in stored order.
fn format_rows(records: &CredentialList, show_passwords: bool) -> Vec<String> {
    let rows: Vec<[String; 5]> = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let password = if show_passwords {
                record.password.clone()
            } else {
                mask(&record.password)
            };
            [
                (i + 1).to_string(),
                record.site.clone(),
                record.username.clone(),
                password,
                record.id.clone(),
            ]
        })
        .collect();

    let header = ["#", "Site", "Username", "Password", "Id"].map(String::from);
    let mut widths = header.clone().map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    std::iter::once(&header)
        .chain(rows.iter())
        .map(|row| {
            row.iter()
                .zip(widths)
                .map(|(cell, width)| {
                    let pad = width - cell.chars().count();
                    format!("{}{}", cell, " ".repeat(pad))
                })
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use passop_core::CredentialDraft;

    fn records() -> CredentialList {
        vec![
            CredentialDraft::new("a.com", "alice", "secret1").promote_with_id("id-a".to_string()),
            CredentialDraft::new("bank.example", "bob", "hunter22").promote_with_id("id-b".to_string()),
        ]
        .into()
    }

    #[test]
    fn test_rows_mask_passwords() {
        let lines = format_rows(&records(), false);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("#  Site"));
        assert!(lines[1].contains("•••••••"));
        assert!(!lines[1].contains("secret1"));
        assert!(!lines[2].contains("hunter22"));
    }

    #[test]
    fn test_rows_show_passwords_in_order() {
        let lines = format_rows(&records(), true);
        assert!(lines[1].starts_with("1  a.com"));
        assert!(lines[1].contains("secret1"));
        assert!(lines[2].starts_with("2  bank.example"));
        assert!(lines[2].ends_with("id-b"));
    }

    #[test]
    fn test_columns_aligned() {
        let lines = format_rows(&records(), true);
        let column = lines[0].find("Username").unwrap();
        assert_eq!(&lines[1][column..column + 5], "alice");
        assert_eq!(&lines[2][column..column + 3], "bob");
    }
}
