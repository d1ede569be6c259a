//! Plain-text tables for terminal output.

use leadminer_core::{BusinessContact, GroundingSource, NOT_AVAILABLE};

const HEADERS: [&str; 8] = [
    "#", "Name", "Phone", "Email", "Address", "Website", "Rating", "Type",
];

/// Left-aligned table of contacts. Top-rated contacts get a star next to
/// their rating and bare domains are shown as links.
pub(crate) fn render_contacts(contacts: &[BusinessContact]) -> String {
    if contacts.is_empty() {
        return "No leads found.".to_string();
    }

    let rows: Vec<[String; 8]> = contacts
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let rating = if c.is_top_rated() {
                format!("* {}", c.rating)
            } else {
                c.rating.clone()
            };
            [
                (i + 1).to_string(),
                c.name.clone(),
                c.phone.clone(),
                c.email.clone(),
                c.address.clone(),
                c.website_url().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                rating,
                c.kind.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS[..], &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule[..], &widths);
    for row in &rows {
        push_row(&mut out, &row[..], &widths);
    }
    out.truncate(out.trim_end().len());
    out
}

/// One `title - uri` line per source.
pub(crate) fn render_sources(sources: &[&GroundingSource]) -> String {
    sources
        .iter()
        .map(|s| format!("  {} - {}", s.title, s.uri))
        .collect::<Vec<_>>()
        .join("\n")
}

fn push_row<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let cell = cell.as_ref();
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(" | ");
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use leadminer_core::DEFAULT_KIND;

    use super::*;

    fn contact(name: &str, website: &str, rating: &str) -> BusinessContact {
        BusinessContact {
            id: uuid::Uuid::new_v4(),
            name: name.to_string(),
            phone: "555-1234".to_string(),
            email: NOT_AVAILABLE.to_string(),
            address: "1 Main St".to_string(),
            website: website.to_string(),
            rating: rating.to_string(),
            kind: DEFAULT_KIND.to_string(),
        }
    }

    #[test]
    fn empty_list_renders_notice() {
        assert_eq!(render_contacts(&[]), "No leads found.");
    }

    #[test]
    fn table_has_header_rule_and_rows() {
        let out = render_contacts(&[
            contact("Acme", "acme.com", "4.8"),
            contact("Beta Dental Clinic", NOT_AVAILABLE, "4.0"),
        ]);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("# | Name "));
        assert!(lines[1].starts_with("- | ---"));
        assert!(lines[2].contains("https://acme.com"));
        assert!(lines[2].contains("* 4.8"));
        assert!(lines[3].contains("Beta Dental Clinic"));
        assert!(!lines[3].contains("* 4.0"));
    }

    #[test]
    fn columns_are_aligned() {
        let out = render_contacts(&[
            contact("A", "a.com", "4.1"),
            contact("Much Longer Name", "b.com", "4.2"),
        ]);
        let phone_offsets: Vec<usize> = out
            .lines()
            .skip(2)
            .map(|line| line.find("555-1234").unwrap())
            .collect();
        assert_eq!(phone_offsets[0], phone_offsets[1]);
    }

    #[test]
    fn sources_render_one_per_line() {
        let a = GroundingSource {
            title: "Directory".to_string(),
            uri: "https://d.example".to_string(),
        };
        let b = GroundingSource {
            title: "Acme".to_string(),
            uri: "#".to_string(),
        };
        assert_eq!(
            render_sources(&[&a, &b]),
            "  Directory - https://d.example\n  Acme - #"
        );
    }
}
