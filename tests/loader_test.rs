use specdoc::document::{
    footnote_placeholder, generate_outline, load_document, search_document, Code, Element,
    FootnoteRefs, LoadOptions, Text,
};
use specdoc::export::export_to_text;
use specdoc::Config;
use std::path::Path;

fn options(sections: &[&str]) -> LoadOptions {
    LoadOptions {
        toc: "1-1".parse().expect("valid range"),
        sections: sections
            .iter()
            .map(|section| section.parse().expect("valid section"))
            .collect(),
    }
}

fn load_test_document() -> specdoc::document::Document {
    let path = Path::new("tests/fixtures/draft.txt");
    load_document(path, &options(&["body=2-3:cover"]), &Config::default())
        .expect("Failed to load test document")
}

fn text(content: &str) -> Text {
    Text::new(content)
}

#[cfg(test)]
mod load_tests {
    use super::*;

    #[test]
    fn test_metadata_and_toc() {
        let document = load_test_document();
        assert_eq!(document.title, "Programming languages — C");
        assert_eq!(document.metadata.page_count, 3);
        assert_eq!(document.metadata.footnote_count, 1);
        assert_eq!(document.toc.len(), 5);
        assert_eq!(document.toc[4].key.as_deref(), Some("6.1"));
    }

    #[test]
    fn test_cover_section() {
        let document = load_test_document();
        let section = &document.sections[0];
        assert_eq!(section.name, "body");
        assert_eq!(
            section.subheader,
            Some(vec![
                "ISO/IEC 9899:2024 (en)".to_string(),
                "N3220 working draft".to_string()
            ])
        );
        assert_eq!(section.title.as_deref(), Some("Programming languages — C"));
    }

    #[test]
    fn test_section_elements() {
        let document = load_test_document();
        let elements = &document.sections[0].elements;

        let mut referencing = text(&format!(
            "This document specifies the form and establishes the interpretation\n\
             of programs written in the C programming language.{}",
            footnote_placeholder(1)
        ));
        referencing.footnotes.insert(1);

        let expected = vec![
            Element::TitleHeading {
                text: "1 Scope".to_string(),
            },
            Element::NumberedParagraph {
                number: 1,
                text: referencing,
            },
            Element::TitleHeading {
                text: "2 Normative references".to_string(),
            },
            Element::NumberedParagraph {
                number: 1,
                text: text(
                    "The following documents are referred to in the text in such a way that\n\
                     some\n\
                     or all of their content constitutes requirements of this document.",
                ),
            },
            Element::UnorderedListItem {
                level: 1,
                indent: 0,
                text: text("ISO 80000-2, Quantities and units — Part 2: Mathematics"),
            },
            Element::TitleHeading {
                text: "6 Language".to_string(),
            },
            Element::NumberedTitleHeading {
                key: "6.1".to_string(),
                text: "Notation".to_string(),
            },
            Element::NumberedParagraph {
                number: 1,
                text: text(
                    "In the syntax notation used in this clause, syntactic categories are\n\
                     indicated by italic type:",
                ),
            },
            Element::Code(Code {
                lines: vec![
                    "if ( expression ) statement".to_string(),
                    "else statement".to_string(),
                ],
                footnotes: FootnoteRefs::new(),
            }),
            Element::NoteParagraph {
                number: 2,
                note_number: Some(1),
                to_entry: false,
                text: text("The notation is described in 6.1.1."),
            },
            Element::NumberedHeading {
                key: "6.1.1".to_string(),
            },
        ];
        assert_eq!(elements, &expected);
    }

    #[test]
    fn test_section_footnotes() {
        let document = load_test_document();
        let footnotes = &document.sections[0].footnotes;
        assert_eq!(
            footnotes.get(1),
            Some(
                &[Element::Paragraph(text(
                    "This document is designed to promote the portability of C\nprograms."
                ))][..]
            )
        );
    }

    #[test]
    fn test_page_range_out_of_bounds() {
        let path = Path::new("tests/fixtures/draft.txt");
        let error = load_document(path, &options(&["body=2-9"]), &Config::default()).unwrap_err();
        assert!(format!("{error:#}").contains("out of bounds"));
    }

    #[test]
    fn test_missing_input() {
        let path = Path::new("tests/fixtures/missing.txt");
        assert!(load_document(path, &options(&[]), &Config::default()).is_err());
    }
}

#[cfg(test)]
mod query_tests {
    use super::*;

    #[test]
    fn test_outline_follows_headings() {
        let document = load_test_document();
        let titles: Vec<(String, u8)> = generate_outline(&document)
            .into_iter()
            .map(|item| (item.title, item.level))
            .collect();
        assert_eq!(
            titles,
            vec![
                ("1 Scope".to_string(), 1),
                ("2 Normative references".to_string(), 1),
                ("6 Language".to_string(), 1),
                ("6.1 Notation".to_string(), 2),
                ("6.1.1".to_string(), 3),
            ]
        );
    }

    #[test]
    fn test_search_spans_pages() {
        let document = load_test_document();
        let results = search_document(&document, "CONSTITUTES REQUIREMENTS");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].element_index, 3);
    }

    #[test]
    fn test_text_dump_lists_footnotes() {
        let document = load_test_document();
        let dump = export_to_text(&document).expect("text export");
        assert!(dump.contains("NoteParagraph            2\tNOTE 1 The notation"));
        assert!(dump.contains("1)\tParagraph"));
    }
}
