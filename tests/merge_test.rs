use rstest::rstest;
use specdoc::document::{
    merge_pages, Code, Element, FootnoteRefs, Footnotes, StructureError, StructuredPage, Text,
};

fn paragraph(content: &str) -> Element {
    Element::Paragraph(Text::new(content))
}

fn code(lines: &[&str], footnotes: &[u32]) -> Element {
    Element::Code(Code {
        lines: lines.iter().map(|line| line.to_string()).collect(),
        footnotes: footnotes.iter().copied().collect(),
    })
}

fn page(elements: Vec<Element>, footnote_ids: &[u32]) -> StructuredPage {
    let mut footnotes = Footnotes::new();
    for &id in footnote_ids {
        footnotes.insert(id, vec![paragraph(&format!("footnote {id}"))]);
    }
    StructuredPage {
        elements,
        footnotes,
    }
}

#[cfg(test)]
mod footnote_key_tests {
    use super::*;

    #[rstest]
    #[case(&[1, 2], &[3], true)]
    #[case(&[], &[4, 5], true)]
    #[case(&[1, 2], &[2, 3], false)]
    #[case(&[7], &[7], false)]
    fn test_footnote_ids_must_be_disjoint(
        #[case] first: &[u32],
        #[case] second: &[u32],
        #[case] succeeds: bool,
    ) {
        let result = merge_pages(vec![
            page(vec![paragraph("First page.")], first),
            page(vec![paragraph("Second page.")], second),
        ]);
        assert_eq!(result.is_ok(), succeeds);
        if let Err(error) = result {
            assert!(matches!(error, StructureError::DuplicateFootnote(_)));
        }
    }

    #[test]
    fn test_colliding_page_leaves_receiver_untouched() {
        let mut first = page(vec![code(&["int a;"], &[])], &[1]);
        let before = first.clone();
        let result = first.absorb(page(vec![code(&["int b;"], &[]), paragraph("More.")], &[1]));
        assert!(matches!(result, Err(StructureError::DuplicateFootnote(1))));
        assert_eq!(first, before);
    }

    #[test]
    fn test_footnotes_keep_page_order() {
        let merged = merge_pages(vec![page(Vec::new(), &[9, 3]), page(Vec::new(), &[4])]).unwrap();
        assert_eq!(merged.footnotes.ids().collect::<Vec<_>>(), vec![9, 3, 4]);
    }
}

#[cfg(test)]
mod boundary_repair_tests {
    use super::*;

    #[test]
    fn test_code_split_over_pages_unions_references() {
        let merged = merge_pages(vec![
            page(vec![code(&["int a;"], &[1])], &[]),
            page(vec![code(&["int b;"], &[2])], &[]),
        ])
        .unwrap();
        let expected: FootnoteRefs = [1, 2].into_iter().collect();
        assert_eq!(merged.elements, vec![code(&["int a;", "int b;"], &[1, 2])]);
        assert_eq!(merged.elements[0].footnotes(), Some(&expected));
    }

    #[test]
    fn test_numbered_code_takes_strict_code_only() {
        let numbered = Element::NumberedCode {
            number: 4,
            code: Code::new("f();"),
        };
        let merged = merge_pages(vec![
            page(vec![numbered.clone()], &[]),
            page(
                vec![Element::NumberedCode {
                    number: 5,
                    code: Code::new("g();"),
                }],
                &[],
            ),
        ])
        .unwrap();
        assert_eq!(merged.elements.len(), 2);
        assert_eq!(merged.elements[0], numbered);
    }

    #[test]
    fn test_sentence_split_over_pages() {
        let merged = merge_pages(vec![
            page(
                vec![Element::NumberedParagraph {
                    number: 3,
                    text: Text::new("The behavior is"),
                }],
                &[],
            ),
            page(vec![paragraph("undefined.")], &[]),
        ])
        .unwrap();
        assert_eq!(
            merged.elements,
            vec![Element::NumberedParagraph {
                number: 3,
                text: Text::new("The behavior is\nundefined."),
            }]
        );
    }

    #[test]
    fn test_capitalised_paragraph_starts_new_element() {
        let merged = merge_pages(vec![
            page(vec![paragraph("One sentence.")], &[]),
            page(vec![paragraph("Another one.")], &[]),
        ])
        .unwrap();
        assert_eq!(merged.elements.len(), 2);
    }

    #[test]
    fn test_value_definition_continued_as_code() {
        let merged = merge_pages(vec![
            page(
                vec![Element::ValueDefinition {
                    value: "FLT_RADIX".to_string(),
                    text: Text::new("radix of exponent"),
                }],
                &[],
            ),
            page(vec![code(&["representation"], &[])], &[]),
        ])
        .unwrap();
        assert_eq!(
            merged.elements,
            vec![Element::ValueDefinition {
                value: "FLT_RADIX".to_string(),
                text: Text::new("radix of exponent\nrepresentation"),
            }]
        );
    }

    #[test]
    fn test_no_pages() {
        assert!(matches!(
            merge_pages(Vec::new()),
            Err(StructureError::NoPages)
        ));
    }
}
