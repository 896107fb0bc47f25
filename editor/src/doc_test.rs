#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

// =============================================================
// Helpers
// =============================================================

fn section_with(elements: Vec<Element>) -> Section {
    let mut section = Section::new("Scope");
    for element in elements {
        section.push_element(element);
    }
    section
}

fn document_with(section: Section) -> (Document, SectionId) {
    let id = section.id;
    let mut doc = Document::new("Proposal");
    doc.sections.push(section);
    (doc, id)
}

fn signatory(name: &str) -> Signatory {
    Signatory { id: Uuid::new_v4(), name: name.into(), email: "x@example.com".into(), role: String::new(), order: 0 }
}

// =============================================================
// ElementKind
// =============================================================

#[test]
fn minimum_sizes_per_kind() {
    assert_eq!(ElementKind::Text.policy().min_width, 50.0);
    assert_eq!(ElementKind::Text.policy().min_height, 0.0);
    assert_eq!(ElementKind::Image.policy().min_width, 30.0);
    assert_eq!(ElementKind::Shape.policy().min_height, 30.0);
    assert_eq!(ElementKind::Table.policy().min_width, 300.0);
    assert_eq!(ElementKind::Table.policy().min_height, 200.0);
    assert_eq!(ElementKind::SignatureField.policy().min_width, 100.0);
    assert_eq!(ElementKind::SignatureField.policy().min_height, 40.0);
}

#[test]
fn default_geometries_satisfy_their_policy() {
    for kind in ElementKind::Z_ORDER {
        assert!(kind.policy().admits(&kind.default_geometry()), "{kind:?}");
    }
}

#[test]
fn kind_serializes_camel_case() {
    assert_eq!(serde_json::to_value(ElementKind::SignatureField).unwrap(), json!("signatureField"));
    assert_eq!(ElementKind::SignatureField.as_str(), "signatureField");
}

// =============================================================
// Section
// =============================================================

#[test]
fn elements_are_listed_in_stacking_order() {
    let section = section_with(vec![
        Element::signature_field(Uuid::new_v4()),
        Element::text("t"),
        Element::table(2, 2),
        Element::shape("#000"),
        Element::image("a.png"),
    ]);
    let kinds: Vec<ElementKind> = section.elements().iter().map(|e| e.kind).collect();
    assert_eq!(kinds, ElementKind::Z_ORDER.to_vec());
}

#[test]
fn later_elements_sit_above_earlier_ones_of_same_kind() {
    let first = Element::shape("#000");
    let second = Element::shape("#fff");
    let (a, b) = (first.id(), second.id());
    let section = section_with(vec![first, second]);
    let ids: Vec<ElementId> = section.elements().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![a, b]);
}

#[test]
fn set_geometry_and_remove_report_missing_elements() {
    let shape = Element::shape("#000");
    let id = shape.id();
    let mut section = section_with(vec![shape]);
    let g = Geometry::new(5.0, 6.0, 70.0, 80.0);

    assert!(section.set_geometry(ElementKind::Shape, id, g));
    assert_eq!(section.geometry_of(ElementKind::Shape, id), Some(g));
    assert!(!section.set_geometry(ElementKind::Image, id, g));
    assert!(section.remove_element(ElementKind::Shape, id));
    assert!(!section.remove_element(ElementKind::Shape, id));
}

#[test]
fn layout_columns() {
    assert_eq!(SectionLayout::Single.columns(), 1);
    assert_eq!(SectionLayout::TwoColumn.columns(), 2);
    assert_eq!(SectionLayout::ThreeColumn.columns(), 3);
    assert_eq!(serde_json::to_value(SectionLayout::TwoColumn).unwrap(), json!("two-column"));
}

#[test]
fn table_cell_lookup_tolerates_ragged_rows() {
    let table = TableBlock {
        id: Uuid::new_v4(),
        geometry: ElementKind::Table.default_geometry(),
        cells: vec![vec!["a".into(), "b".into(), "c".into()], vec!["d".into()]],
        header_row: false,
        border_color: None,
        header_background: None,
    };
    assert_eq!(table.rows(), 2);
    assert_eq!(table.columns(), 3);
    assert_eq!(table.cell(0, 2), "c");
    assert_eq!(table.cell(1, 2), "");
    assert_eq!(table.cell(9, 0), "");
}

// =============================================================
// Document
// =============================================================

#[test]
fn update_section_swaps_in_replacement() {
    let (mut doc, id) = document_with(Section::new("Old"));
    assert!(doc.update_section(id, |s| Section { title: "New".into(), ..s.clone() }));
    assert_eq!(doc.section(id).unwrap().title, "New");
    assert!(!doc.update_section(Uuid::new_v4(), Clone::clone));
}

#[test]
fn add_element_returns_reference() {
    let (mut doc, id) = document_with(Section::new("S"));
    let target = doc.add_element(id, Element::image("a.png")).unwrap();
    assert_eq!(target.section, id);
    assert_eq!(target.kind, ElementKind::Image);
    assert!(doc.contains(&target));
    assert!(doc.add_element(Uuid::new_v4(), Element::image("b.png")).is_none());
}

#[test]
fn set_geometry_on_missing_element_is_rejected() {
    let (mut doc, id) = document_with(Section::new("S"));
    let ghost = ElementRef::new(id, ElementKind::Text, Uuid::new_v4());
    assert!(!doc.set_geometry(&ghost, Geometry::new(0.0, 0.0, 60.0, 20.0)));
    assert!(!doc.remove_element(&ghost));
}

#[test]
fn set_text_content_only_touches_text() {
    let text = Element::text("before");
    let text_id = text.id();
    let (mut doc, id) = document_with(section_with(vec![text]));
    assert!(doc.set_text_content(id, text_id, "after"));
    assert_eq!(doc.section(id).unwrap().text(text_id).unwrap().content, "after");
    assert!(!doc.set_text_content(id, Uuid::new_v4(), "x"));
}

#[test]
fn violations_flag_negative_and_undersized_geometry() {
    let ok = Element::shape("#000");
    let mut bad = Element::table(1, 1);
    if let Element::Table(t) = &mut bad {
        t.geometry = Geometry::new(-5.0, 0.0, 100.0, 100.0);
    }
    let bad_id = bad.id();
    let (doc, _) = document_with(section_with(vec![ok, bad]));

    let violations = doc.violations();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].element.id, bad_id);
}

// =============================================================
// Signatories
// =============================================================

#[test]
fn remove_signatory_counts_removed_fields() {
    let alice = signatory("Alice");
    let bob = signatory("Bob");
    let mut a = section_with(vec![Element::signature_field(alice.id), Element::signature_field(bob.id)]);
    a.push_element(Element::signature_field(alice.id));
    let b = section_with(vec![Element::signature_field(alice.id)]);

    let mut doc = Document::new("P");
    doc.sections = vec![a, b];
    let mut proposal = Proposal::new(doc);
    proposal.signatories = vec![alice.clone(), bob.clone()];

    assert_eq!(proposal.remove_signatory(alice.id), Some(3));
    assert_eq!(proposal.signatories, vec![bob.clone()]);
    let remaining: Vec<SignatoryId> =
        proposal.document.sections.iter().flat_map(|s| s.signature_fields.iter().map(|f| f.recipient_id)).collect();
    assert_eq!(remaining, vec![bob.id]);
}

#[test]
fn remove_unknown_signatory_returns_none() {
    let mut proposal = Proposal::new(Document::new("P"));
    assert_eq!(proposal.remove_signatory(Uuid::new_v4()), None);
}

// =============================================================
// Serialization
// =============================================================

#[test]
fn proposal_survives_json_roundtrip() {
    let alice = signatory("Alice");
    let mut section = section_with(vec![
        Element::text("Dear {{Client}}"),
        Element::image("media/logo.png"),
        Element::shape("#2563EB"),
        Element::table(2, 3),
        Element::signature_field(alice.id),
    ]);
    section.content = vec![
        ContentBlock::new(BlockKind::Heading { level: HeadingLevel::H2 }, "Scope"),
        ContentBlock::new(BlockKind::Paragraph, "We will deliver."),
        ContentBlock::new(BlockKind::ListItem, "Design"),
    ];
    section.layout = SectionLayout::ThreeColumn;
    let (doc, _) = document_with(section);
    let mut proposal = Proposal::new(doc);
    proposal.signatories.push(alice);

    let encoded = serde_json::to_string(&proposal).unwrap();
    let decoded: Proposal = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, proposal);
}

#[test]
fn element_geometry_is_flattened() {
    let text = TextBlock {
        id: Uuid::nil(),
        geometry: Geometry::new(1.0, 2.0, 3.0, 4.0),
        content: "hi".into(),
        style: TextStyle::default(),
    };
    let value = serde_json::to_value(&text).unwrap();
    assert_eq!(value["left"], json!(1.0));
    assert_eq!(value["top"], json!(2.0));
    assert_eq!(value["width"], json!(3.0));
    assert_eq!(value["height"], json!(4.0));
}

#[test]
fn content_block_reads_type_tag() {
    let block: ContentBlock = serde_json::from_value(json!({
        "id": Uuid::nil(),
        "type": "heading",
        "level": "h4",
        "text": "Terms"
    }))
    .unwrap();
    assert_eq!(block.kind, BlockKind::Heading { level: HeadingLevel::H4 });
    assert_eq!(block.text, "Terms");
}

#[test]
fn image_opacity_defaults_to_opaque() {
    let image: ImageBlock = serde_json::from_value(json!({
        "id": Uuid::nil(),
        "top": 0.0, "left": 0.0, "width": 40.0, "height": 40.0,
        "src": "a.png"
    }))
    .unwrap();
    assert_eq!(image.opacity, 1.0);
}

#[test]
fn new_element_templates_parse_by_kind() {
    let recipient = Uuid::new_v4();
    let templates: Vec<NewElement> = serde_json::from_value(json!([
        { "kind": "text" },
        { "kind": "image", "src": "hero.png" },
        { "kind": "table", "rows": 3, "cols": 2 },
        { "kind": "signatureField", "recipientId": recipient },
    ]))
    .unwrap();
    let elements: Vec<Element> = templates.into_iter().map(Element::from).collect();
    let kinds: Vec<ElementKind> = elements.iter().map(Element::kind).collect();
    assert_eq!(kinds, vec![ElementKind::Text, ElementKind::Image, ElementKind::Table, ElementKind::SignatureField]);
    match &elements[2] {
        Element::Table(t) => assert_eq!((t.cells.len(), t.cells[0].len()), (3, 2)),
        other => panic!("expected table, got {other:?}"),
    }
    match &elements[3] {
        Element::SignatureField(f) => assert_eq!(f.recipient_id, recipient),
        other => panic!("expected signature field, got {other:?}"),
    }
}

#[test]
fn new_element_without_kind_is_rejected() {
    assert!(serde_json::from_value::<NewElement>(json!({ "src": "hero.png" })).is_err());
}
