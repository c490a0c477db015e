use optia_core::keywords::{KeywordIndex, KeywordMatch, MISSING_DESCRIPTION};

const RESOURCE: &str = "\
=== DESCRIPCIÓN DE GUÍAS ===
G1 - Guía de mercado
G2 - Guía de costos

=== PALABRAS CLAVE ===
oferta, mercado -> G1
Costos , INSUMOS -> G2
inventario -> G7
";

#[test]
fn parses_both_sections() {
    let index = KeywordIndex::parse(RESOURCE);
    assert_eq!(index.len(), 5);
    assert_eq!(index.guide_for("oferta"), Some("G1"));
    assert_eq!(index.guide_for("costos"), Some("G2"));
    assert_eq!(index.guide_for("insumos"), Some("G2"));
    assert_eq!(index.description("G1"), Some("Guía de mercado"));
    assert_eq!(index.description("G2"), Some("Guía de costos"));
}

#[test]
fn matches_keyword_with_description() {
    let index = KeywordIndex::parse(RESOURCE);
    let found = index.match_text("estudio de oferta y demanda");

    assert_eq!(found.len(), 1);
    assert_eq!(
        found.get("oferta"),
        Some(&KeywordMatch {
            guide: "G1".to_string(),
            description: "Guía de mercado".to_string(),
        })
    );
}

#[test]
fn matching_ignores_case() {
    let index = KeywordIndex::parse(RESOURCE);
    let found = index.match_text("ANÁLISIS DE OFERTA");
    assert!(found.contains_key("oferta"));
}

#[test]
fn reports_every_keyword_for_the_same_guide() {
    let index = KeywordIndex::parse(RESOURCE);
    let found = index.match_text("la oferta del mercado local");

    assert_eq!(found.len(), 2);
    assert_eq!(found["oferta"].guide, "G1");
    assert_eq!(found["mercado"].guide, "G1");
}

#[test]
fn missing_description_falls_back() {
    let index = KeywordIndex::parse(RESOURCE);
    let found = index.match_text("control de inventario");
    assert_eq!(found["inventario"].description, MISSING_DESCRIPTION);
}

#[test]
fn empty_text_or_index_matches_nothing() {
    let index = KeywordIndex::parse(RESOURCE);
    assert!(index.match_text("").is_empty());
    assert!(KeywordIndex::default().match_text("oferta").is_empty());
}

#[test]
fn lines_outside_sections_and_malformed_lines_are_skipped() {
    let text = "\
oferta -> G1
=== DESCRIPCIÓN ===
sin guía - texto
G3 sin separador
=== PALABRAS CLAVE ===
sin flecha, G3
, , -> G4
demanda ->
precio -> G5
";
    let index = KeywordIndex::parse(text);
    assert_eq!(index.len(), 1);
    assert_eq!(index.guide_for("precio"), Some("G5"));
    assert_eq!(index.guide_for("oferta"), None);
    assert_eq!(index.description("G3"), None);
}

#[test]
fn description_keeps_text_after_first_hyphen() {
    let index = KeywordIndex::parse("=== DESCRIPCION ===\nG9 - Guía de costo-beneficio\n");
    assert_eq!(index.description("G9"), Some("Guía de costo-beneficio"));
}

#[test]
fn empty_resource_yields_empty_index() {
    let index = KeywordIndex::parse("");
    assert!(index.is_empty());
}
