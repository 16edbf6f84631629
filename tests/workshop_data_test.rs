//! Tests feeding the generated workshop DDL back into the ERD pipeline.

use workshop_data_gen::{bad_schema, normalized_schema, Generator, GeneratorConfig, SqlWriter, Variant};
use workshop_erd::graph::{to_dot, Layout};
use workshop_erd::schema::{build_relationships, extract_schema};

fn ddl(tables: &[workshop_data_gen::Table]) -> String {
    tables
        .iter()
        .map(|t| t.create_statement())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_normalized_ddl_relationships() {
    let schema = extract_schema(&ddl(&normalized_schema()));
    assert_eq!(schema.len(), 5);

    let rels = build_relationships(&schema);
    let edges: Vec<(&str, &str, &str)> = rels
        .iter()
        .map(|r| (r.from_table.as_str(), r.to_table.as_str(), r.label.as_str()))
        .collect();
    assert_eq!(
        edges,
        vec![
            ("categorias", "productos", "categoria_id->id"),
            ("clientes", "pedidos", "cliente_id->id"),
            ("pedidos", "detalle_pedidos", "pedido_id->id"),
            ("productos", "detalle_pedidos", "producto_id->id"),
        ]
    );
}

#[test]
fn test_bad_ddl_has_no_relationships_and_truncates() {
    let schema = extract_schema(&ddl(&bad_schema()));
    assert_eq!(schema.len(), 3);
    assert_eq!(schema.get("pedidos_completos").unwrap().columns.len(), 22);
    assert!(build_relationships(&schema).is_empty());

    let dot = to_dot(&schema, &[], "Bad Schema (Denormalized)", Layout::LR);
    assert!(dot.contains("<tr><td align=\"left\">...</td></tr>"));
}

#[test]
fn test_generated_dump_parses() {
    let config = GeneratorConfig {
        variant: Variant::Normalized,
        products: 30,
        orders: 15,
        customers: 8,
        batch_size: 7,
        include_schema: true,
        ..GeneratorConfig::default()
    };

    let mut gen = Generator::new(config);
    let mut writer = SqlWriter::new(Vec::new());
    gen.generate(&mut writer, &mut |_, _, _| {}).unwrap();
    let sql = String::from_utf8(writer.into_inner()).unwrap();

    // INSERT and setval statements do not disturb table discovery
    let schema = extract_schema(&sql);
    assert_eq!(schema.len(), 5);
    assert_eq!(build_relationships(&schema).len(), 4);
}
