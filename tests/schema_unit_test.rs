//! Unit tests for schema extraction and relationship building.

use workshop_erd::schema::{
    build_relationships, extract_schema, parse_foreign_key, ForeignKeyRef, Relationship,
    SchemaBuilder,
};

mod ddl_tests {
    use super::*;

    #[test]
    fn test_workshop_scenario() {
        let sql = "CREATE TABLE clientes (id INT, nombre VARCHAR(50));\n\
                   CREATE TABLE pedidos (id INT, cliente_id INT REFERENCES clientes(id));";
        let schema = extract_schema(sql);

        assert_eq!(schema.len(), 2);
        let clientes = schema.get("clientes").unwrap();
        assert_eq!(clientes.columns, vec!["id INT", "nombre VARCHAR(50)"]);
        assert!(clientes.foreign_keys.is_empty());

        let pedidos = schema.get("pedidos").unwrap();
        assert_eq!(pedidos.columns.len(), 2);
        assert_eq!(
            pedidos.foreign_keys,
            vec![ForeignKeyRef {
                column: "cliente_id".to_string(),
                referenced_table: "clientes".to_string(),
                referenced_column: "id".to_string(),
            }]
        );

        let rels = build_relationships(&schema);
        assert_eq!(
            rels,
            vec![Relationship {
                from_table: "clientes".to_string(),
                to_table: "pedidos".to_string(),
                label: "cliente_id->id".to_string(),
            }]
        );
    }

    #[test]
    fn test_multiline_columns_in_declaration_order() {
        let sql = r#"
CREATE TABLE productos (
    id SERIAL PRIMARY KEY,
    -- datos basicos
    nombre VARCHAR(200) NOT NULL,

    precio DECIMAL(10,2),
    stock INTEGER DEFAULT 0
);
"#;
        let schema = extract_schema(sql);
        let productos = schema.get("productos").unwrap();

        assert_eq!(
            productos.columns,
            vec![
                "id SERIAL PRIMARY KEY",
                "nombre VARCHAR(200) NOT NULL",
                "precio DECIMAL(10,2)",
                "stock INTEGER DEFAULT 0",
            ]
        );
    }

    #[test]
    fn test_keyword_is_case_insensitive() {
        let schema = extract_schema("create table Items (\n  id int\n);");
        assert!(schema.contains("Items"));
    }

    #[test]
    fn test_no_create_table_yields_empty_schema() {
        assert!(extract_schema("").is_empty());
        assert!(extract_schema("SELECT * FROM clientes;\nINSERT INTO t VALUES (1);").is_empty());
        assert!(extract_schema("CREATE TABLE broken (id INT").is_empty());
    }

    #[test]
    fn test_duplicate_table_overwrites_in_place() {
        let sql = "CREATE TABLE a (x INT);\nCREATE TABLE b (y INT);\nCREATE TABLE a (z INT, w INT);";
        let schema = extract_schema(sql);

        let names: Vec<&str> = schema.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(schema.get("a").unwrap().columns, vec!["z INT", "w INT"]);
    }

    #[test]
    fn test_inline_comments_are_preserved() {
        let sql = "CREATE TABLE t (\n  id SERIAL, -- (PK) identificador\n  nombre TEXT -- obligatorio\n);";
        let schema = extract_schema(sql);

        assert_eq!(
            schema.get("t").unwrap().columns,
            vec!["id SERIAL, -- (PK) identificador", "nombre TEXT -- obligatorio"]
        );
    }

    #[test]
    fn test_statement_ends_at_first_terminator() {
        // A literal `);` inside a CHECK truncates the body
        let sql = "CREATE TABLE t (\n  a TEXT CHECK (a <> ');'),\n  b INT\n);";
        let schema = extract_schema(sql);
        let t = schema.get("t").unwrap();
        assert_eq!(t.columns.len(), 1);
        assert!(!t.columns.iter().any(|c| c.contains("b INT")));
    }

    #[test]
    fn test_multiline_check_keeps_inner_commas() {
        let sql = "CREATE TABLE detalle (\n    cantidad INTEGER,\n    precio DECIMAL(10,2),\n    CHECK (\n        cantidad > 0, precio >= 0\n    )\n);";
        let schema = extract_schema(sql);

        assert_eq!(
            schema.get("detalle").unwrap().columns,
            vec![
                "cantidad INTEGER",
                "precio DECIMAL(10,2)",
                "CHECK (",
                "cantidad > 0, precio >= 0",
                ")",
            ]
        );
    }

    #[test]
    fn test_builder_accumulates_sources() {
        let mut builder = SchemaBuilder::new();
        assert_eq!(builder.add_sql("CREATE TABLE a (id INT);"), 1);
        assert_eq!(builder.add_sql("CREATE TABLE b (a_id INT REFERENCES a(id));"), 1);
        assert_eq!(builder.add_sql("nothing here"), 0);

        let schema = builder.build();
        assert_eq!(build_relationships(&schema).len(), 1);
    }
}

mod foreign_key_tests {
    use super::*;

    #[test]
    fn test_references_is_case_insensitive() {
        let fk = parse_foreign_key("cliente_id integer references clientes(id)").unwrap();
        assert_eq!(fk.column, "cliente_id");
        assert_eq!(fk.referenced_table, "clientes");
        assert_eq!(fk.referenced_column, "id");
    }

    #[test]
    fn test_no_references() {
        assert!(parse_foreign_key("cliente_id INT NOT NULL").is_none());
    }

    #[test]
    fn test_missing_leading_identifier_is_skipped() {
        // REFERENCES found, but the line does not start with `<ident> <space>`
        assert!(parse_foreign_key("REFERENCES clientes(id)").is_none());
        assert!(parse_foreign_key("\"cliente_id\" INT REFERENCES clientes(id)").is_none());

        let schema = extract_schema("CREATE TABLE p (\n  \"cliente_id\" INT REFERENCES clientes(id)\n);");
        let p = schema.get("p").unwrap();
        assert_eq!(p.columns.len(), 1);
        assert!(p.foreign_keys.is_empty());
    }
}

mod relationship_tests {
    use super::*;

    #[test]
    fn test_dangling_reference_dropped() {
        let schema = extract_schema(
            "CREATE TABLE pedidos (\n  id INT,\n  cliente_id INT REFERENCES clientes(id)\n);",
        );

        assert_eq!(schema.get("pedidos").unwrap().foreign_keys.len(), 1);
        assert!(build_relationships(&schema).is_empty());
    }

    #[test]
    fn test_parallel_edges_and_order() {
        let sql = r#"
CREATE TABLE personas (id INT PRIMARY KEY);
CREATE TABLE envios (
    id INT PRIMARY KEY,
    remitente_id INT REFERENCES personas(id),
    destinatario_id INT REFERENCES personas(id),
    almacen_id INT REFERENCES almacenes(id)
);
CREATE TABLE notas (
    envio_id INT REFERENCES envios(id),
    autor_id INT REFERENCES personas(id)
);
"#;
        let schema = extract_schema(sql);
        let rels = build_relationships(&schema);

        let edges: Vec<(&str, &str, &str)> = rels
            .iter()
            .map(|r| (r.from_table.as_str(), r.to_table.as_str(), r.label.as_str()))
            .collect();
        assert_eq!(
            edges,
            vec![
                ("personas", "envios", "remitente_id->id"),
                ("personas", "envios", "destinatario_id->id"),
                ("envios", "notas", "envio_id->id"),
                ("personas", "notas", "autor_id->id"),
            ]
        );
    }

    #[test]
    fn test_self_reference() {
        let schema =
            extract_schema("CREATE TABLE categorias (\n  id INT,\n  padre_id INT REFERENCES categorias(id)\n);");
        let rels = build_relationships(&schema);
        assert_eq!(rels.len(), 1);
        assert_eq!(rels[0].from_table, "categorias");
        assert_eq!(rels[0].to_table, "categorias");
    }

    #[test]
    fn test_idempotent() {
        let schema = extract_schema(
            "CREATE TABLE a (id INT);\nCREATE TABLE b (id INT, a_id INT REFERENCES a(id));",
        );
        assert_eq!(build_relationships(&schema), build_relationships(&schema));
    }
}
