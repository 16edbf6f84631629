//! Table definitions for the two workshop schema variants.
//!
//! Both variants render to PostgreSQL DDL with one column per line and
//! inline `REFERENCES` so the output can be fed straight back into the ERD
//! tool.

/// SQL data types used by the workshop tables
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SqlType {
    /// Auto-incrementing integer
    Serial,
    /// 32-bit integer
    Integer,
    /// Variable-length string
    VarChar(u16),
    /// Unlimited text
    Text,
    /// Boolean
    Boolean,
    /// Decimal with precision and scale
    Decimal(u8, u8),
    /// Timestamp without time zone
    Timestamp,
}

impl SqlType {
    /// Returns the PostgreSQL type string
    pub fn to_postgres(&self) -> String {
        match self {
            SqlType::Serial => "SERIAL".to_string(),
            SqlType::Integer => "INTEGER".to_string(),
            SqlType::VarChar(n) => format!("VARCHAR({})", n),
            SqlType::Text => "TEXT".to_string(),
            SqlType::Boolean => "BOOLEAN".to_string(),
            SqlType::Decimal(p, s) => format!("DECIMAL({},{})", p, s),
            SqlType::Timestamp => "TIMESTAMP".to_string(),
        }
    }
}

/// Column definition
#[derive(Debug, Clone)]
pub struct Column {
    pub name: &'static str,
    pub sql_type: SqlType,
    pub nullable: bool,
    pub primary_key: bool,
    /// Referenced (table, column)
    pub references: Option<(&'static str, &'static str)>,
}

impl Column {
    pub fn new(name: &'static str, sql_type: SqlType) -> Self {
        Self {
            name,
            sql_type,
            nullable: true,
            primary_key: false,
            references: None,
        }
    }

    pub fn primary_key(name: &'static str) -> Self {
        Self {
            primary_key: true,
            nullable: false,
            ..Self::new(name, SqlType::Serial)
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn references(mut self, table: &'static str, column: &'static str) -> Self {
        self.references = Some((table, column));
        self
    }

    /// Render the column definition
    pub fn to_postgres(&self) -> String {
        let mut def = format!("{} {}", self.name, self.sql_type.to_postgres());
        if self.primary_key {
            def.push_str(" PRIMARY KEY");
        } else if !self.nullable {
            def.push_str(" NOT NULL");
        }
        if let Some((table, column)) = self.references {
            def.push_str(&format!(" REFERENCES {}({})", table, column));
        }
        def
    }
}

/// Table definition
#[derive(Debug, Clone)]
pub struct Table {
    pub name: &'static str,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: &'static str, columns: Vec<Column>) -> Self {
        Self { name, columns }
    }

    /// Render a CREATE TABLE statement
    pub fn create_statement(&self) -> String {
        let columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| format!("    {}", c.to_postgres()))
            .collect();
        format!("CREATE TABLE {} (\n{}\n);\n", self.name, columns.join(",\n"))
    }

    /// Column names, optionally leaving out the serial primary key
    pub fn column_names(&self, include_serial: bool) -> Vec<&'static str> {
        self.columns
            .iter()
            .filter(|c| include_serial || c.sql_type != SqlType::Serial)
            .map(|c| c.name)
            .collect()
    }
}

fn money() -> SqlType {
    SqlType::Decimal(10, 2)
}

/// Denormalized tables: repeated customer and product data, no references
pub fn bad_schema() -> [Table; 3] {
    use SqlType::*;

    let mut order_columns = vec![
        Column::primary_key("id"),
        Column::new("cliente_nombre", VarChar(200)),
        Column::new("cliente_email", VarChar(200)),
        Column::new("cliente_telefono", VarChar(50)),
        Column::new("cliente_direccion", Text),
        Column::new("cliente_ciudad", VarChar(100)),
        Column::new("cliente_codigo_postal", VarChar(20)),
    ];
    for (nombre, descripcion, precio, cantidad) in [
        ("producto1_nombre", "producto1_descripcion", "producto1_precio", "producto1_cantidad"),
        ("producto2_nombre", "producto2_descripcion", "producto2_precio", "producto2_cantidad"),
        ("producto3_nombre", "producto3_descripcion", "producto3_precio", "producto3_cantidad"),
    ] {
        order_columns.push(Column::new(nombre, VarChar(200)));
        order_columns.push(Column::new(descripcion, Text));
        order_columns.push(Column::new(precio, money()));
        order_columns.push(Column::new(cantidad, Integer));
    }
    order_columns.push(Column::new("fecha_pedido", Timestamp));
    order_columns.push(Column::new("total", Decimal(12, 2)));
    order_columns.push(Column::new("estado", VarChar(20)));

    [
        Table::new(
            "productos_bad",
            vec![
                Column::primary_key("id"),
                Column::new("nombre", VarChar(200)),
                Column::new("descripcion", Text),
                Column::new("precio", money()),
                Column::new("stock", Integer),
                Column::new("categoria_id", Integer),
                Column::new("categoria_nombre", VarChar(100)),
                Column::new("activo", Boolean),
            ],
        ),
        Table::new("pedidos_completos", order_columns),
        Table::new(
            "pedidos_bad",
            vec![
                Column::primary_key("id"),
                Column::new("cliente_id", Integer),
                Column::new("fecha_pedido", Timestamp),
                Column::new("total", money()),
                Column::new("estado", VarChar(20)),
            ],
        ),
    ]
}

/// Normalized (3NF) tables linked by foreign keys
pub fn normalized_schema() -> [Table; 5] {
    use SqlType::*;

    [
        Table::new(
            "categorias",
            vec![
                Column::primary_key("id"),
                Column::new("nombre", VarChar(100)).not_null(),
            ],
        ),
        Table::new(
            "clientes",
            vec![
                Column::primary_key("id"),
                Column::new("nombre", VarChar(200)).not_null(),
                Column::new("email", VarChar(200)).not_null(),
                Column::new("telefono", VarChar(50)),
                Column::new("direccion", Text),
                Column::new("ciudad", VarChar(100)),
                Column::new("codigo_postal", VarChar(20)),
            ],
        ),
        Table::new(
            "productos",
            vec![
                Column::primary_key("id"),
                Column::new("nombre", VarChar(200)).not_null(),
                Column::new("descripcion", Text),
                Column::new("precio", money()).not_null(),
                Column::new("stock", Integer).not_null(),
                Column::new("categoria_id", Integer)
                    .not_null()
                    .references("categorias", "id"),
                Column::new("activo", Boolean).not_null(),
            ],
        ),
        Table::new(
            "pedidos",
            vec![
                Column::primary_key("id"),
                Column::new("cliente_id", Integer)
                    .not_null()
                    .references("clientes", "id"),
                Column::new("fecha_pedido", Timestamp).not_null(),
                Column::new("total", money()).not_null(),
                Column::new("estado", VarChar(20)).not_null(),
            ],
        ),
        Table::new(
            "detalle_pedidos",
            vec![
                Column::primary_key("id"),
                Column::new("pedido_id", Integer)
                    .not_null()
                    .references("pedidos", "id"),
                Column::new("producto_id", Integer)
                    .not_null()
                    .references("productos", "id"),
                Column::new("cantidad", Integer).not_null(),
                Column::new("precio_unitario", money()).not_null(),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_statement_layout() {
        let tables = normalized_schema();
        let pedidos = tables.iter().find(|t| t.name == "pedidos").unwrap();
        let ddl = pedidos.create_statement();

        assert!(ddl.starts_with("CREATE TABLE pedidos (\n    id SERIAL PRIMARY KEY,\n"));
        assert!(ddl.contains("    cliente_id INTEGER NOT NULL REFERENCES clientes(id),\n"));
        assert!(ddl.ends_with("\n);\n"));
    }

    #[test]
    fn test_bad_orders_have_21_data_columns() {
        let tables = bad_schema();
        let orders = tables
            .iter()
            .find(|t| t.name == "pedidos_completos")
            .unwrap();
        assert_eq!(orders.column_names(false).len(), 21);
        assert_eq!(orders.column_names(true).len(), 22);
    }

    #[test]
    fn test_bad_schema_has_no_references() {
        assert!(bad_schema()
            .iter()
            .flat_map(|t| t.columns.iter())
            .all(|c| c.references.is_none()));
    }
}
