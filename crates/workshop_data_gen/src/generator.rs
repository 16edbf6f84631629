//! Data generator that produces rows for the workshop schema variants.
//!
//! Rows are produced batch by batch and written straight to a [`SqlWriter`],
//! so memory stays flat regardless of row counts. The same config and seed
//! always produce the same output.

use crate::fake::{round_cents, FakeData, CATALOG, ORDER_STATUSES, ORDER_STATUSES_WITH_CANCELLED};
use crate::renderer::SqlWriter;
use crate::schema::{bad_schema, normalized_schema, Table};
use chrono::{Local, NaiveDateTime};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::io::{self, Write};

/// Products drawn into the denormalized orders
const PRODUCT_SAMPLE_SIZE: usize = 1000;
/// Upper bound for the loose `cliente_id` of `pedidos_bad`
const MAX_LOOSE_CLIENT_ID: i64 = 5000;
const ACTIVE_PROBABILITY: f64 = 0.75;
const SECOND_PRODUCT_PROBABILITY: f64 = 0.7;
const THIRD_PRODUCT_PROBABILITY: f64 = 0.3;

/// Which workshop schema to populate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Denormalized tables with repeated data
    #[default]
    Bad,
    /// Normalized (3NF) tables with foreign keys
    Normalized,
}

impl Variant {
    /// Table definitions for this variant, in insert order
    pub fn tables(&self) -> Vec<Table> {
        match self {
            Variant::Bad => bad_schema().into(),
            Variant::Normalized => normalized_schema().into(),
        }
    }
}

impl std::str::FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bad" | "denormalized" => Ok(Variant::Bad),
            "normalized" | "good" | "3nf" => Ok(Variant::Normalized),
            _ => Err(format!(
                "Unknown variant: {}. Use bad or normalized",
                s
            )),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Bad => write!(f, "bad (denormalized)"),
            Variant::Normalized => write!(f, "normalized (3NF)"),
        }
    }
}

/// SQL value representation
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
}

impl SqlValue {
    /// Format for PostgreSQL INSERT statement
    pub fn to_postgres(&self) -> String {
        match self {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Int(n) => n.to_string(),
            SqlValue::Float(n) => format!("{:.2}", n),
            SqlValue::String(s) => format!("'{}'", s.replace('\'', "''")),
            SqlValue::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        }
    }
}

/// A row of values
pub type Row = Vec<SqlValue>;

/// Generator settings
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub variant: Variant,
    /// Rows for the product table
    pub products: usize,
    /// Rows for each order table
    pub orders: usize,
    /// Size of the customer pool (rows of `clientes` in the normalized variant)
    pub customers: usize,
    pub seed: u64,
    /// Rows per INSERT statement
    pub batch_size: usize,
    /// Emit CREATE TABLE statements before the data
    pub include_schema: bool,
    /// Order dates fall within the year before this instant
    pub reference_time: NaiveDateTime,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Bad,
            products: 500_000,
            orders: 200_000,
            customers: 20_000,
            seed: 12345,
            batch_size: 1000,
            include_schema: false,
            reference_time: Local::now().naive_local(),
        }
    }
}

impl GeneratorConfig {
    /// Check that the counts can produce consistent data
    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("batch size must be at least 1".to_string());
        }
        if self.orders > 0 && self.customers == 0 {
            return Err("generating orders requires at least one customer".to_string());
        }
        if self.variant == Variant::Normalized && self.orders > 0 && self.products == 0 {
            return Err("normalized orders require at least one product".to_string());
        }
        Ok(())
    }
}

/// Rows written for one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    pub table: &'static str,
    pub rows: usize,
}

/// Progress callback: table name, rows done, rows total
pub type ProgressFn<'a> = dyn FnMut(&str, usize, usize) + 'a;

/// Customer data shared by the customer pool and `clientes`
#[derive(Debug, Clone)]
struct Customer {
    nombre: String,
    email: String,
    telefono: String,
    direccion: String,
    ciudad: String,
    codigo_postal: String,
}

impl Customer {
    fn fake<R: Rng>(fake: &mut FakeData<R>) -> Self {
        Self {
            nombre: fake.full_name(),
            email: fake.email(),
            telefono: fake.phone(),
            direccion: fake.address(),
            ciudad: fake.city().to_string(),
            codigo_postal: fake.postcode(),
        }
    }

    fn values(&self) -> Row {
        vec![
            SqlValue::String(self.nombre.clone()),
            SqlValue::String(self.email.clone()),
            SqlValue::String(self.telefono.clone()),
            SqlValue::String(self.direccion.clone()),
            SqlValue::String(self.ciudad.clone()),
            SqlValue::String(self.codigo_postal.clone()),
        ]
    }
}

/// Catalog product
#[derive(Debug, Clone)]
struct Product {
    nombre: String,
    descripcion: String,
    precio: f64,
    stock: i64,
    categoria_id: i64,
    categoria_nombre: &'static str,
    activo: bool,
}

impl Product {
    fn fake<R: Rng>(fake: &mut FakeData<R>) -> Self {
        let (categoria_id, categoria_nombre, base_names) = fake.category();
        Self {
            nombre: fake.product_name(base_names),
            descripcion: fake.text(200),
            precio: fake.price(10.0, 2000.0),
            stock: fake.int_range(0, 500),
            categoria_id,
            categoria_nombre,
            activo: fake.bool_with_probability(ACTIVE_PROBABILITY),
        }
    }
}

/// Product copied into denormalized orders
#[derive(Debug, Clone)]
struct OrderedProduct {
    nombre: String,
    descripcion: String,
    precio: f64,
}

impl OrderedProduct {
    fn fake<R: Rng>(fake: &mut FakeData<R>) -> Self {
        Self {
            nombre: fake.loose_product_name(),
            descripcion: fake.text(100),
            precio: fake.price(10.0, 500.0),
        }
    }

    fn values(&self, cantidad: i64) -> [SqlValue; 4] {
        [
            SqlValue::String(self.nombre.clone()),
            SqlValue::String(self.descripcion.clone()),
            SqlValue::Float(self.precio),
            SqlValue::Int(cantidad),
        ]
    }
}

/// Writes rows in INSERT batches and reports progress
struct Emitter<'a, 'p, W: Write> {
    writer: &'a mut SqlWriter<W>,
    batch_size: usize,
    progress: &'a mut ProgressFn<'p>,
}

impl<W: Write> Emitter<'_, '_, W> {
    /// Write `count` rows produced by `make_row(fake, index)`
    fn emit<R, F>(
        &mut self,
        table: &Table,
        include_serial: bool,
        count: usize,
        fake: &mut FakeData<R>,
        mut make_row: F,
    ) -> io::Result<TableSummary>
    where
        R: Rng,
        F: FnMut(&mut FakeData<R>, usize) -> Row,
    {
        let columns = table.column_names(include_serial);
        let mut batch = Vec::with_capacity(self.batch_size.min(count));
        let mut done = 0;

        while done < count {
            let n = self.batch_size.min(count - done);
            batch.clear();
            for i in 0..n {
                batch.push(make_row(fake, done + i));
            }
            self.writer.write_insert(table.name, &columns, &batch)?;
            done += n;
            (self.progress)(table.name, done, count);
        }

        Ok(TableSummary {
            table: table.name,
            rows: count,
        })
    }
}

/// Main data generator
pub struct Generator {
    config: GeneratorConfig,
    fake: FakeData<ChaCha8Rng>,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            config,
            fake: FakeData::new(rng),
        }
    }

    /// Generate all tables of the configured variant
    pub fn generate<W: Write>(
        &mut self,
        writer: &mut SqlWriter<W>,
        progress: &mut ProgressFn<'_>,
    ) -> io::Result<Vec<TableSummary>> {
        self.config
            .validate()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        writer.write_header(&[
            "Generated by gen-workshop-data".to_string(),
            format!("Variant: {}", self.config.variant),
            format!("Seed: {}", self.config.seed),
            format!(
                "Reference time: {}",
                self.config.reference_time.format("%Y-%m-%d %H:%M:%S")
            ),
        ])?;

        if self.config.include_schema {
            for table in self.config.variant.tables() {
                writer.write_create_table(&table)?;
            }
        }

        let mut emitter = Emitter {
            writer,
            batch_size: self.config.batch_size,
            progress,
        };

        let summaries = match self.config.variant {
            Variant::Bad => self.generate_bad(&mut emitter)?,
            Variant::Normalized => self.generate_normalized(&mut emitter)?,
        };

        emitter.writer.flush()?;
        Ok(summaries)
    }

    /// productos_bad, pedidos_completos and pedidos_bad
    fn generate_bad<W: Write>(
        &mut self,
        emitter: &mut Emitter<'_, '_, W>,
    ) -> io::Result<Vec<TableSummary>> {
        let config = &self.config;
        let fake = &mut self.fake;
        let reference = config.reference_time;
        let [productos, completos, simples] = bad_schema();
        let mut summaries = Vec::new();

        summaries.push(emitter.emit(&productos, false, config.products, fake, |fake, _| {
            let p = Product::fake(fake);
            vec![
                SqlValue::String(p.nombre),
                SqlValue::String(p.descripcion),
                SqlValue::Float(p.precio),
                SqlValue::Int(p.stock),
                SqlValue::Int(p.categoria_id),
                SqlValue::String(p.categoria_nombre.to_string()),
                SqlValue::Bool(p.activo),
            ]
        })?);

        // The same customers and products repeat across orders on purpose
        let customers: Vec<Customer> = (0..config.customers).map(|_| Customer::fake(fake)).collect();
        let sample: Vec<OrderedProduct> = (0..PRODUCT_SAMPLE_SIZE)
            .map(|_| OrderedProduct::fake(fake))
            .collect();

        summaries.push(emitter.emit(&completos, false, config.orders, fake, |fake, _| {
            denormalized_order(fake, &customers, &sample, reference)
        })?);

        summaries.push(emitter.emit(&simples, false, config.orders, fake, |fake, _| {
            vec![
                SqlValue::Int(fake.int_range(1, MAX_LOOSE_CLIENT_ID)),
                SqlValue::String(fake.datetime_last_year(reference)),
                SqlValue::Float(fake.price(20.0, 2000.0)),
                SqlValue::String(fake.order_status(ORDER_STATUSES_WITH_CANCELLED).to_string()),
            ]
        })?);

        Ok(summaries)
    }

    /// categorias, clientes, productos, pedidos and detalle_pedidos
    fn generate_normalized<W: Write>(
        &mut self,
        emitter: &mut Emitter<'_, '_, W>,
    ) -> io::Result<Vec<TableSummary>> {
        let config = &self.config;
        let fake = &mut self.fake;
        let [categorias, clientes, productos, pedidos, detalle] = normalized_schema();
        let mut summaries = Vec::new();

        summaries.push(emitter.emit(&categorias, true, CATALOG.len(), fake, |_, i| {
            let (id, nombre, _) = CATALOG[i];
            vec![SqlValue::Int(id), SqlValue::String(nombre.to_string())]
        })?);

        summaries.push(emitter.emit(&clientes, true, config.customers, fake, |fake, i| {
            let mut row = vec![SqlValue::Int(i as i64 + 1)];
            row.extend(Customer::fake(fake).values());
            row
        })?);

        let mut prices = Vec::with_capacity(config.products);
        summaries.push(emitter.emit(&productos, true, config.products, fake, |fake, i| {
            let p = Product::fake(fake);
            prices.push(p.precio);
            vec![
                SqlValue::Int(i as i64 + 1),
                SqlValue::String(p.nombre),
                SqlValue::String(p.descripcion),
                SqlValue::Float(p.precio),
                SqlValue::Int(p.stock),
                SqlValue::Int(p.categoria_id),
                SqlValue::Bool(p.activo),
            ]
        })?);

        let order_columns = pedidos.column_names(true);
        let detail_columns = detalle.column_names(true);
        let mut detail_id = 0i64;
        let mut done = 0;

        while done < config.orders {
            let n = emitter.batch_size.min(config.orders - done);
            let mut order_rows = Vec::with_capacity(n);
            let mut detail_rows = Vec::with_capacity(n * 2);

            for i in 0..n {
                let pedido_id = (done + i + 1) as i64;
                let cliente_id = fake.int_range(1, config.customers as i64);
                let lines = fake.int_range(1, 3) as usize;
                let mut total = 0.0;

                for idx in fake.distinct_indexes(prices.len(), lines) {
                    let cantidad = fake.int_range(1, 5);
                    let precio = prices[idx];
                    total += precio * cantidad as f64;
                    detail_id += 1;
                    detail_rows.push(vec![
                        SqlValue::Int(detail_id),
                        SqlValue::Int(pedido_id),
                        SqlValue::Int(idx as i64 + 1),
                        SqlValue::Int(cantidad),
                        SqlValue::Float(precio),
                    ]);
                }

                order_rows.push(vec![
                    SqlValue::Int(pedido_id),
                    SqlValue::Int(cliente_id),
                    SqlValue::String(fake.datetime_last_year(config.reference_time)),
                    SqlValue::Float(round_cents(total)),
                    SqlValue::String(fake.order_status(ORDER_STATUSES_WITH_CANCELLED).to_string()),
                ]);
            }

            // Parents before children keeps every batch FK-consistent
            emitter.writer.write_insert(pedidos.name, &order_columns, &order_rows)?;
            emitter.writer.write_insert(detalle.name, &detail_columns, &detail_rows)?;
            done += n;
            (emitter.progress)(pedidos.name, done, config.orders);
        }

        summaries.push(TableSummary {
            table: pedidos.name,
            rows: config.orders,
        });
        summaries.push(TableSummary {
            table: detalle.name,
            rows: detail_id as usize,
        });

        for table in [&categorias, &clientes, &productos, &pedidos, &detalle] {
            emitter.writer.write_sequence_reset(table.name)?;
        }

        Ok(summaries)
    }
}

/// One `pedidos_completos` row: customer copy, up to three product copies,
/// date, total and status
fn denormalized_order<R: Rng>(
    fake: &mut FakeData<R>,
    customers: &[Customer],
    sample: &[OrderedProduct],
    reference: NaiveDateTime,
) -> Row {
    let mut row = fake.pick(customers).values();

    let first = fake.pick(sample);
    let cantidad = fake.int_range(1, 5);
    let mut total = first.precio * cantidad as f64;
    row.extend(first.values(cantidad));

    for (probability, max_quantity) in [(SECOND_PRODUCT_PROBABILITY, 3), (THIRD_PRODUCT_PROBABILITY, 2)] {
        if fake.bool_with_probability(probability) {
            let product = fake.pick(sample);
            let cantidad = fake.int_range(1, max_quantity);
            total += product.precio * cantidad as f64;
            row.extend(product.values(cantidad));
        } else {
            row.extend([SqlValue::Null, SqlValue::Null, SqlValue::Null, SqlValue::Null]);
        }
    }

    row.push(SqlValue::String(fake.datetime_last_year(reference)));
    row.push(SqlValue::Float(round_cents(total)));
    row.push(SqlValue::String(fake.order_status(ORDER_STATUSES).to_string()));
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn small_config(variant: Variant) -> GeneratorConfig {
        GeneratorConfig {
            variant,
            products: 40,
            orders: 25,
            customers: 10,
            seed: 42,
            batch_size: 10,
            include_schema: true,
            reference_time: NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    fn generate(config: GeneratorConfig) -> (String, Vec<TableSummary>) {
        let mut gen = Generator::new(config);
        let mut writer = SqlWriter::new(Vec::new());
        let summaries = gen.generate(&mut writer, &mut |_, _, _| {}).unwrap();
        (String::from_utf8(writer.into_inner()).unwrap(), summaries)
    }

    #[test]
    fn test_generator_deterministic() {
        let (sql1, _) = generate(small_config(Variant::Bad));
        let (sql2, _) = generate(small_config(Variant::Bad));
        assert_eq!(sql1, sql2);

        let mut other = small_config(Variant::Bad);
        other.seed = 43;
        let (sql3, _) = generate(other);
        assert_ne!(sql1, sql3);
    }

    #[test]
    fn test_bad_variant_tables() {
        let (sql, summaries) = generate(small_config(Variant::Bad));

        assert_eq!(
            summaries,
            vec![
                TableSummary { table: "productos_bad", rows: 40 },
                TableSummary { table: "pedidos_completos", rows: 25 },
                TableSummary { table: "pedidos_bad", rows: 25 },
            ]
        );
        // 40 products in batches of 10, 25 orders in batches of 10 twice
        assert_eq!(sql.matches("INSERT INTO productos_bad").count(), 4);
        assert_eq!(sql.matches("INSERT INTO pedidos_completos").count(), 3);
        assert_eq!(sql.matches("INSERT INTO pedidos_bad").count(), 3);
        assert!(sql.contains("CREATE TABLE pedidos_completos ("));
    }

    #[test]
    fn test_denormalized_order_shape() {
        let config = small_config(Variant::Bad);
        let mut fake = FakeData::new(ChaCha8Rng::seed_from_u64(7));
        let customers: Vec<Customer> = (0..3).map(|_| Customer::fake(&mut fake)).collect();
        let sample: Vec<OrderedProduct> = (0..5).map(|_| OrderedProduct::fake(&mut fake)).collect();

        for _ in 0..50 {
            let row = denormalized_order(&mut fake, &customers, &sample, config.reference_time);
            assert_eq!(row.len(), 21);

            // Total equals the sum of price * quantity over present products
            let mut expected = 0.0;
            for slot in 0..3 {
                let base = 6 + slot * 4;
                match (&row[base + 2], &row[base + 3]) {
                    (SqlValue::Float(p), SqlValue::Int(q)) => expected += p * *q as f64,
                    (SqlValue::Null, SqlValue::Null) => assert!(slot > 0),
                    other => panic!("unexpected product slot {:?}", other),
                }
            }
            assert_eq!(row[19], SqlValue::Float(round_cents(expected)));
        }
    }

    #[test]
    fn test_normalized_fk_consistency() {
        let config = small_config(Variant::Normalized);
        let (sql, summaries) = generate(config.clone());

        let names: Vec<&str> = summaries.iter().map(|s| s.table).collect();
        assert_eq!(
            names,
            vec!["categorias", "clientes", "productos", "pedidos", "detalle_pedidos"]
        );

        let details = summaries.last().unwrap().rows;
        assert!(details >= config.orders && details <= config.orders * 3);
        assert!(sql.contains("REFERENCES pedidos(id)"));
        assert_eq!(sql.matches("SELECT setval(").count(), 5);
    }

    #[test]
    fn test_generate_rejects_invalid_config() {
        let mut config = small_config(Variant::Bad);
        config.batch_size = 0;

        let mut gen = Generator::new(config);
        let mut writer = SqlWriter::new(Vec::new());
        let err = gen.generate(&mut writer, &mut |_, _, _| {}).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(writer.into_inner().is_empty());
    }

    #[test]
    fn test_validate() {
        let mut config = small_config(Variant::Normalized);
        assert!(config.validate().is_ok());

        config.products = 0;
        assert!(config.validate().is_err());

        config.variant = Variant::Bad;
        assert!(config.validate().is_ok());

        config.customers = 0;
        assert!(config.validate().is_err());

        config.orders = 0;
        assert!(config.validate().is_ok());

        config.batch_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sql_value_formatting() {
        assert_eq!(SqlValue::Float(12.5).to_postgres(), "12.50");
        assert_eq!(SqlValue::Bool(false).to_postgres(), "FALSE");
        assert_eq!(SqlValue::String("H&M's".to_string()).to_postgres(), "'H&M''s'");
    }
}
